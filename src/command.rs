use tracing::debug;

use crate::error::InputError;
use crate::notify::Notifier;
use crate::persistence::Store;
use crate::task::Task;
use crate::tasklist::TaskList;

pub const FAREWELL: &str = "Bye. Hope to see you again soon!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddKind {
    Todo,
    Deadline,
    Event,
}

impl AddKind {
    /// The flag separating the description from the extra parameter, if any.
    fn flag(self) -> Option<(&'static str, InputError)> {
        match self {
            AddKind::Todo => None,
            AddKind::Deadline => Some(("/by", InputError::MissingDeadlineParam)),
            AddKind::Event => Some(("/at", InputError::MissingEventParam)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    Complete,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    All,
    Find,
    Reminders,
}

/// One parsed input line. Variants that take arguments keep the raw tokens and read
/// them when executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { kind: AddKind, tokens: Vec<String> },
    Update { action: UpdateAction, tokens: Vec<String> },
    List { view: ListView, tokens: Vec<String> },
    Clear,
    Exit,
}

/// Tells the host loop whether to keep reading lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

impl Command {
    pub fn execute(&self, tasks: &mut TaskList, notifier: &mut dyn Notifier, store: &dyn Store) -> Outcome {
        match self {
            Command::Add { kind, tokens } => match build_task(*kind, args(tokens)) {
                Ok(task) => tasks.add(task, notifier, store),
                Err(e) => {
                    debug!(error = ?e, "rejected new task");
                    notifier.report(&e);
                }
            },
            Command::Update { action, tokens } => match args(tokens).first() {
                None => notifier.report(&InputError::MissingIndex),
                Some(index) => match action {
                    UpdateAction::Complete => tasks.complete(index, notifier, store),
                    UpdateAction::Delete => tasks.delete(index, notifier, store),
                },
            },
            Command::List { view, tokens } => match view {
                ListView::All => notifier.show(&tasks.render_all()),
                ListView::Find => {
                    let term = args(tokens).join(" ");
                    if term.is_empty() {
                        notifier.report(&InputError::EmptySearchTerm);
                    } else {
                        notifier.show(&tasks.render_matching(&term));
                    }
                }
                ListView::Reminders => {
                    tasks.refresh_reminders();
                    notifier.show_raw(&tasks.render_reminders());
                }
            },
            Command::Clear => tasks.clear(notifier, store),
            Command::Exit => {
                notifier.show(FAREWELL);
                return Outcome::Exit;
            }
        }
        Outcome::Continue
    }
}

/// Everything after the verb.
fn args(tokens: &[String]) -> &[String] {
    tokens.get(1..).unwrap_or(&[])
}

fn build_task(kind: AddKind, args: &[String]) -> Result<Task, InputError> {
    let Some((flag, missing)) = kind.flag() else {
        return Task::todo(args.join(" ").trim());
    };

    let flag_at = args.iter().position(|t| t == flag);
    let name = args[..flag_at.unwrap_or(args.len())].join(" ");
    if name.trim().is_empty() {
        return Err(InputError::EmptyDescription);
    }
    let param = flag_at
        .map(|at| args[at + 1..].join(" "))
        .filter(|p| !p.trim().is_empty())
        .ok_or(missing)?;

    match kind {
        AddKind::Deadline => Task::deadline(name.trim(), param.trim()),
        _ => Task::event(name.trim(), param.trim()),
    }
}
