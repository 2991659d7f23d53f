use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::error::InputError;
use crate::notify::Notifier;
use crate::persistence::Store;
use crate::task::Task;

/// Deadlines due within this many days (and not today) are reminded about.
pub const DAYS_TO_REMIND: i64 = 3;

pub const REMINDERS_BANNER: &str = "===============REMINDERS================";
pub const REMINDERS_FOOTER: &str = "========================================";

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// The live tasks plus the cached set of approaching deadlines.
///
/// `reminders` holds positions into `items`, in list order. It only ever points at
/// incomplete deadlines and is rebuilt by [`TaskList::refresh_reminders`].
#[derive(Debug)]
pub struct TaskList {
    items: Vec<Task>,
    reminders: Vec<usize>,
    clock: fn() -> NaiveDateTime,
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TaskList {
    pub fn new(items: Vec<Task>) -> Self {
        Self {
            items,
            reminders: Vec::new(),
            clock: local_now,
        }
    }

    /// Replaces the wall clock used for the reminder window.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn items(&self) -> &[Task] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn reminders(&self) -> impl Iterator<Item = &Task> {
        self.reminders.iter().map(move |&i| &self.items[i])
    }

    pub fn add(&mut self, task: Task, notifier: &mut dyn Notifier, store: &dyn Store) {
        debug!(task = %task, "adding task");
        let is_deadline = task.due().is_some();
        self.items.push(task);
        if is_deadline {
            self.refresh_reminders();
        }
        let added = &self.items[self.items.len() - 1];
        notifier.show(&format!(
            "Got it. I've added this task:\n  {}\nNow you have {} tasks in the list.",
            added,
            self.items.len()
        ));
        self.persist(notifier, store);
    }

    pub fn delete(&mut self, index: &str, notifier: &mut dyn Notifier, store: &dyn Store) {
        let pos = match self.resolve(index) {
            Ok(pos) => pos,
            Err(e) => return notifier.report(&e),
        };
        let removed = self.items.remove(pos);
        self.reminders = self
            .reminders
            .iter()
            .filter(|&&i| i != pos)
            .map(|&i| if i > pos { i - 1 } else { i })
            .collect();
        debug!(task = %removed, pos, "deleted task");
        notifier.show(&format!(
            "Noted. I've removed this task:\n  {}\nNow you have {} tasks in the list.",
            removed,
            self.items.len()
        ));
        self.persist(notifier, store);
    }

    pub fn complete(&mut self, index: &str, notifier: &mut dyn Notifier, store: &dyn Store) {
        let pos = match self.resolve(index) {
            Ok(pos) => pos,
            Err(e) => return notifier.report(&e),
        };
        if !self.items[pos].mark_done() {
            notifier.show("This task has already been marked as done!");
            return;
        }
        if self.reminders.contains(&pos) {
            self.refresh_reminders();
        }
        debug!(task = %self.items[pos], pos, "completed task");
        notifier.show(&format!("Nice! I've marked this task as done:\n  {}", self.items[pos]));
        self.persist(notifier, store);
    }

    pub fn clear(&mut self, notifier: &mut dyn Notifier, store: &dyn Store) {
        debug!(count = self.items.len(), "clearing all tasks");
        self.items.clear();
        self.reminders.clear();
        notifier.show("All tasks have been removed. Your list is now empty.");
        self.persist(notifier, store);
    }

    /// Full rescan for incomplete deadlines due 1 to [`DAYS_TO_REMIND`] calendar days from now.
    pub fn refresh_reminders(&mut self) {
        let today = (self.clock)().date();
        self.reminders = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_done())
            .filter_map(|(i, t)| t.due().map(|due| (i, due.date())))
            .filter(|&(_, due)| within_window(today, due))
            .map(|(i, _)| i)
            .collect();
        debug!(count = self.reminders.len(), "refreshed reminders");
    }

    pub fn render_all(&self) -> String {
        let mut out = String::from("Here are the tasks in your list:");
        for (i, task) in self.items.iter().enumerate() {
            out.push_str(&format!("\n{}.{}", i + 1, task));
        }
        out
    }

    /// Literal, case-sensitive substring match on names. Indices stay those of the full list.
    pub fn render_matching(&self, term: &str) -> String {
        let mut out = String::from("Here are the matching tasks in your list:");
        for (i, task) in self.items.iter().enumerate() {
            if task.name().contains(term) {
                out.push_str(&format!("\n{}.{}", i + 1, task));
            }
        }
        out
    }

    pub fn render_reminders(&self) -> String {
        let mut out = format!("{}\n", REMINDERS_BANNER);
        if self.reminders.is_empty() {
            out.push_str("You have no approaching deadlines. Great! :-)\n");
        } else {
            out.push_str("You have some approaching deadlines:\n");
            for (i, task) in self.reminders().enumerate() {
                out.push_str(&format!("{}.{}\n", i + 1, task));
            }
        }
        out.push_str(REMINDERS_FOOTER);
        out
    }

    /// Turns a 1-based index typed by the user into a position in `items`.
    fn resolve(&self, index: &str) -> Result<usize, InputError> {
        let n: i64 = index.trim().parse().map_err(|_| InputError::InvalidIndex)?;
        if n < 1 || n > self.items.len() as i64 {
            return Err(InputError::IndexOutOfBounds);
        }
        Ok((n - 1) as usize)
    }

    fn persist(&self, notifier: &mut dyn Notifier, store: &dyn Store) {
        if let Err(e) = store.save(&self.items) {
            warn!(error = %e, "save failed; keeping in-memory list");
            notifier.report_file_error(&e);
        }
    }
}

fn within_window(today: NaiveDate, due: NaiveDate) -> bool {
    let days = (due - today).num_days();
    days > 0 && days <= DAYS_TO_REMIND
}
