use std::str::FromStr;

use tracing::debug;

use crate::command::{AddKind, Command, ListView, UpdateAction};
use crate::error::InputError;
use crate::notify::Notifier;

/// Every word the assistant understands as the first token of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Bye,
    Clear,
    Deadline,
    Delete,
    Done,
    Event,
    Find,
    List,
    Reminders,
    Todo,
}

const VOCABULARY: [(&str, Verb); 10] = [
    ("bye", Verb::Bye),
    ("clear", Verb::Clear),
    ("deadline", Verb::Deadline),
    ("delete", Verb::Delete),
    ("done", Verb::Done),
    ("event", Verb::Event),
    ("find", Verb::Find),
    ("list", Verb::List),
    ("reminders", Verb::Reminders),
    ("todo", Verb::Todo),
];

impl FromStr for Verb {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VOCABULARY
            .iter()
            .find(|(word, _)| word.eq_ignore_ascii_case(s))
            .map(|&(_, verb)| verb)
            .ok_or(InputError::UnknownCommand)
    }
}

impl Verb {
    /// Builds the command this verb stands for. Arguments are left for the command to read.
    pub fn into_command(self, tokens: Vec<String>) -> Command {
        match self {
            Verb::Bye => Command::Exit,
            Verb::Clear => Command::Clear,
            Verb::Todo => Command::Add { kind: AddKind::Todo, tokens },
            Verb::Deadline => Command::Add { kind: AddKind::Deadline, tokens },
            Verb::Event => Command::Add { kind: AddKind::Event, tokens },
            Verb::Done => Command::Update { action: UpdateAction::Complete, tokens },
            Verb::Delete => Command::Update { action: UpdateAction::Delete, tokens },
            Verb::List => Command::List { view: ListView::All, tokens },
            Verb::Find => Command::List { view: ListView::Find, tokens },
            Verb::Reminders => Command::List { view: ListView::Reminders, tokens },
        }
    }
}

/// Splits on single spaces. Interior empty tokens survive, trailing ones are dropped.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens: Vec<String> = line.split(' ').map(String::from).collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// Unknown verbs are reported to `notifier` and yield `None`.
pub fn parse(line: &str, notifier: &mut dyn Notifier) -> Option<Command> {
    let tokens = tokenize(line);
    let verb = tokens
        .first()
        .ok_or(InputError::UnknownCommand)
        .and_then(|first| first.parse::<Verb>());
    match verb {
        Ok(verb) => {
            debug!(?verb, args = tokens.len() - 1, "parsed command");
            Some(verb.into_command(tokens))
        }
        Err(e) => {
            debug!(line, "unrecognised command");
            notifier.report(&e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;

    fn parse_quiet(line: &str) -> Option<Command> {
        let mut ui = MemoryNotifier::default();
        let cmd = parse(line, &mut ui);
        assert_eq!(ui.errors.is_empty(), cmd.is_some());
        cmd
    }

    #[test]
    fn every_verb_maps_to_its_command() {
        assert!(matches!(parse_quiet("bye"), Some(Command::Exit)));
        assert!(matches!(parse_quiet("clear"), Some(Command::Clear)));
        assert!(matches!(parse_quiet("todo a"), Some(Command::Add { kind: AddKind::Todo, .. })));
        assert!(matches!(parse_quiet("deadline a"), Some(Command::Add { kind: AddKind::Deadline, .. })));
        assert!(matches!(parse_quiet("event a"), Some(Command::Add { kind: AddKind::Event, .. })));
        assert!(matches!(
            parse_quiet("done 1"),
            Some(Command::Update { action: UpdateAction::Complete, .. })
        ));
        assert!(matches!(
            parse_quiet("delete 1"),
            Some(Command::Update { action: UpdateAction::Delete, .. })
        ));
        assert!(matches!(parse_quiet("list"), Some(Command::List { view: ListView::All, .. })));
        assert!(matches!(parse_quiet("find x"), Some(Command::List { view: ListView::Find, .. })));
        assert!(matches!(
            parse_quiet("reminders"),
            Some(Command::List { view: ListView::Reminders, .. })
        ));
    }

    #[test]
    fn verbs_are_case_insensitive() {
        assert!(matches!(parse_quiet("LIST"), Some(Command::List { .. })));
        assert!(matches!(parse_quiet("ToDo read"), Some(Command::Add { .. })));
    }

    #[test]
    fn unknown_and_empty_lines_are_reported() {
        for line in ["blah", "", "   ", " list", "lists"] {
            let mut ui = MemoryNotifier::default();
            assert!(parse(line, &mut ui).is_none(), "{line:?} should not parse");
            assert_eq!(ui.errors, vec![InputError::UnknownCommand]);
        }
    }

    #[test]
    fn parser_does_not_check_arguments() {
        assert!(matches!(parse_quiet("todo"), Some(Command::Add { .. })));
        assert!(matches!(parse_quiet("done"), Some(Command::Update { .. })));
    }

    #[test]
    fn tokens_keep_interior_gaps() {
        assert_eq!(tokenize("todo  a b  "), vec!["todo", "", "a", "b"]);
        assert!(tokenize("").is_empty());
    }
}
