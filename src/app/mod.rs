pub mod console;
pub mod input;
pub mod ui;

use chrono::NaiveDateTime;
use tracing::{error, info};

use crate::command::Outcome;
use crate::error::{CorruptRecord, InputError, StoreError};
use crate::notify::{Notifier, FILE_ERROR, UNKNOWN_TASK};
use crate::parser;
use crate::persistence::Store;
use crate::tasklist::TaskList;

pub const WELCOME: &str = "Hello! I'm Taskbot\nWhat can I do for you?";

/// A running assistant: the live list and where it gets saved.
pub struct Session<S: Store> {
    tasks: TaskList,
    store: S,
}

impl<S: Store> Session<S> {
    /// Loads the store. A failed load is reported and returned; there is no session without it.
    pub fn open(store: S, notifier: &mut dyn Notifier) -> Result<Self, StoreError> {
        let loaded = match store.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                error!(error = %e, "could not load tasks");
                notifier.report_file_error(&e);
                return Err(e);
            }
        };
        for record in &loaded.corrupt {
            notifier.report_unknown_task(record);
        }
        let mut tasks = TaskList::new(loaded.tasks);
        tasks.refresh_reminders();
        info!(tasks = tasks.len(), "session opened");
        Ok(Self { tasks, store })
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.tasks = std::mem::take(&mut self.tasks).with_clock(clock);
        self.tasks.refresh_reminders();
        self
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Welcome text followed by whatever deadlines are coming up.
    pub fn greet(&self, notifier: &mut dyn Notifier) {
        notifier.show(WELCOME);
        notifier.show_raw(&self.tasks.render_reminders());
    }

    pub fn handle_line(&mut self, line: &str, notifier: &mut dyn Notifier) -> Outcome {
        match parser::parse(line, notifier) {
            Some(command) => command.execute(&mut self.tasks, notifier, &self.store),
            None => Outcome::Continue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    User(String),
    Reply(String),
    Raw(String),
    Error(String),
}

impl Entry {
    pub fn text(&self) -> &str {
        match self {
            Entry::User(t) | Entry::Reply(t) | Entry::Raw(t) | Entry::Error(t) => t,
        }
    }
}

/// Conversation shown in the TUI.
#[derive(Debug, Default)]
pub struct Transcript {
    pub entries: Vec<Entry>,
}

impl Transcript {
    pub fn line_count(&self) -> usize {
        self.entries.iter().map(|e| e.text().lines().count().max(1)).sum()
    }
}

impl Notifier for Transcript {
    fn show(&mut self, text: &str) {
        self.entries.push(Entry::Reply(text.to_string()));
    }

    fn show_raw(&mut self, text: &str) {
        self.entries.push(Entry::Raw(text.to_string()));
    }

    fn report(&mut self, err: &InputError) {
        self.entries.push(Entry::Error(err.to_string()));
    }

    fn report_file_error(&mut self, _err: &StoreError) {
        self.entries.push(Entry::Error(FILE_ERROR.to_string()));
    }

    fn report_unknown_task(&mut self, _record: &CorruptRecord) {
        self.entries.push(Entry::Error(UNKNOWN_TASK.to_string()));
    }
}

/// Central TUI state
pub struct App<S: Store> {
    pub session: Session<S>,
    pub transcript: Transcript,
    pub input: String,
    /// Lines scrolled up from the bottom of the transcript.
    pub scroll: usize,
    pub running: bool,
}

impl<S: Store> App<S> {
    pub fn new(session: Session<S>, transcript: Transcript) -> Self {
        Self {
            session,
            transcript,
            input: String::new(),
            scroll: 0,
            running: true,
        }
    }

    /// Sends the input line to the session and snaps the view back to the newest output.
    pub fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.transcript.entries.push(Entry::User(line.clone()));
        if self.session.handle_line(&line, &mut self.transcript) == Outcome::Exit {
            self.running = false;
        }
        self.scroll = 0;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let max = self.transcript.line_count().saturating_sub(1);
        self.scroll = (self.scroll + lines).min(max);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }
}
