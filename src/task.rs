use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::date;
use crate::error::InputError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Todo,
    /// `by` is what the user typed; `due` is the parsed value it renders from.
    Deadline { by: String, due: NaiveDateTime },
    Event { at: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    name: String,
    done: bool,
    kind: Kind,
}

impl Task {
    pub fn todo(name: impl Into<String>) -> Result<Self, InputError> {
        Self::with_kind(name.into(), Kind::Todo)
    }

    /// Fails with `EmptyDescription` before looking at the date.
    pub fn deadline(name: impl Into<String>, by: impl Into<String>) -> Result<Self, InputError> {
        let name = checked_name(name.into())?;
        let by = by.into();
        let due = date::parse(&by).map_err(|e| {
            tracing::debug!(error = %e, "rejected deadline date");
            InputError::InvalidDate
        })?;
        Self::with_kind(name, Kind::Deadline { by, due })
    }

    pub fn event(name: impl Into<String>, at: impl Into<String>) -> Result<Self, InputError> {
        Self::with_kind(name.into(), Kind::Event { at: at.into() })
    }

    fn with_kind(name: String, kind: Kind) -> Result<Self, InputError> {
        Ok(Self {
            name: checked_name(name)?,
            done: false,
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Returns `false` if the task was already done. There is no way back.
    pub fn mark_done(&mut self) -> bool {
        if self.done {
            return false;
        }
        self.done = true;
        true
    }

    pub fn due(&self) -> Option<NaiveDateTime> {
        match &self.kind {
            Kind::Deadline { due, .. } => Some(*due),
            _ => None,
        }
    }

    fn tag(&self) -> char {
        match self.kind {
            Kind::Todo => 'T',
            Kind::Deadline { .. } => 'D',
            Kind::Event { .. } => 'E',
        }
    }
}

fn checked_name(name: String) -> Result<String, InputError> {
    if name.trim().is_empty() {
        return Err(InputError::EmptyDescription);
    }
    Ok(name)
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.done { '✓' } else { '✗' };
        write!(f, "[{}][{}] {}", self.tag(), mark, self.name)?;
        match &self.kind {
            Kind::Todo => Ok(()),
            Kind::Deadline { due, .. } => write!(f, " (by: {})", date::format(due)),
            Kind::Event { at } => write!(f, " (at: {})", at),
        }
    }
}

/// On-disk shape of a task, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Record {
    Todo { done: bool, name: String },
    Deadline { done: bool, name: String, by: String },
    Event { done: bool, name: String, at: String },
}

impl From<&Task> for Record {
    fn from(task: &Task) -> Self {
        let done = task.done;
        let name = task.name.clone();
        match &task.kind {
            Kind::Todo => Record::Todo { done, name },
            Kind::Deadline { by, .. } => Record::Deadline {
                done,
                name,
                by: by.clone(),
            },
            Kind::Event { at } => Record::Event {
                done,
                name,
                at: at.clone(),
            },
        }
    }
}

impl TryFrom<Record> for Task {
    type Error = String;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let (built, done) = match record {
            Record::Todo { done, name } => (Task::todo(name), done),
            Record::Deadline { done, name, by } => (Task::deadline(name, by), done),
            Record::Event { done, name, at } => (Task::event(name, at), done),
        };
        let mut task = built.map_err(|e| e.to_string())?;
        task.done = done;
        Ok(task)
    }
}
