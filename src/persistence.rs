use std::{
    cell::{Cell, RefCell},
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use tracing::{info, warn};

use crate::error::{CorruptRecord, StoreError};
use crate::task::{Record, Task};

/// What came back from disk: the tasks that parsed, and the lines that didn't.
#[derive(Debug, Default)]
pub struct Loaded {
    pub tasks: Vec<Task>,
    pub corrupt: Vec<CorruptRecord>,
}

/// Full-collection load/save. Every save overwrites everything.
pub trait Store {
    fn load(&self) -> Result<Loaded, StoreError>;
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

pub fn default_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("dev", "taskbot", "taskbot")
        .ok_or_else(|| anyhow!("Cannot determine data directory"))?;
    Ok(proj.data_dir().join("tasks.jsonl"))
}

/// One JSON record per line.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for FileStore {
    fn load(&self) -> Result<Loaded, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Loaded::default()),
            Err(e) => return Err(e.into()),
        };
        let loaded = decode(&text);
        info!(
            path = %self.path.display(),
            tasks = loaded.tasks.len(),
            corrupt = loaded.corrupt.len(),
            "loaded tasks"
        );
        Ok(loaded)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let bytes = encode(tasks)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("jsonl.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), tasks = tasks.len(), "saved tasks");
        Ok(())
    }
}

fn encode(tasks: &[Task]) -> Result<Vec<u8>, StoreError> {
    let mut out = Vec::new();
    for task in tasks {
        serde_json::to_writer(&mut out, &Record::from(task))?;
        out.push(b'\n');
    }
    Ok(out)
}

fn decode(text: &str) -> Loaded {
    let mut loaded = Loaded::default();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parsed = serde_json::from_str::<Record>(line)
            .map_err(|e| e.to_string())
            .and_then(Task::try_from);
        match parsed {
            Ok(task) => loaded.tasks.push(task),
            Err(reason) => {
                let record = CorruptRecord { line: i + 1, reason };
                warn!(%record, "skipping unreadable task record");
                loaded.corrupt.push(record);
            }
        }
    }
    loaded
}

/// Keeps the last saved list in memory. `fail_saves` makes every save error out.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: RefCell<Vec<Task>>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl MemoryStore {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            saved: RefCell::new(tasks),
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Vec<Task> {
        self.saved.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Loaded, StoreError> {
        Ok(Loaded {
            tasks: self.saved(),
            corrupt: Vec::new(),
        })
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        if self.fail_saves.get() {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only store").into());
        }
        *self.saved.borrow_mut() = tasks.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
