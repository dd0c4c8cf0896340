use std::fmt;
use std::path::{Path, PathBuf};

use notify::EventKind;
use notify::event::{ModifyKind, RenameMode};

/// What happened to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Create,
    Write,
    Remove,
    Rename,
}

impl Op {
    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Write => "write",
            Self::Remove => "remove",
            Self::Rename => "rename",
        }
    }

    /// Remove or rename: the path may be gone after the event.
    #[inline]
    pub fn may_remove(self) -> bool {
        matches!(self, Self::Remove | Self::Rename)
    }
}

/// One raw filesystem event: absolute path plus operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub op: Op,
}

impl ChangeEvent {
    pub fn new(path: impl Into<PathBuf>, op: Op) -> Self {
        Self {
            path: path.into(),
            op,
        }
    }

    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Op::Create)
    }

    pub fn write(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Op::Write)
    }

    pub fn remove(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Op::Remove)
    }

    pub fn rename(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Op::Rename)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Translate a `notify` event into change events.
    ///
    /// A two-sided rename yields `rename(from)` and `create(to)`.
    /// Metadata-only changes (mtime/atime/chmod noise) yield nothing.
    pub fn from_notify(event: &notify::Event) -> Vec<Self> {
        let op = match event.kind {
            EventKind::Create(_) => Op::Create,
            EventKind::Remove(_) => Op::Remove,
            EventKind::Modify(ModifyKind::Metadata(_)) => return Vec::new(),
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                return match event.paths.as_slice() {
                    [from, to] => vec![Self::rename(from.clone()), Self::create(to.clone())],
                    paths => paths.iter().cloned().map(Self::rename).collect(),
                };
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Op::Create,
            EventKind::Modify(ModifyKind::Name(_)) => Op::Rename,
            EventKind::Modify(_) => Op::Write,
            _ => return Vec::new(),
        };

        event
            .paths
            .iter()
            .map(|path| Self::new(path.clone(), op))
            .collect()
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op.label().to_uppercase(), self.path.display())
    }
}
