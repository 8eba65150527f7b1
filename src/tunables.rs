//! Editing a fixed set of tunables
//!
//! This is the state behind a simple tunable editor, with the presentation
//! left to the caller. Each [`Entry`] remembers the value it had when the
//! editor was opened, and every operation reports a [`Status`] the caller
//! can show next to it.
use crate::{error::Error, sysctl::Sysctl};
use log::{info, warn};

/// Socket buffer sizes
pub const NETWORK_MEMORY: &[&str] = &[
    "net.core.rmem_default",
    "net.core.rmem_max",
    "net.core.wmem_default",
    "net.core.wmem_max",
];

/// [`NETWORK_MEMORY`], and the TCP memory triples.
pub const NETWORK_MEMORY_EXTENDED: &[&str] = &[
    "net.core.rmem_default",
    "net.core.rmem_max",
    "net.core.wmem_default",
    "net.core.wmem_max",
    "net.ipv4.tcp_rmem",
    "net.ipv4.tcp_wmem",
    "net.ipv4.tcp_mem",
];

/// State of an [`Entry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Nothing to do
    Idle,

    /// The pending value differs from the live one, which is included.
    Warn(String),

    /// An operation failed, with the error message.
    Error(String),
}

impl Status {
    fn from_error(e: &Error) -> Self {
        Self::Error(e.to_string())
    }
}

/// A tunable being edited
#[derive(Debug, Clone)]
pub struct Entry {
    key: String,
    original: Option<String>,
    status: Status,
}

impl Entry {
    /// Key as given to [`Editor::open`]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value when the editor was opened, if it could be read
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// Status of the last operation on this entry
    pub fn status(&self) -> &Status {
        &self.status
    }
}

/// Editor for a fixed set of tunables
#[derive(Debug)]
pub struct Editor {
    sysctl: Sysctl,
    entries: Vec<Entry>,
    dry_run: bool,
}

impl Editor {
    /// Open an editor for `keys`, reading each once.
    ///
    /// Keys that can't be read are still included, with no original value
    /// and an error status.
    pub fn open<K: AsRef<str>>(sysctl: Sysctl, keys: &[K]) -> Self {
        let entries = keys
            .iter()
            .map(|key| {
                let key = key.as_ref().to_owned();
                match sysctl.read(&key) {
                    Ok(v) => Entry {
                        key,
                        original: Some(v),
                        status: Status::Idle,
                    },
                    Err(e) => Entry {
                        key,
                        original: None,
                        status: Status::from_error(&e),
                    },
                }
            })
            .collect();
        Self {
            sysctl,
            entries,
            dry_run: false,
        }
    }

    /// Don't actually write anything, only log what would be written.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn sysctl(&self) -> &Sysctl {
        &self.sysctl
    }

    /// Value of `key` when the editor was opened
    pub fn original(&self, key: &str) -> Option<&str> {
        self.find(key).and_then(Entry::original)
    }

    /// Current live value of `key`
    pub fn reload(&mut self, key: &str) -> Option<String> {
        let idx = self.index(key)?;
        match self.sysctl.read(key) {
            Ok(v) => {
                self.entries[idx].status = Status::Idle;
                Some(v)
            }
            Err(e) => {
                self.entries[idx].status = Status::from_error(&e);
                None
            }
        }
    }

    /// Compare `pending` to the live value of `key`.
    ///
    /// Returns [`Status::Warn`] with the live value if they differ.
    pub fn check(&mut self, key: &str, pending: &str) -> Status {
        if self.index(key).is_none() {
            return unknown(key);
        }
        let status = match self.sysctl.read(key) {
            Ok(live) if live == pending.trim() => Status::Idle,
            Ok(live) => Status::Warn(live),
            Err(e) => Status::from_error(&e),
        };
        self.set_status(key, status)
    }

    /// Write `pending` to `key`
    pub fn apply(&mut self, key: &str, pending: &str) -> Status {
        if self.index(key).is_none() {
            return unknown(key);
        }
        if self.dry_run {
            info!("write `{}` to: {}", pending.trim(), key);
            return self.set_status(key, Status::Idle);
        }
        let status = match self.sysctl.write(key, pending) {
            Ok(()) => Status::Idle,
            Err(e) => Status::from_error(&e),
        };
        self.set_status(key, status)
    }

    /// Write the original value of `key` back
    pub fn revert(&mut self, key: &str) -> Status {
        match self.original(key).map(ToOwned::to_owned) {
            Some(orig) => self.apply(key, &orig),
            None if self.index(key).is_some() => {
                let status = Status::Error(format!("no original value for {}", key));
                self.set_status(key, status)
            }
            None => unknown(key),
        }
    }

    fn find(&self, key: &str) -> Option<&Entry> {
        self.index(key).map(|i| &self.entries[i])
    }

    /// Entries are matched by canonical path, so any spelling of a key works.
    fn index(&self, key: &str) -> Option<usize> {
        let path = self.sysctl.path(key);
        self.entries
            .iter()
            .position(|e| self.sysctl.path(&e.key) == path)
    }

    fn set_status(&mut self, key: &str, status: Status) -> Status {
        let idx = match self.index(key) {
            Some(i) => i,
            None => return unknown(key),
        };
        match &status {
            Status::Warn(live) => warn!("{} changed, live value is `{}`", key, live),
            Status::Error(e) => warn!("{}: {}", key, e),
            Status::Idle => (),
        }
        self.entries[idx].status = status.clone();
        status
    }
}

fn unknown(key: &str) -> Status {
    Status::Error(format!("unknown key {}", key))
}
