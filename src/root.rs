//! Where the sysctl tree is mounted
use crate::{
    error::RootError,
    util::{DELIM, DELIM_STR, ROOT_ENV, SYSCTL_PATH},
};
use nix::sys::statfs::{statfs, PROC_SUPER_MAGIC};
use std::{
    env,
    fmt,
    path::{Component, Path, PathBuf},
};

pub type Result<T, E = RootError> = std::result::Result<T, E>;

/// Mount point of the sysctl tree, as a list of path segments.
///
/// An absolute root starts with an empty segment, so `/proc/sys` is
/// `["", "proc", "sys"]`.
///
/// This is configuration, and is never modified after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    segments: Vec<String>,
}

impl Root {
    /// Create a root from `path`
    ///
    /// Empty and `.` segments are dropped.
    ///
    /// # Errors
    ///
    /// - If `path` is empty
    /// - If `path` is not valid UTF-8
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut segments = Vec::new();
        for c in path.components() {
            match c {
                Component::RootDir => segments.push(String::new()),
                Component::Normal(s) => segments.push(
                    s.to_str()
                        .ok_or_else(|| RootError::InvalidUtf8(path.display().to_string()))?
                        .to_owned(),
                ),
                Component::ParentDir => segments.push("..".into()),
                Component::CurDir | Component::Prefix(_) => continue,
            }
        }
        if segments.is_empty() {
            return Err(RootError::Empty);
        }
        Ok(Self { segments })
    }

    /// Create a root from the [`ROOT_ENV`] environment variable, falling back
    /// to [`Root::default`] if it is unset.
    ///
    /// # Errors
    ///
    /// - If the variable is set but empty
    /// - If the variable is not valid UTF-8
    pub fn from_env() -> Result<Self> {
        match env::var(ROOT_ENV) {
            Ok(s) => Self::new(s),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(s)) => {
                Err(RootError::InvalidUtf8(s.to_string_lossy().into_owned()))
            }
        }
    }

    /// Root segments, in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Root as a path
    pub fn path(&self) -> PathBuf {
        match self.segments.as_slice() {
            [only] if only.is_empty() => PathBuf::from(DELIM_STR),
            s => PathBuf::from(s.join(DELIM_STR)),
        }
    }

    /// Whether the root is on a mounted procfs.
    ///
    /// This is informational, nothing else in this crate requires it, so
    /// roots pointing at ordinary directories work fine.
    ///
    /// # Implementation
    ///
    /// This uses `statfs(2)` and checks for `PROC_SUPER_MAGIC`.
    ///
    /// # Errors
    ///
    /// - If the root doesn't exist or can't be accessed
    pub fn is_procfs(&self) -> Result<bool> {
        let stat = statfs(self.path().as_path()).map_err(std::io::Error::from)?;
        Ok(stat.filesystem_type() == PROC_SUPER_MAGIC)
    }
}

impl Default for Root {
    fn default() -> Self {
        Self {
            segments: SYSCTL_PATH.split(DELIM).map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn default_segments() {
        let root = Root::default();
        assert_eq!(root.segments(), ["", "proc", "sys"]);
        assert_eq!(root.path(), Path::new("/proc/sys"));
        assert_eq!(root.to_string(), "/proc/sys");
    }

    #[test]
    fn new() -> Result<()> {
        assert_eq!(Root::new("/proc/sys")?, Root::default());
        assert_eq!(Root::new("/proc//sys/")?, Root::default());
        assert_eq!(Root::new("/")?.segments(), [""]);
        assert_eq!(Root::new("/")?.path(), Path::new("/"));
        assert_eq!(Root::new("proc/sys")?.segments(), ["proc", "sys"]);
        assert!(matches!(Root::new(""), Err(RootError::Empty)));
        Ok(())
    }

    #[test]
    fn from_env() -> Result<()> {
        env::remove_var(ROOT_ENV);
        assert_eq!(Root::from_env()?, Root::default());

        env::set_var(ROOT_ENV, "/tmp/fake/proc/sys");
        assert_eq!(Root::from_env()?.path(), Path::new("/tmp/fake/proc/sys"));

        env::set_var(ROOT_ENV, "");
        assert!(matches!(Root::from_env(), Err(RootError::Empty)));

        env::remove_var(ROOT_ENV);
        Ok(())
    }

    #[test]
    fn not_procfs() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let root = Root::new(dir.path())?;
        assert!(!root.is_procfs()?);

        let missing = Root::new(dir.path().join("missing"))?;
        assert!(matches!(missing.is_procfs(), Err(RootError::Io(_))));
        Ok(())
    }

    #[test]
    #[ignore = "requires a mounted /proc"]
    fn real_procfs() -> Result<()> {
        assert!(Root::default().is_procfs()?);
        Ok(())
    }
}
