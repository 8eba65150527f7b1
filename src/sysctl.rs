//! Reading and writing kernel tunables
//!
//! # Examples
//!
//! Print a tunable
//!
//! ```rust,no_run
//! # use linsysctl::sysctl::Sysctl;
//! let sysctl = Sysctl::default();
//!
//! println!("rmem_max = {}", sysctl.read("net.core.rmem_max").unwrap());
//! ```
//!
//! Halve it, then put it back
//!
//! ```rust,no_run
//! # use linsysctl::sysctl::Sysctl;
//! let sysctl = Sysctl::default();
//!
//! let orig = sysctl.read("net/core/rmem_max").unwrap();
//! let half = orig.parse::<u64>().unwrap() / 2;
//! sysctl.write("net/core/rmem_max", &half.to_string()).unwrap();
//! sysctl.write("net/core/rmem_max", &orig).unwrap();
//! ```
//!
//! # Implementation
//!
//! Every operation is a single blocking open and read or write of the
//! canonical path. Nothing is retried or locked, the kernel owns these files.
//!
//! See the [kernel docs][1] for what the tunables mean.
//!
//! [1]: https://www.kernel.org/doc/html/latest/admin-guide/sysctl/index.html
use crate::{
    error::{Error, Result},
    key::{canonicalize, printable},
    root::Root,
    value::{format_for_read, format_for_write},
};
use log::{debug, warn};
use std::{
    fs::{self, File},
    io::{self, prelude::*, BufReader},
    path::PathBuf,
};
use walkdir::WalkDir;

/// Access to the tunables under a [`Root`]
#[derive(Debug, Clone, Default)]
pub struct Sysctl {
    root: Root,
}

impl Sysctl {
    pub fn new(root: Root) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    /// Canonical path to `key`, see [`canonicalize`]
    pub fn path(&self, key: &str) -> PathBuf {
        canonicalize(&self.root, key)
    }

    /// `key` for display, see [`printable`]
    pub fn printable_key(&self, key: &str) -> String {
        printable(&self.root, key)
    }

    /// Read the value of `key`.
    ///
    /// Only the first line is returned, trimmed. Multiple tokens are returned
    /// as-is.
    ///
    /// # Errors
    ///
    /// - [`Error::Read`] if the tunable couldn't be opened or read, such as if
    ///   it doesn't exist or is write-only.
    pub fn read(&self, key: &str) -> Result<String> {
        let path = self.path(key);
        debug!("reading {}", path.display());

        let mut line = String::new();
        let res = File::open(&path).and_then(|f| BufReader::new(f).read_line(&mut line));
        match res {
            Ok(_) => Ok(format_for_read(&line)),
            Err(e) => {
                let e = Error::read(e, path);
                warn!("{}", e);
                Err(e)
            }
        }
    }

    /// Write `value` to `key`.
    ///
    /// Surrounding whitespace is removed from `value`, and it is written
    /// without a trailing newline, in one `write(2)`.
    ///
    /// The tunable must already exist, it is never created.
    ///
    /// # Errors
    ///
    /// - [`Error::Write`] if the tunable couldn't be opened or written, or the
    ///   kernel rejected `value`. The tunable is left however the kernel left
    ///   it.
    pub fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key);
        let data = format_for_write(value);
        debug!("writing `{}` to {}", data, path.display());

        let res = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .and_then(|mut f| f.write(data.as_bytes()));
        let res = match res {
            Ok(n) if n == data.len() => Ok(()),
            Ok(n) => Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write, {} of {} bytes", n, data.len()),
            )),
            Err(e) => Err(e),
        };
        res.map_err(|e| {
            let e = Error::write(e, path, value);
            warn!("{}", e);
            e
        })
    }

    /// Every tunable under the root, as printable keys, sorted.
    ///
    /// This includes tunables you don't have permission to read.
    ///
    /// # Errors
    ///
    /// - [`Error::Read`] if any directory couldn't be listed.
    pub fn keys(&self) -> Result<Vec<String>> {
        let root = self.root.path();
        let mut keys = Vec::new();
        for entry in WalkDir::new(&root).follow_links(false) {
            let entry = entry.map_err(|e| {
                let path = e.path().map_or_else(|| root.clone(), |p| p.to_path_buf());
                Error::read(e.into(), path)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            keys.push(self.printable_key(&entry.path().to_string_lossy()));
        }
        keys.sort_unstable();
        Ok(keys)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::Result;
    use std::path::Path;
    use tempfile::TempDir;

    /// A fake `/proc/sys` in a temporary directory
    pub(crate) fn fake_root(entries: &[(&str, &str)]) -> Result<(TempDir, Sysctl)> {
        let dir = tempfile::tempdir()?;
        let root = dir.path().join("proc/sys");
        for (key, value) in entries {
            let path = root.join(key);
            fs::create_dir_all(path.parent().unwrap())?;
            fs::write(path, value)?;
        }
        fs::create_dir_all(&root)?;
        Ok((dir, Sysctl::new(Root::new(root)?)))
    }

    #[test]
    fn read() -> Result<()> {
        let (_dir, sysctl) = fake_root(&[("net/core/rmem_max", "212992\n")])?;
        assert_eq!(sysctl.read("net.core.rmem_max")?, "212992");
        assert_eq!(sysctl.read("net/core/rmem_max")?, "212992");
        Ok(())
    }

    #[test]
    fn read_multi_token() -> Result<()> {
        let (_dir, sysctl) = fake_root(&[("net/ipv4/tcp_rmem", "4096\t87380\t6291456\n")])?;
        assert_eq!(sysctl.read("net.ipv4.tcp_rmem")?, "4096\t87380\t6291456");
        Ok(())
    }

    #[test]
    fn read_missing() -> Result<()> {
        let (_dir, sysctl) = fake_root(&[])?;
        let err = sysctl.read("bogus.key").unwrap_err();
        assert!(err.is_read());
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.path(), sysctl.root().path().join("bogus/key"));
        assert!(!err.reason().to_string().is_empty());
        Ok(())
    }

    #[test]
    fn read_directory() -> Result<()> {
        let (_dir, sysctl) = fake_root(&[("net/core/rmem_max", "1")])?;
        let err = sysctl.read("net.core").unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        Ok(())
    }

    #[test]
    fn write_then_read() -> Result<()> {
        let (_dir, sysctl) = fake_root(&[("net/core/rmem_max", "4096\n")])?;
        sysctl.write("net.core.rmem_max", " 212992\n")?;
        assert_eq!(sysctl.read("net.core.rmem_max")?, "212992");
        assert_eq!(
            fs::read_to_string(sysctl.path("net.core.rmem_max"))?,
            "212992"
        );
        Ok(())
    }

    #[test]
    fn write_missing() -> Result<()> {
        let (_dir, sysctl) = fake_root(&[])?;
        let err = sysctl.write("bogus.key", " 1 ").unwrap_err();
        match &err {
            Error::Write {
                reason,
                path,
                value,
            } => {
                assert_eq!(reason.kind(), io::ErrorKind::NotFound);
                assert_eq!(path, &sysctl.root().path().join("bogus/key"));
                assert_eq!(value, " 1 ");
            }
            e => panic!("expected write error, got {:?}", e),
        }
        // Reported with the value as given, not as written
        assert!(err.to_string().contains("write  1  to "), "{}", err);
        assert!(!sysctl.path("bogus.key").exists());
        Ok(())
    }

    #[test]
    fn keys() -> Result<()> {
        let (_dir, sysctl) = fake_root(&[
            ("vm/swappiness", "60"),
            ("net/core/rmem_max", "212992"),
            ("net/ipv4/tcp_rmem", "4096 87380 6291456"),
        ])?;
        assert_eq!(
            sysctl.keys()?,
            ["net.core.rmem_max", "net.ipv4.tcp_rmem", "vm.swappiness"]
        );
        Ok(())
    }

    #[test]
    fn keys_missing_root() -> Result<()> {
        let sysctl = Sysctl::new(Root::new("/nonexistent/proc/sys")?);
        let err = sysctl.keys().unwrap_err();
        assert!(err.is_read());
        assert_eq!(err.path(), Path::new("/nonexistent/proc/sys"));
        Ok(())
    }

    #[test]
    #[ignore = "requires a mounted /proc"]
    fn real_read() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();
        let sysctl = Sysctl::default();
        let v = sysctl.read("kernel.ostype")?;
        assert_eq!(v, "Linux");
        Ok(())
    }
}
