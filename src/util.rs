//! Utility functions

/// Where procfs is normally mounted.
pub const PROCFS_PATH: &str = "/proc";

/// Where the kernel exposes its tunables, below [`PROCFS_PATH`].
///
/// This is only the default [`Root`](crate::root::Root). Containers and
/// chroots often see the host tree mounted elsewhere, and tests point it at
/// a temporary directory.
pub const SYSCTL_PATH: &str = "/proc/sys";

/// Environment variable overriding [`SYSCTL_PATH`], see
/// [`Root::from_env`](crate::root::Root::from_env)
pub const ROOT_ENV: &str = "LINSYSCTL_ROOT";

/// Path delimiter
pub(crate) const DELIM: char = '/';

/// [`DELIM`], for joining
pub(crate) const DELIM_STR: &str = "/";

/// Alternate, `sysctl(8)` style, key delimiter
pub(crate) const ALT_DELIM: char = '.';

/// [`ALT_DELIM`], for replacing
pub(crate) const ALT_DELIM_STR: &str = ".";

/// Non-empty, whitespace trimmed, [`DELIM`] separated segments of `s`
pub(crate) fn split_key(s: &str) -> impl Iterator<Item = &str> {
    s.split(DELIM).map(str::trim).filter(|s| !s.is_empty())
}
