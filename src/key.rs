//! Key canonicalization
//!
//! Tunables may be named the `sysctl(8)` way, `net.core.rmem_max`, or as a
//! path, `net/core/rmem_max`, optionally with the [`Root`], or a tail of it
//! like `sys/`, in front. All of these spellings resolve to the same canonical path.
//!
//! None of this touches the filesystem.
use crate::{
    root::Root,
    util::{split_key, ALT_DELIM, ALT_DELIM_STR, DELIM, DELIM_STR},
};
use std::path::PathBuf;

/// Root segments, split the same way keys are.
///
/// A root like `/tmp/.tmpXYZ` has to be split on `.` too, or a key spelled
/// with the full root could never match it.
fn root_parts(root: &Root) -> Vec<String> {
    root.segments()
        .iter()
        .flat_map(|seg| {
            split_key(&seg.replace(ALT_DELIM, DELIM_STR))
                .map(ToOwned::to_owned)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// The part of `key` below the root, `/` delimited.
///
/// A leading run of root segments is removed only if it is the whole root,
/// or a tail of it, such as `sys/` for `/proc/sys`. With a root of
/// `/srv/vm/proc/sys`, `vm/swappiness` is left alone.
fn remainder(root: &Root, key: &str) -> String {
    let key = key.replace(ALT_DELIM, DELIM_STR);
    let key: Vec<&str> = split_key(&key).collect();
    let root = root_parts(root);

    // Longest tail first
    let strip = (0..root.len())
        .map(|i| &root[i..])
        .find(|tail| tail.len() <= key.len() && tail.iter().zip(&key).all(|(r, k)| r == k))
        .map_or(0, <[String]>::len);

    key[strip..].join(DELIM_STR)
}

/// Canonical, absolute, path to the tunable `key` under `root`.
///
/// An empty key is the root itself.
///
/// This never fails, any input produces some path. Whether anything exists
/// there is another matter.
///
/// # Example
///
/// ```rust
/// # use linsysctl::{key::canonicalize, root::Root};
/// # use std::path::Path;
/// let root = Root::default();
///
/// let path = Path::new("/proc/sys/net/core/rmem_max");
/// assert_eq!(canonicalize(&root, "net.core.rmem_max"), path);
/// assert_eq!(canonicalize(&root, "net/core/rmem_max"), path);
/// assert_eq!(canonicalize(&root, "/proc/sys/net/core/rmem_max"), path);
/// ```
pub fn canonicalize(root: &Root, key: &str) -> PathBuf {
    let rest = remainder(root, key);
    let mut path = root.path();
    if !rest.is_empty() {
        path.push(rest);
    }
    path
}

/// `key` as it would be shown to a human, `sysctl(8)` style.
///
/// Only for display, look tunables up with [`canonicalize`].
///
/// # Example
///
/// ```rust
/// # use linsysctl::{key::printable, root::Root};
/// let root = Root::default();
///
/// assert_eq!(printable(&root, "/proc/sys/net/core/rmem_max"), "net.core.rmem_max");
/// ```
///
/// If the short form would name a different tunable, because it starts with
/// part of the root, the root is included.
///
/// ```rust
/// # use linsysctl::{key::printable, root::Root};
/// let root = Root::default();
///
/// assert_eq!(printable(&root, "/proc/sys/sys/x"), "proc.sys.sys.x");
/// ```
pub fn printable(root: &Root, key: &str) -> String {
    let rest = remainder(root, key);
    let short = rest.replace(DELIM, ALT_DELIM_STR);
    if remainder(root, &short) == rest {
        return short;
    }
    let parts = root_parts(root);
    let full: Vec<&str> = parts
        .iter()
        .map(String::as_str)
        .chain(split_key(&rest))
        .collect();
    full.join(ALT_DELIM_STR)
}
