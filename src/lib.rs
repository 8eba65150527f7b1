//! Read and write Linux kernel tunables
//!
//! # Implementation details
//!
//! Kernel tunables are provided through files in `/proc/sys`, so this library
//! requires it to exist, or a directory laid out the same way to be
//! configured with [`root::Root`].
//!
//! Keys may be given either the `sysctl(8)` way, `net.core.rmem_max`, or as
//! paths, `net/core/rmem_max`, with or without the root in front.
//!
//! What each tunable means, and what values it accepts, is up to the kernel.
//! See the [kernel docs][1].
//!
//! [1]: https://www.kernel.org/doc/html/latest/admin-guide/sysctl/index.html
#![doc(html_root_url = "https://docs.rs/linsysctl/0.1.0")]

pub mod error;
pub mod key;
pub mod root;
pub mod sysctl;
pub mod tunables;
pub mod util;
pub mod value;

pub use crate::{error::Error, root::Root, sysctl::Sysctl};
