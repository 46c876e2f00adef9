// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

//! Filesystem identity for the storage layer of the host.
//!
//! Answers which filesystem backs a path and whether a path is a
//! mount boundary, and provides the small helpers storage drivers
//! use alongside those answers.

#![deny(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod fixtures;

mod error;
pub mod kind;
pub mod mount_options;
mod mount_point;
pub mod mountinfo;
mod path_name;
mod platform;
mod sync;
pub mod vfs;

use std::path::Path;

pub use error::{Error, OsError, Result};
pub use kind::FilesystemKind;
pub use mount_options::MountOption;
pub use mountinfo::MountInfoEntry;
pub use path_name::{decode_path_name, encode_path_name};
#[cfg(target_os = "linux")]
pub use platform::Linux;
pub use platform::{FreeBsd, HostPlatform, StorageHost, host};
pub use sync::sync_fs;
pub use vfs::{VfsStats, stat_vfs};

/// Detect the filesystem on which the given path sits.
pub fn detect_filesystem<P: AsRef<Path>>(path: P) -> Result<FilesystemKind> {
    host().detect_filesystem(path.as_ref())
}

/// Return true if the given path is a mount point.
pub fn is_mount_point<P: AsRef<Path>>(path: P) -> bool {
    host().is_mount_point(path.as_ref())
}

/// Track down the mount table entry for the given path.
pub fn get_mountinfo<P: AsRef<Path>>(path: P) -> Result<MountInfoEntry> {
    host().get_mountinfo(path.as_ref())
}

/// Resolve mount options into native mount flags and a comma-separated
/// string of the options that must be passed through as data.
pub fn resolve_mount_options<S: AsRef<str>>(options: &[S]) -> (u64, String) {
    host().resolve_mount_options(options)
}
