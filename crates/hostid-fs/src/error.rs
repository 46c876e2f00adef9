// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Diagnostic, Debug, Error)]
pub enum Error {
    #[error("Failed to get filesystem statistics: {0}")]
    #[diagnostic(code(hostid::fs::statfs))]
    StatVfs(PathBuf, #[source] io::Error),
    #[error("Failed to resolve path: {0}")]
    InvalidPath(PathBuf, #[source] io::Error),
    #[error("Failed to read mount table: {0}")]
    #[diagnostic(
        code(hostid::fs::mount_table),
        help("The mount table location can be changed with HOSTID_MOUNTS_MOUNTINFO_PATH")
    )]
    MountTableRead(PathBuf, #[source] io::Error),
    #[error("Malformed mount table entry in {path}: {line:?}")]
    MalformedMountEntry { path: PathBuf, line: String },
    #[error("No mountinfo entry found: {0}")]
    NoMountEntry(PathBuf),
    #[error("Failed to sync filesystem: {0}")]
    SyncFs(PathBuf, #[source] io::Error),
}

impl Error {
    /// The path that this error relates to
    pub fn path(&self) -> &std::path::Path {
        match self {
            Error::StatVfs(path, _)
            | Error::InvalidPath(path, _)
            | Error::MountTableRead(path, _)
            | Error::MalformedMountEntry { path, .. }
            | Error::NoMountEntry(path)
            | Error::SyncFs(path, _) => path,
        }
    }
}

/// Errors that may have been caused by a failed system call
pub trait OsError {
    /// The underlying errno, if this error came from the operating system
    fn os_error(&self) -> Option<i32>;
}

impl OsError for io::Error {
    fn os_error(&self) -> Option<i32> {
        self.raw_os_error()
    }
}

impl OsError for Error {
    fn os_error(&self) -> Option<i32> {
        match self {
            Error::StatVfs(_, err)
            | Error::InvalidPath(_, err)
            | Error::MountTableRead(_, err)
            | Error::SyncFs(_, err) => err.os_error(),
            Error::MalformedMountEntry { .. } | Error::NoMountEntry(_) => None,
        }
    }
}
