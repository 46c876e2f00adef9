// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::path::Path;

use crate::{Error, Result};

/// Force a sync of the filesystem backing the provided path.
pub fn sync_fs<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let fs_file = File::open(path).map_err(|err| Error::SyncFs(path.to_owned(), err))?;
    tracing::trace!(?path, "syncing filesystem");
    syncfs(&fs_file).map_err(|err| Error::SyncFs(path.to_owned(), err))
}

#[cfg(target_os = "linux")]
fn syncfs(file: &File) -> std::io::Result<()> {
    use std::os::unix::io::AsRawFd;

    // Safety: the descriptor is owned by `file`, which outlives this call
    let result = unsafe { libc::syncfs(file.as_raw_fd()) };
    if result != 0 {
        Err(std::io::Error::last_os_error())
    } else {
        Ok(())
    }
}

#[cfg(not(target_os = "linux"))]
fn syncfs(_file: &File) -> std::io::Result<()> {
    Ok(())
}
