// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use crate::{Error, Result};

#[cfg(test)]
#[path = "./vfs_test.rs"]
mod vfs_test;

/// Virtual filesystem statistics for a path, as reported by statfs(2)
///
/// This is a point-in-time snapshot. Filesystems can be mounted or
/// unmounted at any moment, so it should never be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VfsStats {
    /// The filesystem magic number
    pub fs_type: i64,
    pub block_size: u64,
    pub blocks: u64,
    pub blocks_free: u64,
    /// Free blocks available to unprivileged users
    pub blocks_available: u64,
    pub files: u64,
    pub files_free: u64,
}

/// Retrieve virtual filesystem info about a path.
pub fn stat_vfs<P: AsRef<Path>>(path: P) -> Result<VfsStats> {
    let path = path.as_ref();
    let st = nix::sys::statfs::statfs(path)
        .map_err(|errno| Error::StatVfs(path.to_owned(), errno.into()))?;

    Ok(VfsStats {
        fs_type: st.filesystem_type().0 as i64,
        block_size: st.block_size() as u64,
        blocks: st.blocks() as u64,
        blocks_free: st.blocks_free() as u64,
        blocks_available: st.blocks_available() as u64,
        files: st.files() as u64,
        files_free: st.files_free() as u64,
    })
}
