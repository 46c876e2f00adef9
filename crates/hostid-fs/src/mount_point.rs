// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use nix::sys::stat::{lstat, stat};

use crate::StorageHost;
use crate::mountinfo::find_mount_entry;

#[cfg(test)]
#[path = "./mount_point_test.rs"]
mod mount_point_test;

/// Return true if the given path is a mount point on the host.
///
/// This is advisory. Any failure to inspect the path is reported
/// as "not a mount point" rather than as an error.
pub fn is_mount_point<H: StorageHost + ?Sized>(host: &H, path: &Path) -> bool {
    // In case someone uses symlinks we need to look for the actual
    // mountpoint.
    let actual_path = match std::fs::canonicalize(path) {
        Ok(p) => p,
        Err(err) => {
            tracing::debug!(?path, %err, "cannot resolve path, assuming not a mount point");
            return false;
        }
    };

    // If we find a mount entry, it is obviously a mount point.
    let table = &host.mounts().mountinfo_path;
    match find_mount_entry(table, &actual_path) {
        Ok(Some(_)) => return true,
        Ok(None) => (),
        Err(err) => tracing::debug!(%err, "mount table unavailable, falling back to device ids"),
    }

    let Ok(st_target) = stat(path) else {
        return false;
    };
    let Ok(st_parent) = lstat(&path.join("..")) else {
        return false;
    };

    // If the directory has the same device as parent, then it's not a mountpoint.
    if st_target.st_dev == st_parent.st_dev {
        return false;
    }

    // Some filesystems (btrfs) give each subvolume its own device id on the
    // same mount, so for those only a mount table entry is trusted.
    match host.detect_filesystem(path) {
        Ok(kind) if host.is_subvolume_filesystem(&kind) => {
            tracing::trace!(?path, %kind, "device id differs on a subvolume filesystem");
            false
        }
        _ => true,
    }
}
