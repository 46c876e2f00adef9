// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use hostid_config::{Config, Mounts};

use crate::kind::{self, FilesystemKind, MagicTable};
use crate::mount_options::{self, MountFlagTable};
use crate::mountinfo::{self, MountInfoEntry};
use crate::{Result, mount_point, path_name, vfs};

#[cfg(test)]
#[path = "./platform_test.rs"]
mod platform_test;

/// The storage introspection capabilities of one host platform
///
/// Implementations describe what differs between platforms (known
/// filesystems, native mount flags, where the mount table lives), and
/// the provided methods build every operation on top of that.
pub trait StorageHost {
    /// Magic numbers of the filesystems this platform can name
    fn filesystems(&self) -> &'static MagicTable;

    /// Mount options understood natively by this platform's mount call
    fn mount_flags(&self) -> &'static MountFlagTable;

    /// Mount table settings in effect for this host
    fn mounts(&self) -> &Mounts;

    /// Detect the filesystem on which the given path sits.
    fn detect_filesystem(&self, path: &Path) -> Result<FilesystemKind> {
        let stats = vfs::stat_vfs(path)?;
        Ok(self.fs_type_to_name(stats.fs_type))
    }

    /// Name the filesystem with the given magic number.
    fn fs_type_to_name(&self, fs_type: i64) -> FilesystemKind {
        kind::fs_type_to_name(self.filesystems(), fs_type)
    }

    /// True if subvolumes of this filesystem can change device id without a mount
    fn is_subvolume_filesystem(&self, kind: &FilesystemKind) -> bool {
        self.mounts()
            .subvolume_filesystems
            .iter()
            .any(|name| kind == name.as_str())
    }

    /// Return true if path is a mount point.
    fn is_mount_point(&self, path: &Path) -> bool {
        mount_point::is_mount_point(self, path)
    }

    /// Find the mount table entry for the given path.
    fn get_mountinfo(&self, path: &Path) -> Result<MountInfoEntry> {
        mountinfo::get_mountinfo(&self.mounts().mountinfo_path, path)
    }

    /// Resolve mount options into native mount flags and a leftover option string.
    fn resolve_mount_options<S: AsRef<str>>(&self, options: &[S]) -> (u64, String) {
        mount_options::resolve_mount_options(self.mount_flags(), options)
    }

    /// Encode a path string to be used as part of a file name.
    fn encode_path_name(&self, text: &str) -> String {
        path_name::encode_path_name(text)
    }

    /// Decode a string containing an encoded path back to its original form.
    fn decode_path_name(&self, text: &str) -> String {
        path_name::decode_path_name(text)
    }
}

#[cfg(target_os = "linux")]
#[derive(Debug, Clone, Default)]
pub struct Linux {
    mounts: Mounts,
}

#[cfg(target_os = "linux")]
impl Linux {
    pub fn new(mounts: Mounts) -> Self {
        Self { mounts }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.mounts.clone())
    }
}

#[cfg(target_os = "linux")]
impl StorageHost for Linux {
    fn filesystems(&self) -> &'static MagicTable {
        kind::LINUX_FILESYSTEMS
    }

    fn mount_flags(&self) -> &'static MountFlagTable {
        &mount_options::LINUX_MOUNT_FLAGS
    }

    fn mounts(&self) -> &Mounts {
        &self.mounts
    }
}

#[derive(Debug, Clone, Default)]
pub struct FreeBsd {
    mounts: Mounts,
}

impl FreeBsd {
    pub fn new(mounts: Mounts) -> Self {
        Self { mounts }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.mounts.clone())
    }
}

impl StorageHost for FreeBsd {
    fn filesystems(&self) -> &'static MagicTable {
        kind::FREEBSD_FILESYSTEMS
    }

    fn mount_flags(&self) -> &'static MountFlagTable {
        &mount_options::FREEBSD_MOUNT_FLAGS
    }

    fn mounts(&self) -> &Mounts {
        &self.mounts
    }
}

/// The storage host implementation for the platform being built
#[cfg(target_os = "linux")]
pub type HostPlatform = Linux;
#[cfg(not(target_os = "linux"))]
pub type HostPlatform = FreeBsd;

/// Create the storage host for this platform, as configured.
///
/// If the configuration cannot be loaded the defaults are used.
pub fn host() -> HostPlatform {
    match hostid_config::get_config() {
        Ok(config) => HostPlatform::from_config(&config),
        Err(err) => {
            tracing::warn!(%err, "failed to load config, using defaults");
            HostPlatform::default()
        }
    }
}
