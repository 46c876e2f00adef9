// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

#[cfg(test)]
#[path = "./kind_test.rs"]
mod kind_test;

// Filesystem magic numbers, as reported in the type field of statfs(2).
pub const FILESYSTEM_SUPER_MAGIC_BTRFS: i64 = 0x9123683e;
pub const FILESYSTEM_SUPER_MAGIC_CEPH: i64 = 0x00c36400;
pub const FILESYSTEM_SUPER_MAGIC_CIFS: i64 = 0xff534d42;
pub const FILESYSTEM_SUPER_MAGIC_EXT4: i64 = 0xef53;
pub const FILESYSTEM_SUPER_MAGIC_FUSE: i64 = 0x65735546;
pub const FILESYSTEM_SUPER_MAGIC_GPFS: i64 = 0x47504653;
pub const FILESYSTEM_SUPER_MAGIC_NFS: i64 = 0x6969;
pub const FILESYSTEM_SUPER_MAGIC_OVERLAY: i64 = 0x794c7630;
pub const FILESYSTEM_SUPER_MAGIC_PROC: i64 = 0x9fa0;
pub const FILESYSTEM_SUPER_MAGIC_SQUASHFS: i64 = 0x73717368;
pub const FILESYSTEM_SUPER_MAGIC_SYSFS: i64 = 0x62656572;
pub const FILESYSTEM_SUPER_MAGIC_TMPFS: i64 = 0x01021994;
pub const FILESYSTEM_SUPER_MAGIC_XFS: i64 = 0x58465342;
pub const FILESYSTEM_SUPER_MAGIC_ZFS: i64 = 0x2fc12fc1;

/// Maps filesystem magic numbers to their canonical names
pub type MagicTable = [(i64, &'static str)];

/// Filesystems recognized on linux hosts
pub static LINUX_FILESYSTEMS: &MagicTable = &[
    (FILESYSTEM_SUPER_MAGIC_BTRFS, "btrfs"),
    (FILESYSTEM_SUPER_MAGIC_CEPH, "ceph"),
    (FILESYSTEM_SUPER_MAGIC_CIFS, "cifs"),
    (FILESYSTEM_SUPER_MAGIC_EXT4, "ext4"),
    (FILESYSTEM_SUPER_MAGIC_FUSE, "fuse"),
    (FILESYSTEM_SUPER_MAGIC_GPFS, "gpfs"),
    (FILESYSTEM_SUPER_MAGIC_NFS, "nfs"),
    (FILESYSTEM_SUPER_MAGIC_OVERLAY, "overlay"),
    (FILESYSTEM_SUPER_MAGIC_PROC, "proc"),
    (FILESYSTEM_SUPER_MAGIC_SQUASHFS, "squashfs"),
    (FILESYSTEM_SUPER_MAGIC_SYSFS, "sysfs"),
    (FILESYSTEM_SUPER_MAGIC_TMPFS, "tmpfs"),
    (FILESYSTEM_SUPER_MAGIC_XFS, "xfs"),
    (FILESYSTEM_SUPER_MAGIC_ZFS, "zfs"),
];

/// Filesystems recognized on freebsd hosts
pub static FREEBSD_FILESYSTEMS: &MagicTable = &[(FILESYSTEM_SUPER_MAGIC_ZFS, "zfs")];

/// The kind of filesystem backing a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilesystemKind {
    /// A filesystem with a well-known name
    Known(&'static str),
    /// An unrecognized filesystem, identified by its (truncated) magic number
    Unknown(i32),
}

impl FilesystemKind {
    /// The canonical name of this filesystem
    ///
    /// Unknown filesystems are named by their magic number in hex, eg: `0x1234abcd`.
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            Self::Known(name) => Cow::Borrowed(name),
            Self::Unknown(magic) => Cow::Owned(format!("0x{magic:x}")),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl std::fmt::Display for FilesystemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

impl PartialEq<str> for FilesystemKind {
    fn eq(&self, other: &str) -> bool {
        self.name() == other
    }
}

impl PartialEq<&str> for FilesystemKind {
    fn eq(&self, other: &&str) -> bool {
        self.name() == *other
    }
}

/// Find the name of the given filesystem type.
///
/// Both the given type and the table entries are truncated to 32 bits
/// before being compared. A magic number that overflows an i32 on a
/// 32-bit platform then resolves the same way as its 64-bit form.
pub fn fs_type_to_name(table: &MagicTable, fs_type: i64) -> FilesystemKind {
    let fs_type = fs_type as i32;
    for (magic, name) in table.iter() {
        if *magic as i32 == fs_type {
            return FilesystemKind::Known(name);
        }
    }

    tracing::debug!("Unknown backing filesystem type: 0x{fs_type:x}");
    FilesystemKind::Unknown(fs_type)
}
