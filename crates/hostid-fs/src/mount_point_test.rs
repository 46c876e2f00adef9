// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use hostid_config::Mounts;
use rstest::rstest;

use super::is_mount_point;
use crate::fixtures::*;
use crate::kind::{self, FilesystemKind, MagicTable};
use crate::mount_options::{FREEBSD_MOUNT_FLAGS, MountFlagTable};
use crate::{Result, StorageHost};

/// A host that reports a fixed filesystem for every path
struct FakeHost {
    mounts: Mounts,
    kind: FilesystemKind,
}

impl FakeHost {
    fn new(mountinfo_path: PathBuf, kind: &'static str) -> Self {
        Self {
            mounts: Mounts {
                mountinfo_path,
                ..Default::default()
            },
            kind: FilesystemKind::Known(kind),
        }
    }
}

impl StorageHost for FakeHost {
    fn filesystems(&self) -> &'static MagicTable {
        kind::LINUX_FILESYSTEMS
    }

    fn mount_flags(&self) -> &'static MountFlagTable {
        &FREEBSD_MOUNT_FLAGS
    }

    fn mounts(&self) -> &Mounts {
        &self.mounts
    }

    fn detect_filesystem(&self, _path: &Path) -> Result<FilesystemKind> {
        Ok(self.kind)
    }
}

#[rstest]
fn test_mount_table_entry_is_mount_point(tmpdir: tempfile::TempDir) {
    let root = tmpdir.path().canonicalize().unwrap();
    let mounted = root.join("mounted");
    let plain = root.join("plain");
    std::fs::create_dir(&mounted).unwrap();
    std::fs::create_dir(&plain).unwrap();
    let host = FakeHost::new(write_mount_table(&root, &[&mounted]), "ext4");

    // both share a device with their parent, only the table tells them apart
    assert!(is_mount_point(&host, &mounted));
    assert!(!is_mount_point(&host, &plain));
}

#[rstest]
fn test_mount_table_entry_through_symlink(tmpdir: tempfile::TempDir) {
    let root = tmpdir.path().canonicalize().unwrap();
    let mounted = root.join("mounted");
    let link = root.join("link");
    std::fs::create_dir(&mounted).unwrap();
    std::os::unix::fs::symlink(&mounted, &link).unwrap();
    let host = FakeHost::new(write_mount_table(&root, &[&mounted]), "ext4");

    assert!(is_mount_point(&host, &link));
}

#[rstest]
fn test_mount_table_entry_under_subvolume_filesystem(tmpdir: tempfile::TempDir) {
    let root = tmpdir.path().canonicalize().unwrap();
    let mounted = root.join("mounted");
    std::fs::create_dir(&mounted).unwrap();
    let host = FakeHost::new(write_mount_table(&root, &[&mounted]), "btrfs");

    assert!(is_mount_point(&host, &mounted));
}

#[rstest]
fn test_dangling_symlink_is_not_mount_point(tmpdir: tempfile::TempDir) {
    let root = tmpdir.path().canonicalize().unwrap();
    let link = root.join("dangling");
    std::os::unix::fs::symlink(root.join("missing"), &link).unwrap();
    let host = FakeHost::new(write_mount_table(&root, &[&link]), "ext4");

    assert!(!is_mount_point(&host, &link));
}

#[rstest]
fn test_missing_path_is_not_mount_point(tmpdir: tempfile::TempDir) {
    let root = tmpdir.path().canonicalize().unwrap();
    let host = FakeHost::new(write_mount_table::<&Path>(&root, &[]), "ext4");

    assert!(!is_mount_point(&host, &root.join("missing")));
}

#[rstest]
fn test_unreadable_mount_table_falls_back(tmpdir: tempfile::TempDir) {
    let root = tmpdir.path().canonicalize().unwrap();
    let plain = root.join("plain");
    std::fs::create_dir(&plain).unwrap();
    let host = FakeHost::new(root.join("no-such-table"), "ext4");

    assert!(!is_mount_point(&host, &plain));
}

#[rstest]
#[cfg(target_os = "linux")]
#[case("ext4", true)]
#[case("btrfs", false)]
fn test_device_change_without_table_entry(
    tmpdir: tempfile::TempDir,
    #[case] kind: &'static str,
    #[case] expected: bool,
) {
    // /proc always has a different device id than the root filesystem
    let table = write_mount_table::<&Path>(tmpdir.path(), &[]);
    let host = FakeHost::new(table, kind);

    assert_eq!(is_mount_point(&host, Path::new("/proc")), expected);
}

#[rstest]
#[cfg(target_os = "linux")]
fn test_btrfs_with_table_entry(tmpdir: tempfile::TempDir) {
    let table = write_mount_table(tmpdir.path(), &["/proc"]);
    let host = FakeHost::new(table, "btrfs");

    assert!(is_mount_point(&host, Path::new("/proc")));
}

#[rstest]
#[cfg(target_os = "linux")]
fn test_btrfs_table_entry_after_non_utf8_mount_point(tmpdir: tempfile::TempDir) {
    let table = tmpdir.path().join("mountinfo");
    std::fs::write(
        &table,
        b"22 1 8:1 / / rw - ext4 /dev/sda1 rw\n\
          70 22 8:17 / /media/caf\xe9 rw - vfat /dev/sdc1 rw\n\
          23 22 0:21 / /proc rw - proc proc rw\n",
    )
    .unwrap();
    let host = FakeHost::new(table, "btrfs");

    assert!(is_mount_point(&host, Path::new("/proc")));
}
