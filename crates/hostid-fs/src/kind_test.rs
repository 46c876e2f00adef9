// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
#[case(FILESYSTEM_SUPER_MAGIC_ZFS, "zfs")]
#[case(FILESYSTEM_SUPER_MAGIC_EXT4, "ext4")]
#[case(FILESYSTEM_SUPER_MAGIC_TMPFS, "tmpfs")]
#[case(FILESYSTEM_SUPER_MAGIC_BTRFS, "btrfs")]
#[case(FILESYSTEM_SUPER_MAGIC_CIFS, "cifs")]
fn test_fs_type_to_name_known(#[case] magic: i64, #[case] expected: &str) {
    assert_eq!(fs_type_to_name(LINUX_FILESYSTEMS, magic), expected);
}

#[rstest]
#[case(FILESYSTEM_SUPER_MAGIC_BTRFS, "btrfs")]
#[case(FILESYSTEM_SUPER_MAGIC_CIFS, "cifs")]
fn test_fs_type_to_name_overflowed(#[case] magic: i64, #[case] expected: &str) {
    // the same type as reported by a platform with a 32-bit signed type field
    let overflowed = magic as i32;
    assert!(overflowed < 0, "test magic should overflow an i32");
    assert_eq!(fs_type_to_name(LINUX_FILESYSTEMS, overflowed as i64), expected);
    assert_eq!(
        fs_type_to_name(LINUX_FILESYSTEMS, overflowed as i64),
        fs_type_to_name(LINUX_FILESYSTEMS, magic)
    );
}

#[rstest]
fn test_fs_type_to_name_unknown() {
    let kind = fs_type_to_name(FREEBSD_FILESYSTEMS, FILESYSTEM_SUPER_MAGIC_EXT4);
    assert!(kind.is_unknown());
    assert_eq!(kind, FilesystemKind::Unknown(0xef53));
    assert_eq!(kind.to_string(), "0xef53");
}

#[rstest]
fn test_fs_type_to_name_unknown_overflowed_renders_unsigned() {
    let kind = fs_type_to_name(FREEBSD_FILESYSTEMS, FILESYSTEM_SUPER_MAGIC_BTRFS);
    assert_eq!(kind.name(), "0x9123683e");
}

#[rstest]
fn test_freebsd_knows_zfs() {
    assert_eq!(
        fs_type_to_name(FREEBSD_FILESYSTEMS, FILESYSTEM_SUPER_MAGIC_ZFS),
        FilesystemKind::Known("zfs")
    );
}
