// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use once_cell::sync::Lazy;

#[cfg(test)]
#[path = "./mount_options_test.rs"]
mod mount_options_test;

/// A single recognized mount option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountOption {
    /// When true the flag is set, otherwise it is cleared
    pub capture: bool,
    pub flag: u64,
}

impl MountOption {
    const fn set(flag: u64) -> Self {
        Self {
            capture: true,
            flag,
        }
    }

    const fn clear(flag: u64) -> Self {
        Self {
            capture: false,
            flag,
        }
    }
}

/// Maps mount option names onto the flags that they set or clear
pub type MountFlagTable = HashMap<&'static str, MountOption>;

/// Mount options understood natively by mount(2) on linux
#[cfg(target_os = "linux")]
pub static LINUX_MOUNT_FLAGS: Lazy<MountFlagTable> = Lazy::new(|| {
    let ms = |flag: libc::c_ulong| flag as u64;
    HashMap::from([
        ("async", MountOption::clear(ms(libc::MS_SYNCHRONOUS))),
        ("atime", MountOption::clear(ms(libc::MS_NOATIME))),
        ("bind", MountOption::set(ms(libc::MS_BIND))),
        ("defaults", MountOption::set(0)),
        ("dev", MountOption::clear(ms(libc::MS_NODEV))),
        ("diratime", MountOption::clear(ms(libc::MS_NODIRATIME))),
        ("dirsync", MountOption::set(ms(libc::MS_DIRSYNC))),
        ("exec", MountOption::clear(ms(libc::MS_NOEXEC))),
        ("lazytime", MountOption::set(ms(libc::MS_LAZYTIME))),
        ("mand", MountOption::set(ms(libc::MS_MANDLOCK))),
        ("noatime", MountOption::set(ms(libc::MS_NOATIME))),
        ("nodev", MountOption::set(ms(libc::MS_NODEV))),
        ("nodiratime", MountOption::set(ms(libc::MS_NODIRATIME))),
        ("noexec", MountOption::set(ms(libc::MS_NOEXEC))),
        ("nomand", MountOption::clear(ms(libc::MS_MANDLOCK))),
        ("norelatime", MountOption::clear(ms(libc::MS_RELATIME))),
        ("nostrictatime", MountOption::clear(ms(libc::MS_STRICTATIME))),
        ("nosuid", MountOption::set(ms(libc::MS_NOSUID))),
        ("rbind", MountOption::set(ms(libc::MS_BIND | libc::MS_REC))),
        ("relatime", MountOption::set(ms(libc::MS_RELATIME))),
        ("remount", MountOption::set(ms(libc::MS_REMOUNT))),
        ("ro", MountOption::set(ms(libc::MS_RDONLY))),
        ("rw", MountOption::clear(ms(libc::MS_RDONLY))),
        ("strictatime", MountOption::set(ms(libc::MS_STRICTATIME))),
        ("suid", MountOption::clear(ms(libc::MS_NOSUID))),
        ("sync", MountOption::set(ms(libc::MS_SYNCHRONOUS))),
    ])
});

/// Mount options understood natively by nmount(2) on freebsd
pub static FREEBSD_MOUNT_FLAGS: Lazy<MountFlagTable> =
    Lazy::new(|| HashMap::from([("defaults", MountOption::set(0))]));

/// Resolve a list of mount options into flags and a leftover option string.
///
/// Options found in the table are applied to the flags in order, so
/// a later option wins over an earlier one touching the same bits.
/// Anything else is passed through, in order, as a comma-separated string.
pub fn resolve_mount_options<S: AsRef<str>>(table: &MountFlagTable, options: &[S]) -> (u64, String) {
    let mut mount_flags = 0u64;
    let mut mount_options = Vec::new();

    for option in options.iter().map(AsRef::as_ref) {
        let Some(known) = table.get(option) else {
            mount_options.push(option);
            continue;
        };

        if known.capture {
            mount_flags |= known.flag;
        } else {
            mount_flags &= !known.flag;
        }
    }

    (mount_flags, mount_options.join(","))
}
