// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::ffi::OsString;
use std::io::{BufRead, BufReader};
use std::os::unix::ffi::OsStringExt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

#[cfg(test)]
#[path = "./mountinfo_test.rs"]
mod mountinfo_test;

/// The position of the mount path in each mount table line
const MOUNT_POINT_FIELD: usize = 4;

/// One line of the kernel mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountInfoEntry {
    /// All whitespace-separated fields of the line, lossily decoded
    fields: Vec<String>,
    /// The unescaped and cleaned mount path, byte for byte
    pub mount_point: PathBuf,
}

impl MountInfoEntry {
    /// Parse a single mount table line, if it has enough fields.
    ///
    /// Mount paths are raw bytes and need not be valid utf-8.
    pub fn parse<L: AsRef<[u8]>>(line: L) -> Option<Self> {
        let raw_fields: Vec<&[u8]> = line
            .as_ref()
            .split(u8::is_ascii_whitespace)
            .filter(|field| !field.is_empty())
            .collect();
        let raw_mount_point = raw_fields.get(MOUNT_POINT_FIELD)?;
        let mount_point = clean_path(unescape_octal(raw_mount_point));
        let fields = raw_fields
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();
        Some(Self {
            fields,
            mount_point,
        })
    }

    /// All fields of the line, as they appear
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or_default()
    }

    /// The unique id of this mount
    pub fn mount_id(&self) -> &str {
        self.field(0)
    }

    /// The id of the parent mount
    pub fn parent_id(&self) -> &str {
        self.field(1)
    }

    /// The `major:minor` device number of the mounted filesystem
    pub fn device(&self) -> &str {
        self.field(2)
    }

    /// The directory within the filesystem that forms the root of this mount
    pub fn root(&self) -> &str {
        self.field(3)
    }
}

/// Search the mount table at `table` for the entry mounted at `target`.
///
/// The table is scanned line by line as raw bytes and the search stops
/// at the first match. A line with too few fields aborts the search with an error.
pub fn find_mount_entry(table: &Path, target: &Path) -> Result<Option<MountInfoEntry>> {
    let file =
        std::fs::File::open(table).map_err(|err| Error::MountTableRead(table.to_owned(), err))?;
    find_in_reader(BufReader::new(file), table, target)
}

fn find_in_reader<R: BufRead>(
    reader: R,
    table: &Path,
    target: &Path,
) -> Result<Option<MountInfoEntry>> {
    for line in reader.split(b'\n') {
        let line = line.map_err(|err| Error::MountTableRead(table.to_owned(), err))?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let Some(entry) = MountInfoEntry::parse(&line) else {
            return Err(Error::MalformedMountEntry {
                path: table.to_owned(),
                line: String::from_utf8_lossy(&line).into_owned(),
            });
        };
        if entry.mount_point == target {
            return Ok(Some(entry));
        }
    }
    Ok(None)
}

/// Find the mount table entry for the given path.
///
/// Symbolic links are resolved first, so that a link to a mount point
/// finds the entry of the real location.
pub fn get_mountinfo<P: AsRef<Path>>(table: &Path, path: P) -> Result<MountInfoEntry> {
    let path = path.as_ref();
    let actual_path =
        std::fs::canonicalize(path).map_err(|err| Error::InvalidPath(path.to_owned(), err))?;
    find_mount_entry(table, &actual_path)?.ok_or(Error::NoMountEntry(actual_path))
}

/// Decode the `\NNN` octal escapes used by the kernel for
/// whitespace and backslashes in mount paths
fn unescape_octal(bytes: &[u8]) -> OsString {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() && is_octal_escape(&bytes[i + 1..i + 4]) {
            let value = (bytes[i + 1] - b'0') as u32 * 64
                + (bytes[i + 2] - b'0') as u32 * 8
                + (bytes[i + 3] - b'0') as u32;
            if let Ok(byte) = u8::try_from(value) {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    OsString::from_vec(out)
}

fn is_octal_escape(digits: &[u8]) -> bool {
    digits.iter().all(|d| (b'0'..=b'7').contains(d))
}

/// Lexically normalize a path, removing repeated separators and `.` components
fn clean_path<P: Into<PathBuf>>(path: P) -> PathBuf {
    path.into().components().collect()
}
