// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use rstest::fixture;
use tempfile::TempDir;

pub fn init_logging() {
    let sub = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::TRACE)
        .without_time()
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(sub);
}

#[fixture]
pub fn tmpdir() -> TempDir {
    init_logging();
    tempfile::Builder::new()
        .prefix("hostid-test-")
        .tempdir()
        .expect("failed to create dir for test")
}

/// Write a fake mount table into `dir` listing the given mount points
pub fn write_mount_table<P: AsRef<Path>>(dir: &Path, mount_points: &[P]) -> PathBuf {
    let mut table = String::from("22 1 8:1 / / rw,relatime shared:1 - ext4 /dev/sda1 rw\n");
    for (i, mount_point) in mount_points.iter().enumerate() {
        table.push_str(&format!(
            "{} 22 0:{} / {} rw,relatime - tmpfs tmpfs rw\n",
            100 + i,
            50 + i,
            mount_point.as_ref().display()
        ));
    }
    let path = dir.join("mountinfo");
    std::fs::write(&path, table).expect("failed to write test mount table");
    path
}
