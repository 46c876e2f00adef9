// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::{decode_path_name, encode_path_name};

#[rstest]
#[case("/var/lib/x-y", "-var-lib-x--y")]
#[case("/", "-")]
#[case("", "")]
#[case("a--b", "a----b")]
#[case("/-/", "----")]
#[case("relative/path", "relative-path")]
fn test_encode_path_name(#[case] path: &str, #[case] expected: &str) {
    assert_eq!(encode_path_name(path), expected);
}

#[rstest]
fn test_decode_path_name() {
    assert_eq!(decode_path_name("-var-lib-x--y"), "/var/lib/x-y");
}

#[rstest]
#[case("/var/lib/lxd/storage-pools/default")]
#[case("-leading-and-trailing-")]
#[case("a-b-c/d--e/f")]
#[case("---")]
#[case("/srv/pool/containers/c1-snap0")]
fn test_path_name_round_trip(#[case] path: &str) {
    let encoded = encode_path_name(path);
    assert!(
        !encoded.contains('/'),
        "encoded form should never contain a separator: {encoded}"
    );
    assert_eq!(decode_path_name(&encoded), path);
}

#[rstest]
#[case("//", "-")]
#[case("/-x", "-/x")]
fn test_path_name_hyphen_next_to_separator_is_ambiguous(
    #[case] path: &str,
    #[case] decoded: &str,
) {
    // "/-", "-/" and "//" all produce runs of hyphens that
    // decode greedily as escaped hyphens first
    assert_eq!(decode_path_name(encode_path_name(path)), decoded);
}

#[rstest]
fn test_decode_path_name_with_placeholder_is_lossy() {
    // a NUL in the input is indistinguishable from an escaped hyphen
    assert_eq!(decode_path_name("a\0b"), "a-b");
}
