// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

#[cfg(test)]
#[path = "./path_name_test.rs"]
mod path_name_test;

/// Stands in for escaped hyphens while decoding, must not appear in real paths
const PLACEHOLDER: &str = "\0";

/// Encode a path so that it can be used as a single file name component.
///
/// Every "-" becomes "--" and then every "/" becomes "-", so the
/// result never contains a path separator.
pub fn encode_path_name<S: AsRef<str>>(text: S) -> String {
    text.as_ref().replace('-', "--").replace('/', "-")
}

/// Decode a string produced by [`encode_path_name`] back into the original path.
///
/// Input containing a NUL character cannot be decoded faithfully.
pub fn decode_path_name<S: AsRef<str>>(text: S) -> String {
    // escaped hyphens are parked on the placeholder so that the remaining
    // single hyphens can become separators before they are restored
    text.as_ref()
        .replace("--", PLACEHOLDER)
        .replace('-', "/")
        .replace(PLACEHOLDER, "-")
}
