// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::io;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Diagnostic, Debug, Error)]
pub enum Error {
    /// The connection is not backed by a unix domain socket, so
    /// the peer cannot be identified through the kernel
    #[error("Connection isn't a unix socket")]
    #[diagnostic(code(hostid::ucred::not_unix_socket))]
    NotUnixSocket,
    #[error("Failed to inspect socket")]
    Socket(#[source] io::Error),
    #[error("Failed to get peer credentials")]
    PeerCredentials(#[source] io::Error),
}
