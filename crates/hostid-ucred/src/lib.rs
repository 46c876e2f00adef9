// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

//! Identify the local process and user on the other end of a
//! control socket connection.

mod context;
mod cred;
mod error;

pub use context::{
    BufferedUnixConn,
    BufferedUnixStream,
    Connection,
    ConnectionContext,
    RequestContext,
    connection_from_context,
    peer_credentials_from_context,
};
pub use cred::{PeerCredentials, peer_credentials};
pub use error::{Error, Result};
