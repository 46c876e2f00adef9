// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::any::Any;
use std::io::{BufRead, BufReader, Read, Write};
use std::os::fd::{AsFd, BorrowedFd};
use std::os::unix::net::UnixStream;
use std::sync::Arc;

use crate::{Error, PeerCredentials, Result, peer_credentials};

#[cfg(test)]
#[path = "./context_test.rs"]
mod context_test;

/// A connection accepted by a listener and attached to a request
pub trait Connection: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;

    /// The unwrap capability of a buffering wrapper, if this is one
    fn as_buffered_unix(&self) -> Option<&dyn BufferedUnixConn> {
        None
    }
}

/// A buffering layer around a raw unix socket
pub trait BufferedUnixConn {
    /// The raw unix socket underneath the buffer
    fn unix(&self) -> BorrowedFd<'_>;
}

/// Anything that carries the connection serving the current request
pub trait ConnectionContext {
    fn connection(&self) -> &dyn Connection;
}

/// Request-scoped state handed from the listener to request handlers
#[derive(Clone)]
pub struct RequestContext {
    conn: Arc<dyn Connection>,
}

impl RequestContext {
    pub fn new<C: Connection>(conn: C) -> Self {
        Self {
            conn: Arc::new(conn),
        }
    }

    pub fn from_shared(conn: Arc<dyn Connection>) -> Self {
        Self { conn }
    }
}

impl ConnectionContext for RequestContext {
    fn connection(&self) -> &dyn Connection {
        self.conn.as_ref()
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext").finish_non_exhaustive()
    }
}

/// Extract the connection from the request context.
pub fn connection_from_context<C: ConnectionContext + ?Sized>(ctx: &C) -> &dyn Connection {
    ctx.connection()
}

/// Extract the unix credentials of the peer serving the current request.
///
/// The connection is used directly when it is a unix socket, otherwise a
/// single buffering layer is unwrapped. Nested wrappers are not followed.
pub fn peer_credentials_from_context<C: ConnectionContext + ?Sized>(
    ctx: &C,
) -> Result<PeerCredentials> {
    let conn = connection_from_context(ctx);
    let fd = match raw_unix_socket(conn) {
        Some(fd) => fd,
        None => match conn.as_buffered_unix() {
            Some(buffered) => buffered.unix(),
            None => return Err(Error::NotUnixSocket),
        },
    };
    peer_credentials(&fd)
}

fn raw_unix_socket(conn: &dyn Connection) -> Option<BorrowedFd<'_>> {
    let conn = conn.as_any();
    if let Some(stream) = conn.downcast_ref::<UnixStream>() {
        return Some(stream.as_fd());
    }
    if let Some(stream) = conn.downcast_ref::<tokio::net::UnixStream>() {
        return Some(stream.as_fd());
    }
    None
}

macro_rules! impl_raw_connection {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Connection for $ty {
                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )+
    };
}

impl_raw_connection!(
    UnixStream,
    std::net::TcpStream,
    tokio::net::UnixStream,
    tokio::net::TcpStream,
);

/// A unix stream with buffered reads, as produced by listeners
/// that need to peek at the start of a connection
#[derive(Debug)]
pub struct BufferedUnixStream {
    reader: BufReader<UnixStream>,
}

impl BufferedUnixStream {
    pub fn new(stream: UnixStream) -> Self {
        Self {
            reader: BufReader::new(stream),
        }
    }

    pub fn get_ref(&self) -> &UnixStream {
        self.reader.get_ref()
    }

    /// Unwrap the stream, discarding any buffered data
    pub fn into_inner(self) -> UnixStream {
        self.reader.into_inner()
    }
}

impl Read for BufferedUnixStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for BufferedUnixStream {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

impl Write for BufferedUnixStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.reader.get_mut().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.reader.get_mut().flush()
    }
}

impl BufferedUnixConn for BufferedUnixStream {
    fn unix(&self) -> BorrowedFd<'_> {
        self.get_ref().as_fd()
    }
}

impl Connection for BufferedUnixStream {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_buffered_unix(&self) -> Option<&dyn BufferedUnixConn> {
        Some(self)
    }
}
