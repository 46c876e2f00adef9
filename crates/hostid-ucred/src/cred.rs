// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::os::fd::{AsFd, AsRawFd, BorrowedFd};

use nix::errno::Errno;
use nix::sys::socket::{AddressFamily, SockaddrLike, SockaddrStorage, getsockname};
use nix::unistd::{Gid, Pid, Uid};

use crate::{Error, Result};

#[cfg(test)]
#[path = "./cred_test.rs"]
mod cred_test;

/// The identity of the process on the other end of a unix socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerCredentials {
    pub uid: Uid,
    pub gid: Gid,
    /// The peer process, when the platform reports it
    pub pid: Option<Pid>,
}

/// Get the credentials from the remote end of a unix socket.
///
/// Fails with [`Error::NotUnixSocket`] for any descriptor that
/// is not a unix domain socket.
pub fn peer_credentials<F: AsFd + ?Sized>(socket: &F) -> Result<PeerCredentials> {
    let fd = socket.as_fd();
    ensure_unix_socket(fd)?;
    let cred = get_peer_cred(fd)?;
    tracing::trace!(?cred, "read peer credentials");
    Ok(cred)
}

fn ensure_unix_socket(fd: BorrowedFd<'_>) -> Result<()> {
    let addr = match getsockname::<SockaddrStorage>(fd.as_raw_fd()) {
        Ok(addr) => addr,
        Err(Errno::ENOTSOCK) => return Err(Error::NotUnixSocket),
        Err(errno) => return Err(Error::Socket(errno.into())),
    };
    match addr.family() {
        Some(AddressFamily::Unix) => Ok(()),
        _ => Err(Error::NotUnixSocket),
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn get_peer_cred(fd: BorrowedFd<'_>) -> Result<PeerCredentials> {
    use nix::sys::socket::{getsockopt, sockopt};

    let cred = getsockopt(&fd, sockopt::PeerCredentials)
        .map_err(|errno| Error::PeerCredentials(errno.into()))?;
    Ok(PeerCredentials {
        uid: Uid::from_raw(cred.uid()),
        gid: Gid::from_raw(cred.gid()),
        pid: Some(Pid::from_raw(cred.pid())),
    })
}

#[cfg(any(target_os = "freebsd", target_os = "macos"))]
fn get_peer_cred(fd: BorrowedFd<'_>) -> Result<PeerCredentials> {
    use nix::sys::socket::{getsockopt, sockopt};

    let cred = getsockopt(&fd, sockopt::LocalPeerCred)
        .map_err(|errno| Error::PeerCredentials(errno.into()))?;
    // the first group is always the effective group of the peer
    let Some(gid) = cred.groups().first() else {
        return Err(Error::PeerCredentials(Errno::EINVAL.into()));
    };
    Ok(PeerCredentials {
        uid: Uid::from_raw(cred.uid()),
        gid: Gid::from_raw(*gid),
        pid: None,
    })
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "freebsd",
    target_os = "macos"
)))]
fn get_peer_cred(_fd: BorrowedFd<'_>) -> Result<PeerCredentials> {
    Err(Error::PeerCredentials(std::io::ErrorKind::Unsupported.into()))
}
