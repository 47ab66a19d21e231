//! `AF_NETLINK` / `NETLINK_GENERIC` socket transport.

use super::frame::{self, Control};
use super::{DialConfig, Error, Flags, Message, Transport};
use std::io;
use std::mem;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

const SOL_NETLINK: libc::c_int = 270;
const NETLINK_GET_STRICT_CHK: libc::c_int = 12;

/// A generic netlink socket bound to a kernel-assigned port.
///
/// The descriptor is closed on drop; [`Transport::close`] does the same but
/// reports the result.
#[derive(Debug)]
pub struct GenlSocket {
    fd: OwnedFd,
    port: u32,
    seq: u32,
    buf: Vec<u8>,
}

impl GenlSocket {
    pub fn dial(cfg: &DialConfig) -> Result<Self, Error> {
        // SAFETY: plain syscall, the result is checked before use.
        let raw = unsafe {
            libc::socket(
                libc::AF_NETLINK,
                libc::SOCK_RAW | libc::SOCK_CLOEXEC,
                libc::NETLINK_GENERIC,
            )
        };
        if raw < 0 {
            return Err(io::Error::last_os_error().into());
        }
        // SAFETY: `raw` is a freshly opened descriptor owned by nobody else.
        let fd = unsafe { OwnedFd::from_raw_fd(raw) };

        // SAFETY: `sockaddr_nl` is plain data; all-zero is a valid value.
        let mut addr: libc::sockaddr_nl = unsafe { mem::zeroed() };
        addr.nl_family = libc::AF_NETLINK as libc::sa_family_t;
        let mut addr_len = mem::size_of::<libc::sockaddr_nl>() as libc::socklen_t;
        // SAFETY: `addr` outlives both calls and `addr_len` matches its size.
        let rc = unsafe {
            libc::bind(
                fd.as_raw_fd(),
                &addr as *const libc::sockaddr_nl as *const libc::sockaddr,
                addr_len,
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error().into());
        }
        // SAFETY: as for `bind`; the kernel writes at most `addr_len` bytes.
        let rc = unsafe {
            libc::getsockname(
                fd.as_raw_fd(),
                &mut addr as *mut libc::sockaddr_nl as *mut libc::sockaddr,
                &mut addr_len,
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error().into());
        }

        if cfg.strict {
            let on: libc::c_int = 1;
            // SAFETY: `on` is a c_int and the length says so.
            let rc = unsafe {
                libc::setsockopt(
                    fd.as_raw_fd(),
                    SOL_NETLINK,
                    NETLINK_GET_STRICT_CHK,
                    &on as *const libc::c_int as *const libc::c_void,
                    mem::size_of::<libc::c_int>() as libc::socklen_t,
                )
            };
            if rc < 0 {
                return Err(io::Error::last_os_error().into());
            }
        }

        tracing::debug!(port = addr.nl_pid, strict = cfg.strict, "opened generic netlink socket");
        Ok(GenlSocket {
            fd,
            port: addr.nl_pid,
            seq: 0,
            buf: vec![0u8; cfg.recv_buffer_size.max(frame::NLMSG_HDRLEN)],
        })
    }

    /// Port ID the kernel assigned to this socket.
    pub fn port(&self) -> u32 {
        self.port
    }

    fn send(&self, b: &[u8]) -> Result<(), Error> {
        // SAFETY: `b` is valid for `b.len()` bytes for the duration of the call.
        let n = unsafe { libc::send(self.fd.as_raw_fd(), b.as_ptr() as *const libc::c_void, b.len(), 0) };
        if n < 0 {
            return Err(io::Error::last_os_error().into());
        }
        Ok(())
    }

    /// Receive one whole datagram, growing the buffer when it would truncate.
    fn recv(&mut self) -> Result<usize, Error> {
        loop {
            // SAFETY: `self.buf` is valid for writes of its full length.
            let peeked = unsafe {
                libc::recv(
                    self.fd.as_raw_fd(),
                    self.buf.as_mut_ptr() as *mut libc::c_void,
                    self.buf.len(),
                    libc::MSG_PEEK | libc::MSG_TRUNC,
                )
            };
            if peeked < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(err.into());
            }
            if peeked as usize > self.buf.len() {
                self.buf.resize(peeked as usize, 0);
            }

            // SAFETY: as above; the buffer now holds the whole datagram.
            let n = unsafe {
                libc::recv(
                    self.fd.as_raw_fd(),
                    self.buf.as_mut_ptr() as *mut libc::c_void,
                    self.buf.len(),
                    0,
                )
            };
            if n < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(err.into());
            }
            return Ok(n as usize);
        }
    }
}

impl Transport for GenlSocket {
    fn execute(&mut self, msg: Message, family: u16, flags: Flags) -> Result<Vec<Message>, Error> {
        self.seq = self.seq.wrapping_add(1);
        let seq = self.seq;
        self.send(&frame::encode_request(&msg, family, flags, seq))?;
        tracing::trace!(family, command = msg.header.command, seq, ?flags, "sent request");

        let mut replies = Vec::new();
        loop {
            let n = self.recv()?;
            let mut done = false;
            for f in frame::decode_frames(&self.buf[..n])? {
                if f.seq != seq {
                    tracing::trace!(want = seq, got = f.seq, "skipping stale reply");
                    continue;
                }
                match f.control()? {
                    Control::Skip => {}
                    Control::Done => done = true,
                    Control::Message(m) => {
                        replies.push(m);
                        if !f.flags.contains(Flags::MULTI) {
                            done = true;
                        }
                    }
                }
            }
            if done {
                break;
            }
        }
        tracing::trace!(seq, replies = replies.len(), "request complete");
        Ok(replies)
    }

    fn close(self) -> Result<(), Error> {
        let raw = std::os::fd::IntoRawFd::into_raw_fd(self.fd);
        // SAFETY: ownership of `raw` was just released by `into_raw_fd`.
        if unsafe { libc::close(raw) } < 0 {
            return Err(io::Error::last_os_error().into());
        }
        Ok(())
    }
}
