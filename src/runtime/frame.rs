//! Netlink framing: one datagram carries one or more netlink messages, each a
//! 16-byte `nlmsghdr` followed by its payload, padded to 4 bytes. Generic
//! netlink payloads start with a 4-byte `genlmsghdr`.
//!
//! Kept free of socket calls so framing can be checked on any platform.

use super::attr::align;
use super::{Error, Flags, Header, Message};
use byteorder::{ByteOrder, NativeEndian};

pub const NLMSG_HDRLEN: usize = 16;
pub const GENL_HDRLEN: usize = 4;

pub const NLMSG_NOOP: u16 = 1;
pub const NLMSG_ERROR: u16 = 2;
pub const NLMSG_DONE: u16 = 3;
pub const NLMSG_OVERRUN: u16 = 4;

/// Serialize a generic netlink request for `family`.
pub fn encode_request(msg: &Message, family: u16, flags: Flags, seq: u32) -> Vec<u8> {
    let len = NLMSG_HDRLEN + GENL_HDRLEN + msg.data.len();
    let mut out = vec![0u8; NLMSG_HDRLEN + GENL_HDRLEN];
    NativeEndian::write_u32(&mut out[0..4], len as u32);
    NativeEndian::write_u16(&mut out[4..6], family);
    NativeEndian::write_u16(&mut out[6..8], flags.bits());
    NativeEndian::write_u32(&mut out[8..12], seq);
    // Port ID 0: the kernel fills in ours.
    out[16] = msg.header.command;
    out[17] = msg.header.version;
    out.extend_from_slice(&msg.data);
    out.resize(align(out.len()), 0);
    out
}

/// One netlink message inside a datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub kind: u16,
    pub flags: Flags,
    pub seq: u32,
    pub pid: u32,
    pub payload: &'a [u8],
}

/// What a received frame means for the request in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Padding message, ignore.
    Skip,
    /// Acknowledgement or end of a dump.
    Done,
    /// A reply carrying data.
    Message(Message),
}

/// Split a datagram into its netlink messages.
pub fn decode_frames(buf: &[u8]) -> Result<Vec<Frame<'_>>, Error> {
    let mut frames = Vec::new();
    let mut rest = buf;
    while !rest.is_empty() {
        if rest.len() < NLMSG_HDRLEN {
            return Err(Error::Malformed(format!(
                "{} trailing bytes are too short for a netlink header",
                rest.len()
            )));
        }
        let len = NativeEndian::read_u32(&rest[0..4]) as usize;
        if len < NLMSG_HDRLEN || len > rest.len() {
            return Err(Error::Malformed(format!(
                "netlink message length {} out of bounds ({} bytes left)",
                len,
                rest.len()
            )));
        }
        frames.push(Frame {
            kind: NativeEndian::read_u16(&rest[4..6]),
            flags: Flags::from_bits(NativeEndian::read_u16(&rest[6..8])),
            seq: NativeEndian::read_u32(&rest[8..12]),
            pid: NativeEndian::read_u32(&rest[12..16]),
            payload: &rest[NLMSG_HDRLEN..len],
        });
        rest = &rest[align(len).min(rest.len())..];
    }
    Ok(frames)
}

impl Frame<'_> {
    pub fn control(&self) -> Result<Control, Error> {
        match self.kind {
            NLMSG_NOOP => Ok(Control::Skip),
            NLMSG_ERROR => match self.errno()? {
                0 => Ok(Control::Done),
                code => Err(os_error(code)),
            },
            NLMSG_DONE => {
                // Dumps may report a late error in the DONE payload.
                if self.payload.len() >= 4 {
                    let code = self.errno()?;
                    if code < 0 {
                        return Err(os_error(code));
                    }
                }
                Ok(Control::Done)
            }
            NLMSG_OVERRUN => Err(Error::Malformed("netlink overrun".to_string())),
            _ => {
                if self.payload.len() < GENL_HDRLEN {
                    return Err(Error::Malformed(format!(
                        "generic netlink payload of {} bytes has no header",
                        self.payload.len()
                    )));
                }
                Ok(Control::Message(Message {
                    header: Header {
                        command: self.payload[0],
                        version: self.payload[1],
                    },
                    data: self.payload[GENL_HDRLEN..].to_vec(),
                }))
            }
        }
    }

    fn errno(&self) -> Result<i32, Error> {
        if self.payload.len() < 4 {
            return Err(Error::Malformed("netlink error message without code".to_string()));
        }
        Ok(NativeEndian::read_i32(&self.payload[0..4]))
    }
}

/// Netlink reports errors as negated errno values.
fn os_error(code: i32) -> Error {
    std::io::Error::from_raw_os_error(code.wrapping_neg()).into()
}
