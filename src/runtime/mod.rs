//! Runtime support for generated bindings.
//!
//! Generated modules refer to this module through a single path (by default
//! `ynlgen::runtime`) and use:
//!
//! - [`AttributeEncoder`] / [`AttributeDecoder`] for netlink attribute TLVs,
//! - [`Message`], [`Header`] and [`Flags`] to describe one generic netlink
//!   exchange,
//! - the [`Transport`] trait to execute it, implemented for Linux sockets by
//!   [`GenlSocket`] and by anything a test wants to put in its place,
//! - [`resolve_family`] when a binding looks its family ID up by name.

mod attr;
pub mod frame;
mod message;
#[cfg(target_os = "linux")]
mod socket;

pub use attr::{Attribute, AttributeDecoder, AttributeEncoder};
pub use message::{Flags, Header, Message, Transport};
#[cfg(target_os = "linux")]
pub use socket::GenlSocket;

/// Control family ID, fixed by the kernel.
pub const GENL_ID_CTRL: u16 = 0x10;
/// `CTRL_CMD_GETFAMILY` of the control family.
pub const CTRL_CMD_GETFAMILY: u8 = 3;
/// `CTRL_ATTR_FAMILY_ID` of the control family.
pub const CTRL_ATTR_FAMILY_ID: u16 = 1;
/// `CTRL_ATTR_FAMILY_NAME` of the control family.
pub const CTRL_ATTR_FAMILY_NAME: u16 = 2;

/// Errors returned by generated bindings and the runtime they use.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("attribute {kind}: payload of {len} bytes does not fit a netlink attribute")]
    AttributeTooLarge { kind: u16, len: usize },
    #[error("malformed netlink data: {0}")]
    Malformed(String),
    #[error("attribute {kind}: expected {expected} bytes, got {got}")]
    InvalidLength { kind: u16, expected: usize, got: usize },
    #[error("attribute {kind}: string is not valid UTF-8")]
    InvalidString { kind: u16 },
    #[error("{family}: expected exactly one {record}, got {got}")]
    ExpectedOne {
        family: &'static str,
        record: &'static str,
        got: usize,
    },
    #[error("generic netlink family {0:?} not found")]
    FamilyNotFound(String),
}

/// Options for opening a [`GenlSocket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialConfig {
    /// Ask the kernel for strict header and attribute checking
    /// (`NETLINK_GET_STRICT_CHK`).
    pub strict: bool,
    /// Initial receive buffer; grown when the kernel sends a larger datagram.
    pub recv_buffer_size: usize,
}

impl Default for DialConfig {
    fn default() -> Self {
        DialConfig {
            strict: false,
            recv_buffer_size: 32 * 1024,
        }
    }
}

/// Look a generic netlink family ID up by name through the control family.
pub fn resolve_family<T: Transport>(transport: &mut T, name: &str) -> Result<u16, Error> {
    let mut ae = AttributeEncoder::new();
    ae.string(CTRL_ATTR_FAMILY_NAME, name);
    let msg = Message {
        header: Header {
            command: CTRL_CMD_GETFAMILY,
            version: 1,
        },
        data: ae.encode()?,
    };

    let replies = transport.execute(msg, GENL_ID_CTRL, Flags::REQUEST)?;
    for m in &replies {
        for attr in AttributeDecoder::new(&m.data) {
            let attr = attr?;
            if attr.kind() == CTRL_ATTR_FAMILY_ID {
                let id = attr.u16()?;
                tracing::debug!(family = name, id, "resolved generic netlink family");
                return Ok(id);
            }
        }
    }
    Err(Error::FamilyNotFound(name.to_string()))
}
