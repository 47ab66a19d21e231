use super::Error;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Generic netlink header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub command: u8,
    pub version: u8,
}

/// A generic netlink message: header plus packed attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub data: Vec<u8>,
}

/// Netlink message flags (`NLM_F_*`).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags(u16);

impl Flags {
    pub const REQUEST: Flags = Flags(0x1);
    pub const MULTI: Flags = Flags(0x2);
    pub const ACK: Flags = Flags(0x4);
    pub const ECHO: Flags = Flags(0x8);
    pub const ROOT: Flags = Flags(0x100);
    pub const MATCH: Flags = Flags(0x200);
    /// `ROOT | MATCH`: enumerate every object.
    pub const DUMP: Flags = Flags(0x300);

    pub const fn from_bits(bits: u16) -> Self {
        Flags(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flags({:#06x})", self.0)
    }
}

/// Executes generic netlink requests for a generated connection.
pub trait Transport {
    /// Send `msg` to `family` with `flags` and collect every reply message
    /// belonging to this request, in arrival order.
    fn execute(&mut self, msg: Message, family: u16, flags: Flags) -> Result<Vec<Message>, Error>;

    /// Release the transport.
    fn close(self) -> Result<(), Error>
    where
        Self: Sized;
}
