//! Module `nlctrl` is generated from a YAML netlink specification for family "nlctrl".
//!
//! Description: Generic netlink control protocol. Interface to query information about generic netlink families registered in the kernel - their names, ids, accepted messages and attributes.
//!
//! Code generated by ynlgen. DO NOT EDIT.

use ynlgen::runtime as rt;

/// A Conn is a connection to netlink family "nlctrl".
#[derive(Debug)]
pub struct Conn<T> {
    c: T,
    family: u16,
}

#[cfg(target_os = "linux")]
impl Conn<rt::GenlSocket> {
    /// Dial opens a Conn for netlink family "nlctrl" over a generic netlink socket.
    pub fn dial(cfg: &rt::DialConfig) -> Result<Self, rt::Error> {
        let c = rt::GenlSocket::dial(cfg)?;
        Self::with_transport(c)
    }
}

impl<T: rt::Transport> Conn<T> {
    /// Wraps an open transport.
    pub fn with_transport(c: T) -> Result<Self, rt::Error> {
        Ok(Conn {
            c,
            family: crate::consts::GENL_ID_CTRL as u16,
        })
    }

    /// Family ID requests are sent to.
    pub fn family(&self) -> u16 {
        self.family
    }

    /// Close closes the Conn's underlying transport.
    pub fn close(self) -> Result<(), rt::Error> {
        self.c.close()
    }
}

/// DoGetfamilyRequest is used with the `Conn::do_getfamily` method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoGetfamilyRequest {
    /// Numerical identifier of the family.
    pub family_id: u16,
    /// String identifier of the family. Guaranteed to be unique.
    pub family_name: String,
}

/// DoGetfamilyReply is used with the `Conn::do_getfamily` method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoGetfamilyReply {
    /// Numerical identifier of the family.
    pub family_id: u16,
    /// String identifier of the family. Guaranteed to be unique.
    pub family_name: String,
    pub version: u32,
    pub hdrsize: u32,
    pub maxattr: u32,
    // ynlgen: unimplemented field "ops" of type "array-nest"
    // ynlgen: unimplemented field "mcast-groups" of type "array-nest"
}

impl<T: rt::Transport> Conn<T> {
    /// DoGetfamily wraps the "getfamily" operation:
    /// Get information about genetlink family.
    pub fn do_getfamily(&mut self, req: &DoGetfamilyRequest) -> Result<DoGetfamilyReply, rt::Error> {
        let mut ae = rt::AttributeEncoder::new();
        if req.family_id != 0 {
            ae.u16(crate::consts::CTRL_ATTR_FAMILY_ID as u16, req.family_id);
        }
        if !req.family_name.is_empty() {
            ae.string(crate::consts::CTRL_ATTR_FAMILY_NAME as u16, &req.family_name);
        }
        let b = ae.encode()?;

        let msg = rt::Message {
            header: rt::Header {
                command: crate::consts::CTRL_CMD_GETFAMILY as u8,
                version: 1,
            },
            data: b,
        };

        let msgs = self.c.execute(msg, self.family, rt::Flags::REQUEST)?;

        let mut replies = Vec::with_capacity(msgs.len());
        for m in &msgs {
            let mut reply = DoGetfamilyReply::default();
            for attr in rt::AttributeDecoder::new(&m.data) {
                let attr = attr?;
                match attr.kind() {
                    k if k == crate::consts::CTRL_ATTR_FAMILY_ID as u16 => reply.family_id = attr.u16()?,
                    k if k == crate::consts::CTRL_ATTR_FAMILY_NAME as u16 => reply.family_name = attr.string()?,
                    k if k == crate::consts::CTRL_ATTR_VERSION as u16 => reply.version = attr.u32()?,
                    k if k == crate::consts::CTRL_ATTR_HDRSIZE as u16 => reply.hdrsize = attr.u32()?,
                    k if k == crate::consts::CTRL_ATTR_MAXATTR as u16 => reply.maxattr = attr.u32()?,
                    // ynlgen: unimplemented field "ops" of type "array-nest"
                    // ynlgen: unimplemented field "mcast-groups" of type "array-nest"
                    _ => {}
                }
            }
            replies.push(reply);
        }

        if replies.len() != 1 {
            return Err(rt::Error::ExpectedOne {
                family: "nlctrl",
                record: "DoGetfamilyReply",
                got: replies.len(),
            });
        }
        Ok(replies.remove(0))
    }
}

/// DumpGetfamilyReply is used with the `Conn::dump_getfamily` method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpGetfamilyReply {
    /// Numerical identifier of the family.
    pub family_id: u16,
    /// String identifier of the family. Guaranteed to be unique.
    pub family_name: String,
    pub version: u32,
    pub hdrsize: u32,
    pub maxattr: u32,
    // ynlgen: unimplemented field "ops" of type "array-nest"
    // ynlgen: unimplemented field "mcast-groups" of type "array-nest"
}

impl<T: rt::Transport> Conn<T> {
    /// DumpGetfamily wraps the "getfamily" operation:
    /// Get information about genetlink family.
    pub fn dump_getfamily(&mut self) -> Result<Vec<DumpGetfamilyReply>, rt::Error> {
        // No attribute arguments.
        let b = Vec::new();

        let msg = rt::Message {
            header: rt::Header {
                command: crate::consts::CTRL_CMD_GETFAMILY as u8,
                version: 1,
            },
            data: b,
        };

        let msgs = self.c.execute(msg, self.family, rt::Flags::REQUEST | rt::Flags::DUMP)?;

        let mut replies = Vec::with_capacity(msgs.len());
        for m in &msgs {
            let mut reply = DumpGetfamilyReply::default();
            for attr in rt::AttributeDecoder::new(&m.data) {
                let attr = attr?;
                match attr.kind() {
                    k if k == crate::consts::CTRL_ATTR_FAMILY_ID as u16 => reply.family_id = attr.u16()?,
                    k if k == crate::consts::CTRL_ATTR_FAMILY_NAME as u16 => reply.family_name = attr.string()?,
                    k if k == crate::consts::CTRL_ATTR_VERSION as u16 => reply.version = attr.u32()?,
                    k if k == crate::consts::CTRL_ATTR_HDRSIZE as u16 => reply.hdrsize = attr.u32()?,
                    k if k == crate::consts::CTRL_ATTR_MAXATTR as u16 => reply.maxattr = attr.u32()?,
                    // ynlgen: unimplemented field "ops" of type "array-nest"
                    // ynlgen: unimplemented field "mcast-groups" of type "array-nest"
                    _ => {}
                }
            }
            replies.push(reply);
        }

        Ok(replies)
    }
}

/// DumpGetpolicyRequest is used with the `Conn::dump_getpolicy` method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpGetpolicyRequest {
    /// Numerical identifier of the family.
    pub family_id: u16,
    /// String identifier of the family. Guaranteed to be unique.
    pub family_name: String,
    pub op: u32,
}

/// DumpGetpolicyReply is used with the `Conn::dump_getpolicy` method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpGetpolicyReply {
    /// Numerical identifier of the family.
    pub family_id: u16,
    // ynlgen: unimplemented field "op-policy" of type "nest-type-value"
    // ynlgen: unimplemented field "policy" of type "nest-type-value"
}

impl<T: rt::Transport> Conn<T> {
    /// DumpGetpolicy wraps the "getpolicy" operation:
    /// Get attribute policy for a genetlink family.
    pub fn dump_getpolicy(&mut self, req: &DumpGetpolicyRequest) -> Result<Vec<DumpGetpolicyReply>, rt::Error> {
        let mut ae = rt::AttributeEncoder::new();
        if req.family_id != 0 {
            ae.u16(crate::consts::CTRL_ATTR_FAMILY_ID as u16, req.family_id);
        }
        if !req.family_name.is_empty() {
            ae.string(crate::consts::CTRL_ATTR_FAMILY_NAME as u16, &req.family_name);
        }
        if req.op != 0 {
            ae.u32(crate::consts::CTRL_ATTR_OP as u16, req.op);
        }
        let b = ae.encode()?;

        let msg = rt::Message {
            header: rt::Header {
                command: crate::consts::CTRL_CMD_GETPOLICY as u8,
                version: 1,
            },
            data: b,
        };

        let msgs = self.c.execute(msg, self.family, rt::Flags::REQUEST | rt::Flags::DUMP)?;

        let mut replies = Vec::with_capacity(msgs.len());
        for m in &msgs {
            let mut reply = DumpGetpolicyReply::default();
            for attr in rt::AttributeDecoder::new(&m.data) {
                let attr = attr?;
                match attr.kind() {
                    k if k == crate::consts::CTRL_ATTR_FAMILY_ID as u16 => reply.family_id = attr.u16()?,
                    // ynlgen: unimplemented field "op-policy" of type "nest-type-value"
                    // ynlgen: unimplemented field "policy" of type "nest-type-value"
                    _ => {}
                }
            }
            replies.push(reply);
        }

        Ok(replies)
    }
}
