//! Netlink attribute (TLV) encoding and decoding.
//!
//! Each attribute is a 4-byte header (`u16` length including the header,
//! `u16` type) followed by its payload, padded to a 4-byte boundary. Integers
//! are in host byte order.

use super::Error;
use byteorder::{ByteOrder, NativeEndian};

const HEADER_LEN: usize = 4;
const NLA_F_NESTED: u16 = 0x8000;
const NLA_F_NET_BYTEORDER: u16 = 0x4000;
const TYPE_MASK: u16 = !(NLA_F_NESTED | NLA_F_NET_BYTEORDER);

pub(crate) fn align(n: usize) -> usize {
    (n + 3) & !3
}

/// Packs attributes into a byte buffer.
///
/// Errors are deferred: the first failure is kept and returned by
/// [`AttributeEncoder::encode`], later writes are ignored.
#[derive(Debug, Default)]
pub struct AttributeEncoder {
    buf: Vec<u8>,
    err: Option<Error>,
}

impl AttributeEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(&mut self, kind: u16, v: u8) {
        self.bytes(kind, &[v]);
    }

    pub fn u16(&mut self, kind: u16, v: u16) {
        let mut b = [0u8; 2];
        NativeEndian::write_u16(&mut b, v);
        self.bytes(kind, &b);
    }

    pub fn u32(&mut self, kind: u16, v: u32) {
        let mut b = [0u8; 4];
        NativeEndian::write_u32(&mut b, v);
        self.bytes(kind, &b);
    }

    pub fn u64(&mut self, kind: u16, v: u64) {
        let mut b = [0u8; 8];
        NativeEndian::write_u64(&mut b, v);
        self.bytes(kind, &b);
    }

    /// NUL-terminated string.
    pub fn string(&mut self, kind: u16, v: &str) {
        let mut b = Vec::with_capacity(v.len() + 1);
        b.extend_from_slice(v.as_bytes());
        b.push(0);
        self.bytes(kind, &b);
    }

    /// Raw payload.
    pub fn bytes(&mut self, kind: u16, data: &[u8]) {
        if self.err.is_some() {
            return;
        }
        let len = HEADER_LEN + data.len();
        if len > u16::MAX as usize {
            self.err = Some(Error::AttributeTooLarge {
                kind,
                len: data.len(),
            });
            return;
        }

        let mut header = [0u8; HEADER_LEN];
        NativeEndian::write_u16(&mut header[0..2], len as u16);
        NativeEndian::write_u16(&mut header[2..4], kind);
        self.buf.extend_from_slice(&header);
        self.buf.extend_from_slice(data);
        self.buf.resize(align(self.buf.len()), 0);
    }

    /// Finish encoding and return the packed attributes.
    pub fn encode(self) -> Result<Vec<u8>, Error> {
        match self.err {
            Some(e) => Err(e),
            None => Ok(self.buf),
        }
    }
}

/// One decoded attribute, borrowing its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    kind: u16,
    data: &'a [u8],
}

impl<'a> Attribute<'a> {
    /// Attribute type with the nested and byte-order flags stripped.
    pub fn kind(&self) -> u16 {
        self.kind
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn u8(&self) -> Result<u8, Error> {
        Ok(self.exact(1)?[0])
    }

    pub fn u16(&self) -> Result<u16, Error> {
        Ok(NativeEndian::read_u16(self.exact(2)?))
    }

    pub fn u32(&self) -> Result<u32, Error> {
        Ok(NativeEndian::read_u32(self.exact(4)?))
    }

    pub fn u64(&self) -> Result<u64, Error> {
        Ok(NativeEndian::read_u64(self.exact(8)?))
    }

    /// String up to the first NUL (or the whole payload when unterminated).
    pub fn string(&self) -> Result<String, Error> {
        let end = self
            .data
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.data.len());
        std::str::from_utf8(&self.data[..end])
            .map(str::to_string)
            .map_err(|_| Error::InvalidString { kind: self.kind })
    }

    fn exact(&self, expected: usize) -> Result<&'a [u8], Error> {
        if self.data.len() != expected {
            return Err(Error::InvalidLength {
                kind: self.kind,
                expected,
                got: self.data.len(),
            });
        }
        Ok(self.data)
    }
}

/// Iterates over the attributes packed in a buffer.
///
/// Yields an error and then stops when the buffer is malformed.
#[derive(Debug, Clone)]
pub struct AttributeDecoder<'a> {
    buf: &'a [u8],
    failed: bool,
}

impl<'a> AttributeDecoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        AttributeDecoder { buf, failed: false }
    }

    fn fail(&mut self, reason: String) -> Option<Result<Attribute<'a>, Error>> {
        self.failed = true;
        Some(Err(Error::Malformed(reason)))
    }
}

impl<'a> Iterator for AttributeDecoder<'a> {
    type Item = Result<Attribute<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.buf.is_empty() {
            return None;
        }
        if self.buf.len() < HEADER_LEN {
            return self.fail(format!(
                "{} trailing bytes are too short for an attribute header",
                self.buf.len()
            ));
        }

        let len = NativeEndian::read_u16(&self.buf[0..2]) as usize;
        let kind = NativeEndian::read_u16(&self.buf[2..4]) & TYPE_MASK;
        if len < HEADER_LEN || len > self.buf.len() {
            return self.fail(format!(
                "attribute {} length {} out of bounds ({} bytes left)",
                kind,
                len,
                self.buf.len()
            ));
        }

        let data = &self.buf[HEADER_LEN..len];
        let next = align(len).min(self.buf.len());
        self.buf = &self.buf[next..];
        Some(Ok(Attribute { kind, data }))
    }
}
