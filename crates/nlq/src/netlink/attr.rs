//! Netlink attribute (nlattr) encoding.
//!
//! Attributes are written straight into a message buffer as a 4-byte
//! header (length, type) followed by the payload. Nothing is stored
//! between calls.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::buffer::GrowBuf;
use super::error::{Error, Result};

/// Netlink attribute alignment.
pub const NLA_ALIGNTO: usize = 4;

/// Align a length to NLA_ALIGNTO boundary.
#[inline]
pub const fn nla_align(len: usize) -> usize {
    (len + NLA_ALIGNTO - 1) & !(NLA_ALIGNTO - 1)
}

/// Size of the attribute header.
pub const NLA_HDRLEN: usize = std::mem::size_of::<NlAttr>();

/// Attribute type flags.
pub const NLA_F_NESTED: u16 = 1 << 15;
pub const NLA_F_NET_BYTEORDER: u16 = 1 << 14;
pub const NLA_TYPE_MASK: u16 = !(NLA_F_NESTED | NLA_F_NET_BYTEORDER);

/// Netlink attribute header (mirrors struct nlattr / struct rtattr).
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
pub struct NlAttr {
    /// Length including header.
    pub nla_len: u16,
    /// Attribute type.
    pub nla_type: u16,
}

impl NlAttr {
    /// Create an attribute header for a payload of `data_len` bytes.
    pub fn new(attr_type: u16, data_len: usize) -> Result<Self> {
        let len = NLA_HDRLEN + data_len;
        let nla_len =
            u16::try_from(len).map_err(|_| Error::AttributeTooLarge { attr_type, len })?;
        Ok(Self {
            nla_len,
            nla_type: attr_type,
        })
    }

    /// Get the attribute type without flags.
    pub fn kind(&self) -> u16 {
        self.nla_type & NLA_TYPE_MASK
    }

    /// Check if the nested flag is set.
    pub fn is_nested(&self) -> bool {
        self.nla_type & NLA_F_NESTED != 0
    }

    /// Get the payload length (total length minus header).
    pub fn payload_len(&self) -> usize {
        (self.nla_len as usize).saturating_sub(NLA_HDRLEN)
    }

    /// Convert to bytes.
    pub fn as_bytes(&self) -> &[u8] {
        <Self as IntoBytes>::as_bytes(self)
    }

    /// Read an attribute header from the start of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::read_from_prefix(data)
            .map(|(attr, _)| attr)
            .map_err(|_| Error::Truncated {
                expected: NLA_HDRLEN,
                actual: data.len(),
            })
    }
}

/// Alignment policy applied after each attribute record.
///
/// The length field never counts the padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Padding {
    /// Records are packed back to back.
    #[default]
    None,
    /// Each record is zero-padded to a 4-byte boundary, as the kernel
    /// expects (`NLA_ALIGN`).
    Align4,
}

impl Padding {
    fn apply(self, buf: &mut GrowBuf) -> Result<()> {
        match self {
            Padding::None => Ok(()),
            Padding::Align4 => buf.pad_to(NLA_ALIGNTO),
        }
    }
}

/// Encode one attribute record into `buf`.
pub fn encode(buf: &mut GrowBuf, attr_type: u16, data: &[u8], padding: Padding) -> Result<()> {
    let attr = NlAttr::new(attr_type, data.len())?;
    buf.append(attr.as_bytes())?;
    buf.append(data)?;
    padding.apply(buf)
}

/// Encode an attribute whose payload is a closed, header-less buffer.
///
/// The payload is copied; the caller drops the source afterwards.
pub fn encode_nested(
    buf: &mut GrowBuf,
    attr_type: u16,
    payload: &[u8],
    padding: Padding,
) -> Result<()> {
    encode(buf, attr_type, payload, padding)?;
    tracing::trace!(attr_type, len = payload.len(), "nested attribute embedded");
    Ok(())
}
