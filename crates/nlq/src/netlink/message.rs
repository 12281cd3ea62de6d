//! Netlink message header and completed messages.

use bytes::Bytes;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::error::{Error, Result};

/// Netlink message header alignment.
pub const NLMSG_ALIGNTO: usize = 4;

/// Align a length to NLMSG_ALIGNTO boundary.
#[inline]
pub const fn nlmsg_align(len: usize) -> usize {
    (len + NLMSG_ALIGNTO - 1) & !(NLMSG_ALIGNTO - 1)
}

/// Size of the netlink message header.
pub const NLMSG_HDRLEN: usize = std::mem::size_of::<NlMsgHdr>();

/// Netlink message header (mirrors struct nlmsghdr).
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
pub struct NlMsgHdr {
    /// Length of message including header.
    pub nlmsg_len: u32,
    /// Message type.
    pub nlmsg_type: u16,
    /// Additional flags.
    pub nlmsg_flags: u16,
    /// Sequence number.
    pub nlmsg_seq: u32,
    /// Sending process port ID.
    pub nlmsg_pid: u32,
}

impl NlMsgHdr {
    /// Create a new message header.
    ///
    /// The length stays zero until the message is completed.
    pub fn new(msg_type: u16, flags: u16, seq: u32, pid: u32) -> Self {
        Self {
            nlmsg_len: 0,
            nlmsg_type: msg_type,
            nlmsg_flags: flags,
            nlmsg_seq: seq,
            nlmsg_pid: pid,
        }
    }

    /// Check if the request flag is set.
    pub fn is_request(&self) -> bool {
        self.nlmsg_flags & NLM_F_REQUEST != 0
    }

    /// Get the payload length (total length minus header).
    pub fn payload_len(&self) -> usize {
        (self.nlmsg_len as usize).saturating_sub(NLMSG_HDRLEN)
    }

    /// Convert header to bytes.
    pub fn as_bytes(&self) -> &[u8] {
        <Self as IntoBytes>::as_bytes(self)
    }

    /// Read a header from the start of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::read_from_prefix(data)
            .map(|(hdr, _)| hdr)
            .map_err(|_| Error::Truncated {
                expected: NLMSG_HDRLEN,
                actual: data.len(),
            })
    }
}

/// Standard netlink message types.
pub struct NlMsgType;

impl NlMsgType {
    /// No operation, message must be discarded.
    pub const NOOP: u16 = 1;
    /// Error message or ACK.
    pub const ERROR: u16 = 2;
    /// End of multipart message.
    pub const DONE: u16 = 3;
    /// Data lost, request resend.
    pub const OVERRUN: u16 = 4;

    /// First type available to netlink families.
    pub const MIN_TYPE: u16 = 0x10;

    // Link messages
    pub const RTM_NEWLINK: u16 = 16;
    pub const RTM_DELLINK: u16 = 17;
    pub const RTM_GETLINK: u16 = 18;
    pub const RTM_SETLINK: u16 = 19;

    // Address messages
    pub const RTM_NEWADDR: u16 = 20;
    pub const RTM_DELADDR: u16 = 21;
    pub const RTM_GETADDR: u16 = 22;

    // Route messages
    pub const RTM_NEWROUTE: u16 = 24;
    pub const RTM_DELROUTE: u16 = 25;
    pub const RTM_GETROUTE: u16 = 26;
}

/// Netlink message flags.
pub const NLM_F_REQUEST: u16 = 0x01;
pub const NLM_F_MULTI: u16 = 0x02;
pub const NLM_F_ACK: u16 = 0x04;
pub const NLM_F_ECHO: u16 = 0x08;

// Modifiers to GET request
pub const NLM_F_ROOT: u16 = 0x100;
pub const NLM_F_MATCH: u16 = 0x200;
pub const NLM_F_ATOMIC: u16 = 0x400;
pub const NLM_F_DUMP: u16 = NLM_F_ROOT | NLM_F_MATCH;

// Modifiers to NEW request
pub const NLM_F_REPLACE: u16 = 0x100;
pub const NLM_F_EXCL: u16 = 0x200;
pub const NLM_F_CREATE: u16 = 0x400;
pub const NLM_F_APPEND: u16 = 0x800;

/// A completed, immutable message ready for transmission.
///
/// Produced by [`MessageBuilder::finish`](super::MessageBuilder::finish).
/// Cloning is cheap; the bytes are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    bytes: Bytes,
    has_header: bool,
}

impl Message {
    pub(crate) fn from_parts(bytes: Bytes, has_header: bool) -> Self {
        Self { bytes, has_header }
    }

    /// Total length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the message holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Check if the message starts with a netlink header.
    ///
    /// Messages finished from an attribute-only builder do not.
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// The serialized message.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hand the serialized message over to a transport.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// The header record, if this message has one.
    pub fn header(&self) -> Option<NlMsgHdr> {
        if self.has_header {
            NlMsgHdr::from_bytes(&self.bytes).ok()
        } else {
            None
        }
    }

    /// Message type from the header.
    pub fn msg_type(&self) -> Option<u16> {
        self.header().map(|h| h.nlmsg_type)
    }

    /// Sequence number from the header.
    pub fn seq(&self) -> Option<u32> {
        self.header().map(|h| h.nlmsg_seq)
    }

    /// The bytes following the header (the whole buffer if there is none).
    pub fn payload(&self) -> &[u8] {
        if self.has_header && self.bytes.len() >= NLMSG_HDRLEN {
            &self.bytes[NLMSG_HDRLEN..]
        } else {
            &self.bytes
        }
    }
}

impl AsRef<[u8]> for Message {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Message> for Bytes {
    fn from(msg: Message) -> Self {
        msg.into_bytes()
    }
}
