//! Message builder for constructing netlink messages.
//!
//! A builder owns a growable buffer. A real message starts with a
//! [`NlMsgHdr`] whose length is unknown until [`MessageBuilder::finish`]
//! patches it in. An attribute-only builder has no header and exists to
//! assemble the payload of a nested attribute.

use bytes::Bytes;
use zerocopy::{Immutable, IntoBytes};

use super::attr::{self, Padding};
use super::buffer::{DEFAULT_CAPACITY, GrowBuf};
use super::error::{Error, Result};
use super::message::{Message, NLMSG_HDRLEN, NlMsgHdr};
use super::seq::Sequencer;

/// Options for a new builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    capacity: usize,
    padding: Padding,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            padding: Padding::None,
        }
    }
}

impl BuildOptions {
    /// Default options: one page of initial capacity, no padding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial buffer capacity in bytes.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Attribute padding policy.
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Shorthand for `padding(Padding::Align4)`.
    pub fn aligned(self) -> Self {
        self.padding(Padding::Align4)
    }
}

/// Builder for constructing netlink messages.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    buf: GrowBuf,
    has_header: bool,
    padding: Padding,
}

impl MessageBuilder {
    /// Start a message, numbering requests from [`Sequencer::global`].
    ///
    /// With `NLM_F_REQUEST` set and `seq == 0` the next global sequence
    /// number is used; otherwise `seq` is written as given.
    pub fn new(msg_type: u16, flags: u16, seq: u32, pid: u32) -> Result<Self> {
        Self::with_sequencer(Sequencer::global(), msg_type, flags, seq, pid)
    }

    /// Start a message, numbering requests from `sequencer`.
    pub fn with_sequencer(
        sequencer: &Sequencer,
        msg_type: u16,
        flags: u16,
        seq: u32,
        pid: u32,
    ) -> Result<Self> {
        let header = NlMsgHdr::new(msg_type, flags, seq, pid);
        Self::with_options(sequencer, header, BuildOptions::default())
    }

    /// Start a message from a header template.
    ///
    /// The template's length is ignored; its sequence number follows the
    /// same auto-numbering rule as [`new`](Self::new).
    pub fn with_options(
        sequencer: &Sequencer,
        mut header: NlMsgHdr,
        options: BuildOptions,
    ) -> Result<Self> {
        header.nlmsg_len = 0;
        header.nlmsg_seq = sequencer.resolve(header.nlmsg_flags, header.nlmsg_seq);

        let mut buf = GrowBuf::open(options.capacity.max(NLMSG_HDRLEN))?;
        buf.append(header.as_bytes())?;
        Ok(Self {
            buf,
            has_header: true,
            padding: options.padding,
        })
    }

    /// Start a header-less builder for a nested attribute payload.
    pub fn attributes() -> Result<Self> {
        Self::attributes_with_options(BuildOptions::default())
    }

    /// Start a header-less builder with the given options.
    pub fn attributes_with_options(options: BuildOptions) -> Result<Self> {
        Ok(Self {
            buf: GrowBuf::open(options.capacity)?,
            has_header: false,
            padding: options.padding,
        })
    }

    /// Get the current message length.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing beyond the header (if any) has been appended.
    pub fn is_empty(&self) -> bool {
        self.buf.len() == self.header_len()
    }

    /// Check if this builder writes a netlink header.
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// The attribute padding policy in effect.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// The sequence number written into the header.
    pub fn seq(&self) -> Option<u32> {
        self.header().map(|h| h.nlmsg_seq)
    }

    /// The header as written so far (its length is still zero).
    pub fn header(&self) -> Option<NlMsgHdr> {
        if self.has_header {
            NlMsgHdr::from_bytes(self.buf.as_bytes()).ok()
        } else {
            None
        }
    }

    /// Get the current buffer for inspection.
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Append raw bytes to the message.
    pub fn append_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.buf.append(data)
    }

    /// Append a fixed-size struct, such as a family header, to the message.
    pub fn append<T: IntoBytes + Immutable>(&mut self, data: &T) -> Result<()> {
        self.buf.append(data.as_bytes())
    }

    /// Append an attribute with the given type and data.
    pub fn append_attr(&mut self, attr_type: u16, data: &[u8]) -> Result<()> {
        attr::encode(&mut self.buf, attr_type, data, self.padding)
    }

    /// Append a u8 attribute.
    pub fn append_attr_u8(&mut self, attr_type: u16, value: u8) -> Result<()> {
        self.append_attr(attr_type, &[value])
    }

    /// Append an empty (flag) attribute with no payload.
    pub fn append_attr_empty(&mut self, attr_type: u16) -> Result<()> {
        self.append_attr(attr_type, &[])
    }

    /// Append a u16 attribute (native endian).
    pub fn append_attr_u16(&mut self, attr_type: u16, value: u16) -> Result<()> {
        self.append_attr(attr_type, &value.to_ne_bytes())
    }

    /// Append a u32 attribute (native endian).
    pub fn append_attr_u32(&mut self, attr_type: u16, value: u32) -> Result<()> {
        self.append_attr(attr_type, &value.to_ne_bytes())
    }

    /// Append a u64 attribute (native endian).
    pub fn append_attr_u64(&mut self, attr_type: u16, value: u64) -> Result<()> {
        self.append_attr(attr_type, &value.to_ne_bytes())
    }

    /// Append a u16 attribute (big endian / network order).
    pub fn append_attr_u16_be(&mut self, attr_type: u16, value: u16) -> Result<()> {
        self.append_attr(attr_type, &value.to_be_bytes())
    }

    /// Append a u32 attribute (big endian / network order).
    pub fn append_attr_u32_be(&mut self, attr_type: u16, value: u32) -> Result<()> {
        self.append_attr(attr_type, &value.to_be_bytes())
    }

    /// Append a null-terminated string attribute.
    pub fn append_attr_str(&mut self, attr_type: u16, value: &str) -> Result<()> {
        let mut data = Vec::new();
        data.try_reserve(value.len() + 1)?;
        data.extend_from_slice(value.as_bytes());
        data.push(0);
        self.append_attr(attr_type, &data)
    }

    /// Append a string attribute without null terminator.
    pub fn append_attr_string(&mut self, attr_type: u16, value: &str) -> Result<()> {
        self.append_attr(attr_type, value.as_bytes())
    }

    /// Embed `child` as the payload of one attribute.
    ///
    /// The child's buffer is closed and its bytes copied in; the child is
    /// consumed. Pass `attr_type | NLA_F_NESTED` where the family wants the
    /// nested flag.
    pub fn append_nested(&mut self, attr_type: u16, child: MessageBuilder) -> Result<()> {
        let payload = child.buf.close();
        attr::encode_nested(&mut self.buf, attr_type, &payload, self.padding)
    }

    /// Complete the message.
    ///
    /// Closes the buffer and writes the total length into the header.
    /// A header-less builder is closed as is.
    pub fn finish(self) -> Result<Message> {
        let mut bytes = self.buf.close();
        let len = bytes.len();

        if self.has_header && len >= NLMSG_HDRLEN {
            let total = u32::try_from(len).map_err(|_| Error::MessageTooLarge { len })?;
            bytes[..4].copy_from_slice(&total.to_ne_bytes());
        } else if self.has_header {
            tracing::debug!(len, "message shorter than its header, length left unpatched");
        }

        tracing::trace!(len, has_header = self.has_header, "message completed");
        Ok(Message::from_parts(Bytes::from(bytes), self.has_header))
    }

    fn header_len(&self) -> usize {
        if self.has_header { NLMSG_HDRLEN } else { 0 }
    }
}
