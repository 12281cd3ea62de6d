//! Netlink message construction and transmit queueing.
//!
//! Messages are built in two phases: a [`MessageBuilder`] appends the
//! header and attributes into a growable buffer, then
//! [`finish`](MessageBuilder::finish) closes the buffer and patches the
//! header length. Completed [`Message`]s wait in a [`MessageQueue`] until
//! a transport takes them.
//!
//! # Quick Start
//!
//! ```ignore
//! use nlq::netlink::{MessageBuilder, MessageQueue, NLA_F_NESTED, NLM_F_REQUEST, NlMsgType};
//!
//! let mut msg = MessageBuilder::new(NlMsgType::RTM_NEWLINK, NLM_F_REQUEST, 0, 0)?;
//! msg.append_attr_str(3, "dummy0")?;
//!
//! // Nested attributes are built in a header-less builder
//! let mut info = MessageBuilder::attributes()?;
//! info.append_attr_str(1, "dummy")?;
//! msg.append_nested(18 | NLA_F_NESTED, info)?;
//!
//! let mut queue = MessageQueue::new();
//! queue.enqueue(msg.finish()?);
//! ```

pub mod attr;
pub mod buffer;
mod builder;
mod error;
pub mod message;
pub mod queue;
mod seq;

pub use attr::{NLA_F_NESTED, NLA_HDRLEN, NlAttr, Padding};
pub use buffer::GrowBuf;
pub use builder::{BuildOptions, MessageBuilder};
pub use error::{Error, Result};
pub use message::{
    Message, NLM_F_ACK, NLM_F_APPEND, NLM_F_CREATE, NLM_F_DUMP, NLM_F_ECHO, NLM_F_EXCL,
    NLM_F_REQUEST, NLMSG_HDRLEN, NlMsgHdr, NlMsgType,
};
pub use queue::MessageQueue;
pub use seq::Sequencer;
