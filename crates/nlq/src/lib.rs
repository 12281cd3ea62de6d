//! Netlink message construction and transmit queue.
//!
//! This crate builds netlink messages (a header followed by nested
//! type-length-value attributes) into growable buffers, finalizes them
//! with a correct length field, and keeps completed messages in an
//! ordered queue awaiting transmission. Sending, receiving and parsing
//! belong to the transport layer and are not part of this crate.
//!
//! # Example
//!
//! ```ignore
//! use nlq::netlink::{MessageBuilder, MessageQueue, NLM_F_ACK, NLM_F_REQUEST, NlMsgType};
//!
//! fn queue_link_up(queue: &mut MessageQueue, index: u32) -> nlq::Result<()> {
//!     let mut msg = MessageBuilder::new(NlMsgType::RTM_SETLINK, NLM_F_REQUEST | NLM_F_ACK, 0, 0)?;
//!     msg.append_attr_u32(4, index)?;
//!     queue.enqueue(msg.finish()?);
//!     Ok(())
//! }
//! ```

pub mod netlink;

// Re-export common types at crate root for convenience
pub use netlink::{Error, Message, MessageBuilder, MessageQueue, Result};
