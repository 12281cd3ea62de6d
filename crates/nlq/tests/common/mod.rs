//! Common test utilities for integration tests.
//!
//! Provides a small reader for the attribute records the builder writes,
//! so tests can check wire output without a full parser.

use nlq::netlink::{Message, MessageBuilder, NLA_HDRLEN, NlAttr, Sequencer};

/// Split an unpadded attribute stream into `(type, payload)` records.
pub fn attrs(mut data: &[u8]) -> Vec<(u16, Vec<u8>)> {
    let mut out = Vec::new();
    while !data.is_empty() {
        let attr = NlAttr::from_bytes(data).expect("attribute header");
        let len = attr.nla_len as usize;
        assert!(len >= NLA_HDRLEN && len <= data.len(), "bad attribute length {len}");
        out.push((attr.nla_type, data[NLA_HDRLEN..len].to_vec()));
        data = &data[len..];
    }
    out
}

/// A header-only message tagged with `seq`.
pub fn tagged(seq: u32) -> Message {
    MessageBuilder::with_sequencer(&Sequencer::new(), 16, 0, seq, 0)
        .and_then(MessageBuilder::finish)
        .expect("message")
}
