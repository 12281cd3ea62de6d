//! Sequence numbers for request messages.

use std::sync::atomic::{AtomicU32, Ordering};

use super::message::NLM_F_REQUEST;

/// Process-wide default sequence context.
static GLOBAL: Sequencer = Sequencer::new();

/// Source of sequence numbers for auto-numbered requests.
///
/// Request messages built with sequence number zero take the next value
/// from a `Sequencer`. Numbering starts at 1 and never yields 0, which is
/// reserved for "assign one for me". Safe to share between threads.
///
/// Most callers use [`Sequencer::global`]. A connection that wants its
/// own numbering can hold a separate instance.
#[derive(Debug, Default)]
pub struct Sequencer {
    last: AtomicU32,
}

impl Sequencer {
    /// Create a sequencer whose first number is 1.
    pub const fn new() -> Self {
        Self::starting_after(0)
    }

    /// Create a sequencer whose first number is `last + 1`.
    pub const fn starting_after(last: u32) -> Self {
        Self {
            last: AtomicU32::new(last),
        }
    }

    /// The process-wide sequencer.
    pub fn global() -> &'static Sequencer {
        &GLOBAL
    }

    /// Take the next sequence number.
    pub fn next_seq(&self) -> u32 {
        loop {
            let seq = self.last.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
            if seq != 0 {
                return seq;
            }
        }
    }

    /// The most recently assigned number (0 if none yet).
    pub fn last(&self) -> u32 {
        self.last.load(Ordering::Relaxed)
    }

    /// Resolve the sequence number for a new header.
    ///
    /// Requests with `seq == 0` are numbered automatically; anything else
    /// keeps the caller's value.
    pub fn resolve(&self, flags: u16, seq: u32) -> u32 {
        if flags & NLM_F_REQUEST != 0 && seq == 0 {
            self.next_seq()
        } else {
            seq
        }
    }
}
