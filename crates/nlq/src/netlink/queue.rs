//! Transmit queue of completed messages.
//!
//! The queue is a circular singly-linked chain addressed only by its tail:
//! the head is always `tail.next`, so enqueue and dequeue are both O(1)
//! without a separate head reference. Links are slot indices into an
//! arena; vacated slots go on a free list and are reused.
//!
//! ```ignore
//! use nlq::netlink::{MessageBuilder, MessageQueue, NLM_F_REQUEST};
//!
//! let mut queue = MessageQueue::new();
//! let mut msg = MessageBuilder::new(18, NLM_F_REQUEST, 0, 0)?;
//! msg.append_attr_str(3, "eth0")?;
//! queue.enqueue(msg.finish()?);
//!
//! while let Some(msg) = queue.dequeue() {
//!     transport.send(msg.as_bytes())?;
//! }
//! ```

use std::fmt;
use std::iter::FusedIterator;

use super::message::Message;

#[derive(Debug)]
struct Slot {
    msg: Option<Message>,
    /// Index of the following element; the slot's own index when solitary.
    next: usize,
}

/// FIFO queue of completed messages awaiting transmission.
///
/// The queue owns the messages it holds. [`dequeue`](Self::dequeue) hands
/// ownership back; dropping the queue drops whatever is left.
#[derive(Default)]
pub struct MessageQueue {
    slots: Vec<Slot>,
    free: Vec<usize>,
    tail: Option<usize>,
}

impl MessageQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with room for `capacity` messages.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            tail: None,
        }
    }

    /// Check if the queue holds no messages.
    pub fn is_empty(&self) -> bool {
        self.tail.is_none()
    }

    /// Add `msg` at the end of the queue.
    pub fn enqueue(&mut self, msg: Message) {
        let len = msg.len();
        let id = self.alloc(msg);

        if let Some(tail) = self.tail {
            let head = self.slots[tail].next;
            self.slots[tail].next = self.slots[id].next;
            self.slots[id].next = head;
        }
        self.tail = Some(id);

        tracing::trace!(slot = id, len, "message enqueued");
    }

    /// The oldest message, without removing it.
    pub fn head(&self) -> Option<&Message> {
        self.head_index().and_then(|i| self.slots[i].msg.as_ref())
    }

    /// The newest message.
    pub fn tail(&self) -> Option<&Message> {
        self.tail.and_then(|i| self.slots[i].msg.as_ref())
    }

    /// Remove and return the oldest message.
    pub fn dequeue(&mut self) -> Option<Message> {
        let tail = self.tail?;
        let head = self.slots[tail].next;

        if head == tail {
            self.tail = None;
        } else {
            self.slots[tail].next = self.slots[head].next;
        }

        let slot = &mut self.slots[head];
        slot.next = head;
        let msg = slot.msg.take();
        self.free.push(head);

        tracing::trace!(slot = head, "message dequeued");
        msg
    }

    /// Number of queued messages.
    ///
    /// Walks the chain, so this is O(n); transmit batches are short.
    pub fn len(&self) -> usize {
        let Some(tail) = self.tail else {
            return 0;
        };

        let mut count = 1;
        let mut cur = self.slots[tail].next;
        while cur != tail {
            count += 1;
            cur = self.slots[cur].next;
        }
        count
    }

    /// Drop every queued message. Returns how many were released.
    pub fn free_all(&mut self) -> usize {
        let mut count = 0;
        while self.dequeue().is_some() {
            count += 1;
        }
        if count > 0 {
            tracing::debug!(count, "released queued messages");
        }
        count
    }

    /// Iterate over queued messages, oldest first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            queue: self,
            cur: self.head_index(),
        }
    }

    /// Dequeue messages in order as the iterator is advanced.
    ///
    /// Messages not yet yielded when the iterator is dropped are released.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain { queue: self }
    }

    fn head_index(&self) -> Option<usize> {
        self.tail.map(|t| self.slots[t].next)
    }

    /// Store `msg` in a vacant slot as a solitary, self-linked element.
    fn alloc(&mut self, msg: Message) -> usize {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Slot {
                    msg: Some(msg),
                    next: id,
                };
                id
            }
            None => {
                let id = self.slots.len();
                self.slots.push(Slot {
                    msg: Some(msg),
                    next: id,
                });
                id
            }
        }
    }
}

impl fmt::Debug for MessageQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Extend<Message> for MessageQueue {
    fn extend<I: IntoIterator<Item = Message>>(&mut self, iter: I) {
        for msg in iter {
            self.enqueue(msg);
        }
    }
}

impl FromIterator<Message> for MessageQueue {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<'a> IntoIterator for &'a MessageQueue {
    type Item = &'a Message;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for MessageQueue {
    type Item = Message;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

/// Borrowing iterator over a [`MessageQueue`], oldest first.
pub struct Iter<'a> {
    queue: &'a MessageQueue,
    cur: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Message;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cur?;
        let slot = &self.queue.slots[idx];
        self.cur = if Some(idx) == self.queue.tail {
            None
        } else {
            Some(slot.next)
        };
        slot.msg.as_ref()
    }
}

impl FusedIterator for Iter<'_> {}

/// Draining iterator returned by [`MessageQueue::drain`].
pub struct Drain<'a> {
    queue: &'a mut MessageQueue,
}

impl Iterator for Drain<'_> {
    type Item = Message;

    fn next(&mut self) -> Option<Message> {
        self.queue.dequeue()
    }
}

impl Drop for Drain<'_> {
    fn drop(&mut self) {
        self.queue.free_all();
    }
}

/// Owning iterator over a [`MessageQueue`], oldest first.
pub struct IntoIter {
    queue: MessageQueue,
}

impl Iterator for IntoIter {
    type Item = Message;

    fn next(&mut self) -> Option<Message> {
        self.queue.dequeue()
    }
}
