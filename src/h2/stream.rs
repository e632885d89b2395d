//! Client stream ID allocation
//!
//! Client-initiated streams use odd identifiers (RFC 7540 Section 5.1.1).
//! The allocator is a plain owned value: each generation session creates its
//! own, so two sessions never share numbering.

use super::error::{Error, Result};
use super::MAX_STREAM_ID;

/// Stream ID type
pub type StreamId = u32;

/// Monotonic allocator of odd client stream IDs: 1, 3, 5, ...
#[derive(Debug, Clone, Default)]
pub struct StreamIdAllocator {
    /// Last ID handed out; `None` until the first allocation
    last: Option<StreamId>,
}

impl StreamIdAllocator {
    /// Create an allocator whose first ID is 1
    pub fn new() -> Self {
        StreamIdAllocator { last: None }
    }

    /// Allocate the next stream ID
    pub fn next_id(&mut self) -> Result<StreamId> {
        let next = match self.last {
            None => 1,
            Some(last) => last
                .checked_add(2)
                .filter(|id| *id <= MAX_STREAM_ID)
                .ok_or_else(|| Error::InvalidFrame("stream ID space exhausted".to_string()))?,
        };
        self.last = Some(next);
        Ok(next)
    }

    /// Last allocated ID, if any
    pub fn last_id(&self) -> Option<StreamId> {
        self.last
    }
}
