//! Transfer-port pool.

/// Monotonic allocator over an inclusive port range.
///
/// Ports are never recycled: the cursor only advances, and once it passes
/// the end of the range every further allocation fails. This keeps the pool
/// a use-once allocator for the process lifetime — the deployed protocol's
/// behavior, where a restart resets the cursor. Recycling would require
/// completion signaling from workers back into the negotiation loop, which
/// the single-owner cursor deliberately avoids.
#[derive(Debug, Clone)]
pub struct PortPool {
    next: u32,
    end: u16,
}

impl PortPool {
    /// Creates a pool over the inclusive range `[start, end]`.
    pub fn new(start: u16, end: u16) -> Self {
        Self {
            next: u32::from(start),
            end,
        }
    }

    /// Hands out the next port and advances the cursor, or `None` once the
    /// range is exhausted.
    pub fn allocate(&mut self) -> Option<u16> {
        if self.next > u32::from(self.end) {
            return None;
        }
        let port = self.next as u16;
        self.next += 1;
        Some(port)
    }

    /// Ports still available.
    pub fn remaining(&self) -> u32 {
        (u32::from(self.end) + 1).saturating_sub(self.next)
    }
}
