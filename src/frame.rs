//! Single-slot coalescing of per-frame visual updates.
//!
//! Pointer moves can arrive several times per frame; only the latest ghost position
//! matters. A new value replaces an unfired one, and at most one frame request is
//! outstanding at a time.

/// Latest value waiting for the next frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSlot<T> {
    pending: Option<T>,
    requested: bool,
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self {
            pending: None,
            requested: false,
        }
    }
}

impl<T> FrameSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, replacing any unfired one.
    ///
    /// Returns true when the caller has to request a frame from the host.
    pub fn schedule(&mut self, value: T) -> bool {
        self.pending = Some(value);
        !std::mem::replace(&mut self.requested, true)
    }

    /// Called when the frame runs: hands out the latest value and re-arms the slot.
    pub fn take(&mut self) -> Option<T> {
        self.requested = false;
        self.pending.take()
    }

    /// Drop any unfired value. An already requested frame still arrives and finds nothing.
    pub fn discard(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }
}
