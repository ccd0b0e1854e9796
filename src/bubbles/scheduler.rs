/// Id of a requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// The display's "call me on the next refresh" primitive.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler driven by hand: records requests and cancellations and hands
/// out due frames one at a time.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
    canceled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    pub fn canceled(&self) -> &[FrameHandle] {
        &self.canceled
    }

    pub fn requested(&self) -> u64 {
        self.next_id
    }

    /// Take the oldest pending request, as the display would on refresh.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        (!self.pending.is_empty()).then(|| self.pending.remove(0))
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(i) = self.pending.iter().position(|&h| h == handle) {
            self.pending.remove(i);
            self.canceled.push(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_unique_and_fifo() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame();
        let b = s.request_frame();
        assert_ne!(a, b);
        assert_eq!(s.take_due(), Some(a));
        assert_eq!(s.take_due(), Some(b));
        assert_eq!(s.take_due(), None);
    }

    #[test]
    fn cancel_only_affects_pending() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame();
        s.cancel_frame(a);
        s.cancel_frame(a);
        s.cancel_frame(FrameHandle::new(99));

        assert!(s.pending().is_empty());
        assert_eq!(s.canceled(), &[a]);
    }
}
