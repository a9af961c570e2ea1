use crate::host::environment::Host;

/// Callback run once on the next animation frame with the frame timestamp (seconds).
pub type FrameCallback = Box<dyn FnOnce(&mut Host, f64)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// Pending animation-frame requests.
///
/// Requests made while a frame is being run land in the next frame, never the current one;
/// a self-rescheduling callback therefore runs at most once per frame.
#[derive(Default)]
pub(crate) struct FrameQueue {
    next: u64,
    pending: Vec<(FrameHandle, FrameCallback)>,
}

impl FrameQueue {
    pub(crate) fn request(&mut self, cb: FrameCallback) -> FrameHandle {
        self.next = self.next.saturating_add(1);
        let handle = FrameHandle(self.next);
        self.pending.push((handle, cb));
        handle
    }

    pub(crate) fn take(&mut self) -> Vec<(FrameHandle, FrameCallback)> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
