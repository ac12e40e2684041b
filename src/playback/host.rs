/// Token identifying one requested per-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FrameRequest(pub u64);

/// Per-frame scheduling primitive supplied by the host (an animation-frame API, a render loop,
/// or a test double).
pub trait FrameHost {
    /// Ask for one callback on the next frame.
    fn request_frame(&mut self) -> FrameRequest;
    /// Withdraw a previously requested callback. Unknown tokens are ignored.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Deterministic frame host that only records requests; the caller decides when frames fire.
#[derive(Debug, Default)]
pub struct ManualFrameHost {
    next_id: u64,
    pending: Vec<FrameRequest>,
    cancelled: Vec<FrameRequest>,
}

impl ManualFrameHost {
    /// Empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet taken or cancelled, oldest first.
    pub fn pending(&self) -> &[FrameRequest] {
        &self.pending
    }

    /// Every request that was cancelled, in cancellation order.
    pub fn cancelled(&self) -> &[FrameRequest] {
        &self.cancelled
    }

    /// Drain outstanding requests, as a real host would when a frame fires.
    pub fn take_pending(&mut self) -> Vec<FrameRequest> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameHost for ManualFrameHost {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        let req = FrameRequest(self.next_id);
        self.pending.push(req);
        req
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending.retain(|r| *r != request);
        self.cancelled.push(request);
    }
}

/// The two playback callbacks an external collaborator (e.g. a voice-over recorder) drives.
pub trait PlaybackControl {
    /// Start (or restart) playback from the first scene.
    fn start_playback(&mut self, now_ms: f64);
    /// Stop playback; idempotent.
    fn stop_playback(&mut self);
}
