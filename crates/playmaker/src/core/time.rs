/// A reading of the host's monotonic clock, in seconds from an arbitrary origin.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub const ZERO: Self = Self(0.0);

    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// Seconds elapsed since `earlier`, never negative.
    pub fn seconds_since(self, earlier: Timestamp) -> f32 {
        let delta = self.0 - earlier.0;
        if delta.is_finite() && delta > 0.0 {
            delta as f32
        } else {
            0.0
        }
    }

    pub fn after(self, secs: f64) -> Self {
        Self(self.0 + secs)
    }
}

/// Monotonic clock built from per-frame deltas.
/// For hosts whose frame loop reports `dt` rather than absolute time.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    now: Timestamp,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame. Negative or non-finite deltas are ignored so time never runs backwards.
    pub fn advance(&mut self, dt: f32) -> Timestamp {
        if dt.is_finite() && dt > 0.0 {
            self.now = self.now.after(f64::from(dt));
        }
        self.frames += 1;
        self.now
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Number of frames seen so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
