use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::assets::decode::encode_jpeg;
use crate::capture::camera::{CameraLease, CameraSource};
use crate::capture::frame::Capture;
use crate::foundation::error::{SnapError, SnapResult};

/// Photos taken per session, one per strip slot.
pub const PHOTOS_PER_SESSION: usize = crate::strip::geometry::SLOT_COUNT;

/// JPEG quality of captured frames.
pub const CAPTURE_JPEG_QUALITY: u8 = 90;

const TICK: Duration = Duration::from_secs(1);
/// Pause after each shutter so the flash stays visible.
const SHUTTER_SETTLE: Duration = Duration::from_millis(1000);
/// Pause between the last shutter and handing the captures off.
const COMPLETE_DELAY: Duration = Duration::from_millis(500);

/// Countdown length per photo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Interval {
    #[default]
    Fast,
    Relaxed,
}

impl Interval {
    pub const ALL: [Interval; 2] = [Interval::Fast, Interval::Relaxed];

    pub fn seconds(self) -> u32 {
        match self {
            Self::Fast => 5,
            Self::Relaxed => 10,
        }
    }
}

impl TryFrom<u32> for Interval {
    type Error = SnapError;

    fn try_from(secs: u32) -> SnapResult<Self> {
        Self::ALL
            .into_iter()
            .find(|i| i.seconds() == secs)
            .ok_or_else(|| {
                SnapError::validation(format!("countdown must be 5 or 10 seconds, got {secs}"))
            })
    }
}

impl From<Interval> for u32 {
    fn from(i: Interval) -> Self {
        i.seconds()
    }
}

/// Where the sequencer is. `photo` is zero-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Preparing,
    Counting { photo: usize, remaining: u32 },
    Capturing { photo: usize },
    Done,
}

/// Time source for countdowns.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
    fn sleep(&self, d: Duration);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Shared flag that stops a running sequence at its next tick.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Progress callbacks. Every method defaults to doing nothing.
pub trait SequenceObserver {
    fn on_phase(&mut self, _phase: Phase) {}
    fn on_capture(&mut self, _capture: &Capture) {}
    /// Called once, only when all photos were taken.
    fn on_complete(&mut self, _captures: &[Capture]) {}
}

impl SequenceObserver for () {}

/// Drives countdown, shutter, and hand-off for one session.
///
/// Each photo counts down from the interval length to 1, one tick per second, then grabs a
/// mirrored frame and encodes it as JPEG. The camera is held for the whole run and released on
/// every exit path, including cancellation and errors.
pub struct CaptureSequencer<K: Clock = SystemClock> {
    clock: K,
    cancel: CancelToken,
    phase: Phase,
    last_id: u64,
}

impl Default for CaptureSequencer<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<K: Clock> CaptureSequencer<K> {
    pub fn new(clock: K) -> Self {
        Self {
            clock,
            cancel: CancelToken::new(),
            phase: Phase::Preparing,
            last_id: 0,
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, phase: Phase, observer: &mut dyn SequenceObserver) {
        self.phase = phase;
        observer.on_phase(phase);
    }

    fn wait(&self, d: Duration) -> SnapResult<()> {
        self.check_cancel()?;
        self.clock.sleep(d);
        self.check_cancel()
    }

    fn check_cancel(&self) -> SnapResult<()> {
        if self.cancel.is_cancelled() {
            return Err(SnapError::Cancelled);
        }
        Ok(())
    }

    fn next_id(&mut self) -> u64 {
        self.last_id = self.clock.now_millis().max(self.last_id + 1);
        self.last_id
    }

    /// Run a full session and return exactly [`PHOTOS_PER_SESSION`] captures.
    ///
    /// Every call starts over from [`Phase::Preparing`] with the cancel flag cleared, so one
    /// sequencer serves retakes. Capture ids keep increasing across runs. On cancellation returns
    /// [`SnapError::Cancelled`] and emits no partial list.
    #[tracing::instrument(skip(self, camera, observer), fields(interval = interval.seconds()))]
    pub fn run<C: CameraSource + ?Sized>(
        &mut self,
        interval: Interval,
        camera: &mut C,
        observer: &mut dyn SequenceObserver,
    ) -> SnapResult<Vec<Capture>> {
        self.cancel.reset();
        self.enter(Phase::Preparing, observer);
        let mut lease = CameraLease::acquire(camera)?;
        let mut captures = Vec::with_capacity(PHOTOS_PER_SESSION);

        for photo in 0..PHOTOS_PER_SESSION {
            for remaining in (1..=interval.seconds()).rev() {
                self.check_cancel()?;
                self.enter(Phase::Counting { photo, remaining }, observer);
                tracing::debug!(photo, remaining, "countdown tick");
                self.wait(TICK)?;
            }

            self.enter(Phase::Capturing { photo }, observer);
            let frame = lease.grab_frame()?;
            let mirrored = image::imageops::flip_horizontal(&frame);
            let jpeg = encode_jpeg(&mirrored, CAPTURE_JPEG_QUALITY)?;
            let capture = Capture::new(self.next_id(), jpeg);
            tracing::debug!(photo, id = capture.id, bytes = capture.bytes.len(), "captured");
            observer.on_capture(&capture);
            captures.push(capture);

            if captures.len() < PHOTOS_PER_SESSION {
                self.wait(SHUTTER_SETTLE)?;
            }
        }

        self.wait(COMPLETE_DELAY)?;
        drop(lease);
        self.enter(Phase::Done, observer);
        observer.on_complete(&captures);
        Ok(captures)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/sequencer.rs"]
mod tests;
