//! Live pixel size of a chart surface.
//!
//! Hosts report box changes asynchronously and often report `0x0` during the
//! first layout pass. The tracker keeps the last size, and while that size is
//! unusable it re-measures once per display frame until a usable size shows
//! up, the retry budget runs out, or the tracker is released.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{DEFAULT_MIN_USABLE_SIZE_PX, ViewportSize};
use crate::error::{CurveError, CurveResult};

/// Handle of one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameToken(pub u64);

/// Host environment hooks used by [`SizeTracker`].
///
/// The host delivers observer notifications through
/// [`SizeTracker::on_resize`] and frame callbacks through
/// [`SizeTracker::on_frame`].
pub trait LayoutHost {
    /// Current box of the surface in pixels, `None` once the surface is gone.
    fn measure(&self) -> Option<(f64, f64)>;

    /// Starts delivering box-change notifications for the surface.
    fn observe(&mut self);

    /// Stops box-change notifications.
    fn disconnect(&mut self);

    /// Schedules one callback on the next display frame.
    fn request_frame(&mut self) -> FrameToken;

    fn cancel_frame(&mut self, token: FrameToken);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeTrackerConfig {
    pub min_usable_size_px: u32,
    /// Frames re-measured per unusable observation before giving up.
    pub max_retry_frames: u32,
}

impl Default for SizeTrackerConfig {
    fn default() -> Self {
        Self {
            min_usable_size_px: DEFAULT_MIN_USABLE_SIZE_PX,
            max_retry_frames: 240,
        }
    }
}

impl SizeTrackerConfig {
    pub fn validate(self) -> CurveResult<Self> {
        if self.min_usable_size_px == 0 {
            return Err(CurveError::InvalidConfig(
                "min usable size must be > 0".to_owned(),
            ));
        }
        if self.max_retry_frames == 0 {
            return Err(CurveError::InvalidConfig(
                "max retry frames must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Owned size-observation resource for one chart.
///
/// Attaching starts observation; releasing (explicitly or on drop) cancels any
/// pending frame and detaches the observer exactly once.
#[derive(Debug)]
pub struct SizeTracker<H: LayoutHost> {
    host: H,
    config: SizeTrackerConfig,
    size: ViewportSize,
    pending_frame: Option<FrameToken>,
    retry_frames: u32,
    released: bool,
}

impl<H: LayoutHost> SizeTracker<H> {
    /// Starts observing `host` and takes the first measurement.
    ///
    /// The config is validated before the host is touched, so a rejected
    /// config never registers an observer.
    pub fn attach(mut host: H, config: SizeTrackerConfig) -> CurveResult<Self> {
        let config = config.validate()?;
        host.observe();
        let initial = host
            .measure()
            .map(|(width, height)| ViewportSize::from_measured(width, height))
            .unwrap_or_default();
        debug!(
            width = initial.width,
            height = initial.height,
            "size tracker attached"
        );

        let mut tracker = Self {
            host,
            config,
            size: initial,
            pending_frame: None,
            retry_frames: 0,
            released: false,
        };
        tracker.schedule_retry_if_needed();
        Ok(tracker)
    }

    #[must_use]
    pub fn size(&self) -> ViewportSize {
        self.size
    }

    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.size.is_usable_with(self.config.min_usable_size_px)
    }

    #[must_use]
    pub fn has_pending_retry(&self) -> bool {
        self.pending_frame.is_some()
    }

    #[must_use]
    pub fn retry_frames(&self) -> u32 {
        self.retry_frames
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }

    #[must_use]
    pub fn config(&self) -> SizeTrackerConfig {
        self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Observer notification. Returns the new size when it differs from the stored one.
    pub fn on_resize(&mut self, width: f64, height: f64) -> Option<ViewportSize> {
        if self.released {
            return None;
        }
        let changed = self.store(ViewportSize::from_measured(width, height));
        trace!(width, height, changed = changed.is_some(), "resize notification");

        // A fresh observation earns a fresh retry budget.
        self.retry_frames = 0;
        if self.is_usable() {
            self.cancel_pending();
        } else {
            self.schedule_retry_if_needed();
        }
        changed
    }

    /// Frame callback for a token previously requested by this tracker.
    ///
    /// Stale or foreign tokens are ignored.
    pub fn on_frame(&mut self, token: FrameToken) -> Option<ViewportSize> {
        if self.released || self.pending_frame != Some(token) {
            trace!(token = token.0, "ignoring stale frame callback");
            return None;
        }
        self.pending_frame = None;
        self.retry_frames += 1;

        let Some((width, height)) = self.host.measure() else {
            debug!("surface gone during retry, stopping");
            return None;
        };
        let changed = self.store(ViewportSize::from_measured(width, height));
        trace!(
            retry = self.retry_frames,
            width = self.size.width,
            height = self.size.height,
            "retry measurement"
        );

        if self.is_usable() {
            self.retry_frames = 0;
        } else {
            self.schedule_retry_if_needed();
        }
        changed
    }

    /// Cancels any pending frame and detaches the observer. Idempotent.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.cancel_pending();
        self.host.disconnect();
        self.released = true;
        debug!("size tracker released");
    }

    fn store(&mut self, next: ViewportSize) -> Option<ViewportSize> {
        if next == self.size {
            return None;
        }
        self.size = next;
        Some(next)
    }

    fn schedule_retry_if_needed(&mut self) {
        if self.released || self.pending_frame.is_some() || self.is_usable() {
            return;
        }
        if self.retry_frames >= self.config.max_retry_frames {
            debug!(
                retries = self.retry_frames,
                width = self.size.width,
                height = self.size.height,
                "retry budget exhausted, waiting for next resize notification"
            );
            return;
        }
        self.pending_frame = Some(self.host.request_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending_frame.take() {
            self.host.cancel_frame(token);
        }
    }
}

impl<H: LayoutHost> Drop for SizeTracker<H> {
    fn drop(&mut self) {
        self.release();
    }
}
