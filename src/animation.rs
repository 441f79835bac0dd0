//! Easing curves and the single-writer camera tween.
//!
//! Only one camera tween exists at a time. [`TweenSlot::start`] replaces
//! whatever was in flight, so two animations can never fight over the same
//! camera fields. A fresh tween starts lazily: the first
//! [`TweenSlot::sample`] call stamps the start time. A tween that replaces one
//! already on screen starts at that tween's last sampled frame, so gestures
//! that restart the tween once per frame still advance every frame.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use crate::camera::Camera;

/// Easing curve applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    /// Cubic ease-out.
    Power3Out,
    /// Overshooting ease-out; the payload is the overshoot amount.
    BackOut(f64),
}

impl Ease {
    /// Map progress `t` in `[0, 1]` to eased progress. Inputs are clamped.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Power3Out => 1.0 - (1.0 - t).powi(3),
            Self::BackOut(overshoot) => {
                let p = t - 1.0;
                p * p * ((overshoot + 1.0) * p + overshoot) + 1.0
            }
        }
    }
}

/// Why a tween was started; drives the reported controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenKind {
    /// Lagged follow of the drag target.
    DragFollow,
    /// Post-release glide.
    Inertia,
    /// Smoothed wheel pan.
    WheelPan,
    /// Zoom button or programmatic zoom.
    Zoom,
    /// One-shot intro zoom to a comfortable density.
    AutoZoom,
}

/// An eased interpolation of the camera between two poses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTween {
    pub kind: TweenKind,
    pub from: Camera,
    pub to: Camera,
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub ease: Ease,
    start_ms: Option<f64>,
    last_ms: Option<f64>,
}

impl CameraTween {
    #[must_use]
    pub fn new(kind: TweenKind, from: Camera, to: Camera, duration_ms: f64, ease: Ease) -> Self {
        Self { kind, from, to, duration_ms, delay_ms: 0.0, ease, start_ms: None, last_ms: None }
    }

    #[must_use]
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Normalized progress at `now_ms`, stamping the start time on first use.
    fn progress(&mut self, now_ms: f64) -> f64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        self.last_ms = Some(now_ms);
        let elapsed = now_ms - start - self.delay_ms;
        if self.duration_ms <= 0.0 {
            return if elapsed >= 0.0 { 1.0 } else { 0.0 };
        }
        (elapsed / self.duration_ms).clamp(0.0, 1.0)
    }

    fn pose_at(&self, t: f64) -> Camera {
        if t >= 1.0 {
            return self.to;
        }
        let k = self.ease.apply(t);
        Camera {
            x: lerp(self.from.x, self.to.x, k),
            y: lerp(self.from.y, self.to.y, k),
            scale: lerp(self.from.scale, self.to.scale, k),
        }
    }
}

/// Result of advancing the tween slot by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    pub camera: Camera,
    pub kind: TweenKind,
    pub finished: bool,
}

/// Holder for the one camera tween that may be in flight.
#[derive(Debug, Clone, Default)]
pub struct TweenSlot {
    active: Option<CameraTween>,
}

impl TweenSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `tween`, killing any tween already in flight.
    ///
    /// A replacement picks up the clock of the tween it kills: its start is
    /// the last frame the killed tween was sampled at.
    pub fn start(&mut self, mut tween: CameraTween) {
        if let Some(prev) = self.active.take() {
            if tween.start_ms.is_none() {
                tween.start_ms = prev.last_ms;
            }
            tracing::trace!(killed = ?prev.kind, started = ?tween.kind, "camera tween replaced");
        }
        self.active = Some(tween);
    }

    /// Kill the in-flight tween, if any. Returns what was killed.
    pub fn kill(&mut self) -> Option<TweenKind> {
        self.active.take().map(|t| t.kind)
    }

    #[must_use]
    pub fn active_kind(&self) -> Option<TweenKind> {
        self.active.as_ref().map(|t| t.kind)
    }

    #[must_use]
    pub fn target(&self) -> Option<Camera> {
        self.active.as_ref().map(|t| t.to)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Advance to `now_ms`. Finished tweens are cleared after reporting their
    /// final pose.
    pub fn sample(&mut self, now_ms: f64) -> Option<TweenSample> {
        let tween = self.active.as_mut()?;
        let t = tween.progress(now_ms);
        let sample = TweenSample { camera: tween.pose_at(t), kind: tween.kind, finished: t >= 1.0 };
        if sample.finished {
            self.active = None;
        }
        Some(sample)
    }
}

/// Progress of a fire-once animation that is not bound to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Clock {
    start_ms: Option<f64>,
}

impl Clock {
    /// Milliseconds since the first call.
    pub fn elapsed(&mut self, now_ms: f64) -> f64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        (now_ms - start).max(0.0)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
