//! Input model: modifier keys, buttons, wheel deltas, and the drag gesture.
//!
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. `Phase` is the externally visible controller state, derived
//! from the gesture plus whichever camera tween is in flight.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::animation::TweenKind;
use crate::camera::Point;

/// Host pointer identifier (`PointerEvent.pointerId`).
pub type PointerId = i32;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl or Cmd: the modifier browsers use for page zoom.
    #[must_use]
    pub fn zoom_modifier(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button, pen contact, or touch.
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"+"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Keys that trigger browser page zoom when combined with Ctrl/Cmd.
    #[must_use]
    pub fn is_zoom_key(&self) -> bool {
        matches!(self.0.as_str(), "+" | "=" | "-" | "0")
    }
}

/// Wheel / trackpad scroll delta in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    pub dx: f64,
    /// Positive = scroll down.
    pub dy: f64,
}

/// Native (Safari) gesture events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Start,
    Change,
    End,
}

/// Per-gesture drag record, created on pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub pointer_id: PointerId,
    pub start: Point,
    pub last: Point,
    /// Exponentially smoothed per-event delta.
    pub velocity: Point,
    /// Sticky: set once displacement from `start` reaches the click threshold.
    pub moved: bool,
}

impl DragState {
    #[must_use]
    pub fn new(pointer_id: PointerId, start: Point) -> Self {
        Self { pointer_id, start, last: start, velocity: Point::new(0.0, 0.0), moved: false }
    }

    /// Record a move and return the per-event delta.
    ///
    /// `retain` weights the previous velocity: `v = v * retain + delta * (1 - retain)`.
    pub fn track(&mut self, screen: Point, retain: f64, click_threshold: f64) -> Point {
        let delta = Point::new(screen.x - self.last.x, screen.y - self.last.y);
        self.last = screen;
        self.velocity = Point::new(
            self.velocity.x * retain + delta.x * (1.0 - retain),
            self.velocity.y * retain + delta.y * (1.0 - retain),
        );
        if !self.moved && self.start.distance(screen) >= click_threshold {
            self.moved = true;
        }
        delta
    }

    /// Displacement from the press position.
    #[must_use]
    pub fn total(&self) -> Point {
        Point::new(self.last.x - self.start.x, self.last.y - self.start.y)
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.velocity.x.hypot(self.velocity.y)
    }
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A primary pointer is down and owns the gesture.
    Dragging(DragState),
}

/// Externally visible controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
    /// Settling after release. This is the inertial glide after a fast
    /// release. After a slow release no inertia starts, but the camera still
    /// eases onto the last drag position; that catch-up is reported here too
    /// and the phase drops to `Idle` when it lands.
    Inertia,
    /// Settling after a zoom command or wheel event.
    Zooming,
}

impl Phase {
    #[must_use]
    pub fn derive(input: &InputState, tween: Option<TweenKind>) -> Self {
        if matches!(input, InputState::Dragging(_)) {
            return Self::Dragging;
        }
        match tween {
            None => Self::Idle,
            Some(TweenKind::DragFollow | TweenKind::Inertia) => Self::Inertia,
            Some(TweenKind::WheelPan | TweenKind::Zoom | TweenKind::AutoZoom) => Self::Zooming,
        }
    }
}

/// Pointer cursor the host should show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

impl Cursor {
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}
