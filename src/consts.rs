//! Shared numeric defaults for the gallery viewport.
//!
//! Most of these feed [`crate::config::ViewportConfig::default`]. The few
//! that are not tunable are read directly by the engine.

// ── Virtual canvas ──────────────────────────────────────────────

/// Width of the virtual canvas in canvas pixels.
pub const CANVAS_WIDTH: f64 = 3000.0;

/// Height of the virtual canvas in canvas pixels.
pub const CANVAS_HEIGHT: f64 = 2000.0;

/// Number of tile slots rendered regardless of how many logical items exist.
pub const SLOT_COUNT: usize = 150;

/// Tiles per layout row.
pub const ITEMS_PER_ROW: usize = 15;

// ── Layout ──────────────────────────────────────────────────────

pub const MIN_TILE_SIZE: f64 = 250.0;
pub const MAX_TILE_SIZE: f64 = 350.0;

/// Outer left/right padding.
pub const MARGIN_X: f64 = 50.0;
/// Outer top/bottom padding.
pub const MARGIN_Y: f64 = 50.0;

pub const BASE_GAP_X: f64 = 30.0;
pub const BASE_GAP_Y: f64 = 30.0;

/// How much a row's largest tile widens the column step.
pub const EXTRA_X: f64 = 0.25;
/// How much a row's largest tile heightens the row.
pub const EXTRA_Y: f64 = 0.15;

// ── Drag / inertia ──────────────────────────────────────────────

/// Displacement below which a press-release counts as a click.
pub const CLICK_THRESHOLD_PX: f64 = 6.0;

/// Weight of the previous velocity in the exponential smoothing.
pub const VELOCITY_RETAIN: f64 = 0.8;

/// Release velocity is projected forward by this many frames.
pub const INERTIA_MULTIPLIER: f64 = 18.0;

/// Release speeds below this stop dead.
pub const INERTIA_MIN_SPEED: f64 = 0.1;

pub const INERTIA_DURATION_MS: f64 = 900.0;

/// Each pointer move restarts an ease of this length toward the drag target.
pub const DRAG_FOLLOW_MS: f64 = 650.0;

// ── Wheel ───────────────────────────────────────────────────────

pub const WHEEL_SPEED: f64 = 1.0;
pub const WHEEL_SMOOTH_MS: f64 = 600.0;

// ── Zoom ────────────────────────────────────────────────────────

pub const ZOOM_STEP: f64 = 1.12;
pub const ZOOM_DURATION_MS: f64 = 850.0;
pub const MAX_SCALE: f64 = 4.0;

// ── Intro ───────────────────────────────────────────────────────

pub const POP_IN_MS: f64 = 450.0;
pub const POP_IN_STAGGER_MS: f64 = 10.0;

/// Resting visual scale of a tile once popped in.
pub const TILE_REST_SCALE: f64 = 0.8;

/// Overshoot for the back-out ease used by the pop-in.
pub const POP_IN_OVERSHOOT: f64 = 1.6;

/// Auto-zoom aims for roughly this many tiles on screen.
pub const VISIBLE_ITEMS_TARGET: f64 = 11.0;

/// Average tile size assumed when no layout exists yet.
pub const FALLBACK_TILE_SIZE: f64 = 200.0;

pub const AUTO_ZOOM_MS: f64 = 1400.0;

// ── Reveal / proximity ──────────────────────────────────────────

pub const REVEAL_MARGIN_PX: f64 = 120.0;
pub const REVEAL_THRESHOLD: f64 = 0.12;

/// Screen-space radius of the "near pointer" highlight at scale 1.
pub const PROXIMITY_RADIUS_PX: f64 = 400.0;
