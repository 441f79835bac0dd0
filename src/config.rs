//! Viewport tuning parsed from defaults and environment overrides.
//!
//! Every constant the controller uses lives on [`ViewportConfig`] so tests and
//! hosts can adjust behavior without touching [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be finite and positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be finite and non-negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("tile size range is inverted ({min} > {max})")]
    InvertedSizeRange { min: f64, max: f64 },
    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },
    #[error("velocity_retain must lie in [0, 1) (got {0})")]
    VelocityRetain(f64),
    #[error("zoom_step must be greater than 1 (got {0})")]
    ZoomStep(f64),
    #[error("reveal_threshold must lie in [0, 1] (got {0})")]
    RevealThreshold(f64),
}

/// Virtual canvas geometry and layout spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    pub slot_count: usize,
    pub items_per_row: usize,
    pub min_size: f64,
    pub max_size: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub base_gap_x: f64,
    pub base_gap_y: f64,
    pub extra_x: f64,
    pub extra_y: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: consts::CANVAS_WIDTH,
            height: consts::CANVAS_HEIGHT,
            slot_count: consts::SLOT_COUNT,
            items_per_row: consts::ITEMS_PER_ROW,
            min_size: consts::MIN_TILE_SIZE,
            max_size: consts::MAX_TILE_SIZE,
            margin_x: consts::MARGIN_X,
            margin_y: consts::MARGIN_Y,
            base_gap_x: consts::BASE_GAP_X,
            base_gap_y: consts::BASE_GAP_Y,
            extra_x: consts::EXTRA_X,
            extra_y: consts::EXTRA_Y,
        }
    }
}

/// Full controller configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    pub canvas: CanvasConfig,
    pub click_threshold_px: f64,
    pub velocity_retain: f64,
    pub inertia_multiplier: f64,
    pub inertia_min_speed: f64,
    pub inertia_duration_ms: f64,
    /// Pause between release and the start of the inertial glide.
    pub inertia_delay_ms: f64,
    pub drag_follow_ms: f64,
    pub wheel_speed: f64,
    pub wheel_smooth_ms: f64,
    pub zoom_step: f64,
    pub zoom_duration_ms: f64,
    pub max_scale: f64,
    pub pop_in_ms: f64,
    pub pop_in_stagger_ms: f64,
    pub tile_rest_scale: f64,
    pub visible_items_target: f64,
    pub auto_zoom_ms: f64,
    pub reveal_margin_px: f64,
    pub reveal_threshold: f64,
    pub proximity_radius_px: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            click_threshold_px: consts::CLICK_THRESHOLD_PX,
            velocity_retain: consts::VELOCITY_RETAIN,
            inertia_multiplier: consts::INERTIA_MULTIPLIER,
            inertia_min_speed: consts::INERTIA_MIN_SPEED,
            inertia_duration_ms: consts::INERTIA_DURATION_MS,
            inertia_delay_ms: 0.0,
            drag_follow_ms: consts::DRAG_FOLLOW_MS,
            wheel_speed: consts::WHEEL_SPEED,
            wheel_smooth_ms: consts::WHEEL_SMOOTH_MS,
            zoom_step: consts::ZOOM_STEP,
            zoom_duration_ms: consts::ZOOM_DURATION_MS,
            max_scale: consts::MAX_SCALE,
            pop_in_ms: consts::POP_IN_MS,
            pop_in_stagger_ms: consts::POP_IN_STAGGER_MS,
            tile_rest_scale: consts::TILE_REST_SCALE,
            visible_items_target: consts::VISIBLE_ITEMS_TARGET,
            auto_zoom_ms: consts::AUTO_ZOOM_MS,
            reveal_margin_px: consts::REVEAL_MARGIN_PX,
            reveal_threshold: consts::REVEAL_THRESHOLD,
            proximity_radius_px: consts::PROXIMITY_RADIUS_PX,
        }
    }
}

impl ViewportConfig {
    /// Build config from defaults plus environment overrides.
    ///
    /// Optional (unparseable values fall back to the default):
    /// - `GALLERY_CANVAS_WIDTH`, `GALLERY_CANVAS_HEIGHT`
    /// - `GALLERY_SLOT_COUNT`, `GALLERY_ITEMS_PER_ROW`
    /// - `GALLERY_MIN_TILE_SIZE`, `GALLERY_MAX_TILE_SIZE`
    /// - `GALLERY_INERTIA_MULTIPLIER`, `GALLERY_INERTIA_DELAY_MS`
    /// - `GALLERY_DRAG_FOLLOW_MS`, `GALLERY_WHEEL_SPEED`
    /// - `GALLERY_ZOOM_STEP`, `GALLERY_MAX_SCALE`
    /// - `GALLERY_VISIBLE_ITEMS`, `GALLERY_PROXIMITY_RADIUS`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the resulting values fail [`Self::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let d = Self::default();
        let canvas = CanvasConfig {
            width: env_parse("GALLERY_CANVAS_WIDTH", d.canvas.width),
            height: env_parse("GALLERY_CANVAS_HEIGHT", d.canvas.height),
            slot_count: env_parse("GALLERY_SLOT_COUNT", d.canvas.slot_count),
            items_per_row: env_parse("GALLERY_ITEMS_PER_ROW", d.canvas.items_per_row),
            min_size: env_parse("GALLERY_MIN_TILE_SIZE", d.canvas.min_size),
            max_size: env_parse("GALLERY_MAX_TILE_SIZE", d.canvas.max_size),
            ..d.canvas
        };
        let cfg = Self {
            canvas,
            inertia_multiplier: env_parse("GALLERY_INERTIA_MULTIPLIER", d.inertia_multiplier),
            inertia_delay_ms: env_parse("GALLERY_INERTIA_DELAY_MS", d.inertia_delay_ms),
            drag_follow_ms: env_parse("GALLERY_DRAG_FOLLOW_MS", d.drag_follow_ms),
            wheel_speed: env_parse("GALLERY_WHEEL_SPEED", d.wheel_speed),
            zoom_step: env_parse("GALLERY_ZOOM_STEP", d.zoom_step),
            max_scale: env_parse("GALLERY_MAX_SCALE", d.max_scale),
            visible_items_target: env_parse("GALLERY_VISIBLE_ITEMS", d.visible_items_target),
            proximity_radius_px: env_parse("GALLERY_PROXIMITY_RADIUS", d.proximity_radius_px),
            ..d
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject geometry and tuning that would break the camera invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.canvas;
        positive("canvas.width", c.width)?;
        positive("canvas.height", c.height)?;
        positive("canvas.min_size", c.min_size)?;
        positive("canvas.max_size", c.max_size)?;
        if c.min_size > c.max_size {
            return Err(ConfigError::InvertedSizeRange { min: c.min_size, max: c.max_size });
        }
        if c.slot_count == 0 {
            return Err(ConfigError::ZeroCount { field: "canvas.slot_count" });
        }
        if c.items_per_row == 0 {
            return Err(ConfigError::ZeroCount { field: "canvas.items_per_row" });
        }
        for (field, value) in [
            ("canvas.margin_x", c.margin_x),
            ("canvas.margin_y", c.margin_y),
            ("canvas.base_gap_x", c.base_gap_x),
            ("canvas.base_gap_y", c.base_gap_y),
            ("canvas.extra_x", c.extra_x),
            ("canvas.extra_y", c.extra_y),
            ("click_threshold_px", self.click_threshold_px),
            ("inertia_multiplier", self.inertia_multiplier),
            ("inertia_min_speed", self.inertia_min_speed),
            ("inertia_duration_ms", self.inertia_duration_ms),
            ("inertia_delay_ms", self.inertia_delay_ms),
            ("drag_follow_ms", self.drag_follow_ms),
            ("wheel_speed", self.wheel_speed),
            ("wheel_smooth_ms", self.wheel_smooth_ms),
            ("zoom_duration_ms", self.zoom_duration_ms),
            ("pop_in_ms", self.pop_in_ms),
            ("pop_in_stagger_ms", self.pop_in_stagger_ms),
            ("auto_zoom_ms", self.auto_zoom_ms),
            ("reveal_margin_px", self.reveal_margin_px),
        ] {
            non_negative(field, value)?;
        }
        positive("max_scale", self.max_scale)?;
        positive("tile_rest_scale", self.tile_rest_scale)?;
        positive("visible_items_target", self.visible_items_target)?;
        positive("proximity_radius_px", self.proximity_radius_px)?;
        if !(0.0..1.0).contains(&self.velocity_retain) {
            return Err(ConfigError::VelocityRetain(self.velocity_retain));
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(ConfigError::ZoomStep(self.zoom_step));
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::RevealThreshold(self.reveal_threshold));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 { Ok(()) } else { Err(ConfigError::NonPositive { field, value }) }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 { Ok(()) } else { Err(ConfigError::Negative { field, value }) }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
