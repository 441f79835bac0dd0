//! Camera model: the single `(x, y, scale)` transform over the virtual canvas.
//!
//! `x` / `y` are the screen-space translation (CSS pixels) of the canvas
//! origin and `scale` is a uniform zoom. [`Bounds`] couples the camera to the
//! current viewport and canvas size and owns the apply pass: normalize scale,
//! wrap, then clamp. Wrap must run before clamp or the infinite-scroll snap is
//! undone.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::Serialize;

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Camera state for pan/zoom over the virtual canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0 }
    }
}

impl Camera {
    #[must_use]
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.x) / self.scale,
            y: (screen.y - self.y) / self.scale,
        }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.x,
            y: world.y * self.scale + self.y,
        }
    }

    /// Convert a screen-space distance (pixels) to canvas-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Camera with scale `target_scale` that keeps the canvas point under
    /// `anchor` (screen space) under `anchor`.
    ///
    /// `target_scale` is used as given; callers clamp it first.
    #[must_use]
    pub fn zoom_to_point(&self, target_scale: f64, anchor: Point) -> Camera {
        let world = self.screen_to_world(anchor);
        Camera {
            x: anchor.x - world.x * target_scale,
            y: anchor.y - world.y * target_scale,
            scale: target_scale,
        }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.scale.is_finite()
    }
}

/// The render transform written to the canvas container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Transform {
    /// CSS `transform` value with a top-left origin.
    #[must_use]
    pub fn css(&self) -> String {
        format!("translate3d({}px, {}px, 0) scale({})", self.x, self.y, self.scale)
    }
}

impl From<Camera> for Transform {
    fn from(c: Camera) -> Self {
        Self { x: c.x, y: c.y, scale: c.scale }
    }
}

/// Viewport and canvas dimensions that constrain the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub max_scale: f64,
}

impl Bounds {
    /// The cover scale: the smallest scale at which the canvas spans the
    /// viewport on at least one axis.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        (self.viewport_width / self.canvas_width).max(self.viewport_height / self.canvas_height)
    }

    /// Effective `[min, max]` scale range. If the viewport is so large that
    /// the cover scale exceeds the configured maximum, cover wins.
    #[must_use]
    pub fn scale_range(&self) -> (f64, f64) {
        let min = self.min_scale();
        (min, self.max_scale.max(min))
    }

    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        let (min, max) = self.scale_range();
        if scale.is_nan() { min } else { scale.clamp(min, max) }
    }

    #[must_use]
    pub fn viewport_center(&self) -> Point {
        Point::new(self.viewport_width * 0.5, self.viewport_height * 0.5)
    }

    /// Camera at cover scale with the canvas centered in the viewport.
    #[must_use]
    pub fn fit(&self) -> Camera {
        let scale = self.min_scale();
        let center = self.viewport_center();
        Camera {
            x: center.x - self.canvas_width * 0.5 * scale,
            y: center.y - self.canvas_height * 0.5 * scale,
            scale,
        }
    }

    /// Snap the camera back by whole scaled-canvas periods once it has
    /// scrolled fully past either edge.
    pub fn wrap(&self, camera: &mut Camera) {
        let scaled_w = self.canvas_width * camera.scale;
        let scaled_h = self.canvas_height * camera.scale;
        camera.x = wrap_axis(camera.x, scaled_w, self.viewport_width);
        camera.y = wrap_axis(camera.y, scaled_h, self.viewport_height);
    }

    /// Keep the canvas edges outside the viewport when it is larger, and
    /// center it when it is not.
    pub fn clamp(&self, camera: &mut Camera) {
        let scaled_w = self.canvas_width * camera.scale;
        let scaled_h = self.canvas_height * camera.scale;
        camera.x = clamp_axis(camera.x, scaled_w, self.viewport_width);
        camera.y = clamp_axis(camera.y, scaled_h, self.viewport_height);
    }

    /// Enforce every camera invariant and return the render transform.
    ///
    /// Idempotent: applying twice yields the same camera.
    pub fn apply(&self, camera: &mut Camera) -> Transform {
        if !camera.is_finite() {
            *camera = self.fit();
        }
        camera.scale = self.clamp_scale(camera.scale);
        self.wrap(camera);
        self.clamp(camera);
        Transform::from(*camera)
    }
}

fn wrap_axis(pos: f64, scaled: f64, viewport: f64) -> f64 {
    if scaled <= 0.0 {
        return pos;
    }
    let lo = -scaled - viewport;
    let hi = viewport;
    if pos < lo {
        pos + ((lo - pos) / scaled).ceil() * scaled
    } else if pos > hi {
        pos - ((pos - hi) / scaled).ceil() * scaled
    } else {
        pos
    }
}

fn clamp_axis(pos: f64, scaled: f64, viewport: f64) -> f64 {
    if scaled > viewport { pos.clamp(viewport - scaled, 0.0) } else { (viewport - scaled) / 2.0 }
}
