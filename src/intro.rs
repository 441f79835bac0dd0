//! Entrance animation, auto-zoom target, and lazy reveal.
//!
//! The pop-in grows every tile from nothing to its resting scale with a
//! randomized stagger. When it finishes the engine may fire a one-shot zoom
//! to a comfortable tile density, unless the user already interacted.
//! Reveal is independent: a tile is marked revealed the first time enough of
//! it enters the margin-expanded viewport, and stays revealed.

#[cfg(test)]
#[path = "intro_test.rs"]
mod intro_test;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::animation::{Clock, Ease};
use crate::camera::{Bounds, Camera};
use crate::layout::ItemLayout;

/// Visual state of one tile as the rendering layer sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileState {
    pub opacity: f64,
    pub scale: f64,
    pub revealed: bool,
    pub near: bool,
}

impl Default for TileState {
    fn default() -> Self {
        Self { opacity: 0.0, scale: 0.0, revealed: false, near: false }
    }
}

/// Staggered pop-in of every tile.
#[derive(Debug, Clone)]
pub struct PopIn {
    offsets_ms: Vec<f64>,
    duration_ms: f64,
    rest_scale: f64,
    ease: Ease,
    clock: Clock,
}

impl PopIn {
    /// Each tile starts `rank * stagger_ms` after the first, with ranks drawn
    /// as a random permutation.
    pub fn new<R: Rng>(
        tile_count: usize,
        duration_ms: f64,
        stagger_ms: f64,
        rest_scale: f64,
        ease: Ease,
        rng: &mut R,
    ) -> Self {
        let mut ranks: Vec<usize> = (0..tile_count).collect();
        ranks.shuffle(rng);
        let offsets_ms = ranks.into_iter().map(|rank| rank as f64 * stagger_ms).collect();
        Self { offsets_ms, duration_ms, rest_scale, ease, clock: Clock::default() }
    }

    /// Time from the first frame until the last tile settles.
    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.offsets_ms.iter().copied().fold(0.0, f64::max) + self.duration_ms
    }

    #[must_use]
    pub fn offsets_ms(&self) -> &[f64] {
        &self.offsets_ms
    }

    /// Write opacity/scale for `now_ms` into `tiles`. Returns `true` once
    /// every tile has settled.
    pub fn advance(&mut self, now_ms: f64, tiles: &mut [TileState]) -> bool {
        let elapsed = self.clock.elapsed(now_ms);
        let mut finished = true;
        for (tile, &offset) in tiles.iter_mut().zip(&self.offsets_ms) {
            let t = if self.duration_ms > 0.0 {
                ((elapsed - offset) / self.duration_ms).clamp(0.0, 1.0)
            } else if elapsed >= offset {
                1.0
            } else {
                0.0
            };
            if t < 1.0 {
                finished = false;
            }
            let k = self.ease.apply(t);
            tile.scale = self.rest_scale * k;
            tile.opacity = k.clamp(0.0, 1.0);
        }
        finished
    }
}

/// Scale at which roughly `target_count` average tiles fill the viewport,
/// clamped to the camera's scale range.
#[must_use]
pub fn visible_items_scale(bounds: &Bounds, layout: &[ItemLayout], target_count: f64, fallback_size: f64) -> f64 {
    let avg = if layout.is_empty() {
        fallback_size
    } else {
        layout.iter().map(|t| t.size).sum::<f64>() / layout.len() as f64
    };
    let area = bounds.viewport_width * bounds.viewport_height;
    let raw = (area / (target_count * avg * avg)).sqrt();
    bounds.clamp_scale(raw)
}

/// Fraction of the tile's on-screen area inside the viewport grown by
/// `margin_px` on every side.
#[must_use]
pub fn reveal_ratio(tile: &ItemLayout, camera: &Camera, bounds: &Bounds, margin_px: f64) -> f64 {
    let (l, t, r, b) = tile.rect();
    let left = l * camera.scale + camera.x;
    let top = t * camera.scale + camera.y;
    let right = r * camera.scale + camera.x;
    let bottom = b * camera.scale + camera.y;
    let area = (right - left) * (bottom - top);
    if area <= 0.0 {
        return 0.0;
    }
    let ix = (right.min(bounds.viewport_width + margin_px) - left.max(-margin_px)).max(0.0);
    let iy = (bottom.min(bounds.viewport_height + margin_px) - top.max(-margin_px)).max(0.0);
    (ix * iy) / area
}

/// Mark newly visible tiles as revealed. Returns how many flipped.
pub fn reveal_visible(
    layout: &[ItemLayout],
    tiles: &mut [TileState],
    camera: &Camera,
    bounds: &Bounds,
    margin_px: f64,
    threshold: f64,
) -> usize {
    let mut flipped = 0;
    for (tile, state) in layout.iter().zip(tiles.iter_mut()) {
        if state.revealed {
            continue;
        }
        let ratio = reveal_ratio(tile, camera, bounds, margin_px);
        if ratio > 0.0 && ratio >= threshold {
            state.revealed = true;
            flipped += 1;
        }
    }
    flipped
}
