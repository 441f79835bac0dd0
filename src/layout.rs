//! Layout engine: staggered, size-aware rows of square tiles on the canvas.
//!
//! Layout is split into a random part ([`draw_sizes`]) and a pure part
//! ([`layout_from_sizes`]) so a fixed size array always yields the same
//! positions. Row heights are stacked and then rescaled to fill the canvas
//! height exactly; columns are centered per row and odd rows are shifted by
//! half a step. A final containment pass keeps every tile inside the canvas.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use rand::Rng;
use serde::Serialize;

use crate::camera::Point;
use crate::config::CanvasConfig;

/// Size and center of one tile slot, in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemLayout {
    pub size: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl ItemLayout {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    /// Whether `world` falls inside the tile square.
    #[must_use]
    pub fn contains(&self, world: Point) -> bool {
        let half = self.size / 2.0;
        (world.x - self.center_x).abs() <= half && (world.y - self.center_y).abs() <= half
    }

    /// `(left, top, right, bottom)` in canvas space.
    #[must_use]
    pub fn rect(&self) -> (f64, f64, f64, f64) {
        let half = self.size / 2.0;
        (self.center_x - half, self.center_y - half, self.center_x + half, self.center_y + half)
    }
}

/// Draw `count` tile sizes uniformly from `[min_size, max_size]`.
pub fn draw_sizes<R: Rng>(count: usize, canvas: &CanvasConfig, rng: &mut R) -> Vec<f64> {
    (0..count)
        .map(|_| {
            if canvas.max_size > canvas.min_size {
                rng.random_range(canvas.min_size..=canvas.max_size)
            } else {
                canvas.min_size
            }
        })
        .collect()
}

/// Random sizes followed by the pure layout pass.
pub fn compute_layout<R: Rng>(count: usize, canvas: &CanvasConfig, rng: &mut R) -> Vec<ItemLayout> {
    let sizes = draw_sizes(count, canvas, rng);
    layout_from_sizes(&sizes, canvas)
}

/// Lay out one tile per entry of `sizes`. Pure: identical inputs give
/// identical output.
#[must_use]
pub fn layout_from_sizes(sizes: &[f64], canvas: &CanvasConfig) -> Vec<ItemLayout> {
    if sizes.is_empty() {
        return Vec::new();
    }
    let per_row = canvas.items_per_row.max(1);

    let row_max: Vec<f64> = sizes.chunks(per_row).map(|row| row.iter().copied().fold(0.0, f64::max)).collect();

    // Stack rows, then stretch so the stack exactly fills the canvas height.
    let mut row_center_y = Vec::with_capacity(row_max.len());
    let mut cursor = canvas.margin_y;
    for &big in &row_max {
        let row_height = big + canvas.base_gap_y + big * canvas.extra_y;
        row_center_y.push(cursor + row_height / 2.0);
        cursor += row_height;
    }
    let y_scale = canvas.height / (cursor + canvas.margin_y);

    let usable_w = canvas.width - canvas.margin_x * 2.0;
    let mut layout: Vec<ItemLayout> = sizes
        .iter()
        .enumerate()
        .map(|(idx, &size)| {
            let row = idx / per_row;
            let col = idx % per_row;
            let big = row_max[row];
            let step = big + canvas.base_gap_x + big * canvas.extra_x;
            let row_width = step * (per_row - 1) as f64;
            let start_x = canvas.margin_x + (usable_w - row_width) / 2.0;
            let stagger = if row % 2 == 0 { 0.0 } else { step * 0.5 };
            ItemLayout {
                size,
                center_x: start_x + col as f64 * step + stagger,
                center_y: row_center_y[row] * y_scale,
            }
        })
        .collect();

    contain_axis(&mut layout, canvas.width, Axis::X);
    contain_axis(&mut layout, canvas.height, Axis::Y);
    layout
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn of(self, tile: &mut ItemLayout) -> &mut f64 {
        match self {
            Self::X => &mut tile.center_x,
            Self::Y => &mut tile.center_y,
        }
    }
}

/// Remap one axis of tile centers into `[0, extent]` when any tile spills
/// over an edge. Layouts that already fit are left untouched.
fn contain_axis(layout: &mut [ItemLayout], extent: f64, axis: Axis) {
    let mut min_c = f64::INFINITY;
    let mut max_c = f64::NEG_INFINITY;
    let mut max_size = 0.0_f64;
    let mut spills = false;
    for tile in layout.iter_mut() {
        let size = tile.size;
        let c = *axis.of(tile);
        min_c = min_c.min(c);
        max_c = max_c.max(c);
        max_size = max_size.max(size);
        if c - size / 2.0 < 0.0 || c + size / 2.0 > extent {
            spills = true;
        }
    }
    if !spills {
        return;
    }

    let lo = max_size / 2.0;
    let hi = extent - max_size / 2.0;
    if hi <= lo {
        for tile in layout.iter_mut() {
            *axis.of(tile) = extent / 2.0;
        }
        return;
    }

    let span = max_c - min_c;
    if span <= hi - lo {
        let shift = if min_c < lo { lo - min_c } else if max_c > hi { hi - max_c } else { 0.0 };
        for tile in layout.iter_mut() {
            *axis.of(tile) += shift;
        }
    } else {
        let k = (hi - lo) / span;
        for tile in layout.iter_mut() {
            let c = axis.of(tile);
            *c = lo + (*c - min_c) * k;
        }
    }
}
