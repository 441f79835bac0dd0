#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn small_canvas() -> CanvasConfig {
    CanvasConfig {
        width: 1000.0,
        height: 1000.0,
        slot_count: 4,
        items_per_row: 2,
        min_size: 100.0,
        max_size: 100.0,
        margin_x: 50.0,
        margin_y: 50.0,
        base_gap_x: 30.0,
        base_gap_y: 30.0,
        extra_x: 0.0,
        extra_y: 0.0,
    }
}

fn assert_in_bounds(layout: &[ItemLayout], canvas: &CanvasConfig) {
    for (i, tile) in layout.iter().enumerate() {
        let (l, t, r, b) = tile.rect();
        assert!(l >= -EPSILON, "slot {i} left {l}");
        assert!(t >= -EPSILON, "slot {i} top {t}");
        assert!(r <= canvas.width + EPSILON, "slot {i} right {r}");
        assert!(b <= canvas.height + EPSILON, "slot {i} bottom {b}");
    }
}

// =============================================================
// ItemLayout
// =============================================================

#[test]
fn item_layout_contains_its_square() {
    let tile = ItemLayout { size: 100.0, center_x: 500.0, center_y: 300.0 };
    assert!(tile.contains(Point::new(500.0, 300.0)));
    assert!(tile.contains(Point::new(550.0, 250.0)));
    assert!(!tile.contains(Point::new(551.0, 300.0)));
    assert_eq!(tile.rect(), (450.0, 250.0, 550.0, 350.0));
}

// =============================================================
// layout_from_sizes
// =============================================================

#[test]
fn empty_sizes_give_empty_layout() {
    assert!(layout_from_sizes(&[], &CanvasConfig::default()).is_empty());
}

#[test]
fn hand_computed_two_by_two() {
    let canvas = small_canvas();
    let layout = layout_from_sizes(&[100.0; 4], &canvas);
    assert_eq!(layout.len(), 4);

    // rows are 130 tall: centers 115 and 245, stack 310 + 50 margin, stretched to 1000
    let y_scale = 1000.0 / 360.0;
    assert!(approx_eq(layout[0].center_y, 115.0 * y_scale));
    assert!(approx_eq(layout[2].center_y, 245.0 * y_scale));

    // step 130, row span 130, start 50 + (900 - 130) / 2 = 435; odd row staggered by 65
    assert!(approx_eq(layout[0].center_x, 435.0));
    assert!(approx_eq(layout[1].center_x, 565.0));
    assert!(approx_eq(layout[2].center_x, 500.0));
    assert!(approx_eq(layout[3].center_x, 630.0));
    assert!(layout.iter().all(|t| t.size == 100.0));
}

#[test]
fn rows_share_a_center_line() {
    let canvas = CanvasConfig { items_per_row: 3, ..small_canvas() };
    let layout = layout_from_sizes(&[80.0, 120.0, 90.0, 100.0, 70.0, 60.0], &canvas);
    assert_eq!(layout[0].center_y, layout[1].center_y);
    assert_eq!(layout[1].center_y, layout[2].center_y);
    assert!(layout[3].center_y > layout[0].center_y);
}

#[test]
fn bigger_rows_get_more_room() {
    let canvas = CanvasConfig { items_per_row: 2, extra_x: 0.25, ..small_canvas() };
    let layout = layout_from_sizes(&[100.0, 100.0, 200.0, 200.0], &canvas);
    let gap_small = layout[1].center_x - layout[0].center_x;
    let gap_big = layout[3].center_x - layout[2].center_x;
    assert!(approx_eq(gap_small, 100.0 + 30.0 + 25.0));
    assert!(approx_eq(gap_big, 200.0 + 30.0 + 50.0));
}

#[test]
fn single_tile_is_centered_horizontally() {
    let layout = layout_from_sizes(&[100.0], &CanvasConfig { items_per_row: 1, ..small_canvas() });
    assert!(approx_eq(layout[0].center_x, 500.0));
}

#[test]
fn identical_sizes_give_identical_layout() {
    let canvas = CanvasConfig::default();
    let sizes = draw_sizes(canvas.slot_count, &canvas, &mut StdRng::seed_from_u64(11));
    let a = layout_from_sizes(&sizes, &canvas);
    let b = layout_from_sizes(&sizes, &canvas);
    assert_eq!(a, b);
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.center_x.to_bits(), y.center_x.to_bits());
        assert_eq!(x.center_y.to_bits(), y.center_y.to_bits());
    }
}

#[test]
fn default_canvas_layout_stays_in_bounds() {
    let canvas = CanvasConfig::default();
    for seed in 0..20 {
        let layout = compute_layout(canvas.slot_count, &canvas, &mut StdRng::seed_from_u64(seed));
        assert_eq!(layout.len(), 150);
        assert_in_bounds(&layout, &canvas);
    }
}

#[test]
fn partial_last_row_stays_in_bounds() {
    let canvas = CanvasConfig::default();
    let layout = compute_layout(37, &canvas, &mut StdRng::seed_from_u64(5));
    assert_eq!(layout.len(), 37);
    assert_in_bounds(&layout, &canvas);
}

#[test]
fn fitting_layout_is_not_remapped() {
    // The hand-computed case fits, so containment must not move it.
    let canvas = small_canvas();
    let layout = layout_from_sizes(&[100.0; 4], &canvas);
    assert!(approx_eq(layout[0].center_x, 435.0));
}

#[test]
fn tile_larger_than_canvas_is_centered() {
    let canvas = CanvasConfig { width: 100.0, height: 100.0, items_per_row: 2, ..small_canvas() };
    let layout = layout_from_sizes(&[150.0, 150.0], &canvas);
    for tile in &layout {
        assert!(approx_eq(tile.center_x, 50.0));
        assert!(approx_eq(tile.center_y, 50.0));
    }
}

// =============================================================
// draw_sizes
// =============================================================

#[test]
fn draw_sizes_respects_range() {
    let canvas = CanvasConfig::default();
    let sizes = draw_sizes(500, &canvas, &mut StdRng::seed_from_u64(2));
    assert_eq!(sizes.len(), 500);
    assert!(sizes.iter().all(|s| (250.0..=350.0).contains(s)));
}

#[test]
fn draw_sizes_degenerate_range() {
    let canvas = CanvasConfig { min_size: 120.0, max_size: 120.0, ..CanvasConfig::default() };
    let sizes = draw_sizes(3, &canvas, &mut StdRng::seed_from_u64(2));
    assert_eq!(sizes, vec![120.0; 3]);
}

#[test]
fn compute_layout_is_reproducible_for_a_seed() {
    let canvas = CanvasConfig::default();
    let a = compute_layout(150, &canvas, &mut StdRng::seed_from_u64(8));
    let b = compute_layout(150, &canvas, &mut StdRng::seed_from_u64(8));
    assert_eq!(a, b);
}
