//! End-to-end sessions driven through the public `Viewport` API.
#![allow(clippy::float_cmp)]

use gallery_viewport::camera::{Camera, Point};
use gallery_viewport::config::ViewportConfig;
use gallery_viewport::engine::{Action, Viewport};
use gallery_viewport::input::{Button, Modifiers, Phase, WheelDelta};
use gallery_viewport::item::{Item, parse_items};
use gallery_viewport::layout::layout_from_sizes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPSILON: f64 = 1e-6;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn one_item() -> Vec<Item> {
    parse_items(r#"[{"id": "vase-01", "name": "Vase", "images": {"above": ["https://cdn.example/vase.jpg"]}}]"#)
        .unwrap()
}

fn settle(vp: &mut Viewport, now: &mut f64) {
    let deadline = *now + 10_000.0;
    vp.frame(*now);
    while vp.needs_frame() && *now < deadline {
        *now += 16.0;
        vp.frame(*now);
    }
}

fn assert_camera_invariants(vp: &Viewport, context: &str) {
    let cam = vp.camera();
    let b = vp.bounds();
    let (min, max) = b.scale_range();
    assert!(cam.scale >= min - EPSILON && cam.scale <= max + EPSILON, "{context}: scale {} outside [{min}, {max}]", cam.scale);
    assert!(
        b.canvas_width * cam.scale >= b.viewport_width - EPSILON || b.canvas_height * cam.scale >= b.viewport_height - EPSILON,
        "{context}: canvas does not cover the viewport"
    );

    let sw = b.canvas_width * cam.scale;
    let sh = b.canvas_height * cam.scale;
    assert!(cam.x >= -sw - b.viewport_width - EPSILON && cam.x <= b.viewport_width + EPSILON, "{context}: x {} escaped wrap range", cam.x);
    assert!(cam.y >= -sh - b.viewport_height - EPSILON && cam.y <= b.viewport_height + EPSILON, "{context}: y {} escaped wrap range", cam.y);

    if sw <= b.viewport_width {
        assert!(approx_eq(cam.x, (b.viewport_width - sw) / 2.0), "{context}: narrow canvas not centered");
    } else {
        assert!(cam.x <= EPSILON && cam.x >= b.viewport_width - sw - EPSILON, "{context}: x {} not clamped", cam.x);
    }
    if sh <= b.viewport_height {
        assert!(approx_eq(cam.y, (b.viewport_height - sh) / 2.0), "{context}: short canvas not centered");
    } else {
        assert!(cam.y <= EPSILON && cam.y >= b.viewport_height - sh - EPSILON, "{context}: y {} not clamped", cam.y);
    }
}

#[test]
fn random_sessions_keep_camera_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for session in 0..8 {
        let mut vp = Viewport::new(ViewportConfig::default(), 1000.0, 800.0, session).unwrap();
        vp.set_items(one_item());
        let mut now = 0.0;
        for op in 0..200 {
            match rng.random_range(0..8) {
                0 => {
                    vp.zoom_in();
                }
                1 => {
                    vp.zoom_out();
                }
                2 => {
                    vp.zoom_to(rng.random_range(-2.0..20.0));
                }
                3 => {
                    let delta = WheelDelta { dx: rng.random_range(-400.0..400.0), dy: rng.random_range(-400.0..400.0) };
                    let modifiers = Modifiers { shift: rng.random_bool(0.3), ..Modifiers::default() };
                    vp.on_wheel(delta, modifiers);
                }
                4 => {
                    let start = Point::new(rng.random_range(0.0..1000.0), rng.random_range(0.0..800.0));
                    vp.on_pointer_down(1, start, Button::Primary);
                    let mut p = start;
                    for _ in 0..rng.random_range(1..12) {
                        p = Point::new(p.x + rng.random_range(-90.0..90.0), p.y + rng.random_range(-90.0..90.0));
                        vp.on_pointer_move(1, p);
                        vp.frame(now);
                        now += 16.0;
                    }
                    vp.on_pointer_up(1, p);
                }
                5 => {
                    vp.set_camera(rng.random_range(-20_000.0..20_000.0), rng.random_range(-20_000.0..20_000.0), rng.random_range(0.01..10.0));
                }
                6 => {
                    vp.set_viewport(rng.random_range(200.0..4000.0), rng.random_range(200.0..4000.0));
                }
                _ => {
                    now += rng.random_range(0.0..400.0);
                }
            }
            vp.frame(now);
            assert_camera_invariants(&vp, &format!("session {session} op {op}"));
            now += 16.0;
        }
        settle(&mut vp, &mut now);
        assert_camera_invariants(&vp, &format!("session {session} settled"));
    }
}

#[test]
fn zoom_anchor_holds_for_arbitrary_points() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let cam = Camera::new(rng.random_range(-3000.0..0.0), rng.random_range(-3000.0..0.0), rng.random_range(0.1..4.0));
        let anchor = Point::new(rng.random_range(0.0..1000.0), rng.random_range(0.0..800.0));
        let s2 = rng.random_range(0.1..4.0);
        let world = cam.screen_to_world(anchor);
        let zoomed = cam.zoom_to_point(s2, anchor);
        let back = zoomed.world_to_screen(world);
        assert!((back.x - anchor.x).abs() < 1e-6 && (back.y - anchor.y).abs() < 1e-6);
    }
}

#[test]
fn layout_is_pure_for_fixed_sizes() {
    let config = ViewportConfig::default();
    let sizes: Vec<f64> = (0..150).map(|i| 250.0 + f64::from(i % 11) * 9.0).collect();
    let a = layout_from_sizes(&sizes, &config.canvas);
    let b = layout_from_sizes(&sizes, &config.canvas);
    assert_eq!(a, b);
    for tile in &a {
        let (l, t, r, bottom) = tile.rect();
        assert!(l >= -EPSILON && t >= -EPSILON);
        assert!(r <= config.canvas.width + EPSILON && bottom <= config.canvas.height + EPSILON);
    }
}

#[test]
fn click_selects_and_drag_does_not() {
    let mut vp = Viewport::new(ViewportConfig::default(), 1000.0, 800.0, 11).unwrap();
    vp.set_items(one_item());
    let before = vp.camera();
    let on_tile = vp.camera().world_to_screen(vp.layout()[75].center());

    vp.on_pointer_down(1, on_tile, Button::Primary);
    vp.on_pointer_move(1, Point::new(on_tile.x + 2.0, on_tile.y + 2.0));
    let click = vp.on_pointer_up(1, on_tile);
    assert!(click.iter().any(|a| matches!(a, Action::ItemSelected { item_id, .. } if item_id == "vase-01")));
    let mut now = 0.0;
    settle(&mut vp, &mut now);
    assert_eq!((vp.camera().x, vp.camera().y), (before.x, before.y));

    vp.on_pointer_down(1, on_tile, Button::Primary);
    vp.on_pointer_move(1, Point::new(on_tile.x + 6.0, on_tile.y));
    let drag = vp.on_pointer_up(1, Point::new(on_tile.x + 6.0, on_tile.y));
    assert!(!drag.iter().any(|a| matches!(a, Action::ItemSelected { .. })));
}

#[test]
fn fit_then_drag_settles_at_minus_fifty() {
    let config = ViewportConfig { inertia_multiplier: 0.0, ..ViewportConfig::default() };
    let mut vp = Viewport::new(config, 1000.0, 800.0, 1).unwrap();
    vp.set_items(one_item());
    let cam = vp.camera();
    assert!(approx_eq(cam.scale, 0.4));
    assert!(approx_eq(cam.x, -100.0));
    assert!(approx_eq(cam.y, 0.0));

    // Interacting before the intro ends suppresses the auto-zoom.
    vp.on_pointer_down(1, Point::new(500.0, 400.0), Button::Primary);
    vp.on_pointer_move(1, Point::new(550.0, 400.0));
    let mut now = 0.0;
    settle(&mut vp, &mut now);
    vp.on_pointer_up(1, Point::new(550.0, 400.0));
    settle(&mut vp, &mut now);

    assert!(approx_eq(vp.camera().x, -50.0));
    assert!(approx_eq(vp.camera().y, 0.0));
    assert_eq!(vp.phase(), Phase::Idle);
}

#[test]
fn zoom_button_scenario() {
    let mut vp = Viewport::new(ViewportConfig::default(), 1000.0, 800.0, 1).unwrap();
    vp.set_items(one_item());
    vp.zoom_in();
    let mut now = 0.0;
    settle(&mut vp, &mut now);
    let cam = vp.camera();
    assert!(approx_eq(cam.scale, 0.448));
    assert!(approx_eq(cam.x, -172.0));
    assert!(approx_eq(cam.y, -48.0));
}

#[test]
fn thumbnails_flow_through_to_tiles() {
    let mut vp = Viewport::new(ViewportConfig::default(), 1000.0, 800.0, 1).unwrap();
    vp.set_items(one_item());
    assert!(vp.tiles().all(|t| t.thumbnail == Some("https://cdn.example/vase.jpg")));
}

#[test]
fn far_release_without_moves_never_selects() {
    let mut vp = Viewport::new(ViewportConfig::default(), 1000.0, 800.0, 11).unwrap();
    vp.set_items(one_item());
    let on_tile = vp.camera().world_to_screen(vp.layout()[75].center());
    vp.on_pointer_down(1, on_tile, Button::Primary);
    let actions = vp.on_pointer_up(1, Point::new(on_tile.x + 40.0, on_tile.y + 40.0));
    assert!(!actions.iter().any(|a| matches!(a, Action::ItemSelected { .. })));
}

#[test]
fn one_event_per_frame_drags_the_camera_along() {
    let mut vp = Viewport::new(ViewportConfig::default(), 1000.0, 800.0, 1).unwrap();
    vp.set_items(one_item());
    let start = vp.camera();
    vp.on_pointer_down(1, Point::new(500.0, 400.0), Button::Primary);
    let mut now = 0.0;
    for step in 1..=12 {
        vp.on_pointer_move(1, Point::new(500.0 - f64::from(step) * 8.0, 400.0));
        vp.frame(now);
        now += 16.0;
    }
    assert!(vp.camera().x < start.x - 20.0, "camera did not follow: {:?}", vp.camera());
    assert_eq!(vp.phase(), Phase::Dragging);
}
