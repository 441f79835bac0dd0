use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::animation::{CameraTween, Ease, TweenKind, TweenSlot};
use crate::camera::{Bounds, Camera, Point, Transform};
use crate::config::{ConfigError, ViewportConfig};
use crate::consts::{FALLBACK_TILE_SIZE, POP_IN_OVERSHOOT};
use crate::input::{Button, Cursor, DragState, GestureKind, InputState, Key, Modifiers, Phase, PointerId, WheelDelta};
use crate::intro::{self, PopIn, TileState};
use crate::item::{self, Item};
use crate::layout::{self, ItemLayout};
use crate::proximity::Proximity;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A press-release without drag landed on a tile.
    ItemSelected { slot: usize, item_id: String },
    /// The host must call `preventDefault()` on the triggering event.
    PreventDefault,
    SetCursor(Cursor),
    /// Transform or tile state changed; repaint.
    RenderNeeded,
}

/// Everything the rendering layer needs for one tile slot.
#[derive(Debug, Clone, Copy)]
pub struct TileView<'a> {
    pub slot: usize,
    pub item: &'a Item,
    /// `None` renders a placeholder.
    pub thumbnail: Option<&'a str>,
    pub layout: ItemLayout,
    pub state: TileState,
}

/// The gallery viewport controller.
///
/// Owns the camera, the drag gesture, the tile layout and every animation
/// that touches them. Hosts feed it DOM events and animation-frame
/// timestamps and paint [`Viewport::transform`] and [`Viewport::tiles`].
pub struct Viewport {
    config: ViewportConfig,
    bounds: Bounds,
    camera: Camera,
    /// Where the drag says the camera should be; the live camera eases toward it.
    target: Point,
    tween: TweenSlot,
    input: InputState,
    items: Vec<Item>,
    slots: Vec<usize>,
    layout: Vec<ItemLayout>,
    tiles: Vec<TileState>,
    pop_in: Option<PopIn>,
    proximity: Proximity,
    user_interacted: bool,
    auto_zoom_done: bool,
    rng: StdRng,
}

impl Viewport {
    /// Create a controller for a viewport of `width` x `height` CSS pixels.
    ///
    /// `seed` drives slot shuffling, tile sizes and the pop-in stagger.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: ViewportConfig, width: f64, height: f64, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = Bounds {
            viewport_width: sanitize_dimension(width),
            viewport_height: sanitize_dimension(height),
            canvas_width: config.canvas.width,
            canvas_height: config.canvas.height,
            max_scale: config.max_scale,
        };
        let camera = bounds.fit();
        Ok(Self {
            config,
            bounds,
            camera,
            target: Point::new(camera.x, camera.y),
            tween: TweenSlot::new(),
            input: InputState::Idle,
            items: Vec::new(),
            slots: Vec::new(),
            layout: Vec::new(),
            tiles: Vec::new(),
            pop_in: None,
            proximity: Proximity::new(config.proximity_radius_px),
            user_interacted: false,
            auto_zoom_done: false,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    // --- Data inputs ---

    /// Replace the logical item list and lay the slots out from scratch.
    ///
    /// The first non-empty layout fits the camera to the canvas. Every layout
    /// restarts the pop-in and re-arms the one-shot auto-zoom.
    pub fn set_items(&mut self, items: Vec<Item>) -> Vec<Action> {
        let first_layout = self.layout.is_empty();
        let canvas = self.config.canvas;

        self.slots = item::expand_slots(items.len(), canvas.slot_count, &mut self.rng);
        self.items = items;
        self.layout = layout::compute_layout(self.slots.len(), &canvas, &mut self.rng);
        self.tiles = vec![TileState::default(); self.layout.len()];
        self.auto_zoom_done = false;
        self.pop_in = if self.layout.is_empty() {
            None
        } else {
            Some(PopIn::new(
                self.layout.len(),
                self.config.pop_in_ms,
                self.config.pop_in_stagger_ms,
                self.config.tile_rest_scale,
                Ease::BackOut(POP_IN_OVERSHOOT),
                &mut self.rng,
            ))
        };

        if first_layout && !self.layout.is_empty() {
            self.tween.kill();
            self.camera = self.bounds.fit();
            self.sync_target();
        }
        self.apply();
        self.reveal();
        self.proximity.invalidate();

        tracing::info!(items = self.items.len(), slots = self.slots.len(), "gallery layout computed");
        vec![Action::RenderNeeded]
    }

    /// Update viewport dimensions (CSS pixels). Bounds are recomputed and the
    /// current camera is re-normalized against them; in-flight animations
    /// carry on against the new bounds.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.bounds.viewport_width = sanitize_dimension(width);
        self.bounds.viewport_height = sanitize_dimension(height);
        self.apply();
        self.normalize_target();
        self.reveal();
        self.proximity.invalidate();
        tracing::info!(width = self.bounds.viewport_width, height = self.bounds.viewport_height, "viewport resized");
        vec![Action::RenderNeeded]
    }

    // --- Camera ---

    /// Set the camera directly, cancelling any camera animation.
    pub fn set_camera(&mut self, x: f64, y: f64, scale: f64) -> Vec<Action> {
        self.tween.kill();
        self.camera = Camera::new(x, y, scale);
        self.apply();
        self.sync_target();
        self.proximity.invalidate();
        vec![Action::RenderNeeded]
    }

    /// Enforce scale, wrap and clamp on the live camera and return the
    /// transform to render.
    pub fn apply(&mut self) -> Transform {
        self.bounds.apply(&mut self.camera)
    }

    /// Animate to `scale` (clamped) keeping the viewport center stationary.
    pub fn zoom_to(&mut self, scale: f64) -> Vec<Action> {
        self.user_interacted = true;
        self.start_zoom(scale, TweenKind::Zoom, self.config.zoom_duration_ms);
        vec![Action::RenderNeeded]
    }

    /// Zoom-in button.
    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_to(self.camera.scale * self.config.zoom_step)
    }

    /// Zoom-out button.
    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_to(self.camera.scale / self.config.zoom_step)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, pointer_id: PointerId, screen: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || matches!(self.input, InputState::Dragging(_)) {
            return Vec::new();
        }
        self.user_interacted = true;
        // Freeze the camera where it is rendered before taking the new baseline.
        if let Some(killed) = self.tween.kill() {
            tracing::debug!(?killed, "pointer down interrupted camera animation");
        }
        self.sync_target();
        self.input = InputState::Dragging(DragState::new(pointer_id, screen));
        self.proximity.note_pointer(screen);
        tracing::debug!(pointer_id, x = screen.x, y = screen.y, "drag started");
        vec![Action::SetCursor(Cursor::Grabbing)]
    }

    pub fn on_pointer_move(&mut self, pointer_id: PointerId, screen: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.proximity.note_pointer(screen) {
            actions.push(Action::RenderNeeded);
        }

        let InputState::Dragging(drag) = &mut self.input else {
            return actions;
        };
        if drag.pointer_id != pointer_id || !screen.x.is_finite() || !screen.y.is_finite() {
            return actions;
        }
        let was_moved = drag.moved;
        let delta = drag.track(screen, self.config.velocity_retain, self.config.click_threshold_px);
        if !drag.moved {
            return actions;
        }
        // On the event that crosses the click threshold, catch up the whole
        // displacement so far.
        let step = if was_moved { delta } else { drag.total() };

        self.follow_by(step);
        if !actions.contains(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    pub fn on_pointer_up(&mut self, pointer_id: PointerId, screen: Point) -> Vec<Action> {
        self.release(pointer_id, screen, true)
    }

    /// `pointercancel`: ends the drag like a release but never selects.
    pub fn on_pointer_cancel(&mut self, pointer_id: PointerId, screen: Point) -> Vec<Action> {
        self.release(pointer_id, screen, false)
    }

    pub fn on_wheel(&mut self, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = vec![Action::PreventDefault];
        // Ctrl/Cmd+wheel is the browser's pinch-zoom path; swallow it.
        if modifiers.zoom_modifier() || !delta.dx.is_finite() || !delta.dy.is_finite() {
            return actions;
        }
        self.user_interacted = true;

        let (dx, dy) = if modifiers.shift { (-delta.dy, -delta.dx) } else { (-delta.dx, -delta.dy) };
        let base = match self.tween.active_kind() {
            Some(TweenKind::WheelPan) => self.tween.target().unwrap_or(self.camera),
            _ => self.camera,
        };
        let mut to = Camera::new(
            base.x + dx * self.config.wheel_speed,
            base.y + dy * self.config.wheel_speed,
            self.camera.scale,
        );
        self.bounds.apply(&mut to);

        if let InputState::Dragging(_) = self.input {
            self.target.x += to.x - base.x;
            self.target.y += to.y - base.y;
            self.normalize_target();
        }
        self.tween.start(CameraTween::new(
            TweenKind::WheelPan,
            self.camera,
            to,
            self.config.wheel_smooth_ms,
            Ease::Power3Out,
        ));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Swallow Ctrl/Cmd + `+`, `=`, `-`, `0` so the browser never page-zooms.
    #[must_use]
    pub fn on_key_down(&self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.zoom_modifier() && key.is_zoom_key() {
            vec![Action::PreventDefault]
        } else {
            Vec::new()
        }
    }

    /// Native gesture events (Safari pinch) are always swallowed.
    #[must_use]
    pub fn on_gesture(&self, _kind: GestureKind) -> Vec<Action> {
        vec![Action::PreventDefault]
    }

    // --- Frame ---

    /// Animation-frame callback. Advances the pop-in and the camera tween,
    /// applies the camera, updates reveal state and runs at most one
    /// proximity pass.
    pub fn frame(&mut self, now_ms: f64) -> Vec<Action> {
        let mut changed = false;

        if let Some(pop_in) = self.pop_in.as_mut() {
            changed = true;
            if pop_in.advance(now_ms, &mut self.tiles) {
                self.pop_in = None;
                tracing::debug!("intro pop-in finished");
                self.maybe_auto_zoom();
            }
        }

        if let Some(sample) = self.tween.sample(now_ms) {
            self.camera = sample.camera;
            self.apply();
            self.proximity.invalidate();
            changed = true;
            if sample.finished {
                tracing::trace!(kind = ?sample.kind, "camera tween finished");
            }
        }

        if self.reveal() > 0 {
            changed = true;
        }
        if self.proximity.run(&self.layout, &mut self.tiles, &self.camera) > 0 {
            changed = true;
        }

        if changed { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// Whether another animation frame should be requested.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.tween.is_active() || self.pop_in.is_some() || self.proximity.is_scheduled()
    }

    // --- Queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::from(self.camera)
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase::derive(&self.input, self.tween.active_kind())
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        match self.input {
            InputState::Dragging(_) => Cursor::Grabbing,
            InputState::Idle => Cursor::Grab,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &[ItemLayout] {
        &self.layout
    }

    #[must_use]
    pub fn tile_states(&self) -> &[TileState] {
        &self.tiles
    }

    #[must_use]
    pub fn user_interacted(&self) -> bool {
        self.user_interacted
    }

    /// Per-slot render data, in paint order.
    pub fn tiles(&self) -> impl Iterator<Item = TileView<'_>> {
        self.slots
            .iter()
            .zip(&self.layout)
            .zip(&self.tiles)
            .enumerate()
            .filter_map(move |(slot, ((&item_idx, &layout), &state))| {
                let item = self.items.get(item_idx)?;
                Some(TileView { slot, item, thumbnail: item.thumbnail(), layout, state })
            })
    }

    /// Top-most slot under a screen point.
    #[must_use]
    pub fn hit_test(&self, screen: Point) -> Option<usize> {
        let world = self.camera.screen_to_world(screen);
        self.layout.iter().rposition(|tile| tile.contains(world))
    }

    // --- Internals ---

    fn release(&mut self, pointer_id: PointerId, screen: Point, select: bool) -> Vec<Action> {
        let InputState::Dragging(drag) = self.input else {
            return Vec::new();
        };
        if drag.pointer_id != pointer_id {
            return Vec::new();
        }
        self.input = InputState::Idle;
        let mut actions = vec![Action::SetCursor(Cursor::Grab)];

        if !drag.moved {
            let offset = Point::new(screen.x - drag.start.x, screen.y - drag.start.y);
            let finite = offset.x.is_finite() && offset.y.is_finite();
            if !finite || drag.start.distance(screen) < self.config.click_threshold_px {
                tracing::debug!(pointer_id, "release without drag");
                if select {
                    actions.extend(self.selection_at(screen));
                }
                return actions;
            }
            // No move event arrived between press and release; pan by the
            // release offset and let the follow ease carry it.
            self.follow_by(offset);
            tracing::debug!(pointer_id, dx = offset.x, dy = offset.y, "drag released without moves");
            actions.push(Action::RenderNeeded);
            return actions;
        }

        let speed = drag.speed();
        if speed < self.config.inertia_min_speed {
            // The drag-follow ease finishes on its own.
            tracing::debug!(pointer_id, speed, "drag ended without inertia");
            return actions;
        }

        let mut to = Camera::new(
            self.camera.x + drag.velocity.x * self.config.inertia_multiplier,
            self.camera.y + drag.velocity.y * self.config.inertia_multiplier,
            self.camera.scale,
        );
        self.bounds.apply(&mut to);
        self.tween.start(
            CameraTween::new(TweenKind::Inertia, self.camera, to, self.config.inertia_duration_ms, Ease::Power3Out)
                .with_delay(self.config.inertia_delay_ms),
        );
        self.target = Point::new(to.x, to.y);
        tracing::debug!(pointer_id, speed, to_x = to.x, to_y = to.y, "inertia started");
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Shift the drag target by `step` and ease the camera toward it.
    fn follow_by(&mut self, step: Point) {
        self.target.x += step.x;
        self.target.y += step.y;
        self.normalize_target();
        let to = Camera::new(self.target.x, self.target.y, self.camera.scale);
        self.tween.start(CameraTween::new(
            TweenKind::DragFollow,
            self.camera,
            to,
            self.config.drag_follow_ms,
            Ease::Power3Out,
        ));
    }

    fn selection_at(&self, screen: Point) -> Option<Action> {
        let slot = self.hit_test(screen)?;
        let item = self.items.get(*self.slots.get(slot)?)?;
        tracing::debug!(slot, item_id = %item.id, "item selected");
        Some(Action::ItemSelected { slot, item_id: item.id.clone() })
    }

    fn start_zoom(&mut self, scale: f64, kind: TweenKind, duration_ms: f64) {
        let target_scale = self.bounds.clamp_scale(scale);
        let to = self.camera.zoom_to_point(target_scale, self.bounds.viewport_center());
        tracing::debug!(?kind, from = self.camera.scale, to = target_scale, "zoom started");
        self.tween.start(CameraTween::new(kind, self.camera, to, duration_ms, Ease::Power3Out));
    }

    fn maybe_auto_zoom(&mut self) {
        if self.auto_zoom_done || self.user_interacted {
            return;
        }
        self.auto_zoom_done = true;
        let target = intro::visible_items_scale(
            &self.bounds,
            &self.layout,
            self.config.visible_items_target,
            FALLBACK_TILE_SIZE,
        );
        if target > self.camera.scale {
            self.start_zoom(target, TweenKind::AutoZoom, self.config.auto_zoom_ms);
        }
    }

    fn reveal(&mut self) -> usize {
        intro::reveal_visible(
            &self.layout,
            &mut self.tiles,
            &self.camera,
            &self.bounds,
            self.config.reveal_margin_px,
            self.config.reveal_threshold,
        )
    }

    fn sync_target(&mut self) {
        self.target = Point::new(self.camera.x, self.camera.y);
    }

    /// Keep the drag target inside the same bounds as the camera so
    /// overscroll never builds up a dead zone.
    fn normalize_target(&mut self) {
        let mut probe = Camera::new(self.target.x, self.target.y, self.camera.scale);
        self.bounds.apply(&mut probe);
        self.target = Point::new(probe.x, probe.y);
    }
}

fn sanitize_dimension(v: f64) -> f64 {
    if v.is_finite() { v.max(1.0) } else { 1.0 }
}
