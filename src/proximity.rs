//! Pointer proximity highlighting, coalesced to one pass per frame.
//!
//! Pointer moves only record the latest screen position and schedule a pass.
//! The pass itself runs from the frame callback, so a burst of move events
//! costs one O(tiles) sweep.

#[cfg(test)]
#[path = "proximity_test.rs"]
mod proximity_test;

use crate::camera::{Camera, Point};
use crate::intro::TileState;
use crate::layout::ItemLayout;

#[derive(Debug, Clone)]
pub struct Proximity {
    radius_px: f64,
    pointer: Option<Point>,
    scheduled: bool,
}

impl Proximity {
    #[must_use]
    pub fn new(radius_px: f64) -> Self {
        Self { radius_px, pointer: None, scheduled: false }
    }

    /// Remember the latest pointer position. Returns `true` if this call
    /// scheduled a new pass (the host should request a frame).
    pub fn note_pointer(&mut self, screen: Point) -> bool {
        self.pointer = Some(screen);
        !std::mem::replace(&mut self.scheduled, true)
    }

    /// Force a pass on the next frame, e.g. after the camera moved under a
    /// stationary pointer.
    pub fn invalidate(&mut self) {
        if self.pointer.is_some() {
            self.scheduled = true;
        }
    }

    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    #[must_use]
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Run the scheduled pass, if any. Returns how many tiles changed state.
    pub fn run(&mut self, layout: &[ItemLayout], tiles: &mut [TileState], camera: &Camera) -> usize {
        if !std::mem::take(&mut self.scheduled) {
            return 0;
        }
        let Some(pointer) = self.pointer else {
            return 0;
        };
        update_near(layout, tiles, camera, pointer, self.radius_px)
    }
}

/// Toggle `near` for every tile whose center lies within `radius_px / scale`
/// canvas units of the pointer. Returns how many tiles changed state.
pub fn update_near(layout: &[ItemLayout], tiles: &mut [TileState], camera: &Camera, pointer: Point, radius_px: f64) -> usize {
    let world = camera.screen_to_world(pointer);
    let radius = camera.screen_dist_to_world(radius_px);
    let mut changed = 0;
    for (tile, state) in layout.iter().zip(tiles.iter_mut()) {
        let near = world.distance(tile.center()) < radius;
        if near != state.near {
            state.near = near;
            changed += 1;
        }
    }
    changed
}
