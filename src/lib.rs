//! Camera and viewport controller for an infinite product gallery.
//!
//! The gallery is a large virtual canvas of square product tiles seen through
//! a pannable, zoomable viewport. This crate owns everything between raw DOM
//! events and the transform the host paints: the tile layout, the camera with
//! its wrap-then-clamp rules, the drag/inertia/wheel/zoom state machine, the
//! intro pop-in with its one-shot auto-zoom, lazy reveal and pointer
//! proximity. The host layer wires events and `requestAnimationFrame` to
//! [`engine::Viewport`] and applies the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | The [`engine::Viewport`] controller and its actions |
//! | [`camera`] | Camera, bounds, coordinate conversions, apply pass |
//! | [`input`] | Input event types, drag tracking and controller phase |
//! | [`animation`] | Easing curves and the single camera tween slot |
//! | [`layout`] | Tile sizing and placement on the canvas |
//! | [`item`] | Product records and slot expansion |
//! | [`intro`] | Pop-in, auto-zoom target and lazy reveal |
//! | [`proximity`] | Frame-coalesced pointer proximity |
//! | [`config`] | Tunables with environment overrides |
//! | [`consts`] | Default values for every tunable |

pub mod animation;
pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod input;
pub mod intro;
pub mod item;
pub mod layout;
pub mod proximity;
