//! skewer-core: the transform engine behind the skewer demo.
//!
//! Responsibilities:
//! - 2D points and closed-form affine matrices (`Point2`, `Affine2`).
//! - Primitive operations applied in place about a pivot (`ops`).
//! - Immutable baseline + derived working copy (`ShapeState`).
//! - Named, ordered compositions of primitives bound to trigger keys (`PresetTable`).
//! - Mapping discrete input events onto presets (`InputDispatcher`).
//!
//! Nothing here knows about windows or GPUs; the render and window crates
//! consume the point lists produced by this crate.

mod affine;
mod error;
mod input;
pub mod ops;
mod point;
mod preset;
mod shape;

pub use affine::Affine2;
pub use error::{Result, TransformError};
pub use input::{Dispatch, InputDispatcher, InputEvent};
pub use ops::Op;
pub use point::Point2;
pub use preset::{Preset, PresetTable, Trigger};
pub use shape::ShapeState;
