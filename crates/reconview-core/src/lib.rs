//! Core types for reconview.
//!
//! This crate provides the data side of the viewer:
//! - [`CameraState`] orbit/pan/zoom parameters with clamped setters
//! - [`PointCloudDataset`] validated reconstruction output and payload decoding
//! - [`ModelRegistry`] named datasets with an active selection
//! - [`ModelProfiles`] per-model labels and fallback colors
//! - [`ViewerOptions`] configuration

// Documentation lints - internal functions don't need exhaustive error docs
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod camera;
pub mod color;
pub mod dataset;
pub mod error;
pub mod model;
pub mod options;
pub mod registry;

pub use camera::{CameraState, ZoomLimits, DEFAULT_ZOOM};
pub use color::Color;
pub use dataset::{bounding_box, decode_payload, DecodedPayload, PointCloudDataset, RawDataset};
pub use error::{Result, ViewerError};
pub use model::{FallbackColor, ModelProfile, ModelProfiles, GAUSSIAN_SPLATTING, NERF};
pub use options::ViewerOptions;
pub use registry::ModelRegistry;

// Re-export glam types for convenience
pub use glam::{Vec2, Vec3};
