//! Point-cloud datasets and the reconstruction payload they are decoded from.
//!
//! A reconstruction service delivers one entry per model:
//!
//! ```json
//! { "nerf": { "pointCloud": [0.0, 0.0, 0.0], "colors": [1.0, 0.5, 0.0], "numPoints": 1 } }
//! ```
//!
//! Entries are validated independently so one malformed model never prevents
//! the others from being shown.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};

/// One model entry exactly as delivered by the reconstruction service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataset {
    /// Flattened `x, y, z` coordinates.
    #[serde(alias = "pointCloud")]
    pub points: Vec<f32>,
    /// Flattened `r, g, b` intensities in `[0, 1]`.
    #[serde(default)]
    pub colors: Option<Vec<f32>>,
    /// Point count reported by the producer.
    #[serde(default)]
    pub num_points: Option<usize>,
}

impl RawDataset {
    /// Creates a raw entry from flattened arrays.
    pub fn new(points: Vec<f32>, colors: Option<Vec<f32>>) -> Self {
        let num_points = Some(points.len() / 3);
        Self {
            points,
            colors,
            num_points,
        }
    }
}

/// An immutable, validated point cloud produced by one reconstruction model.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloudDataset {
    model_name: String,
    points: Vec<Vec3>,
    colors: Option<Vec<Vec3>>,
}

impl PointCloudDataset {
    /// Validates a raw entry and builds a dataset from it.
    ///
    /// Fails with [`ViewerError::MalformedDataset`] when the point array is not
    /// a multiple of three or the color array length differs from the point
    /// array length, and with [`ViewerError::EmptyDataset`] when there are no
    /// points at all.
    pub fn from_raw(model_name: impl Into<String>, raw: RawDataset) -> Result<Self> {
        let model_name = model_name.into();
        let RawDataset {
            points,
            colors,
            num_points,
        } = raw;

        if points.len() % 3 != 0 {
            return Err(ViewerError::malformed(
                model_name,
                format!("Invalid data length: {}", points.len()),
            ));
        }
        if points.is_empty() {
            return Err(ViewerError::EmptyDataset(model_name));
        }
        if let Some(colors) = &colors {
            if colors.len() != points.len() {
                return Err(ViewerError::malformed(
                    model_name,
                    format!(
                        "Invalid color length: {} (expected {})",
                        colors.len(),
                        points.len()
                    ),
                ));
            }
        }

        let count = points.len() / 3;
        if let Some(reported) = num_points {
            if reported != count {
                log::warn!(
                    "model '{model_name}' reports {reported} points but carries {count}; using {count}"
                );
            }
        }

        Ok(Self {
            model_name,
            points: to_triples(&points),
            colors: colors.as_deref().map(to_triples),
        })
    }

    /// Builds a dataset from already-structured points.
    ///
    /// The same invariants as [`PointCloudDataset::from_raw`] apply.
    pub fn new(
        model_name: impl Into<String>,
        points: Vec<Vec3>,
        colors: Option<Vec<Vec3>>,
    ) -> Result<Self> {
        let model_name = model_name.into();
        if points.is_empty() {
            return Err(ViewerError::EmptyDataset(model_name));
        }
        if let Some(colors) = &colors {
            if colors.len() != points.len() {
                return Err(ViewerError::malformed(
                    model_name,
                    format!(
                        "Invalid color length: {} (expected {})",
                        colors.len() * 3,
                        points.len() * 3
                    ),
                ));
            }
        }
        Ok(Self {
            model_name,
            points,
            colors,
        })
    }

    /// Returns the model name.
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the points.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Returns the per-point colors, if the producer supplied any.
    #[must_use]
    pub fn colors(&self) -> Option<&[Vec3]> {
        self.colors.as_deref()
    }

    /// Returns the number of points.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of color triples (0 when colors are absent).
    #[must_use]
    pub fn color_count(&self) -> usize {
        self.colors.as_ref().map_or(0, Vec::len)
    }

    /// Returns the axis-aligned bounding box of the points.
    #[must_use]
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        bounding_box(&self.points)
    }
}

/// Computes the axis-aligned bounding box of a point set.
///
/// Returns `(Vec3::ZERO, Vec3::ZERO)` for an empty slice.
#[must_use]
pub fn bounding_box(points: &[Vec3]) -> (Vec3, Vec3) {
    if points.is_empty() {
        return (Vec3::ZERO, Vec3::ZERO);
    }
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for p in points {
        min = min.min(*p);
        max = max.max(*p);
    }
    (min, max)
}

fn to_triples(flat: &[f32]) -> Vec<Vec3> {
    flat.chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect()
}

/// Response envelope used by the reconstruction service.
#[derive(Debug, Clone, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    data: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    error: Option<String>,
}

/// Result of decoding a payload: entries that decoded, plus per-model errors.
#[derive(Debug, Default)]
pub struct DecodedPayload {
    /// Entries that decoded, ordered by model name.
    pub entries: Vec<(String, RawDataset)>,
    /// Models whose entries could not be decoded.
    pub errors: BTreeMap<String, ViewerError>,
}

/// Checks whether `object` is the service envelope rather than a bare mapping.
///
/// A model may be named `data` or `success`, so key names alone are not
/// enough: the envelope has a boolean `success`, or a `data` object whose
/// values are all model entries.
fn is_envelope(object: &serde_json::Map<String, serde_json::Value>) -> bool {
    if object.get("success").is_some_and(serde_json::Value::is_boolean) {
        return true;
    }
    match object.get("data") {
        Some(serde_json::Value::Object(data)) => data.values().all(serde_json::Value::is_object),
        _ => false,
    }
}

/// Decodes a reconstruction payload.
///
/// Accepts either a bare `{ model: entry }` mapping or the service envelope
/// `{ "success": bool, "data": { model: entry }, "error": str }`. An envelope
/// with `success: false` becomes [`ViewerError::Payload`]. Entries that fail to
/// decode (non-numeric values, missing arrays) are reported per model.
pub fn decode_payload(json: &str) -> Result<DecodedPayload> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Object(object) = value else {
        return Err(ViewerError::Payload(
            "payload is not a JSON object".to_string(),
        ));
    };

    let models = if is_envelope(&object) {
        let envelope: Envelope = serde_json::from_value(serde_json::Value::Object(object))?;
        if envelope.success == Some(false) {
            return Err(ViewerError::Payload(
                envelope
                    .error
                    .unwrap_or_else(|| "Reconstruction failed!".to_string()),
            ));
        }
        envelope.data.unwrap_or_default()
    } else {
        object
    };

    let mut decoded = DecodedPayload::default();
    for (name, value) in models {
        match serde_json::from_value::<RawDataset>(value) {
            Ok(raw) => decoded.entries.push((name, raw)),
            Err(e) => {
                log::warn!("model '{name}' could not be decoded: {e}");
                let reason = format!("Invalid data: {e}");
                decoded
                    .errors
                    .insert(name.clone(), ViewerError::malformed(name, reason));
            }
        }
    }
    Ok(decoded)
}
