//! Per-slice plane metadata
//!
//! [`ImagePlaneModule`] is the raw record a metadata service publishes for a
//! slice; any field may be missing. [`ImagePlane`] is the validated form the
//! geometry code works with.

use serde::{Deserialize, Serialize};

use super::geometry::{self, Vector3};

/// Raw plane metadata for one slice
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImagePlaneModule {
    /// Patient-space position of the centre of the first transmitted pixel
    pub image_position_patient: Option<[f64; 3]>,
    /// Direction cosines of the first row
    pub row_cosines: Option<[f64; 3]>,
    /// Direction cosines of the first column
    pub column_cosines: Option<[f64; 3]>,
    /// Physical distance between adjacent rows (mm)
    pub row_pixel_spacing: Option<f64>,
    /// Physical distance between adjacent columns (mm)
    pub column_pixel_spacing: Option<f64>,
}

impl ImagePlaneModule {
    /// Validate into an [`ImagePlane`]
    ///
    /// Returns `None` when the position or either orientation vector is
    /// missing. Missing pixel spacing defaults to 1.0.
    pub fn to_plane(&self) -> Option<ImagePlane> {
        Some(ImagePlane {
            image_position_patient: Vector3::from(self.image_position_patient?),
            row_cosines: Vector3::from(self.row_cosines?),
            column_cosines: Vector3::from(self.column_cosines?),
            row_pixel_spacing: self.row_pixel_spacing.unwrap_or(1.0),
            column_pixel_spacing: self.column_pixel_spacing.unwrap_or(1.0),
        })
    }
}

impl From<&ImagePlane> for ImagePlaneModule {
    fn from(plane: &ImagePlane) -> Self {
        Self {
            image_position_patient: Some(components(&plane.image_position_patient)),
            row_cosines: Some(components(&plane.row_cosines)),
            column_cosines: Some(components(&plane.column_cosines)),
            row_pixel_spacing: Some(plane.row_pixel_spacing),
            column_pixel_spacing: Some(plane.column_pixel_spacing),
        }
    }
}

fn components(v: &Vector3) -> [f64; 3] {
    [v.x, v.y, v.z]
}

/// Placement of a slice within patient space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImagePlane {
    pub image_position_patient: Vector3,
    pub row_cosines: Vector3,
    pub column_cosines: Vector3,
    pub row_pixel_spacing: f64,
    pub column_pixel_spacing: f64,
}

impl ImagePlane {
    pub fn new(
        image_position_patient: Vector3,
        row_cosines: Vector3,
        column_cosines: Vector3,
        row_pixel_spacing: f64,
        column_pixel_spacing: f64,
    ) -> Self {
        Self {
            image_position_patient,
            row_cosines,
            column_cosines,
            row_pixel_spacing,
            column_pixel_spacing,
        }
    }

    /// Plane normal, see [`geometry::normal`]
    pub fn normal(&self) -> Vector3 {
        geometry::normal(&self.row_cosines, &self.column_cosines)
    }

    /// Perpendicular distance from `point` to this plane
    pub fn distance_to(&self, point: &Vector3) -> f64 {
        geometry::plane_distance(&self.normal(), &self.image_position_patient, point)
    }
}
