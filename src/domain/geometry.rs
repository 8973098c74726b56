//! Patient-space vector math and tagged 2D coordinates
//!
//! Patient space is the 3D frame every slice of a volume is registered
//! against. Image space is the continuous (column, row) pixel grid of one
//! slice. Canvas space is the drawing surface of a view.

use serde::{Deserialize, Serialize};

use super::plane::ImagePlane;

/// Patient-space coordinate or direction
pub type Vector3 = nalgebra::Vector3<f64>;

/// Continuous coordinate on a slice's pixel grid (x = column, y = row)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagePoint {
    pub x: f64,
    pub y: f64,
}

impl ImagePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Nearest pixel index, rounding halves up
    pub fn rounded(self) -> (i64, i64) {
        ((self.x + 0.5).floor() as i64, (self.y + 0.5).floor() as i64)
    }
}

/// Position on a view's drawing surface, in canvas pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Plane normal as `column x row`
///
/// Every distance comparison in the crate goes through this function so
/// the sign convention stays consistent.
#[inline]
pub fn normal(row_cosines: &Vector3, column_cosines: &Vector3) -> Vector3 {
    column_cosines.cross(row_cosines)
}

/// Perpendicular distance from `point` to the plane through `plane_origin`
///
/// NaN components propagate to the result.
#[inline]
pub fn plane_distance(normal: &Vector3, plane_origin: &Vector3, point: &Vector3) -> f64 {
    (normal.dot(plane_origin) - normal.dot(point)).abs()
}

/// Map a point on a slice to patient space
pub fn image_point_to_patient_point(image_point: ImagePoint, plane: &ImagePlane) -> Vector3 {
    let along_row = plane.row_cosines * (image_point.x * plane.column_pixel_spacing);
    let along_column = plane.column_cosines * (image_point.y * plane.row_pixel_spacing);
    plane.image_position_patient + along_row + along_column
}

/// Project a patient-space point onto a slice
///
/// The result is not clipped to the slice's extent.
pub fn project_patient_point_to_image_plane(patient_point: &Vector3, plane: &ImagePlane) -> ImagePoint {
    let offset = patient_point - plane.image_position_patient;
    ImagePoint {
        x: plane.row_cosines.dot(&offset) / plane.column_pixel_spacing,
        y: plane.column_cosines.dot(&offset) / plane.row_pixel_spacing,
    }
}
