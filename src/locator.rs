//! Best-matching slice selection by plane distance

use crate::core::MetadataProvider;
use crate::domain::{ImageId, ImagePlane, Stack, Vector3};

/// Slice chosen by [`SliceLocator::locate`]
#[derive(Clone, Debug, PartialEq)]
pub struct LocatedSlice {
    /// Position within the stack
    pub index: usize,
    pub image_id: ImageId,
    pub plane: ImagePlane,
    /// Perpendicular distance from the target point to the slice's plane
    pub distance: f64,
}

/// Finds the slice of a stack closest to a patient-space point
pub struct SliceLocator<'a> {
    metadata: &'a dyn MetadataProvider,
}

impl<'a> SliceLocator<'a> {
    pub fn new(metadata: &'a dyn MetadataProvider) -> Self {
        Self { metadata }
    }

    /// Scan `stack` in order and return the slice whose plane is nearest to
    /// `patient_point`
    ///
    /// Slices without plane metadata are skipped. On equal distances the
    /// earlier slice is kept. Returns `None` when no slice has usable
    /// metadata.
    pub fn locate(&self, patient_point: &Vector3, stack: &Stack) -> Option<LocatedSlice> {
        let mut min_distance = f64::MAX;
        let mut best = None;

        for (index, image_id) in stack.image_ids.iter().enumerate() {
            let Some(plane) = self.metadata.image_plane(image_id) else {
                log::trace!("Skipping {image_id}: no usable plane metadata");
                continue;
            };

            let distance = plane.distance_to(patient_point);
            if distance < min_distance {
                min_distance = distance;
                best = Some((index, plane));
            }
        }

        best.map(|(index, plane)| LocatedSlice {
            index,
            image_id: stack.image_ids[index].clone(),
            plane,
            distance: min_distance,
        })
    }
}
