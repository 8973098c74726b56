//! In-memory plane metadata store

use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::core::MetadataProvider;
use crate::domain::{ImageId, ImagePlaneModule};

/// [`MetadataProvider`] backed by a map from image id to plane record
#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    planes: HashMap<ImageId, ImagePlaneModule>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object mapping image ids to plane records
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, ImagePlaneModule> =
            serde_json::from_str(json).context("Invalid image plane metadata")?;
        Ok(Self {
            planes: raw
                .into_iter()
                .map(|(id, module)| (ImageId::from(id), module))
                .collect(),
        })
    }

    /// Insert or replace the record for `image_id`
    pub fn insert(&mut self, image_id: impl Into<ImageId>, module: ImagePlaneModule) {
        self.planes.insert(image_id.into(), module);
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }
}

impl MetadataProvider for MetadataStore {
    fn image_plane_module(&self, image_id: &ImageId) -> Option<ImagePlaneModule> {
        self.planes.get(image_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Vector3;

    #[test]
    fn test_from_json() {
        let store = MetadataStore::from_json(
            r#"{
                "wadouri:ct/1": {
                    "imagePositionPatient": [0, 0, -12.5],
                    "rowCosines": [1, 0, 0],
                    "columnCosines": [0, 1, 0],
                    "rowPixelSpacing": 0.7,
                    "columnPixelSpacing": 0.7
                },
                "wadouri:ct/2": { "rowPixelSpacing": 0.7 }
            }"#,
        )
        .unwrap();
        assert_eq!(store.len(), 2);

        let plane = store.image_plane(&ImageId::from("wadouri:ct/1")).unwrap();
        assert_eq!(plane.image_position_patient, Vector3::new(0.0, 0.0, -12.5));
        assert!(store.image_plane_module(&ImageId::from("wadouri:ct/2")).is_some());
        assert!(store.image_plane(&ImageId::from("wadouri:ct/2")).is_none());
        assert!(store.image_plane(&ImageId::from("wadouri:ct/3")).is_none());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = MetadataStore::from_json("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("Invalid image plane metadata"));
    }
}
