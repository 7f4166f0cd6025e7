// src/dataset/cards.rs
use image::RgbImage;

use super::{check_index, load_rgb, Dataset, Transform};
use crate::{
    error::{Result, ScrapeError},
    manifest::{CategoryIndexMap, Manifest},
};

/// Dataset over a freshly built manifest; labels are looked up in the
/// category map on every `get`.
pub struct CardDataset<'a> {
    manifest: &'a Manifest,
    classes: &'a CategoryIndexMap,
    transform: Option<Transform>,
}

impl<'a> CardDataset<'a> {
    pub fn new(manifest: &'a Manifest, classes: &'a CategoryIndexMap) -> Self {
        Self { manifest, classes, transform: None }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}

impl Dataset for CardDataset<'_> {
    type Item = (RgbImage, usize);

    fn len(&self) -> usize {
        self.manifest.len()
    }

    fn get(&self, index: usize) -> Result<Self::Item> {
        check_index(index, self.len())?;
        let entry = &self.manifest.entries()[index];
        let label = self
            .classes
            .index_of(&entry.category)
            .ok_or_else(|| ScrapeError::UnknownCategory(entry.category.clone()))?;
        let img = load_rgb(&entry.image_path, self.transform.as_ref())?;
        Ok((img, label))
    }
}
