// src/dataset/table.rs
use image::RgbImage;

use super::{check_index, load_rgb, Dataset, Transform};
use crate::{
    error::{Result, ScrapeError},
    manifest::EncodedTable,
};

/// Dataset over a table that already carries numeric labels, typically
/// loaded from disk long after the images were scraped.
pub struct TableDataset<'a> {
    table: &'a EncodedTable,
    transform: Option<Transform>,
}

impl<'a> TableDataset<'a> {
    pub fn new(table: &'a EncodedTable) -> Self {
        Self { table, transform: None }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}

impl Dataset for TableDataset<'_> {
    type Item = (RgbImage, usize);

    fn len(&self) -> usize {
        self.table.len()
    }

    /// Fails with `MissingFile` when the row's image is gone from disk.
    fn get(&self, index: usize) -> Result<Self::Item> {
        check_index(index, self.len())?;
        let row = &self.table.rows[index];
        let path = &row.entry.image_path;
        if !path.is_file() {
            return Err(ScrapeError::MissingFile(path.clone()));
        }
        let img = load_rgb(path, self.transform.as_ref())?;
        Ok((img, row.label))
    }
}
