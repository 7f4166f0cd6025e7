// src/dataset/mod.rs
//! Index-addressable (image, label) views over an acquired corpus.

mod cards;
mod table;
pub mod transforms;

pub use cards::CardDataset;
pub use table::TableDataset;

use std::path::Path;

use image::{ImageReader, RgbImage};

use crate::error::{Result, ScrapeError};

/// Applied to every decoded image before it is handed out.
pub type Transform = Box<dyn Fn(RgbImage) -> RgbImage + Send + Sync>;

pub trait Dataset {
    type Item;

    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Result<Self::Item>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode as RGB8 and run the optional transform.
pub(crate) fn load_rgb(path: &Path, transform: Option<&Transform>) -> Result<RgbImage> {
    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| ScrapeError::Validation { path: path.to_path_buf(), reason: e.to_string() })?
        .to_rgb8();
    Ok(match transform {
        Some(t) => t(img),
        None => img,
    })
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(ScrapeError::IndexOutOfRange { index, len });
    }
    Ok(())
}
