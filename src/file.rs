// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::consts::IMAGE_EXT;

/// `<root>/<category>/<id>.jpg`
///
/// The directory is the race key the caller asked for, not the label the
/// source returns on the card.
pub fn card_image_path(root: &Path, category: &str, id: u64) -> PathBuf {
    root.join(category_dir_name(category)).join(format!("{id}.{IMAGE_EXT}"))
}

/// Race keys are used as directory names verbatim ("Sea Serpent" stays
/// "Sea Serpent"); only path separators and parent hops are neutralised.
pub fn category_dir_name(category: &str) -> String {
    let out: String = category
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let out = out.trim();
    if out.is_empty() || out == "." || out == ".." {
        "_".into()
    } else {
        out.to_string()
    }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", dir.display()),
        ));
    }
    fs::create_dir_all(dir)
}

pub fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

/// Remove `path` if it is there. A file that is already gone is fine.
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Create/truncate `path` and hand a buffered writer to `body`.
pub fn write_with<F>(path: &Path, body: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?); // truncate/overwrite
    body(&mut out)?;
    out.flush()
}
