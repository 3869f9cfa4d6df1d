use crate::error::{BgError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// Accepted picture suffixes, compared case-insensitively
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[must_use]
pub fn is_supported(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| lower.len() > ext.len() + 1 && lower.ends_with(&format!(".{ext}")))
}

/// Supported pictures directly inside `dir`, sorted by file name
pub fn list_pictures(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        BgError::Other(format!("failed to read directory '{}': {e}", dir.display()))
    })?;

    let mut pictures: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| is_supported(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        // metadata() follows symlinks, so linked pictures count too
        .filter(|path| fs::metadata(path).map(|m| m.is_file()).unwrap_or(false))
        .collect();

    pictures.sort();
    Ok(pictures)
}

/// Pick one supported picture from `dir` uniformly at random
///
/// # Errors
/// - Returns error if the directory cannot be read
/// - Returns `NoPictures` if it holds no supported files
pub fn random_picture<R: Rng + ?Sized>(dir: &Path, rng: &mut R) -> Result<PathBuf> {
    let mut pictures = list_pictures(dir)?;
    if pictures.is_empty() {
        return Err(BgError::NoPictures(dir.to_path_buf()));
    }

    pictures.shuffle(rng);
    Ok(pictures.swap_remove(0))
}
