// SPDX-License-Identifier: GPL-3.0-only

//! Storage utilities for saving captured photos and videos

use crate::backends::camera::{MediaDescriptor, MediaKind};
use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Folder name used under the user's pictures/videos directories
const LIBRARY_FOLDER: &str = "shutter";

/// Photo library collaborator
pub trait MediaLibrary: Send {
    /// Persist `media` into the library, returning where it ended up
    fn save(&mut self, media: &MediaDescriptor) -> AppResult<PathBuf>;
}

/// Library backed by plain directories
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    photo_dir: PathBuf,
    video_dir: PathBuf,
}

impl DirectoryLibrary {
    pub fn new(photo_dir: impl Into<PathBuf>, video_dir: impl Into<PathBuf>) -> Self {
        Self {
            photo_dir: photo_dir.into(),
            video_dir: video_dir.into(),
        }
    }

    /// `~/Pictures/shutter` and `~/Videos/shutter`, falling back to the home directory
    pub fn user_default() -> Self {
        Self::new(get_photo_directory(), get_video_directory())
    }

    fn directory_for(&self, kind: MediaKind) -> &Path {
        match kind {
            MediaKind::Photo => &self.photo_dir,
            MediaKind::Video => &self.video_dir,
        }
    }
}

impl MediaLibrary for DirectoryLibrary {
    fn save(&mut self, media: &MediaDescriptor) -> AppResult<PathBuf> {
        if !media.path.is_file() {
            return Err(AppError::Storage(format!(
                "{} not found: {}",
                media.kind,
                media.path.display()
            )));
        }

        let dir = self.directory_for(media.kind);
        std::fs::create_dir_all(dir)?;

        let target = unique_path(dir, &library_filename(media));
        debug!(from = %media.path.display(), to = %target.display(), "Copying media into library");
        std::fs::copy(&media.path, &target)?;

        info!(path = %target.display(), kind = %media.kind, "Media saved to library");
        Ok(target)
    }
}

/// `photo_YYYYMMDD_HHMMSS.jpg` / `video_YYYYMMDD_HHMMSS.mp4`
pub fn library_filename(media: &MediaDescriptor) -> String {
    let extension = media
        .path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or(media.kind.extension());
    format!(
        "{}_{}.{}",
        media.kind,
        media.captured_at.format("%Y%m%d_%H%M%S"),
        extension
    )
}

/// Append `_1`, `_2`, ... until the name is free
fn unique_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{}", ext)),
        None => (filename, String::new()),
    };
    (1..)
        .map(|n| dir.join(format!("{}_{}{}", stem, n, extension)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

/// Default photo directory
pub fn get_photo_directory() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join(LIBRARY_FOLDER)
}

/// Default video directory
pub fn get_video_directory() -> PathBuf {
    dirs::video_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join(LIBRARY_FOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shutter-storage-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn photo_at(path: PathBuf) -> MediaDescriptor {
        MediaDescriptor {
            path,
            kind: MediaKind::Photo,
            captured_at: Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
            width: 100,
            height: 100,
            duration_secs: None,
        }
    }

    #[test]
    fn test_library_filename() {
        let media = photo_at(PathBuf::from("/tmp/capture.jpeg"));
        assert_eq!(library_filename(&media), "photo_20240309_140507.jpeg");
    }

    #[test]
    fn test_save_copies_and_avoids_collisions() {
        let dir = scratch_dir("save");
        let source = dir.join("source.jpg");
        std::fs::write(&source, b"jpeg").unwrap();

        let mut library = DirectoryLibrary::new(dir.join("photos"), dir.join("videos"));
        let media = photo_at(source);
        let first = library.save(&media).unwrap();
        let second = library.save(&media).unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with(dir.join("photos")));
        assert_eq!(std::fs::read(&second).unwrap(), b"jpeg");
    }

    #[test]
    fn test_save_missing_source_fails() {
        let dir = scratch_dir("missing");
        let mut library = DirectoryLibrary::new(dir.join("photos"), dir.join("videos"));
        let err = library.save(&photo_at(dir.join("nope.jpg"))).unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
