//! Output file naming.
//!
//! Generated files never replace existing ones: when `<stem>.png` exists the
//! next free `<stem>_v2.png`, `<stem>_v3.png`, ... is used instead.

use std::path::{Path, PathBuf};

/// First non-existing path among `<stem><ext>`, `<stem>_v2<ext>`, ...
///
/// `ext` includes the leading dot, or is empty for directories.
pub fn versioned_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let first = dir.join(format!("{}{}", stem, ext));
    if !first.exists() {
        return first;
    }
    (2u32..)
        .map(|n| dir.join(format!("{}_v{}{}", stem, n, ext)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// File name of frame `index` inside a sequence directory.
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{:04}.png", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_path_skips_existing() {
        let dir = tempfile::tempdir().unwrap();
        let first = versioned_path(dir.path(), "clouds", ".png");
        assert_eq!(first, dir.path().join("clouds.png"));

        std::fs::write(&first, b"x").unwrap();
        let second = versioned_path(dir.path(), "clouds", ".png");
        assert_eq!(second, dir.path().join("clouds_v2.png"));

        std::fs::write(&second, b"x").unwrap();
        assert_eq!(
            versioned_path(dir.path(), "clouds", ".png"),
            dir.path().join("clouds_v3.png")
        );
    }

    #[test]
    fn test_versioned_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("fire_frames")).unwrap();
        assert_eq!(
            versioned_path(dir.path(), "fire_frames", ""),
            dir.path().join("fire_frames_v2")
        );
    }

    #[test]
    fn test_frame_file_name() {
        assert_eq!(frame_file_name(0), "frame_0000.png");
        assert_eq!(frame_file_name(123), "frame_0123.png");
    }
}
