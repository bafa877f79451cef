use std::path::{Path, PathBuf};

use log::warn;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "webp"];

/// Expand glob patterns into image files, in pattern order, without duplicates.
pub fn find_files(patterns: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        let entries = match glob::glob(pattern) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Bad pattern {}: {}", pattern, err);
                continue;
            }
        };
        for path in entries.filter_map(Result::ok) {
            if is_image(&path) && !files.contains(&path) {
                files.push(path);
            }
        }
    }
    files
}

pub fn is_image(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// `<output_dir>/<stem>_holes.png`
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    output_dir.join(format!("{}_holes.png", stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_only_images_once() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.JPG", "notes.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let all = format!("{}/*", dir.path().display());
        let png = format!("{}/*.png", dir.path().display());

        let files = find_files(&[png, all]);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.JPG"]);
    }

    #[test]
    fn output_name_uses_stem() {
        let out = output_path(Path::new("out"), Path::new("photos/target.jpg"));
        assert_eq!(out, Path::new("out").join("target_holes.png"));
    }
}
