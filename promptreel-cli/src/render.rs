use anyhow::Context;
use promptreel_core::types::MediaArtifact;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes finished videos into the output directory. Output names follow
/// `video-NN.<ext>`, and a new generation removes what the previous one
/// wrote before its own files land.
pub struct RenderTarget {
    dir: PathBuf,
}

impl RenderTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Removes outputs left by a previous generation. Files that do not
    /// match the output naming are left alone.
    pub fn clear_previous(&self) -> anyhow::Result<()> {
        if !self.dir.exists() {
            return Ok(());
        }
        for entry in fs::read_dir(&self.dir).context("read output directory")? {
            let entry = entry.context("read output directory entry")?;
            let path = entry.path();
            if path.is_file() && is_generated_name(&entry.file_name().to_string_lossy()) {
                fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
            }
        }
        Ok(())
    }

    /// Writes the artifacts in order and returns the paths, ready to play.
    pub fn render(&self, artifacts: &[MediaArtifact]) -> anyhow::Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir).context("create output directory")?;
        let mut written = Vec::with_capacity(artifacts.len());
        for (index, artifact) in artifacts.iter().enumerate() {
            let name = format!(
                "video-{:02}.{}",
                index + 1,
                extension_for_mime(&artifact.mime_type)
            );
            let path = self.dir.join(name);
            fs::write(&path, &artifact.bytes)
                .with_context(|| format!("write {}", path.display()))?;
            written.push(path);
        }
        Ok(written)
    }
}

fn is_generated_name(name: &str) -> bool {
    let Some(stem) = name.strip_prefix("video-") else {
        return false;
    };
    let Some((digits, _ext)) = stem.split_once('.') else {
        return false;
    };
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime.split(';').next().unwrap_or("").trim() {
        "video/webm" => "webm",
        "video/quicktime" => "mov",
        _ => "mp4",
    }
}

pub fn mime_for_image(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(byte: u8) -> MediaArtifact {
        MediaArtifact {
            bytes: vec![byte; 4],
            mime_type: "video/mp4".into(),
        }
    }

    #[test]
    fn renders_artifacts_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let target = RenderTarget::new(dir.path());

        let paths = target.render(&[artifact(1), artifact(2)]).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("video-01.mp4"));
        assert!(paths[1].ends_with("video-02.mp4"));
        assert_eq!(fs::read(&paths[0]).unwrap(), vec![1; 4]);
        assert_eq!(fs::read(&paths[1]).unwrap(), vec![2; 4]);
    }

    #[test]
    fn new_generation_replaces_the_previous_one() {
        let dir = tempfile::tempdir().unwrap();
        let target = RenderTarget::new(dir.path());

        target.render(&[artifact(1), artifact(2)]).unwrap();
        fs::write(dir.path().join("notes.txt"), b"keep me").unwrap();

        target.clear_previous().unwrap();
        let paths = target.render(&[artifact(9)]).unwrap();

        assert_eq!(paths.len(), 1);
        assert!(dir.path().join("video-01.mp4").exists());
        assert!(!dir.path().join("video-02.mp4").exists());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn clearing_a_missing_directory_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let target = RenderTarget::new(dir.path().join("never-created"));
        target.clear_previous().unwrap();
    }

    #[test]
    fn mime_helpers_cover_the_common_cases() {
        assert_eq!(extension_for_mime("video/mp4"), "mp4");
        assert_eq!(extension_for_mime("video/webm;codecs=vp9"), "webm");
        assert_eq!(extension_for_mime("application/octet-stream"), "mp4");

        assert_eq!(mime_for_image(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_for_image(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_for_image(Path::new("no-extension")), "image/png");
    }
}
