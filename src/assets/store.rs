use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::decode::decode_image,
    foundation::core::RasterImage,
    foundation::error::{GaugeError, GaugeResult},
    render::layout::FaceLayout,
};

/// On-disk description of a face: where its four images live, plus layout overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaceManifest {
    /// Gauge face with a transparent window over the digit wheels.
    pub background: String,
    /// Needle image, drawn rotated about the viewport centre.
    pub needle: String,
    /// Vertical strip of light digits.
    pub digits_light: String,
    /// Vertical strip of dark digits.
    pub digits_dark: String,
    #[serde(default)]
    pub layout: FaceLayout,
}

impl FaceManifest {
    /// Read a manifest from a JSON file.
    pub fn from_json_file(path: &Path) -> GaugeResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read manifest '{}'", path.display()))?;
        Self::from_json_slice(&bytes)
    }

    pub fn from_json_slice(bytes: &[u8]) -> GaugeResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| GaugeError::serde(format!("face manifest: {e}")))
    }
}

/// The four images a face needs, decoded once and shared for the whole session.
#[derive(Clone, Debug)]
pub struct FaceAssets {
    pub background: RasterImage,
    pub needle: RasterImage,
    pub digits_light: RasterImage,
    pub digits_dark: RasterImage,
}

impl FaceAssets {
    pub fn from_images(
        background: RasterImage,
        needle: RasterImage,
        digits_light: RasterImage,
        digits_dark: RasterImage,
    ) -> Self {
        Self {
            background,
            needle,
            digits_light,
            digits_dark,
        }
    }

    /// Load every asset named by `manifest`, resolving paths against `root`.
    ///
    /// A face cannot draw anything useful without all four images, so the first
    /// unreadable one aborts loading.
    pub fn load(manifest: &FaceManifest, root: impl AsRef<Path>) -> GaugeResult<Self> {
        let root = root.as_ref();
        Ok(Self {
            background: load_named(root, "background", &manifest.background)?,
            needle: load_named(root, "needle", &manifest.needle)?,
            digits_light: load_named(root, "digits_light", &manifest.digits_light)?,
            digits_dark: load_named(root, "digits_dark", &manifest.digits_dark)?,
        })
    }
}

fn load_named(root: &Path, name: &str, source: &str) -> GaugeResult<RasterImage> {
    let rel = normalize_rel_path(source)?;
    let path: PathBuf = root.join(Path::new(&rel));
    let bytes = std::fs::read(&path)
        .map_err(|e| GaugeError::missing_asset(name, format!("read '{}': {e}", path.display())))?;
    let image = decode_image(&bytes)
        .map_err(|e| GaugeError::missing_asset(name, format!("decode '{}': {e}", path.display())))?;
    tracing::debug!(name, path = %path.display(), width = image.width, height = image.height, "loaded face asset");
    Ok(image)
}

/// Normalize a manifest-relative asset path to forward slashes without `.` segments.
pub fn normalize_rel_path(source: &str) -> GaugeResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(GaugeError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(GaugeError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(GaugeError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(GaugeError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
