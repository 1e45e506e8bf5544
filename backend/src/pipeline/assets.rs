//! Loading of template files and letterhead images from disk.

use crate::error::{Result, TermoError};
use crate::pipeline::compose::{Cm, PaginationStrategy, A4_WIDTH};
use crate::pipeline::embed::{embed, InlineAsset};
use image::ImageReader;
use log::warn;
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

/// Reads named files below a fixed root directory.
///
/// Names are bare file names: anything with a directory component (`..`,
/// separators, absolute paths) is refused as not found, since it cannot name
/// a file directly inside the root.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(path),
            _ => Err(TermoError::AssetNotFound { path }),
        }
    }

    pub fn load_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name)?;
        std::fs::read(&path).map_err(|e| {
            warn!("Failed to read {}: {}", path.display(), e);
            TermoError::AssetNotFound { path }
        })
    }

    pub fn load_text(&self, name: &str) -> Result<String> {
        let bytes = self.load_bytes(name)?;
        String::from_utf8(bytes).map_err(|_| {
            let path = self.root.join(name);
            warn!("{} is not valid UTF-8", path.display());
            TermoError::AssetNotFound { path }
        })
    }
}

/// One letterhead image, embedded once and reused by every request.
#[derive(Debug, Clone)]
pub struct LetterheadImage {
    inline: InlineAsset,
    dimensions: Option<(u32, u32)>,
}

impl LetterheadImage {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let media_type = image::guess_format(bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or("image/png");
        let dimensions = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok());
        Self {
            inline: embed(bytes, media_type),
            dimensions,
        }
    }

    pub fn inline(&self) -> &InlineAsset {
        &self.inline
    }

    /// Height the image occupies when stretched to `width`, keeping its
    /// aspect ratio. `None` when the image could not be decoded.
    pub fn height_at(&self, width: Cm) -> Option<Cm> {
        let (w, h) = self.dimensions?;
        if w == 0 {
            return None;
        }
        Some(Cm(width.0 * f64::from(h) / f64::from(w)))
    }
}

/// Header and footer imagery applied to every generated document.
#[derive(Debug, Clone)]
pub struct Letterhead {
    pub header: LetterheadImage,
    pub footer: LetterheadImage,
}

impl Letterhead {
    pub fn load(loader: &AssetLoader, header: &str, footer: &str) -> Result<Self> {
        Ok(Self {
            header: LetterheadImage::from_bytes(&loader.load_bytes(header)?),
            footer: LetterheadImage::from_bytes(&loader.load_bytes(footer)?),
        })
    }

    /// Describes every band too short for its image under `strategy`.
    ///
    /// Only native bands are checked: the table-flow layout stretches the
    /// image to the band height, so it can never spill over the body.
    pub fn band_warnings(&self, strategy: &PaginationStrategy) -> Vec<String> {
        let PaginationStrategy::NativeBands { margins } = strategy else {
            return Vec::new();
        };
        let mut warnings = Vec::new();
        for (band, image, reserved) in [
            ("header", &self.header, margins.top),
            ("footer", &self.footer, margins.bottom),
        ] {
            if let Some(needed) = image.height_at(A4_WIDTH) {
                if needed.0 > reserved.0 {
                    warnings.push(format!(
                        "{} image needs {:.2}cm at full page width but only {} is reserved",
                        band, needed.0, reserved
                    ));
                }
            }
        }
        warnings
    }
}
