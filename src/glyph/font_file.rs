use super::features::glyph_to_vector;
use super::FeatureVector;
use crate::error::GlyphError;
use crate::library::storage::FontVectors;
use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio::fs;
use ttf_parser::Face;

#[derive(Clone, Debug, PartialEq)]
pub struct FontFile {
    pub file_name: String,
    pub path: PathBuf,
}

impl Display for FontFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FontFile {{ file_name: {}, path: {} }}",
            self.file_name,
            self.path.display()
        )
    }
}

/// Recognizes `.ttf` and `.otf` files, ignoring case.
pub fn match_file(path: PathBuf) -> Option<FontFile> {
    let lower = path.file_name()?.to_string_lossy().to_lowercase();
    if lower.ends_with(".ttf") || lower.ends_with(".otf") {
        Some(FontFile::new(path))
    } else {
        None
    }
}

impl FontFile {
    pub fn new(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self { file_name, path }
    }

    /// Vectorizes every character, keeping an explicit absence for the ones
    /// that fail. Blocking: reads and parses the whole font file.
    pub fn vectorize(&self, chars: &[char]) -> Result<FontVectors> {
        let vectors = self
            .glyph_vectors(chars)?
            .into_iter()
            .map(|(ch, vector)| match vector {
                Ok(vector) => (ch, Some(vector)),
                Err(e) => {
                    warn!(
                        "could not vectorize '{}' (U+{:04X}) in {}: {}",
                        ch, ch as u32, self.file_name, e
                    );
                    (ch, None)
                }
            })
            .collect();
        Ok(vectors)
    }

    /// Like [`FontFile::vectorize`] but drops absent characters, for the
    /// comparison target. A font that cannot be read or parsed leaves every
    /// character absent.
    pub fn vectorize_present(&self, chars: &[char]) -> BTreeMap<char, FeatureVector> {
        let glyph_vectors = match self.glyph_vectors(chars) {
            Ok(glyph_vectors) => glyph_vectors,
            Err(e) => {
                for &ch in chars {
                    warn!(
                        "could not vectorize '{}' (U+{:04X}) in {}: {}",
                        ch, ch as u32, self.file_name, e
                    );
                }
                return BTreeMap::new();
            }
        };
        glyph_vectors
            .into_iter()
            .filter_map(|(ch, vector)| match vector {
                Ok(vector) => Some((ch, vector)),
                Err(e) => {
                    debug!(
                        "target {} skips '{}' (U+{:04X}): {}",
                        self.file_name, ch, ch as u32, e
                    );
                    None
                }
            })
            .collect()
    }

    fn glyph_vectors(
        &self,
        chars: &[char],
    ) -> Result<Vec<(char, Result<FeatureVector, GlyphError>)>> {
        let data = std::fs::read(&self.path)?;
        let face = Face::parse(&data, 0).map_err(GlyphError::from)?;
        Ok(chars
            .iter()
            .map(|&ch| (ch, glyph_to_vector(&face, ch)))
            .collect())
    }
}

/// Lists the font files directly inside `dir`, sorted by file name.
pub async fn read_font_files(dir: &Path) -> Result<Vec<FontFile>> {
    let mut font_files = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            if let Some(font_file) = match_file(entry.path()) {
                font_files.push(font_file);
            }
        }
    }
    font_files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(font_files)
}
