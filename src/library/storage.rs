// storage document layout, pretty-printed JSON:
//
// {
//     "<font file name>": {
//         "<character>": [length, angle, length, angle, ...],
//         "<character>": null
//     }
// }
//
// null (or a missing key) marks a character the font could not vectorize.
// Floats round-trip exactly.

use crate::error::StoreError;
use crate::glyph::FeatureVector;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

pub type FontVectors = BTreeMap<char, Option<FeatureVector>>;

/// Font name -> character -> feature vector or explicit absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VectorStore {
    fonts: BTreeMap<String, FontVectors>,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_font(&mut self, font_name: String, vectors: FontVectors) {
        self.fonts.insert(font_name, vectors);
    }

    pub fn get(&self, font_name: &str, ch: char) -> Option<&FeatureVector> {
        self.fonts.get(font_name)?.get(&ch)?.as_ref()
    }

    /// Font names in the store's fixed (sorted) order.
    pub fn font_names(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        let mut bytes = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut serializer)
            .map_err(|e| StoreError::Io {
                path: path.to_path_buf(),
                source: e.into(),
            })?;
        fs::write(path, bytes).await.map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("saved {} fonts to {}", self.len(), path.display());
        Ok(())
    }

    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(path.to_path_buf()))
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let store: VectorStore =
            serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("loaded {} fonts from {}", store.len(), path.display());
        Ok(store)
    }
}
