use super::storage::{FontVectors, VectorStore};
use crate::glyph::font_file::{read_font_files, FontFile};
use crate::glyph::FeatureVector;
use anyhow::Result;
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Vectorizes every font in `font_folder`, at most `jobs` at a time.
///
/// A font that fails to load is kept with an empty mapping. Results are
/// gathered in file-name order whatever order the workers finish in.
pub async fn vectorize_fonts(
    font_folder: &Path,
    chars: &[char],
    jobs: usize,
) -> Result<VectorStore> {
    let font_files = read_font_files(font_folder).await?;
    let total = font_files.len();
    info!("vectorizing {} fonts, {} characters each", total, chars.len());

    let chars: Arc<[char]> = Arc::from(chars);
    let start = Instant::now();
    let results = stream::iter(font_files)
        .map(|font_file| {
            let chars = Arc::clone(&chars);
            tokio::task::spawn_blocking(move || vectorize_one(font_file, &chars))
        })
        .buffered(jobs.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut store = VectorStore::new();
    for (done, result) in results.into_iter().enumerate() {
        let (font_name, vectors) = result?;
        info!("vectorized {} ({}/{})", font_name, done + 1, total);
        store.insert_font(font_name, vectors);
    }
    let elapsed = start.elapsed().as_secs_f64();
    info!("vectorizing {} fonts spends {}s", total, elapsed);

    Ok(store)
}

fn vectorize_one(font_file: FontFile, chars: &[char]) -> (String, FontVectors) {
    let vectors = match font_file.vectorize(chars) {
        Ok(vectors) => vectors,
        Err(e) => {
            error!("processing font {} failed: {}", font_file, e);
            FontVectors::new()
        }
    };
    (font_file.file_name, vectors)
}

/// Vectorizes the comparison target, keeping only the characters it has.
/// An unreadable target yields no characters rather than an error.
pub async fn vectorize_target(
    target_font: &Path,
    chars: &[char],
) -> Result<BTreeMap<char, FeatureVector>> {
    let font_file = FontFile::new(target_font.to_path_buf());
    let chars = chars.to_vec();
    let start = Instant::now();
    let vectors =
        tokio::task::spawn_blocking(move || font_file.vectorize_present(&chars)).await?;
    let elapsed = start.elapsed().as_secs_f64();
    info!(
        "vectorizing target {} spends {}s, {} characters usable",
        target_font.display(),
        elapsed,
        vectors.len()
    );
    Ok(vectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn unreadable_fonts_are_kept_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.ttf"), b"garbage").unwrap();
        std::fs::write(dir.path().join("a.otf"), b"").unwrap();
        std::fs::write(dir.path().join("skip.txt"), b"").unwrap();

        let store = vectorize_fonts(dir.path(), &['가', '나'], 2).await.unwrap();
        assert_eq!(store.font_names().collect::<Vec<_>>(), vec!["a.otf", "b.ttf"]);
        assert!(store.get("a.otf", '가').is_none());
    }

    #[tokio::test]
    async fn missing_folder_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(vectorize_fonts(&dir.path().join("none"), &['가'], 1).await.is_err());
    }

    #[tokio::test]
    async fn unparsable_target_has_no_characters() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["target.ttf", "target.TTC"] {
            let path = dir.path().join(name);
            std::fs::write(&path, b"not a font").unwrap();
            let vectors = vectorize_target(&path, &['가']).await.unwrap();
            assert!(vectors.is_empty(), "{}", name);
        }
    }

    #[test_log::test(tokio::test)]
    async fn fixture_font_is_stored_and_matches_itself() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hangul.ttf");
        std::fs::write(&path, include_bytes!("../glyph/testdata/hangul.ttf")).unwrap();

        let store = vectorize_fonts(dir.path(), &['가', '각', '나'], 2).await.unwrap();
        assert_eq!(store.get("hangul.ttf", '가').map(Vec::len), Some(18));
        assert_eq!(store.get("hangul.ttf", '각').map(Vec::len), Some(8));
        assert!(store.get("hangul.ttf", '나').is_none());

        let target = vectorize_target(&path, &['가', '각', '나']).await.unwrap();
        let ranked = crate::library::matching::rank(&store, &target, &['가', '각', '나']);
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].similarity - 1.0).abs() < 1e-9);
    }
}
