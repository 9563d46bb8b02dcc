use super::storage::VectorStore;
use crate::error::SimilarityError;
use crate::glyph::FeatureVector;
use std::cmp::Ordering;
use std::collections::BTreeMap;

const HANGUL_FIRST: u32 = '가' as u32;
const HANGUL_LAST: u32 = '힣' as u32;
const JONG_COUNT: u32 = 28;

/// Hangul syllable shape: without (LV) or with (LVT) a trailing consonant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SyllableType {
    Lv,
    Lvt,
}

impl SyllableType {
    pub fn of(ch: char) -> Option<Self> {
        let code = ch as u32;
        if !is_hangul_syllable(ch) {
            return None;
        }
        if (code - HANGUL_FIRST) % JONG_COUNT == 0 {
            Some(SyllableType::Lv)
        } else {
            Some(SyllableType::Lvt)
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            SyllableType::Lv => 0.6,
            SyllableType::Lvt => 0.4,
        }
    }
}

pub fn is_hangul_syllable(ch: char) -> bool {
    (HANGUL_FIRST..=HANGUL_LAST).contains(&(ch as u32))
}

#[derive(Clone, Debug)]
pub struct Matched {
    pub font_name: String,
    pub similarity: f64,
}

impl Matched {
    /// Best first; NaN scores never reach here, `total_cmp` keeps the sort total.
    fn by_similarity_desc(a: &Self, b: &Self) -> Ordering {
        b.similarity.total_cmp(&a.similarity)
    }
}

/// Ranks every stored font against the target glyph vectors, best first.
///
/// Per character, each font gets the cosine similarity of its padded vector
/// with the padded target vector (0 when it has none). Per syllable type,
/// a font's positive similarities are reduced with the harmonic mean, and
/// the type scores are combined with [`SyllableType::weight`] over the types
/// that saw at least one character. Fonts with no such type are dropped.
pub fn rank(
    store: &VectorStore,
    target: &BTreeMap<char, FeatureVector>,
    chars: &[char],
) -> Vec<Matched> {
    let max_len = max_vector_len(store, target, chars);
    let font_names = store.font_names().collect::<Vec<_>>();
    debug!("max vector length: {}, fonts: {}", max_len, font_names.len());

    let mut groups: BTreeMap<SyllableType, Vec<Vec<f64>>> = BTreeMap::new();
    for &ch in chars {
        let target_vector = match target.get(&ch) {
            Some(vector) => pad_vector(vector, max_len),
            None => continue,
        };
        let syllable_type = match SyllableType::of(ch) {
            Some(syllable_type) => syllable_type,
            None => continue,
        };

        let char_similarities = font_names
            .iter()
            .map(|font_name| match store.get(font_name, ch) {
                Some(vector) => {
                    let vector = pad_vector(vector, max_len);
                    if vector.iter().all(|x| *x == 0.0) {
                        return 0.0;
                    }
                    cosine_similarity(&target_vector, &vector).unwrap_or_else(|e| {
                        debug!("char: {}, font: {}, similarity failed: {}", ch, font_name, e);
                        0.0
                    })
                }
                None => 0.0,
            })
            .collect::<Vec<_>>();
        groups.entry(syllable_type).or_default().push(char_similarities);
    }

    let mut ranked = font_names
        .iter()
        .enumerate()
        .filter_map(|(i, font_name)| {
            let similarity = font_score(&groups, i)?;
            debug!("font: {}, similarity: {}", font_name, similarity);
            Some(Matched {
                font_name: font_name.to_string(),
                similarity,
            })
        })
        .collect::<Vec<_>>();
    // stable, so equal scores keep store order
    ranked.sort_by(Matched::by_similarity_desc);
    ranked
}

/// Weighted group score of the font at `index`, `None` if no group
/// accumulated anything.
fn font_score(groups: &BTreeMap<SyllableType, Vec<Vec<f64>>>, index: usize) -> Option<f64> {
    let mut total = 0.0;
    let mut total_weight = 0.0;
    for (syllable_type, char_similarities) in groups {
        let positive = char_similarities
            .iter()
            .filter_map(|sims| sims.get(index).copied())
            .filter(|sim| *sim > 0.0)
            .collect::<Vec<_>>();
        total += harmonic_mean(&positive) * syllable_type.weight();
        total_weight += syllable_type.weight();
    }
    if total_weight > 0.0 {
        Some(total / total_weight)
    } else {
        None
    }
}

fn max_vector_len(
    store: &VectorStore,
    target: &BTreeMap<char, FeatureVector>,
    chars: &[char],
) -> usize {
    let target_max = chars
        .iter()
        .filter_map(|ch| target.get(ch))
        .map(Vec::len)
        .max()
        .unwrap_or(0);
    let stored_max = store
        .font_names()
        .flat_map(|font_name| chars.iter().filter_map(move |&ch| store.get(font_name, ch)))
        .map(Vec::len)
        .max()
        .unwrap_or(0);
    target_max.max(stored_max)
}

/// Truncates or zero-extends `vector` to exactly `len` values.
pub fn pad_vector(vector: &[f64], len: usize) -> Vec<f64> {
    let mut padded = vector[..vector.len().min(len)].to_vec();
    padded.resize(len, 0.0);
    padded
}

/// Harmonic mean of the positive values, 0 when there are none.
pub fn harmonic_mean(values: &[f64]) -> f64 {
    let positive = values.iter().filter(|v| **v > 0.0).collect::<Vec<_>>();
    if positive.is_empty() {
        return 0.0;
    }
    positive.len() as f64 / positive.iter().map(|v| 1.0 / **v).sum::<f64>()
}

fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn magnitude(a: &[f64]) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}

pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::LengthMismatch(a.len(), b.len()));
    }
    let mag = magnitude(a) * magnitude(b);
    if mag == 0.0 {
        return Err(SimilarityError::ZeroMagnitude);
    }
    let similarity = dot_product(a, b) / mag;
    if !similarity.is_finite() {
        return Err(SimilarityError::NotFinite);
    }
    Ok(similarity)
}
