use crate::error::RunError;
use crate::{SAMPLE_SIZE, TOP_K, VECTORIZE_JOBS};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Build the vector store from the font folder.
    Vectorize,
    /// Rank stored fonts by similarity to the target font.
    Compare,
}

impl FromStr for Mode {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vectorize" => Ok(Mode::Vectorize),
            "compare" => Ok(Mode::Compare),
            other => Err(RunError::UnknownMode(other.to_string())),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Vectorize => write!(f, "vectorize"),
            Mode::Compare => write!(f, "compare"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub font_folder: PathBuf,
    pub vector_store: PathBuf,
    pub corpus_path: PathBuf,
    pub target_font: PathBuf,
    /// How many ranked fonts are printed.
    pub top_k: usize,
    /// How many corpus characters are compared.
    pub sample_size: usize,
    pub vectorize_jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_folder: PathBuf::from("public/fonts"),
            vector_store: PathBuf::from("font_vectors.json"),
            corpus_path: PathBuf::from("korean_corpus.txt"),
            target_font: PathBuf::from("public/fonts/DungGeunMo.ttf"),
            top_k: 5,
            sample_size: 200,
            vectorize_jobs: 4,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Config::default();
        Self {
            font_folder: path_var("FONT_FOLDER").unwrap_or(default.font_folder),
            vector_store: path_var("VECTOR_STORE").unwrap_or(default.vector_store),
            corpus_path: path_var("CORPUS_PATH").unwrap_or(default.corpus_path),
            target_font: path_var("TARGET_FONT").unwrap_or(default.target_font),
            top_k: *TOP_K,
            sample_size: *SAMPLE_SIZE,
            vectorize_jobs: *VECTORIZE_JOBS,
        }
    }
}

fn path_var(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Parses a numeric env tunable, falling back to `default` when unset or
/// invalid.
pub fn usize_var(key: &str, default: usize) -> usize {
    match std::env::var(key) {
        Ok(value) => value.trim().parse::<usize>().unwrap_or_else(|_| {
            warn!("invalid {}: {}, using {}", key, value, default);
            default
        }),
        Err(_) => default,
    }
}
