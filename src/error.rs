use std::path::PathBuf;
use thiserror::Error;

/// Reasons a glyph produces no feature vector. Never fatal.
#[derive(Error, Debug)]
pub enum GlyphError {
    #[error("no glyph mapped for U+{:04X}", code_point(.0))]
    MissingGlyph(char),

    #[error("glyph for U+{:04X} has no outline", code_point(.0))]
    NoOutline(char),

    #[error("every contour of U+{:04X} is degenerate", code_point(.0))]
    DegenerateContour(char),

    #[error("failed to parse font: {0}")]
    FontParse(#[from] ttf_parser::FaceParsingError),
}

fn code_point(c: &char) -> u32 {
    *c as u32
}

/// Failures while comparing two vectors, recovered as similarity 0.
#[derive(Error, Debug, PartialEq)]
pub enum SimilarityError {
    #[error("vector length mismatch: {0} != {1}")]
    LengthMismatch(usize, usize),

    #[error("zero magnitude vector")]
    ZeroMagnitude,

    #[error("similarity is not a finite number")]
    NotFinite,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("vector store not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid vector store format in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("vector store io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Pre-flight failures that end a run before any result is produced.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("target font file not found: {}", .0.display())]
    TargetFontNotFound(PathBuf),

    #[error("font folder not found: {}", .0.display())]
    FontFolderNotFound(PathBuf),

    #[error("no characters to compare, check the corpus file or sample texts")]
    NoCharacters,

    #[error("unknown mode: {0} (expected `vectorize` or `compare`)")]
    UnknownMode(String),
}
