mod config;
mod corpus;
mod error;
mod glyph;
mod library;

use anyhow::Result;
use config::{usize_var, Config, Mode};
use corpus::{load_corpus, sample_characters};
use dotenv::dotenv;
use env_logger::Builder;
use error::RunError;
use lazy_static::lazy_static;
use library::indexer::{vectorize_fonts, vectorize_target};
use library::matching::{rank, Matched};
use library::storage::VectorStore;
use log::LevelFilter;
use std::time::Instant;

#[macro_use]
extern crate log;

lazy_static! {
    static ref TOP_K: usize = usize_var("TOP_K", 5);
    static ref SAMPLE_SIZE: usize = usize_var("SAMPLE_SIZE", 200);
    static ref VECTORIZE_JOBS: usize = usize_var("VECTORIZE_JOBS", 4);
}

#[tokio::main]
async fn main() -> Result<()> {
    // read .env
    dotenv().ok();

    // init logger
    let log_level = std::env::var("RUST_LOG").unwrap_or_default();

    if log_level == "debug" {
        Builder::new()
            .filter(None, LevelFilter::Off)
            .filter(Some("font_compare::library"), LevelFilter::Debug)
            .filter(Some("font_compare"), LevelFilter::Debug)
            .init();
    } else if log_level == "info" {
        Builder::new()
            .filter(None, LevelFilter::Off)
            .filter(Some("font_compare::library"), LevelFilter::Info)
            .filter(Some("font_compare"), LevelFilter::Info)
            .init();
    } else {
        env_logger::init();
    }

    let mode = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Mode>()?,
        None => Mode::Compare,
    };
    let config = Config::from_env();
    info!("running {} with {:?}", mode, config);

    run(&config, mode).await
}

async fn run(config: &Config, mode: Mode) -> Result<()> {
    let text = load_corpus(&config.corpus_path).await;
    let chars = sample_characters(&text, config.sample_size);
    info!("sampled {} characters from corpus", chars.len());

    match mode {
        Mode::Vectorize => vectorize(config, &chars).await,
        Mode::Compare => {
            let ranked = compare(config, &chars).await?;
            print_ranking(config, &ranked);
            Ok(())
        }
    }
}

async fn vectorize(config: &Config, chars: &[char]) -> Result<()> {
    if !config.font_folder.is_dir() {
        return Err(RunError::FontFolderNotFound(config.font_folder.clone()).into());
    }
    if chars.is_empty() {
        return Err(RunError::NoCharacters.into());
    }
    let store = vectorize_fonts(&config.font_folder, chars, config.vectorize_jobs).await?;
    store.save(&config.vector_store).await?;
    info!(
        "saved vectors of {} fonts to {}",
        store.len(),
        config.vector_store.display()
    );
    Ok(())
}

async fn compare(config: &Config, chars: &[char]) -> Result<Vec<Matched>> {
    if !config.target_font.exists() {
        return Err(RunError::TargetFontNotFound(config.target_font.clone()).into());
    }
    if !config.vector_store.exists() {
        return Err(error::StoreError::NotFound(config.vector_store.clone()).into());
    }
    if chars.is_empty() {
        return Err(RunError::NoCharacters.into());
    }

    let store = VectorStore::load(&config.vector_store).await?;
    if store.is_empty() {
        warn!("vector store {} holds no fonts", config.vector_store.display());
    }
    let target = vectorize_target(&config.target_font, chars).await?;

    let start = Instant::now();
    let ranked = rank(&store, &target, chars);
    let elapsed = start.elapsed().as_secs_f64();
    info!("ranking {} fonts spends {}s", store.len(), elapsed);
    Ok(ranked)
}

fn print_ranking(config: &Config, ranked: &[Matched]) {
    if ranked.is_empty() {
        println!("No similar fonts found.");
        return;
    }
    let target_name = config
        .target_font
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| config.target_font.display().to_string());
    println!("Top {} fonts similar to '{}':", config.top_k, target_name);
    for (i, matched) in ranked.iter().take(config.top_k).enumerate() {
        println!(
            "{}. {} (similarity: {:.4})",
            i + 1,
            matched.font_name,
            matched.similarity
        );
    }
}
