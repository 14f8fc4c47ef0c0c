pub mod feedback;
pub mod udp_backend;

use anyhow::{Context, Result};
use common::QuizConfig;
use log::info;
use std::fs;
use std::path::Path;

/// Reads the config at `path`, writing a default one there if it is missing.
pub fn load_config(path: &Path) -> Result<QuizConfig> {
    if path.exists() {
        info!("Loading config from {:?}", path);
        let file = fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config = serde_json::from_reader(reader).context("Failed to parse config")?;
        Ok(config)
    } else {
        info!("Config not found. Creating default at {:?}", path);
        let config = QuizConfig::default();
        let file = fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &config)?;
        Ok(config)
    }
}
