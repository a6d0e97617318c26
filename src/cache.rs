use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::anyhow;
use log::{info, warn};
use serde_json::{Map, Value};

const VERSION_KEY: &str = "version";
/// Bumped whenever the shape of cached entries changes.
const CACHE_VERSION: u64 = 1;

/// Reads the JSON cache. A missing file, or one written by another cache
/// version, yields an empty cache.
pub(crate) fn load_cache(cache_file_path: &Path) -> anyhow::Result<Map<String, Value>> {
    if !cache_file_path.exists() {
        info!("Cache file({cache_file_path:?}) does not exist. ignoring...");
        return Ok(Map::new());
    }
    let fd = File::open(cache_file_path)?;
    let reader = BufReader::new(fd);
    let cache: Map<String, Value> = serde_json::from_reader(reader).map_err(|e| anyhow!(e))?;

    if cache.get(VERSION_KEY).and_then(Value::as_u64) != Some(CACHE_VERSION) {
        warn!("Cache file({cache_file_path:?}) has another version. discarding...");
        return Ok(Map::new());
    }
    Ok(cache)
}

pub(crate) fn save_cache(cache_file_path: &Path, cache: &Map<String, Value>) -> anyhow::Result<()> {
    let cache_file_fd = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(cache_file_path)?;
    let writer = BufWriter::new(cache_file_fd);

    let mut cache = cache.clone();
    cache.insert(VERSION_KEY.to_string(), Value::from(CACHE_VERSION));
    serde_json::to_writer_pretty(writer, &cache)?;

    Ok(())
}
