use std::path::Path;

use tracing::{info, warn};

use crate::error::ToolError;
use crate::results::InfoResult;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Reports the file name and size of `file_path` without reading its content.
pub fn get_simple_info(file_path: &str) -> InfoResult {
    match try_info(file_path) {
        Ok(info) => info,
        Err(err) => {
            if !matches!(err, ToolError::NotFound) {
                warn!(path = %file_path, error = %err, "Reading file info failed");
            }
            err.into()
        }
    }
}

fn try_info(file_path: &str) -> Result<InfoResult, ToolError> {
    if !Path::new(file_path).exists() {
        return Err(ToolError::NotFound);
    }

    let size_bytes = std::fs::metadata(file_path)?.len();
    let filename = base_name(file_path).to_string();
    info!(path = %file_path, size_bytes, "File info collected");

    Ok(InfoResult::Success {
        filename,
        size_bytes,
        size_mb: size_in_mb(size_bytes),
    })
}

/// Everything after the last path separator; empty when the path ends with one.
pub fn base_name(file_path: &str) -> &str {
    file_path
        .rsplit(std::path::is_separator)
        .next()
        .unwrap_or(file_path)
}

/// Size in MiB rounded to two decimals, ties to even.
pub fn size_in_mb(size_bytes: u64) -> f64 {
    let mb = size_bytes as f64 / BYTES_PER_MB;
    (mb * 100.0).round_ties_even() / 100.0
}
