use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML file (chosen by extension) into a typed struct.
/// Anything other than `.yaml`/`.yml` is parsed as JSON.
pub fn read_document<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let full = resolve_path(path)?;
    let contents = fs::read_to_string(&full)
        .map_err(|e| format!("Failed to read '{}': {}", full.display(), e))?;
    tracing::debug!(path = %full.display(), bytes = contents.len(), "input file read");

    let value: T = if is_yaml(&full) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", full.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", full.display(), e))?
    };
    Ok(value)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref(),
        Some("yaml") | Some("yml")
    )
}

/// Resolve a relative path against the current directory and check that it
/// names an existing file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let full = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !full.exists() {
        return Err(format!("File not found: {}", full.display()).into());
    }

    if !full.is_file() {
        return Err(format!("Not a file: {}", full.display()).into());
    }

    Ok(full)
}
