use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the slate data directory - checks for a local .slate first, then
/// falls back to the platform data directory (e.g. ~/.local/share/slate)
pub fn get_data_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_slate(&current_dir) {
        return Ok(local_dir);
    }

    let base = dirs::data_dir().context("Could not determine platform data directory")?;
    Ok(base.join("slate"))
}

/// Find a local .slate directory by walking up the directory tree
fn find_local_slate(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let slate_dir = current.join(".slate");
        if slate_dir.exists() && slate_dir.is_dir() {
            return Some(slate_dir);
        }
        current = current.parent()?;
    }
}

/// Ensure the data directory exists
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = get_data_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .slate directory in the current directory
pub fn init_local_slate() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let slate_dir = current_dir.join(".slate");

    if slate_dir.exists() {
        anyhow::bail!("Slate directory already exists: {}", slate_dir.display());
    }

    fs::create_dir_all(&slate_dir)
        .with_context(|| format!("Failed to create directory: {}", slate_dir.display()))?;

    Ok(slate_dir)
}

/// Path to the task database file
pub fn db_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("todos.db"))
}

/// Path to the meta.json file (stores the last selected filter)
pub fn meta_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("meta.json"))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file =
        NamedTempFile::new_in(dir).context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir() {
        let dir = get_data_dir().unwrap();
        assert!(dir.to_string_lossy().contains("slate"));
    }

    #[test]
    fn test_atomic_write() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        atomic_write(&test_file, "{}").unwrap();

        let content = fs::read_to_string(&test_file).unwrap();
        assert_eq!(content, "{}");
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        atomic_write(&test_file, "first").unwrap();
        atomic_write(&test_file, "second").unwrap();

        let content = fs::read_to_string(&test_file).unwrap();
        assert_eq!(content, "second");
    }
}
