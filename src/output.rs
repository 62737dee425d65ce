use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Writes `new_content` unless the file already holds content with the same hash.
pub fn overwrite_on_diff(file_path: &Path, new_content: &str) -> Result<FileWriteResult> {
    let new_content_hash = crc32fast::hash(new_content.as_bytes());

    if file_path.exists() {
        let existing = fs::read(file_path)
            .with_context(|| format!("Unable to read existing file {}", file_path.display()))?;
        if crc32fast::hash(&existing) == new_content_hash {
            return Ok(FileWriteResult::NoChange);
        }
        fs::write(file_path, new_content)
            .with_context(|| format!("Unable to write to file {}", file_path.display()))?;
        Ok(FileWriteResult::Overwritten)
    } else {
        let mut file = File::create_new(file_path)
            .with_context(|| format!("Unable to create file {}, does the parent folder exist?", file_path.display()))?;
        file.write_all(new_content.as_bytes())
            .with_context(|| format!("Unable to write to new file {}", file_path.display()))?;
        Ok(FileWriteResult::Created)
    }
}

#[derive(Debug, PartialEq)]
pub enum FileWriteResult {
    Overwritten,
    NoChange,
    Created
}

impl FileWriteResult {
    pub fn log(&self, file_path: &Path) {
        let path = file_path.display();
        match &self {
            FileWriteResult::Created => info!(%path, "created"),
            FileWriteResult::NoChange => info!(%path, "skipped (no change)"),
            FileWriteResult::Overwritten => info!(%path, "overwritten")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rewrites_only_changed_content() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("schema.graphql");

        assert_eq!(overwrite_on_diff(&path, "type Query {\n  a: String\n}\n").ok(), Some(FileWriteResult::Created));
        assert_eq!(overwrite_on_diff(&path, "type Query {\n  a: String\n}\n").ok(), Some(FileWriteResult::NoChange));
        assert_eq!(overwrite_on_diff(&path, "type Query {\n  b: Int\n}\n").ok(), Some(FileWriteResult::Overwritten));
        assert_eq!(fs::read_to_string(&path).ok().as_deref(), Some("type Query {\n  b: Int\n}\n"));
    }
}
