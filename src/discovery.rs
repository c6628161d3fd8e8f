//! Input file discovery for a run

use crate::GeneratorError;
use std::path::Path;
use tokio::fs;
use tracing::debug;

pub const MOCKUP_EXTENSION: &str = ".html";

/// Returns the mockups to render, in render order.
///
/// With `file` set and non-empty, only that file is returned, after checking
/// it exists in `mockups_root`. Otherwise every `.html` entry of `mockups_root` is returned
/// in ascending byte order. A missing directory is an error; an empty one is
/// not.
pub async fn discover_files(
    mockups_root: &Path,
    file: Option<&str>,
) -> Result<Vec<String>, GeneratorError> {
    if let Some(file) = file.filter(|f| !f.is_empty()) {
        let path = mockups_root.join(file);
        if !fs::try_exists(&path).await? {
            return Err(GeneratorError::FileNotFound(file.to_string()));
        }
        return Ok(vec![file.to_string()]);
    }

    let mut entries = fs::read_dir(mockups_root).await.map_err(|e| {
        GeneratorError::IoError(format!("cannot list {}: {}", mockups_root.display(), e))
    })?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        match entry.file_name().into_string() {
            Ok(name) if name.ends_with(MOCKUP_EXTENSION) => files.push(name),
            Ok(_) => {}
            Err(name) => debug!("Skipping non UTF-8 entry {:?}", name),
        }
    }
    files.sort();

    debug!("Discovered {} mockups in {}", files.len(), mockups_root.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "<html></html>").unwrap();
    }

    #[tokio::test]
    async fn test_lists_html_files_sorted() {
        let dir = tempdir().unwrap();
        for name in ["10_custom.html", "02_task_new.html", "01_task_list.html", "notes.txt", "style.css"] {
            touch(dir.path(), name);
        }

        let files = discover_files(dir.path(), None).await.unwrap();
        assert_eq!(files, vec!["01_task_list.html", "02_task_new.html", "10_custom.html"]);
    }

    #[tokio::test]
    async fn test_sort_is_lexicographic_not_numeric() {
        let dir = tempdir().unwrap();
        for name in ["9_a.html", "10_b.html", "B.html", "a.html"] {
            touch(dir.path(), name);
        }

        let files = discover_files(dir.path(), None).await.unwrap();
        assert_eq!(files, vec!["10_b.html", "9_a.html", "B.html", "a.html"]);
    }

    #[tokio::test]
    async fn test_empty_directory_is_valid() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "readme.md");
        assert!(discover_files(dir.path(), None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let result = discover_files(&dir.path().join("absent"), None).await;
        assert!(matches!(result, Err(GeneratorError::IoError(_))));
    }

    #[tokio::test]
    async fn test_explicit_file() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "01_task_list.html");
        touch(dir.path(), "02_task_new.html");

        let files = discover_files(dir.path(), Some("02_task_new.html")).await.unwrap();
        assert_eq!(files, vec!["02_task_new.html"]);
    }

    #[tokio::test]
    async fn test_empty_explicit_file_lists_directory() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "02_task_new.html");
        touch(dir.path(), "01_task_list.html");

        let files = discover_files(dir.path(), Some("")).await.unwrap();
        assert_eq!(files, vec!["01_task_list.html", "02_task_new.html"]);
    }

    #[tokio::test]
    async fn test_explicit_missing_file() {
        let dir = tempdir().unwrap();
        let result = discover_files(dir.path(), Some("missing.html")).await;
        assert_eq!(result, Err(GeneratorError::FileNotFound("missing.html".to_string())));
    }
}
