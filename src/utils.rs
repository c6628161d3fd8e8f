use crate::GeneratorError;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Builds the `file://` URL a page navigates to for a local mockup.
pub fn file_url(path: &Path) -> Result<Url, GeneratorError> {
    let absolute = std::path::absolute(path)
        .map_err(|e| GeneratorError::InvalidPath(format!("{}: {}", path.display(), e)))?;

    Url::from_file_path(&absolute)
        .map_err(|()| GeneratorError::InvalidPath(absolute.display().to_string()))
}

pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let millis = duration.subsec_millis();

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else if seconds > 0 {
        format!("{}.{}s", seconds, millis / 100)
    } else {
        format!("{millis}ms")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_url_absolute() {
        let url = file_url(Path::new("/srv/docs/mockups/01_task_list.html")).unwrap();
        assert_eq!(url.scheme(), "file");
        assert_eq!(url.as_str(), "file:///srv/docs/mockups/01_task_list.html");
    }

    #[test]
    fn test_file_url_relative_is_made_absolute() {
        let url = file_url(Path::new("docs/mockups/a b.html")).unwrap();
        assert!(url.path().ends_with("/docs/mockups/a%20b.html"));
        assert!(url.to_file_path().unwrap().is_absolute());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(5)), "5.0s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
        assert_eq!(format_duration(Duration::from_secs(3665)), "1h 1m 5s");
    }
}
