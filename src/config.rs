//! Configuration management with serde serialization/deserialization
//!
//! This module holds the run-level settings (where mockups live, where images
//! go, how long navigation may take), the per-invocation render options, and
//! the records that flow through a run.

use crate::{GeneratorError, ScreenIdResolver};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fixed wait after navigation so client-side rendering can finish.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Run-level configuration for the generator
///
/// Relative directories are resolved against `project_root`.
///
/// # Examples
///
/// ```rust
/// use screen_image_generator::Config;
///
/// let config = Config::default();
/// assert!(config.mockups_root().ends_with("docs/mockups"));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Project root the mockup and output directories hang off (default: ".")
    pub project_root: PathBuf,

    /// Directory holding the HTML mockups (default: docs/mockups)
    pub mockups_dir: PathBuf,

    /// Directory receiving the PNG screenshots (default: docs/screen/images)
    ///
    /// Created on demand.
    pub output_dir: PathBuf,

    /// Upper bound on a single page navigation (default: 30 seconds)
    pub navigation_timeout: Duration,

    /// Path to Chrome/Chromium executable (default: auto-detect)
    pub chrome_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            mockups_dir: PathBuf::from("docs/mockups"),
            output_dir: PathBuf::from("docs/screen/images"),
            navigation_timeout: Duration::from_secs(30),
            chrome_path: None,
        }
    }
}

impl Config {
    pub fn mockups_root(&self) -> PathBuf {
        self.project_root.join(&self.mockups_dir)
    }

    pub fn output_root(&self) -> PathBuf {
        self.project_root.join(&self.output_dir)
    }

    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.navigation_timeout.is_zero() {
            return Err(GeneratorError::ConfigurationError(
                "navigation timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options resolved from the command line for a single invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Render only this file from the mockups directory
    pub file: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Device pixel ratio (2.0 for Retina-quality images)
    pub scale: f64,
    /// Capture the whole scrollable page instead of the viewport
    pub full_page: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            file: None,
            width: 1280,
            height: 800,
            scale: 1.0,
            full_page: false,
        }
    }
}

impl Options {
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
            device_scale_factor: self.scale,
        }
    }
}

/// Browser viewport shared by every page rendered in a run
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Viewport width in CSS pixels
    pub width: u32,

    /// Viewport height in CSS pixels
    pub height: u32,

    /// Device pixel ratio; values > 1.0 produce proportionally larger images
    pub device_scale_factor: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Options::default().viewport()
    }
}

/// One mockup to render, derived right before it is rendered
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTask {
    pub filename: String,
    pub screen_id: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl RenderTask {
    pub fn new(
        filename: &str,
        resolver: &ScreenIdResolver,
        mockups_root: &Path,
        output_root: &Path,
    ) -> Self {
        let screen_id = resolver.resolve(filename);
        Self {
            filename: filename.to_string(),
            input_path: mockups_root.join(filename),
            output_path: output_root.join(format!("{screen_id}.png")),
            screen_id,
        }
    }
}

/// Outcome of rendering a single file
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub filename: String,
    pub screen_id: String,
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// `[i/N]` progress line; `index` is zero-based.
    pub fn progress_line(&self, index: usize, total: usize) -> String {
        match &self.error {
            None => format!(
                "[{}/{}] {} → {}.png ✓",
                index + 1,
                total,
                self.filename,
                self.screen_id
            ),
            Some(message) => format!(
                "[{}/{}] {} → error: {}",
                index + 1,
                total,
                self.filename,
                message
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    pub success_count: usize,
    pub error_count: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl RunResult {
    pub fn record(&mut self, outcome: FileOutcome) {
        if outcome.is_success() {
            self.success_count += 1;
        } else {
            self.error_count += 1;
        }
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.success_count + self.error_count
    }
}

/// Generate Chrome command-line arguments for the given viewport
///
/// # Examples
///
/// ```rust
/// use screen_image_generator::{get_chrome_args, Viewport};
///
/// let args = get_chrome_args(&Viewport::default());
/// assert!(args.contains(&"--window-size=1280,800".to_string()));
/// ```
pub fn get_chrome_args(viewport: &Viewport) -> Vec<String> {
    vec![
        "--headless".to_string(),
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-gpu".to_string(),
        "--disable-extensions".to_string(),
        "--disable-default-apps".to_string(),
        "--disable-sync".to_string(),
        "--no-first-run".to_string(),
        "--hide-scrollbars".to_string(),
        // Mockups reference sibling stylesheets and scripts by relative path
        "--allow-file-access-from-files".to_string(),
        format!("--window-size={},{}", viewport.width, viewport.height),
        format!("--force-device-scale-factor={}", viewport.device_scale_factor),
    ]
}

pub fn create_browser_config(
    config: &Config,
    viewport: &Viewport,
) -> Result<chromiumoxide::browser::BrowserConfig, GeneratorError> {
    use chromiumoxide::browser::BrowserConfig;
    use chromiumoxide::handler::viewport::Viewport as ChromeViewport;

    let mut builder = BrowserConfig::builder()
        .window_size(viewport.width, viewport.height)
        .viewport(ChromeViewport {
            width: viewport.width,
            height: viewport.height,
            device_scale_factor: Some(viewport.device_scale_factor),
            emulating_mobile: false,
            is_landscape: viewport.width > viewport.height,
            has_touch: false,
        })
        .args(get_chrome_args(viewport));

    if let Some(chrome_path) = &config.chrome_path {
        builder = builder.chrome_executable(chrome_path);
    }

    builder.build().map_err(GeneratorError::BrowserLaunchFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_paths() {
        let config = Config::default();
        assert_eq!(config.mockups_root(), PathBuf::from("./docs/mockups"));
        assert_eq!(config.output_root(), PathBuf::from("./docs/screen/images"));
        assert_eq!(config.navigation_timeout, Duration::from_secs(30));
        assert!(config.chrome_path.is_none());
    }

    #[test]
    fn test_config_partial_json() {
        let config: Config =
            serde_json::from_str(r#"{"project_root": "/srv/app", "chrome_path": "/usr/bin/chromium"}"#)
                .unwrap();
        assert_eq!(config.mockups_root(), PathBuf::from("/srv/app/docs/mockups"));
        assert_eq!(config.chrome_path.as_deref(), Some("/usr/bin/chromium"));
        assert_eq!(config.navigation_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        let config = Config {
            navigation_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GeneratorError::ConfigurationError(_))
        ));
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_options_default() {
        let options = Options::default();
        assert_eq!(options.file, None);
        assert_eq!(options.width, 1280);
        assert_eq!(options.height, 800);
        assert_eq!(options.scale, 1.0);
        assert!(!options.full_page);
    }

    #[test]
    fn test_render_task_paths() {
        let resolver = ScreenIdResolver::default();
        let task = RenderTask::new(
            "10_custom_feature.html",
            &resolver,
            Path::new("/p/docs/mockups"),
            Path::new("/p/docs/screen/images"),
        );
        assert_eq!(task.screen_id, "SCR-CMN-010");
        assert_eq!(task.input_path, PathBuf::from("/p/docs/mockups/10_custom_feature.html"));
        assert_eq!(
            task.output_path,
            PathBuf::from("/p/docs/screen/images/SCR-CMN-010.png")
        );
    }

    #[test]
    fn test_progress_lines() {
        let ok = FileOutcome {
            filename: "01_task_list.html".to_string(),
            screen_id: "SCR-TASK-001".to_string(),
            error: None,
        };
        assert_eq!(ok.progress_line(0, 3), "[1/3] 01_task_list.html → SCR-TASK-001.png ✓");

        let failed = FileOutcome {
            error: Some("Navigation timed out after 30s".to_string()),
            ..ok
        };
        assert_eq!(
            failed.progress_line(2, 3),
            "[3/3] 01_task_list.html → error: Navigation timed out after 30s"
        );
    }

    #[test]
    fn test_run_result_counts() {
        let mut result = RunResult::default();
        for error in [None, Some("boom".to_string()), None] {
            result.record(FileOutcome {
                filename: "a.html".to_string(),
                screen_id: "a".to_string(),
                error,
            });
        }
        assert_eq!(result.success_count, 2);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.total(), 3);
    }

    #[test]
    fn test_chrome_args_generation() {
        let viewport = Viewport {
            width: 1440,
            height: 900,
            device_scale_factor: 2.0,
        };
        let args = get_chrome_args(&viewport);

        assert!(args.contains(&"--headless".to_string()));
        assert!(args.contains(&"--no-sandbox".to_string()));
        assert!(args.contains(&"--window-size=1440,900".to_string()));
        assert!(args.contains(&"--force-device-scale-factor=2".to_string()));
    }

    #[test]
    fn test_browser_config_creation() {
        let config = Config {
            chrome_path: Some("/usr/bin/chromium".to_string()),
            ..Default::default()
        };
        assert!(create_browser_config(&config, &Viewport::default()).is_ok());
    }
}
