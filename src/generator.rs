//! Batch rendering of mockups into screen images
//!
//! [`Generator::run`] is the whole pipeline: discover mockups, prepare the
//! output directory, launch one browser, render every file in order and
//! report. A file that fails to render is counted and reported; the batch
//! always continues with the next one.

use crate::{
    discover_files, format_duration, ChromeRenderer, Config, FileOutcome, GeneratorError,
    Options, RenderEngine, RenderTask, RunResult, ScreenIdResolver, SETTLE_DELAY,
};
use std::path::PathBuf;
use std::time::Instant;
use tokio::fs;
use tokio::time::sleep;
use tracing::{debug, info, warn};

const SEPARATOR: &str = "---";

pub struct Generator {
    config: Config,
    options: Options,
    resolver: ScreenIdResolver,
}

impl Generator {
    pub fn new(config: Config, options: Options) -> Self {
        Self {
            config,
            options,
            resolver: ScreenIdResolver::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: ScreenIdResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn output_root(&self) -> PathBuf {
        self.config.output_root()
    }

    /// Runs the full pipeline with a headless Chromium renderer.
    pub async fn run(&self) -> Result<RunResult, GeneratorError> {
        let files = self.prepare().await?;
        if files.is_empty() {
            println!("No HTML files to render.");
            return Ok(RunResult::default());
        }

        self.print_header();
        let renderer = ChromeRenderer::launch(&self.config, &self.options.viewport()).await?;
        Ok(self.render_all(renderer, &files).await)
    }

    /// Discovers the mockups and makes sure the output directory exists.
    ///
    /// Discovery happens first so a missing `--file` leaves no trace on disk.
    pub async fn prepare(&self) -> Result<Vec<String>, GeneratorError> {
        let files = discover_files(&self.config.mockups_root(), self.options.file.as_deref()).await?;

        let output_root = self.output_root();
        if !fs::try_exists(&output_root).await? {
            fs::create_dir_all(&output_root).await.map_err(|e| {
                GeneratorError::IoError(format!("cannot create {}: {}", output_root.display(), e))
            })?;
            println!("Created output directory: {}", output_root.display());
        }

        Ok(files)
    }

    /// Renders `files` in order with `renderer`, then closes it.
    pub async fn render_all<R: RenderEngine>(&self, mut renderer: R, files: &[String]) -> RunResult {
        let started = Instant::now();
        let mockups_root = self.config.mockups_root();
        let output_root = self.output_root();
        let mut result = RunResult::default();

        for (index, filename) in files.iter().enumerate() {
            let task = RenderTask::new(filename, &self.resolver, &mockups_root, &output_root);
            let outcome = match self.render_one(&mut renderer, &task).await {
                Ok(()) => FileOutcome {
                    filename: task.filename,
                    screen_id: task.screen_id,
                    error: None,
                },
                Err(e) => {
                    warn!("Failed to render {}: {}", task.filename, e);
                    FileOutcome {
                        filename: task.filename,
                        screen_id: task.screen_id,
                        error: Some(e.to_string()),
                    }
                }
            };

            let line = outcome.progress_line(index, files.len());
            if outcome.is_success() {
                println!("{line}");
            } else {
                eprintln!("{line}");
            }
            result.record(outcome);
        }

        if let Err(e) = renderer.close().await {
            warn!("Failed to release browser: {}", e);
        }

        self.print_summary(&result);
        info!(
            "Rendered {} mockups in {}",
            result.total(),
            format_duration(started.elapsed())
        );
        result
    }

    async fn render_one<R: RenderEngine>(
        &self,
        renderer: &mut R,
        task: &RenderTask,
    ) -> Result<(), GeneratorError> {
        debug!("Rendering {} as {}", task.filename, task.screen_id);
        renderer.navigate(&task.input_path).await?;
        sleep(SETTLE_DELAY).await;
        renderer.capture(&task.output_path, self.options.full_page).await
    }

    fn print_header(&self) {
        println!("Generating screenshots...");
        println!("Viewport: {}x{}", self.options.width, self.options.height);
        println!("Scale: {}", self.options.scale);
        println!("Full page: {}", self.options.full_page);
        println!("{SEPARATOR}");
    }

    fn print_summary(&self, result: &RunResult) {
        println!("{SEPARATOR}");
        println!(
            "Completed: {} succeeded, {} failed",
            result.success_count, result.error_count
        );
        println!("Output: {}", self.output_root().display());
    }
}
