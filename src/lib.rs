//! # Screen Image Generator
//!
//! Renders the HTML mockups under `docs/mockups` into PNG screen images under
//! `docs/screen/images`, using headless Chromium. Every image is named after
//! the screen ID the rest of the documentation uses for that screen
//! (`SCR-TASK-001.png`, `SCR-CMN-002.png`, ...).
//!
//! ## Pipeline
//!
//! 1. Resolve command-line options ([`resolve_options`]).
//! 2. Discover mockups: one explicit `--file`, or every `.html` file sorted by
//!    name ([`discover_files`]).
//! 3. For each file, derive its screen ID ([`ScreenIdResolver`]), load it in
//!    the shared browser page, wait 500 ms and capture a screenshot.
//! 4. Print a progress line per file and a summary at the end.
//!
//! Files are rendered one at a time. A file that fails to load or capture is
//! reported and counted; it never stops the rest of the batch.
//!
//! ## Screen IDs
//!
//! | Filename                 | Screen ID      | Rule                      |
//! |--------------------------|----------------|---------------------------|
//! | `01_task_list.html`      | `SCR-TASK-001` | fixed table               |
//! | `05_error_404.html`      | `SCR-CMN-001`  | fixed table               |
//! | `11_category_edit.html`  | `SCR-CAT-011`  | `<num>_<name>.html`       |
//! | `10_custom_feature.html` | `SCR-CMN-010`  | `<num>_<name>.html`       |
//! | `task_done.html`         | `task_done`    | anything else: file stem  |
//!
//! ## CLI Usage
//!
//! ```bash
//! screen-image-generator                           # all mockups
//! screen-image-generator --file 01_task_list.html  # one mockup
//! screen-image-generator --scale 2                 # Retina quality
//! screen-image-generator --fullpage                # whole page
//! ```

/// Configuration and run records
pub mod config;

/// Error types and error handling utilities
pub mod error;

/// Command-line interface implementation
pub mod cli;

/// Mockup discovery
pub mod discovery;

/// Filename to screen ID resolution
pub mod screen_id;

/// Headless browser rendering
pub mod renderer;

/// Batch orchestration
pub mod generator;

/// Utility functions and helpers
pub mod utils;


pub use cli::*;
pub use config::*;
pub use discovery::*;
pub use error::*;
pub use generator::*;
pub use renderer::*;
pub use screen_id::*;
pub use utils::*;
