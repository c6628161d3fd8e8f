//! Filename to screen identifier mapping
//!
//! Screen IDs look like `SCR-TASK-001` and are referenced from the rest of the
//! documentation. Known mockups are listed in a fixed table; anything else
//! named `<number>_<name>.html` gets an ID derived from its number and name.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

const DEFAULT_MAPPING: &[(&str, &str)] = &[
    ("01_task_list.html", "SCR-TASK-001"),
    ("02_task_new.html", "SCR-TASK-002"),
    ("03_task_detail.html", "SCR-TASK-003"),
    ("04_task_edit.html", "SCR-TASK-004"),
    ("05_error_404.html", "SCR-CMN-001"),
    ("06_error_500.html", "SCR-CMN-002"),
];

/// Name prefixes checked in order; the first hit decides the code.
const PREFIX_RULES: &[(&str, FunctionalCode)] = &[
    ("task_", FunctionalCode::Task),
    ("task", FunctionalCode::Task),
    ("category_", FunctionalCode::Cat),
    ("cat", FunctionalCode::Cat),
    ("error_", FunctionalCode::Cmn),
    ("error", FunctionalCode::Cmn),
];

fn numbered_mockup() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // [0-9] rather than \d: only ASCII digits count as a screen number
    RE.get_or_init(|| Regex::new(r"^([0-9]+)_(.+)\.html$").expect("mockup filename regex compiles"))
}

/// Feature area a screen belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionalCode {
    Task,
    Cat,
    Cmn,
}

impl FunctionalCode {
    pub fn classify(name: &str) -> Self {
        PREFIX_RULES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|(_, code)| *code)
            .unwrap_or(FunctionalCode::Cmn)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionalCode::Task => "TASK",
            FunctionalCode::Cat => "CAT",
            FunctionalCode::Cmn => "CMN",
        }
    }
}

impl fmt::Display for FunctionalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable table of filenames with hand-assigned screen IDs
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenIdMapping {
    entries: BTreeMap<String, String>,
}

impl ScreenIdMapping {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, filename: &str) -> Option<&str> {
        self.entries.get(filename).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ScreenIdMapping {
    fn default() -> Self {
        Self::new(DEFAULT_MAPPING.iter().copied())
    }
}

/// Resolves mockup filenames to screen IDs
///
/// Resolution never fails and depends only on the filename and the table the
/// resolver was built with.
///
/// # Examples
///
/// ```rust
/// use screen_image_generator::ScreenIdResolver;
///
/// let resolver = ScreenIdResolver::default();
/// assert_eq!(resolver.resolve("01_task_list.html"), "SCR-TASK-001");
/// assert_eq!(resolver.resolve("7_category_list.html"), "SCR-CAT-007");
/// assert_eq!(resolver.resolve("readme.html"), "readme");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScreenIdResolver {
    mapping: ScreenIdMapping,
}

impl ScreenIdResolver {
    pub fn new(mapping: ScreenIdMapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &ScreenIdMapping {
        &self.mapping
    }

    pub fn resolve(&self, filename: &str) -> String {
        if let Some(id) = self.mapping.get(filename) {
            return id.to_string();
        }

        let Some(caps) = numbered_mockup().captures(filename) else {
            return filename
                .strip_suffix(".html")
                .unwrap_or(filename)
                .to_string();
        };

        let code = FunctionalCode::classify(&caps[2]);
        format!("SCR-{}-{:0>3}", code, &caps[1])
    }
}
