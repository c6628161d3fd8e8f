use crate::Options;
use clap::{CommandFactory, Parser};
use regex::Regex;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::OnceLock;

const EXAMPLES: &str = "\
Examples:
  screen-image-generator                             Render every mockup
  screen-image-generator --file 01_task_list.html    Render one mockup
  screen-image-generator --scale 2                   Retina-quality images
  screen-image-generator --fullpage                  Capture the whole page";

#[derive(Parser, Debug, Clone)]
#[command(name = "screen-image-generator")]
#[command(about = "Render HTML mockups into PNG screen images")]
#[command(after_help = EXAMPLES)]
#[command(disable_version_flag = true, args_override_self = true)]
pub struct Cli {
    #[arg(long, value_name = "FILENAME", help = "Render only this file from the mockups directory")]
    pub file: Option<String>,

    #[arg(long, value_name = "PX", default_value_t = 1280, value_parser = leading_int, help = "Viewport width")]
    pub width: u32,

    #[arg(long, value_name = "PX", default_value_t = 800, value_parser = leading_int, help = "Viewport height")]
    pub height: u32,

    #[arg(long, value_name = "FACTOR", default_value_t = 1.0, value_parser = leading_float, help = "Device scale factor")]
    pub scale: f64,

    #[arg(long = "fullpage", help = "Capture the whole scrollable page")]
    pub full_page: bool,

    #[arg(long, value_name = "DIR", help = "Project root containing docs/ (default: current directory)")]
    pub root: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Chrome executable path")]
    pub chrome_path: Option<String>,

    #[arg(long, help = "Enable verbose logging")]
    pub verbose: bool,
}

impl Cli {
    pub fn options(&self) -> Options {
        Options {
            file: self.file.clone().filter(|f| !f.is_empty()),
            width: self.width,
            height: self.height,
            scale: self.scale,
            full_page: self.full_page,
        }
    }
}

fn int_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?[0-9]+").expect("integer prefix regex compiles"))
}

fn float_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
            .expect("float prefix regex compiles")
    })
}

/// Reads the leading decimal integer of `value`, ignoring leading whitespace
/// and anything after the digits (`"1280px"` is 1280, `"1440.5"` is 1440).
fn leading_int(value: &str) -> Result<u32, String> {
    let trimmed = value.trim_start();
    let digits = int_prefix()
        .find(trimmed)
        .ok_or_else(|| format!("'{value}' does not start with a number"))?;
    digits
        .as_str()
        .parse::<i64>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| format!("'{value}' is not a valid pixel size"))
}

/// Reads the leading decimal number of `value` (`"2x"` is 2.0). Text with no
/// numeric prefix is accepted only if it parses whole, as `NaN` does.
fn leading_float(value: &str) -> Result<f64, String> {
    let trimmed = value.trim_start();
    match float_prefix().find(trimmed) {
        Some(number) => number.as_str().parse::<f64>().map_err(|e| e.to_string()),
        None => trimmed
            .parse::<f64>()
            .map_err(|_| format!("'{value}' does not start with a number")),
    }
}

/// Parses raw arguments (program name first) against the [`Cli`] schema.
///
/// Tokens that are not a known `--long` flag are dropped before clap sees
/// them. A flag that takes a value consumes the next token whatever it looks
/// like; a value flag with nothing after it is dropped. A standalone `--help`
/// wins over everything else on the line, including bad values before it,
/// and comes back as an error of kind [`clap::error::ErrorKind::DisplayHelp`].
pub fn resolve_options<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut command = Cli::command();
    command.build();

    let mut args = args.into_iter().map(Into::into);
    let mut known: Vec<OsString> = args.next().into_iter().collect();

    while let Some(token) = args.next() {
        let Some(long) = token.to_str().and_then(|t| t.strip_prefix("--")) else {
            continue;
        };
        if long == "help" {
            known.truncate(1);
            known.push(OsString::from("--help"));
            return Cli::try_parse_from(known);
        }
        let Some(arg) = command.get_arguments().find(|a| a.get_long() == Some(long)) else {
            continue;
        };

        if arg.get_action().takes_values() {
            if let Some(value) = args.next() {
                let mut joined = OsString::from(format!("--{long}="));
                joined.push(value);
                known.push(joined);
            }
        } else {
            known.push(token);
        }
    }

    Cli::try_parse_from(known)
}

pub fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
}
