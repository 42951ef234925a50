use clap::Parser;
use std::path::PathBuf;
use std::thread;

use crate::mode::Mode;

/// Frames produced by the EEVEE render of the Sugar Plum Fairy shot.
pub const DEFAULT_PATTERN: &str = "DanceOfTheSugarPlumFairy_EVEE_v41_*.exr";

pub const DEFAULT_TOOL: &str = "oiiotool";

#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// `dark` sets colorInteropID, `light` erases it
    #[arg(value_enum)]
    pub mode: Mode,

    /// Directory holding the frames; outputs are written next to them
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// File-name glob selecting the input frames
    #[arg(short, long, default_value = DEFAULT_PATTERN, value_parser = check_pattern)]
    pub pattern: String,

    /// Attribute tool to invoke
    #[arg(short, long, default_value = DEFAULT_TOOL)]
    pub tool: PathBuf,

    /// Worker thread hint passed to the tool in dark mode
    #[arg(long, default_value_t = default_threads())]
    pub threads: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self::parse()
    }

    /// Config for `mode` over `dir` with every other option at its default.
    pub fn for_mode(mode: Mode, dir: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            dir: dir.into(),
            pattern: DEFAULT_PATTERN.to_string(),
            tool: PathBuf::from(DEFAULT_TOOL),
            threads: default_threads(),
            verbose: 0,
        }
    }

    /// Thread hint for the tool, if the mode passes one.
    pub fn thread_hint(&self) -> Option<usize> {
        self.mode.passes_thread_hint().then_some(self.threads)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn default_threads() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn check_pattern(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("pattern must not be empty".to_string());
    }
    if s.contains(std::path::is_separator) {
        return Err(format!(
            "{} is not a file-name pattern. Use --dir to choose the directory",
            s
        ));
    }
    glob::Pattern::new(s).map_err(|e| format!("{} is not a valid glob: {}", s, e))?;

    Ok(s.to_string())
}
