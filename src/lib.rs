pub mod config;
pub mod errors;
pub mod mode;
pub mod tool;
pub mod traits;

pub mod mocks;

use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

pub use config::Config;
pub use errors::{Result, TagError};
pub use mode::{AttributeOperation, Mode};
pub use tool::OiioTool;
pub use traits::*;

/// Outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.written.len()
    }
}

/// Runs the attribute tool over every frame matching the configured pattern,
/// one frame at a time, stopping at the first failure.
pub struct BatchTagger<T: AttributeTool> {
    tool: T,
    config: Config,
}

impl<T: AttributeTool> BatchTagger<T> {
    pub const fn new(tool: T, config: Config) -> Self {
        Self { tool, config }
    }

    pub const fn tool(&self) -> &T {
        &self.tool
    }

    pub fn process_directory(&self) -> Result<BatchSummary> {
        let mode = self.config.mode;
        let operation = mode.operation();
        let threads = self.config.thread_hint();
        let mut summary = BatchSummary::default();

        let inputs = self.collect_input_files()?;
        if inputs.is_empty() {
            log::info!(
                "No files match {} in {}",
                self.config.pattern,
                self.config.dir.display()
            );
            return Ok(summary);
        }

        log::info!(
            "{} mode: {} over {} file(s) with {}",
            mode,
            operation,
            inputs.len(),
            self.tool.name()
        );

        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .map_err(anyhow::Error::from)?
                .progress_chars("#>-"),
        );

        for input in &inputs {
            let output = mode.output_path(input)?;

            if mode.skips_existing() && self.output_exists(&output)? {
                pb.suspend(|| {
                    println!(
                        "Skipping {}: {} already exists",
                        input.display(),
                        output.display()
                    )
                });
                summary.skipped.push(input.clone());
                pb.inc(1);
                continue;
            }

            log::debug!("{} -> {}", input.display(), output.display());
            // The tool writes straight to the terminal; keep the bar out of its way.
            let applied = pb.suspend(|| self.tool.apply(input, &operation, threads, &output));
            if let Err(e) = applied {
                pb.abandon();
                return Err(e);
            }
            summary.written.push(output);
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(summary)
    }

    /// Regular files in the working directory matching the pattern, in glob
    /// order. Files already carrying a mode prefix are never inputs.
    pub fn collect_input_files(&self) -> Result<Vec<PathBuf>> {
        let dir = &self.config.dir;
        let full_pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy()))
            .join(&self.config.pattern)
            .to_string_lossy()
            .into_owned();

        let entries = glob::glob(&full_pattern).map_err(|e| TagError::Pattern {
            pattern: full_pattern.clone(),
            source: e,
        })?;

        let mut inputs = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| TagError::FileSystem {
                path: e.path().to_path_buf(),
                operation: "glob enumeration".to_string(),
                source: e.into(),
            })?;
            if !path.is_file() {
                continue;
            }
            // Broad patterns such as `*.exr` also match earlier results.
            if path.file_name().is_some_and(Mode::is_output_name) {
                log::debug!("Ignoring previous output {}", path.display());
                continue;
            }
            inputs.push(path);
        }

        Ok(inputs)
    }

    fn output_exists(&self, output: &Path) -> Result<bool> {
        output.try_exists().map_err(|e| TagError::FileSystem {
            path: output.to_path_buf(),
            operation: "output existence check".to_string(),
            source: e,
        })
    }
}

impl BatchTagger<OiioTool> {
    pub fn with_oiiotool(config: Config) -> Self {
        let tool = OiioTool::new(config.tool.clone());
        Self::new(tool, config)
    }
}
