use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::errors::{Result, TagError};
use crate::mode::AttributeOperation;
use crate::traits::AttributeTool;

/// OpenImageIO's `oiiotool` run as a subprocess.
///
/// Stdout and stderr are inherited so the tool's own diagnostics reach the
/// user verbatim.
#[derive(Debug, Clone)]
pub struct OiioTool {
    program: PathBuf,
    leading_args: Vec<OsString>,
}

impl OiioTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Arguments placed before the generated ones, for launchers such as
    /// `sh script` or `flatpak run ...`.
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// `<input> --sattrib|--eraseattrib ... [--threads n] -o <output>`
    pub fn command_args(
        input: &Path,
        operation: &AttributeOperation,
        threads: Option<usize>,
        output: &Path,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![input.into()];

        match operation {
            AttributeOperation::Set { name, value } => {
                args.push("--sattrib".into());
                args.push(name.into());
                args.push(value.into());
            }
            AttributeOperation::Erase { name } => {
                args.push("--eraseattrib".into());
                args.push(name.into());
            }
        }

        if let Some(threads) = threads {
            args.push("--threads".into());
            args.push(threads.to_string().into());
        }

        args.push("-o".into());
        args.push(output.into());
        args
    }
}

impl Default for OiioTool {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TOOL)
    }
}

impl AttributeTool for OiioTool {
    fn apply(
        &self,
        input: &Path,
        operation: &AttributeOperation,
        threads: Option<usize>,
        output: &Path,
    ) -> Result<()> {
        let args = Self::command_args(input, operation, threads, output);
        log::trace!(
            "exec {} {:?} {:?}",
            self.program.display(),
            self.leading_args,
            args
        );

        let status = Command::new(&self.program)
            .args(&self.leading_args)
            .args(&args)
            .status()
            .map_err(|e| TagError::ToolLaunch {
                program: self.program.display().to_string(),
                source: e,
            })?;

        if !status.success() {
            return Err(TagError::ToolFailed {
                path: input.to_path_buf(),
                code: status.code(),
            });
        }

        Ok(())
    }

    fn name(&self) -> String {
        self.program.display().to_string()
    }
}
