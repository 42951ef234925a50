use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::errors::{Result, TagError};

/// Header attribute both modes act on.
pub const COLOR_INTEROP_ATTRIBUTE: &str = "colorInteropID";

/// Value written by dark mode.
pub const LINEAR_REC709_SCENE: &str = "lin_rec709_scene";

/// A single header edit handed to the attribute tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeOperation {
    Set { name: String, value: String },
    Erase { name: String },
}

impl AttributeOperation {
    pub fn name(&self) -> &str {
        match self {
            Self::Set { name, .. } | Self::Erase { name } => name,
        }
    }
}

impl fmt::Display for AttributeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { name, value } => write!(f, "set {}={:?}", name, value),
            Self::Erase { name } => write!(f, "erase {}", name),
        }
    }
}

/// Batch variant.
///
/// `Dark` tags every frame with the scene-linear Rec.709 interop ID and
/// resumes by skipping frames whose output already exists. `Light` strips the
/// tag and always regenerates its outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Dark,
    Light,
}

impl Mode {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn operation(self) -> AttributeOperation {
        match self {
            Self::Dark => AttributeOperation::Set {
                name: COLOR_INTEROP_ATTRIBUTE.to_string(),
                value: LINEAR_REC709_SCENE.to_string(),
            },
            Self::Light => AttributeOperation::Erase {
                name: COLOR_INTEROP_ATTRIBUTE.to_string(),
            },
        }
    }

    /// Whether an existing output lets the input be skipped.
    pub const fn skips_existing(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Whether the tool is given a worker thread hint.
    pub const fn passes_thread_hint(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// `<dir>/<prefix>_<file name>` next to the input.
    pub fn output_path(self, input: &Path) -> Result<PathBuf> {
        let file_name = input
            .file_name()
            .ok_or_else(|| TagError::Validation {
                field: format!("input {:?}", input),
                reason: "has no file name".to_string(),
            })?;

        let mut output_name = OsString::from(self.prefix());
        output_name.push("_");
        output_name.push(file_name);
        Ok(match input.parent() {
            Some(parent) => parent.join(output_name),
            None => PathBuf::from(output_name),
        })
    }

    /// Whether `file_name` looks like something either mode wrote.
    pub fn is_output_name(file_name: &OsStr) -> bool {
        let bytes = file_name.as_encoded_bytes();
        Self::value_variants()
            .iter()
            .any(|mode| bytes.starts_with(format!("{}_", mode.prefix()).as_bytes()))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_prefixes_file_name() -> Result<()> {
        let input = Path::new("shots/DanceOfTheSugarPlumFairy_EVEE_v41_001.exr");

        assert_eq!(
            Mode::Dark.output_path(input)?,
            Path::new("shots/dark_DanceOfTheSugarPlumFairy_EVEE_v41_001.exr")
        );
        assert_eq!(
            Mode::Light.output_path(input)?,
            Path::new("shots/light_DanceOfTheSugarPlumFairy_EVEE_v41_001.exr")
        );
        Ok(())
    }

    #[test]
    fn test_output_path_bare_file_name() -> Result<()> {
        assert_eq!(
            Mode::Dark.output_path(Path::new("frame.exr"))?,
            Path::new("dark_frame.exr")
        );
        Ok(())
    }

    #[test]
    fn test_output_path_rejects_missing_file_name() {
        let err = Mode::Dark.output_path(Path::new("..")).unwrap_err();
        assert!(matches!(err, TagError::Validation { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_output_path_keeps_non_utf8_name() -> Result<()> {
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new("shots").join(OsStr::from_bytes(b"frame_\xff.exr"));
        let output = Mode::Dark.output_path(&input)?;

        assert_eq!(
            output.file_name().map(OsStr::as_bytes),
            Some(&b"dark_frame_\xff.exr"[..])
        );
        Ok(())
    }

    #[test]
    fn test_is_output_name() {
        assert!(Mode::is_output_name(OsStr::new("dark_plate_0001.exr")));
        assert!(Mode::is_output_name(OsStr::new("light_plate_0001.exr")));
        assert!(!Mode::is_output_name(OsStr::new("plate_0001.exr")));
        assert!(!Mode::is_output_name(OsStr::new("darkroom_0001.exr")));
    }

    #[test]
    fn test_mode_operations() {
        assert_eq!(
            Mode::Dark.operation(),
            AttributeOperation::Set {
                name: "colorInteropID".to_string(),
                value: "lin_rec709_scene".to_string(),
            }
        );
        assert_eq!(
            Mode::Light.operation(),
            AttributeOperation::Erase {
                name: "colorInteropID".to_string(),
            }
        );
        assert_eq!(Mode::Light.operation().name(), COLOR_INTEROP_ATTRIBUTE);
    }

    #[test]
    fn test_only_dark_skips_and_hints_threads() {
        assert!(Mode::Dark.skips_existing());
        assert!(Mode::Dark.passes_thread_hint());
        assert!(!Mode::Light.skips_existing());
        assert!(!Mode::Light.passes_thread_hint());
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(
            Mode::Dark.operation().to_string(),
            "set colorInteropID=\"lin_rec709_scene\""
        );
        assert_eq!(Mode::Light.operation().to_string(), "erase colorInteropID");
    }
}
