use crate::model::mode::ImportFormat;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status for command line usage errors (sysexits `EX_USAGE`).
pub const EXIT_USAGE: u8 = 64;

/// Exit status for a failed soundfont load, import, or export.
pub const EXIT_FAILURE: u8 = 1;

/// Option families that take a `=PATH` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFamily {
    Soundfont,
    Import,
    Export,
}

impl fmt::Display for OptionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionFamily::Soundfont => "soundfont option",
            OptionFamily::Import => "import format",
            OptionFamily::Export => "export format",
        };
        f.write_str(name)
    }
}

/// Coarse classes of argument errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Help,
    Duplicate,
    InvalidPath,
    Malformed,
    UnknownArgument,
    Semantic,
}

/// Every way that reading the command line can stop the program.
///
/// `HelpRequested` is not a failure, but like all other variants it ends
/// startup before any work is done, so it travels the same path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("help requested")]
    HelpRequested,

    #[error("more than one soundfont given")]
    DuplicateSoundfont,

    #[error("more than one import option given")]
    DuplicateImport,

    #[error("more than one export option given")]
    DuplicateExport,

    #[error("{option}: '-' (standard output) is not allowed here")]
    StdoutNotAllowed { option: String },

    #[error("{option}: missing '=' between option and path")]
    MissingEquals { option: String },

    #[error("{option}: missing value after '='")]
    MissingValue { option: String },

    #[error("unknown {family}: {option}")]
    UnrecognizedOption { family: OptionFamily, option: String },

    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("nothing to do: --cli needs an import option or --keep-alive")]
    NothingToDo,

    #[error("an export option needs an import option")]
    ExportWithoutImport,
}

impl ArgsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArgsError::HelpRequested => ErrorKind::Help,
            ArgsError::DuplicateSoundfont
            | ArgsError::DuplicateImport
            | ArgsError::DuplicateExport => ErrorKind::Duplicate,
            ArgsError::StdoutNotAllowed { .. } => ErrorKind::InvalidPath,
            ArgsError::MissingEquals { .. }
            | ArgsError::MissingValue { .. }
            | ArgsError::UnrecognizedOption { .. } => ErrorKind::Malformed,
            ArgsError::UnknownArgument(_) => ErrorKind::UnknownArgument,
            ArgsError::NothingToDo | ArgsError::ExportWithoutImport => ErrorKind::Semantic,
        }
    }

    pub fn is_help(&self) -> bool {
        self.kind() == ErrorKind::Help
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_help() { 0 } else { EXIT_USAGE }
    }
}

/// Failures while running the work a [`crate::ModeState`] asks for.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not load soundfont: {}", .0.display())]
    Soundfont(PathBuf),

    #[error("could not import {} file: {}", .0, .1.display())]
    Import(ImportFormat, PathBuf),

    #[error("export failed: {0}")]
    Export(String),

    #[error("local config error: {0:#}")]
    Config(anyhow::Error),
}
