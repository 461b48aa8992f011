use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Source formats that can be imported at startup.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportFormat {
    MidicaPl,
    Midi,
    Alda,
    Abc,
    LilyPond,
}

/// Target formats that can be exported at startup.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    MidicaPl,
    Midi,
    Alda,
}

impl ExportFormat {
    /// Only text-based exports can be written to standard output.
    pub fn allows_stdout(self) -> bool {
        match self {
            ExportFormat::MidicaPl | ExportFormat::Alda => true,
            ExportFormat::Midi => false,
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportFormat::MidicaPl => "MidicaPL",
            ImportFormat::Midi => "MIDI",
            ImportFormat::Alda => "ALDA",
            ImportFormat::Abc => "ABC",
            ImportFormat::LilyPond => "LilyPond",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::MidicaPl => "MidicaPL",
            ExportFormat::Midi => "MIDI",
            ExportFormat::Alda => "ALDA",
        };
        f.write_str(name)
    }
}

/// Where an export ends up: a file, or standard output for the `-` sentinel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum ExportDestination {
    File(PathBuf),
    Stdout,
}

impl fmt::Display for ExportDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportDestination::File(path) => write!(f, "{}", path.display()),
            ExportDestination::Stdout => f.write_str("<stdout>"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImportSource {
    pub format: ImportFormat,
    pub path: PathBuf,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub format: ExportFormat,
    pub destination: ExportDestination,
}

/// The startup configuration resolved from the command line.
///
/// Built once by [`crate::parse`] and handed to the session runner by value.
/// `export_error_message` stays `None` until an export has been attempted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ModeState {
    pub cli_mode: bool,
    pub keep_alive: bool,
    pub use_local_config_file: bool,
    pub soundfont: Option<PathBuf>,
    pub import_source: Option<ImportSource>,
    pub export_target: Option<ExportTarget>,
    pub export_error_message: Option<String>,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            cli_mode: false,
            keep_alive: false,
            use_local_config_file: true,
            soundfont: None,
            import_source: None,
            export_target: None,
            export_error_message: None,
        }
    }
}
