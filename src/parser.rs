use crate::error::{ArgsError, OptionFamily};
use crate::model::mode::*;
use log::debug;
use std::path::PathBuf;

/// Path value that stands for standard output.
pub const STDOUT_SENTINEL: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValuedOption {
    Soundfont,
    Import(ImportFormat),
    Export(ExportFormat),
}

/// Every option that takes a `=PATH` value, keyed by its name without the leading `--`.
const VALUED_OPTIONS: &[(&str, ValuedOption)] = &[
    ("soundfont", ValuedOption::Soundfont),
    ("import", ValuedOption::Import(ImportFormat::MidicaPl)),
    ("import-midi", ValuedOption::Import(ImportFormat::Midi)),
    ("import-alda", ValuedOption::Import(ImportFormat::Alda)),
    ("import-abc", ValuedOption::Import(ImportFormat::Abc)),
    ("import-ly", ValuedOption::Import(ImportFormat::LilyPond)),
    ("export", ValuedOption::Export(ExportFormat::MidicaPl)),
    ("export-midi", ValuedOption::Export(ExportFormat::Midi)),
    ("export-alda", ValuedOption::Export(ExportFormat::Alda)),
];

const OPTION_FAMILIES: &[(&str, OptionFamily)] = &[
    ("soundfont", OptionFamily::Soundfont),
    ("import", OptionFamily::Import),
    ("export", OptionFamily::Export),
];

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Help,
    Cli,
    KeepAlive,
    IgnoreLocalConfig,
    Valued {
        option: ValuedOption,
        name: &'a str,
        value: &'a str,
    },
}

/// Parses startup arguments (without the program name) into a [`ModeState`].
///
/// Tokens are read left to right and each one is checked against what has
/// been collected so far, so the second soundfont, import, or export option
/// is the one that fails. Cross-option rules are checked once every token
/// has been read.
pub fn parse<I, S>(args: I) -> Result<ModeState, ArgsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut mode = ModeState::default();

    for arg in args {
        let arg = arg.as_ref();
        match classify(arg)? {
            Token::Help => return Err(ArgsError::HelpRequested),
            Token::Cli => {
                mode.cli_mode = true;
                mode.keep_alive = false;
            }
            Token::KeepAlive => mode.keep_alive = true,
            Token::IgnoreLocalConfig => mode.use_local_config_file = false,
            Token::Valued {
                option,
                name,
                value,
            } => apply_valued(&mut mode, option, name, value)?,
        }
        debug!("Accepted argument '{}'..!", arg);
    }

    validate(&mode)?;
    Ok(mode)
}

/// Parses the arguments this process was started with.
pub fn parse_env() -> Result<ModeState, ArgsError> {
    parse(
        std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned()),
    )
}

fn classify(arg: &str) -> Result<Token<'_>, ArgsError> {
    match arg {
        "--help" => return Ok(Token::Help),
        "--cli" => return Ok(Token::Cli),
        "--keep-alive" => return Ok(Token::KeepAlive),
        "--ignore-local-config" => return Ok(Token::IgnoreLocalConfig),
        _ => {}
    }

    let Some(body) = arg.strip_prefix("--") else {
        return Err(ArgsError::UnknownArgument(arg.to_owned()));
    };

    let (name, value) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };
    let option_name = &arg[..2 + name.len()];

    if let Some(&(_, option)) = VALUED_OPTIONS.iter().find(|(known, _)| *known == name) {
        return match value {
            None => Err(ArgsError::MissingEquals {
                option: option_name.to_owned(),
            }),
            Some("") => Err(ArgsError::MissingValue {
                option: option_name.to_owned(),
            }),
            Some(value) => Ok(Token::Valued {
                option,
                name: option_name,
                value,
            }),
        };
    }

    if let Some(&(_, family)) = OPTION_FAMILIES
        .iter()
        .find(|(prefix, _)| name.starts_with(prefix))
    {
        return Err(ArgsError::UnrecognizedOption {
            family,
            option: option_name.to_owned(),
        });
    }

    Err(ArgsError::UnknownArgument(arg.to_owned()))
}

fn apply_valued(
    mode: &mut ModeState,
    option: ValuedOption,
    name: &str,
    value: &str,
) -> Result<(), ArgsError> {
    let stdout_not_allowed = || ArgsError::StdoutNotAllowed {
        option: name.to_owned(),
    };

    match option {
        ValuedOption::Soundfont => {
            if mode.soundfont.is_some() {
                return Err(ArgsError::DuplicateSoundfont);
            }
            if value == STDOUT_SENTINEL {
                return Err(stdout_not_allowed());
            }
            mode.soundfont = Some(PathBuf::from(value));
        }
        ValuedOption::Import(format) => {
            if mode.import_source.is_some() {
                return Err(ArgsError::DuplicateImport);
            }
            if value == STDOUT_SENTINEL {
                return Err(stdout_not_allowed());
            }
            mode.import_source = Some(ImportSource {
                format,
                path: PathBuf::from(value),
            });
        }
        ValuedOption::Export(format) => {
            if mode.export_target.is_some() {
                return Err(ArgsError::DuplicateExport);
            }
            let destination = if value == STDOUT_SENTINEL {
                if !format.allows_stdout() {
                    return Err(stdout_not_allowed());
                }
                ExportDestination::Stdout
            } else {
                ExportDestination::File(PathBuf::from(value))
            };
            mode.export_target = Some(ExportTarget {
                format,
                destination,
            });
        }
    }

    Ok(())
}

fn validate(mode: &ModeState) -> Result<(), ArgsError> {
    if mode.cli_mode && mode.import_source.is_none() && !mode.keep_alive {
        return Err(ArgsError::NothingToDo);
    }

    if mode.export_target.is_some() && mode.import_source.is_none() {
        return Err(ArgsError::ExportWithoutImport);
    }

    Ok(())
}
