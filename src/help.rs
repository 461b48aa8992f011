use crate::error::ArgsError;
use clap::{Arg, ArgAction, Command};
use log::error;
use std::io::{self, Write};

/// Stream a formatted message belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Help goes to standard output, diagnostics to standard error.
pub fn stream_for(is_help_requested: bool) -> OutputStream {
    if is_help_requested {
        OutputStream::Stdout
    } else {
        OutputStream::Stderr
    }
}

/// Describes the startup flags for rendering only; [`crate::parse`] does the parsing.
pub fn command() -> Command {
    let valued = |id: &'static str, help: &'static str| {
        Arg::new(id)
            .long(id)
            .value_name("PATH")
            .require_equals(true)
            .action(ArgAction::Set)
            .help(help)
    };
    let flag = |id: &'static str, help: &'static str| {
        Arg::new(id).long(id).action(ArgAction::SetTrue).help(help)
    };

    Command::new("midica")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compose, import, export and play MIDI sequences.")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(flag("help", "Print this message and exit."))
        .arg(flag(
            "cli",
            "Run without a GUI. Exits after the import/export work unless --keep-alive is given.",
        ))
        .arg(flag("keep-alive", "Don't exit after the command line work is done."))
        .arg(flag(
            "ignore-local-config",
            "Don't read or write the local config file (~/.midica.conf).",
        ))
        .arg(valued("soundfont", "Load the given soundfont file (SF2 or DLS)."))
        .arg(valued("import", "Import the given MidicaPL file."))
        .arg(valued("import-midi", "Import the given MIDI file."))
        .arg(valued("import-alda", "Import the given ALDA file."))
        .arg(valued("import-abc", "Import the given ABC file."))
        .arg(valued("import-ly", "Import the given LilyPond file."))
        .arg(valued(
            "export",
            "Export to the given MidicaPL file. PATH '-' prints to standard output.",
        ))
        .arg(valued("export-midi", "Export to the given MIDI file."))
        .arg(valued(
            "export-alda",
            "Export to the given ALDA file. PATH '-' prints to standard output.",
        ))
        .after_help("Exit status: 0 on success, 64 on a command line usage error, 1 if the requested work failed.")
}

/// Formats the help text, preceded by `message` as an error line if one is given.
pub fn format(is_help_requested: bool, message: Option<&str>) -> String {
    let help = command().render_help().to_string();
    let mut out = String::new();

    if let Some(message) = message {
        if is_help_requested {
            out.push_str(message);
        } else {
            out.push_str("Error: ");
            out.push_str(message);
        }
        out.push_str("\n\n");
    }

    out.push_str(help.trim_end());
    out.push('\n');
    out
}

/// Writes the formatted text to the stream chosen by [`stream_for`].
pub fn emit(is_help_requested: bool, message: Option<&str>) -> io::Result<()> {
    let text = format(is_help_requested, message);

    match stream_for(is_help_requested) {
        OutputStream::Stdout => io::stdout().lock().write_all(text.as_bytes()),
        OutputStream::Stderr => io::stderr().lock().write_all(text.as_bytes()),
    }
}

/// Prints help or the diagnostic for `err` and returns the exit status to use.
pub fn report(err: &ArgsError) -> u8 {
    let result = if err.is_help() {
        emit(true, None)
    } else {
        emit(false, Some(&err.to_string()))
    };

    if let Err(why) = result {
        error!("Failed to print usage: {}", why);
    }

    err.exit_code()
}
