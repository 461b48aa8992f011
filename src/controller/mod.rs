use crate::error::SessionError;
use crate::model::config::LocalConfig;
use crate::model::mode::*;
use log::{debug, info, warn};
use std::path::Path;

pub mod headless;

/// The collaborator that does the actual soundfont, import, and export work.
///
/// Failures are observed through state, not return values: a soundfont that
/// failed to load leaves no file name, a failed import leaves no sequence,
/// and a failed export hands back its error message.
pub trait UiController {
    fn load_soundfont(&mut self, path: &Path);

    /// File name of the loaded soundfont, if one is loaded.
    fn soundfont_file_name(&self) -> Option<String>;

    fn import_file(&mut self, format: ImportFormat, path: &Path);

    fn has_sequence(&self) -> bool;

    /// Returns the error message if the export failed.
    fn export_file(
        &mut self,
        format: ExportFormat,
        destination: &ExportDestination,
    ) -> Option<String>;

    fn import_source(&mut self, source: &ImportSource) -> bool {
        self.import_file(source.format, &source.path);
        self.has_sequence()
    }
}

/// What the process should do once the startup work is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Exit,
    KeepAlive,
}

impl Lifecycle {
    /// Only a command line run without `--keep-alive` ends on its own; a GUI run stays up.
    pub fn for_mode(mode: &ModeState) -> Self {
        if mode.cli_mode && !mode.keep_alive {
            Lifecycle::Exit
        } else {
            Lifecycle::KeepAlive
        }
    }
}

/// Runs the soundfont, import, and export work `mode` asks for, in that order.
///
/// With a `config`, a remembered soundfont is used when none was given, and a
/// soundfont given on the command line is remembered once it loads. An export
/// failure is recorded in `mode.export_error_message`.
pub fn run_session<C: UiController>(
    mode: &mut ModeState,
    controller: &mut C,
    mut config: Option<&mut LocalConfig>,
) -> Result<Lifecycle, SessionError> {
    let remembered = config.as_deref().and_then(|config| config.soundfont.clone());
    let (soundfont, from_cli) = match (&mode.soundfont, remembered) {
        (Some(path), _) => (Some(path.clone()), true),
        (None, Some(path)) => (Some(path), false),
        (None, None) => (None, false),
    };

    if let Some(path) = soundfont {
        info!("Loading soundfont '{}'..!", path.display());
        controller.load_soundfont(&path);

        match controller.soundfont_file_name() {
            Some(name) => {
                debug!("Soundfont '{}' loaded..!", name);
                // remembered soundfonts must load from any working directory
                if from_cli && let Some(config) = config.as_deref_mut() {
                    config.soundfont = Some(std::path::absolute(&path).unwrap_or(path));
                }
            }
            None if from_cli => return Err(SessionError::Soundfont(path)),
            None => warn!(
                "Remembered soundfont '{}' could not be loaded, continuing without it..!",
                path.display()
            ),
        }
    }

    if let Some(source) = &mode.import_source {
        info!(
            "Importing {} file '{}'...",
            source.format,
            source.path.display()
        );
        if !controller.import_source(source) {
            return Err(SessionError::Import(source.format, source.path.clone()));
        }
    }

    if let Some(target) = &mode.export_target {
        info!("Exporting {} to {}...", target.format, target.destination);
        if let Some(message) = controller.export_file(target.format, &target.destination) {
            mode.export_error_message = Some(message.clone());
            return Err(SessionError::Export(message));
        }
    }

    Ok(Lifecycle::for_mode(mode))
}

/// [`run_session`] backed by the config file at `path`, which is written back if it changed.
pub fn run_with_config_file<C: UiController>(
    mode: &mut ModeState,
    controller: &mut C,
    path: &Path,
) -> Result<Lifecycle, SessionError> {
    let mut config = LocalConfig::load(path).map_err(SessionError::Config)?;
    let before = config.clone();

    let lifecycle = run_session(mode, controller, Some(&mut config))?;

    if config != before {
        config.store(path).map_err(SessionError::Config)?;
    }

    Ok(lifecycle)
}

/// Runs the session, using the local config file unless `--ignore-local-config` was given.
pub fn run<C: UiController>(
    mode: &mut ModeState,
    controller: &mut C,
) -> Result<Lifecycle, SessionError> {
    if !mode.use_local_config_file {
        debug!("Ignoring local config file..!");
        return run_session(mode, controller, None);
    }

    let path = LocalConfig::default_path().map_err(SessionError::Config)?;
    run_with_config_file(mode, controller, &path)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parse;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingController {
        broken_soundfonts: Vec<PathBuf>,
        import_fails: bool,
        export_error: Option<String>,
        soundfont: Option<String>,
        sequence: bool,
        calls: Vec<String>,
    }

    impl UiController for RecordingController {
        fn load_soundfont(&mut self, path: &Path) {
            self.calls.push(format!("soundfont {}", path.display()));
            self.soundfont = if self.broken_soundfonts.iter().any(|p| p == path) {
                None
            } else {
                path.file_name().map(|n| n.to_string_lossy().into_owned())
            };
        }

        fn soundfont_file_name(&self) -> Option<String> {
            self.soundfont.clone()
        }

        fn import_file(&mut self, format: ImportFormat, path: &Path) {
            self.calls.push(format!("import {} {}", format, path.display()));
            self.sequence = !self.import_fails;
        }

        fn has_sequence(&self) -> bool {
            self.sequence
        }

        fn export_file(
            &mut self,
            format: ExportFormat,
            destination: &ExportDestination,
        ) -> Option<String> {
            self.calls.push(format!("export {} {}", format, destination));
            self.export_error.clone()
        }
    }

    #[test]
    fn work_runs_in_order() {
        env_logger::try_init().unwrap_or(());

        let mut mode = parse([
            "--cli",
            "--export=-",
            "--import-midi=in.mid",
            "--soundfont=gm.sf2",
        ])
        .unwrap();
        let mut controller = RecordingController::default();

        let lifecycle = run_session(&mut mode, &mut controller, None).unwrap();

        assert_eq!(lifecycle, Lifecycle::Exit);
        assert_eq!(
            controller.calls,
            [
                "soundfont gm.sf2",
                "import MIDI in.mid",
                "export MidicaPL <stdout>"
            ]
        );
        assert!(mode.export_error_message.is_none());
    }

    #[test]
    fn gui_and_keep_alive_stay_up() {
        let mode = parse(Vec::<String>::new()).unwrap();
        assert_eq!(Lifecycle::for_mode(&mode), Lifecycle::KeepAlive);

        let mode = parse(["--cli", "--keep-alive"]).unwrap();
        assert_eq!(Lifecycle::for_mode(&mode), Lifecycle::KeepAlive);

        let mode = parse(["--cli", "--import=x.mpl"]).unwrap();
        assert_eq!(Lifecycle::for_mode(&mode), Lifecycle::Exit);
    }

    #[test]
    fn soundfont_failure_stops_session() {
        let mut mode = parse(["--cli", "--soundfont=bad.sf2", "--import=x.mpl"]).unwrap();
        let mut controller = RecordingController {
            broken_soundfonts: vec![PathBuf::from("bad.sf2")],
            ..Default::default()
        };

        let result = run_session(&mut mode, &mut controller, None);

        assert!(matches!(result, Err(SessionError::Soundfont(p)) if p == Path::new("bad.sf2")));
        assert_eq!(controller.calls.len(), 1);
    }

    #[test]
    fn import_failure_stops_session() {
        let mut mode = parse(["--cli", "--import-abc=x.abc", "--export=out.mpl"]).unwrap();
        let mut controller = RecordingController {
            import_fails: true,
            ..Default::default()
        };

        let result = run_session(&mut mode, &mut controller, None);

        assert!(matches!(result, Err(SessionError::Import(ImportFormat::Abc, _))));
        assert!(controller.calls.iter().all(|c| !c.starts_with("export")));
    }

    #[test]
    fn export_failure_is_recorded() {
        let mut mode = parse(["--cli", "--import=x.mpl", "--export-alda=-"]).unwrap();
        let mut controller = RecordingController {
            export_error: Some("alda exporter unavailable".into()),
            ..Default::default()
        };

        let result = run_session(&mut mode, &mut controller, None);

        assert!(matches!(result, Err(SessionError::Export(_))));
        assert_eq!(
            mode.export_error_message.as_deref(),
            Some("alda exporter unavailable")
        );
    }

    #[test]
    fn remembered_soundfont_is_used() {
        let mut mode = parse(["--cli", "--import=x.mpl"]).unwrap();
        let mut config = LocalConfig {
            soundfont: Some(PathBuf::from("saved.sf2")),
            ..Default::default()
        };
        let mut controller = RecordingController::default();

        run_session(&mut mode, &mut controller, Some(&mut config)).unwrap();

        assert_eq!(controller.calls[0], "soundfont saved.sf2");
    }

    #[test]
    fn broken_remembered_soundfont_is_not_fatal() {
        let mut mode = parse(["--cli", "--import=x.mpl"]).unwrap();
        let mut config = LocalConfig {
            soundfont: Some(PathBuf::from("gone.sf2")),
            ..Default::default()
        };
        let mut controller = RecordingController {
            broken_soundfonts: vec![PathBuf::from("gone.sf2")],
            ..Default::default()
        };

        assert!(run_session(&mut mode, &mut controller, Some(&mut config)).is_ok());
        assert!(controller.has_sequence());
    }

    #[test]
    fn cli_soundfont_is_remembered() {
        env_logger::try_init().unwrap_or(());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".midica.conf");
        let mut mode = parse(["--cli", "--soundfont=sf/new.sf2", "--import=x.mpl"]).unwrap();
        let mut controller = RecordingController::default();

        run_with_config_file(&mut mode, &mut controller, &path).unwrap();

        let stored = LocalConfig::load(&path).unwrap().soundfont.unwrap();
        assert!(stored.is_absolute(), "{}", stored.display());
        assert!(stored.ends_with("sf/new.sf2"));
        assert_eq!(stored, std::env::current_dir().unwrap().join("sf/new.sf2"));
    }

    #[test]
    fn unchanged_config_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".midica.conf");
        let mut mode = parse(["--cli", "--import=x.mpl"]).unwrap();
        let mut controller = RecordingController::default();

        run_with_config_file(&mut mode, &mut controller, &path).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn ignored_config_is_never_touched() {
        let mut mode = parse(["--cli", "--ignore-local-config", "--import=x.mpl"]).unwrap();
        let mut controller = RecordingController::default();

        assert_eq!(run(&mut mode, &mut controller).unwrap(), Lifecycle::Exit);
        assert!(controller.calls.iter().all(|c| !c.starts_with("soundfont")));
    }
}
