use crate::controller::UiController;
use crate::model::mode::*;
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info, warn};
use midly::Smf;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::Path;

const RIFF_MAGIC: &[u8; 4] = b"RIFF";
const SOUNDFONT_FORMS: &[&[u8; 4]] = &[b"sfbk", b"DLS "];

/// A controller for runs without a window.
///
/// Standard MIDI files are validated on import and written back out on
/// export. Formats that need a compiler or an external converter are
/// reported as failures.
#[derive(Debug, Default)]
pub struct HeadlessController {
    soundfont: Option<String>,
    sequence: Option<Vec<u8>>,
}

impl HeadlessController {
    pub fn new() -> Self {
        Self::default()
    }

    fn import(&self, format: ImportFormat, path: &Path) -> Result<Vec<u8>> {
        if format != ImportFormat::Midi {
            bail!("{} import is not available without the GUI..!", format);
        }

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read MIDI file {}", path.display()))?;
        let smf = Smf::parse(&bytes).map_err(|e| anyhow!("Failed to parse MIDI: {:?}", e))?;

        debug!(
            "MIDI format: {:?}, timing: {:?}, tracks: {}",
            smf.header.format,
            smf.header.timing,
            smf.tracks.len()
        );

        Ok(bytes)
    }

    fn export(&self, format: ExportFormat, destination: &ExportDestination) -> Result<()> {
        let Some(bytes) = self.sequence.as_ref() else {
            bail!("No sequence loaded..!");
        };

        if format != ExportFormat::Midi {
            bail!("{} export is not available without the GUI..!", format);
        }

        let ExportDestination::File(path) = destination else {
            bail!("MIDI cannot be exported to standard output..!");
        };

        let smf = Smf::parse(bytes).map_err(|e| anyhow!("Failed to parse MIDI: {:?}", e))?;
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        smf.write_std(&mut writer)
            .with_context(|| format!("Failed to write MIDI file {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write MIDI file {}", path.display()))?;

        info!("Exported MIDI file: '{}'..!", path.display());
        Ok(())
    }
}

fn soundfont_name(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut bytes = [0u8; 12];

    match file.read_exact(&mut bytes) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
            bail!("{} is not a RIFF file..!", path.display());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    }

    if &bytes[0..4] != RIFF_MAGIC {
        bail!("{} is not a RIFF file..!", path.display());
    }
    if !SOUNDFONT_FORMS.iter().any(|form| &bytes[8..12] == *form) {
        bail!("{} is neither an SF2 nor a DLS soundfont..!", path.display());
    }

    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("{} has no file name..!", path.display()))
}

impl UiController for HeadlessController {
    fn load_soundfont(&mut self, path: &Path) {
        self.soundfont = match soundfont_name(path) {
            Ok(name) => Some(name),
            Err(why) => {
                warn!("{:#}", why);
                None
            }
        };
    }

    fn soundfont_file_name(&self) -> Option<String> {
        self.soundfont.clone()
    }

    fn import_file(&mut self, format: ImportFormat, path: &Path) {
        self.sequence = match self.import(format, path) {
            Ok(bytes) => Some(bytes),
            Err(why) => {
                warn!("{:#}", why);
                None
            }
        };
    }

    fn has_sequence(&self) -> bool {
        self.sequence.is_some()
    }

    fn export_file(
        &mut self,
        format: ExportFormat,
        destination: &ExportDestination,
    ) -> Option<String> {
        self.export(format, destination)
            .err()
            .map(|why| format!("{:#}", why))
    }
}
