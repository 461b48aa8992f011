use anyhow::Result;
use log::{debug, error, info, warn};
use midica::{EXIT_FAILURE, HeadlessController, Lifecycle, parse_env, report, run, wait_for_interrupt};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    env_logger::init();

    let mut mode = match parse_env() {
        Ok(mode) => mode,
        Err(err) => return Ok(ExitCode::from(report(&err))),
    };
    debug!("Startup mode: {:?}", mode);

    if !mode.cli_mode {
        warn!("No GUI front-end in this build, running headless..!");
    }

    let mut controller = HeadlessController::new();
    let lifecycle = match run(&mut mode, &mut controller) {
        Ok(lifecycle) => lifecycle,
        Err(why) => {
            error!("{}", why);
            eprintln!("Error: {}", why);
            return Ok(ExitCode::from(EXIT_FAILURE));
        }
    };

    if lifecycle == Lifecycle::KeepAlive {
        wait_for_interrupt()?;
    }

    info!("Done, exiting..!");
    Ok(ExitCode::SUCCESS)
}
