use std::process::ExitCode;

use clipsync_lib::bootstrap::{load_config_or_default, resolve_config_path, run_app};

fn main() -> ExitCode {
    let config = match resolve_config_path().and_then(|path| load_config_or_default(&path)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match run_app(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("clipsync failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}
