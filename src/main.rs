// SPDX-License-Identifier: MPL-2.0
use cineview::config::PlayerConfig;
use cineview::player;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = pico_args::Arguments::from_env();
    let title: Option<String> = match args.opt_value_from_str("--title") {
        Ok(title) => title,
        Err(e) => {
            eprintln!("cineview: {e}");
            return ExitCode::FAILURE;
        }
    };
    let source = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    let Some(source) = source else {
        eprintln!("usage: cineview [--title <title>] <video-file>");
        return ExitCode::FAILURE;
    };

    let mut config = PlayerConfig::new(source);
    if let Some(title) = title {
        config.window_title = title;
    }

    match player::run(&config) {
        Ok(stats) => {
            log::info!("playback finished, {} frames presented", stats.frames_presented);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("cineview: {e}");
            ExitCode::FAILURE
        }
    }
}
