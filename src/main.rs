use flapper::app::{parse_args, App, CliAction, USAGE};
use flapper::{build_info, logging};
use std::io;
use tracing::{info, warn};

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().skip(1).collect();

    let (variant, write_config) = match parse_args(&args) {
        Ok(CliAction::Version) => {
            println!("{}", build_info::version_line());
            std::process::exit(0);
        }
        Ok(CliAction::Help) => {
            println!("{}", USAGE);
            std::process::exit(0);
        }
        Ok(CliAction::Play { variant }) => (variant, false),
        Ok(CliAction::WriteConfig { variant }) => (variant, true),
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'flapper --help' for usage.");
            std::process::exit(1);
        }
    };

    let (app, config_error) = App::load(variant)?;

    if write_config {
        return match app.write_config(config_error.as_ref()) {
            Ok(path) => {
                println!("Wrote {}", path.display());
                Ok(())
            }
            Err(e) => {
                eprintln!("Could not write config: {}", e);
                std::process::exit(1);
            }
        };
    }

    // Logging failures only cost us the log file.
    if let Err(e) = logging::init(app.dirs(), &app.config().log_filter) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    match config_error {
        Some(e) => warn!(error = %e, "config not loaded, using defaults"),
        None => info!(path = %app.dirs().config_path().display(), "config loaded"),
    }

    app.run()
}
