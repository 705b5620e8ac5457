//! Command-line parsing and startup wiring.

use crate::config::{Config, ConfigError};
use crate::game::Variant;
use crate::render::CellCanvas;
use crate::session::{run_loop, Clock, Session, SystemClock};
use crate::terminal::{viewport_logical_size, TerminalPump};
use crate::utils::AppDirs;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Play { variant: Option<Variant> },
    WriteConfig { variant: Option<Variant> },
    Version,
    Help,
}

pub const USAGE: &str = "\
Flapper - Terminal Side-Scroller

Usage: flapper [options]

Options:
  --variant <name>  Play classic, compact or arcade
  --write-config    Write the effective config file and exit
  --version         Show version information
  --help            Show this help message";

/// Parse arguments (without the program name).
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<CliAction, String> {
    let mut variant = None;
    let mut write_config = false;
    let mut iter = args.iter().map(|a| a.as_ref());

    while let Some(arg) = iter.next() {
        match arg {
            "--version" | "-v" => return Ok(CliAction::Version),
            "--help" | "-h" => return Ok(CliAction::Help),
            "--write-config" => write_config = true,
            "--variant" => {
                let name = iter
                    .next()
                    .ok_or_else(|| "--variant needs a value".to_string())?;
                variant = Some(name.parse::<Variant>()?);
            }
            other => {
                if let Some(name) = other.strip_prefix("--variant=") {
                    variant = Some(name.parse::<Variant>()?);
                } else {
                    return Err(format!("Unknown argument: {}", other));
                }
            }
        }
    }

    if write_config {
        Ok(CliAction::WriteConfig { variant })
    } else {
        Ok(CliAction::Play { variant })
    }
}

pub struct App {
    dirs: AppDirs,
    config: Config,
}

impl App {
    pub fn new(dirs: AppDirs, config: Config) -> Self {
        Self { dirs, config }
    }

    /// Locate the app directory and load its config. A broken config file
    /// is not fatal: the defaults are used and the error handed back so it
    /// can be logged once logging is up.
    pub fn load(variant: Option<Variant>) -> io::Result<(Self, Option<ConfigError>)> {
        let dirs = AppDirs::locate()?;
        let (mut config, error) = match Config::load(&dirs) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        };
        if let Some(variant) = variant {
            config.variant = variant;
        }
        Ok((Self::new(dirs, config), error))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dirs(&self) -> &AppDirs {
        &self.dirs
    }

    /// Save the effective config. An existing file that failed to load
    /// (`load_error`) is left alone rather than replaced with defaults.
    pub fn write_config(&self, load_error: Option<&ConfigError>) -> Result<PathBuf, ConfigError> {
        if let Some(e) = load_error {
            return Err(ConfigError::Overwrite {
                path: self.dirs.config_path(),
                reason: e.to_string(),
            });
        }
        self.config.save(&self.dirs)?;
        Ok(self.dirs.config_path())
    }

    /// Take over the terminal and play until the player quits. The terminal
    /// is restored before this returns, error or not.
    pub fn run(&self) -> io::Result<()> {
        let config = &self.config;
        let tuning = config.variant.tuning();
        info!(
            variant = %config.variant,
            frame_ms = config.frame_ms,
            "starting"
        );

        let mut pump = TerminalPump::enter(config.key_bindings(), config.frame_ms)?;
        let area = pump.play_area()?;
        let (viewport_w, viewport_h) = viewport_logical_size(area);
        let (width, height) = tuning.surface_size(viewport_w, viewport_h);

        let clock = SystemClock::new();
        let mut session = Session::new(tuning, width, height, clock.now_ms());
        let mut canvas = CellCanvas::new(area.width, area.height, width, height);
        let mut rng = rand::thread_rng();

        let result = run_loop(&mut session, &clock, &mut pump, &mut canvas, &mut rng);
        drop(pump);

        match &result {
            Ok(()) => info!(games = session.sessions_played(), "exiting"),
            Err(e) => warn!(error = %e, "game loop failed"),
        }
        result
    }
}
