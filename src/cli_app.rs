//! Top-level CLI definition and dispatch.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use lcd_menu::cli::{self, ScriptError, simulator};
use lcd_menu::core::config::MenuConfig;
use lcd_menu::core::errors::MenuError;
use lcd_menu::display::canvas::TextCanvas;
use lcd_menu::menu::engine::MenuEngine;
use lcd_menu::menu::layout::MenuLayout;

/// Menu simulator: drives a layout on an in-memory LCD.
#[derive(Debug, Parser)]
#[command(
    name = "lcdmenu",
    author,
    version,
    about = "Simulate an LCD menu layout in the terminal",
    long_about = None
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Menu layout (TOML) to load.
    #[arg(long, value_name = "PATH")]
    layout: PathBuf,
    /// Panel width in pixels.
    #[arg(long, default_value_t = 84)]
    width: u16,
    /// Panel height in pixels.
    #[arg(long, default_value_t = 48)]
    height: u16,
    /// Gestures to replay (d = down, u = up, e = enter); prints the final frame.
    #[arg(long, value_name = "GESTURES")]
    script: Option<String>,
    /// Print range and toggle values after the script runs.
    #[arg(long, requires = "script")]
    values: bool,
    /// Increase verbosity.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    pub const fn verbose(&self) -> bool {
        self.verbose
    }
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Menu(#[from] MenuError),
    #[error("{0}")]
    Script(#[from] ScriptError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Menu(_) | Self::Script(_) => 1,
            Self::Io(_) => 2,
        }
    }
}

pub fn run(cli: &Cli) -> Result<(), CliError> {
    let config = MenuConfig::load(cli.config.as_deref())?;
    let layout = MenuLayout::load(&cli.layout)?;
    let (tree, values) = layout.build()?;
    log::debug!(
        "loaded {} tables from {}",
        tree.len(),
        cli.layout.display()
    );

    let mut engine = MenuEngine::new(tree, TextCanvas::new(cli.width, cli.height), &config)?;

    let Some(script) = &cli.script else {
        simulator::run(&mut engine)?;
        return Ok(());
    };

    let gestures = cli::parse_script(script)?;
    engine.draw_menu();
    for gesture in gestures {
        log::debug!("gesture {gesture}");
        gesture.apply(&mut engine);
    }

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", engine.display().frame())?;
    writeln!(stdout, "{}", simulator::status_line(&engine, None))?;
    if cli.values {
        for line in values.summary() {
            writeln!(stdout, "{line}")?;
        }
    }
    Ok(())
}
