#![forbid(unsafe_code)]

//! lcdmenu: terminal simulator for LCD menu layouts.

use clap::Parser;

mod cli_app;

fn main() {
    let args = cli_app::Cli::parse();
    let default_level = if args.verbose() { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init();

    if let Err(e) = cli_app::run(&args) {
        eprintln!("lcdmenu: {e}");
        std::process::exit(e.exit_code());
    }
}
