// Entrypoint for the CLI application.
// - Keeps `main` small: parse flags, then either run a subcommand once or
//   hand over to the interactive prompts.
// - Returns `anyhow::Result`; an invalid measurement exits non-zero with
//   the message on stderr.

use bmi_calc::config::{Cli, Settings};
use bmi_calc::ui;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // Silent unless RUST_LOG is set.
    env_logger::init();

    if let Some(command) = &cli.command {
        return ui::run_once(command, cli.json);
    }

    let settings = Settings::from_env(&cli)?;

    match ui::run(settings) {
        Err(e) if ui::is_interrupted(&e) => {
            println!("\nBye!");
            Ok(())
        }
        other => other,
    }
}
