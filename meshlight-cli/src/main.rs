/// Meshlight command line
///
/// Loads a mesh, reorients it and writes the highlight or gradient payload
/// as JSON. Set `RUST_LOG` to change log verbosity (default `info`, on stderr).
use clap::Parser;
use meshlight_cli::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::debug!("Parsed command line: {:?}.", cli);

    meshlight_cli::run(cli)
}
