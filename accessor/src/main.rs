use std::path::PathBuf;

use accessor_build::{AccessorGenerator, DEFAULT_OUTPUT, Error};
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "accessor")]
#[command(version)]
#[command(
    about = "Generate getter/setter methods for fields tagged with #[accessor]",
    long_about = r#"Generate getter/setter methods for fields tagged with #[accessor].

Loads one module (a directory holding lib.rs, main.rs or mod.rs, or a list of
files naming the same module) and writes the accessors into a child module
file next to the module's other children.

Tags:
  #[accessor = "Get,Set"]     pub getter and setter named GetField/SetField
  #[accessor = "get,Custom"]  pub(super) getter named getCustom
"#
)]
struct Cli {
    /// Output file name, placed in the module's child directory
    #[arg(long, env = "ACCESSOR_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: String,

    /// Comma separated cargo features to enable while evaluating #[cfg]
    #[arg(long, env = "ACCESSOR_FEATURES", value_delimiter = ',')]
    features: Vec<String>,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Module directory or source files (default: current directory)
    targets: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if let Err(err) = execute(cli) {
        if let Some(source_text) = err.downcast_ref::<Error>().and_then(Error::source_text) {
            println!("{source_text}");
        }
        eprintln!("accessor: {err:#}");
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    let written = AccessorGenerator::new()
        .targets(cli.targets)
        .features(cli.features)
        .output_file(cli.output)
        .run()?;
    log::debug!("done: {}", written.display());
    Ok(())
}
