use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use faculty_registry::{load_seed, logging, AppConfig, Console, Registry, Style};

#[derive(Parser)]
#[command(version, about)]
struct Options {
    /// TOML or JSON settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Faculty records to load before the menu starts. Overrides the
    /// config file's `seed_file`.
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Print headings and status lines without colour.
    #[arg(long)]
    no_color: bool,

    /// Log filter directive, e.g. `debug`. `RUST_LOG` still wins.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = Options::parse();

    let mut config = match &options.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed_file = Some(seed);
    }
    if let Some(level) = options.log_level {
        config.log_level = level;
    }
    if options.no_color {
        config.color = false;
    }

    if let Err(err) = logging::try_init(&config.log_level) {
        eprintln!("Logging disabled: {err}");
    }

    let mut registry = Registry::new();
    if let Some(path) = &config.seed_file {
        let summary = registry.seed(load_seed(path)?);
        println!(
            "Loaded {} faculty record(s) from {}",
            summary.added,
            path.display()
        );
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(
        &mut registry,
        stdin.lock(),
        stdout.lock(),
        Style::new(config.color),
    )
    .run()?;

    Ok(())
}
