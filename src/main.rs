//! wave2text CLI - build pulse train waveforms interactively.
//!
//! Usage:
//!   wave2text
//!   wave2text --config-dir ~/pulses --sample-rate 20000
//!   wave2text -vv

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use wave2text::config::fields;
use wave2text::{AppConfig, Prompter, Session};

const LOGO: &str = r#"
   _          _   ___       _____   _____
  / \        / | |   |    _|     | |     \
-'   \  /\  /  |_|   |   |       | |      `-
      \/  \/         |___|       |_|
"#;

#[derive(Parser)]
#[command(
    name = "wave2text",
    version,
    about = "Build pulse train waveforms and export them as text"
)]
struct Cli {
    /// Directory containing settings.json and the pulse file
    #[arg(short, long, default_value = ".")]
    config_dir: PathBuf,

    /// Settings file name inside the config directory
    #[arg(short, long, default_value = "settings.json")]
    settings_file: String,

    /// Directory exported waveforms are written to (defaults to <config-dir>/saved)
    #[arg(long)]
    saved_dir: Option<PathBuf>,

    /// Sampling rate for this run, overriding settings and environment (not saved)
    #[arg(short = 'r', long, value_parser = parse_sample_rate)]
    sample_rate: Option<f64>,

    /// Ignore WAVE2TEXT_* environment overrides
    #[arg(long)]
    no_env: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_sample_rate(arg: &str) -> Result<f64, String> {
    let rate: f64 = arg.parse().map_err(|_| format!("'{arg}' is not a number"))?;
    fields::sample_rate_hz().validate(rate)?;
    Ok(rate)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    println!("wave2text {}\n{LOGO}", env!("CARGO_PKG_VERSION"));

    let mut builder = AppConfig::builder()
        .config_dir(&cli.config_dir)
        .settings_file(&cli.settings_file);
    if let Some(saved_dir) = &cli.saved_dir {
        builder = builder.saved_dir(saved_dir);
    }
    if let Some(rate) = cli.sample_rate {
        builder = builder.sample_rate_hz(rate);
    }
    if cli.no_env {
        builder = builder.without_env();
    }
    let config = builder.build();
    log::debug!("{config:?}");

    let prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let result = Session::open(config, prompter).and_then(|mut session| session.run());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
