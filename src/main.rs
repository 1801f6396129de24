//! `robo-eyes`: run the animated face on the configured screen.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use robo_eyes::animation::IdleBehavior;
use robo_eyes::engine::FaceEngine;
use robo_eyes::error::EyesError;
use robo_eyes::options::Options;
use robo_eyes::script::Script;
use robo_eyes::sink::DriverRegistry;

/// Procedurally animated robot eyes.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Single configuration file with all sections.
    #[arg(long, conflicts_with_all = ["screen_config", "eye_config"])]
    config: Option<PathBuf>,

    /// Screen configuration file.
    #[arg(long, default_value = "screenconfig.toml")]
    screen_config: PathBuf,

    /// Eye and render configuration file.
    #[arg(long, default_value = "eyeconfig.toml")]
    eye_config: PathBuf,

    /// Script to run instead of the built-in demo.
    #[arg(long, conflicts_with = "idle")]
    script: Option<PathBuf>,

    /// Run the random idle behavior until interrupted.
    #[arg(long)]
    idle: bool,

    /// Print the configuration JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
}

fn print_schema() -> Result<(), EyesError> {
    let schema = serde_json::to_string_pretty(&Options::json_schema())
        .map_err(|e| EyesError::OptionsParse(e.to_string()))?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{schema}")?;
    Ok(())
}

fn run(cli: &Cli) -> Result<(), EyesError> {
    if cli.print_schema {
        return print_schema();
    }

    let options = match &cli.config {
        Some(path) => Options::load(path)?,
        None => Options::load_split(&cli.screen_config, &cli.eye_config)?,
    };
    let spec = options.validate()?;

    let mut sink = DriverRegistry::with_builtin().create(&spec)?;
    if let Some(pin) = spec.backlight_pin() {
        log::info!("turning on backlight (GPIO {pin})");
        sink.set_backlight(true)?;
    }

    let handle = FaceEngine::spawn(&options, sink)?;
    let result = if cli.idle || (cli.script.is_none() && options.idle.enabled)
    {
        IdleBehavior::new(&options.idle).run(&handle)
    } else {
        let script = match &cli.script {
            Some(path) => Script::load(path)?,
            None => Script::demo(),
        };
        script.run(&handle)
    };
    let stopped = handle.shutdown();
    stopped.and(result)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
