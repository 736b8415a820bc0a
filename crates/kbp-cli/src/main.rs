//! `kbp`: program the ml8 keyboard OLED over raw HID.

use std::process::ExitCode;

use clap::Parser;
use kbp_cli::{run, Cli, CliError, KbpConfig};
use kbp_client::KeyboardClient;
use kbp_device::HidContext;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8, config_filter: Option<&str>) {
    let default_filter = match verbose {
        0 => config_filter.unwrap_or("warn"),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(cli: &Cli, config: &KbpConfig) -> Result<(), CliError> {
    let query = config.device_query(cli.device.as_deref())?;
    debug!("Device query: {}", query);

    let context = HidContext::new()?;
    let mut client = KeyboardClient::new(context, query);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(&mut client, &cli.command, &mut stdin.lock(), &mut stdout.lock())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(KbpConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(cli.verbose, config.log_filter.as_deref());

    match execute(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
