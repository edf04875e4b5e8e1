use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};
use tokio::runtime::Runtime;
use tokio::signal;

use imagekit::api::ImageKit;
use imagekit::cli::{Cli, Operation, Parser};
use imagekit::config::{ApiConfig, Credentials};

const SPINNER_FINISH_MODE: ProgressFinish = ProgressFinish::AndClear;
const SPINNER_TICK_SECS: f32 = 0.1;

#[inline]
fn build_spinner() -> ProgressBar {
    ProgressBar::new_spinner()
        .with_finish(SPINNER_FINISH_MODE)
        .with_style(
            ProgressStyle::with_template("{spinner:.blue} {msg}")
                .unwrap()
                // NOTE: use `ascii` only, because cmd/powershell maybe not support unicode.
                .tick_strings(&[".  ", ".. ", "...", " ..", "  .", "   "]),
        )
}

#[inline]
async fn async_main(config: ApiConfig, operation: Operation) -> anyhow::Result<()> {
    let credentials = Credentials::from_env().context("failed to read ImageKit keys")?;
    let client = ImageKit::new(credentials, &config).context("failed to build ImageKit client")?;

    let spinner = build_spinner();
    spinner.set_message(format!("{}...", operation.describe()));
    spinner.enable_steady_tick(Duration::from_secs_f32(SPINNER_TICK_SECS));
    let description = operation.describe();
    let output = operation
        .execute(&client)
        .await
        .with_context(|| format!("{description} failed"))?;
    spinner.finish_and_clear();

    match output {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => println!("{description}: done"),
    }
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let Cli {
        config,
        operation,
        ..
    } = Cli::parse();
    let config = config.unwrap_or_default();

    let runtime = Runtime::new().context("failed to build tokio runtime")?;
    runtime.block_on(async {
        tokio::select! {
            result = async_main(config, operation) => {result},
            result = signal::ctrl_c() => {
                result.expect("failed to listen for ctrl-c signal");
                eprintln!("Ctrl-C received, exiting...");
                Ok(())
            },
        }
    })?;

    Ok(ExitCode::SUCCESS)
}
