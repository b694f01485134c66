//! DevAddr CLI - Main entry point
//!
//! Drives a [`DevAddrInput`] from the terminal: every command feeds events
//! into the input and prints the resulting view and form-state bag.

mod config;
mod service;
mod sinks;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use devaddr_core::{ByteOrder, ExportFormat};
use devaddr_input::{
    DevAddrInput, DeviceIdentifier, InputView, MemoryForm, RandomDevAddrService, RandomOutcome,
};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::service::{LocalDevAddrService, RestDevAddrService};
use crate::sinks::{LogNotifier, StdoutClipboard};

#[derive(Parser, Debug)]
#[command(name = "devaddr")]
#[command(about = "Normalize, convert, export and generate LoRaWAN device addresses")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "devaddr.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed raw text through the input
    Normalize {
        raw: String,
        /// Byte order the text is typed in
        #[arg(long, default_value = "msb")]
        order: ByteOrder,
    },
    /// Switch the byte order of a value
    Convert {
        value: String,
        #[arg(long, default_value = "msb")]
        from: ByteOrder,
        #[arg(long)]
        to: ByteOrder,
    },
    /// Copy a value to the clipboard (stdout)
    Export {
        value: String,
        #[arg(long, value_enum, default_value_t = FormatArg::HexString)]
        format: FormatArg,
        /// Behave as if no clipboard were available
        #[arg(long)]
        no_clipboard: bool,
    },
    /// Generate a random DevAddr
    Random {
        /// Device EUI (overrides the configured one)
        #[arg(long)]
        dev_eui: Option<String>,
        /// Generate locally instead of asking the network server
        #[arg(long)]
        offline: bool,
    },
    /// Check a value against the field's validation rule
    Validate {
        value: String,
        /// Treat the field as required
        #[arg(long)]
        required: bool,
    },
    /// Write a default configuration file
    InitConfig { path: Option<PathBuf> },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    HexString,
    HexArray,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::HexString => ExportFormat::HexString,
            FormatArg::HexArray => ExportFormat::HexArray,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    view: InputView,
    form: &'a HashMap<String, String>,
}

fn print_report(input: &DevAddrInput<MemoryForm>) -> Result<()> {
    let report = Report {
        view: input.view(),
        form: input.form().fields(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if let Command::InitConfig { path } = &args.command {
        let path = path.as_ref().unwrap_or(&args.config);
        config::save_default_config(path)?;
        info!(path = %path.display(), "Wrote default configuration");
        return Ok(());
    }

    let mut config = config::load_config(&args.config)?;

    match args.command {
        Command::Normalize { raw, order } => {
            let mut input = DevAddrInput::new(config.input, MemoryForm::new());
            input.on_byte_order_change(order);
            input.on_raw_input(&raw);
            print_report(&input)?;
        }
        Command::Convert { value, from, to } => {
            let mut input = DevAddrInput::new(config.input, MemoryForm::new());
            input.on_byte_order_change(from);
            input.on_raw_input(&value);
            input.on_byte_order_change(to);
            print_report(&input)?;
        }
        Command::Export {
            value,
            format,
            no_clipboard,
        } => {
            let mut input = DevAddrInput::new(config.input, MemoryForm::new());
            input.on_raw_input(&value);
            let clipboard = StdoutClipboard::new(!no_clipboard);
            input
                .copy_to_clipboard(format.into(), &clipboard, &LogNotifier)
                .await;
        }
        Command::Random { dev_eui, offline } => {
            if let Some(dev_eui) = dev_eui {
                config.input.dev_eui = DeviceIdentifier::new(dev_eui);
            }

            let service: Box<dyn RandomDevAddrService> = if offline {
                Box::new(LocalDevAddrService::new(&config.generator)?)
            } else {
                Box::new(RestDevAddrService::new(&config.api)?)
            };

            let mut input = DevAddrInput::new(config.input, MemoryForm::new());
            match input.request_random(service.as_ref()).await {
                RandomOutcome::Applied(_) => print_report(&input)?,
                RandomOutcome::Failed(e) => bail!("Random DevAddr request failed: {}", e),
                outcome => bail!("Random DevAddr discarded: {:?}", outcome),
            }
        }
        Command::Validate { value, required } => {
            config.input.required |= required;
            let input = DevAddrInput::new(config.input, MemoryForm::new());
            input.validation_rule().evaluate(Some(&value))?;
            println!("valid");
        }
        // Handled before loading configuration
        Command::InitConfig { .. } => {}
    }

    Ok(())
}
