//! tpmwire CLI
//!
//! Sends raw TPM commands through a locality session and inspects headers.

use clap::{Parser, Subcommand};
use tpmwire::header::{try_command_size, ResponseHeader};
use tpmwire::transport::DevNode;
use tpmwire::{Config, Session, TpmError};
use tracing_subscriber::{fmt, EnvFilter};

/// tpmwire CLI
#[derive(Parser, Debug)]
#[command(name = "tpmwire")]
#[command(about = "Send raw commands to a TPM and decode response headers")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a command and print the response
    Send {
        /// Command bytes as hex (whitespace allowed)
        #[arg(long)]
        hex: String,

        /// TPM device node
        #[arg(short, long, default_value = "/dev/tpm0")]
        device: String,

        /// Locality to open
        #[arg(short, long, default_value = "0")]
        locality: u8,

        /// Response buffer size in bytes
        #[arg(short, long, default_value = "256")]
        buffer_size: usize,
    },

    /// Decode the size and return code fields of a header
    Parse {
        /// Header bytes as hex (whitespace allowed)
        #[arg(long)]
        hex: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tpmwire=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Send {
            hex,
            device,
            locality,
            buffer_size,
        } => {
            let config = Config::builder()
                .device_path(device)
                .locality(locality)
                .buffer_size(buffer_size)
                .build();
            send(&hex, &config)
        }
        Commands::Parse { hex } => parse(&hex),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn send(hex: &str, config: &Config) -> tpmwire::Result<()> {
    let command = decode_hex(hex)?;
    config.validate()?;

    tracing::info!("tpmwire v{}", tpmwire::VERSION);
    tracing::info!("Device: {}", config.device_path.display());

    let mut device = DevNode::open_path(&config.device_path)?;
    let mut session = Session::open_with(&mut device, config)?;
    let outcome = session.transact(&command);
    session.close()?;
    let response = outcome?;

    println!("rc: 0x{:08x}", response.return_code);
    println!("response: {}", hex::encode(&response.body));
    Ok(())
}

fn parse(hex: &str) -> tpmwire::Result<()> {
    let bytes = decode_hex(hex)?;

    println!("size: {}", try_command_size(&bytes)?);
    match ResponseHeader::parse(&bytes) {
        Ok(header) => println!("rc: 0x{:08x}", header.return_code),
        Err(e) => println!("rc: unavailable ({})", e),
    }
    Ok(())
}

fn decode_hex(text: &str) -> tpmwire::Result<Vec<u8>> {
    let digits: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    hex::decode(digits).map_err(|e| TpmError::Config(format!("invalid hex input: {}", e)))
}
