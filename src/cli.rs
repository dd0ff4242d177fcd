use crate::qr::{self, QrSettings};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::net::IpAddr;
use std::path::Path;

#[derive(Parser)]
#[command(name = "qr_code_generator")]
#[command(about = "QR code generator HTTP service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    #[command(about = "Start the HTTP server (default)")]
    Serve {
        /// Port to listen on; overrides PORT
        #[arg(long)]
        port: Option<u16>,
        /// Address to bind; defaults to 0.0.0.0
        #[arg(long)]
        address: Option<IpAddr>,
    },
    #[command(about = "Render a single QR code to a PNG file")]
    Render {
        #[arg(long)]
        text: String,
        /// Output path, or `-` for stdout
        #[arg(long, default_value = "-")]
        output: String,
    },
}

pub fn handle_render_command(
    text: &str,
    output: &str,
    settings: &QrSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    if text.is_empty() {
        return Err("No text provided".into());
    }

    let png = qr::render_png(text, settings)?;

    if output == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&png)?;
        stdout.flush()?;
    } else {
        std::fs::write(Path::new(output), &png)
            .map_err(|e| format!("failed to write {output}: {e}"))?;
        tracing::info!(output = %output, bytes = png.len(), "qr code written");
    }

    Ok(())
}
