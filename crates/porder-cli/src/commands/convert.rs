//! Convert command - render a single purchase order.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::{style, Term};
use tracing::{debug, info};

use super::{load_config, render, FormatArg};

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input file (default: stdin, also when "-")
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Indent XML and JSON output
    #[arg(long)]
    pretty: bool,
}

pub fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(format) = args.format {
        config.output.format = format.into();
    }
    if args.pretty {
        config.output.pretty = true;
    }

    if config.output.format.is_binary() && args.output.is_none() && Term::stdout().is_term() {
        anyhow::bail!(
            "Refusing to write {} output to a terminal. Use -o to choose a file.",
            config.output.format.extension()
        );
    }

    let text = read_input(args.input.as_ref())?;
    let output = render(&text, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        io::stdout().write_all(&output)?;
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_input(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            info!("Converting file: {}", path.display());
            Ok(fs::read_to_string(path)?)
        }
        _ => {
            info!("Converting standard input");
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
