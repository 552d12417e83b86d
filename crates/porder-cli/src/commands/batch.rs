//! Batch command - convert every file matching a glob pattern.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use porder_core::PorderConfig;

use super::{load_config, render, FormatArg};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of input files
    #[arg(required = true)]
    input: String,

    /// Output directory (default: next to each input file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome of converting a single file.
struct ConvertResult {
    path: PathBuf,
    output: Option<PathBuf>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(format) = args.format {
        config.output.format = format.into();
    }

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to convert",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());
    let mut written = HashSet::new();

    for path in files {
        let result = convert_file(&path, args.output_dir.as_deref(), &config, &mut written);

        match result {
            Ok(output) => {
                debug!("Wrote output to {}", output.display());
                results.push(ConvertResult {
                    path,
                    output: Some(output),
                    error: None,
                });
            }
            Err(e) => {
                error!("Failed to convert {}: {}", path.display(), e);
                let message = e.to_string();
                results.push(ConvertResult {
                    path,
                    output: None,
                    error: Some(message.clone()),
                });

                if !args.continue_on_error {
                    pb.abandon();
                    anyhow::bail!("Conversion failed: {}", message);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let succeeded = results.iter().filter(|r| r.error.is_none()).count();
    let failed = results.len() - succeeded;

    for result in &results {
        match (&result.output, &result.error) {
            (Some(output), _) => eprintln!(
                "  {} {} -> {}",
                style("✓").green(),
                result.path.display(),
                output.display()
            ),
            (None, Some(error)) => eprintln!(
                "  {} {}: {}",
                style("✗").red(),
                result.path.display(),
                error
            ),
            (None, None) => {}
        }
    }

    eprintln!(
        "{} Converted {} files ({} failed) in {:.1}s",
        style("ℹ").blue(),
        succeeded,
        failed,
        start.elapsed().as_secs_f64()
    );

    if failed > 0 {
        anyhow::bail!("{} of {} files failed to convert", failed, results.len());
    }

    Ok(())
}

fn convert_file(
    path: &Path,
    output_dir: Option<&Path>,
    config: &PorderConfig,
    written: &mut HashSet<PathBuf>,
) -> anyhow::Result<PathBuf> {
    let output_path = output_path(path, output_dir, config.output.format.extension());
    if output_path == path {
        anyhow::bail!("Refusing to overwrite input file {}", path.display());
    }
    if written.contains(&output_path) {
        anyhow::bail!(
            "{} was already written by another input in this batch",
            output_path.display()
        );
    }

    let text = fs::read_to_string(path)?;
    let output = render(&text, config)?;
    fs::write(&output_path, output)?;
    written.insert(output_path.clone());

    Ok(output_path)
}

/// `<dir>/<stem>.<extension>`, where `dir` defaults to the input's directory.
fn output_path(input: &Path, output_dir: Option<&Path>, extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    let mut name = stem.to_os_string();
    name.push(".");
    name.push(extension);
    dir.join(name)
}
