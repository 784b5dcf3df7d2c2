//! Label command implementation.

use std::fs;
use std::time::{Duration, Instant};

use polylabel::label_all;

use super::common::{OutputFormat, init_logging, labels_to_json, labels_to_svg, load_polygons};
use super::config::LabelConfig;

/// Parsed arguments for `polylabel label`.
#[derive(Debug, Default, PartialEq)]
pub struct LabelArgs {
    pub svg_path: Option<String>,
    pub output: Option<String>,
    pub config: LabelConfig,
}

/// Parse `label` arguments on top of defaults and an optional `--config` file.
///
/// The config file is read first wherever it appears, so flags always win.
pub fn parse_label_args(args: &[String]) -> Result<Option<LabelArgs>, String> {
    let mut parsed = LabelArgs::default();

    if let Some(pos) = args.iter().position(|a| a == "-c" || a == "--config") {
        let path = args.get(pos + 1).ok_or("--config requires a file")?;
        parsed.config = LabelConfig::load(path)?;
    }

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-p" | "--precision" => {
                i += 1;
                let value = args.get(i).ok_or("--precision requires a value")?;
                parsed.config.precision = value
                    .parse()
                    .map_err(|_| format!("Invalid precision: {}", value))?;
            }
            "-f" | "--format" => {
                i += 1;
                let value = args.get(i).ok_or("--format requires a value")?;
                parsed.config.format = OutputFormat::from_name(value)
                    .ok_or_else(|| format!("Unknown format: {} (expected json or svg)", value))?;
            }
            "--deadline-ms" => {
                i += 1;
                let value = args.get(i).ok_or("--deadline-ms requires a value")?;
                let ms: u64 = value
                    .parse()
                    .map_err(|_| format!("Invalid deadline: {}", value))?;
                parsed.config.deadline_ms = Some(ms);
            }
            "-o" | "--output" => {
                i += 1;
                parsed.output = Some(args.get(i).ok_or("--output requires a file")?.clone());
            }
            "-c" | "--config" => {
                // Already applied above
                i += 1;
            }
            "--debug" => parsed.config.debug = true,
            "--parallel" => parsed.config.parallel = true,
            "-h" | "--help" => return Ok(None),
            path if !path.starts_with('-') => {
                if parsed.svg_path.is_none() {
                    parsed.svg_path = Some(path.to_string());
                }
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(Some(parsed))
}

/// Execute the label command.
pub fn cmd_label(args: &[String]) -> Result<(), String> {
    let Some(parsed) = parse_label_args(args)? else {
        print_usage();
        return Ok(());
    };
    init_logging(parsed.config.debug);

    let svg_path = parsed.svg_path.as_deref().ok_or_else(|| {
        print_usage();
        "SVG file required".to_string()
    })?;

    let (svg_content, polygons) = load_polygons(svg_path)?;
    log::info!("loaded {} polygons from {}", polygons.len(), svg_path);

    let options = parsed.config.options();
    let start = Instant::now();
    let batch = label_all(&polygons, &options);
    log::info!(
        "labelled {}/{} polygons in {:?}",
        batch.labelled(),
        polygons.len(),
        start.elapsed()
    );

    if let Some(limit) = options.deadline.filter(|d| *d > Duration::ZERO) {
        let cut = batch.labels.iter().flatten().filter(|l| !l.completed).count();
        if cut > 0 {
            log::warn!("{} labels stopped early at the {:?} deadline", cut, limit);
        }
    }

    let output = match parsed.config.format {
        OutputFormat::Json => labels_to_json(&polygons, &batch)?,
        OutputFormat::Svg => labels_to_svg(&polygons, &batch, &svg_content),
    };

    match parsed.output {
        Some(path) => {
            fs::write(&path, output).map_err(|e| format!("Failed to write {}: {}", path, e))?
        }
        None => print!("{}", output),
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Usage: polylabel label <svg_file> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -p, --precision <n>    Search tolerance in SVG units (default: 1.0)");
    eprintln!("  -f, --format <fmt>     Output format: json, svg (default: json)");
    eprintln!("  -o, --output <file>    Write to file instead of stdout");
    eprintln!("  -c, --config <file>    YAML settings file (flags override it)");
    eprintln!("      --deadline-ms <n>  Stop refining each polygon after n ms");
    eprintln!("      --parallel         Label polygons in parallel");
    eprintln!("      --debug            Log search progress");
}
