use crate::config::load_config;
use crate::geometry::Point;
use crate::render::{render_svg, write_output_svg};
use crate::request::RouteRequest;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "orthoc",
    version,
    about = "Orthogonal connector routing between two rectangles"
)]
pub struct Args {
    /// Request file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme and preview settings)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Draw candidate visibility nodes in the SVG preview
    #[arg(long = "show-nodes")]
    pub show_nodes: bool,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Svg,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if args.show_nodes {
        config.render.show_nodes = true;
    }

    let input = read_input(args.input.as_deref())?;
    let request = RouteRequest::from_json(&input).context("Invalid route request")?;

    let outcome = request.trace();
    match args.output_format {
        OutputFormat::Json => {
            let trace = outcome?;
            write_output_json(&trace.path, args.output.as_deref())?;
        }
        OutputFormat::Svg => {
            let svg = render_svg(&request, outcome.as_ref(), &config);
            write_output_svg(&svg, args.output.as_deref())?;
            outcome?;
        }
    }
    info!("connector routed");
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when `run` is embedded.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()));
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn path_to_json(path: &[Point]) -> Result<String> {
    Ok(serde_json::to_string_pretty(path)?)
}

fn write_output_json(path: &[Point], output: Option<&Path>) -> Result<()> {
    let json = path_to_json(path)?;
    match output {
        Some(file) => {
            std::fs::write(file, format!("{json}\n"))?;
        }
        None => {
            println!("{json}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let args = Args::try_parse_from([
            "orthoc", "-i", "scene.json", "-e", "svg", "-o", "out.svg", "--show-nodes", "-vv",
        ])
        .unwrap();
        assert_eq!(args.input.as_deref(), Some(Path::new("scene.json")));
        assert_eq!(args.output_format, OutputFormat::Svg);
        assert!(args.show_nodes);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn defaults_to_json_on_stdout() {
        let args = Args::try_parse_from(["orthoc"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.input.is_none());
        assert!(args.output.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Args::try_parse_from(["orthoc", "-e", "png"]).is_err());
    }

    #[test]
    fn path_serializes_as_point_objects() {
        let json = path_to_json(&[Point::new(30.0, 15.0), Point::new(50.0, 15.0)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["x"], 30.0);
        assert_eq!(value[1]["y"], 15.0);
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }
}
