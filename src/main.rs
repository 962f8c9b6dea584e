//! `diagram-render` — render diagram text to board primitives as JSON.
//!
//! Reads a flowchart or sequence diagram from a file (or stdin), runs the
//! full pipeline, and prints the resulting shapes, connectors, and frames to
//! stdout. Logs go to stderr so the JSON stays pipeable.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use diagrams::{ConvertOptions, DiagramError, LayoutConfig, ParseMode};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Diagram(#[from] DiagramError),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "diagram-render", about = "Render Mermaid-style diagram text as positioned board shapes")]
struct Cli {
    /// Input file; reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Left edge of the diagram on the board.
    #[arg(long, allow_hyphen_values = true)]
    start_x: Option<f64>,

    /// Top edge of the diagram on the board.
    #[arg(long, allow_hyphen_values = true)]
    start_y: Option<f64>,

    #[arg(long)]
    node_width: Option<f64>,

    #[arg(long)]
    node_height: Option<f64>,

    /// Draw flowchart nodes as stencil shapes.
    #[arg(long, env = "DIAGRAM_USE_STENCILS")]
    stencils: bool,

    /// Reject lines that match no grammar rule.
    #[arg(long)]
    strict: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Print only the one-line summary instead of JSON.
    #[arg(long)]
    summary: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Diagram(e)) => {
            tracing::error!(code = e.code(), line = e.line, "{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let text = read_input(cli.input.as_deref())?;
    let config = layout_config(cli);
    let options = ConvertOptions { use_stencils: cli.stencils };
    let mode = if cli.strict { ParseMode::Strict } else { ParseMode::Tolerant };

    let output = diagrams::render_with_mode(&text, mode, &config, &options)?;
    let summary = output.summary();
    tracing::info!(%summary, "render complete");

    if cli.summary {
        println!("{summary}");
        return Ok(());
    }
    let rendered = if cli.pretty { serde_json::to_string_pretty(&output)? } else { serde_json::to_string(&output)? };
    println!("{rendered}");
    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> Result<String, CliError> {
    match path {
        Some(p) if p.as_os_str() != "-" => Ok(std::fs::read_to_string(p)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Environment first, then explicit flags on top.
fn layout_config(cli: &Cli) -> LayoutConfig {
    let mut config = LayoutConfig::from_env();
    if let Some(x) = cli.start_x {
        config.start_x = x;
    }
    if let Some(y) = cli.start_y {
        config.start_y = y;
    }
    if let Some(w) = cli.node_width {
        config.node_width = w;
    }
    if let Some(h) = cli.node_height {
        config.node_height = h;
    }
    config
}
