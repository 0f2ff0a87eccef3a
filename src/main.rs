use std::path::PathBuf;

use clap::builder::TypedValueParser;
use clap::{Parser, ValueEnum};
use flightcodes_tools::clean::{DEFAULT_SEQUENCE_STEP, FillPolicy, RouteCase};
use flightcodes_tools::io::{delimited, render};
use flightcodes_tools::pipeline::{self, EMBEDDED_DATASET, PipelineOptions};
use flightcodes_tools::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let output = render_output(&cli)?;
    println!("{output}");
    Ok(())
}

fn render_output(cli: &Cli) -> Result<String> {
    let options = cli.pipeline_options();
    let table = match &cli.input {
        Some(path) => {
            let table = delimited::read_table_from_path(path)?;
            pipeline::transform(table, &options)?
        }
        None => pipeline::run(EMBEDDED_DATASET, &options)?,
    };

    let output = match cli.format {
        OutputFormat::Table => render::render_table(&table, cli.rows),
        OutputFormat::Json => render::render_json(&table, cli.rows)?,
    };
    Ok(output)
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Clean airline codes, fill flight codes, and split routes in a flight listing."
)]
struct Cli {
    /// Semicolon-delimited input file. The bundled sample is used when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Number of rows to print, at most 10.
    #[arg(
        long,
        default_value_t = render::MAX_ROW_LIMIT,
        value_parser = clap::value_parser!(u16).range(0..=10).map(usize::from)
    )]
    rows: usize,

    /// Strategy used to recover missing flight codes.
    #[arg(long, value_enum, default_value_t = FillKind::Interpolate)]
    fill: FillKind,

    /// Spacing of the generated codes when `--fill sequence` is selected.
    #[arg(long, default_value_t = DEFAULT_SEQUENCE_STEP, value_parser = clap::value_parser!(i64).range(1..))]
    step: i64,

    /// Letter case for the split route locations.
    #[arg(long = "case", value_enum, default_value_t = CaseKind::Upper)]
    case: CaseKind,

    /// Output representation.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl Cli {
    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            fill: match self.fill {
                FillKind::Interpolate => FillPolicy::Interpolate,
                FillKind::Sequence => FillPolicy::Sequence { step: self.step },
            },
            route_case: self.case.into(),
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FillKind {
    Interpolate,
    Sequence,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CaseKind {
    Upper,
    Title,
}

impl From<CaseKind> for RouteCase {
    fn from(kind: CaseKind) -> Self {
        match kind {
            CaseKind::Upper => RouteCase::Upper,
            CaseKind::Title => RouteCase::Title,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}
