// LogSheet - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. Preset loading and logging initialisation
// 3. Loading the log file into a session
// 4. Listing columns, or exporting the filtered and summarised table

use clap::{Parser, ValueEnum};
use logsheet::app::session::{Progress, Session};
use logsheet::app::settings::ExportSettings;
use logsheet::core::export::ExportFormat;
use logsheet::platform::config;
use logsheet::util::{self, constants};
use std::path::{Path, PathBuf};

/// LogSheet - Instrument log to spreadsheet converter.
///
/// Extracts the data table that follows the `***DATA***` marker, keeps the
/// rows whose filter column lies within a range, adds an elapsed-hours column
/// and writes the selected columns under a row of averages.
#[derive(Parser, Debug)]
#[command(name = "LogSheet", version, about)]
struct Cli {
    /// Instrument log file to read.
    input: PathBuf,

    /// Lower bound of the filter range (inclusive).
    #[arg(long = "low", allow_hyphen_values = true, required_unless_present = "list_columns")]
    low: Option<String>,

    /// Upper bound of the filter range (inclusive).
    #[arg(long = "high", allow_hyphen_values = true, required_unless_present = "list_columns")]
    high: Option<String>,

    /// Output file (defaults to `<input>_filtered.<ext>` next to the input).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output format (defaults to the output extension, then xlsx).
    #[arg(long = "format", value_enum)]
    format: Option<FormatArg>,

    /// TOML preset with columns, summary and sheet settings.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Column the range applies to (overrides the preset).
    #[arg(long = "filter-column")]
    filter_column: Option<String>,

    /// Comma-separated output columns, in order (overrides the preset).
    #[arg(long = "columns", value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Print the columns of the data table and exit.
    #[arg(long = "list-columns")]
    list_columns: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Xlsx,
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // The preset may carry the log level, so it is read before logging starts.
    let (app_config, config_warnings) = match config::load_config(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    util::logging::init(cli.debug, app_config.log_level.as_deref());
    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "LogSheet starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Preset warning");
    }

    if let Err(e) = run(&cli, ExportSettings::from_config(&app_config)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, mut settings: ExportSettings) -> util::error::Result<()> {
    let mut session = Session::new();
    session.load(&cli.input, report)?;
    println!("{}", session.state().status_message);
    for warning in &session.state().warnings {
        println!("  warning: {warning}");
    }

    if cli.list_columns {
        for (i, name) in session.state().columns().iter().enumerate() {
            println!("{:>4}  {name}", i + 1);
        }
        return Ok(());
    }

    if let Some(ref column) = cli.filter_column {
        settings.filter_column = column.clone();
    }
    if let Some(ref columns) = cli.columns {
        settings.output_columns = columns.iter().map(|c| c.trim().to_string()).collect();
    }
    settings.format = resolve_format(cli.format, cli.output.as_deref());

    let dest = match cli.output {
        Some(ref path) => path.clone(),
        None => default_output_path(&cli.input, settings.format),
    };
    let low = cli.low.as_deref().unwrap_or_default();
    let high = cli.high.as_deref().unwrap_or_default();

    session.export(&settings, low, high, &dest, report)?;
    println!("{}", session.state().status_message);
    Ok(())
}

fn report(progress: Progress) {
    println!("[{:>3}%] {}", progress.percent, progress.stage.label());
}

/// Explicit flag, then the output extension, then xlsx.
fn resolve_format(flag: Option<FormatArg>, output: Option<&Path>) -> ExportFormat {
    flag.map(ExportFormat::from)
        .or_else(|| output.and_then(ExportFormat::from_path))
        .unwrap_or_default()
}

/// `<dir>/<stem>_filtered.<ext>` beside the input file.
fn default_output_path(input: &Path, format: ExportFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!(
        "{stem}{}.{}",
        constants::DEFAULT_OUTPUT_SUFFIX,
        format.extension()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        let path = default_output_path(Path::new("/data/run 7.txt"), ExportFormat::Xlsx);
        assert_eq!(path, PathBuf::from("/data/run 7_filtered.xlsx"));
    }

    #[test]
    fn test_format_resolution_order() {
        assert_eq!(resolve_format(None, None), ExportFormat::Xlsx);
        assert_eq!(
            resolve_format(None, Some(Path::new("out.CSV"))),
            ExportFormat::Csv
        );
        assert_eq!(
            resolve_format(Some(FormatArg::Json), Some(Path::new("out.csv"))),
            ExportFormat::Json
        );
    }

    #[test]
    fn test_cli_accepts_negative_bounds() {
        let cli = Cli::parse_from(["logsheet", "run.txt", "--low", "-0.5", "--high", "2"]);
        assert_eq!(cli.low.as_deref(), Some("-0.5"));
        assert_eq!(cli.high.as_deref(), Some("2"));
    }

    #[test]
    fn test_cli_list_columns_needs_no_bounds() {
        let cli = Cli::try_parse_from(["logsheet", "run.txt", "--list-columns"]).unwrap();
        assert!(cli.list_columns);
        assert!(Cli::try_parse_from(["logsheet", "run.txt"]).is_err());
    }

    #[test]
    fn test_cli_column_list_split() {
        let cli = Cli::parse_from([
            "logsheet", "run.txt", "--low", "1", "--high", "2", "--columns", "a,b (x),c",
        ]);
        assert_eq!(
            cli.columns,
            Some(vec!["a".to_string(), "b (x)".to_string(), "c".to_string()])
        );
    }
}
