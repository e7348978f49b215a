mod commands;
mod output;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gpzu",
    version,
    about = "Extract structured data from Russian urban development plans (GPZU)"
)]
struct Cli {
    /// Directory of raw extraction records
    #[arg(long, global = true, env = "GPZU_CACHE_DIR", default_value = "cache")]
    cache_dir: PathBuf,

    /// Header rule file, or a directory of rule files (default: built-in RU and RF rules)
    #[arg(long, global = true, env = "GPZU_RULES", value_name = "PATH")]
    rules: Option<PathBuf>,

    /// Path to the tabula-java jar used for table extraction
    #[arg(long, global = true, env = "GPZU_TABULA_JAR", default_value = "tabula.jar")]
    tabula_jar: PathBuf,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Grouped, human-readable listing
    Table,
    /// The nested result as JSON
    Json,
    /// One row per subzone combination, tab-separated
    Flat,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a plan PDF into the structured result
    Parse {
        /// Path to the plan PDF
        input_file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,

        /// Write the result as JSON to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Read tables from an xlsx workbook (one sheet per table) instead of tabula
        #[arg(long, value_name = "XLSX")]
        tables: Option<PathBuf>,

        /// Judge plan status as of this date (YYYY-MM-DD) instead of today
        #[arg(long, value_name = "DATE")]
        today: Option<NaiveDate>,
    },
    /// Report whether plan PDFs have cached extractions
    Status {
        /// Plan PDFs
        #[arg(required = true)]
        input_files: Vec<PathBuf>,
    },
    /// List the plan PDFs of a directory with their cache status
    List {
        /// Directory to scan
        dir: PathBuf,
    },
    /// Flatten a saved JSON result into tab-separated rows
    Flatten {
        /// Result written by `gpzu parse --out`
        result_file: PathBuf,
    },
    /// Inspect and validate header rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List the rule book in detection order
    List,
    /// Print the rules of one dialect
    Show {
        /// Dialect name (e.g., "RU")
        dialect: String,
    },
    /// Validate a custom rule file
    Validate {
        /// Path to JSON rule file
        file: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            out,
            tables,
            today,
        } => {
            let settings = commands::parse::Settings {
                cache_dir: cli.cache_dir,
                rules: cli.rules,
                tabula_jar: cli.tabula_jar,
                tables,
                today,
            };
            commands::parse::run(&input_file, &settings, output, out)
        }
        Commands::Status { input_files } => commands::cache::status(&cli.cache_dir, &input_files),
        Commands::List { dir } => commands::cache::list(&cli.cache_dir, &dir),
        Commands::Flatten { result_file } => commands::flatten::run(&result_file),
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(cli.rules.as_deref()),
            RulesAction::Show { dialect } => commands::rules::show(cli.rules.as_deref(), &dialect),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
