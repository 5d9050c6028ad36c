//! Mondai CLI - format problem texts and serve problems from the bank

use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use mondai::bank::Cell;
use mondai::{
    BankConfig, Book, BookFilter, FormatOptions, ProblemBank, ProblemFormatter, RandomQuery,
    ServedProblem,
};

#[derive(Parser)]
#[command(name = "mondai")]
#[command(version)]
#[command(about = "Format math-problem text into paragraph markup", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Chart problem document (default: $MONDAI_CHART_PATH or aochart.json)
    #[arg(long, global = true)]
    chart: Option<PathBuf>,

    /// Exercise problem document (default: $MONDAI_EX_PATH or aochart_ex.json)
    #[arg(long, global = true)]
    ex: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Format one problem text
    Format {
        /// Input file path (reads from stdin if not provided)
        input: Option<String>,

        /// Output file path (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<String>,

        /// Skip delimiter normalization
        #[arg(long)]
        raw: bool,

        /// Print a JSON report instead of the bare markup
        #[arg(long)]
        report: bool,
    },

    /// Pick a random problem by unit and difficulty
    Pick {
        /// Unit name (repeatable)
        #[arg(short, long = "unit", required = true)]
        units: Vec<String>,

        /// Difficulty level (repeatable)
        #[arg(short, long = "difficulty", required = true)]
        difficulties: Vec<String>,

        /// Books to draw from
        #[arg(short, long, value_enum, default_value_t = BookArg::All)]
        book: BookArg,
    },

    /// Show one problem by unit and number
    Show {
        /// Unit name
        #[arg(short, long)]
        unit: String,

        /// Problem number
        #[arg(short, long)]
        number: String,

        /// Book to look in
        #[arg(short, long, value_enum, default_value_t = BookArg::Chart)]
        book: BookArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BookArg {
    /// Chart and exercises
    All,
    /// Main chart problems
    Chart,
    /// Exercises
    Ex,
}

impl From<BookArg> for BookFilter {
    fn from(arg: BookArg) -> Self {
        match arg {
            BookArg::All => BookFilter::All,
            BookArg::Chart => BookFilter::Chart,
            BookArg::Ex => BookFilter::Ex,
        }
    }
}

/// Lookups search one book; `all` falls back to the chart.
fn lookup_book(arg: BookArg) -> Book {
    match arg {
        BookArg::Ex => Book::Ex,
        BookArg::All | BookArg::Chart => Book::Chart,
    }
}

fn main() {
    // Warn level by default; RUST_LOG=debug for per-problem details
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init()
        .ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = BankConfig::from_env();
    if let Some(path) = cli.chart {
        config.chart_path = path;
    }
    if let Some(path) = cli.ex {
        config.ex_path = path;
    }

    match cli.command {
        Commands::Format {
            input,
            output,
            raw,
            report,
        } => format_command(input, output, raw, report),
        Commands::Pick {
            units,
            difficulties,
            book,
        } => {
            let bank = ProblemBank::load(&config);
            let query = RandomQuery::new(
                book.into(),
                units,
                difficulties.into_iter().map(Cell::Text),
            );
            let served = bank.pick_random(&query, random_index)?;
            print_served(&served)
        }
        Commands::Show { unit, number, book } => {
            let book = lookup_book(book);
            let bank = ProblemBank::load(&config);
            let served = bank.lookup(book, Some(&unit), Some(&number))?;
            print_served(&served)
        }
    }
}

fn format_command(
    input: Option<String>,
    output: Option<String>,
    raw: bool,
    report: bool,
) -> Result<(), Box<dyn Error>> {
    let text = match input {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let formatter = ProblemFormatter::with_options(FormatOptions {
        normalize: !raw,
        ..FormatOptions::default()
    });
    let result = formatter.normalize_and_format(Some(&text));
    if result.is_empty() {
        log::warn!("input has no problem text to format");
    }
    let rendered = if report {
        serde_json::to_string_pretty(&result)?
    } else {
        result.content
    };

    match output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            writeln!(file, "{}", rendered)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn print_served(served: &ServedProblem) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(served)?);
    Ok(())
}

/// Uniform-enough index in `0..len` from a random v4 UUID.
fn random_index(len: usize) -> usize {
    (uuid::Uuid::new_v4().as_u128() % len.max(1) as u128) as usize
}
