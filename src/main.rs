use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser as ClapParser, Subcommand};
use searchbox::cli::{self, CheckOptions, CheckResult, CliError};

#[derive(ClapParser)]
#[command(name = "searchbox")]
#[command(about = "Searchbox - Compile search-box queries into MongoDB-style filters")]
#[command(version)]
struct Cli {
    /// Log compilation steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query and print its filter as JSON
    Check {
        /// The search query (reads from stdin if not provided)
        query: Option<String>,

        /// JSON file with field configuration
        #[arg(short, long, value_name = "FILE")]
        options: Option<PathBuf>,

        /// Inline JSON field configuration
        #[arg(long, value_name = "JSON", conflicts_with = "options")]
        options_json: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't build the filter
        #[arg(long)]
        syntax_only: bool,
    },

    /// Show how a query is split into tokens
    Tokens {
        /// The search query
        query: String,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'searchbox docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            query,
            options,
            options_json,
            pretty,
            syntax_only,
        } => run_check(query, options, options_json, pretty, syntax_only),
        Commands::Tokens { query } => {
            print!("{}", cli::list_tokens(&query).render());
            Ok(())
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    query: Option<String>,
    options_path: Option<PathBuf>,
    options_json: Option<String>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let query = match query {
        Some(s) => s,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        None => return Err(CliError::NoInput),
    };

    let options = cli::load_options(options_path.as_deref(), options_json.as_deref())?;

    let check = CheckOptions {
        query,
        options,
        pretty,
        syntax_only,
    };

    match cli::execute_check(&check)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(output) => {
            if pretty {
                println!("{:#}", output);
            } else {
                println!("{}", output);
            }
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
