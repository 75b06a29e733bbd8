use clap::{Parser as ClapParser, Subcommand};
use sift_lang::cli::{self, CliError, ScanOptions};
use sift_lang::output;
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "sift")]
#[command(about = "Sift - tokenizer for a JSON-flavored query expression language")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a query and print the token stream as JSON
    Scan {
        /// The query text to tokenize (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Keep whitespace tokens in the stream
        #[arg(short = 'w', long)]
        keep_whitespace: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            query,
            pretty,
            keep_whitespace,
        } => run_scan(query, pretty, keep_whitespace),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_scan(query: Option<String>, pretty: bool, keep_whitespace: bool) -> Result<(), CliError> {
    let query = match query {
        Some(s) => s,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            buffer
        }
        None => return Err(CliError::NoInput),
    };

    let options = ScanOptions {
        query,
        keep_whitespace,
    };

    let tokens = cli::execute_scan(&options);
    let value = output::tokens_to_json(&tokens);
    let json = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .unwrap();
    println!("{}", json);

    Ok(())
}
