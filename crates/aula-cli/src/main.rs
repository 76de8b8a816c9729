//! Aula analyzer CLI

use aula_error::{DiagnosticRenderer, SourceCache};
use aula_lexer::{tokenize, Token, TokenSummary};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aula")]
#[command(version = "0.1.0")]
#[command(about = "Lexical and syntactic analyzer for the Aula language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shows the token table and summary of a file
    Lex {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Checks a file against the grammar
    Check {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lex { input } => {
            println!("Tokenizing: {}\n", input.display());

            let source = read_source(&input);
            let tokens = tokenize(&source, 0);

            print_token_table(&tokens);
            print_summary(&TokenSummary::of(&tokens));
        }

        Commands::Check { input } => {
            println!("Checking: {}\n", input.display());

            let source = read_source(&input);
            let mut cache = SourceCache::new();
            let file_id = cache.add(input.display().to_string(), &source);

            // Phase 1: Lexical analysis
            let tokens = tokenize(&source, file_id);
            println!("  [ok] Lexer: {} tokens", tokens.len());

            // Phase 2: Syntactic analysis
            let result = aula_parser::parse(&tokens);

            if result.is_valid {
                println!("  [ok] Parser: program structure is valid");
                println!("\nNo errors found!");
            } else {
                eprintln!("\nSyntax errors ({}):\n", result.diagnostics.len());
                let renderer = DiagnosticRenderer::new(&cache);
                for diag in result.diagnostics.iter() {
                    eprintln!("{}", renderer.render(diag));
                }
                std::process::exit(1);
            }
        }
    }
}

/// Reads the input file or exits with a message.
fn read_source(input: &PathBuf) -> String {
    match fs::read_to_string(input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    }
}

/// Prints one row per token: position, kind, lexeme.
fn print_token_table(tokens: &[Token]) {
    for token in tokens {
        println!(
            "  {:4}:{:<3}  {:<14}  {}",
            token.line(),
            token.column(),
            token.kind.to_string(),
            token.lexeme
        );
    }
}

/// Prints the aggregated counts below the token table.
fn print_summary(summary: &TokenSummary) {
    println!("\nSummary:");
    println!("  Reserved words: {}", summary.reserved_words);
    println!("  Identifiers:    {}", summary.identifiers);
    println!("  Delimiters:     {}", summary.delimiters);
    println!("  Operators:      {}", summary.operators);
    println!("  Numbers:        {}", summary.numbers);
    println!("  Total:          {}", summary.total);
}
