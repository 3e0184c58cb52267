//! Cord Checker CLI
//!
//! Command-line interface for type checking .cord programs and inspecting
//! the lexer/parser output.

use clap::{CommandFactory, Parser as ClapParser, Subcommand};
use clap_complete::{Shell, generate};
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use cordc::{Checker, CheckerConfig, Item, Parser, TypeStack, lexer};

#[derive(ClapParser)]
#[command(name = "cordc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cord type checker - verify stack effects in .cord programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Type check a .cord file
    Check {
        /// Input .cord source file
        input: PathBuf,

        /// Extra word signatures (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the type stack after each top-level item
        #[arg(long)]
        trace_stack: bool,

        /// Print the word environment after checking
        #[arg(long)]
        show_env: bool,
    },

    /// Dump lexer tokens with positions
    Tokens {
        /// Input .cord source file
        input: PathBuf,
    },

    /// Dump parsed items
    Items {
        /// Input .cord source file
        input: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            input,
            config,
            trace_stack,
            show_env,
        } => {
            run_check(&input, config.as_deref(), trace_stack, show_env);
        }
        Commands::Tokens { input } => run_tokens(&input),
        Commands::Items { input } => run_items(&input),
        Commands::Completions { shell } => run_completions(shell),
    }
}

fn read_source(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: failed to read {}: {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn run_check(input: &Path, config_path: Option<&Path>, trace_stack: bool, show_env: bool) {
    let source = read_source(input);

    let items = match Parser::new(&source).parse_items() {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut checker = Checker::new();
    if let Some(path) = config_path {
        let loaded = CheckerConfig::load(path).and_then(|c| c.apply(checker.env_mut()));
        if let Err(e) = loaded {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    // Drive the loop item by item so --trace-stack can show each
    // intermediate stack. Recoverable errors are printed and counted;
    // fatal ones end the run.
    let mut stack = TypeStack::new();
    let mut errors = 0usize;
    for item in &items {
        if let Err(err) = checker.step(&mut stack, item) {
            if err.is_fatal() {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
            eprintln!("{}", err);
            errors += 1;
        }
        if let Item::Block(block) = item {
            if let Err(err) = checker.verify_block(block) {
                if err.is_fatal() {
                    eprintln!("Error: {}", err);
                    process::exit(1);
                }
                eprintln!("{}", err);
                errors += 1;
            }
        }
        if trace_stack {
            println!("{}", stack);
        }
    }

    if show_env {
        print!("{}", checker.env());
    }

    if errors > 0 {
        eprintln!("{}: {} error(s)", input.display(), errors);
        process::exit(1);
    }
    println!("{}: ok, final stack: {}", input.display(), stack);
}

fn run_tokens(input: &Path) {
    let source = read_source(input);
    for tok in lexer::tokenize(&source) {
        println!("{} @ {}", tok, tok.pos);
    }
}

fn run_items(input: &Path) {
    let source = read_source(input);
    match Parser::new(&source).parse_items() {
        Ok(items) => {
            for item in &items {
                println!("{}", item);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "cordc", &mut io::stdout());
}
