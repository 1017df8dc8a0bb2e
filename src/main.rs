use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use monkey_interpreter as monkey;

use monkey::ast::Program;
use monkey::ast_printer::AstPrinter;
use monkey::interpreter::Interpreter;
use monkey::parser::parse_program;
use monkey::scanner::Scanner;
use monkey::value::Value;

#[derive(ClapParser, Debug)]
#[command(version, about = "Monkey language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize { filename: Option<PathBuf> },

    /// Parses input from a file and prints its AST
    Parse {
        filename: Option<PathBuf>,

        /// Print the AST as JSON instead of source form
        #[arg(long)]
        json: bool,
    },

    /// Runs input from a file as a Monkey program and prints its value
    Run { filename: Option<PathBuf> },
}

/// Reads the contents of a file as UTF-8 text.
fn read_file(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let source = std::fs::read_to_string(filename)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", source.len(), filename);

    Ok(source)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip the crate prefix from the module path
            let module = record.module_path().unwrap_or("<unnamed>");
            let module = module.strip_prefix("monkey_interpreter::").unwrap_or(module);
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Scans and parses `source`, exiting with status 65 on a front-end error.
fn parse_or_exit(source: &str) -> Program {
    match parse_program(source) {
        Ok(program) => program,
        Err(e) => {
            debug!("Parse debug: {}", e);
            eprintln!("{}", e);
            std::process::exit(65);
        }
    }
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let filename = match &args.commands {
        Commands::Tokenize { filename }
        | Commands::Parse { filename, .. }
        | Commands::Run { filename } => filename.clone(),
    };

    let Some(filename) = filename else {
        info!("No filepath provided");
        println!("No input filepath was provided. Exiting...");
        std::process::exit(0);
    };

    let source = read_file(&filename)?;

    match args.commands {
        Commands::Tokenize { .. } => {
            info!("Running Tokenize subcommand");
            let mut tokenized = true;

            for token in Scanner::new(&source) {
                match token {
                    Ok(token) => println!("{}", token),

                    Err(e) => {
                        tokenized = false;
                        debug!("Tokenization debug: {}", e);
                        eprintln!("{}", e);
                    }
                }
            }

            if !tokenized {
                debug!("Tokenization failed, exiting with code 65");
                std::process::exit(65);
            }

            info!("Tokenization completed successfully");
        }

        Commands::Parse { json, .. } => {
            info!("Running Parse subcommand");
            let program = parse_or_exit(&source);

            if json {
                let rendered = serde_json::to_string_pretty(&program)
                    .context("Failed to serialize AST")?;
                println!("{}", rendered);
            } else {
                println!("{}", AstPrinter::print(&program));
            }

            info!("Parse subcommand completed");
        }

        Commands::Run { .. } => {
            info!("Running Run subcommand");
            let program = parse_or_exit(&source);
            info!("Parsed {} statements", program.statements.len());

            let mut interpreter = Interpreter::new();

            match interpreter.interpret(&program) {
                Value::Error(e) => {
                    debug!("Runtime debug: {}", e);
                    eprintln!("ERROR: {}", e);
                    std::process::exit(70);
                }

                value => println!("{}", value),
            }
        }
    }

    Ok(())
}
