use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::environment::Environment;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::{parser, repl};

#[derive(Parser)]
#[command(
    name = "clear",
    version,
    about = "Clear - a small expression-oriented scripting language",
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an evaluating REPL session
    Repl,
    /// Evaluate a source file and print the result
    Run {
        #[arg(value_name = "FILE")]
        file: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // The bare command greets and drops into the token-printing loop.
        None => {
            greet();
            repl::start(false)?;
        }
        Some(Commands::Repl) => {
            repl::start(true)?;
        }
        Some(Commands::Run { file }) => {
            run_file(&file)?;
        }
    }
    Ok(())
}

fn greet() {
    let user = std::env::var("USER").unwrap_or_else(|_| "there".to_string());
    println!("Hello {}! This is the Clear programming language!", user);
    println!("Feel free to type in commands");
}

fn run_file(path: &str) -> Result<()> {
    let input =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;

    let mut parser = parser::Parser::new(Lexer::new(&input));
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        for error in parser.errors() {
            eprintln!("{}", error);
        }
        bail!("{} parse error(s) in {}", parser.errors().len(), path);
    }

    let env = Rc::new(RefCell::new(Environment::new()));
    let mut evaluator = Evaluator::new(env);
    if let Some(result) = evaluator.eval(&program) {
        println!("{}", result.inspect());
    }
    Ok(())
}
