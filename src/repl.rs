use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use crate::environment::Environment;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::token::TokenKind;

const PROMPT: &str = "Clear >> ";

/// Reads lines until end of input. With `evaluate` set, each line runs
/// through the full pipeline against a session-persistent environment;
/// without it, the loop only lexes and prints the tokens.
pub fn start(evaluate: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let env = Rc::new(RefCell::new(Environment::new()));
    let mut evaluator = Evaluator::new(env);

    let mut line = String::new();
    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        if evaluate {
            eval_line(&mut evaluator, &line);
        } else {
            print_tokens(&line);
        }
    }
}

fn print_tokens(line: &str) {
    let mut lexer = Lexer::new(line);
    loop {
        let token = lexer.next_token();
        if token.kind == TokenKind::Eof {
            break;
        }
        println!("{:?}", token);
    }
}

fn eval_line(evaluator: &mut Evaluator, line: &str) {
    let mut parser = Parser::new(Lexer::new(line));
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        for error in parser.errors() {
            println!("{}", error);
        }
        return;
    }

    if let Some(result) = evaluator.eval(&program) {
        println!("{}", result.inspect());
    }
}
