use crate::environment::Environment;
use crate::evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use std::io::{self, Write};

static PROMPT: &str = ">> ";

/// Drives the pipeline one line at a time. Bindings persist for the whole
/// session, so a method declared on one line is callable on the next.
pub fn start() {
    let env = Environment::new();

    loop {
        print!("{}", PROMPT);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        if line.trim().is_empty() {
            continue;
        }

        match Parser::new(Lexer::new(line)).parse_program() {
            Err(errors) => {
                for err in errors.iter() {
                    println!("{}", err);
                }
            }
            Ok(program) => match evaluator::eval(program.into(), &env) {
                Ok(result) => println!("{}", result),
                Err(err) => println!("ERROR: {}", err),
            },
        }
    }
}
