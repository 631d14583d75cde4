mod ast;
mod builtins;
mod environment;
mod evaluator;
mod lexer;
mod object;
mod parse_error;
mod parser;
mod repl;
mod token;

fn main() {
    println!("Welcome to the Jet programming language!");
    println!("Feel free to type in commands");
    repl::start()
}
