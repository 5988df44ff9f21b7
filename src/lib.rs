//! LudusScript: a small scripting language whose programs describe game
//! objects. Running a script yields the records its `obj` blocks emit.

pub mod ast;
mod builtins;
mod environment;
pub mod evaluator;
pub mod json;
mod lexer;
mod parser;
pub mod repl;
mod token;
mod value;

pub use environment::Environment;
pub use lexer::Lexer;
pub use parser::{ParseError, Parser};
pub use token::{Token, TokenKind};
pub use value::{Record, RuntimeError, Value};

use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub Error

    Parse{source: ParseError} = "{source}",
    Runtime{source: RuntimeError} = "{source}",
}

pub fn parse(source: &str) -> Result<ast::Program, ParseError> {
    Parser::new(Lexer::new(source)).parse_program()
}

/// Parses and runs a whole script in a fresh environment.
pub fn run(source: &str) -> Result<Vec<Record>, Error> {
    let program = parse(source)?;
    let mut env = Environment::new();
    evaluator::eval(&program, &mut env)?;
    Ok(env.take_output())
}
