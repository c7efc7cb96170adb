//! A lexer, Pratt parser and tree-walking evaluator for the Monkey language.

mod ast;
mod builtins;
mod environment;
pub mod evaluator;
mod lexer;
mod object;
mod parser;
pub mod repl;
mod token;

pub use ast::{Node, Program};
pub use builtins::{Builtin, BuiltinFunction};
pub use environment::Environment;
pub use evaluator::eval;
pub use lexer::Lexer;
pub use object::{EvalError, Object, NULL};
pub use parser::{ParseError, ParseErrors, Parser};
pub use token::{Position, Token, TokenKind, TokenType};

use custom_error::custom_error;

custom_error! {
    #[derive(PartialEq)]
    pub RunError

    Parse{errors: ParseErrors} = "parser errors:{errors}",
    Eval{source: EvalError} = "{source}",
}

/// Lexes the whole of `source`; the last token is always `Eof`.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source.to_owned()).collect()
}

pub fn parse(source: &str) -> (Program, Vec<ParseError>) {
    Parser::new(Lexer::new(source.to_owned())).parse()
}

/// Parses and evaluates `source` against a session environment, so that
/// bindings made by one call are visible to the next.
pub fn run(source: &str, env: &Environment) -> Result<Object, RunError> {
    let program = Parser::new(Lexer::new(source.to_owned()))
        .parse_program()
        .map_err(|errors| RunError::Parse {
            errors: ParseErrors(errors),
        })?;
    Ok(eval(&program, env)?)
}
