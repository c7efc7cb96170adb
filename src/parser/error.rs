use crate::token::{Position, TokenType};
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub ParseError

    UnexpectedToken{expected: TokenType, found: TokenType, position: Position} = "{position}: expected next token to be {expected}, got {found} instead",
    NoPrefixParseFn{token_type: TokenType, position: Position} = "{position}: no prefix parse function for {token_type} found",
    InvalidInteger{literal: String, position: Position} = "{position}: could not parse {literal} as integer",
    IllegalToken{literal: String, position: Position} = "{position}: illegal token '{literal}'",
    UnterminatedString{position: Position} = "{position}: unterminated string literal",
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::NoPrefixParseFn { position, .. }
            | Self::InvalidInteger { position, .. }
            | Self::IllegalToken { position, .. }
            | Self::UnterminatedString { position } => *position,
        }
    }
}

/// Every error from one parse, rendered one per line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseErrors(pub Vec<ParseError>);

impl std::fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for err in self.0.iter() {
            write!(f, "\n\t{}", err)?;
        }
        Ok(())
    }
}
