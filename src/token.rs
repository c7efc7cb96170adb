use std::fmt::{self, Formatter};
use strum_macros::{Display, EnumDiscriminants};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(derive(Hash, Display))]
#[strum_discriminants(name(TokenType))]
pub enum TokenKind {
    Illegal(String),
    /// A string literal that hit end-of-input before its closing quote.
    Unterminated(String),
    Eof,

    // Identifiers and literals
    Ident(String),
    Int(String),
    String(String),

    // Operators
    Assign,
    Plus,
    Minus,
    Slash,
    Asterisk,
    Bang,
    LT,
    GT,
    Eq,
    NotEq,

    // Delimiters
    Comma,
    Semicolon,
    Colon,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Else,
    False,
    Function,
    If,
    Let,
    Return,
    True,
}

impl From<&str> for TokenKind {
    fn from(text: &str) -> Self {
        match text {
            "let" => Self::Let,
            "fn" => Self::Function,
            "if" => Self::If,
            "return" => Self::Return,
            "true" => Self::True,
            "else" => Self::Else,
            "false" => Self::False,
            identifier => Self::Ident(identifier.to_owned()),
        }
    }
}

impl TokenKind {
    pub fn literal(&self) -> &str {
        match self {
            Self::Illegal(s) | Self::Unterminated(s) => s,
            Self::Ident(s) | Self::Int(s) | Self::String(s) => s,
            Self::Eof => "",
            Self::Assign => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Slash => "/",
            Self::Asterisk => "*",
            Self::Bang => "!",
            Self::LT => "<",
            Self::GT => ">",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Else => "else",
            Self::False => "false",
            Self::Function => "fn",
            Self::If => "if",
            Self::Let => "let",
            Self::Return => "return",
            Self::True => "true",
        }
    }
}

/// A lexed token together with where it started in the source.
///
/// Positions are diagnostic only and take no part in equality, so two
/// programs that differ in layout parse to equal trees.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.literal())
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Self {
            kind,
            position: Position::default(),
        }
    }
}

impl Token {
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Self { kind, position }
    }

    pub fn token_type(&self) -> TokenType {
        TokenType::from(&self.kind)
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type() == token_type
    }

    pub fn literal(&self) -> &str {
        self.kind.literal()
    }
}
