mod expression;
mod statement;
pub use expression::*;
pub use statement::*;

use crate::token::Token;
use std::fmt::{Display, Formatter};

/// Shared surface of every syntax node: the token it started at, for
/// diagnostics, and a source-like rendering through `Display`.
pub trait Node: Display {
    fn token(&self) -> &Token;

    fn token_literal(&self) -> &str {
        self.token().literal()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        statement::write_statements(f, &self.statements)
    }
}

impl Program {
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(|s| s.token_literal())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Node for Identifier {
    fn token(&self) -> &Token {
        &self.token
    }
}

impl From<Token> for Identifier {
    fn from(token: Token) -> Self {
        let value = token.literal().to_owned();
        Self { token, value }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::TokenKind;

    fn ident(name: &str) -> Identifier {
        Token::from(TokenKind::Ident(name.to_owned())).into()
    }

    #[test]
    fn test_display() {
        let program = Program {
            statements: vec![Statement::Let(LetStatement {
                token: TokenKind::Let.into(),
                name: ident("myVar"),
                value: Expression::Identifier(ident("anotherVar")),
            })],
        };

        assert_eq!(format!("{}", program), "let myVar = anotherVar;");
        assert_eq!(program.token_literal(), "let");
    }

    #[test]
    fn test_display_nested_expressions() {
        let sum = Expression::Infix(InfixExpression {
            token: TokenKind::Plus.into(),
            left: Box::new(Expression::Identifier(ident("a"))),
            operator: Operator::Plus,
            right: Box::new(Expression::Prefix(PrefixExpression {
                token: TokenKind::Minus.into(),
                operator: Operator::Minus,
                right: Box::new(Expression::String(StringLiteral {
                    token: TokenKind::String("b".to_owned()).into(),
                    value: "b".to_owned(),
                })),
            })),
        });

        assert_eq!(sum.to_string(), "(a + (-\"b\"))");
        assert_eq!(sum.token_literal(), "+");
    }

    #[test]
    fn test_display_return_without_value() {
        let stmt = Statement::Return(ReturnStatement {
            token: TokenKind::Return.into(),
            return_value: None,
        });
        assert_eq!(stmt.to_string(), "return;");
    }
}
