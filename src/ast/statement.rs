use super::{Expression, Identifier, Node};
use crate::token::Token;
use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expr(ExpressionStatement),
}

impl Node for Statement {
    fn token(&self) -> &Token {
        match self {
            Self::Let(inner) => inner.token(),
            Self::Return(inner) => inner.token(),
            Self::Expr(inner) => inner.token(),
        }
    }
}

/// Writes a statement sequence so that it parses back into the same
/// sequence. An expression statement carries no `;` of its own, so one is
/// put back whenever another statement follows it; otherwise `a; -1`
/// would come back as the call `a((-1))`.
pub(super) fn write_statements(f: &mut Formatter, statements: &[Statement]) -> fmt::Result {
    let mut rest = statements.iter().peekable();
    while let Some(stmt) = rest.next() {
        write!(f, "{}", stmt)?;
        if rest.peek().is_some() {
            if let Statement::Expr(_) = stmt {
                f.write_str(";")?;
            }
            f.write_str(" ")?;
        }
    }
    Ok(())
}

/// `let <name> = <value>;`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

impl Display for LetStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "let {} = {};", self.name, self.value)
    }
}

/// `return;` or `return <value>;`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub return_value: Option<Expression>,
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("return")?;
        if let Some(value) = &self.return_value {
            write!(f, " {}", value)?;
        }
        f.write_str(";")
    }
}

/// A bare expression used as a statement. Its token is the expression's
/// own token, so re-parsing the rendered form yields an equal node.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// A braced statement list. Blocks share their enclosing scope.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        write_statements(f, &self.statements)?;
        f.write_str(" }")
    }
}

macro_rules! token_node {
    ($($node:ty),* $(,)?) => {
        $(impl Node for $node {
            fn token(&self) -> &Token {
                &self.token
            }
        })*
    };
}

token_node!(LetStatement, ReturnStatement, ExpressionStatement, BlockStatement);
