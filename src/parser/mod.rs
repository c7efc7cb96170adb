mod error;

pub use error::{ParseError, ParseErrors};

use crate::ast::{self, Expression, Node, Operator, Statement};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind, TokenType};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

impl From<TokenType> for Precedence {
    fn from(token_type: TokenType) -> Self {
        match token_type {
            TokenType::Eq | TokenType::NotEq => Self::Equals,
            TokenType::LT | TokenType::GT => Self::LessGreater,
            TokenType::Plus | TokenType::Minus => Self::Sum,
            TokenType::Asterisk | TokenType::Slash => Self::Product,
            TokenType::LParen | TokenType::LBracket => Self::Call,
            _ => Self::Lowest,
        }
    }
}

type PrefixParseFn = fn(&mut Parser) -> Option<Expression>;
type InfixParseFn = fn(&mut Parser, Expression) -> Option<Expression>;

fn prefix_rule(token_type: TokenType) -> Option<PrefixParseFn> {
    let rule: PrefixParseFn = match token_type {
        TokenType::Ident => Parser::parse_identifier,
        TokenType::Int => Parser::parse_integer_literal,
        TokenType::String => Parser::parse_string_literal,
        TokenType::True | TokenType::False => Parser::parse_boolean,
        TokenType::Bang | TokenType::Minus => Parser::parse_prefix_expression,
        TokenType::LParen => Parser::parse_grouped_expression,
        TokenType::If => Parser::parse_if_expression,
        TokenType::Function => Parser::parse_function_literal,
        TokenType::LBracket => Parser::parse_array_literal,
        TokenType::LBrace => Parser::parse_hash_literal,
        _ => return None,
    };
    Some(rule)
}

fn infix_rule(token_type: TokenType) -> Option<InfixParseFn> {
    let rule: InfixParseFn = match token_type {
        TokenType::Plus
        | TokenType::Minus
        | TokenType::Asterisk
        | TokenType::Slash
        | TokenType::LT
        | TokenType::GT
        | TokenType::Eq
        | TokenType::NotEq => Parser::parse_infix_expression,
        TokenType::LParen => Parser::parse_call_expression,
        TokenType::LBracket => Parser::parse_index_expression,
        _ => return None,
    };
    Some(rule)
}

pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        Self {
            lexer,
            cur_token,
            peek_token,
            errors: vec![],
        }
    }

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    /// Parses the whole input, keeping every statement that parsed cleanly
    /// alongside the errors from the ones that did not.
    pub fn parse(mut self) -> (ast::Program, Vec<ParseError>) {
        let mut program = ast::Program::default();

        while !self.cur_token.is(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt)
            }
            self.next_token();
        }

        if !self.errors.is_empty() {
            debug!(count = self.errors.len(), "parse finished with errors");
        }
        (program, self.errors)
    }

    pub fn parse_program(self) -> Result<ast::Program, Vec<ParseError>> {
        let (program, errors) = self.parse();
        if errors.is_empty() {
            Ok(program)
        } else {
            Err(errors)
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.token_type() {
            TokenType::Let => self.parse_let_statement().map(Statement::Let),
            TokenType::Return => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement().map(Statement::Expr),
        }
    }

    fn parse_let_statement(&mut self) -> Option<ast::LetStatement> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }

        let name: ast::Identifier = self.cur_token.clone().into();

        if !self.expect_peek(TokenType::Assign) {
            return None;
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token.is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::LetStatement { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<ast::ReturnStatement> {
        let token = self.cur_token.clone();

        let return_value = if self.peek_ends_statement() {
            None
        } else {
            self.next_token();
            Some(self.parse_expression(Precedence::Lowest)?)
        };

        if self.peek_token.is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::ReturnStatement {
            token,
            return_value,
        })
    }

    fn peek_ends_statement(&self) -> bool {
        self.peek_token.is(TokenType::Semicolon)
            || self.peek_token.is(TokenType::RBrace)
            || self.peek_token.is(TokenType::Eof)
    }

    fn parse_expression_statement(&mut self) -> Option<ast::ExpressionStatement> {
        let expression = self.parse_expression(Precedence::Lowest)?;
        let token = expression.token().clone();

        if self.peek_token.is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::ExpressionStatement { token, expression })
    }

    fn parse_block_statement(&mut self) -> Option<ast::BlockStatement> {
        let token = self.cur_token.clone();
        let mut statements = vec![];

        self.next_token();

        while !self.cur_token.is(TokenType::RBrace) && !self.cur_token.is(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        if self.cur_token.is(TokenType::Eof) {
            self.errors.push(ParseError::UnexpectedToken {
                expected: TokenType::RBrace,
                found: TokenType::Eof,
                position: self.cur_token.position,
            });
            return None;
        }

        Some(ast::BlockStatement { token, statements })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let prefix = match prefix_rule(self.cur_token.token_type()) {
            Some(rule) => rule,
            None => {
                self.no_prefix_parse_fn_error();
                return None;
            }
        };

        let mut left = prefix(self)?;

        while !self.peek_token.is(TokenType::Semicolon) && precedence < self.peek_precedence() {
            let infix = match infix_rule(self.peek_token.token_type()) {
                Some(rule) => rule,
                None => return Some(left),
            };
            self.next_token();
            left = infix(self, left)?;
        }

        Some(left)
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(self.cur_token.clone().into()))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        match token.literal().parse() {
            Ok(value) => Some(Expression::IntegerLiteral(ast::IntegerLiteral { token, value })),
            Err(_) => {
                self.errors.push(ParseError::InvalidInteger {
                    literal: token.literal().to_owned(),
                    position: token.position,
                });
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let value = token.literal().to_owned();
        Some(Expression::String(ast::StringLiteral { token, value }))
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(self.cur_token.clone().into()))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = Operator::from_token(&token.kind)?;

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix(ast::PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = Operator::from_token(&token.kind)?;
        let precedence = self.cur_precedence();

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(ast::InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(expression)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) || !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_token.is(TokenType::Else) {
            self.next_token();
            if !self.expect_peek(TokenType::LBrace) {
                return None;
            }
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Some(Expression::If(ast::IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let body = Arc::new(self.parse_block_statement()?);

        Some(Expression::Function(ast::FunctionLiteral {
            token,
            parameters,
            body,
        }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<ast::Identifier>> {
        let mut identifiers = vec![];

        if self.peek_token.is(TokenType::RParen) {
            self.next_token();
            return Some(identifiers);
        }

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }
        identifiers.push(self.cur_token.clone().into());

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            if !self.expect_peek(TokenType::Ident) {
                return None;
            }
            identifiers.push(self.cur_token.clone().into());
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(identifiers)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let arguments = self.parse_expression_list(TokenType::RParen)?;

        Some(Expression::Call(ast::CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let elements = self.parse_expression_list(TokenType::RBracket)?;

        Some(Expression::Array(ast::ArrayLiteral { token, elements }))
    }

    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
        let mut list = vec![];

        if self.peek_token.is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();

        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RBracket) {
            return None;
        }

        Some(Expression::Index(ast::IndexExpression {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let mut pairs = vec![];

        while !self.peek_token.is(TokenType::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenType::Colon) {
                return None;
            }

            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_token.is(TokenType::RBrace) && !self.expect_peek(TokenType::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenType::RBrace) {
            return None;
        }

        Some(Expression::Hash(ast::HashLiteral { token, pairs }))
    }

    fn peek_precedence(&self) -> Precedence {
        self.peek_token.token_type().into()
    }

    fn cur_precedence(&self) -> Precedence {
        self.cur_token.token_type().into()
    }

    fn expect_peek(&mut self, expected: TokenType) -> bool {
        if self.peek_token.is(expected) {
            self.next_token();
            true
        } else {
            self.peek_error(expected);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenType) {
        self.errors.push(ParseError::UnexpectedToken {
            expected,
            found: self.peek_token.token_type(),
            position: self.peek_token.position,
        });
    }

    fn no_prefix_parse_fn_error(&mut self) {
        let position = self.cur_token.position;
        let error = match &self.cur_token.kind {
            TokenKind::Illegal(literal) => ParseError::IllegalToken {
                literal: literal.clone(),
                position,
            },
            TokenKind::Unterminated(_) => ParseError::UnterminatedString { position },
            _ => ParseError::NoPrefixParseFn {
                token_type: self.cur_token.token_type(),
                position,
            },
        };
        self.errors.push(error);
    }
}
