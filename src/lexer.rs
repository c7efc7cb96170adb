use crate::token::{Position, Token, TokenKind};

#[derive(Debug, Clone)]
pub struct Lexer {
    input: String,
    position: usize,
    read_position: usize,
    ch: u8,
    line: usize,
    column: usize,
    finished: bool,
}

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

// Trailing bytes of a multi-byte UTF-8 sequence.
fn is_continuation(c: u8) -> bool {
    c & 0xC0 == 0x80
}

/// Yields every token up to and including the first `Eof`, then stops.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.kind == TokenKind::Eof;
        Some(token)
    }
}

impl Lexer {
    pub fn new(input: String) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: 0,
            line: 1,
            column: 0,
            finished: false,
        };
        lexer.read_char();
        lexer
    }

    /// Rewinds to the start of the input.
    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.input));
    }

    fn read_char(&mut self) {
        if self.ch == b'\n' {
            self.line += 1;
            self.column = 0;
        }
        self.ch = *self.input.as_bytes().get(self.read_position).unwrap_or(&0);
        self.position = self.read_position;
        self.read_position += 1;
        if !is_continuation(self.ch) {
            self.column += 1;
        }
    }

    fn peek_char(&self) -> u8 {
        *self.input.as_bytes().get(self.read_position).unwrap_or(&0)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let position = Position::new(self.line, self.column);

        let kind = match self.ch {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                }
            }
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Asterisk,
            b'/' => TokenKind::Slash,
            b'<' => TokenKind::LT,
            b'>' => TokenKind::GT,
            b';' => TokenKind::Semicolon,
            b':' => TokenKind::Colon,
            b',' => TokenKind::Comma,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'"' => return Token::new(self.read_string(), position),
            0 if self.at_end() => TokenKind::Eof,
            c if is_letter(c) => {
                return Token::new(TokenKind::from(self.read_identifier()), position);
            }
            c if c.is_ascii_digit() => {
                return Token::new(TokenKind::Int(self.read_number().to_owned()), position);
            }
            _ => TokenKind::Illegal(self.read_illegal()),
        };
        self.read_char();
        Token::new(kind, position)
    }

    fn read_identifier(&mut self) -> &str {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    fn read_number(&mut self) -> &str {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    // Leaves the cursor on the closing quote's successor.
    fn read_string(&mut self) -> TokenKind {
        let start = self.position + 1;
        loop {
            self.read_char();
            if self.at_end() {
                return TokenKind::Unterminated(self.input[start..].to_owned());
            }
            if self.ch == b'"' {
                let value = self.input[start..self.position].to_owned();
                self.read_char();
                return TokenKind::String(value);
            }
        }
    }

    // Consumes the whole character, which may span several bytes.
    fn read_illegal(&mut self) -> String {
        let c = self.input[self.position..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        for _ in 1..c.len_utf8() {
            self.read_char();
        }
        c.to_string()
    }

    fn skip_whitespace(&mut self) {
        while let b' ' | b'\t' | b'\n' | b'\r' = self.ch {
            self.read_char();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::TokenType;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input.to_owned()).map(|t| t.kind).collect()
    }

    #[test]
    fn test_next_token() {
        let input = "let five = 5;
let ten = 10;

let add = fn(x, y) {
  x + y;
};

let result = add(five, ten);
!-/*5;
5 < 10 > 5;

if (5 < 10) {
    return true;
} else {
    return false;
}

10 == 10;
10 != 9;
\"foobar\"
\"foo bar\"
[1, 2];
{\"foo\": \"bar\"}
"
        .to_owned();

        let cases = [
            (TokenType::Let, "let"),
            (TokenType::Ident, "five"),
            (TokenType::Assign, "="),
            (TokenType::Int, "5"),
            (TokenType::Semicolon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Ident, "ten"),
            (TokenType::Assign, "="),
            (TokenType::Int, "10"),
            (TokenType::Semicolon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Ident, "add"),
            (TokenType::Assign, "="),
            (TokenType::Function, "fn"),
            (TokenType::LParen, "("),
            (TokenType::Ident, "x"),
            (TokenType::Comma, ","),
            (TokenType::Ident, "y"),
            (TokenType::RParen, ")"),
            (TokenType::LBrace, "{"),
            (TokenType::Ident, "x"),
            (TokenType::Plus, "+"),
            (TokenType::Ident, "y"),
            (TokenType::Semicolon, ";"),
            (TokenType::RBrace, "}"),
            (TokenType::Semicolon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Ident, "result"),
            (TokenType::Assign, "="),
            (TokenType::Ident, "add"),
            (TokenType::LParen, "("),
            (TokenType::Ident, "five"),
            (TokenType::Comma, ","),
            (TokenType::Ident, "ten"),
            (TokenType::RParen, ")"),
            (TokenType::Semicolon, ";"),
            (TokenType::Bang, "!"),
            (TokenType::Minus, "-"),
            (TokenType::Slash, "/"),
            (TokenType::Asterisk, "*"),
            (TokenType::Int, "5"),
            (TokenType::Semicolon, ";"),
            (TokenType::Int, "5"),
            (TokenType::LT, "<"),
            (TokenType::Int, "10"),
            (TokenType::GT, ">"),
            (TokenType::Int, "5"),
            (TokenType::Semicolon, ";"),
            (TokenType::If, "if"),
            (TokenType::LParen, "("),
            (TokenType::Int, "5"),
            (TokenType::LT, "<"),
            (TokenType::Int, "10"),
            (TokenType::RParen, ")"),
            (TokenType::LBrace, "{"),
            (TokenType::Return, "return"),
            (TokenType::True, "true"),
            (TokenType::Semicolon, ";"),
            (TokenType::RBrace, "}"),
            (TokenType::Else, "else"),
            (TokenType::LBrace, "{"),
            (TokenType::Return, "return"),
            (TokenType::False, "false"),
            (TokenType::Semicolon, ";"),
            (TokenType::RBrace, "}"),
            (TokenType::Int, "10"),
            (TokenType::Eq, "=="),
            (TokenType::Int, "10"),
            (TokenType::Semicolon, ";"),
            (TokenType::Int, "10"),
            (TokenType::NotEq, "!="),
            (TokenType::Int, "9"),
            (TokenType::Semicolon, ";"),
            (TokenType::String, "foobar"),
            (TokenType::String, "foo bar"),
            (TokenType::LBracket, "["),
            (TokenType::Int, "1"),
            (TokenType::Comma, ","),
            (TokenType::Int, "2"),
            (TokenType::RBracket, "]"),
            (TokenType::Semicolon, ";"),
            (TokenType::LBrace, "{"),
            (TokenType::String, "foo"),
            (TokenType::Colon, ":"),
            (TokenType::String, "bar"),
            (TokenType::RBrace, "}"),
            (TokenType::Eof, ""),
        ];

        let tokens: Vec<Token> = Lexer::new(input).collect();
        assert_eq!(tokens.len(), cases.len());

        for ((token_type, literal), token) in cases.iter().zip(tokens.iter()) {
            assert_eq!(token.token_type(), *token_type);
            assert_eq!(token.literal(), *literal);
        }
    }

    #[test]
    fn test_positions() {
        let tokens: Vec<Token> = Lexer::new("let x = 5;\n  x + \"é\" + y".to_owned()).collect();
        let positions: Vec<(usize, usize)> = tokens
            .iter()
            .map(|t| (t.position.line, t.position.column))
            .collect();

        assert_eq!(
            positions,
            vec![
                (1, 1),
                (1, 5),
                (1, 7),
                (1, 9),
                (1, 10),
                (2, 3),
                (2, 5),
                (2, 7),
                (2, 11),
                (2, 13),
                (2, 14),
            ]
        );
    }

    #[test]
    fn test_illegal_characters() {
        assert_eq!(
            kinds("a @ λ"),
            vec![
                TokenKind::Ident("a".to_owned()),
                TokenKind::Illegal("@".to_owned()),
                TokenKind::Illegal("λ".to_owned()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            kinds("let s = \"abc"),
            vec![
                TokenKind::Let,
                TokenKind::Ident("s".to_owned()),
                TokenKind::Assign,
                TokenKind::Unterminated("abc".to_owned()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_no_escapes_in_strings() {
        assert_eq!(
            kinds(r#""a\nb""#),
            vec![TokenKind::String(r"a\nb".to_owned()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_sequence_is_finite_and_restartable() {
        let mut lexer = Lexer::new("1 + 2".to_owned());
        let first: Vec<Token> = lexer.by_ref().collect();
        assert_eq!(first.len(), 4);
        assert!(lexer.next().is_none());

        lexer.reset();
        let second: Vec<Token> = lexer.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds(" \t\r\n"), vec![TokenKind::Eof]);
    }
}
