use crate::ast::{Program, Statement};
use crate::builtins::Builtin;
use crate::environment::Environment;
use crate::evaluator;
use crate::lexer::Lexer;
use crate::object::{self, Object, NULL};
use crate::parser::Parser;
use std::cell::RefCell;
use std::env;
use std::io::{self, BufRead, Write};
use tracing::debug;

static PROMPT: &str = ">> ";

/// Shell settings, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    pub show_tokens: bool,
    pub user: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: PROMPT.to_owned(),
            show_tokens: false,
            user: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            prompt: env::var("MONKEY_PROMPT").unwrap_or_else(|_| PROMPT.to_owned()),
            show_tokens: env::var("MONKEY_TOKENS").is_ok(),
            user: env::var("USER")
                .or_else(|_| env::var("USERNAME"))
                .ok()
                .filter(|name| !name.is_empty()),
        }
    }

    pub fn greeting(&self) -> String {
        match &self.user {
            Some(user) => format!(
                "Hello {}! This is the Monkey programming language!",
                title_case(user)
            ),
            None => "Hello! This is the Monkey programming language!".to_owned(),
        }
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

thread_local! {
    // Text from `puts`, held until the session copies it to its writer.
    static PRINTED: RefCell<String> = RefCell::new(String::new());
}

fn puts(args: Vec<Object>) -> object::Result<Object> {
    PRINTED.with(|printed| {
        let mut printed = printed.borrow_mut();
        for arg in args.iter() {
            printed.push_str(&arg.to_string());
            printed.push('\n');
        }
    });
    Ok(NULL)
}

fn take_printed() -> String {
    PRINTED.with(|printed| printed.replace(String::new()))
}

fn ends_with_let(program: &Program) -> bool {
    matches!(program.statements.last(), Some(Statement::Let(_)))
}

/// A fresh session scope with the shell-only builtins bound.
pub fn session_environment() -> Environment {
    let env = Environment::new();
    env.set("puts", Object::Builtin(Builtin::new("puts", puts)));
    env
}

pub fn start<R: BufRead, W: Write>(config: &Config, mut input: R, mut output: W) -> io::Result<()> {
    let env = session_environment();
    take_printed();
    loop {
        write!(output, "{}", config.prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        if config.show_tokens {
            for token in Lexer::new(line) {
                writeln!(output, "{:?} {:?} @ {}", token.token_type(), token.literal(), token.position)?;
            }
            continue;
        }

        match Parser::new(Lexer::new(line)).parse_program() {
            Err(errors) => {
                debug!(count = errors.len(), "rejecting input");
                writeln!(output, "parser errors:")?;
                for err in errors.iter() {
                    writeln!(output, "\t{}", err)?;
                }
            }
            Ok(program) => {
                let evaluated = evaluator::eval(&program, &env);
                output.write_all(take_printed().as_bytes())?;
                match evaluated {
                    Ok(val) if val == NULL && ends_with_let(&program) => {}
                    Ok(_) if program.statements.is_empty() => {}
                    Ok(val) => writeln!(output, "{}", val)?,
                    Err(err) => writeln!(output, "ERROR: {}", err)?,
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn run_session(config: &Config, input: &str) -> String {
        let mut output = Vec::new();
        start(config, Cursor::new(input.as_bytes()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_session_keeps_bindings() {
        let config = Config::default();
        let output = run_session(&config, "let x = 5;\nx * 2\n\n");
        assert_eq!(output, ">> >> 10\n>> >> ");
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let config = Config {
            prompt: "$ ".to_owned(),
            ..Config::default()
        };
        let output = run_session(&config, "let = 1;\n5 + true\n1 + 1\n");
        assert_eq!(
            output,
            "$ parser errors:\n\
             \t1:5: expected next token to be Ident, got Assign instead\n\
             \t1:5: no prefix parse function for Assign found\n\
             $ ERROR: type mismatch: INTEGER + BOOLEAN\n\
             $ 2\n\
             $ "
        );
    }

    #[test]
    fn test_token_mode() {
        let config = Config {
            show_tokens: true,
            ..Config::default()
        };
        let output = run_session(&config, "x;\n");
        assert_eq!(
            output,
            ">> Ident \"x\" @ 1:1\nSemicolon \";\" @ 1:2\nEof \"\" @ 2:1\n>> "
        );
    }

    #[test]
    fn test_greeting() {
        let named = Config {
            user: Some("aLiCe".to_owned()),
            ..Config::default()
        };
        assert_eq!(
            named.greeting(),
            "Hello Alice! This is the Monkey programming language!"
        );
        assert_eq!(
            Config::default().greeting(),
            "Hello! This is the Monkey programming language!"
        );
    }

    #[test]
    fn test_puts_is_bound() {
        let env = session_environment();
        assert!(matches!(env.get("puts"), Some(Object::Builtin(_))));
    }

    #[test]
    fn test_puts_writes_to_session_output() {
        let config = Config::default();
        let output = run_session(&config, "puts(\"hi\", [1, 2]); 3\nputs(4)\n");
        assert_eq!(output, ">> hi\n[1, 2]\n3\n>> 4\nnull\n>> ");
    }

    #[test]
    fn test_puts_output_precedes_error() {
        let config = Config::default();
        let output = run_session(&config, "puts(1); -true\n");
        assert_eq!(output, ">> 1\nERROR: unknown operator: -BOOLEAN\n>> ");
    }

    #[test]
    fn test_top_level_return_before_let_is_shown() {
        let config = Config::default();
        let output = run_session(&config, "return 1; let x = 2\nlet y = 3\ny\n");
        assert_eq!(output, ">> 1\n>> >> 3\n>> ");
    }
}
