use monkey::{parse, run, tokenize, Environment, Object, RunError, TokenType, NULL};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;

fn run_fresh(source: &str) -> Result<Object, RunError> {
    run(source, &Environment::new())
}

fn rendered(source: &str) -> String {
    match run_fresh(source) {
        Ok(obj) => obj.to_string(),
        Err(err) => format!("ERROR: {}", err),
    }
}

#[test]
fn integer_arithmetic_is_signed_64_bit_with_truncating_division() {
    assert_eq!(rendered("7 / 2"), "3");
    assert_eq!(rendered("10 - 5 + 1"), "6");
    assert_eq!(rendered("1 + 2 * 3"), "7");
    assert_eq!(rendered("(1 + 2) * 3"), "9");
}

#[test]
fn infix_chains_render_left_associated() {
    let (program, errors) = parse("1 + 2 + 3");
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "((1 + 2) + 3)");
}

#[test]
fn truthiness() {
    assert_eq!(run_fresh("!5").unwrap(), Object::Boolean(false));
    assert_eq!(run_fresh("!!5").unwrap(), Object::Boolean(true));
    assert_eq!(run_fresh("!true").unwrap(), Object::Boolean(false));
}

#[test]
fn closures_capture_their_defining_scope() {
    let source = "let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(3);";
    assert_eq!(run_fresh(source).unwrap(), Object::Integer(5));
}

#[test]
fn function_lets_do_not_touch_outer_bindings() {
    let env = Environment::new();
    run("let x = 5; fn(){ let x = 10; }();", &env).unwrap();
    assert_eq!(run("x", &env).unwrap(), Object::Integer(5));
}

#[test]
fn errors_short_circuit_the_statement_sequence() {
    let first = run_fresh("5 + true;").unwrap_err();
    let second = run_fresh("5 + true; 5;").unwrap_err();
    assert_eq!(first.to_string(), "type mismatch: INTEGER + BOOLEAN");
    assert_eq!(first, second);
}

#[test]
fn missing_elements_are_null_not_errors() {
    assert_eq!(run_fresh("[1,2,3][10]").unwrap(), NULL);
    assert_eq!(run_fresh("{\"a\":1}[\"b\"]").unwrap(), NULL);
}

#[test]
fn rendered_expressions_reparse_to_the_same_tree() {
    let sources = [
        "-1 + 2 * 3 / -4 - 5",
        "!(1 < 2) == !(3 > 4)",
        "[1, \"two\", [3]][0] + {\"k\": 1 * 2}[\"k\"]",
        "5 != 4 == true",
        "let a = 3; a; -1",
        "let f = fn(x) { let y = x * 2; y; -y }; f(4)",
        "if (2 > 1) { 7; -8 } else { 9 }",
    ];

    for source in sources.iter() {
        let (original, errors) = parse(source);
        assert!(errors.is_empty(), "{:?}", errors);

        let (reparsed, errors) = parse(&original.to_string());
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(original, reparsed, "source: {}", source);
        assert_eq!(
            run_fresh(source).unwrap(),
            run_fresh(&original.to_string()).unwrap()
        );
    }
}

#[test]
fn parse_errors_are_collected_and_reported_together() {
    match run_fresh("let = 1; let y 2; (3") {
        Err(RunError::Parse { errors }) => {
            assert_eq!(errors.0.len(), 4);
            assert!(errors.to_string().starts_with("\n\t1:5: expected next token"));
        }
        other => panic!("expected parse errors, got {:?}", other),
    }
}

#[test]
fn tokenize_ends_with_a_single_eof() {
    let tokens = tokenize("let a = [1, \"b\"];");
    let types: Vec<TokenType> = tokens.iter().map(|t| t.token_type()).collect();
    assert_eq!(
        types,
        vec![
            TokenType::Let,
            TokenType::Ident,
            TokenType::Assign,
            TokenType::LBracket,
            TokenType::Int,
            TokenType::Comma,
            TokenType::String,
            TokenType::RBracket,
            TokenType::Semicolon,
            TokenType::Eof,
        ]
    );
}

#[test]
fn evaluating_twice_in_fresh_environments_gives_identical_results() {
    let source = "let counter = fn(n) { if (n > 0) { counter(n - 1) + 1 } else { 0 } };
                  let x = counter(20);
                  [x, len(\"abc\"), {\"k\": x}[\"k\"]]";
    let (program, errors) = parse(source);
    assert!(errors.is_empty());

    let first = monkey::eval(&program, &Environment::new()).unwrap();
    let second = monkey::eval(&program, &Environment::new()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), "[20, 3, 20]");
}

#[test]
fn one_program_evaluates_concurrently_with_separate_environments() {
    let (program, errors) = parse("let f = fn(n) { if (n < 2) { n } else { f(n - 1) + f(n - 2) } }; f(12)");
    assert!(errors.is_empty());
    let program = Arc::new(program);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let program = Arc::clone(&program);
            thread::spawn(move || {
                let env = Environment::new();
                monkey::eval(&program, &env)
                    .map(|obj| obj.to_string())
                    .map_err(|err| err.to_string())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok("144".to_owned()));
    }
}
