use monkey::{eval, Environment, Lexer, Parser};
use std::env;
use std::time::Instant;

static FIBONACCI: &str = "let fibonacci = fn(x) {
if (x == 0) { 0
     } else {
       if (x == 1) {
         return 1;
       } else {
         fibonacci(x - 1) + fibonacci(x - 2);
       }
} };";

fn main() {
    let n: u32 = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(25);

    let input = format!("{}\nfibonacci({});", FIBONACCI, n);
    let program = Parser::new(Lexer::new(input))
        .parse_program()
        .expect("Parse errors found");

    let env = Environment::new();
    let start = Instant::now();
    let result = eval(&program, &env);
    let duration = start.elapsed();

    match result {
        Ok(value) => println!(
            "engine=eval, n={}, result={}, duration={}",
            n,
            value,
            duration.as_secs_f64(),
        ),
        Err(err) => eprintln!("ERROR: {}", err),
    }
}
