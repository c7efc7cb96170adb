use monkey::repl::{self, Config};
use std::env;
use std::io;
use std::process;

// Logging stays off unless RUST_LOG asks for it, and goes to stderr so it
// never interleaves with REPL output.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();

    let config = Config::from_env();
    println!("{}", config.greeting());
    println!("Feel free to type in commands");

    let stdin = io::stdin();
    if let Err(err) = repl::start(&config, stdin.lock(), io::stdout()) {
        eprintln!("monkey: {}", err);
        process::exit(1);
    }
}
