use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use console::style;
use mylang::{run_file, Config, Error, Session};
use mylang_eval::Interpreter;
use mylang_value::Value;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = Config::parse();
    init_logging(&config.log);

    let mut interpreter = Interpreter::new().with_config(config.eval_config());
    match config.script {
        Some(path) => match run_file(&mut interpreter, path) {
            Ok(_) => ExitCode::SUCCESS,
            Err(err) => {
                report(&err);
                ExitCode::FAILURE
            }
        },
        None => repl(Session::new(interpreter)),
    }
}

/// Logs go to stderr so they never mix with program output.
fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn repl(mut session: Session) -> ExitCode {
    let mut stdout = io::stdout();
    let stdin = io::stdin();
    loop {
        print!("{}", session.prompt());
        if stdout.flush().is_err() {
            return ExitCode::FAILURE;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                println!();
                return ExitCode::SUCCESS;
            }
            Ok(_) => {}
            Err(err) => {
                eprintln!("{} {}", style("error:").red().bold(), err);
                return ExitCode::FAILURE;
            }
        }

        match session.feed_line(line.trim_end_matches(&['\n', '\r'][..])) {
            None | Some(Ok(Value::None)) => {}
            Some(Ok(value)) => println!("{}", value),
            Some(Err(err)) => report(&err),
        }
    }
}

fn report(err: &Error) {
    match err {
        Error::Syntax(diagnostic) => println!("{}", diagnostic),
        err => println!("{} {}", style("[Error]").red().bold(), err),
    }
}
