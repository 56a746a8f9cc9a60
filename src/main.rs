use std::process::ExitCode;

use clap::Parser as _;
use log::debug;

use tdop::{display_error, errors::errors::Error, selftest, Parser, ParserConfig};

#[derive(clap::Parser, Debug)]
#[command(name = "tdop")]
#[command(about = "Parse C-style expressions and print them as s-expressions", long_about = None)]
struct Args {
    /// Expressions to parse; runs the built-in self-test when none are given
    expressions: Vec<String>,

    /// Deepest operand nesting accepted
    #[arg(long)]
    max_depth: Option<usize>,

    /// Print a source diagnostic for every failed parse
    #[arg(short, long)]
    diagnostics: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
    }

    let mut config = ParserConfig::default();
    if let Some(max_depth) = args.max_depth {
        config = config.with_max_depth(max_depth);
    }
    debug!("{:?}", config);

    let parser = Parser::cexp().with_config(config);

    if args.expressions.is_empty() {
        return run_self_test(&parser);
    }

    let mut failed = false;
    for expression in &args.expressions {
        let (line, error) = report(&parser, expression);
        println!("{}", line);

        if let Some(error) = error {
            failed = true;

            if args.diagnostics {
                display_error(&error, expression);
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// The output line for `expression`, along with the error when it failed to parse.
fn report(parser: &Parser, expression: &str) -> (String, Option<Error>) {
    match parser.parse(expression) {
        Ok(node) => (format!("{} -> {}", expression, node), None),
        Err(error) => (format!("Unable to parse input: {}", error), Some(error)),
    }
}

fn describe_mismatch(mismatch: &selftest::Mismatch) -> String {
    format!("{}: expected {}, got {}", mismatch.input, mismatch.expected, mismatch.actual)
}

fn run_self_test(parser: &Parser) -> ExitCode {
    let mismatches = selftest::run(parser);

    for mismatch in &mismatches {
        println!("{}", describe_mismatch(mismatch));
    }

    println!(
        "{} of {} cases passed",
        selftest::CASES.len() - mismatches.len(),
        selftest::CASES.len()
    );

    if mismatches.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
