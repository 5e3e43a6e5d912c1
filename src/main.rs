mod cli;

use std::process::ExitCode;

use clap::Parser;

use chomsky::error_handling::*;
use chomsky::normalize::Normalizer;
use chomsky::parser;
use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let grammar = match parser::parse_file(&cli.file, cli.start.as_deref()) {
        Ok(grammar) => grammar,
        Err(errors) => {
            report(&errors);
            return ExitCode::FAILURE;
        }
    };

    let normalized = if cli.trace {
        eprintln!("input:\n{}\n", grammar);
        Normalizer::with_trace(|phase, grammar| eprintln!("after {}:\n{}\n", phase, grammar)).run(grammar)
    } else {
        Normalizer::new().run(grammar)
    };

    println!("{}", normalized);

    if cli.check {
        let violations = normalized.cnf_violations();
        for violation in &violations {
            eprintln!("{}", violation);
        }
        if !violations.is_empty() {
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
