use std::fs;

use clap::{Parser, ValueEnum};
use lolz::{
    RunOptions,
    interpreter::{
        analyzer::core::analyze_program, evaluator::io::StdIo, lexer::scan, parser::core::parse,
    },
    run,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// lolz runs LOLCODE programs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells lolz to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Prints an intermediate representation as JSON instead of running.
    #[arg(short, long, value_enum)]
    emit: Option<Emit>,

    /// Only reports diagnostics, without running the program.
    #[arg(short, long)]
    check: bool,

    /// Runs the program even if it has syntax errors.
    #[arg(long)]
    force: bool,

    /// Logs pipeline progress to stderr. Repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    contents: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Emit {
    /// The token stream.
    Tokens,
    /// The syntax tree.
    Ast,
    /// The global symbol table and all diagnostics.
    Symbols,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents.clone()
    };

    if let Some(emit) = args.emit {
        let tokens = scan(&script);
        match emit {
            Emit::Tokens => print_json(&tokens),
            Emit::Ast => print_json(&parse(&tokens).0),
            Emit::Symbols => print_json(&analyze_program(&parse(&tokens).0)),
        }
        return;
    }

    if args.check {
        let (program, mut diagnostics) = parse(&scan(&script));
        diagnostics.extend(analyze_program(&program).diagnostics);
        for diagnostic in &diagnostics {
            eprintln!("{diagnostic}");
        }
        if diagnostics.iter().any(|d| d.is_blocking()) {
            std::process::exit(1);
        }
        return;
    }

    let report = run(&script,
                     StdIo,
                     RunOptions { analyze: true,
                                  force:   args.force, });

    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }
    if let Some(e) = &report.error {
        eprintln!("{e}");
    }
    if !report.is_success() {
        std::process::exit(1);
    }
}

/// Sends `tracing` events to stderr. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("lolz={level}")));

    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();
}

fn print_json(value: &impl Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            std::process::exit(1);
        },
    }
}
