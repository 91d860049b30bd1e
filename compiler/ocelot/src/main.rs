//! Ocelot CLI

use ocelot::commands::{eval_expr, repl, run_file};
use ocelot::tracing_setup::init_tracing;
use ocelot::CliConfig;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Settings flags may appear anywhere; everything else is the command.
    let mut config = CliConfig::from_env();
    let mut rest = Vec::new();
    for arg in args.iter().skip(1) {
        if !config.apply_flag(arg) {
            rest.push(arg.as_str());
        }
    }
    init_tracing(&config);

    let Some((&command, operands)) = rest.split_first() else {
        repl(&config);
        return;
    };

    match command {
        "repl" => repl(&config),
        "eval" | "-e" => {
            let Some(expr) = operands.first() else {
                eprintln!("Usage: ocelot eval <expression>");
                eprintln!("Example: ocelot eval '(add 1 2)'");
                std::process::exit(1);
            };
            eval_expr(expr);
        }
        "run" => {
            let Some(path) = operands.first() else {
                eprintln!("error: missing file path");
                eprintln!("Usage: ocelot run <file.oc>");
                std::process::exit(1);
            };
            run_file(path);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("Ocelot {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare source path runs the file
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("oc"))
            {
                run_file(command);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Ocelot, a small lazy Lisp");
    println!();
    println!("Usage: ocelot [options] [command]");
    println!();
    println!("Commands:");
    println!("  repl                 Start the interactive loop (default)");
    println!("  eval <expr>          Evaluate one expression and print it (also -e)");
    println!("  run <file.oc>        Evaluate every form in a file");
    println!("  help                 Show this help message");
    println!("  version              Show the version");
    println!();
    println!("Options:");
    println!("  --prompt=<text>      REPL prompt (env: OCELOT_PROMPT)");
    println!("  --log=<filter>       Log filter, e.g. ocelot_eval=debug (env: OCELOT_LOG, RUST_LOG)");
    println!("  --log-tree           Hierarchical log output (env: OCELOT_LOG_TREE=1)");
}
