//! The interactive loop.
//!
//! Lines are collected until they hold complete forms, then every form is
//! evaluated against one persistent environment. Results print as
//! `→ value` in debug rendering; errors print and the loop goes on.

use std::io::{self, BufRead, Write};

use ocelot_eval::{eval, Env};
use ocelot_ir::errors::parse_failure;
use tracing::trace;

use crate::{cli_env, CliConfig};

/// Prompt shown while a form is still open.
pub const CONTINUATION_PROMPT: &str = "... ";

/// Run the REPL on stdin and stdout until end of input.
pub fn repl(config: &CliConfig) {
    let env = cli_env();
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = run_repl(config, &env, stdin.lock(), stdout.lock()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// The REPL over arbitrary input and output.
pub fn run_repl(
    config: &CliConfig,
    env: &Env,
    mut input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    let mut pending = String::new();
    loop {
        let prompt = if pending.is_empty() {
            config.prompt.as_str()
        } else {
            CONTINUATION_PROMPT
        };
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        let at_eof = input.read_line(&mut line)? == 0;
        pending.push_str(&line);
        if pending.trim().is_empty() {
            pending.clear();
            if at_eof {
                break;
            }
            continue;
        }

        let forms = match ocelot_parse::parse_all(&pending) {
            Ok(forms) => forms,
            Err(err) if err.is_incomplete() && !at_eof => continue,
            Err(err) => {
                writeln!(output, "{}", parse_failure(err.to_string()))?;
                pending.clear();
                if at_eof {
                    break;
                }
                continue;
            }
        };
        pending.clear();
        trace!(forms = forms.len(), "repl input");

        for form in &forms {
            match eval(form, env) {
                Ok(value) => writeln!(output, "→ {value:?}")?,
                Err(err) => {
                    writeln!(output, "{err}")?;
                    break;
                }
            }
        }
        if at_eof {
            break;
        }
    }
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, reason = "Tests can panic")]

    use pretty_assertions::assert_eq;

    use super::*;

    fn session(input: &str) -> String {
        let config = CliConfig {
            prompt: String::new(),
            ..CliConfig::default()
        };
        let env = ocelot_eval::base_env_with_printer(ocelot_eval::buffer_handler());
        let mut output = Vec::new();
        run_repl(&config, &env, input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn prints_results() {
        assert_eq!(session("(add 1 2)\n"), "→ 3\n\n");
    }

    #[test]
    fn definitions_persist_between_lines() {
        assert_eq!(session("(def! x 5)\n(mul x 2)\n"), "→ 5\n→ 10\n\n");
    }

    #[test]
    fn open_forms_continue_on_the_next_line() {
        assert_eq!(
            session("(add 1\n  2)\n"),
            format!("{CONTINUATION_PROMPT}→ 3\n\n")
        );
    }

    #[test]
    fn errors_do_not_end_the_session() {
        assert_eq!(session("(nope)\n7\n"), "unresolved symbol: nope\n→ 7\n\n");
    }

    #[test]
    fn debug_rendering_quotes_strings() {
        assert_eq!(session("[1 \"a\" :k]\n"), "→ [1 \"a\" :k]\n\n");
    }

    #[test]
    fn unfinished_input_at_eof_is_reported() {
        let out = session("(add 1");
        assert!(out.contains("parse error: "), "{out}");
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(session("\n\n1\n"), "→ 1\n\n");
    }
}
