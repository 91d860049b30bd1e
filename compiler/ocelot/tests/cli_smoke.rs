//! Drive the built `ocelot` binary end to end.

#![expect(clippy::unwrap_used, reason = "Tests can panic")]

use std::io::Write;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

fn ocelot(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ocelot"))
        .args(args)
        .env_remove("OCELOT_LOG")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn eval_prints_the_value() {
    let out = ocelot(&["eval", "(add 1 2 3)"], "");
    assert!(out.status.success());
    assert_eq!(stdout(&out), "6\n");

    let out = ocelot(&["-e", r#"(if (gt? 2 1) "yes" "no")"#], "");
    assert_eq!(stdout(&out), "yes\n");
}

#[test]
fn eval_failure_exits_nonzero() {
    let out = ocelot(&["eval", "(quot* 1 0)"], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("division by zero"), "{}", stderr(&out));
}

#[test]
fn repl_reads_stdin_until_eof() {
    let out = ocelot(
        &["--prompt="],
        "(def! sq (fn* (x) (mul x x)))\n(sq\n 7)\n(nope)\n(prn \"hi\")\n",
    );
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("→ 49\n"), "{text}");
    assert!(text.contains("unresolved symbol: nope\n"), "{text}");
    assert!(text.contains("hi\n→ nil\n"), "{text}");
}

#[test]
fn prompt_from_environment() {
    let out = Command::new(env!("CARGO_BIN_EXE_ocelot"))
        .arg("repl")
        .env("OCELOT_PROMPT", "λ> ")
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(stdout(&out).starts_with("λ> "));
}

#[test]
fn run_evaluates_a_file() {
    let path = std::env::temp_dir().join(format!("ocelot-smoke-{}.oc", std::process::id()));
    std::fs::write(
        &path,
        "; countdown\n(defn! down (n) (if (lteq? n 0) :done (down (sub n 1))))\n(prn (down 1000))\n",
    )
    .unwrap();
    let out = ocelot(&["run", path.to_str().unwrap()], "");
    std::fs::remove_file(&path).unwrap();
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), ":done\n");
}

#[test]
fn missing_file_is_reported() {
    let out = ocelot(&["run", "/definitely/not/here.oc"], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("cannot find file"));
}

#[test]
fn host_functions_are_available() {
    let out = ocelot(&["eval", "(number? (now))"], "");
    assert_eq!(stdout(&out), "true\n");
}

#[test]
fn unknown_command_fails() {
    let out = ocelot(&["frobnicate"], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Unknown command: frobnicate"));
}
