use crate::helpers::CliRunner;

#[test]
fn binary_plays_a_scripted_round() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run_with_input(
        &["play", "--seed", "42", "--rounds", "1"],
        "1\nAda\n10\ns\ns\ns\ns\n",
    );
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("B L A C K J A C K"));
    assert!(res.stdout.contains("Rounds played: 1"));
}

#[test]
fn binary_exits_130_when_stdin_closes() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run_with_input(&["play"], "");
    assert_eq!(res.exit_code, 130);
}

#[test]
fn verbose_logs_go_to_stderr_only() {
    let cli = CliRunner::new().expect("cli runner");
    let quiet = cli.run(&["sim", "--seats", "1", "--rounds", "2", "--seed", "5"]);
    let verbose = cli.run(&["--verbose", "sim", "--seats", "1", "--rounds", "2", "--seed", "5"]);
    assert_eq!(quiet.exit_code, 0);
    assert_eq!(verbose.exit_code, 0);
    assert_eq!(quiet.stdout, verbose.stdout);
    assert!(!quiet.stderr.contains("round started"));
    assert!(verbose.stderr.contains("round started"));
}

#[test]
fn rust_log_overrides_verbose() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run_with_env(
        &["sim", "--seats", "1", "--rounds", "1", "--seed", "5"],
        &[("RUST_LOG", "blackjack_engine=debug")],
    );
    assert_eq!(res.exit_code, 0);
    assert!(res.stderr.contains("hand settled"));
}
