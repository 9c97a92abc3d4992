use crate::helpers::CliRunner;

use serde_json::Value;

fn cfg(cli: &CliRunner, env: &[(&str, &str)]) -> Value {
    let res = cli.run_with_env(&["cfg"], env);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    serde_json::from_str(&res.stdout).expect("cfg prints JSON")
}

#[test]
fn defaults_without_file_or_env() {
    let cli = CliRunner::new().unwrap();
    let json = cfg(&cli, &[]);
    assert_eq!(json["starting_cash"]["value"].as_u64(), Some(1000));
    assert_eq!(json["starting_cash"]["source"].as_str(), Some("default"));
    assert!(json["seed"]["value"].is_null());
    assert_eq!(json["max_players"]["value"].as_u64(), Some(4));
    assert!(json["max_rounds"]["value"].is_null());
    assert_eq!(json["min_bet"]["value"].as_u64(), Some(1));
}

#[test]
fn env_beats_file_beats_default() {
    let cli = CliRunner::new().unwrap();
    let path = cli
        .create_file(
            "table.toml",
            "seed = 456\nstarting_cash = 500\nmax_players = 6\n",
        )
        .unwrap();
    let path = path.to_string_lossy().into_owned();

    let json = cfg(&cli, &[("BLACKJACK_CONFIG", &path)]);
    assert_eq!(json["seed"]["value"].as_u64(), Some(456));
    assert_eq!(json["seed"]["source"].as_str(), Some("file"));
    assert_eq!(json["starting_cash"]["value"].as_u64(), Some(500));
    assert_eq!(json["max_players"]["source"].as_str(), Some("file"));
    assert_eq!(json["min_bet"]["source"].as_str(), Some("default"));

    let json = cfg(
        &cli,
        &[("BLACKJACK_CONFIG", &path), ("BLACKJACK_SEED", "789")],
    );
    assert_eq!(json["seed"]["value"].as_u64(), Some(789));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["starting_cash"]["source"].as_str(), Some("file"));
}

#[test]
fn flags_beat_env() {
    let cli = CliRunner::new().unwrap();
    let res = cli.run_full(
        &["play", "--seed", "5", "--rounds", "1"],
        &[("BLACKJACK_SEED", "9"), ("BLACKJACK_STARTING_CASH", "300")],
        "1\nAda\n10\ns\ns\ns\ns\n",
    );
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("play: seed=5 rounds=1"));
    assert!(res.stdout.contains("Player 1: Ada ($300)"));
    assert!(res.stdout.contains("Place your bet {1-300}: "));
}

#[test]
fn file_limits_apply_to_play() {
    let cli = CliRunner::new().unwrap();
    let path = cli
        .create_file("table.toml", "max_players = 2\nmin_bet = 5\nmax_rounds = 1\n")
        .unwrap();
    let path = path.to_string_lossy().into_owned();
    let res = cli.run_full(
        &["play", "--seed", "2"],
        &[("BLACKJACK_CONFIG", &path)],
        "3\n1\nAda\n4\n5\ns\ns\ns\ns\n",
    );
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("How many players? {1-2}: "));
    assert!(res.stdout.contains("Place your bet {5-1000}: "));
    assert!(res.stderr.contains("Bet must be between 5 and 1000, got 4"));
    assert!(res.stdout.contains("Rounds played: 1"));
}

#[test]
fn invalid_values_fail_with_exit_2() {
    let cli = CliRunner::new().unwrap();
    let bad_seed = cli.run_with_env(&["cfg"], &[("BLACKJACK_SEED", "not-a-number")]);
    assert_eq!(bad_seed.exit_code, 2);
    assert!(bad_seed.stderr.contains("Invalid seed"));

    let bad_file = cli.create_file("bad.toml", "max_players = 9\n").unwrap();
    let bad_file = bad_file.to_string_lossy().into_owned();
    let res = cli.run_with_env(&["cfg"], &[("BLACKJACK_CONFIG", &bad_file)]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("max_players must be between 1 and 7"));

    let unknown_key = cli.create_file("unknown.toml", "level = 3\n").unwrap();
    let unknown_key = unknown_key.to_string_lossy().into_owned();
    let res = cli.run_with_env(&["cfg"], &[("BLACKJACK_CONFIG", &unknown_key)]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("cannot parse config file"));

    let zero_cash = cli.run_with_env(&["cfg"], &[("BLACKJACK_STARTING_CASH", "0")]);
    assert_eq!(zero_cash.exit_code, 2);
}
