//! Shared helpers for the CLI integration tests.
//!
//! - [`run_lib`] drives `run_with_input` in-process with scripted stdin.
//! - [`CliRunner`] spawns the real `blackjack` binary with a clean
//!   `BLACKJACK_*` environment, for tests that need env vars or exit codes
//!   observed from outside.
#![allow(dead_code)]

use std::io::{Cursor, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const ENV_KEYS: [&str; 4] = [
    "BLACKJACK_CONFIG",
    "BLACKJACK_SEED",
    "BLACKJACK_STARTING_CASH",
    "BLACKJACK_MAX_ROUNDS",
];

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_lib(args: &[&str], input: &str) -> CliResult {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let argv: Vec<&str> = std::iter::once("blackjack").chain(args.iter().copied()).collect();
    let code = blackjack_cli::run_with_input(argv, &mut Cursor::new(input.to_string()), &mut out, &mut err);
    CliResult {
        exit_code: code,
        stdout: String::from_utf8_lossy(&out).to_string(),
        stderr: String::from_utf8_lossy(&err).to_string(),
    }
}

#[derive(Debug)]
pub struct CliRunner {
    binary_path: PathBuf,
    work_dir: tempfile::TempDir,
}

impl CliRunner {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_blackjack")),
            work_dir: tempfile::tempdir()?,
        })
    }

    pub fn dir(&self) -> &Path {
        self.work_dir.path()
    }

    /// Writes `contents` into the runner's scratch directory.
    pub fn create_file(&self, name: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.work_dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn run(&self, args: &[&str]) -> CliResult {
        self.run_full(args, &[], "")
    }

    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> CliResult {
        self.run_full(args, env, "")
    }

    pub fn run_with_input(&self, args: &[&str], input: &str) -> CliResult {
        self.run_full(args, &[], input)
    }

    pub fn run_full(&self, args: &[&str], env: &[(&str, &str)], input: &str) -> CliResult {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(args)
            .current_dir(self.work_dir.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env_remove("RUST_LOG");
        for key in ENV_KEYS {
            cmd.env_remove(key);
        }
        for (key, value) in env {
            cmd.env(key, value);
        }

        let mut child = cmd.spawn().expect("failed to spawn blackjack binary");
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .expect("failed to write stdin");
        }
        let output = child.wait_with_output().expect("failed to read output");
        CliResult {
            exit_code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
