//! Tests for run and extract.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn cli_parse_run_defaults() {
    match parse(&["jetour", "run"]) {
        CliCommand::Run { output_dir } => assert!(output_dir.is_none()),
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_output_dir() {
    match parse(&["jetour", "run", "--output-dir", "/tmp/out"]) {
        CliCommand::Run { output_dir } => {
            assert_eq!(output_dir, Some(PathBuf::from("/tmp/out")));
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_extract_defaults() {
    match parse(&["jetour", "extract"]) {
        CliCommand::Extract { output_dir, month } => {
            assert!(output_dir.is_none());
            assert!(month.is_none());
        }
        _ => panic!("expected Extract"),
    }
}

#[test]
fn cli_parse_extract_month() {
    match parse(&["jetour", "extract", "--month", "202405", "--output-dir", "data"]) {
        CliCommand::Extract { output_dir, month } => {
            assert_eq!(output_dir, Some(PathBuf::from("data")));
            assert_eq!(month.as_deref(), Some("202405"));
        }
        _ => panic!("expected Extract"),
    }
}

#[test]
fn cli_parse_run_rejects_positional() {
    assert!(Cli::try_parse_from(["jetour", "run", "extra"]).is_err());
}
