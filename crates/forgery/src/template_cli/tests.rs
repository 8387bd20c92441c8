//! Unit tests for the template CLI helpers.

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use rstest::{fixture, rstest};

use super::*;
use crate::error::ConfigError;

static NEXT_CONFIG: AtomicUsize = AtomicUsize::new(0);

struct ConfigFixture {
    path: PathBuf,
}

impl ConfigFixture {
    fn write(json: &str) -> Self {
        let index = NEXT_CONFIG.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "forgery-cli-{}-{index}.json",
            std::process::id()
        ));
        fs::write(&path, json).expect("write config");
        Self { path }
    }
}

impl Drop for ConfigFixture {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            drop(err);
        }
    }
}

#[fixture]
fn seeded_config() -> ConfigFixture {
    ConfigFixture::write(r#"{"version": 1, "seed": 99}"#)
}

fn args(values: &[&str]) -> impl Iterator<Item = String> {
    values
        .iter()
        .map(|value| (*value).to_owned())
        .collect::<Vec<_>>()
        .into_iter()
}

fn options(values: &[&str]) -> Options {
    let ParseOutcome::Options(options) = parse_args(args(values)).expect("parse args") else {
        panic!("expected options");
    };
    options
}

#[rstest]
#[case("--help")]
#[case("-h")]
fn parse_args_returns_help(#[case] flag: &str) {
    let outcome = parse_args(args(&["{{ name }}", flag])).expect("parse args");

    assert_eq!(outcome, ParseOutcome::Help);
}

#[test]
fn parse_args_requires_a_template() {
    let err = parse_args(args(&["--seed", "4"])).expect_err("expected error");

    assert_eq!(err, CliError::MissingTemplate);
}

#[rstest]
#[case("--seed")]
#[case("--count")]
#[case("--config")]
fn parse_args_reports_missing_value(#[case] flag: &'static str) {
    let err = parse_args(args(&[flag])).expect_err("expected error");

    assert_eq!(err, CliError::MissingValue { flag });
}

#[test]
fn parse_args_reports_unknown_flags() {
    let err = parse_args(args(&["--nope", "{{ name }}"])).expect_err("expected error");

    assert_eq!(
        err,
        CliError::UnknownArgument {
            value: "--nope".to_owned(),
        }
    );
}

#[test]
fn parse_args_rejects_a_second_template() {
    let err = parse_args(args(&["{{ name }}", "{{ ean8 }}"])).expect_err("expected error");

    assert_eq!(
        err,
        CliError::UnexpectedArgument {
            value: "{{ ean8 }}".to_owned(),
        }
    );
}

#[rstest]
#[case("--seed", "not-a-number")]
#[case("--count", "-2")]
#[case("--count", "0")]
fn parse_args_reports_invalid_numbers(#[case] flag: &str, #[case] raw: &str) {
    let err = parse_args(args(&[flag, raw, "{{ name }}"])).expect_err("expected error");

    let CliError::InvalidNumber {
        flag: reported,
        value,
        ..
    } = err
    else {
        panic!("expected invalid number error");
    };

    assert_eq!(reported, flag);
    assert_eq!(value, raw);
}

#[test]
fn parse_args_parses_full_options() {
    let parsed = options(&[
        "--seed",
        "2026",
        "--count",
        "5",
        "--config",
        "forgery.json",
        "{{ isbn10 }}",
    ]);

    assert_eq!(parsed.template(), "{{ isbn10 }}");
    assert_eq!(parsed.seed, Some(2026));
    assert_eq!(parsed.count(), 5);
    assert_eq!(parsed.config_path(), Some(Path::new("forgery.json")));
}

#[test]
fn parse_args_accepts_a_lone_dash_template() {
    assert_eq!(options(&["-"]).template(), "-");
}

#[test]
fn render_is_deterministic_for_a_seed() {
    let parsed = options(&["--seed", "31", "--count", "4", "{{ ean13 }} {{ semver }}"]);

    let first = render(&parsed).expect("render");
    let second = render(&parsed).expect("render");

    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
}

#[rstest]
fn render_reads_the_seed_from_the_config(seeded_config: ConfigFixture) {
    let path = seeded_config.path.to_string_lossy().into_owned();
    let from_file = render(&options(&["--config", &path, "{{ randomNumber }}"])).expect("render");
    let from_flag = render(&options(&["--seed", "99", "{{ randomNumber }}"])).expect("render");

    assert_eq!(from_file, from_flag);
}

#[rstest]
fn seed_flag_overrides_the_config(seeded_config: ConfigFixture) {
    let path = seeded_config.path.to_string_lossy().into_owned();
    let parsed = options(&["--config", &path, "--seed", "5", "{{ name }}"]);

    let generator = build_generator(&parsed).expect("generator");

    assert_eq!(generator.config().seed(), Some(5));
}

#[test]
fn render_reports_missing_config_files() {
    let parsed = options(&["--config", "/nonexistent/forgery.json", "{{ name }}"]);

    let err = render(&parsed).expect_err("expected error");

    assert!(matches!(
        err,
        CliError::ConfigError {
            source: ConfigError::IoError { .. }
        }
    ));
}

#[test]
fn render_reports_unknown_formats() {
    let parsed = options(&["--seed", "1", "{{ nothingHere }}"]);

    let err = render(&parsed).expect_err("expected error");

    assert_eq!(
        err,
        CliError::GenerationError {
            source: crate::error::GenerationError::unknown_format("nothingHere"),
        }
    );
}
