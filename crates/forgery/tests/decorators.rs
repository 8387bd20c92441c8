//! Integration tests for the unique, chance, and valid decorators.
//!
//! These tests exercise the decorators through a real generator, covering
//! retry exhaustion, probability extremes, and ledger lifetimes.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::collections::HashSet;

use forgery::{
    ChanceGenerator, GenerationError, Generator, GeneratorConfig, Producer, ProducerExt,
    UniqueGenerator, ValidGenerator, Value,
};
use rstest::{fixture, rstest};

#[fixture]
fn generator() -> Generator {
    Generator::with_config(GeneratorConfig::default().with_seed(77))
}

fn letters() -> Vec<Value> {
    vec![Value::from("a"), Value::from("b"), Value::from("c")]
}

#[rstest]
fn unique_exhausts_a_small_domain(mut generator: Generator) {
    let mut unique = generator.unique_with(true, 1_000);

    let picked: HashSet<Value> = (0..3)
        .map(|_| unique.random_element(&letters()).expect("unique value"))
        .collect();

    assert_eq!(picked, letters().into_iter().collect());
    let err = unique.random_element(&letters()).expect_err("domain exhausted");
    assert_eq!(err, GenerationError::UniquenessOverflow { max_retries: 1_000 });
    assert_eq!(
        err.to_string(),
        "maximum retries of 1000 reached without finding a unique value"
    );
}

#[rstest]
fn unique_ledger_persists_until_reset(mut generator: Generator) {
    for _ in 0..3 {
        generator
            .unique_with(false, 1_000)
            .random_element(&letters())
            .expect("unique value");
    }

    assert!(generator.unique().random_element(&letters()).is_err());
    assert!(
        generator
            .unique_with(true, 1_000)
            .random_element(&letters())
            .is_ok()
    );
}

#[rstest]
fn unique_tracks_each_signature_separately(mut generator: Generator) {
    let mut unique = generator.unique_with(true, 100);
    let binary = [Value::Int(0), Value::Int(1)];
    let ternary = [Value::Int(0), Value::Int(1), Value::Int(2)];

    for _ in 0..2 {
        unique.random_element(&binary).expect("binary value");
    }
    for _ in 0..3 {
        unique.random_element(&ternary).expect("ternary value");
    }

    assert!(unique.random_element(&binary).is_err());
}

#[rstest]
fn unique_keeps_an_existing_budget(mut generator: Generator) {
    drop(generator.unique_with(true, 5));

    assert_eq!(generator.unique_with(false, 9_999).max_retries(), 5);
    assert_eq!(generator.unique_with(true, 9_999).max_retries(), 9_999);
}

#[test]
fn unique_uses_the_configured_budget() {
    let config = GeneratorConfig::from_json(r#"{"version": 1, "uniqueMaxRetries": 12}"#)
        .expect("valid config");
    let mut generator = Generator::with_config(config);

    assert_eq!(generator.unique().max_retries(), 12);
}

#[rstest]
#[case(0.0)]
#[case(-1.0)]
#[case(f64::NAN)]
fn weights_without_chance_return_the_default(mut generator: Generator, #[case] weight: f64) {
    let mut optional = generator.optional_or(weight, Value::from("fallback"));

    for _ in 0..1_000 {
        assert_eq!(
            optional.invoke("randomDigit", &[]).expect("value"),
            Value::from("fallback")
        );
    }
}

#[rstest]
fn full_weight_always_delegates(mut generator: Generator) {
    let mut optional = generator.optional(1.0);

    for _ in 0..1_000 {
        let digit = optional.random_digit().expect("always produced");
        assert!((0..=9).contains(&digit));
    }
}

#[rstest]
fn percentage_weights_still_work(mut generator: Generator) {
    let mut optional = generator.optional(100.0);

    assert!((0..1_000).all(|_| !optional
        .invoke("randomDigit", &[])
        .expect("value")
        .is_null()));
}

#[rstest]
fn valid_converges_on_even_values(mut generator: Generator) {
    let mut even = generator.valid(|value| value == &Value::Int(0));

    for _ in 0..100 {
        assert_eq!(even.number_between(0, 1), Ok(0));
    }
}

#[rstest]
fn valid_overflows_when_nothing_passes(mut generator: Generator) {
    let mut impossible = generator.valid_with(
        Some(Box::new(|value: &Value| value == &Value::Int(0))),
        10,
    );

    assert_eq!(
        impossible.number_between(1, 9),
        Err(GenerationError::ValidationOverflow { max_retries: 10 })
    );
}

#[rstest]
fn zero_retries_fail_immediately(mut generator: Generator) {
    assert_eq!(
        generator.unique_with(true, 0).random_digit(),
        Err(GenerationError::UniquenessOverflow { max_retries: 0 })
    );
    assert_eq!(
        generator.valid_with(None, 0).random_digit(),
        Err(GenerationError::ValidationOverflow { max_retries: 0 })
    );
}

#[rstest]
fn decorators_compose(mut generator: Generator) {
    let always = ChanceGenerator::new(&mut generator, 1.0, Value::Null);
    let odd = ValidGenerator::new(
        always,
        Some(Box::new(|value: &Value| {
            value.as_int().is_some_and(|n| n.rem_euclid(2) == 1)
        })),
        1_000,
    );
    let mut unique_odd = UniqueGenerator::new(odd, 1_000);

    let digits: HashSet<i64> = (0..5)
        .map(|_| unique_odd.random_digit().expect("odd digit"))
        .collect();

    assert_eq!(digits, HashSet::from([1, 3, 5, 7, 9]));
    assert!(unique_odd.random_digit().is_err());
}

#[rstest]
fn unique_applies_to_templates(mut generator: Generator) {
    let mut unique = generator.unique_with(true, 1_000);
    let rendered: HashSet<String> = (0..9)
        .map(|_| unique.parse("{{ randomDigitNotZero }}").expect("unique digit"))
        .collect();

    assert_eq!(rendered.len(), 9);
}
