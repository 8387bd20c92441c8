//! Produce a value only some of the time.

use tracing::warn;

use crate::decorator::Producer;
use crate::error::GenerationError;
use crate::random::RandomSource;
use crate::value::Value;

/// Wraps a producer and returns a default instead of calling it with
/// probability `1 - weight`.
///
/// The draw happens before the wrapped producer runs, so a skipped call
/// consumes no randomness beyond the draw itself.
#[derive(Debug)]
pub struct ChanceGenerator<P> {
    inner: P,
    weight: f64,
    default: Value,
    random: RandomSource,
}

impl<P: Producer> ChanceGenerator<P> {
    /// Wraps `inner`, drawing from its random source.
    ///
    /// `weight` is the probability of producing a value. Weights above 1
    /// are read as percentages and logged as deprecated. A `NaN` weight
    /// never produces a value.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "percentage weights are scaled to probabilities"
    )]
    pub fn new(inner: P, weight: f64, default: Value) -> Self {
        let probability = if weight.is_nan() {
            warn!("weight is not a number; the default will always be returned");
            0.0
        } else if weight > 1.0 {
            warn!(weight, "weights above 1 are deprecated; pass a probability between 0 and 1");
            weight / 100.0
        } else {
            weight
        };
        let random = inner.random_source();
        Self {
            inner,
            weight: probability,
            default,
            random,
        }
    }

    /// Returns the probability of producing a value.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }
}

impl<P: Producer> Producer for ChanceGenerator<P> {
    fn invoke(&mut self, name: &str, args: &[Value]) -> Result<Value, GenerationError> {
        if self.weight <= 0.0 || self.random.unit() > self.weight {
            return Ok(self.default.clone());
        }
        self.inner.invoke(name, args)
    }

    fn random_source(&self) -> RandomSource {
        self.random.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rstest::rstest;

    use super::*;
    use crate::decorator::tests::Scripted;

    fn always(value: i64) -> Scripted {
        Scripted {
            values: std::iter::repeat_n(Value::Int(value), 1_000).collect::<VecDeque<_>>(),
            ..Scripted::default()
        }
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(-0.5, 0)]
    #[case(f64::NAN, 0)]
    #[case(f64::NEG_INFINITY, 0)]
    #[case(f64::INFINITY, 1_000)]
    #[case(1.0, 1_000)]
    #[case(100.0, 1_000)]
    fn extreme_weights_are_deterministic(#[case] weight: f64, #[case] expected_calls: usize) {
        let mut chance = ChanceGenerator::new(always(3), weight, Value::from("none"));

        for _ in 0..1_000 {
            let value = chance.invoke("n", &[]).expect("value");
            if expected_calls == 0 {
                assert_eq!(value, Value::from("none"));
            } else {
                assert_eq!(value, Value::Int(3));
            }
        }
        assert_eq!(chance.inner.calls.len(), expected_calls);
    }

    #[test]
    fn percentages_are_scaled() {
        let chance = ChanceGenerator::new(always(1), 50.0, Value::Null);
        assert!((0.49..=0.51).contains(&chance.weight()));
    }

    #[test]
    fn half_weight_mixes_values_and_defaults() {
        let mut chance = ChanceGenerator::new(always(1), 0.5, Value::Null);
        let produced = (0..1_000)
            .filter(|_| !chance.invoke("n", &[]).expect("value").is_null())
            .count();
        assert!((300..=700).contains(&produced), "produced {produced}");
    }
}
