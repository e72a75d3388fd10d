use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

const EXAMPLE_WORDS: &[&str] = &["foo", "bar", "baz"];

/// Produces a representative example value for a resolved property type.
pub trait ExampleGenerator {
    /// Return an example for `schema_type`, or `None` if the type is not a
    /// JSON Schema primitive this generator knows about.
    fn example_for(&mut self, schema_type: &Value) -> Option<Value>;
}

/// Random examples: a word for strings, a coin flip for booleans and values
/// in `1..=100` for numbers.
pub struct RandomExamples {
    rng: StdRng,
}

impl Default for RandomExamples {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomExamples {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ExampleGenerator for RandomExamples {
    fn example_for(&mut self, schema_type: &Value) -> Option<Value> {
        match schema_type.as_str()? {
            "string" => EXAMPLE_WORDS.choose(&mut self.rng).map(|w| json!(w)),
            "boolean" => Some(json!(self.rng.gen_bool(0.5))),
            "integer" => Some(json!(self.rng.gen_range(1..=100))),
            "number" => Some(json!(self.rng.gen_range(1.0..100.0))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn examples_match_their_type() {
        let mut generator = RandomExamples::seeded(7);
        let s = generator.example_for(&json!("string")).unwrap();
        assert!(EXAMPLE_WORDS.contains(&s.as_str().unwrap()));
        assert!(generator.example_for(&json!("boolean")).unwrap().is_boolean());

        let i = generator.example_for(&json!("integer")).unwrap().as_i64().unwrap();
        assert!((1..=100).contains(&i));

        let n = generator.example_for(&json!("number")).unwrap().as_f64().unwrap();
        assert!((1.0..100.0).contains(&n));
    }

    #[test]
    fn unknown_types_have_no_example() {
        let mut generator = RandomExamples::seeded(7);
        assert_eq!(generator.example_for(&json!("date")), None);
        assert_eq!(generator.example_for(&json!(40)), None);
        assert_eq!(generator.example_for(&Value::Null), None);
    }

    #[test]
    fn same_seed_same_examples() {
        let mut a = RandomExamples::seeded(42);
        let mut b = RandomExamples::seeded(42);
        for ty in ["string", "integer", "number", "boolean"] {
            assert_eq!(a.example_for(&json!(ty)), b.example_for(&json!(ty)));
        }
    }
}
