//! Pure evaluation of a calculation kind over a list of inputs.
//!
//! Validation runs before any arithmetic, in this order:
//! 1. arity for the kind
//! 2. zero divisors for division and modulus (every operand after the first)
//!
//! A result that is infinite or NaN is a domain failure.
//!
//! The summing kinds (sine, cosine, tangent, exponential) collapse all inputs
//! into one operand before applying their function; angles are in degrees.

use tracing::debug;

use super::error::{CalculationError, CalculationResult};
use super::kind::CalculationKind;

/// `|cos(angle)|` below this is treated as zero when computing a tangent.
pub const TANGENT_EPSILON: f64 = 1e-10;

/// Evaluate `kind` over `inputs`.
pub fn evaluate(kind: CalculationKind, inputs: &[f64]) -> CalculationResult<f64> {
    validate(kind, inputs).inspect_err(|e| {
        debug!(%kind, count = inputs.len(), error = %e, "calculation rejected");
    })?;

    debug!(%kind, count = inputs.len(), "evaluating calculation");

    let value: f64 = match kind {
        CalculationKind::Addition => inputs.iter().sum(),
        CalculationKind::Subtraction => fold_tail(inputs, |acc, x| acc - x),
        CalculationKind::Multiplication => inputs.iter().product(),
        CalculationKind::Division => fold_tail(inputs, |acc, x| acc / x),
        CalculationKind::Modulus => fold_tail(inputs, floored_rem),
        CalculationKind::Power => inputs[0].powf(inputs[1]),
        CalculationKind::Sine => sum(inputs).to_radians().sin(),
        CalculationKind::Cosine => sum(inputs).to_radians().cos(),
        CalculationKind::Tangent => tangent(sum(inputs))?,
        CalculationKind::Exponential => sum(inputs).exp(),
    };

    // overflow, 0^negative and negative^fractional
    if !value.is_finite() {
        debug!(%kind, %value, "calculation has no finite result");
        return Err(CalculationError::NonFiniteResult);
    }
    Ok(value)
}

/// Check arity and divisor constraints without evaluating.
pub fn validate(kind: CalculationKind, inputs: &[f64]) -> CalculationResult<()> {
    let required = kind.min_inputs();
    if inputs.len() < required {
        return Err(CalculationError::NotEnoughInputs {
            kind: kind.to_string(),
            required,
        });
    }

    let has_zero_divisor = inputs.iter().skip(1).any(|x| *x == 0.0);
    match kind {
        CalculationKind::Division if has_zero_divisor => Err(CalculationError::DivisionByZero),
        CalculationKind::Modulus if has_zero_divisor => Err(CalculationError::ModulusByZero),
        _ => Ok(()),
    }
}

fn sum(inputs: &[f64]) -> f64 {
    inputs.iter().sum()
}

// Left fold seeded with the first input.
fn fold_tail(inputs: &[f64], op: impl Fn(f64, f64) -> f64) -> f64 {
    inputs[1..].iter().fold(inputs[0], |acc, x| op(acc, *x))
}

// Remainder with the sign of the divisor: -7 mod 3 == 2.
fn floored_rem(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

fn tangent(degrees: f64) -> CalculationResult<f64> {
    let radians = degrees.to_radians();
    if radians.cos().abs() < TANGENT_EPSILON {
        return Err(CalculationError::UndefinedTangent);
    }
    Ok(radians.tan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn eval(kind: CalculationKind, inputs: &[f64]) -> f64 {
        evaluate(kind, inputs).unwrap()
    }

    #[test]
    fn test_addition() {
        assert_eq!(eval(CalculationKind::Addition, &[10.0, 5.0]), 15.0);
        assert_eq!(eval(CalculationKind::Addition, &[1.0, 2.0, 3.0, 4.0, 5.0]), 15.0);
        assert_eq!(eval(CalculationKind::Addition, &[10.5, 3.0, 2.0]), 15.5);
    }

    #[test]
    fn test_subtraction() {
        assert_eq!(eval(CalculationKind::Subtraction, &[10.0, 3.0]), 7.0);
        assert_eq!(eval(CalculationKind::Subtraction, &[20.0, 5.0, 3.0]), 12.0);
    }

    #[test]
    fn test_multiplication() {
        assert_eq!(eval(CalculationKind::Multiplication, &[4.0, 5.0]), 20.0);
        assert_eq!(eval(CalculationKind::Multiplication, &[5.0, 0.0, 10.0]), 0.0);
    }

    #[test]
    fn test_division() {
        assert_eq!(eval(CalculationKind::Division, &[20.0, 4.0]), 5.0);
        assert_eq!(eval(CalculationKind::Division, &[100.0, 2.0, 5.0]), 10.0);
        // a zero dividend is fine
        assert_eq!(eval(CalculationKind::Division, &[0.0, 5.0]), 0.0);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            evaluate(CalculationKind::Division, &[10.0, 0.0]),
            Err(CalculationError::DivisionByZero)
        );
        assert_eq!(
            evaluate(CalculationKind::Division, &[10.0, 2.0, 0.0]),
            Err(CalculationError::DivisionByZero)
        );
    }

    #[test]
    fn test_modulus() {
        assert_eq!(eval(CalculationKind::Modulus, &[17.0, 5.0]), 2.0);
        assert_eq!(eval(CalculationKind::Modulus, &[17.0, 5.0, 2.0]), 0.0);
        assert_eq!(eval(CalculationKind::Modulus, &[-7.0, 3.0]), 2.0);
        assert_eq!(eval(CalculationKind::Modulus, &[7.0, -3.0]), -2.0);
        assert_eq!(eval(CalculationKind::Modulus, &[6.0, 3.0]), 0.0);
    }

    #[test]
    fn test_modulus_by_zero() {
        let err = evaluate(CalculationKind::Modulus, &[10.0, 0.0]).unwrap_err();
        assert_eq!(err, CalculationError::ModulusByZero);
        assert!(err.is_domain());
        assert_eq!(err.to_string(), "Cannot perform modulus with zero");
    }

    #[test]
    fn test_power() {
        assert_eq!(eval(CalculationKind::Power, &[2.0, 3.0]), 8.0);
        assert_eq!(eval(CalculationKind::Power, &[5.0, 2.0]), 25.0);
        assert_eq!(eval(CalculationKind::Power, &[5.0, 0.0]), 1.0);
        assert_eq!(eval(CalculationKind::Power, &[0.0, 0.0]), 1.0);
        // operands past the second are ignored
        assert_eq!(eval(CalculationKind::Power, &[2.0, 3.0, 10.0]), 8.0);
    }

    #[test]
    fn test_trigonometric_zero() {
        assert_eq!(eval(CalculationKind::Sine, &[0.0]), 0.0);
        assert_eq!(eval(CalculationKind::Cosine, &[0.0]), 1.0);
        assert_eq!(eval(CalculationKind::Tangent, &[0.0]), 0.0);
    }

    #[test]
    fn test_trigonometric_sums_inputs() {
        let sine = eval(CalculationKind::Sine, &[60.0, 30.0]);
        assert!((sine - 1.0).abs() < 1e-12);

        let cosine = eval(CalculationKind::Cosine, &[90.0, 90.0]);
        assert!((cosine + 1.0).abs() < 1e-12);

        let tangent = eval(CalculationKind::Tangent, &[45.0]);
        assert!((tangent - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tangent_undefined() {
        for inputs in [vec![90.0], vec![45.0, 45.0], vec![270.0], vec![-90.0]] {
            let err = evaluate(CalculationKind::Tangent, &inputs).unwrap_err();
            assert_eq!(err, CalculationError::UndefinedTangent, "inputs: {:?}", inputs);
            assert!(err.is_domain());
        }
    }

    #[test]
    fn test_exponential() {
        assert_eq!(eval(CalculationKind::Exponential, &[0.0]), 1.0);
        assert!((eval(CalculationKind::Exponential, &[1.0]) - std::f64::consts::E).abs() < 1e-4);
        let summed = eval(CalculationKind::Exponential, &[1.0, 1.0]);
        assert!((summed - std::f64::consts::E.powi(2)).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_results_rejected() {
        let cases: [(CalculationKind, &[f64]); 5] = [
            (CalculationKind::Exponential, &[1000.0]),
            (CalculationKind::Power, &[0.0, -1.0]),
            (CalculationKind::Power, &[-8.0, 0.5]),
            (CalculationKind::Addition, &[f64::MAX, f64::MAX]),
            (CalculationKind::Multiplication, &[1e200, 1e200]),
        ];
        for (kind, inputs) in cases {
            let err = evaluate(kind, inputs).unwrap_err();
            assert_eq!(err, CalculationError::NonFiniteResult, "{} {:?}", kind, inputs);
            assert!(err.is_domain());
        }

        // large but finite results still succeed
        assert!(eval(CalculationKind::Exponential, &[700.0]).is_finite());
        assert_eq!(eval(CalculationKind::Power, &[-8.0, 2.0]), 64.0);
    }

    #[test]
    fn test_arity() {
        for kind in CalculationKind::all() {
            let too_few = vec![1.0; kind.min_inputs() - 1];
            let err = evaluate(kind, &too_few).unwrap_err();
            assert!(err.is_validation(), "kind: {}", kind);
            assert!(
                matches!(err, CalculationError::NotEnoughInputs { required, .. } if required == kind.min_inputs())
            );
        }

        assert_eq!(
            evaluate(CalculationKind::Addition, &[1.0]).unwrap_err().to_string(),
            "At least two numbers are required"
        );
        assert_eq!(
            evaluate(CalculationKind::Sine, &[]).unwrap_err().to_string(),
            "At least one number is required"
        );
    }

    #[test]
    fn test_validate_only_checks_later_operands() {
        assert!(validate(CalculationKind::Division, &[0.0, 1.0]).is_ok());
        assert!(validate(CalculationKind::Modulus, &[0.0, 1.0]).is_ok());
        // zeros are fine for kinds without divisors
        assert!(validate(CalculationKind::Subtraction, &[1.0, 0.0]).is_ok());
    }

    proptest! {
        #[test]
        fn prop_addition_is_sum(xs in prop::collection::vec(-1e6f64..1e6, 2..16)) {
            let expected: f64 = xs.iter().sum();
            prop_assert_eq!(evaluate(CalculationKind::Addition, &xs).unwrap(), expected);
        }

        #[test]
        fn prop_division_by_zero_always_fails(a in -1e6f64..1e6) {
            prop_assert_eq!(
                evaluate(CalculationKind::Division, &[a, 0.0]),
                Err(CalculationError::DivisionByZero)
            );
            prop_assert_eq!(
                evaluate(CalculationKind::Modulus, &[a, 0.0]),
                Err(CalculationError::ModulusByZero)
            );
        }

        #[test]
        fn prop_modulus_takes_divisor_sign(a in -1e6f64..1e6, b in 1f64..1e3) {
            let r = evaluate(CalculationKind::Modulus, &[a, b]).unwrap();
            prop_assert!(r >= 0.0 && r <= b);
            let r = evaluate(CalculationKind::Modulus, &[a, -b]).unwrap();
            prop_assert!(r <= 0.0 && r >= -b);
        }

        #[test]
        fn prop_results_are_finite(
            kind_index in 0usize..10,
            xs in prop::collection::vec(1f64..50.0, 2..6),
        ) {
            let kind = CalculationKind::all()[kind_index];
            match evaluate(kind, &xs) {
                Ok(value) => prop_assert!(value.is_finite()),
                Err(e) => prop_assert_eq!(e, CalculationError::UndefinedTangent),
            }
        }
    }
}
