//! # Calculation evaluation
//!
//! A calculation is a [`CalculationKind`] applied to an ordered list of
//! numbers. [`evaluate`] is a pure function: it validates the inputs for the
//! kind, then returns a single number or a [`CalculationError`].
//!
//! ```
//! use reckon_core::calculation::{CalculationKind, evaluate};
//!
//! assert_eq!(evaluate(CalculationKind::Power, &[2.0, 3.0]), Ok(8.0));
//! assert!(evaluate(CalculationKind::Division, &[1.0, 0.0]).is_err());
//! ```

pub mod error;
pub mod evaluator;
pub mod kind;
pub mod request;

pub use error::{CalculationError, CalculationResult, FailureKind};
pub use evaluator::{evaluate, validate};
pub use kind::CalculationKind;
pub use request::{CalculationRequest, parse_inputs};
