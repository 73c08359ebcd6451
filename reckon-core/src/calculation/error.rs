use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad classification of a failed evaluation.
///
/// Both kinds are caused by caller input and are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    /// Malformed or insufficient inputs, or an unrecognized kind.
    Validation,
    /// Mathematically undefined for otherwise well-formed inputs.
    Domain,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalculationError {
    #[error("Unsupported calculation type: {0}")]
    UnknownKind(String),

    #[error("Inputs must be a list of numbers")]
    InputsNotAList,

    #[error("Input at position {index} is not a number")]
    NonNumericInput { index: usize },

    #[error("{}", arity_message(.required))]
    NotEnoughInputs { kind: String, required: usize },

    #[error("Cannot divide by zero")]
    DivisionByZero,

    #[error("Cannot perform modulus with zero")]
    ModulusByZero,

    #[error("Tangent is undefined at this angle")]
    UndefinedTangent,

    #[error("Result is not a finite number")]
    NonFiniteResult,
}

fn arity_message(required: &usize) -> &'static str {
    if *required >= 2 {
        "At least two numbers are required"
    } else {
        "At least one number is required"
    }
}

impl CalculationError {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::UnknownKind(_)
            | Self::InputsNotAList
            | Self::NonNumericInput { .. }
            | Self::NotEnoughInputs { .. } => FailureKind::Validation,
            Self::DivisionByZero
            | Self::ModulusByZero
            | Self::UndefinedTangent
            | Self::NonFiniteResult => FailureKind::Domain,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.failure_kind() == FailureKind::Validation
    }

    pub fn is_domain(&self) -> bool {
        self.failure_kind() == FailureKind::Domain
    }
}

pub type CalculationResult<T> = Result<T, CalculationError>;
