use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use utoipa::ToSchema;

use super::error::CalculationError;

/// # Calculation Kind
///
/// The closed set of operations a calculation can perform.
///
/// Parsing is case-insensitive and accepts the short trigonometric tags
/// (`sin`, `cos`, `tan`) as aliases. `Display` and serialization always
/// produce the canonical lowercase tag.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CalculationKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulus,
    #[strum(to_string = "sine", serialize = "sin")]
    Sine,
    #[strum(to_string = "cosine", serialize = "cos")]
    Cosine,
    #[strum(to_string = "tangent", serialize = "tan")]
    Tangent,
    Exponential,
    Power,
}

impl CalculationKind {
    /// Parse a caller-supplied tag, ignoring case and surrounding whitespace.
    pub fn parse(tag: &str) -> Result<Self, CalculationError> {
        Self::from_str(tag.trim()).map_err(|_| CalculationError::UnknownKind(tag.to_string()))
    }

    /// Kinds that collapse all inputs into a single operand by summing them.
    pub fn is_unary(&self) -> bool {
        matches!(
            self,
            Self::Sine | Self::Cosine | Self::Tangent | Self::Exponential
        )
    }

    /// Minimum number of inputs this kind accepts.
    pub fn min_inputs(&self) -> usize {
        if self.is_unary() { 1 } else { 2 }
    }

    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

impl TryFrom<String> for CalculationKind {
    type Error = CalculationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CalculationKind> for String {
    fn from(kind: CalculationKind) -> Self {
        kind.to_string()
    }
}
