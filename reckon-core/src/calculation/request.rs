use serde::Serialize;
use serde_json::Value;

use super::error::{CalculationError, CalculationResult};
use super::evaluator;
use super::kind::CalculationKind;

/// A validated `(kind, inputs)` pair, ready to evaluate.
///
/// Construction runs the full validation policy, so an existing request
/// only fails evaluation for domain reasons detected during arithmetic
/// (an undefined tangent).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRequest {
    kind: CalculationKind,
    inputs: Vec<f64>,
}

impl CalculationRequest {
    pub fn new(kind: CalculationKind, inputs: Vec<f64>) -> CalculationResult<Self> {
        evaluator::validate(kind, &inputs)?;
        Ok(Self { kind, inputs })
    }

    /// Build a request from an untyped tag and JSON inputs, as received from a
    /// caller. The tag is checked first, then the shape of `inputs`.
    pub fn from_json(kind: &str, inputs: &Value) -> CalculationResult<Self> {
        let kind = CalculationKind::parse(kind)?;
        let inputs = parse_inputs(inputs)?;
        Self::new(kind, inputs)
    }

    pub fn kind(&self) -> CalculationKind {
        self.kind
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    pub fn into_inputs(self) -> Vec<f64> {
        self.inputs
    }

    pub fn evaluate(&self) -> CalculationResult<f64> {
        evaluator::evaluate(self.kind, &self.inputs)
    }
}

/// Convert a JSON value into a list of numbers.
pub fn parse_inputs(value: &Value) -> CalculationResult<Vec<f64>> {
    let items = value.as_array().ok_or(CalculationError::InputsNotAList)?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_f64()
                .ok_or(CalculationError::NonNumericInput { index })
        })
        .collect()
}
