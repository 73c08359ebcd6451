use chrono::{DateTime, Utc};
use reckon_core::{
    calculation::{
        CalculationError, CalculationKind, CalculationRequest, CalculationResult, parse_inputs,
    },
    record::{CalculationRecord, CalculationUpdate},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// Body for evaluating or storing a calculation.
///
/// Both fields are taken as raw JSON, and a missing field reads as `null`, so
/// that a wrong shape is reported as a validation failure rather than a body
/// rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculationPayload {
    /// Calculation kind, also accepted as `type`
    #[serde(default, alias = "type")]
    #[schema(value_type = String, example = "addition")]
    pub kind: Value,

    #[serde(default)]
    #[schema(value_type = Vec<f64>, example = json!([10.5, 3, 2]))]
    pub inputs: Value,
}

impl CalculationPayload {
    pub fn new(kind: impl Into<String>, inputs: Value) -> Self {
        Self {
            kind: Value::String(kind.into()),
            inputs,
        }
    }

    /// Checks the kind first, then the shape of `inputs`, then arity.
    pub fn to_request(&self) -> CalculationResult<CalculationRequest> {
        let kind = parse_kind(&self.kind)?;
        CalculationRequest::new(kind, parse_inputs(&self.inputs)?)
    }
}

/// A kind tag must be a JSON string naming a supported kind.
fn parse_kind(value: &Value) -> CalculationResult<CalculationKind> {
    match value {
        Value::String(tag) => CalculationKind::parse(tag),
        other => Err(CalculationError::UnknownKind(other.to_string())),
    }
}

/// Partial update; omitted fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCalculationRequest {
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub kind: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<f64>>)]
    pub inputs: Option<Value>,
}

impl UpdateCalculationRequest {
    pub fn to_update(&self) -> CalculationResult<CalculationUpdate> {
        Ok(CalculationUpdate {
            kind: self.kind.as_ref().map(parse_kind).transpose()?,
            inputs: self.inputs.as_ref().map(parse_inputs).transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EvaluateResponse {
    pub kind: CalculationKind,
    pub inputs: Vec<f64>,
    pub result: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalculationResponse {
    pub id: Uuid,
    pub user_id: String,
    pub kind: CalculationKind,
    pub inputs: Vec<f64>,
    pub result: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CalculationRecord> for CalculationResponse {
    fn from(record: CalculationRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            kind: record.kind,
            inputs: record.inputs,
            result: record.result,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListCalculationsResponse {
    pub calculations: Vec<CalculationResponse>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KindInfo {
    pub kind: CalculationKind,
    pub min_inputs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListKindsResponse {
    pub kinds: Vec<KindInfo>,
}

impl ListKindsResponse {
    pub fn supported() -> Self {
        Self {
            kinds: CalculationKind::all()
                .into_iter()
                .map(|kind| KindInfo {
                    kind,
                    min_inputs: kind.min_inputs(),
                })
                .collect(),
        }
    }
}
