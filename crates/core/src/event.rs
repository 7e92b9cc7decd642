//! Decoded bus message.

use indexmap::IndexMap;

use crate::operation::Operation;
use crate::resource::ResourceRef;

/// A decoded object-mutation event. Ephemeral: constructed at decode,
/// consumed by zero or more healer queues, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub resource_type: String,
    pub operation: Operation,
    pub reference: ResourceRef,
}

/// Why a raw bus message could not become an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("message body is not a JSON object")]
    NotAnObject,
    #[error("missing or invalid required field `{0}`")]
    MissingField(&'static str),
    #[error("unrecognized operation `{0}`")]
    UnknownOperation(String),
    #[error("message has neither `obj_dict` nor `uuid`")]
    NoReference,
}

impl Event {
    /// Decode a raw bus message body.
    ///
    /// Required fields: `type` (string), `oper` (one of CREATE/UPDATE/DELETE).
    /// At least one of `obj_dict` (attribute map) or `uuid` (string) must be
    /// present; a message with neither is rejected with [`DecodeError::NoReference`]
    /// so callers can acknowledge-and-drop it silently per the spec.
    pub fn decode(body: &serde_json::Value) -> Result<Self, DecodeError> {
        let obj = body.as_object().ok_or(DecodeError::NotAnObject)?;

        let resource_type = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(DecodeError::MissingField("type"))?
            .to_string();

        let oper_str = obj
            .get("oper")
            .and_then(|v| v.as_str())
            .ok_or(DecodeError::MissingField("oper"))?;
        let operation = Operation::parse(oper_str)
            .ok_or_else(|| DecodeError::UnknownOperation(oper_str.to_string()))?;

        let reference = if let Some(obj_dict) = obj.get("obj_dict").and_then(|v| v.as_object()) {
            let attributes: IndexMap<String, serde_json::Value> =
                obj_dict.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            ResourceRef::Snapshot { resource_type: resource_type.clone(), attributes }
        } else if let Some(uuid) = obj.get("uuid").and_then(|v| v.as_str()) {
            ResourceRef::Handle { resource_type: resource_type.clone(), uuid: uuid.to_string() }
        } else {
            return Err(DecodeError::NoReference);
        };

        Ok(Self { resource_type, operation, reference })
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
