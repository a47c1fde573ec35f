//! Response mapping
//!
//! A decoded body is classified once by shape: arrays become lists of
//! records, objects a single record, everything else passes through.

use crate::error::ConnectorError;
use apiorm_model::{ModelClass, Record};
use serde_json::Value;
use std::sync::Arc;

/// Model-shaped result of one request
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    /// JSON array, one record per element
    List(Vec<Record>),
    /// JSON object
    Single(Record),
    /// null, number, boolean or string, verbatim
    Scalar(Value),
}

impl ResponsePayload {
    /// Parse a raw body
    ///
    /// # Errors
    /// `MalformedResponse` when the body is not JSON; `UnexpectedResponse`
    /// when an array element is not an object.
    pub fn parse(class: &Arc<ModelClass>, body: &str) -> Result<Self, ConnectorError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(class, value)
    }

    /// Classify a decoded value
    ///
    /// # Errors
    /// `UnexpectedResponse` when an array element is not an object.
    pub fn from_value(class: &Arc<ModelClass>, value: Value) -> Result<Self, ConnectorError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| Record::build(class, item).map_err(ConnectorError::from))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Value::Object(attributes) => {
                Ok(Self::Single(Record::new(Arc::clone(class), attributes)))
            }
            scalar => Ok(Self::Scalar(scalar)),
        }
    }

    /// Shape name, for diagnostics
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Single(_) => "single",
            Self::Scalar(_) => "scalar",
        }
    }

    /// Records of a list; a single record as a one-element list; null as empty
    #[must_use]
    pub fn into_records(self) -> Option<Vec<Record>> {
        match self {
            Self::List(records) => Some(records),
            Self::Single(record) => Some(vec![record]),
            Self::Scalar(Value::Null) => Some(Vec::new()),
            Self::Scalar(_) => None,
        }
    }

    /// The single record, if any
    #[must_use]
    pub fn into_record(self) -> Option<Record> {
        match self {
            Self::Single(record) => Some(record),
            _ => None,
        }
    }

    /// Back to JSON
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::List(records) => Value::Array(records.iter().map(Record::to_value).collect()),
            Self::Single(record) => record.to_value(),
            Self::Scalar(value) => value.clone(),
        }
    }
}
