//! Command execution: one script evaluation per call, followed by a
//! shape-directed decode into a tagged value.

use js_commands::{Command, ReturnShape};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::errors::InteractError;
use crate::ports::ExecutionSink;

/// The decoded result of a command evaluation. Callers match on this instead
/// of on untyped JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    /// The command is side-effecting and produced no value of interest.
    Unit,
    /// The target element did not exist, so the value is missing.
    Absent,
    Text(String),
    Number(f64),
    Bool(bool),
    TextList(Vec<String>),
}

impl DecodedValue {
    pub fn into_text(self) -> Option<String> {
        match self {
            DecodedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<String>> {
        match self {
            DecodedValue::TextList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DecodedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DecodedValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Binds generated commands to an execution sink.
///
/// This layer never retries and never swallows a sink failure; it is a pure
/// translation step between script strings and typed values.
#[derive(Clone)]
pub struct CommandHandler {
    sink: Arc<dyn ExecutionSink>,
}

impl CommandHandler {
    pub fn new(sink: Arc<dyn ExecutionSink>) -> Self {
        Self { sink }
    }

    /// Execute `cmd` with exactly one evaluation and decode the raw result
    /// into the command's declared shape.
    pub async fn run(&self, cmd: &Command) -> Result<DecodedValue, InteractError> {
        debug!(script = cmd.script(), shape = ?cmd.shape(), "executing command");
        let raw = self.sink.evaluate(cmd.script()).await?;
        decode(cmd.shape(), raw)
    }
}

/// Normalize a raw evaluation result into the declared return shape.
fn decode(shape: ReturnShape, raw: Value) -> Result<DecodedValue, InteractError> {
    match shape {
        ReturnShape::Unit => Ok(DecodedValue::Unit),
        _ if raw.is_null() => Ok(DecodedValue::Absent),
        ReturnShape::Text => match raw {
            Value::String(s) => Ok(DecodedValue::Text(s)),
            other => Err(mismatch("string", &other)),
        },
        ReturnShape::Number => match raw.as_f64() {
            Some(n) => Ok(DecodedValue::Number(n)),
            None => Err(mismatch("number", &raw)),
        },
        ReturnShape::Bool => match raw {
            Value::Bool(b) => Ok(DecodedValue::Bool(b)),
            other => Err(mismatch("boolean", &other)),
        },
        ReturnShape::TextList => match raw {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => out.push(s),
                        other => return Err(mismatch("array of strings", &other)),
                    }
                }
                Ok(DecodedValue::TextList(out))
            }
            other => Err(mismatch("array of strings", &other)),
        },
        ReturnShape::TokenList => decode_token_list(raw),
    }
}

/// A DOMTokenList serializes as an indexed object (`{"0": "a", "1": "b"}`);
/// normalize it to an ordered list by ascending numeric key. Drivers that
/// already serialize it as an array are accepted as-is.
fn decode_token_list(raw: Value) -> Result<DecodedValue, InteractError> {
    match raw {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => out.push(s),
                    other => return Err(mismatch("token list", &other)),
                }
            }
            Ok(DecodedValue::TextList(out))
        }
        Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, value) in map {
                let index: u64 = key
                    .parse()
                    .map_err(|_| mismatch("indexed token object", &Value::String(key.clone())))?;
                match value {
                    Value::String(s) => entries.push((index, s)),
                    other => return Err(mismatch("token list", &other)),
                }
            }
            entries.sort_by_key(|(index, _)| *index);
            Ok(DecodedValue::TextList(
                entries.into_iter().map(|(_, s)| s).collect(),
            ))
        }
        other => Err(mismatch("token list", &other)),
    }
}

fn mismatch(expected: &'static str, got: &Value) -> InteractError {
    InteractError::Decode {
        expected,
        got: got.to_string(),
    }
}
