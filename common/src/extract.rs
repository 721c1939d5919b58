// Field extraction from validated response bodies

use crate::encoding::U256;
use crate::errors::ExecutionError;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of the numeric field inside the response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parse `items[0].statistics.viewCount` style paths
    pub fn parse(path: &str) -> Result<Self, String> {
        if path.trim().is_empty() {
            return Err("field path is empty".to_string());
        }

        let mut segments = Vec::new();
        for part in path.split('.') {
            let (key, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };

            if key.is_empty() && rest.is_empty() {
                return Err(format!("empty segment in '{}'", path));
            }
            if !key.is_empty() {
                segments.push(PathSegment::Key(key.to_string()));
            }

            while !rest.is_empty() {
                let close = rest
                    .find(']')
                    .ok_or_else(|| format!("unclosed '[' in '{}'", path))?;
                if !rest.starts_with('[') {
                    return Err(format!("unexpected '{}' in '{}'", rest, path));
                }
                let index = rest[1..close]
                    .parse::<usize>()
                    .map_err(|_| format!("invalid index '{}' in '{}'", &rest[1..close], path))?;
                segments.push(PathSegment::Index(index));
                rest = &rest[close + 1..];
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Walk the body, `None` as soon as a segment does not resolve
    pub fn resolve<'a>(&self, body: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(body, |current, segment| match segment {
                PathSegment::Key(key) => current.get(key.as_str()),
                PathSegment::Index(index) => current.get(*index),
            })
    }
}

impl FromStr for FieldPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Pull the value at `path` and convert it to an unsigned integer.
///
/// Accepts a string of decimal digits or a non-negative JSON integer. No
/// default is substituted when the path is absent.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn extract_value(body: &Value, path: &FieldPath) -> Result<U256, ExecutionError> {
    let value = match path.resolve(body) {
        Some(Value::Null) | None => {
            return Err(ExecutionError::MissingField(path.to_string()));
        }
        Some(value) => value,
    };

    let parsed = match value {
        Value::String(s) => parse_decimal(path, s)?,
        // arbitrary_precision keeps the literal text, so wide integers are not rounded
        Value::Number(n) => parse_decimal(path, &n.to_string())?,
        other => {
            return Err(ExecutionError::MalformedValue(format!(
                "{} holds {} instead of an integer",
                path,
                json_type_name(other)
            )));
        }
    };

    tracing::debug!(value = %parsed, "Extracted value");
    Ok(parsed)
}

/// Digits only; anything wider than 256 bits is an overflow, not a malformed value
fn parse_decimal(path: &FieldPath, raw: &str) -> Result<U256, ExecutionError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExecutionError::MalformedValue(format!(
            "{} = {:?} is not a non-negative integer",
            path, raw
        )));
    }
    U256::from_dec_str(raw)
        .map_err(|_| ExecutionError::Overflow(format!("{} = {} exceeds 256 bits", path, raw)))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
