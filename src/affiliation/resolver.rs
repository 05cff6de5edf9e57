use super::{Affiliations, Experience, Field, YearWindow, COMMA_REPLACEMENT};
use crate::error::ResolveError;
use serde_json::Value;

/// Resolve the institutions and positions active during `window`.
///
/// Records are visited in order. A record contributes only when it overlaps
/// the window and names an institution; its position is kept alongside even
/// when absent. Empty outputs collapse to `[Field::Unknown]`, each sequence
/// on its own.
pub fn resolve(history: &[Experience], window: YearWindow) -> Affiliations {
    if history.is_empty() {
        return Affiliations::unknown();
    }

    let mut institutions = Vec::new();
    let mut positions = Vec::new();

    for exp in history {
        if !window.overlaps(exp.start, exp.end) {
            continue;
        }
        if let Some(name) = exp.institution_name() {
            institutions.push(Field::Known(sanitize_institution(name)));
            positions.push(Field::from(exp.position.clone()));
        }
    }

    if institutions.is_empty() {
        institutions.push(Field::Unknown);
    }
    if positions.is_empty() {
        positions.push(Field::Unknown);
    }

    Affiliations {
        institutions,
        positions,
    }
}

/// Replace literal commas so the name survives delimiter-based splitting
pub fn sanitize_institution(name: &str) -> String {
    name.replace(',', COMMA_REPLACEMENT)
}

/// Decode a raw history value. `null` is an empty history; anything other
/// than an array of record objects is malformed.
pub fn parse_history(value: &Value) -> Result<Vec<Experience>, ResolveError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(entries) => {
            if let Some(idx) = entries.iter().position(|e| !e.is_object()) {
                return Err(ResolveError::Malformed(format!(
                    "history entry {} is not an object",
                    idx
                )));
            }
            Ok(serde_json::from_value(value.clone())?)
        }
        other => Err(ResolveError::Malformed(format!(
            "expected a list of experiences, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
