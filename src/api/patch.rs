//! JSON Patch (RFC 6902) over the flat `StudentDto` projection.
//!
//! Paths address top-level properties only (`/studentName`), matched case-insensitively.
//! `remove` resets a property to null, which then fails the required-field check.
//! `/id` cannot be written: the row being patched is fixed by the URL.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use validator::Validate;

use crate::api::dto::StudentDto;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl PatchOperation {
    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            op: PatchOp::Replace,
            path: path.into(),
            value: value.into(),
            from: None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PatchError {
    #[error("The path '{0}' is not a valid property path")]
    InvalidPath(String),

    #[error("The target location specified by path '{0}' was not found")]
    UnknownProperty(String),

    #[error("The property '{0}' cannot be modified")]
    ReadOnly(String),

    #[error("The '{op:?}' operation requires a 'from' path")]
    MissingFrom { op: PatchOp },

    #[error("The current value at '{0}' does not match the test value")]
    TestFailed(String),
}

const READ_ONLY: &[&str] = &["id"];

/// Resolve a JSON pointer to an existing top-level key.
fn resolve<'a>(target: &'a Map<String, Value>, path: &str) -> Result<&'a str, PatchError> {
    let segment = path
        .strip_prefix('/')
        .filter(|s| !s.is_empty() && !s.contains('/'))
        .ok_or_else(|| PatchError::InvalidPath(path.to_string()))?;
    let segment = segment.replace("~1", "/").replace("~0", "~");

    target
        .keys()
        .find(|k| k.eq_ignore_ascii_case(&segment))
        .map(String::as_str)
        .ok_or(PatchError::UnknownProperty(path.to_string()))
}

fn writable(target: &Map<String, Value>, path: &str) -> Result<String, PatchError> {
    let key = resolve(target, path)?;
    if READ_ONLY.contains(&key) {
        return Err(PatchError::ReadOnly(key.to_string()));
    }
    Ok(key.to_string())
}

/// Apply every operation in order. The input is left untouched on failure.
pub fn apply_patch(target: &Map<String, Value>, operations: &[PatchOperation]) -> Result<Map<String, Value>, PatchError> {
    let mut doc = target.clone();

    for operation in operations {
        match operation.op {
            PatchOp::Add | PatchOp::Replace => {
                let key = writable(&doc, &operation.path)?;
                doc.insert(key, operation.value.clone());
            }
            PatchOp::Remove => {
                let key = writable(&doc, &operation.path)?;
                doc.insert(key, Value::Null);
            }
            PatchOp::Copy | PatchOp::Move => {
                let from = operation
                    .from
                    .as_deref()
                    .ok_or(PatchError::MissingFrom { op: operation.op })?;
                let source = if operation.op == PatchOp::Move {
                    writable(&doc, from)?
                } else {
                    resolve(&doc, from)?.to_string()
                };
                let key = writable(&doc, &operation.path)?;
                let value = doc.get(&source).cloned().unwrap_or(Value::Null);
                if operation.op == PatchOp::Move && source != key {
                    doc.insert(source, Value::Null);
                }
                doc.insert(key, value);
            }
            PatchOp::Test => {
                let key = resolve(&doc, &operation.path)?;
                if doc.get(key) != Some(&operation.value) {
                    return Err(PatchError::TestFailed(operation.path.clone()));
                }
            }
        }
    }

    Ok(doc)
}

fn patch_field_name(err: &PatchError) -> String {
    match err {
        PatchError::InvalidPath(p) | PatchError::UnknownProperty(p) | PatchError::TestFailed(p) => {
            p.trim_start_matches('/').to_string()
        }
        PatchError::ReadOnly(key) => key.clone(),
        PatchError::MissingFrom { .. } => "from".to_string(),
    }
}

fn single_field_error(field: String, message: String) -> ApiError {
    let mut field_errors = HashMap::new();
    field_errors.insert(field, message);
    ApiError::validation_error("One or more validation errors occurred", Some(field_errors))
}

/// Patch a DTO and re-validate the result.
pub fn patch_student(dto: &StudentDto, operations: &[PatchOperation]) -> Result<StudentDto, ApiError> {
    let projection = match serde_json::to_value(dto) {
        Ok(Value::Object(map)) => map,
        _ => return Err(ApiError::internal_server_error("Failed to project student for patching")),
    };

    let patched = apply_patch(&projection, operations)
        .map_err(|e| single_field_error(patch_field_name(&e), e.to_string()))?;

    let missing: HashMap<String, String> = patched
        .iter()
        .filter(|(_, v)| v.is_null())
        .map(|(k, _)| (k.clone(), format!("The {} field is required.", k)))
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::validation_error("One or more validation errors occurred", Some(missing)));
    }

    let result: StudentDto = serde_json::from_value(Value::Object(patched))
        .map_err(|e| single_field_error("document".to_string(), e.to_string()))?;

    result.validate()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::seed;
    use serde_json::json;

    fn dto() -> StudentDto {
        StudentDto::from(seed::students()[0].clone())
    }

    fn field_errors(err: ApiError) -> HashMap<String, String> {
        match err {
            ApiError::ValidationError { field_errors: Some(f), .. } => f,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn replaces_fields_case_insensitively() {
        let ops = vec![
            PatchOperation::replace("/StudentName", "Waqas Ahmed"),
            PatchOperation::replace("/address", "Delhi"),
        ];
        let patched = patch_student(&dto(), &ops).unwrap();

        assert_eq!(patched.student_name, "Waqas Ahmed");
        assert_eq!(patched.address, "Delhi");
        assert_eq!(patched.email, dto().email);
        assert_eq!(patched.id, 1);
    }

    #[test]
    fn empty_name_is_a_validation_error() {
        let err = patch_student(&dto(), &[PatchOperation::replace("/studentName", "")]).unwrap_err();
        assert!(field_errors(err).contains_key("studentName"));
    }

    #[test]
    fn remove_of_required_field_is_reported() {
        let ops: Vec<PatchOperation> = serde_json::from_value(json!([{ "op": "remove", "path": "/email" }])).unwrap();
        let errors = field_errors(patch_student(&dto(), &ops).unwrap_err());
        assert_eq!(errors["email"], "The email field is required.");
    }

    #[test]
    fn id_is_read_only() {
        let err = patch_student(&dto(), &[PatchOperation::replace("/id", 9)]).unwrap_err();
        assert!(field_errors(err).contains_key("id"));
    }

    #[test]
    fn unknown_and_nested_paths_are_rejected() {
        let map = serde_json::to_value(dto()).unwrap().as_object().cloned().unwrap();
        assert_eq!(
            apply_patch(&map, &[PatchOperation::replace("/phone", "1")]),
            Err(PatchError::UnknownProperty("/phone".to_string()))
        );
        assert_eq!(
            apply_patch(&map, &[PatchOperation::replace("/address/line1", "1")]),
            Err(PatchError::InvalidPath("/address/line1".to_string()))
        );
    }

    #[test]
    fn copy_move_and_test() {
        let map = serde_json::to_value(dto()).unwrap().as_object().cloned().unwrap();
        let ops: Vec<PatchOperation> = serde_json::from_value(json!([
            { "op": "test", "path": "/studentName", "value": "Waqas" },
            { "op": "copy", "from": "/studentName", "path": "/address" },
        ]))
        .unwrap();
        let patched = apply_patch(&map, &ops).unwrap();
        assert_eq!(patched["address"], "Waqas");

        let moved: Vec<PatchOperation> =
            serde_json::from_value(json!([{ "op": "move", "from": "/address", "path": "/studentName" }])).unwrap();
        let patched = apply_patch(&map, &moved).unwrap();
        assert_eq!(patched["studentName"], "Atd");
        assert_eq!(patched["address"], Value::Null);

        let failing: Vec<PatchOperation> =
            serde_json::from_value(json!([{ "op": "test", "path": "/email", "value": "x@y.z" }])).unwrap();
        assert_eq!(apply_patch(&map, &failing), Err(PatchError::TestFailed("/email".to_string())));
    }
}
