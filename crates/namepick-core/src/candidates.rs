// Namepick Candidate Loading
// Reads candidate user lists from JSON documents

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use crate::matcher::{UserId, UserRecord};

/// Errors that can occur while loading candidates
#[derive(Debug, thiserror::Error)]
pub enum CandidateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("candidate document is not a list (found {0})")]
    NotAList(&'static str),
}

/// Parse a JSON array of `{ id, first_name, last_name }` records
///
/// Records sharing an id are collapsed: the later record's fields win, the
/// first record's position is kept.
pub fn parse_candidates(json: &str) -> Result<Vec<UserRecord>, CandidateError> {
    let document: Value = serde_json::from_str(json)?;
    if !document.is_array() {
        return Err(CandidateError::NotAList(kind_of(&document)));
    }

    let records: Vec<UserRecord> = serde_json::from_value(document)?;
    let total = records.len();

    let mut by_id: IndexMap<UserId, UserRecord> = IndexMap::with_capacity(total);
    for record in records {
        by_id.insert(record.id, record);
    }
    if by_id.len() != total {
        log::warn!("{} duplicate candidate ids collapsed", total - by_id.len());
    }

    log::debug!("parsed {} candidates", by_id.len());
    Ok(by_id.into_values().collect())
}

/// Load candidates from a JSON file
pub fn load_candidates<P: AsRef<Path>>(path: P) -> Result<Vec<UserRecord>, CandidateError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse_candidates(&content)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_list() {
        let json = r#"[
            {"id": 1, "first_name": "Иван", "last_name": "Петров"},
            {"id": 2, "first_name": "Anna", "last_name": "Kim", "avatar": "a.png"}
        ]"#;
        let users = parse_candidates(json).unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0], UserRecord::new(1, "Иван", "Петров"));
        assert_eq!(users[1].id, UserId(2));
    }

    #[test]
    fn test_missing_names_default_to_empty() {
        let users = parse_candidates(r#"[{"id": 5}]"#).unwrap();
        assert_eq!(users[0], UserRecord::new(5, "", ""));
    }

    #[test]
    fn test_not_a_list() {
        let err = parse_candidates(r#"{"users": []}"#).unwrap_err();
        assert!(matches!(err, CandidateError::NotAList("an object")));

        let err = parse_candidates("null").unwrap_err();
        assert!(matches!(err, CandidateError::NotAList("null")));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_candidates("[{"), Err(CandidateError::Json(_))));
        assert!(matches!(
            parse_candidates(r#"[{"first_name": "no id"}]"#),
            Err(CandidateError::Json(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_keep_first_position() {
        let json = r#"[
            {"id": 1, "first_name": "Old", "last_name": "One"},
            {"id": 2, "first_name": "Two", "last_name": "Two"},
            {"id": 1, "first_name": "New", "last_name": "One"}
        ]"#;
        let users = parse_candidates(json).unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].first_name, "New");
        assert_eq!(users[1].id, UserId(2));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 9, "first_name": "Олег", "last_name": "Ким"}}]"#).unwrap();

        let users = load_candidates(file.path()).unwrap();
        assert_eq!(users, vec![UserRecord::new(9, "Олег", "Ким")]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_candidates(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CandidateError::Io(_)));
    }
}
