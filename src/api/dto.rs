//! Request and response bodies of the backend contract

use serde::{Deserialize, Serialize};

/// Username/password pair sent to `/login` and `/register`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Successful `/login` body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// A job position as the backend returns it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_id: Option<i64>,
    pub position_code: String,
    pub position_name: String,
}

/// Body for creating or updating a position
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionInput {
    pub position_code: String,
    pub position_name: String,
}

impl PositionInput {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            position_code: code.into(),
            position_name: name.into(),
        }
    }
}

impl From<&Position> for PositionInput {
    fn from(position: &Position) -> Self {
        Self {
            position_code: position.position_code.clone(),
            position_name: position.position_name.clone(),
        }
    }
}

/// `GET /positions` body. Backends differ on whether the list is bare
/// or wrapped, so all three shapes are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PositionList {
    Bare(Vec<Position>),
    Data { data: Vec<Position> },
    Positions { positions: Vec<Position> },
}

impl PositionList {
    pub(crate) fn into_vec(self) -> Vec<Position> {
        match self {
            PositionList::Bare(v) => v,
            PositionList::Data { data } => data,
            PositionList::Positions { positions } => positions,
        }
    }
}

/// Error body; only `message` is read
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ErrorBody {
    /// `message` may be a string or (NestJS style) an array of strings.
    pub(crate) fn text(&self) -> Option<String> {
        match self.message.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(", "))
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_reads_camel_case() {
        let body: LoginResponse = serde_json::from_str(r#"{"accessToken":"abc.def.ghi"}"#).unwrap();
        assert_eq!(body.access_token, "abc.def.ghi");
    }

    #[test]
    fn test_position_list_shapes() {
        let bare: PositionList =
            serde_json::from_str(r#"[{"position_id":1,"position_code":"DEV","position_name":"Developer"}]"#)
                .unwrap();
        assert_eq!(bare.into_vec().len(), 1);

        let wrapped: PositionList = serde_json::from_str(
            r#"{"data":[{"position_code":"QA","position_name":"Tester"}]}"#,
        )
        .unwrap();
        let list = wrapped.into_vec();
        assert_eq!(list[0].position_id, None);
        assert_eq!(list[0].position_code, "QA");
    }

    #[test]
    fn test_error_body_message_forms() {
        let s: ErrorBody = serde_json::from_str(r#"{"message":"User exists"}"#).unwrap();
        assert_eq!(s.text().as_deref(), Some("User exists"));

        let arr: ErrorBody =
            serde_json::from_str(r#"{"message":["username empty","password too short"]}"#).unwrap();
        assert_eq!(arr.text().as_deref(), Some("username empty, password too short"));

        let none: ErrorBody = serde_json::from_str(r#"{"statusCode":500}"#).unwrap();
        assert_eq!(none.text(), None);
    }

    #[test]
    fn test_position_serializes_without_missing_id() {
        let p = Position {
            position_id: None,
            position_code: "OPS".to_string(),
            position_name: "Operator".to_string(),
        };
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("position_id").is_none());
    }
}
