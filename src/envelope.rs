//! Uniform wrapper for write results.
//!
//! `value` carries single-record results and `data` multi-record ones; never
//! both. `number` is always the count of records affected or returned.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    pub number: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<T>>,
}

impl<T> Envelope<T> {
    /// Single-record result; `number` is 0 when the backend returned nothing.
    pub fn single(value: Option<T>, message: impl Into<String>) -> Self {
        Envelope {
            number: i64::from(value.is_some()),
            value,
            message: message.into(),
            data: None,
        }
    }

    pub fn many(data: Vec<T>, message: impl Into<String>) -> Self {
        Envelope {
            value: None,
            number: data.len() as i64,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Count-only result, as returned by deletes.
    pub fn count(number: i64, message: impl Into<String>) -> Self {
        Envelope {
            value: None,
            number,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn user() -> User {
        User {
            id: 1,
            user: "test".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_many_field_order_and_count() {
        let env = Envelope::many(vec![user()], "Users saved");
        assert_eq!(
            serde_json::to_string(&env).unwrap(),
            r#"{"number":1,"message":"Users saved","data":[{"id":1,"user":"test"}]}"#
        );
    }

    #[test]
    fn test_single_field_order() {
        let env = Envelope::single(Some(user()), "User saved");
        assert_eq!(
            serde_json::to_string(&env).unwrap(),
            r#"{"value":{"id":1,"user":"test"},"number":1,"message":"User saved"}"#
        );
    }

    #[test]
    fn test_single_without_value_counts_zero() {
        let env: Envelope<User> = Envelope::single(None, "User saved");
        assert_eq!(env.number, 0);
        assert_eq!(
            serde_json::to_string(&env).unwrap(),
            r#"{"number":0,"message":"User saved"}"#
        );
    }

    #[test]
    fn test_count_has_neither_value_nor_data() {
        let env: Envelope<User> = Envelope::count(3, "Users deleted");
        assert_eq!(
            serde_json::to_string(&env).unwrap(),
            r#"{"number":3,"message":"Users deleted"}"#
        );
    }
}
