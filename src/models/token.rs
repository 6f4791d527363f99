use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{from_timestamp, is_zero, to_timestamp};
use crate::proto::{TokenRequest, TokenResponse};

/// An opaque API token owned by a user. Expiry is enforced by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl Token {
    pub fn to_request(&self) -> TokenRequest {
        TokenRequest {
            id: self.id,
            token: self.token.clone(),
            user_id: self.user_id,
            created: self.created.as_ref().map(to_timestamp),
            expires: self.expires.as_ref().map(to_timestamp),
            old: None,
        }
    }
}

impl TryFrom<TokenResponse> for Token {
    type Error = anyhow::Error;

    fn try_from(res: TokenResponse) -> Result<Self, Self::Error> {
        Ok(Token {
            id: res.id,
            token: res.token,
            user_id: res.user_id,
            created: res.created.as_ref().map(from_timestamp).transpose()?,
            expires: res.expires.as_ref().map(from_timestamp).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use prost_types::Timestamp;

    #[test]
    fn test_empty_fields_are_omitted() {
        let t = Token {
            token: "logout".into(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&t).unwrap(), r#"{"token":"logout"}"#);
    }

    #[test]
    fn test_from_response_with_timestamps() {
        let res = TokenResponse {
            id: 1,
            token: "test".into(),
            user_id: 1,
            created: Some(Timestamp { seconds: 413_010_000, nanos: 0 }),
            expires: None,
        };
        let t = Token::try_from(res).unwrap();
        assert_eq!(t.created, Some(Utc.with_ymd_and_hms(1983, 2, 2, 5, 0, 0).unwrap()));
        assert_eq!(
            serde_json::to_string(&t).unwrap(),
            r#"{"id":1,"token":"test","user_id":1,"created":"1983-02-02T05:00:00Z"}"#
        );
    }

    #[test]
    fn test_deserialize_from_partial_json() {
        let t: Token = serde_json::from_str(r#"{"token":"testtoken"}"#).unwrap();
        assert_eq!(t.token, "testtoken");
        assert_eq!(t.id, 0);
        let req = t.to_request();
        assert_eq!(req.token, "testtoken");
        assert!(req.old.is_none());
    }
}
