use serde::{Deserialize, Serialize};

use super::is_zero;
use crate::proto::{UserRequest, UserResponse};

/// A dauth user. `pass` is accepted on input (login, save) and must be
/// scrubbed before any user leaves the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pass: String,
}

impl User {
    pub fn to_request(&self) -> UserRequest {
        UserRequest {
            id: self.id,
            user: self.user.clone(),
            pass: self.pass.clone(),
        }
    }

    /// Drop the secret.
    pub fn scrub(&mut self) {
        self.pass.clear();
    }
}

impl From<UserResponse> for User {
    fn from(res: UserResponse) -> Self {
        User {
            id: res.id,
            user: res.user,
            pass: res.pass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrubbed_user_has_no_pass_field() {
        let mut u = User::from(UserResponse {
            id: 1,
            user: "test".into(),
            pass: "secret".into(),
        });
        assert!(serde_json::to_string(&u).unwrap().contains("secret"));

        u.scrub();
        assert_eq!(serde_json::to_string(&u).unwrap(), r#"{"id":1,"user":"test"}"#);
    }

    #[test]
    fn test_credentials_round_into_request() {
        let u: User = serde_json::from_str(r#"{"user":"testuser","pass":"testpass"}"#).unwrap();
        let req = u.to_request();
        assert_eq!(req.user, "testuser");
        assert_eq!(req.pass, "testpass");
        assert_eq!(req.id, 0);
    }
}
