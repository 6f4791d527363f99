use serde::{Deserialize, Serialize};

use super::is_zero;
use crate::proto::{UserPermRequest, UserPermResponse};

/// Link granting a permission to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPerm {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub perm_id: i64,
}

impl UserPerm {
    pub fn to_request(&self) -> UserPermRequest {
        UserPermRequest {
            id: self.id,
            user_id: self.user_id,
            perm_id: self.perm_id,
        }
    }
}

impl From<UserPermResponse> for UserPerm {
    fn from(res: UserPermResponse) -> Self {
        UserPerm {
            id: res.id,
            user_id: res.user_id,
            perm_id: res.perm_id,
        }
    }
}
