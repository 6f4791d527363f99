use serde::{Deserialize, Serialize};

use super::is_zero;
use crate::proto::{PermRequest, PermResponse};

/// A (service, name) capability stored in dauth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Perm {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Perm {
    pub fn to_request(&self) -> PermRequest {
        PermRequest {
            id: self.id,
            service: self.service.clone(),
            name: self.name.clone(),
        }
    }
}

impl From<PermResponse> for Perm {
    fn from(res: PermResponse) -> Self {
        Perm {
            id: res.id,
            service: res.service,
            name: res.name,
        }
    }
}
