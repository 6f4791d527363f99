//! Request stages wrapped around the handlers.
//!
//! Protected routes compose as `json_content_type(require_permission(handler))`;
//! `request_id` and `log_failures` wrap the whole router.

pub mod authorize;
pub mod content_type;
pub mod gate;
pub mod observe;

pub use authorize::{require_permission, RequirePermission, TOKEN_HEADER};
pub use content_type::{json_content_type, JSON_CONTENT_TYPE};
pub use gate::{Permission, PermissionGate, MAX_AUTH_ATTEMPTS};
pub use observe::{log_failures, request_id};
