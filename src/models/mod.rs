//! JSON entities exposed by the gateway and their backend conversions.
//!
//! Zero and empty fields are omitted on output, and every field is optional on
//! input so the same types double as query/delete filters.

use chrono::{DateTime, Utc};
use prost_types::Timestamp;

pub mod perm;
pub mod service;
pub mod token;
pub mod user;
pub mod user_perm;

pub use perm::Perm;
pub use service::{ServiceInfo, SERVICE_INFO};
pub use token::Token;
pub use user::User;
pub use user_perm::UserPerm;

pub(crate) fn is_zero(v: &i64) -> bool {
    *v == 0
}

pub fn to_timestamp<Tz: chrono::TimeZone>(dt: &DateTime<Tz>) -> Timestamp {
    Timestamp {
        seconds: dt.timestamp(),
        nanos: dt.timestamp_subsec_nanos() as i32,
    }
}

pub fn from_timestamp(ts: &Timestamp) -> anyhow::Result<DateTime<Utc>> {
    let nanos = u32::try_from(ts.nanos)
        .map_err(|_| anyhow::anyhow!("invalid timestamp nanos: {}", ts.nanos))?;
    DateTime::from_timestamp(ts.seconds, nanos)
        .ok_or_else(|| anyhow::anyhow!("timestamp out of range: {}", ts.seconds))
}
