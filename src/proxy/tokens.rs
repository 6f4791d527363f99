use chrono::{DateTime, Duration, TimeZone};
use futures::future::BoxFuture;
use tonic::Status;

use super::{ResourceKind, ResourceProxy};
use crate::backend::{AuthBackend, RecordStream, SendStream};
use crate::envelope::Envelope;
use crate::errors::GatewayError;
use crate::models::{to_timestamp, Token};
use crate::proto::{DeleteResponse, TokenRequest, TokenResponse};

pub struct Tokens;

impl ResourceKind for Tokens {
    type Record = Token;
    type Request = TokenRequest;
    type Response = TokenResponse;

    const PLURAL: &'static str = "Tokens";
    const SINGULAR: &'static str = "Token";

    fn to_request(record: &Token) -> TokenRequest {
        record.to_request()
    }

    fn from_response(res: TokenResponse) -> anyhow::Result<Token> {
        Token::try_from(res)
    }

    fn by_id(id: i64) -> TokenRequest {
        TokenRequest {
            id,
            ..Default::default()
        }
    }

    fn set_id(record: &mut Token, id: i64) {
        record.id = id;
    }

    fn read(
        backend: &dyn AuthBackend,
        req: TokenRequest,
    ) -> BoxFuture<'_, Result<RecordStream<TokenResponse>, Status>> {
        backend.get_tokens(req)
    }

    fn save(
        backend: &dyn AuthBackend,
        reqs: SendStream<TokenRequest>,
    ) -> BoxFuture<'_, Result<RecordStream<TokenResponse>, Status>> {
        backend.save_tokens(reqs)
    }

    fn delete(
        backend: &dyn AuthBackend,
        req: TokenRequest,
    ) -> BoxFuture<'_, Result<DeleteResponse, Status>> {
        backend.delete_tokens(req)
    }
}

/// Local midnight of `now`'s day, moved back `age_days` whole days.
///
/// Returns `None` when the result is unrepresentable or midnight does not
/// exist in `now`'s zone.
pub fn old_token_cutoff<Tz: TimeZone>(now: &DateTime<Tz>, age_days: i64) -> Option<DateTime<Tz>> {
    let midnight = now.date_naive().and_hms_opt(0, 0, 0)?;
    let midnight = now.timezone().from_local_datetime(&midnight).earliest()?;
    let span = Duration::try_hours(age_days.checked_mul(24)?)?;
    midnight.checked_sub_signed(span)
}

impl ResourceProxy<Tokens> {
    /// Delete every token created before `cutoff`.
    pub async fn delete_older_than<Tz: TimeZone>(
        &self,
        cutoff: &DateTime<Tz>,
    ) -> Result<Envelope<Token>, GatewayError> {
        let req = TokenRequest {
            old: Some(to_timestamp(cutoff)),
            ..Default::default()
        };
        tracing::debug!(cutoff = %cutoff.naive_utc(), "deleting old tokens");
        self.delete(req, "Old tokens deleted".to_string()).await
    }
}
