//! Streaming CRUD translation between JSON payloads and dauth RPC streams.
//!
//! [`ResourceProxy`] owns the control flow for every resource kind: draining
//! server streams into a sequence, running bidirectional save streams, and
//! mapping delete counts. Each kind plugs in through [`ResourceKind`], which
//! only describes marshaling and which RPCs to call.

use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio_stream::wrappers::ReceiverStream;
use tonic::Status;

use crate::backend::{AuthBackend, RecordStream, SendStream};
use crate::envelope::Envelope;
use crate::errors::GatewayError;
use crate::proto::DeleteResponse;

pub mod perms;
pub mod tokens;
pub mod user_perms;
pub mod users;

pub use perms::Perms;
pub use tokens::{old_token_cutoff, Tokens};
pub use user_perms::UserPerms;
pub use users::Users;

/// Outbound messages buffered ahead of the transport on a save stream.
const SEND_BUFFER: usize = 16;

/// Marshaling adapter for one resource kind.
pub trait ResourceKind: Send + Sync + 'static {
    /// JSON entity; also used as the query/delete filter.
    type Record: Serialize + DeserializeOwned + Default + Send + Sync + 'static;
    type Request: Send + 'static;
    type Response: Send + 'static;

    const PLURAL: &'static str;
    const SINGULAR: &'static str;

    fn to_request(record: &Self::Record) -> Self::Request;
    fn from_response(res: Self::Response) -> anyhow::Result<Self::Record>;
    fn by_id(id: i64) -> Self::Request;
    fn set_id(record: &mut Self::Record, id: i64);

    /// Applied to every record read or acknowledged, before it can be
    /// returned.
    fn scrub(_record: &mut Self::Record) {}

    fn read(
        backend: &dyn AuthBackend,
        req: Self::Request,
    ) -> BoxFuture<'_, Result<RecordStream<Self::Response>, Status>>;

    fn save(
        backend: &dyn AuthBackend,
        reqs: SendStream<Self::Request>,
    ) -> BoxFuture<'_, Result<RecordStream<Self::Response>, Status>>;

    fn delete(
        backend: &dyn AuthBackend,
        req: Self::Request,
    ) -> BoxFuture<'_, Result<DeleteResponse, Status>>;
}

pub struct ResourceProxy<K> {
    backend: Arc<dyn AuthBackend>,
    kind: PhantomData<fn() -> K>,
}

impl<K> Clone for ResourceProxy<K> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            kind: PhantomData,
        }
    }
}

impl<K: ResourceKind> ResourceProxy<K> {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            kind: PhantomData,
        }
    }

    /// Every record matching `filter`, in stream order.
    ///
    /// An empty result is `NotFound`; a mid-stream failure discards whatever
    /// was already collected.
    pub async fn list(&self, filter: &K::Record) -> Result<Vec<K::Record>, GatewayError> {
        let mut stream = K::read(self.backend.as_ref(), K::to_request(filter)).await?;

        let mut data = Vec::new();
        while let Some(res) = stream.next().await {
            data.push(convert::<K>(res?)?);
        }

        if data.is_empty() {
            return Err(GatewayError::NotFound);
        }
        Ok(data)
    }

    /// The record with `id`. The backend sends zero or one; if it sends more,
    /// the last one wins.
    pub async fn get(&self, id: i64) -> Result<K::Record, GatewayError> {
        let mut stream = K::read(self.backend.as_ref(), K::by_id(id)).await?;

        let mut found = None;
        while let Some(res) = stream.next().await {
            found = Some(convert::<K>(res?)?);
        }

        found.ok_or(GatewayError::NotFound)
    }

    /// Save `records` in order. `number` counts acknowledgements, which may
    /// be fewer than the records sent and arrive in backend order.
    pub async fn save_all(
        &self,
        records: Vec<K::Record>,
    ) -> Result<Envelope<K::Record>, GatewayError> {
        let reqs = records.iter().map(K::to_request).collect();
        let acks = self.exchange(reqs).await?;
        Ok(Envelope::many(acks, format!("{} saved", K::PLURAL)))
    }

    /// Save one record under the path identifier, overriding any id in the body.
    pub async fn save_one(
        &self,
        id: i64,
        mut record: K::Record,
    ) -> Result<Envelope<K::Record>, GatewayError> {
        K::set_id(&mut record, id);
        let acks = self.exchange(vec![K::to_request(&record)]).await?;
        Ok(Envelope::single(
            acks.into_iter().last(),
            format!("{} saved", K::SINGULAR),
        ))
    }

    pub async fn delete_matching(
        &self,
        filter: &K::Record,
    ) -> Result<Envelope<K::Record>, GatewayError> {
        self.delete(K::to_request(filter), format!("{} deleted", K::PLURAL))
            .await
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<Envelope<K::Record>, GatewayError> {
        self.delete(K::by_id(id), format!("{} deleted", K::SINGULAR))
            .await
    }

    /// Zero affected rows is `NotFound`.
    pub(crate) async fn delete(
        &self,
        req: K::Request,
        message: String,
    ) -> Result<Envelope<K::Record>, GatewayError> {
        let res = K::delete(self.backend.as_ref(), req).await?;
        if res.num == 0 {
            return Err(GatewayError::NotFound);
        }
        Ok(Envelope::count(res.num, message))
    }

    /// Run one bidirectional save stream.
    ///
    /// A spawned task opens the call and owns the acknowledgement buffer
    /// while this task sends; the two meet at the join before anything is
    /// returned.
    async fn exchange(&self, reqs: Vec<K::Request>) -> Result<Vec<K::Record>, GatewayError> {
        let sent = reqs.len();
        let (tx, rx) = mpsc::channel(SEND_BUFFER);
        let backend = Arc::clone(&self.backend);

        let drain = DrainTask(tokio::spawn(async move {
            let outbound = ReceiverStream::new(rx).boxed();
            let mut acks = K::save(backend.as_ref(), outbound).await?;

            let mut data = Vec::new();
            while let Some(res) = acks.next().await {
                data.push(convert::<K>(res?)?);
            }
            Ok::<_, GatewayError>(data)
        }));

        for req in reqs {
            if tx.send(req).await.is_err() {
                // Drain side finished early; its result says why.
                break;
            }
        }
        // Half-close the send side.
        drop(tx);

        let data = drain
            .join()
            .await
            .map_err(|e| GatewayError::Internal(anyhow::anyhow!("save stream task failed: {}", e)))??;

        tracing::debug!(
            kind = K::PLURAL,
            sent,
            acknowledged = data.len(),
            "save stream completed"
        );
        Ok(data)
    }
}

fn convert<K: ResourceKind>(res: K::Response) -> Result<K::Record, GatewayError> {
    let mut record = K::from_response(res)?;
    K::scrub(&mut record);
    Ok(record)
}

/// Join handle that aborts its task when dropped, so an abandoned request
/// also cancels the backend stream.
struct DrainTask<T>(JoinHandle<T>);

impl<T> DrainTask<T> {
    async fn join(mut self) -> Result<T, JoinError> {
        (&mut self.0).await
    }
}

impl<T> Drop for DrainTask<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}
