use futures::future::BoxFuture;
use tonic::Status;

use super::ResourceKind;
use crate::backend::{AuthBackend, RecordStream, SendStream};
use crate::models::Perm;
use crate::proto::{DeleteResponse, PermRequest, PermResponse};

pub struct Perms;

impl ResourceKind for Perms {
    type Record = Perm;
    type Request = PermRequest;
    type Response = PermResponse;

    const PLURAL: &'static str = "Permissions";
    const SINGULAR: &'static str = "Permission";

    fn to_request(record: &Perm) -> PermRequest {
        record.to_request()
    }

    fn from_response(res: PermResponse) -> anyhow::Result<Perm> {
        Ok(Perm::from(res))
    }

    fn by_id(id: i64) -> PermRequest {
        PermRequest {
            id,
            ..Default::default()
        }
    }

    fn set_id(record: &mut Perm, id: i64) {
        record.id = id;
    }

    fn read(
        backend: &dyn AuthBackend,
        req: PermRequest,
    ) -> BoxFuture<'_, Result<RecordStream<PermResponse>, Status>> {
        backend.get_perms(req)
    }

    fn save(
        backend: &dyn AuthBackend,
        reqs: SendStream<PermRequest>,
    ) -> BoxFuture<'_, Result<RecordStream<PermResponse>, Status>> {
        backend.save_perms(reqs)
    }

    fn delete(
        backend: &dyn AuthBackend,
        req: PermRequest,
    ) -> BoxFuture<'_, Result<DeleteResponse, Status>> {
        backend.delete_perms(req)
    }
}
