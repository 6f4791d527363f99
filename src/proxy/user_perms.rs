use futures::future::BoxFuture;
use tonic::Status;

use super::ResourceKind;
use crate::backend::{AuthBackend, RecordStream, SendStream};
use crate::models::UserPerm;
use crate::proto::{DeleteResponse, UserPermRequest, UserPermResponse};

pub struct UserPerms;

impl ResourceKind for UserPerms {
    type Record = UserPerm;
    type Request = UserPermRequest;
    type Response = UserPermResponse;

    const PLURAL: &'static str = "User permissions";
    const SINGULAR: &'static str = "User permission";

    fn to_request(record: &UserPerm) -> UserPermRequest {
        record.to_request()
    }

    fn from_response(res: UserPermResponse) -> anyhow::Result<UserPerm> {
        Ok(UserPerm::from(res))
    }

    fn by_id(id: i64) -> UserPermRequest {
        UserPermRequest {
            id,
            ..Default::default()
        }
    }

    fn set_id(record: &mut UserPerm, id: i64) {
        record.id = id;
    }

    fn read(
        backend: &dyn AuthBackend,
        req: UserPermRequest,
    ) -> BoxFuture<'_, Result<RecordStream<UserPermResponse>, Status>> {
        backend.get_user_perms(req)
    }

    fn save(
        backend: &dyn AuthBackend,
        reqs: SendStream<UserPermRequest>,
    ) -> BoxFuture<'_, Result<RecordStream<UserPermResponse>, Status>> {
        backend.save_user_perms(reqs)
    }

    fn delete(
        backend: &dyn AuthBackend,
        req: UserPermRequest,
    ) -> BoxFuture<'_, Result<DeleteResponse, Status>> {
        backend.delete_user_perms(req)
    }
}
