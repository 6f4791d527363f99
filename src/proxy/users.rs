use futures::future::BoxFuture;
use tonic::Status;

use super::ResourceKind;
use crate::backend::{AuthBackend, RecordStream, SendStream};
use crate::models::User;
use crate::proto::{DeleteResponse, UserRequest, UserResponse};

pub struct Users;

impl ResourceKind for Users {
    type Record = User;
    type Request = UserRequest;
    type Response = UserResponse;

    const PLURAL: &'static str = "Users";
    const SINGULAR: &'static str = "User";

    fn to_request(record: &User) -> UserRequest {
        record.to_request()
    }

    fn from_response(res: UserResponse) -> anyhow::Result<User> {
        Ok(User::from(res))
    }

    fn by_id(id: i64) -> UserRequest {
        UserRequest {
            id,
            ..Default::default()
        }
    }

    fn set_id(record: &mut User, id: i64) {
        record.id = id;
    }

    /// Secrets never leave the gateway, whatever the backend sends.
    fn scrub(record: &mut User) {
        record.scrub();
    }

    fn read(
        backend: &dyn AuthBackend,
        req: UserRequest,
    ) -> BoxFuture<'_, Result<RecordStream<UserResponse>, Status>> {
        backend.get_users(req)
    }

    fn save(
        backend: &dyn AuthBackend,
        reqs: SendStream<UserRequest>,
    ) -> BoxFuture<'_, Result<RecordStream<UserResponse>, Status>> {
        backend.save_users(reqs)
    }

    fn delete(
        backend: &dyn AuthBackend,
        req: UserRequest,
    ) -> BoxFuture<'_, Result<DeleteResponse, Status>> {
        backend.delete_users(req)
    }
}
