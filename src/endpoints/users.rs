use crate::{ApiClient, ApiError, Request};
use serde::Serialize;
use serde_json::Value;

pub async fn profile(api: &ApiClient) -> Result<Value, ApiError> {
    api.send(Request::get("/api/users/profile")).await
}

/// Update the user's profile. Only the fields in `changes` are sent.
pub async fn update_profile<P>(
    api: &ApiClient,
    changes: &P,
) -> Result<Value, ApiError>
where
    P: Serialize + ?Sized,
{
    let request = Request::put("/api/users/profile").json(changes)?;
    api.send(request).await
}

/// Is the user's LinkedIn account connected?
pub async fn linkedin_status(api: &ApiClient) -> Result<Value, ApiError> {
    api.send(Request::get("/api/users/linkedin-status")).await
}
