use super::ContentId;
use crate::{
    models::{
        ContentRequest, GeneratedContent, ScheduleRequest, TrendingTopics,
    },
    ApiClient, ApiError, Request,
};
use serde_json::Value;

/// Ask the backend to write a new post.
pub async fn generate(
    api: &ApiClient,
    request: &ContentRequest,
) -> Result<GeneratedContent, ApiError> {
    log::debug!(
        "Generating a {} about \"{}\"",
        request.content_type.label(),
        request.topic
    );

    let request = Request::post("/api/content/generate").json(request)?;
    api.send_as(request).await
}

/// Generate A/B testing variations of an existing piece of content.
pub async fn variations(
    api: &ApiClient,
    content_id: &str,
) -> Result<Value, ApiError> {
    let request =
        Request::post("/api/content/variations").json(&ContentId { content_id })?;
    api.send(request).await
}

pub async fn schedule(
    api: &ApiClient,
    request: &ScheduleRequest,
) -> Result<Value, ApiError> {
    let request = Request::post("/api/content/schedule").json(request)?;
    api.send(request).await
}

/// Publish a piece of content to LinkedIn straight away.
pub async fn publish_now(
    api: &ApiClient,
    content_id: &str,
) -> Result<Value, ApiError> {
    let request =
        Request::post("/api/content/publish-now").json(&ContentId { content_id })?;
    api.send(request).await
}

/// Topics trending in the user's industry right now.
pub async fn trending_topics(
    api: &ApiClient,
) -> Result<TrendingTopics, ApiError> {
    api.send_as(Request::get("/api/content/trending-topics")).await
}

/// Everything scheduled or published between two dates (ISO 8601).
pub async fn calendar(
    api: &ApiClient,
    start: &str,
    end: &str,
) -> Result<Value, ApiError> {
    let request = Request::get("/api/content/calendar")
        .query("start_date", start)
        .query("end_date", end);
    api.send(request).await
}
