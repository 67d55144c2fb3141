use crate::{models::DashboardStats, ApiClient, ApiError, Request};
use serde_json::Value;

/// How far back [`trends()`] looks when no window is given.
pub const DEFAULT_TREND_DAYS: u32 = 30;

pub async fn dashboard(api: &ApiClient) -> Result<DashboardStats, ApiError> {
    api.send_as(Request::get("/api/analytics/dashboard")).await
}

/// Detailed metrics for a single post.
pub async fn post_analytics(
    api: &ApiClient,
    post_id: &str,
) -> Result<Value, ApiError> {
    let path = format!(
        "/api/analytics/posts/{}/analytics",
        super::path_segment(post_id)
    );
    api.send(Request::get(path)).await
}

/// Daily engagement over the last `days` days.
pub async fn trends(
    api: &ApiClient,
    days: Option<u32>,
) -> Result<Value, ApiError> {
    let days = days.unwrap_or(DEFAULT_TREND_DAYS);
    let request = Request::get("/api/analytics/trends").query("days", days);
    api.send(request).await
}

pub async fn top_content(api: &ApiClient) -> Result<Value, ApiError> {
    api.send(Request::get("/api/analytics/top-content")).await
}
