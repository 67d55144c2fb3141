//! Typed views over the payloads the backend sends and accepts.
//!
//! Only the shapes the backend documents are modelled here. Everything else
//! is passed through as a [`serde_json::Value`].

use serde_derive::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// The credentials sent to `/api/auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The payload for `/api/auth/register`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_voice: Option<String>,
}

/// What a successful login hands back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String { String::from("bearer") }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub brand_voice: Option<String>,
    #[serde(default)]
    pub linkedin_connected: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    TextPost,
    Article,
    Carousel,
    Poll,
    Video,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::TextPost,
        ContentType::Article,
        ContentType::Carousel,
        ContentType::Poll,
        ContentType::Video,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContentType::TextPost => "Text Post",
            ContentType::Article => "Article",
            ContentType::Carousel => "Carousel",
            ContentType::Poll => "Poll",
            ContentType::Video => "Video Script",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::TextPost => "text_post",
            ContentType::Article => "article",
            ContentType::Carousel => "carousel",
            ContentType::Poll => "poll",
            ContentType::Video => "video",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<ContentType, Self::Err> {
        ContentType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| {
                let expected = ContentType::ALL.iter().map(|ty| ty.as_str());
                UnknownVariant::new(s, expected)
            })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Professional,
    Casual,
    Inspirational,
    Educational,
    Humorous,
    ThoughtProvoking,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Inspirational,
        Tone::Educational,
        Tone::Humorous,
        Tone::ThoughtProvoking,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Inspirational => "Inspirational",
            Tone::Educational => "Educational",
            Tone::Humorous => "Humorous",
            Tone::ThoughtProvoking => "Thought-provoking",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Inspirational => "inspirational",
            Tone::Educational => "educational",
            Tone::Humorous => "humorous",
            Tone::ThoughtProvoking => "thought_provoking",
        }
    }
}

impl Default for Tone {
    fn default() -> Self { Tone::Professional }
}

impl FromStr for Tone {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Tone, Self::Err> {
        Tone::ALL
            .iter()
            .copied()
            .find(|tone| tone.as_str() == s)
            .ok_or_else(|| {
                UnknownVariant::new(s, Tone::ALL.iter().map(|t| t.as_str()))
            })
    }
}

/// A string didn't match any of the known options.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{}\" isn't one of {}", value, expected)]
pub struct UnknownVariant {
    value: String,
    expected: String,
}

impl UnknownVariant {
    fn new<'a, I>(value: &str, expected: I) -> Self
    where
        I: Iterator<Item = &'a str>,
    {
        UnknownVariant {
            value: value.to_string(),
            expected: expected.collect::<Vec<_>>().join(", "),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    Failed,
}

impl PostStatus {
    pub const ALL: [PostStatus; 4] = [
        PostStatus::Draft,
        PostStatus::Scheduled,
        PostStatus::Published,
        PostStatus::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Published => "published",
            PostStatus::Failed => "failed",
        }
    }
}

impl Display for PostStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<PostStatus, Self::Err> {
        PostStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let expected = PostStatus::ALL.iter().map(|st| st.as_str());
                UnknownVariant::new(s, expected)
            })
    }
}

/// The windows of the day the backend recommends posting in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingTime {
    Morning,
    Lunch,
    Evening,
}

impl PostingTime {
    pub const ALL: [PostingTime; 3] =
        [PostingTime::Morning, PostingTime::Lunch, PostingTime::Evening];

    pub fn label(self) -> &'static str {
        match self {
            PostingTime::Morning => "Morning (8-10 AM)",
            PostingTime::Lunch => "Lunch (12-1 PM)",
            PostingTime::Evening => "Evening (5-7 PM)",
        }
    }

    /// The hours (24h clock) covered by this window.
    pub fn hours(self) -> &'static [u8] {
        match self {
            PostingTime::Morning => &[8, 9, 10],
            PostingTime::Lunch => &[12, 13],
            PostingTime::Evening => &[17, 18, 19],
        }
    }

    /// Which window, if any, an hour of the day falls into.
    pub fn for_hour(hour: u8) -> Option<PostingTime> {
        PostingTime::ALL
            .iter()
            .copied()
            .find(|window| window.hours().contains(&hour))
    }
}

/// The industries a user can pick when filling in their profile.
pub const INDUSTRIES: &[&str] = &[
    "Technology",
    "Finance",
    "Healthcare",
    "Marketing",
    "Sales",
    "Education",
    "Consulting",
    "Real Estate",
    "Manufacturing",
    "Retail",
    "Other",
];

/// The payload for `/api/content/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub topic: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub tone: Tone,
    pub include_hashtags: bool,
    pub include_emojis: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_length: Option<u32>,
    pub include_trends: bool,
    /// Between 0.3 and 1.0.
    pub creativity: f64,
}

impl ContentRequest {
    pub fn new<S: Into<String>>(topic: S, content_type: ContentType) -> Self {
        ContentRequest {
            topic: topic.into(),
            content_type,
            tone: Tone::default(),
            include_hashtags: true,
            include_emojis: false,
            target_length: Some(1200),
            include_trends: true,
            creativity: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub content_type: String,
    pub tone: String,
    pub estimated_engagement: f64,
    pub best_posting_time: String,
    #[serde(default)]
    pub virality_score: Option<f64>,
    #[serde(default)]
    pub variations: Option<Vec<String>>,
}

/// The payload for `/api/content/schedule`. Leaving `scheduled_time` out
/// lets the backend pick the recommended slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub content_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_posts: u64,
    pub total_engagement: u64,
    pub profile_views: u64,
    pub avg_engagement_rate: f64,
    pub connection_growth: f64,
    pub viral_posts: u64,
    pub scheduled_posts: u64,
    #[serde(default)]
    pub recent_posts: Vec<RecentPost>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPost {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub engagement_rate: Option<f64>,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// A post as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub media_urls: Option<Vec<String>>,
    pub status: PostStatus,
    #[serde(default)]
    pub scheduled_time: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub engagement_rate: f64,
    #[serde(default)]
    pub virality_score: f64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub views: u64,
    pub created_at: String,
}

/// What `/api/content/trending-topics` hands back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingTopics {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub trends: Vec<TrendingTopic>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingTopic {
    #[serde(alias = "topic_name")]
    pub topic: String,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub suggested_angles: Vec<String>,
    #[serde(default)]
    pub best_content_type: String,
}
