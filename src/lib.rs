//! An authenticated client for the LinkedIn content-automation API.
//!
//! All backend calls go through an [`ApiClient`], which attaches the bearer
//! token held by its [`Session`] and purges that token when the server
//! answers with `401 Unauthorized`.

#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod client;
mod config;
mod detail;
pub mod endpoints;
pub mod forms;
pub mod models;
mod session;

pub use client::{ApiClient, ApiError, Request};
pub use config::{parse_timeout, Config, ConfigError};
pub use detail::{Detail, FieldError};
pub use session::{
    FileStorage, MemoryStorage, Session, Storage, StorageError, Token,
};

/// The default user agent to use when communicating with the backend.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));

/// The key the session token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// Where the user is sent to re-authenticate.
pub const LOGIN_PATH: &str = "/login";

/// Where the user lands after logging in.
pub const HOME_PATH: &str = "/";
