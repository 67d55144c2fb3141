use crate::{
    models::{Credentials, NewUser, TokenResponse, User},
    ApiClient, ApiError, Request, Token,
};
use url::Url;

/// Create a new account. The user still needs to [`login()`] afterwards.
pub async fn register(
    api: &ApiClient,
    user: &NewUser,
) -> Result<User, ApiError> {
    let request = Request::post("/api/auth/register").json(user)?;
    let user: User = api.send_as(request).await?;

    log::info!("Registered {}", user.email);

    Ok(user)
}

/// Log in and remember the access token in the client's session, so every
/// request after this one is authenticated.
pub async fn login(
    api: &ApiClient,
    credentials: &Credentials,
) -> Result<TokenResponse, ApiError> {
    let request = Request::post("/api/auth/login").json(credentials)?;
    let tokens: TokenResponse = api.send_as(request).await?;

    api.session().set_token(&Token::new(tokens.access_token.as_str()))?;
    log::info!("Logged in as {}", credentials.email);

    Ok(tokens)
}

/// Tell the backend we're done and forget the session token.
///
/// The token is cleared locally even if the backend call fails. When both
/// fail, the backend's error is the one returned.
pub async fn logout(api: &ApiClient) -> Result<(), ApiError> {
    let outcome = api.send(Request::post("/api/auth/logout")).await;
    let cleared = api.session().clear();

    match (outcome, cleared) {
        (Ok(body), Ok(())) => {
            log::info!("Logged out");
            log::trace!("Response: {}", body);
            Ok(())
        },
        (Ok(_), Err(e)) => {
            log::error!("Logged out, but the session couldn't be cleared: {}", e);
            Err(ApiError::from(e))
        },
        (Err(e), cleared) => {
            log::warn!("The logout request failed: {}", e);
            if let Err(clear_error) = cleared {
                log::error!("Unable to clear the session: {}", clear_error);
            }
            Err(e)
        },
    }
}

/// Fetch the currently logged in user.
pub async fn me(api: &ApiClient) -> Result<User, ApiError> {
    api.send_as(Request::get("/api/auth/me")).await
}

/// Where to send the user's browser to start connecting their LinkedIn
/// account. This is a navigation target, not an API call.
pub fn linkedin_connect_url(api: &ApiClient) -> Result<Url, ApiError> {
    api.url("/api/auth/linkedin")
}
