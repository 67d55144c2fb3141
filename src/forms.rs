//! Login and registration flows, plus the navigation hook used to send the
//! user back to the login page when their session expires.

use crate::{
    endpoints,
    models::{Credentials, NewUser},
    ApiClient, ApiError,
};

/// Shown after a successful registration.
pub const REGISTRATION_SUCCESS: &str =
    "Registration successful! You can now log in.";

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// Something that can move the user to another page.
pub trait Navigator {
    fn navigate(&self, target: &str);
}

/// Follow the redirect an error asks for, if any.
///
/// Returns `true` when the user was sent somewhere else.
pub fn handle_error<N>(error: &ApiError, navigator: &N) -> bool
where
    N: Navigator + ?Sized,
{
    match error.redirect_to() {
        Some(target) => {
            log::debug!("Redirecting to {} after \"{}\"", target, error);
            navigator.navigate(target);
            true
        },
        None => false,
    }
}

/// A failed form submission, ready to be shown to the user.
#[derive(Debug, thiserror::Error)]
#[error("{}", message)]
pub struct FormError {
    message: String,
    #[source]
    source: ApiError,
}

impl FormError {
    fn new(source: ApiError, fallback: &str) -> Self {
        // a blank detail is as good as none
        let message = source
            .detail()
            .map(|detail| detail.to_string())
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| String::from(fallback));

        FormError { message, source }
    }

    /// The text to display, one line per message.
    pub fn message(&self) -> &str { &self.message }

    pub fn api_error(&self) -> &ApiError { &self.source }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new<E, P>(email: E, password: P) -> Self
    where
        E: Into<String>,
        P: Into<String>,
    {
        LoginForm {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Log in, then take the user to the home page.
    pub async fn submit<N>(
        &self,
        api: &ApiClient,
        navigator: &N,
    ) -> Result<(), FormError>
    where
        N: Navigator + ?Sized,
    {
        let credentials = Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        };

        match endpoints::login(api, &credentials).await {
            Ok(_) => {
                navigator.navigate(crate::HOME_PATH);
                Ok(())
            },
            Err(e) => {
                handle_error(&e, navigator);
                Err(FormError::new(e, LOGIN_FAILED))
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    /// Create the account and return the banner to show on success.
    pub async fn submit<N>(
        &self,
        api: &ApiClient,
        navigator: &N,
    ) -> Result<&'static str, FormError>
    where
        N: Navigator + ?Sized,
    {
        let user = NewUser {
            email: self.email.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
            ..NewUser::default()
        };

        match endpoints::register(api, &user).await {
            Ok(_) => Ok(REGISTRATION_SUCCESS),
            Err(e) => {
                handle_error(&e, navigator);
                Err(FormError::new(e, REGISTRATION_FAILED))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Detail;
    use reqwest::StatusCode;
    use std::cell::RefCell;

    #[derive(Default)]
    struct History(RefCell<Vec<String>>);

    impl Navigator for History {
        fn navigate(&self, target: &str) {
            self.0.borrow_mut().push(target.to_string());
        }
    }

    #[test]
    fn unauthorized_errors_redirect_to_login() {
        let history = History::default();
        let err = ApiError::Unauthorized { detail: None };

        assert!(handle_error(&err, &history));

        assert_eq!(*history.0.borrow(), vec![String::from("/login")]);
    }

    #[test]
    fn other_errors_stay_put() {
        let history = History::default();
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        };

        assert!(!handle_error(&err, &history));

        assert!(history.0.borrow().is_empty());
    }

    #[test]
    fn form_errors_prefer_the_backend_detail() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            detail: Some(Detail::Message(String::from("Email already registered"))),
        };

        let got = FormError::new(err, REGISTRATION_FAILED);

        assert_eq!(got.message(), "Email already registered");
        assert_eq!(got.api_error().status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn form_errors_fall_back_to_a_generic_message() {
        let err = ApiError::Status {
            status: StatusCode::BAD_GATEWAY,
            detail: None,
        };

        let got = FormError::new(err, LOGIN_FAILED);

        assert_eq!(got.to_string(), "Login failed");
    }

    #[test]
    fn blank_details_fall_back_to_a_generic_message() {
        let blank = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            detail: Some(Detail::Message(String::from("  "))),
        };
        let empty_list = ApiError::Unauthorized {
            detail: Some(Detail::Fields(Vec::new())),
        };

        assert_eq!(FormError::new(blank, LOGIN_FAILED).message(), "Login failed");
        assert_eq!(
            FormError::new(empty_list, REGISTRATION_FAILED).message(),
            "Registration failed"
        );
    }
}
