use crate::client::{error_from_response, ApiClient};
use crate::error::{LinkNovaError, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// A problem with one login field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    /// Check both fields and report every problem at once
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let username = self.username.trim();
        if username.is_empty() {
            errors.push(FieldError {
                field: "username",
                message: "Username is required",
            });
        } else if username.chars().count() < MIN_USERNAME_LEN {
            errors.push(FieldError {
                field: "username",
                message: "Username must be at least 3 characters",
            });
        }

        let password = self.password.trim();
        if password.is_empty() {
            errors.push(FieldError {
                field: "password",
                message: "Password is required",
            });
        } else if password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError {
                field: "password",
                message: "Password must be at least 6 characters",
            });
        }

        errors
    }
}

/// Login against `/-/ln/api/login`, which lives outside the API prefix
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Returns the user id the server will expect in the `user-id` header
    pub fn login(&self, credentials: &Credentials) -> Result<String> {
        let errors = credentials.validate();
        if !errors.is_empty() {
            let text: Vec<&str> = errors.iter().map(|e| e.message).collect();
            return Err(LinkNovaError::InvalidInput(text.join("; ")));
        }

        let body = Credentials {
            username: credentials.username.trim().to_string(),
            password: credentials.password.clone(),
            remember_me: credentials.remember_me,
        };
        let url = self.client.server_url(&["-", "ln", "api", "login"]);
        let resp = self.client.send_raw(Method::POST, url, &body)?;

        let status = resp.status();
        // the server answers a successful login with a 303 to the UI
        if status.is_success() || status.is_redirection() {
            log::info!("Logged in as {}", body.username);
            Ok(body.username)
        } else if status.as_u16() == 401 {
            Err(LinkNovaError::api(401, "Invalid username or password"))
        } else {
            Err(error_from_response(resp))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::TestServer;
    use rstest::rstest;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[rstest]
    #[case("alice", "hunter22", vec![])]
    #[case("", "hunter22", vec!["Username is required"])]
    #[case("al", "hunter22", vec!["Username must be at least 3 characters"])]
    #[case("alice", "", vec!["Password is required"])]
    #[case("alice", "12345", vec!["Password must be at least 6 characters"])]
    #[case("  ", " 123 ", vec!["Username is required", "Password must be at least 6 characters"])]
    fn test_validate(#[case] user: &str, #[case] pass: &str, #[case] expected: Vec<&str>) {
        let messages: Vec<&str> = Credentials::new(user, pass)
            .validate()
            .iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, expected);
    }

    #[test]
    fn test_login_accepts_redirect() {
        let srv = TestServer::start();
        srv.mount(
            Mock::given(method("POST"))
                .and(path("/-/ln/api/login"))
                .and(body_json(json!({"username": "alice", "password": "hunter22", "remember_me": false})))
                .respond_with(
                    ResponseTemplate::new(303)
                        .insert_header("location", "/-/ln")
                        .insert_header("set-cookie", "X-USER-ID=alice; Path=/"),
                ),
        );

        let user = srv
            .client()
            .auth()
            .login(&Credentials::new(" alice ", "hunter22"))
            .unwrap();
        assert_eq!(user, "alice");
    }

    #[test]
    fn test_login_rejected() {
        let srv = TestServer::start();
        srv.mount(
            Mock::given(method("POST"))
                .and(path("/-/ln/api/login"))
                .respond_with(ResponseTemplate::new(401)),
        );

        let err = srv
            .client()
            .auth()
            .login(&Credentials::new("alice", "wrongpass"))
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("Invalid username or password"));
    }

    #[test]
    fn test_login_validates_before_sending() {
        let srv = TestServer::start();
        srv.mount(
            Mock::given(method("POST"))
                .and(path("/-/ln/api/login"))
                .respond_with(ResponseTemplate::new(303))
                .expect(0),
        );

        let err = srv
            .client()
            .auth()
            .login(&Credentials::new("al", "x"))
            .unwrap_err();
        assert!(matches!(err, LinkNovaError::InvalidInput(_)));
    }
}
