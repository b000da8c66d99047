//! Garmin Connect Client
//!
//! Signs in through Garmin SSO with email and password, keeps the session
//! cookies, and reads the daily sleep summary for one date at a time.

use super::{GarminError, GarminResult, SleepDataPayload, SleepSource};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

const SSO_SIGNIN_URL: &str = "https://sso.garmin.com/sso/signin";
const SSO_EMBED_URL: &str = "https://sso.garmin.com/sso/embed";
const CONNECT_URL: &str = "https://connect.garmin.com/modern";
const SOCIAL_PROFILE_URL: &str =
    "https://connect.garmin.com/modern/proxy/userprofile-service/socialProfile";
const DAILY_SLEEP_URL: &str =
    "https://connect.garmin.com/modern/proxy/wellness-service/wellness/dailySleepData";

const USER_AGENT: &str = concat!("sleep-dashboard/", env!("CARGO_PKG_VERSION"));

/// Garmin Connect login read from `GARMIN_EMAIL` and `GARMIN_PASSWORD`
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Read credentials from the environment; both must be non-empty
    pub fn from_env() -> GarminResult<Self> {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        match (read("GARMIN_EMAIL"), read("GARMIN_PASSWORD")) {
            (Some(email), Some(password)) => Ok(Self::new(email, password)),
            _ => Err(GarminError::MissingCredentials),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Signed-in Garmin Connect session
pub struct GarminClient {
    client: Client,
    display_name: String,
}

impl GarminClient {
    /// Sign in and resolve the account's display name
    pub async fn login(credentials: &Credentials) -> GarminResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()?;

        let params = [
            ("service", CONNECT_URL),
            ("gauthHost", SSO_EMBED_URL),
            ("clientId", "GarminConnect"),
            ("consumeServiceTicket", "false"),
        ];

        tracing::info!("Signing in to Garmin Connect");

        let signin_page = check_status(client.get(SSO_SIGNIN_URL).query(&params).send().await?)?
            .text()
            .await?;
        let csrf = extract_csrf(&signin_page)
            .ok_or_else(|| GarminError::Parse("sign-in page has no CSRF token".into()))?;

        let signin_result = check_status(
            client
                .post(SSO_SIGNIN_URL)
                .query(&params)
                .form(&[
                    ("username", credentials.email.as_str()),
                    ("password", credentials.password.as_str()),
                    ("embed", "false"),
                    ("_csrf", csrf.as_str()),
                ])
                .send()
                .await?,
        )?
        .text()
        .await?;

        let ticket = extract_ticket(&signin_result).ok_or_else(|| {
            GarminError::AuthFailed("no service ticket, check your email and password".into())
        })?;

        check_status(client.get(CONNECT_URL).query(&[("ticket", ticket.as_str())]).send().await?)?;

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct SocialProfile {
            display_name: String,
        }

        let profile: SocialProfile = check_status(
            client
                .get(SOCIAL_PROFILE_URL)
                .header("NK", "NT")
                .send()
                .await?,
        )?
        .json()
        .await
        .map_err(|e| GarminError::Parse(e.to_string()))?;

        tracing::info!(display_name = %profile.display_name, "Signed in to Garmin Connect");

        Ok(Self {
            client,
            display_name: profile.display_name,
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

#[async_trait]
impl SleepSource for GarminClient {
    async fn fetch_sleep(&self, date: NaiveDate) -> GarminResult<SleepDataPayload> {
        let date = date.format("%Y-%m-%d").to_string();

        let response = self
            .client
            .get(format!("{}/{}", DAILY_SLEEP_URL, self.display_name))
            .query(&[("date", date.as_str()), ("nonSleepBufferMinutes", "60")])
            .header("NK", "NT")
            .send()
            .await?;

        check_status(response)?
            .json()
            .await
            .map_err(|e| GarminError::Parse(e.to_string()))
    }
}

/// Map error statuses to `GarminError`
fn check_status(response: Response) -> GarminResult<Response> {
    let status = response.status();

    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(GarminError::RateLimited),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(GarminError::AuthFailed(format!("Garmin returned {}", status)))
        }
        s if !s.is_success() => Err(GarminError::Api(format!("Garmin returned {}", status))),
        _ => Ok(response),
    }
}

/// Pull the `_csrf` hidden input value out of the sign-in form
fn extract_csrf(html: &str) -> Option<String> {
    let input = &html[html.find("name=\"_csrf\"")?..];
    let value = &input[input.find("value=\"")? + "value=\"".len()..];
    let end = value.find('"')?;

    Some(value[..end].to_string()).filter(|v| !v.is_empty())
}

/// Pull the CAS service ticket out of the sign-in response
fn extract_ticket(html: &str) -> Option<String> {
    let start = html.find("ticket=")? + "ticket=".len();
    let ticket: String = html[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();

    Some(ticket).filter(|t| t.starts_with("ST-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_csrf() {
        let html = r#"<form><input type="hidden" name="_csrf" value="A1B2C3" /></form>"#;
        assert_eq!(extract_csrf(html).as_deref(), Some("A1B2C3"));

        assert_eq!(extract_csrf("<form></form>"), None);
        assert_eq!(extract_csrf(r#"<input name="_csrf" value="" />"#), None);
    }

    #[test]
    fn test_extract_ticket() {
        let html = r#"var response_url = "https:\/\/connect.garmin.com\/modern?ticket=ST-0123456-AbCdEf-cas";"#;
        assert_eq!(extract_ticket(html).as_deref(), Some("ST-0123456-AbCdEf-cas"));

        // Failed sign-in pages carry no service ticket
        assert_eq!(extract_ticket("<div id=\"status\">Invalid sign in.</div>"), None);
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new("me@example.com", "hunter2");
        let debug = format!("{:?}", credentials);

        assert!(debug.contains("me@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}
