//! User lookup against the demo users REST API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Default users endpoint.
pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Default timeout for one lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Smallest and largest identifiers the demo API serves.
pub const MIN_USER_ID: i64 = 1;
pub const MAX_USER_ID: i64 = 10;

const UNKNOWN: &str = "Inconnu";
const UNAVAILABLE: &str = "Non disponible";

/// Errors from a user lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The identifier is not a number.
    #[error("invalid user id '{0}'")]
    InvalidId(String),

    /// The identifier is outside the served range.
    #[error("user id {0} out of range")]
    OutOfRange(i64),

    /// Timeout, connection failure, any non-2xx status (404 included) or
    /// unreadable body.
    #[error("user service unreachable: {0}")]
    Unreachable(String),
}

impl LookupError {
    /// Message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => "L'ID doit être un nombre entre 1 et 10.",
            Self::OutOfRange(_) => "L'ID doit être compris entre 1 et 10.",
            Self::Unreachable(_) => {
                "Désolé, je n'arrive pas à contacter le service externe. \
                 Veuillez réessayer plus tard."
            }
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        Self::Unreachable(e.to_string())
    }
}

/// Parse and range-check a user identifier.
pub fn parse_user_id(raw: &str) -> Result<u32, LookupError> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| LookupError::InvalidId(raw.to_string()))?;

    if !(MIN_USER_ID..=MAX_USER_ID).contains(&id) {
        return Err(LookupError::OutOfRange(id));
    }

    Ok(id as u32)
}

/// Flat display record for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub company: String,
}

impl UserRecord {
    /// Render the record for the user.
    pub fn display(&self, id: u32) -> String {
        format!(
            "Voici les informations de l'utilisateur {}\n\n\
             Nom : {}\n\
             Username : {}\n\
             Email : {}\n\
             Téléphone : {}\n\
             Entreprise : {}",
            id, self.name, self.username, self.email, self.phone, self.company
        )
    }
}

/// Response body of the users endpoint; only the projected fields.
#[derive(Debug, Default, Deserialize)]
struct ApiUser {
    name: Option<String>,
    username: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    company: Option<ApiCompany>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiCompany {
    name: Option<String>,
}

impl From<ApiUser> for UserRecord {
    fn from(user: ApiUser) -> Self {
        Self {
            name: user.name.unwrap_or_else(|| UNKNOWN.to_string()),
            username: user.username.unwrap_or_else(|| UNKNOWN.to_string()),
            email: user.email.unwrap_or_else(|| UNAVAILABLE.to_string()),
            phone: user.phone.unwrap_or_else(|| UNAVAILABLE.to_string()),
            company: user
                .company
                .and_then(|c| c.name)
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
        }
    }
}

/// Source of user records.
///
/// Abstracted so actions can be exercised without the network.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch one user by identifier.
    async fn fetch_user(&self, id: u32) -> Result<UserRecord, LookupError>;
}

/// HTTP client for the users endpoint.
///
/// One GET per lookup, bounded by the configured timeout. No retries.
pub struct UserLookupClient {
    client: reqwest::Client,
    base_url: String,
}

impl UserLookupClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .user_agent("NeeroActions/1.0")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// URL for one user.
    pub fn user_url(&self, id: u32) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

#[async_trait]
impl UserDirectory for UserLookupClient {
    async fn fetch_user(&self, id: u32) -> Result<UserRecord, LookupError> {
        let url = self.user_url(id);
        debug!("Fetching user from: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(error = %e, "User lookup request failed");
            LookupError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "User API returned an error status");
            return Err(LookupError::Unreachable(format!("status {}", status)));
        }

        let user: ApiUser = response.json().await?;
        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("4").unwrap(), 4);
        assert_eq!(parse_user_id(" 10 ").unwrap(), 10);
        assert!(matches!(parse_user_id("11"), Err(LookupError::OutOfRange(11))));
        assert!(matches!(parse_user_id("0"), Err(LookupError::OutOfRange(0))));
        assert!(matches!(parse_user_id("quatre"), Err(LookupError::InvalidId(_))));
    }

    #[test]
    fn test_error_messages() {
        assert_ne!(
            LookupError::InvalidId("x".to_string()).user_message(),
            LookupError::OutOfRange(11).user_message()
        );
        assert!(LookupError::Unreachable("status 404 Not Found".to_string())
            .user_message()
            .starts_with("Désolé"));
    }

    #[test]
    fn test_projection_placeholders() {
        let user: ApiUser = serde_json::from_str(r#"{"name": "Leanne Graham", "company": {}}"#).unwrap();
        let record = UserRecord::from(user);
        assert_eq!(record.name, "Leanne Graham");
        assert_eq!(record.username, "Inconnu");
        assert_eq!(record.email, "Non disponible");
        assert_eq!(record.company, "Non disponible");
    }

    #[test]
    fn test_projection_nested_company() {
        let json = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "phone": "1-770-736-8031 x56442",
            "company": {"name": "Romaguera-Crona", "bs": "harness"}
        }"#;
        let record = UserRecord::from(serde_json::from_str::<ApiUser>(json).unwrap());
        assert_eq!(record.company, "Romaguera-Crona");
        assert!(record.display(1).contains("Username : Bret"));
    }

    #[test]
    fn test_user_url() {
        let client = UserLookupClient::new("http://localhost:3000/users/", DEFAULT_LOOKUP_TIMEOUT).unwrap();
        assert_eq!(client.user_url(4), "http://localhost:3000/users/4");
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        let client = UserLookupClient::new("http://127.0.0.1:9/users", Duration::from_secs(2)).unwrap();
        let result = client.fetch_user(4).await;
        assert!(matches!(result, Err(LookupError::Unreachable(_))));
    }

    // Integration test that requires network access
    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_fetch_demo_user() {
        let client = UserLookupClient::new(DEFAULT_USERS_URL, DEFAULT_LOOKUP_TIMEOUT).unwrap();
        let record = client.fetch_user(1).await.unwrap();
        assert_eq!(record.username, "Bret");
    }
}
