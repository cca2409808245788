//! Authentication for Google APIs.
//!
//! Produces a [`DriveSession`] either from a service account (JWT bearer
//! grant) or from an access token obtained elsewhere.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::Serialize;

use crate::client::DriveSession;
use crate::error::{DriveError, Result};
use crate::models::{ServiceAccountCredentials, TokenResponse};

/// Google OAuth2 token endpoint.
const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Read-only Google Drive API scope.
const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// JWT claims for service account authentication.
#[derive(Debug, Serialize)]
struct Claims {
    iss: String,   // Issuer (service account email)
    scope: String, // OAuth scope
    aud: String,   // Audience (token endpoint)
    exp: u64,      // Expiration time
    iat: u64,      // Issued at
}

enum Credential {
    ServiceAccount(ServiceAccountCredentials),
    AccessToken(String),
}

/// Obtains an authenticated [`DriveSession`].
pub struct Authenticator {
    credential: Credential,
    client: Client,
}

impl Authenticator {
    /// Create a new authenticator from a service account JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let credentials: ServiceAccountCredentials = serde_json::from_str(&content)?;
        Ok(Self::new(credentials))
    }

    /// Create a new authenticator from service account credentials.
    pub fn new(credentials: ServiceAccountCredentials) -> Self {
        Self {
            credential: Credential::ServiceAccount(credentials),
            client: Client::new(),
        }
    }

    /// Use an OAuth2 access token obtained outside this program.
    pub fn from_access_token(token: impl Into<String>) -> Self {
        Self {
            credential: Credential::AccessToken(token.into()),
            client: Client::new(),
        }
    }

    /// Obtain a session handle. Every failure is an `AuthenticationError`.
    pub async fn authenticate(&self) -> Result<DriveSession> {
        let token = match &self.credential {
            Credential::AccessToken(token) if token.trim().is_empty() => {
                return Err(DriveError::AuthenticationError(
                    "access token is empty".to_string(),
                ));
            }
            Credential::AccessToken(token) => token.trim().to_string(),
            Credential::ServiceAccount(credentials) => self
                .exchange_jwt(credentials)
                .await
                .map_err(|e| match e {
                    DriveError::AuthenticationError(_) => e,
                    other => DriveError::AuthenticationError(other.to_string()),
                })?,
        };

        Ok(DriveSession::new(token))
    }

    /// Exchange a signed JWT assertion for an access token.
    async fn exchange_jwt(&self, credentials: &ServiceAccountCredentials) -> Result<String> {
        let token_uri = credentials.token_uri.as_deref().unwrap_or(TOKEN_URI);
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| DriveError::AuthenticationError(e.to_string()))?
            .as_secs();

        let claims = Claims {
            iss: credentials.client_email.clone(),
            scope: DRIVE_READONLY_SCOPE.to_string(),
            aud: token_uri.to_string(),
            iat: now,
            exp: now + 3600, // 1 hour
        };

        let header = Header::new(Algorithm::RS256);
        let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())?;
        let jwt = encode(&header, &claims, &key)?;

        tracing::debug!(client_email = %credentials.client_email, token_uri, "Requesting access token");

        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", jwt.as_str())];

        let response = self.client.post(token_uri).form(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::AuthenticationError(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response.json().await?;
        Ok(token_response.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialization() {
        let claims = Claims {
            iss: "test@example.iam.gserviceaccount.com".to_string(),
            scope: DRIVE_READONLY_SCOPE.to_string(),
            aud: TOKEN_URI.to_string(),
            iat: 1234567890,
            exp: 1234571490,
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("test@example.iam.gserviceaccount.com"));
        assert!(json.contains(DRIVE_READONLY_SCOPE));
    }

    #[tokio::test]
    async fn test_static_token_session() {
        let session = Authenticator::from_access_token(" ya29.token ")
            .authenticate()
            .await
            .unwrap();
        assert_eq!(session.access_token(), "ya29.token");
    }

    #[tokio::test]
    async fn test_empty_static_token_rejected() {
        let err = Authenticator::from_access_token("  ")
            .authenticate()
            .await
            .unwrap_err();
        assert!(matches!(err, DriveError::AuthenticationError(_)));
    }

    #[tokio::test]
    async fn test_invalid_private_key_is_auth_error() {
        let auth = Authenticator::new(ServiceAccountCredentials {
            client_email: "test@project.iam.gserviceaccount.com".to_string(),
            private_key: "not a pem".to_string(),
            token_uri: Some("http://127.0.0.1:9/token".to_string()),
        });

        let err = auth.authenticate().await.unwrap_err();
        assert!(matches!(err, DriveError::AuthenticationError(_)));
    }
}
