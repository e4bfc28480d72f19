// Service-account OAuth: sign a JWT assertion with the account's key and
// trade it for a bearer token.
use crate::google::GoogleError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const SCOPES: [&str; 2] = [
    "https://spreadsheets.google.com/feeds",
    "https://www.googleapis.com/auth/drive",
];

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_MINS: i64 = 60;

/// The fields of a downloaded service-account key file that we use.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self, GoogleError> {
        let text = fs::read_to_string(path).map_err(|source| GoogleError::KeyFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| GoogleError::KeyParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn claims(&self, scopes: &[&str], now: DateTime<Utc>) -> Claims {
        Claims {
            iss: self.client_email.clone(),
            scope: scopes.join(" "),
            aud: self.token_uri.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ASSERTION_LIFETIME_MINS)).timestamp(),
        }
    }

    /// RS256-signed assertion for the token endpoint.
    pub fn assertion(&self, scopes: &[&str], now: DateTime<Utc>) -> Result<String, GoogleError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())?;
        let token = encode(&Header::new(Algorithm::RS256), &self.claims(scopes, now), &key)?;
        Ok(token)
    }

    pub fn access_token(&self, client: &Client, scopes: &[&str]) -> Result<String, GoogleError> {
        let assertion = self.assertion(scopes, Utc::now())?;
        debug!(account = %self.client_email, "requesting access token");

        let resp = client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(GoogleError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let token: TokenResponse = resp.json()?;
        Ok(token.access_token)
    }
}
