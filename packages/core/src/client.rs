//! Signed request client.
//!
//! [`ApiClient::request`] signs a [`Payload`], form-encodes it, sends it
//! through a [`Transport`], and decodes the JSON answer into the caller's
//! type. Each stage fails with its own [`ClientError`] variant.
//!
//! The [`Transport`] trait is the seam between request semantics and the
//! network. [`HttpTransport`] is the production implementation, a blocking
//! `reqwest` client with default timeouts and redirect policy; tests supply
//! in-memory doubles.

use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::de::DeserializeOwned;
use simplerity_api::fields;
use thiserror::Error;
use tracing::debug;

use crate::payload::Payload;
use crate::signing::sign;

// ---------------------------------------------------------------------------
// ClientError
// ---------------------------------------------------------------------------

/// Errors that can occur while performing a single API call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client or request could not be constructed.
    #[error("unable to create http request: {0}")]
    Build(#[source] reqwest::Error),

    /// The request could not be delivered or no response arrived.
    #[error("unable to make request to api: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be read in full.
    #[error("unable to read body of response: {0}")]
    Body(#[source] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("api returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The body was not the JSON document the caller expected.
    #[error("unable to parse response: {source}; body: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, with invalid UTF-8 replaced, for diagnostics.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends one form-encoded request and returns the raw response.
///
/// Implementations must send `authorization` as the `Authorization` header
/// verbatim, even when empty, and `form` as an
/// `application/x-www-form-urlencoded` body.
pub trait Transport {
    fn send(
        &self,
        method: &Method,
        url: &str,
        authorization: &str,
        form: &[(String, String)],
    ) -> Result<RawResponse, ClientError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(
        &self,
        method: &Method,
        url: &str,
        authorization: &str,
        form: &[(String, String)],
    ) -> Result<RawResponse, ClientError> {
        (**self).send(method, url, authorization, form)
    }
}

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a client with transport defaults.
    pub fn new() -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self { client })
    }

    /// Wrap a pre-configured client.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        method: &Method,
        url: &str,
        authorization: &str,
        form: &[(String, String)],
    ) -> Result<RawResponse, ClientError> {
        // `form` sets Content-Type: application/x-www-form-urlencoded.
        let request = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, authorization)
            .form(form)
            .build()
            .map_err(ClientError::Build)?;

        let response = self.client.execute(request).map_err(ClientError::Transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(ClientError::Body)?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Issues signed requests through a [`Transport`].
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Sign `payload` with `secret`, send it, and decode the JSON response.
    ///
    /// The signature is computed over `payload` as given and then added to
    /// it under [`fields::SIGNATURE`]. `bearer` is sent verbatim as the
    /// `Authorization` header; pass `""` before login.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Build`], [`ClientError::Transport`], [`ClientError::Body`]
    ///   from the transport.
    /// - [`ClientError::UnexpectedStatus`] if the status is not 2xx; the body
    ///   is not decoded in that case.
    /// - [`ClientError::Decode`] if the body does not match `R`.
    pub fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        bearer: &str,
        mut payload: Payload,
        secret: &str,
    ) -> Result<R, ClientError> {
        let signature = sign(&payload, secret);
        payload.insert(fields::SIGNATURE, signature);

        debug!(
            %method,
            url,
            fields = ?payload.keys().collect::<Vec<_>>(),
            authenticated = !bearer.is_empty(),
            "sending signed request"
        );

        let response = self
            .transport
            .send(&method, url, bearer, &payload.form_pairs())?;

        debug!(url, status = response.status, bytes = response.body.len(), "response received");

        if !response.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: response.status,
                body: response.body_text(),
            });
        }

        serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
            source,
            body: response.body_text(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
