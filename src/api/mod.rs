//! A core module for interacting with the ImageKit.io API.
//!
//! Usually, you build one [`ImageKit`] client and call one method per remote operation,
//! see [`media`] for the operations and their parameter records.
//!
//! Every operation follows the same contract:
//!
//! 1. unset fields of the parameter record are filled with their defaults,
//! 2. the record is validated, a failure returns [`Error::Validation`] without any request,
//! 3. exactly one request is sent,
//! 4. a status other than the expected one returns [`Error::Remote`],
//! 5. the body is decoded into [`Response::data`].
//!
//! # Example
//!
//! ```no_run
//! use imagekit::api::ImageKit;
//! use imagekit::api::media::CreateFolderParam;
//! use imagekit::config::{ApiConfig, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), imagekit::api::Error> {
//!     let client = ImageKit::new(Credentials::from_env()?, &ApiConfig::default())?;
//!
//!     client
//!         .create_folder(CreateFolderParam::new("cats", "/animals"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod error;
pub mod media;

use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;
use validator::Validate;

use crate::config::{ApiConfig, Credentials};

pub use error::{Error, ErrorPayload};

/// The result type of every operation.
pub type Result<T> = std::result::Result<T, Error>;

/// The response of a successful operation.
///
/// Besides the decoded [`Self::data`], the raw status, headers and body are kept.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The HTTP status, always the one the operation expects.
    pub status: StatusCode,
    /// The HTTP response headers.
    pub headers: HeaderMap,
    /// The raw response body, empty for `204 No Content`.
    pub body: Vec<u8>,
    /// The decoded payload, `()` for operations without one.
    pub data: T,
}

/// A response whose status matched the expected one, body not decoded yet.
struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl RawResponse {
    /// Keep the body as is, for operations without payload.
    #[inline]
    fn into_empty(self) -> Response<()> {
        self.into_response(())
    }

    fn decode<T: DeserializeOwned>(self) -> Result<Response<T>> {
        let data = serde_json::from_slice(&self.body)?;
        Ok(self.into_response(data))
    }

    #[inline]
    fn into_response<T>(self, data: T) -> Response<T> {
        let Self {
            status,
            headers,
            body,
        } = self;
        Response {
            status,
            headers,
            body,
            data,
        }
    }
}

/// The ImageKit.io API client.
///
/// It only holds immutable configuration and a [`Client`],
/// so cloning it is cheap and it can be shared between tasks.
/// Cancel a call by dropping its future, e.g. with `tokio::time::timeout`.
#[derive(Debug, Clone)]
pub struct ImageKit {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl ImageKit {
    /// Build a client with its own [`Client`], using `config.timeout` as request timeout.
    ///
    /// # Errors
    ///
    /// If `credentials` or `config` are invalid, or the TLS backend cannot be initialized.
    pub fn new(credentials: Credentials, config: &ApiConfig) -> Result<Self> {
        config.validate()?;
        let client = build_client(config)?;
        Self::with_client(client, credentials, config)
    }

    /// Build a client reusing an existing [`Client`].
    ///
    /// The timeouts of `config` are not applied, configure them on `client` instead.
    ///
    /// # Errors
    ///
    /// If `credentials` or `config` are invalid.
    pub fn with_client(
        client: Client,
        credentials: Credentials,
        config: &ApiConfig,
    ) -> Result<Self> {
        credentials.validate()?;
        config.validate()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(&config.upload_prefix)?,
            credentials,
        })
    }

    /// Build a client from the `PRIVATE_KEY`, `PUBLIC_KEY` and `URL_ENDPOINT`
    /// environment variables and the default [`ApiConfig`].
    ///
    /// # Errors
    ///
    /// If `PRIVATE_KEY` is not set, see [`ImageKit::new`] for the others.
    pub fn from_env() -> Result<Self> {
        Self::new(Credentials::from_env()?, &ApiConfig::default())
    }

    /// The base URL every endpoint is joined onto, always ending with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The keys requests are authenticated with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn endpoint(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{method} {url}");
        self.client
            .request(method, url)
            .basic_auth(&self.credentials.private_key, Some(""))
    }

    /// Send `request`, and check the response status against `expected`.
    async fn dispatch(
        &self,
        request: RequestBuilder,
        expected: StatusCode,
    ) -> Result<RawResponse> {
        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        if status != expected {
            let payload = ErrorPayload::parse(&body);
            warn!("expected status {expected}, got {status}: {payload}");
            return Err(Error::Remote { status, payload });
        }
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    async fn get<Q>(&self, url: Url, query: &Q, expected: StatusCode) -> Result<RawResponse>
    where
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, url).query(query);
        self.dispatch(request, expected).await
    }

    async fn post<B>(&self, url: Url, body: &B, expected: StatusCode) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, url).json(body);
        self.dispatch(request, expected).await
    }

    async fn delete<B>(&self, url: Url, body: &B, expected: StatusCode) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::DELETE, url).json(body);
        self.dispatch(request, expected).await
    }
}

#[inline]
fn build_client(config: &ApiConfig) -> reqwest::Result<Client> {
    let client_builder = Client::builder();
    let client_builder = match config.timeout_duration() {
        Some(timeout) => client_builder.timeout(timeout),
        None => client_builder,
    };
    client_builder.build()
}

/// `Url::join` replaces the last path segment unless the base ends with `/`,
/// e.g. `https://api.imagekit.io/v1` + `folder` would lose `v1`.
fn normalize_base_url(upload_prefix: &str) -> Result<Url> {
    let mut url = Url::parse(upload_prefix)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
