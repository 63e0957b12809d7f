//! Client layer: orchestrates transport calls and maps HTTP status codes to errors.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{ClientType, Message, Password, Reply, Username, ValidationError};
use crate::transport::{decode_send_sms_reply, encode_send_sms_query, escape, join_query};

mod batch;
#[cfg(test)]
mod fake;

const DEFAULT_ENDPOINT: &str = "http://sms1.cardboardfish.com:9001/HTTPSMS";

/// Extra attempts made for a message the gateway answered with HTTP 500.
const SERVER_ERROR_RETRIES: u32 = 1;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    reason: String,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok(HttpResponse {
                status: status.as_u16(),
                // reqwest does not expose the server's own reason phrase.
                reason: status.canonical_reason().unwrap_or_default().to_owned(),
                body,
            })
        })
    }
}

#[derive(Debug, Clone)]
/// Account credentials sent with every HTTPSMS request.
pub struct Credentials {
    username: Username,
    password: Password,
    client_type: ClientType,
}

impl Credentials {
    pub fn new(username: Username, password: Password, client_type: ClientType) -> Self {
        Self {
            username,
            password,
            client_type,
        }
    }

    /// Validate raw credentials; `client_type` must be one of `H`, `S`, `D` or `M`.
    pub fn init(
        username: impl Into<String>,
        password: impl Into<String>,
        client_type: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
            client_type: ClientType::parse(client_type)?,
        })
    }

    pub fn client_type(&self) -> ClientType {
        self.client_type
    }

    fn push_query_params(&self, params: &mut Vec<(&'static str, String)>) {
        params.push((ClientType::FIELD, self.client_type.as_str().to_owned()));
        params.push((Username::FIELD, escape(self.username.as_str())));
        params.push((Password::FIELD, escape(self.password.as_str())));
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`HttpSmsClient`].
pub enum HttpSmsError {
    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The client was built without credentials.
    #[error("client not initialised: credentials are required")]
    NotInitialized,

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// HTTP 400.
    #[error("received \"Bad Request\" response code from server")]
    BadRequest,

    /// HTTP 401.
    #[error("bad username / password")]
    AuthenticationFailed,

    /// HTTP 402.
    #[error("credit too low, payment is required")]
    InsufficientCredit,

    /// HTTP 503.
    #[error("destination invalid")]
    InvalidDestination,

    /// HTTP 500 on the first attempt and on the retry.
    #[error("internal server error; second attempt also failed")]
    ServerError,

    /// Any other non-200 status.
    ///
    /// `reason` is the standard phrase for `status`, not the phrase the server sent.
    #[error("unhandled error: {status} {reason} {body}")]
    UnhandledTransportError {
        status: u16,
        reason: String,
        body: String,
    },

    /// The request could not be performed (DNS, connect, TLS, timeouts).
    #[error("transport unavailable: {0}")]
    TransportUnavailable(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Debug, Clone, Default)]
/// Builder for [`HttpSmsClient`].
///
/// Use this when you need to customize the endpoint, timeout, or user-agent.
pub struct HttpSmsClientBuilder {
    credentials: Option<Credentials>,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl HttpSmsClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credentials used for every request; required.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Override the HTTPSMS endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`HttpSmsClient`].
    ///
    /// Fails with [`HttpSmsError::NotInitialized`] when no credentials were supplied.
    pub fn build(self) -> Result<HttpSmsClient, HttpSmsError> {
        let credentials = self.credentials.ok_or(HttpSmsError::NotInitialized)?;
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());
        url::Url::parse(&endpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| HttpSmsError::TransportUnavailable(Box::new(err)))?;

        Ok(HttpSmsClient {
            credentials,
            endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// HTTPSMS gateway client.
///
/// Requests are issued one at a time: [`HttpSmsClient::send_message`] performs a single
/// physical send of up to ten destinations, [`HttpSmsClient::send_sms`] batches any number
/// of destinations.
pub struct HttpSmsClient {
    credentials: Credentials,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl HttpSmsClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`HttpSmsClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder() -> HttpSmsClientBuilder {
        HttpSmsClientBuilder::new()
    }

    /// Send a prebuilt message in one request.
    ///
    /// An HTTP 500 answer is retried once with the identical request.
    ///
    /// Errors:
    /// - [`HttpSmsError::BadRequest`], [`HttpSmsError::AuthenticationFailed`],
    ///   [`HttpSmsError::InsufficientCredit`], [`HttpSmsError::InvalidDestination`] for
    ///   HTTP 400, 401, 402 and 503,
    /// - [`HttpSmsError::ServerError`] when the retry also gets HTTP 500,
    /// - [`HttpSmsError::UnhandledTransportError`] for any other non-200 status.
    pub async fn send_message(&self, message: &Message) -> Result<Reply, HttpSmsError> {
        self.transmit(message, 0).await
    }

    async fn transmit(&self, message: &Message, mut attempt: u32) -> Result<Reply, HttpSmsError> {
        let url = self.request_url(message);
        loop {
            tracing::debug!(
                destinations = message.destinations().len(),
                attempt,
                "sending HTTPSMS request"
            );
            let response = self
                .http
                .get(&url)
                .await
                .map_err(HttpSmsError::TransportUnavailable)?;

            return match response.status {
                200 => Ok(decode_send_sms_reply(&response.body)),
                400 => Err(HttpSmsError::BadRequest),
                401 => Err(HttpSmsError::AuthenticationFailed),
                402 => Err(HttpSmsError::InsufficientCredit),
                503 => Err(HttpSmsError::InvalidDestination),
                500 if attempt < SERVER_ERROR_RETRIES => {
                    tracing::warn!(attempt, "HTTPSMS server error, retrying");
                    attempt += 1;
                    continue;
                }
                500 => Err(HttpSmsError::ServerError),
                status => Err(HttpSmsError::UnhandledTransportError {
                    status,
                    reason: response.reason,
                    body: response.body,
                }),
            };
        }
    }

    fn request_url(&self, message: &Message) -> String {
        let mut params = Vec::new();
        self.credentials.push_query_params(&mut params);
        params.extend(encode_send_sms_query(message));
        format!("{}?{}", self.endpoint, join_query(&params))
    }
}
