//! Module containing the main RazorpayX API client.

use crate::{
    apis::{payouts::PayoutsApi, RazorpayXClientInner},
    auth::Credentials,
    common::DEFAULT_API_URL,
    middlewares::{
        authentication::AuthenticationMiddleware,
        error_handling::ErrorHandlingMiddleware,
        inject_user_agent::InjectUserAgentMiddleware,
        retry_idempotent::{DynRetryPolicy, RetryIdempotentMiddleware},
    },
};
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_tracing::TracingMiddleware;
use retry_policies::RetryPolicy;
use std::sync::Arc;

/// Client for RazorpayX public APIs.
///
/// Each payout creation request carries a randomly generated `X-Payout-Idempotency` key,
/// so transient failures can be retried safely by the middleware stack.
#[derive(Debug, Clone)]
pub struct RazorpayXClient {
    /// Payouts APIs client.
    pub payouts: PayoutsApi,
}

impl RazorpayXClient {
    /// Builds a new [`RazorpayXClient`](crate::client::RazorpayXClient) with the default configuration.
    pub fn new(credentials: Credentials) -> RazorpayXClient {
        RazorpayXClientBuilder::new(credentials).build()
    }

    /// Returns a new builder to configure a new [`RazorpayXClient`](crate::client::RazorpayXClient).
    pub fn builder(credentials: Credentials) -> RazorpayXClientBuilder {
        RazorpayXClientBuilder::new(credentials)
    }
}

/// Builder for a [`RazorpayXClient`](crate::client::RazorpayXClient).
#[derive(Debug)]
pub struct RazorpayXClientBuilder {
    client: reqwest::Client,
    retry_policy: Option<DynRetryPolicy>,
    api_url: Url,
    credentials: Credentials,
}

impl RazorpayXClientBuilder {
    /// Creates a new builder to configure a [`RazorpayXClient`](crate::client::RazorpayXClient).
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            retry_policy: Some(DynRetryPolicy(Arc::new(
                ExponentialBackoff::builder().build_with_max_retries(3),
            ))),
            api_url: Url::parse(DEFAULT_API_URL).unwrap(),
            credentials,
        }
    }

    /// Consumes the builder and builds a new [`RazorpayXClient`](crate::client::RazorpayXClient).
    pub fn build(self) -> RazorpayXClient {
        let auth_middleware = AuthenticationMiddleware::new(&self.credentials);

        let inner = Arc::new(RazorpayXClientInner {
            client: build_client_with_middleware(self.client, self.retry_policy, auth_middleware),
            api_url: self.api_url,
        });

        RazorpayXClient {
            payouts: PayoutsApi::new(inner),
        }
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sets a specific [`RetryPolicy`](retry_policies::RetryPolicy) to use when retrying transient failures.
    ///
    /// To disable automatic retrying of failed requests, use `None`.
    pub fn with_retry_policy(
        mut self,
        retry_policy: impl Into<Option<Arc<dyn RetryPolicy + Send + Sync + 'static>>>,
    ) -> Self {
        self.retry_policy = retry_policy.into().map(DynRetryPolicy);
        self
    }

    /// Sets the base URL for all API requests.
    ///
    /// Defaults to: `https://api.razorpay.com/v1/`
    ///
    /// The URL must end with a trailing slash for relative paths to resolve under it.
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }
}

fn build_client_with_middleware(
    client: reqwest::Client,
    retry_policy: Option<DynRetryPolicy>,
    auth_middleware: AuthenticationMiddleware,
) -> ClientWithMiddleware {
    let mut builder = reqwest_middleware::ClientBuilder::new(client)
        .with(TracingMiddleware::default())
        .with(InjectUserAgentMiddleware::new())
        .with(ErrorHandlingMiddleware);

    if let Some(retry_policy) = retry_policy {
        builder = builder.with(RetryIdempotentMiddleware::new(retry_policy));
    }

    builder.with(auth_middleware).build()
}
