use crate::auth::Credentials;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Request, Response,
};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Reqwest middleware to inject the basic authentication header into outgoing HTTP requests.
///
/// RazorpayX authenticates every request with the API key pair, so the header is computed
/// once up front and reused for the lifetime of the client.
pub struct AuthenticationMiddleware {
    authorization: HeaderValue,
}

impl AuthenticationMiddleware {
    pub(crate) fn new(credentials: &Credentials) -> Self {
        let encoded = STANDARD.encode(format!(
            "{}:{}",
            credentials.key_id,
            credentials.key_secret.expose_secret()
        ));

        // Base64 output is always a valid header value
        let mut authorization = HeaderValue::from_str(&format!("Basic {}", encoded)).unwrap();
        authorization.set_sensitive(true);

        Self { authorization }
    }
}

#[async_trait]
impl Middleware for AuthenticationMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        req.headers_mut()
            .insert(AUTHORIZATION, self.authorization.clone());

        next.run(req, extensions).await
    }
}
