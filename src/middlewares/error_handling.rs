use crate::error::{ApiError, Error};
use async_trait::async_trait;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Reqwest middleware which translates JSON error responses returned from RazorpayX APIs
/// into [`Error::ApiError`](crate::error::Error)s.
pub struct ErrorHandlingMiddleware;

#[async_trait]
impl Middleware for ErrorHandlingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        // Capture the response
        let response = next.run(req, extensions).await?;

        // Build an ApiError if the response is not a success
        if !response.status().is_success() {
            tracing::debug!("Failed HTTP request. Status code: {}", response.status());

            let api_error = api_error_from_response(response).await?;
            return Err(Error::ApiError(api_error).into());
        }

        Ok(response)
    }
}

/// Body of an error response from RazorpayX APIs.
#[derive(serde::Deserialize, Debug)]
struct ErrorResponseBody {
    error: ErrorResponseDetails,
}

#[derive(serde::Deserialize, Debug)]
struct ErrorResponseDetails {
    code: Option<String>,
    description: Option<String>,
    source: Option<String>,
    step: Option<String>,
    reason: Option<String>,
    field: Option<String>,
}

async fn api_error_from_response(response: Response) -> reqwest_middleware::Result<ApiError> {
    let status = response.status().as_u16();

    // Parse the response body as JSON. Non-conforming bodies are mapped to a generic error.
    let bytes = response.bytes().await?;
    let api_error = match serde_json::from_slice::<ErrorResponseBody>(&bytes) {
        Ok(body) => ApiError {
            status,
            code: body.error.code.unwrap_or_else(|| "SERVER_ERROR".to_string()),
            description: body.error.description,
            source: body.error.source,
            step: body.error.step,
            reason: body.error.reason,
            field: body.error.field,
        },
        Err(_) => ApiError {
            status,
            code: "SERVER_ERROR".to_string(),
            description: None,
            source: None,
            step: None,
            reason: None,
            field: None,
        },
    };

    Ok(api_error)
}
