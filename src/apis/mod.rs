//! Clients for the various RazorpayX APIs.

use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt::{Debug, Formatter};

pub mod payouts;

pub(crate) struct RazorpayXClientInner {
    pub(crate) client: ClientWithMiddleware,
    pub(crate) api_url: Url,
}

impl Debug for RazorpayXClientInner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayXClientInner")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}
