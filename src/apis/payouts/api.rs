use crate::{
    apis::{
        payouts::{Collection, CreatePayoutRequest, ListPayoutsRequest, Payout},
        RazorpayXClientInner,
    },
    common::PAYOUT_IDEMPOTENCY_HEADER,
    Error,
};
use std::sync::Arc;
use urlencoding::encode;
use uuid::Uuid;

/// RazorpayX payouts APIs client.
#[derive(Clone, Debug)]
pub struct PayoutsApi {
    inner: Arc<RazorpayXClientInner>,
}

impl PayoutsApi {
    pub(crate) fn new(inner: Arc<RazorpayXClientInner>) -> Self {
        Self { inner }
    }

    /// Creates a payout for the given details.
    ///
    /// The server assigns the id and initial status; no validation is performed locally.
    #[tracing::instrument(
        name = "Create Payout",
        skip(self, create_payout_request),
        fields(
            amount = create_payout_request.amount,
            currency = % create_payout_request.currency,
        )
    )]
    pub async fn create(&self, create_payout_request: &CreatePayoutRequest) -> Result<Payout, Error> {
        // Generate a new random idempotency-key for this request
        let idempotency_key = Uuid::new_v4();

        let res = self
            .inner
            .client
            .post(self.inner.api_url.join("payouts").unwrap())
            .header(PAYOUT_IDEMPOTENCY_HEADER, idempotency_key.to_string())
            .json(create_payout_request)
            .send()
            .await?
            .json()
            .await?;

        Ok(res)
    }

    /// Lists payouts made from the given account number.
    ///
    /// Results are returned in the server's order, together with the total count.
    #[tracing::instrument(name = "List Payouts", skip(self, request))]
    pub async fn list(
        &self,
        account_number: &str,
        request: &ListPayoutsRequest,
    ) -> Result<Collection<Payout>, Error> {
        let res = self
            .inner
            .client
            .get(self.inner.api_url.join("payouts").unwrap())
            .query(&[("account_number", account_number)])
            .query(request)
            .send()
            .await?
            .json()
            .await?;

        Ok(res)
    }

    /// Gets the details of an existing payout.
    #[tracing::instrument(name = "Get Payout by ID", skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Payout, Error> {
        let res = self
            .inner
            .client
            .get(
                self.inner
                    .api_url
                    .join(&format!("payouts/{}", encode(id)))
                    .unwrap(),
            )
            .send()
            .await?
            .json()
            .await?;

        Ok(res)
    }

    /// Cancels a queued payout.
    ///
    /// Only payouts in the `queued` state can be cancelled; the server rejects anything else.
    #[tracing::instrument(name = "Cancel Payout", skip(self))]
    pub async fn cancel(&self, id: &str) -> Result<(), Error> {
        self.inner
            .client
            .post(
                self.inner
                    .api_url
                    .join(&format!("payouts/{}/cancel", encode(id)))
                    .unwrap(),
            )
            .send()
            .await?;

        Ok(())
    }
}
