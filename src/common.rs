// Default URLs
pub static DEFAULT_API_URL: &str = "https://api.razorpay.com/v1/";

// Header names
pub static PAYOUT_IDEMPOTENCY_HEADER: &str = "X-Payout-Idempotency";
