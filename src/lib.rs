//! A [RazorpayX](https://razorpay.com/x/) Rust client, providing convenient typed access
//! to the RazorpayX payouts APIs from applications built with Rust.
//!
//! Check out also the official RazorpayX [API documentation](https://razorpay.com/docs/api/x/).
//!
//! # Usage
//!
//! ## Prerequisites
//!
//! Generate an API key pair from the RazorpayX dashboard. The key id and key secret are
//! used for HTTP basic authentication on every request.
//!
//! ## Initialize a new `RazorpayXClient`
//!
//! Create a new [`RazorpayXClient`](crate::client::RazorpayXClient) and provide your key id
//! and key secret.
//!
//! ```rust,no_run
//! # use razorpayx_rust::{RazorpayXClient, auth::Credentials};
//! let rx = RazorpayXClient::builder(Credentials {
//!     key_id: "rzp_live_XXXXXXXXXXXXXX".into(),
//!     key_secret: "some-key-secret".into(),
//! })
//! .build();
//! ```
//!
//! ## Create a payout
//!
//! ```rust,no_run
//! # use razorpayx_rust::{RazorpayXClient, Error, apis::payouts::*};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let rx: RazorpayXClient = unreachable!();
//! #
//! let create_payout_request = CreatePayoutRequestBuilder::default()
//!     .account_number(Some("7878780080316316".to_string()))
//!     .amount(1000000)
//!     .currency(Currency::Inr)
//!     .mode(PayoutMode::Upi)
//!     .destination(PayoutDestination::FundAccount {
//!         fund_account: FundAccount::Vpa {
//!             vpa: Vpa {
//!                 address: "gaurav.kumar@upi".to_string(),
//!             },
//!             contact: ContactBuilder::default()
//!                 .name("Gaurav Kumar".to_string())
//!                 .build()
//!                 .unwrap(),
//!         },
//!     })
//!     .purpose(Some("refund".to_string()))
//!     .build()
//!     .unwrap();
//! let res = rx.payouts.create(&create_payout_request).await?;
//!
//! println!("Created new payout: {}", res.id);
//! # Ok(())
//! # }
//! ```
//!
//! For more info on all the parameters necessary to create a new payout, please refer to the
//! official [RazorpayX docs](https://razorpay.com/docs/api/x/payouts/).
//!
//! ## Listing payouts
//!
//! ```rust,no_run
//! # use razorpayx_rust::{RazorpayXClient, Error, apis::payouts::*};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let rx: RazorpayXClient = unreachable!();
//! #
//! let payouts = rx
//!     .payouts
//!     .list("7878780080316316", &ListPayoutsRequest::default())
//!     .await?;
//! for payout in &payouts.items {
//!     tracing::info!(
//!         "Payout {}: {:.2} {} ({:?})",
//!         payout.id,
//!         payout.amount as f32 / 100.0,
//!         payout.currency,
//!         payout.status
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Waiting for a payout to settle
//!
//! Payout status transitions are driven entirely by the server. Use the
//! [`Pollable`](crate::pollable::Pollable) extensions to wait for updates:
//!
//! ```rust,no_run
//! # use razorpayx_rust::{RazorpayXClient, Error, apis::payouts::*, pollable::*};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let rx: RazorpayXClient = unreachable!();
//! # let payout: Payout = unreachable!();
//! let settled = payout
//!     .poll_until_terminal_state(&rx, PollOptions::default())
//!     .await?;
//!
//! println!("Payout reached {:?}", settled.status);
//! # Ok(())
//! # }
//! ```

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub mod auth;
pub mod client;
mod common;
pub mod error;
mod middlewares;
pub mod pollable;

pub use client::RazorpayXClient;
pub use error::Error;
pub use pollable::{Pollable, PollableUntilTerminalState};
