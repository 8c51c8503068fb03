use crate::{pollable::IsInTerminalState, Error, Pollable, RazorpayXClient};
use async_trait::async_trait;
use chrono::{serde::ts_seconds, DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
};

/// A single payout transaction record.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Payout {
    pub id: String,
    /// Always `payout`.
    pub entity: String,
    pub account_number: Option<String>,
    /// Amount in paise.
    pub amount: u64,
    pub currency: Currency,
    #[serde(flatten)]
    pub destination: PayoutDestination,
    pub fees: Option<u64>,
    pub tax: Option<u64>,
    pub status: PayoutStatus,
    /// Unique Transaction Reference, assigned by the banking network on settlement.
    pub utr: Option<String>,
    pub mode: PayoutMode,
    pub purpose: Option<String>,
    pub reference_id: Option<String>,
    pub narration: Option<String>,
    pub notes: Option<HashMap<String, String>>,
    /// Populated by the server on failure and rejection states.
    pub status_details: Option<StatusDetails>,
    #[serde(with = "ts_seconds")]
    pub created_at: DateTime<Utc>,
}

#[async_trait]
impl Pollable for Payout {
    type Output = Payout;

    async fn poll_once(&self, rx: &RazorpayXClient) -> Result<Self::Output, Error> {
        rx.payouts.get_by_id(&self.id).await
    }
}

impl IsInTerminalState for Payout {
    /// A payout is considered to be in a terminal state if it is `Processed`, `Cancelled`,
    /// `Reversed` or `Rejected`.
    fn is_in_terminal_state(&self) -> bool {
        matches!(
            self.status,
            PayoutStatus::Processed
                | PayoutStatus::Cancelled
                | PayoutStatus::Reversed
                | PayoutStatus::Rejected
        )
    }
}

/// Destination of a payout.
///
/// Exactly one of the two forms is present on the wire: either inline
/// [`FundAccount`](crate::apis::payouts::FundAccount) details, or the id of a previously
/// created fund account.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(untagged)]
pub enum PayoutDestination {
    FundAccount { fund_account: FundAccount },
    FundAccountId { fund_account_id: String },
}

/// Inline fund account details for a payout destination.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(tag = "account_type", rename_all = "snake_case")]
pub enum FundAccount {
    BankAccount {
        bank_account: BankAccount,
        contact: Contact,
    },
    Vpa {
        vpa: Vpa,
        contact: Contact,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
pub struct BankAccount {
    /// Account holder name.
    pub name: String,
    pub ifsc: String,
    pub account_number: String,
}

/// UPI virtual payment address.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
pub struct Vpa {
    pub address: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
pub struct Contact {
    pub name: String,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Contact classification, e.g. `employee`, `customer`, `vendor` or `self`.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<HashMap<String, String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Queued,
    Pending,
    Rejected,
    Processing,
    Processed,
    Cancelled,
    Reversed,
}

/// Transfer rail used for a payout.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub enum PayoutMode {
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "NEFT")]
    Neft,
    #[serde(rename = "RTGS")]
    Rtgs,
    #[serde(rename = "IMPS")]
    Imps,
    #[serde(rename = "card")]
    Card,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Inr,
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Inr => write!(f, "INR"),
        }
    }
}

/// Source, reason and description of a payout status, as reported by the server.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct StatusDetails {
    pub source: Option<String>,
    pub reason: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
pub struct CreatePayoutRequest {
    /// Source account number of the payout. Not the fund account destination.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    /// Amount in paise.
    pub amount: u64,
    pub currency: Currency,
    pub mode: PayoutMode,
    #[serde(flatten)]
    pub destination: PayoutDestination,
    /// Open-ended purpose string. Common values are `refund`, `cashback`, `payout`,
    /// `salary`, `utility bill` and `vendor bill`, but the server accepts others.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narration: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<HashMap<String, String>>,
    /// Queue the payout instead of failing it when the account balance is low.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_if_low_balance: Option<bool>,
}

/// Filters for listing payouts. Defaults to the empty filter.
///
/// Unset fields are omitted from the query string.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Default, Builder)]
pub struct ListPayoutsRequest {
    /// Number of records to fetch.
    #[builder(default)]
    pub count: Option<u64>,
    /// Number of records to skip.
    #[builder(default)]
    pub skip: Option<u64>,
    #[builder(default)]
    pub fund_account_id: Option<String>,
    #[builder(default)]
    pub mode: Option<PayoutMode>,
    #[builder(default)]
    pub reference_id: Option<String>,
    #[builder(default)]
    pub status: Option<PayoutStatus>,
    #[builder(default)]
    pub contact_id: Option<String>,
}

/// Paginated collection envelope returned by list endpoints.
///
/// Items are in the order returned by the server.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Collection<T> {
    /// Always `collection`.
    pub entity: String,
    pub count: u64,
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_serializes_exactly_one_destination_field() {
        let with_fund_account = CreatePayoutRequestBuilder::default()
            .amount(1000)
            .currency(Currency::Inr)
            .mode(PayoutMode::Upi)
            .destination(PayoutDestination::FundAccount {
                fund_account: FundAccount::Vpa {
                    vpa: Vpa {
                        address: "gaurav.kumar@upi".to_string(),
                    },
                    contact: ContactBuilder::default()
                        .name("Gaurav Kumar".to_string())
                        .build()
                        .unwrap(),
                },
            })
            .build()
            .unwrap();

        let body = serde_json::to_value(&with_fund_account).unwrap();
        assert_eq!(
            body.get("fund_account"),
            Some(&json!({
                "account_type": "vpa",
                "vpa": { "address": "gaurav.kumar@upi" },
                "contact": { "name": "Gaurav Kumar" }
            }))
        );
        assert_eq!(body.get("fund_account_id"), None);

        let with_fund_account_id = CreatePayoutRequestBuilder::default()
            .amount(1000)
            .currency(Currency::Inr)
            .mode(PayoutMode::Imps)
            .destination(PayoutDestination::FundAccountId {
                fund_account_id: "fa_00000000000001".to_string(),
            })
            .build()
            .unwrap();

        let body = serde_json::to_value(&with_fund_account_id).unwrap();
        assert_eq!(body.get("fund_account_id"), Some(&json!("fa_00000000000001")));
        assert_eq!(body.get("fund_account"), None);
    }

    #[test]
    fn unset_optional_fields_are_omitted_from_the_body() {
        let request = CreatePayoutRequestBuilder::default()
            .amount(1000)
            .currency(Currency::Inr)
            .mode(PayoutMode::Neft)
            .destination(PayoutDestination::FundAccountId {
                fund_account_id: "fa_00000000000001".to_string(),
            })
            .build()
            .unwrap();

        let body = serde_json::to_value(&request).unwrap();
        let mut keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["amount", "currency", "fund_account_id", "mode"]);
    }

    #[test]
    fn reversed_payout_with_status_details_deserializes() {
        let payout: Payout = serde_json::from_value(json!({
            "id": "pout_00000000000001",
            "entity": "payout",
            "fund_account_id": "fa_00000000000001",
            "amount": 1000000,
            "currency": "INR",
            "fees": 590,
            "tax": 90,
            "status": "reversed",
            "utr": "1406161325836130",
            "mode": "NEFT",
            "purpose": "refund",
            "reference_id": null,
            "narration": "Acme Corp Fund Transfer",
            "status_details": {
                "source": "beneficiary_bank",
                "reason": "imps_transaction_not_done_bene_bank",
                "description": "Payout failed at beneficiary bank. Contact support for help."
            },
            "created_at": 1545383037
        }))
        .unwrap();

        assert_eq!(payout.status, PayoutStatus::Reversed);
        assert_eq!(
            payout.destination,
            PayoutDestination::FundAccountId {
                fund_account_id: "fa_00000000000001".to_string()
            }
        );
        assert_eq!(
            payout.status_details,
            Some(StatusDetails {
                source: Some("beneficiary_bank".to_string()),
                reason: Some("imps_transaction_not_done_bene_bank".to_string()),
                description: Some(
                    "Payout failed at beneficiary bank. Contact support for help.".to_string()
                )
            })
        );
        assert_eq!(payout.created_at.timestamp(), 1545383037);
    }

    #[test]
    fn terminal_states() {
        let mut payout: Payout = serde_json::from_value(json!({
            "id": "pout_00000000000001",
            "entity": "payout",
            "fund_account_id": "fa_00000000000001",
            "amount": 1000000,
            "currency": "INR",
            "status": "queued",
            "utr": null,
            "mode": "UPI",
            "created_at": 1545383037
        }))
        .unwrap();

        for (status, terminal) in [
            (PayoutStatus::Queued, false),
            (PayoutStatus::Pending, false),
            (PayoutStatus::Processing, false),
            (PayoutStatus::Processed, true),
            (PayoutStatus::Cancelled, true),
            (PayoutStatus::Reversed, true),
            (PayoutStatus::Rejected, true),
        ] {
            payout.status = status;
            assert_eq!(payout.is_in_terminal_state(), terminal);
        }
    }
}
