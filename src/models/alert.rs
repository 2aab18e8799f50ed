use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Crypto,
    Stock,
    Forex,
}

impl FromStr for AssetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "crypto" => Ok(AssetKind::Crypto),
            "stock" => Ok(AssetKind::Stock),
            "forex" => Ok(AssetKind::Forex),
            other => Err(Error::Invalid(format!("unknown asset type: {other}"))),
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Crypto => write!(f, "crypto"),
            AssetKind::Stock => write!(f, "stock"),
            AssetKind::Forex => write!(f, "forex"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCondition {
    Above,
    Below,
}

impl FromStr for AlertCondition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "above" => Ok(AlertCondition::Above),
            "below" => Ok(AlertCondition::Below),
            other => Err(Error::Invalid(format!("unknown condition: {other}"))),
        }
    }
}

impl fmt::Display for AlertCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertCondition::Above => write!(f, "above"),
            AlertCondition::Below => write!(f, "below"),
        }
    }
}

/// A one-shot price watch. Evaluated only while `is_active` and not yet
/// triggered; the trigger transition permanently deactivates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "_id")]
    pub id: String,

    pub asset_type: AssetKind,
    pub symbol: String,
    pub condition: AlertCondition,

    // (18, 8)
    pub target_price: Decimal,

    pub is_active: bool,
    pub is_triggered: bool,
    pub triggered_at: Option<i64>,
    pub created_at: i64,

    pub webhook_url: Option<String>,
    pub email: Option<String>,
}

/// POST /api/alerts body. Asset type and condition arrive as free-form
/// strings and are normalized (lower-cased) during create.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertRequest {
    pub asset_type: String,
    pub symbol: String,
    pub condition: String,
    pub target_price: Decimal,

    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
