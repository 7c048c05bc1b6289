//! Admin-configured credit packages.

use serde::{Deserialize, Serialize};

/// A purchasable bundle of credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditPackage {
    pub name: String,
    pub credits: u64,
    /// Price in whole rupees.
    #[serde(rename = "priceInrMultiplier")]
    pub price: u64,
}

impl CreditPackage {
    pub fn new(name: impl Into<String>, credits: u64, price: u64) -> Self {
        Self {
            name: name.into(),
            credits,
            price,
        }
    }

    /// Credits per rupee, or `None` for free packages.
    pub fn ratio(&self) -> Option<f64> {
        if self.price == 0 {
            return None;
        }
        Some(self.credits as f64 / self.price as f64)
    }
}
