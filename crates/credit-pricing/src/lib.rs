//! Credit pricing for custom top-ups.
//!
//! Administrators configure a handful of credit packages (credits for a price in
//! whole rupees). A custom top-up amount is priced with the median
//! credits-per-rupee ratio of those packages, so a single bonus package does not
//! skew the rate.
//!
//! Pricing never fails. When no package has a positive price the ratio is `0`
//! and every computed credit amount is `0`; callers must treat that as
//! "unavailable" and check [`is_available`] before offering a purchase.

mod currency;
mod package;
mod pricing;

pub use currency::{format_inr, paise_to_rupees, rupees_to_paise};
pub use package::CreditPackage;
pub use pricing::{compute_credits, derive_ratio, is_available, CustomPricing, Quote};
