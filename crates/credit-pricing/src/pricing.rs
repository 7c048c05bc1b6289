//! Median-ratio pricing for custom credit top-ups.

use crate::package::CreditPackage;

/// Derive the credits-per-rupee ratio from a set of packages.
///
/// Packages with a zero price (or zero credits) are ignored. The result is the
/// median of the remaining ratios: the middle element for an odd count, the
/// mean of the two middle elements for an even count. Returns `0.0` when no
/// package qualifies.
pub fn derive_ratio(packages: &[CreditPackage]) -> f64 {
    let mut ratios: Vec<f64> = packages
        .iter()
        .filter_map(CreditPackage::ratio)
        .filter(|ratio| *ratio > 0.0)
        .collect();

    if ratios.is_empty() {
        return 0.0;
    }

    ratios.sort_by(f64::total_cmp);
    let mid = ratios.len() / 2;
    if ratios.len() % 2 == 0 {
        (ratios[mid - 1] + ratios[mid]) / 2.0
    } else {
        ratios[mid]
    }
}

/// Credits owed for a custom rupee amount.
///
/// Formula: `floor(amount * derive_ratio(packages))`. A result of `0` means
/// pricing is unavailable (or the amount is too small to buy a single credit).
/// Non-positive and non-finite amounts price to `0`.
pub fn compute_credits(amount: f64, packages: &[CreditPackage]) -> u64 {
    credits_at_ratio(amount, derive_ratio(packages))
}

/// Whether custom pricing can be offered for these packages.
pub fn is_available(packages: &[CreditPackage]) -> bool {
    !packages.is_empty() && derive_ratio(packages) > 0.0
}

fn credits_at_ratio(amount: f64, ratio: f64) -> u64 {
    if ratio == 0.0 || !amount.is_finite() || amount <= 0.0 {
        return 0;
    }
    (amount * ratio).floor() as u64
}

/// A priced custom top-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    /// Amount in rupees.
    pub amount: f64,
    pub credits: u64,
    pub ratio: f64,
}

/// Pricing calculator over a snapshot of the package list.
///
/// The ratio is derived once at construction; build a new calculator when the
/// package list changes.
#[derive(Debug, Clone)]
pub struct CustomPricing {
    ratio: f64,
    package_count: usize,
}

impl CustomPricing {
    pub fn new(packages: &[CreditPackage]) -> Self {
        Self {
            ratio: derive_ratio(packages),
            package_count: packages.len(),
        }
    }

    /// Credits per rupee (`0.0` when unavailable).
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn is_available(&self) -> bool {
        self.package_count > 0 && self.ratio > 0.0
    }

    /// Credits for an amount, `0` when unavailable.
    pub fn credits_for(&self, amount: f64) -> u64 {
        credits_at_ratio(amount, self.ratio)
    }

    /// Price an amount. `None` when pricing is unavailable.
    pub fn quote(&self, amount: f64) -> Option<Quote> {
        if !self.is_available() {
            return None;
        }
        Some(Quote {
            amount,
            credits: self.credits_for(amount),
            ratio: self.ratio,
        })
    }
}
