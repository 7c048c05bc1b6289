//! Packages command - lists credit packages and the custom top-up rate.

use crate::commands::{CommandHandler, CommandInput};
use crate::error::AppResult;
use async_trait::async_trait;
use casino_session::Session;
use credit_pricing::{format_inr, CustomPricing};

pub struct PackagesHandler {
    session: Session,
}

impl PackagesHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for PackagesHandler {
    fn trigger(&self) -> &str {
        "!packages"
    }

    async fn execute(&self, _input: &CommandInput) -> AppResult<String> {
        let packages = self.session.credit_packages().await?;
        if packages.is_empty() {
            return Ok("**Credit Packages**\n\nNo packages are on offer right now.".into());
        }

        let mut response = String::from("**Credit Packages**");
        for pkg in &packages {
            response.push_str(&format!(
                "\n- {}: {} credits for {}",
                pkg.name,
                pkg.credits,
                format_inr(pkg.price as f64)
            ));
        }

        let pricing = CustomPricing::new(&packages);
        if pricing.is_available() {
            response.push_str(&format!(
                "\n\nCustom amounts: {} = {:.2} credits",
                format_inr(1.0),
                pricing.ratio()
            ));
        } else {
            response.push_str("\n\nCustom amounts are currently unavailable.");
        }
        Ok(response)
    }
}
