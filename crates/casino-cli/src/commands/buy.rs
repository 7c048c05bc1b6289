//! Buying credits: quotes, manual payment requests and their status.

use crate::commands::{CommandHandler, CommandInput};
use crate::error::AppResult;
use async_trait::async_trait;
use casino_session::Session;
use credit_pricing::format_inr;
use tracing::info;

pub struct QuoteHandler {
    session: Session,
}

impl QuoteHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for QuoteHandler {
    fn trigger(&self) -> &str {
        "!quote"
    }

    async fn execute(&self, input: &CommandInput) -> AppResult<String> {
        let amount: f64 = input.parse_arg(0, "!quote <amount>")?;

        match self.session.quote(amount).await? {
            Some(quote) => Ok(format!(
                "{} buys {} credits",
                format_inr(quote.amount),
                quote.credits
            )),
            None => Ok("Custom amounts are currently unavailable.".into()),
        }
    }
}

pub struct BuyHandler {
    session: Session,
}

impl BuyHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for BuyHandler {
    fn trigger(&self) -> &str {
        "!buy"
    }

    async fn execute(&self, input: &CommandInput) -> AppResult<String> {
        let amount: u64 = input.parse_arg(0, "!buy <amount>")?;
        let receipt = self.session.buy_credits(amount).await?;

        info!("Payment request {} submitted", receipt.request_id);

        let mut response = format!(
            "**Payment Request #{}**\n\n\
             Pay {} to receive {} credits.",
            receipt.request_id,
            format_inr(receipt.amount as f64),
            receipt.credits
        );
        if let Some(config) = self.session.payment_config().await? {
            response.push_str(&format!(
                "\n\nQR code: {}\n{}",
                config.qr_image_reference, config.instructions
            ));
        }
        response.push_str("\n\nCredits are added once an admin confirms your payment.");
        Ok(response)
    }
}

pub struct RequestsHandler {
    session: Session,
}

impl RequestsHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for RequestsHandler {
    fn trigger(&self) -> &str {
        "!requests"
    }

    async fn execute(&self, _input: &CommandInput) -> AppResult<String> {
        let requests = self.session.my_payment_requests().await?;
        if requests.is_empty() {
            return Ok("You have no payment requests.".into());
        }

        let mut response = String::from("**Your Payment Requests**");
        for request in requests.iter().rev() {
            response.push_str(&format!(
                "\n#{} {} for {} credits - {}",
                request.id,
                format_inr(request.amount as f64),
                request.credits,
                request.status
            ));
        }
        Ok(response)
    }
}
