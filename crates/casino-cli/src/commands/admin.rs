//! Admin commands. Each checks the caller's admin flag before acting.

use crate::commands::{require_admin, CommandHandler, CommandInput};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use casino_client::ManualPaymentRequest;
use casino_session::wallet::{format_timestamp, RequestsByStatus};
use casino_session::Session;
use credit_pricing::format_inr;
use tracing::info;

fn request_line(request: &ManualPaymentRequest) -> String {
    let mut line = format!(
        "\n#{} {} - {} for {} credits",
        request.id,
        request.user,
        format_inr(request.amount as f64),
        request.credits
    );
    if let Some(created_at) = request.created_at {
        line.push_str(&format!(" ({})", format_timestamp(created_at)));
    }
    line
}

pub struct PendingHandler {
    session: Session,
}

impl PendingHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for PendingHandler {
    fn trigger(&self) -> &str {
        "!pending"
    }

    async fn execute(&self, _input: &CommandInput) -> AppResult<String> {
        require_admin(&self.session).await?;

        let requests = self.session.all_payment_requests().await?;
        let grouped = RequestsByStatus::partition(&requests);

        let mut response = format!(
            "**Payment Requests**\nPending ({}) / Approved ({}) / Declined ({})",
            grouped.pending.len(),
            grouped.approved.len(),
            grouped.declined.len()
        );

        if grouped.pending.is_empty() {
            response.push_str("\n\nNo pending requests.");
        } else {
            response.push_str("\n\n**Pending**");
            for request in &grouped.pending {
                response.push_str(&request_line(request));
            }
            response.push_str("\n\nUse `!approve <id>` or `!decline <id>`.");
        }
        Ok(response)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Decline,
}

/// Approves or declines a pending payment request.
pub struct ReviewHandler {
    session: Session,
    action: ReviewAction,
}

impl ReviewHandler {
    pub fn new(session: Session, action: ReviewAction) -> Self {
        Self { session, action }
    }
}

#[async_trait]
impl CommandHandler for ReviewHandler {
    fn trigger(&self) -> &str {
        match self.action {
            ReviewAction::Approve => "!approve",
            ReviewAction::Decline => "!decline",
        }
    }

    async fn execute(&self, input: &CommandInput) -> AppResult<String> {
        let usage = format!("{} <request-id>", self.trigger());
        let request_id: u64 = input.parse_arg(0, &usage)?;

        require_admin(&self.session).await?;

        match self.action {
            ReviewAction::Approve => {
                self.session.approve_payment(request_id).await?;
                Ok(format!("Payment request #{} approved.", request_id))
            }
            ReviewAction::Decline => {
                self.session.decline_payment(request_id).await?;
                Ok(format!("Payment request #{} declined.", request_id))
            }
        }
    }
}

pub struct HouseEdgeHandler {
    session: Session,
}

impl HouseEdgeHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for HouseEdgeHandler {
    fn trigger(&self) -> &str {
        "!house-edge"
    }

    async fn execute(&self, input: &CommandInput) -> AppResult<String> {
        require_admin(&self.session).await?;

        if input.args().is_empty() {
            let bps = self.session.house_edge().await?;
            return Ok(format!(
                "House edge: {} bps ({:.2}%)",
                bps,
                bps as f64 / 100.0
            ));
        }

        let bps: u64 = input.parse_arg(0, "!house-edge [0-10000]")?;
        self.session.set_house_edge(bps).await?;
        Ok(format!("House edge updated to {} bps.", bps))
    }
}

pub struct PaymentConfigHandler {
    session: Session,
}

impl PaymentConfigHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for PaymentConfigHandler {
    fn trigger(&self) -> &str {
        "!payment-config"
    }

    async fn execute(&self, input: &CommandInput) -> AppResult<String> {
        require_admin(&self.session).await?;

        let rest = input.rest();
        if rest.is_empty() {
            return Ok(match self.session.payment_config().await? {
                Some(config) => format!(
                    "**Payment Configuration**\n\nQR code: {}\nInstructions: {}",
                    config.qr_image_reference, config.instructions
                ),
                None => "Payment configuration is not set. Users cannot make payment \
                         requests until it is configured."
                    .into(),
            });
        }

        let (qr, instructions) = rest.split_once('|').ok_or_else(|| {
            AppError::Usage("Usage: !payment-config <qr-image> | <instructions>".into())
        })?;
        self.session.set_payment_config(qr, instructions).await?;
        info!("Manual payment configuration updated");
        Ok("Payment configuration updated.".into())
    }
}

pub struct StripeHandler {
    session: Session,
}

impl StripeHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for StripeHandler {
    fn trigger(&self) -> &str {
        "!stripe"
    }

    async fn execute(&self, input: &CommandInput) -> AppResult<String> {
        require_admin(&self.session).await?;

        let args = input.args();
        if args.is_empty() {
            return Ok(if self.session.is_stripe_configured().await? {
                "Stripe payment gateway is active.".into()
            } else {
                "Stripe is not configured. Use `!stripe <secret-key> <countries>`.".into()
            });
        }

        let countries = args.get(1).copied().unwrap_or("US,CA,GB");
        self.session
            .set_stripe_configuration(args[0], countries)
            .await?;
        Ok("Stripe configured.".into())
    }
}

pub struct SetCreditsHandler {
    session: Session,
}

impl SetCreditsHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for SetCreditsHandler {
    fn trigger(&self) -> &str {
        "!set-credits"
    }

    async fn execute(&self, input: &CommandInput) -> AppResult<String> {
        let usage = "!set-credits <principal> <balance>";
        let user: String = input.parse_arg(0, usage)?;
        let balance: u64 = input.parse_arg(1, usage)?;

        require_admin(&self.session).await?;

        let updated = self.session.admin_update_credits(user.clone(), balance).await?;
        info!("Balance of {} set to {}", user, updated);
        Ok(format!("Balance of {} is now {} credits.", user, updated))
    }
}
