//! Wheel presentation: where the wheel stops, and how an outcome reads.
//!
//! The backend decides every outcome. Nothing here influences it; these
//! helpers only turn a [`SpinResult`] into a rotation and a message.

use casino_client::{GameOutcome, SpinResult};
use std::time::Duration;

/// Credits staked per spin.
pub const SPIN_COST: u64 = 50;

/// Full turns before the wheel settles on its segment.
pub const FULL_TURNS: u32 = 6;

/// How long the wheel takes to settle.
pub const SPIN_DURATION: Duration = Duration::from_millis(3500);

/// Angle (degrees) of the centre of an outcome's segment.
pub fn segment_angle(outcome: GameOutcome) -> u32 {
    match outcome {
        GameOutcome::Tiger => 45,
        GameOutcome::Dragon => 135,
        GameOutcome::Miss => 225,
        GameOutcome::Crit => 315,
    }
}

/// Absolute rotation that lands the pointer on `outcome` from a resting wheel.
pub fn target_rotation(outcome: GameOutcome) -> u32 {
    360 * FULL_TURNS + segment_angle(outcome)
}

pub fn is_win(outcome: GameOutcome) -> bool {
    matches!(outcome, GameOutcome::Tiger | GameOutcome::Dragon)
}

/// How long the outcome effect stays on screen.
pub fn effect_duration(outcome: GameOutcome) -> Duration {
    if is_win(outcome) {
        Duration::from_millis(2500)
    } else {
        Duration::from_millis(1500)
    }
}

/// Accumulated wheel rotation across spins.
///
/// Each spin adds [`FULL_TURNS`] turns from the last resting position, so
/// landing on the same outcome twice in a row still animates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WheelAnimation {
    rotation: u32,
}

impl WheelAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotation(&self) -> u32 {
        self.rotation
    }

    /// Advance to `outcome` and return the new absolute rotation.
    pub fn spin_to(&mut self, outcome: GameOutcome) -> u32 {
        let base = (self.rotation / 360) * 360;
        self.rotation = base + target_rotation(outcome);
        self.rotation
    }
}

/// Advertised payout for one outcome on a [`SPIN_COST`] bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub outcome: GameOutcome,
    /// Return multiplier in basis points (19600 = 1.96x).
    pub multiplier_bps: u64,
}

impl Payout {
    /// Net credits won (positive) or lost (negative) on a [`SPIN_COST`] bet.
    pub fn profit(&self) -> i64 {
        (SPIN_COST * self.multiplier_bps / 10_000) as i64 - SPIN_COST as i64
    }

    /// Multiplier as shown to players, e.g. `1.96x`.
    pub fn multiplier_label(&self) -> String {
        let whole = self.multiplier_bps / 10_000;
        let hundredths = (self.multiplier_bps % 10_000) / 100;
        if hundredths == 0 {
            format!("{}x", whole)
        } else {
            let digits = format!("{:02}", hundredths);
            format!("{}.{}x", whole, digits.trim_end_matches('0'))
        }
    }
}

/// Payout table, best outcome first.
pub const PAYOUTS: [Payout; 4] = [
    Payout {
        outcome: GameOutcome::Dragon,
        multiplier_bps: 19_600,
    },
    Payout {
        outcome: GameOutcome::Tiger,
        multiplier_bps: 14_000,
    },
    Payout {
        outcome: GameOutcome::Crit,
        multiplier_bps: 5_000,
    },
    Payout {
        outcome: GameOutcome::Miss,
        multiplier_bps: 0,
    },
];

pub fn payout(outcome: GameOutcome) -> Payout {
    PAYOUTS
        .iter()
        .copied()
        .find(|p| p.outcome == outcome)
        .unwrap_or(Payout {
            outcome,
            multiplier_bps: 0,
        })
}

/// How a spin turned out for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinSummary {
    Won { credits: u64, outcome: GameOutcome },
    Lost { credits: u64, outcome: GameOutcome },
    BreakEven { outcome: GameOutcome },
}

impl SpinSummary {
    pub fn from_result(result: &SpinResult) -> Self {
        let outcome = result.outcome;
        match result.profit {
            p if p > 0 => SpinSummary::Won {
                credits: p.unsigned_abs(),
                outcome,
            },
            p if p < 0 => SpinSummary::Lost {
                credits: p.unsigned_abs(),
                outcome,
            },
            _ => SpinSummary::BreakEven { outcome },
        }
    }

    pub fn outcome(&self) -> GameOutcome {
        match self {
            SpinSummary::Won { outcome, .. }
            | SpinSummary::Lost { outcome, .. }
            | SpinSummary::BreakEven { outcome } => *outcome,
        }
    }

    pub fn headline(&self) -> String {
        match self {
            SpinSummary::Won { credits, .. } => format!("You won {} credits!", credits),
            SpinSummary::Lost { credits, .. } => format!("You lost {} credits", credits),
            SpinSummary::BreakEven { .. } => "Break even!".to_string(),
        }
    }

    pub fn description(&self) -> String {
        format!("Outcome: {}", self.outcome())
    }
}
