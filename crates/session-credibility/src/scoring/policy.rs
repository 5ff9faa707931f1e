use serde::{Deserialize, Serialize};

/// Credibility score a session must exceed to earn any bonus.
pub const QUALITY_SCORE_THRESHOLD: f64 = 0.85;
pub const QUALITY_MIN_RATING: f64 = 4.0;
/// Platinum refines a quality bonus; both conditions must hold.
pub const PLATINUM_SCORE_THRESHOLD: f64 = 0.95;
pub const PLATINUM_RATING: f64 = 5.0;

/// Pay adjustment granted for a scored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusTier {
    #[serde(rename = "Standard Pay")]
    Standard,
    #[serde(rename = "QUALITY BONUS")]
    Quality,
    #[serde(rename = "PLATINUM BONUS")]
    Platinum,
}

impl BonusTier {
    pub fn decide(credibility_score: f64, rating: f64) -> Self {
        if credibility_score > QUALITY_SCORE_THRESHOLD && rating >= QUALITY_MIN_RATING {
            if credibility_score > PLATINUM_SCORE_THRESHOLD && rating == PLATINUM_RATING {
                return BonusTier::Platinum;
            }
            return BonusTier::Quality;
        }

        BonusTier::Standard
    }

    pub fn bonus_percentage(self) -> f64 {
        match self {
            BonusTier::Standard => 0.0,
            BonusTier::Quality => 0.10,
            BonusTier::Platinum => 0.15,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BonusTier::Standard => "Standard Pay",
            BonusTier::Quality => "QUALITY BONUS",
            BonusTier::Platinum => "PLATINUM BONUS",
        }
    }
}
