//! Tier lookup, impact label and recommendation text for a pair of scope
//! results.
//!
//! Tier bounds are inclusive upper bounds in tons CO2e, checked in ascending
//! order:
//! - A+: <= 20 (APR 3.5%)
//! - A: <= 50 (APR 4.5%)
//! - B: <= 100 (APR 6.0%)
//! - C: <= 175 (APR 8.5%)
//! - D: > 175 (not eligible)
//!
//! The impact label uses strict `<` at 20 and 100, so a total of exactly 20
//! tons is tier A+ but "Moderate Impact".

use crate::format::to_fixed;
use serde::Serialize;

const KG_PER_TON: f64 = 1000.0;

/// Emissions tier from A+ (best) to D (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tier {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
}

impl Tier {
    pub const ALL: [Tier; 5] = [Tier::APlus, Tier::A, Tier::B, Tier::C, Tier::D];

    pub fn from_total_tons(total: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|tier| tier.max_tons().is_none_or(|max| total <= max))
            .unwrap_or(Tier::D)
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::APlus => "A+",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        }
    }

    /// Inclusive upper bound in tons; `None` for the unbounded tier.
    pub fn max_tons(self) -> Option<f64> {
        match self {
            Tier::APlus => Some(20.0),
            Tier::A => Some(50.0),
            Tier::B => Some(100.0),
            Tier::C => Some(175.0),
            Tier::D => None,
        }
    }

    /// APR percentage; `None` means not eligible.
    pub fn apr(self) -> Option<f64> {
        match self {
            Tier::APlus => Some(3.5),
            Tier::A => Some(4.5),
            Tier::B => Some(6.0),
            Tier::C => Some(8.5),
            Tier::D => None,
        }
    }

    /// The next better tier, if any.
    pub fn better(self) -> Option<Tier> {
        match self {
            Tier::APlus => None,
            Tier::A => Some(Tier::APlus),
            Tier::B => Some(Tier::A),
            Tier::C => Some(Tier::B),
            Tier::D => Some(Tier::C),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactLevel {
    Low,
    Moderate,
    High,
}

impl ImpactLevel {
    pub fn from_total_tons(total: f64) -> Self {
        if total < 20.0 {
            ImpactLevel::Low
        } else if total < 100.0 {
            ImpactLevel::Moderate
        } else {
            ImpactLevel::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ImpactLevel::Low => "Low Impact",
            ImpactLevel::Moderate => "Moderate Impact",
            ImpactLevel::High => "High Impact",
        }
    }

    /// CSS class for the badge colour.
    pub fn badge_class(self) -> &'static str {
        match self {
            ImpactLevel::Low => "badge-low",
            ImpactLevel::Moderate => "badge-moderate",
            ImpactLevel::High => "badge-high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub total_tons: f64,
    pub tier: Tier,
    pub apr: Option<f64>,
    pub impact: &'static str,
    #[serde(skip)]
    pub impact_level: ImpactLevel,
    pub recommendation: String,
}

pub fn classify(scope1: f64, scope2: f64) -> Classification {
    let total_tons = total_tons(scope1, scope2);
    let tier = Tier::from_total_tons(total_tons);
    let impact_level = ImpactLevel::from_total_tons(total_tons);

    Classification {
        total_tons,
        tier,
        apr: tier.apr(),
        impact: impact_level.label(),
        impact_level,
        recommendation: recommendation(total_tons),
    }
}

pub fn total_tons(scope1: f64, scope2: f64) -> f64 {
    (scope1 + scope2) / KG_PER_TON
}

/// Kilograms to tons, two decimals.
pub fn format_tons(kg: f64) -> String {
    to_fixed(kg / KG_PER_TON, 2)
}

pub fn recommendation(total: f64) -> String {
    if total > 175.0 {
        return "Reduce your emissions below 175 tons to requalify for better rates! 🌍".to_string();
    }

    let current = Tier::from_total_tons(total);
    match current.better().and_then(|target| target.max_tons().map(|max| (target, max))) {
        Some((target, max)) => format!(
            "Reduce emissions by {} tons to reach Tier {}!",
            to_fixed(total - max, 2),
            target.label()
        ),
        None => "You're already at Tier A+! 🌟 Great job!".to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct TierRow {
    pub tier: &'static str,
    pub max_tons: Option<f64>,
    pub apr: Option<f64>,
}

pub fn tier_table() -> Vec<TierRow> {
    Tier::ALL
        .into_iter()
        .map(|tier| TierRow {
            tier: tier.label(),
            max_tons: tier.max_tons(),
            apr: tier.apr(),
        })
        .collect()
}
