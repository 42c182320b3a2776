//! Guarantee tiers and minimum (floor) price tables

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Guarantee amounts offered in the quoting wizard (euros)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GuaranteeTier {
    G5k,
    G10k,
    G15k,
    G20k,
    G30k,
    G50k,
    G75k,
    G100k,
}

impl GuaranteeTier {
    pub const ALL: [GuaranteeTier; 8] = [
        GuaranteeTier::G5k,
        GuaranteeTier::G10k,
        GuaranteeTier::G15k,
        GuaranteeTier::G20k,
        GuaranteeTier::G30k,
        GuaranteeTier::G50k,
        GuaranteeTier::G75k,
        GuaranteeTier::G100k,
    ];

    /// Guarantee amount in euros
    pub fn amount(self) -> u32 {
        match self {
            GuaranteeTier::G5k => 5_000,
            GuaranteeTier::G10k => 10_000,
            GuaranteeTier::G15k => 15_000,
            GuaranteeTier::G20k => 20_000,
            GuaranteeTier::G30k => 30_000,
            GuaranteeTier::G50k => 50_000,
            GuaranteeTier::G75k => 75_000,
            GuaranteeTier::G100k => 100_000,
        }
    }

    /// Default minimum standard price (TTC) for this tier
    pub fn default_standard_floor(self) -> f64 {
        match self {
            GuaranteeTier::G5k => 300.0,
            GuaranteeTier::G10k => 350.0,
            GuaranteeTier::G15k => 400.0,
            GuaranteeTier::G20k => 450.0,
            GuaranteeTier::G30k => 550.0,
            GuaranteeTier::G50k => 650.0,
            GuaranteeTier::G75k => 800.0,
            GuaranteeTier::G100k => 950.0,
        }
    }

    /// Resolve a free-form amount to a tier, if it matches one exactly
    pub fn from_amount(amount: f64) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|tier| tier.amount() as f64 == amount)
    }
}

/// Minimum TTC price keyed by guarantee amount
///
/// Serialized as a JSON object whose keys are the guarantee amounts,
/// e.g. `{"5000": 300, "10000": 350}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinimumPriceTable {
    floors: BTreeMap<u32, f64>,
}

impl MinimumPriceTable {
    /// Default standard floors for every offered tier
    pub fn standard_defaults() -> Self {
        let floors = GuaranteeTier::ALL
            .iter()
            .map(|tier| (tier.amount(), tier.default_standard_floor()))
            .collect();
        Self { floors }
    }

    /// Floor for a guarantee amount; non-integral or unlisted amounts have none
    pub fn floor_for(&self, guarantee_amount: f64) -> Option<f64> {
        if guarantee_amount.fract() != 0.0
            || guarantee_amount < 0.0
            || guarantee_amount > u32::MAX as f64
        {
            return None;
        }
        self.floors.get(&(guarantee_amount as u32)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &f64)> {
        self.floors.iter()
    }
}

impl FromIterator<(u32, f64)> for MinimumPriceTable {
    fn from_iter<T: IntoIterator<Item = (u32, f64)>>(iter: T) -> Self {
        Self {
            floors: iter.into_iter().collect(),
        }
    }
}
