//! Distribution center size tiers and the DC type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::distance::GeoPoint;
use crate::error::ConfigError;

/// Discrete DC size class. Tiers are ordered `Small < Medium < Large`.
///
/// # Examples
///
/// ```
/// use u_distribution::models::SizeTier;
///
/// let tier: SizeTier = "CD médio".parse().unwrap();
/// assert_eq!(tier, SizeTier::Medium);
/// assert_eq!(tier.next(), Some(SizeTier::Large));
/// assert_eq!(SizeTier::Large.next(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SizeTier {
    /// Smallest facility.
    Small,
    /// Mid-size facility.
    Medium,
    /// Largest facility; no escalation beyond it.
    Large,
}

impl SizeTier {
    /// All tiers in ascending order.
    pub const ALL: [SizeTier; 3] = [SizeTier::Small, SizeTier::Medium, SizeTier::Large];

    /// The next larger tier, if any.
    pub fn next(self) -> Option<SizeTier> {
        match self {
            SizeTier::Small => Some(SizeTier::Medium),
            SizeTier::Medium => Some(SizeTier::Large),
            SizeTier::Large => None,
        }
    }

    /// Lowercase English label.
    pub fn as_str(self) -> &'static str {
        match self {
            SizeTier::Small => "small",
            SizeTier::Medium => "medium",
            SizeTier::Large => "large",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeTier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        let label = label.strip_prefix("cd ").unwrap_or(&label).trim();
        match label {
            "small" | "pequeno" => Ok(SizeTier::Small),
            "medium" | "medio" | "médio" => Ok(SizeTier::Medium),
            "large" | "grande" => Ok(SizeTier::Large),
            _ => Err(ConfigError::UnknownSizeTier(s.to_string())),
        }
    }
}

impl TryFrom<String> for SizeTier {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SizeTier> for String {
    fn from(tier: SizeTier) -> Self {
        tier.as_str().to_string()
    }
}

/// Capacity and monthly cost of one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierSpec {
    /// Storage capacity in kilograms.
    pub capacity_kg: f64,
    /// Monthly fixed cost.
    pub monthly_cost: f64,
}

/// A row of the DC size table as it appears in input documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcSizeRecord {
    /// Size label (`small`, `CD médio`, ...).
    #[serde(alias = "Tipos de CD")]
    pub size: String,
    /// Capacity in kilograms.
    #[serde(alias = "Capacidade (kg)")]
    pub capacity_kg: f64,
    /// Monthly cost.
    #[serde(alias = "Custo mensal")]
    pub monthly_cost: f64,
}

/// Validated mapping from size tier to capacity and cost.
///
/// Every tier must be present exactly once with a positive capacity and a
/// non-negative cost.
///
/// # Examples
///
/// ```
/// use u_distribution::models::{DcSizeTable, SizeTier, TierSpec};
///
/// let table = DcSizeTable::new([
///     (SizeTier::Small, TierSpec { capacity_kg: 50_000.0, monthly_cost: 10_000.0 }),
///     (SizeTier::Medium, TierSpec { capacity_kg: 150_000.0, monthly_cost: 25_000.0 }),
///     (SizeTier::Large, TierSpec { capacity_kg: 400_000.0, monthly_cost: 60_000.0 }),
/// ]).unwrap();
/// assert_eq!(table.tier_for_demand(120_000.0), SizeTier::Medium);
/// assert_eq!(table.tier_for_demand(1_000_000.0), SizeTier::Large);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DcSizeTable {
    specs: [TierSpec; 3],
}

impl DcSizeTable {
    /// Builds a table from `(tier, spec)` pairs.
    pub fn new(
        entries: impl IntoIterator<Item = (SizeTier, TierSpec)>,
    ) -> Result<Self, ConfigError> {
        let mut slots: [Option<TierSpec>; 3] = [None; 3];
        for (tier, spec) in entries {
            if slots[tier.slot()].is_some() {
                return Err(ConfigError::DuplicateSizeTier(tier));
            }
            if !spec.capacity_kg.is_finite() || spec.capacity_kg <= 0.0 {
                return Err(ConfigError::NonPositiveCapacity {
                    what: format!("{tier} distribution center"),
                    capacity_kg: spec.capacity_kg,
                });
            }
            if !spec.monthly_cost.is_finite() || spec.monthly_cost < 0.0 {
                return Err(ConfigError::InvalidCost {
                    what: format!("{tier} distribution center"),
                    cost: spec.monthly_cost,
                });
            }
            slots[tier.slot()] = Some(spec);
        }

        let mut specs = [TierSpec {
            capacity_kg: 0.0,
            monthly_cost: 0.0,
        }; 3];
        for tier in SizeTier::ALL {
            specs[tier.slot()] = slots[tier.slot()].ok_or(ConfigError::MissingSizeTier(tier))?;
        }
        Ok(Self { specs })
    }

    /// Builds a table from input rows, parsing their size labels.
    pub fn from_records(records: &[DcSizeRecord]) -> Result<Self, ConfigError> {
        let mut entries = Vec::with_capacity(records.len());
        for r in records {
            let tier: SizeTier = r.size.parse()?;
            entries.push((
                tier,
                TierSpec {
                    capacity_kg: r.capacity_kg,
                    monthly_cost: r.monthly_cost,
                },
            ));
        }
        Self::new(entries)
    }

    /// Capacity and cost of a tier.
    pub fn spec(&self, tier: SizeTier) -> TierSpec {
        self.specs[tier.slot()]
    }

    /// Smallest tier covering `demand_kg`, upgrading one tier at a time.
    ///
    /// Stops at [`SizeTier::Large`] even if its capacity is still exceeded.
    pub fn tier_for_demand(&self, demand_kg: f64) -> SizeTier {
        let mut tier = SizeTier::Small;
        while self.spec(tier).capacity_kg < demand_kg {
            match tier.next() {
                Some(bigger) => tier = bigger,
                None => break,
            }
        }
        tier
    }
}

/// A distribution center with its tier, capacity, and assigned demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionCenter {
    index: usize,
    location: GeoPoint,
    tier: SizeTier,
    capacity_kg: f64,
    monthly_cost: f64,
    assigned_demand_kg: f64,
}

impl DistributionCenter {
    /// Creates a DC of the given tier, looking capacity and cost up in `table`.
    pub fn new(
        index: usize,
        location: GeoPoint,
        tier: SizeTier,
        table: &DcSizeTable,
        assigned_demand_kg: f64,
    ) -> Self {
        let spec = table.spec(tier);
        Self {
            index,
            location,
            tier,
            capacity_kg: spec.capacity_kg,
            monthly_cost: spec.monthly_cost,
            assigned_demand_kg,
        }
    }

    /// Creates a DC sized by its demand (see [`DcSizeTable::tier_for_demand`]).
    pub fn sized_for_demand(
        index: usize,
        location: GeoPoint,
        table: &DcSizeTable,
        assigned_demand_kg: f64,
    ) -> Self {
        let tier = table.tier_for_demand(assigned_demand_kg);
        Self::new(index, location, tier, table, assigned_demand_kg)
    }

    /// Position of this DC in the solution.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Location in degrees.
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Size tier.
    pub fn tier(&self) -> SizeTier {
        self.tier
    }

    /// Storage capacity in kilograms.
    pub fn capacity_kg(&self) -> f64 {
        self.capacity_kg
    }

    /// Monthly fixed cost.
    pub fn monthly_cost(&self) -> f64 {
        self.monthly_cost
    }

    /// Demand of the PDVs assigned to this DC.
    pub fn assigned_demand_kg(&self) -> f64 {
        self.assigned_demand_kg
    }

    /// Returns `true` if assigned demand exceeds capacity.
    pub fn is_over_capacity(&self) -> bool {
        self.assigned_demand_kg > self.capacity_kg
    }

    /// Demand in excess of capacity, zero when within capacity.
    pub fn overrun_kg(&self) -> f64 {
        (self.assigned_demand_kg - self.capacity_kg).max(0.0)
    }
}

impl fmt::Display for DistributionCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DC {} {} (lat: {:.4}, lon: {:.4})",
            self.index, self.tier, self.location.latitude, self.location.longitude
        )
    }
}
