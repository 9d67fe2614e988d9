//! Scenario description: DC siting, DC sizing, and fleet policy.

use crate::distance::GeoPoint;
use crate::fleet::FleetMode;
use crate::models::{FixedFleet, SizeTier};
use crate::positioning::{DcSiting, DcSizing};

/// One network configuration to optimize.
///
/// # Examples
///
/// ```
/// use u_distribution::models::{FixedFleet, SizeTier};
/// use u_distribution::network::Scenario;
///
/// let proposed = Scenario::proposed(3);
/// assert_eq!(proposed.siting.dc_count(), 3);
/// assert!(proposed.fleet.is_none());
///
/// let current = Scenario::current(
///     vec![SizeTier::Medium, SizeTier::Large],
///     FixedFleet::new([("Truck", 2)]),
/// );
/// assert_eq!(current.siting.dc_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Where DCs go.
    pub siting: DcSiting,
    /// How DCs are sized.
    pub sizing: DcSizing,
    /// Fleet operated at every DC; `None` lets the selector choose.
    pub fleet: Option<FixedFleet>,
}

impl Scenario {
    /// `dc_count` clustered DCs sized by demand with a freely chosen fleet.
    pub fn proposed(dc_count: usize) -> Self {
        Self {
            siting: DcSiting::Clustered { count: dc_count },
            sizing: DcSizing::ByDemand,
            fleet: None,
        }
    }

    /// One clustered DC per given tier, each operating `fleet`.
    pub fn current(tiers: Vec<SizeTier>, fleet: FixedFleet) -> Self {
        Self {
            siting: DcSiting::Clustered { count: tiers.len() },
            sizing: DcSizing::Fixed(tiers),
            fleet: Some(fleet),
        }
    }

    /// Places the DCs at `locations` instead of clustering.
    pub fn with_dc_locations(mut self, locations: Vec<GeoPoint>) -> Self {
        self.siting = DcSiting::Fixed(locations);
        self
    }

    /// Fleet policy for the vehicle mix selector.
    pub fn fleet_mode(&self) -> FleetMode<'_> {
        match &self.fleet {
            Some(fleet) => FleetMode::Fixed(fleet),
            None => FleetMode::Free,
        }
    }
}
