//! Vehicle types, the transport table, and fixed fleets.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Route;
use crate::error::ConfigError;

/// A vehicle type with monthly fixed cost, per-km cost, and per-delivery payload.
///
/// # Examples
///
/// ```
/// use u_distribution::models::VehicleType;
///
/// let truck = VehicleType::new("Truck", 8000.0, 2.5, 176, 5000.0);
/// assert_eq!(truck.vehicles_for_routes(177), 2);
/// assert_eq!(truck.fleet_fixed_cost(2), 16000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
    /// Type name (modal).
    #[serde(alias = "Modal")]
    pub name: String,
    /// Fixed cost per vehicle per month.
    #[serde(alias = "Custo fixo por mês")]
    pub fixed_cost: f64,
    /// Variable cost per kilometer.
    #[serde(alias = "Custo variável por km")]
    pub variable_cost_per_km: f64,
    /// Routes one vehicle can run per month.
    #[serde(alias = "Nº entrega por mês")]
    pub deliveries_per_month: u32,
    /// Payload per delivery in kilograms.
    #[serde(
        rename = "capacity_per_delivery_kg",
        alias = "Capacidade por entrega (kg)",
        alias = "capacity_kg"
    )]
    pub capacity_kg: f64,
}

impl VehicleType {
    /// Creates a vehicle type.
    pub fn new(
        name: impl Into<String>,
        fixed_cost: f64,
        variable_cost_per_km: f64,
        deliveries_per_month: u32,
        capacity_kg: f64,
    ) -> Self {
        Self {
            name: name.into(),
            fixed_cost,
            variable_cost_per_km,
            deliveries_per_month,
            capacity_kg,
        }
    }

    /// Variable cost of a route. Fixed cost is charged per vehicle, not per route.
    pub fn route_cost(&self, route: &Route) -> f64 {
        self.variable_cost_per_km * route.distance_km()
    }

    /// Vehicles needed to run `routes` routes in a month.
    pub fn vehicles_for_routes(&self, routes: usize) -> u32 {
        let per_vehicle = self.deliveries_per_month.max(1) as usize;
        routes.div_ceil(per_vehicle) as u32
    }

    /// Fixed cost of operating `count` vehicles for a month.
    pub fn fleet_fixed_cost(&self, count: u32) -> f64 {
        f64::from(count) * self.fixed_cost
    }

    /// Checks costs, capacity, and delivery count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.capacity_kg.is_finite() || self.capacity_kg <= 0.0 {
            return Err(ConfigError::NonPositiveCapacity {
                what: format!("vehicle type '{}'", self.name),
                capacity_kg: self.capacity_kg,
            });
        }
        if self.deliveries_per_month == 0 {
            return Err(ConfigError::NoDeliveries(self.name.clone()));
        }
        for cost in [self.fixed_cost, self.variable_cost_per_km] {
            if !cost.is_finite() || cost < 0.0 {
                return Err(ConfigError::InvalidCost {
                    what: format!("vehicle type '{}'", self.name),
                    cost,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (capacity: {}kg)", self.name, self.capacity_kg)
    }
}

/// Validated, non-empty list of vehicle types with unique names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportTable {
    vehicles: Vec<VehicleType>,
}

impl TransportTable {
    /// Validates and wraps the given vehicle types.
    pub fn new(vehicles: Vec<VehicleType>) -> Result<Self, ConfigError> {
        if vehicles.is_empty() {
            return Err(ConfigError::EmptyTransportTable);
        }
        for (i, v) in vehicles.iter().enumerate() {
            v.validate()?;
            if vehicles[..i].iter().any(|other| other.name == v.name) {
                return Err(ConfigError::DuplicateVehicleType(v.name.clone()));
            }
        }
        Ok(Self { vehicles })
    }

    /// Vehicle types in table order.
    pub fn vehicles(&self) -> &[VehicleType] {
        &self.vehicles
    }

    /// Looks a vehicle type up by name.
    pub fn get(&self, name: &str) -> Option<&VehicleType> {
        self.vehicles.iter().find(|v| v.name == name)
    }

    /// Vehicle types by descending capacity; equal capacities keep table order.
    pub fn by_capacity_desc(&self) -> Vec<&VehicleType> {
        let mut sorted: Vec<&VehicleType> = self.vehicles.iter().collect();
        sorted.sort_by(|a, b| b.capacity_kg.total_cmp(&a.capacity_kg));
        sorted
    }

    /// The vehicle type with the largest capacity.
    pub fn largest(&self) -> &VehicleType {
        self.by_capacity_desc()[0]
    }
}

/// One row of a fixed fleet: how many vehicles of a type are available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetEntry {
    /// Vehicle type name.
    #[serde(alias = "Modal")]
    pub vehicle: String,
    /// Number of vehicles.
    #[serde(alias = "Quantidade")]
    pub count: u32,
}

/// A caller-specified fleet per distribution center (current scenario).
///
/// Entries are processed in the given order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixedFleet {
    entries: Vec<FleetEntry>,
}

impl FixedFleet {
    /// Creates a fleet from `(vehicle type, count)` pairs.
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (S, u32)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(vehicle, count)| FleetEntry {
                    vehicle: vehicle.into(),
                    count,
                })
                .collect(),
        }
    }

    /// Fleet rows in order.
    pub fn entries(&self) -> &[FleetEntry] {
        &self.entries
    }

    /// Total number of vehicles across all types.
    pub fn total_vehicles(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Checks that every entry names a known vehicle type.
    pub fn validate(&self, table: &TransportTable) -> Result<(), ConfigError> {
        for e in &self.entries {
            if table.get(&e.vehicle).is_none() {
                return Err(ConfigError::UnknownVehicleType(e.vehicle.clone()));
            }
        }
        Ok(())
    }
}
