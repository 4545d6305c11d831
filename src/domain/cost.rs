use crate::domain::model::{Measurement, TransportMode};
use serde::{Deserialize, Serialize};

/// 陸運排放計算固定使用的貨重（公噸）
pub const LAND_CARGO_WEIGHT_TONNES: f64 = 20.0;

pub const DEFAULT_FUEL_COST_PER_LITRE: f64 = 2.36;
pub const DEFAULT_FUEL_CONSUMPTION_L_PER_100KM: f64 = 35.0;
pub const DEFAULT_CO2_PER_TONNE_KM: f64 = 0.105;
pub const DEFAULT_SEA_COST_PER_KM: f64 = 0.00402;
pub const DEFAULT_SEA_CO2_PER_KM: f64 = 0.025;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandCostParams {
    pub fuel_cost_per_litre: f64,
    pub fuel_consumption_l_per_100km: f64,
    pub co2_per_tonne_km: f64,
}

impl Default for LandCostParams {
    fn default() -> Self {
        Self {
            fuel_cost_per_litre: DEFAULT_FUEL_COST_PER_LITRE,
            fuel_consumption_l_per_100km: DEFAULT_FUEL_CONSUMPTION_L_PER_100KM,
            co2_per_tonne_km: DEFAULT_CO2_PER_TONNE_KM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeaCostParams {
    pub cost_per_km: f64,
    pub co2_per_km: f64,
}

impl Default for SeaCostParams {
    fn default() -> Self {
        Self {
            cost_per_km: DEFAULT_SEA_COST_PER_KM,
            co2_per_km: DEFAULT_SEA_CO2_PER_KM,
        }
    }
}

/// 將距離轉換為成本與 CO2 排放
pub trait CostModel: Send + Sync {
    fn mode(&self) -> TransportMode;
    fn fuel_cost(&self, distance_km: f64) -> f64;
    fn co2_emission(&self, distance_km: f64) -> f64;

    /// 沒有距離時直接回傳 `None`，不進行計算
    fn estimate(&self, distance_km: Option<f64>) -> Option<Measurement> {
        let distance_km = distance_km?;
        Some(Measurement {
            distance_km,
            cost: self.fuel_cost(distance_km),
            co2_emission: self.co2_emission(distance_km),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LandCostModel {
    params: LandCostParams,
}

impl LandCostModel {
    pub fn new(params: LandCostParams) -> Self {
        Self { params }
    }

    pub fn fuel_needed_litres(&self, distance_km: f64) -> f64 {
        distance_km * self.params.fuel_consumption_l_per_100km / 100.0
    }
}

impl CostModel for LandCostModel {
    fn mode(&self) -> TransportMode {
        TransportMode::Land
    }

    fn fuel_cost(&self, distance_km: f64) -> f64 {
        self.fuel_needed_litres(distance_km) * self.params.fuel_cost_per_litre
    }

    fn co2_emission(&self, distance_km: f64) -> f64 {
        distance_km * LAND_CARGO_WEIGHT_TONNES * self.params.co2_per_tonne_km
    }
}

/// 海運估算與貨重無關
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaCostModel {
    params: SeaCostParams,
}

impl SeaCostModel {
    pub fn new(params: SeaCostParams) -> Self {
        Self { params }
    }
}

impl CostModel for SeaCostModel {
    fn mode(&self) -> TransportMode {
        TransportMode::Sea
    }

    fn fuel_cost(&self, distance_km: f64) -> f64 {
        distance_km * self.params.cost_per_km
    }

    fn co2_emission(&self, distance_km: f64) -> f64 {
        distance_km * self.params.co2_per_km
    }
}
