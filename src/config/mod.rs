pub mod storage;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::TransportMode;
use crate::utils::error::{RouteError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_rate,
    validate_url,
};

#[cfg(feature = "cli")]
use crate::domain::cost::{LandCostParams, SeaCostParams};
#[cfg(feature = "cli")]
use crate::domain::model::OutputFormat;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.distancematrix.ai/maps/api/distancematrix/json";

/// 所有設定來源共用的檢查
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_path("ports_file", config.ports_file())?;
    validate_path("output_path", config.output_path())?;

    if config.modes().is_empty() {
        return Err(RouteError::ConfigValidationError {
            field: "modes".to_string(),
            message: "At least one transport mode must be enabled".to_string(),
        });
    }
    if config.output_formats().is_empty() {
        return Err(RouteError::ConfigValidationError {
            field: "output_formats".to_string(),
            message: "At least one output format must be selected".to_string(),
        });
    }

    // 只有陸運需要外部 API
    if config.modes().contains(&TransportMode::Land) {
        validate_url("api_endpoint", config.api_endpoint())?;
        validate_non_empty_string("api_key", config.api_key())?;
        if config.api_key().starts_with("${") {
            return Err(RouteError::MissingConfigError {
                field: "api_key".to_string(),
            });
        }
    }

    validate_positive_number("concurrent_requests", config.concurrent_requests(), 1)?;
    if config.request_timeout().is_zero() {
        return Err(RouteError::InvalidConfigValueError {
            field: "timeout_seconds".to_string(),
            value: "0".to_string(),
            reason: "Timeout must be at least 1 second".to_string(),
        });
    }

    let land = config.land_costs();
    validate_rate("land.fuel_cost_per_litre", land.fuel_cost_per_litre)?;
    validate_rate("land.fuel_consumption_l_per_100km", land.fuel_consumption_l_per_100km)?;
    validate_rate("land.co2_per_tonne_km", land.co2_per_tonne_km)?;

    let sea = config.sea_costs();
    validate_rate("sea.cost_per_km", sea.cost_per_km)?;
    validate_rate("sea.co2_per_km", sea.co2_per_km)?;

    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "port-routes")]
#[command(about = "Compute land and sea routes between ports in different countries")]
pub struct CliConfig {
    /// Port catalog (.json or .csv)
    #[arg(long, default_value = "data/ports.json")]
    pub ports: String,

    #[arg(long, default_value = "./data")]
    pub output_path: String,

    #[arg(long, env = "DISTANCE_API_URL", default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, env = "DISTANCE_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, value_enum, value_delimiter = ',', default_values = ["land", "sea"])]
    pub modes: Vec<TransportMode>,

    #[arg(long, value_enum, value_delimiter = ',', default_values = ["json"])]
    pub formats: Vec<OutputFormat>,

    /// Distance API requests in flight at once
    #[arg(long, default_value = "4")]
    pub concurrent_requests: usize,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, default_value_t = crate::domain::cost::DEFAULT_FUEL_COST_PER_LITRE)]
    pub fuel_cost_per_litre: f64,

    #[arg(long, default_value_t = crate::domain::cost::DEFAULT_FUEL_CONSUMPTION_L_PER_100KM)]
    pub fuel_consumption_l_per_100km: f64,

    #[arg(long, default_value_t = crate::domain::cost::DEFAULT_CO2_PER_TONNE_KM)]
    pub co2_per_tonne_km: f64,

    #[arg(long, default_value_t = crate::domain::cost::DEFAULT_SEA_COST_PER_KM)]
    pub sea_cost_per_km: f64,

    #[arg(long, default_value_t = crate::domain::cost::DEFAULT_SEA_CO2_PER_KM)]
    pub sea_co2_per_km: f64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn ports_file(&self) -> &str {
        &self.ports
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn modes(&self) -> &[TransportMode] {
        &self.modes
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    fn land_costs(&self) -> LandCostParams {
        LandCostParams {
            fuel_cost_per_litre: self.fuel_cost_per_litre,
            fuel_consumption_l_per_100km: self.fuel_consumption_l_per_100km,
            co2_per_tonne_km: self.co2_per_tonne_km,
        }
    }

    fn sea_costs(&self) -> SeaCostParams {
        SeaCostParams {
            cost_per_km: self.sea_cost_per_km,
            co2_per_km: self.sea_co2_per_km,
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
