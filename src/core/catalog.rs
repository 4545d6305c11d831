use crate::core::Storage;
use crate::domain::model::{Coordinates, Port};
use crate::utils::error::{RouteError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Csv,
}

impl CatalogFormat {
    /// 依副檔名判斷目錄格式
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(CatalogFormat::Json),
            Some("csv") => Ok(CatalogFormat::Csv),
            _ => Err(RouteError::InvalidConfigValueError {
                field: "ports_file".to_string(),
                value: path.to_string(),
                reason: "Port catalog must be a .json or .csv file".to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvPortRow {
    #[serde(rename = "UNLOCODE")]
    unlocode: String,
    port_name: String,
    country: String,
    latitude: f64,
    longitude: f64,
}

impl From<CsvPortRow> for Port {
    fn from(row: CsvPortRow) -> Self {
        Port {
            unlocode: row.unlocode,
            name: row.port_name,
            country: row.country,
            coordinates: Coordinates::new(row.latitude, row.longitude),
        }
    }
}

pub fn parse_catalog(data: &[u8], format: CatalogFormat) -> Result<Vec<Port>> {
    let ports: Vec<Port> = match format {
        CatalogFormat::Json => serde_json::from_slice(data)?,
        CatalogFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(data);
            let mut ports = Vec::new();
            for row in reader.deserialize::<CsvPortRow>() {
                ports.push(row?.into());
            }
            ports
        }
    };

    validate_catalog(&ports)?;
    Ok(ports)
}

/// 任何一個港口資料不合法都會讓整個批次失敗
pub fn validate_catalog(ports: &[Port]) -> Result<()> {
    for (index, port) in ports.iter().enumerate() {
        if port.unlocode.trim().is_empty() {
            return Err(RouteError::CatalogError {
                message: format!("port at index {} has an empty UNLOCODE", index),
            });
        }
        if port.country.trim().is_empty() {
            return Err(RouteError::CatalogError {
                message: format!("port {} has an empty country code", port.unlocode),
            });
        }
        if !port.coordinates.is_valid() {
            return Err(RouteError::CatalogError {
                message: format!(
                    "port {} has out-of-range coordinates ({}, {})",
                    port.unlocode, port.coordinates.latitude, port.coordinates.longitude
                ),
            });
        }
    }
    Ok(())
}

pub async fn load_catalog<S: Storage>(storage: &S, path: &str) -> Result<Vec<Port>> {
    let format = CatalogFormat::from_path(path)?;
    let data = storage.read_file(path).await?;
    let ports = parse_catalog(&data, format)?;

    tracing::info!("📥 Loaded {} ports from {}", ports.len(), path);
    Ok(ports)
}
