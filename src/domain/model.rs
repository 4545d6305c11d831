use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// 經緯度（度數）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// 距離矩陣 API 使用的 `lat,lon` 格式
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    #[serde(rename = "UNLOCODE")]
    pub unlocode: String,
    #[serde(rename = "port_name")]
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
}

/// 兩個不同國家港口的無序組合，origin 在目錄中排在 destination 之前
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortPair<'a> {
    pub index: usize,
    pub origin: &'a Port,
    pub destination: &'a Port,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Land,
    Sea,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Land => "land",
            TransportMode::Sea => "sea",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// 距離、成本與 CO2 排放，三者同時存在
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub distance_km: f64,
    pub cost: f64,
    pub co2_emission: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub origin: String,
    pub destination: String,
    pub mode: TransportMode,
    /// `None` 表示服務回報找不到路線
    pub measurement: Option<Measurement>,
}

impl RouteRecord {
    pub fn new(pair: &PortPair<'_>, mode: TransportMode, measurement: Option<Measurement>) -> Self {
        Self {
            origin: pair.origin.unlocode.clone(),
            destination: pair.destination.unlocode.clone(),
            mode,
            measurement,
        }
    }

    pub fn distance(&self) -> Option<f64> {
        self.measurement.map(|m| m.distance_km)
    }

    pub fn cost(&self) -> Option<f64> {
        self.measurement.map(|m| m.cost)
    }

    pub fn co2_emission(&self) -> Option<f64> {
        self.measurement.map(|m| m.co2_emission)
    }
}

// 手動序列化：找不到路線時三個欄位都輸出 null，而不是省略
impl Serialize for RouteRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RouteRecord", 6)?;
        state.serialize_field("location1", &self.origin)?;
        state.serialize_field("location2", &self.destination)?;
        state.serialize_field("distance", &self.distance())?;
        state.serialize_field("cost", &self.cost())?;
        state.serialize_field("co2_emission", &self.co2_emission())?;
        state.serialize_field("mode", &self.mode)?;
        state.end()
    }
}

/// 被排除在輸出之外的硬失敗
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteFailure {
    pub origin: String,
    pub destination: String,
    pub mode: TransportMode,
    pub reason: String,
}

/// 單一運輸模式的計算結果
#[derive(Debug, Clone)]
pub struct RouteSet {
    pub mode: TransportMode,
    pub records: Vec<RouteRecord>,
    pub failures: Vec<RouteFailure>,
}

impl RouteSet {
    pub fn new(mode: TransportMode) -> Self {
        Self {
            mode,
            records: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn resolved_count(&self) -> usize {
        self.records.iter().filter(|r| r.measurement.is_some()).count()
    }

    pub fn no_route_count(&self) -> usize {
        self.records.iter().filter(|r| r.measurement.is_none()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}
