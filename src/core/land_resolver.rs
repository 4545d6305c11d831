use crate::core::{ConfigProvider, DistanceResolver, Resolution};
use crate::domain::model::{Coordinates, TransportMode};
use crate::utils::error::ResolveError;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const STATUS_OK: &str = "OK";

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: Option<String>,
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: Option<String>,
    distance: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    text: Option<String>,
    value: Option<f64>,
}

/// 距離矩陣服務回傳的道路距離
#[derive(Debug, Clone, PartialEq)]
pub struct RoadDistance {
    pub meters: f64,
    pub text: Option<String>,
}

impl RoadDistance {
    pub fn kilometers(&self) -> f64 {
        self.meters / 1000.0
    }

    /// 日誌用：優先使用服務回傳的文字，否則以公尺表示
    pub fn describe(&self) -> String {
        match self.text.as_deref() {
            Some(text) => text.to_string(),
            None => format!("{} m", self.meters),
        }
    }
}

/// 解析 1x1 距離矩陣回應。
///
/// `Ok(None)` 代表服務找不到路線（元素層級狀態不是 OK）；頂層狀態錯誤
/// 與缺少欄位都回傳錯誤。
pub fn parse_matrix_response(body: &str) -> Result<Option<RoadDistance>, ResolveError> {
    let response: MatrixResponse = serde_json::from_str(body)
        .map_err(|e| ResolveError::MalformedResponse(format!("invalid JSON body: {}", e)))?;

    let status = response
        .status
        .ok_or_else(|| ResolveError::MalformedResponse("missing top-level status".to_string()))?;

    if status != STATUS_OK {
        return Err(match response.error_message {
            Some(message) => ResolveError::ServiceStatus(format!("{} ({})", status, message)),
            None => ResolveError::ServiceStatus(status),
        });
    }

    let element = response
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next())
        .ok_or_else(|| ResolveError::MalformedResponse("missing rows[0].elements[0]".to_string()))?;

    let element_status = element
        .status
        .ok_or_else(|| ResolveError::MalformedResponse("missing element status".to_string()))?;

    if element_status != STATUS_OK {
        tracing::debug!("No route reported by distance service: {}", element_status);
        return Ok(None);
    }

    let distance = element
        .distance
        .ok_or_else(|| ResolveError::MalformedResponse("missing element distance".to_string()))?;

    let meters = distance
        .value
        .ok_or_else(|| ResolveError::MalformedResponse("missing distance value".to_string()))?;

    if !meters.is_finite() || meters < 0.0 {
        return Err(ResolveError::MalformedResponse(format!(
            "invalid distance value {}",
            meters
        )));
    }

    Ok(Some(RoadDistance {
        meters,
        text: distance.text,
    }))
}

/// 透過外部距離矩陣 API 查詢道路距離
pub struct LandDistanceResolver {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl LandDistanceResolver {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            timeout,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.api_endpoint().to_string(),
            config.api_key().to_string(),
            config.request_timeout(),
        )
    }

    pub async fn lookup(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
    ) -> Result<Option<RoadDistance>, ResolveError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("origins", origin.to_query_value()),
                ("destinations", destination.to_query_value()),
                ("key", self.api_key.clone()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Distance API response status: {}", status);

        if !status.is_success() {
            return Err(ResolveError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        parse_matrix_response(&body)
    }
}

#[async_trait::async_trait]
impl DistanceResolver for LandDistanceResolver {
    fn mode(&self) -> TransportMode {
        TransportMode::Land
    }

    async fn resolve(&self, origin: &Coordinates, destination: &Coordinates) -> Resolution {
        match self.lookup(origin, destination).await {
            Ok(Some(distance)) => {
                tracing::debug!("🛣️ Road distance resolved: {}", distance.describe());
                Resolution::Resolved(distance.kilometers())
            }
            Ok(None) => Resolution::NoRoute,
            Err(e) => Resolution::Failed(e),
        }
    }
}
