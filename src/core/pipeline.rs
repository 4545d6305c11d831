use crate::core::catalog::load_catalog;
use crate::core::land_resolver::LandDistanceResolver;
use crate::core::route_builder::RouteSetBuilder;
use crate::core::sea_resolver::SeaDistanceResolver;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::cost::{LandCostModel, SeaCostModel};
use crate::domain::model::{OutputFormat, Port, RouteFailure, RouteRecord, RouteSet, TransportMode};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct FailureReport<'a> {
    mode: TransportMode,
    generated_at: String,
    failure_count: usize,
    failures: &'a [RouteFailure],
}

pub fn render_json(records: &[RouteRecord]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

pub fn render_csv(records: &[RouteRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| e.into_error().into())
}

/// 讀取港口目錄、計算各模式路線並寫出結果
pub struct RoutePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> RoutePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, file_name: &str) -> String {
        format!("{}/{}", self.config.output_path().trim_end_matches('/'), file_name)
    }

    async fn build_mode(&self, mode: TransportMode, ports: &[Port]) -> Result<RouteSet> {
        let set = match mode {
            TransportMode::Land => {
                RouteSetBuilder::new(
                    LandDistanceResolver::from_config(&self.config),
                    LandCostModel::new(self.config.land_costs()),
                )?
                .with_concurrency(self.config.concurrent_requests())
                .build(ports)
                .await
            }
            TransportMode::Sea => {
                RouteSetBuilder::new(
                    SeaDistanceResolver::new(),
                    SeaCostModel::new(self.config.sea_costs()),
                )?
                .build(ports)
                .await
            }
        };
        Ok(set)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RoutePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Port>> {
        load_catalog(&self.storage, self.config.ports_file()).await
    }

    async fn transform(&self, ports: Vec<Port>) -> Result<Vec<RouteSet>> {
        let mut sets = Vec::with_capacity(self.config.modes().len());
        for &mode in self.config.modes() {
            sets.push(self.build_mode(mode, &ports).await?);
        }
        Ok(sets)
    }

    async fn load(&self, sets: &[RouteSet]) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for set in sets {
            for format in self.config.output_formats() {
                let data = match format {
                    OutputFormat::Json => render_json(&set.records)?,
                    OutputFormat::Csv => render_csv(&set.records)?,
                };
                let path = self.output_file(&format!("{}_routes.{}", set.mode, format.extension()));

                tracing::debug!("Writing {} records ({} bytes) to {}", set.records.len(), data.len(), path);
                self.storage.write_file(&path, &data).await?;
                written.push(path);
            }

            if !set.failures.is_empty() {
                let report = FailureReport {
                    mode: set.mode,
                    generated_at: chrono::Utc::now().to_rfc3339(),
                    failure_count: set.failures.len(),
                    failures: &set.failures,
                };
                let path = self.output_file(&format!("{}_route_failures.json", set.mode));
                self.storage
                    .write_file(&path, &serde_json::to_vec_pretty(&report)?)
                    .await?;
                written.push(path);
            }
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cost::{LandCostParams, SeaCostParams};
    use crate::domain::model::{Coordinates, Measurement};
    use crate::utils::error::RouteError;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                RouteError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        api_endpoint: String,
        modes: Vec<TransportMode>,
        formats: Vec<OutputFormat>,
    }

    impl MockConfig {
        fn new(api_endpoint: String, modes: Vec<TransportMode>) -> Self {
            Self {
                api_endpoint,
                modes,
                formats: vec![OutputFormat::Json],
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn api_key(&self) -> &str {
            "test-key"
        }

        fn ports_file(&self) -> &str {
            "data/ports.json"
        }

        fn output_path(&self) -> &str {
            "out/"
        }

        fn concurrent_requests(&self) -> usize {
            2
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(5)
        }

        fn modes(&self) -> &[TransportMode] {
            &self.modes
        }

        fn output_formats(&self) -> &[OutputFormat] {
            &self.formats
        }

        fn land_costs(&self) -> LandCostParams {
            LandCostParams::default()
        }

        fn sea_costs(&self) -> SeaCostParams {
            SeaCostParams::default()
        }
    }

    const CATALOG: &str = r#"[
        {"UNLOCODE": "SGSIN", "port_name": "Singapore", "country": "SG",
         "coordinates": {"latitude": 1.29, "longitude": 103.85}},
        {"UNLOCODE": "MYJHB", "port_name": "Johor", "country": "MY",
         "coordinates": {"latitude": 1.35, "longitude": 103.82}}
    ]"#;

    fn sample_records() -> Vec<RouteRecord> {
        vec![
            RouteRecord {
                origin: "SGSIN".to_string(),
                destination: "MYJHB".to_string(),
                mode: TransportMode::Land,
                measurement: Some(Measurement {
                    distance_km: 10.0,
                    cost: 8.26,
                    co2_emission: 21.0,
                }),
            },
            RouteRecord {
                origin: "SGSIN".to_string(),
                destination: "IDBTH".to_string(),
                mode: TransportMode::Land,
                measurement: None,
            },
        ]
    }

    #[test]
    fn test_render_csv_leaves_null_cells_empty() {
        let csv = String::from_utf8(render_csv(&sample_records()).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "location1,location2,distance,cost,co2_emission,mode");
        assert_eq!(lines[1], "SGSIN,MYJHB,10.0,8.26,21.0,land");
        assert_eq!(lines[2], "SGSIN,IDBTH,,,,land");
    }

    #[test]
    fn test_render_json_array() {
        let json = render_json(&sample_records()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[1]["distance"].is_null());
    }

    #[tokio::test]
    async fn test_extract_missing_catalog_is_fatal() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://test.com".to_string(), vec![TransportMode::Sea]);
        let pipeline = RoutePipeline::new(storage, config);

        assert!(matches!(pipeline.extract().await, Err(RouteError::IoError(_))));
    }

    #[tokio::test]
    async fn test_sea_pipeline_writes_routes() {
        let storage = MockStorage::new();
        storage.put("data/ports.json", CATALOG).await;
        let config = MockConfig::new("http://test.com".to_string(), vec![TransportMode::Sea]);
        let pipeline = RoutePipeline::new(storage.clone(), config);

        let ports = pipeline.extract().await.unwrap();
        let sets = pipeline.transform(ports).await.unwrap();
        let written = pipeline.load(&sets).await.unwrap();

        assert_eq!(written, vec!["out/sea_routes.json".to_string()]);

        let data = storage.get_file("out/sea_routes.json").await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&data).unwrap();
        let record = &value[0];
        let distance = record["distance"].as_f64().unwrap();
        let expected = crate::domain::geo::haversine_km(
            &Coordinates::new(1.29, 103.85),
            &Coordinates::new(1.35, 103.82),
        );
        assert!((distance - expected).abs() <= expected * 1e-6);
        assert_eq!(record["location1"], "SGSIN");
        assert_eq!(record["location2"], "MYJHB");
    }

    #[tokio::test]
    async fn test_concurrent_land_transform_keeps_generation_order() {
        let catalog = r#"[
            {"UNLOCODE": "AAONE", "port_name": "A", "country": "AA",
             "coordinates": {"latitude": 1.0, "longitude": 1.0}},
            {"UNLOCODE": "BBONE", "port_name": "B", "country": "BB",
             "coordinates": {"latitude": 2.0, "longitude": 2.0}},
            {"UNLOCODE": "CCONE", "port_name": "C", "country": "CC",
             "coordinates": {"latitude": 3.0, "longitude": 3.0}},
            {"UNLOCODE": "DDONE", "port_name": "D", "country": "DD",
             "coordinates": {"latitude": 4.0, "longitude": 4.0}}
        ]"#;

        let server = MockServer::start();
        let to_b = server.mock(|when, then| {
            when.method(GET).path("/matrix").query_param("destinations", "2,2");
            then.status(200)
                .delay(Duration::from_millis(50))
                .json_body(serde_json::json!({
                    "status": "OK",
                    "rows": [{"elements": [{"status": "OK", "distance": {"text": "100 km", "value": 100000}}]}]
                }));
        });
        let to_c = server.mock(|when, then| {
            when.method(GET).path("/matrix").query_param("destinations", "3,3");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "rows": [{"elements": [{"status": "NOT_FOUND"}]}]
            }));
        });
        let to_d = server.mock(|when, then| {
            when.method(GET).path("/matrix").query_param("destinations", "4,4");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "rows": [{"elements": [{"status": "OK", "distance": {"text": "300 km", "value": 300000}}]}]
            }));
        });

        let storage = MockStorage::new();
        storage.put("data/ports.json", catalog).await;
        let config = MockConfig::new(server.url("/matrix"), vec![TransportMode::Land]);
        assert!(config.concurrent_requests() > 1);
        let pipeline = RoutePipeline::new(storage, config);

        let ports = pipeline.extract().await.unwrap();
        let sets = pipeline.transform(ports).await.unwrap();

        to_b.assert_hits(1);
        to_c.assert_hits(2);
        to_d.assert_hits(3);

        let set = &sets[0];
        assert_eq!(set.mode, TransportMode::Land);
        assert!(set.failures.is_empty());

        let observed: Vec<(&str, &str, Option<f64>)> = set
            .records
            .iter()
            .map(|r| (r.origin.as_str(), r.destination.as_str(), r.distance()))
            .collect();
        assert_eq!(
            observed,
            vec![
                ("AAONE", "BBONE", Some(100.0)),
                ("AAONE", "CCONE", None),
                ("AAONE", "DDONE", Some(300.0)),
                ("BBONE", "CCONE", None),
                ("BBONE", "DDONE", Some(300.0)),
                ("CCONE", "DDONE", Some(300.0)),
            ]
        );
        for record in &set.records {
            assert_eq!(record.cost().is_some(), record.distance().is_some());
            assert_eq!(record.co2_emission().is_some(), record.distance().is_some());
        }
    }

    #[tokio::test]
    async fn test_land_failure_report_written() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/matrix");
            then.status(200).json_body(serde_json::json!({
                "status": "OVER_QUERY_LIMIT",
                "rows": []
            }));
        });

        let storage = MockStorage::new();
        storage.put("data/ports.json", CATALOG).await;
        let config = MockConfig::new(server.url("/matrix"), vec![TransportMode::Land]);
        let pipeline = RoutePipeline::new(storage.clone(), config);

        let ports = pipeline.extract().await.unwrap();
        let sets = pipeline.transform(ports).await.unwrap();
        let written = pipeline.load(&sets).await.unwrap();

        api_mock.assert();
        assert_eq!(sets[0].records.len(), 0);
        assert_eq!(sets[0].failure_count(), 1);
        assert_eq!(
            written,
            vec![
                "out/land_routes.json".to_string(),
                "out/land_route_failures.json".to_string()
            ]
        );

        let report = storage.get_file("out/land_route_failures.json").await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&report).unwrap();
        assert_eq!(value["failure_count"], 1);
        assert_eq!(value["failures"][0]["origin"], "SGSIN");
        assert!(value["failures"][0]["reason"]
            .as_str()
            .unwrap()
            .contains("OVER_QUERY_LIMIT"));

        let routes = storage.get_file("out/land_routes.json").await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&routes).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 0);
    }
}
