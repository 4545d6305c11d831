use crate::domain::cost::{LandCostParams, SeaCostParams};
use crate::domain::model::{Coordinates, OutputFormat, Port, RouteSet, TransportMode};
use crate::utils::error::{ResolveError, Result};
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn ports_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn concurrent_requests(&self) -> usize;
    fn request_timeout(&self) -> Duration;
    fn modes(&self) -> &[TransportMode];
    fn output_formats(&self) -> &[OutputFormat];
    fn land_costs(&self) -> LandCostParams;
    fn sea_costs(&self) -> SeaCostParams;
}

/// 單一組合的距離解析結果
#[derive(Debug)]
pub enum Resolution {
    /// 距離（公里）
    Resolved(f64),
    /// 服務正常回應但兩點之間沒有路線，記錄仍會輸出（欄位為 null）
    NoRoute,
    /// 硬失敗，該組合不會出現在輸出中
    Failed(ResolveError),
}

#[async_trait]
pub trait DistanceResolver: Send + Sync {
    fn mode(&self) -> TransportMode;
    async fn resolve(&self, origin: &Coordinates, destination: &Coordinates) -> Resolution;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Port>>;
    async fn transform(&self, ports: Vec<Port>) -> Result<Vec<RouteSet>>;
    async fn load(&self, sets: &[RouteSet]) -> Result<Vec<String>>;
}
