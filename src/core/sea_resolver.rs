use crate::core::{DistanceResolver, Resolution};
use crate::domain::geo::haversine_km;
use crate::domain::model::{Coordinates, TransportMode};

/// 海運距離直接以大圓距離估算，不會失敗；座標在載入目錄時已驗證
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaDistanceResolver;

impl SeaDistanceResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl DistanceResolver for SeaDistanceResolver {
    fn mode(&self) -> TransportMode {
        TransportMode::Sea
    }

    async fn resolve(&self, origin: &Coordinates, destination: &Coordinates) -> Resolution {
        Resolution::Resolved(haversine_km(origin, destination))
    }
}
