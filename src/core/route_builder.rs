use crate::core::{DistanceResolver, Resolution};
use crate::domain::cost::CostModel;
use crate::domain::model::{Port, PortPair, RouteFailure, RouteRecord, RouteSet};
use crate::domain::pairs::cross_country_pairs;
use crate::utils::error::{RouteError, Result};
use futures::stream::{self, StreamExt};
use futures::FutureExt;

/// 將配對、距離解析與成本估算串成單一運輸模式的路線集合。
///
/// 最多同時送出 `concurrency` 個解析請求，結果仍依配對產生順序組裝。
/// 單一配對失敗只會記錄診斷，不會中斷批次。
pub struct RouteSetBuilder<R: DistanceResolver, M: CostModel> {
    resolver: R,
    model: M,
    concurrency: usize,
}

impl<R: DistanceResolver, M: CostModel> RouteSetBuilder<R, M> {
    pub fn new(resolver: R, model: M) -> Result<Self> {
        if resolver.mode() != model.mode() {
            return Err(RouteError::ConfigError {
                message: format!(
                    "{} resolver cannot be combined with {} cost model",
                    resolver.mode(),
                    model.mode()
                ),
            });
        }

        Ok(Self {
            resolver,
            model,
            concurrency: 1,
        })
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn build(&self, ports: &[Port]) -> RouteSet {
        let mode = self.resolver.mode();
        tracing::info!(
            "🧭 Resolving {} routes ({} concurrent)",
            mode,
            self.concurrency
        );

        // 不經由 map 閉包建立 future，否則在 async_trait 內無法證明 Send
        let mut pending = Vec::new();
        for pair in cross_country_pairs(ports) {
            let resolver = &self.resolver;
            pending.push(
                async move {
                    let resolution = resolver
                        .resolve(&pair.origin.coordinates, &pair.destination.coordinates)
                        .await;
                    (pair, resolution)
                }
                .boxed(),
            );
        }

        let outcomes: Vec<(PortPair<'_>, Resolution)> = stream::iter(pending)
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut set = RouteSet::new(mode);
        for (pair, resolution) in outcomes {
            self.append(&mut set, &pair, resolution);
        }

        tracing::info!(
            "📊 {} routes: {} resolved, {} without route, {} failed",
            mode,
            set.resolved_count(),
            set.no_route_count(),
            set.failure_count()
        );

        set
    }

    fn append(&self, set: &mut RouteSet, pair: &PortPair<'_>, resolution: Resolution) {
        match resolution {
            Resolution::Resolved(distance_km) => {
                let measurement = self.model.estimate(Some(distance_km));
                set.records.push(RouteRecord::new(pair, set.mode, measurement));
            }
            Resolution::NoRoute => {
                tracing::debug!(
                    "No {} route between {} and {}",
                    set.mode,
                    pair.origin.unlocode,
                    pair.destination.unlocode
                );
                set.records
                    .push(RouteRecord::new(pair, set.mode, self.model.estimate(None)));
            }
            Resolution::Failed(e) => {
                tracing::warn!(
                    "⚠️ Failed to resolve {} route {} ({}) -> {} ({}): {}",
                    set.mode,
                    pair.origin.unlocode,
                    pair.origin.name,
                    pair.destination.unlocode,
                    pair.destination.name,
                    e
                );
                set.failures.push(RouteFailure {
                    origin: pair.origin.unlocode.clone(),
                    destination: pair.destination.unlocode.clone(),
                    mode: set.mode,
                    reason: e.to_string(),
                });
            }
        }
    }
}
