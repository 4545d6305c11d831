use crate::core::Pipeline;
use crate::domain::model::{RouteSet, TransportMode};
use crate::utils::error::Result;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct ModeSummary {
    pub mode: TransportMode,
    pub records: usize,
    pub no_route: usize,
    pub hard_failures: usize,
}

impl From<&RouteSet> for ModeSummary {
    fn from(set: &RouteSet) -> Self {
        Self {
            mode: set.mode,
            records: set.records.len(),
            no_route: set.no_route_count(),
            hard_failures: set.failure_count(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub ports: usize,
    pub modes: Vec<ModeSummary>,
    pub output_paths: Vec<String>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn hard_failures(&self) -> usize {
        self.modes.iter().map(|m| m.hard_failures).sum()
    }

    pub fn total_records(&self) -> usize {
        self.modes.iter().map(|m| m.records).sum()
    }
}

pub struct RouteEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RouteEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunReport> {
        let started = Instant::now();
        tracing::info!("🚀 Starting route computation");

        let ports = self.pipeline.extract().await?;
        let port_count = ports.len();

        let sets = self.pipeline.transform(ports).await?;
        let modes: Vec<ModeSummary> = sets.iter().map(ModeSummary::from).collect();

        let output_paths = self.pipeline.load(&sets).await?;
        for path in &output_paths {
            tracing::info!("📁 Wrote {}", path);
        }

        let report = RunReport {
            ports: port_count,
            modes,
            output_paths,
            elapsed: started.elapsed(),
        };

        if report.hard_failures() > 0 {
            tracing::warn!(
                "⚠️ {} route pairs failed to resolve and were excluded from output",
                report.hard_failures()
            );
        }
        tracing::info!(
            "✅ Computed {} routes from {} ports in {:?}",
            report.total_records(),
            report.ports,
            report.elapsed
        );

        Ok(report)
    }
}
