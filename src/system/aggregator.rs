use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use super::collector::{CollectorError, MetricCollector};
use super::cpu::{CpuCollector, CpuInfo};
use super::disk::{DiskCollector, DiskInfo};
use super::memory::{MemoryCollector, MemoryInfo};
use super::network::{NetworkCollector, NetworkInterfaceInfo};
use super::process::{ProcessCollector, ProcessInfo};
use super::snapshot::{Collected, Snapshot};

pub type SharedCollector<T> = Arc<dyn MetricCollector<Output = T>>;

/// Runs the five collectors and assembles a [`Snapshot`].
///
/// Collectors run concurrently on the blocking pool. A failure, panic or
/// missed deadline in one of them only degrades that slot.
pub struct Aggregator {
    pub cpu: SharedCollector<CpuInfo>,
    pub memory: SharedCollector<MemoryInfo>,
    pub disks: SharedCollector<Vec<DiskInfo>>,
    pub networks: SharedCollector<Vec<NetworkInterfaceInfo>>,
    pub processes: SharedCollector<Vec<ProcessInfo>>,
    /// Per-collector deadline. `None` waits for every collector.
    pub deadline: Option<Duration>,
}

impl Aggregator {
    /// Aggregator over the host's real subsystems.
    pub fn system(sample_interval: Duration, deadline: Option<Duration>) -> Self {
        Aggregator {
            cpu: Arc::new(CpuCollector::new(sample_interval)),
            memory: Arc::new(MemoryCollector),
            disks: Arc::new(DiskCollector),
            networks: Arc::new(NetworkCollector),
            processes: Arc::new(ProcessCollector),
            deadline,
        }
    }

    pub async fn aggregate(&self) -> Snapshot {
        let span = tracing::debug_span!("aggregate");
        async {
            let (cpu, memory, disks, networks, processes) = tokio::join!(
                run_collector(self.cpu.clone(), self.deadline),
                run_collector(self.memory.clone(), self.deadline),
                run_collector(self.disks.clone(), self.deadline),
                run_collector(self.networks.clone(), self.deadline),
                run_collector(self.processes.clone(), self.deadline),
            );

            Snapshot {
                cpu,
                memory,
                disks,
                networks,
                processes,
            }
        }
        .instrument(span)
        .await
    }
}

async fn run_collector<T>(collector: SharedCollector<T>, deadline: Option<Duration>) -> Collected<T>
where
    T: Default + Send + 'static,
{
    let name = collector.name();
    let task = tokio::task::spawn_blocking(move || {
        let _span = tracing::debug_span!("collector.collect", collector = name).entered();
        collector.collect()
    });

    let joined = match deadline {
        Some(limit) => match tokio::time::timeout(limit, task).await {
            Ok(joined) => joined,
            // The blocking task keeps running detached; its result is discarded
            Err(_) => Ok(Err(CollectorError::TimedOut(limit))),
        },
        None => task.await,
    };

    let result = joined.unwrap_or_else(|err| {
        tracing::error!(collector = name, error = %err, "collector task failed");
        Err(CollectorError::Panicked)
    });

    if let Err(ref err) = result {
        tracing::warn!(collector = name, error = %err, "collector unavailable, using placeholder");
    }
    Collected::from_result(result)
}
