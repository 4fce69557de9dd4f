use std::thread;
use std::time::Duration;

use sysinfo::{CpuRefreshKind, MINIMUM_CPU_UPDATE_INTERVAL, RefreshKind, System};

use super::collector::{CollectorError, MetricCollector, ensure_supported};

#[derive(Clone, Debug, PartialEq)]
pub struct CpuInfo {
    /// Brand string of the first CPU; empty when the OS does not report one.
    pub model: String,
    /// `None` when the OS does not expose core topology.
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
    pub usage_percent: f32,
}

impl Default for CpuInfo {
    fn default() -> Self {
        CpuInfo {
            model: String::new(),
            physical_cores: None,
            logical_cores: 1,
            usage_percent: 0.0,
        }
    }
}

/// Samples global CPU usage over a fixed window.
///
/// This is the only collector that blocks: the calling thread sleeps for
/// `sample_interval` between the two refreshes sysinfo needs to compute usage.
pub struct CpuCollector {
    sample_interval: Duration,
}

impl CpuCollector {
    pub fn new(sample_interval: Duration) -> Self {
        CpuCollector {
            sample_interval: sample_interval.max(MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }
}

impl MetricCollector for CpuCollector {
    type Output = CpuInfo;

    fn name(&self) -> &'static str {
        "cpu"
    }

    fn collect(&self) -> Result<CpuInfo, CollectorError> {
        ensure_supported()?;

        let mut sys =
            System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()));
        if sys.cpus().is_empty() {
            return Err(CollectorError::unavailable("no CPUs reported"));
        }

        thread::sleep(self.sample_interval);
        sys.refresh_cpu_usage();

        let model = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .unwrap_or_default();

        Ok(CpuInfo {
            model,
            physical_cores: System::physical_core_count(),
            logical_cores: sys.cpus().len(),
            usage_percent: sys.global_cpu_usage(),
        })
    }
}
