use sysinfo::System;

use super::collector::{CollectorError, MetricCollector, ensure_supported};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryInfo {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub free: u64,
    pub used_percent: f64,
}

impl MemoryInfo {
    pub fn from_counts(total: u64, used: u64, available: u64, free: u64) -> Self {
        MemoryInfo {
            total,
            used,
            available,
            free,
            used_percent: percent_of(used, total),
        }
    }
}

pub(crate) fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

pub struct MemoryCollector;

impl MetricCollector for MemoryCollector {
    type Output = MemoryInfo;

    fn name(&self) -> &'static str {
        "memory"
    }

    fn collect(&self) -> Result<MemoryInfo, CollectorError> {
        ensure_supported()?;

        let mut sys = System::new();
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(CollectorError::unavailable("total memory reported as zero"));
        }

        Ok(MemoryInfo::from_counts(
            total,
            sys.used_memory(),
            sys.available_memory(),
            sys.free_memory(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn used_percent_is_derived() {
        let info = MemoryInfo::from_counts(17_179_869_184, 8_589_934_592, 8_589_934_592, 4_294_967_296);
        assert!((info.used_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_total_gives_zero_percent() {
        assert_eq!(percent_of(10, 0), 0.0);
    }

    #[test]
    fn collects_on_supported_hosts() {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return;
        }
        let info = MemoryCollector.collect().expect("memory collector failed");
        assert!(info.total > 0);
        assert!(info.used <= info.total);
    }
}
