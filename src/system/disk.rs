use std::collections::HashSet;

use sysinfo::Disks;

use super::collector::{CollectorError, MetricCollector, ensure_supported};
use super::memory::percent_of;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiskInfo {
    pub device: String,
    pub mount_point: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub used_percent: f64,
}

/// Raw partition figures as the OS reports them.
#[derive(Clone, Debug)]
pub struct PartitionReading {
    pub device: String,
    pub mount_point: String,
    pub total: u64,
    pub available: u64,
}

/// Turn raw readings into disk entries.
///
/// A partition with no usable size (pseudo filesystems, vanished mounts) is
/// skipped, as is a second reading for a mount point already seen.
pub fn partitions_to_disks<I>(readings: I) -> Vec<DiskInfo>
where
    I: IntoIterator<Item = PartitionReading>,
{
    let mut seen = HashSet::new();
    let mut disks = Vec::new();

    for reading in readings {
        if reading.total == 0 {
            tracing::trace!(mount_point = %reading.mount_point, "skipping partition without usable size");
            continue;
        }
        if !seen.insert(reading.mount_point.clone()) {
            tracing::trace!(mount_point = %reading.mount_point, "skipping duplicate mount point");
            continue;
        }

        let free = reading.available.min(reading.total);
        let used = reading.total.saturating_sub(free);
        disks.push(DiskInfo {
            device: reading.device,
            mount_point: reading.mount_point,
            total: reading.total,
            used,
            free,
            used_percent: percent_of(used, reading.total),
        });
    }

    disks
}

pub struct DiskCollector;

impl MetricCollector for DiskCollector {
    type Output = Vec<DiskInfo>;

    fn name(&self) -> &'static str {
        "disk"
    }

    fn collect(&self) -> Result<Vec<DiskInfo>, CollectorError> {
        ensure_supported()?;

        let disks = Disks::new_with_refreshed_list();
        let readings = disks.list().iter().map(|disk| PartitionReading {
            device: disk.name().to_string_lossy().to_string(),
            mount_point: disk.mount_point().to_string_lossy().to_string(),
            total: disk.total_space(),
            available: disk.available_space(),
        });

        Ok(partitions_to_disks(readings))
    }
}
