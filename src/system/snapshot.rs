use super::collector::CollectorError;
use super::cpu::CpuInfo;
use super::disk::DiskInfo;
use super::memory::MemoryInfo;
use super::network::NetworkInterfaceInfo;
use super::process::ProcessInfo;

/// Outcome of one collector inside a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub enum Collected<T> {
    Ok(T),
    Degraded { placeholder: T, reason: String },
}

impl<T: Default> Collected<T> {
    pub fn from_result(result: Result<T, CollectorError>) -> Self {
        match result {
            Ok(value) => Collected::Ok(value),
            Err(err) => Collected::degraded(err.to_string()),
        }
    }

    pub fn degraded<S: Into<String>>(reason: S) -> Self {
        Collected::Degraded {
            placeholder: T::default(),
            reason: reason.into(),
        }
    }
}

impl<T> Collected<T> {
    /// The collected value, or the placeholder when degraded.
    pub fn value(&self) -> &T {
        match self {
            Collected::Ok(value) => value,
            Collected::Degraded { placeholder, .. } => placeholder,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Collected::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Collected::Ok(_) => None,
            Collected::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// One point-in-time capture of every monitored subsystem.
///
/// Built once by the aggregator and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub cpu: Collected<CpuInfo>,
    pub memory: Collected<MemoryInfo>,
    pub disks: Collected<Vec<DiskInfo>>,
    pub networks: Collected<Vec<NetworkInterfaceInfo>>,
    pub processes: Collected<Vec<ProcessInfo>>,
}
