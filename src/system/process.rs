use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

use super::collector::{CollectorError, MetricCollector, ensure_supported};
use super::memory::percent_of;

#[derive(Clone, Debug, PartialEq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

/// Raw per-process figures as the OS reports them.
#[derive(Clone, Debug)]
pub struct ProcessReading {
    pub pid: u32,
    pub name: String,
    pub memory_bytes: u64,
    pub total_memory: u64,
    pub cpu_time_ms: u64,
    pub run_time_secs: u64,
}

impl ProcessReading {
    /// `None` when the process cannot be described: no name, or no memory
    /// share because total memory is unknown.
    pub fn resolve(self) -> Option<ProcessInfo> {
        if self.name.is_empty() || self.total_memory == 0 {
            tracing::trace!(pid = self.pid, "dropping unresolvable process");
            return None;
        }

        // Lifetime average, not normalised by core count.
        let cpu_percent = if self.run_time_secs == 0 {
            0.0
        } else {
            self.cpu_time_ms as f64 / (self.run_time_secs as f64 * 1000.0) * 100.0
        };

        Some(ProcessInfo {
            pid: self.pid,
            name: self.name,
            cpu_percent,
            memory_percent: percent_of(self.memory_bytes, self.total_memory),
        })
    }
}

pub struct ProcessCollector;

impl MetricCollector for ProcessCollector {
    type Output = Vec<ProcessInfo>;

    fn name(&self) -> &'static str {
        "process"
    }

    fn collect(&self) -> Result<Vec<ProcessInfo>, CollectorError> {
        ensure_supported()?;

        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_memory()
                .with_cpu()
                .without_tasks(),
        );

        let total_memory = sys.total_memory();
        let mut processes: Vec<ProcessInfo> = sys
            .processes()
            .iter()
            // Linux threads show up as tasks; only thread-group leaders are processes
            .filter(|(_, process)| process.thread_kind().is_none())
            .filter_map(|(pid, process)| {
                ProcessReading {
                    pid: pid.as_u32(),
                    name: process.name().to_string_lossy().to_string(),
                    memory_bytes: process.memory(),
                    total_memory,
                    cpu_time_ms: process.accumulated_cpu_time(),
                    run_time_secs: process.run_time(),
                }
                .resolve()
            })
            .collect();

        processes.sort_unstable_by_key(|p| p.pid);
        Ok(processes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(pid: u32, name: &str) -> ProcessReading {
        ProcessReading {
            pid,
            name: name.to_string(),
            memory_bytes: 1024,
            total_memory: 4096,
            cpu_time_ms: 5_000,
            run_time_secs: 10,
        }
    }

    #[test]
    fn resolves_percentages() {
        let info = reading(42, "worker").resolve().unwrap();
        assert_eq!(info.pid, 42);
        assert!((info.memory_percent - 25.0).abs() < 1e-9);
        assert!((info.cpu_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn nameless_process_is_dropped() {
        assert!(reading(7, "").resolve().is_none());
    }

    #[test]
    fn unknown_total_memory_drops_process() {
        let mut r = reading(7, "worker");
        r.total_memory = 0;
        assert!(r.resolve().is_none());
    }

    #[test]
    fn fresh_process_has_zero_cpu() {
        let mut r = reading(7, "worker");
        r.run_time_secs = 0;
        assert_eq!(r.resolve().unwrap().cpu_percent, 0.0);
    }

    #[test]
    fn includes_current_process() {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return;
        }
        let processes = ProcessCollector.collect().expect("process collector failed");
        let me = std::process::id();
        assert!(processes.iter().any(|p| p.pid == me));
        assert!(processes.windows(2).all(|w| w[0].pid < w[1].pid));
    }

    #[test]
    fn threads_are_not_listed_as_processes() {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return;
        }
        let (ready_tx, ready_rx) = std::sync::mpsc::channel();
        let (stop_tx, stop_rx) = std::sync::mpsc::channel::<()>();
        let stop_rx = std::sync::Arc::new(std::sync::Mutex::new(stop_rx));

        let handles: Vec<_> = (0..3)
            .map(|i| {
                let ready_tx = ready_tx.clone();
                let stop_rx = stop_rx.clone();
                std::thread::Builder::new()
                    .name(format!("snapworker{i}"))
                    .spawn(move || {
                        ready_tx.send(()).unwrap();
                        let _ = stop_rx.lock().unwrap().recv();
                    })
                    .unwrap()
            })
            .collect();
        for _ in 0..3 {
            ready_rx.recv().unwrap();
        }

        let processes = ProcessCollector.collect().expect("process collector failed");

        drop(stop_tx);
        for handle in handles {
            handle.join().unwrap();
        }

        let threads: Vec<&ProcessInfo> = processes
            .iter()
            .filter(|p| p.name.starts_with("snapworker"))
            .collect();
        assert!(threads.is_empty(), "threads listed as processes: {threads:?}");

        let me = std::process::id();
        assert_eq!(processes.iter().filter(|p| p.pid == me).count(), 1);
    }
}
