pub mod text;

use serde::Serialize;

use crate::format::{format_bytes, format_percent, truncate_unicode};
use crate::rank::RankKey;
use crate::system::process::ProcessInfo;
use crate::system::snapshot::{Collected, Snapshot};

const NOT_AVAILABLE: &str = "N/A";

/// One table of the report: a header row plus body rows of display strings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Section {
    fn new(title: impl Into<String>, header: &[&str]) -> Self {
        Section {
            title: title.into(),
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            note: None,
        }
    }

    fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Degraded slots keep their header and carry the reason instead of rows.
    fn degrade_from<T>(mut self, slot: &Collected<T>) -> Self {
        if let Some(reason) = slot.reason() {
            self.rows.clear();
            self.note = Some(format!("unavailable: {reason}"));
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Requested top-N, used in the process section title.
    pub top: usize,
    pub rank_by: RankKey,
    pub max_name_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            top: 5,
            rank_by: RankKey::Memory,
            max_name_width: 32,
        }
    }
}

/// Build the report: CPU, Memory, Disk, Network, Top Processes, always in that order.
pub fn render(snapshot: &Snapshot, ranked: &[&ProcessInfo], options: &RenderOptions) -> Report {
    Report {
        sections: vec![
            cpu_section(snapshot),
            memory_section(snapshot),
            disk_section(snapshot),
            network_section(snapshot),
            process_section(snapshot, ranked, options),
        ],
    }
}

fn cpu_section(snapshot: &Snapshot) -> Section {
    let cpu = snapshot.cpu.value();
    let mut section = Section::new("CPU Information", &["Metric", "Value"]);
    let model = if cpu.model.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        cpu.model.clone()
    };
    let physical = cpu
        .physical_cores
        .map_or_else(|| NOT_AVAILABLE.to_string(), |n| n.to_string());
    section.push_row(["Model Name".to_string(), model]);
    section.push_row(["Physical Cores".to_string(), physical]);
    section.push_row(["Logical Cores".to_string(), cpu.logical_cores.to_string()]);
    section.push_row([
        "CPU Usage".to_string(),
        format_percent(f64::from(cpu.usage_percent)),
    ]);
    section.degrade_from(&snapshot.cpu)
}

fn memory_section(snapshot: &Snapshot) -> Section {
    let mem = snapshot.memory.value();
    let mut section = Section::new("Memory Information", &["Metric", "Value"]);
    section.push_row(["Total".to_string(), format_bytes(mem.total)]);
    section.push_row([
        "Used".to_string(),
        format!("{} ({})", format_bytes(mem.used), format_percent(mem.used_percent)),
    ]);
    section.push_row(["Available".to_string(), format_bytes(mem.available)]);
    section.push_row(["Free".to_string(), format_bytes(mem.free)]);
    section.degrade_from(&snapshot.memory)
}

fn disk_section(snapshot: &Snapshot) -> Section {
    let mut section = Section::new(
        "Disk Information",
        &["Device", "Mount Point", "Total", "Used", "Free", "Usage %"],
    );
    for disk in snapshot.disks.value() {
        section.push_row([
            disk.device.clone(),
            disk.mount_point.clone(),
            format_bytes(disk.total),
            format_bytes(disk.used),
            format_bytes(disk.free),
            format_percent(disk.used_percent),
        ]);
    }
    section.degrade_from(&snapshot.disks)
}

fn network_section(snapshot: &Snapshot) -> Section {
    let mut section = Section::new("Network Interfaces", &["Name", "IP Addresses", "Status"]);
    for iface in snapshot.networks.value() {
        let addresses = if iface.addresses.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            iface.addresses.join(", ")
        };
        let status = if iface.is_up { "UP" } else { "DOWN" };
        section.push_row([iface.name.clone(), addresses, status.to_string()]);
    }
    section.degrade_from(&snapshot.networks)
}

fn process_section(snapshot: &Snapshot, ranked: &[&ProcessInfo], options: &RenderOptions) -> Section {
    let title = format!("Top {} Processes by {}", options.top, options.rank_by);
    let mut section = Section::new(title, &["PID", "Name", "CPU %", "Memory %"]);
    for process in ranked {
        section.push_row([
            process.pid.to_string(),
            truncate_unicode(&process.name, options.max_name_width),
            format_percent(process.cpu_percent),
            format_percent(process.memory_percent),
        ]);
    }
    section.degrade_from(&snapshot.processes)
}
