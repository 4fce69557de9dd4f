//! Top-N selection over the process list.
//!
//! Results are ordered by descending key with ascending pid breaking ties,
//! exactly as a full sort would order them. Selection keeps a bounded
//! min-heap of the best `n` candidates, so a pass costs O(P log n).

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use crate::system::process::ProcessInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankKey {
    #[default]
    Memory,
    Cpu,
}

impl RankKey {
    pub fn value(self, process: &ProcessInfo) -> f64 {
        match self {
            RankKey::Memory => process.memory_percent,
            RankKey::Cpu => process.cpu_percent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RankKey::Memory => "Memory",
            RankKey::Cpu => "CPU",
        }
    }
}

impl fmt::Display for RankKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RankKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(RankKey::Memory),
            "cpu" => Ok(RankKey::Cpu),
            other => Err(format!("unknown ranking key `{other}` (expected memory or cpu)")),
        }
    }
}

/// Heap entry. "Greater" means "ranks earlier".
struct Candidate<'a> {
    key: f64,
    process: &'a ProcessInfo,
}

impl Candidate<'_> {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.key
            .total_cmp(&other.key)
            .then_with(|| other.process.pid.cmp(&self.process.pid))
    }
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.rank_cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank_cmp(other)
    }
}

/// NaN ranks below every number and -0.0 ties with 0.0.
fn normalize_key(value: f64) -> f64 {
    if value.is_nan() {
        f64::NEG_INFINITY
    } else if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// The `n` processes with the greatest `key`, best first.
pub fn select_top_by<'a, F>(processes: &'a [ProcessInfo], n: usize, key: F) -> Vec<&'a ProcessInfo>
where
    F: Fn(&ProcessInfo) -> f64,
{
    if n == 0 || processes.is_empty() {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<Candidate<'a>>> = BinaryHeap::with_capacity(n.min(processes.len()) + 1);
    for process in processes {
        let candidate = Candidate {
            key: normalize_key(key(process)),
            process,
        };
        if heap.len() < n {
            heap.push(Reverse(candidate));
        } else if let Some(Reverse(worst)) = heap.peek()
            && candidate > *worst
        {
            heap.pop();
            heap.push(Reverse(candidate));
        }
    }

    // Ascending by Reverse is descending by rank.
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(candidate)| candidate.process)
        .collect()
}

pub fn select_top(processes: &[ProcessInfo], n: usize, key: RankKey) -> Vec<&ProcessInfo> {
    select_top_by(processes, n, |p| key.value(p))
}
