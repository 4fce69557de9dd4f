use proptest::prelude::*;
use sysnap::format::format_bytes;
use sysnap::rank::{RankKey, select_top};
use sysnap::system::process::ProcessInfo;

fn make_processes(entries: &[(u32, u8, u8)]) -> Vec<ProcessInfo> {
    entries
        .iter()
        .map(|&(pid, mem, cpu)| ProcessInfo {
            pid,
            name: format!("p{pid}"),
            // coarse values so ties are common
            memory_percent: f64::from(mem % 20) * 2.5,
            cpu_percent: f64::from(cpu % 10) * 10.0,
        })
        .collect()
}

fn full_sort(processes: &[ProcessInfo], n: usize, key: RankKey) -> Vec<u32> {
    let mut sorted: Vec<&ProcessInfo> = processes.iter().collect();
    sorted.sort_by(|a, b| {
        key.value(b)
            .total_cmp(&key.value(a))
            .then(a.pid.cmp(&b.pid))
    });
    sorted.into_iter().take(n).map(|p| p.pid).collect()
}

fn pids(ranked: &[&ProcessInfo]) -> Vec<u32> {
    ranked.iter().map(|p| p.pid).collect()
}

fn unit_of(formatted: &str) -> &str {
    formatted.rsplit(' ').next().unwrap_or("")
}

fn value_of(formatted: &str) -> f64 {
    formatted.split(' ').next().unwrap_or("0").parse().unwrap()
}

proptest! {
    #[test]
    fn length_is_min_of_n_and_count(
        entries in prop::collection::vec((any::<u32>(), any::<u8>(), any::<u8>()), 0..200),
        n in 0usize..250,
    ) {
        let processes = make_processes(&entries);
        let top = select_top(&processes, n, RankKey::Memory);
        prop_assert_eq!(top.len(), n.min(processes.len()));
    }

    #[test]
    fn adjacent_pairs_are_ordered(
        entries in prop::collection::btree_map(any::<u32>(), (any::<u8>(), any::<u8>()), 0..200),
        n in 0usize..250,
    ) {
        let entries: Vec<(u32, u8, u8)> = entries.into_iter().map(|(pid, (m, c))| (pid, m, c)).collect();
        let processes = make_processes(&entries);
        let top = select_top(&processes, n, RankKey::Memory);
        for pair in top.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.memory_percent >= b.memory_percent);
            if a.memory_percent == b.memory_percent {
                prop_assert!(a.pid < b.pid);
            }
        }
    }

    #[test]
    fn matches_full_sort(
        entries in prop::collection::btree_map(any::<u32>(), (any::<u8>(), any::<u8>()), 0..300),
        n in 0usize..50,
        by_cpu in any::<bool>(),
    ) {
        let entries: Vec<(u32, u8, u8)> = entries.into_iter().map(|(pid, (m, c))| (pid, m, c)).collect();
        let processes = make_processes(&entries);
        let key = if by_cpu { RankKey::Cpu } else { RankKey::Memory };
        prop_assert_eq!(pids(&select_top(&processes, n, key)), full_sort(&processes, n, key));
    }

    #[test]
    fn selection_is_idempotent(
        entries in prop::collection::vec((any::<u32>(), any::<u8>(), any::<u8>()), 0..200),
        n in 0usize..50,
    ) {
        let processes = make_processes(&entries);
        let first = pids(&select_top(&processes, n, RankKey::Cpu));
        let second = pids(&select_top(&processes, n, RankKey::Cpu));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn byte_tier_is_floor_log1024(bytes in any::<u64>()) {
        const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];
        let mut tier = 0;
        let mut n = bytes;
        while n >= 1024 {
            n /= 1024;
            tier += 1;
        }
        let formatted = format_bytes(bytes);
        prop_assert_eq!(unit_of(&formatted), UNITS[tier]);
    }

    #[test]
    fn bytes_monotonic_within_tier(a in any::<u64>(), b in any::<u64>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (lo_s, hi_s) = (format_bytes(lo), format_bytes(hi));
        if unit_of(&lo_s) == unit_of(&hi_s) {
            prop_assert!(value_of(&lo_s) <= value_of(&hi_s));
        }
    }
}

#[test]
fn tie_scenario_from_equal_memory() {
    let processes = vec![
        ProcessInfo { pid: 1, name: "a".into(), cpu_percent: 0.0, memory_percent: 50.0 },
        ProcessInfo { pid: 2, name: "b".into(), cpu_percent: 0.0, memory_percent: 50.0 },
        ProcessInfo { pid: 3, name: "c".into(), cpu_percent: 0.0, memory_percent: 10.0 },
    ];
    let top = select_top(&processes, 2, RankKey::Memory);
    assert_eq!(pids(&top), vec![1, 2]);
    assert!(top.iter().all(|p| p.memory_percent == 50.0));
}

#[test]
fn zero_n_on_non_empty_set() {
    let processes = make_processes(&[(1, 3, 3), (2, 4, 4)]);
    assert!(select_top(&processes, 0, RankKey::Memory).is_empty());
}
