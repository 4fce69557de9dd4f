use super::PlatformExtensions;

const IFF_UP: u32 = 0x1;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn interface_is_up(name: &str) -> Option<bool> {
        // Reject anything that could escape /sys/class/net
        if name.is_empty() || name.contains('/') || name == "." || name == ".." {
            return None;
        }
        let base = format!("/sys/class/net/{name}");
        let operstate = std::fs::read_to_string(format!("{base}/operstate")).ok()?;
        let flags = std::fs::read_to_string(format!("{base}/flags")).ok();
        link_state(&operstate, flags.as_deref())
    }
}

/// Loopback and some virtual devices report "unknown"; fall back to IFF_UP then.
fn link_state(operstate: &str, flags: Option<&str>) -> Option<bool> {
    match operstate.trim() {
        "up" => Some(true),
        "down" | "lowerlayerdown" | "notpresent" | "dormant" => Some(false),
        _ => {
            let flags = flags?.trim();
            let flags = flags.strip_prefix("0x").unwrap_or(flags);
            let bits = u32::from_str_radix(flags, 16).ok()?;
            Some(bits & IFF_UP != 0)
        }
    }
}
