use sysinfo::Networks;

use super::collector::{CollectorError, MetricCollector, ensure_supported};
use super::platform;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkInterfaceInfo {
    pub name: String,
    /// `addr/prefix` strings in the order the OS lists them.
    pub addresses: Vec<String>,
    pub is_up: bool,
}

impl NetworkInterfaceInfo {
    /// When the platform cannot say, an interface holding an address counts as up.
    pub fn new(name: String, addresses: Vec<String>, link_up: Option<bool>) -> Self {
        let is_up = link_up.unwrap_or(!addresses.is_empty());
        NetworkInterfaceInfo {
            name,
            addresses,
            is_up,
        }
    }
}

pub struct NetworkCollector;

impl MetricCollector for NetworkCollector {
    type Output = Vec<NetworkInterfaceInfo>;

    fn name(&self) -> &'static str {
        "network"
    }

    fn collect(&self) -> Result<Vec<NetworkInterfaceInfo>, CollectorError> {
        ensure_supported()?;

        let networks = Networks::new_with_refreshed_list();
        let mut interfaces: Vec<NetworkInterfaceInfo> = networks
            .iter()
            .map(|(name, data)| {
                let addresses = data
                    .ip_networks()
                    .iter()
                    .map(|net| format!("{}/{}", net.addr, net.prefix))
                    .collect();
                NetworkInterfaceInfo::new(name.clone(), addresses, platform::interface_is_up(name))
            })
            .collect();

        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(interfaces)
    }
}
