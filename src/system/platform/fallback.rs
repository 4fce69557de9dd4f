use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn interface_is_up(_name: &str) -> Option<bool> {
        // No cheap link-state query here; callers infer from assigned addresses
        None
    }
}
