pub trait PlatformExtensions {
    /// Administrative/link state of a network interface, when the OS exposes it.
    fn interface_is_up(name: &str) -> Option<bool>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
mod fallback;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
use fallback as platform_impl;

pub fn interface_is_up(name: &str) -> Option<bool> {
    platform_impl::Platform::interface_is_up(name)
}
