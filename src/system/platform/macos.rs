use std::ffi::CStr;

use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn interface_is_up(name: &str) -> Option<bool> {
        let mut addrs: *mut libc::ifaddrs = std::ptr::null_mut();
        if unsafe { libc::getifaddrs(&mut addrs) } != 0 {
            return None;
        }

        // getifaddrs yields one entry per address family; any of them carries the flags
        let mut state = None;
        let mut cursor = addrs;
        while !cursor.is_null() {
            let entry = unsafe { &*cursor };
            if !entry.ifa_name.is_null() {
                let entry_name = unsafe { CStr::from_ptr(entry.ifa_name) };
                if entry_name.to_bytes() == name.as_bytes() {
                    let up = entry.ifa_flags & (libc::IFF_UP as libc::c_uint) != 0;
                    state = Some(state.unwrap_or(false) || up);
                }
            }
            cursor = entry.ifa_next;
        }

        unsafe { libc::freeifaddrs(addrs) };
        state
    }
}
