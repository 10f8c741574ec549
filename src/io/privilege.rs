use std::io;

/// Capability needed for raw port access (linux/capability.h).
pub const CAP_SYS_RAWIO: u32 = 17;

pub const PROC_SELF_STATUS: &str = "/proc/self/status";

/// Where the process status text comes from.
pub trait StatusSource {
    fn read_status(&self) -> io::Result<String>;
}

/// The running process's own status file.
pub struct ProcSelfStatus;

impl StatusSource for ProcSelfStatus {
    fn read_status(&self) -> io::Result<String> {
        std::fs::read_to_string(PROC_SELF_STATUS)
    }
}

/// Permitted capability mask from the `CapPrm:` line.
///
/// Only the first `CapPrm:` line is considered. A present but unparsable
/// value yields `None`, not a search for a later line.
pub fn permitted_capabilities(status: &str) -> Option<u64> {
    let line = status.lines().find(|line| line.contains("CapPrm:"))?;
    let value = line.split_whitespace().nth(1)?;
    u64::from_str_radix(value, 16).ok()
}

/// Advisory pre-flight check; the kernel still enforces access on open.
/// Anything unknown counts as "no privilege".
pub fn has_required_privilege(source: &impl StatusSource) -> bool {
    let status = match source.read_status() {
        Ok(status) => status,
        Err(e) => {
            log::debug!("process status unavailable: {}", e);
            return false;
        }
    };
    match permitted_capabilities(&status) {
        Some(mask) => mask & (1u64 << CAP_SYS_RAWIO) != 0,
        None => {
            log::debug!("no parsable CapPrm field in process status");
            false
        }
    }
}
