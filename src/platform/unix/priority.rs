//! Unix process priority via niceness

use crate::models::ProcessPriority;
use crate::platform::traits::{PriorityError, PriorityOps};

pub struct UnixPriority;

impl UnixPriority {
    pub fn new() -> Self {
        Self
    }

    /// Niceness for each priority; negative values need privileges
    pub fn niceness(priority: ProcessPriority) -> libc::c_int {
        match priority {
            ProcessPriority::High => -10,
            ProcessPriority::AboveNormal => -5,
            ProcessPriority::Normal => 0,
            ProcessPriority::BelowNormal => 5,
            ProcessPriority::Idle => 19,
        }
    }
}

impl PriorityOps for UnixPriority {
    fn set_priority(&self, pid: u32, priority: ProcessPriority) -> Result<(), PriorityError> {
        let nice = Self::niceness(priority);
        // SAFETY: setpriority takes plain integers and touches no memory we own
        let rc = unsafe { libc::setpriority(libc::PRIO_PROCESS, pid as libc::id_t, nice) };
        if rc != 0 {
            return Err(PriorityError::SetFailed {
                pid,
                source: std::io::Error::last_os_error(),
            });
        }
        debug!("Set niceness of process {} to {}", pid, nice);
        Ok(())
    }
}
