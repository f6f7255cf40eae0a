//! Windows process priority classes

use crate::models::ProcessPriority;
use crate::platform::priority_class;
use crate::platform::traits::{PriorityError, PriorityOps};

pub struct WindowsPriority;

impl WindowsPriority {
    pub fn new() -> Self {
        Self
    }
}

impl PriorityOps for WindowsPriority {
    fn set_priority(&self, pid: u32, priority: ProcessPriority) -> Result<(), PriorityError> {
        use windows_sys::Win32::Foundation::CloseHandle;
        use windows_sys::Win32::System::Threading::{
            OpenProcess, SetPriorityClass, PROCESS_SET_INFORMATION,
        };

        let class = priority_class(priority);
        // SAFETY: the handle is checked before use and closed on every path
        unsafe {
            let handle = OpenProcess(PROCESS_SET_INFORMATION, 0, pid);
            if handle.is_null() {
                return Err(PriorityError::OpenFailed {
                    pid,
                    source: std::io::Error::last_os_error(),
                });
            }

            let result = SetPriorityClass(handle, class);
            let error = std::io::Error::last_os_error();
            CloseHandle(handle);

            if result == 0 {
                return Err(PriorityError::SetFailed { pid, source: error });
            }
        }

        debug!("Set priority class of process {} to {:#x}", pid, class);
        Ok(())
    }
}
