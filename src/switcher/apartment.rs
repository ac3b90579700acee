//! Dedicated single-threaded apartment for the OS theme APIs.
//!
//! The theme manager objects are apartment bound: they must be created and
//! called on a thread that entered a single-threaded COM apartment, never on an
//! arbitrary worker. Every call is therefore run on a fresh, named thread and the
//! caller blocks until it finishes.

use std::any::Any;
use std::thread;

use crate::error::{Result, ThemeError};

/// Name given to apartment threads, visible in debuggers and panic messages.
pub const APARTMENT_THREAD_NAME: &str = "theme-apartment";

/// What: Run `f` on a dedicated apartment thread and wait for it.
///
/// Inputs:
/// - `f`: Work to run; may borrow from the caller.
///
/// Output:
/// - `Ok` with the closure's value once the thread finished.
/// - `Err(ThemeError::ThreadInterrupted)` if the thread could not be started or
///   did not run to completion.
///
/// Details:
/// - Synchronous from the caller's point of view.
/// - No cancellation: once started the closure always runs to its end.
pub fn run_in_apartment<T, F>(f: F) -> Result<T>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    thread::scope(|scope| {
        let handle = thread::Builder::new()
            .name(APARTMENT_THREAD_NAME.to_string())
            .spawn_scoped(scope, move || {
                let _apartment = ApartmentGuard::enter();
                f()
            })
            .map_err(|e| ThemeError::ThreadInterrupted(format!("spawn failed: {e}")))?;
        handle
            .join()
            .map_err(|payload| ThemeError::ThreadInterrupted(panic_message(payload.as_ref())))
    })
}

/// What: Extract a readable message from a thread panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "thread panicked".to_string()
    }
}

/// Keeps the current thread inside a single-threaded COM apartment while alive.
#[cfg(windows)]
struct ApartmentGuard {
    /// Whether `CoInitializeEx` succeeded and must be balanced.
    initialized: bool,
}

#[cfg(windows)]
impl ApartmentGuard {
    /// Enter a single-threaded apartment on the current thread.
    fn enter() -> Self {
        use windows_sys::Win32::System::Com::{COINIT_APARTMENTTHREADED, CoInitializeEx};
        // SAFETY: called once on a thread we own; balanced by `CoUninitialize` in `drop`.
        #[allow(clippy::cast_sign_loss)]
        let hr = unsafe { CoInitializeEx(std::ptr::null(), COINIT_APARTMENTTHREADED as u32) };
        if hr < 0 {
            tracing::warn!(hresult = hr, "CoInitializeEx failed on theme apartment thread");
        }
        Self {
            initialized: hr >= 0,
        }
    }
}

#[cfg(windows)]
impl Drop for ApartmentGuard {
    fn drop(&mut self) {
        if self.initialized {
            // SAFETY: paired with the successful `CoInitializeEx` in `enter`.
            unsafe { windows_sys::Win32::System::Com::CoUninitialize() };
        }
    }
}

/// No apartments outside Windows; the dedicated thread is kept for parity.
#[cfg(not(windows))]
struct ApartmentGuard;

#[cfg(not(windows))]
impl ApartmentGuard {
    /// No-op outside Windows.
    const fn enter() -> Self {
        Self
    }
}
