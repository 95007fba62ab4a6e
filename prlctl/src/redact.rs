//! Scrubbing credentials out of the process argument vector.
//!
//! Once a password has been copied into the parameter record, the bytes
//! that carried it on the command line are zero-filled so they stop
//! showing up in `ps` output. Whether that is possible depends on the
//! host: [`ProcessArgv`] does it on glibc Linux, [`NoRedact`] is the
//! capability for everything else, and [`ArgBuffer`] keeps an in-memory
//! copy for callers that want to observe the effect.

use std::cell::RefCell;
use std::rc::Rc;

use cmdopt::ArgSlot;

pub trait ArgRedactor {
    /// Zero-fill the bytes described by `slot`. Repeating a request must
    /// leave the argument in the same state as doing it once.
    fn redact(&mut self, slot: ArgSlot);
}

/// Host without an externally visible argument vector.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRedact;

impl ArgRedactor for NoRedact {
    fn redact(&mut self, _slot: ArgSlot) {}
}

// ============================================================================
// ArgBuffer
// ============================================================================

/// Owned copy of an argument vector. Clones share the same bytes.
#[derive(Debug, Clone, Default)]
pub struct ArgBuffer {
    args: Rc<RefCell<Vec<Vec<u8>>>>,
}

impl ArgBuffer {
    pub fn new(args: &[String]) -> Self {
        ArgBuffer {
            args: Rc::new(RefCell::new(
                args.iter().map(|a| a.as_bytes().to_vec()).collect(),
            )),
        }
    }

    pub fn get(&self, index: usize) -> Option<Vec<u8>> {
        self.args.borrow().get(index).cloned()
    }

    /// Argument text with zeroed bytes shown as `*`.
    pub fn display(&self, index: usize) -> Option<String> {
        self.get(index).map(|bytes| {
            bytes
                .iter()
                .map(|&b| if b == 0 { '*' } else { b as char })
                .collect()
        })
    }
}

impl ArgRedactor for ArgBuffer {
    fn redact(&mut self, slot: ArgSlot) {
        let mut args = self.args.borrow_mut();
        if let Some(arg) = args.get_mut(slot.index) {
            let end = slot.end.min(arg.len());
            if slot.start < end {
                zeroize::Zeroize::zeroize(&mut arg[slot.start..end]);
            }
        }
    }
}

// ============================================================================
// ProcessArgv
// ============================================================================

#[cfg(all(target_os = "linux", target_env = "gnu"))]
mod native {
    use std::ffi::{c_char, c_int, CStr};
    use std::sync::atomic::{AtomicIsize, AtomicPtr, Ordering};

    static ARGC: AtomicIsize = AtomicIsize::new(0);
    static ARGV: AtomicPtr<*mut c_char> = AtomicPtr::new(std::ptr::null_mut());

    // glibc hands (argc, argv, envp) to every .init_array entry.
    extern "C" fn capture(argc: c_int, argv: *mut *mut c_char, _envp: *mut *mut c_char) {
        ARGC.store(argc as isize, Ordering::Relaxed);
        ARGV.store(argv, Ordering::Relaxed);
    }

    #[used]
    #[link_section = ".init_array"]
    static CAPTURE: extern "C" fn(c_int, *mut *mut c_char, *mut *mut c_char) = capture;

    pub struct Native {
        argv: *mut *mut c_char,
        lens: Vec<usize>,
    }

    impl Native {
        pub fn attach() -> Option<Native> {
            // Keep the .init_array entry linked in.
            std::hint::black_box(&CAPTURE);
            let argv = ARGV.load(Ordering::Relaxed);
            let argc = ARGC.load(Ordering::Relaxed);
            if argv.is_null() || argc <= 0 {
                return None;
            }
            let mut lens = Vec::with_capacity(argc as usize);
            for i in 0..argc as usize {
                // SAFETY: argv holds argc valid C strings for the life of
                // the process.
                let len = unsafe {
                    let p = *argv.add(i);
                    if p.is_null() {
                        0
                    } else {
                        CStr::from_ptr(p).to_bytes().len()
                    }
                };
                lens.push(len);
            }
            Some(Native { argv, lens })
        }

        pub fn zero(&mut self, index: usize, start: usize, end: usize) {
            let len = match self.lens.get(index) {
                Some(&len) => len,
                None => return,
            };
            let end = end.min(len);
            if start >= end {
                return;
            }
            // SAFETY: index < argc and start..end lies inside the original
            // string, whose length was recorded before any byte was zeroed.
            unsafe {
                let p = *self.argv.add(index) as *mut u8;
                if !p.is_null() {
                    std::ptr::write_bytes(p.add(start), 0, end - start);
                }
            }
        }
    }
}

/// The real process argument vector, where the platform exposes it.
pub struct ProcessArgv {
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    native: Option<native::Native>,
}

impl ProcessArgv {
    pub fn attach() -> Self {
        #[cfg(all(target_os = "linux", target_env = "gnu"))]
        {
            let native = native::Native::attach();
            if native.is_none() {
                log::debug!("process argument vector not captured; redaction disabled");
            }
            ProcessArgv { native }
        }
        #[cfg(not(all(target_os = "linux", target_env = "gnu")))]
        {
            ProcessArgv {}
        }
    }

    pub fn is_active(&self) -> bool {
        #[cfg(all(target_os = "linux", target_env = "gnu"))]
        {
            self.native.is_some()
        }
        #[cfg(not(all(target_os = "linux", target_env = "gnu")))]
        {
            false
        }
    }
}

impl ArgRedactor for ProcessArgv {
    fn redact(&mut self, slot: ArgSlot) {
        #[cfg(all(target_os = "linux", target_env = "gnu"))]
        if let Some(native) = self.native.as_mut() {
            native.zero(slot.index, slot.start, slot.end);
        }
        #[cfg(not(all(target_os = "linux", target_env = "gnu")))]
        let _ = slot;
    }
}
