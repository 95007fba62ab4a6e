//! Test driver for the prlctl/prlsrvctl binaries.
//!
//! Two ways to run a binary:
//! - [`run`]: plain pipes, stdin closed, for everything non-interactive
//! - [`TestSession`]: stdin and stdout on a PTY so the password prompt
//!   sees a terminal; stderr is piped and captured for assertions

use nix::pty::openpty;
use std::io::{Read, Write};
use std::os::fd::{FromRawFd, IntoRawFd};
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Output captured from a completed run.
#[derive(Debug)]
pub struct SessionOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run `binary` to completion without a terminal.
pub fn run(binary: &str, args: &[&str]) -> SessionOutput {
    let output = Command::new(binary)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .unwrap_or_else(|e| panic!("failed to run {binary}: {e}"));
    SessionOutput {
        code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// A running binary attached to a PTY.
pub struct TestSession {
    child: Child,
    /// Our writing end of the PTY master.
    terminal: std::fs::File,
    /// Captured PTY output, populated by background thread.
    stdout_capture: Arc<Mutex<Vec<u8>>>,
    /// Captured stderr, populated by background thread.
    stderr_capture: Arc<Mutex<Vec<u8>>>,
    _stdout_thread: thread::JoinHandle<()>,
    _stderr_thread: thread::JoinHandle<()>,
}

impl TestSession {
    /// Spawn `binary` with stdin and stdout on a fresh PTY.
    pub fn spawn(binary: &str, args: &[&str]) -> std::io::Result<TestSession> {
        let pty = openpty(None, None).map_err(std::io::Error::other)?;
        let pty_master_fd = pty.master.into_raw_fd();
        let pty_slave_fd = pty.slave.into_raw_fd();

        let mut cmd = Command::new(binary);
        cmd.args(args);
        cmd.env_remove("RUST_LOG");
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::piped());

        // stdin and stdout become the PTY slave so isatty(0) holds.
        unsafe {
            cmd.pre_exec(move || {
                if libc::dup2(pty_slave_fd, 0) == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                if libc::dup2(pty_slave_fd, 1) == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                if pty_slave_fd > 1 {
                    libc::close(pty_slave_fd);
                }
                Ok(())
            });
        }

        let mut child = cmd.spawn()?;
        unsafe {
            libc::close(pty_slave_fd);
        }

        let write_fd = unsafe { libc::dup(pty_master_fd) };
        if write_fd == -1 {
            return Err(std::io::Error::last_os_error());
        }
        let terminal = unsafe { std::fs::File::from_raw_fd(write_fd) };

        // Drain the PTY master so the child never blocks on output.
        let stdout_capture = Arc::new(Mutex::new(Vec::new()));
        let stdout_cap = Arc::clone(&stdout_capture);
        let stdout_thread = thread::spawn(move || {
            let mut master = unsafe { std::fs::File::from_raw_fd(pty_master_fd) };
            let mut buf = [0u8; 4096];
            loop {
                match master.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => stdout_cap.lock().unwrap().extend_from_slice(&buf[..n]),
                    // EIO once the slave side is gone.
                    Err(_) => break,
                }
            }
        });

        let stderr_capture = Arc::new(Mutex::new(Vec::new()));
        let stderr_cap = Arc::clone(&stderr_capture);
        let stderr_pipe = child.stderr.take().expect("stderr is piped");
        let stderr_thread = thread::spawn(move || {
            let mut pipe = stderr_pipe;
            let mut buf = [0u8; 4096];
            loop {
                match pipe.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => stderr_cap.lock().unwrap().extend_from_slice(&buf[..n]),
                }
            }
        });

        Ok(TestSession {
            child,
            terminal,
            stdout_capture,
            stderr_capture,
            _stdout_thread: stdout_thread,
            _stderr_thread: stderr_thread,
        })
    }

    /// Wait until stderr contains `needle`, panicking after `timeout`.
    pub fn expect_stderr(&self, needle: &str, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        loop {
            let seen = String::from_utf8_lossy(&self.stderr_capture.lock().unwrap()).to_string();
            if seen.contains(needle) {
                return;
            }
            assert!(Instant::now() < deadline, "timed out waiting for {needle:?}; stderr so far:\n{seen}");
            thread::sleep(Duration::from_millis(20));
        }
    }

    /// Type a line on the terminal.
    pub fn send_line(&mut self, line: &str) {
        write!(self.terminal, "{line}\n").expect("failed to write to the terminal");
        self.terminal.flush().expect("failed to flush the terminal");
    }

    /// Wait for the child to exit and assert the exit code.
    pub fn wait_exit(mut self, expected_code: i32) -> SessionOutput {
        let status = self.child.wait().expect("failed to wait for child");
        let code = status.code().unwrap_or(-1);

        drop(self.terminal);
        let _ = self._stderr_thread.join();
        // The PTY master stays readable until every slave fd is closed,
        // which has happened once the child is reaped.
        let _ = self._stdout_thread.join();

        let stdout = String::from_utf8_lossy(&self.stdout_capture.lock().unwrap()).to_string();
        let stderr = String::from_utf8_lossy(&self.stderr_capture.lock().unwrap()).to_string();

        assert_eq!(
            code, expected_code,
            "expected exit code {expected_code}, got {code}\nstdout:\n{stdout}\nstderr:\n{stderr}"
        );

        SessionOutput { code, stdout, stderr }
    }
}
