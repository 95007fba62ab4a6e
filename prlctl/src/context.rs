use std::fs;
use std::io;
use std::time::Duration;

use cmdopt::ArgSlot;

use crate::redact::{ArgRedactor, NoRedact, ProcessArgv};

/// Host file access the parser needs: password files, key files and
/// resolving relative bundle paths.
pub trait HostIo {
    fn read_file(&self, path: &str) -> io::Result<String>;
    fn canonicalize(&self, path: &str) -> io::Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsHost;

impl HostIo for FsHost {
    fn read_file(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn canonicalize(&self, path: &str) -> io::Result<String> {
        Ok(fs::canonicalize(path)?.to_string_lossy().into_owned())
    }
}

/// Process-wide settings touched while parsing, plus the host
/// capabilities the option handlers call out to.
pub struct ParserContext {
    pub verbosity: i32,
    pub compat: bool,
    pub job_timeout: Option<Duration>,
    redactor: Box<dyn ArgRedactor>,
    host: Box<dyn HostIo>,
}

impl ParserContext {
    pub fn new(redactor: Box<dyn ArgRedactor>, host: Box<dyn HostIo>) -> Self {
        ParserContext {
            verbosity: 0,
            compat: false,
            job_timeout: None,
            redactor,
            host,
        }
    }

    /// Real argument vector and real filesystem.
    pub fn for_process() -> Self {
        Self::new(Box::new(ProcessArgv::attach()), Box::new(FsHost))
    }

    /// Filesystem access only; argument redaction is a no-op.
    pub fn detached() -> Self {
        Self::new(Box::new(NoRedact), Box::new(FsHost))
    }

    pub fn host(&self) -> &dyn HostIo {
        self.host.as_ref()
    }

    /// Wipe the argument bytes a credential was read from.
    pub fn hide(&mut self, slot: Option<ArgSlot>) {
        if let Some(slot) = slot {
            self.redactor.redact(slot);
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            v if v < 0 => log::LevelFilter::Error,
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

impl Default for ParserContext {
    fn default() -> Self {
        Self::detached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redact::ArgBuffer;

    #[test]
    fn verbosity_maps_to_log_levels() {
        let mut ctx = ParserContext::detached();
        assert_eq!(ctx.log_level(), log::LevelFilter::Warn);
        ctx.verbosity = -1;
        assert_eq!(ctx.log_level(), log::LevelFilter::Error);
        ctx.verbosity = 2;
        assert_eq!(ctx.log_level(), log::LevelFilter::Debug);
        ctx.verbosity = 9;
        assert_eq!(ctx.log_level(), log::LevelFilter::Trace);
    }

    #[test]
    fn hide_forwards_to_redactor() {
        let args = vec!["a".to_string(), "pw".to_string()];
        let buf = ArgBuffer::new(&args);
        let mut ctx = ParserContext::new(Box::new(buf.clone()), Box::new(FsHost));
        ctx.hide(None);
        assert_eq!(buf.display(1).as_deref(), Some("pw"));
        ctx.hide(Some(ArgSlot {
            index: 1,
            start: 0,
            end: 2,
        }));
        assert_eq!(buf.display(1).as_deref(), Some("**"));
    }

    #[test]
    fn fs_host_reads_and_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pw.txt");
        std::fs::write(&path, "secret\n").unwrap();
        let host = FsHost;
        assert_eq!(host.read_file(path.to_str().unwrap()).unwrap(), "secret\n");
        let resolved = host.canonicalize(path.to_str().unwrap()).unwrap();
        assert!(resolved.ends_with("pw.txt"));
        assert!(host.read_file("/nonexistent/really/not").is_err());
    }
}
