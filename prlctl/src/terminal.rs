//! Credential provider for remote logins.

use std::io::{self, BufRead, IsTerminal, Write};
use std::os::fd::AsFd;

use nix::sys::termios;

use crate::record::LoginInfo;
use crate::secret::Secret;

/// Prompt on stderr and read one line from stdin with echo disabled.
pub fn read_password(prompt: &str) -> io::Result<Secret> {
    eprint!("{}", prompt);
    io::stderr().flush()?;

    let stdin = io::stdin();
    let fd = stdin.as_fd();
    let old_term = termios::tcgetattr(fd)?;
    let mut noecho = old_term.clone();
    noecho.local_flags &= !termios::LocalFlags::ECHO;
    termios::tcsetattr(fd, termios::SetArg::TCSANOW, &noecho)?;

    let mut line = zeroize::Zeroizing::new(String::new());
    let read = stdin.lock().read_line(&mut line);
    termios::tcsetattr(fd, termios::SetArg::TCSANOW, &old_term)?;
    eprintln!();
    read?;

    let end = line.find(['\n', '\r']).unwrap_or(line.len());
    Ok(Secret::new(&line[..end]))
}

pub fn stdin_is_terminal() -> bool {
    io::stdin().is_terminal()
}

/// Stack a password for a remote login that did not carry one.
/// Returns whether `ask` was called.
pub fn ensure_password(
    login: &mut LoginInfo,
    ask: impl FnOnce(&str) -> io::Result<Secret>,
) -> io::Result<bool> {
    if !login.is_remote() || !login.secrets.is_empty() {
        return Ok(false);
    }
    let prompt = format!("{}@{}'s password: ", login.user, login.server);
    login.secrets.push(ask(&prompt)?);
    Ok(true)
}
