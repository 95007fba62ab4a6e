//! Credential holders.
//!
//! Passwords never sit in plain `String` fields of the parameter record.
//! They are wrapped in [`Secret`] (wiped on drop, redacted in `Debug`) and
//! login passwords go through a [`SecretStack`] so the authentication step
//! can take each one exactly once.

use std::collections::VecDeque;
use std::fmt;

use zeroize::Zeroizing;

#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Secret(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// FIFO of pending passwords. `take` hands out the oldest entry and
/// forgets it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretStack {
    entries: VecDeque<Secret>,
}

impl SecretStack {
    pub fn push(&mut self, secret: Secret) {
        self.entries.push_back(secret);
    }

    pub fn take(&mut self) -> Option<Secret> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for SecretStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretStack({} pending)", self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_shows_the_value() {
        let s = Secret::new("hunter2");
        assert_eq!(format!("{:?}", s), "Secret(***)");
        assert_eq!(s.expose(), "hunter2");

        let mut stack = SecretStack::default();
        stack.push(s);
        assert!(!format!("{:?}", stack).contains("hunter2"));
    }

    #[test]
    fn stack_hands_out_each_secret_once_in_order() {
        let mut stack = SecretStack::default();
        stack.push(Secret::new("first"));
        stack.push(Secret::new("second"));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.take().map(|s| s.expose().to_string()), Some("first".into()));
        assert_eq!(stack.take().map(|s| s.expose().to_string()), Some("second".into()));
        assert!(stack.take().is_none());
        assert!(stack.is_empty());
    }
}
