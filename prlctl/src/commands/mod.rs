//! Command builders.
//!
//! A builder owns one option table, walks the argument vector with a
//! [`cmdopt::Parser`] and folds every match into a [`ParamRecord`]. The
//! first error aborts the walk; the router turns it into a diagnostic and
//! the invalid record.

mod backup;
mod device;
mod migrate;
mod network;
mod report;
mod server;
mod settings;
mod template;
mod vm;

pub use backup::{build_backup, build_backup_delete, build_backup_list, build_backup_node, build_restore};
pub use migrate::build_migrate;
pub use network::{build_privnet, build_tc, build_usb, build_vnet};
pub use report::{build_problem_report, build_statistics};
pub use server::build_server;
pub use template::{build_ct_template, build_monitor};
pub use vm::build_params;

use std::time::Duration;

use cmdopt::{ArgSlot, Match};

use crate::context::ParserContext;
use crate::error::{CmdError, Result};
use crate::options::OptId;
use crate::record::{LoginInfo, SecurityLevel};
use crate::secret::Secret;
use crate::values::{self, Auth};

// ============================================================================
// Global options
// ============================================================================

/// Apply one of the options every table carries. Returns `false` when
/// `m` is not a global option.
pub(crate) fn global_option(
    ctx: &mut ParserContext,
    login: &mut LoginInfo,
    m: &Match<OptId>,
) -> Result<bool> {
    match m.id {
        OptId::Login => {
            ctx.hide(m.slot);
            let auth = values::parse_auth(m.value()).ok_or_else(|| bad_secret(m))?;
            login.assign(auth);
        }
        OptId::ReadPasswd => {
            login.secrets.push(read_password_file(ctx, m.value())?);
        }
        OptId::Verbose => {
            ctx.verbosity = atoi(m.value());
            log::set_max_level(ctx.log_level());
        }
        OptId::Compat => ctx.compat = true,
        OptId::Timeout => {
            let secs = atoi(m.value()).max(0) as u64;
            ctx.job_timeout = Some(Duration::from_secs(secs));
        }
        _ => return Ok(false),
    }
    Ok(true)
}

/// First line of a password file.
fn read_password_file(ctx: &ParserContext, path: &str) -> Result<Secret> {
    let text = ctx.host().read_file(path).map_err(|source| CmdError::Io {
        path: path.to_string(),
        source,
    })?;
    let end = text.find(['\n', '\r']).unwrap_or(text.len());
    Ok(Secret::new(&text[..end]))
}

/// Leading decimal of `s`, zero when there is none.
fn atoi(s: &str) -> i32 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i32>().map(|n| sign * n).unwrap_or(0)
}

// ============================================================================
// Value helpers
// ============================================================================

pub(crate) fn bad_value(m: &Match<OptId>) -> CmdError {
    CmdError::bad_value(&m.name, m.value())
}

/// Like [`bad_value`] but never echoes the text of a hidden value.
pub(crate) fn bad_secret(m: &Match<OptId>) -> CmdError {
    CmdError::BadSecret(m.name.clone())
}

/// `on|yes|off|no`.
pub(crate) fn toggle(m: &Match<OptId>) -> Result<bool> {
    values::on_off(m.value()).ok_or_else(|| bad_value(m))
}

/// `on|off` only.
pub(crate) fn strict_toggle(m: &Match<OptId>) -> Result<bool> {
    values::strict_on_off(m.value()).ok_or_else(|| bad_value(m))
}

pub(crate) fn uint(m: &Match<OptId>) -> Result<u32> {
    values::parse_uint(m.value()).ok_or_else(|| bad_value(m))
}

pub(crate) fn security_level(m: &Match<OptId>) -> Result<SecurityLevel> {
    SecurityLevel::parse(m.value())
}

/// `--location`/`--dst`: absolute or bundle-relative, never `./...`.
pub(crate) fn location(m: &Match<OptId>) -> Result<String> {
    if m.value().starts_with('.') {
        return Err(CmdError::msg(format!(
            "An incorrect value for {} is specified; relative paths are not allowed.",
            m.name
        )));
    }
    Ok(m.value().to_string())
}

/// UUIDs are normalised to braced form; anything else is kept verbatim.
pub(crate) fn uuid_or_verbatim(s: &str) -> String {
    values::normalize_uuid(s).unwrap_or_else(|| s.to_string())
}

/// `--storage`, `--backup-storage` and friends.
pub(crate) fn storage_login(
    ctx: &mut ParserContext,
    target: &mut LoginInfo,
    m: &Match<OptId>,
) -> Result<()> {
    ctx.hide(m.slot);
    let auth = values::parse_auth(m.value()).ok_or_else(|| bad_secret(m))?;
    target.assign(auth);
    Ok(())
}

/// `CMD:on|off` for one of the `allowed` commands.
pub(crate) fn require_pwd(m: &Match<OptId>, allowed: &[&str]) -> Result<(String, bool)> {
    match values::split(m.value(), ":", false).as_slice() {
        [cmd, mode] if allowed.contains(&cmd.as_str()) => {
            let on = values::on_off(mode).ok_or_else(|| bad_value(m))?;
            Ok((cmd.clone(), on))
        }
        _ => Err(bad_value(m)),
    }
}

/// Store a credential value and wipe it from the argument vector.
pub(crate) fn secret(ctx: &mut ParserContext, m: &Match<OptId>) -> Secret {
    let secret = Secret::new(m.value());
    ctx.hide(m.slot);
    secret
}

// ============================================================================
// Positional logins
// ============================================================================

/// `[login/]ID` as taken by migrate, backup and template copy. The login
/// part, if any, is parsed into `login`; its password bytes are wiped
/// from `args[index]`.
pub(crate) fn split_login_target(
    ctx: &mut ParserContext,
    args: &[String],
    index: usize,
    login: &mut LoginInfo,
    what: &str,
) -> Result<Option<String>> {
    let token = &args[index];
    match token.split_once('/') {
        Some((auth, id)) => {
            assign_positional(ctx, index, auth, login, what)?;
            Ok(Some(id.to_string()))
        }
        None => Ok(None),
    }
}

/// Parse `text`, the leading part of `args[index]`, as a login.
pub(crate) fn assign_positional(
    ctx: &mut ParserContext,
    index: usize,
    text: &str,
    login: &mut LoginInfo,
    what: &str,
) -> Result<()> {
    let auth = values::parse_auth(text).ok_or_else(|| CmdError::BadSecret(what.to_string()))?;
    hide_password(ctx, index, &auth);
    login.assign(auth);
    Ok(())
}

fn hide_password(ctx: &mut ParserContext, index: usize, auth: &Auth) {
    if let Some(range) = &auth.password_range {
        ctx.hide(Some(ArgSlot {
            index,
            start: range.start,
            end: range.end,
        }));
    }
}
