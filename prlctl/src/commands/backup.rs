//! `backup`, `restore`, `backup-list`, `backup-delete` and the server's
//! node backup.

use cmdopt::{Event, Match, Parser};

use super::{bad_value, global_option, location, security_level, split_login_target, storage_login, uuid_or_verbatim};
use crate::context::ParserContext;
use crate::error::{CmdError, Result};
use crate::options::{OptId, Table};
use crate::record::{Action, BackupKind, ParamRecord, VmType};

fn usage_error() -> CmdError {
    CmdError::msg("Incorrect backup usage.")
}

/// Options shared by VM and node backups. `Ok(false)` for anything else.
fn backup_option(ctx: &mut ParserContext, rec: &mut ParamRecord, m: &Match<OptId>) -> Result<bool> {
    match m.id {
        OptId::BackupFull => rec.backup.kind = BackupKind::Full,
        OptId::BackupInc => rec.backup.kind = BackupKind::Incremental,
        OptId::BackupDiff => rec.backup.kind = BackupKind::Differential,
        OptId::Storage => storage_login(ctx, &mut rec.backup.storage, m)?,
        OptId::SecurityLevel => rec.security_level = Some(security_level(m)?),
        OptId::Description => rec.backup.description = Some(m.value().to_string()),
        OptId::Uncompressed => rec.backup.uncompressed = true,
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_backup_options(
    ctx: &mut ParserContext,
    rec: &mut ParamRecord,
    args: &[String],
    table: &Table,
    start: usize,
) -> Result<()> {
    let mut parser = Parser::new(args, start);
    loop {
        match parser.next_opt(table)? {
            Event::End => return Ok(()),
            Event::Unknown { token, .. } => return Err(CmdError::Unrecognized(token)),
            Event::Opt(m) => {
                if global_option(ctx, &mut rec.login, &m)? || backup_option(ctx, rec, &m)? {
                    continue;
                }
                return Err(CmdError::Unrecognized(m.name));
            }
        }
    }
}

/// `backup [login/]ID [options]`. The login names the server that holds
/// the VM.
pub fn build_backup(
    ctx: &mut ParserContext,
    args: &[String],
    action: Action,
    table: &Table,
    offset: usize,
) -> Result<ParamRecord> {
    if args.len() <= offset {
        return Err(usage_error());
    }
    let mut rec = ParamRecord::new(action);
    parse_backup_options(ctx, &mut rec, args, table, offset + 1)?;

    let node = &args[offset];
    rec.id = Some(match split_login_target(ctx, args, offset, &mut rec.backup.login, "node")? {
        Some(id) => id,
        None => node.clone(),
    });
    log::debug!("backup {:?} ({:?})", rec.id, rec.backup.kind);
    Ok(rec)
}

/// `prlsrvctl backup [options]`: every VM of the node.
pub fn build_backup_node(
    ctx: &mut ParserContext,
    args: &[String],
    table: &Table,
    start: usize,
) -> Result<ParamRecord> {
    let mut rec = ParamRecord::new(Action::SrvBackupNode);
    parse_backup_options(ctx, &mut rec, args, table, start)?;
    Ok(rec)
}

/// At most one positional, which must not look like an option.
fn take_target(rec: &mut ParamRecord, token: String) -> Result<()> {
    if token.starts_with('-') {
        return Err(CmdError::Unrecognized(token));
    }
    if rec.id.is_some() {
        return Err(CmdError::msg("Incorrect usage."));
    }
    rec.id = Some(token);
    Ok(())
}

/// `restore [ID] [options]`; `--list` turns it into a backup listing.
pub fn build_restore(
    ctx: &mut ParserContext,
    args: &[String],
    action: Action,
    table: &Table,
    offset: usize,
) -> Result<ParamRecord> {
    if args.len() <= offset {
        return Err(usage_error());
    }
    let mut rec = ParamRecord::new(action);
    let mut parser = Parser::new(args, offset);
    loop {
        let m = match parser.next_opt(table)? {
            Event::End => break,
            Event::Unknown { token, .. } => {
                take_target(&mut rec, token)?;
                continue;
            }
            Event::Opt(m) => m,
        };
        if global_option(ctx, &mut rec.login, &m)? {
            continue;
        }
        match m.id {
            OptId::BackupId => rec.backup.id = Some(uuid_or_verbatim(m.value())),
            OptId::VmId => rec.id = Some(m.value().to_string()),
            OptId::Name => rec.backup.name = Some(m.value().to_string()),
            OptId::BackupList => rec.action = Action::BackupList,
            OptId::BackupListFull => rec.backup.list_full = true,
            OptId::Storage => storage_login(ctx, &mut rec.backup.storage, &m)?,
            OptId::SecurityLevel => rec.security_level = Some(security_level(&m)?),
            OptId::Location => rec.backup.vm_location = Some(location(&m)?),
            _ => return Err(CmdError::Unrecognized(m.name)),
        }
    }
    Ok(rec)
}

pub fn build_backup_delete(
    ctx: &mut ParserContext,
    args: &[String],
    action: Action,
    table: &Table,
    offset: usize,
) -> Result<ParamRecord> {
    if args.len() <= offset {
        return Err(usage_error());
    }
    let mut rec = ParamRecord::new(action);
    let mut parser = Parser::new(args, offset);
    loop {
        let m = match parser.next_opt(table)? {
            Event::End => break,
            Event::Unknown { token, .. } => {
                take_target(&mut rec, token)?;
                continue;
            }
            Event::Opt(m) => m,
        };
        if global_option(ctx, &mut rec.login, &m)? {
            continue;
        }
        match m.id {
            OptId::BackupId => rec.backup.id = Some(uuid_or_verbatim(m.value())),
            OptId::Storage => storage_login(ctx, &mut rec.backup.storage, &m)?,
            OptId::SecurityLevel => rec.security_level = Some(security_level(&m)?),
            OptId::KeepChain => rec.backup.keep_chain = true,
            _ => return Err(CmdError::Unrecognized(m.name)),
        }
    }
    Ok(rec)
}

/// `backup-list [ID] [options]`. Lists both VMs and containers unless
/// `--vmtype` narrows it.
pub fn build_backup_list(
    ctx: &mut ParserContext,
    args: &[String],
    action: Action,
    table: &Table,
    offset: usize,
) -> Result<ParamRecord> {
    let mut rec = ParamRecord::new(action);
    rec.vmtype = VmType::All;
    let mut parser = Parser::new(args, offset + 1);
    loop {
        let m = match parser.next_opt(table)? {
            Event::End => break,
            Event::Unknown { token, .. } => {
                rec.id = Some(token);
                continue;
            }
            Event::Opt(m) => m,
        };
        if global_option(ctx, &mut rec.login, &m)? {
            continue;
        }
        match m.id {
            OptId::BackupListFull => rec.backup.list_full = true,
            OptId::ListNoHeader => rec.list.no_header = true,
            OptId::BackupId => rec.backup.id = Some(uuid_or_verbatim(m.value())),
            OptId::LocalVms => rec.backup.list_local_vm = true,
            OptId::Storage => storage_login(ctx, &mut rec.backup.storage, &m)?,
            OptId::SecurityLevel => rec.security_level = Some(security_level(&m)?),
            OptId::VmType => {
                rec.vmtype = match m.value() {
                    "ct" | "c" => VmType::Ct,
                    "vm" | "v" => VmType::Vm,
                    "all" | "a" => VmType::All,
                    _ => return Err(bad_value(&m)),
                }
            }
            _ => return Err(CmdError::Unrecognized(m.name)),
        }
    }
    Ok(rec)
}
