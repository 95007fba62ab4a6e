//! Action routers for `prlctl` and `prlsrvctl`.
//!
//! `argv[1]` (and for command families `argv[2]`) picks the option table
//! and the builder. The `try_` functions return the builder's error; the
//! plain ones print it and hand back [`ParamRecord::invalid`].

use std::process;

use crate::commands::{
    build_backup, build_backup_delete, build_backup_list, build_backup_node, build_ct_template, build_migrate,
    build_monitor, build_params, build_privnet, build_problem_report, build_restore, build_server, build_statistics,
    build_tc, build_usb, build_vnet,
};
use crate::context::ParserContext;
use crate::error::{CmdError, Result};
use crate::options;
use crate::record::{Action, ParamRecord};
use crate::usage;

/// Route a `prlctl` command line.
pub fn route_vm(ctx: &mut ParserContext, args: &[String]) -> ParamRecord {
    let result = try_route_vm(ctx, args);
    finish(result, || print!("{}", usage::vm(&usage::program(args))))
}

/// Route a `prlsrvctl` command line.
pub fn route_srv(ctx: &mut ParserContext, args: &[String]) -> ParamRecord {
    let result = try_route_srv(ctx, args);
    finish(result, || print!("{}", usage::srv(&usage::program(args))))
}

fn finish(result: Result<ParamRecord>, usage: impl Fn()) -> ParamRecord {
    let err = match result {
        Ok(rec) => {
            log::debug!("{} accepted", rec.action.name());
            return rec;
        }
        Err(err) => err,
    };
    log::debug!("rejected: {:?}", err);
    match err {
        CmdError::Exit(code) => process::exit(code),
        CmdError::Reported => {}
        CmdError::InvalidUsage | CmdError::UnknownAction(_) => {
            eprintln!("{}", err);
            usage();
        }
        _ => eprintln!("{}", err),
    }
    ParamRecord::invalid()
}

fn verb(args: &[String], i: usize) -> &str {
    args.get(i).map(String::as_str).unwrap_or("")
}

/// Generic builder with the target at `args[2]`.
fn params(ctx: &mut ParserContext, args: &[String], action: Action, table: options::Table) -> Result<ParamRecord> {
    build_params(ctx, args, action, &table, 2)
}

pub fn try_route_vm(ctx: &mut ParserContext, args: &[String]) -> Result<ParamRecord> {
    let program = usage::program(args);
    if args.len() < 2 {
        print!("{}", usage::vm(&program));
        return Err(CmdError::Reported);
    }
    if args[1] == "--version" {
        println!("{}", usage::version(&program));
        return Err(CmdError::Exit(0));
    }
    if args.iter().any(|a| a == "--help") {
        print!("{}", usage::vm(&program));
        return Err(CmdError::Exit(0));
    }

    let verb1 = args[1].as_str();
    log::debug!("{} {}", program, verb1);
    match verb1 {
        "list" => return build_params(ctx, args, Action::List, &options::list(), 1),
        "backup-list" => return build_backup_list(ctx, args, Action::BackupList, &options::backup_list(), 1),
        _ => {}
    }
    if args.len() < 3 {
        return Err(CmdError::InvalidUsage);
    }

    let simple = match verb1 {
        "change-sid" => Some(Action::ChangeSid),
        "internal" => Some(Action::Internal),
        "reset-uptime" => Some(Action::ResetUptime),
        "suspend" => Some(Action::Suspend),
        "resume" => Some(Action::Resume),
        "pause" => Some(Action::Pause),
        "unregister" => Some(Action::Unregister),
        "reset" => Some(Action::Reset),
        "restart" => Some(Action::Restart),
        "installtools" => Some(Action::InstallTools),
        "enter" => Some(Action::Enter),
        "console" => Some(Action::Console),
        "status" => Some(Action::Status),
        _ => None,
    };
    if let Some(action) = simple {
        return params(ctx, args, action, options::no_options());
    }

    match verb1 {
        "start" => params(ctx, args, Action::Start, options::start()),
        "stop" => params(ctx, args, Action::Stop, options::stop()),
        "umount" => params(ctx, args, Action::Umount, options::stop()),
        "mount" => params(ctx, args, Action::Mount, options::mount()),
        "set" => params(ctx, args, Action::Set, options::set()),
        "create" => params(ctx, args, Action::Create, options::create()),
        "convert" => params(ctx, args, Action::Convert, options::convert()),
        "delete" | "destroy" => params(ctx, args, Action::Destroy, options::destroy()),
        "register" => build_params(ctx, args, Action::Register, &options::register(), 1),
        "clone" => params(ctx, args, Action::Clone, options::clone()),
        "capture" => params(ctx, args, Action::Capture, options::capture()),
        "snapshot" => params(ctx, args, Action::SnapshotCreate, options::snapshot()),
        "snapshot-switch" => params(ctx, args, Action::SnapshotSwitch, options::snapshot_switch()),
        "snapshot-delete" => params(ctx, args, Action::SnapshotDelete, options::snapshot_delete()),
        "snapshot-list" => params(ctx, args, Action::SnapshotList, options::snapshot_list()),
        "migrate" => build_migrate(ctx, args, Action::Migrate, &options::migrate(), 2),
        "move" => params(ctx, args, Action::Move, options::moving()),
        "statistics" => build_statistics(ctx, args, Action::PerfStats, &options::statistics(), 2),
        "problem-report" => {
            build_problem_report(ctx, args, Action::ProblemReport, &options::problem_report(), 2)
        }
        "exec" => params(ctx, args, Action::Exec, options::exec()),
        "backup" => build_backup(ctx, args, Action::Backup, &options::backup(), 2),
        "restore" => build_restore(ctx, args, Action::Restore, &options::restore(), 2),
        "backup-delete" => build_backup_delete(ctx, args, Action::BackupDelete, &options::backup_delete(), 2),
        "auth" => params(ctx, args, Action::Auth, options::auth()),
        "server" => match verb(args, 2) {
            "shutdown" => build_server(ctx, args, Action::SrvShutdown, &options::disp_shutdown(), 3),
            "info" => build_server(ctx, args, Action::SrvInfo, &options::disp_info(), 3),
            "install-license" => build_server(ctx, args, Action::SrvInstallLicense, &options::license(), 3),
            "problem-report" => {
                build_problem_report(ctx, args, Action::SrvProblemReport, &options::problem_report(), 3)
            }
            other => Err(CmdError::UnknownAction(other.to_string())),
        },
        other => Err(CmdError::UnknownAction(other.to_string())),
    }
}

pub fn try_route_srv(ctx: &mut ParserContext, args: &[String]) -> Result<ParamRecord> {
    let program = usage::program(args);
    if args.len() < 2 {
        print!("{}", usage::srv(&program));
        return Err(CmdError::Reported);
    }

    let verb1 = args[1].as_str();
    log::debug!("{} {}", program, verb1);
    let server = |ctx: &mut ParserContext, action: Action, table: options::Table| {
        build_server(ctx, args, action, &table, 2)
    };
    match verb1 {
        "shutdown" | "stop" => server(ctx, Action::SrvShutdown, options::disp_shutdown()),
        "info" => server(ctx, Action::SrvInfo, options::disp_info()),
        "user" => match verb(args, 2) {
            "list" => build_params(ctx, args, Action::SrvUserList, &options::user_list(), 2),
            "set" => build_params(ctx, args, Action::SrvUserSet, &options::user_set(), 2),
            "" => Err(CmdError::UnknownAction(verb1.to_string())),
            other => Err(CmdError::UnknownAction(other.to_string())),
        },
        "set" => server(ctx, Action::SrvSet, options::disp_set()),
        "install-license" => server(ctx, Action::SrvInstallLicense, options::license()),
        "update-license" => server(ctx, Action::SrvUpdateLicense, options::no_options()),
        "statistics" => build_statistics(ctx, args, Action::SrvPerfStats, &options::statistics(), 2),
        "problem-report" => {
            build_problem_report(ctx, args, Action::SrvProblemReport, &options::problem_report(), 2)
        }
        "net" => build_vnet(ctx, args, &options::disp_vnet(), 2),
        "tc" => build_tc(ctx, args, &options::no_options(), 2),
        "privnet" => build_privnet(ctx, args, &options::disp_privnet(), 2),
        "usb" => build_usb(ctx, args, &options::disp_usb(), 2),
        "appliance-install" => server(ctx, Action::SrvInstallAppliance, options::appliance()),
        "update-host-reg-info" => server(ctx, Action::SrvUpdateHostRegInfo, options::no_options()),
        "prepare-for-uninstall" => server(ctx, Action::SrvPrepareForUninstall, options::no_options()),
        "list-network-config" => server(ctx, Action::SrvListNetworkConfig, options::no_options()),
        "up-listen-interface" => server(ctx, Action::SrvUpListenInterface, options::disp_listen_iface()),
        "start-nat-detect" => server(ctx, Action::SrvStartNatDetect, options::no_options()),
        "cttemplate" => build_ct_template(ctx, args, &options::ct_template_copy(), 2),
        "monitor" => build_monitor(args),
        "backup" => build_backup_node(ctx, args, &options::backup(), 2),
        "help" | "--help" => {
            print!("{}", usage::srv(&program));
            Err(CmdError::Exit(0))
        }
        other => Err(CmdError::UnknownAction(other.to_string())),
    }
}
