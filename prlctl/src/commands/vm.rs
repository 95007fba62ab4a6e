//! The generic builder behind most `prlctl` verbs.
//!
//! Handlers are split by concern: lifecycle and listing options live
//! here, devices in `device.rs`, resources and VM settings in
//! `settings.rs`. Each group answers `Ok(false)` for ids it does not own.

use cmdopt::{Event, Match, Parser};

use super::{bad_value, global_option, location, toggle, uuid_or_verbatim};
use crate::catalog::{self, OS_TYPES, DISTRIBUTIONS};
use crate::context::ParserContext;
use crate::error::{CmdError, Result};
use crate::options::{OptId, Table};
use crate::record::{Action, HddDeleteMode, MountMode, NetParam, ParamRecord, VmType};
use crate::validate;
use crate::values;

pub(super) struct VmBuilder<'c> {
    pub(super) ctx: &'c mut ParserContext,
    pub(super) rec: ParamRecord,
    /// Guest network settings, attached to a device once parsing ends.
    pub(super) net: NetParam,
    pub(super) hdd_delete: Vec<HddDeleteMode>,
}

/// Build the record for `action` from `args[offset..]`. `args[offset]` is
/// the target, except for `list`, `register` and `user` commands which
/// take their positionals from the option stream.
pub fn build_params(
    ctx: &mut ParserContext,
    args: &[String],
    action: Action,
    table: &Table,
    offset: usize,
) -> Result<ParamRecord> {
    let mut b = VmBuilder {
        ctx,
        rec: ParamRecord::new(action),
        net: NetParam::default(),
        hdd_delete: Vec::new(),
    };
    if takes_target(action) {
        b.rec.id = args.get(offset).cloned();
    }
    log::debug!("{}: {} options from index {}", action.name(), table.len(), offset + 1);

    let mut parser = Parser::new(args, offset + 1);
    loop {
        let m = match parser.next_opt(table)? {
            Event::End => break,
            Event::Opt(m) => m,
            Event::Unknown { index, token } => match action {
                Action::List => {
                    b.rec.id = Some(token);
                    continue;
                }
                Action::Register => {
                    b.rec.vm_location = Some(token);
                    continue;
                }
                Action::Exec | Action::Internal => {
                    b.rec.argv = args[index..].to_vec();
                    return Ok(b.rec);
                }
                _ => return Err(CmdError::Unrecognized(token)),
            },
        };
        log::trace!("{} {:?}", m.name, m.id);
        b.check_conflicts(&m)?;
        b.apply(&m)?;
    }

    b.finish()
}

fn takes_target(action: Action) -> bool {
    !matches!(
        action,
        Action::List | Action::Register | Action::SrvUserList | Action::SrvUserSet
    )
}

impl VmBuilder<'_> {
    fn apply(&mut self, m: &Match<OptId>) -> Result<()> {
        let handled = global_option(self.ctx, &mut self.rec.login, m)?
            || self.lifecycle_option(m)?
            || self.device_option(m)?
            || self.resource_option(m)?
            || self.settings_option(m)?
            || self.guest_net_option(m)?;
        if !handled {
            return Err(CmdError::msg(format!("Unhandled option: {}", m.name)));
        }
        Ok(())
    }

    fn finish(mut self) -> Result<ParamRecord> {
        self.finish_devices()?;
        validate::validate(&mut self.rec, self.ctx.host())?;
        Ok(self.rec)
    }

    /// Create, clone, register, list, snapshots, start/stop and the
    /// small per-verb switches.
    fn lifecycle_option(&mut self, m: &Match<OptId>) -> Result<bool> {
        let rec = &mut self.rec;
        let v = m.value();
        match m.id {
            OptId::Help => return Err(CmdError::Exit(0)),
            OptId::Fast => rec.fast = true,
            OptId::UseAcpi => rec.use_acpi = true,
            OptId::Force => rec.force = true,
            OptId::NoForce => rec.noforce = true,
            OptId::Wait => rec.start_wait = true,
            OptId::WithoutShell => rec.exec_in_shell = false,
            OptId::File => rec.file = Some(v.to_string()),

            // list
            OptId::ListField => rec.list.fields = Some(v.to_string()),
            OptId::ListAll => rec.list.all = true,
            OptId::ListNoHeader => rec.list.no_header = true,
            OptId::ListSort => rec.list.sort = Some(v.to_string()),
            OptId::ListStopped => rec.list.stopped = true,
            OptId::ListName => rec.list.name = true,
            OptId::ListInfo => rec.list.info = true,
            OptId::ListAllFields => rec.list.all_fields = true,
            OptId::Json => rec.use_json = true,
            OptId::InfoFull => rec.full_info = true,

            // create
            OptId::Config => rec.config_sample = Some(v.to_string()),
            OptId::Location => rec.vm_location = Some(location(m)?),
            OptId::OsType => match catalog::find_os_type(v) {
                Some(d) => rec.dist = Some(d),
                None => {
                    if v != "list" {
                        eprintln!("An incorrect value for --ostype is specified: {}", v);
                    }
                    print!("The following values are allowed: {}", catalog::format_names(OS_TYPES));
                    return Err(CmdError::Reported);
                }
            },
            OptId::Distribution => match catalog::find_distribution(v) {
                Some(d) => rec.dist = Some(d),
                None => {
                    if v != "list" {
                        eprintln!("An incorrect value for --distribution is specified: {}", v);
                    }
                    print!(
                        "The following values are allowed: {}",
                        catalog::format_names(DISTRIBUTIONS)
                    );
                    return Err(if v == "list" { CmdError::Exit(0) } else { CmdError::Reported });
                }
            },
            OptId::OsTemplate => rec.ostemplate = Some(v.to_string()),
            OptId::VmType => {
                rec.vmtype = match v {
                    "ct" | "c" => VmType::Ct,
                    "vm" | "v" => VmType::Vm,
                    "all" | "a" if matches!(rec.action, Action::List | Action::BackupList) => VmType::All,
                    _ => return Err(bad_value(m)),
                }
            }
            OptId::NoHdd => rec.nohdd = true,
            OptId::LionRecovery => rec.lion_recovery = true,
            OptId::HddBlockSize => match values::parse_uint(v) {
                Some(n) => rec.hdd_block_size = Some(n),
                None => eprintln!("An invalid value was specified for --hdd-block-size: {}", v),
            },
            OptId::Uuid => {
                let uuid = values::normalize_uuid(v).ok_or_else(|| {
                    CmdError::msg(format!("An invalid value was specified for --uuid: {}", v))
                })?;
                rec.uuid = Some(uuid);
            }

            // register and clone
            OptId::IgnoreHaCluster => rec.ignore_ha_cluster = true,
            OptId::PreserveUuid => rec.preserve_uuid = true,
            OptId::RegenerateSrcUuid => rec.preserve_src_uuid = false,
            OptId::Name => rec.new_name = Some(v.to_string()),
            OptId::Template => {
                rec.tmpl = true;
                rec.clone.to_template = true;
            }
            OptId::ChangeSid => rec.clone.change_sid = true,
            OptId::LinkedClone => rec.clone.linked = true,
            OptId::DetachExternalHdd => rec.clone.detach_external_hdd = toggle(m)?,
            // accepted for vzmlocal compatibility
            OptId::OnlineClone => {}

            // mount
            OptId::MountOpts => {
                rec.mount_mode = Some(match v {
                    "ro" => MountMode::ReadOnly,
                    "rw" => MountMode::ReadWrite,
                    _ => return Err(CmdError::msg(format!("Unknown mount option: {}", v))),
                })
            }
            OptId::MountInfo => rec.mount_info = true,

            // auth
            OptId::UserName => rec.user_name = Some(v.to_string()),
            OptId::UserPassword => rec.user_password = Some(super::secret(self.ctx, m)),

            // user set
            OptId::DefVmHome => rec.user.def_vm_home = Some(v.to_string()),

            // snapshots
            OptId::SnapshotId => rec.snapshot.id = Some(uuid_or_verbatim(v)),
            OptId::SnapshotName => rec.snapshot.name = Some(v.to_string()),
            OptId::SnapshotDesc => rec.snapshot.description = Some(v.to_string()),
            OptId::SnapshotWait => rec.snapshot.wait = true,
            OptId::SnapshotSkipResume => rec.snapshot.skip_resume = true,
            OptId::SnapshotTree => rec.snapshot.tree = true,
            OptId::SnapshotChildren => rec.snapshot.del_with_children = true,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
