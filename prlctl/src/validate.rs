//! Whole-record consistency checks, run once parsing has finished.
//!
//! [`validate`] covers the generic builder. The task and server builders
//! call their own smaller passes below.

use crate::context::HostIo;
use crate::error::{CmdError, Result};
use crate::record::{
    Action, DevCommand, DevMode, DevType, DispParam, MigrateParam, ParamRecord, PrivNetCmd,
    PrivNetParam, ProblemReportParam, VNetCmd, VNetParam, VNetType, VmType,
};

const BOTH: &str = "Unable to simultaneously use";

fn fail<T>(message: impl Into<String>) -> Result<T> {
    Err(CmdError::msg(message))
}

pub fn validate(rec: &mut ParamRecord, host: &dyn HostIo) -> Result<()> {
    if rec.vmtype == VmType::Vm {
        if rec.config_sample.is_some() && rec.dist.is_some() {
            return fail(format!("{} --config and --distribution or --ostype", BOTH));
        }
        if rec.config_sample.is_some() && rec.ostemplate.is_some() {
            return fail(format!("{} --config and --ostemplate", BOTH));
        }
        if rec.ostemplate.is_some() && rec.dist.is_some() {
            return fail(format!("{} --ostemplate and --distribution or --ostype", BOTH));
        }
    }
    if rec.vmtype == VmType::Ct && rec.dist.is_some() {
        log::warn!("--distribution given for a container");
        eprintln!("The options --distribution and --ostype are ignored when creating Containers.");
    }

    if rec.action == Action::Set {
        check_device_kind(rec)?;
    }
    if rec.action == Action::Register && rec.preserve_uuid && rec.uuid.is_some() {
        return fail(format!("{} --preserve-uuid and --uuid", BOTH));
    }

    let remote = rec.login.is_remote();
    if let Some(path) = rec.vm_location.as_mut() {
        resolve_path(path, remote, host)?;
    }
    if let Some(path) = rec.dev.image.as_mut() {
        resolve_path(path, remote, host)?;
    }

    check_device_use(rec)?;
    check_firewall(rec)?;
    check_backup_attach(rec)
}

/// `--type`, `--output`, `--socket` and `--mixer` against the device class.
fn check_device_kind(rec: &ParamRecord) -> Result<()> {
    let dev = &rec.dev;
    let kind = dev.dev_type;
    if let Some(mode) = dev.mode {
        match kind {
            Some(DevType::Hdd) if mode != DevMode::HddExpand => {
                return fail("An invalid device type for hdd is specified.");
            }
            Some(DevType::Hdd) => {}
            Some(DevType::Net) => {
                if dev.vnetwork.is_some() {
                    return fail("The '--type' parameter cannot be used with the '--network' parameter.");
                }
                if mode != DevMode::NetRouted {
                    return fail("An invalid device type is specified for net");
                }
            }
            _ => {
                return fail(
                    "The --type option is used incorrectly. It can be used with 'hdd' or 'net' devices only.",
                )
            }
        }
    }
    let is = |types: &[DevType]| kind.is_some_and(|k| types.contains(&k));
    if non_empty(&dev.output) && !is(&[DevType::Serial, DevType::Parallel, DevType::Sound]) {
        return fail("The --output option is used incorrectly.");
    }
    if non_empty(&dev.socket) && !is(&[DevType::Serial]) {
        return fail("The --socket option is used incorrectly.");
    }
    if non_empty(&dev.mixer) && !is(&[DevType::Sound]) {
        return fail("The --mixer option is used incorrectly.");
    }
    Ok(())
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Relative paths are resolved on this host, which makes no sense for a
/// remote server.
fn resolve_path(path: &mut String, remote: bool, host: &dyn HostIo) -> Result<()> {
    if path.is_empty() || path.starts_with('/') {
        return Ok(());
    }
    if remote {
        return fail(format!("Relative path '{}' is not allowed.", path));
    }
    match host.canonicalize(path) {
        Ok(full) => {
            log::debug!("{} resolved to {}", path, full);
            *path = full;
            Ok(())
        }
        Err(e) => {
            log::debug!("canonicalize {}: {}", path, e);
            fail(format!("Unable to get full path for {}", path))
        }
    }
}

fn check_device_use(rec: &ParamRecord) -> Result<()> {
    let dev = &rec.dev;
    if dev.recreate && !matches!(dev.dev_type, Some(DevType::Fdd | DevType::Hdd)) {
        return fail("The --recreate option have to be specified to setup fdd/hdd device.");
    }
    if dev.cmd.is_none() && dev.net.is_updated() {
        return fail("Unable to configure network parameters, the network interface is not specified.");
    }
    if dev.cmd.is_none() && rec.backup_cmd != Some(DevCommand::Add) && dev.is_updated() {
        return fail("The device is not specified.");
    }
    if non_empty(&dev.vnetwork) && non_empty(&dev.iface) {
        return fail(
            "Assigning a virtual network adapter to both a Virtual Network and a NIC at the same time is not supported.",
        );
    }
    if non_empty(&dev.vnetwork) && dev.mode.is_some() {
        return fail(
            "Assigning a virtual network adapter to a Virtual Network and specifying its type at the same time is not supported.",
        );
    }
    Ok(())
}

fn check_firewall(rec: &ParamRecord) -> Result<()> {
    let net = &rec.dev.net;
    if net.fw_direction.is_some() && net.fw_policy.is_none() && net.fw_rules.is_empty() {
        return fail("The --fw-direction option must be used either with the --fw-policy or --fw-rule option.");
    }
    if !net.fw_rules.is_empty() && net.fw_direction.is_none() {
        return fail("You must specify the --fw-direction option.");
    }
    Ok(())
}

fn check_backup_attach(rec: &ParamRecord) -> Result<()> {
    let dev = &rec.dev;
    if rec.backup_cmd.is_some() && dev.cmd.is_some() {
        return fail("The --backup-* options cannot be used with the --device-* options.");
    }
    if rec.backup_cmd.is_none() && rec.backup_disk.is_some() {
        return fail("You must specify the --backup-add option.");
    }
    let backup_add = rec.backup_cmd == Some(DevCommand::Add);
    if backup_add && rec.backup_disk.is_none() && dev.is_updated() {
        return fail("You must specify the --disk option.");
    }
    if (dev.cmd == Some(DevCommand::Add) || backup_add) && dev.position.is_some() && !non_empty(&dev.iface) {
        return fail("The --position option must be used with the --iface option.");
    }
    Ok(())
}

// ============================================================================
// Task and server passes
// ============================================================================

pub fn validate_migrate(m: &MigrateParam) -> Result<()> {
    if m.change_sid && !m.clone {
        return fail("The --changesid option can be used with --clone only");
    }
    if m.remove_src && m.clone {
        return fail("The --remove-src option cannot be used with --clone");
    }
    Ok(())
}

pub fn validate_vnet(v: &VNetParam) -> Result<()> {
    if v.cmd != VNetCmd::List && v.name.as_deref().map_or(true, str::is_empty) {
        return fail("The Virtual Network name is not specified.");
    }
    if v.ifname.is_some() && v.mac.is_some() {
        return fail("Specify either the --ifname or --mac option, but not both options.");
    }
    if v.vnet_type == Some(VNetType::Bridged) && v.ifname.is_none() && v.mac.is_none() {
        return fail("For a bridged Virtual Network, you need to specify either the --ifname or --mac option.");
    }
    if v.ifname.is_some() && v.vnet_type == Some(VNetType::HostOnly) {
        return fail("The --ifname option should be specified for bridged virtual networks only");
    }
    Ok(())
}

pub fn validate_privnet(p: &PrivNetParam) -> Result<()> {
    if p.cmd != PrivNetCmd::List && p.name.as_deref().map_or(true, str::is_empty) {
        return fail("The IP private network name is not specified.");
    }
    if p.cmd == PrivNetCmd::Set && p.ip.is_empty() && p.ip_del.is_empty() && p.is_global.is_none() {
        return fail("Specify either the --ipadd or --ipdel option.");
    }
    Ok(())
}

pub fn validate_disp(d: &DispParam) -> Result<()> {
    if d.device.is_some() && d.assign_mode.is_none() {
        return fail("The --assignment option have to be specified simultaneously with --device.");
    }
    if d.device.is_none() && d.assign_mode.is_some() {
        return fail("The --device option have to be specified simultaneously with --assignment.");
    }
    if d.vnc_public_key.is_some() != d.vnc_private_key.is_some() {
        return fail("The --vnc-public-key and --vnc-private-key option have to be specified simultaneously.");
    }
    Ok(())
}

pub fn validate_problem_report(p: &ProblemReportParam) -> Result<()> {
    if !p.send && !p.dump {
        return fail(
            "Please, choose an action: send the problem report to Parallels (-s, --send) or dump it to stdout (-d, --dump)",
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::catalog;
    use crate::record::{FwDirection, FwRule};
    use crate::values::parse_auth;

    struct FakeHost;

    impl HostIo for FakeHost {
        fn read_file(&self, path: &str) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::NotFound, path.to_string()))
        }

        fn canonicalize(&self, path: &str) -> io::Result<String> {
            match path {
                "missing" => Err(io::Error::new(io::ErrorKind::NotFound, "missing")),
                _ => Ok(format!("/home/user/{}", path)),
            }
        }
    }

    fn check(rec: &mut ParamRecord) -> String {
        validate(rec, &FakeHost).unwrap_err().to_string()
    }

    fn set_rec() -> ParamRecord {
        ParamRecord::new(Action::Set)
    }

    // -- create --

    #[test]
    fn vm_create_conflicts() {
        let mut rec = ParamRecord::new(Action::Create);
        rec.vmtype = VmType::Vm;
        rec.config_sample = Some("basic".into());
        rec.dist = catalog::find_distribution("ubuntu");
        assert_eq!(check(&mut rec), "Unable to simultaneously use --config and --distribution or --ostype");

        rec.dist = None;
        rec.ostemplate = Some("centos-7".into());
        assert_eq!(check(&mut rec), "Unable to simultaneously use --config and --ostemplate");

        rec.vmtype = VmType::All;
        assert!(validate(&mut rec, &FakeHost).is_ok());
    }

    #[test]
    fn container_ignores_distribution() {
        let mut rec = ParamRecord::new(Action::Create);
        rec.vmtype = VmType::Ct;
        rec.dist = catalog::find_distribution("ubuntu");
        rec.ostemplate = Some("centos-7".into());
        assert!(validate(&mut rec, &FakeHost).is_ok());
    }

    // -- device kinds --

    #[test]
    fn type_only_for_hdd_and_net() {
        let mut rec = set_rec();
        rec.dev.cmd = Some(DevCommand::Set);
        rec.dev.dev_type = Some(DevType::Cdrom);
        rec.dev.mode = Some(DevMode::HddExpand);
        assert_eq!(
            check(&mut rec),
            "The --type option is used incorrectly. It can be used with 'hdd' or 'net' devices only."
        );
        rec.dev.dev_type = Some(DevType::Hdd);
        assert!(validate(&mut rec, &FakeHost).is_ok());
        rec.dev.mode = Some(DevMode::NetBridged);
        assert_eq!(check(&mut rec), "An invalid device type for hdd is specified.");
    }

    #[test]
    fn output_socket_mixer_owners() {
        let mut rec = set_rec();
        rec.dev.cmd = Some(DevCommand::Set);
        rec.dev.dev_type = Some(DevType::Parallel);
        rec.dev.output = Some("/tmp/out".into());
        assert!(validate(&mut rec, &FakeHost).is_ok());
        rec.dev.socket = Some("/tmp/sock".into());
        assert_eq!(check(&mut rec), "The --socket option is used incorrectly.");
        rec.dev.socket = None;
        rec.dev.mixer = Some("mixer0".into());
        assert_eq!(check(&mut rec), "The --mixer option is used incorrectly.");
    }

    #[test]
    fn device_kind_rules_only_on_set() {
        let mut rec = ParamRecord::new(Action::Create);
        rec.dev.cmd = Some(DevCommand::Add);
        rec.dev.dev_type = Some(DevType::Cdrom);
        rec.dev.mode = Some(DevMode::HddExpand);
        assert!(validate(&mut rec, &FakeHost).is_ok());
    }

    // -- paths --

    #[test]
    fn relative_paths_are_resolved_locally() {
        let mut rec = ParamRecord::new(Action::Register);
        rec.vm_location = Some("vms/a.pvm".into());
        validate(&mut rec, &FakeHost).unwrap();
        assert_eq!(rec.vm_location.as_deref(), Some("/home/user/vms/a.pvm"));

        rec.vm_location = Some("missing".into());
        assert_eq!(check(&mut rec), "Unable to get full path for missing");
    }

    #[test]
    fn relative_paths_rejected_remotely() {
        let mut rec = set_rec();
        rec.login.assign(parse_auth("root@node1").unwrap());
        rec.dev.cmd = Some(DevCommand::Set);
        rec.dev.dev_type = Some(DevType::Cdrom);
        rec.dev.image = Some("disk.iso".into());
        assert_eq!(check(&mut rec), "Relative path 'disk.iso' is not allowed.");

        rec.dev.image = Some(String::new());
        assert!(validate(&mut rec, &FakeHost).is_ok());
    }

    #[test]
    fn preserve_uuid_with_uuid() {
        let mut rec = ParamRecord::new(Action::Register);
        rec.vm_location = Some("/vms/a.pvm".into());
        rec.preserve_uuid = true;
        rec.uuid = Some("{00000000-0000-0000-0000-000000000001}".into());
        assert_eq!(check(&mut rec), "Unable to simultaneously use --preserve-uuid and --uuid");
    }

    // -- device use --

    #[test]
    fn properties_need_a_device() {
        let mut rec = set_rec();
        rec.dev.connect = true;
        assert_eq!(check(&mut rec), "The device is not specified.");

        let mut rec = set_rec();
        rec.dev.recreate = true;
        rec.dev.cmd = Some(DevCommand::Set);
        rec.dev.dev_type = Some(DevType::Cdrom);
        assert_eq!(
            check(&mut rec),
            "The --recreate option have to be specified to setup fdd/hdd device."
        );
    }

    #[test]
    fn vnetwork_excludes_iface_and_type() {
        let mut rec = ParamRecord::new(Action::Create);
        rec.dev.cmd = Some(DevCommand::Add);
        rec.dev.dev_type = Some(DevType::Net);
        rec.dev.vnetwork = Some("Bridged".into());
        rec.dev.iface = Some("eth0".into());
        assert!(check(&mut rec).starts_with("Assigning a virtual network adapter to both"));
        rec.dev.iface = None;
        rec.dev.mode = Some(DevMode::NetShared);
        assert!(check(&mut rec).contains("specifying its type"));
    }

    #[test]
    fn firewall_pairing() {
        let mut rec = set_rec();
        rec.dev.cmd = Some(DevCommand::Set);
        rec.dev.dev_type = Some(DevType::Net);
        rec.dev.net.fw_direction = Some(FwDirection::In);
        assert_eq!(
            check(&mut rec),
            "The --fw-direction option must be used either with the --fw-policy or --fw-rule option."
        );
        rec.dev.net.fw_direction = None;
        rec.dev.net.fw_rules.push(FwRule::parse("tcp * * * 80").unwrap());
        assert_eq!(check(&mut rec), "You must specify the --fw-direction option.");
        rec.dev.net.fw_direction = Some(FwDirection::In);
        assert!(validate(&mut rec, &FakeHost).is_ok());
    }

    // -- backup attach --

    #[test]
    fn backup_attach_rules() {
        let mut rec = set_rec();
        rec.backup_disk = Some("hdd0".into());
        assert_eq!(check(&mut rec), "You must specify the --backup-add option.");

        let mut rec = set_rec();
        rec.backup_cmd = Some(DevCommand::Add);
        rec.dev.iface = Some("sata".into());
        assert_eq!(check(&mut rec), "You must specify the --disk option.");

        rec.backup_disk = Some("hdd0".into());
        rec.dev.iface = None;
        rec.dev.position = Some(1);
        assert_eq!(check(&mut rec), "The --position option must be used with the --iface option.");

        let mut rec = set_rec();
        rec.backup_cmd = Some(DevCommand::Del);
        rec.dev.cmd = Some(DevCommand::Del);
        assert_eq!(
            check(&mut rec),
            "The --backup-* options cannot be used with the --device-* options."
        );
    }

    // -- task passes --

    #[test]
    fn migrate_flags() {
        let mut m = MigrateParam {
            change_sid: true,
            ..Default::default()
        };
        assert!(validate_migrate(&m).is_err());
        m.clone = true;
        assert!(validate_migrate(&m).is_ok());
        m.remove_src = true;
        assert_eq!(
            validate_migrate(&m).unwrap_err().to_string(),
            "The --remove-src option cannot be used with --clone"
        );
    }

    #[test]
    fn vnet_rules() {
        assert!(validate_vnet(&VNetParam::default()).is_ok());
        let mut v = VNetParam {
            cmd: VNetCmd::Add,
            ..Default::default()
        };
        assert_eq!(
            validate_vnet(&v).unwrap_err().to_string(),
            "The Virtual Network name is not specified."
        );
        v.name = Some("lan".into());
        v.vnet_type = Some(VNetType::Bridged);
        assert!(validate_vnet(&v).unwrap_err().to_string().starts_with("For a bridged"));
        v.ifname = Some("eth0".into());
        assert!(validate_vnet(&v).is_ok());
        v.mac = Some("001C42000001".into());
        assert!(validate_vnet(&v).is_err());
        v.mac = None;
        v.vnet_type = Some(VNetType::HostOnly);
        assert!(validate_vnet(&v).is_err());
    }

    #[test]
    fn privnet_rules() {
        let mut p = PrivNetParam {
            cmd: PrivNetCmd::Set,
            name: Some("p1".into()),
            ..Default::default()
        };
        assert_eq!(
            validate_privnet(&p).unwrap_err().to_string(),
            "Specify either the --ipadd or --ipdel option."
        );
        p.is_global = Some(false);
        assert!(validate_privnet(&p).is_ok());
    }

    #[test]
    fn disp_pairs() {
        let mut d = DispParam {
            device: Some("pci0".into()),
            ..Default::default()
        };
        assert_eq!(
            validate_disp(&d).unwrap_err().to_string(),
            "The --assignment option have to be specified simultaneously with --device."
        );
        d.assign_mode = Some(crate::record::AssignMode::Vm);
        assert!(validate_disp(&d).is_ok());
        d.vnc_public_key = Some("KEY".into());
        assert!(validate_disp(&d).is_err());
    }

    #[test]
    fn problem_report_needs_a_choice() {
        assert!(validate_problem_report(&ProblemReportParam::default()).is_err());
        let p = ProblemReportParam {
            dump: true,
            ..Default::default()
        };
        assert!(validate_problem_report(&p).is_ok());
    }
}
