//! Dispatcher-level commands of `prlsrvctl`: `set`, `info`, `shutdown`,
//! licensing, appliance installation and the argument-less verbs.

use cmdopt::{Event, Match, Parser};

use super::{bad_value, global_option, require_pwd, storage_login, toggle, uint};
use crate::context::ParserContext;
use crate::error::{CmdError, Result};
use crate::options::{OptId, Table};
use crate::record::{
    Action, AdvancedSecurityMode, AssignMode, BandwidthEntry, CpuLimitType, DispParam, MemLimit,
    NetworkClass, OfflineService, ParamRecord, ShapingEntry,
};
use crate::validate;
use crate::values::{self, SizeUnit};

/// Host-wide operations that can be protected with the administrator
/// password.
const SRV_REQUIRE_PWD: [&str; 4] = ["create-vm", "add-vm", "remove-vm", "clone-vm"];

pub fn build_server(
    ctx: &mut ParserContext,
    args: &[String],
    action: Action,
    table: &Table,
    start: usize,
) -> Result<ParamRecord> {
    let mut rec = ParamRecord::new(action);
    let mut parser = Parser::new(args, start);
    loop {
        let m = match parser.next_opt(table)? {
            Event::End => break,
            Event::Unknown { token, .. } => return Err(CmdError::Unrecognized(token)),
            Event::Opt(m) => m,
        };
        if global_option(ctx, &mut rec.login, &m)? || disp_option(ctx, &mut rec.disp, &m)? {
            continue;
        }
        let v = m.value();
        match m.id {
            OptId::Key => rec.key = Some(v.to_string()),
            OptId::Name => rec.new_name = Some(v.to_string()),
            OptId::Company => rec.company = Some(v.to_string()),
            OptId::File => rec.file = Some(v.to_string()),
            OptId::Batch => rec.batch = true,
            OptId::Json => rec.use_json = true,
            OptId::InfoFull => rec.full_info = true,
            _ => return Err(CmdError::Unrecognized(m.name)),
        }
    }

    validate::validate_disp(&rec.disp)?;
    log::debug!("{}: {:?}", action.name(), rec.disp);
    Ok(rec)
}

fn disp_option(ctx: &mut ParserContext, disp: &mut DispParam, m: &Match<OptId>) -> Result<bool> {
    let v = m.value();
    match m.id {
        OptId::MemLimit => {
            disp.mem_limit = Some(match v {
                "auto" => MemLimit::Auto,
                _ => MemLimit::Mb(values::parse_size(v, SizeUnit::Mb).ok_or_else(|| bad_value(m))?),
            })
        }
        OptId::MngSettings => {
            disp.allow_mng_settings = Some(match v {
                "allow" => true,
                "deny" => false,
                _ => return Err(bad_value(m)),
            })
        }
        OptId::MinSecurityLevel => disp.min_security_level = Some(v.to_string()),
        OptId::Cep => {
            disp.cep_mechanism = Some(values::on_off(v).ok_or_else(|| {
                CmdError::msg(format!("An invalid value was specified for --cep: {}", v))
            })?)
        }
        OptId::VerboseLog => disp.verbose_log = Some(toggle(m)?),
        OptId::BackupPath => disp.backup_path = Some(v.to_string()),
        OptId::BackupTmpdir => disp.backup_tmpdir = Some(v.to_string()),
        OptId::BackupTimeout => disp.backup_timeout = Some(uint(m)?),
        OptId::Storage => {
            storage_login(ctx, &mut disp.def_backup_storage, m)?;
            disp.change_backup_settings = true;
        }
        OptId::VmCpuLimitType => {
            disp.vm_cpulimit_type = Some(match v {
                "full" => CpuLimitType::Full,
                "guest" => CpuLimitType::Guest,
                _ => return Err(bad_value(m)),
            })
        }
        OptId::ListenInterface => disp.listen_interface = Some(v.to_string()),
        OptId::AddOffSrv => disp.offline_service = Some(OfflineService::parse(v)?),
        OptId::DelOffSrv => {
            disp.offline_service = Some(OfflineService {
                name: v.to_string(),
                del: true,
                ..Default::default()
            })
        }
        OptId::AddNetClass => disp.network_class = Some(NetworkClass::parse(v)?),
        OptId::DelNetClass => {
            disp.network_class = Some(NetworkClass {
                del: true,
                ..NetworkClass::parse(v)?
            })
        }
        OptId::AddShaping => disp.network_shaping = Some(ShapingEntry::parse(v)?),
        OptId::DelShaping => {
            disp.network_shaping = Some(ShapingEntry {
                del: true,
                ..ShapingEntry::parse(v)?
            })
        }
        OptId::AddBandwidth => disp.network_bandwidth = Some(BandwidthEntry::parse(v)?),
        OptId::DelBandwidth => {
            disp.network_bandwidth = Some(BandwidthEntry {
                del: true,
                ..BandwidthEntry::parse(v)?
            })
        }
        OptId::Shaping => {
            disp.shaping_enable = Some(values::on_off(v).ok_or_else(|| {
                CmdError::msg(format!("An invalid value was specified for --shaping: {}", v))
            })?)
        }
        OptId::LogRotation => disp.log_rotation = Some(toggle(m)?),
        OptId::AllowAttachScreenshots => disp.allow_attach_screenshots = Some(toggle(m)?),
        OptId::LockEditSettings => disp.lock_edit_settings = Some(toggle(m)?),
        OptId::RequirePwd => {
            let (cmd, on) = require_pwd(m, &SRV_REQUIRE_PWD)?;
            disp.cmd_require_pwd.insert(cmd, on);
        }
        OptId::AdvSecurityMode => {
            disp.adv_security_mode = Some(if v.starts_with("off") {
                AdvancedSecurityMode::NoAdvancedAuth
            } else if v.starts_with("auth") {
                AdvancedSecurityMode::SystemCredentials
            } else {
                return Err(bad_value(m));
            })
        }
        OptId::CpuFeaturesMask => disp.cpu_features_mask = Some(v.to_string()),
        OptId::VncPublicKey => {
            disp.vnc_public_key = Some(read_key(ctx, v)?);
            disp.set_vnc_encryption = true;
        }
        OptId::VncPrivateKey => {
            disp.vnc_private_key = Some(read_key(ctx, v)?);
            disp.set_vnc_encryption = true;
        }
        OptId::Device => disp.device = Some(v.to_string()),
        OptId::Assignment => {
            disp.assign_mode = Some(match v {
                "host" => AssignMode::Host,
                "vm" => AssignMode::Vm,
                _ => return Err(bad_value(m)),
            })
        }
        OptId::Force => disp.force = true,
        OptId::SuspendToPram => disp.suspend_vm_to_pram = true,
        OptId::InfoLicense => disp.info_license = true,
        _ => return Ok(false),
    }
    Ok(true)
}

/// Key file contents. An empty path clears the key.
fn read_key(ctx: &ParserContext, path: &str) -> Result<String> {
    if path.is_empty() {
        return Ok(String::new());
    }
    ctx.host().read_file(path).map_err(|source| CmdError::Io {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::options;
    use crate::redact::ArgBuffer;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn srv_set(extra: &[&str]) -> Result<ParamRecord> {
        let mut argv = args(&["prlsrvctl", "set"]);
        argv.extend(extra.iter().map(|s| s.to_string()));
        let mut ctx = ParserContext::detached();
        build_server(&mut ctx, &argv, Action::SrvSet, &options::disp_set(), 2)
    }

    // -- set --

    #[test]
    fn memory_and_settings() {
        let rec = srv_set(&["--mem-limit", "auto", "--mng-settings", "deny", "--cep", "on"]).unwrap();
        assert_eq!(rec.disp.mem_limit, Some(MemLimit::Auto));
        assert_eq!(rec.disp.allow_mng_settings, Some(false));
        assert_eq!(rec.disp.cep_mechanism, Some(true));

        let rec = srv_set(&["-m", "2g"]).unwrap();
        assert_eq!(rec.disp.mem_limit, Some(MemLimit::Mb(2048)));
        assert_eq!(
            srv_set(&["--mng-settings", "maybe"]).unwrap_err().to_string(),
            "An incorrect value for --mng-settings is specified: maybe"
        );
    }

    #[test]
    fn default_backup_storage_is_hidden() {
        let argv = args(&["prlsrvctl", "set", "--backup-storage", "u:pw@store"]);
        let buf = ArgBuffer::new(&argv);
        let mut ctx = ParserContext::new(Box::new(buf.clone()), Box::new(crate::context::FsHost));
        let rec = build_server(&mut ctx, &argv, Action::SrvSet, &options::disp_set(), 2).unwrap();
        assert!(rec.disp.change_backup_settings);
        assert_eq!(rec.disp.def_backup_storage.server, "store");
        assert_eq!(buf.display(3).as_deref(), Some("**********"));
    }

    #[test]
    fn shaping_entries() {
        let rec = srv_set(&["--del-shaping-entry", "eth0:1:100:10"]).unwrap();
        let entry = rec.disp.network_shaping.unwrap();
        assert!(entry.del);
        assert_eq!(entry.total_rate, 100);

        let rec = srv_set(&["--del-bandwidth-entry", "eth0:1000"]).unwrap();
        assert!(rec.disp.network_bandwidth.unwrap().del);

        let rec = srv_set(&["--del-offsrv", "vnc"]).unwrap();
        let srv = rec.disp.offline_service.unwrap();
        assert_eq!((srv.name.as_str(), srv.del), ("vnc", true));

        assert_eq!(
            srv_set(&["--add-network-class", "x:10.0.0.0/8"]).unwrap_err().to_string(),
            "An incorrect value is specified for network shaping: x:10.0.0.0/8"
        );
    }

    #[test]
    fn server_require_pwd_commands() {
        let rec = srv_set(&["--require-pwd", "add-vm:on", "--require-pwd", "clone-vm:off"]).unwrap();
        assert_eq!(rec.disp.cmd_require_pwd.get("add-vm"), Some(&true));
        assert_eq!(rec.disp.cmd_require_pwd.get("clone-vm"), Some(&false));
        assert!(srv_set(&["--require-pwd", "exit-fullscreen:on"]).is_err());
    }

    #[test]
    fn device_assignment_pairs() {
        let rec = srv_set(&["--device", "pci0", "--assignment", "vm"]).unwrap();
        assert_eq!(rec.disp.assign_mode, Some(AssignMode::Vm));
        assert_eq!(
            srv_set(&["--assignment", "host"]).unwrap_err().to_string(),
            "The --device option have to be specified simultaneously with --assignment."
        );
    }

    #[test]
    fn vnc_keys_are_read_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("pub.pem");
        let private = dir.path().join("key.pem");
        std::fs::write(&public, "PUBLIC").unwrap();
        std::fs::write(&private, "PRIVATE").unwrap();
        let rec = srv_set(&[
            "--vnc-public-key",
            public.to_str().unwrap(),
            "--vnc-private-key",
            private.to_str().unwrap(),
        ])
        .unwrap();
        assert!(rec.disp.set_vnc_encryption);
        assert_eq!(rec.disp.vnc_public_key.as_deref(), Some("PUBLIC"));
        assert_eq!(rec.disp.vnc_private_key.as_deref(), Some("PRIVATE"));

        let rec = srv_set(&["--vnc-public-key", "", "--vnc-private-key", ""]).unwrap();
        assert_eq!(rec.disp.vnc_public_key.as_deref(), Some(""));

        assert!(srv_set(&["--vnc-public-key", ""]).is_err());
        assert!(matches!(
            srv_set(&["--vnc-public-key", "/nonexistent/k", "--vnc-private-key", ""]),
            Err(CmdError::Io { .. })
        ));
    }

    #[test]
    fn advanced_security_mode_prefixes() {
        let rec = srv_set(&["--advanced-security-mode", "auth"]).unwrap();
        assert_eq!(rec.disp.adv_security_mode, Some(AdvancedSecurityMode::SystemCredentials));
        assert!(srv_set(&["--advanced-security-mode", "on"]).is_err());
    }

    // -- other verbs --

    #[test]
    fn info_and_license() {
        let mut ctx = ParserContext::detached();
        let rec = build_server(
            &mut ctx,
            &args(&["prlsrvctl", "info", "--license", "-j"]),
            Action::SrvInfo,
            &options::disp_info(),
            2,
        )
        .unwrap();
        assert!(rec.disp.info_license);
        assert!(rec.use_json);

        let rec = build_server(
            &mut ctx,
            &args(&["prlsrvctl", "install-license", "-k", "KEY-1", "-n", "Jo", "-c", "Acme"]),
            Action::SrvInstallLicense,
            &options::license(),
            2,
        )
        .unwrap();
        assert_eq!(rec.key.as_deref(), Some("KEY-1"));
        assert_eq!(rec.new_name.as_deref(), Some("Jo"));
        assert_eq!(rec.company.as_deref(), Some("Acme"));
    }

    #[test]
    fn argument_less_verbs_reject_positionals() {
        let mut ctx = ParserContext::detached();
        let err = build_server(
            &mut ctx,
            &args(&["prlsrvctl", "update-license", "now"]),
            Action::SrvUpdateLicense,
            &options::no_options(),
            2,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized option: now");
    }
}
