//! Resource limits, VM-wide settings and guest network options.

use cmdopt::Match;

use super::vm::VmBuilder;
use super::{bad_secret, bad_value, require_pwd, secret, strict_toggle, toggle, uint};
use crate::catalog::NetfilterMode;
use crate::error::{CmdError, Result};
use crate::options::OptId;
use crate::record::{
    Accel3d, Autostart, Autostop, CtResource, CtResourceKind, FwDirection, FwPolicy, FwRule,
    MemGuarantee, NetParam, ParamRecord, RateEntry, SmartMouse, VncMode,
};
use crate::values::{self, SizeUnit};

/// Operations a VM can protect with the host password.
const VM_REQUIRE_PWD: [&str; 4] = [
    "exit-fullscreen",
    "change-vm-state",
    "manage-snapshots",
    "change-guest-pwd",
];

/// "An invalid value was specified" wording used by the guest tools
/// switches.
fn invalid_value(m: &Match<OptId>) -> CmdError {
    CmdError::msg(format!(
        "An invalid value was specified for {}: {}",
        m.name,
        m.value()
    ))
}

/// Plain `on|off|yes|no` record switches.
fn switch(rec: &mut ParamRecord, id: OptId) -> Option<&mut Option<bool>> {
    let field = match id {
        OptId::CpuHotplug => &mut rec.cpu_hotplug,
        OptId::MemHotplug => &mut rec.mem_hotplug,
        OptId::IsTemplate => &mut rec.is_template,
        OptId::HighResolution => &mut rec.high_resolution,
        OptId::StickyMouse => &mut rec.sticky_mouse,
        OptId::KeyboardOptimize => &mut rec.keyboard_optimize,
        OptId::AutoShareCamera => &mut rec.auto_share_camera,
        OptId::AutoShareBluetooth => &mut rec.auto_share_bluetooth,
        OptId::SupportUsb30 => &mut rec.support_usb30,
        OptId::EfiBoot => &mut rec.efi_boot,
        OptId::SelectBootDev => &mut rec.select_boot_dev,
        OptId::FasterVm => &mut rec.faster_vm,
        OptId::AdaptiveHypervisor => &mut rec.adaptive_hypervisor,
        OptId::AutoCompress => &mut rec.auto_compress,
        OptId::NestedVirt => &mut rec.nested_virt,
        OptId::PmuVirt => &mut rec.pmu_virt,
        OptId::LongerBatteryLife => &mut rec.longer_battery_life,
        OptId::BatteryStatus => &mut rec.battery_status,
        OptId::WinSystrayInMacMenu => &mut rec.winsystray_in_macmenu,
        OptId::AutoSwitchFullscreen => &mut rec.auto_switch_fullscreen,
        OptId::DisableAero => &mut rec.disable_aero,
        OptId::HideMinWindows => &mut rec.hide_min_windows,
        OptId::LockOnSuspend => &mut rec.lock_on_suspend,
        OptId::IsolateVm => &mut rec.isolate_vm,
        OptId::SmartGuard => &mut rec.smart_guard,
        OptId::SgNotifyBeforeCreate => &mut rec.sg_notify_before_create,
        OptId::LockEditSettings => &mut rec.disp.lock_edit_settings,
        OptId::RateBound => &mut rec.ratebound,
        OptId::OffMan => &mut rec.offline_management,
        _ => return None,
    };
    Some(field)
}

/// Switches that only take `on` or `off`.
fn strict_switch(rec: &mut ParamRecord, id: OptId) -> Option<&mut Option<bool>> {
    let field = match id {
        OptId::VerticalSync => &mut rec.vertical_sync,
        OptId::SyncHostPrinters => &mut rec.sync_host_printers,
        OptId::SyncDefaultPrinter => &mut rec.sync_default_printer,
        _ => return None,
    };
    Some(field)
}

/// Guest tools switches.
fn guest_switch(rec: &mut ParamRecord, id: OptId) -> Option<&mut Option<bool>> {
    let field = match id {
        OptId::ApplyIpOnly => &mut rec.apply_iponly,
        OptId::UseDefAnswers => &mut rec.use_default_answers,
        OptId::ToolsAutoUpdate => &mut rec.tools_autoupdate,
        OptId::SmartMount => &mut rec.smart_mount,
        _ => return None,
    };
    Some(field)
}

/// Adapter switches, reported with the same wording.
fn net_switch(net: &mut NetParam, id: OptId) -> Option<&mut Option<bool>> {
    let field = match id {
        OptId::Configure => &mut net.configure,
        OptId::IpFilter => &mut net.ip_filter,
        OptId::MacFilter => &mut net.mac_filter,
        OptId::PreventPromisc => &mut net.prevent_promisc,
        _ => return None,
    };
    Some(field)
}

impl VmBuilder<'_> {
    pub(super) fn resource_option(&mut self, m: &Match<OptId>) -> Result<bool> {
        let rec = &mut self.rec;
        let v = m.value();
        match m.id {
            OptId::Cpus => rec.cpus = Some(uint(m)?),
            OptId::CpuUnits => rec.cpuunits = Some(uint(m).ok().filter(|&n| n > 0).ok_or_else(|| bad_value(m))?),
            OptId::CpuLimit => rec.cpulimit = Some(values::parse_cpulimit(v).ok_or_else(|| bad_value(m))?),
            OptId::CpuMask => rec.cpumask = Some(v.to_string()),
            OptId::NodeMask => rec.nodemask = Some(v.to_string()),
            OptId::IoPrio => rec.ioprio = Some(uint(m).ok().filter(|&n| n <= 7).ok_or_else(|| bad_value(m))?),
            OptId::IoLimit => rec.iolimit = Some(values::parse_size(v, SizeUnit::Bytes).ok_or_else(|| bad_value(m))?),
            OptId::IopsLimit => rec.iopslimit = Some(uint(m)?),
            OptId::MemSize => rec.memsize = Some(positive_mb(m)?),
            OptId::VideoSize => rec.videosize = Some(positive_mb(m)?),
            OptId::MemQuota => {
                return Err(CmdError::msg(
                    "The --memquota is deprecated, please use --memguarantee instead",
                ))
            }
            OptId::MemGuarantee => {
                rec.memguarantee = Some(match v {
                    "auto" => MemGuarantee::Auto,
                    _ => MemGuarantee::Percent(uint(m)?),
                })
            }
            OptId::SwapPages | OptId::Swap => {
                let def_div = if m.id == OptId::Swap { 4096 } else { 1 };
                let (barrier, limit) = values::parse_two_longs(v, 4096, def_div).ok_or_else(|| {
                    CmdError::msg(format!("an invalid value was specified for {}: {}", m.name, v))
                })?;
                rec.ct_resources.push(CtResource {
                    kind: CtResourceKind::SwapPages,
                    barrier,
                    limit,
                });
            }
            OptId::QuotaUgidLimit => {
                let n = values::parse_uint(v).ok_or_else(|| {
                    CmdError::msg(format!("an invalid value was specified for {}: {}", m.name, v))
                })?;
                rec.ct_resources.push(CtResource {
                    kind: CtResourceKind::QuotaUgidLimit,
                    barrier: n.into(),
                    limit: n.into(),
                });
            }
            OptId::Capability => rec.cap.apply(v)?,
            OptId::Netfilter => {
                rec.netfilter = Some(NetfilterMode::parse(v).ok_or_else(|| {
                    CmdError::msg(format!("An incorrect netfilter mode ('{}') was specified.", v))
                })?)
            }
            OptId::Features => rec.features.apply(v)?,
            OptId::AppTemplate => rec.app_templates.push(v.to_string()),
            OptId::Rate => rec.rate.push(RateEntry::parse(v).ok_or_else(|| bad_value(m))?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub(super) fn settings_option(&mut self, m: &Match<OptId>) -> Result<bool> {
        if let Some(field) = switch(&mut self.rec, m.id) {
            *field = Some(toggle(m)?);
            return Ok(true);
        }
        if let Some(field) = strict_switch(&mut self.rec, m.id) {
            *field = Some(strict_toggle(m)?);
            return Ok(true);
        }

        let v = m.value();
        let rec = &mut self.rec;
        match m.id {
            OptId::Description => rec.description = Some(v.to_string()),
            OptId::VmName => rec.name = Some(v.to_string()),
            OptId::SystemFlags => rec.system_flags = Some(v.to_string()),
            OptId::Autostart => rec.autostart = Some(Autostart::parse(v).ok_or_else(|| bad_value(m))?),
            OptId::AutostartDelay => rec.autostart_delay = Some(uint(m)?),
            OptId::Autostop => {
                rec.autostop = Some(match v {
                    "stop" => Autostop::Stop,
                    "suspend" => Autostop::Suspend,
                    _ => return Err(bad_value(m)),
                })
            }
            OptId::StartupView => rec.startup_view = Some(v.to_string()),
            OptId::OnShutdown => rec.on_shutdown = Some(v.to_string()),
            OptId::OnWindowClose => rec.on_window_close = Some(v.to_string()),
            OptId::ExtBootDev => rec.ext_boot_dev = Some(v.to_string()),
            OptId::RestrictEditing => rec.restrict_editing = true,
            OptId::Expiration => rec.expiration.apply(v)?,
            OptId::Accel3d => {
                rec.v3d_accelerate = Some(match v {
                    "off" => Accel3d::Off,
                    "highest" => Accel3d::Highest,
                    "dx9" => Accel3d::Dx9,
                    _ => return Err(bad_value(m)),
                })
            }
            OptId::SmartMouse => {
                rec.smart_mouse_optimize = Some(match v {
                    "off" => SmartMouse::Off,
                    "on" => SmartMouse::On,
                    "auto" => SmartMouse::Auto,
                    _ => return Err(bad_value(m)),
                })
            }
            OptId::RequirePwd => {
                let (cmd, on) = require_pwd(m, &VM_REQUIRE_PWD)?;
                rec.disp.cmd_require_pwd.insert(cmd, on);
            }
            OptId::SgInterval => rec.sg_interval = Some(uint(m)?),
            OptId::SgMaxSnapshots => rec.sg_max_snapshots = Some(uint(m)?),
            OptId::VncMode => rec.vnc.mode = Some(VncMode::parse(v).ok_or_else(|| bad_value(m))?),
            OptId::VncPort => rec.vnc.port = Some(uint(m)?),
            OptId::VncPasswd => rec.vnc.passwd = Some(secret(self.ctx, m)),
            OptId::VncNoPasswd => rec.vnc.nopasswd = true,
            OptId::VncAddress => rec.vnc.address = Some(v.to_string()),
            OptId::OffSrv => rec.offline_services.push(v.to_string()),
            OptId::HaEnable => {
                rec.ha_enable = Some(values::on_off(v).ok_or_else(|| {
                    CmdError::msg(format!("An incorrect value ('{}') is specified for --ha-enable", v))
                })?)
            }
            OptId::HaPrio => {
                rec.ha_prio = Some(values::parse_uint(v).ok_or_else(|| {
                    CmdError::msg(format!("An incorrect value ('{}') is specified for --ha-prio", v))
                })?)
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Settings of the guest network stack. Addresses and gateways
    /// collect in the pending [`NetParam`] until the device is known.
    pub(super) fn guest_net_option(&mut self, m: &Match<OptId>) -> Result<bool> {
        let v = m.value();
        let field = match guest_switch(&mut self.rec, m.id) {
            Some(field) => Some(field),
            None => net_switch(&mut self.net, m.id),
        };
        if let Some(field) = field {
            *field = Some(values::on_off(v).ok_or_else(|| invalid_value(m))?);
            return Ok(true);
        }

        let net = &mut self.net;
        match m.id {
            OptId::HostName => self.rec.hostname = Some(v.to_string()),
            OptId::SearchDomain => net.searchdomain = values::split(v, " ,", false),
            OptId::NameServer => net.nameserver = values::split(v, " ,", false),
            OptId::IpSet => {
                net.set_ip = true;
                net.ip.push(values::normalize_ip(v));
            }
            OptId::IpAdd => net.ip.push(values::normalize_ip(v)),
            OptId::IpDel if v == "all" => net.delall_ip = true,
            OptId::IpDel => net.ip_del.push(values::normalize_ip(v)),
            OptId::Gw => net.gw = Some(v.to_string()),
            OptId::Gw6 => net.gw6 = Some(v.to_string()),
            OptId::Dhcp => net.dhcp = Some(toggle(m)?),
            OptId::Dhcp6 => net.dhcp6 = Some(toggle(m)?),
            OptId::Fw => net.fw_enable = Some(toggle(m)?),
            OptId::FwPolicy => {
                net.fw_policy = Some(match v {
                    "accept" => FwPolicy::Accept,
                    "deny" => FwPolicy::Deny,
                    _ => return Err(bad_value(m)),
                })
            }
            OptId::FwDirection => {
                net.fw_direction = Some(match v {
                    "in" => FwDirection::In,
                    "out" => FwDirection::Out,
                    _ => return Err(bad_value(m)),
                })
            }
            OptId::FwRule => net.fw_rules.push(FwRule::parse(v)?),
            OptId::UserPasswd => {
                let pw = secret(self.ctx, m);
                if !v.contains(':') {
                    return Err(bad_secret(m));
                }
                self.rec.userpasswd = Some(pw);
            }
            OptId::HostAdmin => self.rec.disp.host_admin = Some(secret(self.ctx, m)),
            OptId::Crypted => self.rec.crypted = true,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// `--memsize` and `--videosize`: MB, suffix aware, never zero.
fn positive_mb(m: &Match<OptId>) -> Result<u64> {
    values::parse_size(m.value(), SizeUnit::Mb)
        .filter(|&n| n > 0)
        .ok_or_else(|| bad_value(m))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::commands::build_params;
    use crate::context::{FsHost, ParserContext};
    use crate::error::Result;
    use crate::options;
    use crate::redact::ArgBuffer;
    use crate::record::{
        Action, Autostart, CtResourceKind, FwDirection, MemGuarantee, ParamRecord,
    };
    use crate::values::{CpuLimit, LIMIT_MAX};

    fn set(extra: &[&str]) -> Result<ParamRecord> {
        let mut args: Vec<String> = vec!["prlctl".into(), "set".into(), "vm1".into()];
        args.extend(extra.iter().map(|s| s.to_string()));
        let mut ctx = ParserContext::detached();
        build_params(&mut ctx, &args, Action::Set, &options::set(), 2)
    }

    fn message(extra: &[&str]) -> String {
        set(extra).unwrap_err().to_string()
    }

    // -- resources --

    #[test]
    fn cpu_and_memory() {
        let rec = set(&["--cpus", "4", "--memsize", "2G", "--cpulimit", "50%", "--cpuunits", "1000"]).unwrap();
        assert_eq!(rec.cpus, Some(4));
        assert_eq!(rec.memsize, Some(2048));
        assert_eq!(rec.cpulimit, Some(CpuLimit::Percent(50)));
        assert_eq!(rec.cpuunits, Some(1000));
    }

    #[test]
    fn resource_bounds() {
        assert_eq!(message(&["--cpuunits", "0"]), "An incorrect value for --cpuunits is specified: 0");
        assert_eq!(message(&["--ioprio", "8"]), "An incorrect value for --ioprio is specified: 8");
        assert_eq!(message(&["--memsize", "0"]), "An incorrect value for --memsize is specified: 0");
        assert!(set(&["--ioprio", "7"]).is_ok());
    }

    #[test]
    fn iolimit_counts_bytes() {
        assert_eq!(set(&["--iolimit", "10"]).unwrap().iolimit, Some(10 * 1024 * 1024));
        assert_eq!(set(&["--iolimit", "512k"]).unwrap().iolimit, Some(512 * 1024));
    }

    #[test]
    fn memquota_is_gone() {
        assert_eq!(
            message(&["--memquota", "10"]),
            "The --memquota is deprecated, please use --memguarantee instead"
        );
    }

    #[test]
    fn memguarantee_forms() {
        assert_eq!(set(&["--memguarantee", "auto"]).unwrap().memguarantee, Some(MemGuarantee::Auto));
        assert_eq!(
            set(&["--memguarantee", "40"]).unwrap().memguarantee,
            Some(MemGuarantee::Percent(40))
        );
    }

    #[test]
    fn container_resources() {
        let rec = set(&["--swappages", "1000:2000", "--quotaugidlimit", "100"]).unwrap();
        assert_eq!(rec.ct_resources.len(), 2);
        assert_eq!(rec.ct_resources[0].kind, CtResourceKind::SwapPages);
        assert_eq!((rec.ct_resources[0].barrier, rec.ct_resources[0].limit), (1000, 2000));
        assert_eq!(rec.ct_resources[1].kind, CtResourceKind::QuotaUgidLimit);

        let rec = set(&["--swap", "unlimited"]).unwrap();
        assert_eq!(rec.ct_resources[0].barrier, LIMIT_MAX);
        assert_eq!(
            message(&["--swappages", "lots"]),
            "an invalid value was specified for --swappages: lots"
        );
    }

    #[test]
    fn netfilter_mode() {
        assert!(set(&["--netfilter", "stateful"]).unwrap().netfilter.is_some());
        assert_eq!(
            message(&["--netfilter", "paranoid"]),
            "An incorrect netfilter mode ('paranoid') was specified."
        );
    }

    // -- switches --

    #[test]
    fn loose_and_strict_switches() {
        let rec = set(&["--faster-vm", "yes", "--vertical-sync", "on", "--template", "no"]).unwrap();
        assert_eq!(rec.faster_vm, Some(true));
        assert_eq!(rec.vertical_sync, Some(true));
        assert_eq!(rec.is_template, Some(false));
        assert_eq!(rec.efi_boot, None);
        assert_eq!(
            message(&["--vertical-sync", "yes"]),
            "An incorrect value for --vertical-sync is specified: yes"
        );
    }

    #[test]
    fn guest_tools_wording() {
        assert_eq!(
            message(&["--tools-autoupdate", "maybe"]),
            "An invalid value was specified for --tools-autoupdate: maybe"
        );
        let rec = set(&["--device-set", "net0", "--ipfilter", "on"]).unwrap();
        assert_eq!(rec.dev.net.ip_filter, Some(true));
    }

    #[test]
    fn ha_wording() {
        assert_eq!(message(&["--ha-prio", "high"]), "An incorrect value ('high') is specified for --ha-prio");
        assert_eq!(set(&["--ha_enable", "off"]).unwrap().ha_enable, Some(false));
    }

    // -- enumerations --

    #[test]
    fn autostart_aliases() {
        assert_eq!(set(&["--onboot", "yes"]).unwrap().autostart, Some(Autostart::On));
        assert_eq!(message(&["--onboot", "later"]), "An incorrect value for --onboot is specified: later");
    }

    #[test]
    fn require_pwd_per_operation() {
        let rec = set(&["--require-pwd", "manage-snapshots:on", "--require-pwd", "exit-fullscreen:off"]).unwrap();
        assert_eq!(rec.disp.cmd_require_pwd.get("manage-snapshots"), Some(&true));
        assert_eq!(rec.disp.cmd_require_pwd.get("exit-fullscreen"), Some(&false));
        assert!(set(&["--require-pwd", "create-vm:on"]).is_err());
        assert!(set(&["--require-pwd", "manage-snapshots"]).is_err());
    }

    // -- guest network --

    #[test]
    fn ipset_replaces_and_adds() {
        let rec = set(&["--device-set", "net0", "--ipset", "fe80::1", "--ipadd", "10.0.0.1"]).unwrap();
        assert!(rec.dev.net.set_ip);
        assert_eq!(rec.dev.net.ip, vec!["FE80:0:0:0:0:0:0:1".to_string(), "10.0.0.1".to_string()]);
    }

    #[test]
    fn ipdel_all() {
        let rec = set(&["--device-set", "net0", "--ipdel", "all"]).unwrap();
        assert!(rec.dev.net.delall_ip);
        assert!(rec.dev.net.ip_del.is_empty());
    }

    #[test]
    fn empty_gateway_clears() {
        let rec = set(&["--device-set", "net0", "--gw", ""]).unwrap();
        assert_eq!(rec.dev.net.gw.as_deref(), Some(""));
    }

    #[test]
    fn firewall_rules() {
        let rec = set(&[
            "--device-set",
            "net0",
            "--fw-direction",
            "in",
            "--fw-rule",
            "tcp * * * 22",
        ])
        .unwrap();
        assert_eq!(rec.dev.net.fw_direction, Some(FwDirection::In));
        assert_eq!(rec.dev.net.fw_rules.len(), 1);
        assert_eq!(
            message(&["--device-set", "net0", "--fw-policy", "drop"]),
            "An incorrect value for --fw-policy is specified: drop"
        );
    }

    #[test]
    fn user_password_needs_a_user() {
        let rec = set(&["--userpasswd", "root:secret"]).unwrap();
        assert_eq!(rec.userpasswd.as_ref().map(|s| s.expose()), Some("root:secret"));
        assert_eq!(message(&["--userpasswd", "secret"]), "An incorrect value is specified for --userpasswd");
    }

    #[test]
    fn rejected_user_password_is_still_wiped() {
        let args: Vec<String> = ["prlctl", "set", "vm1", "--userpasswd", "hunter2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let buf = ArgBuffer::new(&args);
        let mut ctx = ParserContext::new(Box::new(buf.clone()), Box::new(FsHost));
        let err = build_params(&mut ctx, &args, Action::Set, &options::set(), 2).unwrap_err();
        assert!(!err.to_string().contains("hunter2"));
        assert_eq!(buf.display(4).as_deref(), Some("*******"));
    }
}
