//! Device selectors and properties of `prlctl set`.

use cmdopt::Match;

use super::vm::VmBuilder;
use super::{bad_value, toggle, uuid_or_verbatim};
use crate::error::{CmdError, Result};
use crate::options::OptId;
use crate::record::{AdapterType, DevCommand, DevMode, DevType, HddDeleteMode, SocketMode};
use crate::values::{self, SizeUnit};

/// Containers expose their venet interface under this index.
const VENET0: &str = "venet0";
const VENET0_ID: &str = "net4294967295";

fn venet_alias(name: &str) -> String {
    if name == VENET0 {
        VENET0_ID.to_string()
    } else {
        name.to_string()
    }
}

fn non_empty(s: &Option<String>) -> bool {
    s.as_deref().is_some_and(|s| !s.is_empty())
}

impl VmBuilder<'_> {
    /// Conflicts that depend on what has been seen so far.
    pub(super) fn check_conflicts(&self, m: &Match<OptId>) -> Result<()> {
        let dev = &self.rec.dev;
        match m.id {
            OptId::DeviceAdd if dev.cmd.is_some() => Err(CmdError::msg(
                "The --device-add option is specified several times.",
            )),
            OptId::DeviceSet if dev.cmd.is_some() => Err(CmdError::msg(
                "The --device-set option is specified several times.",
            )),
            OptId::Device if non_empty(&dev.image) => Err(CmdError::Conflict("--device", "--image")),
            OptId::Image if non_empty(&dev.device) => Err(CmdError::Conflict("--device", "--image")),
            OptId::Enable if dev.disable => Err(CmdError::Conflict("--enable", "--disable")),
            OptId::Disable if dev.enable => Err(CmdError::Conflict("--enable", "--disable")),
            OptId::Connect if dev.disconnect => Err(CmdError::Conflict("--connect", "--disconnect")),
            OptId::Disconnect if dev.connect => Err(CmdError::Conflict("--disconnect", "--connect")),
            OptId::BackupAdd | OptId::BackupDel if self.rec.backup_cmd.is_some() => Err(CmdError::msg(
                "Multiple --backup-add or --backup-del options are specified.",
            )),
            _ => Ok(()),
        }
    }

    pub(super) fn device_option(&mut self, m: &Match<OptId>) -> Result<bool> {
        let v = m.value();
        let dev = &mut self.rec.dev;
        match m.id {
            // selectors
            OptId::DeviceAdd => {
                let t = DevType::from_name(v).ok_or_else(|| {
                    CmdError::msg(format!("An incorrect parameter for --device-add is specified: {}", v))
                })?;
                dev.dev_type = Some(t);
                dev.cmd = Some(DevCommand::Add);
            }
            OptId::NetifAdd => {
                dev.dev_type = Some(DevType::Net);
                dev.cmd = Some(DevCommand::Add);
                self.net.ifname = Some(v.to_string());
            }
            OptId::IfName => {
                dev.dev_type = Some(DevType::Net);
                dev.cmd = Some(DevCommand::Set);
                dev.name = Some(v.to_string());
                self.net.ifname = Some(v.to_string());
            }
            OptId::DeviceSet => {
                let name = venet_alias(v);
                let prefix = name.split(|c: char| c.is_ascii_digit()).next().unwrap_or_default();
                let t = DevType::from_name(prefix).ok_or_else(|| {
                    CmdError::msg(format!("An incorrect parameter for --device-set is specified: {}", name))
                })?;
                dev.dev_type = Some(t);
                dev.name = Some(name);
                dev.cmd = Some(DevCommand::Set);
            }
            OptId::DeviceDel => {
                dev.name = Some(venet_alias(v));
                dev.cmd = Some(DevCommand::Del);
            }
            OptId::NetifDel => {
                dev.dev_type = Some(DevType::Net);
                dev.name = Some(v.to_string());
                dev.cmd = Some(DevCommand::Del);
            }
            OptId::DeviceConnect => {
                dev.name = Some(v.to_string());
                dev.cmd = Some(DevCommand::Connect);
            }
            OptId::DeviceDisconnect => {
                dev.name = Some(v.to_string());
                dev.cmd = Some(DevCommand::Disconnect);
            }
            OptId::DeviceBootOrder => {
                dev.name = Some(v.to_string());
                dev.cmd = Some(DevCommand::BootOrder);
            }

            // properties
            OptId::Device => dev.device = Some(v.to_string()),
            OptId::Image => dev.image = Some(v.to_string()),
            OptId::Mnt => dev.mnt = Some(v.to_string()),
            OptId::Recreate => dev.recreate = true,
            OptId::Size => dev.size = Some(values::parse_size(v, SizeUnit::Mb).ok_or_else(|| bad_value(m))?),
            OptId::Offline => dev.offline = true,
            OptId::NoFsResize => dev.no_fs_resize = true,
            OptId::Split => dev.split = true,
            OptId::Enable => dev.enable = true,
            OptId::Disable => dev.disable = true,
            OptId::Connect => dev.connect = true,
            OptId::Disconnect => dev.disconnect = true,
            OptId::Iface => dev.iface = Some(v.to_string()),
            OptId::Subtype => dev.subtype = Some(v.to_string()),
            OptId::VNetwork => dev.vnetwork = Some(v.to_string()),
            OptId::Passthr => dev.passthr = Some(values::parse_int(v).ok_or_else(|| bad_value(m))?),
            OptId::Position => dev.position = Some(values::parse_int(v).ok_or_else(|| bad_value(m))?),
            OptId::DevType => dev.mode = Some(DevMode::parse(v).ok_or_else(|| bad_value(m))?),
            OptId::AdapterType => {
                self.net.adapter_type = Some(AdapterType::parse(v).ok_or_else(|| bad_value(m))?)
            }
            OptId::Mac => dev.mac = Some(values::parse_mac(v).ok_or_else(|| bad_value(m))?),
            OptId::Output => dev.output = Some(v.to_string()),
            OptId::Socket => dev.socket = Some(v.to_string()),
            OptId::SocketTcp => {
                if !values::check_address(v) {
                    return Err(CmdError::msg(format!(
                        "An incorrect value for --socket-tcp is specified: {}.\n\
                         The value must be specified as host:port.",
                        v
                    )));
                }
                dev.socket_tcp = Some(v.to_string());
            }
            OptId::SocketUdp => dev.socket_udp = Some(v.to_string()),
            OptId::SocketMode => {
                dev.socket_mode = Some(match v {
                    "server" => SocketMode::Server,
                    "client" => SocketMode::Client,
                    _ => return Err(bad_value(m)),
                })
            }
            OptId::Mixer => dev.mixer = Some(v.to_string()),

            // image handling on delete
            OptId::DestroyHdd => self.hdd_delete.push(HddDeleteMode::Destroy),
            OptId::DestroyHddForce => self.hdd_delete.push(HddDeleteMode::DestroyForce),
            OptId::DetachHdd => self.hdd_delete.push(HddDeleteMode::Detach),
            OptId::RenameExtDisks => self.rec.rename_ext_disks = true,
            OptId::AutoCompact => self.rec.autocompact = Some(toggle(m)?),

            // backup attach
            OptId::BackupAdd => {
                self.rec.backup_cmd = Some(DevCommand::Add);
                self.rec.backup_id = Some(uuid_or_verbatim(v));
            }
            OptId::BackupDel => {
                self.rec.backup_cmd = Some(DevCommand::Del);
                self.rec.backup_id = Some(uuid_or_verbatim(v));
            }
            OptId::BackupDisk => self.rec.backup_disk = Some(v.to_string()),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Settle device state once all options are read.
    pub(super) fn finish_devices(&mut self) -> Result<()> {
        if let Some(&kind) = self.hdd_delete.first() {
            if self.hdd_delete.iter().any(|&k| k != kind) {
                return Err(CmdError::msg(
                    "Only one of options --detach-only, --destroy-image, --destroy-image-force can be specified.",
                ));
            }
            self.rec.hdd_delete = kind;
        }

        let rec = &mut self.rec;
        if rec.dev.dev_type == Some(DevType::Hdd) {
            if rec.hdd_block_size.is_some() {
                rec.dev.hdd_block_size = rec.hdd_block_size;
            }
            if let Some(on) = rec.autocompact.take() {
                rec.dev.autocompact = Some(on);
            }
        }

        // `set --diskspace N` without a device means the first disk
        if rec.dev.size.is_some() && rec.dev.dev_type.is_none() {
            rec.dev.name = Some("hdd0".to_string());
            rec.dev.dev_type = Some(DevType::Hdd);
            rec.dev.cmd = Some(DevCommand::Set);
        }

        self.attach_net();
        Ok(())
    }

    /// Hand the guest network settings to the device. DNS settings of a
    /// non-network device apply to the whole VM.
    fn attach_net(&mut self) {
        let mut net = std::mem::take(&mut self.net);
        let rec = &mut self.rec;
        if rec.dev.dev_type != Some(DevType::Net) {
            rec.searchdomain = std::mem::take(&mut net.searchdomain);
            rec.nameserver = std::mem::take(&mut net.nameserver);
        }
        rec.dev.net = net;
        if rec.dev.net.is_updated() && rec.dev.dev_type.is_none() {
            log::debug!("network settings without a device, using the first adapter");
            rec.dev.dev_type = Some(DevType::Net);
            rec.dev.cmd = Some(DevCommand::Set);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::commands::build_params;
    use crate::context::ParserContext;
    use crate::error::{CmdError, Result};
    use crate::options;
    use crate::record::{Action, DevCommand, DevMode, DevType, HddDeleteMode, ParamRecord};

    fn set(extra: &[&str]) -> Result<ParamRecord> {
        let mut args: Vec<String> = vec!["prlctl".into(), "set".into(), "vm1".into()];
        args.extend(extra.iter().map(|s| s.to_string()));
        let mut ctx = ParserContext::detached();
        build_params(&mut ctx, &args, Action::Set, &options::set(), 2)
    }

    fn message(extra: &[&str]) -> String {
        set(extra).unwrap_err().to_string()
    }

    // -- selectors --

    #[test]
    fn add_a_disk() {
        let rec = set(&["--device-add", "hdd", "--size", "10G"]).unwrap();
        assert_eq!(rec.dev.cmd, Some(DevCommand::Add));
        assert_eq!(rec.dev.dev_type, Some(DevType::Hdd));
        assert_eq!(rec.dev.size, Some(10 * 1024));
    }

    #[test]
    fn device_set_type_from_name_prefix() {
        let rec = set(&["--device-set", "cdrom1", "--image", "/iso/boot.iso"]).unwrap();
        assert_eq!(rec.dev.dev_type, Some(DevType::Cdrom));
        assert_eq!(rec.dev.name.as_deref(), Some("cdrom1"));
        assert_eq!(rec.dev.image.as_deref(), Some("/iso/boot.iso"));
        assert_eq!(
            message(&["--device-set", "disk0"]),
            "An incorrect parameter for --device-set is specified: disk0"
        );
    }

    #[test]
    fn venet_is_addressed_by_index() {
        let rec = set(&["--device-set", "venet0", "--ipadd", "10.0.0.2"]).unwrap();
        assert_eq!(rec.dev.name.as_deref(), Some("net4294967295"));
        assert_eq!(rec.dev.dev_type, Some(DevType::Net));
        let rec = set(&["--device-del", "venet0"]).unwrap();
        assert_eq!(rec.dev.name.as_deref(), Some("net4294967295"));
        assert_eq!(rec.dev.cmd, Some(DevCommand::Del));
    }

    #[test]
    fn ifname_selects_a_network_adapter() {
        let rec = set(&["--ifname", "eth0", "--dhcp", "on"]).unwrap();
        assert_eq!(rec.dev.cmd, Some(DevCommand::Set));
        assert_eq!(rec.dev.dev_type, Some(DevType::Net));
        assert_eq!(rec.dev.net.ifname.as_deref(), Some("eth0"));
        assert_eq!(rec.dev.net.dhcp, Some(true));
    }

    #[test]
    fn unknown_device_class() {
        assert_eq!(
            message(&["--device-add", "tape"]),
            "An incorrect parameter for --device-add is specified: tape"
        );
    }

    // -- conflicts --

    #[test]
    fn second_selector_is_rejected() {
        assert_eq!(
            message(&["--device-add", "hdd", "--device-add", "cdrom"]),
            "The --device-add option is specified several times."
        );
        assert_eq!(
            message(&["--device-add", "hdd", "--device-set", "hdd0"]),
            "The --device-set option is specified several times."
        );
    }

    #[test]
    fn paired_switches_conflict() {
        assert_eq!(
            message(&["--device-set", "net0", "--enable", "--disable"]),
            "Unable to simultaneously use --enable and --disable"
        );
        assert_eq!(
            message(&["--device-set", "net0", "--disconnect", "--connect"]),
            "Unable to simultaneously use --connect and --disconnect"
        );
        assert_eq!(
            message(&["--device-set", "cdrom0", "--image", "/a.iso", "--device", "/dev/sr0"]),
            "Unable to simultaneously use --device and --image"
        );
        // an empty image does not count
        assert!(set(&["--device-set", "cdrom0", "--image", "", "--device", "/dev/sr0"]).is_ok());
    }

    #[test]
    fn conflicts_depend_on_order_only_through_state() {
        assert_eq!(
            message(&["--device-set", "net0", "--connect", "--disconnect"]),
            "Unable to simultaneously use --disconnect and --connect"
        );
    }

    // -- properties --

    #[test]
    fn socket_tcp_needs_host_and_port() {
        assert!(set(&["--device-set", "serial0", "--socket-tcp", "[::1]:2000"]).is_ok());
        assert_eq!(
            message(&["--device-set", "serial0", "--socket-tcp", "localhost"]),
            "An incorrect value for --socket-tcp is specified: localhost.\n\
             The value must be specified as host:port."
        );
    }

    #[test]
    fn numeric_properties_reject_junk() {
        assert_eq!(
            message(&["--device-set", "usb0", "--passthr", "x1"]),
            "An incorrect value for --passthr is specified: x1"
        );
        assert!(message(&["--device-add", "hdd", "--size", "ten"]).contains("--size"));
        assert!(message(&["--device-set", "net0", "--mac", "zz"]).contains("--mac"));
    }

    #[test]
    fn net_mode_routed() {
        let rec = set(&["--device-set", "net0", "--type", "routed"]).unwrap();
        assert_eq!(rec.dev.mode, Some(DevMode::NetRouted));
    }

    // -- post-processing --

    #[test]
    fn legacy_diskspace_selects_first_disk() {
        let rec = set(&["--diskspace", "2048"]).unwrap();
        assert_eq!(rec.dev.name.as_deref(), Some("hdd0"));
        assert_eq!(rec.dev.dev_type, Some(DevType::Hdd));
        assert_eq!(rec.dev.cmd, Some(DevCommand::Set));
        assert_eq!(rec.dev.size, Some(2048));
    }

    #[test]
    fn address_without_device_uses_first_adapter() {
        let rec = set(&["--ipadd", "10.0.0.5/24"]).unwrap();
        assert_eq!(rec.dev.dev_type, Some(DevType::Net));
        assert_eq!(rec.dev.cmd, Some(DevCommand::Set));
        assert_eq!(rec.dev.net.ip, vec!["10.0.0.5/24".to_string()]);
    }

    #[test]
    fn dns_without_adapter_applies_to_the_vm() {
        let rec = set(&["--nameserver", "8.8.8.8,1.1.1.1"]).unwrap();
        assert_eq!(rec.nameserver, vec!["8.8.8.8".to_string(), "1.1.1.1".to_string()]);
        assert!(rec.dev.net.nameserver.is_empty());
        assert_eq!(rec.dev.cmd, None);
    }

    #[test]
    fn autocompact_moves_onto_a_disk() {
        let rec = set(&["--device-set", "hdd0", "--autocompact", "off"]).unwrap();
        assert_eq!(rec.dev.autocompact, Some(false));
        assert_eq!(rec.autocompact, None);
        let rec = set(&["--autocompact", "on"]).unwrap();
        assert_eq!(rec.autocompact, Some(true));
    }

    #[test]
    fn one_image_delete_mode() {
        let rec = set(&["--device-del", "hdd1", "--destroy-image", "--destroy-image"]).unwrap();
        assert_eq!(rec.hdd_delete, HddDeleteMode::Destroy);
        assert_eq!(
            message(&["--device-del", "hdd1", "--destroy-image", "--detach-only"]),
            "Only one of options --detach-only, --destroy-image, --destroy-image-force can be specified."
        );
    }

    #[test]
    fn backup_attach() {
        let rec = set(&[
            "--backup-add",
            "12345678-1234-1234-1234-123456789abc",
            "--disk",
            "hdd1",
        ])
        .unwrap();
        assert_eq!(rec.backup_cmd, Some(DevCommand::Add));
        assert_eq!(rec.backup_id.as_deref(), Some("{12345678-1234-1234-1234-123456789abc}"));
        assert_eq!(
            message(&["--backup-add", "b1", "--backup-del", "b1"]),
            "Multiple --backup-add or --backup-del options are specified."
        );
        assert!(matches!(set(&["--backup-del", "b1", "--device-del", "hdd1"]), Err(CmdError::Message(_))));
    }
}
