use crate::error::{CmdError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevCommand {
    Add,
    Del,
    Set,
    Connect,
    Disconnect,
    BootOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevType {
    Hdd,
    Cdrom,
    Fdd,
    Net,
    Usb,
    Serial,
    Parallel,
    Sound,
    GenericPci,
}

impl DevType {
    /// Device class accepted by `--device-add`. A partition is
    /// configured as a hard disk.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "hdd" | "hdd-part" => Some(DevType::Hdd),
            "cdrom" => Some(DevType::Cdrom),
            "fdd" => Some(DevType::Fdd),
            "net" => Some(DevType::Net),
            "usb" => Some(DevType::Usb),
            "serial" => Some(DevType::Serial),
            "parallel" => Some(DevType::Parallel),
            "sound" => Some(DevType::Sound),
            "pci" => Some(DevType::GenericPci),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DevType::Hdd => "hdd",
            DevType::Cdrom => "cdrom",
            DevType::Fdd => "fdd",
            DevType::Net => "net",
            DevType::Usb => "usb",
            DevType::Serial => "serial",
            DevType::Parallel => "parallel",
            DevType::Sound => "sound",
            DevType::GenericPci => "pci",
        }
    }
}

/// `--type` value: disk layout or network attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevMode {
    HddExpand,
    NetHost,
    NetShared,
    NetBridged,
    NetRouted,
}

impl DevMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "expand" => Some(DevMode::HddExpand),
            "host" | "host-only" => Some(DevMode::NetHost),
            "bridged" => Some(DevMode::NetBridged),
            "shared" => Some(DevMode::NetShared),
            "routed" => Some(DevMode::NetRouted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterType {
    Virtio,
    E1000,
    Rtl,
}

impl AdapterType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "virtio" => Some(AdapterType::Virtio),
            "e1000" => Some(AdapterType::E1000),
            "rtl" => Some(AdapterType::Rtl),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketMode {
    Server,
    Client,
}

// ============================================================================
// Firewall
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FwPolicy {
    Accept,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FwDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FwProto {
    Tcp,
    Udp,
}

/// `PROTO SRCIP SRCPORT DSTIP DSTPORT`, `*` for any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FwRule {
    pub proto: Option<FwProto>,
    pub src_ip: Option<String>,
    pub src_port: Option<u16>,
    pub dst_ip: Option<String>,
    pub dst_port: Option<u16>,
}

impl FwRule {
    pub fn parse(s: &str) -> Result<Self> {
        let syntax = || CmdError::msg(format!("An incorrect firewall rule syntax: {}", s));
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [proto, src_ip, src_port, dst_ip, dst_port] = tokens[..] else {
            return Err(syntax());
        };

        let any = |t: &str| t == "*";
        let proto = match proto {
            "*" => None,
            "tcp" => Some(FwProto::Tcp),
            "udp" => Some(FwProto::Udp),
            _ => return Err(syntax()),
        };
        let port = |t: &str| -> Result<Option<u16>> {
            if any(t) {
                Ok(None)
            } else {
                t.parse().map(Some).map_err(|_| syntax())
            }
        };
        let rule = FwRule {
            proto,
            src_ip: (!any(src_ip)).then(|| src_ip.to_string()),
            src_port: port(src_port)?,
            dst_ip: (!any(dst_ip)).then(|| dst_ip.to_string()),
            dst_port: port(dst_port)?,
        };
        if rule.proto.is_none() && (rule.src_port.is_some() || rule.dst_port.is_some()) {
            return Err(CmdError::msg(
                "Port number may only be specified for protocol 'tcp' or 'udp'",
            ));
        }
        Ok(rule)
    }
}

// ============================================================================
// NetParam
// ============================================================================

/// Guest network settings of one adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetParam {
    pub ifname: Option<String>,
    pub searchdomain: Vec<String>,
    pub nameserver: Vec<String>,
    pub ip: Vec<String>,
    pub ip_del: Vec<String>,
    /// `Some("")` clears the gateway.
    pub gw: Option<String>,
    pub gw6: Option<String>,
    pub dhcp: Option<bool>,
    pub dhcp6: Option<bool>,
    pub delall_ip: bool,
    /// `--ipset`: the address list replaces the configured one.
    pub set_ip: bool,
    pub configure: Option<bool>,
    pub ip_filter: Option<bool>,
    pub prevent_promisc: Option<bool>,
    pub mac_filter: Option<bool>,
    pub fw_enable: Option<bool>,
    pub fw_policy: Option<FwPolicy>,
    pub fw_direction: Option<FwDirection>,
    pub fw_rules: Vec<FwRule>,
    pub adapter_type: Option<AdapterType>,
}

impl NetParam {
    pub fn is_updated(&self) -> bool {
        self.ip_filter.is_some()
            || self.prevent_promisc.is_some()
            || self.mac_filter.is_some()
            || self.configure.is_some()
            || self.dhcp.is_some()
            || self.dhcp6.is_some()
            || self.gw.is_some()
            || self.gw6.is_some()
            || !self.ip.is_empty()
            || !self.ip_del.is_empty()
            || self.delall_ip
            || !self.searchdomain.is_empty()
            || !self.nameserver.is_empty()
            || self.ifname.is_some()
            || self.adapter_type.is_some()
            || self.fw_enable.is_some()
            || self.fw_policy.is_some()
    }
}

// ============================================================================
// Device
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Device {
    pub cmd: Option<DevCommand>,
    pub dev_type: Option<DevType>,
    /// Device instance name, `hdd0`, `net1`, ...
    pub name: Option<String>,
    pub enable: bool,
    pub disable: bool,
    pub connect: bool,
    pub disconnect: bool,
    pub recreate: bool,
    pub split: bool,
    pub offline: bool,
    pub no_fs_resize: bool,
    pub mode: Option<DevMode>,
    pub passthr: Option<i32>,
    /// MiB.
    pub size: Option<u64>,
    pub position: Option<i32>,
    pub device: Option<String>,
    /// `Some("")` detaches the image.
    pub image: Option<String>,
    pub mnt: Option<String>,
    pub iface: Option<String>,
    pub subtype: Option<String>,
    pub mac: Option<String>,
    pub vnetwork: Option<String>,
    pub output: Option<String>,
    pub socket: Option<String>,
    pub socket_tcp: Option<String>,
    pub socket_udp: Option<String>,
    pub socket_mode: Option<SocketMode>,
    pub mixer: Option<String>,
    pub hdd_block_size: Option<u32>,
    pub autocompact: Option<bool>,
    pub net: NetParam,
}

impl Device {
    /// True when a property beyond the selector itself was given.
    pub fn is_updated(&self) -> bool {
        self.connect
            || self.disconnect
            || self.recreate
            || self.split
            || self.mode.is_some()
            || self.passthr.is_some()
            || self.size.is_some()
            || self.position.is_some()
            || self.image.is_some()
            || self.iface.is_some()
            || self.mac.is_some()
            || self.vnetwork.is_some()
            || self.output.is_some()
            || self.socket.is_some()
            || self.mixer.is_some()
            || self.autocompact.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_names() {
        assert_eq!(DevType::from_name("hdd-part"), Some(DevType::Hdd));
        assert_eq!(DevType::from_name("pci"), Some(DevType::GenericPci));
        assert_eq!(DevType::from_name("floppy"), None);
        for t in [DevType::Cdrom, DevType::Net, DevType::Sound] {
            assert_eq!(DevType::from_name(t.name()), Some(t));
        }
    }

    #[test]
    fn modes() {
        assert_eq!(DevMode::parse("host-only"), Some(DevMode::NetHost));
        assert_eq!(DevMode::parse("host"), Some(DevMode::NetHost));
        assert_eq!(DevMode::parse("plain"), None);
    }

    // -- firewall --

    #[test]
    fn fw_rule_full() {
        let rule = FwRule::parse("tcp 10.0.0.1 22 * 80").unwrap();
        assert_eq!(rule.proto, Some(FwProto::Tcp));
        assert_eq!(rule.src_ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(rule.src_port, Some(22));
        assert_eq!(rule.dst_ip, None);
        assert_eq!(rule.dst_port, Some(80));
    }

    #[test]
    fn fw_rule_any_proto_without_ports() {
        let rule = FwRule::parse("* * * 10.0.0.2 *").unwrap();
        assert_eq!(rule.proto, None);
        assert_eq!(rule.dst_ip.as_deref(), Some("10.0.0.2"));
    }

    #[test]
    fn fw_rule_rejects() {
        let err = FwRule::parse("* * 22 * *").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Port number may only be specified for protocol 'tcp' or 'udp'"
        );
        assert_eq!(
            FwRule::parse("tcp * 22").unwrap_err().to_string(),
            "An incorrect firewall rule syntax: tcp * 22"
        );
        assert!(FwRule::parse("icmp * * * *").is_err());
        assert!(FwRule::parse("tcp * ssh * *").is_err());
        assert!(FwRule::parse("tcp * 1 * 2 extra").is_err());
    }

    // -- updates --

    #[test]
    fn net_updates() {
        let mut net = NetParam::default();
        assert!(!net.is_updated());
        net.fw_direction = Some(FwDirection::In);
        assert!(!net.is_updated());
        net.gw = Some(String::new());
        assert!(net.is_updated());
    }

    #[test]
    fn device_updates_ignore_selectors() {
        let mut dev = Device {
            cmd: Some(DevCommand::Set),
            dev_type: Some(DevType::Hdd),
            name: Some("hdd0".into()),
            enable: true,
            ..Default::default()
        };
        assert!(!dev.is_updated());
        dev.image = Some(String::new());
        assert!(dev.is_updated());
    }
}
