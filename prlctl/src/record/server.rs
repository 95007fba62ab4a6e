//! Server-side descriptions: dispatcher settings, users, virtual and
//! private networks, USB assignments and container templates.

use std::collections::BTreeMap;

use super::{LoginInfo, SecurityLevel};
use crate::error::{CmdError, Result};
use crate::secret::Secret;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemLimit {
    Auto,
    Mb(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignMode {
    Host,
    Vm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvancedSecurityMode {
    NoAdvancedAuth,
    SystemCredentials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuLimitType {
    Full,
    Guest,
}

// ============================================================================
// Composite values
// ============================================================================

/// Split `s` on `:` into exactly `N` non-empty parts.
fn colon_fields<const N: usize>(s: &str) -> Option<[&str; N]> {
    let parts: Vec<&str> = s.split(':').collect();
    let parts: [&str; N] = parts.try_into().ok()?;
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}

/// `NAME:PORT[:default]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfflineService {
    pub name: String,
    pub port: Option<u16>,
    pub used_by_default: bool,
    pub del: bool,
}

impl OfflineService {
    pub fn parse(s: &str) -> Result<Self> {
        let err = || CmdError::msg(format!("An incorrect value is specified for offline service: {}", s));
        let (name, rest) = s.split_once(':').ok_or_else(err)?;
        let (port, used_by_default) = match rest.split_once(':') {
            Some((port, "default")) => (port, true),
            Some(_) => return Err(err()),
            None => (rest, false),
        };
        if name.is_empty() {
            return Err(err());
        }
        Ok(OfflineService {
            name: name.to_string(),
            port: Some(port.parse().map_err(|_| err())?),
            used_by_default,
            del: false,
        })
    }
}

fn shaping_error(s: &str) -> CmdError {
    CmdError::msg(format!("An incorrect value is specified for network shaping: {}", s))
}

/// `CLASS:NETWORK`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkClass {
    pub net_class: u32,
    pub net: String,
    pub del: bool,
}

impl NetworkClass {
    pub fn parse(s: &str) -> Result<Self> {
        let [class, net] = colon_fields::<2>(s).ok_or_else(|| shaping_error(s))?;
        Ok(NetworkClass {
            net_class: class.parse().map_err(|_| shaping_error(s))?,
            net: net.to_string(),
            del: false,
        })
    }
}

/// `DEV:CLASS:TOTALRATE:RATE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapingEntry {
    pub dev: String,
    pub net_class: u32,
    pub total_rate: u32,
    pub rate: u32,
    pub del: bool,
}

impl ShapingEntry {
    pub fn parse(s: &str) -> Result<Self> {
        let [dev, class, total, rate] = colon_fields::<4>(s).ok_or_else(|| shaping_error(s))?;
        let num = |t: &str| t.parse::<u32>().map_err(|_| shaping_error(s));
        Ok(ShapingEntry {
            dev: dev.to_string(),
            net_class: num(class)?,
            total_rate: num(total)?,
            rate: num(rate)?,
            del: false,
        })
    }
}

/// `DEV:BANDWIDTH`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BandwidthEntry {
    pub dev: String,
    pub bandwidth: u32,
    pub del: bool,
}

impl BandwidthEntry {
    pub fn parse(s: &str) -> Result<Self> {
        let err = || CmdError::msg(format!("An incorrect value is specified for network bandwidth: {}", s));
        let [dev, bandwidth] = colon_fields::<2>(s).ok_or_else(err)?;
        Ok(BandwidthEntry {
            dev: dev.to_string(),
            bandwidth: bandwidth.parse().map_err(|_| err())?,
            del: false,
        })
    }
}

// ============================================================================
// DispParam
// ============================================================================

/// `prlsrvctl set` and friends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispParam {
    pub mem_limit: Option<MemLimit>,
    pub allow_mng_settings: Option<bool>,
    pub min_security_level: Option<String>,
    pub force: bool,
    pub suspend_vm_to_pram: bool,
    pub device: Option<String>,
    pub assign_mode: Option<AssignMode>,
    pub cep_mechanism: Option<bool>,
    pub backup_path: Option<String>,
    pub backup_tmpdir: Option<String>,
    pub backup_timeout: Option<u32>,
    pub change_backup_settings: bool,
    pub def_backup_storage: LoginInfo,
    pub listen_interface: Option<String>,
    pub verbose_log: Option<bool>,
    pub info_license: bool,
    pub offline_service: Option<OfflineService>,
    pub network_class: Option<NetworkClass>,
    pub network_shaping: Option<ShapingEntry>,
    pub network_bandwidth: Option<BandwidthEntry>,
    pub shaping_enable: Option<bool>,
    pub log_rotation: Option<bool>,
    pub cpu_features_mask: Option<String>,
    pub adv_security_mode: Option<AdvancedSecurityMode>,
    pub allow_attach_screenshots: Option<bool>,
    pub lock_edit_settings: Option<bool>,
    pub host_admin: Option<Secret>,
    /// Operation name to "password required" switch, for both the
    /// server and per-VM `--require-pwd`.
    pub cmd_require_pwd: BTreeMap<String, bool>,
    pub set_vnc_encryption: bool,
    pub vnc_public_key: Option<String>,
    pub vnc_private_key: Option<String>,
    pub vm_cpulimit_type: Option<CpuLimitType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserParam {
    pub def_vm_home: Option<String>,
}

// ============================================================================
// Networks
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VNetCmd {
    Add,
    Set,
    Del,
    #[default]
    List,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VNetType {
    Bridged,
    HostOnly,
}

/// `--nat-tcp-add NAME,DEST,IN_PORT,REDIR_PORT`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NatRule {
    pub name: String,
    pub redir_entry: String,
    pub in_port: u16,
    pub redir_port: u16,
}

impl NatRule {
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(',').collect();
        let [name, redir_entry, in_port, redir_port] = parts[..] else {
            return None;
        };
        Some(NatRule {
            name: name.to_string(),
            redir_entry: redir_entry.to_string(),
            in_port: in_port.trim().parse().ok()?,
            redir_port: redir_port.trim().parse().ok()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VNetParam {
    pub cmd: VNetCmd,
    pub name: Option<String>,
    pub description: Option<String>,
    pub ip_scope_start: Option<String>,
    pub ip_scope_end: Option<String>,
    pub ip6_scope_start: Option<String>,
    pub ip6_scope_end: Option<String>,
    pub nat_tcp_add: Vec<NatRule>,
    pub nat_udp_add: Vec<NatRule>,
    pub nat_tcp_del: Vec<String>,
    pub nat_udp_del: Vec<String>,
    pub host_ip: Option<String>,
    pub host_ip6: Option<String>,
    pub dhcp_enabled: Option<bool>,
    pub dhcp6_enabled: Option<bool>,
    pub dhcp_ip: Option<String>,
    pub dhcp_ip6: Option<String>,
    pub ifname: Option<String>,
    pub vnet_type: Option<VNetType>,
    pub is_shared: bool,
    pub mac: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrivNetCmd {
    Add,
    Set,
    Del,
    #[default]
    List,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivNetParam {
    pub cmd: PrivNetCmd,
    pub name: Option<String>,
    pub ip: Vec<String>,
    pub ip_del: Vec<String>,
    pub is_global: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UsbCmd {
    #[default]
    List,
    Set,
    Delete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsbParam {
    pub cmd: UsbCmd,
    pub name: Option<String>,
    pub id: Option<String>,
}

// ============================================================================
// Container templates
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CtTemplateCmd {
    #[default]
    List,
    Remove,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CtTemplateParam {
    pub cmd: CtTemplateCmd,
    pub name: Option<String>,
    pub os_name: Option<String>,
}

/// `cttemplate copy DST NAME [OS]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyCtTemplate {
    pub dst: LoginInfo,
    pub force: bool,
    pub security_level: Option<SecurityLevel>,
}
