//! Task descriptions (snapshots, migration, backup, reports) and the
//! composite VM settings that carry their own small grammars.

use super::LoginInfo;
use crate::catalog::{self, FeatureClass, FeatureKind};
use crate::error::{CmdError, Result};
use crate::secret::Secret;
use crate::values::{on_off, parse_uint, split, strict_on_off};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityLevel {
    Low,
    Normal,
    High,
}

impl SecurityLevel {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(SecurityLevel::Low),
            "normal" => Ok(SecurityLevel::Normal),
            "high" => Ok(SecurityLevel::High),
            _ => Err(CmdError::msg(format!(
                "An incorrect security level is specified: {}",
                s
            ))),
        }
    }
}

// ============================================================================
// Snapshots, migration, backup
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotParam {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tree: bool,
    pub wait: bool,
    pub del_with_children: bool,
    pub skip_resume: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrateParam {
    /// Name the VM gets on the destination.
    pub dst_id: Option<String>,
    pub dst: LoginInfo,
    pub vm_location: Option<String>,
    pub sessionid: Option<String>,
    pub security_level: Option<SecurityLevel>,
    pub ssh_opts: Vec<String>,
    pub force: bool,
    pub clone: bool,
    pub remove_src: bool,
    pub switch_template: bool,
    pub change_sid: bool,
    pub ignore_existing_bundle: bool,
    pub uncompressed: bool,
    pub no_tunnel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackupKind {
    Full,
    #[default]
    Incremental,
    Differential,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupParam {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub vm_location: Option<String>,
    /// Server that owns the VM being backed up.
    pub login: LoginInfo,
    /// Backup server.
    pub storage: LoginInfo,
    pub kind: BackupKind,
    pub uncompressed: bool,
    pub keep_chain: bool,
    pub list_full: bool,
    pub list_local_vm: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsParam {
    pub filter: Option<String>,
    pub repeat: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemReportParam {
    pub send: bool,
    pub dump: bool,
    pub proxy: Option<Secret>,
    pub dont_use_proxy: bool,
    pub stand_alone: bool,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub description: Option<String>,
}

// ============================================================================
// Expiration
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpirationParam {
    pub enabled: Option<bool>,
    pub date: Option<String>,
    pub time_server: Option<String>,
    pub time_check: Option<i64>,
    pub offline_time: Option<i64>,
    pub note: Option<String>,
}

impl ExpirationParam {
    /// `on|off`, or one `KEY:VALUE` with KEY one of `date`,
    /// `time-check`, `offline-time`, `time-server`, `note`.
    pub fn apply(&mut self, s: &str) -> Result<()> {
        if let Some(enabled) = on_off(s) {
            self.enabled = Some(enabled);
            return Ok(());
        }
        let err = || CmdError::bad_value("--expiration", s);
        let parts = split(s, ":", true);
        let [key, arg] = &parts[..] else {
            return Err(err());
        };
        match key.as_str() {
            // 2030-01-01T10:00:00 is stored as 2030-01-01 10:00:00
            "date" => {
                let mut date = arg.clone();
                if date.len() > 10 && date.is_char_boundary(10) && date.is_char_boundary(11) {
                    date.replace_range(10..11, " ");
                }
                self.date = Some(date);
            }
            "time-check" => self.time_check = Some(arg.parse().map_err(|_| err())?),
            "offline-time" => self.offline_time = Some(arg.parse().map_err(|_| err())?),
            "time-server" => self.time_server = Some(arg.clone()),
            "note" => self.note = Some(arg.clone()),
            _ => return Err(err()),
        }
        Ok(())
    }
}

// ============================================================================
// VNC
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VncMode {
    Off,
    Auto,
    Manual,
}

impl VncMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "off" => Some(VncMode::Off),
            "auto" => Some(VncMode::Auto),
            "manual" => Some(VncMode::Manual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VncParam {
    pub mode: Option<VncMode>,
    pub port: Option<u32>,
    pub address: Option<String>,
    pub passwd: Option<Secret>,
    pub nopasswd: bool,
}

// ============================================================================
// Features
// ============================================================================

/// Accumulated `--features` toggles. All features of one invocation
/// must belong to the same class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturesParam {
    pub class: Option<FeatureClass>,
    pub known: u32,
    pub mask: u32,
    pub time_sync_interval: Option<u32>,
    pub smart_guard_interval: Option<u32>,
    pub smart_guard_max_snapshots: Option<u32>,
}

impl FeaturesParam {
    pub fn apply(&mut self, s: &str) -> Result<()> {
        for token in split(s, ", ", false) {
            let (name, mode) = token.split_once(':').ok_or_else(|| {
                CmdError::msg(format!(
                    "An incorrect value '{}' for --features is specified (mode is not specified)",
                    token
                ))
            })?;
            let def = catalog::find_feature(name).ok_or_else(|| {
                CmdError::msg(format!(
                    "An incorrect feature '{}' for --features is specified",
                    name
                ))
            })?;
            if self.class.is_some_and(|c| c != def.class) {
                return Err(CmdError::msg(format!(
                    "An incorrect feature '{}', mixed features",
                    name
                )));
            }
            self.class = Some(def.class);
            self.known |= def.bit;

            let bad_mode = || {
                CmdError::msg(format!(
                    "An incorrect mode '{}' for features '{}' is specified",
                    mode, name
                ))
            };
            match def.kind {
                FeatureKind::Number => {
                    let n = parse_uint(mode).ok_or_else(bad_mode)?;
                    match def.name {
                        "time_sync_interval" => self.time_sync_interval = Some(n),
                        "smart_guard_interval" => self.smart_guard_interval = Some(n),
                        _ => self.smart_guard_max_snapshots = Some(n),
                    }
                }
                FeatureKind::Toggle => {
                    if on_off(mode).ok_or_else(bad_mode)? {
                        self.mask |= def.bit;
                    } else {
                        self.mask &= !def.bit;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn is_set(&self) -> bool {
        self.known != 0
    }
}

// ============================================================================
// Capabilities and container resources
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapMask {
    pub on: u64,
    pub off: u64,
}

impl CapMask {
    /// `NAME:on|off[,NAME:on|off...]`.
    pub fn apply(&mut self, s: &str) -> Result<()> {
        for item in split(s, ",", false) {
            let (name, mode) = item.split_once(':').ok_or_else(|| {
                CmdError::msg(format!(
                    "An invalid value ('{}') for --capability: the mode is not specified.",
                    s
                ))
            })?;
            let index = catalog::capability_index(name).ok_or_else(|| {
                CmdError::msg(format!("An incorrect capability ('{}') is specified.", name))
            })?;
            match strict_on_off(mode) {
                Some(true) => self.on |= 1 << index,
                Some(false) => self.off |= 1 << index,
                None => {
                    return Err(CmdError::msg(format!(
                        "An incorrect mode ('{}') is specified for the capability '{}'.",
                        mode, name
                    )))
                }
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.on == 0 && self.off == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtResourceKind {
    SwapPages,
    QuotaUgidLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtResource {
    pub kind: CtResourceKind,
    pub barrier: u64,
    pub limit: u64,
}

/// `--rate CLASS:RATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateEntry {
    pub class_id: u32,
    pub rate: u32,
}

impl RateEntry {
    pub fn parse(s: &str) -> Option<Self> {
        let (class, rate) = s.split_once(':')?;
        Some(RateEntry {
            class_id: parse_uint(class)?,
            rate: parse_uint(rate)?,
        })
    }
}
