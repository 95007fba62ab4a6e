//! The parameter record.
//!
//! One [`ParamRecord`] is built per invocation. It starts at
//! [`Default`], every consumed option writes into it, and it is handed to
//! the caller either fully validated or as the invalid record
//! ([`ParamRecord::invalid`]), recognisable by `action == Action::Invalid`.
//!
//! Every field a user can mention has an unset state distinct from each
//! explicit value: `Option<_>` for values and tri-state toggles, an empty
//! `Vec` for repeatable options.

mod device;
mod server;
mod tasks;

pub use device::*;
pub use server::*;
pub use tasks::*;

use crate::catalog::{Distribution, NetfilterMode};
use crate::secret::{Secret, SecretStack};
use crate::values::{Auth, CpuLimit};

// ============================================================================
// Action
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    #[default]
    Invalid,

    Create,
    Start,
    Stop,
    Mount,
    Umount,
    Suspend,
    Resume,
    Pause,
    List,
    Destroy,
    Register,
    Unregister,
    Clone,
    Set,
    Reset,
    Restart,
    InstallTools,
    Capture,
    Migrate,
    Move,
    Backup,
    Restore,
    BackupList,
    BackupDelete,
    PerfStats,
    ProblemReport,
    Enter,
    Console,
    Exec,
    ChangeSid,
    ResetUptime,
    Convert,
    Auth,
    Status,
    Internal,
    SnapshotCreate,
    SnapshotSwitch,
    SnapshotDelete,
    SnapshotList,

    SrvShutdown,
    SrvInfo,
    SrvUserList,
    SrvUserSet,
    SrvInstallLicense,
    SrvUpdateLicense,
    SrvPerfStats,
    SrvProblemReport,
    SrvSet,
    SrvVNet,
    SrvPrivNet,
    SrvUsb,
    SrvShapingRestart,
    SrvInstallAppliance,
    SrvCtTemplate,
    SrvCopyCtTemplate,
    SrvMonitor,
    SrvUpdateHostRegInfo,
    SrvPrepareForUninstall,
    SrvBackupNode,
    SrvListNetworkConfig,
    SrvUpListenInterface,
    SrvStartNatDetect,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Invalid => "invalid",
            Action::Create => "create",
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Mount => "mount",
            Action::Umount => "umount",
            Action::Suspend => "suspend",
            Action::Resume => "resume",
            Action::Pause => "pause",
            Action::List => "list",
            Action::Destroy => "delete",
            Action::Register => "register",
            Action::Unregister => "unregister",
            Action::Clone => "clone",
            Action::Set => "set",
            Action::Reset => "reset",
            Action::Restart => "restart",
            Action::InstallTools => "installtools",
            Action::Capture => "capture",
            Action::Migrate => "migrate",
            Action::Move => "move",
            Action::Backup => "backup",
            Action::Restore => "restore",
            Action::BackupList => "backup-list",
            Action::BackupDelete => "backup-delete",
            Action::PerfStats => "statistics",
            Action::ProblemReport => "problem-report",
            Action::Enter => "enter",
            Action::Console => "console",
            Action::Exec => "exec",
            Action::ChangeSid => "change-sid",
            Action::ResetUptime => "reset-uptime",
            Action::Convert => "convert",
            Action::Auth => "auth",
            Action::Status => "status",
            Action::Internal => "internal",
            Action::SnapshotCreate => "snapshot",
            Action::SnapshotSwitch => "snapshot-switch",
            Action::SnapshotDelete => "snapshot-delete",
            Action::SnapshotList => "snapshot-list",
            Action::SrvShutdown => "server shutdown",
            Action::SrvInfo => "server info",
            Action::SrvUserList => "user list",
            Action::SrvUserSet => "user set",
            Action::SrvInstallLicense => "install-license",
            Action::SrvUpdateLicense => "update-license",
            Action::SrvPerfStats => "server statistics",
            Action::SrvProblemReport => "server problem-report",
            Action::SrvSet => "server set",
            Action::SrvVNet => "net",
            Action::SrvPrivNet => "privnet",
            Action::SrvUsb => "usb",
            Action::SrvShapingRestart => "tc restart",
            Action::SrvInstallAppliance => "appliance-install",
            Action::SrvCtTemplate => "cttemplate",
            Action::SrvCopyCtTemplate => "cttemplate copy",
            Action::SrvMonitor => "monitor",
            Action::SrvUpdateHostRegInfo => "update-host-reg-info",
            Action::SrvPrepareForUninstall => "prepare-for-uninstall",
            Action::SrvBackupNode => "server backup",
            Action::SrvListNetworkConfig => "list-network-config",
            Action::SrvUpListenInterface => "up-listen-interface",
            Action::SrvStartNatDetect => "start-nat-detect",
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// A `[user[:password]@]server[:port]` target. The password, if any, is
/// kept on the secret stack rather than in a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginInfo {
    pub user: String,
    pub server: String,
    pub port: Option<u16>,
    pub secrets: SecretStack,
}

impl LoginInfo {
    /// Replace the target with a parsed login string, stacking its
    /// password.
    pub fn assign(&mut self, auth: Auth) {
        self.user = auth.user;
        self.server = auth.server;
        self.port = auth.port;
        if let Some(password) = auth.password {
            self.secrets.push(Secret::new(password));
        }
    }

    pub fn is_remote(&self) -> bool {
        !self.server.is_empty()
    }

    /// Oldest pending password; each one is handed out once.
    pub fn take_password(&mut self) -> Option<Secret> {
        self.secrets.take()
    }
}

// ============================================================================
// Small enumerations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VmType {
    Vm,
    Ct,
    #[default]
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autostart {
    On,
    Off,
    Auto,
    StartApp,
    OpenWindow,
}

impl Autostart {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "on" | "yes" | "start-host" => Some(Autostart::On),
            "off" | "no" => Some(Autostart::Off),
            "auto" => Some(Autostart::Auto),
            "start-app" => Some(Autostart::StartApp),
            "open-window" => Some(Autostart::OpenWindow),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autostop {
    Stop,
    Suspend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accel3d {
    Off,
    Highest,
    Dx9,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartMouse {
    Off,
    On,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemGuarantee {
    Auto,
    Percent(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountMode {
    ReadOnly,
    ReadWrite,
}

/// What happens to a detached hard disk image on `--device-del`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HddDeleteMode {
    #[default]
    Detach,
    Destroy,
    DestroyForce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloneFlags {
    pub to_template: bool,
    pub change_sid: bool,
    pub linked: bool,
    pub detach_external_hdd: bool,
}

impl Default for CloneFlags {
    fn default() -> Self {
        CloneFlags {
            to_template: false,
            change_sid: false,
            linked: false,
            detach_external_hdd: true,
        }
    }
}

/// Output selection for `list` style commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParam {
    pub fields: Option<String>,
    pub sort: Option<String>,
    pub no_header: bool,
    pub all: bool,
    pub stopped: bool,
    pub name: bool,
    pub info: bool,
    pub all_fields: bool,
}

// ============================================================================
// ParamRecord
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ParamRecord {
    pub action: Action,
    pub id: Option<String>,
    pub login: LoginInfo,

    // output
    pub use_json: bool,
    pub full_info: bool,
    pub list: ListParam,

    // stop
    pub fast: bool,
    pub use_acpi: bool,
    pub force: bool,
    pub noforce: bool,

    // create / register / clone
    pub config_sample: Option<String>,
    pub vm_location: Option<String>,
    pub dist: Option<Distribution>,
    pub ostemplate: Option<String>,
    pub vmtype: VmType,
    pub nohdd: bool,
    pub hdd_block_size: Option<u32>,
    pub lion_recovery: bool,
    pub uuid: Option<String>,
    pub preserve_uuid: bool,
    pub preserve_src_uuid: bool,
    pub ignore_ha_cluster: bool,
    pub new_name: Option<String>,
    pub tmpl: bool,
    pub clone: CloneFlags,

    // start / mount / exec / capture / auth / license
    pub start_wait: bool,
    pub mount_mode: Option<MountMode>,
    pub mount_info: bool,
    pub exec_in_shell: bool,
    pub argv: Vec<String>,
    pub file: Option<String>,
    pub user_name: Option<String>,
    pub user_password: Option<Secret>,
    pub key: Option<String>,
    pub company: Option<String>,
    pub batch: bool,

    // devices
    pub dev: Device,
    pub hdd_delete: HddDeleteMode,
    pub rename_ext_disks: bool,
    pub backup_cmd: Option<DevCommand>,
    pub backup_id: Option<String>,
    pub backup_disk: Option<String>,

    // resources
    pub cpus: Option<u32>,
    pub cpu_hotplug: Option<bool>,
    pub cpuunits: Option<u32>,
    pub cpulimit: Option<CpuLimit>,
    pub cpumask: Option<String>,
    pub nodemask: Option<String>,
    pub ioprio: Option<u32>,
    pub iolimit: Option<u64>,
    pub iopslimit: Option<u32>,
    pub memsize: Option<u64>,
    pub videosize: Option<u64>,
    pub memguarantee: Option<MemGuarantee>,
    pub mem_hotplug: Option<bool>,
    pub ct_resources: Vec<CtResource>,
    pub cap: CapMask,
    pub netfilter: Option<NetfilterMode>,
    pub features: FeaturesParam,
    pub app_templates: Vec<String>,
    pub rate: Vec<RateEntry>,
    pub ratebound: Option<bool>,
    /// VM-wide compaction switch; moved onto the device for `hdd` targets.
    pub autocompact: Option<bool>,

    // general settings
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_template: Option<bool>,
    pub system_flags: Option<String>,
    pub autostart: Option<Autostart>,
    pub autostart_delay: Option<u32>,
    pub autostop: Option<Autostop>,
    pub startup_view: Option<String>,
    pub on_shutdown: Option<String>,
    pub on_window_close: Option<String>,
    pub ext_boot_dev: Option<String>,
    pub select_boot_dev: Option<bool>,
    pub efi_boot: Option<bool>,
    pub restrict_editing: bool,
    pub expiration: ExpirationParam,

    // display and integration
    pub v3d_accelerate: Option<Accel3d>,
    pub vertical_sync: Option<bool>,
    pub high_resolution: Option<bool>,
    pub smart_mouse_optimize: Option<SmartMouse>,
    pub sticky_mouse: Option<bool>,
    pub keyboard_optimize: Option<bool>,
    pub sync_host_printers: Option<bool>,
    pub sync_default_printer: Option<bool>,
    pub auto_share_camera: Option<bool>,
    pub auto_share_bluetooth: Option<bool>,
    pub support_usb30: Option<bool>,
    pub faster_vm: Option<bool>,
    pub adaptive_hypervisor: Option<bool>,
    pub auto_compress: Option<bool>,
    pub nested_virt: Option<bool>,
    pub pmu_virt: Option<bool>,
    pub longer_battery_life: Option<bool>,
    pub battery_status: Option<bool>,
    pub winsystray_in_macmenu: Option<bool>,
    pub auto_switch_fullscreen: Option<bool>,
    pub disable_aero: Option<bool>,
    pub hide_min_windows: Option<bool>,
    pub lock_on_suspend: Option<bool>,
    pub isolate_vm: Option<bool>,
    pub smart_guard: Option<bool>,
    pub sg_notify_before_create: Option<bool>,
    pub sg_interval: Option<u32>,
    pub sg_max_snapshots: Option<u32>,
    pub vnc: VncParam,

    // guest network
    pub nameserver: Vec<String>,
    pub searchdomain: Vec<String>,
    pub hostname: Option<String>,
    pub userpasswd: Option<Secret>,
    pub crypted: bool,
    pub use_default_answers: Option<bool>,
    pub tools_autoupdate: Option<bool>,
    pub smart_mount: Option<bool>,
    pub apply_iponly: Option<bool>,

    // offline management and HA
    pub offline_management: Option<bool>,
    pub offline_services: Vec<String>,
    pub ha_enable: Option<bool>,
    pub ha_prio: Option<u32>,

    // tasks
    pub snapshot: SnapshotParam,
    pub migrate: MigrateParam,
    pub backup: BackupParam,
    pub statistics: StatisticsParam,
    pub problem_report: ProblemReportParam,
    pub security_level: Option<SecurityLevel>,

    // server
    pub disp: DispParam,
    pub user: UserParam,
    pub vnet: VNetParam,
    pub privnet: PrivNetParam,
    pub usb: UsbParam,
    pub ct_tmpl: CtTemplateParam,
    pub copy_ct_tmpl: CopyCtTemplate,
}

impl Default for ParamRecord {
    fn default() -> Self {
        ParamRecord {
            action: Action::Invalid,
            id: None,
            login: LoginInfo::default(),
            use_json: false,
            full_info: false,
            list: ListParam::default(),
            fast: false,
            use_acpi: false,
            force: false,
            noforce: false,
            config_sample: None,
            vm_location: None,
            dist: None,
            ostemplate: None,
            vmtype: VmType::All,
            nohdd: false,
            hdd_block_size: None,
            lion_recovery: false,
            uuid: None,
            preserve_uuid: false,
            preserve_src_uuid: true,
            ignore_ha_cluster: false,
            new_name: None,
            tmpl: false,
            clone: CloneFlags::default(),
            start_wait: false,
            mount_mode: None,
            mount_info: false,
            exec_in_shell: true,
            argv: Vec::new(),
            file: None,
            user_name: None,
            user_password: None,
            key: None,
            company: None,
            batch: false,
            dev: Device::default(),
            hdd_delete: HddDeleteMode::Detach,
            rename_ext_disks: false,
            backup_cmd: None,
            backup_id: None,
            backup_disk: None,
            cpus: None,
            cpu_hotplug: None,
            cpuunits: None,
            cpulimit: None,
            cpumask: None,
            nodemask: None,
            ioprio: None,
            iolimit: None,
            iopslimit: None,
            memsize: None,
            videosize: None,
            memguarantee: None,
            mem_hotplug: None,
            ct_resources: Vec::new(),
            cap: CapMask::default(),
            netfilter: None,
            features: FeaturesParam::default(),
            app_templates: Vec::new(),
            rate: Vec::new(),
            ratebound: None,
            autocompact: None,
            name: None,
            description: None,
            is_template: None,
            system_flags: None,
            autostart: None,
            autostart_delay: None,
            autostop: None,
            startup_view: None,
            on_shutdown: None,
            on_window_close: None,
            ext_boot_dev: None,
            select_boot_dev: None,
            efi_boot: None,
            restrict_editing: false,
            expiration: ExpirationParam::default(),
            v3d_accelerate: None,
            vertical_sync: None,
            high_resolution: None,
            smart_mouse_optimize: None,
            sticky_mouse: None,
            keyboard_optimize: None,
            sync_host_printers: None,
            sync_default_printer: None,
            auto_share_camera: None,
            auto_share_bluetooth: None,
            support_usb30: None,
            faster_vm: None,
            adaptive_hypervisor: None,
            auto_compress: None,
            nested_virt: None,
            pmu_virt: None,
            longer_battery_life: None,
            battery_status: None,
            winsystray_in_macmenu: None,
            auto_switch_fullscreen: None,
            disable_aero: None,
            hide_min_windows: None,
            lock_on_suspend: None,
            isolate_vm: None,
            smart_guard: None,
            sg_notify_before_create: None,
            sg_interval: None,
            sg_max_snapshots: None,
            vnc: VncParam::default(),
            nameserver: Vec::new(),
            searchdomain: Vec::new(),
            hostname: None,
            userpasswd: None,
            crypted: false,
            use_default_answers: None,
            tools_autoupdate: None,
            smart_mount: None,
            apply_iponly: None,
            offline_management: None,
            offline_services: Vec::new(),
            ha_enable: None,
            ha_prio: None,
            snapshot: SnapshotParam::default(),
            migrate: MigrateParam::default(),
            backup: BackupParam::default(),
            statistics: StatisticsParam::default(),
            problem_report: ProblemReportParam::default(),
            security_level: None,
            disp: DispParam::default(),
            user: UserParam::default(),
            vnet: VNetParam::default(),
            privnet: PrivNetParam::default(),
            usb: UsbParam::default(),
            ct_tmpl: CtTemplateParam::default(),
            copy_ct_tmpl: CopyCtTemplate::default(),
        }
    }
}

impl ParamRecord {
    /// Fresh record for `action`.
    pub fn new(action: Action) -> Self {
        ParamRecord {
            action,
            ..Default::default()
        }
    }

    /// The record returned for every parse or validation failure.
    pub fn invalid() -> Self {
        ParamRecord::default()
    }

    pub fn is_valid(&self) -> bool {
        self.action != Action::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::parse_auth;

    #[test]
    fn default_record_is_the_invalid_one() {
        let rec = ParamRecord::default();
        assert_eq!(rec.action, Action::Invalid);
        assert!(!rec.is_valid());
        assert_eq!(rec, ParamRecord::invalid());
        assert!(ParamRecord::new(Action::Set).is_valid());
    }

    #[test]
    fn unset_fields_are_distinct_from_explicit_defaults() {
        let rec = ParamRecord::new(Action::Set);
        assert_eq!(rec.cpus, None);
        assert_eq!(rec.efi_boot, None);
        assert!(rec.preserve_src_uuid);
        assert!(rec.exec_in_shell);
        assert!(rec.clone.detach_external_hdd);
        assert_eq!(rec.vmtype, VmType::All);
    }

    #[test]
    fn login_stacks_the_password() {
        let mut login = LoginInfo::default();
        assert!(!login.is_remote());
        login.assign(parse_auth("admin:pw@node1:64000").unwrap());
        assert!(login.is_remote());
        assert_eq!(login.user, "admin");
        assert_eq!(login.port, Some(64000));
        assert_eq!(login.take_password().map(|s| s.expose().to_string()), Some("pw".into()));
        assert!(login.take_password().is_none());
    }

    #[test]
    fn autostart_aliases() {
        assert_eq!(Autostart::parse("start-host"), Some(Autostart::On));
        assert_eq!(Autostart::parse("no"), Some(Autostart::Off));
        assert_eq!(Autostart::parse("open-window"), Some(Autostart::OpenWindow));
        assert_eq!(Autostart::parse("sometimes"), None);
    }

    #[test]
    fn action_names_are_unique_for_vm_verbs() {
        let verbs = [
            Action::Start,
            Action::Stop,
            Action::Set,
            Action::Migrate,
            Action::Backup,
            Action::Restore,
            Action::BackupList,
            Action::SnapshotList,
        ];
        for (i, a) in verbs.iter().enumerate() {
            for b in &verbs[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }
}
