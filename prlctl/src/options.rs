//! Option identifiers and the per-command option tables.
//!
//! Every table starts with the global block. Aliases share an id; the
//! builder that owns a table decides what each id means for its command.

use cmdopt::{ArgType, Opt, OptionTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptId {
    // global
    Verbose,
    Timeout,
    Login,
    ReadPasswd,
    Compat,

    // shared by several commands
    Help,
    Json,
    InfoFull,
    Force,
    Location,
    Name,
    VmType,
    Uuid,
    Wait,
    SecurityLevel,
    Description,
    ChangeSid,
    File,
    Storage,

    // stop / create / register / clone
    Fast,
    UseAcpi,
    NoForce,
    OsType,
    Distribution,
    Config,
    OsTemplate,
    NoHdd,
    HddBlockSize,
    LionRecovery,
    IgnoreHaCluster,
    PreserveUuid,
    RegenerateSrcUuid,
    Template,
    LinkedClone,
    DetachExternalHdd,
    OnlineClone,

    // auth, license, appliance, mount, exec
    UserName,
    UserPassword,
    Key,
    Company,
    Batch,
    MountOpts,
    MountInfo,
    WithoutShell,

    // list
    ListField,
    ListAll,
    ListNoHeader,
    ListSort,
    ListStopped,
    ListName,
    ListInfo,
    ListAllFields,

    // snapshots
    SnapshotName,
    SnapshotDesc,
    SnapshotId,
    SnapshotWait,
    SnapshotSkipResume,
    SnapshotChildren,
    SnapshotTree,

    // devices
    DeviceAdd,
    NetifAdd,
    DeviceSet,
    DeviceDel,
    NetifDel,
    DeviceConnect,
    DeviceDisconnect,
    DeviceBootOrder,
    Device,
    Image,
    Mnt,
    Recreate,
    DevType,
    AdapterType,
    Size,
    Offline,
    NoFsResize,
    Split,
    Enable,
    Disable,
    Connect,
    Disconnect,
    Iface,
    Subtype,
    Passthr,
    Position,
    Mac,
    Output,
    Socket,
    SocketTcp,
    SocketUdp,
    SocketMode,
    Mixer,
    VNetwork,
    DestroyHdd,
    DestroyHddForce,
    DetachHdd,
    AutoCompact,
    RenameExtDisks,

    // resources
    Cpus,
    CpuHotplug,
    CpuUnits,
    CpuLimit,
    CpuMask,
    NodeMask,
    IoPrio,
    IoLimit,
    IopsLimit,
    MemSize,
    VideoSize,
    MemQuota,
    MemGuarantee,
    MemHotplug,
    SwapPages,
    Swap,
    QuotaUgidLimit,
    Capability,
    Netfilter,
    Features,
    AppTemplate,
    Rate,
    RateBound,

    // general settings
    VmName,
    IsTemplate,
    SystemFlags,
    Autostart,
    AutostartDelay,
    Autostop,
    StartupView,
    OnShutdown,
    OnWindowClose,
    SelectBootDev,
    ExtBootDev,
    EfiBoot,
    RestrictEditing,
    Expiration,
    Accel3d,
    VerticalSync,
    HighResolution,
    SmartMouse,
    StickyMouse,
    KeyboardOptimize,
    SyncHostPrinters,
    SyncDefaultPrinter,
    AutoShareCamera,
    AutoShareBluetooth,
    SupportUsb30,
    FasterVm,
    AdaptiveHypervisor,
    AutoCompress,
    NestedVirt,
    PmuVirt,
    LongerBatteryLife,
    BatteryStatus,
    WinSystrayInMacMenu,
    AutoSwitchFullscreen,
    DisableAero,
    HideMinWindows,
    RequirePwd,
    LockEditSettings,
    LockOnSuspend,
    IsolateVm,
    SmartGuard,
    SgNotifyBeforeCreate,
    SgInterval,
    SgMaxSnapshots,
    VncMode,
    VncPort,
    VncPasswd,
    VncNoPasswd,
    VncAddress,
    OffMan,
    OffSrv,
    HaEnable,
    HaPrio,
    BackupAdd,
    BackupDisk,
    BackupDel,

    // guest network
    IfName,
    SearchDomain,
    HostName,
    NameServer,
    ApplyIpOnly,
    IpSet,
    IpAdd,
    IpDel,
    Gw,
    Gw6,
    Dhcp,
    Dhcp6,
    Configure,
    PreventPromisc,
    IpFilter,
    MacFilter,
    UserPasswd,
    HostAdmin,
    Crypted,
    UseDefAnswers,
    ToolsAutoUpdate,
    SmartMount,
    Fw,
    FwPolicy,
    FwRule,
    FwDirection,

    // migrate
    SessionId,
    CloneMode,
    RemoveSrc,
    SwitchTemplate,
    IgnoreExistingBundle,
    SshOpts,
    Uncompressed,
    NoTunnel,

    // backup
    BackupFull,
    BackupInc,
    BackupDiff,
    BackupId,
    VmId,
    BackupList,
    BackupListFull,
    LocalVms,
    KeepChain,

    // statistics and problem reports
    Loop,
    PerfFilter,
    Send,
    Dump,
    NoProxy,
    Proxy,
    StandAlone,
    ReportName,
    ReportEmail,
    ReportDesc,

    // server settings
    MemLimit,
    MngSettings,
    MinSecurityLevel,
    Assignment,
    Cep,
    VerboseLog,
    BackupPath,
    BackupTmpdir,
    BackupTimeout,
    AddOffSrv,
    DelOffSrv,
    AddNetClass,
    DelNetClass,
    AddShaping,
    DelShaping,
    AddBandwidth,
    DelBandwidth,
    Shaping,
    LogRotation,
    AllowAttachScreenshots,
    AdvSecurityMode,
    CpuFeaturesMask,
    VncPublicKey,
    VncPrivateKey,
    VmCpuLimitType,
    ListenInterface,
    SuspendToPram,
    InfoLicense,
    DefVmHome,

    // virtual networks
    VNetName,
    VNetIfName,
    VNetDesc,
    VNetType,
    VNetMac,
    IpScopeStart,
    IpScopeEnd,
    Ip6ScopeStart,
    Ip6ScopeEnd,
    NatTcpAdd,
    NatUdpAdd,
    NatTcpDel,
    NatUdpDel,
    HostIp,
    HostIp6,
    DhcpServer,
    Dhcp6Server,
    DhcpIp,
    DhcpIp6,

    // private networks
    PrivIpAdd,
    PrivIpDel,
    PrivGlobal,
}

pub type Table = OptionTable<OptId>;

fn flag(name: &str, id: OptId) -> Opt<OptId> {
    Opt::new(name, id)
}

fn value(name: &str, id: OptId) -> Opt<OptId> {
    Opt::new(name, id).arg_type(ArgType::Value)
}

/// `--verbose`, `--timeout`, `--login`, `--read-passwd`, `--compat`.
pub fn global() -> Table {
    OptionTable::new()
        .option(value("verbose", OptId::Verbose).short('v'))
        .option(value("timeout", OptId::Timeout))
        .option(value("login", OptId::Login).short('l'))
        .option(value("read-passwd", OptId::ReadPasswd).short('p'))
        .option(flag("compat", OptId::Compat))
}

fn with_global() -> Table {
    OptionTable::new().include_table(global())
}

pub fn no_options() -> Table {
    with_global()
}

fn location(t: Table) -> Table {
    t.option(value("location", OptId::Location))
        .option(value("dst", OptId::Location))
}

// ============================================================================
// VM lifecycle
// ============================================================================

pub fn stop() -> Table {
    with_global()
        .option(flag("fast", OptId::Fast))
        .option(flag("kill", OptId::Fast).short('k'))
        .option(flag("acpi", OptId::UseAcpi))
        .option(flag("force", OptId::Force))
        .option(flag("noforce", OptId::NoForce))
}

pub fn destroy() -> Table {
    with_global().option(flag("force", OptId::Force))
}

pub fn start() -> Table {
    with_global().option(flag("wait", OptId::Wait))
}

pub fn mount() -> Table {
    with_global()
        .option(value("options", OptId::MountOpts).short('o'))
        .option(flag("info", OptId::MountInfo))
}

pub fn exec() -> Table {
    with_global().option(flag("without-shell", OptId::WithoutShell))
}

pub fn clone() -> Table {
    location(with_global())
        .option(value("name", OptId::Name).short('n'))
        .option(flag("template", OptId::Template).short('t'))
        .option(flag("changesid", OptId::ChangeSid).short('s'))
        .option(flag("linked", OptId::LinkedClone))
        .option(value("detach-external-hdd", OptId::DetachExternalHdd))
        .option(flag("online", OptId::OnlineClone))
}

pub fn auth() -> Table {
    with_global()
        .option(value("username", OptId::UserName))
        .option(value("userpassword", OptId::UserPassword))
}

pub fn create() -> Table {
    location(with_global())
        .option(value("ostype", OptId::OsType).short('o'))
        .option(value("distribution", OptId::Distribution).short('d'))
        .option(value("config", OptId::Config).short('c'))
        .option(value("ostemplate", OptId::OsTemplate).short('t'))
        .option(flag("changesid", OptId::ChangeSid).short('s'))
        .option(value("vmtype", OptId::VmType))
        .option(flag("no-hdd", OptId::NoHdd))
        .option(value("hdd-block-size", OptId::HddBlockSize))
        .option(flag("lion-recovery", OptId::LionRecovery))
        .option(value("uuid", OptId::Uuid))
}

pub fn convert() -> Table {
    location(with_global()).option(flag("force", OptId::Force).short('f'))
}

pub fn register() -> Table {
    with_global()
        .option(flag("force", OptId::Force))
        .option(flag("ignore-ha-cluster", OptId::IgnoreHaCluster))
        .option(flag("preserve-uuid", OptId::PreserveUuid))
        .option(flag("regenerate-src-uuid", OptId::RegenerateSrcUuid))
        .option(value("uuid", OptId::Uuid))
}

pub fn moving() -> Table {
    location(with_global())
}

pub fn capture() -> Table {
    with_global().option(value("file", OptId::File).short('f'))
}

// ============================================================================
// set
// ============================================================================

pub fn set() -> Table {
    let t = with_global()
        // device selectors
        .option(value("device-add", OptId::DeviceAdd))
        .option(value("netif_add", OptId::NetifAdd))
        .option(value("device-set", OptId::DeviceSet))
        .option(value("device-del", OptId::DeviceDel))
        .option(value("netif_del", OptId::NetifDel))
        .option(value("device-connect", OptId::DeviceConnect))
        .option(value("device-disconnect", OptId::DeviceDisconnect))
        .option(value("device-bootorder", OptId::DeviceBootOrder))
        // device properties
        .option(value("device", OptId::Device))
        .option(value("distribution", OptId::Distribution).short('d'))
        .option(value("image", OptId::Image))
        .option(value("mnt", OptId::Mnt))
        .option(flag("recreate", OptId::Recreate))
        .option(value("type", OptId::DevType).short('t'))
        .option(value("adapter-type", OptId::AdapterType))
        .option(value("size", OptId::Size).short('s'))
        .option(flag("offline", OptId::Offline))
        .option(flag("no-fs-resize", OptId::NoFsResize))
        .option(value("diskspace", OptId::Size))
        .option(flag("split", OptId::Split))
        .option(flag("enable", OptId::Enable).short('e'))
        .option(flag("disable", OptId::Disable))
        .option(flag("connect", OptId::Connect).short('c'))
        .option(flag("disconnect", OptId::Disconnect))
        .option(value("hdd-block-size", OptId::HddBlockSize))
        .option(value("iface", OptId::Iface))
        .option(value("subtype", OptId::Subtype))
        .option(value("passthr", OptId::Passthr))
        .option(value("position", OptId::Position))
        .option(value("mac", OptId::Mac))
        // cpu, memory, video
        .option(value("cpus", OptId::Cpus))
        .option(value("cpu-hotplug", OptId::CpuHotplug))
        .option(value("memsize", OptId::MemSize))
        .option(value("videosize", OptId::VideoSize))
        .option(value("3d-accelerate", OptId::Accel3d))
        .option(value("vertical-sync", OptId::VerticalSync))
        .option(value("high-resolution", OptId::HighResolution))
        .option(value("mem-hotplug", OptId::MemHotplug))
        .option(value("memquota", OptId::MemQuota))
        .option(value("memguarantee", OptId::MemGuarantee))
        .option(value("applyconfig", OptId::Config))
        .option(value("description", OptId::Description))
        .option(value("name", OptId::VmName))
        .option(flag("rename-ext-disks", OptId::RenameExtDisks))
        .option(value("template", OptId::IsTemplate))
        .option(value("smart-mouse-optimize", OptId::SmartMouse))
        .option(value("sticky-mouse", OptId::StickyMouse))
        .option(value("keyboard-optimize", OptId::KeyboardOptimize))
        .option(value("sync-host-printers", OptId::SyncHostPrinters))
        .option(value("sync-default-printer", OptId::SyncDefaultPrinter))
        .option(value("auto-share-camera", OptId::AutoShareCamera))
        .option(value("auto-share-bluetooth", OptId::AutoShareBluetooth))
        .option(value("support-usb30", OptId::SupportUsb30))
        .option(value("efi-boot", OptId::EfiBoot))
        .option(value("select-boot-device", OptId::SelectBootDev))
        .option(value("external-boot-device", OptId::ExtBootDev))
        // serial, parallel and sound ports
        .option(value("output", OptId::Output))
        .option(value("socket", OptId::Socket))
        .option(value("socket-tcp", OptId::SocketTcp))
        .option(value("socket-udp", OptId::SocketUdp))
        .option(value("socket-mode", OptId::SocketMode))
        .option(value("mixer", OptId::Mixer))
        .option(value("input", OptId::Mixer));

    let t = t
        // startup and shutdown
        .option(value("autostart", OptId::Autostart))
        .option(value("onboot", OptId::Autostart))
        .option(value("autostart-delay", OptId::AutostartDelay))
        .option(value("autostop", OptId::Autostop))
        .option(value("startup-view", OptId::StartupView))
        .option(value("on-shutdown", OptId::OnShutdown))
        .option(value("on-window-close", OptId::OnWindowClose))
        .option(value("system-flags", OptId::SystemFlags).short('f'))
        // optimization and integration
        .option(value("faster-vm", OptId::FasterVm))
        .option(value("adaptive-hypervisor", OptId::AdaptiveHypervisor))
        .option(value("auto-compress", OptId::AutoCompress))
        .option(value("nested-virt", OptId::NestedVirt))
        .option(value("pmu-virt", OptId::PmuVirt))
        .option(value("longer-battery-life", OptId::LongerBatteryLife))
        .option(value("battery-status", OptId::BatteryStatus))
        .option(value("winsystray-in-macmenu", OptId::WinSystrayInMacMenu))
        .option(value("auto-switch-fullscreen", OptId::AutoSwitchFullscreen))
        .option(value("disable-aero", OptId::DisableAero))
        .option(value("hide-min-windows", OptId::HideMinWindows))
        // security
        .option(value("require-pwd", OptId::RequirePwd))
        .option(value("lock-edit-settings", OptId::LockEditSettings))
        .option(value("lock-on-suspend", OptId::LockOnSuspend))
        .option(value("isolate-vm", OptId::IsolateVm))
        .option(value("smart-guard", OptId::SmartGuard))
        .option(value("sg-notify-before-create", OptId::SgNotifyBeforeCreate))
        .option(value("sg-interval", OptId::SgInterval))
        .option(value("sg-max-snapshots", OptId::SgMaxSnapshots))
        .option(value("expiration", OptId::Expiration))
        // remote display
        .option(value("vnc-mode", OptId::VncMode))
        .option(value("vnc-port", OptId::VncPort))
        .option(value("vnc-passwd", OptId::VncPasswd))
        .option(flag("vnc-nopasswd", OptId::VncNoPasswd))
        .option(value("vnc-address", OptId::VncAddress))
        .option(value("features", OptId::Features));

    let t = t
        // guest network
        .option(value("ifname", OptId::IfName))
        .option(value("searchdomain", OptId::SearchDomain))
        .option(value("hostname", OptId::HostName))
        .option(value("nameserver", OptId::NameServer))
        .option(value("apply-iponly", OptId::ApplyIpOnly))
        .option(value("ipset", OptId::IpSet))
        .option(value("ipadd", OptId::IpAdd))
        .option(value("ipdel", OptId::IpDel))
        .option(value("gw", OptId::Gw))
        .option(value("gw6", OptId::Gw6))
        .option(value("dhcp", OptId::Dhcp))
        .option(value("dhcp6", OptId::Dhcp6))
        .option(value("configure", OptId::Configure))
        .option(value("preventpromisc", OptId::PreventPromisc))
        .option(value("ipfilter", OptId::IpFilter))
        .option(value("macfilter", OptId::MacFilter))
        .option(value("userpasswd", OptId::UserPasswd))
        .option(value("host-admin", OptId::HostAdmin))
        .option(flag("crypted", OptId::Crypted))
        .option(value("usedefanswers", OptId::UseDefAnswers))
        .option(value("tools-autoupdate", OptId::ToolsAutoUpdate))
        .option(value("smart-mount", OptId::SmartMount))
        .option(value("fw", OptId::Fw))
        .option(value("fw-policy", OptId::FwPolicy))
        .option(value("fw-rule", OptId::FwRule))
        .option(value("fw-direction", OptId::FwDirection))
        .option(value("network", OptId::VNetwork));

    t
        // containers and resource limits
        .option(value("ioprio", OptId::IoPrio))
        .option(value("iolimit", OptId::IoLimit))
        .option(value("iopslimit", OptId::IopsLimit))
        .option(value("cpuunits", OptId::CpuUnits))
        .option(value("cpulimit", OptId::CpuLimit))
        .option(value("cpumask", OptId::CpuMask))
        .option(value("nodemask", OptId::NodeMask))
        .option(value("apptemplate", OptId::AppTemplate))
        .option(value("swappages", OptId::SwapPages))
        .option(value("swap", OptId::Swap))
        .option(value("quotaugidlimit", OptId::QuotaUgidLimit))
        .option(value("capability", OptId::Capability))
        .option(value("netfilter", OptId::Netfilter))
        .option(value("ha-enable", OptId::HaEnable))
        .option(value("ha_enable", OptId::HaEnable))
        .option(value("ha", OptId::HaEnable))
        .option(value("ha-prio", OptId::HaPrio))
        .option(value("ha_prio", OptId::HaPrio))
        .option(value("backup-add", OptId::BackupAdd))
        .option(value("disk", OptId::BackupDisk))
        .option(value("backup-del", OptId::BackupDel))
        .option(value("offline-management", OptId::OffMan))
        .option(value("offline_management", OptId::OffMan))
        .option(value("offman", OptId::OffMan))
        .option(value("offline-service", OptId::OffSrv))
        .option(value("offline_service", OptId::OffSrv))
        .option(value("offsrv", OptId::OffSrv))
        .option(value("rate", OptId::Rate))
        .option(value("ratebound", OptId::RateBound))
        .option(flag("destroy-image", OptId::DestroyHdd))
        .option(flag("destroy-image-force", OptId::DestroyHddForce))
        .option(flag("detach-only", OptId::DetachHdd))
        .option(flag("password-to-edit", OptId::RestrictEditing))
        .option(value("autocompact", OptId::AutoCompact))
}

// ============================================================================
// list, snapshots, tasks
// ============================================================================

pub fn list() -> Table {
    with_global()
        .option(value("output", OptId::ListField).short('o'))
        .option(flag("all", OptId::ListAll).short('a'))
        .option(flag("no-header", OptId::ListNoHeader).short('H'))
        .option(value("sort", OptId::ListSort).short('s'))
        .option(flag("stopped", OptId::ListStopped).short('S'))
        .option(flag("name", OptId::ListName).short('n'))
        .option(flag("template", OptId::Template).short('t'))
        .option(value("vmtype", OptId::VmType))
        .option(flag("help", OptId::Help))
        .option(flag("info", OptId::ListInfo).short('i'))
        .option(flag("json", OptId::Json).short('j'))
        .option(flag("full", OptId::InfoFull).short('f'))
        .option(flag("list", OptId::ListAllFields).short('L'))
}

pub fn snapshot() -> Table {
    with_global()
        .option(value("name", OptId::SnapshotName).short('n'))
        .option(value("description", OptId::SnapshotDesc).short('d'))
        .option(flag("wait", OptId::SnapshotWait))
}

pub fn snapshot_switch() -> Table {
    with_global()
        .option(value("id", OptId::SnapshotId).short('i'))
        .option(flag("wait", OptId::SnapshotWait))
        .option(flag("skip-resume", OptId::SnapshotSkipResume))
}

pub fn snapshot_delete() -> Table {
    with_global()
        .option(value("id", OptId::SnapshotId).short('i'))
        .option(flag("children", OptId::SnapshotChildren).short('c'))
}

pub fn snapshot_list() -> Table {
    with_global()
        .option(value("id", OptId::SnapshotId).short('i'))
        .option(flag("tree", OptId::SnapshotTree).short('t'))
        .option(flag("no-header", OptId::ListNoHeader).short('H'))
}

pub fn migrate() -> Table {
    with_global()
        .option(flag("force", OptId::Force).short('f'))
        .option(value("securitylevel", OptId::SecurityLevel))
        .option(value("location", OptId::Location))
        .option(value("dst", OptId::Location))
        .option(value("sessionid", OptId::SessionId).short('s'))
        .option(flag("clone", OptId::CloneMode))
        .option(flag("keep-src", OptId::CloneMode))
        .option(flag("remove-src", OptId::RemoveSrc))
        .option(flag("switch-template", OptId::SwitchTemplate))
        .option(flag("changesid", OptId::ChangeSid))
        .option(flag("ignore-existing-bundle", OptId::IgnoreExistingBundle))
        .option(value("ssh", OptId::SshOpts))
        .option(flag("no-compression", OptId::Uncompressed))
        .option(flag("no-tunnel", OptId::NoTunnel))
}

pub fn backup() -> Table {
    with_global()
        .option(flag("full", OptId::BackupFull).short('f'))
        .option(Opt::short_only('F', OptId::BackupFull))
        .option(Opt::short_only('I', OptId::BackupFull))
        .option(flag("incremental", OptId::BackupInc).short('i'))
        .option(flag("differental", OptId::BackupDiff).short('d'))
        .option(value("storage", OptId::Storage).short('s'))
        .option(value("securitylevel", OptId::SecurityLevel))
        .option(value("description", OptId::Description))
        .option(flag("uncompressed", OptId::Uncompressed).short('u'))
        .option(flag("no-compression", OptId::Uncompressed))
}

pub fn restore() -> Table {
    location(
        with_global()
            .option(value("storage", OptId::Storage).short('s'))
            .option(value("tag", OptId::BackupId).short('t'))
            .option(value("id", OptId::BackupId).short('i'))
            .option(value("vm", OptId::VmId).short('e'))
            .option(value("name", OptId::Name).short('n'))
            .option(flag("list", OptId::BackupList))
            .option(flag("full", OptId::BackupListFull).short('f'))
            .option(value("securitylevel", OptId::SecurityLevel)),
    )
}

pub fn backup_list() -> Table {
    with_global()
        .option(flag("full", OptId::BackupListFull).short('f'))
        .option(value("storage", OptId::Storage).short('s'))
        .option(flag("no-header", OptId::ListNoHeader).short('H'))
        .option(flag("localvms", OptId::LocalVms))
        .option(flag("localvm", OptId::LocalVms))
        .option(value("securitylevel", OptId::SecurityLevel))
        .option(value("vmtype", OptId::VmType))
}

pub fn backup_delete() -> Table {
    with_global()
        .option(value("storage", OptId::Storage).short('s'))
        .option(value("tag", OptId::BackupId).short('t'))
        .option(value("id", OptId::BackupId).short('i'))
        .option(value("securitylevel", OptId::SecurityLevel))
        .option(flag("keep-chain", OptId::KeepChain).short('k'))
}

pub fn statistics() -> Table {
    with_global()
        .option(flag("all", OptId::ListAll).short('a'))
        .option(flag("loop", OptId::Loop))
        .option(value("filter", OptId::PerfFilter))
}

pub fn problem_report() -> Table {
    with_global()
        .option(flag("send", OptId::Send).short('s'))
        .option(flag("dump", OptId::Dump).short('d'))
        .option(flag("no-proxy", OptId::NoProxy))
        .option(value("proxy", OptId::Proxy))
        .option(flag("stand-alone", OptId::StandAlone))
        .option(value("name", OptId::ReportName))
        .option(value("email", OptId::ReportEmail))
        .option(value("description", OptId::ReportDesc))
}

// ============================================================================
// Server
// ============================================================================

pub fn disp_set() -> Table {
    with_global()
        .option(value("mem-limit", OptId::MemLimit).short('m'))
        .option(value("mng-settings", OptId::MngSettings))
        .option(value("min-security-level", OptId::MinSecurityLevel).short('s'))
        .option(value("assignment", OptId::Assignment))
        .option(value("device", OptId::Device))
        .option(value("cep", OptId::Cep).short('c'))
        .option(value("verbose-log", OptId::VerboseLog))
        .option(value("backup-path", OptId::BackupPath))
        .option(value("backup-tmpdir", OptId::BackupTmpdir))
        .option(value("backup-storage", OptId::Storage))
        .option(value("def-backup-storage", OptId::Storage))
        .option(value("default-backup-storage", OptId::Storage))
        .option(value("backup-timeout", OptId::BackupTimeout))
        .option(value("idle-connection-timeout", OptId::BackupTimeout))
        .option(value("add-offsrv", OptId::AddOffSrv))
        .option(value("del-offsrv", OptId::DelOffSrv))
        .option(value("add-network-class", OptId::AddNetClass))
        .option(value("del-network-class", OptId::DelNetClass))
        .option(value("add-shaping-entry", OptId::AddShaping))
        .option(value("del-shaping-entry", OptId::DelShaping))
        .option(value("add-bandwidth-entry", OptId::AddBandwidth))
        .option(value("del-bandwidth-entry", OptId::DelBandwidth))
        .option(value("shaping", OptId::Shaping))
        .option(value("log-rotation", OptId::LogRotation))
        .option(value("allow-attach-screenshots", OptId::AllowAttachScreenshots))
        .option(value("require-pwd", OptId::RequirePwd))
        .option(value("lock-edit-settings", OptId::LockEditSettings))
        .option(value("advanced-security-mode", OptId::AdvSecurityMode))
        .option(value("cpu-features-mask", OptId::CpuFeaturesMask))
        .option(value("vnc-public-key", OptId::VncPublicKey))
        .option(value("vnc-private-key", OptId::VncPrivateKey))
        .option(value("vm-cpulimit-type", OptId::VmCpuLimitType))
}

pub fn disp_vnet() -> Table {
    with_global()
        .option(value("name", OptId::VNetName).short('n'))
        .option(value("ifname", OptId::VNetIfName).short('i'))
        .option(value("description", OptId::VNetDesc).short('d'))
        .option(value("type", OptId::VNetType).short('t'))
        .option(value("mac", OptId::VNetMac).short('m'))
        .option(value("ip-scope-start", OptId::IpScopeStart))
        .option(value("ip-scope-end", OptId::IpScopeEnd))
        .option(value("ip6-scope-start", OptId::Ip6ScopeStart))
        .option(value("ip6-scope-end", OptId::Ip6ScopeEnd))
        .option(value("nat-tcp-add", OptId::NatTcpAdd))
        .option(value("nat-udp-add", OptId::NatUdpAdd))
        .option(value("nat-tcp-del", OptId::NatTcpDel))
        .option(value("nat-udp-del", OptId::NatUdpDel))
        .option(value("ip", OptId::HostIp))
        .option(value("ip6", OptId::HostIp6))
        .option(value("dhcp-server", OptId::DhcpServer))
        .option(value("dhcp6-server", OptId::Dhcp6Server))
        .option(value("dhcp-ip", OptId::DhcpIp))
        .option(value("dhcp-ip6", OptId::DhcpIp6))
        .option(flag("json", OptId::Json).short('j'))
}

pub fn disp_privnet() -> Table {
    with_global()
        .option(value("ipadd", OptId::PrivIpAdd).short('a'))
        .option(value("ipdel", OptId::PrivIpDel).short('d'))
        .option(value("global", OptId::PrivGlobal))
        .option(flag("json", OptId::Json).short('j'))
}

pub fn disp_usb() -> Table {
    with_global().option(flag("json", OptId::Json).short('j'))
}

pub fn disp_shutdown() -> Table {
    with_global()
        .option(flag("force", OptId::Force).short('f'))
        .option(flag("suspend-vm-to-pram", OptId::SuspendToPram))
}

pub fn disp_info() -> Table {
    with_global()
        .option(flag("license", OptId::InfoLicense))
        .option(flag("json", OptId::Json).short('j'))
        .option(flag("full", OptId::InfoFull).short('f'))
}

pub fn disp_listen_iface() -> Table {
    with_global().option(value("listen-interface", OptId::ListenInterface))
}

pub fn user_list() -> Table {
    with_global()
        .option(value("output", OptId::ListField).short('o'))
        .option(flag("all", OptId::ListAll).short('a'))
        .option(flag("no-header", OptId::ListNoHeader).short('H'))
        .option(value("sort", OptId::ListSort).short('s'))
        .option(flag("help", OptId::Help))
        .option(flag("json", OptId::Json).short('j'))
}

pub fn user_set() -> Table {
    with_global().option(value("def-vm-home", OptId::DefVmHome))
}

pub fn license() -> Table {
    with_global()
        .option(value("key", OptId::Key).short('k'))
        .option(value("name", OptId::Name).short('n'))
        .option(value("company", OptId::Company).short('c'))
}

pub fn appliance() -> Table {
    with_global()
        .option(value("file", OptId::File))
        .option(flag("batch", OptId::Batch).short('b'))
}

pub fn ct_template_copy() -> Table {
    with_global()
        .option(flag("force", OptId::Force).short('f'))
        .option(value("securitylevel", OptId::SecurityLevel))
}
