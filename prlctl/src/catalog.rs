//! Static name tables: guest distributions, feature toggles, container
//! capabilities and netfilter modes.

use std::fmt::Write as _;

// ============================================================================
// Distributions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Linux,
    MacOs,
    FreeBsd,
    Os2,
    MsDos,
    Netware,
    Solaris,
    ChromeOs,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Distribution {
    pub name: &'static str,
    pub family: OsFamily,
}

const fn dist(name: &'static str, family: OsFamily) -> Distribution {
    Distribution { name, family }
}

/// Generic guest types accepted by `--ostype`.
pub const OS_TYPES: &[Distribution] = &[
    dist("windows", OsFamily::Windows),
    dist("win", OsFamily::Windows),
    dist("linux", OsFamily::Linux),
    dist("lin", OsFamily::Linux),
    dist("macos", OsFamily::MacOs),
    dist("freebsd", OsFamily::FreeBsd),
    dist("os2", OsFamily::Os2),
    dist("msdos", OsFamily::MsDos),
    dist("netware", OsFamily::Netware),
    dist("solaris", OsFamily::Solaris),
    dist("other", OsFamily::Other),
];

/// Specific guest versions accepted by `--distribution`.
pub const DISTRIBUTIONS: &[Distribution] = &[
    dist("win-2000", OsFamily::Windows),
    dist("win-xp", OsFamily::Windows),
    dist("win-2003", OsFamily::Windows),
    dist("win-vista", OsFamily::Windows),
    dist("win-2008", OsFamily::Windows),
    dist("win-7", OsFamily::Windows),
    dist("win-8", OsFamily::Windows),
    dist("win-2012", OsFamily::Windows),
    dist("win-8.1", OsFamily::Windows),
    dist("win", OsFamily::Windows),
    dist("rhel", OsFamily::Linux),
    dist("rhel7", OsFamily::Linux),
    dist("suse", OsFamily::Linux),
    dist("debian", OsFamily::Linux),
    dist("fedora-core", OsFamily::Linux),
    dist("fc", OsFamily::Linux),
    dist("xandros", OsFamily::Linux),
    dist("ubuntu", OsFamily::Linux),
    dist("mandriva", OsFamily::Linux),
    dist("mandrake", OsFamily::Linux),
    dist("centos", OsFamily::Linux),
    dist("centos7", OsFamily::Linux),
    dist("psbm", OsFamily::Linux),
    dist("redhat", OsFamily::Linux),
    dist("opensuse", OsFamily::Linux),
    dist("linux-2.4", OsFamily::Linux),
    dist("linux-2.6", OsFamily::Linux),
    dist("linux", OsFamily::Linux),
    dist("mageia", OsFamily::Linux),
    dist("mint", OsFamily::Linux),
    dist("macosx", OsFamily::MacOs),
    dist("tiger", OsFamily::MacOs),
    dist("macos-10.4", OsFamily::MacOs),
    dist("leopard", OsFamily::MacOs),
    dist("macos-10.5", OsFamily::MacOs),
    dist("snowleopard", OsFamily::MacOs),
    dist("macos-10.6", OsFamily::MacOs),
    dist("freebsd-4", OsFamily::FreeBsd),
    dist("freebsd-5", OsFamily::FreeBsd),
    dist("freebsd-6", OsFamily::FreeBsd),
    dist("freebsd-7", OsFamily::FreeBsd),
    dist("freebsd-8", OsFamily::FreeBsd),
    dist("freebsd", OsFamily::FreeBsd),
    dist("chrome-1", OsFamily::ChromeOs),
    dist("chrome", OsFamily::ChromeOs),
];

pub fn find_os_type(name: &str) -> Option<Distribution> {
    OS_TYPES.iter().copied().find(|d| d.name == name)
}

pub fn find_distribution(name: &str) -> Option<Distribution> {
    DISTRIBUTIONS.iter().copied().find(|d| d.name == name)
}

/// Name listing in rows of four, 16 columns per name.
pub fn format_names(list: &[Distribution]) -> String {
    let mut out = String::from("\n");
    for (i, d) in list.iter().enumerate() {
        let sep = if (i + 1) % 4 == 0 { "\n" } else { "\t" };
        let _ = write!(out, "{:<16}{}", d.name, sep);
    }
    out.push('\n');
    out
}

// ============================================================================
// Features
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureClass {
    Vm,
    Ct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// `on` / `off`.
    Toggle,
    /// Unsigned number carried next to the mask.
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureDef {
    pub name: &'static str,
    pub class: FeatureClass,
    pub bit: u32,
    pub kind: FeatureKind,
}

const fn vm(name: &'static str, bit: u32, kind: FeatureKind) -> FeatureDef {
    FeatureDef {
        name,
        class: FeatureClass::Vm,
        bit,
        kind,
    }
}

const fn ct(name: &'static str, bit: u32) -> FeatureDef {
    FeatureDef {
        name,
        class: FeatureClass::Ct,
        bit,
        kind: FeatureKind::Toggle,
    }
}

pub const FEATURES: &[FeatureDef] = &[
    vm("auto_capture_release_mouse", 1 << 0, FeatureKind::Toggle),
    vm("share_clipboard", 1 << 1, FeatureKind::Toggle),
    vm("time_synchronization", 1 << 2, FeatureKind::Toggle),
    vm("time_sync_smart_mode", 1 << 3, FeatureKind::Toggle),
    vm("shared_profile", 1 << 4, FeatureKind::Toggle),
    vm("use_desktop", 1 << 5, FeatureKind::Toggle),
    vm("use_documents", 1 << 6, FeatureKind::Toggle),
    vm("use_pictures", 1 << 7, FeatureKind::Toggle),
    vm("use_music", 1 << 8, FeatureKind::Toggle),
    vm("time_sync_interval", 1 << 9, FeatureKind::Number),
    vm("smart_guard", 1 << 10, FeatureKind::Toggle),
    vm("smart_guard_notify", 1 << 11, FeatureKind::Toggle),
    vm("smart_guard_interval", 1 << 12, FeatureKind::Number),
    vm("smart_guard_max_snapshots", 1 << 13, FeatureKind::Number),
    vm("smart_mount", 1 << 14, FeatureKind::Toggle),
    vm("smart_mount_external_disks", 1 << 15, FeatureKind::Toggle),
    vm("smart_mount_external_dvds", 1 << 16, FeatureKind::Toggle),
    vm("smart_mount_network_shares", 1 << 17, FeatureKind::Toggle),
    ct("sysfs", 1 << 0),
    ct("nfs", 1 << 1),
    ct("sit", 1 << 2),
    ct("ipip", 1 << 3),
    ct("ppp", 1 << 4),
    ct("ipgre", 1 << 5),
    ct("bridge", 1 << 6),
    ct("nfsd", 1 << 7),
];

pub fn find_feature(name: &str) -> Option<&'static FeatureDef> {
    FEATURES.iter().find(|f| f.name == name)
}

// ============================================================================
// Capabilities
// ============================================================================

pub const CAPABILITIES: [&str; 33] = [
    "CHOWN",
    "DAC_OVERRIDE",
    "DAC_READ_SEARCH",
    "FOWNER",
    "FSETID",
    "KILL",
    "SETGID",
    "SETUID",
    "SETPCAP",
    "LINUX_IMMUTABLE",
    "NET_BIND_SERVICE",
    "NET_BROADCAST",
    "NET_ADMIN",
    "NET_RAW",
    "IPC_LOCK",
    "IPC_OWNER",
    "SYS_MODULE",
    "SYS_RAWIO",
    "SYS_CHROOT",
    "SYS_PTRACE",
    "SYS_PACCT",
    "SYS_ADMIN",
    "SYS_BOOT",
    "SYS_NICE",
    "SYS_RESOURCE",
    "SYS_TIME",
    "SYS_TTY_CONFIG",
    "MKNOD",
    "LEASE",
    "AUDIT_WRITE",
    "VE_ADMIN",
    "SETFCAP",
    "FS_MASK",
];

/// Bit index of a capability, matched case-insensitively.
pub fn capability_index(name: &str) -> Option<usize> {
    let upper = name.to_ascii_uppercase();
    CAPABILITIES.iter().position(|c| *c == upper)
}

// ============================================================================
// Netfilter
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetfilterMode {
    Disabled,
    Stateless,
    Stateful,
    Full,
}

impl NetfilterMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "disabled" => Some(NetfilterMode::Disabled),
            "stateless" => Some(NetfilterMode::Stateless),
            "stateful" => Some(NetfilterMode::Stateful),
            "full" => Some(NetfilterMode::Full),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NetfilterMode::Disabled => "disabled",
            NetfilterMode::Stateless => "stateless",
            NetfilterMode::Stateful => "stateful",
            NetfilterMode::Full => "full",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_exact() {
        assert_eq!(find_os_type("win").map(|d| d.family), Some(OsFamily::Windows));
        assert!(find_os_type("win-7").is_none());
        assert_eq!(
            find_distribution("centos7").map(|d| d.family),
            Some(OsFamily::Linux)
        );
        assert!(find_distribution("Centos7").is_none());
        assert!(find_distribution("windows").is_none());
    }

    #[test]
    fn names_are_unique() {
        for list in [OS_TYPES, DISTRIBUTIONS] {
            for (i, d) in list.iter().enumerate() {
                assert!(!list[i + 1..].iter().any(|o| o.name == d.name), "{}", d.name);
            }
        }
    }

    #[test]
    fn listing_breaks_every_fourth_name() {
        let text = format_names(&OS_TYPES[..5]);
        assert!(text.starts_with('\n'));
        assert!(text.contains(&format!("{:<16}\n", "lin")));
        assert!(text.contains(&format!("{:<16}\t", "windows")));
        assert!(text.ends_with(&format!("{:<16}\t\n", "macos")));
    }

    #[test]
    fn feature_bits_are_distinct_per_class() {
        for class in [FeatureClass::Vm, FeatureClass::Ct] {
            let mut seen = 0u32;
            for f in FEATURES.iter().filter(|f| f.class == class) {
                assert_eq!(seen & f.bit, 0, "{}", f.name);
                seen |= f.bit;
            }
        }
        assert_eq!(find_feature("nfsd").map(|f| f.class), Some(FeatureClass::Ct));
        assert_eq!(
            find_feature("time_sync_interval").map(|f| f.kind),
            Some(FeatureKind::Number)
        );
    }

    #[test]
    fn capabilities_ignore_case() {
        assert_eq!(capability_index("chown"), Some(0));
        assert_eq!(capability_index("Net_Admin"), Some(12));
        assert_eq!(capability_index("FS_MASK"), Some(32));
        assert_eq!(capability_index("nope"), None);
    }

    #[test]
    fn netfilter_round_trips_names() {
        for m in [
            NetfilterMode::Disabled,
            NetfilterMode::Stateless,
            NetfilterMode::Stateful,
            NetfilterMode::Full,
        ] {
            assert_eq!(NetfilterMode::parse(m.name()), Some(m));
        }
        assert_eq!(NetfilterMode::parse("FULL"), None);
    }
}
