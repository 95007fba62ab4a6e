use std::path::Path;

const VM_USAGE: &str = r#"Usage: {prog} ACTION <ID | NAME> [OPTIONS] [-l user[[:passwd]@server[:port]]]
Supported actions are:
  backup <ID | NAME> [-s,--storage <user[[:passwd]@server[:port]]>] [--description <desc>]
    [-f,--full | -i,--incremental] [--no-compression]
  backup-list [ID | NAME] [-f,--full] [--vmtype ct|vm|all] [--localvms]
    [-s,--storage <user[[:passwd]@server[:port]]>]
  backup-delete {<ID> | -t,--tag <backupid>} [--keep-chain] [-s,--storage <...>]
  restore {<ID> | -t,--tag <backupid>} [-s,--storage <...>] [-n,--name <new_name>] [--dst <path>]
  clone <ID | NAME> --name <NEW_NAME> [--template] [--dst <path>] [--changesid] [--linked]
    [--detach-external-hdd <yes|no>]
  console <ID | NAME>
  create <NAME> {--ostemplate <name> | -o,--ostype <name|list> | -d,--distribution <name|list>}
    [--vmtype ct|vm] [--dst <path>] [--changesid] [--no-hdd]
  delete <ID | NAME>
  enter <ID | NAME>
  exec <ID | NAME> [--without-shell] <command> [arg ...]
  list [-a,--all] [-t,--template] [--vmtype ct|vm|all] [-L] [-o,--output name[,name...]] [-s,--sort name]
  list -i,--info [-f,--full] [-j,--json] [<ID | NAME>] [--vmtype ct|vm|all]
  migrate <[src_node/]ID> <dst_node[/NAME]> [--dst <path>] [--changesid] [--clone | --remove-src]
    [--no-compression] [--no-tunnel] [--ssh <options>]
  mount <ID | NAME> [{-o ro|rw | --info}]
  move <ID | NAME> --dst <path>
  pause <ID | NAME>
  problem-report <ID | NAME> {-d,--dump | -s,--send [--proxy <[user[:password]@]host[:port]>]}
    [--no-proxy] [--name <name>] [--email <email>] [--description <desc>]
  register <PATH> [--preserve-uuid | --uuid <UUID>] [--regenerate-src-uuid] [--force]
  reset <ID | NAME>
  reset-uptime <ID | NAME>
  restart <ID | NAME>
  resume <ID | NAME>
  set <ID | NAME> [OPTIONS]
  snapshot <ID | NAME> [-n,--name <name>] [-d,--description <desc>]
  snapshot-delete <ID | NAME> -i,--id <snapid> [-c,--children]
  snapshot-list <ID | NAME> [-t,--tree] [-i,--id <snapid>]
  snapshot-switch <ID | NAME> -i,--id <snapid> [--skip-resume]
  start <ID | NAME> [--wait]
  statistics {<ID | NAME> | -a,--all} [--filter <filter>] [--loop]
  status <ID | NAME>
  stop <ID | NAME> [--kill | --noforce]
  suspend <ID | NAME>
  umount <ID | NAME>
  unregister <ID | NAME>
Device management options of set:
  --device-add <hdd | cdrom | net | fdd | serial | parallel | sound | usb | pci> [device options]
  --device-set <name> [device options] [--enable | --disable] [--connect | --disconnect]
  --device-del <name> [--destroy-image | --destroy-image-force | --detach-only]
  --device-connect <name>
  --device-disconnect <name>
  --device-bootorder "<name1 name2 ...>"
  --backup-add <ID> [--disk <disk_name>]
  --backup-del <ID | all>
"#;

const SRV_USAGE: &str = r#"Usage: {prog} ACTION [OPTIONS] [-l user[[:passwd]@server[:port]]]
Supported actions are:
  info [-j,--json] [--license] [-f,--full]
  install-license -k,--key <key> [-n,--name <name>] [-c,--company <name>]
  update-license
  set [--mem-limit <auto | size>] [-s,--min-security-level <low | normal | high>]
    [--mng-settings <allow | deny>] [{--device <device> --assignment <host | vm>}]
    [-c,--cep <on | off>] [--backup-path <path>] [--idle-connection-timeout <timeout>]
    [--backup-tmpdir <tmpdir>] [--backup-storage <user[[:passwd]@server[:port]]>]
    [--verbose-log <on | off>] [--cpu-features-mask <mask | off>]
    [--vm-cpulimit-type <full | guest>] [--allow-attach-screenshots <on | off>]
    [--require-pwd <create-vm | add-vm | remove-vm | clone-vm>:<on | off>]
    [--vnc-public-key <file> --vnc-private-key <file>]
  shutdown [-f,--force] [--suspend-vm-to-pram]
  user list [-o,--output name[,name...]] [-j,--json]
  user set --def-vm-home <path>
  statistics [-a,--all] [--loop] [--filter <name>]
  problem-report {-d,--dump | -s,--send [--proxy <[user[:password]@]host[:port]>] [--no-proxy]}
    [--stand-alone] [--name <name>] [--email <email>] [--description <desc>]
  net add <vnetwork_id> [-i,--ifname <if>] [-m,--mac <mac>] [-t,--type <bridged | host-only | shared>]
    [-d,--description <desc>] [--ip <addr[/mask]>] [--dhcp-server <on | off>] [--dhcp-ip <ip>]
    [--ip-scope-start <ip>] [--ip-scope-end <ip>] [--ip6 <addr[/mask]>] [--dhcp6-server <on | off>]
    [--dhcp-ip6 <ip>] [--ip6-scope-start <ip>] [--ip6-scope-end <ip>]
    [--nat-<tcp | udp>-add <rule_name,<redir_ip | redir_vm>,in_port,redir_port>]
  net set <vnetwork_id> [net add options] [-n,--name <new_name>] [--nat-<tcp | udp>-del <rule_name>]
  net del <vnetwork_id>
  net info <vnetwork_id>
  net list [-j,--json]
  privnet add <private_network_id> [-a,--ipadd <addr[/mask]>] [--global <yes | no>]
  privnet set <private_network_id> [-a,--ipadd <addr[/mask]>] [-d,--ipdel <addr[/mask]>] [--global <yes | no>]
  privnet del <private_network_id>
  privnet list [-j,--json]
  tc restart
  usb list [-j,--json]
  usb set <name> <vm_uuid>
  usb del <name>
  appliance-install --file <file> [-b,--batch]
  cttemplate list [-j,--json]
  cttemplate remove <name> [<os_template>]
  cttemplate copy <dst_node> <name> [<os_template>] [-f,--force] [--securitylevel <low | normal | high>]
  backup [-s,--storage <user[[:passwd]@server[:port]]>] [-f,--full | -i,--incremental]
  monitor
  help
"#;

/// Base name of `argv[0]`.
pub fn program(args: &[String]) -> String {
    args.first()
        .and_then(|a| Path::new(a).file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "prlctl".to_string())
}

pub fn version(program: &str) -> String {
    format!("{} version {}", program, env!("CARGO_PKG_VERSION"))
}

pub fn vm(program: &str) -> String {
    format!("{}\n\n{}", version(program), VM_USAGE.replace("{prog}", program))
}

pub fn srv(program: &str) -> String {
    format!("{}\n\n{}", version(program), SRV_USAGE.replace("{prog}", program))
}
