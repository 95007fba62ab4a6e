//! `prlsrvctl net`, `privnet`, `usb` and `tc`. Each takes a subcommand at
//! `args[sub]` followed by its options.

use cmdopt::{Event, Parser};

use super::{bad_value, build_server, global_option, uuid_or_verbatim};
use crate::context::ParserContext;
use crate::error::{CmdError, Result};
use crate::options::{OptId, Table};
use crate::record::{
    Action, NatRule, ParamRecord, PrivNetCmd, UsbCmd, VNetCmd, VNetParam, VNetType,
};
use crate::validate;
use crate::values;

fn subcommand(args: &[String], sub: usize) -> Result<&str> {
    args.get(sub).map(String::as_str).ok_or(CmdError::InvalidUsage)
}

// ============================================================================
// Virtual networks
// ============================================================================

pub fn build_vnet(ctx: &mut ParserContext, args: &[String], table: &Table, sub: usize) -> Result<ParamRecord> {
    let cmd = match subcommand(args, sub)? {
        "list" => VNetCmd::List,
        "set" => VNetCmd::Set,
        "add" | "new" => VNetCmd::Add,
        "del" => VNetCmd::Del,
        "info" => VNetCmd::Info,
        // vznetcfg compatible forms
        "addif" => {
            let (name, ifname) = match (args.get(sub + 1), args.get(sub + 2)) {
                (Some(name), Some(ifname)) => (name, ifname),
                _ => return Err(CmdError::InvalidUsage),
            };
            return Ok(compat_vnet(VNetParam {
                name: Some(name.clone()),
                ifname: Some(ifname.clone()),
                vnet_type: Some(VNetType::Bridged),
                ..Default::default()
            }));
        }
        "delif" => {
            let ifname = args.get(sub + 1).ok_or(CmdError::InvalidUsage)?;
            return Ok(compat_vnet(VNetParam {
                ifname: Some(ifname.clone()),
                vnet_type: Some(VNetType::HostOnly),
                ..Default::default()
            }));
        }
        "change" => {
            let name = args.get(sub + 1).ok_or(CmdError::InvalidUsage)?;
            return Ok(compat_vnet(VNetParam {
                name: Some(name.clone()),
                ..Default::default()
            }));
        }
        _ => return Err(CmdError::InvalidUsage),
    };

    let mut rec = ParamRecord::new(Action::SrvVNet);
    rec.vnet.cmd = cmd;
    let mut parser = Parser::new(args, sub + 1);
    loop {
        let m = match parser.next_opt(table)? {
            Event::End => break,
            Event::Unknown { token, .. } => {
                if rec.vnet.name.is_some() {
                    return Err(CmdError::UnexpectedArgument(token));
                }
                rec.vnet.name = Some(token);
                continue;
            }
            Event::Opt(m) => m,
        };
        if global_option(ctx, &mut rec.login, &m)? {
            continue;
        }
        let v = m.value();
        let vnet = &mut rec.vnet;
        match m.id {
            OptId::VNetName => {
                return Err(CmdError::msg(
                    "Virtual network's renaming is now deprecated. You may create new virtual network \
                     with specified name and reattach all virtual machines to it.",
                ))
            }
            OptId::VNetDesc => vnet.description = Some(v.to_string()),
            OptId::VNetIfName => vnet.ifname = Some(v.to_string()),
            OptId::IpScopeStart => vnet.ip_scope_start = Some(v.to_string()),
            OptId::IpScopeEnd => vnet.ip_scope_end = Some(v.to_string()),
            OptId::Ip6ScopeStart => vnet.ip6_scope_start = Some(v.to_string()),
            OptId::Ip6ScopeEnd => vnet.ip6_scope_end = Some(v.to_string()),
            OptId::NatTcpAdd | OptId::NatUdpAdd => {
                let rule = NatRule::parse(v).ok_or_else(|| CmdError::bad_value("--nat-<tcp|udp>-add", v))?;
                if m.id == OptId::NatTcpAdd {
                    vnet.nat_tcp_add.push(rule);
                } else {
                    vnet.nat_udp_add.push(rule);
                }
            }
            OptId::NatTcpDel | OptId::NatUdpDel => {
                if v.is_empty() {
                    return Err(CmdError::bad_value("--nat-<tcp|udp>-del", "rule name is empty"));
                }
                if m.id == OptId::NatTcpDel {
                    vnet.nat_tcp_del.push(v.to_string());
                } else {
                    vnet.nat_udp_del.push(v.to_string());
                }
            }
            OptId::HostIp => vnet.host_ip = Some(values::normalize_ip(v)),
            OptId::HostIp6 => vnet.host_ip6 = Some(values::normalize_ip(v)),
            OptId::DhcpServer => vnet.dhcp_enabled = Some(values::on_off(v).ok_or_else(|| bad_value(&m))?),
            OptId::Dhcp6Server => vnet.dhcp6_enabled = Some(values::on_off(v).ok_or_else(|| bad_value(&m))?),
            OptId::DhcpIp => vnet.dhcp_ip = Some(v.to_string()),
            OptId::DhcpIp6 => vnet.dhcp_ip6 = Some(v.to_string()),
            OptId::VNetType => {
                vnet.vnet_type = Some(match v {
                    "bridged" => VNetType::Bridged,
                    "host-only" | "shared" => VNetType::HostOnly,
                    _ => return Err(CmdError::msg(format!("An unknown Virtual Network type: {}", v))),
                });
                vnet.is_shared = v == "shared";
            }
            OptId::VNetMac => vnet.mac = Some(v.to_string()),
            OptId::Json => rec.use_json = true,
            _ => return Err(CmdError::Unrecognized(m.name)),
        }
    }

    validate::validate_vnet(&rec.vnet)?;
    Ok(rec)
}

/// The compatibility forms are complete as given; no options follow.
fn compat_vnet(vnet: VNetParam) -> ParamRecord {
    let mut rec = ParamRecord::new(Action::SrvVNet);
    rec.vnet = VNetParam {
        cmd: VNetCmd::Set,
        ..vnet
    };
    rec
}

// ============================================================================
// Private networks
// ============================================================================

pub fn build_privnet(ctx: &mut ParserContext, args: &[String], table: &Table, sub: usize) -> Result<ParamRecord> {
    let cmd = match subcommand(args, sub)? {
        "list" => PrivNetCmd::List,
        "set" => PrivNetCmd::Set,
        "add" | "new" => PrivNetCmd::Add,
        "del" => PrivNetCmd::Del,
        _ => return Err(CmdError::InvalidUsage),
    };

    let mut rec = ParamRecord::new(Action::SrvPrivNet);
    rec.privnet.cmd = cmd;
    let mut parser = Parser::new(args, sub + 1);
    loop {
        let m = match parser.next_opt(table)? {
            Event::End => break,
            Event::Unknown { token, .. } => {
                if rec.privnet.name.is_some() {
                    return Err(CmdError::UnexpectedArgument(token));
                }
                rec.privnet.name = Some(token);
                continue;
            }
            Event::Opt(m) => m,
        };
        if global_option(ctx, &mut rec.login, &m)? {
            continue;
        }
        let v = m.value();
        match m.id {
            OptId::PrivIpAdd => rec.privnet.ip.push(network_address(v)),
            OptId::PrivIpDel => rec.privnet.ip_del.push(network_address(v)),
            OptId::PrivGlobal => {
                rec.privnet.is_global = Some(values::on_off(v).ok_or_else(|| {
                    CmdError::msg(format!("An invalid value was specified for --global: {}", v))
                })?)
            }
            OptId::Json => rec.use_json = true,
            _ => return Err(CmdError::Unrecognized(m.name)),
        }
    }

    validate::validate_privnet(&rec.privnet)?;
    Ok(rec)
}

/// `*` stands for every address and is kept as is.
fn network_address(v: &str) -> String {
    if v == "*" {
        v.to_string()
    } else {
        values::normalize_ip(v)
    }
}

// ============================================================================
// USB assignments and traffic shaping
// ============================================================================

/// `usb list`, `usb del NAME`, `usb set NAME UUID`.
pub fn build_usb(ctx: &mut ParserContext, args: &[String], table: &Table, sub: usize) -> Result<ParamRecord> {
    let mut rec = ParamRecord::new(Action::SrvUsb);
    let operand = |n: usize| args.get(sub + n).cloned().ok_or(CmdError::InvalidUsage);
    let start = match subcommand(args, sub)? {
        "list" => {
            rec.usb.cmd = UsbCmd::List;
            sub + 1
        }
        "del" => {
            rec.usb.cmd = UsbCmd::Delete;
            rec.usb.name = Some(operand(1)?);
            sub + 2
        }
        "set" => {
            rec.usb.cmd = UsbCmd::Set;
            rec.usb.name = Some(operand(1)?);
            rec.usb.id = Some(uuid_or_verbatim(&operand(2)?));
            sub + 3
        }
        _ => return Err(CmdError::InvalidUsage),
    };

    let mut parser = Parser::new(args, start);
    loop {
        match parser.next_opt(table)? {
            Event::End => break,
            Event::Unknown { token, .. } => return Err(CmdError::Unrecognized(token)),
            Event::Opt(m) => {
                if global_option(ctx, &mut rec.login, &m)? {
                    continue;
                }
                match m.id {
                    OptId::Json => rec.use_json = true,
                    _ => return Err(CmdError::Unrecognized(m.name)),
                }
            }
        }
    }
    Ok(rec)
}

/// `tc restart`.
pub fn build_tc(ctx: &mut ParserContext, args: &[String], table: &Table, sub: usize) -> Result<ParamRecord> {
    match subcommand(args, sub)? {
        "restart" => build_server(ctx, args, Action::SrvShapingRestart, table, sub + 1),
        _ => Err(CmdError::InvalidUsage),
    }
}
