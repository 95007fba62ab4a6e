use cmdopt::{Event, Parser};

use super::{assign_positional, global_option, location, security_level, split_login_target};
use crate::context::ParserContext;
use crate::error::{CmdError, Result};
use crate::options::{OptId, Table};
use crate::record::{Action, ParamRecord};
use crate::validate;
use crate::values;

/// `migrate [login/]SRC login[/DST] [options]`.
pub fn build_migrate(
    ctx: &mut ParserContext,
    args: &[String],
    action: Action,
    table: &Table,
    offset: usize,
) -> Result<ParamRecord> {
    if args.len() < offset + 2 {
        return Err(CmdError::msg("Incorrect migrate usage."));
    }
    let mut rec = ParamRecord::new(action);

    let src = &args[offset];
    rec.id = Some(match split_login_target(ctx, args, offset, &mut rec.login, "src")? {
        Some(id) => id,
        None => src.clone(),
    });

    let dst = &args[offset + 1];
    let server = match dst.split_once('/') {
        Some((server, id)) => {
            rec.migrate.dst_id = Some(id.to_string());
            server
        }
        None => dst.as_str(),
    };
    assign_positional(ctx, offset + 1, server, &mut rec.migrate.dst, "dst")?;
    log::debug!(
        "migrate {:?} from {:?} to {:?}",
        rec.id,
        rec.login.server,
        rec.migrate.dst.server
    );

    let mut parser = Parser::new(args, offset + 2);
    loop {
        let m = match parser.next_opt(table)? {
            Event::End => break,
            Event::Unknown { token, .. } => return Err(CmdError::Unrecognized(token)),
            Event::Opt(m) => m,
        };
        if global_option(ctx, &mut rec.login, &m)? {
            continue;
        }
        let mig = &mut rec.migrate;
        match m.id {
            OptId::Force => mig.force = true,
            OptId::SecurityLevel => mig.security_level = Some(security_level(&m)?),
            OptId::Location => mig.vm_location = Some(location(&m)?),
            OptId::SessionId => mig.sessionid = Some(m.value().to_string()),
            OptId::CloneMode => mig.clone = true,
            OptId::RemoveSrc => mig.remove_src = true,
            OptId::SwitchTemplate => mig.switch_template = true,
            OptId::ChangeSid => mig.change_sid = true,
            OptId::IgnoreExistingBundle => mig.ignore_existing_bundle = true,
            OptId::SshOpts => mig.ssh_opts = values::split(m.value(), " ", false),
            OptId::Uncompressed => mig.uncompressed = true,
            OptId::NoTunnel => mig.no_tunnel = true,
            _ => return Err(CmdError::Unrecognized(m.name)),
        }
    }

    validate::validate_migrate(&rec.migrate)?;
    Ok(rec)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::options;
    use crate::redact::ArgBuffer;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn migrate(list: &[&str]) -> Result<ParamRecord> {
        let mut ctx = ParserContext::detached();
        build_migrate(&mut ctx, &args(list), Action::Migrate, &options::migrate(), 2)
    }

    #[test]
    fn plain_source_and_destination() {
        let rec = migrate(&["prlctl", "migrate", "vm1", "node2"]).unwrap();
        assert_eq!(rec.id.as_deref(), Some("vm1"));
        assert!(!rec.login.is_remote());
        assert_eq!(rec.migrate.dst.server, "node2");
        assert_eq!(rec.migrate.dst_id, None);
    }

    #[test]
    fn logins_on_both_sides_are_hidden() {
        let argv = args(&["prlctl", "migrate", "root:a@node1/vm1", "admin:b@node2/vm9", "--clone"]);
        let buf = ArgBuffer::new(&argv);
        let mut ctx = ParserContext::new(Box::new(buf.clone()), Box::new(crate::context::FsHost));
        let rec = build_migrate(&mut ctx, &argv, Action::Migrate, &options::migrate(), 2).unwrap();
        assert_eq!(rec.id.as_deref(), Some("vm1"));
        assert_eq!(rec.login.server, "node1");
        assert_eq!(rec.migrate.dst.user, "admin");
        assert_eq!(rec.migrate.dst_id.as_deref(), Some("vm9"));
        assert!(rec.migrate.clone);
        assert_eq!(buf.display(2).as_deref(), Some("root:*@node1/vm1"));
        assert_eq!(buf.display(3).as_deref(), Some("admin:*@node2/vm9"));
    }

    #[test]
    fn too_few_positionals() {
        let err = migrate(&["prlctl", "migrate", "vm1"]).unwrap_err();
        assert_eq!(err.to_string(), "Incorrect migrate usage.");
    }

    #[test]
    fn options_and_ssh() {
        let rec = migrate(&[
            "prlctl", "migrate", "vm1", "node2", "--ssh", "-p 2222 -c aes", "--no-tunnel", "--dst", "/vz/vms",
            "--securitylevel", "high",
        ])
        .unwrap();
        assert_eq!(rec.migrate.ssh_opts, vec!["-p", "2222", "-c", "aes"]);
        assert!(rec.migrate.no_tunnel);
        assert_eq!(rec.migrate.vm_location.as_deref(), Some("/vz/vms"));
        assert!(rec.migrate.security_level.is_some());
    }

    #[test]
    fn flag_rules() {
        let err = migrate(&["prlctl", "migrate", "vm1", "node2", "--changesid"]).unwrap_err();
        assert_eq!(err.to_string(), "The --changesid option can be used with --clone only");
        let err = migrate(&["prlctl", "migrate", "vm1", "node2", "--keep-src", "--remove-src"]).unwrap_err();
        assert_eq!(err.to_string(), "The --remove-src option cannot be used with --clone");
    }

    #[test]
    fn stray_positional() {
        let err = migrate(&["prlctl", "migrate", "vm1", "node2", "extra"]).unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized option: extra");
    }

    #[test]
    fn bad_destination() {
        let err = migrate(&["prlctl", "migrate", "vm1", "u@"]).unwrap_err();
        assert_eq!(err.to_string(), "An incorrect value is specified for dst");
    }
}
