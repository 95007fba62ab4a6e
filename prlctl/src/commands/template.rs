use cmdopt::{Event, Parser};

use super::{assign_positional, global_option, security_level};
use crate::context::ParserContext;
use crate::error::{CmdError, Result};
use crate::options::{OptId, Table};
use crate::record::{Action, CtTemplateCmd, ParamRecord};

/// `cttemplate list [-j]`, `cttemplate remove NAME [OS]` and
/// `cttemplate copy DST NAME [OS] [options]`. `copy_table` is only used
/// by `copy`.
pub fn build_ct_template(
    ctx: &mut ParserContext,
    args: &[String],
    copy_table: &Table,
    sub: usize,
) -> Result<ParamRecord> {
    let verb = args.get(sub).ok_or(CmdError::InvalidUsage)?;
    let mut rec = ParamRecord::new(Action::SrvCtTemplate);
    match verb.as_str() {
        "list" => {
            rec.ct_tmpl.cmd = CtTemplateCmd::List;
            rec.use_json = matches!(args.get(sub + 1).map(String::as_str), Some("-j" | "--json"));
        }
        "remove" => {
            rec.ct_tmpl.cmd = CtTemplateCmd::Remove;
            rec.ct_tmpl.name = Some(args.get(sub + 1).ok_or(CmdError::InvalidUsage)?.clone());
            rec.ct_tmpl.os_name = args.get(sub + 2).cloned();
        }
        "copy" => {
            if args.len() <= sub + 2 {
                return Err(CmdError::InvalidUsage);
            }
            rec.action = Action::SrvCopyCtTemplate;
            let dst = &args[sub + 1];
            assign_positional(ctx, sub + 1, dst, &mut rec.copy_ct_tmpl.dst, "dst")?;
            rec.ct_tmpl.name = Some(args[sub + 2].clone());
            let mut next = sub + 3;
            if let Some(os) = args.get(next).filter(|a| !a.starts_with('-')) {
                rec.ct_tmpl.os_name = Some(os.clone());
                next += 1;
            }
            parse_copy_options(ctx, &mut rec, args, copy_table, next)?;
        }
        other => return Err(CmdError::msg(format!("Unknown cttemplate command {}", other))),
    }
    Ok(rec)
}

fn parse_copy_options(
    ctx: &mut ParserContext,
    rec: &mut ParamRecord,
    args: &[String],
    table: &Table,
    start: usize,
) -> Result<()> {
    let mut parser = Parser::new(args, start);
    loop {
        let m = match parser.next_opt(table)? {
            Event::End => return Ok(()),
            Event::Unknown { token, .. } => return Err(CmdError::Unrecognized(token)),
            Event::Opt(m) => m,
        };
        if global_option(ctx, &mut rec.login, &m)? {
            continue;
        }
        match m.id {
            OptId::Force => rec.copy_ct_tmpl.force = true,
            OptId::SecurityLevel => rec.copy_ct_tmpl.security_level = Some(security_level(&m)?),
            _ => return Err(CmdError::Unrecognized(m.name)),
        }
    }
}

/// `monitor` takes nothing at all.
pub fn build_monitor(args: &[String]) -> Result<ParamRecord> {
    if args.len() != 2 {
        return Err(CmdError::InvalidUsage);
    }
    Ok(ParamRecord::new(Action::SrvMonitor))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::options;
    use crate::record::SecurityLevel;
    use crate::redact::ArgBuffer;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn cttemplate(list: &[&str]) -> Result<ParamRecord> {
        let mut ctx = ParserContext::detached();
        build_ct_template(&mut ctx, &args(list), &options::ct_template_copy(), 2)
    }

    #[test]
    fn list_with_json() {
        let rec = cttemplate(&["prlsrvctl", "cttemplate", "list", "--json"]).unwrap();
        assert_eq!(rec.ct_tmpl.cmd, CtTemplateCmd::List);
        assert!(rec.use_json);
        assert!(!cttemplate(&["prlsrvctl", "cttemplate", "list"]).unwrap().use_json);
    }

    #[test]
    fn remove_with_os() {
        let rec = cttemplate(&["prlsrvctl", "cttemplate", "remove", "mysql", "centos-7-x86_64"]).unwrap();
        assert_eq!(rec.ct_tmpl.cmd, CtTemplateCmd::Remove);
        assert_eq!(rec.ct_tmpl.name.as_deref(), Some("mysql"));
        assert_eq!(rec.ct_tmpl.os_name.as_deref(), Some("centos-7-x86_64"));
        assert!(matches!(
            cttemplate(&["prlsrvctl", "cttemplate", "remove"]),
            Err(CmdError::InvalidUsage)
        ));
    }

    #[test]
    fn copy_to_a_remote_node() {
        let argv = args(&[
            "prlsrvctl", "cttemplate", "copy", "root:pw@node2", "mysql", "--force", "--securitylevel", "low",
        ]);
        let buf = ArgBuffer::new(&argv);
        let mut ctx = ParserContext::new(Box::new(buf.clone()), Box::new(crate::context::FsHost));
        let rec = build_ct_template(&mut ctx, &argv, &options::ct_template_copy(), 2).unwrap();
        assert_eq!(rec.action, Action::SrvCopyCtTemplate);
        assert_eq!(rec.copy_ct_tmpl.dst.server, "node2");
        assert_eq!(rec.ct_tmpl.name.as_deref(), Some("mysql"));
        assert_eq!(rec.ct_tmpl.os_name, None);
        assert!(rec.copy_ct_tmpl.force);
        assert_eq!(rec.copy_ct_tmpl.security_level, Some(SecurityLevel::Low));
        assert_eq!(buf.display(3).as_deref(), Some("root:**@node2"));
    }

    #[test]
    fn copy_with_os_and_stray_argument() {
        let rec = cttemplate(&["prlsrvctl", "cttemplate", "copy", "node2", "mysql", "centos-7"]).unwrap();
        assert_eq!(rec.ct_tmpl.os_name.as_deref(), Some("centos-7"));
        let err = cttemplate(&["prlsrvctl", "cttemplate", "copy", "node2", "mysql", "centos-7", "extra"]).unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized option: extra");
    }

    #[test]
    fn unknown_subcommand() {
        let err = cttemplate(&["prlsrvctl", "cttemplate", "install", "x"]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown cttemplate command install");
    }

    #[test]
    fn monitor_takes_no_arguments() {
        assert_eq!(build_monitor(&args(&["prlsrvctl", "monitor"])).unwrap().action, Action::SrvMonitor);
        assert!(build_monitor(&args(&["prlsrvctl", "monitor", "-v", "2"])).is_err());
    }
}
