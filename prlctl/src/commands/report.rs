use cmdopt::{Event, Parser};

use super::{global_option, secret};
use crate::context::ParserContext;
use crate::error::{CmdError, Result};
use crate::options::{OptId, Table};
use crate::record::{Action, ParamRecord};
use crate::validate;

/// `statistics [ID] [--loop] [--filter F] [--all]`, for a VM or the
/// whole server.
pub fn build_statistics(
    ctx: &mut ParserContext,
    args: &[String],
    action: Action,
    table: &Table,
    start: usize,
) -> Result<ParamRecord> {
    let mut rec = ParamRecord::new(action);
    let mut parser = Parser::new(args, start);
    loop {
        let m = match parser.next_opt(table)? {
            Event::End => break,
            Event::Unknown { token, .. } => {
                rec.id = Some(token);
                continue;
            }
            Event::Opt(m) => m,
        };
        if global_option(ctx, &mut rec.login, &m)? {
            continue;
        }
        match m.id {
            OptId::Loop => rec.statistics.repeat = true,
            OptId::PerfFilter => rec.statistics.filter = Some(m.value().to_string()),
            OptId::ListAll => rec.list.all = true,
            _ => return Err(CmdError::Unrecognized(m.name)),
        }
    }
    Ok(rec)
}

/// `problem-report` must either send the report or dump it. The VM form
/// takes the target at `args[start]`.
pub fn build_problem_report(
    ctx: &mut ParserContext,
    args: &[String],
    action: Action,
    table: &Table,
    mut start: usize,
) -> Result<ParamRecord> {
    let mut rec = ParamRecord::new(action);
    if action == Action::ProblemReport {
        rec.id = args.get(start).cloned();
        start += 1;
    }

    let mut parser = Parser::new(args, start);
    loop {
        let m = match parser.next_opt(table)? {
            Event::End => break,
            Event::Unknown { token, .. } => return Err(CmdError::Unrecognized(token)),
            Event::Opt(m) => m,
        };
        if global_option(ctx, &mut rec.login, &m)? {
            continue;
        }
        let report = &mut rec.problem_report;
        match m.id {
            OptId::Send => {
                report.send = true;
                report.dump = false;
            }
            OptId::Dump => {
                report.send = false;
                report.dump = true;
            }
            OptId::StandAlone => report.stand_alone = true,
            OptId::ReportName => report.user_name = Some(m.value().to_string()),
            OptId::ReportEmail => report.user_email = Some(m.value().to_string()),
            OptId::ReportDesc => report.description = Some(m.value().to_string()),
            OptId::Proxy => report.proxy = Some(secret(ctx, &m)),
            OptId::NoProxy => report.dont_use_proxy = true,
            _ => return Err(CmdError::Unrecognized(m.name)),
        }
    }

    validate::validate_problem_report(&rec.problem_report)?;
    Ok(rec)
}
