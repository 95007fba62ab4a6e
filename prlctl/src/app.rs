//! Process wiring shared by the two binaries.

use std::env;

use crate::context::ParserContext;
use crate::record::ParamRecord;
use crate::terminal;

/// Exit status for a command line that did not parse or validate.
pub const EXIT_INVALID: i32 = 1;

pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

/// Parse the process arguments with `route` and hand the record on.
pub fn run(route: fn(&mut ParserContext, &[String]) -> ParamRecord) -> i32 {
    let args: Vec<String> = env::args().collect();
    let mut ctx = ParserContext::for_process();
    let mut rec = route(&mut ctx, &args);
    if !rec.is_valid() {
        return EXIT_INVALID;
    }

    if env::var_os("RUST_LOG").is_none() {
        log::set_max_level(ctx.log_level());
    }
    log::debug!("{:#?}", rec);

    if terminal::stdin_is_terminal() {
        if let Err(e) = terminal::ensure_password(&mut rec.login, terminal::read_password) {
            eprintln!("Unable to read the password: {}", e);
            return EXIT_INVALID;
        }
    }

    println!("{}", dispatch(&mut rec));
    0
}

/// Stand-in for the business layer: takes the login password once and
/// describes what would be executed.
pub fn dispatch(rec: &mut ParamRecord) -> String {
    let authenticated = rec.login.take_password().is_some();
    let mut line = rec.action.name().to_string();
    if let Some(id) = &rec.id {
        line.push(' ');
        line.push_str(id);
    }
    if rec.login.is_remote() {
        line.push_str(&format!(" on {}@{}", rec.login.user, rec.login.server));
        if let Some(port) = rec.login.port {
            line.push_str(&format!(":{}", port));
        }
        if authenticated {
            line.push_str(" (password supplied)");
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Action;
    use crate::values::parse_auth;

    #[test]
    fn local_summary() {
        let mut rec = ParamRecord::new(Action::Start);
        rec.id = Some("vm1".into());
        assert_eq!(dispatch(&mut rec), "start vm1");
    }

    #[test]
    fn remote_summary_consumes_the_password() {
        let mut rec = ParamRecord::new(Action::SrvInfo);
        rec.login.assign(parse_auth("admin:pw@node1:64000").unwrap());
        assert_eq!(dispatch(&mut rec), "server info on admin@node1:64000 (password supplied)");
        assert!(rec.login.secrets.is_empty());
        assert_eq!(dispatch(&mut rec), "server info on admin@node1:64000");
    }
}
