use std::process;

fn main() {
    prlctl::app::init_logging();
    process::exit(prlctl::app::run(prlctl::route_vm));
}
