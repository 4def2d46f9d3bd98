use std::env;
use std::process;

fn main() {
    let config = match aardvark_drv::parse_args(env::args()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };
    if let Err(err) = aardvark_drv::run(config) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}
