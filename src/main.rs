// Ion: lexer and parser front end

use ion::config::{Config, Mode};
use ion::driver::{self, DriverError};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("ion");

    let config = match Config::from_args(args.iter().skip(1).cloned()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", Config::usage(program_name));
            std::process::exit(1);
        }
    };

    driver::init_logging();

    if let Mode::File(path) = &config.mode {
        if !path.exists() {
            eprintln!("Error: File '{}' not found", path.display());
            std::process::exit(1);
        }
    }

    match driver::run(&config) {
        Ok(()) => {}
        Err(DriverError::Parse(e)) => {
            driver::report(&mut std::io::stderr(), &e).ok();
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
