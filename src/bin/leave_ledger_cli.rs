use std::{env, process};

use leave_ledger::{
    cli::{self, output, CliError},
    init,
};

fn main() {
    init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(err) = cli::run(&args) {
        output::error(&err);
        if matches!(err, CliError::Usage(_)) {
            eprintln!("{}", cli::usage());
        }
        process::exit(1);
    }
}
