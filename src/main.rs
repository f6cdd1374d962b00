mod color;
mod commands;
mod data;
mod format;
mod glob;
mod image;
mod options;
mod size_string;
mod sprite;

use std::process;

use structopt::StructOpt;

use crate::options::{Options, Subcommand};

fn main() {
    let log_env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(log_env).init();

    let options = Options::from_args();

    match run(options) {
        Ok(_) => {}
        Err(err) => {
            eprintln!("Error: {:?}", err);
            process::exit(1);
        }
    }
}

fn run(options: Options) -> anyhow::Result<()> {
    match options.command {
        Subcommand::Pack(pack_options) => commands::pack(pack_options)?,
        Subcommand::New(new_options) => commands::new(new_options)?,
        Subcommand::From(from_options) => commands::from(from_options)?,
    }

    Ok(())
}
