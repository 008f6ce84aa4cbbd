extern crate clap;
extern crate env_logger;
extern crate img2ihex;

use clap::{Parser, ValueEnum};
use img2ihex::config::Config;
use img2ihex::encoder::AddressMode;
use img2ihex::errors::Error;
use std::path::PathBuf;

/// Convert an image into an Intel HEX file, one data record per pixel
#[derive(Parser, Debug)]
#[command(name = "img2ihex")]
#[command(about = "Encode image pixels as Intel HEX data records", long_about = None)]
struct Args {
    /// Input image file path
    #[arg(short, long)]
    input: PathBuf,

    /// Output file path (default: input with extension replaced by _vld.hex)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Delete the output file once it has been written and verified
    #[arg(short = 'r')]
    remove_output: bool,

    /// Directory the input path is resolved against
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// How record addresses advance from one row to the next
    #[arg(long, value_enum, default_value = "doubling")]
    addressing: AddressingArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AddressingArg {
    Doubling,
    Sequential,
}

impl From<AddressingArg> for AddressMode {
    fn from(arg: AddressingArg) -> Self {
        match arg {
            AddressingArg::Doubling => AddressMode::Doubling,
            AddressingArg::Sequential => AddressMode::Sequential,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            input_path: args.input,
            output_path: args.output,
            delete_output: args.remove_output,
            base_dir: args.base_dir,
            addressing: args.addressing.into(),
        }
    }
}

/// `error:` line, one `caused by:` line per cause, then the backtrace if
/// one was captured.
fn report(e: &Error) -> String {
    let mut out = format!("error: {}\n", e);
    for cause in e.iter().skip(1) {
        out.push_str(&format!("caused by: {}\n", cause));
    }
    if let Some(backtrace) = e.backtrace() {
        out.push_str(&format!("backtrace: {:?}\n", backtrace));
    }
    out
}

fn main() {
    let config = Config::from(Args::parse());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(ref e) = img2ihex::run_convert(&config) {
        eprint!("{}", report(e));
        ::std::process::exit(1);
    }
}
