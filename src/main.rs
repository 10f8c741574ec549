use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap_derive::Parser;

use crate::cmos::decode::decode;
use crate::cmos::report::write_report;
use crate::cmos::CmosImage;
use crate::error::Error;
use crate::io::port::{DevPort, PortAccessor, PortError};
use crate::io::privilege::{has_required_privilege, ProcSelfStatus, StatusSource};

mod cmos;
mod error;
mod io;


#[derive(Parser, Debug)]
#[command(
    name = "cmos-dump",
    version,
    about = "Dump and decode the PC/AT RTC/CMOS memory (needs CAP_SYS_RAWIO)"
)]
struct CLI {}

/// Privilege gate, full capture, decode, print. Nothing is written to `out`
/// unless all 128 bytes were read.
fn run<P, F>(
    program: &str,
    status: &impl StatusSource,
    open_port: F,
    out: &mut impl Write,
) -> Result<(), Error>
where
    P: PortAccessor,
    F: FnOnce() -> Result<P, PortError>,
{
    if !has_required_privilege(status) {
        return Err(Error::Privilege {
            program: program.to_string(),
        });
    }

    let image = {
        let mut port = open_port()?;
        CmosImage::capture(&mut port)?
    };

    let report = decode(&image);
    write_report(out, &report).map_err(Error::Output)
}

fn main() -> ExitCode {
    env_logger::init();
    let _args = CLI::parse();
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "cmos-dump".to_string());

    let stdout = std::io::stdout();
    match run(&program, &ProcSelfStatus, DevPort::open, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{:?}", e);
            eprintln!("{}: {}", program, e);
            ExitCode::FAILURE
        }
    }
}
