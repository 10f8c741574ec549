use std::io;

use thiserror::Error;

use crate::cmos::CaptureError;
use crate::io::port::PortError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("must have CAP_SYS_RAWIO to run {program} (hint: run as root)")]
    Privilege { program: String },
    #[error(transparent)]
    Port(#[from] PortError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error("cannot write report: {0}")]
    Output(#[source] io::Error),
}
