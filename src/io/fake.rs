use std::io;

use crate::cmos::{CMOS_DATA, CMOS_INDEX, CMOS_SIZE, PORT_DELAY};
use crate::io::port::{PortAccessor, PortError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortOp {
    Out(u8, u8),
    In(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Fail the index-port write selecting this offset.
    Select(u8),
    /// Fail the delay-port write that follows selecting this offset.
    Delay(u8),
    /// Fail the data-port read of this offset.
    Read(u8),
}

/// Index/data CMOS pair over a synthetic image, with a log of every port touched.
pub struct FakeCmos {
    image: [u8; CMOS_SIZE],
    index: u8,
    fault: Option<Fault>,
    pub ops: Vec<PortOp>,
}

impl FakeCmos {
    pub fn new(image: [u8; CMOS_SIZE]) -> Self {
        Self {
            image,
            index: 0,
            fault: None,
            ops: Vec::new(),
        }
    }

    pub fn failing(image: [u8; CMOS_SIZE], fault: Fault) -> Self {
        Self {
            fault: Some(fault),
            ..Self::new(image)
        }
    }

    fn os_error() -> io::Error {
        io::Error::from_raw_os_error(5) // EIO
    }
}

impl PortAccessor for FakeCmos {
    fn port_in_byte(&mut self, port: u8) -> Result<u8, PortError> {
        self.ops.push(PortOp::In(port));
        if port != CMOS_DATA {
            return Ok(0xFF);
        }
        if self.fault == Some(Fault::Read(self.index)) {
            return Err(PortError::Read {
                port,
                source: Self::os_error(),
            });
        }
        Ok(self.image[(self.index & 0x7F) as usize])
    }

    fn port_out_byte(&mut self, port: u8, value: u8) -> Result<(), PortError> {
        self.ops.push(PortOp::Out(port, value));
        let failed = match (port, self.fault) {
            (CMOS_INDEX, Some(Fault::Select(offset))) => offset == value,
            (PORT_DELAY, Some(Fault::Delay(offset))) => offset == self.index,
            _ => false,
        };
        if failed {
            return Err(PortError::Write {
                port,
                value,
                source: Self::os_error(),
            });
        }
        if port == CMOS_INDEX {
            self.index = value;
        }
        Ok(())
    }
}
