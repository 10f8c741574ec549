//! PC/AT RTC/CMOS memory: capture over the index/data port pair, then decode.
//!
//! Ports: 0x70 (index), 0x71 (data), 0x80 (POST/delay, write-only no-op)

use thiserror::Error;

use crate::io::port::{PortAccessor, PortError};

pub mod decode;
pub mod report;
pub mod tables;


pub const CMOS_INDEX: u8 = 0x70;
pub const CMOS_DATA: u8 = 0x71;
pub const PORT_DELAY: u8 = 0x80;
const DELAY_VALUE: u8 = 0x00;

pub const CMOS_SIZE: usize = 0x80;

#[derive(Debug, Error)]
#[error("CMOS capture aborted at offset 0x{offset:02x}: {source}")]
pub struct CaptureError {
    pub offset: u8,
    #[source]
    pub source: PortError,
}

/// Snapshot of all 128 CMOS bytes. Only ever built complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmosImage {
    bytes: [u8; CMOS_SIZE],
}

impl CmosImage {
    #[cfg(test)]
    pub fn from_bytes(bytes: [u8; CMOS_SIZE]) -> Self {
        Self { bytes }
    }

    /// Read offsets 0x00..=0x7F in ascending order. The first failed port
    /// operation aborts the capture; no partial image is returned.
    pub fn capture(port: &mut impl PortAccessor) -> Result<Self, CaptureError> {
        let mut bytes = [0u8; CMOS_SIZE];
        for offset in 0..CMOS_SIZE as u8 {
            bytes[offset as usize] =
                read_register(port, offset).map_err(|source| CaptureError { offset, source })?;
            log::trace!("CMOS 0x{:02x} = 0x{:02x}", offset, bytes[offset as usize]);
        }
        log::debug!("captured {} CMOS bytes", CMOS_SIZE);
        Ok(Self { bytes })
    }

    pub fn bytes(&self) -> &[u8; CMOS_SIZE] {
        &self.bytes
    }

    #[inline]
    pub fn byte(&self, offset: u8) -> u8 {
        self.bytes[(offset & 0x7F) as usize]
    }

    /// Little-endian 16-bit quantity stored at `lo`, `lo + 1`.
    pub fn word_le(&self, lo: u8) -> u16 {
        (self.byte(lo + 1) as u16) << 8 | self.byte(lo) as u16
    }

    /// Big-endian 16-bit quantity stored at `hi`, `hi + 1`.
    pub fn word_be(&self, hi: u8) -> u16 {
        (self.byte(hi) as u16) << 8 | self.byte(hi + 1) as u16
    }
}

/// Select, settle, read.
fn read_register(port: &mut impl PortAccessor, offset: u8) -> Result<u8, PortError> {
    port.port_out_byte(CMOS_INDEX, offset)?;
    port.port_out_byte(PORT_DELAY, DELAY_VALUE)?;
    port.port_in_byte(CMOS_DATA)
}
