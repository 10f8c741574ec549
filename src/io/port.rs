use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Byte-addressed port space exposed by the kernel. The file offset is the port number.
pub const DEV_PORT: &str = "/dev/port";

#[derive(Debug, Error)]
pub enum PortError {
    #[error("cannot open {}: {source}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot seek to port 0x{port:02x}: {source}")]
    Seek {
        port: u8,
        #[source]
        source: io::Error,
    },
    #[error("cannot read value from port 0x{port:02x}: {source}")]
    Read {
        port: u8,
        #[source]
        source: io::Error,
    },
    #[error("cannot write value 0x{value:02x} to port 0x{port:02x}: {source}")]
    Write {
        port: u8,
        value: u8,
        #[source]
        source: io::Error,
    },
}

/// Single-byte access to the low 256 I/O ports.
///
/// Every operation reaches live hardware state; writes to an index port
/// change what the paired data port returns.
pub trait PortAccessor {
    fn port_in_byte(&mut self, port: u8) -> Result<u8, PortError>;
    fn port_out_byte(&mut self, port: u8, value: u8) -> Result<(), PortError>;
}

/// Port accessor backed by the kernel's port-space file.
///
/// The descriptor is closed when the value is dropped, which covers the
/// early-return paths of a failed capture.
pub struct DevPort {
    file: File,
}

impl DevPort {
    pub fn open() -> Result<Self, PortError> {
        Self::open_path(Path::new(DEV_PORT))
    }

    pub fn open_path(path: &Path) -> Result<Self, PortError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| PortError::Access {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("opened port space {}", path.display());
        Ok(Self { file })
    }

    fn seek(&mut self, port: u8) -> Result<(), PortError> {
        self.file
            .seek(SeekFrom::Start(port as u64))
            .map(|_| ())
            .map_err(|source| PortError::Seek { port, source })
    }
}

impl PortAccessor for DevPort {
    fn port_in_byte(&mut self, port: u8) -> Result<u8, PortError> {
        self.seek(port)?;
        let mut buf = [0u8; 1];
        self.file
            .read_exact(&mut buf)
            .map_err(|source| PortError::Read { port, source })?;
        Ok(buf[0])
    }

    fn port_out_byte(&mut self, port: u8, value: u8) -> Result<(), PortError> {
        self.seek(port)?;
        self.file
            .write_all(&[value])
            .map_err(|source| PortError::Write { port, value, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, len: usize) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cmos-dump-{}-{}", std::process::id(), name));
        std::fs::write(&path, vec![0u8; len]).unwrap();
        path
    }

    #[test]
    fn open_missing_resource_is_access_error() {
        let path = std::env::temp_dir().join("cmos-dump-does-not-exist/port");
        match DevPort::open_path(&path) {
            Err(PortError::Access { path: p, .. }) => assert_eq!(p, path),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("open should fail"),
        }
    }

    #[test]
    fn file_offset_is_port_number() {
        // A regular file stands in for the port space: same seek/read/write contract.
        let path = scratch_file("offsets", 256);
        {
            let mut port = DevPort::open_path(&path).unwrap();
            port.port_out_byte(0x70, 0x0f).unwrap();
            port.port_out_byte(0x80, 0x00).unwrap();
            assert_eq!(port.port_in_byte(0x70).unwrap(), 0x0f);
            assert_eq!(port.port_in_byte(0x71).unwrap(), 0x00);
        }
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes[0x70], 0x0f);
        assert_eq!(bytes.len(), 256);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn short_read_is_read_error() {
        let path = scratch_file("short", 0x10);
        let mut port = DevPort::open_path(&path).unwrap();
        match port.port_in_byte(0x71) {
            Err(PortError::Read { port, source }) => {
                assert_eq!(port, 0x71);
                assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof);
            }
            other => panic!("expected read error, got {other:?}"),
        }
        drop(port);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn error_messages_name_port_and_value() {
        let err = PortError::Write {
            port: 0x70,
            value: 0x2e,
            source: io::Error::from_raw_os_error(1),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("cannot write value 0x2e to port 0x70"), "{msg}");
        assert!(msg.contains("os error 1"), "{msg}");
    }
}
