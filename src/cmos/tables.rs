// Lookup tables for the PC/AT CMOS layout. Every table except SHUTDOWN_STATUS
// is sized to the full range of the bitfield that indexes it.

/// Status Register A, bits 3..0
pub const RATE_SELECTION: [&str; 16] = [
    "none",
    "3.90625 milliseconds",
    "7.8125 milliseconds",
    "122.070 microseconds",
    "244.141 microseconds",
    "488.281 microseconds",
    "976.562 microseconds (default)",
    "1.953125 milliseconds",
    "3.90625 milliseconds",
    "7.8125 milliseconds",
    "15.625 milliseconds",
    "31.25 milliseconds",
    "62.5 milliseconds",
    "125 milliseconds",
    "250 milliseconds",
    "500 milliseconds",
];

/// Status Register A, bits 6..4
pub const DIVIDER: [&str; 8] = [
    "4.194 MHz",
    "1.049 MHz",
    "32.768 KHz (default)",
    "unknown",
    "test mode",
    "test mode",
    "reset / disable",
    "reset / disable",
];

/// CMOS 0x0F. Values past the end fall back to SHUTDOWN_FALLBACK.
pub const SHUTDOWN_STATUS: [&str; 11] = [
    "Power on or soft reset",
    "Memory size pass",
    "Memory test pass",
    "Memory test fail",
    "INT 19h reboot",
    "Flush keyboard and jmp via 40h:67h",
    "Protected mode tests pass",
    "Protected mode tests fail",
    "Used by POST during protected-mode RAM test",
    "Int 15h (block move)",
    "Used by 80386",
];

pub const SHUTDOWN_FALLBACK: &str = "Perform power-on reset";

/// CMOS 0x10, one nibble per drive. Only 0..5 are assigned.
pub const FLOPPY_DRIVE: [&str; 16] = [
    "None",
    "360KB 5.25\" Drive",
    "1.2MB 5.25\" Drive",
    "720KB 3.5\" Drive",
    "1.44MB 3.5\" Drive",
    "2.88MB 3.5\" Drive",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
];

/// CMOS 0x12, one nibble per drive. 15 means "see 0x19/0x1A".
pub const HARD_DISK: [&str; 16] = [
    "None",
    "Type 1",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Unknown",
    "Type 14",
    "Type 16-47",
];

/// CMOS 0x14, bits 5..4
pub const PRIMARY_DISPLAY: [&str; 4] = [
    "BIOS selected",
    "CGA 40 column",
    "CGA 80 column",
    "Monochrome",
];

pub fn shutdown_status(value: u8) -> &'static str {
    SHUTDOWN_STATUS
        .get(value as usize)
        .copied()
        .unwrap_or(SHUTDOWN_FALLBACK)
}
