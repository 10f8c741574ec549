use std::borrow::Cow;
use std::fmt;

use crate::cmos::tables::{
    shutdown_status, DIVIDER, FLOPPY_DRIVE, HARD_DISK, PRIMARY_DISPLAY, RATE_SELECTION,
};
use crate::cmos::{CmosImage, CMOS_SIZE};

/// Extended memory sizes above this (in KB) are not trusted.
pub const EXTENDED_MEMORY_LIMIT_KB: u16 = 16 * 1024;

/// Checksummed range; the sum is stored big-endian at 0x2E/0x2F.
const CHECKSUM_FIRST: u8 = 0x10;
const CHECKSUM_LAST: u8 = 0x2D;
const CHECKSUM_HI: u8 = 0x2E;

// CMOS register offsets
const RTC_SECONDS: u8 = 0x00;
const RTC_SECONDS_ALARM: u8 = 0x01;
const RTC_MINUTES: u8 = 0x02;
const RTC_MINUTES_ALARM: u8 = 0x03;
const RTC_HOURS: u8 = 0x04;
const RTC_HOURS_ALARM: u8 = 0x05;
const RTC_DAY_OF_WEEK: u8 = 0x06;
const RTC_DAY: u8 = 0x07;
const RTC_MONTH: u8 = 0x08;
const RTC_YEAR: u8 = 0x09;
const STATUS_A: u8 = 0x0A;
const STATUS_B: u8 = 0x0B;
const STATUS_C: u8 = 0x0C;
const STATUS_D: u8 = 0x0D;
const DIAGNOSTIC: u8 = 0x0E;
const SHUTDOWN: u8 = 0x0F;
const FLOPPY_TYPES: u8 = 0x10;
const HARD_DISK_TYPES: u8 = 0x12;
const EQUIPMENT: u8 = 0x14;
const BASE_MEMORY: u8 = 0x15;
const EXTENDED_MEMORY: u8 = 0x17;
const HARD_DISK_0_EXT: u8 = 0x19;
const HARD_DISK_1_EXT: u8 = 0x1A;
const EXTENDED_MEMORY_ALT: u8 = 0x30;
const CENTURY: u8 = 0x32;
const POST_INFO: u8 = 0x33;

/// How a raw value is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Raw {
    /// Whole register, two hex digits.
    Byte(u8),
    /// Whole register, `0x` and two hex digits.
    Hex(u8),
    /// Extracted bit or small bitfield, `0x` and minimal hex digits.
    Bits(u8),
    /// Two registers shown high byte first as one hex number.
    Pair { hi: u8, lo: u8 },
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Raw::Byte(v) => write!(f, "{:02x}", v),
            Raw::Hex(v) => write!(f, "0x{:02x}", v),
            Raw::Bits(v) => write!(f, "0x{:x}", v),
            Raw::Pair { hi, lo } => write!(f, "0x{:02x}{:02x}", hi, lo),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub raw: Raw,
    pub text: Option<Cow<'static, str>>,
}

impl Field {
    fn raw(label: &'static str, raw: Raw) -> Self {
        Self { label, raw, text: None }
    }

    fn with(label: &'static str, raw: Raw, text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label,
            raw,
            text: Some(text.into()),
        }
    }

    /// Single bit with a label for each state.
    fn flag(label: &'static str, byte: u8, bit: u8, set: &'static str, clear: &'static str) -> Self {
        let value = (byte >> bit) & 1;
        Self::with(label, Raw::Bits(value), if value != 0 { set } else { clear })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub fields: Vec<Field>,
}

impl Section {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Titled after a single register and its value, e.g. `Status Register A: (CMOS 0x0a): 0x26`.
    fn register(name: &str, offset: u8, value: u8) -> Self {
        Self::new(format!("{}: (CMOS 0x{:02x}): 0x{:02x}", name, offset, value))
    }

    fn push(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[cfg(test)]
    pub fn field(&self, label: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.label == label)
    }
}

/// Everything derived from one image, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub dump: [u8; CMOS_SIZE],
    pub sections: Vec<Section>,
}

impl Report {
    /// First section whose title starts with `prefix`.
    #[cfg(test)]
    pub fn section(&self, prefix: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title.starts_with(prefix))
    }
}

/// Decode every field of the standard PC/AT layout. Pure; cannot fail.
pub fn decode(image: &CmosImage) -> Report {
    Report {
        dump: *image.bytes(),
        sections: vec![
            rtc_time(image),
            rtc_alarm(image),
            status_a(image.byte(STATUS_A)),
            status_b(image.byte(STATUS_B)),
            status_c(image.byte(STATUS_C)),
            status_d(image.byte(STATUS_D)),
            diagnostic(image.byte(DIAGNOSTIC)),
            shutdown(image.byte(SHUTDOWN)),
            floppy(image.byte(FLOPPY_TYPES)),
            hard_disk(image.byte(HARD_DISK_TYPES)),
            equipment(image.byte(EQUIPMENT)),
            base_memory(image),
            extended_memory(image),
            hard_disk_extended(image),
            checksum(image),
            extended_memory_alt(image),
            century(image.byte(CENTURY)),
            post_info(image.byte(POST_INFO)),
        ],
    }
}

// RTC values are shown exactly as stored; BCD vs binary depends on Status Register B.
fn rtc_time(image: &CmosImage) -> Section {
    Section::new("RTC Current Time: (CMOS 0x00..0x09)")
        .push(Field::raw("RTC seconds", Raw::Byte(image.byte(RTC_SECONDS))))
        .push(Field::raw("RTC minutes", Raw::Byte(image.byte(RTC_MINUTES))))
        .push(Field::raw("RTC hours", Raw::Byte(image.byte(RTC_HOURS))))
        .push(Field::raw("RTC day of week", Raw::Byte(image.byte(RTC_DAY_OF_WEEK))))
        .push(Field::raw("RTC date day", Raw::Byte(image.byte(RTC_DAY))))
        .push(Field::raw("RTC date month", Raw::Byte(image.byte(RTC_MONTH))))
        .push(Field::raw("RTC date year", Raw::Byte(image.byte(RTC_YEAR))))
}

fn rtc_alarm(image: &CmosImage) -> Section {
    Section::new("RTC Alarm: (CMOS 0x01, 0x03, 0x05)")
        .push(Field::raw("RTC seconds", Raw::Byte(image.byte(RTC_SECONDS_ALARM))))
        .push(Field::raw("RTC minutes", Raw::Byte(image.byte(RTC_MINUTES_ALARM))))
        .push(Field::raw("RTC hours", Raw::Byte(image.byte(RTC_HOURS_ALARM))))
}

fn status_a(value: u8) -> Section {
    let rate = value & 0x0F;
    let divider = (value >> 4) & 0x07;
    Section::register("Status Register A", STATUS_A, value)
        .push(Field::with("Rate freq", Raw::Bits(rate), RATE_SELECTION[rate as usize]))
        .push(Field::with(
            "Timer freq divider",
            Raw::Bits(divider),
            DIVIDER[divider as usize],
        ))
        .push(Field::flag("Update in progress", value, 7, "Yes", "No"))
}

// MC146818 bit assignment.
fn status_b(value: u8) -> Section {
    Section::register("Status Register B", STATUS_B, value)
        .push(Field::flag("Daylight savings", value, 0, "Enabled", "Disabled"))
        .push(Field::flag("24 Hour Clock", value, 1, "24 Hour", "12 Hour"))
        .push(Field::flag("Data Mode (DM)", value, 2, "Binary", "BCD"))
        .push(Field::flag("Square Wave", value, 3, "Enabled", "Disabled"))
        .push(Field::flag("Update ended IRQ", value, 4, "Enabled", "Disabled"))
        .push(Field::flag("Alarm IRQ", value, 5, "Enabled", "Disabled"))
        .push(Field::flag("Periodic IRQ", value, 6, "Enabled", "Disabled"))
        .push(Field::flag(
            "Clock update cycle",
            value,
            7,
            "Abort update in progress",
            "Update normally",
        ))
}

fn status_c(value: u8) -> Section {
    Section::register("Status Register C", STATUS_C, value)
        .push(Field::raw("UF flag", Raw::Bits((value >> 4) & 1)))
        .push(Field::raw("AF flag", Raw::Bits((value >> 5) & 1)))
        .push(Field::raw("PF flag", Raw::Bits((value >> 6) & 1)))
        .push(Field::raw("IRQF flag", Raw::Bits((value >> 7) & 1)))
}

fn status_d(value: u8) -> Section {
    Section::register("Status Register D", STATUS_D, value).push(Field::flag(
        "Valid CMOS RAM flag",
        value,
        7,
        "Battery Good",
        "Battery Dead",
    ))
}

fn diagnostic(value: u8) -> Section {
    Section::register("Diagnostic Status", DIAGNOSTIC, value)
        .push(Field::flag("CMOS time status", value, 2, "Invalid", "Valid"))
        .push(Field::flag("Fixed disk init", value, 3, "Bad", "Good"))
        .push(Field::flag("Memory size check", value, 4, "Bad", "Good"))
        .push(Field::flag("Config info status", value, 5, "Invalid", "Valid"))
        .push(Field::flag("CMOS checksum status", value, 6, "Bad", "Good"))
        .push(Field::flag("CMOS power loss", value, 7, "Lost power", "Not lost power"))
}

fn shutdown(value: u8) -> Section {
    Section::new("CMOS Shutdown Status: (CMOS 0x0f)").push(Field::with(
        "Shutdown status",
        Raw::Hex(value),
        shutdown_status(value),
    ))
}

/// (drive 0, drive 1) labels for a floppy type byte.
pub fn floppy_types(value: u8) -> (&'static str, &'static str) {
    (
        FLOPPY_DRIVE[(value >> 4) as usize],
        FLOPPY_DRIVE[(value & 0x0F) as usize],
    )
}

fn floppy(value: u8) -> Section {
    let (drive0, drive1) = floppy_types(value);
    Section::register("Floppy Disk Type", FLOPPY_TYPES, value)
        .push(Field::with("Drive 0", Raw::Bits(value >> 4), drive0))
        .push(Field::with("Drive 1", Raw::Bits(value & 0x0F), drive1))
}

fn hard_disk(value: u8) -> Section {
    Section::register("Hard Disk Type (Obsolete)", HARD_DISK_TYPES, value)
        .push(Field::with(
            "Drive 0",
            Raw::Bits(value >> 4),
            HARD_DISK[(value >> 4) as usize],
        ))
        .push(Field::with(
            "Drive 1",
            Raw::Bits(value & 0x0F),
            HARD_DISK[(value & 0x0F) as usize],
        ))
}

fn equipment(value: u8) -> Section {
    let display = (value >> 4) & 0x03;
    let drives = (value >> 6) & 0x03;
    Section::register("Installed H/W", EQUIPMENT, value)
        .push(Field::flag("Floppy Drive(s)", value, 0, "Installed", "Not Installed"))
        .push(Field::flag("Maths Coprocessor", value, 1, "Installed", "Not Installed"))
        .push(Field::flag("Keyboard", value, 2, "Installed", "Not Installed"))
        .push(Field::flag("Display Adaptor", value, 3, "Installed", "Not Installed"))
        .push(Field::with(
            "Primary Display",
            Raw::Bits(display),
            PRIMARY_DISPLAY[display as usize],
        ))
        .push(Field::with(
            "Floppy Drives",
            Raw::Hex(drives),
            format!("{} drives", drives + 1),
        ))
}

pub fn base_memory_kb(image: &CmosImage) -> u16 {
    image.word_le(BASE_MEMORY)
}

pub fn extended_memory_kb(image: &CmosImage) -> u16 {
    image.word_le(EXTENDED_MEMORY)
}

pub fn extended_memory_untrustworthy(kb: u16) -> bool {
    kb > EXTENDED_MEMORY_LIMIT_KB
}

fn pair(image: &CmosImage, lo: u8) -> Raw {
    Raw::Pair {
        hi: image.byte(lo + 1),
        lo: image.byte(lo),
    }
}

fn base_memory(image: &CmosImage) -> Section {
    Section::new("Base Mem: (CMOS 0x15, 0x16)").push(Field::with(
        "Size",
        pair(image, BASE_MEMORY),
        format!("{}K", base_memory_kb(image)),
    ))
}

fn extended_memory(image: &CmosImage) -> Section {
    let kb = extended_memory_kb(image);
    let text = if extended_memory_untrustworthy(kb) {
        format!("{}K, untrustworthy", kb)
    } else {
        format!("{}K", kb)
    };
    Section::new("Extended Mem: (CMOS 0x17, 0x18)").push(Field::with(
        "Size",
        pair(image, EXTENDED_MEMORY),
        text,
    ))
}

fn hard_disk_extended(image: &CmosImage) -> Section {
    Section::new("Hard Disk Extended Types: (CMOS 0x19, 0x1a)")
        .push(Field::raw("Hard Disk 0", Raw::Hex(image.byte(HARD_DISK_0_EXT))))
        .push(Field::raw("Hard Disk 1", Raw::Hex(image.byte(HARD_DISK_1_EXT))))
}

/// 16-bit wrapping sum over 0x10..=0x2D.
pub fn computed_checksum(image: &CmosImage) -> u16 {
    (CHECKSUM_FIRST..=CHECKSUM_LAST).fold(0u16, |sum, offset| {
        sum.wrapping_add(image.byte(offset) as u16)
    })
}

pub fn stored_checksum(image: &CmosImage) -> u16 {
    image.word_be(CHECKSUM_HI)
}

fn checksum(image: &CmosImage) -> Section {
    let stored = stored_checksum(image);
    let computed = computed_checksum(image);
    let text = if stored == computed {
        Cow::Borrowed("valid")
    } else {
        Cow::Owned(format!("mismatch, computed 0x{:04x}", computed))
    };
    Section::new("CMOS Checksum: (CMOS 0x2e, 0x2f)").push(Field::with(
        "Checksum",
        Raw::Pair {
            hi: image.byte(CHECKSUM_HI),
            lo: image.byte(CHECKSUM_HI + 1),
        },
        text,
    ))
}

fn extended_memory_alt(image: &CmosImage) -> Section {
    Section::new("Extended Mem: (CMOS 0x30, 0x31)").push(Field::with(
        "Size",
        pair(image, EXTENDED_MEMORY_ALT),
        format!("{}K", image.word_le(EXTENDED_MEMORY_ALT)),
    ))
}

fn century(value: u8) -> Section {
    Section::new("Century Date: (CMOS 0x32)").push(Field::raw("Century", Raw::Byte(value)))
}

fn post_info(value: u8) -> Section {
    Section::register("POST Information Flag", POST_INFO, value)
        .push(Field::flag("POST cache test", value, 0, "Failed", "Passed"))
        .push(Field::flag("BIOS size", value, 7, "128KB", "64KB"))
}
