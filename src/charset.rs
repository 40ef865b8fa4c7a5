//! # Character Set Descriptors
//!
//! Static descriptors for the character sets this crate needs to reason
//! about: the maximum bytes a single character can occupy (which decides
//! VARCHAR-vs-BLOB sizing) and whether comparison is raw-byte or
//! case-folded. Descriptors are process-wide immutable statics, looked up
//! by their wire id.

/// Character set / collation descriptor.
#[derive(Debug)]
pub struct Charset {
    id: u16,
    name: &'static str,
    mbmaxlen: u32,
    binary: bool,
}

/// Columns whose declared character length exceeds this are materialized
/// as blobs instead of inline strings.
pub const CONVERT_IF_BIGGER_TO_BLOB: u32 = 512;

pub static BINARY: Charset = Charset {
    id: 63,
    name: "binary",
    mbmaxlen: 1,
    binary: true,
};

pub static LATIN1: Charset = Charset {
    id: 8,
    name: "latin1",
    mbmaxlen: 1,
    binary: false,
};

pub static UTF8MB4: Charset = Charset {
    id: 45,
    name: "utf8mb4",
    mbmaxlen: 4,
    binary: false,
};

impl Charset {
    /// Looks up a charset descriptor by its wire id.
    pub fn by_id(id: u16) -> Option<&'static Charset> {
        match id {
            63 => Some(&BINARY),
            8 => Some(&LATIN1),
            45 => Some(&UTF8MB4),
            _ => None,
        }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Maximum bytes one character can occupy.
    pub fn mbmaxlen(&self) -> u32 {
        self.mbmaxlen
    }

    /// Raw-byte comparison semantics (no case folding).
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Character capacity of a buffer of `octets` bytes.
    pub fn char_capacity(&self, octets: u32) -> u32 {
        octets / self.mbmaxlen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        assert_eq!(Charset::by_id(63).unwrap().name(), "binary");
        assert_eq!(Charset::by_id(45).unwrap().mbmaxlen(), 4);
        assert!(Charset::by_id(999).is_none());
    }

    #[test]
    fn char_capacity_divides_by_width() {
        assert_eq!(UTF8MB4.char_capacity(400), 100);
        assert_eq!(BINARY.char_capacity(400), 400);
    }

    #[test]
    fn binary_flag() {
        assert!(BINARY.is_binary());
        assert!(!UTF8MB4.is_binary());
    }
}
