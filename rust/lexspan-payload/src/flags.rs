use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Selects which optional occurrence fields the encoder may write.
    ///
    /// A field is written only if its flag is set here *and* the occurrence
    /// both carries the value and does not suppress it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct EncodingFlags: u32 {
        const PAYLOAD = 1;
        const OFFSET = 2;
        const REAL_OFFSET = 4;
        const PARENT = 8;

        const DEFAULT = Self::PAYLOAD.bits() | Self::OFFSET.bits() | Self::PARENT.bits();
        const ALL = Self::DEFAULT.bits() | Self::REAL_OFFSET.bits();
    }
}

impl Default for EncodingFlags {
    fn default() -> Self {
        EncodingFlags::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_excludes_real_offset() {
        let flags = EncodingFlags::default();
        assert!(flags.contains(EncodingFlags::PAYLOAD | EncodingFlags::OFFSET | EncodingFlags::PARENT));
        assert!(!flags.contains(EncodingFlags::REAL_OFFSET));
        assert_eq!(EncodingFlags::ALL.bits(), 15);
    }

    #[test]
    fn test_flags_serialization() {
        let flags = EncodingFlags::OFFSET | EncodingFlags::REAL_OFFSET;
        let json = serde_json::to_string(&flags).unwrap();
        let back: EncodingFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
    }
}
