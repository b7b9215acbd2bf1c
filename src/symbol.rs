use std::fmt::Debug;
use std::hash::Hash;

/// An atomic unit of input.
///
/// Symbols are stored inside tree descriptions as fixed-width code points of
/// `BITS` bits. `TAG` identifies the alphabet in a container header.
pub trait Symbol: Copy + Eq + Ord + Hash + Debug {
    /// Alphabet identifier written into container headers.
    const TAG: u8;
    /// Width of one symbol inside a tree description.
    const BITS: u32;

    fn to_code_point(self) -> u32;

    /// Returns `None` when `value` is not a member of the alphabet.
    fn from_code_point(value: u32) -> Option<Self>;
}

impl Symbol for u8 {
    const TAG: u8 = 1;
    const BITS: u32 = 8;

    fn to_code_point(self) -> u32 {
        self as u32
    }

    fn from_code_point(value: u32) -> Option<Self> {
        u8::try_from(value).ok()
    }
}

impl Symbol for char {
    const TAG: u8 = 2;
    // char::MAX is 0x10FFFF
    const BITS: u32 = 21;

    fn to_code_point(self) -> u32 {
        self as u32
    }

    fn from_code_point(value: u32) -> Option<Self> {
        char::from_u32(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_width_covers_alphabet() {
        assert!((char::MAX as u32) < (1 << <char as Symbol>::BITS));
        assert_eq!(char::from_code_point('\u{10FFFF}'.to_code_point()), Some('\u{10FFFF}'));
    }

    #[test]
    fn test_invalid_code_points() {
        assert_eq!(char::from_code_point(0xD800), None);
        assert_eq!(u8::from_code_point(256), None);
        assert_eq!(u8::from_code_point(0x41), Some(b'A'));
    }
}
