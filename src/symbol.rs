//! Ticker symbol stored inline (no heap allocation).

use std::fmt;

/// Maximum length of a symbol in bytes.
pub const MAX_SYMBOL_LEN: usize = 8;

/// An instrument ticker, e.g. `SPY` or `BRK.B`.
///
/// Stored as a fixed inline buffer so it is `Copy` and cheap to hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    len: u8,
    bytes: [u8; MAX_SYMBOL_LEN],
}

impl Symbol {
    /// Create a symbol.
    ///
    /// # Panics
    ///
    /// Panics if `s` is empty, longer than [`MAX_SYMBOL_LEN`] bytes, or not
    /// ASCII. Use [`Symbol::try_new`] for untrusted input.
    #[track_caller]
    pub fn new(s: &str) -> Self {
        match Self::try_new(s) {
            Some(sym) => sym,
            None => panic!("invalid symbol: {s:?}"),
        }
    }

    /// Create a symbol, returning `None` if `s` is empty, too long, or not ASCII.
    pub fn try_new(s: &str) -> Option<Self> {
        if s.is_empty() || s.len() > MAX_SYMBOL_LEN || !s.is_ascii() {
            return None;
        }
        let mut bytes = [0u8; MAX_SYMBOL_LEN];
        bytes[..s.len()].copy_from_slice(s.as_bytes());
        Some(Self {
            len: s.len() as u8,
            bytes,
        })
    }

    /// The symbol as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        // Only ASCII is ever stored.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or("")
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Symbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Symbol {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Symbol::try_new(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid symbol '{s}' (must be 1..={MAX_SYMBOL_LEN} ASCII bytes)"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_str() {
        assert_eq!(Symbol::new("SPY").as_str(), "SPY");
        assert_eq!(Symbol::new("BRK.B").as_str(), "BRK.B");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Symbol::try_new("").is_none());
        assert!(Symbol::try_new("TOOLONGNAME").is_none());
        assert!(Symbol::try_new("ÄPFEL").is_none());
    }

    #[test]
    fn display_respects_width() {
        assert_eq!(format!("{:6}|", Symbol::new("QQQ")), "QQQ   |");
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Symbol::new("GLD") < Symbol::new("SPY"));
        assert!(Symbol::new("AAPL") < Symbol::new("B"));
    }
}
