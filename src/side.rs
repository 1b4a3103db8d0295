//! Order side: Buy or Sell

use std::fmt;

/// Side of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Side that moves a holding by `delta` shares: positive buys, negative sells.
    #[inline]
    pub fn from_delta(delta: i64) -> Self {
        if delta > 0 { Side::Buy } else { Side::Sell }
    }

    /// Lowercase wire name (`"buy"` / `"sell"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.pad("BUY"),
            Side::Sell => f.pad("SELL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_delta() {
        assert_eq!(Side::from_delta(3), Side::Buy);
        assert_eq!(Side::from_delta(-3), Side::Sell);
    }

    #[test]
    fn display_and_wire_names() {
        assert_eq!(format!("{}", Side::Buy), "BUY");
        assert_eq!(Side::Sell.as_str(), "sell");
    }
}
