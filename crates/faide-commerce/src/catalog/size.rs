//! Garment sizes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A garment size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
}

impl Size {
    /// Every known size, smallest first.
    pub const ALL: [Size; 6] = [Size::XS, Size::S, Size::M, Size::L, Size::XL, Size::XXL];

    /// The size run most products are cut in.
    pub fn standard() -> Vec<Size> {
        vec![Size::XS, Size::S, Size::M, Size::L, Size::XL]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::XS => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
            Size::XXL => "XXL",
        }
    }

    /// Parse a size code, ignoring case and surrounding whitespace.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "XS" => Some(Size::XS),
            "S" => Some(Size::S),
            "M" => Some(Size::M),
            "L" => Some(Size::L),
            "XL" => Some(Size::XL),
            "XXL" | "2XL" => Some(Size::XXL),
            _ => None,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Size::from_code("m"), Some(Size::M));
        assert_eq!(Size::from_code(" XL "), Some(Size::XL));
        assert_eq!(Size::from_code("2xl"), Some(Size::XXL));
        assert_eq!(Size::from_code("huge"), None);
    }

    #[test]
    fn test_codes_roundtrip() {
        for size in Size::ALL {
            assert_eq!(Size::from_code(size.as_str()), Some(size));
        }
    }

    #[test]
    fn test_standard_run() {
        assert_eq!(Size::standard().len(), 5);
        assert!(!Size::standard().contains(&Size::XXL));
    }
}
