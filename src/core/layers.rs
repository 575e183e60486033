//! Keymap layer table
//!
//! The Charybdis keymap refers to its layers by name. The same numbering is
//! exported as a C header for the devicetree keymap sources.

use std::fmt;
use std::str::FromStr;

/// Keymap layers, in index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Default typing layer
    Base = 0,
    /// Mouse buttons, active while the trackball moves
    Pointer = 1,
    /// Numbers and navigation
    Lower = 2,
    /// Function keys and media
    Raise = 3,
    /// Symbols
    Symbols = 4,
    /// Trackball scrolls instead of moving the cursor
    Scroll = 5,
    /// Reduced trackball speed for precise pointing
    Sniping = 6,
}

impl Layer {
    /// All layers, in index order
    pub const ALL: [Layer; 7] = [
        Layer::Base,
        Layer::Pointer,
        Layer::Lower,
        Layer::Raise,
        Layer::Symbols,
        Layer::Scroll,
        Layer::Sniping,
    ];

    /// Layer index used by the keymap
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Layer for an index
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Upper-case name used in the header
    pub fn name(self) -> &'static str {
        match self {
            Layer::Base => "BASE",
            Layer::Pointer => "POINTER",
            Layer::Lower => "LOWER",
            Layer::Raise => "RAISE",
            Layer::Symbols => "SYMBOLS",
            Layer::Scroll => "SCROLL",
            Layer::Sniping => "SNIPING",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown layer name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown layer '{0}'")]
pub struct UnknownLayer(pub String);

impl FromStr for Layer {
    type Err = UnknownLayer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|layer| layer.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLayer(s.to_string()))
    }
}

/// Render the layer table as a C header
pub fn render_header() -> String {
    let mut out = String::from(
        "/*\n * Common layer definitions for Charybdis keyboard\n * Shared across all shield variants\n */\n\n#pragma once\n\n",
    );
    for layer in Layer::ALL {
        out.push_str(&format!("#define {} {}\n", layer.name(), layer.index()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense_and_ordered() {
        for (i, layer) in Layer::ALL.iter().enumerate() {
            assert_eq!(usize::from(layer.index()), i);
            assert_eq!(Layer::from_index(layer.index()), Some(*layer));
        }
        assert_eq!(Layer::from_index(7), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("sniping".parse::<Layer>().unwrap(), Layer::Sniping);
        assert_eq!("POINTER".parse::<Layer>().unwrap(), Layer::Pointer);
        assert_eq!(
            "adjust".parse::<Layer>().unwrap_err(),
            UnknownLayer("adjust".to_string())
        );
    }

    #[test]
    fn test_header_defines() {
        let header = render_header();
        assert!(header.contains("#pragma once"));
        assert!(header.contains("#define BASE 0\n"));
        assert!(header.contains("#define SCROLL 5\n"));
        assert!(header.ends_with("#define SNIPING 6\n"));
        assert_eq!(header.matches("#define").count(), 7);
    }

    #[test]
    fn test_shipped_header_matches_table() {
        let shipped = include_str!("../../boards/shields/charybdis/charybdis_layers.h");
        for layer in Layer::ALL {
            let line = format!("#define {} {}", layer.name(), layer.index());
            assert!(shipped.contains(&line), "missing {line}");
        }
    }
}
