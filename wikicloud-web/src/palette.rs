//! Named color palettes for word cloud rendering

/// Number of colors in every palette
pub const PALETTE_SIZE: usize = 6;

/// Name used when a requested palette does not exist
pub const DEFAULT_PALETTE: &str = "default";

/// A fixed sequence of hex colors, indexed cyclically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    name: &'static str,
    colors: [&'static str; PALETTE_SIZE],
}

/// Every available palette, `default` first
pub const PALETTES: &[Palette] = &[
    Palette {
        name: DEFAULT_PALETTE,
        colors: ["#000000", "#333333", "#666666", "#999999", "#CCCCCC", "#FFFFFF"],
    },
    Palette {
        name: "material",
        colors: ["#F44336", "#2196F3", "#4CAF50", "#FFC107", "#9C27B0", "#FF9800"],
    },
    Palette {
        name: "pastel",
        colors: ["#FFB3BA", "#FFDFBA", "#FFFFBA", "#BAFFC9", "#BAE1FF", "#E2BAFF"],
    },
    Palette {
        name: "vibrant",
        colors: ["#FF1744", "#00E676", "#2979FF", "#FFEA00", "#D500F9", "#FF9100"],
    },
    Palette {
        name: "earthy",
        colors: ["#795548", "#8D6E63", "#A1887F", "#BCAAA4", "#D7CCC8", "#EFEBE9"],
    },
    Palette {
        name: "ocean",
        colors: ["#01579B", "#0288D1", "#29B6F6", "#81D4FA", "#B3E5FC", "#E1F5FE"],
    },
    Palette {
        name: "sunset",
        colors: ["#FF6F00", "#FF9800", "#FFC107", "#FFEB3B", "#FFF176", "#FFF9C4"],
    },
];

impl Palette {
    /// Find a palette by name, ignoring case and surrounding whitespace.
    /// Unknown names get the default palette.
    pub fn lookup(name: &str) -> Palette {
        let name = name.trim();
        PALETTES
            .iter()
            .find(|palette| palette.name.eq_ignore_ascii_case(name))
            .copied()
            .unwrap_or(PALETTES[0])
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn colors(&self) -> &[&'static str] {
        &self.colors
    }

    /// Color for a rank, wrapping around the palette
    pub fn color(&self, index: usize) -> &'static str {
        self.colors[index % PALETTE_SIZE]
    }
}

impl Default for Palette {
    fn default() -> Self {
        PALETTES[0]
    }
}

/// Names of all palettes, in display order
pub fn palette_names() -> Vec<&'static str> {
    PALETTES.iter().map(Palette::name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Palette::lookup("Ocean").name(), "ocean");
        assert_eq!(Palette::lookup("  SUNSET ").color(0), "#FF6F00");
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        let palette = Palette::lookup("neon");
        assert_eq!(palette.name(), DEFAULT_PALETTE);
        assert_eq!(palette, Palette::default());
        assert_eq!(palette.color(0), "#000000");
    }

    #[test]
    fn test_color_wraps() {
        let palette = Palette::lookup("material");
        assert_eq!(palette.color(6), palette.color(0));
        assert_eq!(palette.color(13), "#2196F3");
    }

    #[test]
    fn test_all_palettes_well_formed() {
        assert_eq!(
            palette_names(),
            vec!["default", "material", "pastel", "vibrant", "earthy", "ocean", "sunset"]
        );
        for palette in PALETTES {
            for color in palette.colors() {
                assert_eq!(color.len(), 7);
                assert!(color.starts_with('#'));
                assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
            }
        }
    }
}
