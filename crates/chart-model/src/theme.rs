use std::str::FromStr;

/// Renderer-agnostic color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = String;

    /// Parses `#rrggbb` (leading `#` optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return Err(format!("expected 6 hex digits: {s}"));
        }
        let parse = |range| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("bad hex color {s}: {e}"))
        };
        Ok(Rgb(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }
}

/// Dashboard color scheme plus the breakdown palettes.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Rgb,
    pub foreground: Rgb,
    pub accent_blue: Rgb,
    pub accent_magenta: Rgb,
    pub accent_red: Rgb,
    pub accent_orange: Rgb,
    pub text_muted: Rgb,
    pub graph_bg: Rgb,
    /// One color per asset component, in stacking order.
    pub asset_palette: [Rgb; 9],
    /// One color per liability component, in stacking order.
    pub liability_palette: [Rgb; 8],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb(0x1f, 0x20, 0x23),
            foreground: Rgb(0xbc, 0xb2, 0x8d),
            accent_blue: Rgb(0x58, 0xb2, 0xdc),
            accent_magenta: Rgb(0xe0, 0x3c, 0x8a),
            accent_red: Rgb(0xff, 0x6b, 0x6b),
            accent_orange: Rgb(0xff, 0xa9, 0x4d),
            text_muted: Rgb(0x70, 0x7c, 0x74),
            graph_bg: Rgb(0x21, 0x21, 0x21),
            asset_palette: [
                Rgb(0x4c, 0xaf, 0x50), // green
                Rgb(0x21, 0x96, 0xf3), // blue
                Rgb(0xff, 0xc1, 0x07), // amber
                Rgb(0xff, 0x98, 0x00), // orange
                Rgb(0xff, 0x57, 0x22), // deep orange
                Rgb(0x9c, 0x27, 0xb0), // purple
                Rgb(0x60, 0x7d, 0x8b), // blue grey
                Rgb(0x79, 0x55, 0x48), // brown
                Rgb(0x9e, 0x9e, 0x9e), // grey
            ],
            liability_palette: [
                Rgb(0xf4, 0x43, 0x36), // red
                Rgb(0xe9, 0x1e, 0x63), // pink
                Rgb(0x9c, 0x27, 0xb0), // purple
                Rgb(0x67, 0x3a, 0xb7), // deep purple
                Rgb(0x3f, 0x51, 0xb5), // indigo
                Rgb(0x21, 0x96, 0xf3), // blue
                Rgb(0x00, 0xbc, 0xd4), // cyan
                Rgb(0x00, 0x96, 0x88), // teal
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!("#58b2dc".parse::<Rgb>().unwrap(), Rgb(0x58, 0xb2, 0xdc));
        assert_eq!("FFA94D".parse::<Rgb>().unwrap(), Rgb(0xff, 0xa9, 0x4d));
        assert!("#58b2d".parse::<Rgb>().is_err());
        assert!("nothex".parse::<Rgb>().is_err());
    }

    #[test]
    fn palettes_cover_every_component() {
        let theme = Theme::default();
        assert_eq!(theme.asset_palette.len(), 9);
        assert_eq!(theme.liability_palette.len(), 8);
    }
}
