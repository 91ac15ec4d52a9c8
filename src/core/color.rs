//! Colors and text styles carried by render segments.

use bitflags::bitflags;

bitflags! {
    /// Text attributes for a segment.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextStyle: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const STRIKETHROUGH = 1 << 5;
        const INVERSE = 1 << 6;
    }
}

impl TextStyle {
    /// SGR parameters for every set attribute, in ascending code order.
    pub fn sgr_codes(self) -> Vec<u8> {
        let table = [
            (TextStyle::BOLD, 1),
            (TextStyle::DIM, 2),
            (TextStyle::ITALIC, 3),
            (TextStyle::UNDERLINE, 4),
            (TextStyle::BLINK, 5),
            (TextStyle::INVERSE, 7),
            (TextStyle::STRIKETHROUGH, 9),
        ];
        table
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, code)| *code)
            .collect()
    }
}

/// A foreground or background color.
///
/// `DefaultForeground`/`DefaultBackground` leave the terminal's own color in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    DefaultForeground,
    DefaultBackground,
    Black,
    White,
    Gray,
    DarkGray,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Blue,
    DarkBlue,
    Cyan,
    DarkCyan,
    Magenta,
    DarkMagenta,
    Yellow,
    DarkYellow,
    Coral,
    DeepPink,
    DeepSkyBlue,
    GreenYellow,
    PaleGreen,
    FireBrick,
    LimeGreen,
    Chartreuse,
    BurlyWood,
    AliceBlue,
    LemonChiffon,
    VelvetRot,
    SerenValeBlue,
    ChadsCopper,
    Rgb(u8, u8, u8),
}

const NAMED: &[(&str, Color)] = &[
    ("DefaultForeground", Color::DefaultForeground),
    ("DefaultBackground", Color::DefaultBackground),
    ("Black", Color::Black),
    ("White", Color::White),
    ("Gray", Color::Gray),
    ("DarkGray", Color::DarkGray),
    ("Red", Color::Red),
    ("DarkRed", Color::DarkRed),
    ("Green", Color::Green),
    ("DarkGreen", Color::DarkGreen),
    ("Blue", Color::Blue),
    ("DarkBlue", Color::DarkBlue),
    ("Cyan", Color::Cyan),
    ("DarkCyan", Color::DarkCyan),
    ("Magenta", Color::Magenta),
    ("DarkMagenta", Color::DarkMagenta),
    ("Yellow", Color::Yellow),
    ("DarkYellow", Color::DarkYellow),
    ("Coral", Color::Coral),
    ("DeepPink", Color::DeepPink),
    ("DeepSkyBlue", Color::DeepSkyBlue),
    ("GreenYellow", Color::GreenYellow),
    ("PaleGreen", Color::PaleGreen),
    ("FireBrick", Color::FireBrick),
    ("LimeGreen", Color::LimeGreen),
    ("Chartreuse", Color::Chartreuse),
    ("BurlyWood", Color::BurlyWood),
    ("AliceBlue", Color::AliceBlue),
    ("LemonChiffon", Color::LemonChiffon),
    ("VelvetRot", Color::VelvetRot),
    ("SerenValeBlue", Color::SerenValeBlue),
    ("ChadsCopper", Color::ChadsCopper),
];

impl Color {
    /// Resolve a color name (case-insensitive) or `#RRGGBB`/`#RGB` hex code.
    ///
    /// Anything unresolvable falls back to `DefaultForeground`.
    pub fn from_name(name: &str) -> Color {
        let name = name.trim();
        if let Some(hex) = name.strip_prefix('#') {
            return parse_hex(hex).unwrap_or(Color::DefaultForeground);
        }
        NAMED
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, color)| *color)
            .unwrap_or(Color::DefaultForeground)
    }

    pub fn is_default(self) -> bool {
        matches!(self, Color::DefaultForeground | Color::DefaultBackground)
    }

    /// RGB value of the color; `None` for the terminal defaults.
    pub fn to_rgb(self) -> Option<(u8, u8, u8)> {
        let rgb = match self {
            Color::DefaultForeground | Color::DefaultBackground => return None,
            Color::Black => (0, 0, 0),
            Color::White => (255, 255, 255),
            Color::Gray => (192, 192, 192),
            Color::DarkGray => (128, 128, 128),
            Color::Red => (255, 0, 0),
            Color::DarkRed => (128, 0, 0),
            Color::Green => (0, 255, 0),
            Color::DarkGreen => (0, 128, 0),
            Color::Blue => (0, 0, 255),
            Color::DarkBlue => (0, 0, 128),
            Color::Cyan => (0, 255, 255),
            Color::DarkCyan => (0, 128, 128),
            Color::Magenta => (255, 0, 255),
            Color::DarkMagenta => (128, 0, 128),
            Color::Yellow => (255, 255, 0),
            Color::DarkYellow => (128, 128, 0),
            Color::Coral => (255, 127, 80),
            Color::DeepPink => (255, 20, 147),
            Color::DeepSkyBlue => (0, 191, 255),
            Color::GreenYellow => (173, 255, 47),
            Color::PaleGreen => (152, 251, 152),
            Color::FireBrick => (178, 34, 34),
            Color::LimeGreen => (50, 205, 50),
            Color::Chartreuse => (127, 255, 0),
            Color::BurlyWood => (222, 184, 135),
            Color::AliceBlue => (240, 248, 255),
            Color::LemonChiffon => (255, 250, 205),
            Color::VelvetRot => (117, 18, 40),
            Color::SerenValeBlue => (93, 138, 168),
            Color::ChadsCopper => (184, 115, 51),
            Color::Rgb(r, g, b) => (r, g, b),
        };
        Some(rgb)
    }

    /// Nearest of the sixteen console colors by squared RGB distance.
    pub fn to_legacy(self) -> Option<LegacyColor> {
        let (r, g, b) = self.to_rgb()?;
        let distance = |(cr, cg, cb): (u8, u8, u8)| {
            let dr = i32::from(r) - i32::from(cr);
            let dg = i32::from(g) - i32::from(cg);
            let db = i32::from(b) - i32::from(cb);
            dr * dr + dg * dg + db * db
        };
        LegacyColor::ALL
            .iter()
            .copied()
            .min_by_key(|candidate| distance(candidate.rgb()))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|ch| ch.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<_>>>()?;
    match digits.as_slice() {
        [r, g, b] => Some(Color::Rgb(r * 17, g * 17, b * 17)),
        [r1, r2, g1, g2, b1, b2] => Some(Color::Rgb(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
        _ => None,
    }
}

/// The sixteen base console colors used when 24-bit SGR is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl LegacyColor {
    pub const ALL: [LegacyColor; 16] = [
        LegacyColor::Black,
        LegacyColor::DarkBlue,
        LegacyColor::DarkGreen,
        LegacyColor::DarkCyan,
        LegacyColor::DarkRed,
        LegacyColor::DarkMagenta,
        LegacyColor::DarkYellow,
        LegacyColor::Gray,
        LegacyColor::DarkGray,
        LegacyColor::Blue,
        LegacyColor::Green,
        LegacyColor::Cyan,
        LegacyColor::Red,
        LegacyColor::Magenta,
        LegacyColor::Yellow,
        LegacyColor::White,
    ];

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            LegacyColor::Black => (0, 0, 0),
            LegacyColor::DarkBlue => (0, 0, 128),
            LegacyColor::DarkGreen => (0, 128, 0),
            LegacyColor::DarkCyan => (0, 128, 128),
            LegacyColor::DarkRed => (128, 0, 0),
            LegacyColor::DarkMagenta => (128, 0, 128),
            LegacyColor::DarkYellow => (128, 128, 0),
            LegacyColor::Gray => (192, 192, 192),
            LegacyColor::DarkGray => (128, 128, 128),
            LegacyColor::Blue => (0, 0, 255),
            LegacyColor::Green => (0, 255, 0),
            LegacyColor::Cyan => (0, 255, 255),
            LegacyColor::Red => (255, 0, 0),
            LegacyColor::Magenta => (255, 0, 255),
            LegacyColor::Yellow => (255, 255, 0),
            LegacyColor::White => (255, 255, 255),
        }
    }

    /// SGR foreground code (`30–37`, `90–97`).
    pub fn fg_code(self) -> u8 {
        match self {
            LegacyColor::Black => 30,
            LegacyColor::DarkRed => 31,
            LegacyColor::DarkGreen => 32,
            LegacyColor::DarkYellow => 33,
            LegacyColor::DarkBlue => 34,
            LegacyColor::DarkMagenta => 35,
            LegacyColor::DarkCyan => 36,
            LegacyColor::Gray => 37,
            LegacyColor::DarkGray => 90,
            LegacyColor::Red => 91,
            LegacyColor::Green => 92,
            LegacyColor::Yellow => 93,
            LegacyColor::Blue => 94,
            LegacyColor::Magenta => 95,
            LegacyColor::Cyan => 96,
            LegacyColor::White => 97,
        }
    }

    /// SGR background code (`40–47`, `100–107`).
    pub fn bg_code(self) -> u8 {
        self.fg_code() + 10
    }
}
