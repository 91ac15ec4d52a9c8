//! SGR encoding of styled segments (24-bit and sixteen-color legacy).

use std::fmt::Write as _;

use crate::core::color::Color;
use crate::render::line::{Line, Segment};

pub const RESET: &str = "\x1b[0m";

/// How segment colors are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// `38;2;r;g;b` / `48;2;r;g;b`.
    #[default]
    TrueColor,
    /// Nearest sixteen-color codes (`30–37`, `90–97`, `40–47`, `100–107`).
    Legacy,
}

impl ColorMode {
    /// Pick the encoder for a terminal; `NO_COLOR` or `CONSOLE_DOC_LEGACY_COLOR=1`
    /// force the legacy encoder.
    pub fn detect(vt_enabled: bool) -> Self {
        if !vt_enabled || crate::logging::env_config().legacy_color {
            ColorMode::Legacy
        } else {
            ColorMode::TrueColor
        }
    }
}

fn push_color(params: &mut Vec<String>, color: Color, background: bool, mode: ColorMode) {
    if color.is_default() {
        return;
    }
    match mode {
        ColorMode::TrueColor => {
            if let Some((r, g, b)) = color.to_rgb() {
                let lead = if background { 48 } else { 38 };
                params.push(format!("{lead};2;{r};{g};{b}"));
            }
        }
        ColorMode::Legacy => {
            if let Some(legacy) = color.to_legacy() {
                let code = if background {
                    legacy.bg_code()
                } else {
                    legacy.fg_code()
                };
                params.push(code.to_string());
            }
        }
    }
}

/// Append one segment: SGR prefix, text, reset. Unstyled segments are written bare.
pub fn encode_segment(segment: &Segment, mode: ColorMode, out: &mut String) {
    if segment.text().is_empty() {
        return;
    }
    let mut params: Vec<String> = segment
        .text_style()
        .sgr_codes()
        .into_iter()
        .map(|code| code.to_string())
        .collect();
    push_color(&mut params, segment.foreground(), false, mode);
    push_color(&mut params, segment.background(), true, mode);

    if params.is_empty() {
        out.push_str(segment.text());
        return;
    }
    let _ = write!(out, "\x1b[{}m", params.join(";"));
    out.push_str(segment.text());
    out.push_str(RESET);
}

pub fn encode_line(line: &Line, mode: ColorMode) -> String {
    let mut out = String::new();
    for segment in line.segments() {
        encode_segment(segment, mode, &mut out);
    }
    out
}
