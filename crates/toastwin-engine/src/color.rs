//! Best-effort color parsing and canonicalization for caller-supplied icon
//! colors.

/// An sRGB color with straight alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parses hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `#` optional),
    /// functional `rgb()`/`rgba()` notation and common CSS color names.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().to_ascii_lowercase();
        if text.is_empty() {
            return None;
        }

        if let Some(arguments) = functional_arguments(&text, "rgba")
            .or_else(|| functional_arguments(&text, "rgb"))
        {
            return parse_functional(arguments);
        }

        if let Some(color) = named_color(&text) {
            return Some(color);
        }

        parse_hex(text.strip_prefix('#').unwrap_or(&text))
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Serializes as `rgb(r, g, b)`, or `rgba(r, g, b, a)` when translucent
    /// with alpha rounded to two decimals.
    pub fn to_rgb_string(&self) -> String {
        if self.is_opaque() {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let alpha = (self.a * 100.0).round() / 100.0;
            format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
        }
    }
}

/// Returns the canonical form of `text`, or `text` unchanged if it cannot be
/// parsed as a color.
pub fn canonicalize(text: &str) -> String {
    match Rgba::parse(text) {
        Some(color) => color.to_rgb_string(),
        None => text.to_string(),
    }
}

fn functional_arguments<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    text.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_functional(arguments: &str) -> Option<Rgba> {
    let parts: Vec<&str> = arguments
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    let (channels, alpha) = match parts.as_slice() {
        [r, g, b] => ([*r, *g, *b], None),
        [r, g, b, a] => ([*r, *g, *b], Some(*a)),
        _ => return None,
    };

    let [r, g, b] = channels;
    let alpha = match alpha {
        Some(alpha) => parse_alpha(alpha)?,
        None => 1.0,
    };

    Some(Rgba {
        r: parse_channel(r)?,
        g: parse_channel(g)?,
        b: parse_channel(b)?,
        a: alpha,
    })
}

fn parse_channel(text: &str) -> Option<u8> {
    let value = match text.strip_suffix('%') {
        Some(percent) => percent.parse::<f32>().ok()? * 255.0 / 100.0,
        None => text.parse::<f32>().ok()?,
    };
    if !value.is_finite() {
        return None;
    }
    Some(value.clamp(0.0, 255.0).round() as u8)
}

fn parse_alpha(text: &str) -> Option<f32> {
    let value = match text.strip_suffix('%') {
        Some(percent) => percent.parse::<f32>().ok()? / 100.0,
        None => text.parse::<f32>().ok()?,
    };
    if !value.is_finite() {
        return None;
    }
    Some(value.clamp(0.0, 1.0))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let nibble = |index: usize| u8::from_str_radix(&hex[index..index + 1], 16).ok().map(|n| n * 17);
    let byte = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).ok();

    match hex.len() {
        3 => Some(Rgba::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba {
            a: f32::from(nibble(3)?) / 255.0,
            ..Rgba::opaque(nibble(0)?, nibble(1)?, nibble(2)?)
        }),
        6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba {
            a: f32::from(byte(6)?) / 255.0,
            ..Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)
        }),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Rgba> {
    let color = match name {
        "transparent" => Rgba {
            a: 0.0,
            ..Rgba::opaque(0, 0, 0)
        },
        "black" => Rgba::opaque(0, 0, 0),
        "white" => Rgba::opaque(255, 255, 255),
        "red" => Rgba::opaque(255, 0, 0),
        "green" => Rgba::opaque(0, 128, 0),
        "lime" => Rgba::opaque(0, 255, 0),
        "blue" => Rgba::opaque(0, 0, 255),
        "yellow" => Rgba::opaque(255, 255, 0),
        "orange" => Rgba::opaque(255, 165, 0),
        "purple" => Rgba::opaque(128, 0, 128),
        "pink" => Rgba::opaque(255, 192, 203),
        "cyan" | "aqua" => Rgba::opaque(0, 255, 255),
        "magenta" | "fuchsia" => Rgba::opaque(255, 0, 255),
        "gray" | "grey" => Rgba::opaque(128, 128, 128),
        "silver" => Rgba::opaque(192, 192, 192),
        "maroon" => Rgba::opaque(128, 0, 0),
        "olive" => Rgba::opaque(128, 128, 0),
        "navy" => Rgba::opaque(0, 0, 128),
        "teal" => Rgba::opaque(0, 128, 128),
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_hex_forms() {
        assert_eq!(canonicalize("#f03e3e"), "rgb(240, 62, 62)");
        assert_eq!(canonicalize("#FFF"), "rgb(255, 255, 255)");
        assert_eq!(canonicalize("12b886"), "rgb(18, 184, 134)");
        assert_eq!(canonicalize("#00000080"), "rgba(0, 0, 0, 0.5)");
    }

    #[test]
    fn canonicalizes_functional_and_named_forms() {
        assert_eq!(canonicalize("rgb(1,2,3)"), "rgb(1, 2, 3)");
        assert_eq!(canonicalize("RGBA(10, 20, 30, 0.25)"), "rgba(10, 20, 30, 0.25)");
        assert_eq!(canonicalize("rgb(100% 0% 0% / 50%)"), "rgba(255, 0, 0, 0.5)");
        assert_eq!(canonicalize(" red "), "rgb(255, 0, 0)");
        assert_eq!(canonicalize("transparent"), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn unparsable_text_passes_through() {
        assert_eq!(canonicalize("not-a-color"), "not-a-color");
        assert_eq!(canonicalize("#12345"), "#12345");
        assert_eq!(canonicalize("rgb(1, 2)"), "rgb(1, 2)");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn reports_opacity() {
        assert!(Rgba::parse("#9c27b0").unwrap().is_opaque());
        assert!(!Rgba::parse("rgba(0, 0, 0, 0.4)").unwrap().is_opaque());
    }
}
