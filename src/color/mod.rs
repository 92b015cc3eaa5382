use std::{fmt, str::FromStr};

use log::warn;

mod named;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("Unknown color: {0:?}")]
pub struct ParseColorError(String);

/// RGB color the mask is drawn in on the visibility overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayColor(pub [u8; 3]);

impl OverlayColor {
    pub const AGNOSTIC_GRAY: Self = Self([128, 128, 128]);
    pub const FALLBACK: Self = Self([0, 0, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parses color picker output, using [`Self::FALLBACK`] for anything unrecognized.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_else(|e| {
            warn!("{e}, fall back to {}", Self::FALLBACK);
            Self::FALLBACK
        })
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        // Alpha digits are accepted but not used
        match hex.len() {
            3 | 4 => {
                let digits = hex
                    .chars()
                    .map(|c| c.to_digit(16).map(|d| d as u8 * 17))
                    .collect::<Option<Vec<_>>>()?;
                Some(Self([digits[0], digits[1], digits[2]]))
            }
            6 | 8 => Some(Self([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            ])),
            _ => None,
        }
    }

    /// `rgb(r, g, b)` or `rgba(r, g, b, a)`, components may be floats or percentages.
    fn parse_rgb(s: &str) -> Option<Self> {
        let args = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))?
            .strip_suffix(')')?;
        let mut components = args.split(',').map(str::trim);
        let mut channel = || {
            let component = components.next()?;
            let value = match component.strip_suffix('%') {
                Some(percent) => percent.parse::<f32>().ok()? * 255.0 / 100.0 + 0.5,
                None => component.parse::<f32>().ok()?,
            };
            value.is_finite().then(|| value.clamp(0.0, 255.0) as u8)
        };
        Some(Self([channel()?, channel()?, channel()?]))
    }

    /// `hsl(h, s%, l%)`, `hsv(h, s%, v%)` and its alias `hsb(..)`.
    fn parse_cylindrical(s: &str) -> Option<Self> {
        let (model, args) = s.split_once('(')?;
        let [hue, saturation, third] = args
            .strip_suffix(')')?
            .split(',')
            .map(str::trim)
            .collect::<Vec<_>>()
            .try_into()
            .ok()?;
        let percent = |c: &str| {
            let value = c.strip_suffix('%')?.parse::<f32>().ok()?;
            (0.0..=100.0).contains(&value).then_some(value / 100.0)
        };
        let hue = hue.parse::<f32>().ok().filter(|h| h.is_finite())? / 360.0;
        let (saturation, third) = (percent(saturation)?, percent(third)?);

        let rgb = match model.trim() {
            "hsl" => hsl_to_rgb(hue, saturation, third),
            "hsv" | "hsb" => hsv_to_rgb(hue, saturation, third),
            _ => return None,
        };
        Some(Self(rgb.map(|c| (c * 255.0 + 0.5) as u8)))
    }
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s == 0.0 {
        return [l; 3];
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    let channel = |hue: f32| {
        let hue = hue.rem_euclid(1.0);
        if hue < 1.0 / 6.0 {
            m1 + (m2 - m1) * hue * 6.0
        } else if hue < 0.5 {
            m2
        } else if hue < 2.0 / 3.0 {
            m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
        } else {
            m1
        }
    };
    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let h_i = (h * 6.0).floor() as u32 % 6;
    let f = h * 6.0 - h_i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    match h_i {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

impl Default for OverlayColor {
    fn default() -> Self {
        Self([0x20, 0xff, 0x03])
    }
}

impl FromStr for OverlayColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let parsed = match normalized.strip_prefix('#') {
            Some(hex) => Self::parse_hex(hex),
            None => Self::parse_rgb(&normalized)
                .or_else(|| Self::parse_cylindrical(&normalized))
                .or_else(|| named::lookup(&normalized).map(Self)),
        };
        parsed.ok_or_else(|| ParseColorError(s.to_string()))
    }
}

impl fmt::Display for OverlayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
