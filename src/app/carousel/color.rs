use eframe::egui::Color32;

pub(in crate::app) const DEFAULT_NODE_COLOR: Color32 = Color32::from_rgb(0x80, 0x00, 0x00);

const LIGHT_TEXT: Color32 = Color32::from_rgb(0xbd, 0xb5, 0xb5);
pub(in crate::app) const FORCED_LIGHT_TEXT: Color32 = Color32::WHITE;

const TEXT_LIGHTNESS_THRESHOLD: f32 = 35.0;
const SATURATION_REDUCTION: f32 = 25.0;
const FIRST_GENERIC_LIGHTENING: f32 = 40.0;
const GENERIC_LIGHTENING_STEP: f32 = 8.0;
const SPECIFIC_DARKENING_STEP: f32 = 6.0;

/// Hue in degrees (0-360), saturation and lightness in percent (0-100).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// `#rrggbb` plus the CSS names the store format allows.
pub(in crate::app) fn parse_color(value: &str) -> Option<Color32> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color32::from_rgb(r, g, b));
    }

    let named = match value.to_ascii_lowercase().as_str() {
        "maroon" => (0x80, 0x00, 0x00),
        "red" => (0xff, 0x00, 0x00),
        "orange" => (0xff, 0xa5, 0x00),
        "yellow" => (0xff, 0xff, 0x00),
        "olive" => (0x80, 0x80, 0x00),
        "lime" => (0x00, 0xff, 0x00),
        "green" => (0x00, 0x80, 0x00),
        "aqua" => (0x00, 0xff, 0xff),
        "teal" => (0x00, 0x80, 0x80),
        "blue" => (0x00, 0x00, 0xff),
        "navy" => (0x00, 0x00, 0x80),
        "fuchsia" => (0xff, 0x00, 0xff),
        "purple" => (0x80, 0x00, 0x80),
        "black" => (0x00, 0x00, 0x00),
        "gray" => (0x80, 0x80, 0x80),
        "silver" => (0xc0, 0xc0, 0xc0),
        "white" => (0xff, 0xff, 0xff),
        _ => return None,
    };
    Some(Color32::from_rgb(named.0, named.1, named.2))
}

pub(in crate::app) fn to_hsl(color: Color32) -> Hsl {
    let r = color.r() as f32 / 255.0;
    let g = color.g() as f32 / 255.0;
    let b = color.b() as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    let h = h / 6.0;

    Hsl {
        h: h * 360.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

pub(in crate::app) fn from_hsl(hsl: Hsl) -> Color32 {
    let h = hsl.h.rem_euclid(360.0);
    let s = (hsl.s / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l / 100.0).clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Color32::from_rgb(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

/// Hue preserved, saturation reduced, generic levels tinted and specific
/// levels shaded.
pub(in crate::app) fn progressive_color(base: Color32, level: i32) -> Color32 {
    if level == 0 {
        return base;
    }

    let Hsl { h, s, l } = to_hsl(base);
    let s = (s - SATURATION_REDUCTION).max(0.0);

    let l = if level < 0 {
        // Big first step, then a linear ramp.
        let steps_past_first = (level.abs() - 1) as f32;
        (l + FIRST_GENERIC_LIGHTENING + steps_past_first * GENERIC_LIGHTENING_STEP).min(90.0)
    } else {
        (l - SPECIFIC_DARKENING_STEP * level as f32).max(10.0)
    };

    from_hsl(Hsl { h, s, l })
}

pub(in crate::app) fn text_color_for(background: Color32) -> Color32 {
    let hsl = to_hsl(background);
    if hsl.l > TEXT_LIGHTNESS_THRESHOLD {
        from_hsl(Hsl {
            h: hsl.h,
            s: hsl.s.min(50.0),
            l: 12.0,
        })
    } else {
        LIGHT_TEXT
    }
}
