use crate::foundation::core::Rgba8;
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::unit_to_u8;

/// Parse a CSS color string as used in story records.
///
/// Accepted forms: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`, `rgba(r, g, b, a)`,
/// `hsl(h, s%, l%)` and `hsla(h, s%, l%, a)`.
pub fn parse_css_color(s: &str) -> PosterResult<Rgba8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    let (name, args) = lower
        .split_once('(')
        .and_then(|(name, rest)| rest.strip_suffix(')').map(|args| (name.trim(), args)))
        .ok_or_else(|| PosterError::validation(format!("unsupported color \"{s}\"")))?;
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();

    match (name, parts.len()) {
        ("rgb", 3) | ("rgba", 4) => {
            let channel = |p: &str| -> PosterResult<u8> {
                let v: f64 = p
                    .parse()
                    .map_err(|_| PosterError::validation(format!("invalid rgb channel \"{p}\"")))?;
                Ok(v.clamp(0.0, 255.0).round() as u8)
            };
            let a = match parts.get(3) {
                Some(p) => unit_to_u8(parse_unit(p)?),
                None => 255,
            };
            Ok(Rgba8::rgba(
                channel(parts[0])?,
                channel(parts[1])?,
                channel(parts[2])?,
                a,
            ))
        }
        ("hsl", 3) | ("hsla", 4) => {
            let h: f64 = parts[0]
                .trim_end_matches("deg")
                .parse()
                .map_err(|_| PosterError::validation(format!("invalid hue \"{}\"", parts[0])))?;
            let s = parse_percent(parts[1])?;
            let l = parse_percent(parts[2])?;
            let a = match parts.get(3) {
                Some(p) => parse_unit(p)?,
                None => 1.0,
            };
            Ok(hsla_to_rgba(h, s, l, a))
        }
        _ => Err(PosterError::validation(format!("unsupported color \"{s}\""))),
    }
}

fn parse_unit(p: &str) -> PosterResult<f64> {
    p.parse::<f64>()
        .map(|v| v.clamp(0.0, 1.0))
        .map_err(|_| PosterError::validation(format!("invalid alpha \"{p}\"")))
}

fn parse_percent(p: &str) -> PosterResult<f64> {
    p.trim_end_matches('%')
        .parse::<f64>()
        .map(|v| (v / 100.0).clamp(0.0, 1.0))
        .map_err(|_| PosterError::validation(format!("invalid percentage \"{p}\"")))
}

fn parse_hex(s: &str) -> PosterResult<Rgba8> {
    fn hex_byte(pair: &str) -> PosterResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| PosterError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if !s.is_ascii() {
        return Err(PosterError::validation("hex color must be ascii"));
    }
    match s.len() {
        3 => {
            let expand = |i: usize| hex_byte(&s[i..i + 1].repeat(2));
            Ok(Rgba8::rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err(PosterError::validation(
            "hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> Rgba8 {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let alpha = unit_to_u8(a);

    if s == 0.0 {
        let v = unit_to_u8(l);
        return Rgba8::rgba(v, v, v, alpha);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgba8::rgba(
        unit_to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        unit_to_u8(hue_to_rgb(p, q, h)),
        unit_to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        alpha,
    )
}
