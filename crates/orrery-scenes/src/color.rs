//! Color utility functions for the animations.

use orrery_core::Rgba;

/// Lighten a colour by moving its HSL lightness towards white.
pub fn lighten(color: Rgba, amount: f32) -> Rgba {
    let (h, s, l) = rgb_to_hsl(color);
    hsl_to_rgb(h, s, (l + amount).clamp(0.0, 1.0)).with_alpha(color.a)
}

/// Darken a colour by moving its HSL lightness towards black.
pub fn darken(color: Rgba, amount: f32) -> Rgba {
    lighten(color, -amount)
}

/// Convert HSL to an opaque RGB colour. Hue in degrees, the rest in `0.0..=1.0`.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgba {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Rgba::opaque(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Rgba::opaque(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

/// Convert an RGB colour to `(hue degrees, saturation, lightness)`.
pub fn rgb_to_hsl(color: Rgba) -> (f32, f32, f32) {
    let r = color.r as f32 / 255.0;
    let g = color.g as f32 / 255.0;
    let b = color.b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h * 60.0, s, l)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_colors_survive_round_trip() {
        for color in [
            Rgba::opaque(255, 0, 0),
            Rgba::opaque(0, 255, 0),
            Rgba::opaque(0, 0, 255),
            Rgba::opaque(100, 149, 237),
        ] {
            let (h, s, l) = rgb_to_hsl(color);
            let back = hsl_to_rgb(h, s, l);
            assert!((back.r as i16 - color.r as i16).abs() <= 1, "{color:?} -> {back:?}");
            assert!((back.g as i16 - color.g as i16).abs() <= 1, "{color:?} -> {back:?}");
            assert!((back.b as i16 - color.b as i16).abs() <= 1, "{color:?} -> {back:?}");
        }
    }

    #[test]
    fn lighten_keeps_alpha_and_brightens() {
        let base = Rgba::new(193, 68, 14, 0.4);
        let light = lighten(base, 0.2);
        assert_eq!(light.a, 0.4);
        assert!(light.r as u16 + light.g as u16 + light.b as u16 > 193 + 68 + 14);
    }

    #[test]
    fn darken_to_black() {
        let dark = darken(Rgba::opaque(250, 213, 165), 1.0);
        assert_eq!((dark.r, dark.g, dark.b), (0, 0, 0));
    }

    #[test]
    fn grey_has_no_saturation() {
        let (_, s, l) = rgb_to_hsl(Rgba::opaque(128, 128, 128));
        assert_eq!(s, 0.0);
        assert!((l - 128.0 / 255.0).abs() < 1e-6);
    }
}
