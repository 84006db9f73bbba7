//! Relative luminance and contrast ratio.

use sprig_core::Rgb;

fn linearize(channel: f64) -> f64 {
    if channel <= 0.03928 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance over linearized channels.
pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Contrast ratio between two colors, always `>= 1.0`.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_on_white() {
        let ratio = contrast_ratio(Rgb::BLACK, Rgb::WHITE);
        assert!((ratio - 21.0).abs() < 1e-9);
        assert_eq!(contrast_ratio(Rgb::WHITE, Rgb::BLACK), ratio);
    }

    #[test]
    fn test_same_color_is_one() {
        let gray = Rgb::new(0.5, 0.5, 0.5);
        assert!((contrast_ratio(gray, gray) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_never_below_one() {
        for v in [0.0, 0.1, 0.3, 0.7, 1.0] {
            let c = Rgb::new(v, 1.0 - v, v / 2.0);
            assert!(contrast_ratio(c, Rgb::WHITE) >= 1.0);
            assert!(contrast_ratio(c, Rgb::BLACK) >= 1.0);
        }
    }
}
