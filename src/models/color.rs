/// RGB color value read from a frame pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to HSL using the max/min/delta formula.
    ///
    /// Hue is in degrees (0-360), saturation and lightness stay on the
    /// 0-255 channel scale so they can be compared against byte bounds.
    /// Degenerate input (delta == 0) defines hue = 0, saturation = 0.
    pub fn to_hsl(self) -> Hsl {
        let r = self.r as f32;
        let g = self.g as f32;
        let b = self.b as f32;

        let c_max = r.max(g).max(b);
        let c_min = r.min(g).min(b);
        let delta = c_max - c_min;
        let l = (c_max + c_min) / 2.0;

        let h = if delta == 0.0 {
            0.0
        } else if c_max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if c_max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };
        let h = if h < 0.0 { h + 360.0 } else { h };

        let s = if delta == 0.0 {
            0.0
        } else {
            let denom = 255.0 - (2.0 * l - 255.0).abs();
            if denom == 0.0 {
                0.0
            } else {
                delta / denom * 255.0
            }
        };

        Hsl { h, s, l }
    }

    /// A pixel with one channel far apart from another reads as "strongly
    /// colored" rather than gray/white text.
    pub fn is_colored(self) -> bool {
        let r = self.r as i32;
        let g = self.g as i32;
        let b = self.b as i32;
        (r - b).abs() > 100 || (r - g).abs() > 100 || (g - b).abs() > 100
    }

    /// Pure black (all channels at most 1)
    pub fn is_black(self) -> bool {
        self.r <= 1 && self.g <= 1 && self.b <= 1
    }
}

/// HSL representation; hue in degrees, saturation/lightness on 0-255
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// Inclusive [min, max] bounds for one byte channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRange {
    pub min: u8,
    pub max: u8,
}

impl ChannelRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u8) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Per-channel RGB classification range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub r: ChannelRange,
    pub g: ChannelRange,
    pub b: ChannelRange,
}

impl ColorRange {
    pub const fn new(r: ChannelRange, g: ChannelRange, b: ChannelRange) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise AND of the bounds
    pub fn contains(&self, color: Rgb) -> bool {
        self.r.contains(color.r) && self.g.contains(color.g) && self.b.contains(color.b)
    }

    /// The gray band a grayscaled in-range pixel must land in to still
    /// classify as in-range (intersection of the channel bounds).
    pub fn gray_band(&self) -> ChannelRange {
        ChannelRange {
            min: self.r.min.max(self.g.min).max(self.b.min),
            max: self.r.max.min(self.g.max).min(self.b.max),
        }
    }
}

/// Hue/lightness band; saturation is deliberately unconstrained
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslBand {
    pub h_min: f32,
    pub h_max: f32,
    pub l_min: f32,
    pub l_max: f32,
}

impl HslBand {
    pub const fn new(h_min: f32, h_max: f32, l_min: f32, l_max: f32) -> Self {
        Self {
            h_min,
            h_max,
            l_min,
            l_max,
        }
    }

    /// Converts to HSL and range-checks H and L only
    pub fn contains(&self, color: Rgb) -> bool {
        let hsl = color.to_hsl();
        hsl.h >= self.h_min && hsl.h <= self.h_max && hsl.l >= self.l_min && hsl.l <= self.l_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_all_channels_inside() {
        let range = ColorRange::new(
            ChannelRange::new(100, 200),
            ChannelRange::new(50, 150),
            ChannelRange::new(0, 80),
        );

        assert!(range.contains(Rgb::new(100, 50, 0)));
        assert!(range.contains(Rgb::new(200, 150, 80)));
        assert!(range.contains(Rgb::new(150, 100, 40)));
    }

    #[test]
    fn test_in_range_any_channel_outside() {
        let range = ColorRange::new(
            ChannelRange::new(100, 200),
            ChannelRange::new(50, 150),
            ChannelRange::new(0, 80),
        );

        assert!(!range.contains(Rgb::new(99, 100, 40)), "r below min");
        assert!(!range.contains(Rgb::new(201, 100, 40)), "r above max");
        assert!(!range.contains(Rgb::new(150, 49, 40)), "g below min");
        assert!(!range.contains(Rgb::new(150, 151, 40)), "g above max");
        assert!(!range.contains(Rgb::new(150, 100, 81)), "b above max");
    }

    #[test]
    fn test_hsl_degenerate_gray() {
        let hsl = Rgb::new(128, 128, 128).to_hsl();
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert_eq!(hsl.l, 128.0);
    }

    #[test]
    fn test_hsl_pure_red() {
        let hsl = Rgb::new(255, 0, 0).to_hsl();
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.l, 127.5);
    }

    #[test]
    fn test_hsl_hue_normalized_positive() {
        // magenta-ish: max is r, g < b, raw hue would be negative
        let hsl = Rgb::new(200, 20, 150).to_hsl();
        assert!(hsl.h >= 0.0 && hsl.h <= 360.0, "hue {} out of range", hsl.h);
    }

    #[test]
    fn test_hsl_band_checks_hue_and_lightness_only() {
        // orange text color: hue ~36, lightness well above 50
        let band = HslBand::new(26.0, 45.0, 50.0, 255.0);
        assert!(band.contains(Rgb::new(220, 160, 60)));
        // dark pixel with the same hue fails on lightness
        assert!(!band.contains(Rgb::new(40, 28, 10)));
        // bright blue fails on hue
        assert!(!band.contains(Rgb::new(60, 120, 250)));
    }

    #[test]
    fn test_is_colored() {
        assert!(Rgb::new(255, 0, 0).is_colored());
        assert!(Rgb::new(10, 10, 150).is_colored());
        assert!(!Rgb::new(128, 128, 128).is_colored());
        assert!(!Rgb::new(200, 180, 160).is_colored());
    }

    #[test]
    fn test_is_black() {
        assert!(Rgb::new(0, 0, 0).is_black());
        assert!(Rgb::new(1, 1, 1).is_black());
        assert!(!Rgb::new(2, 1, 1).is_black());
        assert!(!Rgb::new(0, 0, 30).is_black());
    }

    #[test]
    fn test_gray_band_is_channel_intersection() {
        let range = ColorRange::new(
            ChannelRange::new(80, 230),
            ChannelRange::new(50, 250),
            ChannelRange::new(0, 250),
        );
        let band = range.gray_band();
        assert_eq!(band.min, 80);
        assert_eq!(band.max, 230);
    }
}
