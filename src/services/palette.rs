//! Color signatures of the tooltip UI, measured off the game's fixed
//! visual style. One static table, never mutated at runtime; the
//! scanner/cropper/cleaner/segmenter all classify against these.

use crate::models::color::{ChannelRange, ColorRange, HslBand, Rgb};

const fn ch(min: u8, max: u8) -> ChannelRange {
    ChannelRange::new(min, max)
}

/// Sampled borders vary a little with capture compression, so the raw
/// measurements get widened by this much on both ends.
const COLOR_BUFFER: u8 = 10;

const fn buffered(min: u8, max: u8) -> ChannelRange {
    ChannelRange::new(min - COLOR_BUFFER, max.saturating_add(COLOR_BUFFER))
}

/// Orange border ring of a legendary item box
pub const LEGENDARY_BORDER: ColorRange = ColorRange::new(
    buffered(166, 219),
    buffered(123, 191),
    buffered(52, 108),
);

/// Yellow border ring of a rare item box
pub const RARE_BORDER: ColorRange =
    ColorRange::new(buffered(177, 197), buffered(156, 181), buffered(15, 21));

/// Near-black outer edge terminating a box in both axes
pub const END_BORDER: ColorRange = ColorRange::new(ch(0, 21), ch(0, 21), ch(0, 20));

/// Rollable affix text body (RGB portion, used by the cleaner)
pub const ITEM_TEXT: ColorRange = ColorRange::new(ch(80, 230), ch(50, 250), ch(0, 250));

/// Same text signature as a hue/lightness band
pub const ITEM_TEXT_HSL: HslBand = HslBand::new(26.0, 45.0, 50.0, 255.0);

/// Orange "legendary power" text near the bottom of the box
pub const LEGENDARY_TEXT: ColorRange = ColorRange::new(ch(220, 255), ch(110, 150), ch(0, 20));

/// White damage/armor and required-level text
pub const REQUIRED_TEXT: ColorRange = ColorRange::new(ch(190, 255), ch(190, 255), ch(190, 255));

/// Gray band of the EQUIPPED badge above a worn item's box
pub const EQUIPPED_BADGE: ColorRange = ColorRange::new(ch(130, 163), ch(130, 163), ch(130, 163));

/// Gray `[min - max]` range text, as it appears after cleaning
/// (cleaned pixels are grayscale, so all three channels agree)
pub const MIN_MAX_TEXT: ColorRange = ColorRange::new(ch(148, 182), ch(148, 182), ch(148, 182));

/// Separator line between weapon-specific and general stats, post-clean
pub const DIVIDER: ColorRange = ColorRange::new(ch(100, 125), ch(100, 125), ch(100, 125));

/// Item box border of either rarity
pub fn is_item_border(color: Rgb) -> bool {
    LEGENDARY_BORDER.contains(color) || RARE_BORDER.contains(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::color::Rgb;

    #[test]
    fn test_buffer_applied_to_borders() {
        assert_eq!(LEGENDARY_BORDER.r.min, 156);
        assert_eq!(LEGENDARY_BORDER.r.max, 229);
        assert_eq!(RARE_BORDER.b.min, 5);
        assert_eq!(RARE_BORDER.b.max, 31);
    }

    #[test]
    fn test_border_classification() {
        assert!(is_item_border(Rgb::new(190, 150, 80)), "legendary orange");
        assert!(is_item_border(Rgb::new(185, 170, 18)), "rare yellow");
        assert!(!is_item_border(Rgb::new(10, 10, 10)), "background");
        assert!(!is_item_border(Rgb::new(60, 120, 250)), "ui blue");
    }

    #[test]
    fn test_sentinel_bands_do_not_overlap() {
        // a cleaned pixel must never read as both range text and divider
        assert!(DIVIDER.r.max < MIN_MAX_TEXT.r.min);
    }

    #[test]
    fn test_end_border_accepts_pure_black() {
        assert!(END_BORDER.contains(Rgb::new(0, 0, 0)));
        assert!(END_BORDER.contains(Rgb::new(21, 21, 20)));
        assert!(!END_BORDER.contains(Rgb::new(22, 0, 0)));
    }
}
