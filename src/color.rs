/// Lineage color of a live cell, as hue in degrees and saturation in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Hue in `0..360`.
    pub hue: u16,
    /// Saturation in `0..=100`.
    pub saturation: u8,
}

/// Seed colors: evenly spaced, fully saturated hues.
pub const PALETTE: [Color; 8] = [
    Color::new(0, 100),
    Color::new(45, 100),
    Color::new(90, 100),
    Color::new(135, 100),
    Color::new(180, 100),
    Color::new(225, 100),
    Color::new(270, 100),
    Color::new(315, 100),
];

/// Saturation given to a newly born cell.
pub const BIRTH_SATURATION: u8 = 100;
/// Saturation a newborn drops to after its first survival.
pub const YOUTH_SATURATION: u8 = 70;
/// Floor for saturation decay.
pub const MIN_SATURATION: u8 = 25;
/// Saturation lost per survived generation after the first.
pub const SATURATION_DECAY: u8 = 5;

impl Color {
    pub const fn new(hue: u16, saturation: u8) -> Self {
        Self { hue, saturation }
    }

    /// Color after surviving one more generation.
    pub fn aged(self) -> Self {
        let saturation = if self.saturation == BIRTH_SATURATION {
            YOUTH_SATURATION
        } else {
            self.saturation.saturating_sub(SATURATION_DECAY).max(MIN_SATURATION)
        };
        Self { hue: self.hue, saturation }
    }

    /// Color of a cell born from `parents` (at most the first two are used).
    pub fn inherit(parents: &[Color]) -> Self {
        let hue = match parents {
            [] => 0,
            [a] => a.hue % 360,
            [a, b, ..] => circular_mean(a.hue, b.hue),
        };
        Self::new(hue, BIRTH_SATURATION)
    }
}

/// Mean of two hues on the color wheel, floored, in `0..360`.
fn circular_mean(a: u16, b: u16) -> u16 {
    let a = i32::from(a % 360);
    let mut b = i32::from(b % 360);
    if b - a > 180 {
        b -= 360;
    } else if a - b > 180 {
        b += 360;
    }
    ((a + b).div_euclid(2)).rem_euclid(360) as u16
}
