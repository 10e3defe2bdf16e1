/// An ARGB display color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{red:02X}{green:02X}{blue:02X}")]
pub struct Color {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const CYAN: Self = Self::from_argb(0x004D_BBEC);
    pub const YELLOW: Self = Self::from_argb(0x00F4_CC3C);
    pub const PURPLE: Self = Self::from_argb(0x009B_358A);
    pub const BLUE: Self = Self::from_argb(0x0018_24F2);
    pub const ORANGE: Self = Self::from_argb(0x00E6_632F);
    pub const GREEN: Self = Self::from_argb(0x006C_F632);
    pub const RED: Self = Self::from_argb(0x00E1_272A);

    /// Unpacks a `0xAARRGGBB` value.
    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        let [alpha, red, green, blue] = argb.to_be_bytes();
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    #[must_use]
    pub const fn to_argb(self) -> u32 {
        u32::from_be_bytes([self.alpha, self.red, self.green, self.blue])
    }

    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }
}
