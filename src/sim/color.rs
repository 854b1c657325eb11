/// 8-bit RGB color token handed to the renderer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(204, 32, 32);
    pub const GREY: Self = Self::new(150, 150, 150);
    pub const ORANGE: Self = Self::new(255, 140, 0);
    pub const GRASS: Self = Self::new(46, 110, 46);
    pub const ASPHALT: Self = Self::new(64, 64, 64);
    pub const GROOVE: Self = Self::new(52, 52, 52);
    pub const DUST: Self = Self::new(140, 118, 80);

    /// `#rrggbb` form, as canvas renderers expect.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
