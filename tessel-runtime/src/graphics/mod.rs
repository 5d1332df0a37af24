pub mod text;
pub mod texture;
pub mod typeface;

use palette::rgb::channels::Argb;
use palette::{Srgb, Srgba};

pub use texture::Texture;

/// 8-bit sRGB colour with straight alpha
pub type Color = Srgba<u8>;

/// Packs a colour into the `0xAARRGGBB` layout used by [`Texture`] pixels
#[inline]
pub fn pack(color: Color) -> u32 {
    color.into_u32::<Argb>()
}

#[inline]
pub fn unpack(pixel: u32) -> Color {
    Color::from_u32::<Argb>(pixel)
}

/// Linear interpolation between two channel values by an 8-bit weight
#[inline]
fn mix_channel(under: u8, over: u8, weight: u8) -> u8 {
    let weight = weight as u32;
    ((over as u32 * weight + under as u32 * (255 - weight) + 127) / 255) as u8
}

/// Mixes `over` onto `under` by `weight`, keeping the alpha of `over`
pub fn mix(under: Color, over: Color, weight: u8) -> Color {
    Srgba::new(
        mix_channel(under.red, over.red, weight),
        mix_channel(under.green, over.green, weight),
        mix_channel(under.blue, over.blue, weight),
        over.alpha,
    )
}

/// Composites a texture pixel (`0xAARRGGBB`) over a frame buffer pixel (`0x00RRGGBB`).
///
/// The frame buffer has no alpha channel; its top byte is always written as zero.
pub fn blend_over(frame: u32, pixel: u32) -> u32 {
    let source = unpack(pixel);
    let result = match source.alpha {
        0 => return frame,
        255 => source.color,
        alpha => {
            let under = unpack(frame | 0xff00_0000);
            mix(under, source, alpha).color
        }
    };
    to_frame(result)
}

/// Drops the alpha byte, producing a frame buffer pixel
#[inline]
pub fn to_frame(color: Srgb<u8>) -> u32 {
    color.into_u32::<Argb>() & 0x00ff_ffff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_round_trip_layout() {
        let packed = pack(Color::new(0x12, 0x34, 0x56, 0x78));
        assert_eq!(packed, 0x7812_3456);
        assert_eq!(unpack(packed), Color::new(0x12, 0x34, 0x56, 0x78));
    }

    #[test]
    fn opaque_pixels_replace_the_frame() {
        assert_eq!(blend_over(0x00ff_ffff, 0xff10_2030), 0x0010_2030);
    }

    #[test]
    fn transparent_pixels_leave_the_frame() {
        assert_eq!(blend_over(0x00ab_cdef, 0x0010_2030), 0x00ab_cdef);
    }

    #[test]
    fn half_alpha_mixes_channels() {
        // 50% white over black
        let blended = blend_over(0x0000_0000, 0x80ff_ffff);
        assert_eq!(blended, 0x0080_8080);
    }
}
