//! Simple RGBA8 container for sprites and sheets.

use std::io::{Read, Write};

use thiserror::Error;

use crate::color::Color;

const STRIDE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    size: (u32, u32),
    data: Vec<u8>,
}

impl Image {
    pub fn new_rgba8<D: Into<Vec<u8>>>(size: (u32, u32), data: D) -> Result<Self, ImageError> {
        let data = data.into();

        if data.len() != byte_len(size) {
            return Err(ImageError::SizeMismatch {
                width: size.0,
                height: size.1,
                len: data.len(),
            });
        }

        Ok(Self { size, data })
    }

    pub fn new_filled(size: (u32, u32), color: Color) -> Self {
        let pixel = [color.r, color.g, color.b, color.a];
        let data = pixel.repeat(byte_len(size) / STRIDE);

        Self { size, data }
    }

    /// Decodes an 8-bit or 16-bit PNG of any color type into RGBA8.
    ///
    /// Palettes and bit depths below 8 are expanded and 16-bit channels are
    /// stripped to their high byte by the decoder. Gray and RGB images are
    /// then widened here.
    pub fn decode_png<R: Read>(input: R) -> Result<Self, ImageError> {
        let mut decoder = png::Decoder::new(input);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

        let (info, mut reader) = decoder.read_info()?;

        if info.bit_depth != png::BitDepth::Eight {
            return Err(ImageError::UnsupportedBitDepth(info.bit_depth));
        }

        let mut buffer = vec![0; info.buffer_size()];
        reader.next_frame(&mut buffer)?;

        let data = match info.color_type {
            png::ColorType::RGBA => buffer,
            png::ColorType::RGB => buffer
                .chunks_exact(3)
                .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255].to_vec())
                .collect(),
            png::ColorType::GrayscaleAlpha => buffer
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]].to_vec())
                .collect(),
            png::ColorType::Grayscale => buffer
                .iter()
                .flat_map(|&gray| [gray, gray, gray, 255].to_vec())
                .collect(),
            other => return Err(ImageError::UnsupportedColorType(other)),
        };

        Self::new_rgba8((info.width, info.height), data)
    }

    pub fn encode_png<W: Write>(&self, output: W) -> Result<(), ImageError> {
        let mut encoder = png::Encoder::new(output, self.size.0, self.size.1);
        encoder.set_color(png::ColorType::RGBA);
        encoder.set_depth(png::BitDepth::Eight);

        let mut output_writer = encoder.write_header()?;
        output_writer.write_image_data(&self.data)?;

        // On drop, output_writer will write the last chunk of the PNG file.
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Copies `other` into this image with its top-left corner at `pos`.
    /// `other` must fit entirely inside this image.
    pub fn blit(&mut self, other: &Image, pos: (u32, u32)) {
        assert!(
            pos.0 as u64 + other.size.0 as u64 <= self.size.0 as u64
                && pos.1 as u64 + other.size.1 as u64 <= self.size.1 as u64,
            "blitting a {:?} image at {:?} overflows a {:?} image",
            other.size,
            pos,
            self.size
        );

        let other_width_bytes = other.size.0 as usize * STRIDE;
        if other_width_bytes == 0 {
            return;
        }

        let other_rows = other.data.chunks_exact(other_width_bytes);

        for (other_y, other_row) in other_rows.enumerate() {
            let self_y = pos.1 as usize + other_y;
            let start_px = pos.0 as usize + self.size.0 as usize * self_y;

            let start_in_bytes = STRIDE * start_px;
            let end_in_bytes = start_in_bytes + other_row.len();

            let self_row = &mut self.data[start_in_bytes..end_in_bytes];
            self_row.copy_from_slice(other_row);
        }
    }

    #[cfg(test)]
    pub fn get_pixel(&self, pos: (u32, u32)) -> Color {
        let start = self.pixel_start(pos);

        Color::new(
            self.data[start],
            self.data[start + 1],
            self.data[start + 2],
            self.data[start + 3],
        )
    }

    #[cfg(test)]
    pub fn set_pixel(&mut self, pos: (u32, u32), color: Color) {
        let start = self.pixel_start(pos);

        self.data[start..start + STRIDE].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    #[cfg(test)]
    fn pixel_start(&self, pos: (u32, u32)) -> usize {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        STRIDE * (pos.0 as usize + pos.1 as usize * self.size.0 as usize)
    }
}

fn byte_len(size: (u32, u32)) -> usize {
    size.0 as usize * size.1 as usize * STRIDE
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error(transparent)]
    Decoding {
        #[from]
        source: png::DecodingError,
    },

    #[error(transparent)]
    Encoding {
        #[from]
        source: png::EncodingError,
    },

    #[error("unsupported PNG color type {0:?}")]
    UnsupportedColorType(png::ColorType),

    #[error("unsupported PNG bit depth {0:?}")]
    UnsupportedBitDepth(png::BitDepth),

    #[error("{len} bytes of pixel data do not make a {width}x{height} RGBA image")]
    SizeMismatch { width: u32, height: u32, len: usize },
}
