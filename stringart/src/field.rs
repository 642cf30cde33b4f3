//! Per-pixel ink demand.
//!
//! A [`DarknessField`] holds `255 - luminance` for every pixel of the working
//! grid. Values start in `[0, 255]` and only ever decrease, through
//! [`LineSampler::apply`](crate::LineSampler::apply), never below zero.

use std::ops::Deref;

use image::{DynamicImage, GrayImage};
use num_traits::AsPrimitive;

use crate::{
    config::Filter,
    error::DecodeError,
    geometry::Point,
    verboser::{Message, Verboser},
    Float, Grid,
};

#[derive(Clone, Debug)]
pub struct DarknessField<S> {
    pixels: Vec<S>,
    grid: Grid,
    source: Grid,
}

impl<S: Float> DarknessField<S>
where
    u8: AsPrimitive<S>,
{
    /// Decodes `bytes` and builds the field at a working resolution whose
    /// longest side is at most `max_resolution` pixels.
    ///
    /// Images already within bounds keep their size. The decoded size is kept
    /// as [`Self::source_grid`] so results can be mapped back onto it.
    pub fn build(
        bytes: &[u8],
        max_resolution: u32,
        filter: Filter,
        verboser: &mut impl Verboser,
    ) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        verboser.verbose(Message::Decoding(bytes.len()));
        let image = image::load_from_memory(bytes)?;
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(DecodeError::ZeroSized);
        }
        let source = Grid::new(height as usize, width as usize);
        let luma = downsample(image, max_resolution, filter, verboser).to_luma8();
        let mut field = Self::from_luma(&luma);
        field.source = source;
        Ok(field)
    }

    /// Field of an already decoded grayscale image, at its own size.
    pub fn from_luma(image: &GrayImage) -> Self {
        let grid = Grid::new(image.height() as usize, image.width() as usize);
        Self {
            pixels: image
                .pixels()
                .map(|pixel| S::TWO_FIVE_FIVE - pixel.0[0].as_())
                .collect(),
            grid,
            source: grid,
        }
    }
}

impl<S: Float> DarknessField<S> {
    /// Sum of the remaining darkness of every cell.
    pub fn total(&self) -> S {
        self.pixels.iter().fold(S::ZERO, |acc, &value| acc + value)
    }
}

impl<S> DarknessField<S> {
    pub fn pixels(&self) -> &[S] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [S] {
        &mut self.pixels
    }

    pub fn get(&self, point: Point<usize>) -> Option<&S> {
        self.grid
            .index_of(point)
            .and_then(|index| self.pixels.get(index))
    }

    /// Working resolution.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Resolution of the decoded image before downsampling.
    pub fn source_grid(&self) -> &Grid {
        &self.source
    }
}

impl<S> Deref for DarknessField<S> {
    type Target = Grid;

    fn deref(&self) -> &Self::Target {
        &self.grid
    }
}

fn downsample(
    image: DynamicImage,
    max_resolution: u32,
    filter: Filter,
    verboser: &mut impl Verboser,
) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    if width.max(height) <= max_resolution {
        return image;
    }
    let resized = image.resize(max_resolution, max_resolution, filter.into());
    tracing::debug!(
        from_width = width,
        from_height = height,
        to_width = resized.width(),
        to_height = resized.height(),
        %filter,
        "downsampled image"
    );
    verboser.verbose(Message::Resizing {
        from: (width, height),
        to: (resized.width(), resized.height()),
    });
    resized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verboser::Silent;

    fn encode(image: &GrayImage) -> Vec<u8> {
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::L8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn empty_input_is_a_decode_error() {
        let result = DarknessField::<f32>::build(&[], 64, Filter::Nearest, &mut Silent);
        assert!(matches!(result, Err(DecodeError::Empty)));
    }

    #[test]
    fn corrupt_bytes_are_a_decode_error() {
        let result =
            DarknessField::<f32>::build(&[0xFF, 0xFE, 0x00, 0x01], 64, Filter::Nearest, &mut Silent);
        assert!(matches!(result, Err(DecodeError::Image(_))));
    }

    #[test]
    fn darkness_is_inverted_luminance() {
        let image = GrayImage::from_fn(3, 2, |x, y| image::Luma([(x * 100 + y * 5) as u8]));
        let field =
            DarknessField::<f32>::build(&encode(&image), 64, Filter::Nearest, &mut Silent).unwrap();
        assert_eq!(*field.grid(), Grid::new(2, 3));
        assert_eq!(field.get(Point::new(0, 0)), Some(&255.0));
        assert_eq!(field.get(Point::new(2, 0)), Some(&55.0));
        assert_eq!(field.get(Point::new(1, 1)), Some(&150.0));
        assert_eq!(field.get(Point::new(3, 0)), None);
    }

    #[test]
    fn small_images_keep_their_size() {
        let image = GrayImage::from_pixel(40, 30, image::Luma([0]));
        let field =
            DarknessField::<f64>::build(&encode(&image), 40, Filter::Triangle, &mut Silent).unwrap();
        assert_eq!(*field.grid(), Grid::new(30, 40));
        assert_eq!(field.grid(), field.source_grid());
        assert_eq!(field.total(), 255.0 * 1200.0);
    }

    #[test]
    fn large_images_are_downsampled_keeping_aspect() {
        let image = GrayImage::from_pixel(200, 100, image::Luma([128]));
        let field =
            DarknessField::<f32>::build(&encode(&image), 50, Filter::Triangle, &mut Silent).unwrap();
        assert_eq!(*field.grid(), Grid::new(25, 50));
        assert_eq!(*field.source_grid(), Grid::new(100, 200));
        assert!(field.pixels().iter().all(|&v| (0.0..=255.0).contains(&v)));
    }
}
