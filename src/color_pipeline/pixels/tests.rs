use std::io::Cursor;

use approx::assert_relative_eq;
use tiff::encoder::{colortype, TiffEncoder};

use super::*;
use crate::color_pipeline::common::error::ProcessingError;
use crate::color_pipeline::output::{ImageWriter, OutputConfig, StandardTiffWriter, TiffCompression};

fn encode_rgb32f(pages: &[&PixelArray]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).unwrap();
        for page in pages {
            encoder
                .write_image::<colortype::RGB32Float>(page.width() as u32, page.height() as u32, page.data())
                .unwrap();
        }
    }
    buffer
}

fn gradient(width: usize, height: usize) -> PixelArray {
    let data = (0..width * height * 3)
        .map(|i| i as f32 / (width * height * 3) as f32)
        .collect();
    PixelArray::new(width, height, data).unwrap()
}

#[test]
fn test_pixel_array_dimensions() {
    assert!(matches!(
        PixelArray::new(2, 2, vec![0.0; 11]),
        Err(ProcessingError::InvalidDimensions(2, 2))
    ));

    let image = PixelArray::filled(3, 2, [0.1, 0.2, 0.3]);
    assert_eq!(image.data().len(), 18);
    assert_eq!(image.pixel(2, 1), Some([0.1, 0.2, 0.3]));
    assert_eq!(image.pixel(3, 0), None);
}

#[test]
fn test_map_pixels_returns_new_array() {
    let image = gradient(4, 3);
    let swapped = image.map_pixels(|[r, g, b]| [b, g, r]);

    assert_eq!(swapped.width(), 4);
    assert_eq!(swapped.height(), 3);
    for y in 0..3 {
        for x in 0..4 {
            let [r, g, b] = image.pixel(x, y).unwrap();
            assert_eq!(swapped.pixel(x, y).unwrap(), [b, g, r]);
        }
    }
    assert_ne!(image, swapped);
}

#[test]
fn test_read_float_tiff() {
    let image = gradient(5, 4);
    let bytes = encode_rgb32f(&[&image]);

    let decoded = TiffPixelReader::new().read_pixels(&bytes).unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn test_multi_dataset_requires_selection() {
    let first = gradient(2, 2);
    let second = PixelArray::filled(3, 1, [0.5, 0.25, 0.125]);
    let bytes = encode_rgb32f(&[&first, &second]);

    assert!(matches!(
        TiffPixelReader::new().read_pixels(&bytes),
        Err(ProcessingError::AmbiguousDataset(2))
    ));

    let reader = TiffPixelReader::with_dataset(1);
    assert_eq!(reader.dataset(), Some(1));
    assert_eq!(reader.read_pixels(&bytes).unwrap(), second);
    assert_eq!(TiffPixelReader::with_dataset(0).read_pixels(&bytes).unwrap(), first);
}

#[test]
fn test_reject_grayscale() {
    let mut buffer = Vec::new();
    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).unwrap();
        encoder
            .write_image::<colortype::Gray32Float>(2, 2, &[0.0, 0.1, 0.2, 0.3])
            .unwrap();
    }

    assert!(matches!(
        TiffPixelReader::new().read_pixels(&buffer),
        Err(ProcessingError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_reject_garbage() {
    assert!(matches!(
        TiffPixelReader::new().read_pixels(b"not a tiff"),
        Err(ProcessingError::DecodeError(_))
    ));
}

#[test]
fn test_sixteen_bit_round_trip() {
    let image = gradient(6, 5);
    let config = OutputConfig::builder()
        .compression(TiffCompression::Lzw)
        .predictor(Some(2))
        .build();

    let mut encoded: Vec<u8> = Vec::new();
    StandardTiffWriter.write_image(&image, &mut encoded, &config).unwrap();

    let decoded = TiffPixelReader::new().read_pixels(&encoded).unwrap();
    assert_eq!(decoded.width(), 6);
    assert_eq!(decoded.height(), 5);
    for (a, b) in decoded.data().iter().zip(image.data()) {
        assert_relative_eq!(*a, *b, epsilon = 1.0 / 65535.0);
    }
}

#[test]
fn test_writer_clips_out_of_range() {
    let image = PixelArray::new(1, 1, vec![-0.5, 0.5, 2.0]).unwrap();
    let mut encoded: Vec<u8> = Vec::new();
    StandardTiffWriter
        .write_image(&image, &mut encoded, &OutputConfig::default())
        .unwrap();

    let decoded = TiffPixelReader::new().read_pixels(&encoded).unwrap();
    assert_eq!(decoded.pixel(0, 0).unwrap()[0], 0.0);
    assert_eq!(decoded.pixel(0, 0).unwrap()[2], 1.0);
}
