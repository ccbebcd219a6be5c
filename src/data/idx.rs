//! Loader for the binary IDX labeled-image format (the MNIST file layout).
//!
//! Records come as two paired big-endian streams: a bulk images stream and a
//! labels stream sharing a record count. Pixel bytes are normalized to
//! `[0, 1]`; label bytes expand to one-hot vectors of length
//! [`OUTPUT_CLASSES`]. Any header violation is a fatal `Error::Format` and no
//! partial dataset is produced.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::data::dataset::{DataPoint, DataSet};
use crate::error::{Error, Result};
use crate::math::vector::Vector;

/// Magic header of an images stream (IDX3: count + two record dimensions).
pub const IMAGES_MAGIC: u32 = 0x0000_0803;
/// Magic header of a labels stream (IDX1: count only).
pub const LABELS_MAGIC: u32 = 0x0000_0801;
/// Number of label classes; labels are one byte each, `< OUTPUT_CLASSES`.
pub const OUTPUT_CLASSES: usize = 10;

/// Parses one images/labels stream pair into data points.
///
/// `input_len` is the expected per-record input length; the images stream's
/// dimension product must equal it.
pub fn load_pair<I: Read, L: Read>(
    mut images: I,
    mut labels: L,
    input_len: usize,
) -> Result<Vec<DataPoint>> {
    let magic = read_u32_be(&mut images)?;
    if magic != IMAGES_MAGIC {
        return Err(Error::Format(format!(
            "images magic mismatch: expected {IMAGES_MAGIC:#010x}, got {magic:#010x}"
        )));
    }
    let magic = read_u32_be(&mut labels)?;
    if magic != LABELS_MAGIC {
        return Err(Error::Format(format!(
            "labels magic mismatch: expected {LABELS_MAGIC:#010x}, got {magic:#010x}"
        )));
    }

    let image_count = read_u32_be(&mut images)? as usize;
    let label_count = read_u32_be(&mut labels)? as usize;
    if image_count != label_count {
        return Err(Error::Format(format!(
            "record count mismatch: {image_count} images vs {label_count} labels"
        )));
    }

    let rows = read_u32_be(&mut images)? as usize;
    let cols = read_u32_be(&mut images)? as usize;
    if rows * cols != input_len {
        return Err(Error::Format(format!(
            "record dimensions {rows}×{cols} do not match expected input length {input_len}"
        )));
    }

    let mut pixel_bytes = vec![0u8; image_count * input_len];
    images.read_exact(&mut pixel_bytes)?;

    let mut label_bytes = vec![0u8; label_count];
    labels.read_exact(&mut label_bytes)?;

    let mut data = Vec::with_capacity(image_count);
    for (chunk, &label) in pixel_bytes.chunks(input_len).zip(label_bytes.iter()) {
        if label as usize >= OUTPUT_CLASSES {
            return Err(Error::Format(format!(
                "label {label} out of range 0..{OUTPUT_CLASSES}"
            )));
        }

        let mut input = Vector::zeros(input_len);
        for (j, &byte) in chunk.iter().enumerate() {
            input[j] = byte as f64 / 255.0;
        }

        let mut output = Vector::zeros(OUTPUT_CLASSES);
        output[label as usize] = 1.0;

        data.push(DataPoint::new(input, output));
    }

    Ok(data)
}

/// `load_pair` over files on disk.
pub fn load_pair_from_files(
    images_path: &Path,
    labels_path: &Path,
    input_len: usize,
) -> Result<Vec<DataPoint>> {
    let images = BufReader::new(File::open(images_path)?);
    let labels = BufReader::new(File::open(labels_path)?);
    load_pair(images, labels, input_len)
}

impl DataSet {
    /// Loads a full train/test split from four IDX files.
    pub fn load_idx(
        train_images: &Path,
        train_labels: &Path,
        test_images: &Path,
        test_labels: &Path,
        input_len: usize,
    ) -> Result<DataSet> {
        Ok(DataSet {
            training_set: load_pair_from_files(train_images, train_labels, input_len)?,
            test_set: load_pair_from_files(test_images, test_labels, input_len)?,
        })
    }
}

fn read_u32_be<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}
