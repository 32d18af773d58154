//! MNIST-style CSV ingestion.
//!
//! Each data row is `label,p0,...,p783` for a 28x28 grayscale image, after
//! one header line. Pixels arrive in `[0, 255]` and are scaled to `[0, 1]`
//! here; the network itself never sees raw intensities. Labels become
//! one-hot target rows.

use std::fs;
use std::path::Path;

use crate::{Dataset, Error, Result};

pub const IMAGE_WIDTH: usize = 28;
pub const IMAGE_HEIGHT: usize = 28;
pub const IMAGE_SIZE: usize = IMAGE_WIDTH * IMAGE_HEIGHT;
pub const NUM_CLASSES: usize = 10;

/// Loads a labeled digit CSV file into a one-hot dataset.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| Error::InvalidData(format!("failed to read {}: {e}", path.display())))?;
    parse_csv(&text)
}

/// Parses CSV text in the digit format. Malformed rows are hard errors
/// carrying the 1-based line number.
pub fn parse_csv(text: &str) -> Result<Dataset> {
    let mut lines = text.lines();
    if lines.next().is_none() {
        return Err(Error::InvalidData(
            "csv is missing the header line".to_owned(),
        ));
    }

    let mut inputs = Vec::new();
    let mut targets = Vec::new();

    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2; // line 1 is the header

        let mut cells = line.split(',');
        let label_cell = cells.next().unwrap_or("");
        let label: usize = label_cell.trim().parse().map_err(|e| {
            Error::InvalidData(format!(
                "invalid label {label_cell:?} on line {line_no}: {e}"
            ))
        })?;
        if label >= NUM_CLASSES {
            return Err(Error::InvalidData(format!(
                "label {label} on line {line_no} is out of range 0..{NUM_CLASSES}"
            )));
        }

        let mut target = vec![0.0; NUM_CLASSES];
        target[label] = 1.0;

        let mut pixels = Vec::with_capacity(IMAGE_SIZE);
        for cell in cells {
            if pixels.len() == IMAGE_SIZE {
                return Err(Error::InvalidData(format!(
                    "line {line_no} has more than {IMAGE_SIZE} pixel values"
                )));
            }

            let value: f64 = cell.trim().parse().map_err(|e| {
                Error::InvalidData(format!("invalid pixel {cell:?} on line {line_no}: {e}"))
            })?;
            if !(0.0..=255.0).contains(&value) {
                return Err(Error::InvalidData(format!(
                    "pixel value {value} on line {line_no} is outside [0, 255]"
                )));
            }

            pixels.push(value / 255.0);
        }

        if pixels.len() != IMAGE_SIZE {
            return Err(Error::InvalidData(format!(
                "line {line_no} has {} pixel values, expected {IMAGE_SIZE}",
                pixels.len()
            )));
        }

        inputs.push(pixels);
        targets.push(target);
    }

    if inputs.is_empty() {
        return Err(Error::InvalidData("csv contains no samples".to_owned()));
    }

    Dataset::from_rows(inputs, targets)
}
