//! Evaluation helpers.
//!
//! These read network outputs and never participate in backprop. Predicted
//! and expected classes come from the argmax over an output row and its
//! one-hot target.

use crate::{Dataset, Error, Network, Result};

/// Index of the largest value, first occurrence on ties. `None` for an
/// empty slice.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Fraction of samples whose argmax prediction matches the one-hot target.
pub fn accuracy(network: &Network, data: &Dataset) -> Result<f64> {
    check_evaluation_shapes(network, data)?;

    let mut correct = 0_usize;
    for idx in 0..data.len() {
        let activations = network.forward(data.input(idx));
        let output = activations.last().expect("forward history is non-empty");
        if argmax(output) == argmax(data.target(idx)) {
            correct += 1;
        }
    }

    Ok(correct as f64 / data.len() as f64)
}

/// Mean squared error over a dataset: per-sample sum of squared output
/// errors, averaged over samples. The same quantity the training loop
/// reports per epoch.
pub fn mean_squared_error(network: &Network, data: &Dataset) -> Result<f64> {
    check_evaluation_shapes(network, data)?;

    let mut total = 0.0;
    for idx in 0..data.len() {
        let activations = network.forward(data.input(idx));
        let output = activations.last().expect("forward history is non-empty");
        for (&t, &o) in data.target(idx).iter().zip(output) {
            let error = t - o;
            total += error * error;
        }
    }

    Ok(total / data.len() as f64)
}

fn check_evaluation_shapes(network: &Network, data: &Dataset) -> Result<()> {
    let architecture = network
        .architecture()
        .ok_or_else(|| Error::InvalidConfig("network is not configured".to_owned()))?;
    let input_dim = architecture[0];
    let output_dim = *architecture.last().expect("architecture is non-empty");

    if data.input_dim() != input_dim {
        return Err(Error::InvalidShape(format!(
            "dataset input_dim {} does not match network input size {input_dim}",
            data.input_dim()
        )));
    }
    if data.target_dim() != output_dim {
        return Err(Error::InvalidShape(format!(
            "dataset target_dim {} does not match network output size {output_dim}",
            data.target_dim()
        )));
    }

    Ok(())
}
