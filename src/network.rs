//! The feedforward network: an ordered stack of neuron layers, forward
//! propagation over the full activation history, and per-sample stochastic
//! backpropagation.
//!
//! All inter-neuron data (activations, deltas) flows through buffers owned
//! here; neurons never talk to each other directly.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::{Activation, Error, Neuron, Result};

#[derive(Debug, Clone, Default)]
pub struct Network {
    /// Evaluation order: first hidden layer first, output layer last.
    layers: Vec<Vec<Neuron>>,
    configured: bool,
    trained: bool,
}

/// Per-epoch mean squared errors from a completed training run.
///
/// One entry per epoch: the sum of squared output errors over the epoch's
/// samples divided by the sample count.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub epoch_errors: Vec<f64>,
}

impl TrainReport {
    /// Mean squared error of the last epoch.
    #[inline]
    pub fn final_error(&self) -> f64 {
        self.epoch_errors.last().copied().unwrap_or(0.0)
    }
}

impl Network {
    /// Creates an unconfigured, empty network.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    #[inline]
    pub fn is_trained(&self) -> bool {
        self.trained
    }

    #[inline]
    pub(crate) fn mark_trained(&mut self) {
        self.trained = true;
    }

    /// Read-only view of the layers in evaluation order.
    #[inline]
    pub fn layers(&self) -> &[Vec<Neuron>] {
        &self.layers
    }

    /// Layer widths including the input width, recomputed from the layer
    /// structure. `None` while unconfigured.
    pub fn architecture(&self) -> Option<Vec<usize>> {
        let input_dim = self.layers.first()?.first()?.num_inputs();

        let mut sizes = Vec::with_capacity(self.layers.len() + 1);
        sizes.push(input_dim);
        sizes.extend(self.layers.iter().map(Vec::len));
        Some(sizes)
    }

    /// (Re)installs an architecture, drawing every weight and bias
    /// independently from the standard normal distribution through `rng`.
    ///
    /// `architecture` lists layer widths from input to output and must hold
    /// at least two entries. This is the only place randomness enters the
    /// model; on error the network is left unconfigured. Re-initialization
    /// always clears the trained flag.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        architecture: &[usize],
        activation: Activation,
        rng: &mut R,
    ) -> Result<()> {
        self.layers.clear();
        self.configured = false;
        self.trained = false;

        if architecture.len() < 2 {
            return Err(Error::InvalidConfig(
                "architecture must include input and output sizes".to_owned(),
            ));
        }
        if architecture.contains(&0) {
            return Err(Error::InvalidConfig(
                "all layer sizes must be > 0".to_owned(),
            ));
        }

        self.layers.reserve(architecture.len() - 1);
        for w in architecture.windows(2) {
            let in_dim = w[0];
            let out_dim = w[1];

            let mut layer = Vec::with_capacity(out_dim);
            for _ in 0..out_dim {
                let mut neuron = Neuron::new(in_dim, activation);
                for weight in neuron.weights_mut() {
                    *weight = rng.sample(StandardNormal);
                }
                neuron.set_bias(rng.sample(StandardNormal));
                layer.push(neuron);
            }
            self.layers.push(layer);
        }

        self.configured = true;
        debug!("initialized network with architecture {architecture:?}");
        Ok(())
    }

    /// [`Network::initialize`] with a deterministic seed.
    pub fn initialize_with_seed(
        &mut self,
        architecture: &[usize],
        activation: Activation,
        seed: u64,
    ) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.initialize(architecture, activation, &mut rng)
    }

    /// Runs one forward pass and returns the full activation history:
    /// `activations[0]` is the input itself, followed by one vector per
    /// layer.
    ///
    /// Training reuses every intermediate vector; inference-only callers
    /// read the last one. Forward is a pure function of the current weights,
    /// so repeated calls with the same input are bit-identical. A
    /// wrong-length input is not rejected here; it degrades through the
    /// neuron-level fail-soft contract.
    pub fn forward(&self, input: &[f64]) -> Vec<Vec<f64>> {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(input.to_vec());

        for layer in &self.layers {
            let prev = activations.last().expect("history starts with the input");
            let next: Vec<f64> = layer.iter().map(|neuron| neuron.output(prev)).collect();
            activations.push(next);
        }

        activations
    }

    /// Trains the network with plain per-sample gradient descent.
    ///
    /// Samples are visited in order, every epoch; there is no shuffling and
    /// no batching, so a fixed initialization seed gives a reproducible run.
    /// Within a sample the deltas for every layer are computed against the
    /// forward snapshot first, and only then are any weights updated; the
    /// two-pass structure is load-bearing, updating mid-backward-pass would
    /// change the numbers.
    pub fn train(
        &mut self,
        inputs: &[Vec<f64>],
        targets: &[Vec<f64>],
        epochs: usize,
        learning_rate: f64,
    ) -> Result<TrainReport> {
        if !self.configured {
            return Err(Error::InvalidConfig(
                "network is not configured".to_owned(),
            ));
        }

        let architecture = self
            .architecture()
            .expect("configured network has an architecture");
        let input_dim = architecture[0];
        let output_dim = *architecture.last().expect("architecture is non-empty");

        if inputs.is_empty() {
            return Err(Error::InvalidData(
                "training data must not be empty".to_owned(),
            ));
        }
        if inputs.len() != targets.len() {
            return Err(Error::InvalidData(format!(
                "inputs/targets length mismatch: {} vs {}",
                inputs.len(),
                targets.len()
            )));
        }
        for (i, sample) in inputs.iter().enumerate() {
            if sample.len() != input_dim {
                return Err(Error::InvalidShape(format!(
                    "input {i} has len {}, expected {input_dim}",
                    sample.len()
                )));
            }
        }
        for (i, target) in targets.iter().enumerate() {
            if target.len() != output_dim {
                return Err(Error::InvalidShape(format!(
                    "target {i} has len {}, expected {output_dim}",
                    target.len()
                )));
            }
        }
        if epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be > 0".to_owned()));
        }
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(Error::InvalidConfig(
                "learning rate must be finite and > 0".to_owned(),
            ));
        }

        // Delta buffers are sized once and overwritten for every sample.
        let mut deltas: Vec<Vec<f64>> = self
            .layers
            .iter()
            .map(|layer| vec![0.0; layer.len()])
            .collect();
        let mut epoch_errors = Vec::with_capacity(epochs);
        let last = self.layers.len() - 1;

        for epoch in 0..epochs {
            let mut total_error = 0.0;

            for (input, target) in inputs.iter().zip(targets) {
                let activations = self.forward(input);

                // Backward sweep: deltas for every layer, computed entirely
                // against the forward snapshot.
                for i in (0..=last).rev() {
                    for j in 0..self.layers[i].len() {
                        let output = activations[i + 1][j];

                        let error = if i == last {
                            let error = target[j] - output;
                            total_error += error * error;
                            error
                        } else {
                            self.layers[i + 1]
                                .iter()
                                .zip(&deltas[i + 1])
                                .map(|(downstream, &delta)| delta * downstream.weight(j))
                                .sum()
                        };

                        deltas[i][j] =
                            error * self.layers[i][j].activation().derivative_from_output(output);
                    }
                }

                // Update pass: every neuron steps against the pre-update
                // activations of its input layer.
                for (i, layer) in self.layers.iter_mut().enumerate() {
                    for (j, neuron) in layer.iter_mut().enumerate() {
                        neuron.update_weights(&activations[i], learning_rate, deltas[i][j]);
                    }
                }
            }

            let mean_error = total_error / inputs.len() as f64;
            info!(
                "epoch {}/{}: mean squared error {:.6}",
                epoch + 1,
                epochs,
                mean_error
            );
            epoch_errors.push(mean_error);
        }

        self.trained = true;
        Ok(TrainReport { epoch_errors })
    }

    /// Bulk-replaces one neuron's weight vector (model import path).
    ///
    /// Fails without mutating anything when the indices are out of range or
    /// the vector length does not match the neuron's weight count.
    pub fn set_neuron_weights(
        &mut self,
        layer_index: usize,
        neuron_index: usize,
        weights: &[f64],
    ) -> Result<()> {
        let neuron = self
            .layers
            .get_mut(layer_index)
            .and_then(|layer| layer.get_mut(neuron_index))
            .ok_or_else(|| {
                Error::InvalidShape(format!(
                    "no neuron at layer {layer_index}, index {neuron_index}"
                ))
            })?;

        if weights.len() != neuron.num_inputs() {
            return Err(Error::InvalidShape(format!(
                "weight count {} does not match neuron input count {}",
                weights.len(),
                neuron.num_inputs()
            )));
        }

        neuron.weights_mut().copy_from_slice(weights);
        Ok(())
    }

    /// Sets one neuron's bias (model import path). Fails without mutating
    /// anything when the indices are out of range.
    pub fn set_neuron_bias(
        &mut self,
        layer_index: usize,
        neuron_index: usize,
        bias: f64,
    ) -> Result<()> {
        let neuron = self
            .layers
            .get_mut(layer_index)
            .and_then(|layer| layer.get_mut(neuron_index))
            .ok_or_else(|| {
                Error::InvalidShape(format!(
                    "no neuron at layer {layer_index}, index {neuron_index}"
                ))
            })?;

        neuron.set_bias(bias);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_network(seed: u64) -> Network {
        let mut network = Network::new();
        network
            .initialize_with_seed(&[2, 3, 2], Activation::Sigmoid, seed)
            .unwrap();
        network
    }

    #[test]
    fn initialize_sizes_layers_per_architecture() {
        for architecture in [vec![2, 3], vec![3, 4, 2], vec![5, 7, 6, 3]] {
            let mut network = Network::new();
            network
                .initialize_with_seed(&architecture, Activation::Sigmoid, 0)
                .unwrap();

            assert!(network.is_configured());
            assert!(!network.is_trained());
            assert_eq!(network.layers().len(), architecture.len() - 1);
            for (i, layer) in network.layers().iter().enumerate() {
                assert_eq!(layer.len(), architecture[i + 1]);
                for neuron in layer {
                    assert_eq!(neuron.num_inputs(), architecture[i]);
                }
            }
            assert_eq!(network.architecture(), Some(architecture));
        }
    }

    #[test]
    fn initialize_rejects_short_architectures() {
        let mut network = Network::new();

        assert!(network
            .initialize_with_seed(&[], Activation::Sigmoid, 0)
            .is_err());
        assert!(network
            .initialize_with_seed(&[4], Activation::Sigmoid, 0)
            .is_err());
        assert!(network
            .initialize_with_seed(&[4, 0, 2], Activation::Sigmoid, 0)
            .is_err());

        assert!(!network.is_configured());
        assert!(network.layers().is_empty());
        assert_eq!(network.architecture(), None);
    }

    #[test]
    fn seeded_initialization_is_deterministic() {
        let a = toy_network(123);
        let b = toy_network(123);
        let c = toy_network(124);

        let input = [0.3, -0.7];
        assert_eq!(a.forward(&input), b.forward(&input));
        assert_ne!(a.forward(&input), c.forward(&input));
    }

    #[test]
    fn forward_returns_full_activation_history() {
        let network = toy_network(0);
        let input = vec![0.25, -0.5];

        let activations = network.forward(&input);

        assert_eq!(activations.len(), 3);
        assert_eq!(activations[0], input);
        assert_eq!(activations[1].len(), 3);
        assert_eq!(activations[2].len(), 2);
        for a in activations.iter().skip(1).flatten() {
            assert!(*a > 0.0 && *a < 1.0);
        }
    }

    #[test]
    fn forward_is_idempotent_without_weight_changes() {
        let network = toy_network(9);
        let input = [0.1, 0.9];

        assert_eq!(network.forward(&input), network.forward(&input));
    }

    #[test]
    fn train_requires_a_configured_network() {
        let mut network = Network::new();

        let err = network.train(&[vec![0.0]], &[vec![0.0]], 1, 0.1);
        assert!(err.is_err());
        assert!(!network.is_trained());
    }

    #[test]
    fn train_validates_shapes_and_parameters() {
        let mut network = toy_network(0);
        let inputs = vec![vec![1.0, 0.0]];
        let targets = vec![vec![1.0, 0.0]];

        assert!(network.train(&[], &[], 1, 0.1).is_err());
        assert!(network.train(&inputs, &[], 1, 0.1).is_err());
        assert!(network
            .train(&[vec![1.0, 0.0, 0.0]], &targets, 1, 0.1)
            .is_err());
        assert!(network.train(&inputs, &[vec![1.0]], 1, 0.1).is_err());
        assert!(network.train(&inputs, &targets, 0, 0.1).is_err());
        assert!(network.train(&inputs, &targets, 1, 0.0).is_err());
        assert!(network.train(&inputs, &targets, 1, f64::NAN).is_err());
        assert!(!network.is_trained());
    }

    #[test]
    fn train_reduces_error_on_a_separable_toy_set() {
        let mut network = toy_network(42);
        let inputs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let targets = vec![vec![1.0, 0.0], vec![0.0, 1.0]];

        let report = network.train(&inputs, &targets, 200, 0.1).unwrap();

        assert_eq!(report.epoch_errors.len(), 200);
        assert!(report.final_error() < report.epoch_errors[0]);
        assert!(network.is_trained());
    }

    #[test]
    fn reinitialization_clears_the_trained_flag() {
        let mut network = toy_network(0);
        let inputs = vec![vec![1.0, 0.0]];
        let targets = vec![vec![1.0, 0.0]];
        network.train(&inputs, &targets, 1, 0.1).unwrap();
        assert!(network.is_trained());

        network
            .initialize_with_seed(&[2, 3, 2], Activation::Sigmoid, 1)
            .unwrap();
        assert!(network.is_configured());
        assert!(!network.is_trained());
    }

    #[test]
    fn set_neuron_weights_checks_indices_and_length() {
        let mut network = toy_network(0);
        let before = network.layers()[0][0].weights().to_vec();

        assert!(network.set_neuron_weights(5, 0, &[0.0, 0.0]).is_err());
        assert!(network.set_neuron_weights(0, 9, &[0.0, 0.0]).is_err());
        assert!(network.set_neuron_weights(0, 0, &[0.0, 0.0, 0.0]).is_err());
        assert_eq!(network.layers()[0][0].weights(), before.as_slice());

        network.set_neuron_weights(0, 0, &[1.5, -1.5]).unwrap();
        assert_eq!(network.layers()[0][0].weights(), &[1.5, -1.5]);
    }

    #[test]
    fn set_neuron_bias_checks_indices() {
        let mut network = toy_network(0);

        assert!(network.set_neuron_bias(5, 0, 1.0).is_err());
        assert!(network.set_neuron_bias(1, 9, 1.0).is_err());

        network.set_neuron_bias(1, 0, 0.75).unwrap();
        assert_eq!(network.layers()[1][0].bias(), 0.75);
    }
}
