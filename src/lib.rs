//! A small hand-written multilayer perceptron for classifying 28x28
//! grayscale digit images.
//!
//! `digit-mlp` is a from-scratch implementation of a dense feed-forward
//! network trained by plain per-sample backpropagation. It is designed to be
//! easy to read while keeping the numeric contracts explicit.
//!
//! # Design notes
//!
//! - The network is an ordered stack of layers of [`Neuron`] values; all
//!   inter-neuron data (activations, deltas) flows through buffers the
//!   [`Network`] owns.
//! - [`Network::forward`] returns the full per-layer activation history,
//!   because training reuses every intermediate vector. Inference-only
//!   callers read the last element.
//! - Randomness enters the model in exactly one place,
//!   [`Network::initialize`], through an injected `rand::Rng` — supply a
//!   seed for reproducible runs.
//! - Unit-level index and length mismatches degrade softly (reads yield
//!   `0.0`, writes are ignored) instead of failing; configuration, training
//!   and persistence entry points report errors through [`Result`].
//! - Everything is single-threaded and blocking: `train` runs all epochs to
//!   completion on the calling thread. Callers that need a responsive UI
//!   run it on their own worker thread.
//!
//! # Quick start
//!
//! ```rust
//! use digit_mlp::{Activation, Network};
//!
//! # fn main() -> digit_mlp::Result<()> {
//! let mut network = Network::new();
//! network.initialize_with_seed(&[2, 3, 2], Activation::Sigmoid, 0)?;
//!
//! let inputs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
//! let targets = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
//! let report = network.train(&inputs, &targets, 200, 0.1)?;
//! assert!(report.final_error() < report.epoch_errors[0]);
//!
//! let activations = network.forward(&inputs[0]);
//! let prediction = activations.last().unwrap();
//! assert_eq!(prediction.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! Trained models round-trip through a stable JSON shape (feature `serde`,
//! on by default): see the [`model`] module.

pub mod activation;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod mnist;
pub mod network;
pub mod neuron;

#[cfg(feature = "serde")]
pub mod model;

pub use activation::Activation;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use network::{Network, TrainReport};
pub use neuron::Neuron;

#[cfg(feature = "serde")]
pub use model::{SerializedLayer, SerializedModel, SerializedNeuron};
