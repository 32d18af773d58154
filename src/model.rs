//! JSON model persistence (feature: `serde`).
//!
//! The on-disk shape is the interchange format shared by every front end
//! that stores trained digit models:
//!
//! ```json
//! {
//!   "architecture": [784, 128, 10],
//!   "layers": [{"neurons": [{"bias": 0.1, "weights": [0.5]}]}]
//! }
//! ```
//!
//! Internal `Network`/`Neuron` types are never serialized directly; the
//! intermediate structs below keep the file format stable even if the
//! in-memory representation changes. Deserialization validates the layer
//! and weight counts against the architecture and that all parameters are
//! finite, then reconstructs the network through its initialization and
//! bulk-set accessors.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Activation, Error, Network, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedModel {
    /// Layer widths from input to output, `[784, hidden..., 10]` for digit
    /// models.
    pub architecture: Vec<usize>,
    pub layers: Vec<SerializedLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedLayer {
    pub neurons: Vec<SerializedNeuron>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedNeuron {
    pub bias: f64,
    pub weights: Vec<f64>,
}

impl SerializedModel {
    pub fn validate(&self) -> Result<()> {
        if self.architecture.len() < 2 {
            return Err(Error::InvalidData(
                "architecture must include input and output sizes".to_owned(),
            ));
        }
        if self.architecture.contains(&0) {
            return Err(Error::InvalidData(
                "all architecture sizes must be > 0".to_owned(),
            ));
        }
        if self.layers.len() != self.architecture.len() - 1 {
            return Err(Error::InvalidData(format!(
                "{} layers do not match an architecture of {} sizes",
                self.layers.len(),
                self.architecture.len()
            )));
        }

        for (i, layer) in self.layers.iter().enumerate() {
            if layer.neurons.len() != self.architecture[i + 1] {
                return Err(Error::InvalidData(format!(
                    "layer {i} has {} neurons, architecture says {}",
                    layer.neurons.len(),
                    self.architecture[i + 1]
                )));
            }

            for (j, neuron) in layer.neurons.iter().enumerate() {
                if neuron.weights.len() != self.architecture[i] {
                    return Err(Error::InvalidData(format!(
                        "layer {i} neuron {j} has {} weights, architecture says {}",
                        neuron.weights.len(),
                        self.architecture[i]
                    )));
                }
                if !neuron.bias.is_finite() || neuron.weights.iter().any(|w| !w.is_finite()) {
                    return Err(Error::InvalidData(format!(
                        "layer {i} neuron {j} has non-finite parameters"
                    )));
                }
            }
        }

        Ok(())
    }
}

impl TryFrom<&Network> for SerializedModel {
    type Error = Error;

    fn try_from(network: &Network) -> std::result::Result<Self, Error> {
        let architecture = network
            .architecture()
            .ok_or_else(|| Error::InvalidConfig("network is not configured".to_owned()))?;

        let layers = network
            .layers()
            .iter()
            .map(|layer| SerializedLayer {
                neurons: layer
                    .iter()
                    .map(|neuron| SerializedNeuron {
                        bias: neuron.bias(),
                        weights: neuron.weights().to_vec(),
                    })
                    .collect(),
            })
            .collect();

        Ok(Self {
            architecture,
            layers,
        })
    }
}

impl TryFrom<SerializedModel> for Network {
    type Error = Error;

    fn try_from(model: SerializedModel) -> std::result::Result<Self, Error> {
        model.validate()?;

        // The stored format does not record the activation kind; loaders
        // install sigmoid, matching the models the trainer writes.
        let mut network = Network::new();
        network.initialize_with_seed(&model.architecture, Activation::Sigmoid, 0)?;

        for (i, layer) in model.layers.iter().enumerate() {
            for (j, neuron) in layer.neurons.iter().enumerate() {
                network.set_neuron_weights(i, j, &neuron.weights)?;
                network.set_neuron_bias(i, j, neuron.bias)?;
            }
        }

        network.mark_trained();
        Ok(network)
    }
}

impl Network {
    /// Serializes the network to a pretty-printed JSON string.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        let model = SerializedModel::try_from(self)?;
        serde_json::to_string_pretty(&model)
            .map_err(|e| Error::InvalidData(format!("failed to serialize model: {e}")))
    }

    /// Serializes the network to a compact JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        let model = SerializedModel::try_from(self)?;
        serde_json::to_string(&model)
            .map_err(|e| Error::InvalidData(format!("failed to serialize model: {e}")))
    }

    /// Parses a network from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let model: SerializedModel = serde_json::from_str(s)
            .map_err(|e| Error::InvalidData(format!("failed to parse model json: {e}")))?;
        model.try_into()
    }

    /// Saves the network to a JSON file (pretty-printed).
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let s = self.to_json_string_pretty()?;
        let path = path.as_ref();
        std::fs::write(path, s)
            .map_err(|e| Error::InvalidData(format!("failed to write {}: {e}", path.display())))
    }

    /// Loads a network from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| Error::InvalidData(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json_str(&s)
    }
}
