use serde::{Serialize, Deserialize};

use crate::activation::activation::Activation;
use crate::error::{Error, Result};
use crate::math::gaussian::Gaussian;
use crate::network::network::Network;

/// A fully serializable description of a network architecture: per-layer node
/// counts and the activation assigned to each layer index.
///
/// `NetworkTopology` can be saved to / loaded from JSON independently of any
/// trained weights, so architecture configurations can be stored and shared
/// before training starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkTopology {
    /// Node counts, input layer first. Must have at least 2 entries.
    pub layer_sizes: Vec<usize>,
    /// One activation per layer index; entry 0 is the input stage and is
    /// expected to be `Identity`.
    pub activations: Vec<Activation>,
}

impl NetworkTopology {
    pub fn validate(&self) -> Result<()> {
        if self.layer_sizes.len() < 2 {
            return Err(Error::InvalidConfig(format!(
                "a network needs at least 2 layers, got {}",
                self.layer_sizes.len()
            )));
        }
        if self.activations.len() != self.layer_sizes.len() {
            return Err(Error::InvalidConfig(format!(
                "expected {} activations, got {}",
                self.layer_sizes.len(),
                self.activations.len()
            )));
        }
        Ok(())
    }

    /// Serializes the topology to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a topology from a JSON file previously written by
    /// `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<NetworkTopology> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

impl Network {
    /// Builds a freshly initialized network from a topology description.
    pub fn from_topology(topology: &NetworkTopology, gaussian: &mut Gaussian) -> Result<Network> {
        topology.validate()?;
        let mut net = Network::new(&topology.layer_sizes, Activation::Identity, gaussian)?;
        for (layer, &activation) in topology.activations.iter().enumerate().skip(1) {
            net.set_activation(layer, activation)?;
        }
        Ok(net)
    }

    /// The architecture description of this network (weights excluded).
    pub fn topology(&self) -> NetworkTopology {
        NetworkTopology {
            layer_sizes: self.layer_sizes().to_vec(),
            activations: self.activations().to_vec(),
        }
    }
}
