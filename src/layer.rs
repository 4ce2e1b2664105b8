use std::fmt;

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Weight value used by the deterministic initialization mode.
const FIXED_WEIGHT: f64 = 0.5;

/// How connection weights are initialized at construction.
#[derive(Clone, Copy, Debug)]
pub enum WeightInit {
    /// Every weight is set to the same fixed value.
    Fixed,
    /// Weights are drawn from a normal distribution.
    Random { mean: f64, std_dev: f64 },
}

/// One computational unit. All scalar state is overwritten in place by each
/// forward/backward pass.
#[derive(Clone, Debug)]
pub struct Neuron {
    /// Raw accumulated input for classification modes, the activated value
    /// for regression/identity modes.
    pub activated_value: f64,
    /// Value after applying the transfer function.
    pub transfer_value: f64,
    /// Backpropagated training signal.
    pub error: f64,
    /// One weight per neuron in the next layer; empty for the output layer.
    pub weights_to_next_layer: Vec<f64>,
}

impl Neuron {
    fn new(weights_to_next_layer: Vec<f64>) -> Self {
        Self {
            activated_value: 0.0,
            transfer_value: 0.0,
            error: 0.0,
            weights_to_next_layer,
        }
    }
}

/// An ordered sequence of neurons sharing a single bias scalar.
///
/// The bias seeds the accumulator when this layer's own activations are
/// computed; one scalar per layer, not per neuron.
#[derive(Clone, Debug)]
pub struct Layer {
    pub neurons: Vec<Neuron>,
    pub bias: f64,
}

impl Layer {
    pub fn new(size: usize, bias: f64, next_size: usize, init: WeightInit) -> Self {
        assert!(size > 0, "layer must have at least one neuron");
        let mut rng = rand::thread_rng();
        let neurons = (0..size)
            .map(|_| Neuron::new(Self::initial_weights(next_size, init, &mut rng)))
            .collect();
        Self { neurons, bias }
    }

    fn initial_weights(next_size: usize, init: WeightInit, rng: &mut impl Rng) -> Vec<f64> {
        match init {
            WeightInit::Fixed => vec![FIXED_WEIGHT; next_size],
            WeightInit::Random { mean, std_dev } => {
                let normal = Normal::new(mean, std_dev).unwrap();
                (0..next_size).map(|_| normal.sample(rng)).collect()
            }
        }
    }

    pub fn size(&self) -> usize {
        self.neurons.len()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, neuron) in self.neurons.iter().enumerate() {
            writeln!(
                f,
                "Neuron {}: activated = {}, transfer = {}, error = {}, weights = {:?}",
                i + 1,
                neuron.activated_value,
                neuron.transfer_value,
                neuron.error,
                neuron.weights_to_next_layer
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_weights_match_next_layer_size() {
        let layer = Layer::new(3, 0.1, 4, WeightInit::Fixed);
        assert_eq!(layer.size(), 3);
        for neuron in &layer.neurons {
            assert_eq!(neuron.weights_to_next_layer.len(), 4);
            assert!(neuron
                .weights_to_next_layer
                .iter()
                .all(|&w| w == FIXED_WEIGHT));
        }
    }

    #[test]
    fn output_layer_has_no_outgoing_weights() {
        let layer = Layer::new(2, 0.0, 0, WeightInit::Fixed);
        for neuron in &layer.neurons {
            assert!(neuron.weights_to_next_layer.is_empty());
        }
    }

    #[test]
    fn random_weights_follow_requested_spread() {
        let layer = Layer::new(
            1,
            0.0,
            1000,
            WeightInit::Random {
                mean: 2.0,
                std_dev: 0.5,
            },
        );
        let weights = &layer.neurons[0].weights_to_next_layer;
        let mean = weights.iter().sum::<f64>() / weights.len() as f64;
        assert!((mean - 2.0).abs() < 0.1);
    }

    #[test]
    fn fresh_neurons_start_zeroed() {
        let layer = Layer::new(2, 0.3, 2, WeightInit::Fixed);
        for neuron in &layer.neurons {
            assert_eq!(neuron.activated_value, 0.0);
            assert_eq!(neuron.transfer_value, 0.0);
            assert_eq!(neuron.error, 0.0);
        }
    }

    #[test]
    #[should_panic]
    fn zero_sized_layer_is_rejected() {
        Layer::new(0, 0.0, 1, WeightInit::Fixed);
    }
}
