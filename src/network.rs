use std::fmt;

use crate::data::Point;
use crate::layer::{Layer, WeightInit};
use crate::transfer::Transfer;

/// A feed-forward network: input layer first, output layer last.
///
/// The network owns all neurons and weights and is mutated in place by every
/// training step; its shape never changes after construction.
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Build a network from ordered layer sizes and one bias per non-output
    /// layer. The output layer carries no outgoing weights and a zero bias.
    ///
    /// Panics if any layer size is zero or the bias list does not have
    /// exactly one entry fewer than the layer list.
    pub fn new(layer_sizes: &[usize], biases: &[f64], init: WeightInit) -> Self {
        assert_eq!(
            layer_sizes.len() - 1,
            biases.len(),
            "expected one bias per non-output layer"
        );
        let mut layers = Vec::with_capacity(layer_sizes.len());
        for (i, &size) in layer_sizes[..layer_sizes.len() - 1].iter().enumerate() {
            layers.push(Layer::new(size, biases[i], layer_sizes[i + 1], init));
        }
        layers.push(Layer::new(
            *layer_sizes.last().unwrap(),
            0.0,
            0,
            WeightInit::Fixed,
        ));
        Self { layers }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].size()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].size()
    }

    /// Drive one example through the network and return the output layer's
    /// transfer values. Only `activated_value`/`transfer_value` fields
    /// change; weights and biases are untouched.
    ///
    /// The input layer is itself activated: its `transfer_value` is the
    /// transfer function applied to the raw input component.
    pub fn forward_propagate(&mut self, point: &Point, transfer: Transfer) -> Vec<f64> {
        for (neuron, &x) in self.layers[0].neurons.iter_mut().zip(&point.x) {
            neuron.activated_value = x;
            neuron.transfer_value = transfer.apply(x);
        }
        let mut inputs: Vec<f64> = self.layers[0]
            .neurons
            .iter()
            .map(|n| n.transfer_value)
            .collect();
        for j in 1..self.layers.len() {
            let (before, rest) = self.layers.split_at_mut(j);
            let prev = &before[j - 1];
            let layer = &mut rest[0];
            let bias = layer.bias;
            let mut new_inputs = Vec::with_capacity(layer.size());
            for (k, neuron) in layer.neurons.iter_mut().enumerate() {
                let activated_value = prev
                    .neurons
                    .iter()
                    .zip(&inputs)
                    .fold(bias, |acc, (p, &t)| acc + p.weights_to_next_layer[k] * t);
                let transfer_value = transfer.apply(activated_value);
                neuron.activated_value = if transfer.is_classification() {
                    activated_value
                } else {
                    transfer_value
                };
                neuron.transfer_value = transfer_value;
                new_inputs.push(transfer_value);
            }
            inputs = new_inputs;
        }
        inputs
    }

    /// Propagate output error back toward the input layer and return the
    /// example's cost (sum of output-layer errors). Must follow a forward
    /// pass over the same example; only `error` fields change.
    pub fn backpropagate(&mut self, point: &Point, transfer: Transfer) -> f64 {
        let last = self
            .layers
            .last_mut()
            .expect("network always has an output layer");
        let mut errors = Vec::with_capacity(last.size());
        for (neuron, &y) in last.neurons.iter_mut().zip(&point.y) {
            let diff = y - neuron.transfer_value;
            let error = diff * diff * transfer.derivative(neuron.transfer_value);
            neuron.error = error;
            errors.push(error);
        }
        let cost: f64 = errors.iter().sum();
        for j in (0..self.layers.len() - 1).rev() {
            let layer = &mut self.layers[j];
            let mut new_errors = Vec::with_capacity(layer.size());
            for neuron in layer.neurons.iter_mut() {
                let weighted_error: f64 = errors
                    .iter()
                    .zip(&neuron.weights_to_next_layer)
                    .map(|(e, w)| e * w)
                    .sum();
                // Scaled by the activation itself, not its derivative.
                let error = weighted_error * transfer.apply(neuron.transfer_value);
                neuron.error = error;
                new_errors.push(error);
            }
            errors = new_errors;
        }
        cost
    }

    /// Adjust every connection weight by `rate * downstream error * input`.
    ///
    /// The update ascends the error signal as computed by `backpropagate`
    /// (the sign convention is load-bearing). The first layer's multiplier is
    /// the raw input vector; later layers use the previous layer's transfer
    /// values. With `normalize_lr` the rate is damped once per example by
    /// `lr / (1 + lr * sum(x))`.
    pub fn update_weights(&mut self, point: &Point, lr: f64, normalize_lr: bool) {
        let rate = if normalize_lr {
            lr / (1.0 + lr * point.x.iter().sum::<f64>())
        } else {
            lr
        };
        let mut inputs = point.x.clone();
        for j in 0..self.layers.len() - 1 {
            let (head, tail) = self.layers.split_at_mut(j + 1);
            let layer = &mut head[j];
            let next = &tail[0];
            for (k, next_neuron) in next.neurons.iter().enumerate() {
                let neuron_error = next_neuron.error;
                for (neuron, &input) in layer.neurons.iter_mut().zip(&inputs) {
                    neuron.weights_to_next_layer[k] += rate * neuron_error * input;
                }
            }
            inputs = next.neurons.iter().map(|n| n.transfer_value).collect();
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, layer) in self.layers.iter().enumerate() {
            writeln!(
                f,
                "Layer {}: {} Neurons, {} Weights to Next Layer",
                i + 1,
                layer.size(),
                layer.neurons[0].weights_to_next_layer.len()
            )?;
            writeln!(f, "{layer}")?;
        }
        Ok(())
    }
}
