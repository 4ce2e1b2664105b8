use std::collections::BTreeMap;

use log::{debug, info};

use crate::classify;
use crate::costlog::CostLog;
use crate::data::{DatasetMode, DatasetProvider, Point};
use crate::error::Error;
use crate::network::Network;
use crate::transfer::Transfer;

/// Running average cost below which training stops.
const CONVERGENCE_THRESHOLD: f64 = 0.001;
/// Stream size requested from the dataset provider on regeneration.
const REGENERATION_BATCH: usize = 500_000;
/// Global step count below which an exhausted, non-regenerating stream is
/// retried with a reset running average.
const RETRY_CAP: usize = 250_000;
/// Absolute deviation within which a regression prediction counts as correct.
const REGRESSION_TOLERANCE: f64 = 0.01;

/// Parameters for one training call.
#[derive(Clone, Copy, Debug)]
pub struct TrainConfig {
    pub transfer: Transfer,
    pub learning_rate: f64,
    pub normalize_lr: bool,
    pub dataset_mode: DatasetMode,
}

/// Terminal state of a training call. Training fails only by numerical
/// divergence; slow convergence retries internally instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrainOutcome {
    Converged { steps: usize, average_cost: f64 },
    Diverged { steps: usize },
}

impl TrainOutcome {
    pub fn converged(&self) -> bool {
        matches!(self, TrainOutcome::Converged { .. })
    }

    pub fn steps(&self) -> usize {
        match *self {
            TrainOutcome::Converged { steps, .. } | TrainOutcome::Diverged { steps } => steps,
        }
    }
}

/// Aggregate result of evaluating a network over a stream of examples.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
    /// Mean of the per-example output quasi-loss across the stream.
    pub mean_cost: f64,
    /// Predicted-class histogram; empty for regression/identity modes.
    pub class_counts: BTreeMap<usize, usize>,
}

impl Evaluation {
    pub fn percent_correct(&self) -> f64 {
        100.0 * self.correct as f64 / self.total as f64
    }
}

impl Network {
    /// Run the training loop over `dataset` until the running average cost
    /// drops below the convergence threshold or becomes NaN.
    ///
    /// On exhausting the stream without convergence the loop either requests
    /// a fresh stream from `provider` (when the dataset mode allows
    /// regeneration) or, below the retry cap, resets the running average and
    /// makes another pass over the same stream. Past the cap the loop exits.
    ///
    /// Each step appends one line to `log`; I/O failures surface as
    /// `Error::Io`. Divergence is reported through the returned outcome,
    /// never as an error.
    pub fn train(
        &mut self,
        mut dataset: Vec<Point>,
        config: &TrainConfig,
        provider: &mut dyn DatasetProvider,
        log: &mut CostLog,
    ) -> Result<TrainOutcome, Error> {
        assert!(!dataset.is_empty(), "training stream must not be empty");
        assert_eq!(
            dataset[0].x.len(),
            self.input_size(),
            "example input arity must match the input layer"
        );
        let mut step: usize = 1;
        let mut total_cost = 0.0;
        let mut average_cost = 1.0;
        let mut cost = 0.0;
        while average_cost >= CONVERGENCE_THRESHOLD && !average_cost.is_nan() {
            for point in &dataset {
                // NaN also fails this check and ends the pass.
                if !(average_cost >= CONVERGENCE_THRESHOLD) {
                    break;
                }
                self.forward_propagate(point, config.transfer);
                cost = self.backpropagate(point, config.transfer);
                total_cost += cost.abs();
                average_cost = total_cost / step as f64;
                debug!("iteration {step}, cost {average_cost}");
                self.update_weights(point, config.learning_rate, config.normalize_lr);
                log.record(step, average_cost)?;
                step += 1;
            }
            // Convergence and divergence are both terminal; the retry
            // machinery only handles streams exhausted short of either.
            if average_cost.is_nan() || average_cost < CONVERGENCE_THRESHOLD {
                break;
            }
            if config.dataset_mode.allows_regeneration() {
                info!("generating new dataset");
                let input_arity = dataset[0].x.len();
                let output_arity = dataset[0].y.len();
                dataset = provider.synthesize(REGENERATION_BATCH, input_arity, output_arity);
                if dataset.is_empty() {
                    break;
                }
            } else if step < RETRY_CAP {
                average_cost = 1.0;
                total_cost = 0.0;
            } else {
                break;
            }
        }
        log.flush()?;
        debug!("{self}");
        let steps = step - 1;
        let outcome = if cost.is_nan() {
            TrainOutcome::Diverged { steps }
        } else {
            info!("weights trained after {steps} iterations - make predictions");
            TrainOutcome::Converged {
                steps,
                average_cost,
            }
        };
        Ok(outcome)
    }

    /// Forward-propagate every example and report correctness.
    ///
    /// Classification modes run predictions through the decision rule and
    /// compare exactly against one-hot targets; regression/identity modes
    /// accept predictions within a small absolute tolerance of the target.
    /// The per-example cost is the output layer's quasi-loss recomputed from
    /// the fresh prediction.
    pub fn predict(&mut self, dataset: &[Point], transfer: Transfer) -> Evaluation {
        let mut total_cost = 0.0;
        let mut correct = 0;
        let mut class_counts = BTreeMap::new();
        for (i, point) in dataset.iter().enumerate() {
            let mut prediction = self.forward_propagate(point, transfer);
            total_cost += prediction
                .iter()
                .zip(&point.y)
                .map(|(&z, &y)| {
                    let diff = y - z;
                    diff * diff * transfer.derivative(z)
                })
                .sum::<f64>();
            debug!("iteration {}, y = {:?}, z = {:?}", i + 1, point.y, prediction);
            if transfer.is_classification() {
                classify(&mut prediction);
                debug!("predict: {prediction:?}");
                if prediction == point.y {
                    correct += 1;
                }
                *class_counts.entry(predicted_label(&prediction)).or_insert(0) += 1;
            } else if (prediction[0] - point.y[0]).abs() <= REGRESSION_TOLERANCE {
                correct += 1;
            }
        }
        let evaluation = Evaluation {
            correct,
            total: dataset.len(),
            mean_cost: total_cost / dataset.len() as f64,
            class_counts,
        };
        info!(
            "total correct: {} ({}%)",
            evaluation.correct,
            evaluation.percent_correct()
        );
        evaluation
    }
}

/// Class label encoded by a classified prediction vector: the value itself
/// for binary outputs, the hot index otherwise.
fn predicted_label(prediction: &[f64]) -> usize {
    if prediction.len() == 1 {
        prediction[0] as usize
    } else {
        prediction
            .iter()
            .position(|&v| v == 1.0)
            .unwrap_or_default()
    }
}
