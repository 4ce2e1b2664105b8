use std::str::FromStr;

use rand::Rng;

use crate::error::Error;

/// One labeled training example: an input vector and a target vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Point {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y }
    }
}

/// Policy tag attached to a training stream. Only the synthesized modes let
/// the training loop replace an exhausted stream with freshly generated data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetMode {
    /// Caller-supplied data; never regenerated.
    Static,
    /// Max-index labels over a fixed stream; never regenerated.
    MaxIndexConst,
    /// Synthesized max-index classification data.
    MaxIndex,
    /// Synthesized mean-of-inputs regression data.
    Sum,
}

impl DatasetMode {
    pub fn allows_regeneration(self) -> bool {
        matches!(self, DatasetMode::MaxIndex | DatasetMode::Sum)
    }
}

impl FromStr for DatasetMode {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "none" => Ok(DatasetMode::Static),
            "max_index_const" => Ok(DatasetMode::MaxIndexConst),
            "max_index" => Ok(DatasetMode::MaxIndex),
            "sum" => Ok(DatasetMode::Sum),
            _ => Err(Error::UnknownDatasetMode(name.to_string())),
        }
    }
}

/// External collaborator that synthesizes labeled examples on demand.
/// Invoked only when the training loop exhausts its stream without
/// converging and the dataset mode allows regeneration.
pub trait DatasetProvider {
    fn synthesize(&mut self, count: usize, input_arity: usize, output_arity: usize) -> Vec<Point>;
}

/// Provider for dataset modes that never regenerate.
pub struct NoSynthesis;

impl DatasetProvider for NoSynthesis {
    fn synthesize(&mut self, _count: usize, _input_arity: usize, _output_arity: usize) -> Vec<Point> {
        Vec::new()
    }
}

/// Generates labeled examples for the synthesized dataset modes.
pub struct SyntheticData {
    mode: DatasetMode,
}

impl SyntheticData {
    pub fn new(mode: DatasetMode) -> Self {
        Self { mode }
    }
}

impl DatasetProvider for SyntheticData {
    fn synthesize(&mut self, count: usize, input_arity: usize, output_arity: usize) -> Vec<Point> {
        generate_dataset(count, input_arity, output_arity, self.mode)
    }
}

/// Synthesize `count` examples with uniform [0, 1) inputs, labeled by the
/// dataset mode's rule. `Static` has no rule and yields an empty stream.
pub fn generate_dataset(
    count: usize,
    input_arity: usize,
    output_arity: usize,
    mode: DatasetMode,
) -> Vec<Point> {
    if mode == DatasetMode::Static {
        return Vec::new();
    }
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let x: Vec<f64> = (0..input_arity).map(|_| rng.gen::<f64>()).collect();
            let y = match mode {
                DatasetMode::MaxIndex | DatasetMode::MaxIndexConst => {
                    let mut y = vec![0.0; output_arity];
                    y[argmax(&x).min(output_arity - 1)] = 1.0;
                    y
                }
                // Mean keeps the target inside the unit interval, reachable
                // by sigmoid outputs.
                DatasetMode::Sum => {
                    let mean = x.iter().sum::<f64>() / input_arity as f64;
                    vec![mean; output_arity]
                }
                DatasetMode::Static => unreachable!(),
            };
            Point::new(x, y)
        })
        .collect()
}

fn argmax(values: &[f64]) -> usize {
    let mut max_index = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[max_index] {
            max_index = i;
        }
    }
    max_index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dataset_modes() {
        assert_eq!("none".parse::<DatasetMode>().unwrap(), DatasetMode::Static);
        assert_eq!(
            "max_index_const".parse::<DatasetMode>().unwrap(),
            DatasetMode::MaxIndexConst
        );
        assert_eq!(
            "max_index".parse::<DatasetMode>().unwrap(),
            DatasetMode::MaxIndex
        );
        assert_eq!("sum".parse::<DatasetMode>().unwrap(), DatasetMode::Sum);
        assert!("bogus".parse::<DatasetMode>().is_err());
    }

    #[test]
    fn regeneration_eligibility() {
        assert!(!DatasetMode::Static.allows_regeneration());
        assert!(!DatasetMode::MaxIndexConst.allows_regeneration());
        assert!(DatasetMode::MaxIndex.allows_regeneration());
        assert!(DatasetMode::Sum.allows_regeneration());
    }

    #[test]
    fn max_index_labels_are_one_hot_at_argmax() {
        let dataset = generate_dataset(50, 3, 3, DatasetMode::MaxIndex);
        assert_eq!(dataset.len(), 50);
        for point in &dataset {
            assert_eq!(point.x.len(), 3);
            assert_eq!(point.y.len(), 3);
            assert_eq!(point.y.iter().filter(|&&v| v == 1.0).count(), 1);
            assert_eq!(point.y[argmax(&point.x)], 1.0);
        }
    }

    #[test]
    fn sum_labels_are_input_means() {
        let dataset = generate_dataset(20, 4, 1, DatasetMode::Sum);
        for point in &dataset {
            let mean = point.x.iter().sum::<f64>() / 4.0;
            assert_eq!(point.y, vec![mean]);
            assert!((0.0..1.0).contains(&mean));
        }
    }

    #[test]
    fn argmax_keeps_first_maximum() {
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.2, 0.5, 0.3]), 1);
    }

    #[test]
    fn static_mode_synthesizes_nothing() {
        assert!(generate_dataset(10, 2, 1, DatasetMode::Static).is_empty());
        assert!(NoSynthesis.synthesize(10, 2, 1).is_empty());
    }
}
