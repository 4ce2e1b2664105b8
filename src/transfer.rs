use std::str::FromStr;

use crate::error::Error;

/// Transfer function selected for a whole forward/backward pass.
///
/// The `_regression` variants compute the same math as their base modes but
/// mark the outputs as continuous targets, which changes what
/// `activated_value` stores during forward propagation and how predictions
/// are judged during evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transfer {
    Relu,
    ReluRegression,
    Sigmoid,
    SigmoidRegression,
    Tanh,
    TanhRegression,
    Identity,
}

impl Transfer {
    pub fn apply(self, z: f64) -> f64 {
        match self {
            Transfer::Relu | Transfer::ReluRegression => z.max(0.0),
            Transfer::Sigmoid | Transfer::SigmoidRegression => 1.0 / (1.0 + (-z).exp()),
            Transfer::Tanh | Transfer::TanhRegression => z.tanh(),
            Transfer::Identity => z,
        }
    }

    /// Derivative evaluated at the *activated* value, not the raw input.
    pub fn derivative(self, activated: f64) -> f64 {
        match self {
            Transfer::Relu | Transfer::ReluRegression => {
                if activated > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Transfer::Sigmoid | Transfer::SigmoidRegression => activated * (1.0 - activated),
            Transfer::Tanh | Transfer::TanhRegression => 1.0 - activated.tanh().powi(2),
            Transfer::Identity => 1.0,
        }
    }

    pub fn is_regression(self) -> bool {
        matches!(
            self,
            Transfer::ReluRegression | Transfer::SigmoidRegression | Transfer::TanhRegression
        )
    }

    /// Classification modes store the raw accumulated sum in
    /// `activated_value` and run predictions through the decision rule;
    /// regression and identity modes do neither.
    pub fn is_classification(self) -> bool {
        !self.is_regression() && self != Transfer::Identity
    }
}

impl FromStr for Transfer {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "relu" => Ok(Transfer::Relu),
            "relu_regression" => Ok(Transfer::ReluRegression),
            "sigmoid" => Ok(Transfer::Sigmoid),
            "sigmoid_regression" => Ok(Transfer::SigmoidRegression),
            "tanh" => Ok(Transfer::Tanh),
            "tanh_regression" => Ok(Transfer::TanhRegression),
            "none" => Ok(Transfer::Identity),
            _ => Err(Error::UnknownTransfer(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_apply() {
        let inputs = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let expected = [
            0.1192029220221175,
            0.2689414213699951,
            0.5000000000000000,
            0.7310585786300049,
            0.8807970779778823,
        ];
        for (&z, &want) in inputs.iter().zip(expected.iter()) {
            assert_relative_eq!(Transfer::Sigmoid.apply(z), want, epsilon = 1e-12);
        }
    }

    #[test]
    fn sigmoid_derivative_of_activated_value() {
        assert_relative_eq!(Transfer::Sigmoid.derivative(0.5), 0.25);
        assert_relative_eq!(Transfer::Sigmoid.derivative(0.0), 0.0);
        assert_relative_eq!(Transfer::Sigmoid.derivative(1.0), 0.0);
    }

    #[test]
    fn relu_apply_and_derivative() {
        assert_relative_eq!(Transfer::Relu.apply(-2.0), 0.0);
        assert_relative_eq!(Transfer::Relu.apply(3.0), 3.0);
        assert_relative_eq!(Transfer::Relu.derivative(0.0), 0.0);
        assert_relative_eq!(Transfer::Relu.derivative(1.5), 1.0);
    }

    #[test]
    fn tanh_apply_and_derivative() {
        assert_relative_eq!(Transfer::Tanh.apply(0.0), 0.0);
        assert_relative_eq!(Transfer::Tanh.derivative(0.0), 1.0);
    }

    #[test]
    fn identity_is_transparent() {
        assert_relative_eq!(Transfer::Identity.apply(-1.25), -1.25);
        assert_relative_eq!(Transfer::Identity.derivative(42.0), 1.0);
    }

    #[test]
    fn regression_variants_share_math() {
        assert_relative_eq!(
            Transfer::Sigmoid.apply(0.3),
            Transfer::SigmoidRegression.apply(0.3)
        );
        assert_relative_eq!(
            Transfer::Tanh.derivative(0.3),
            Transfer::TanhRegression.derivative(0.3)
        );
    }

    #[test]
    fn mode_flags() {
        assert!(Transfer::Sigmoid.is_classification());
        assert!(!Transfer::Sigmoid.is_regression());
        assert!(Transfer::SigmoidRegression.is_regression());
        assert!(!Transfer::SigmoidRegression.is_classification());
        assert!(!Transfer::Identity.is_classification());
        assert!(!Transfer::Identity.is_regression());
    }

    #[test]
    fn parse_mode_names() {
        assert_eq!("relu".parse::<Transfer>().unwrap(), Transfer::Relu);
        assert_eq!(
            "tanh_regression".parse::<Transfer>().unwrap(),
            Transfer::TanhRegression
        );
        assert_eq!("none".parse::<Transfer>().unwrap(), Transfer::Identity);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!("bogus".parse::<Transfer>().is_err());
    }
}
