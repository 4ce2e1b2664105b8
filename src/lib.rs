pub mod costlog;
pub mod data;
pub mod error;
pub mod layer;
pub mod network;
pub mod trainer;
pub mod transfer;

/// Convert a raw prediction vector into a class decision in place.
///
/// A single output is thresholded at 0.5. Longer vectors become one-hot at
/// the maximum value; the strict comparison keeps the earliest index on
/// ties.
pub fn classify(prediction: &mut [f64]) {
    if prediction.len() == 1 {
        prediction[0] = if prediction[0] >= 0.5 { 1.0 } else { 0.0 };
    } else {
        let mut max = prediction[0];
        let mut max_index = 0;
        prediction[0] = 1.0;
        for i in 1..prediction.len() {
            if prediction[i] > max {
                prediction[max_index] = 0.0;
                max = prediction[i];
                max_index = i;
                prediction[i] = 1.0;
            } else {
                prediction[i] = 0.0;
            }
        }
    }
}
