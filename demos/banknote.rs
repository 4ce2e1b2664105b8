use std::path::Path;

use axon::costlog::CostLog;
use axon::data::{DatasetMode, NoSynthesis, Point};
use axon::layer::WeightInit;
use axon::network::Network;
use axon::trainer::TrainConfig;
use axon::transfer::Transfer;
use csv::ReaderBuilder;

// Banknote authentication dataset, available here:
// https://archive.ics.uci.edu/dataset/267/banknote+authentication
// Four continuous features, binary class label in the last column.
fn load_banknote(file_path: impl AsRef<Path>) -> Vec<Point> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(file_path)
        .expect("cannot open dataset");
    let mut dataset = Vec::new();
    for row in reader.records() {
        let row = row.expect("malformed row");
        let fields: Vec<f64> = row
            .iter()
            .map(|field| field.parse().expect("non-numeric field"))
            .collect();
        let (x, y) = fields.split_at(4);
        dataset.push(Point::new(x.to_vec(), y.to_vec()));
    }
    dataset
}

fn main() {
    env_logger::init();

    let dataset = load_banknote("./banknote.csv");
    let split = dataset.len() * 3 / 4;
    let (train_set, test_set) = dataset.split_at(split);

    let mut network = Network::new(
        &[4, 1],
        &[0.0],
        WeightInit::Random {
            mean: 0.0,
            std_dev: 0.5,
        },
    );
    let config = TrainConfig {
        transfer: Transfer::Sigmoid,
        learning_rate: 0.1,
        normalize_lr: true,
        dataset_mode: DatasetMode::Static,
    };

    let mut log = CostLog::create("bank_cost.txt").expect("cannot create cost log");
    let outcome = network
        .train(train_set.to_vec(), &config, &mut NoSynthesis, &mut log)
        .expect("cost log write failed");
    println!("training outcome: {outcome:?}");

    let evaluation = network.predict(test_set, config.transfer);
    println!(
        "total correct: {} / {} ({:.2}%)",
        evaluation.correct,
        evaluation.total,
        evaluation.percent_correct()
    );
}
