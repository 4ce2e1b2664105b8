use axon::costlog::CostLog;
use axon::data::{generate_dataset, DatasetMode, SyntheticData};
use axon::layer::WeightInit;
use axon::network::Network;
use axon::trainer::TrainConfig;
use axon::transfer::Transfer;

// Learn to point at the largest input component: inputs are uniform in
// [0, 1), targets are one-hot at the argmax.
fn main() {
    env_logger::init();

    let mode = DatasetMode::MaxIndex;
    let train_set = generate_dataset(10_000, 3, 3, mode);
    let test_set = generate_dataset(1_000, 3, 3, mode);

    let mut network = Network::new(
        &[3, 3],
        &[0.0],
        WeightInit::Random {
            mean: 0.0,
            std_dev: 1.0,
        },
    );
    let config = TrainConfig {
        transfer: Transfer::Sigmoid,
        learning_rate: 0.05,
        normalize_lr: false,
        dataset_mode: mode,
    };

    let mut log = CostLog::create("max_index_cost.txt").expect("cannot create cost log");
    let mut provider = SyntheticData::new(mode);
    let outcome = network
        .train(train_set, &config, &mut provider, &mut log)
        .expect("cost log write failed");
    println!("training outcome: {outcome:?}");
    println!("{network}");

    let evaluation = network.predict(&test_set, config.transfer);
    println!(
        "total correct: {} / {} ({:.2}%)",
        evaluation.correct,
        evaluation.total,
        evaluation.percent_correct()
    );
    println!("prediction counts:");
    for (class, count) in &evaluation.class_counts {
        println!("{class}: {count}");
    }
}
