//! End-to-end flow over the digit pipeline: CSV ingestion, training,
//! JSON persistence, evaluation.

use digit_mlp::{metrics, mnist, Activation, Network};

/// One CSV row for a fake digit whose listed pixels are fully lit.
fn digit_row(label: usize, on_pixels: &[usize]) -> String {
    let mut cells = vec!["0"; mnist::IMAGE_SIZE];
    for &p in on_pixels {
        cells[p] = "255";
    }
    format!("{label},{}", cells.join(","))
}

#[test]
fn csv_to_training_to_persistence_round_trip() {
    // Two fake digit classes with disjoint lit pixels.
    let csv = format!(
        "label,pixels\n{}\n{}\n{}\n{}\n",
        digit_row(0, &[0, 1, 2, 3]),
        digit_row(1, &[780, 781, 782, 783]),
        digit_row(0, &[0, 1, 2, 5]),
        digit_row(1, &[779, 781, 782, 783]),
    );

    let data = mnist::parse_csv(&csv).unwrap();
    assert_eq!(data.len(), 4);
    assert_eq!(data.input_dim(), mnist::IMAGE_SIZE);
    assert_eq!(data.target_dim(), mnist::NUM_CLASSES);

    let mut network = Network::new();
    network
        .initialize_with_seed(
            &[mnist::IMAGE_SIZE, 8, mnist::NUM_CLASSES],
            Activation::Sigmoid,
            7,
        )
        .unwrap();

    let report = network
        .train(data.inputs(), data.targets(), 100, 0.5)
        .unwrap();
    assert!(report.final_error() < report.epoch_errors[0]);
    assert!(network.is_trained());

    let json = network.to_json_string().unwrap();
    let reloaded = Network::from_json_str(&json).unwrap();
    assert!(reloaded.is_configured());

    for idx in 0..data.len() {
        assert_eq!(
            network.forward(data.input(idx)),
            reloaded.forward(data.input(idx)),
            "reloaded model diverged on sample {idx}"
        );
    }

    let original = metrics::mean_squared_error(&network, &data).unwrap();
    let restored = metrics::mean_squared_error(&reloaded, &data).unwrap();
    assert_eq!(original, restored);
}

#[test]
fn save_and_load_through_a_file() {
    let path = std::env::temp_dir().join("digit_mlp_roundtrip_test.json");
    let _ = std::fs::remove_file(&path);

    let mut network = Network::new();
    network
        .initialize_with_seed(&[4, 3, 2], Activation::Sigmoid, 11)
        .unwrap();

    network.save_json(&path).unwrap();
    let reloaded = Network::load_json(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let input = [0.1, 0.2, 0.3, 0.4];
    assert_eq!(network.forward(&input), reloaded.forward(&input));
}
