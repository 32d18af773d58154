use criterion::{black_box, criterion_group, criterion_main, Criterion};

use digit_mlp::{Activation, Network};

fn network_forward_bench(c: &mut Criterion) {
    let mut network = Network::new();
    network
        .initialize_with_seed(&[128, 256, 256, 10], Activation::Sigmoid, 0)
        .unwrap();
    let input = vec![0.1_f64; 128];

    c.bench_function("network_forward_128_256_256_10", |b| {
        b.iter(|| {
            let activations = network.forward(black_box(&input));
            black_box(activations);
        })
    });
}

fn network_train_epoch_bench(c: &mut Criterion) {
    let inputs: Vec<Vec<f64>> = (0..16).map(|i| vec![i as f64 / 16.0; 32]).collect();
    let targets: Vec<Vec<f64>> = (0..16)
        .map(|i| {
            let mut target = vec![0.0; 8];
            target[i % 8] = 1.0;
            target
        })
        .collect();

    c.bench_function("network_train_epoch_32_64_8", |b| {
        b.iter(|| {
            let mut network = Network::new();
            network
                .initialize_with_seed(&[32, 64, 8], Activation::Sigmoid, 0)
                .unwrap();
            network
                .train(black_box(&inputs), black_box(&targets), 1, 0.1)
                .unwrap();
        })
    });
}

criterion_group!(benches, network_forward_bench, network_train_epoch_bench);
criterion_main!(benches);
