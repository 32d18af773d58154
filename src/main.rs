use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;

use digit_mlp::{metrics, mnist, Activation, Network};

#[derive(Parser)]
#[command(version, about = "Train and run a digit-recognition MLP on MNIST-style CSV data")]
enum Cli {
    /// Train a new model and save it as JSON.
    Train {
        /// Path to the training csv file (mnist_train.csv).
        #[arg(long, short = 't')]
        train_data: PathBuf,

        /// Path to the evaluation csv file (mnist_test.csv).
        #[arg(long, short = 'c')]
        test_data: PathBuf,

        /// Output file for the trained model.
        #[arg(long, short = 's')]
        save_model: PathBuf,

        /// Hidden layer widths, first hidden layer first.
        #[arg(long, num_args = 1.., default_values_t = [256, 128])]
        hidden: Vec<usize>,

        #[arg(long, default_value_t = 10)]
        epochs: usize,

        #[arg(long, default_value_t = 0.0075)]
        learning_rate: f64,

        /// Seed for weight initialization; omit for a random start.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Classify samples with a previously trained model.
    Recognize {
        /// Path to the csv file with samples to classify.
        #[arg(long, short = 'd')]
        data: PathBuf,

        /// Path to the trained model json.
        #[arg(long, short = 'p')]
        model: PathBuf,

        /// Output file for per-sample results.
        #[arg(long, short = 'r')]
        result: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse() {
        Cli::Train {
            train_data,
            test_data,
            save_model,
            hidden,
            epochs,
            learning_rate,
            seed,
        } => train(
            &train_data,
            &test_data,
            &save_model,
            &hidden,
            epochs,
            learning_rate,
            seed,
        ),
        Cli::Recognize {
            data,
            model,
            result,
        } => recognize(&data, &model, &result),
    }
}

fn train(
    train_data: &PathBuf,
    test_data: &PathBuf,
    save_model: &PathBuf,
    hidden: &[usize],
    epochs: usize,
    learning_rate: f64,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    if save_model.exists() {
        bail!("output file {} already exists", save_model.display());
    }

    let mut architecture = Vec::with_capacity(hidden.len() + 2);
    architecture.push(mnist::IMAGE_SIZE);
    architecture.extend_from_slice(hidden);
    architecture.push(mnist::NUM_CLASSES);

    let train_set = mnist::load_csv(train_data)
        .with_context(|| format!("loading {}", train_data.display()))?;
    let test_set =
        mnist::load_csv(test_data).with_context(|| format!("loading {}", test_data.display()))?;

    let mut network = Network::new();
    match seed {
        Some(seed) => network.initialize_with_seed(&architecture, Activation::Sigmoid, seed)?,
        None => network.initialize(&architecture, Activation::Sigmoid, &mut rand::thread_rng())?,
    }

    info!(
        "training a {architecture:?} network on {} samples for {epochs} epochs, learning rate {learning_rate}",
        train_set.len()
    );
    let report = network.train(train_set.inputs(), train_set.targets(), epochs, learning_rate)?;
    info!("training finished, final error {:.6}", report.final_error());

    let accuracy = metrics::accuracy(&network, &test_set)?;
    info!("test accuracy: {:.2}%", accuracy * 100.0);

    network
        .save_json(save_model)
        .with_context(|| format!("saving {}", save_model.display()))?;
    info!("model saved to {}", save_model.display());

    Ok(())
}

fn recognize(data: &PathBuf, model: &PathBuf, result: &PathBuf) -> anyhow::Result<()> {
    let network =
        Network::load_json(model).with_context(|| format!("loading {}", model.display()))?;
    let samples = mnist::load_csv(data).with_context(|| format!("loading {}", data.display()))?;

    let mut report = String::new();
    let mut matches = 0_usize;
    for idx in 0..samples.len() {
        let activations = network.forward(samples.input(idx));
        let output = activations.last().context("network produced no output")?;
        let predicted = metrics::argmax(output).context("empty output layer")?;
        let expected = metrics::argmax(samples.target(idx)).context("empty target row")?;

        if predicted == expected {
            matches += 1;
        }
        writeln!(report, "Expected: {expected}, Predicted: {predicted}")?;
    }
    writeln!(report, "Matches: {matches}/{}", samples.len())?;

    std::fs::write(result, report)
        .with_context(|| format!("writing {}", result.display()))?;
    info!(
        "recognition finished, accuracy {:.2}%",
        matches as f64 * 100.0 / samples.len() as f64
    );

    Ok(())
}
