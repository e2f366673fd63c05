use clap::Parser;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

use ndarray::Array;

/// Underlying curve the noisy samples are drawn from.
fn target_fn(x: f64) -> f64 {
    (2. * std::f64::consts::PI * x).sin()
}

#[derive(Parser, Debug)]
struct Args {
    /// number of noisy scatter samples
    #[clap(short, long, default_value_t = 30)]
    samples: usize,

    /// standard deviation of the additive noise
    #[clap(short, long, default_value_t = 0.1)]
    noise: f64,

    #[clap(long, default_value_t = 0)]
    seed: u64,

    #[clap(long, default_value = "data/regression_data.csv")]
    data_out: String,

    #[clap(long, default_value = "data/regression_target.csv")]
    target_out: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let uniform = Uniform::new(0., 1.);
    let normal = Normal::new(0., args.noise)?;

    let mut xs: Vec<f64> = uniform.sample_iter(&mut rng).take(args.samples).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());

    if let Some(parent) = std::path::Path::new(&args.data_out).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut data_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&args.data_out)?;

    for &x in &xs {
        let y = target_fn(x) + normal.sample(&mut rng);
        data_writer.serialize((x, y))?;
    }

    data_writer.flush()?;
    println!("{} samples written to {}", args.samples, args.data_out);

    let mut target_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&args.target_out)?;

    for &x in Array::linspace(0., 1., 200).iter() {
        target_writer.serialize((x, target_fn(x)))?;
    }

    target_writer.flush()?;
    println!("target curve written to {}", args.target_out);

    Ok(())
}
