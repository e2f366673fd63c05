use clap::Parser;

use plotters::prelude::*;

use demonstracje_ml::dataset::{FitBases, Series};
use demonstracje_ml::fit;
use demonstracje_ml::net;
use demonstracje_ml::plots::plot_fit;

/// Slider ranges of the original interactive demo; a sweep renders one
/// frame per value.
const POLY_DEGREE_MAX: usize = 20;
const ENSEMBLE_SIZE_MAX: usize = 20;
const NET_WIDTH_MAX: usize = 100;

const SWEEP_FRAME_DELAY_MS: u32 = 300;

#[derive(Parser, Debug)]
struct Args {
    /// headerless csv with x,y columns
    #[clap(short, long, default_value = "data/regression_data.csv")]
    data: String,

    /// optional headerless csv with the underlying target curve
    #[clap(short, long)]
    target: Option<String>,

    /// model family: poly, trees or net
    #[clap(short, long, default_value = "poly")]
    model: String,

    /// complexity control: polynomial degree, ensemble size or hidden width
    #[clap(short, long, default_value_t = 1)]
    control: usize,

    /// render the whole slider range into an animated gif instead of one svg
    #[clap(long)]
    sweep: bool,

    /// output path; defaults to plots/<model>_fit.svg or plots/<model>_sweep.gif
    #[clap(short, long)]
    out: Option<String>,
}

fn control_max(model: &str) -> Result<usize, Box<dyn std::error::Error>> {
    match model {
        "poly" => Ok(POLY_DEGREE_MAX),
        "trees" => Ok(ENSEMBLE_SIZE_MAX),
        "net" => Ok(NET_WIDTH_MAX),
        other => Err(format!("unknown model: {}", other).into()),
    }
}

fn fit_curve(
    model: &str,
    data: &Series,
    control: usize,
) -> Result<Vec<(f64, f64)>, Box<dyn std::error::Error>> {
    let grid = fit::prediction_grid(&data.x).ok_or("dataset has no x values")?;

    let predictions: Vec<f64> = match model {
        "poly" => {
            let fitted = fit::fit_polynomial(&data.x, &data.y, control)
                .ok_or("polynomial least squares failed")?;
            grid.iter().map(|&w| fitted.predict(w)).collect()
        }
        "trees" => {
            let ensemble = fit::fit_boosted(&data.x, &data.y, control);
            grid.iter().map(|&w| ensemble.predict(w)).collect()
        }
        "net" => net::fit_network(&data.x, &data.y, &grid, control, net::TRAIN_ITERS)?,
        other => return Err(format!("unknown model: {}", other).into()),
    };

    Ok(grid.into_iter().zip(predictions).collect())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut bases = FitBases::default();
    bases.load_data(&args.data)?;

    if let Some(target_path) = &args.target {
        bases.load_target(target_path)?;
    }

    let data = bases.data.as_ref().ok_or("no dataset loaded")?;
    let target = bases.target.as_ref();

    let max = control_max(&args.model)?;

    if args.sweep {
        let out = args
            .out
            .unwrap_or_else(|| format!("plots/{}_sweep.gif", args.model));
        ensure_parent_dir(&out)?;

        let drawing_area =
            BitMapBackend::gif(&out, (800, 600), SWEEP_FRAME_DELAY_MS)?.into_drawing_area();

        for control in 1..=max {
            println!("control: {}", control);

            let curve = fit_curve(&args.model, data, control)?;

            plot_fit(data, target, Some(&curve), &drawing_area)?;
            drawing_area.present()?;
        }

        println!("sweep written to {}", out);
    } else {
        if args.control < 1 || args.control > max {
            return Err(format!("control must be in 1..={} for {}", max, args.model).into());
        }

        let out = args
            .out
            .unwrap_or_else(|| format!("plots/{}_fit.svg", args.model));
        ensure_parent_dir(&out)?;

        let curve = fit_curve(&args.model, data, args.control)?;

        let drawing_area = SVGBackend::new(&out, (800, 600)).into_drawing_area();
        plot_fit(data, target, Some(&curve), &drawing_area)?;
        drawing_area.present()?;

        println!("plot written to {}", out);
    }

    Ok(())
}

fn ensure_parent_dir(path: &str) -> Result<(), std::io::Error> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(())
}
