use clap::Parser;

use plotters::prelude::*;

use demonstracje_ml::animate::plan;
use demonstracje_ml::descent::{cost, descent_path};
use demonstracje_ml::plots::plot_descent_scene;

#[derive(Parser, Debug)]
struct Args {
    /// starting point of the descent
    #[clap(short, long, default_value_t = 1.5)]
    start: f64,

    /// fixed step size of the descent routine
    #[clap(long, default_value_t = 0.02)]
    step_size: f64,

    /// iteration cap of the descent routine
    #[clap(short, long, default_value_t = 50)]
    iters: usize,

    /// delay between animation frames in milliseconds
    #[clap(long, default_value_t = 500)]
    frame_delay: u32,

    #[clap(short, long, default_value = "plots/grad_descent.gif")]
    out: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let w_path = descent_path(args.start, args.step_size, args.iters);

    let final_w = *w_path.last().ok_or("empty descent path")?;
    println!(
        "descent: {} iterates, final w: {:.4}, g(w): {:.4}",
        w_path.len(),
        final_w,
        cost(final_w)
    );

    let frames = plan(&w_path);

    if let Some(parent) = std::path::Path::new(&args.out).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let drawing_area =
        BitMapBackend::gif(&args.out, (800, 600), args.frame_delay)?.into_drawing_area();

    for scene in &frames {
        plot_descent_scene(scene, &drawing_area)?;
        drawing_area.present()?;
    }

    println!("{} frames written to {}", frames.len(), args.out);

    Ok(())
}
