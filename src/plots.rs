use plotters::coord::Shift;
use plotters::prelude::*;

use ndarray::Array;

use crate::animate::{Scene, BASELINE, G_MAX, OBJECTIVE_SAMPLES, W_MAX, W_MIN};
use crate::dataset::Series;
use crate::descent::cost;

/// Padding added around the data when recomputing axis limits.
const DATA_MARGIN: f64 = 0.1;

const SCATTER_POINT_SIZE: i32 = 5;
const MARKER_SIZE: i32 = 6;

/// Scatter data with an optional reference curve and an optional fitted
/// curve, axes hidden, repainted from scratch on every call.
///
/// Y limits cover both the data and the fitted values; X limits come from
/// the data alone.
pub fn plot_fit<DB>(
    data: &Series,
    target: Option<&Series>,
    fitted: Option<&[(f64, f64)]>,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    drawing_area.fill(&WHITE)?;

    let x_limits = find_max_min(data.x.iter().copied()).ok_or("dataset has no x column")?;
    let y_limits = find_max_min(
        data.y
            .iter()
            .copied()
            .chain(fitted.into_iter().flatten().map(|&(_, z)| z)),
    )
    .ok_or("dataset has no y column")?;

    let mut chart_builder = ChartBuilder::on(drawing_area);

    let mut chart_context = chart_builder.margin(10).build_cartesian_2d(
        (x_limits.min - DATA_MARGIN)..(x_limits.max + DATA_MARGIN),
        (y_limits.min - DATA_MARGIN)..(y_limits.max + DATA_MARGIN),
    )?;

    // No mesh configured on purpose: the data-fit demo hides its axes.

    if let Some(target) = target {
        chart_context.draw_series(DashedLineSeries::new(
            target.x.iter().copied().zip(target.y.iter().copied()),
            8,
            4,
            RED.stroke_width(2),
        ))?;
    }

    chart_context.draw_series(data.x.iter().zip(data.y.iter()).map(|(&x, &y)| {
        EmptyElement::at((x, y))
            + Circle::new((0, 0), SCATTER_POINT_SIZE, BLACK.filled())
            + Circle::new((0, 0), SCATTER_POINT_SIZE, WHITE)
    }))?;

    if let Some(curve) = fitted {
        chart_context.draw_series(LineSeries::new(curve.iter().copied(), BLUE.stroke_width(3)))?;
    }

    Ok(())
}

/// One frame of the descent animation: the objective curve plus whatever
/// the scene carries, on labeled axes with the fixed window of the demo.
pub fn plot_descent_scene<DB>(
    scene: &Scene,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    drawing_area.fill(&WHITE)?;

    let mut chart_builder = ChartBuilder::on(drawing_area);

    let mut chart_context = chart_builder
        .margin(20)
        .set_all_label_area_size(50)
        .build_cartesian_2d(W_MIN..W_MAX, BASELINE..G_MAX)?;

    chart_context
        .configure_mesh()
        .x_labels(10)
        .x_desc("w")
        .y_labels(10)
        .y_desc("g(w)")
        .draw()?;

    let objective = Array::linspace(W_MIN, W_MAX, OBJECTIVE_SAMPLES);
    chart_context.draw_series(LineSeries::new(
        objective.iter().map(|&w| (w, cost(w))),
        BLACK.stroke_width(2),
    ))?;

    if let Some(tracer) = scene.tracer {
        chart_context.draw_series(drop_line(tracer.w, tracer.g))?;
    }

    if let Some(window) = &scene.surrogate {
        chart_context.draw_series(LineSeries::new(
            window.iter().copied(),
            MAGENTA.stroke_width(2),
        ))?;
    }

    if let Some((w, h)) = scene.marker {
        chart_context.draw_series(std::iter::once(Cross::new(
            (w, h),
            MARKER_SIZE,
            BLACK.stroke_width(2),
        )))?;
    }

    chart_context.draw_series(scene.points.iter().map(|point| {
        Circle::new(
            (point.w, point.g),
            SCATTER_POINT_SIZE,
            to_rgb(point.color).filled(),
        )
    }))?;

    if let Some(terminal) = scene.terminal {
        chart_context.draw_series(drop_line(terminal.w, terminal.g))?;
    }

    Ok(())
}

/// Dashed vertical line from the baseline up to `g`, drawn at `w`.
fn drop_line(w: f64, g: f64) -> DashedLineSeries<impl Iterator<Item = (f64, f64)> + Clone, i32> {
    let samples = 100;
    let points = (0..samples).map(move |k| {
        (
            w,
            BASELINE + (g - BASELINE) * k as f64 / (samples - 1) as f64,
        )
    });

    DashedLineSeries::new(points, 6, 4, BLACK.stroke_width(1))
}

/// Colorizer output in `[0, 1]` per channel, converted for plotters.
pub fn to_rgb(color: [f64; 3]) -> RGBColor {
    RGBColor(
        (color[0] * 255.) as u8,
        (color[1] * 255.) as u8,
        (color[2] * 255.) as u8,
    )
}

pub struct MinMax<T> {
    pub min: T,
    pub max: T,
}

pub fn find_max_min<T: std::cmp::PartialOrd + Copy>(
    mut data: impl Iterator<Item = T>,
) -> Option<MinMax<T>> {
    let init = data.next()?;
    let mut min_max = MinMax {
        min: init,
        max: init,
    };

    for x in data {
        min_max = MinMax {
            min: if x < min_max.min { x } else { min_max.min },
            max: if x > min_max.max { x } else { min_max.max },
        };
    }

    Some(min_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_max_min_over_unsorted_data() {
        let min_max = find_max_min([3., -1., 2., 0.].into_iter()).unwrap();

        assert_eq!(min_max.min, -1.);
        assert_eq!(min_max.max, 3.);
    }

    #[test]
    fn find_max_min_of_empty_iterator() {
        assert!(find_max_min(std::iter::empty::<f64>()).is_none());
    }

    #[test]
    fn colors_scale_to_full_byte_range() {
        assert_eq!(to_rgb([1., 0., 0.]), RGBColor(255, 0, 0));
        assert_eq!(to_rgb([0.2, 1., 0.]), RGBColor(51, 255, 0));
    }
}
