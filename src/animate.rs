use ndarray::Array;

use crate::descent::{colorize, cost, surrogate};

/// Plot window of the descent animation.
pub const W_MIN: f64 = -3.;
pub const W_MAX: f64 = 2.;
pub const G_MAX: f64 = 60.;
/// Lower edge of the plot window; dashed drop lines start here.
pub const BASELINE: f64 = -30.;
pub const OBJECTIVE_SAMPLES: usize = 200;

/// Steps before which a fresh surrogate is drawn. Past this the previous
/// one stays on screen until cleared.
pub const SURROGATE_STEPS: usize = 3;
/// Step at which the surrogate and its marker disappear for good.
pub const SURROGATE_CLEAR_STEP: usize = 4;

/// The very first surrogate is shown over a wider window than the later ones.
pub const FIRST_SURROGATE_HALF_WIDTH: f64 = 10.;
pub const FIRST_SURROGATE_SAMPLES: usize = 1000;
pub const LATER_SURROGATE_HALF_WIDTH: f64 = 5.;
pub const LATER_SURROGATE_SAMPLES: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredPoint {
    pub w: f64,
    pub g: f64,
    pub color: [f64; 3],
}

/// Dashed vertical line from [`BASELINE`] up to `g`, drawn at `w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropLine {
    pub w: f64,
    pub g: f64,
}

/// Everything one animation frame draws on top of the objective curve.
///
/// The renderer clears and repaints the whole surface per scene, so the
/// scene carries all points revealed so far rather than a delta.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub points: Vec<ColoredPoint>,
    pub tracer: Option<DropLine>,
    pub surrogate: Option<Vec<(f64, f64)>>,
    pub marker: Option<(f64, f64)>,
    pub terminal: Option<DropLine>,
}

/// Sample the linear surrogate based at `y` over `[y - half_width, y + half_width]`.
pub fn surrogate_window(y: f64, half_width: f64, samples: usize) -> Vec<(f64, f64)> {
    Array::linspace(y - half_width, y + half_width, samples)
        .iter()
        .map(|&x| (x, surrogate(y, x)))
        .collect()
}

/// The window sample whose abscissa is closest to `w`.
///
/// The marker sits on this sample rather than on the exact surrogate value
/// at `w`, so results depend slightly on the grid resolution.
pub fn nearest_sample(window: &[(f64, f64)], w: f64) -> (f64, f64) {
    window
        .iter()
        .copied()
        .min_by(|a, b| (a.0 - w).abs().partial_cmp(&(b.0 - w).abs()).unwrap())
        .unwrap()
}

/// Replay a descent path as a sequence of frames.
///
/// Mirrors the original teaching animation: the objective appears first,
/// then the starting point with a dashed tracer and a wide surrogate, and
/// each early step redraws a local surrogate with a marker on the sample
/// nearest the next iterate. From step [`SURROGATE_CLEAR_STEP`] on, only
/// the colored points accumulate; the final frame adds a drop line at the
/// terminal iterate.
pub fn plan(w_path: &[f64]) -> Vec<Scene> {
    let n = w_path.len();

    let mut frames = Vec::new();
    let mut scene = Scene::default();
    frames.push(scene.clone());

    if n == 0 {
        return frames;
    }

    let colors = colorize(n);
    let g_path: Vec<f64> = w_path.iter().map(|&w| cost(w)).collect();

    let point = |i: usize| ColoredPoint {
        w: w_path[i],
        g: g_path[i],
        color: colors[i],
    };

    scene.points.push(point(0));
    frames.push(scene.clone());

    scene.tracer = Some(DropLine {
        w: w_path[0],
        g: g_path[0],
    });
    frames.push(scene.clone());

    let mut window = surrogate_window(w_path[0], FIRST_SURROGATE_HALF_WIDTH, FIRST_SURROGATE_SAMPLES);
    scene.surrogate = Some(window.clone());
    frames.push(scene.clone());

    if let Some(&next) = w_path.get(1) {
        scene.marker = Some(nearest_sample(&window, next));
        frames.push(scene.clone());
    }

    for i in 1..n {
        if i < SURROGATE_CLEAR_STEP {
            scene.points.push(point(i));
            frames.push(scene.clone());

            if i < SURROGATE_STEPS {
                scene.surrogate = None;
                scene.marker = None;
                frames.push(scene.clone());

                window =
                    surrogate_window(w_path[i], LATER_SURROGATE_HALF_WIDTH, LATER_SURROGATE_SAMPLES);
                scene.surrogate = Some(window.clone());
                frames.push(scene.clone());

                if let Some(&next) = w_path.get(i + 1) {
                    scene.marker = Some(nearest_sample(&window, next));
                    frames.push(scene.clone());
                }
            }
        }

        if i == SURROGATE_CLEAR_STEP {
            scene.surrogate = None;
            scene.marker = None;
            frames.push(scene.clone());
        }

        if i > SURROGATE_CLEAR_STEP {
            scene.points.push(point(i));
            frames.push(scene.clone());
        }

        if i == n - 1 {
            if scene.points.last().map(|p| p.w) != Some(w_path[i]) {
                scene.points.push(point(i));
            }
            scene.terminal = Some(DropLine {
                w: w_path[i],
                g: g_path[i],
            });
            frames.push(scene.clone());
        }
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descent::descent_path;

    #[test]
    fn first_frame_shows_only_the_objective() {
        let path = descent_path(1.5, 0.02, 10);
        let frames = plan(&path);

        assert_eq!(frames[0], Scene::default());
        assert_eq!(frames[1].points.len(), 1);
        assert!(frames[1].tracer.is_none());
        assert!(frames[2].tracer.is_some());
    }

    #[test]
    fn surrogate_disappears_after_the_early_steps() {
        let path = descent_path(1.5, 0.02, 10);
        let frames = plan(&path);

        let last_with_surrogate = frames
            .iter()
            .rposition(|scene| scene.surrogate.is_some())
            .unwrap();

        // Everything after the clear step is surrogate free.
        for scene in &frames[last_with_surrogate + 1..] {
            assert!(scene.surrogate.is_none());
            assert!(scene.marker.is_none());
        }

        // The scene right before it still carries points up to step 3 only.
        let scene = &frames[last_with_surrogate];
        assert!(scene.points.len() <= SURROGATE_STEPS + 1);
    }

    #[test]
    fn marker_sits_on_the_grid_sample_nearest_the_next_iterate() {
        let path = descent_path(1.5, 0.02, 10);
        let frames = plan(&path);

        let first_marker = frames
            .iter()
            .find_map(|scene| scene.marker)
            .expect("some frame must carry a marker");

        let window =
            surrogate_window(path[0], FIRST_SURROGATE_HALF_WIDTH, FIRST_SURROGATE_SAMPLES);
        assert_eq!(first_marker, nearest_sample(&window, path[1]));

        // Grid spacing bounds how far the marker can sit from the iterate.
        let spacing = 2. * FIRST_SURROGATE_HALF_WIDTH / (FIRST_SURROGATE_SAMPLES - 1) as f64;
        assert!((first_marker.0 - path[1]).abs() <= spacing);
    }

    #[test]
    fn final_frame_has_drop_line_and_skips_the_clear_step_point() {
        let path = descent_path(1.5, 0.02, 10);
        let frames = plan(&path);
        let last = frames.last().unwrap();

        assert!(last.terminal.is_some());
        assert!(last.surrogate.is_none());

        // Point 4 is where the surrogate gets cleared; no point is drawn there.
        assert!(!last
            .points
            .iter()
            .any(|p| p.w == path[SURROGATE_CLEAR_STEP]));

        // All other iterates made it onto the plot.
        assert_eq!(last.points.len(), path.len() - 1);
    }

    #[test]
    fn short_path_without_next_iterate_draws_no_marker_past_the_end() {
        let path = vec![1.5, 1., 0.5];
        let frames = plan(&path);
        let last = frames.last().unwrap();

        assert!(last.terminal.is_some());
        assert!(last.marker.is_none());
        assert_eq!(last.points.len(), 3);
    }

    #[test]
    fn degenerate_single_iterate_path() {
        let frames = plan(&[0.5]);
        let last = frames.last().unwrap();

        assert_eq!(last.points.len(), 1);
        assert!(last.marker.is_none());
        assert_eq!(last.points[0].color, [1., 1., 0.]);
    }

    #[test]
    fn nearest_sample_prefers_the_closest_abscissa() {
        let window = vec![(0., 0.), (1., 10.), (2., 20.)];

        assert_eq!(nearest_sample(&window, 1.2), (1., 10.));
        assert_eq!(nearest_sample(&window, -5.), (0., 0.));
    }
}
