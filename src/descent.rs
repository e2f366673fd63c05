use ndarray::Array;

/// g(w) = w^4 + w^2 + 10w, the convex objective minimized in the animation.
pub fn cost(w: f64) -> f64 {
    w.powi(4) + w.powi(2) + 10. * w
}

/// Analytic derivative of [`cost`].
pub fn gradient(w: f64) -> f64 {
    4. * w.powi(3) + 2. * w + 10.
}

/// First-order Taylor expansion of the objective at `y`, evaluated at `x`.
///
/// Affine in `x` and tangent to the objective at the base point.
pub fn surrogate(y: f64, x: f64) -> f64 {
    cost(y) + gradient(y) * (x - y)
}

/// Fixed-step gradient descent on the objective, recording every iterate.
///
/// Returns `max_iters + 1` values starting with `w0`. This is the routine
/// the animator consumes; the animation itself does no minimization.
pub fn descent_path(w0: f64, step_size: f64, max_iters: usize) -> Vec<f64> {
    let mut path = Vec::with_capacity(max_iters + 1);
    let mut w = w0;
    path.push(w);

    for _ in 0..max_iters {
        w -= step_size * gradient(w);
        path.push(w);
    }

    path
}

/// Colors for a descent trajectory of `n` iterates, green at the start
/// ramping to red at the end.
///
/// Channel 0 is `linspace(1/n, 1, n)`, channel 1 its reverse, channel 2
/// stays 0. For `n == 1` the single color is `[1, 1, 0]`.
pub fn colorize(n: usize) -> Vec<[f64; 3]> {
    let ramp = Array::linspace(1. / n as f64, 1., n);

    ramp.iter()
        .zip(ramp.iter().rev())
        .map(|(&r, &g)| [r, g, 0.])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_and_gradient_at_known_points() {
        assert_eq!(cost(1.), 12.);
        assert_eq!(gradient(1.), 16.);
        assert_eq!(cost(0.), 0.);
        assert_eq!(gradient(0.), 10.);
    }

    #[test]
    fn surrogate_at_known_points() {
        assert!((surrogate(1., 2.) - 28.).abs() < 1e-12);
        assert!((surrogate(0., -1.) - (-10.)).abs() < 1e-12);
    }

    #[test]
    fn gradient_matches_finite_differences() {
        let h = 1e-5;

        for &w in &[-2., -1., 0., 0.5, 1.7] {
            let central = (cost(w + h) - cost(w - h)) / (2. * h);
            assert!(
                (gradient(w) - central).abs() < 1e-4,
                "w = {w}: analytic {} vs central {central}",
                gradient(w)
            );
        }
    }

    #[test]
    fn surrogate_is_tangent_at_base_point() {
        for &y in &[-2.5, -1., 0., 0.3, 1.9] {
            assert!((surrogate(y, y) - cost(y)).abs() < 1e-9);
        }
    }

    #[test]
    fn surrogate_is_affine_in_x() {
        let y = 0.7;

        for &(x1, x2, x3) in &[(-1., 0., 1.), (0.5, 1.25, 2.), (-4., -1.5, 1.)] {
            let second_difference = surrogate(y, x1) - 2. * surrogate(y, x2) + surrogate(y, x3);
            assert!(second_difference.abs() < 1e-9);
        }
    }

    #[test]
    fn descent_path_records_every_iterate() {
        let path = descent_path(2., 0.01, 50);

        assert_eq!(path.len(), 51);
        assert_eq!(path[0], 2.);

        for pair in path.windows(2) {
            assert!(cost(pair[1]) < cost(pair[0]));
        }
    }

    #[test]
    fn colorizer_ramps_green_to_red() {
        let colors = colorize(5);

        assert_eq!(colors.len(), 5);

        for pair in colors.windows(2) {
            assert!(pair[1][0] >= pair[0][0], "red channel must not decrease");
            assert!(pair[1][1] <= pair[0][1], "green channel must not increase");
        }

        for color in &colors {
            assert_eq!(color[2], 0.);
        }

        assert!((colors[0][0] - 0.2).abs() < 1e-12);
        assert!((colors[4][1] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn colorizer_single_iterate() {
        assert_eq!(colorize(1), vec![[1., 1., 0.]]);
    }
}
