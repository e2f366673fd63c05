use itertools::Itertools;
use nalgebra::{DMatrix, DVector};
use ndarray::Array;

use crate::plots::{find_max_min, MinMax};

/// Every fitted curve is predicted over this many uniformly spaced points
/// spanning the data's x range.
pub const GRID_POINTS: usize = 300;

/// Boosting hyperparameters fixed by the demo; only the ensemble size is
/// exposed to the slider.
pub const BOOST_LEARNING_RATE: f64 = 1.;
pub const BOOST_TREE_DEPTH: usize = 2;

/// Uniform prediction grid over `[min x, max x]`. `None` for an empty column.
pub fn prediction_grid(x: &[f64]) -> Option<Vec<f64>> {
    let MinMax { min, max } = find_max_min(x.iter().copied())?;

    Some(Array::linspace(min, max, GRID_POINTS).to_vec())
}

/// Row-per-sample design matrix with columns `x^0 ..= x^degree`.
pub fn polynomial_features(x: &[f64], degree: usize) -> DMatrix<f64> {
    DMatrix::from_fn(x.len(), degree + 1, |row, power| x[row].powi(power as i32))
}

pub struct PolynomialFit {
    coefficients: DVector<f64>,
}

/// Ordinary least squares on polynomial features, solved by SVD so that
/// high degrees with nearly collinear columns still produce a curve.
pub fn fit_polynomial(x: &[f64], y: &[f64], degree: usize) -> Option<PolynomialFit> {
    let design = polynomial_features(x, degree);
    let targets = DVector::from_column_slice(y);

    let svd = design.svd(true, true);
    let coefficients = svd.solve(&targets, 1e-12).ok()?;

    coefficients
        .iter()
        .all(|c| c.is_finite())
        .then_some(PolynomialFit { coefficients })
}

impl PolynomialFit {
    pub fn predict(&self, w: f64) -> f64 {
        self.coefficients
            .iter()
            .enumerate()
            .map(|(power, &c)| c * w.powi(power as i32))
            .sum()
    }
}

#[derive(Debug)]
enum Node {
    Leaf(f64),
    Split {
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Depth-limited regression tree over a single feature, splitting on the
/// midpoint between consecutive distinct x values that minimizes the
/// summed squared error of the two leaf means.
#[derive(Debug)]
pub struct RegressionTree {
    root: Node,
}

impl RegressionTree {
    pub fn fit(x: &[f64], targets: &[f64], depth: usize) -> RegressionTree {
        RegressionTree {
            root: grow(x, targets, depth),
        }
    }

    pub fn predict(&self, w: f64) -> f64 {
        let mut node = &self.root;

        loop {
            match node {
                Node::Leaf(value) => return *value,
                Node::Split {
                    threshold,
                    left,
                    right,
                } => node = if w < *threshold { left } else { right },
            }
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn squared_error(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum()
}

fn grow(x: &[f64], targets: &[f64], depth: usize) -> Node {
    if depth == 0 || x.len() < 2 {
        return Node::Leaf(mean(targets));
    }

    let candidates = x
        .iter()
        .copied()
        .sorted_by(|a, b| a.partial_cmp(b).unwrap())
        .dedup()
        .tuple_windows()
        .map(|(a, b)| 0.5 * (a + b));

    let best = candidates
        .map(|threshold| {
            let (left, right): (Vec<f64>, Vec<f64>) = targets
                .iter()
                .zip(x)
                .partition_map(|(&t, &xi)| {
                    if xi < threshold {
                        itertools::Either::Left(t)
                    } else {
                        itertools::Either::Right(t)
                    }
                });

            (threshold, squared_error(&left) + squared_error(&right))
        })
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap());

    let Some((threshold, _)) = best else {
        // All x values coincide, nothing to split on.
        return Node::Leaf(mean(targets));
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) =
        (0..x.len()).partition(|&i| x[i] < threshold);

    let subset = |idx: &[usize], values: &[f64]| idx.iter().map(|&i| values[i]).collect::<Vec<_>>();

    Node::Split {
        threshold,
        left: Box::new(grow(
            &subset(&left_idx, x),
            &subset(&left_idx, targets),
            depth - 1,
        )),
        right: Box::new(grow(
            &subset(&right_idx, x),
            &subset(&right_idx, targets),
            depth - 1,
        )),
    }
}

/// Gradient boosting for squared loss: a mean bias plus shallow trees,
/// each fit to the residuals the ensemble so far leaves behind.
pub struct BoostedEnsemble {
    bias: f64,
    trees: Vec<RegressionTree>,
}

pub fn fit_boosted(x: &[f64], y: &[f64], ensemble_size: usize) -> BoostedEnsemble {
    let bias = mean(y);
    let mut residuals: Vec<f64> = y.iter().map(|&v| v - bias).collect();
    let mut trees = Vec::with_capacity(ensemble_size);

    for _ in 0..ensemble_size {
        let tree = RegressionTree::fit(x, &residuals, BOOST_TREE_DEPTH);

        for (residual, &xi) in residuals.iter_mut().zip(x) {
            *residual -= BOOST_LEARNING_RATE * tree.predict(xi);
        }

        trees.push(tree);
    }

    BoostedEnsemble { bias, trees }
}

impl BoostedEnsemble {
    pub fn predict(&self, w: f64) -> f64 {
        self.bias
            + self
                .trees
                .iter()
                .map(|tree| BOOST_LEARNING_RATE * tree.predict(w))
                .sum::<f64>()
    }

    pub fn training_error(&self, x: &[f64], y: &[f64]) -> f64 {
        x.iter()
            .zip(y)
            .map(|(&xi, &yi)| (yi - self.predict(xi)).powi(2))
            .sum()
    }
}
