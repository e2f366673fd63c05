use dfdx::prelude::*;

/// Full-batch optimization steps used by the demo binary.
pub const TRAIN_ITERS: usize = 4000;

const LEARNING_RATE: f64 = 1e-2;

/// Two equal tanh hidden layers around a scalar input and output; the
/// hidden width is the slider value, so the layers are runtime sized.
type MlpConfig = (
    (LinearConfig<Const<1>, usize>, Tanh),
    (LinearConfig<usize, usize>, Tanh),
    LinearConfig<usize, Const<1>>,
);

fn mlp_config(width: usize) -> MlpConfig {
    (
        (LinearConfig::new(Const, width), Tanh),
        (LinearConfig::new(width, width), Tanh),
        LinearConfig::new(width, Const),
    )
}

/// Fit the small network to the scatter data and predict over the grid.
pub fn fit_network(
    x: &[f64],
    y: &[f64],
    grid: &[f64],
    width: usize,
    n_iter: usize,
) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    let dev = AutoDevice::default();

    let mut model = dev.build_module::<f32>(mlp_config(width));

    let n = x.len();

    let inputs: Tensor<(usize, Const<1>), f32, AutoDevice> =
        dev.tensor_from_vec(x.iter().map(|&v| v as f32).collect(), (n, Const));
    let targets: Tensor<(usize, Const<1>), f32, AutoDevice> =
        dev.tensor_from_vec(y.iter().map(|&v| v as f32).collect(), (n, Const));

    let mut adam = Adam::<_, f32, AutoDevice>::new(
        &model,
        AdamConfig {
            lr: LEARNING_RATE,
            ..Default::default()
        },
    );

    for i in 0..n_iter {
        let outputs = model.forward(inputs.clone().retaped::<OwnedTape<f32, AutoDevice>>());
        let loss = mse_loss(outputs, targets.clone());
        let loss_num = loss.as_vec();

        let grads = loss.backward();

        adam.update(&mut model, &grads)?;

        if i % 1000 == 0 {
            println!("iter: {} loss: {:?}", i, loss_num);
        }
    }

    let grid_tensor: Tensor<(usize, Const<1>), f32, AutoDevice> =
        dev.tensor_from_vec(grid.iter().map(|&v| v as f32).collect(), (grid.len(), Const));

    let predictions = model.forward(grid_tensor);

    Ok(predictions.as_vec().into_iter().map(f64::from).collect())
}
