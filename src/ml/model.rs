use anyhow::{bail, Result};
use burn::{
    nn::{
        conv::{Conv1d, Conv1dConfig, ConvTranspose1d, ConvTranspose1dConfig},
        loss::{MseLoss, Reduction},
        LeakyRelu, LeakyReluConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::sigmoid,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally. Do not add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct ConvAutoencoderConfig {
    /// Features per observation (the Conv1d input channels)
    pub input_size:      usize,
    /// Width of the compressed representation
    pub encoding_size:   usize,
    #[config(default = 64)]
    pub hidden_channels: usize,
    #[config(default = 0.01)]
    pub negative_slope:  f64,
}

impl ConvAutoencoderConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ConvAutoencoder<B> {
        let activation = LeakyReluConfig::new()
            .with_negative_slope(self.negative_slope)
            .init();
        ConvAutoencoder {
            encoder_conv:    Conv1dConfig::new(self.input_size, self.hidden_channels, 1).init(device),
            encoder_linear:  LinearConfig::new(self.hidden_channels, self.encoding_size).init(device),
            decoder_linear:  LinearConfig::new(self.encoding_size, self.hidden_channels).init(device),
            decoder_conv:    ConvTranspose1dConfig::new([self.hidden_channels, self.input_size], 1).init(device),
            activation,
            input_size:      self.input_size,
            encoding_size:   self.encoding_size,
            hidden_channels: self.hidden_channels,
            negative_slope:  self.negative_slope,
        }
    }
}

/// Build an untrained autoencoder.
pub fn cae_create<B: Backend>(
    input_size:    usize,
    encoding_size: usize,
    device:        &B::Device,
) -> Result<ConvAutoencoder<B>> {
    if input_size == 0 || encoding_size == 0 {
        bail!("input_size and encoding_size must be > 0 (got {input_size}, {encoding_size})");
    }
    Ok(ConvAutoencoderConfig::new(input_size, encoding_size).init(device))
}

/// Encoder:  Conv1d(k=1) → LeakyReLU → flatten → Linear
/// Decoder:  Linear → LeakyReLU → unflatten → ConvTranspose1d(k=1) → Sigmoid
#[derive(Module, Debug)]
pub struct ConvAutoencoder<B: Backend> {
    pub encoder_conv:    Conv1d<B>,
    pub encoder_linear:  Linear<B>,
    pub decoder_linear:  Linear<B>,
    pub decoder_conv:    ConvTranspose1d<B>,
    pub activation:      LeakyRelu,
    pub input_size:      usize,
    pub encoding_size:   usize,
    pub hidden_channels: usize,
    pub negative_slope:  f64,
}

impl<B: Backend> ConvAutoencoder<B> {
    /// [batch, input_size, 1] → [batch, encoding_size]
    pub fn encode(&self, x: Tensor<B, 3>) -> Tensor<B, 2> {
        let x = self.encoder_conv.forward(x); // [batch, hidden, 1]
        let x = self.activation.forward(x);
        let x = x.flatten::<2>(1, 2);
        self.encoder_linear.forward(x)
    }

    /// [batch, encoding_size] → [batch, input_size, 1], values in [0, 1]
    pub fn decode(&self, z: Tensor<B, 2>) -> Tensor<B, 3> {
        let [batch_size, _] = z.dims();
        let x = self.decoder_linear.forward(z);
        let x = self.activation.forward(x);
        let x = x.reshape([batch_size, self.hidden_channels, 1]);
        sigmoid(self.decoder_conv.forward(x))
    }

    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        self.decode(self.encode(x))
    }

    /// Mean squared reconstruction error over the whole batch.
    pub fn forward_loss(&self, inputs: Tensor<B, 3>, targets: Tensor<B, 3>) -> (Tensor<B, 1>, Tensor<B, 3>) {
        let output = self.forward(inputs);
        let loss = MseLoss::new().forward(output.clone(), targets, Reduction::Mean);
        (loss, output)
    }

    pub fn config(&self) -> ConvAutoencoderConfig {
        ConvAutoencoderConfig::new(self.input_size, self.encoding_size)
            .with_hidden_channels(self.hidden_channels)
            .with_negative_slope(self.negative_slope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn random_input(batch: usize, features: usize) -> Tensor<TestBackend, 3> {
        Tensor::random(
            [batch, features, 1],
            burn::tensor::Distribution::Normal(0.0, 3.0),
            &Default::default(),
        )
    }

    #[test]
    fn test_forward_preserves_shape_and_bounds() {
        let device = Default::default();
        for (input_size, encoding_size) in [(1, 1), (8, 3), (16, 16), (5, 9)] {
            let model: ConvAutoencoder<TestBackend> = cae_create(input_size, encoding_size, &device).unwrap();
            let out = model.forward(random_input(7, input_size));
            assert_eq!(out.dims(), [7, input_size, 1]);

            let values = out.into_data().to_vec::<f32>().unwrap();
            assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_encode_width_is_encoding_size() {
        let model: ConvAutoencoder<TestBackend> = cae_create(10, 4, &Default::default()).unwrap();
        assert_eq!(model.encode(random_input(3, 10)).dims(), [3, 4]);
    }

    #[test]
    fn test_zero_sizes_are_rejected() {
        assert!(cae_create::<TestBackend>(0, 4, &Default::default()).is_err());
        assert!(cae_create::<TestBackend>(4, 0, &Default::default()).is_err());
    }

    #[test]
    fn test_forward_loss_is_non_negative() {
        let model: ConvAutoencoder<TestBackend> = cae_create(4, 2, &Default::default()).unwrap();
        let x = random_input(2, 4);
        let (loss, output) = model.forward_loss(x.clone(), x);
        assert_eq!(output.dims(), [2, 4, 1]);
        assert!(loss.into_scalar().elem::<f32>() >= 0.0);
    }

    #[test]
    fn test_config_round_trips_through_model() {
        let cfg = ConvAutoencoderConfig::new(6, 2).with_hidden_channels(12);
        let model: ConvAutoencoder<TestBackend> = cfg.init(&Default::default());
        let back = model.config();
        assert_eq!(back.input_size, 6);
        assert_eq!(back.encoding_size, 2);
        assert_eq!(back.hidden_channels, 12);
    }
}
