use std::sync::Mutex;

use ndarray::Array4;
use tch::{CModule, Device, Kind, Tensor, nn::ModuleT};

use crate::inference::InferenceError;

/// Seam between the analysis pipeline and the opaque pretrained model. The
/// input is the normalized (1, H, W, 3) tensor; the output is a probability
/// vector over the label set.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>, InferenceError>;

    fn num_parameters(&self) -> Option<i64> {
        None
    }
}

/// Whether the pretrained artifact loaded at startup. Decided once in `main`
/// and shared read-only across request handlers; `Unavailable` routes every
/// analysis to the fixed dummy result instead of failing requests.
pub enum ModelState {
    Ready(Box<dyn Classifier>),
    Unavailable { model_path: String },
}

impl ModelState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready(_))
    }

    pub fn classifier(&self) -> Option<&dyn Classifier> {
        match self {
            ModelState::Ready(classifier) => Some(classifier.as_ref()),
            ModelState::Unavailable { .. } => None,
        }
    }

    /// Name of the loaded model, or the path that was attempted when the
    /// artifact failed to load.
    pub fn model_name(&self) -> &str {
        match self {
            ModelState::Ready(classifier) => classifier.name(),
            ModelState::Unavailable { model_path } => model_path,
        }
    }
}

/// TorchScript module behind the `Classifier` seam. Weights are read-only
/// after load; the mutex only guards libtorch's non-Sync module handle.
pub struct TorchClassifier {
    module: Mutex<CModule>,
    device: Device,
    name: String,
}

impl TorchClassifier {
    pub fn load(path: &str) -> Result<Self, InferenceError> {
        let device = Device::cuda_if_available();
        let module = CModule::load_on_device(path, device)?;
        Ok(Self {
            module: Mutex::new(module),
            device,
            name: path.to_string(),
        })
    }
}

impl Classifier for TorchClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>, InferenceError> {
        let data = input
            .as_slice()
            .ok_or_else(|| InferenceError::Internal("non-contiguous input tensor".to_string()))?;
        let dims: Vec<i64> = input.shape().iter().map(|&d| d as i64).collect();
        let tensor = Tensor::from_slice(data)
            .view(dims.as_slice())
            .to_device(self.device);

        let output = self.module.lock().unwrap().forward_t(&tensor, false);
        // Softmax regardless of whether the artifact was exported with a
        // probability head; softmax of a distribution is still a distribution.
        let output = output.softmax(-1, Kind::Float).view([-1]);
        let count = output.size()[0] as usize;
        let mut probabilities = vec![0.0f32; count];
        output.copy_data(&mut probabilities, count);
        Ok(probabilities)
    }

    fn num_parameters(&self) -> Option<i64> {
        let module = self.module.lock().unwrap();
        let params = module.named_parameters().ok()?;
        Some(params.iter().map(|(_, t)| t.numel() as i64).sum())
    }
}
