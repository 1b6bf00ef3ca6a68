use std::fmt;

use ort::execution_providers::{
    CPUExecutionProvider, CUDAExecutionProvider, ExecutionProvider, ExecutionProviderDispatch,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{info, warn};

/// Requested compute device, before probing the runtime.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DevicePreference {
    /// CUDA when the execution provider is usable, CPU otherwise
    #[default]
    Auto,
    Cpu,
    Cuda,
}

/// Compute device the model session is bound to. Resolved once at startup and
/// handed to the detector explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Cpu,
    Cuda { device_id: i32 },
}

impl Device {
    pub fn resolve(preference: DevicePreference) -> Self {
        let device = match preference {
            DevicePreference::Cpu => Device::Cpu,
            DevicePreference::Cuda => Device::Cuda { device_id: 0 },
            DevicePreference::Auto => match CUDAExecutionProvider::default().is_available() {
                Ok(true) => Device::Cuda { device_id: 0 },
                Ok(false) => Device::Cpu,
                Err(e) => {
                    warn!(error = %e, "Could not probe CUDA execution provider; using CPU");
                    Device::Cpu
                }
            },
        };
        info!(%preference, %device, "Resolved compute device");
        device
    }

    pub(crate) fn execution_provider(&self) -> ExecutionProviderDispatch {
        match *self {
            Device::Cpu => CPUExecutionProvider::default().build(),
            Device::Cuda { device_id } => CUDAExecutionProvider::default()
                .with_device_id(device_id)
                .build()
                .error_on_failure(),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda { device_id } => write!(f, "cuda:{device_id}"),
        }
    }
}
