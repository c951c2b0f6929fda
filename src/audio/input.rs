use crate::audio::link::InputLink;
use crate::{Result, RokoError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use tracing::{error, info};

/// Live handle on the default microphone.
///
/// Only the connected/disconnected status matters to the assistant; captured
/// samples are discarded. Dropping the link releases the device.
pub struct MicrophoneLink {
    device_name: String,
    stream: Stream,
}

impl MicrophoneLink {
    /// Open the default input device and start capturing
    pub fn open() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| RokoError::AudioDeviceError("No input device available".into()))?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        info!("Using input device: {}", device_name);

        let config: StreamConfig = device
            .default_input_config()
            .map_err(|e| RokoError::AudioDeviceError(format!("Failed to get input config: {}", e)))?
            .into();

        let err_fn = |err| {
            error!("Audio input stream error: {}", err);
        };

        let stream = device
            .build_input_stream(
                &config,
                |_data: &[f32], _: &cpal::InputCallbackInfo| {},
                err_fn,
                None,
            )
            .map_err(|e| RokoError::AudioDeviceError(format!("Failed to build input stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| RokoError::AudioDeviceError(format!("Failed to start input stream: {}", e)))?;

        info!("Microphone link established");
        Ok(Self {
            device_name,
            stream,
        })
    }
}

impl InputLink for MicrophoneLink {
    fn device_name(&self) -> &str {
        &self.device_name
    }
}

impl Drop for MicrophoneLink {
    fn drop(&mut self) {
        let _ = self.stream.pause();
        info!("Microphone link released");
    }
}
