//! Microphone interface link as seen by the UI

use crate::{Result, RokoError};

/// An open capture device. Dropping it releases the device.
pub trait InputLink {
    fn device_name(&self) -> &str;
}

/// Opens the capture device when the interface is initialized
pub type InputFactory = Box<dyn Fn() -> Result<Box<dyn InputLink>>>;

/// Factory backed by the default microphone
#[cfg(feature = "audio-io")]
pub fn default_input_factory() -> InputFactory {
    Box::new(|| -> Result<Box<dyn InputLink>> {
        let link = crate::audio::input::MicrophoneLink::open()?;
        Ok(Box::new(link) as Box<dyn InputLink>)
    })
}

#[cfg(not(feature = "audio-io"))]
pub fn default_input_factory() -> InputFactory {
    Box::new(|| -> Result<Box<dyn InputLink>> {
        Err(RokoError::AudioDeviceError(
            "Built without audio device support".into(),
        ))
    })
}

/// Factory that always fails, for headless runs
pub fn unavailable_input_factory() -> InputFactory {
    Box::new(|| -> Result<Box<dyn InputLink>> {
        Err(RokoError::AudioDeviceError("No input device available".into()))
    })
}
