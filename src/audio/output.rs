use crate::audio::mixer::{mix_into, Voice};
use crate::audio::player::AudioBackend;
use crate::audio::resampler::resample_audio;
use crate::messages::AudioData;
use crate::{Result, RokoError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, SampleRate, Stream, StreamConfig};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, warn};

enum StreamControl {
    Resume(Sender<Result<()>>),
    Shutdown,
}

/// Output context on the default device.
///
/// cpal streams cannot cross threads, so the stream lives on a dedicated
/// audio thread and this handle talks to it through the shared mixer and a
/// control channel.
pub struct CpalOutput {
    mixer: Arc<Mutex<Vec<Voice>>>,
    control_tx: Sender<StreamControl>,
    suspended: Arc<AtomicBool>,
    sample_rate: u32,
    channels: u16,
}

impl CpalOutput {
    /// Open the default output device, preferring `preferred_rate`
    pub fn open(preferred_rate: u32) -> Result<Self> {
        let mixer = Arc::new(Mutex::new(Vec::new()));
        let suspended = Arc::new(AtomicBool::new(false));
        let (control_tx, control_rx) = unbounded();
        let (ready_tx, ready_rx) = bounded(1);

        let thread_mixer = Arc::clone(&mixer);
        let thread_suspended = Arc::clone(&suspended);
        thread::Builder::new()
            .name("roko-audio-out".into())
            .spawn(move || {
                run_output_thread(
                    preferred_rate,
                    thread_mixer,
                    thread_suspended,
                    control_rx,
                    ready_tx,
                )
            })?;

        let (sample_rate, channels) = ready_rx
            .recv()
            .map_err(|e| RokoError::ChannelError(format!("Audio thread exited: {}", e)))??;

        Ok(Self {
            mixer,
            control_tx,
            suspended,
            sample_rate,
            channels,
        })
    }

    /// Get the sample rate of the output stream
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the number of channels
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

impl AudioBackend for CpalOutput {
    fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::SeqCst)
    }

    fn resume(&mut self) -> Result<()> {
        let (reply_tx, reply_rx) = bounded(1);
        self.control_tx
            .send(StreamControl::Resume(reply_tx))
            .map_err(|e| RokoError::ChannelError(format!("Audio thread gone: {}", e)))?;
        reply_rx
            .recv()
            .map_err(|e| RokoError::ChannelError(format!("Audio thread gone: {}", e)))?
    }

    fn start(&mut self, buffer: AudioData) -> Result<()> {
        let samples = if buffer.sample_rate == self.sample_rate {
            buffer.samples
        } else {
            resample_audio(&buffer.samples, buffer.sample_rate, self.sample_rate)?
        };

        if samples.is_empty() {
            debug!("Skipping empty buffer");
            return Ok(());
        }

        self.mixer.lock().push(Voice::new(samples));
        Ok(())
    }

    fn active_sources(&self) -> usize {
        self.mixer.lock().len()
    }
}

impl Drop for CpalOutput {
    fn drop(&mut self) {
        let _ = self.control_tx.send(StreamControl::Shutdown);
    }
}

fn run_output_thread(
    preferred_rate: u32,
    mixer: Arc<Mutex<Vec<Voice>>>,
    suspended: Arc<AtomicBool>,
    control_rx: Receiver<StreamControl>,
    ready_tx: Sender<Result<(u32, u16)>>,
) {
    let stream = match build_stream(preferred_rate, mixer, Arc::clone(&suspended)) {
        Ok((stream, config)) => {
            let _ = ready_tx.send(Ok((config.sample_rate.0, config.channels)));
            stream
        }
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return;
        }
    };

    while let Ok(control) = control_rx.recv() {
        match control {
            StreamControl::Resume(reply_tx) => {
                let result = stream.play().map_err(|e| {
                    RokoError::AudioDeviceError(format!("Failed to resume output stream: {}", e))
                });
                if result.is_ok() {
                    suspended.store(false, Ordering::SeqCst);
                    info!("Resumed audio output");
                }
                let _ = reply_tx.send(result);
            }
            StreamControl::Shutdown => break,
        }
    }

    drop(stream);
    info!("Stopped audio output");
}

fn build_stream(
    preferred_rate: u32,
    mixer: Arc<Mutex<Vec<Voice>>>,
    suspended: Arc<AtomicBool>,
) -> Result<(Stream, StreamConfig)> {
    let host = cpal::default_host();

    let device = host
        .default_output_device()
        .ok_or_else(|| RokoError::AudioDeviceError("No output device available".into()))?;

    info!(
        "Using output device: {}",
        device.name().unwrap_or_else(|_| "Unknown".to_string())
    );

    let config = select_config(&device, preferred_rate)?;
    if config.sample_rate.0 != preferred_rate {
        warn!(
            "Output device runs at {} Hz, speech will be resampled from {} Hz",
            config.sample_rate.0, preferred_rate
        );
    }

    let channels = config.channels as usize;
    let err_fn = move |err| {
        error!("Audio output stream error: {}", err);
        suspended.store(true, Ordering::SeqCst);
    };

    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut voices = mixer.lock();
                mix_into(&mut voices, data, channels);
            },
            err_fn,
            None,
        )
        .map_err(|e| RokoError::AudioDeviceError(format!("Failed to build output stream: {}", e)))?;

    stream
        .play()
        .map_err(|e| RokoError::AudioDeviceError(format!("Failed to start output stream: {}", e)))?;

    Ok((stream, config))
}

/// Prefer a native f32 config at the speech rate, else the device default
fn select_config(device: &Device, preferred_rate: u32) -> Result<StreamConfig> {
    let native = device.supported_output_configs().ok().and_then(|mut ranges| {
        ranges.find(|range| {
            range.sample_format() == SampleFormat::F32
                && range.min_sample_rate().0 <= preferred_rate
                && preferred_rate <= range.max_sample_rate().0
        })
    });

    if let Some(range) = native {
        return Ok(range.with_sample_rate(SampleRate(preferred_rate)).config());
    }

    device
        .default_output_config()
        .map(Into::into)
        .map_err(|e| RokoError::AudioDeviceError(format!("Failed to get output config: {}", e)))
}
