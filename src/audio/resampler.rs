use crate::{Result, RokoError};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use tracing::debug;

/// Frames handed to rubato per call
const CHUNK_FRAMES: usize = 1024;

/// Sample-rate converter used when the output device cannot run at the
/// speech rate natively
pub struct AudioResampler {
    resampler: SincFixedIn<f32>,
    input_rate: u32,
    output_rate: u32,
}

impl AudioResampler {
    /// Create a mono resampler from `input_rate` to `output_rate`
    pub fn new(input_rate: u32, output_rate: u32) -> Result<Self> {
        if input_rate == 0 || output_rate == 0 {
            return Err(RokoError::ConfigError(
                "Sample rates must be greater than 0".into(),
            ));
        }

        let params = SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };

        let resampler = SincFixedIn::<f32>::new(
            output_rate as f64 / input_rate as f64,
            2.0,
            params,
            CHUNK_FRAMES,
            1,
        )
        .map_err(|e| RokoError::AudioDecodeError(format!("Failed to create resampler: {}", e)))?;

        debug!("Created resampler: {} Hz -> {} Hz", input_rate, output_rate);

        Ok(Self {
            resampler,
            input_rate,
            output_rate,
        })
    }

    /// Resample a whole mono buffer.
    ///
    /// The sinc filter's delay is trimmed from the head and flushed out of
    /// the tail, so the output lines up with the input and has
    /// `ceil(len * ratio)` frames.
    pub fn resample(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let expected = (input.len() as u64 * self.output_rate as u64)
            .div_ceil(self.input_rate as u64) as usize;
        let delay = self.resampler.output_delay();
        let mut output = Vec::with_capacity(delay + expected + CHUNK_FRAMES * 2);

        let mut chunks = input.chunks_exact(CHUNK_FRAMES);
        for chunk in chunks.by_ref() {
            let processed = self
                .resampler
                .process(&[chunk], None)
                .map_err(resample_error)?;
            output.extend_from_slice(&processed[0]);
        }

        let tail = chunks.remainder();
        if !tail.is_empty() {
            let processed = self
                .resampler
                .process_partial(Some(&[tail]), None)
                .map_err(resample_error)?;
            output.extend_from_slice(&processed[0]);
        }

        // Push silence through until the delayed tail has come out
        while output.len() < delay + expected {
            let processed = self
                .resampler
                .process_partial(None::<&[&[f32]]>, None)
                .map_err(resample_error)?;
            if processed[0].is_empty() {
                break;
            }
            output.extend_from_slice(&processed[0]);
        }

        output.drain(..delay.min(output.len()));
        output.truncate(expected);

        debug!("Resampled {} frames -> {} frames", input.len(), output.len());
        Ok(output)
    }
}

fn resample_error(e: rubato::ResampleError) -> RokoError {
    RokoError::AudioDecodeError(format!("Resampling failed: {}", e))
}

/// Resample a mono buffer in one step
pub fn resample_audio(input: &[f32], input_rate: u32, output_rate: u32) -> Result<Vec<f32>> {
    if input_rate == output_rate {
        return Ok(input.to_vec());
    }

    AudioResampler::new(input_rate, output_rate)?.resample(input)
}
