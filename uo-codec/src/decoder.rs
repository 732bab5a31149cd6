// UO Codec
// Copyright (c) 2026 The UO Codec Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The UO frame decoder.

use crate::bits::BitReader;
use crate::gain::GainPredictor;
use crate::lsf;
use crate::tables::{
    CODEBOOK_DELTA_GAIN, CODEBOOK_VECTOR_TABLE, LSF_INDEX_BITS, LSF_TABLE,
    SUBFRAME_LAG_COEFFICIENTS,
};

/// The number of audio samples produced per packed frame.
pub const SAMPLES_PER_FRAME: usize = 192;

/// The length of a packed frame in bytes.
pub const FRAME_LEN: usize = 48;

/// The order of the short-term synthesis filter.
pub(crate) const LPC_ORDER: usize = 10;

/// Subframes per frame; each carries its own lag parameters and interpolated
/// LPC coefficients.
const SUBFRAME_COUNT: usize = 4;

/// Codebook steps per subframe, each synthesizing four samples.
const STEPS_PER_SUBFRAME: usize = 12;

/// Samples synthesized by one codebook step.
const STEP_LEN: usize = 4;

/// Samples synthesized per subframe, and the per-subframe shift of the lag
/// window.
const SUBFRAME_LEN: usize = STEPS_PER_SUBFRAME * STEP_LEN;

/// Length of the sliding window of recent pre-synthesis excitation values.
const LAG_WINDOW_LEN: usize = 169;

/// Length of the sliding window of recent synthesized output values.
const SYNTHESIS_WINDOW_LEN: usize = 10;

/// Decodes packed UO frames into audio samples.
///
/// The decoder carries state across frames: the previous frame's LSF values,
/// the excitation history indexed by the long-term predictor, the output
/// history driving the short-term synthesis filter, and the adaptive gain
/// model. Frames from one stream must therefore be decoded in order on one
/// instance. Instances are independent of each other.
pub struct FrameDecoder {
    /// The previous frame's quantized LSF values. The decoder interpolates
    /// from these towards the new frame's values across the four subframes.
    /// Absent until a frame has been decoded, and cleared by a reset, in
    /// which case the new frame's values are used for the whole frame.
    prev_lsf: Option<[f32; LPC_ORDER]>,
    /// Sliding window of recent output samples for the synthesis filter,
    /// oldest first. Shifted by four for every codebook step.
    synthesis_window: [f32; SYNTHESIS_WINDOW_LEN],
    /// Sliding window of recent pre-synthesis excitation values, oldest
    /// first. The top 48 values are rewritten every subframe.
    lag_window: [f32; LAG_WINDOW_LEN],
    /// The adaptive codebook gain model.
    gain: GainPredictor,
}

impl FrameDecoder {
    /// Instantiate a new `FrameDecoder`. A new decoder starts in the reset
    /// state.
    pub fn new() -> Self {
        FrameDecoder {
            prev_lsf: None,
            synthesis_window: [0.0; SYNTHESIS_WINDOW_LEN],
            lag_window: [0.0; LAG_WINDOW_LEN],
            gain: GainPredictor::new(),
        }
    }

    /// Reset the decoder state, as demanded by the container at the start of
    /// certain blocks. Resetting a freshly constructed decoder is a no-op.
    pub fn reset(&mut self) {
        self.prev_lsf = None;
        self.synthesis_window = [0.0; SYNTHESIS_WINDOW_LEN];
        self.lag_window = [0.0; LAG_WINDOW_LEN];
        self.gain.reset();
    }

    /// Decode one packed frame into its 192 audio samples.
    ///
    /// Samples are nominally in the range -1024 to +1024, but are neither
    /// verified nor clipped here. The frame should be 48 bytes; a shorter
    /// slice decodes as if zero-padded and never fails.
    pub fn decode_frame(&mut self, frame: &[u8]) -> [f32; SAMPLES_PER_FRAME] {
        let mut bits = BitReader::new(frame);
        let mut output = [0.0; SAMPLES_PER_FRAME];

        // The frame leads with the lag parameters for each of the four
        // subframes: an index into the coefficient book and a raw lag.
        let mut lag_coefficients = [[0.0; 3]; SUBFRAME_COUNT];
        let mut lags = [0; SUBFRAME_COUNT];
        for subframe in 0..SUBFRAME_COUNT {
            lag_coefficients[subframe] = SUBFRAME_LAG_COEFFICIENTS[bits.read_bits(6) as usize];
            lags[subframe] = bits.read_bits(7) as usize;
        }

        // Next are the ten LSF indices, quantized with decreasing precision
        // towards the coefficients that predict from the oldest samples.
        let mut lsf = [0.0; LPC_ORDER];
        for (value, (row, &width)) in lsf.iter_mut().zip(LSF_TABLE.iter().zip(&LSF_INDEX_BITS)) {
            *value = row[bits.read_bits(width) as usize];
        }

        for subframe in 0..SUBFRAME_COUNT {
            // Derive this subframe's LPC coefficients, interpolating from the
            // previous frame's LSF values when they are available.
            let lpc = match &self.prev_lsf {
                Some(prev) => lsf::lsf_to_lpc(&lsf::interpolate(prev, &lsf, subframe)),
                None => lsf::lsf_to_lpc(&lsf),
            };

            // Advance the lag window to make room for this subframe's values.
            self.lag_window.copy_within(SUBFRAME_LEN.., 0);

            for step in 0..STEPS_PER_SUBFRAME {
                // Advance the gain model, reselecting the gain power at the
                // start of every subframe after the first, and derive the
                // absolute codebook gain from the logarithmic level.
                let gain_level = self.gain.step(subframe != 0 && step == 0);
                let mut codebook_gain =
                    10f64.powf((f64::from(gain_level) + 32.0) / 20.0) as f32;

                let codebook_sign = bits.read_bit();
                let codebook_index = bits.read_bits(5) as usize;

                // The codebook entry feeds the gain level for the next step.
                self.gain.advance(gain_level, CODEBOOK_DELTA_GAIN[codebook_index]);

                if codebook_sign {
                    codebook_gain = -codebook_gain;
                }

                // Combine the scaled codebook vector with the pitch vector
                // predicted from the lag window, writing the excitation back
                // into the window at the position about to be filled.
                let write_at = LAG_WINDOW_LEN - SUBFRAME_LEN + STEP_LEN * step;
                let pitch =
                    self.pitch_vector(write_at, lags[subframe], &lag_coefficients[subframe]);

                let mut combined = [0.0; STEP_LEN];
                for i in 0..STEP_LEN {
                    combined[i] = codebook_gain * CODEBOOK_VECTOR_TABLE[codebook_index][i]
                        + pitch[i];
                    self.lag_window[write_at + i] = combined[i];
                }

                self.synthesize(&combined, &lpc);

                // Emit lagged by one sample: the oldest of the four samples
                // just synthesized completes the previous step's group, and
                // the newest is held back for the next.
                let emit_at = (subframe * STEPS_PER_SUBFRAME + step) * STEP_LEN;
                output[emit_at..emit_at + STEP_LEN].copy_from_slice(
                    &self.synthesis_window[SYNTHESIS_WINDOW_LEN - 5..SYNTHESIS_WINDOW_LEN - 1],
                );
            }
        }

        // Keep this frame's LSF values for interpolation in the next frame.
        self.prev_lsf = Some(lsf);

        output
    }

    /// Predict four samples from the lag window using the subframe's lag and
    /// three-tap coefficients, reading backwards from just before the write
    /// position. The first coefficient weighs the most recent tap.
    fn pitch_vector(
        &self,
        write_at: usize,
        lag: usize,
        coefficients: &[f32; 3],
    ) -> [f32; STEP_LEN] {
        // The window is sized for the lags valid bitstreams produce; raw lag
        // values outside that range would read past either end and are
        // saturated instead of trusted.
        let read_at = write_at
            .saturating_sub(lag + 1)
            .min(LAG_WINDOW_LEN - STEP_LEN - 2);

        let mut pitch = [0.0; STEP_LEN];
        for (i, value) in pitch.iter_mut().enumerate() {
            *value = self.lag_window[read_at + i] * coefficients[2]
                + self.lag_window[read_at + i + 1] * coefficients[1]
                + self.lag_window[read_at + i + 2] * coefficients[0];
        }

        pitch
    }

    /// Run the short-term synthesis filter over four new excitation values,
    /// appending the four synthesized samples to the synthesis window.
    ///
    /// Each output subtracts the LPC-weighted previous ten outputs, spanning
    /// the window and the samples synthesized just before it within this
    /// call. The term order matches the reference decoder exactly; floating
    /// point addition is not associative, so reordering would perturb the
    /// lowest bits of the output.
    fn synthesize(&mut self, combined: &[f32; STEP_LEN], lpc: &[f32; LPC_ORDER + 1]) {
        let window = &self.synthesis_window;

        // The first line relies on lpc[0] being 1, as it always is.
        let mut o0 = combined[0];
        for k in 1..=LPC_ORDER {
            o0 -= lpc[k] * window[10 - k];
        }

        let mut o1 = combined[1];
        o1 -= lpc[1] * o0;
        for k in 2..=LPC_ORDER {
            o1 -= lpc[k] * window[11 - k];
        }

        let mut o2 = combined[2];
        o2 -= lpc[1] * o1;
        o2 -= lpc[2] * o0;
        for k in 3..=LPC_ORDER {
            o2 -= lpc[k] * window[12 - k];
        }

        let mut o3 = combined[3];
        o3 -= lpc[1] * o2;
        o3 -= lpc[2] * o1;
        o3 -= lpc[3] * o0;
        for k in 4..=LPC_ORDER {
            o3 -= lpc[k] * window[13 - k];
        }

        self.synthesis_window.copy_within(STEP_LEN.., 0);
        self.synthesis_window[6] = o0;
        self.synthesis_window[7] = o1;
        self.synthesis_window[8] = o2;
        self.synthesis_window[9] = o3;
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        FrameDecoder::new()
    }
}
