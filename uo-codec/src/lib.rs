// UO Codec
// Copyright (c) 2026 The UO Codec Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A decoder for the UO narrowband speech codec.
//!
//! UO is a CELP-style codec carrying 8 kHz mono audio at 16 kbit/s in fixed
//! 24 ms frames of 192 samples. A stream is a sequence of marker-delimited
//! blocks of up to four 48-byte frames; certain blocks reset the decoder
//! state.
//!
//! [`UoReader`] splits a stream into frames, [`FrameDecoder`] turns each
//! frame into samples, and [`decode_all`] combines the two:
//!
//! ```no_run
//! let stream = std::fs::read("recording.uo")?;
//! let samples = uo_codec::decode_all(&stream)?;
//!
//! for sample in samples {
//!     let _pcm = uo_codec::conv::to_pcm16(sample);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Decoded samples are floating point values nominally between -1024 and
//! +1024; clipping and quantization are left to the consumer, with the usual
//! conversions provided by the [`conv`] module.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod bits;
pub mod conv;
pub mod decoder;
pub mod demux;
pub mod errors;

mod gain;
mod lsf;
mod tables;

pub use decoder::{FrameDecoder, FRAME_LEN, SAMPLES_PER_FRAME};
pub use demux::{count_samples, UoFrame, UoReader};
pub use errors::{Error, Result};

/// The sample rate of all UO streams, in Hz.
pub const SAMPLE_RATE: u32 = 8000;

/// Decode a whole UO stream into its audio samples.
///
/// Runs a [`FrameDecoder`] over every frame found by a [`UoReader`],
/// honouring the state resets the container demands.
pub fn decode_all(stream: &[u8]) -> Result<Vec<f32>> {
    let mut samples = Vec::with_capacity(count_samples(stream)?);

    let mut decoder = FrameDecoder::new();
    let mut reader = UoReader::new(stream);

    while let Some(frame) = reader.next_frame()? {
        if frame.reset {
            decoder.reset();
        }
        samples.extend_from_slice(&decoder.decode_frame(frame.data));
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::{decode_all, SAMPLES_PER_FRAME};

    #[test]
    fn verify_decode_all_of_empty_stream() {
        assert_eq!(decode_all(&[]).unwrap(), Vec::<f32>::new());
    }

    #[test]
    fn verify_decode_all_of_reset_block() {
        // A reset block with a single zero-filled frame: 6 header bytes then
        // 48 frame bytes.
        let mut stream = vec![0xaa, 0xff, 0x40, 0x01, 0, 0];
        stream.resize(54, 0);

        let samples = decode_all(&stream).unwrap();

        assert_eq!(samples.len(), SAMPLES_PER_FRAME);
        assert!(samples.iter().all(|sample| sample.is_finite()));
    }

    #[test]
    fn verify_decode_all_across_blocks() {
        // Four frames in a reset block followed by one frame in a plain
        // block decode to five frames of samples.
        let mut stream = vec![0xaa, 0xff, 0x40, 0x01, 0, 0];
        stream.resize(6 + 4 * 48, 0);
        stream.extend_from_slice(&[0xaa, 0xff, 0x40, 0x00]);
        stream.resize(stream.len() + 48, 0);

        let samples = decode_all(&stream).unwrap();

        assert_eq!(samples.len(), 5 * SAMPLES_PER_FRAME);
    }

    #[test]
    fn verify_decode_all_reports_malformed_streams() {
        assert!(decode_all(&[0u8; 64]).is_err());
    }
}
