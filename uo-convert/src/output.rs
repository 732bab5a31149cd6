// UO Codec
// Copyright (c) 2026 The UO Codec Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! WAV container output.
//!
//! Writes the RIFF/WAVE header up front, which requires the total sample
//! count before any audio is written; the demuxer's counting pass provides
//! it. Both encodings carry a `fact` chunk ahead of the sample data.

use std::io;
use std::io::Write;

use uo_codec::conv;
use uo_codec::SAMPLE_RATE;

/// The sample encodings the writer can produce.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Signed 16-bit PCM.
    Pcm16,
    /// G.711 μ-law bytes.
    MuLaw,
}

impl OutputFormat {
    fn bytes_per_sample(&self) -> u32 {
        match self {
            OutputFormat::Pcm16 => 2,
            OutputFormat::MuLaw => 1,
        }
    }

    /// The length of the `fmt ` chunk body. The μ-law variant is a non-PCM
    /// format tag and carries the (empty) extension size field.
    fn format_chunk_len(&self) -> u32 {
        match self {
            OutputFormat::Pcm16 => 16,
            OutputFormat::MuLaw => 18,
        }
    }
}

/// Writes decoded samples into a mono 8 kHz WAV file.
pub struct WavWriter<W: Write> {
    out: W,
    format: OutputFormat,
    sample_count: u32,
}

impl<W: Write> WavWriter<W> {
    /// Instantiate a new `WavWriter` for the given sample count, which must
    /// match the number of samples subsequently written.
    pub fn new(out: W, format: OutputFormat, sample_count: usize) -> Self {
        WavWriter { out, format, sample_count: sample_count as u32 }
    }

    /// Write the WAV header. This must be called before writing samples.
    pub fn write_header(&mut self) -> io::Result<()> {
        let data_len = self.format.bytes_per_sample() * self.sample_count;
        let fmt_len = self.format.format_chunk_len();

        // The RIFF content spans the WAVE form code and the fmt, fact, and
        // data chunks, each behind an 8-byte chunk header.
        let content_len = 4 + (8 + fmt_len) + (8 + 4) + (8 + data_len);

        self.out.write_all(b"RIFF")?;
        self.write_u32(content_len)?;
        self.out.write_all(b"WAVE")?;

        self.out.write_all(b"fmt ")?;
        self.write_u32(fmt_len)?;
        self.write_format_chunk()?;

        self.out.write_all(b"fact")?;
        self.write_u32(4)?;
        self.write_u32(self.sample_count)?;

        self.out.write_all(b"data")?;
        self.write_u32(data_len)?;

        Ok(())
    }

    fn write_format_chunk(&mut self) -> io::Result<()> {
        match self.format {
            OutputFormat::Pcm16 => {
                self.write_u16(1)?; // format tag: PCM
                self.write_u16(1)?; // channels
                self.write_u32(SAMPLE_RATE)?;
                self.write_u32(SAMPLE_RATE * 2)?; // average bytes per second
                self.write_u16(2)?; // block align
                self.write_u16(16)?; // bits per sample
            }
            OutputFormat::MuLaw => {
                self.write_u16(7)?; // format tag: G.711 mu-law
                self.write_u16(1)?; // channels
                self.write_u32(SAMPLE_RATE)?;
                self.write_u32(SAMPLE_RATE)?; // average bytes per second
                self.write_u16(1)?; // block align
                self.write_u16(8)?; // bits per sample
                self.write_u16(0)?; // extension size
            }
        }
        Ok(())
    }

    /// Encode and write a batch of decoded samples.
    pub fn write_samples(&mut self, samples: &[f32]) -> io::Result<()> {
        match self.format {
            OutputFormat::Pcm16 => {
                for &sample in samples {
                    self.out.write_all(&conv::to_pcm16(sample).to_le_bytes())?;
                }
            }
            OutputFormat::MuLaw => {
                for &sample in samples {
                    self.out.write_all(&[conv::to_mulaw(sample)])?;
                }
            }
        }
        Ok(())
    }

    /// Flush buffered output. The header and all samples remain written.
    pub fn finish(mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.out.write_all(&value.to_le_bytes())
    }

    fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.out.write_all(&value.to_le_bytes())
    }
}
