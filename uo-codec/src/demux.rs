// UO Codec
// Copyright (c) 2026 The UO Codec Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `demux` module splits a UO stream into packed frames.
//!
//! A UO stream is a sequence of blocks. Every block starts with a marker word
//! followed by a block type word, and carries up to four consecutive 48-byte
//! frames. A frame position holding another marker word instead begins the
//! next block; encoders guarantee frame data never leads with the marker.

use log::{debug, error};

use crate::decoder::{FRAME_LEN, SAMPLES_PER_FRAME};
use crate::errors::{decode_error, unsupported_error, Result};

/// The marker word leading every block.
const BLOCK_MARKER: u16 = 0xffaa;

/// Block type word: full-rate block.
const BLOCK_TYPE_FULL_RATE: u16 = 0x0040;

/// Block type word: full-rate block preceded by a decoder state reset. The
/// header carries two additional bytes which are consumed and discarded.
const BLOCK_TYPE_FULL_RATE_RESET: u16 = 0x0140;

/// The maximum number of frames in one block.
const FRAMES_PER_BLOCK: usize = 4;

/// One packed frame split out of a UO stream.
pub struct UoFrame<'a> {
    /// The frame payload. 48 bytes, except that the last frame of a stream
    /// may be truncated; the decoder treats missing bytes as zero.
    pub data: &'a [u8],
    /// Byte offset of the frame within the stream.
    pub pos: usize,
    /// True when the decoder state must be reset before decoding this frame.
    pub reset: bool,
}

/// Splits a UO stream into its packed frames.
pub struct UoReader<'a> {
    buf: &'a [u8],
    pos: usize,
    /// Frames that may still be read from the current block.
    block_frames_left: usize,
    /// A reset block header was seen and the reset has not yet been attached
    /// to a frame. Sticky across blocks that contain no frames.
    pending_reset: bool,
}

impl<'a> UoReader<'a> {
    /// Instantiate a new `UoReader` over a whole UO stream.
    pub fn new(buf: &'a [u8]) -> Self {
        UoReader { buf, pos: 0, block_frames_left: 0, pending_reset: false }
    }

    /// The marker or block type word at the given offset, little-endian.
    fn word_at(&self, pos: usize) -> u16 {
        u16::from(self.buf[pos]) | (u16::from(self.buf[pos + 1]) << 8)
    }

    /// Return the next frame of the stream, or `None` at the end of the
    /// stream. Fails on a malformed or unrecognized block header.
    pub fn next_frame(&mut self) -> Result<Option<UoFrame<'a>>> {
        loop {
            // Take a frame from the current block while at least one whole
            // word past a frame's first word remains, stopping early if the
            // next block's marker is found instead.
            if self.block_frames_left > 0 && self.pos + 4 < self.buf.len() {
                if self.word_at(self.pos) != BLOCK_MARKER {
                    let pos = self.pos;
                    let data = &self.buf[pos..(pos + FRAME_LEN).min(self.buf.len())];

                    self.block_frames_left -= 1;
                    self.pos += FRAME_LEN;

                    let reset = self.pending_reset;
                    self.pending_reset = false;

                    return Ok(Some(UoFrame { data, pos, reset }));
                }

                self.block_frames_left = 0;
            }

            // A block header is at least the marker, the type, and one word
            // of payload; anything shorter is trailing noise, not a block.
            if self.pos + 6 >= self.buf.len() {
                return Ok(None);
            }

            if self.word_at(self.pos) != BLOCK_MARKER {
                error!("expected block marker at offset {}", self.pos);
                return decode_error("uo: missing block marker");
            }

            let block_type = self.word_at(self.pos + 2);
            debug!("block type {:#06x} at offset {}", block_type, self.pos);

            match block_type {
                BLOCK_TYPE_FULL_RATE => {
                    self.pos += 4;
                }
                BLOCK_TYPE_FULL_RATE_RESET => {
                    self.pos += 6;
                    self.pending_reset = true;
                }
                _ => {
                    error!("unsupported block type {:#06x} at offset {}", block_type, self.pos);
                    return unsupported_error("uo: unsupported block type");
                }
            }

            self.block_frames_left = FRAMES_PER_BLOCK;
        }
    }
}

impl<'a> Iterator for UoReader<'a> {
    type Item = Result<UoFrame<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

/// Count the audio samples a UO stream will decode to, without decoding.
/// Used to size output headers before transcoding.
pub fn count_samples(buf: &[u8]) -> Result<usize> {
    let mut reader = UoReader::new(buf);
    let mut samples = 0;

    while reader.next_frame()?.is_some() {
        samples += SAMPLES_PER_FRAME;
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::{count_samples, UoReader};
    use crate::errors::Error;

    /// Build a stream from block headers and zero-filled frames.
    fn stream(blocks: &[(u16, usize)]) -> Vec<u8> {
        let mut buf = Vec::new();
        for &(block_type, frames) in blocks {
            buf.extend_from_slice(&0xffaau16.to_le_bytes());
            buf.extend_from_slice(&block_type.to_le_bytes());
            if block_type == 0x0140 {
                buf.extend_from_slice(&[0u8; 2]);
            }
            buf.resize(buf.len() + frames * 48, 0);
        }
        buf
    }

    #[test]
    fn verify_empty_stream_has_no_frames() {
        let mut reader = UoReader::new(&[]);

        assert!(reader.next_frame().unwrap().is_none());
        assert_eq!(count_samples(&[]).unwrap(), 0);
    }

    #[test]
    fn verify_reset_block_with_one_frame() {
        let buf = stream(&[(0x0140, 1)]);
        assert_eq!(buf.len(), 54);

        let mut reader = UoReader::new(&buf);

        let frame = reader.next_frame().unwrap().unwrap();
        assert!(frame.reset);
        assert_eq!(frame.pos, 6);
        assert_eq!(frame.data.len(), 48);
        assert!(reader.next_frame().unwrap().is_none());

        assert_eq!(count_samples(&buf).unwrap(), 192);
    }

    #[test]
    fn verify_consecutive_blocks_without_reset() {
        let buf = stream(&[(0x0040, 4), (0x0040, 1)]);

        let mut reader = UoReader::new(&buf);
        let mut frames = 0;
        while let Some(frame) = reader.next_frame().unwrap() {
            assert!(!frame.reset);
            frames += 1;
        }

        assert_eq!(frames, 5);
        assert_eq!(count_samples(&buf).unwrap(), 5 * 192);
    }

    #[test]
    fn verify_reset_attaches_only_to_first_frame_of_block() {
        let buf = stream(&[(0x0140, 2), (0x0040, 2), (0x0140, 1)]);

        let resets: Vec<bool> = UoReader::new(&buf).map(|frame| frame.unwrap().reset).collect();

        assert_eq!(resets, [true, false, false, false, true]);
    }

    #[test]
    fn verify_reset_is_sticky_across_empty_blocks() {
        // A reset block containing no frames carries its reset over to the
        // first frame of the next block.
        let buf = stream(&[(0x0140, 0), (0x0040, 1)]);

        let resets: Vec<bool> = UoReader::new(&buf).map(|frame| frame.unwrap().reset).collect();

        assert_eq!(resets, [true]);
    }

    #[test]
    fn verify_missing_marker_is_a_decode_error() {
        let buf = [0x12, 0x34, 0, 0, 0, 0, 0, 0];

        match UoReader::new(&buf).next_frame() {
            Err(Error::DecodeError(_)) => (),
            _ => panic!("expected a decode error"),
        }
    }

    #[test]
    fn verify_unknown_block_type_is_unsupported() {
        let buf = stream(&[(0x0050, 1)]);

        match UoReader::new(&buf).next_frame() {
            Err(Error::Unsupported(_)) => (),
            _ => panic!("expected an unsupported feature error"),
        }
    }

    #[test]
    fn verify_fifth_consecutive_frame_is_an_error() {
        // A block holds at most four frames; data where the next block header
        // is due is malformed.
        let buf = stream(&[(0x0040, 5)]);

        let mut reader = UoReader::new(&buf);
        for _ in 0..4 {
            assert!(reader.next_frame().unwrap().is_some());
        }

        match reader.next_frame() {
            Err(Error::DecodeError(_)) => (),
            _ => panic!("expected a decode error"),
        }
    }

    #[test]
    fn verify_trailing_frame_may_be_short() {
        let mut buf = stream(&[(0x0040, 1)]);
        buf.truncate(4 + 10);

        let mut reader = UoReader::new(&buf);
        let frame = reader.next_frame().unwrap().unwrap();

        assert_eq!(frame.data.len(), 10);
        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn verify_short_trailing_garbage_is_ignored() {
        // Fewer than seven bytes beyond the last frame cannot hold another
        // block and are ignored, marker or not.
        let mut buf = stream(&[(0x0040, 1)]);
        buf.extend_from_slice(&[0xaa, 0xff, 0x40, 0x00]);

        assert_eq!(count_samples(&buf).unwrap(), 192);
    }
}
