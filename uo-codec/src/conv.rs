// UO Codec
// Copyright (c) 2026 The UO Codec Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `conv` module converts decoded samples to output sample formats.
//!
//! The decoder produces floating point samples nominally between -1024 and
//! +1024. Downstream consumers want either signed 16-bit PCM or G.711 μ-law
//! bytes; both conversions clamp rather than trusting the nominal range.

use lazy_static::lazy_static;

lazy_static! {
    /// Map of (signed 14-bit linear value + 8192) to μ-law output byte, laid
    /// out per the quantized G.711 μ-law intervals.
    static ref MU_LAW_MAP: [u8; 16384] = {
        let mut map = [0u8; 16384];

        // Positive inputs: +8158 down to +1 over codes 0x80..=0xfe, in runs
        // of 16 intervals per halving interval width (256 down to 2, with
        // the last run one interval short).
        let mut linear: usize = 8192 + 8158;
        let mut interval = 256;
        for code in 0x80..0xff {
            for _ in 0..interval {
                map[linear] = code as u8;
                linear -= 1;
            }
            if (code & 0xf) == 0xf {
                interval >>= 1;
            }
        }

        // Negative inputs: -8159 up to -2 over codes 0x00..=0x7e.
        let mut linear: usize = 8192 - 8159;
        let mut interval = 256;
        for code in 0x00..0x7f {
            for _ in 0..interval {
                map[linear] = code as u8;
                linear += 1;
            }
            if (code & 0xf) == 0xf {
                interval >>= 1;
            }
        }

        // Zero and minus one have dedicated codes.
        map[8191] = 0x7f;
        map[8192] = 0xff;

        // Values above the top interval clip to the loudest positive code.
        // (The negative end clips to 0x00, which the map holds by default.)
        for entry in map[8192 + 8158..].iter_mut() {
            *entry = 0x80;
        }

        map
    };
}

/// Convert a decoded sample to a signed 16-bit PCM sample.
pub fn to_pcm16(sample: f32) -> i16 {
    let mut scaled = sample * 0.125 * 256.0;
    if scaled < -32767.0 {
        scaled = -32767.0;
    }
    if scaled > 32767.0 {
        scaled = 32767.0;
    }
    scaled as i16
}

/// Convert a decoded sample to a G.711 μ-law byte.
pub fn to_mulaw(sample: f32) -> u8 {
    let linear14 = (i32::from(to_pcm16(sample)) + 32768) >> 2;
    MU_LAW_MAP[linear14 as usize]
}

#[cfg(test)]
mod tests {
    use super::{to_mulaw, to_pcm16, MU_LAW_MAP};

    #[test]
    fn verify_to_pcm16_scales_by_32() {
        assert_eq!(to_pcm16(0.0), 0);
        assert_eq!(to_pcm16(1.0), 32);
        assert_eq!(to_pcm16(-1.0), -32);
        assert_eq!(to_pcm16(1000.0), 32000);
    }

    #[test]
    fn verify_to_pcm16_clamps_full_scale() {
        // Nominal full scale is 1024, which would scale to 32768.
        assert_eq!(to_pcm16(1024.0), 32767);
        assert_eq!(to_pcm16(-1024.0), -32767);
        assert_eq!(to_pcm16(5000.0), 32767);
        assert_eq!(to_pcm16(-5000.0), -32767);
    }

    #[test]
    fn verify_mulaw_special_codes() {
        // Linear zero and minus one have the dedicated μ-law codes.
        assert_eq!(MU_LAW_MAP[8192], 0xff);
        assert_eq!(MU_LAW_MAP[8191], 0x7f);

        // Positive full scale compresses to the loudest positive code, and
        // negative full scale to the loudest negative code.
        assert_eq!(MU_LAW_MAP[16383], 0x80);
        assert_eq!(MU_LAW_MAP[0], 0x00);
    }

    #[test]
    fn verify_mulaw_interval_boundaries() {
        // +8158 is the top of the first positive run of 256-wide intervals.
        assert_eq!(MU_LAW_MAP[8192 + 8158], 0x80);
        assert_eq!(MU_LAW_MAP[8192 + 8158 - 255], 0x80);
        assert_eq!(MU_LAW_MAP[8192 + 8158 - 256], 0x81);

        // -8159 is the bottom of the first negative run.
        assert_eq!(MU_LAW_MAP[8192 - 8159], 0x00);
        assert_eq!(MU_LAW_MAP[8192 - 8159 + 256], 0x01);

        // The quietest codes cover runs of two.
        assert_eq!(MU_LAW_MAP[8192 + 1], 0xfe);
        assert_eq!(MU_LAW_MAP[8192 - 2], 0x7e);
    }

    #[test]
    fn verify_to_mulaw_of_silence() {
        assert_eq!(to_mulaw(0.0), 0xff);
    }
}
