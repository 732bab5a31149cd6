// UO Codec
// Copyright (c) 2026 The UO Codec Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adaptive codebook gain model.
//!
//! The gain applied to each codebook vector is tracked as a 20·log10 level
//! with a range of 60 (-32 to +28), i.e. an absolute gain between 1 and 1000.
//! Two cascaded decaying energy accumulators, one driven by the squared
//! current level and one by the product of the current and previous levels,
//! feed an energy-ratio ladder that reselects the gain power at the start of
//! every subframe after the first.

use crate::tables::{CODEBOOK_GAIN_POWER_RATIOS_AND_VALUES, FALLBACK_CODEBOOK_GAIN_POWER};

/// Decay applied to each energy accumulator slot per update, 0.94 squared.
const GAIN_ENERGY_FACTOR: f32 = 0.94 * 0.94;

/// Lower bound of the logarithmic gain level, and the post-reset level.
const MIN_GAIN_LEVEL: f32 = -32.0;

/// Upper bound of the logarithmic gain level.
const MAX_GAIN_LEVEL: f32 = 28.0;

/// Feed a pair of gain levels into an energy accumulator.
///
/// Each slot decays by `GAIN_ENERGY_FACTOR` and absorbs the running
/// accumulator, so the slots form a cascade of increasingly smoothed
/// energies. Returns the new value of the top slot.
fn update_energy(gain1: f32, gain2: f32, energy: &mut [f32; 3]) -> f32 {
    let mut accumulator = gain1 * gain2;

    for slot in energy.iter_mut() {
        accumulator += GAIN_ENERGY_FACTOR * *slot;
        *slot = accumulator;
    }

    energy[2]
}

/// Cross-frame state of the gain model.
pub struct GainPredictor {
    current_level: f32,
    previous_level: f32,
    current_energy: [f32; 3],
    previous_energy: [f32; 3],
    power: f32,
}

impl GainPredictor {
    pub fn new() -> Self {
        GainPredictor {
            current_level: MIN_GAIN_LEVEL,
            previous_level: MIN_GAIN_LEVEL,
            current_energy: [0.0; 3],
            previous_energy: [0.0; 3],
            power: 0.0,
        }
    }

    pub fn reset(&mut self) {
        *self = GainPredictor::new();
    }

    /// Advance the energy accumulators by one codebook step and return the
    /// codebook gain level for the step, clamped to the -32 to +28 range.
    ///
    /// When `reselect_power` is set (the first value of every subframe after
    /// the first) the gain power is reselected from the ratio ladder using
    /// the top accumulator values, with the top current-energy value captured
    /// from before this step's update.
    pub fn step(&mut self, reselect_power: bool) -> f32 {
        let initial_energy = self.current_energy[2];

        let current_top =
            update_energy(self.current_level, self.current_level, &mut self.current_energy);
        let previous_top =
            update_energy(self.current_level, self.previous_level, &mut self.previous_energy);

        if reselect_power {
            let current = initial_energy * GAIN_ENERGY_FACTOR + current_top;
            let previous = previous_top * 1.88;

            self.power = FALLBACK_CODEBOOK_GAIN_POWER;
            for &(ratio, power) in CODEBOOK_GAIN_POWER_RATIOS_AND_VALUES.iter() {
                if current * ratio < previous {
                    self.power = power;
                    break;
                }
            }
        }

        (self.power * self.current_level).clamp(MIN_GAIN_LEVEL, MAX_GAIN_LEVEL)
    }

    /// Commit the level update for the next codebook step: the level the step
    /// actually used plus the codebook's delta gain. The sum is deliberately
    /// left unclamped; clamping happens when the next step derives its level.
    pub fn advance(&mut self, codebook_gain_level: f32, delta_gain: f32) {
        self.previous_level = self.current_level;
        self.current_level = codebook_gain_level + delta_gain;
    }
}

#[cfg(test)]
mod tests {
    use super::{update_energy, GainPredictor, GAIN_ENERGY_FACTOR};

    #[test]
    fn verify_update_energy_cascade() {
        let mut energy = [0.0; 3];

        // From rest every slot absorbs just the product.
        assert_eq!(update_energy(2.0, 3.0, &mut energy), 6.0);
        assert_eq!(energy, [6.0; 3]);

        // The accumulator then picks up one decayed slot per stage. The
        // expected values accumulate in the same order as the update.
        let decayed = GAIN_ENERGY_FACTOR * 6.0;
        let e0 = 1.0 + decayed;
        let e1 = e0 + decayed;
        let e2 = e1 + decayed;
        assert_eq!(update_energy(1.0, 1.0, &mut energy), e2);
        assert_eq!(energy, [e0, e1, e2]);
    }

    #[test]
    fn verify_update_energy_monotone_for_nonnegative_input() {
        let mut energy = [0.0; 3];
        let mut previous = energy;

        for _ in 0..64 {
            update_energy(5.0, 5.0, &mut energy);
            assert!(energy.iter().zip(previous.iter()).all(|(now, before)| now >= before));
            previous = energy;
        }
    }

    #[test]
    fn verify_first_reselection_picks_top_of_ladder() {
        let mut gain = GainPredictor::new();

        // From the reset state both accumulators hold (-32)^2 after one update,
        // so the previous energy (scaled by 1.88) exceeds the current energy
        // scaled by even the largest ratio, selecting the topmost power.
        let level = gain.step(true);

        assert_eq!(gain.power, 0.92);
        assert_eq!(level, 0.92 * -32.0);
    }

    #[test]
    fn verify_opposite_sign_levels_select_fallback() {
        let mut gain = GainPredictor::new();

        // A positive current level against the negative post-reset previous
        // level drives the previous energy negative while the current energy
        // stays positive; no ladder row can match and the fallback applies.
        gain.advance(10.0, 0.0);
        let level = gain.step(true);

        assert_eq!(gain.power, -0.10);
        assert_eq!(level, -0.10 * 10.0);
    }

    #[test]
    fn verify_step_clamps_gain_level() {
        let mut gain = GainPredictor::new();

        gain.advance(2000.0, 0.0);
        gain.step(true);
        gain.advance(2000.0, 0.0);
        let level = gain.step(false);

        assert!((-32.0..=28.0).contains(&level));
    }

    #[test]
    fn verify_reset_restores_initial_state() {
        let mut gain = GainPredictor::new();

        gain.step(false);
        gain.advance(4.0, 1.5);
        gain.step(true);
        gain.reset();

        assert_eq!(gain.current_level, -32.0);
        assert_eq!(gain.previous_level, -32.0);
        assert_eq!(gain.current_energy, [0.0; 3]);
        assert_eq!(gain.previous_energy, [0.0; 3]);
        assert_eq!(gain.power, 0.0);
    }
}
