//! Multi-octave sinusoidal wave field.
//!
//! A smooth continuous scalar field: per-octave amplitudes and phase offsets
//! are drawn once at construction, and every query is a pure sum of sines
//! squashed into `(0, 1)` by a logistic. Cheap enough to recompute that no
//! memoization is kept.

use rand::Rng;

use strata_rand::{Seed, det_exp, det_sin, keyed_rng};

use crate::FieldError;

/// One octave's fixed parameters: amplitude and a phase offset per axis.
#[derive(Clone, Copy, Debug)]
struct WaveOctave {
    amplitude: f64,
    phase_x: f64,
    phase_y: f64,
}

/// Smooth low-frequency modulation field (soil depth, moisture and the like),
/// not a source of fine fractal detail.
///
/// Octave `i` contributes `a_i * sin((c - phase_i) / e^(i+1))` per axis, with
/// `a_i = i + 1` and phases drawn from the seeded PRNG scaled by `e^i`, so
/// later octaves are both longer-waved and weightier. The octave table is
/// immutable after construction; queries are pure functions of `(x, y)`.
pub struct MultiOctaveWaveField {
    octaves: Vec<WaveOctave>,
    temperature: f64,
}

impl MultiOctaveWaveField {
    /// Derive the octave table from the seed.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Octaves`] for a zero octave count and
    /// [`FieldError::Temperature`] for a non-positive temperature.
    pub fn new(seed: Seed, octave_count: usize, temperature: f64) -> Result<Self, FieldError> {
        if octave_count == 0 {
            return Err(FieldError::Octaves);
        }
        if temperature <= 0.0 {
            return Err(FieldError::Temperature(temperature));
        }

        let mut rng = keyed_rng(seed, "wave-phases", &[]);
        let octaves = (0..octave_count)
            .map(|i| {
                let scale = det_exp(i as f64);
                WaveOctave {
                    amplitude: (i + 1) as f64,
                    phase_x: rng.random::<f64>() * scale,
                    phase_y: rng.random::<f64>() * scale,
                }
            })
            .collect();

        Ok(Self {
            octaves,
            temperature,
        })
    }

    /// Number of octaves in the fixed table.
    pub fn octave_count(&self) -> usize {
        self.octaves.len()
    }

    /// Field value at `(x, y)`, in `(0, 1)`.
    pub fn value(&self, x: f64, y: f64) -> f64 {
        let mut sum = 0.0;
        for (i, octave) in self.octaves.iter().enumerate() {
            let wavelength = det_exp((i + 1) as f64);
            sum += octave.amplitude * det_sin((x - octave.phase_x) / wavelength);
            sum += octave.amplitude * det_sin((y - octave.phase_y) / wavelength);
        }
        logistic(sum, self.temperature)
    }
}

/// Map an unbounded value into `(0, 1)`; higher temperature flattens the
/// response toward `0.5`.
fn logistic(v: f64, temperature: f64) -> f64 {
    1.0 / (1.0 + det_exp(-v / temperature))
}
