//! Early-reflection diffuser.
//!
//! Nine allpass sections per channel in three layers of three. The first
//! layer is fed by the input; each later layer is fed by a butterfly of the
//! previous layer's outputs, `(p, q, r) -> (q + r - p, p + r - q, p + q - r)`.
//! The last layer is summed and scaled by a quarter.
//!
//! Both channels use the same nine lengths but visit them in a different
//! order (left: `ABC DEF GHI`, right: `CFI DEH ABG`), so the two diffusion
//! patterns decorrelate.

use kplate_core::AllpassSection;

use crate::config::EARLY_SECTIONS;

const OUTPUT_SCALE: f64 = 0.25;

type Layers = [[usize; 3]; 3];

const LEFT_LAYERS: Layers = [[0, 1, 2], [3, 4, 5], [6, 7, 8]];
const RIGHT_LAYERS: Layers = [[2, 5, 8], [3, 4, 7], [0, 1, 6]];

#[inline]
fn butterfly([p, q, r]: [f64; 3]) -> [f64; 3] {
    [q + r - p, p + r - q, p + q - r]
}

fn diffuse(sections: &mut [AllpassSection; EARLY_SECTIONS], layers: &Layers, input: f64) -> f64 {
    let mut feeds = [input; 3];
    let mut taps = [0.0; 3];
    for (depth, layer) in layers.iter().enumerate() {
        for ((tap, &feed), &section) in taps.iter_mut().zip(&feeds).zip(layer) {
            *tap = sections[section].process(feed);
        }
        if depth + 1 < layers.len() {
            feeds = butterfly(taps);
        }
    }
    (taps[0] + taps[1] + taps[2]) * OUTPUT_SCALE
}

/// Stereo early-reflection network.
#[derive(Debug, Clone)]
pub struct EarlyReflections {
    left: [AllpassSection; EARLY_SECTIONS],
    right: [AllpassSection; EARLY_SECTIONS],
}

impl EarlyReflections {
    /// Builds both channels from one table of section lengths (A through I).
    pub fn new(lengths: &[usize; EARLY_SECTIONS]) -> Self {
        Self {
            left: core::array::from_fn(|i| AllpassSection::new(lengths[i])),
            right: core::array::from_fn(|i| AllpassSection::new(lengths[i])),
        }
    }

    /// Diffuses one stereo frame.
    #[inline]
    pub fn process(&mut self, left: f64, right: f64) -> (f64, f64) {
        (
            diffuse(&mut self.left, &LEFT_LAYERS, left),
            diffuse(&mut self.right, &RIGHT_LAYERS, right),
        )
    }

    /// Silences every section.
    pub fn reset(&mut self) {
        for section in self.left.iter_mut().chain(self.right.iter_mut()) {
            section.reset();
        }
    }
}
