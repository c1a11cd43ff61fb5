//! Plate characters as data.
//!
//! The four plates share one engine and differ only in the tables below:
//! early-reflection section lengths, the 5x5 grid of matrix line lengths,
//! the two fixed bandpass corners and the four filter resonances. Plate D
//! additionally shapes its input through `sin` before diffusion.
//!
//! Lengths are integer samples at the internal (decimated) rate, so they are
//! independent of the host sample rate.

use core::fmt;

/// Mixing stages in the feedback matrix.
pub const GROUPS: usize = 5;
/// Delay lines per mixing stage.
pub const LINES_PER_GROUP: usize = 5;
/// Allpass sections per channel in the early-reflection diffuser.
pub const EARLY_SECTIONS: usize = 9;

/// Fixed parameters of one plate character.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateConfig {
    /// Display name.
    pub name: &'static str,
    /// Early-reflection section lengths, sections A through I.
    pub early: [usize; EARLY_SECTIONS],
    /// Matrix line lengths, `grid[row * 5 + col]` for taps A through Y.
    pub grid: [usize; GROUPS * LINES_PER_GROUP],
    /// Corner of the first loss filter in Hz, before damping.
    pub fix_a_hz: f64,
    /// Corner of the last loss filter in Hz, before damping.
    pub fix_d_hz: f64,
    /// Resonance of loss filters A through D.
    pub resonance: [f64; 4],
    /// Shape the padded input with `sin` (plate D).
    pub input_shaping: bool,
}

impl PlateConfig {
    /// Length of line `line` in left-channel group `group` (grid rows).
    #[inline]
    pub fn left_length(&self, group: usize, line: usize) -> usize {
        self.grid[group * LINES_PER_GROUP + line]
    }

    /// Length of line `line` in right-channel group `group`.
    ///
    /// The right channel walks the grid by columns, last column first, so
    /// its group 0 is taps E, J, O, T, Y.
    #[inline]
    pub fn right_length(&self, group: usize, line: usize) -> usize {
        self.grid[line * LINES_PER_GROUP + (LINES_PER_GROUP - 1 - group)]
    }

    /// Shortest route through the five left and right groups, in engine ticks.
    ///
    /// Nothing reaches the wet output earlier than predelay plus this.
    pub fn shortest_path(&self) -> (usize, usize) {
        let mut left = 0;
        let mut right = 0;
        for group in 0..GROUPS {
            left += (0..LINES_PER_GROUP)
                .map(|line| self.left_length(group, line))
                .min()
                .unwrap_or(0);
            right += (0..LINES_PER_GROUP)
                .map(|line| self.right_length(group, line))
                .min()
                .unwrap_or(0);
        }
        (left, right)
    }
}

/// Medium plate, even and bright.
pub static PLATE_A: PlateConfig = PlateConfig {
    name: "Plate A",
    early: [317, 373, 277, 257, 31, 241, 167, 181, 263],
    grid: [
        89, 433, 739, 367, 677, //
        349, 631, 151, 487, 709, //
        457, 751, 397, 613, 97, //
        673, 157, 419, 719, 359, //
        757, 233, 619, 127, 467,
    ],
    fix_a_hz: 6500.0,
    fix_d_hz: 2200.0,
    resonance: [0.72, 0.60, 0.60, 0.72],
    input_shaping: false,
};

/// Small bright plate with a fast build-up.
pub static PLATE_B: PlateConfig = PlateConfig {
    name: "Plate B",
    early: [401, 313, 349, 43, 109, 359, 41, 269, 179],
    grid: [
        67, 373, 631, 233, 521, //
        167, 503, 79, 431, 593, //
        383, 701, 331, 443, 71, //
        509, 107, 353, 599, 199, //
        751, 127, 479, 73, 419,
    ],
    fix_a_hz: 7800.0,
    fix_d_hz: 3100.0,
    resonance: [0.80, 0.68, 0.62, 0.75],
    input_shaping: false,
};

/// Dense, dark plate.
pub static PLATE_C: PlateConfig = PlateConfig {
    name: "Plate C",
    early: [31, 199, 113, 149, 251, 281, 167, 229, 227],
    grid: [
        47, 347, 577, 307, 503, //
        271, 467, 89, 449, 521, //
        383, 617, 313, 457, 59, //
        479, 109, 331, 569, 277, //
        631, 211, 463, 79, 397,
    ],
    fix_a_hz: 5200.0,
    fix_d_hz: 1600.0,
    resonance: [0.62, 0.54, 0.50, 0.58],
    input_shaping: false,
};

/// Large plate with sine-shaped input.
pub static PLATE_D: PlateConfig = PlateConfig {
    name: "Plate D",
    early: [79, 131, 419, 127, 491, 41, 479, 181, 353],
    grid: [
        101, 397, 907, 307, 809, //
        233, 661, 191, 619, 821, //
        443, 929, 359, 647, 113, //
        757, 199, 379, 823, 271, //
        947, 227, 659, 151, 457,
    ],
    fix_a_hz: 9000.0,
    fix_d_hz: 2600.0,
    resonance: [0.70, 0.58, 0.55, 0.66],
    input_shaping: true,
};

/// Selects one of the plate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlateVariant {
    /// Medium, bright ([`PLATE_A`]).
    #[default]
    A,
    /// Small, bright ([`PLATE_B`]).
    B,
    /// Dense, dark ([`PLATE_C`]).
    C,
    /// Large, sine-shaped input ([`PLATE_D`]).
    D,
}

impl PlateVariant {
    /// Every variant, in order.
    pub const ALL: [PlateVariant; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// The table for this variant.
    pub fn config(self) -> &'static PlateConfig {
        match self {
            Self::A => &PLATE_A,
            Self::B => &PLATE_B,
            Self::C => &PLATE_C,
            Self::D => &PLATE_D,
        }
    }

    /// Lower-case short name, as used in presets and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
        }
    }

    /// Parses `a`, `plate_a`, `plate-a`, `kplatea` and friends, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut letter = None;
        let mut rest = name.trim();
        for prefix in ["kplate", "plate"] {
            let matched = rest
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
            if matched {
                rest = rest[prefix.len()..].trim_start_matches(['_', '-', ' ']);
                break;
            }
        }
        let mut chars = rest.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            letter = Some(c.to_ascii_lowercase());
        }
        match letter? {
            'a' => Some(Self::A),
            'b' => Some(Self::B),
            'c' => Some(Self::C),
            'd' => Some(Self::D),
            _ => None,
        }
    }
}

impl fmt::Display for PlateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config().name)
    }
}
