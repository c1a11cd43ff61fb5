//! Integer-tap delay lines for the plate network.
//!
//! Every tap in the plate (early reflections, predelay, the 25 matrix lines
//! per channel) is a [`DelayLine`]: a circular buffer of `f64` with a fixed
//! capacity and a logical length that may be shortened at runtime.
//!
//! # Indexing
//!
//! The buffer holds `capacity + 1` slots. The write index walks
//! `0..=length` and is wrapped by an explicit range check
//! (`if index > length { index = 0 }`) rather than a modulo, so a shortened
//! length or a stale index is pulled back into range on the next access.
//!
//! A [`tick`](DelayLine::tick) writes the input, advances, then reads the slot
//! that will be overwritten next. The signal therefore comes out exactly
//! `length` ticks after it went in, and a zero-length line is a wire.
//!
//! # Memory
//!
//! The buffer is allocated once in [`DelayLine::new`]. Changing the logical
//! length never reallocates.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Fixed-capacity circular delay line with integer taps.
///
/// # Example
///
/// ```rust
/// use kplate_core::DelayLine;
///
/// let mut line = DelayLine::new(3);
/// assert_eq!(line.tick(1.0), 0.0);
/// assert_eq!(line.tick(0.0), 0.0);
/// assert_eq!(line.tick(0.0), 0.0);
/// assert_eq!(line.tick(0.0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    /// `capacity + 1` slots.
    buffer: Vec<f64>,
    /// Logical length, `<= capacity`.
    length: usize,
    /// Write index in `0..=length`.
    index: usize,
}

impl DelayLine {
    /// Creates a line whose capacity and logical length are both `capacity`.
    pub fn new(capacity: usize) -> Self {
        let mut line = Self {
            buffer: vec![0.0; capacity + 1],
            length: capacity,
            index: 0,
        };
        line.reset();
        line
    }

    /// Maximum logical length this line can be set to.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len() - 1
    }

    /// Current logical length (the delay in ticks).
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Sets the logical length, clamped to the capacity.
    ///
    /// Slots beyond the new length keep their contents; they come back into
    /// play if the length grows again.
    pub fn set_length(&mut self, length: usize) {
        self.length = length.min(self.capacity());
        if self.index > self.length {
            self.index = 0;
        }
    }

    /// Writes at the current index without advancing.
    #[inline]
    pub fn write(&mut self, sample: f64) {
        self.buffer[self.index] = sample;
    }

    /// Moves the index forward one slot, wrapping past `length` to zero.
    #[inline]
    pub fn advance(&mut self) {
        self.index += 1;
        if self.index > self.length {
            self.index = 0;
        }
    }

    /// Reads the slot at the current index.
    #[inline]
    pub fn read(&self) -> f64 {
        self.buffer[self.index.min(self.length)]
    }

    /// Reads the slot after the current index: the oldest sample in the line.
    ///
    /// This is what the next [`tick`](Self::tick) will return.
    #[inline]
    pub fn oldest(&self) -> f64 {
        let next = self.index + 1;
        if next > self.length {
            self.buffer[0]
        } else {
            self.buffer[next]
        }
    }

    /// Write, advance, read. Returns the sample written `length` ticks ago.
    #[inline]
    pub fn tick(&mut self, sample: f64) -> f64 {
        self.write(sample);
        self.advance();
        self.read()
    }

    /// Zeroes the buffer, keeping the index.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
    }

    /// Zeroes the buffer and puts the index back at 1 (0 for lines shorter
    /// than one slot).
    pub fn reset(&mut self) {
        self.clear();
        self.index = 1.min(self.length);
    }
}
