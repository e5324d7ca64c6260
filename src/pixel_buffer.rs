//! Bounds-checked pixel storage in front of an [`OutputDriver`].

use heapless::Vec;

use crate::OutputDriver;
use crate::color::Rgb;
use crate::error::AllocationError;

/// Global brightness restored by [`PixelBuffer::fill`] after a fade to zero
pub const DEFAULT_INTENSITY: u8 = 200;

/// Fixed-capacity strip of pixels plus the global brightness
///
/// The active length is chosen at runtime by [`PixelBuffer::initialize`] and
/// may be anything up to `MAX_LEDS`. Indices outside the active length are
/// ignored on write and yield `None` on read.
pub struct PixelBuffer<D: OutputDriver, const MAX_LEDS: usize> {
    driver: D,
    pixels: Vec<Rgb, MAX_LEDS>,
    brightness: u8,
    default_brightness: u8,
}

impl<D: OutputDriver, const MAX_LEDS: usize> PixelBuffer<D, MAX_LEDS> {
    /// Create an empty buffer; call [`initialize`](Self::initialize) before use
    pub const fn new(driver: D) -> Self {
        Self {
            driver,
            pixels: Vec::new(),
            brightness: DEFAULT_INTENSITY,
            default_brightness: DEFAULT_INTENSITY,
        }
    }

    /// Set the brightness that `fill` restores when brightness reached zero
    #[must_use]
    pub const fn with_default_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self.default_brightness = brightness;
        self
    }

    /// Size the buffer for `count` pixels, all black
    ///
    /// Previous contents are discarded. Fails without touching the current
    /// contents when `count` exceeds `MAX_LEDS`.
    pub fn initialize(&mut self, count: usize) -> Result<(), AllocationError> {
        if count > MAX_LEDS {
            log::error!("unable to allocate {} pixels (capacity {})", count, MAX_LEDS);
            return Err(AllocationError {
                requested: count,
                capacity: MAX_LEDS,
            });
        }
        self.pixels.clear();
        self.pixels
            .resize(count, Rgb::default())
            .map_err(|()| AllocationError {
                requested: count,
                capacity: MAX_LEDS,
            })
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Color at `index`, or `None` outside `0..len`
    pub fn get(&self, index: i32) -> Option<Rgb> {
        let slot = usize::try_from(index).ok()?;
        self.pixels.get(slot).copied()
    }

    /// Write one pixel; out-of-range indices are skipped
    pub fn set(&mut self, index: i32, color: Rgb, show: bool) {
        let Some(pixel) = usize::try_from(index)
            .ok()
            .and_then(|slot| self.pixels.get_mut(slot))
        else {
            log::debug!("pixel[{}] out of range, skipping", index);
            return;
        };
        *pixel = color;
        if show {
            self.show();
        }
    }

    /// Write every pixel, restoring the default brightness if it is zero
    pub fn fill(&mut self, color: Rgb, show: bool) {
        self.reset_brightness();
        self.paint(color);
        if show {
            self.show();
        }
    }

    /// Write every pixel without touching brightness
    pub fn paint(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Flush the buffer to the hardware
    pub fn show(&mut self) {
        self.driver.write(&self.pixels, self.brightness);
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Restore the default brightness if the current one is zero
    pub fn reset_brightness(&mut self) {
        if self.brightness == 0 {
            self.brightness = self.default_brightness;
        }
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
