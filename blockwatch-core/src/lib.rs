//! Board-agnostic rendering logic for the blockwatch firmware
//!
//! Everything that does not touch hardware lives here so it can be tested
//! on the host:
//!
//! - 128x64 1-bpp framebuffer in SSD1306 page layout
//! - Glyph patterns for the ten large digits
//! - Time sampling and face composition
//! - Bus probing over the `embedded-hal` I2C trait

#![no_std]
#![deny(unsafe_code)]

pub mod face;
pub mod framebuffer;
pub mod glyphs;
pub mod probe;
