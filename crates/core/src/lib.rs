#![deny(unsafe_code)]
//! Core types for the zettacars landing page behavior layer.
//!
//! Provides the `Animation` trait and the `FrameLoop` that drives it, the
//! `Surface` drawing abstraction with density-aware sizing, the `ThemeStore`
//! with persisted preference and subscriptions, the clipboard `CopyChain`,
//! toast and tilt state, `Hsla` colors, the `Xorshift64` PRNG and the lenient
//! JSON `PageConfig`. Nothing here touches the DOM; the `wasm` crate binds
//! these to the browser.

pub mod a11y;
pub mod animation;
pub mod clipboard;
pub mod color;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod params;
pub mod prng;
pub mod surface;
pub mod theme;
pub mod tilt;
pub mod toast;

pub use animation::Animation;
pub use clipboard::{ClipboardStrategy, CopyChain, CopyOutcome, Delivery};
pub use color::Hsla;
pub use config::{PageConfig, Profile};
pub use error::UiError;
pub use frame_loop::{CancellationToken, FrameLoop};
pub use prng::Xorshift64;
pub use surface::{HeadlessSurface, Surface, SurfaceSize, Viewport};
pub use theme::{MemoryStore, PreferenceStore, Theme, ThemeStore};
pub use tilt::{ElementRect, Tilt, TiltController};
pub use toast::{ToastState, ToastTicket};
