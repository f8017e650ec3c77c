//! Signal collectors.
//!
//! Each collector reads one slice of the host through [`Environment`] and
//! yields a [`Probe`]. Display, platform, locale and storage are always
//! collected; canvas, WebGL, audio and fonts are optional.
//!
//! [`Environment`]: crate::env::Environment
//! [`Probe`]: crate::probe::Probe

pub mod audio;
pub mod canvas;
pub mod fonts;
pub mod locale;
pub mod platform;
pub mod screen;
pub mod storage;
pub mod webgl;

pub use audio::AudioCollector;
pub use canvas::CanvasCollector;
pub use fonts::FontsCollector;
pub use locale::{LocaleCollector, LocaleSignals};
pub use platform::{PlatformCollector, PlatformSignals};
pub use screen::{ScreenCollector, ScreenSignals};
pub use storage::{StorageCollector, StorageSignals};
pub use webgl::{WebGlCollector, WebGlSignals};
