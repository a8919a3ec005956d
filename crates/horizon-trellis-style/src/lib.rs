//! Styling for Horizon Trellis.
//!
//! - [`Style`]: the visual properties of one widget
//! - [`Skin`]: a style provider mapping widget classes to shared styles,
//!   built from a [`Palette`] or loaded from TOML
//!
//! Widgets receive their style from a skin at construction and hold it as an
//! `Arc<Style>`. A widget that needs to diverge from its class clones the
//! style on first write, leaving every other widget untouched.
//!
//! ```
//! use std::sync::Arc;
//! use horizon_trellis_style::{Skin, class};
//!
//! let skin = Skin::light();
//! let mut style = skin.style_for(class::BUTTON);
//! Arc::make_mut(&mut style).border_width = 3.0;
//!
//! assert_eq!(skin.style_for(class::BUTTON).border_width, 1.0);
//! ```

mod error;
mod palette;
mod skin;
mod skin_file;
mod style;

pub use error::{Error, Result};
pub use palette::Palette;
pub use skin::{Skin, class};
pub use style::{Insets, Style};
