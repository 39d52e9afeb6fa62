pub mod compose;
pub mod config;
pub mod error;
pub mod font;

pub use compose::{circular_avatar, compose_welcome_image, create_welcome_image, welcome_text};
pub use config::WelcomeConfig;
pub use error::{ComposeError, Result};
pub use font::WelcomeFont;
