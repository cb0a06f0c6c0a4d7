pub mod color;
pub mod config;
pub mod error;
pub mod layout;
pub mod request;

pub use color::{contrast_color, Rgb};
pub use config::Config;
pub use error::{Result, TextcardError};
pub use layout::{wrap, LineBlock, VerticalLayout};
pub use request::{FrameSpec, FrameStyle, OutputFormat, RenderRequest};
