pub mod composer;
pub mod export;
pub mod font;
pub mod frame;
pub mod paint;
pub mod surface;
pub mod text;

pub use composer::{render, render_image, RenderOutcome};
pub use export::{export_image, DirectorySink, ExportedImage, ImageSink, MemorySink};
pub use font::{FontChain, FontLibrary};
pub use frame::draw_frame;
pub use paint::Paint;
pub use surface::{Glow, LogicalRect, Surface};
