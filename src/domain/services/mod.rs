pub mod markup;
pub mod placeholder;

pub use markup::escape_markup;
pub use placeholder::{PlaceholderGenerator, PlaceholderOptions, PlaceholderVariant};
