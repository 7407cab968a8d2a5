//! Built-in encoders, one per problem family.

mod coloring;
mod maxcut;
mod mis;

pub use coloring::{ColoringEncoder, color_spin, spin_color};
pub use maxcut::MaxCutEncoder;
pub use mis::MisEncoder;
