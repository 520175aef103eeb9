mod fetch;
mod render;
mod rows;
mod theme;

pub use fetch::cmd_fetch;
pub use render::cmd_render;
pub use rows::cmd_rows;
pub use theme::{cmd_theme_set, cmd_theme_show, cmd_theme_toggle};
