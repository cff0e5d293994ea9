pub mod syntax;
pub mod cascade;
pub mod values;
pub mod computed;
pub mod collapse;

// Re-exports so other crates can just use `css::...` nicely.
pub use syntax::{Declaration, Rule, Selector, Stylesheet, parse_declarations, parse_stylesheet};
pub use cascade::{attach_styles, get_inline_style};
pub use values::{WhiteSpace, parse_white_space};
pub use computed::{ComputedStyle, compute_style, computed_white_space};
pub use collapse::{Edge, is_collapsible, is_css_whitespace};
