//! Brand-page builder: the data model for a shareable branded microsite,
//! input sanitization for style-injected text, and the template render
//! strategies.

pub mod page;
pub mod render;
pub mod sanitize;
pub mod templates;
