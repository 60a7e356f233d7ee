//! Server-rendered HTML pages.
//!
//! - **html**: escaping, document shell, dropdown and querystring helpers
//! - **form**: raw create/edit form, parsing and rendering
//! - **error**: handler errors rendered as HTML
//! - **pages**: the page handlers

pub mod error;
pub mod form;
pub mod html;
pub mod pages;
