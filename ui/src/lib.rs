//! Shared crate for the Edgecase site: analytics, A/B assignment, animated
//! result charts and the views that wire them to the page.

pub mod analytics;
pub mod catalog;
pub mod core;
pub mod experiments;
pub mod i18n;
pub mod results;
pub mod session;
pub mod views;
