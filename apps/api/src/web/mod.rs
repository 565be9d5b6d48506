//! Server-rendered single page: job cards, the analysis form, the add-job form,
//! and the recent-analyses table. Every request re-reads the store and renders
//! the whole page.

pub mod handlers;
pub mod views;
