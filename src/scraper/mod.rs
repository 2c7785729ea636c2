//! Ecosystem scrapers that recover raw license declarations for packages
//! still marked `UNKNOWN` in the CSV.
//!
//! Every scraper is best-effort: a package it cannot resolve is left
//! untouched, never turned into a fatal error.

pub mod alpine;
pub mod cran;
pub mod pypi;
