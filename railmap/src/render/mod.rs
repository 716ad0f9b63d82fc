//! Output stages, a static picture and an interactive web page.

pub mod raster;
pub mod web;
