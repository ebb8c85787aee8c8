//! Field vegetation health analysis from satellite imagery.
//!
//! Given a field drawn as a polygon, the crate selects a sufficiently
//! cloud-free Sentinel-2 scene for a bounded date window, asks a remote
//! sensing backend to compute NDVI over the field footprint, reduces it to a
//! spatial mean and classifies the result into an actionable health band.
//! All pixel-level work (cloud masking, band math) happens on the backend;
//! this crate only orchestrates the queries.

pub mod analysis;
pub mod collect;
pub mod commons;
pub mod error;
pub mod geo_core;
