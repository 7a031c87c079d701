//! Data layer for the SDG 4 Quality Education campaign site: the deep dive
//! dataset generator, the contract its chart views rely on, and the map and
//! catalog data behind the landing page.

pub mod catalog;
pub mod chart;
pub mod config;
pub mod contract;
pub mod export;
pub mod generator;
pub mod map;
pub mod models;
pub mod noise;
pub mod report;
