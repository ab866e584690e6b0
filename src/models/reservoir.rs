//! Subsurface reservoir models.
//!
//! This module contains models for fractured geothermal reservoirs, where heat
//! and fluid move between the rock matrix and the fracture network.

pub mod dual_continuum;
