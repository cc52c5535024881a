//! Resource-scheduling timeline engine.
//!
//! Pipeline: raw tabular rows → [`ingest`] (header detection + date
//! parsing) → canonical [`model::Task`] list → [`views::compose`]
//! (filtering, lane packing, geometry) → [`laneboard_protocol::TimelineView`]
//! for an external renderer.

pub mod collate;
pub mod demo;
pub mod ingest;
pub mod layout;
pub mod model;
pub mod views;
