//! Coursebook: a basic-auth-protected users and courses REST API.
//!
//! Hexagonal layout: `domain` holds entities, validation, and persistence
//! ports; `inbound::http` adapts actix-web requests onto the domain;
//! `outbound::persistence` implements the ports with Diesel on PostgreSQL;
//! `server` wires the pieces together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
