//! StockFlow backend library.
//!
//! Registration of users, organizations and a scaffolding test entity,
//! served over actix-web with PostgreSQL (or in-memory) persistence.
//! Modules follow a hexagonal layout: [`domain`] owns the rules and ports,
//! [`inbound`] adapts HTTP requests, [`outbound`] implements the ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
