// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup wiring
// - infrastructure: Postgres and media storage adapters
// - presentation: HTTP handlers and routing
// - application: ports and use cases
// - domain: catalogue model and form validation

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub(crate) mod testing;
