//! `catalog` crate: contracts of the external capabilities pipelines call.
//!
//! Each module knows one service: its catalog name and version, the
//! argument keys its endpoints expect, and (for the tracker) the shape of
//! its output. [`mock::MockCapability`] stands in for any of them.

pub mod jira;
pub mod slack;
pub mod trello;
pub mod mock;

pub use mock::MockCapability;

use engine::ServiceBinding;

/// Bindings for every service in the catalog.
pub fn services() -> Vec<ServiceBinding> {
    vec![slack::binding(), jira::binding(), trello::binding()]
}
