//! Handler state

use crate::LeadGateway;

/// State handed to every route handler
///
/// Server settings are consumed when the router is built, so handlers only
/// need the gateway. Cloning is a handful of `Arc` bumps.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Download and export workflows
    pub gateway: LeadGateway,
}

impl AppState {
    /// Wrap a gateway for the router
    pub fn new(gateway: LeadGateway) -> Self {
        Self { gateway }
    }
}
