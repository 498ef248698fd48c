pub mod service;

pub use service::{DesignRegion, DesignRequest, DesignResponse, DesignService};
