pub mod service;

pub use service::{ServiceOptions, SightService};
