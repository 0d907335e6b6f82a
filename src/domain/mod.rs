// Domain layer: sight records and the collaborator ports the core depends on.

pub mod model;
pub mod ports;
