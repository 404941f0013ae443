// Domain layer: request/response models and ports. Ledger access lives behind `ports`.

pub mod model;
pub mod ports;
