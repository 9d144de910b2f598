// Domain layer: the DPI rules, wire models and ports. No I/O here.

pub mod dpi;
pub mod model;
pub mod ports;
pub mod registrant;
