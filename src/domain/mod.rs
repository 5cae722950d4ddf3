// Domain layer: core models, the manual form and ports (interfaces).

pub mod form;
pub mod model;
pub mod ports;
