pub mod kinds;
pub mod model;
pub mod status;
pub mod template;
