pub mod panels;
pub mod surface;
