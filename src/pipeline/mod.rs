pub mod persona;
pub mod quality;
pub mod safety;
