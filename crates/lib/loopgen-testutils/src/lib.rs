pub mod compiler;
pub mod xml;
