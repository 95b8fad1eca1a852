//! Data nodes providing values to other nodes

pub mod string_primitive;

pub use string_primitive::StringPrimitiveFactory;
