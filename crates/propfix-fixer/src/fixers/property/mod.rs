//! Class property fixers

mod array_property_default_value;

pub use array_property_default_value::ArrayPropertyDefaultValueFixer;
