pub mod fetch;
pub mod normalize;
pub mod records;

#[cfg(test)]
mod normalize_tests;
