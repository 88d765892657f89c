pub mod clock;
pub mod extractor;
pub mod hash;
pub mod jwt;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
