// Shared numeric helpers, independent of any one analysis stage
pub mod maths_utils;
