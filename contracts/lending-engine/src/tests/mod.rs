pub mod liquidate_test;
pub mod math_test;
pub mod risk_test;
pub mod test_helpers;
