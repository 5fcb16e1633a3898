/// Relative error check, `expected` must not be zero.
pub fn assert_in_epsilon(expected: f64, actual: f64, epsilon: f64) {
    let relative_error = ((expected - actual) / expected).abs();
    assert!(
        relative_error <= epsilon,
        "relative error of {} against expected {} is {}, more than {}",
        actual,
        expected,
        relative_error,
        epsilon
    );
}
