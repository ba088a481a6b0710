//! The goo value function.
//!
//! Only four input/output pairs pin the behaviour down (see
//! [`ACCEPTANCE_TABLE`]). The closed form used here reproduces all of them:
//! the first operand scaled by the second, where a non-positive second
//! operand counts as one.

/// One row of the acceptance table: `get_value(a, b) == expected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptanceRow {
    pub a: i32,
    pub b: i32,
    pub expected: i64,
}

/// Every input/output pair the function is known to satisfy.
pub const ACCEPTANCE_TABLE: [AcceptanceRow; 4] = [
    AcceptanceRow { a: 0, b: 0, expected: 0 },
    AcceptanceRow { a: 5, b: 5, expected: 25 },
    AcceptanceRow { a: 5, b: -5, expected: 5 },
    AcceptanceRow { a: -5, b: -5, expected: -5 },
];

/// Computes the goo value of `a` and `b`.
///
/// Pure and total: the product of two `i32` values always fits in `i64`.
pub fn get_value(a: i32, b: i32) -> i64 {
    i64::from(a) * i64::from(b.max(1))
}
