/// Numeric helpers.
///
/// Parsing numbers out of yarns, lossless conversions between `i64` and
/// `f64`, and numbar formatting. Every phase that touches numbers goes through
/// these so the scanner, the coercion table and `VISIBLE` agree.
pub mod num;
