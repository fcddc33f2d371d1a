/// The conversion table.
///
/// Decides which casts exist in implicit and explicit contexts and performs
/// them: truth values, numeric coercion for operators, `MAEK`/`IS NOW A`, and
/// the loose equality used by `BOTH SAEM`.
pub mod coercion;
pub mod core;
