/// Analyzer state, scopes and statement checks.
///
/// Exposes `analyze` and `analyze_program`, the static type lattice and the
/// symbol table snapshot shown by `--emit symbols`.
pub mod core;

/// Expression typing.
///
/// Result types of operators, variable reads and cast validation against the
/// shared conversion table.
pub mod infer;
