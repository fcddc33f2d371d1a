use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{Value, ValueType},
    },
    util::num::{Numeric, f64_to_i64_checked, i64_to_f64, parse_numeric},
};

/// Where a conversion is requested from.
///
/// The same pair of types may convert differently depending on whether the
/// program asked for it (`MAEK`, `IS NOW A`) or an operator needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastMode {
    /// Requested by an operator, `VISIBLE` or a loop update.
    Implicit,
    /// Requested by `MAEK` or `IS NOW A`.
    Explicit,
}

/// How a value of one type becomes a value of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastRule {
    /// Source and target are the same type.
    Identity,
    /// The conversion always succeeds.
    Always,
    /// The conversion parses text and fails on malformed input.
    Parse,
    /// The conversion is not allowed in this mode.
    Forbidden,
}

/// The coercion table.
///
/// This is the single place that decides which conversions exist. The
/// semantic analyzer consults it to validate casts and the evaluator consults
/// it before converting, so both phases agree.
///
/// # Example
/// ```
/// use lolz::interpreter::value::{
///     coercion::{CastMode, CastRule, cast_rule},
///     core::ValueType,
/// };
///
/// assert_eq!(cast_rule(ValueType::Numbr, ValueType::Yarn, CastMode::Implicit), CastRule::Always);
/// assert_eq!(cast_rule(ValueType::Yarn, ValueType::Numbr, CastMode::Explicit), CastRule::Parse);
/// assert_eq!(cast_rule(ValueType::Troof, ValueType::Noob, CastMode::Implicit),
///            CastRule::Forbidden);
/// ```
#[must_use]
pub const fn cast_rule(from: ValueType, to: ValueType, mode: CastMode) -> CastRule {
    use ValueType::{Noob, Numbar, Numbr, Troof, Yarn};

    match (from, to) {
        (Noob, Noob) | (Numbr, Numbr) | (Numbar, Numbar) | (Yarn, Yarn) | (Troof, Troof) => {
            CastRule::Identity
        },
        (_, Noob) => match mode {
            CastMode::Explicit => CastRule::Always,
            CastMode::Implicit => CastRule::Forbidden,
        },
        (Yarn, Numbr | Numbar) => CastRule::Parse,
        (Noob | Numbr | Numbar | Troof, _) | (Yarn, Troof) => CastRule::Always,
    }
}

impl Value {
    /// Converts the value to `target` following [`cast_rule`].
    ///
    /// - Numbars become numbrs by truncation.
    /// - Troofs become `1`/`0`, numbers become `FAIL` only when zero.
    /// - Yarns become numbers only when they hold a numeric literal.
    /// - `NOOB` becomes `0`, `FAIL`, or a yarn (`NOOB` when printed, empty when
    ///   cast explicitly).
    ///
    /// # Errors
    /// Returns `CastFailed` when a yarn does not hold a number or a numbar is
    /// out of the numbr range, and `TypeError` for forbidden conversions.
    ///
    /// # Example
    /// ```
    /// use lolz::interpreter::value::{
    ///     coercion::CastMode,
    ///     core::{Value, ValueType},
    /// };
    ///
    /// let v = Value::from("12.75").cast(ValueType::Numbr, CastMode::Explicit, 1).unwrap();
    /// assert_eq!(v, Value::Numbr(12));
    ///
    /// assert!(Value::from("twelve").cast(ValueType::Numbr, CastMode::Explicit, 1).is_err());
    /// ```
    pub fn cast(&self, target: ValueType, mode: CastMode, line: usize) -> EvalResult<Self> {
        let failed = || RuntimeError::CastFailed { value: self.to_string(),
                                                   target,
                                                   line };

        match cast_rule(self.value_type(), target, mode) {
            CastRule::Identity => return Ok(self.clone()),
            CastRule::Forbidden => {
                return Err(RuntimeError::TypeError { details: format!("Cannot implicitly cast {} to {target}",
                                                                      self.value_type()),
                                                     line });
            },
            CastRule::Always | CastRule::Parse => {},
        }

        let value = match (self, target) {
            (_, ValueType::Noob) => Self::Noob,
            (_, ValueType::Troof) => Self::Troof(self.to_troof()),
            (Self::Noob, ValueType::Yarn) if mode == CastMode::Explicit => Self::Yarn(String::new()),
            (_, ValueType::Yarn) => Self::Yarn(self.to_string()),

            (Self::Noob, ValueType::Numbr) => Self::Numbr(0),
            (Self::Noob, ValueType::Numbar) => Self::Numbar(0.0),
            (Self::Troof(b), ValueType::Numbr) => Self::Numbr(i64::from(*b)),
            (Self::Troof(b), ValueType::Numbar) => Self::Numbar(if *b { 1.0 } else { 0.0 }),
            (Self::Numbr(n), ValueType::Numbar) => Self::Numbar(i64_to_f64(*n)),
            (Self::Numbar(x), ValueType::Numbr) => {
                Self::Numbr(f64_to_i64_checked(x.trunc()).ok_or_else(failed)?)
            },
            (Self::Yarn(s), ValueType::Numbr) => match parse_numeric(s).ok_or_else(failed)? {
                Numeric::Numbr(n) => Self::Numbr(n),
                Numeric::Numbar(x) => Self::Numbr(f64_to_i64_checked(x.trunc()).ok_or_else(failed)?),
            },
            (Self::Yarn(s), ValueType::Numbar) => match parse_numeric(s).ok_or_else(failed)? {
                Numeric::Numbr(n) => Self::Numbar(i64_to_f64(n)),
                Numeric::Numbar(x) => Self::Numbar(x),
            },
            _ => return Err(failed()),
        };

        Ok(value)
    }

    /// The truth value of any value.
    ///
    /// `0`, `0.0`, the empty yarn, `FAIL` and `NOOB` are false; everything else
    /// is true.
    #[must_use]
    pub fn to_troof(&self) -> bool {
        match self {
            Self::Noob => false,
            Self::Numbr(n) => *n != 0,
            Self::Numbar(x) => *x != 0.0,
            Self::Yarn(s) => !s.is_empty(),
            Self::Troof(b) => *b,
        }
    }

    /// The implicit `YARN` form of the value, as printed by `VISIBLE` and
    /// joined by `SMOOSH`.
    #[must_use]
    pub fn to_yarn(&self) -> String {
        match self {
            Self::Yarn(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Converts the value to a number for arithmetic.
    ///
    /// Numbrs and numbars are returned unchanged. Yarns become a numbar when
    /// they contain a decimal point and a numbr otherwise.
    ///
    /// # Errors
    /// Returns `TypeError` when a yarn does not hold a number.
    pub fn to_numeric(&self, line: usize) -> EvalResult<Self> {
        match self {
            Self::Numbr(_) | Self::Numbar(_) => Ok(self.clone()),
            Self::Yarn(s) => match parse_numeric(s) {
                Some(Numeric::Numbr(n)) => Ok(Self::Numbr(n)),
                Some(Numeric::Numbar(x)) => Ok(Self::Numbar(x)),
                None => Err(RuntimeError::TypeError { details: format!("Cannot use yarn '{s}' as a number"),
                                                      line }),
            },
            Self::Noob | Self::Troof(_) => self.cast(ValueType::Numbr, CastMode::Implicit, line),
        }
    }

    /// Loose equality used by `BOTH SAEM` and `DIFFRINT`.
    ///
    /// Values of the same type compare directly. Numbrs and numbars compare
    /// numerically. A yarn compared with a number is parsed first and is
    /// simply not equal when it is not numeric. This never fails.
    ///
    /// # Example
    /// ```
    /// use lolz::interpreter::value::core::Value;
    ///
    /// assert!(Value::Numbr(3).loose_eq(&Value::Numbar(3.0)));
    /// assert!(Value::from("3").loose_eq(&Value::Numbr(3)));
    /// assert!(!Value::from("three").loose_eq(&Value::Numbr(3)));
    /// ```
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        use Value::{Noob, Numbar, Numbr, Troof, Yarn};

        #[allow(clippy::cast_precision_loss)]
        let as_f64 = |n: &Numeric| match n {
            Numeric::Numbr(n) => *n as f64,
            Numeric::Numbar(x) => *x,
        };

        match (self, other) {
            (Noob, Noob) => true,
            (Numbr(a), Numbr(b)) => a == b,
            (Troof(a), Troof(b)) => a == b,
            (Yarn(a), Yarn(b)) => a == b,
            (Numbr(_) | Numbar(_), Numbr(_) | Numbar(_)) => {
                self.as_numeric().map(|n| as_f64(&n)) == other.as_numeric().map(|n| as_f64(&n))
            },
            (Yarn(s), Numbr(_) | Numbar(_)) | (Numbr(_) | Numbar(_), Yarn(s)) => {
                let number = if matches!(self, Yarn(_)) { other } else { self };
                match (parse_numeric(s), number.as_numeric()) {
                    (Some(Numeric::Numbr(a)), Some(Numeric::Numbr(b))) => a == b,
                    (Some(a), Some(b)) => as_f64(&a) == as_f64(&b),
                    _ => false,
                }
            },
            _ => false,
        }
    }

    /// Returns the number inside a numbr or numbar.
    const fn as_numeric(&self) -> Option<Numeric> {
        match self {
            Self::Numbr(n) => Some(Numeric::Numbr(*n)),
            Self::Numbar(x) => Some(Numeric::Numbar(*x)),
            _ => None,
        }
    }
}
