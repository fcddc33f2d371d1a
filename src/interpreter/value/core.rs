use serde::{Deserialize, Serialize};

use crate::util::num::format_numbar;

/// The runtime type tags.
///
/// Every [`Value`] carries exactly one of these. They are also the targets of
/// `MAEK` and `IS NOW A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueType {
    /// Uninitialized, or no value.
    Noob,
    /// 64 bit signed integer.
    Numbr,
    /// 64 bit floating point.
    Numbar,
    /// String.
    Yarn,
    /// Boolean.
    Troof,
}

impl ValueType {
    /// Parses a type literal such as `NUMBR`.
    ///
    /// # Example
    /// ```
    /// use lolz::interpreter::value::core::ValueType;
    ///
    /// assert_eq!(ValueType::from_name("YARN"), Some(ValueType::Yarn));
    /// assert_eq!(ValueType::from_name("yarn"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "NOOB" => Some(Self::Noob),
            "NUMBR" => Some(Self::Numbr),
            "NUMBAR" => Some(Self::Numbar),
            "YARN" => Some(Self::Yarn),
            "TROOF" => Some(Self::Troof),
            _ => None,
        }
    }

    /// The value a variable declared with `ITZ A <type>` starts with.
    #[must_use]
    pub const fn default_value(self) -> Value {
        match self {
            Self::Noob => Value::Noob,
            Self::Numbr => Value::Numbr(0),
            Self::Numbar => Value::Numbar(0.0),
            Self::Yarn => Value::Yarn(String::new()),
            Self::Troof => Value::Troof(false),
        }
    }

    /// Returns `true` for `NUMBR` and `NUMBAR`.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Numbr | Self::Numbar)
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Noob => "NOOB",
            Self::Numbr => "NUMBR",
            Self::Numbar => "NUMBAR",
            Self::Yarn => "YARN",
            Self::Troof => "TROOF",
        };
        write!(f, "{name}")
    }
}

/// Represents a runtime value in the interpreter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    /// No value. Variables start out as `NOOB` until they are assigned.
    #[default]
    Noob,
    /// An integer value.
    Numbr(i64),
    /// A floating point value.
    Numbar(f64),
    /// A string value.
    Yarn(String),
    /// A boolean value, `WIN` or `FAIL`.
    Troof(bool),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Numbr(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Numbar(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Troof(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Yarn(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Yarn(v)
    }
}

impl Value {
    /// The type tag of this value.
    ///
    /// # Example
    /// ```
    /// use lolz::interpreter::value::core::{Value, ValueType};
    ///
    /// assert_eq!(Value::Numbar(2.5).value_type(), ValueType::Numbar);
    /// assert_eq!(Value::Noob.value_type(), ValueType::Noob);
    /// ```
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Noob => ValueType::Noob,
            Self::Numbr(_) => ValueType::Numbr,
            Self::Numbar(_) => ValueType::Numbar,
            Self::Yarn(_) => ValueType::Yarn,
            Self::Troof(_) => ValueType::Troof,
        }
    }
}

/// Renders a value the way `VISIBLE` prints it.
///
/// Numbars that hold a whole number keep one decimal place, so `5.0` prints as
/// `5.0` and `5.5` as `5.5`. Troofs print as `WIN` and `FAIL`.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Noob => write!(f, "NOOB"),
            Self::Numbr(n) => write!(f, "{n}"),
            Self::Numbar(x) => write!(f, "{}", format_numbar(*x)),
            Self::Yarn(s) => write!(f, "{s}"),
            Self::Troof(true) => write!(f, "WIN"),
            Self::Troof(false) => write!(f, "FAIL"),
        }
    }
}
