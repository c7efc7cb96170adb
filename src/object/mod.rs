use crate::ast;
use crate::builtins::Builtin;
use crate::environment::Environment;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::iter::FromIterator;
use std::sync::Arc;

mod eval_error;
pub use eval_error::EvalError;

mod hash;
pub use hash::HashKey;

pub type Result<T> = std::result::Result<T, EvalError>;

pub const NULL: Object = Object::Null;
pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);

pub fn native_bool(b: bool) -> Object {
    if b {
        TRUE
    } else {
        FALSE
    }
}

#[derive(Debug, Clone)]
pub enum Object {
    Function(FunctionObject),
    Builtin(Builtin),
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Vec<Object>),
    Hash(HashValue),
    Null,
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Function(func) => write!(f, "{}", func),
            Self::Builtin(_) => write!(f, "builtin function"),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::String(s) => write!(f, "{}", s),
            Self::Array(a) => {
                let element_names: Vec<String> = a.iter().map(Object::to_string).collect();

                write!(f, "[{}]", element_names.join(", "))
            }
            Self::Hash(h) => write!(f, "{}", h),
            Self::Null => write!(f, "null"),
        }
    }
}

/// Structural equality for host-side comparisons. Functions are equal only
/// when they are the same closure.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Hash(a), Self::Hash(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Builtin(a), Self::Builtin(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => {
                Arc::ptr_eq(&a.body, &b.body) && a.env.ptr_eq(&b.env)
            }
            _ => false,
        }
    }
}

impl Default for Object {
    fn default() -> Self {
        NULL
    }
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        native_bool(b)
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

impl From<Vec<Object>> for Object {
    fn from(a: Vec<Object>) -> Self {
        Self::Array(a)
    }
}

impl From<HashValue> for Object {
    fn from(h: HashValue) -> Self {
        Self::Hash(h)
    }
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Function(_) => "FUNCTION",
            Self::Builtin(_) => "BUILTIN",
            Self::Boolean(_) => "BOOLEAN",
            Self::Integer(_) => "INTEGER",
            Self::String(_) => "STRING",
            Self::Array(_) => "ARRAY",
            Self::Hash(_) => "HASH",
            Self::Null => "NULL",
        }
    }

    /// Only `false` and null are falsy.
    pub fn truth_value(&self) -> bool {
        !matches!(self, Self::Boolean(false) | Self::Null)
    }
}

/// A closure: the literal's parameters and body plus the scope it was
/// created in.
#[derive(Debug, Clone)]
pub struct FunctionObject {
    pub parameters: Vec<ast::Identifier>,
    pub body: Arc<ast::BlockStatement>,
    pub env: Environment,
}

impl Display for FunctionObject {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let identifier_names: Vec<String> = self
            .parameters
            .iter()
            .map(ast::Identifier::to_string)
            .collect();

        write!(f, "fn({}) {}", identifier_names.join(", "), self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HashValue {
    pub values: HashMap<HashKey, Object>,
}

impl FromIterator<(HashKey, Object)> for HashValue {
    fn from_iter<I: IntoIterator<Item = (HashKey, Object)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Display for HashValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        // Sorted so the same hash always prints the same way.
        let mut pair_names: Vec<String> = self
            .values
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect();
        pair_names.sort();

        write!(f, "{{{}}}", pair_names.join(", "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Object::from(5).to_string(), "5");
        assert_eq!(Object::from("hi there").to_string(), "hi there");
        assert_eq!(NULL.to_string(), "null");
        assert_eq!(
            Object::from(vec![1.into(), true.into(), "x".into()]).to_string(),
            "[1, true, x]"
        );

        let hash: HashValue = vec![
            (HashKey::from("b"), Object::from(2)),
            (HashKey::from("a"), Object::from(1)),
        ]
        .into_iter()
        .collect();
        assert_eq!(Object::from(hash).to_string(), "{a: 1, b: 2}");
    }

    #[test]
    fn test_truth_value() {
        assert!(!FALSE.truth_value());
        assert!(!NULL.truth_value());
        assert!(TRUE.truth_value());
        assert!(Object::from(0).truth_value());
        assert!(Object::from("").truth_value());
        assert!(Object::Array(vec![]).truth_value());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Object::from(1).type_name(), "INTEGER");
        assert_eq!(Object::Array(vec![]).type_name(), "ARRAY");
        assert_eq!(Object::from(HashValue::default()).type_name(), "HASH");
    }
}
