use super::{EvalError, Object};
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};

/// An object reduced to the part that identifies it as a hash key. Only
/// integers, booleans and strings qualify; two keys are the same exactly
/// when their objects are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl HashKey {
    /// The object this key was taken from.
    pub fn to_object(&self) -> Object {
        match self {
            Self::Integer(n) => Object::Integer(*n),
            Self::Boolean(b) => Object::Boolean(*b),
            Self::String(s) => Object::String(s.clone()),
        }
    }
}

// Keys render the way their objects do, so `{"a": 1}` shows as `{a: 1}`.
impl Display for HashKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.to_object())
    }
}

macro_rules! key_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(impl From<$source> for HashKey {
            fn from(value: $source) -> Self {
                Self::$variant(value.into())
            }
        })*
    };
}

key_from!(i64 => Integer, bool => Boolean, &str => String);

impl TryFrom<Object> for HashKey {
    type Error = EvalError;

    fn try_from(obj: Object) -> Result<Self, EvalError> {
        Ok(match obj {
            Object::Integer(n) => n.into(),
            Object::Boolean(b) => b.into(),
            Object::String(s) => Self::String(s),
            other => {
                return Err(EvalError::NotHashable {
                    found: other.type_name(),
                })
            }
        })
    }
}
