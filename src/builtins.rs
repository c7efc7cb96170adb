use crate::object::*;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

pub type BuiltinFunction = fn(Vec<Object>) -> Result<Object>;

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFunction,
}

impl Builtin {
    pub fn new(name: &'static str, func: BuiltinFunction) -> Self {
        Self { name, func }
    }

    pub fn call(&self, args: Vec<Object>) -> Result<Object> {
        (self.func)(args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

fn single_arg(mut args: Vec<Object>) -> Result<Object> {
    if args.len() != 1 {
        return Err(EvalError::IncorrectArity {
            got: args.len(),
            want: 1,
        });
    }
    Ok(args.remove(0))
}

fn array_arg(builtin: &'static str, arg: Object) -> Result<Vec<Object>> {
    match arg {
        Object::Array(elements) => Ok(elements),
        obj => Err(EvalError::ArgumentMustBe {
            builtin,
            expected: "ARRAY",
            found: obj.type_name(),
        }),
    }
}

fn len(args: Vec<Object>) -> Result<Object> {
    match single_arg(args)? {
        Object::String(s) => Ok(Object::Integer(s.len() as i64)),
        Object::Array(a) => Ok(Object::Integer(a.len() as i64)),
        obj => Err(EvalError::UnsupportedArgType {
            builtin: "len",
            found: obj.type_name(),
        }),
    }
}

fn first(args: Vec<Object>) -> Result<Object> {
    let elements = array_arg("first", single_arg(args)?)?;
    Ok(elements.into_iter().next().unwrap_or(NULL))
}

fn last(args: Vec<Object>) -> Result<Object> {
    let elements = array_arg("last", single_arg(args)?)?;
    Ok(elements.into_iter().last().unwrap_or(NULL))
}

fn rest(args: Vec<Object>) -> Result<Object> {
    let elements = array_arg("rest", single_arg(args)?)?;
    if elements.is_empty() {
        return Ok(NULL);
    }
    Ok(Object::Array(elements.into_iter().skip(1).collect()))
}

fn push(args: Vec<Object>) -> Result<Object> {
    if args.len() != 2 {
        return Err(EvalError::IncorrectArity {
            got: args.len(),
            want: 2,
        });
    }
    let mut args = args.into_iter();
    let mut elements = match args.next() {
        Some(array) => array_arg("push", array)?,
        None => return Ok(NULL),
    };
    elements.extend(args);
    Ok(Object::Array(elements))
}

lazy_static! {
    pub static ref BUILTINS: HashMap<&'static str, Builtin> = vec![
        Builtin::new("len", len),
        Builtin::new("first", first),
        Builtin::new("last", last),
        Builtin::new("rest", rest),
        Builtin::new("push", push),
    ]
    .into_iter()
    .map(|builtin| (builtin.name, builtin))
    .collect();
}

pub fn lookup(name: &str) -> Option<Object> {
    BUILTINS.get(name).copied().map(Object::Builtin)
}
