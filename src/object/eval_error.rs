use crate::ast::Operator;
use custom_error::custom_error;

custom_error! {
    /// Runtime failure. Messages follow the interpreter's user-facing wording.
    #[derive(Clone, PartialEq)]
    pub EvalError

    IdentifierNotFound{name: String} = "identifier not found: {name}",
    UnknownPrefixOperator{operator: Operator, right: &'static str} = "unknown operator: {operator}{right}",
    UnknownInfixOperator{left: &'static str, operator: Operator, right: &'static str} = "unknown operator: {left} {operator} {right}",
    TypeMismatch{left: &'static str, operator: Operator, right: &'static str} = "type mismatch: {left} {operator} {right}",
    DivisionByZero = "division by zero",
    NotAFunction{found: &'static str} = "not a function: {found}",
    IncorrectArity{got: usize, want: usize} = "wrong number of arguments. got={got}, want={want}",
    UnsupportedArgType{builtin: &'static str, found: &'static str} = "argument to `{builtin}` not supported, got {found}",
    ArgumentMustBe{builtin: &'static str, expected: &'static str, found: &'static str} = "argument to `{builtin}` must be {expected}, got {found}",
    NotIndexable{found: &'static str} = "index operator not supported: {found}",
    NotHashable{found: &'static str} = "unusable as hash key: {found}",
}

impl EvalError {
    /// An infix operator applied to operand types that don't support it.
    /// Differing types are a mismatch whatever the operator.
    pub fn unsupported_infix(left: &'static str, operator: Operator, right: &'static str) -> Self {
        if left == right {
            Self::UnknownInfixOperator { left, operator, right }
        } else {
            Self::TypeMismatch { left, operator, right }
        }
    }
}
