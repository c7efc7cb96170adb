
use crate::ast::{self, Expression, Operator, Statement};
use crate::builtins;
use crate::environment::Environment;
use crate::object::{
    native_bool, EvalError, FunctionObject, HashKey, HashValue, Object, Result, NULL,
};
use std::convert::TryFrom;
use std::sync::Arc;
use tracing::trace;

/// Why evaluation stopped before producing a value: a `return` unwinding to
/// the nearest function call, or an error unwinding to the top.
#[derive(Debug)]
enum Signal {
    Return(Object),
    Error(EvalError),
}

impl From<EvalError> for Signal {
    fn from(err: EvalError) -> Self {
        Self::Error(err)
    }
}

type Flow<T> = std::result::Result<T, Signal>;

/// Evaluates a program in `env`. A top-level `return` ends the program with
/// its value.
#[tracing::instrument(level = "trace", skip_all, fields(statements = program.statements.len()))]
pub fn eval(program: &ast::Program, env: &Environment) -> Result<Object> {
    match eval_statements(&program.statements, env) {
        Ok(value) | Err(Signal::Return(value)) => Ok(value),
        Err(Signal::Error(err)) => Err(err),
    }
}

fn eval_statements(statements: &[Statement], env: &Environment) -> Flow<Object> {
    let mut result = NULL;
    for stmt in statements {
        result = eval_statement(stmt, env)?;
    }
    Ok(result)
}

fn eval_statement(statement: &Statement, env: &Environment) -> Flow<Object> {
    match statement {
        Statement::Expr(stmt) => eval_expression(&stmt.expression, env),
        Statement::Return(stmt) => {
            let value = match &stmt.return_value {
                Some(expr) => eval_expression(expr, env)?,
                None => NULL,
            };
            Err(Signal::Return(value))
        }
        Statement::Let(stmt) => {
            let value = eval_expression(&stmt.value, env)?;
            env.set(&stmt.name.value, value);
            Ok(NULL)
        }
    }
}

fn eval_expression(expression: &Expression, env: &Environment) -> Flow<Object> {
    match expression {
        Expression::IntegerLiteral(lit) => Ok(Object::Integer(lit.value)),
        Expression::String(lit) => Ok(Object::String(lit.value.clone())),
        Expression::Boolean(lit) => Ok(native_bool(lit.value)),
        Expression::Identifier(ident) => Ok(eval_identifier(ident, env)?),
        Expression::Prefix(prefix) => {
            let right = eval_expression(&prefix.right, env)?;
            Ok(eval_prefix_expression(prefix.operator, right)?)
        }
        Expression::Infix(infix) => {
            let left = eval_expression(&infix.left, env)?;
            let right = eval_expression(&infix.right, env)?;
            Ok(eval_infix_expression(infix.operator, left, right)?)
        }
        Expression::If(if_expr) => {
            let condition = eval_expression(&if_expr.condition, env)?;
            if condition.truth_value() {
                eval_statements(&if_expr.consequence.statements, env)
            } else if let Some(alternative) = &if_expr.alternative {
                eval_statements(&alternative.statements, env)
            } else {
                Ok(NULL)
            }
        }
        Expression::Function(func) => Ok(Object::Function(FunctionObject {
            parameters: func.parameters.clone(),
            body: Arc::clone(&func.body),
            env: env.clone(),
        })),
        Expression::Call(call) => {
            let function = eval_expression(&call.function, env)?;
            let arguments = eval_expressions(&call.arguments, env)?;
            apply_function(function, arguments)
        }
        Expression::Array(array) => Ok(Object::Array(eval_expressions(&array.elements, env)?)),
        Expression::Index(index) => {
            let left = eval_expression(&index.left, env)?;
            let index = eval_expression(&index.index, env)?;
            Ok(eval_index_expression(left, index)?)
        }
        Expression::Hash(hash) => eval_hash_literal(hash, env),
    }
}

fn eval_expressions(expressions: &[Expression], env: &Environment) -> Flow<Vec<Object>> {
    expressions
        .iter()
        .map(|expr| eval_expression(expr, env))
        .collect()
}

fn eval_identifier(ident: &ast::Identifier, env: &Environment) -> Result<Object> {
    env.get(&ident.value)
        .or_else(|| builtins::lookup(&ident.value))
        .ok_or_else(|| EvalError::IdentifierNotFound {
            name: ident.value.clone(),
        })
}

fn eval_prefix_expression(operator: Operator, right: Object) -> Result<Object> {
    match operator {
        Operator::Bang => Ok(native_bool(!right.truth_value())),
        Operator::Minus => match right {
            Object::Integer(n) => Ok(Object::Integer(n.wrapping_neg())),
            obj => Err(EvalError::UnknownPrefixOperator {
                operator,
                right: obj.type_name(),
            }),
        },
        _ => Err(EvalError::UnknownPrefixOperator {
            operator,
            right: right.type_name(),
        }),
    }
}

fn eval_infix_expression(
    operator: Operator,
    left: Object,
    right: Object,
) -> Result<Object> {
    match (left, right) {
        (Object::Integer(x), Object::Integer(y)) => eval_integer_infix_expression(operator, x, y),
        (Object::String(x), Object::String(y)) => eval_string_infix_expression(operator, x, &y),
        (left, right) => match operator {
            Operator::Eq => Ok(native_bool(is_same_singleton(&left, &right))),
            Operator::NotEq => Ok(native_bool(!is_same_singleton(&left, &right))),
            op => Err(EvalError::unsupported_infix(
                left.type_name(),
                op,
                right.type_name(),
            )),
        },
    }
}

// Booleans and null are shared singletons; nothing else is ever identical.
fn is_same_singleton(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean(x), Object::Boolean(y)) => x == y,
        (Object::Null, Object::Null) => true,
        _ => false,
    }
}

fn eval_integer_infix_expression(
    operator: Operator,
    left: i64,
    right: i64,
) -> Result<Object> {
    match operator {
        Operator::Plus => Ok(Object::Integer(left.wrapping_add(right))),
        Operator::Minus => Ok(Object::Integer(left.wrapping_sub(right))),
        Operator::Asterisk => Ok(Object::Integer(left.wrapping_mul(right))),
        Operator::Slash => {
            if right == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Object::Integer(left.wrapping_div(right)))
            }
        }
        Operator::LT => Ok(native_bool(left < right)),
        Operator::GT => Ok(native_bool(left > right)),
        Operator::Eq => Ok(native_bool(left == right)),
        Operator::NotEq => Ok(native_bool(left != right)),
        op => Err(EvalError::unsupported_infix("INTEGER", op, "INTEGER")),
    }
}

fn eval_string_infix_expression(
    operator: Operator,
    mut left: String,
    right: &str,
) -> Result<Object> {
    match operator {
        Operator::Plus => {
            left.push_str(right);
            Ok(Object::String(left))
        }
        op => Err(EvalError::unsupported_infix("STRING", op, "STRING")),
    }
}

fn apply_function(function: Object, arguments: Vec<Object>) -> Flow<Object> {
    match function {
        Object::Function(func) => {
            if func.parameters.len() != arguments.len() {
                return Err(EvalError::IncorrectArity {
                    got: arguments.len(),
                    want: func.parameters.len(),
                }
                .into());
            }
            trace!(arity = arguments.len(), "calling function");

            let env = Environment::with_enclosed(&func.env);
            for (param, arg) in func.parameters.iter().zip(arguments) {
                env.set(&param.value, arg);
            }

            match eval_statements(&func.body.statements, &env) {
                Err(Signal::Return(value)) => Ok(value),
                other => other,
            }
        }
        Object::Builtin(builtin) => {
            trace!(name = builtin.name, "calling builtin");
            Ok(builtin.call(arguments)?)
        }
        obj => Err(EvalError::NotAFunction {
            found: obj.type_name(),
        }
        .into()),
    }
}

fn eval_index_expression(left: Object, index: Object) -> Result<Object> {
    match (left, index) {
        (Object::Array(elements), Object::Integer(i)) => Ok(usize::try_from(i)
            .ok()
            .and_then(|i| elements.into_iter().nth(i))
            .unwrap_or(NULL)),
        (Object::Array(_), _) => Ok(NULL),
        (Object::Hash(hash), key) => {
            let key = HashKey::try_from(key)?;
            Ok(hash.values.get(&key).cloned().unwrap_or(NULL))
        }
        (left, _) => Err(EvalError::NotIndexable {
            found: left.type_name(),
        }),
    }
}

fn eval_hash_literal(hash: &ast::HashLiteral, env: &Environment) -> Flow<Object> {
    let mut values = HashValue::default();

    for (key_expr, value_expr) in hash.pairs.iter() {
        let key = HashKey::try_from(eval_expression(key_expr, env)?)?;
        let value = eval_expression(value_expr, env)?;
        values.values.insert(key, value);
    }

    Ok(values.into())
}
