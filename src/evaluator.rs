//! Tree-walking evaluator.
//!
//! Walks a parsed `Program` and reduces it to a runtime `Object`. Errors
//! are values, not panics: they propagate outward like `return` and stop
//! every enclosing construct.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{BlockStatement, Expression, Ident, Infix, Prefix, Program, Statement};
use crate::environment::Environment;
use crate::object::Object;

// Canonical values. Evaluation never builds a boolean or null any other way.
pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

pub struct Evaluator {
    env: Rc<RefCell<Environment>>,
}

impl Evaluator {
    pub fn new(env: Rc<RefCell<Environment>>) -> Evaluator {
        Evaluator { env }
    }

    /// Evaluates the statements in order and yields the last value. A
    /// `return` unwraps here; an error stops the program.
    pub fn eval(&mut self, program: &Program) -> Option<Object> {
        let mut result = None;
        for statement in &program.statements {
            match self.eval_statement(statement) {
                Some(Object::ReturnValue(value)) => return Some(*value),
                Some(Object::Error(message)) => return Some(Object::Error(message)),
                object => result = object,
            }
        }
        result
    }

    fn eval_statement(&mut self, statement: &Statement) -> Option<Object> {
        match statement {
            Statement::Let(name, value) => {
                let value = self.eval_expression(value)?;
                if is_error(&value) {
                    return Some(value);
                }
                self.env.borrow_mut().set(name.0.clone(), value);
                None
            }
            Statement::Return(value) => {
                let value = self.eval_expression(value)?;
                if is_error(&value) {
                    return Some(value);
                }
                Some(Object::ReturnValue(Box::new(value)))
            }
            Statement::Expression(expression) => self.eval_expression(expression),
            Statement::Block(block) => self.eval_block_statement(block),
        }
    }

    // Unlike `eval`, a `ReturnValue` passes through still wrapped so it can
    // cross nested blocks and stop only at the function boundary.
    fn eval_block_statement(&mut self, block: &BlockStatement) -> Option<Object> {
        let mut result = None;
        for statement in &block.statements {
            match self.eval_statement(statement) {
                Some(Object::ReturnValue(value)) => {
                    return Some(Object::ReturnValue(value));
                }
                Some(Object::Error(message)) => return Some(Object::Error(message)),
                object => result = object,
            }
        }
        result
    }

    fn eval_expression(&mut self, expression: &Expression) -> Option<Object> {
        match expression {
            Expression::Identifier(name) => Some(self.eval_identifier(name)),
            Expression::IntegerLiteral(value) => Some(Object::Integer(*value)),
            Expression::BooleanLiteral(value) => Some(native_bool(*value)),
            Expression::Prefix(operator, right) => {
                let right = self.eval_expression(right)?;
                if is_error(&right) {
                    return Some(right);
                }
                Some(eval_prefix_expression(*operator, right))
            }
            Expression::Infix(operator, left, right) => {
                let left = self.eval_expression(left)?;
                if is_error(&left) {
                    return Some(left);
                }
                let right = self.eval_expression(right)?;
                if is_error(&right) {
                    return Some(right);
                }
                Some(eval_infix_expression(*operator, left, right))
            }
            Expression::If {
                condition,
                consequence,
                alternative,
            } => self.eval_if_expression(condition, consequence, alternative.as_ref()),
            Expression::Function { parameters, body } => Some(Object::Function(
                parameters.clone(),
                body.clone(),
                Rc::clone(&self.env),
            )),
            Expression::Call {
                function,
                arguments,
            } => {
                let function = self.eval_expression(function)?;
                if is_error(&function) {
                    return Some(function);
                }
                let arguments = match self.eval_expressions(arguments) {
                    Ok(values) => values,
                    Err(error) => return Some(error),
                };
                self.apply_function(function, arguments)
            }
        }
    }

    fn eval_identifier(&self, name: &Ident) -> Object {
        match self.env.borrow().get(&name.0) {
            Some(value) => value,
            None => Object::Error(format!("identifier not found: {}", name.0)),
        }
    }

    fn eval_if_expression(
        &mut self,
        condition: &Expression,
        consequence: &BlockStatement,
        alternative: Option<&BlockStatement>,
    ) -> Option<Object> {
        let condition = self.eval_expression(condition)?;
        if is_error(&condition) {
            return Some(condition);
        }

        if is_truthy(&condition) {
            self.eval_block_statement(consequence)
        } else if let Some(alternative) = alternative {
            self.eval_block_statement(alternative)
        } else {
            Some(NULL)
        }
    }

    // Arguments evaluate left to right; the first error aborts the call.
    fn eval_expressions(&mut self, expressions: &[Expression]) -> Result<Vec<Object>, Object> {
        let mut values = Vec::with_capacity(expressions.len());
        for expression in expressions {
            match self.eval_expression(expression) {
                Some(value) if is_error(&value) => return Err(value),
                Some(value) => values.push(value),
                None => values.push(NULL),
            }
        }
        Ok(values)
    }

    fn apply_function(&mut self, function: Object, arguments: Vec<Object>) -> Option<Object> {
        let (parameters, body, captured) = match function {
            Object::Function(parameters, body, env) => (parameters, body, env),
            other => {
                return Some(Object::Error(format!(
                    "not a function: {}",
                    other.object_type()
                )))
            }
        };

        let mut call_env = Environment::new_enclosed(captured);
        for (parameter, argument) in parameters.iter().zip(arguments) {
            call_env.set(parameter.0.clone(), argument);
        }

        let caller_env = std::mem::replace(&mut self.env, Rc::new(RefCell::new(call_env)));
        let result = self.eval_block_statement(&body);
        self.env = caller_env;

        result.map(unwrap_return_value)
    }
}

fn eval_prefix_expression(operator: Prefix, right: Object) -> Object {
    match operator {
        Prefix::Bang => eval_bang_operator(right),
        Prefix::Minus => eval_minus_operator(right),
    }
}

fn eval_bang_operator(right: Object) -> Object {
    match right {
        Object::Boolean(true) => FALSE,
        Object::Boolean(false) => TRUE,
        Object::Null => TRUE,
        _ => FALSE,
    }
}

fn eval_minus_operator(right: Object) -> Object {
    match right {
        Object::Integer(value) => Object::Integer(value.wrapping_neg()),
        other => Object::Error(format!("unknown operator: -{}", other.object_type())),
    }
}

fn eval_infix_expression(operator: Infix, left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_expression(operator, left, right)
        }
        (left, right) => match operator {
            Infix::Eq => native_bool(left == right),
            Infix::NotEq => native_bool(left != right),
            _ if left.object_type() != right.object_type() => Object::Error(format!(
                "type mismatch: {} {} {}",
                left.object_type(),
                operator,
                right.object_type()
            )),
            _ => Object::Error(format!(
                "unknown operator: {} {} {}",
                left.object_type(),
                operator,
                right.object_type()
            )),
        },
    }
}

// Arithmetic wraps with signed 64-bit semantics.
fn eval_integer_infix_expression(operator: Infix, left: i64, right: i64) -> Object {
    match operator {
        Infix::Plus => Object::Integer(left.wrapping_add(right)),
        Infix::Minus => Object::Integer(left.wrapping_sub(right)),
        Infix::Asterisk => Object::Integer(left.wrapping_mul(right)),
        Infix::Slash => {
            if right == 0 {
                Object::Error(format!("division by zero: {} / 0", left))
            } else {
                Object::Integer(left.wrapping_div(right))
            }
        }
        Infix::Lt => native_bool(left < right),
        Infix::Gt => native_bool(left > right),
        Infix::Eq => native_bool(left == right),
        Infix::NotEq => native_bool(left != right),
    }
}

fn native_bool(value: bool) -> Object {
    if value {
        TRUE
    } else {
        FALSE
    }
}

// FALSE and NULL are falsy; every other value is truthy.
fn is_truthy(object: &Object) -> bool {
    !matches!(object, Object::Boolean(false) | Object::Null)
}

fn is_error(object: &Object) -> bool {
    matches!(object, Object::Error(_))
}

fn unwrap_return_value(object: Object) -> Object {
    match object {
        Object::ReturnValue(value) => *value,
        object => object,
    }
}
