use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::ast::{BlockStatement, Ident};
use crate::environment::Environment;

/// A runtime value. `ReturnValue` and `Error` are evaluation control flow:
/// both unwind enclosing statement sequences, the former stopping at the
/// nearest function boundary.
#[derive(Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    ReturnValue(Box<Object>),
    Error(String),
    Function(Vec<Ident>, BlockStatement, Rc<RefCell<Environment>>),
}

impl Object {
    /// The stable tag identifying this value's type in error messages.
    pub fn object_type(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Function(..) => "FUNCTION",
        }
    }

    /// The human-readable form printed by the REPL.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Error(message) => write!(f, "ERROR: {}", message),
            Object::Function(parameters, body, _) => {
                let parameters = parameters
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "fn({}) {{\n{}\n}}", parameters, body)
            }
        }
    }
}

// A closure's captured environment can refer back to the closure itself, so
// neither equality nor debug formatting may recurse into it.

impl PartialEq for Object {
    fn eq(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::ReturnValue(a), Object::ReturnValue(b)) => a == b,
            (Object::Error(a), Object::Error(b)) => a == b,
            (Object::Function(params_a, body_a, env_a), Object::Function(params_b, body_b, env_b)) => {
                params_a == params_b && body_a == body_b && Rc::ptr_eq(env_a, env_b)
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
            Object::Boolean(value) => f.debug_tuple("Boolean").field(value).finish(),
            Object::Null => f.write_str("Null"),
            Object::ReturnValue(value) => f.debug_tuple("ReturnValue").field(value).finish(),
            Object::Error(message) => f.debug_tuple("Error").field(message).finish(),
            Object::Function(parameters, _, _) => {
                f.debug_tuple("Function").field(parameters).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tags_are_stable() {
        assert_eq!(Object::Integer(5).object_type(), "INTEGER");
        assert_eq!(Object::Boolean(true).object_type(), "BOOLEAN");
        assert_eq!(Object::Null.object_type(), "NULL");
        assert_eq!(Object::Error("boom".to_string()).object_type(), "ERROR");
    }

    #[test]
    fn inspect_forms() {
        assert_eq!(Object::Integer(-7).inspect(), "-7");
        assert_eq!(Object::Boolean(true).inspect(), "true");
        assert_eq!(Object::Boolean(false).inspect(), "false");
        assert_eq!(Object::Null.inspect(), "null");
        assert_eq!(
            Object::Error("type mismatch: INTEGER + BOOLEAN".to_string()).inspect(),
            "ERROR: type mismatch: INTEGER + BOOLEAN"
        );
    }

    #[test]
    fn return_value_inspects_as_the_wrapped_value() {
        assert_eq!(
            Object::ReturnValue(Box::new(Object::Integer(10))).inspect(),
            "10"
        );
    }
}
