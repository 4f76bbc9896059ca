use std::fmt;

/// An identifier name, as bound by `let` and function parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident(pub String);

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    Bang,
    Minus,
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::Bang => f.write_str("!"),
            Prefix::Minus => f.write_str("-"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infix {
    Plus,
    Minus,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl fmt::Display for Infix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lexeme = match self {
            Infix::Plus => "+",
            Infix::Minus => "-",
            Infix::Asterisk => "*",
            Infix::Slash => "/",
            Infix::Lt => "<",
            Infix::Gt => ">",
            Infix::Eq => "==",
            Infix::NotEq => "!=",
        };
        f.write_str(lexeme)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Let(Ident, Expression),
    Return(Expression),
    Expression(Expression),
    Block(BlockStatement),
}

/// A brace-delimited sequence of statements, as appears in `if` arms and
/// function bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Identifier(Ident),
    IntegerLiteral(i64),
    BooleanLiteral(bool),
    Prefix(Prefix, Box<Expression>),
    Infix(Infix, Box<Expression>, Box<Expression>),
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    Function {
        parameters: Vec<Ident>,
        body: BlockStatement,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

/// The root of a parse: an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    /// The literal of the program's defining token: that of the first
    /// statement, or the empty string for an empty program.
    pub fn token_literal(&self) -> String {
        match self.statements.first() {
            Some(statement) => statement.token_literal(),
            None => String::new(),
        }
    }
}

impl Statement {
    pub fn token_literal(&self) -> String {
        match self {
            Statement::Let(..) => "let".to_string(),
            Statement::Return(_) => "return".to_string(),
            Statement::Expression(expression) => expression.token_literal(),
            Statement::Block(_) => "{".to_string(),
        }
    }
}

impl Expression {
    pub fn token_literal(&self) -> String {
        match self {
            Expression::Identifier(name) => name.0.clone(),
            Expression::IntegerLiteral(value) => value.to_string(),
            Expression::BooleanLiteral(value) => value.to_string(),
            Expression::Prefix(operator, _) => operator.to_string(),
            Expression::Infix(operator, _, _) => operator.to_string(),
            Expression::If { .. } => "if".to_string(),
            Expression::Function { .. } => "fn".to_string(),
            Expression::Call { .. } => "(".to_string(),
        }
    }
}

// Canonical stringification: the fully parenthesized textual form used for
// precedence tests and round-tripping.

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(name, value) => write!(f, "let {} = {};", name, value),
            Statement::Return(value) => write!(f, "return {};", value),
            Statement::Expression(expression) => write!(f, "{}", expression),
            Statement::Block(block) => write!(f, "{}", block),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::IntegerLiteral(value) => write!(f, "{}", value),
            Expression::BooleanLiteral(value) => write!(f, "{}", value),
            Expression::Prefix(operator, right) => write!(f, "({}{})", operator, right),
            Expression::Infix(operator, left, right) => {
                write!(f, "({} {} {})", left, operator, right)
            }
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, "else {}", alternative)?;
                }
                Ok(())
            }
            Expression::Function { parameters, body } => {
                let parameters = parameters
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "fn({}) {}", parameters, body)
            }
            Expression::Call {
                function,
                arguments,
            } => {
                let arguments = arguments
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}({})", function, arguments)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn let_statement_stringifies_canonically() {
        let program = Program {
            statements: vec![Statement::Let(
                Ident("myVar".to_string()),
                Expression::Identifier(Ident("anotherVar".to_string())),
            )],
        };
        assert_eq!(program.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn program_token_literal_is_that_of_the_first_statement() {
        let program = Program {
            statements: vec![Statement::Let(
                Ident("x".to_string()),
                Expression::IntegerLiteral(5),
            )],
        };
        assert_eq!(program.token_literal(), "let");
        assert_eq!(Program::default().token_literal(), "");
    }

    #[test]
    fn expression_token_literals() {
        assert_eq!(
            Expression::Identifier(Ident("foobar".to_string())).token_literal(),
            "foobar"
        );
        assert_eq!(Expression::IntegerLiteral(5).token_literal(), "5");
        assert_eq!(Expression::BooleanLiteral(true).token_literal(), "true");
        assert_eq!(
            Expression::Prefix(Prefix::Bang, Box::new(Expression::IntegerLiteral(5)))
                .token_literal(),
            "!"
        );
    }

    #[test]
    fn function_literal_stringifies_with_parameter_list() {
        let function = Expression::Function {
            parameters: vec![Ident("x".to_string()), Ident("y".to_string())],
            body: BlockStatement {
                statements: vec![Statement::Expression(Expression::Infix(
                    Infix::Plus,
                    Box::new(Expression::Identifier(Ident("x".to_string()))),
                    Box::new(Expression::Identifier(Ident("y".to_string()))),
                ))],
            },
        };
        assert_eq!(function.to_string(), "fn(x, y) (x + y)");
    }
}
