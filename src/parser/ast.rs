use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier: `[A-Za-z][A-Za-z0-9]*`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    /// Identifier text as written
    pub name: String,
}

impl Variable {
    /// Creates a variable with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }
}

/// A variable paired with a value, used by `define`, `set!` and `let`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Variable being bound
    pub variable: Variable,
    /// Value expression
    pub expression: Box<Expression>,
}

impl Binding {
    /// Creates a binding of `variable` to `expression`
    pub fn new(variable: Variable, expression: Expression) -> Self {
        Binding {
            variable,
            expression: Box::new(expression),
        }
    }
}

/// Definitions followed by expressions
///
/// The parser guarantees at least one expression and that no definition
/// follows an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    /// Leading `(define ...)` forms, in source order
    pub definitions: Vec<Binding>,
    /// Expressions, in source order
    pub expressions: Vec<Expression>,
}

impl Body {
    /// Number of expression nodes in the whole tree
    pub fn node_count(&self) -> usize {
        let definitions: usize = self
            .definitions
            .iter()
            .map(|binding| binding.expression.node_count())
            .sum();
        let expressions: usize = self.expressions.iter().map(Expression::node_count).sum();
        definitions + expressions
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// Integer literal: `42`, `-7`
    Integer(i64),

    /// Boolean literal: `true`, `false`
    Boolean(bool),

    /// String literal: `"text"`
    String(String),

    /// Variable reference: `x`
    Variable(Variable),

    /// Conditional: (if predicate consequent alternate)
    Conditional {
        /// Condition to test
        predicate: Box<Expression>,
        /// Value when the predicate holds
        consequent: Box<Expression>,
        /// Value otherwise
        alternate: Box<Expression>,
    },

    /// Conjunction: (and e1 e2 ...), at least one operand
    Conjunction(Vec<Expression>),

    /// Disjunction: (or e1 e2 ...), at least one operand
    Disjunction(Vec<Expression>),

    /// Mutation: (set! name value)
    Mutation(Binding),

    /// Procedure: (lambda (params...) body)
    Lambda {
        /// Parameter names, in order (duplicates are not rejected here)
        arguments: Vec<Variable>,
        /// Procedure body
        body: Body,
    },

    /// Local bindings: (let ((name value)...) body)
    Let {
        /// Bindings, in source order
        bindings: Vec<Binding>,
        /// Body evaluated with the bindings in scope
        body: Body,
    },

    /// Scope: (begin body)
    Scope(Body),

    /// Application: (applicator args...)
    Application {
        /// Expression producing the procedure
        applicator: Box<Expression>,
        /// Arguments, in order
        arguments: Vec<Expression>,
    },
}

impl Expression {
    /// Shorthand for a variable reference
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(Variable::new(name))
    }

    /// Number of expression nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        let children = match self {
            Expression::Integer(_)
            | Expression::Boolean(_)
            | Expression::String(_)
            | Expression::Variable(_) => 0,
            Expression::Conditional {
                predicate,
                consequent,
                alternate,
            } => predicate.node_count() + consequent.node_count() + alternate.node_count(),
            Expression::Conjunction(operands) | Expression::Disjunction(operands) => {
                operands.iter().map(Expression::node_count).sum()
            }
            Expression::Mutation(binding) => binding.expression.node_count(),
            Expression::Lambda { body, .. } | Expression::Scope(body) => body.node_count(),
            Expression::Let { bindings, body } => {
                bindings
                    .iter()
                    .map(|binding| binding.expression.node_count())
                    .sum::<usize>()
                    + body.node_count()
            }
            Expression::Application {
                applicator,
                arguments,
            } => {
                applicator.node_count()
                    + arguments.iter().map(Expression::node_count).sum::<usize>()
            }
        };
        1 + children
    }
}

/// Writes `items` separated by single spaces
fn write_spaced<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.variable, self.expression)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, definition) in self.definitions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "(define {})", definition)?;
        }
        if !self.definitions.is_empty() && !self.expressions.is_empty() {
            f.write_str(" ")?;
        }
        write_spaced(f, &self.expressions)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Integer(n) => write!(f, "{}", n),
            Expression::Boolean(b) => write!(f, "{}", b),
            Expression::String(s) => write!(f, "\"{}\"", s),
            Expression::Variable(v) => write!(f, "{}", v),
            Expression::Conditional {
                predicate,
                consequent,
                alternate,
            } => write!(f, "(if {} {} {})", predicate, consequent, alternate),
            Expression::Conjunction(operands) => {
                f.write_str("(and ")?;
                write_spaced(f, operands)?;
                f.write_str(")")
            }
            Expression::Disjunction(operands) => {
                f.write_str("(or ")?;
                write_spaced(f, operands)?;
                f.write_str(")")
            }
            Expression::Mutation(binding) => write!(f, "(set! {})", binding),
            Expression::Lambda { arguments, body } => {
                f.write_str("(lambda (")?;
                write_spaced(f, arguments)?;
                write!(f, ") {})", body)
            }
            Expression::Let { bindings, body } => {
                f.write_str("(let (")?;
                for (i, binding) in bindings.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "({})", binding)?;
                }
                write!(f, ") {})", body)
            }
            Expression::Scope(body) => write!(f, "(begin {})", body),
            Expression::Application {
                applicator,
                arguments,
            } => {
                write!(f, "({}", applicator)?;
                for argument in arguments {
                    write!(f, " {}", argument)?;
                }
                f.write_str(")")
            }
        }
    }
}
