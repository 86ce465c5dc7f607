//! FILENAME: parser/src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for simulation expressions.
//! CONTEXT: After the Lexer tokenizes an expression string, the Parser converts
//! those tokens into this tree structure. The engine's Evaluator then traverses
//! this tree to compute the final result.
//!
//! SUPPORTED EXPRESSIONS:
//! - Literals: Numbers
//! - Variable paths: foo, foo.bar, [Entity 1].attr.sub
//! - Binary operations: ||, &&, ==, !=, <, <=, >, >=, +, -, *, /, ^
//! - Unary operations: !, -, +
//! - Function calls: max(a, b), abs(x)

/// Represents a parsed expression.
/// Nodes own their children exclusively, so a tree can be shared across
/// threads and evaluated concurrently.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    /// A numeric literal. Literals are always non-negative; a leading sign is a UnaryOp.
    Literal(f64),

    /// A dotted variable path like foo.bar or [foo].bar.baz.
    /// The segments are resolved as a unit by the host's variable table.
    VariablePath(Vec<String>),

    /// A unary operation: op operand (e.g., -5, !x).
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// A binary operation: left op right (e.g., 5 + 3, x > 10).
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },

    /// A function call like max(a, b). Resolved against the registry at evaluation time.
    FunctionCall { name: String, args: Vec<Expression> },
}

/// An assignment statement: destination = value.
#[derive(Debug, PartialEq, Clone)]
pub struct Assignment {
    /// Never empty.
    pub destination: Vec<String>,
    pub value: Expression,
}

/// Binary operators for expressions.
/// Listed in order of precedence groups (logical OR is lowest).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum BinaryOperator {
    Or,  // ||
    And, // &&

    // Equality
    Equal,    // ==
    NotEqual, // !=

    // Relational
    LessThan,     // <
    LessEqual,    // <=
    GreaterThan,  // >
    GreaterEqual, // >=

    // Arithmetic operators
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Power,    // ^ (binds tighter than unary prefixes, right associative)
}

/// Prefix operators.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum UnaryOperator {
    Not,    // !
    Negate, // -
    Plus,   // +
}

impl BinaryOperator {
    /// Maps a symbol token's text to an operator.
    pub fn from_symbol(sym: &str) -> Option<Self> {
        let op = match sym {
            "||" => BinaryOperator::Or,
            "&&" => BinaryOperator::And,
            "==" => BinaryOperator::Equal,
            "!=" => BinaryOperator::NotEqual,
            "<" => BinaryOperator::LessThan,
            "<=" => BinaryOperator::LessEqual,
            ">" => BinaryOperator::GreaterThan,
            ">=" => BinaryOperator::GreaterEqual,
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Subtract,
            "*" => BinaryOperator::Multiply,
            "/" => BinaryOperator::Divide,
            "^" => BinaryOperator::Power,
            _ => return None,
        };
        Some(op)
    }
}

impl UnaryOperator {
    pub fn from_symbol(sym: &str) -> Option<Self> {
        match sym {
            "!" => Some(UnaryOperator::Not),
            "-" => Some(UnaryOperator::Negate),
            "+" => Some(UnaryOperator::Plus),
            _ => None,
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOperator::Or => write!(f, "||"),
            BinaryOperator::And => write!(f, "&&"),
            BinaryOperator::Equal => write!(f, "=="),
            BinaryOperator::NotEqual => write!(f, "!="),
            BinaryOperator::LessThan => write!(f, "<"),
            BinaryOperator::LessEqual => write!(f, "<="),
            BinaryOperator::GreaterThan => write!(f, ">"),
            BinaryOperator::GreaterEqual => write!(f, ">="),
            BinaryOperator::Add => write!(f, "+"),
            BinaryOperator::Subtract => write!(f, "-"),
            BinaryOperator::Multiply => write!(f, "*"),
            BinaryOperator::Divide => write!(f, "/"),
            BinaryOperator::Power => write!(f, "^"),
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Not => write!(f, "!"),
            UnaryOperator::Negate => write!(f, "-"),
            UnaryOperator::Plus => write!(f, "+"),
        }
    }
}

/// Writes a variable path with its root bracket-quoted, e.g. `[foo].bar`.
fn write_path(f: &mut std::fmt::Formatter<'_>, segments: &[String]) -> std::fmt::Result {
    for (i, segment) in segments.iter().enumerate() {
        if i == 0 {
            write!(f, "[{}]", segment)?;
        } else {
            write!(f, ".{}", segment)?;
        }
    }
    Ok(())
}

/// Prints a fully parenthesised form that parses back to the same tree.
impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Literal(n) => write!(f, "{}", n),
            Expression::VariablePath(segments) => write_path(f, segments),
            Expression::UnaryOp { op, operand } => write!(f, "({}{})", op, operand),
            Expression::BinaryOp { left, op, right } => write!(f, "({} {} {})", left, op, right),
            Expression::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_path(f, &self.destination)?;
        write!(f, " = {}", self.value)
    }
}
