//! Syntax tree produced by the parser.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    Equal,
    NotEqual,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::And => "dan",
            BinaryOp::Or => "atau",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterOrEqual => ">=",
            BinaryOp::LessThan => "<",
            BinaryOp::LessOrEqual => "<=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    Str(String),
    Bool(bool),
    Variable(String),
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
}

impl Expression {
    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assignment {
        target: String,
        value: Expression,
    },
    /// `else_branch` is another `If` for `kalogak`, a `Block` for
    /// `lainnya`, or `Empty`.
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        else_branch: Box<Statement>,
    },
    ForRange {
        variable: String,
        start: Expression,
        end: Expression,
        body: Box<Statement>,
    },
    While {
        condition: Expression,
        body: Box<Statement>,
    },
    Input {
        target: String,
    },
    Print {
        value: Expression,
    },
    Block(Vec<Statement>),
    Expression(Expression),
    Empty,
}

impl Statement {
    /// Short name for tracing span metadata. Avoids Debug-formatting whole
    /// subtrees.
    pub fn name(&self) -> &'static str {
        match self {
            Statement::Assignment { .. } => "assignment",
            Statement::If { .. } => "if",
            Statement::ForRange { .. } => "for",
            Statement::While { .. } => "while",
            Statement::Input { .. } => "input",
            Statement::Print { .. } => "print",
            Statement::Block(_) => "block",
            Statement::Expression(_) => "expression",
            Statement::Empty => "empty",
        }
    }
}
