use std::fmt;

use crate::value::Value;

// Node types in the parse tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Program, // Root: [Identifier, Decls, CompoundStatement]
    Identifier,

    // Declarations
    Decls,
    DeclList,
    Decl, // [IdentifierList, type]
    IdentifierList,
    StandardType, // INTEGER or FLOAT
    ArrayType,    // [Dim, StandardType]
    Dim,          // [IntConst, IntConst]

    // Constants (terminal)
    IntConst,
    FloatConst,
    StringConst,

    // Statements
    CompoundStatement,
    StatementList,
    Assignment,     // [target, expr]
    IfStatement,    // [cond, then] or [cond, then, else]
    WhileStatement, // [cond, body]
    Read,
    WriteExpr,
    WriteString,

    // Variables
    Variable,    // [Identifier]
    ArrayAccess, // [Identifier, index]

    // Operators, valued with their spelling
    BinOp,
    RelOp,
    UnaryOp,
}

impl NodeType {
    pub fn name(self) -> &'static str {
        match self {
            NodeType::Program => "Program",
            NodeType::Identifier => "Identifier",
            NodeType::Decls => "Decls",
            NodeType::DeclList => "DeclList",
            NodeType::Decl => "Decl",
            NodeType::IdentifierList => "IdentifierList",
            NodeType::StandardType => "StandardType",
            NodeType::ArrayType => "ArrayType",
            NodeType::Dim => "Dim",
            NodeType::IntConst => "IntConst",
            NodeType::FloatConst => "FloatConst",
            NodeType::StringConst => "StringConst",
            NodeType::CompoundStatement => "CompoundStatement",
            NodeType::StatementList => "StatementList",
            NodeType::Assignment => "Assignment",
            NodeType::IfStatement => "IfStatement",
            NodeType::WhileStatement => "WhileStatement",
            NodeType::Read => "Read",
            NodeType::WriteExpr => "WriteExpr",
            NodeType::WriteString => "WriteString",
            NodeType::Variable => "Variable",
            NodeType::ArrayAccess => "ArrayAccess",
            NodeType::BinOp => "BinOp",
            NodeType::RelOp => "RelOp",
            NodeType::UnaryOp => "UnaryOp",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generic tree node; owns its children
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub node_type: NodeType,
    pub value: Option<Value>,
    pub children: Vec<AstNode>,
}

impl AstNode {
    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            value: None,
            children: Vec::new(),
        }
    }

    pub fn new_terminal(node_type: NodeType, value: impl Into<Value>) -> Self {
        Self {
            node_type,
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    pub fn with_children(node_type: NodeType, children: Vec<AstNode>) -> Self {
        Self {
            node_type,
            value: None,
            children,
        }
    }

    /// Operator node: value is the operator spelling
    pub fn operator(node_type: NodeType, op: &str, operands: Vec<AstNode>) -> Self {
        Self {
            node_type,
            value: Some(Value::from(op)),
            children: operands,
        }
    }

    // Adds as last child
    pub fn add_child(&mut self, child: AstNode) {
        self.children.push(child);
    }

    /// `Kind` or `Kind(value)`
    pub fn label(&self) -> String {
        match &self.value {
            Some(value) => format!("{}({})", self.node_type, value),
            None => self.node_type.to_string(),
        }
    }

    /// Number of nodes in this subtree, including self
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(AstNode::count).sum::<usize>()
    }
}
