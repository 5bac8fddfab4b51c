use super::helpers::{binary_node_type, get_precedence};
use super::{ParseError, Parser};
use crate::ast::{AstNode, NodeType};
use crate::lexer::TokenKind;

// Recursive expression parsing methods
impl<'a> Parser<'a> {
    /// Parse an expression with precedence climbing
    /// Only operators binding at least as tightly as `min_precedence` are consumed
    pub(super) fn parse_expression(
        &mut self,
        depth: usize,
        min_precedence: u8,
    ) -> Result<AstNode, ParseError> {
        self.check_depth(depth)?;

        let mut left = self.parse_factor(depth)?;

        loop {
            let op_precedence = match get_precedence(self.peek_kind()) {
                Some(p) if p >= min_precedence => p,
                _ => break, // No more operators at this precedence level
            };

            let op = self.advance();

            // Right side binds tighter, which keeps chains left-associative
            let right = self.parse_expression(depth + 1, op_precedence + 1)?;

            left = self.add_node(AstNode::operator(
                binary_node_type(op.kind),
                op.kind.text().unwrap_or_default(),
                vec![left, right],
            ))?;
        }

        Ok(left)
    }

    /// Parse a factor: variable, constant, NOT factor or ( expr )
    fn parse_factor(&mut self, depth: usize) -> Result<AstNode, ParseError> {
        self.check_depth(depth)?;

        match self.peek_kind() {
            TokenKind::Identifier => self.parse_variable(depth),

            TokenKind::IntLit => {
                let token = self.advance();
                self.add_node(AstNode::new_terminal(NodeType::IntConst, token.value))
            }

            TokenKind::FloatLit => {
                let token = self.advance();
                self.add_node(AstNode::new_terminal(NodeType::FloatConst, token.value))
            }

            TokenKind::Not => {
                let op = self.advance();
                let operand = self.parse_factor(depth + 1)?;
                self.add_node(AstNode::operator(
                    NodeType::UnaryOp,
                    op.kind.text().unwrap_or_default(),
                    vec![operand],
                ))
            }

            // Parentheses group but add no node
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression(depth + 1, 0)?;
                self.consume(TokenKind::RParen, "')'")?;
                Ok(inner)
            }

            _ => Err(self.unexpected("expression")),
        }
    }

    /// Parse ident or ident [ expr ]
    pub(super) fn parse_variable(&mut self, depth: usize) -> Result<AstNode, ParseError> {
        let name = self.parse_identifier()?;

        if !self.peek_kind_is(TokenKind::LBracket) {
            return self.add_node(AstNode::with_children(NodeType::Variable, vec![name]));
        }

        self.advance(); // Consume '['
        let index = self.parse_expression(depth + 1, 0)?;
        self.consume(TokenKind::RBracket, "']'")?;

        self.add_node(AstNode::with_children(
            NodeType::ArrayAccess,
            vec![name, index],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::ast::NodeType;
    use crate::lexer::TokenKind;
    use crate::serializer::levels;
    use crate::value::Value;

    // Right-hand side of `x := <expr>`
    fn expr(source: &str) -> Result<AstNode, ParseError> {
        let program = format!("PROGRAM t; BEGIN x := {} END.", source);
        let ast = parse(&program, CompilerLimits::default())?;

        // Program -> CompoundStatement -> StatementList -> Assignment -> [target, value]
        Ok(ast.children[2].children[0].children[0].children[1].clone())
    }

    fn shape(source: &str) -> Vec<String> {
        levels(Some(&expr(source).unwrap()))
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let ast = expr("a + b * c").unwrap();

        assert_eq!(ast.label(), "BinOp(+)");
        assert_eq!(ast.children[0].node_type, NodeType::Variable);
        assert_eq!(ast.children[1].label(), "BinOp(*)");

        let ast = expr("a * b + c").unwrap();
        assert_eq!(ast.label(), "BinOp(+)");
        assert_eq!(ast.children[0].label(), "BinOp(*)");
    }

    #[test]
    fn test_left_associativity() {
        // (a - b) - c
        let ast = expr("a - b - c").unwrap();
        assert_eq!(ast.label(), "BinOp(-)");
        assert_eq!(ast.children[0].label(), "BinOp(-)");
        assert_eq!(ast.children[1].node_type, NodeType::Variable);

        // (8 / 4) / 2
        let ast = expr("8 / 4 / 2").unwrap();
        assert_eq!(ast.children[0].label(), "BinOp(/)");
        assert_eq!(ast.children[1].label(), "IntConst(2)");
    }

    #[test]
    fn test_long_chain_stays_left_leaning() {
        let source = vec!["1"; 500].join(" + ");
        let mut node = expr(&source).unwrap();

        let mut depth = 0;
        while node.node_type == NodeType::BinOp {
            assert_eq!(node.children[1].label(), "IntConst(1)");
            node = node.children[0].clone();
            depth += 1;
        }
        assert_eq!(depth, 499);
    }

    #[test]
    fn test_relational_below_additive() {
        assert_eq!(
            shape("a + 1 < b * 2"),
            vec![
                "RelOp(<)",
                "BinOp(+) # BinOp(*)",
                "Variable # IntConst(1) # Variable # IntConst(2)",
                "Identifier(a) # Identifier(b)"
            ]
        );
    }

    #[test]
    fn test_all_relational_operators() {
        for op in ["<", "<=", ">", ">=", "=", "<>"] {
            let ast = expr(&format!("a {} b", op)).unwrap();
            assert_eq!(ast.node_type, NodeType::RelOp);
            assert_eq!(ast.value, Some(Value::from(op)));
        }
    }

    #[test]
    fn test_relational_chains_left() {
        // (a < b) = c
        let ast = expr("a < b = c").unwrap();
        assert_eq!(ast.label(), "RelOp(=)");
        assert_eq!(ast.children[0].label(), "RelOp(<)");
    }

    #[test]
    fn test_logical_loosest() {
        let ast = expr("a < b and c > d").unwrap();
        assert_eq!(ast.label(), "BinOp(AND)");
        assert_eq!(ast.children[0].label(), "RelOp(<)");
        assert_eq!(ast.children[1].label(), "RelOp(>)");
    }

    #[test]
    fn test_and_or_share_precedence() {
        // (a OR b) AND c
        let ast = expr("a or b and c").unwrap();
        assert_eq!(ast.label(), "BinOp(AND)");
        assert_eq!(ast.children[0].label(), "BinOp(OR)");
    }

    #[test]
    fn test_not_binds_to_factor() {
        // (NOT a) + b
        let ast = expr("not a + b").unwrap();
        assert_eq!(ast.label(), "BinOp(+)");
        assert_eq!(ast.children[0].label(), "UnaryOp(NOT)");
        assert_eq!(ast.children[0].children.len(), 1);
    }

    #[test]
    fn test_double_not() {
        assert_eq!(
            shape("NOT NOT a"),
            vec!["UnaryOp(NOT)", "UnaryOp(NOT)", "Variable", "Identifier(a)"]
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let ast = expr("(a + b) * c").unwrap();
        assert_eq!(ast.label(), "BinOp(*)");
        assert_eq!(ast.children[0].label(), "BinOp(+)");

        // No node for the parentheses themselves
        assert_eq!(expr("((7))").unwrap().label(), "IntConst(7)");
    }

    #[test]
    fn test_not_parenthesized() {
        assert_eq!(
            shape("not (a = 1)"),
            vec!["UnaryOp(NOT)", "RelOp(=)", "Variable # IntConst(1)", "Identifier(a)"]
        );
    }

    #[test]
    fn test_constants() {
        assert_eq!(expr("42").unwrap().label(), "IntConst(42)");
        assert_eq!(expr("1.5E3").unwrap().label(), "FloatConst(1500.0)");
        assert_eq!(expr("0.25").unwrap().value, Some(Value::Float(0.25)));
    }

    #[test]
    fn test_array_access_in_expression() {
        assert_eq!(
            shape("v[i] * 2"),
            vec![
                "BinOp(*)",
                "ArrayAccess # IntConst(2)",
                "Identifier(v) # Variable",
                "Identifier(i)"
            ]
        );
    }

    #[test]
    fn test_binary_nodes_have_two_children() {
        let ast = expr("a + b * (c - d) / e or not f").unwrap();

        fn check(node: &AstNode) {
            match node.node_type {
                NodeType::BinOp | NodeType::RelOp => assert_eq!(node.children.len(), 2),
                NodeType::UnaryOp => assert_eq!(node.children.len(), 1),
                NodeType::Variable | NodeType::ArrayAccess => {
                    assert_eq!(node.children[0].node_type, NodeType::Identifier)
                }
                _ => {}
            }
            node.children.iter().for_each(check);
        }
        check(&ast);
    }

    #[test]
    fn test_error_unary_minus() {
        let err = expr("-1").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                kind: TokenKind::Minus,
                expected: "expression",
                ..
            }
        ));
    }

    #[test]
    fn test_error_unclosed_paren() {
        let err = expr("(a + b").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                kind: TokenKind::End,
                expected: "')'",
                ..
            }
        ));
    }

    #[test]
    fn test_error_string_operand() {
        assert!(expr("'abc'").is_err());
    }

    #[test]
    fn test_deep_parentheses_are_rejected() {
        let limits = CompilerLimits {
            max_expr_depth: 32,
            ..CompilerLimits::default()
        };
        let nested = "(".repeat(40) + "1" + &")".repeat(40);
        let source = format!("PROGRAM t; BEGIN x := {} END.", nested);

        let err = parse(&source, limits).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { .. }));
    }
}
