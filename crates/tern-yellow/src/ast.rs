//! Typed views over the raw tree, casting by kind.

use crate::SyntaxKind::{self, *};
use crate::{Node, Token};

pub trait AstNode {
    fn cast(syntax: Node) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &Node;
}

macro_rules! ast_node {
    ($($name:ident => $kind:ident),* $(,)?) => {$(
        #[derive(Debug, Clone)]
        pub struct $name(Node);

        impl AstNode for $name {
            fn cast(syntax: Node) -> Option<Self> {
                (syntax.kind() == $kind).then_some(Self(syntax))
            }

            fn syntax(&self) -> &Node {
                &self.0
            }
        }
    )*};
}

ast_node! {
    SourceFile => SOURCE_FILE,
    Block => BLOCK,
    VariableStatement => VARIABLE_STATEMENT,
    VariableDeclaration => VARIABLE_DECLARATION,
    FunctionDeclaration => FUNCTION_DECLARATION,
    ClassDeclaration => CLASS_DECLARATION,
    InterfaceDeclaration => INTERFACE_DECLARATION,
    ConstructorDeclaration => CONSTRUCTOR_DECLARATION,
    MethodDeclaration => METHOD_DECLARATION,
    PropertyDeclaration => PROPERTY_DECLARATION,
    ExpressionStatement => EXPRESSION_STATEMENT,
    ReturnStatement => RETURN_STATEMENT,
    IfStatement => IF_STATEMENT,
    Ident => IDENT,
    ParameterList => PARAMETER_LIST,
    Parameter => PARAMETER,
    NameRef => NAME_REF,
    Literal => LITERAL,
    BinaryExpr => BINARY_EXPR,
    AssignmentExpr => ASSIGNMENT_EXPR,
    CallExpr => CALL_EXPR,
    ArrowFunction => ARROW_FUNCTION,
}

fn child<N: AstNode>(node: &Node) -> Option<N> {
    children(node).next()
}

fn children<'a, N: AstNode + 'a>(node: &'a Node) -> impl Iterator<Item = N> + 'a {
    node.child_nodes().cloned().filter_map(N::cast)
}

fn token(node: &Node, kind: SyntaxKind) -> Option<&Token> {
    node.child_tokens().find(|token| token.kind() == kind)
}

/// Modifier keywords in front of a member or parameter.
fn modifiers(node: &Node) -> impl Iterator<Item = &Token> + '_ {
    node.child_tokens().filter(|token| token.kind().is_modifier())
}

impl SourceFile {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        children(&self.0)
    }
}

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        children(&self.0)
    }
}

#[derive(Debug, Clone)]
pub enum Statement {
    Block(Block),
    Variable(VariableStatement),
    Function(FunctionDeclaration),
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    Expression(ExpressionStatement),
    Return(ReturnStatement),
    If(IfStatement),
    /// Statements without a dedicated view.
    Other(Node),
}

impl AstNode for Statement {
    fn cast(syntax: Node) -> Option<Self> {
        let statement = match syntax.kind() {
            BLOCK => Statement::Block(Block(syntax)),
            VARIABLE_STATEMENT => Statement::Variable(VariableStatement(syntax)),
            FUNCTION_DECLARATION => Statement::Function(FunctionDeclaration(syntax)),
            CLASS_DECLARATION => Statement::Class(ClassDeclaration(syntax)),
            INTERFACE_DECLARATION => Statement::Interface(InterfaceDeclaration(syntax)),
            EXPRESSION_STATEMENT => Statement::Expression(ExpressionStatement(syntax)),
            RETURN_STATEMENT => Statement::Return(ReturnStatement(syntax)),
            IF_STATEMENT => Statement::If(IfStatement(syntax)),
            kind if kind.is_statement() => Statement::Other(syntax),
            _ => return None,
        };
        Some(statement)
    }

    fn syntax(&self) -> &Node {
        match self {
            Statement::Block(it) => it.syntax(),
            Statement::Variable(it) => it.syntax(),
            Statement::Function(it) => it.syntax(),
            Statement::Class(it) => it.syntax(),
            Statement::Interface(it) => it.syntax(),
            Statement::Expression(it) => it.syntax(),
            Statement::Return(it) => it.syntax(),
            Statement::If(it) => it.syntax(),
            Statement::Other(node) => node,
        }
    }
}

impl VariableStatement {
    /// `var`, `let` or `const`.
    pub fn keyword(&self) -> Option<&Token> {
        self.0.first_token()
    }

    pub fn declarations(&self) -> impl Iterator<Item = VariableDeclaration> + '_ {
        children(&self.0)
    }
}

impl VariableDeclaration {
    pub fn name(&self) -> Option<Ident> {
        child(&self.0)
    }

    pub fn initializer(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl FunctionDeclaration {
    pub fn name(&self) -> Option<Ident> {
        child(&self.0)
    }

    pub fn parameters(&self) -> Option<ParameterList> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl ClassDeclaration {
    pub fn name(&self) -> Option<Ident> {
        child(&self.0)
    }

    pub fn members(&self) -> impl Iterator<Item = ClassMember> + '_ {
        children(&self.0)
    }

    pub fn extends(&self) -> Option<&Node> {
        self.0.child_nodes().find(|node| node.kind() == EXTENDS_CLAUSE)
    }
}

impl InterfaceDeclaration {
    pub fn name(&self) -> Option<Ident> {
        child(&self.0)
    }
}

#[derive(Debug, Clone)]
pub enum ClassMember {
    Constructor(ConstructorDeclaration),
    Method(MethodDeclaration),
    Property(PropertyDeclaration),
}

impl AstNode for ClassMember {
    fn cast(syntax: Node) -> Option<Self> {
        let member = match syntax.kind() {
            CONSTRUCTOR_DECLARATION => ClassMember::Constructor(ConstructorDeclaration(syntax)),
            METHOD_DECLARATION => ClassMember::Method(MethodDeclaration(syntax)),
            PROPERTY_DECLARATION => ClassMember::Property(PropertyDeclaration(syntax)),
            _ => return None,
        };
        Some(member)
    }

    fn syntax(&self) -> &Node {
        match self {
            ClassMember::Constructor(it) => it.syntax(),
            ClassMember::Method(it) => it.syntax(),
            ClassMember::Property(it) => it.syntax(),
        }
    }
}

impl ConstructorDeclaration {
    pub fn parameters(&self) -> Option<ParameterList> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl MethodDeclaration {
    pub fn modifiers(&self) -> impl Iterator<Item = &Token> + '_ {
        modifiers(&self.0)
    }

    pub fn name(&self) -> Option<Ident> {
        child(&self.0)
    }

    pub fn parameters(&self) -> Option<ParameterList> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl PropertyDeclaration {
    pub fn modifiers(&self) -> impl Iterator<Item = &Token> + '_ {
        modifiers(&self.0)
    }

    pub fn name(&self) -> Option<Ident> {
        child(&self.0)
    }

    pub fn initializer(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl ExpressionStatement {
    pub fn expression(&self) -> Option<Expr> {
        child(&self.0)
    }

    /// The string literal of a directive such as `'use strict';`.
    pub fn directive_text(&self) -> Option<&str> {
        let literal = self.0.child_nodes().next().filter(|node| node.kind() == LITERAL)?;
        literal.first_token().filter(|token| token.kind() == STRING).map(Token::text)
    }
}

impl ReturnStatement {
    pub fn expression(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl IfStatement {
    pub fn condition(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn then_branch(&self) -> Option<Statement> {
        child(&self.0)
    }
}

impl Ident {
    pub fn token(&self) -> Option<&Token> {
        self.0.first_token()
    }

    pub fn text(&self) -> &str {
        self.token().map_or("", Token::text)
    }
}

impl ParameterList {
    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        children(&self.0)
    }
}

impl Parameter {
    pub fn name(&self) -> Option<Ident> {
        child(&self.0)
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Literal),
    NameRef(NameRef),
    Binary(BinaryExpr),
    Assignment(AssignmentExpr),
    Call(CallExpr),
    Arrow(ArrowFunction),
    /// Expressions without a dedicated view.
    Other(Node),
}

impl AstNode for Expr {
    fn cast(syntax: Node) -> Option<Self> {
        let expr = match syntax.kind() {
            LITERAL => Expr::Literal(Literal(syntax)),
            NAME_REF => Expr::NameRef(NameRef(syntax)),
            BINARY_EXPR => Expr::Binary(BinaryExpr(syntax)),
            ASSIGNMENT_EXPR => Expr::Assignment(AssignmentExpr(syntax)),
            CALL_EXPR => Expr::Call(CallExpr(syntax)),
            ARROW_FUNCTION => Expr::Arrow(ArrowFunction(syntax)),
            PAREN_EXPR | ARRAY_LITERAL | OBJECT_LITERAL | CONDITIONAL_EXPR | PREFIX_EXPR
            | POSTFIX_EXPR | NEW_EXPR | MEMBER_EXPR | INDEX_EXPR | FUNCTION_EXPR => {
                Expr::Other(syntax)
            }
            _ => return None,
        };
        Some(expr)
    }

    fn syntax(&self) -> &Node {
        match self {
            Expr::Literal(it) => it.syntax(),
            Expr::NameRef(it) => it.syntax(),
            Expr::Binary(it) => it.syntax(),
            Expr::Assignment(it) => it.syntax(),
            Expr::Call(it) => it.syntax(),
            Expr::Arrow(it) => it.syntax(),
            Expr::Other(node) => node,
        }
    }
}

impl Literal {
    pub fn token(&self) -> Option<&Token> {
        self.0.first_token()
    }
}

impl NameRef {
    pub fn text(&self) -> &str {
        self.0.first_token().map_or("", Token::text)
    }
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn operator(&self) -> Option<&Token> {
        self.0.child_tokens().next()
    }

    pub fn rhs(&self) -> Option<Expr> {
        children(&self.0).nth(1)
    }
}

impl AssignmentExpr {
    pub fn target(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn value(&self) -> Option<Expr> {
        children(&self.0).nth(1)
    }
}

impl CallExpr {
    pub fn callee(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn arguments(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0
            .child_nodes()
            .find(|node| node.kind() == ARGUMENT_LIST)
            .into_iter()
            .flat_map(|list| list.child_nodes().cloned().filter_map(Expr::cast))
    }
}

impl ArrowFunction {
    pub fn parameters(&self) -> Option<ParameterList> {
        child(&self.0)
    }

    pub fn arrow(&self) -> Option<&Token> {
        token(&self.0, FAT_ARROW)
    }
}
