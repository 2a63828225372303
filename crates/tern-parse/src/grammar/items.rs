use tern_errors::DiagnosticCode;
use tern_yellow::SyntaxKind::{self, *};
use tern_yellow::{NodeFlags, SyntaxSet};

use super::{
    LIST_RECOVERY, at_identifier, at_property_name, can_omit_semicolon, delimited, exprs, name,
    next_is_identifier, property_name, semicolon, types,
};
use crate::parser::Parser;

const PARAMETER_RECOVERY: SyntaxSet = LIST_RECOVERY.union(&SyntaxSet::new([LEFT_BRACE, FAT_ARROW]));

pub(crate) fn source_file(p: &mut Parser<'_>) {
    let m = p.start();
    statement_list(p, EOF, true);
    p.finish_file();
    m.complete(p, SOURCE_FILE);
}

/// Statements up to `end`. With `prologue`, leading string literal
/// statements are directives and `'use strict'` among them makes the rest of
/// the list strict.
fn statement_list(p: &mut Parser<'_>, end: SyntaxKind, mut prologue: bool) {
    while !p.at(end) && !p.at(EOF) {
        if !prologue && p.try_reuse(SyntaxKind::is_statement) {
            continue;
        }

        let from = p.events_len();
        statement(p);
        if prologue {
            match p.directive_since(from) {
                Some(true) => p.enter_strict(),
                Some(false) => {}
                None => prologue = false,
            }
        }
    }
}

pub(crate) fn statement(p: &mut Parser<'_>) {
    match p.current() {
        LEFT_BRACE => block(p),
        VAR_KW | CONST_KW => variable_statement(p),
        LET_KW if next_is_identifier(p) => variable_statement(p),
        FUNCTION_KW => function_declaration(p),
        CLASS_KW => class_declaration(p),
        INTERFACE_KW if next_is_identifier(p) => interface_declaration(p),
        IF_KW => if_statement(p),
        WHILE_KW => while_statement(p),
        DO_KW => do_statement(p),
        FOR_KW => for_statement(p),
        RETURN_KW => return_statement(p),
        BREAK_KW => jump_statement(p, BREAK_STATEMENT),
        CONTINUE_KW => jump_statement(p, CONTINUE_STATEMENT),
        THROW_KW => throw_statement(p),
        SEMICOLON => {
            let m = p.start();
            p.advance();
            m.complete(p, EMPTY_STATEMENT);
        }
        _ if exprs::at_expr_start(p) => expression_statement(p),
        _ => p.skip(DiagnosticCode::DeclarationOrStatementExpected),
    }
}

fn block(p: &mut Parser<'_>) {
    let m = p.start();
    p.expect(LEFT_BRACE);
    statement_list(p, RIGHT_BRACE, false);
    p.expect(RIGHT_BRACE);
    m.complete(p, BLOCK);
}

/// A function, method, constructor or arrow function body. Directives in
/// it only apply inside.
pub(crate) fn function_body(p: &mut Parser<'_>) {
    p.with_context(NodeFlags::IN_FUNCTION, |p| {
        let m = p.start();
        if p.expect(LEFT_BRACE) {
            statement_list(p, RIGHT_BRACE, true);
            p.expect(RIGHT_BRACE);
        }
        m.complete(p, BLOCK);
    });
}

fn variable_statement(p: &mut Parser<'_>) {
    let m = p.start();
    variable_declarations(p);
    semicolon(p);
    m.complete(p, VARIABLE_STATEMENT);
}

/// `var`, `let` or `const` followed by one or more declarations.
fn variable_declarations(p: &mut Parser<'_>) {
    debug_assert!(matches!(p.current(), VAR_KW | LET_KW | CONST_KW));
    p.advance();

    loop {
        let m = p.start();
        name(p);
        if p.at(COLON) {
            types::type_annotation(p);
        }
        if p.eat(EQ) {
            exprs::assignment_expr_or_error(p);
        }
        m.complete(p, VARIABLE_DECLARATION);

        if !p.eat(COMMA) {
            break;
        }
    }
}

fn function_declaration(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    name(p);
    signature(p);
    function_body(p);
    m.complete(p, FUNCTION_DECLARATION);
}

/// Type parameters, parameters and return type of anything callable.
pub(crate) fn signature(p: &mut Parser<'_>) {
    if p.at(LESS_THAN) {
        types::type_parameter_list(p);
    }
    parameter_list(p);
    if p.at(COLON) {
        types::type_annotation(p);
    }
}

pub(crate) fn parameter_list(p: &mut Parser<'_>) {
    let m = p.start();
    if p.at(LEFT_PAREN) {
        delimited(p, LEFT_PAREN, RIGHT_PAREN, &PARAMETER_RECOVERY, parameter);
    } else {
        p.expect(LEFT_PAREN);
    }
    m.complete(p, PARAMETER_LIST);
}

fn parameter(p: &mut Parser<'_>) -> bool {
    let at_modifier = p.current().is_modifier() && next_is_identifier(p);
    if !at_modifier && !at_identifier(p) && !p.at(DOT_DOT_DOT) {
        return false;
    }

    let m = p.start();
    while p.current().is_modifier() && next_is_identifier(p) {
        p.advance();
    }
    p.eat(DOT_DOT_DOT);
    name(p);
    p.eat(QUESTION);
    if p.at(COLON) {
        types::type_annotation(p);
    }
    if p.eat(EQ) {
        exprs::assignment_expr_or_error(p);
    }
    m.complete(p, PARAMETER);
    true
}

fn class_declaration(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    name(p);
    if p.at(LESS_THAN) {
        types::type_parameter_list(p);
    }

    if p.at(EXTENDS_KW) {
        let m = p.start();
        p.advance();
        if exprs::lhs_expr(p).is_none() {
            p.error(DiagnosticCode::ExpressionExpected);
        }
        if p.at(LESS_THAN) {
            types::type_argument_list(p);
        }
        m.complete(p, EXTENDS_CLAUSE);
    }

    if p.at(IMPLEMENTS_KW) {
        let m = p.start();
        p.advance();
        types::type_reference_list(p);
        m.complete(p, IMPLEMENTS_CLAUSE);
    }

    if p.expect(LEFT_BRACE) {
        while !p.at(RIGHT_BRACE) && !p.at(EOF) {
            if p.try_reuse(SyntaxKind::is_class_member) {
                continue;
            }
            class_member(p);
        }
        p.expect(RIGHT_BRACE);
    }
    m.complete(p, CLASS_DECLARATION);
}

fn at_modifier(p: &mut Parser<'_>) -> bool {
    p.current().is_modifier()
        && p.lookahead(|p| {
            p.advance();
            at_property_name(p) || p.at(LEFT_BRACKET)
        })
}

fn class_member(p: &mut Parser<'_>) {
    if p.eat(SEMICOLON) {
        return;
    }

    let m = p.start();
    let mut modifiers = 0;
    while at_modifier(p) {
        p.advance();
        modifiers += 1;
    }

    if p.at(CONSTRUCTOR_KW) && p.lookahead(|p| {
        p.advance();
        p.at(LEFT_PAREN)
    }) {
        p.advance();
        parameter_list(p);
        function_body(p);
        m.complete(p, CONSTRUCTOR_DECLARATION);
        return;
    }

    if modifiers == 0 && !at_property_name(p) {
        m.abandon(p);
        p.skip(DiagnosticCode::ClassMemberExpected);
        return;
    }

    property_name(p);
    p.eat(QUESTION);
    if p.at(LEFT_PAREN) || p.at(LESS_THAN) {
        signature(p);
        function_body(p);
        m.complete(p, METHOD_DECLARATION);
    } else {
        if p.at(COLON) {
            types::type_annotation(p);
        }
        if p.eat(EQ) {
            exprs::assignment_expr_or_error(p);
        }
        semicolon(p);
        m.complete(p, PROPERTY_DECLARATION);
    }
}

fn interface_declaration(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    name(p);
    if p.at(LESS_THAN) {
        types::type_parameter_list(p);
    }
    if p.at(EXTENDS_KW) {
        let m = p.start();
        p.advance();
        types::type_reference_list(p);
        m.complete(p, EXTENDS_CLAUSE);
    }
    if p.at(LEFT_BRACE) {
        types::type_members(p);
    } else {
        p.expect(LEFT_BRACE);
    }
    m.complete(p, INTERFACE_DECLARATION);
}

/// `( expr )` after `if`, `while` and friends.
fn condition(p: &mut Parser<'_>) {
    p.expect(LEFT_PAREN);
    exprs::expr_or_error(p);
    p.expect(RIGHT_PAREN);
}

fn if_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    condition(p);
    embedded_statement(p);
    if p.at(ELSE_KW) {
        let m = p.start();
        p.advance();
        embedded_statement(p);
        m.complete(p, ELSE_CLAUSE);
    }
    m.complete(p, IF_STATEMENT);
}

fn while_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    condition(p);
    embedded_statement(p);
    m.complete(p, WHILE_STATEMENT);
}

fn do_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    embedded_statement(p);
    p.expect(WHILE_KW);
    condition(p);
    p.eat(SEMICOLON);
    m.complete(p, DO_STATEMENT);
}

fn for_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    p.expect(LEFT_PAREN);

    match p.current() {
        SEMICOLON => {}
        VAR_KW | CONST_KW => variable_declarations(p),
        LET_KW if next_is_identifier(p) => variable_declarations(p),
        _ => exprs::expr_or_error(p),
    }
    p.expect(SEMICOLON);
    if !p.at(SEMICOLON) {
        exprs::expr_or_error(p);
    }
    p.expect(SEMICOLON);
    if !p.at(RIGHT_PAREN) {
        exprs::expr_or_error(p);
    }
    p.expect(RIGHT_PAREN);

    embedded_statement(p);
    m.complete(p, FOR_STATEMENT);
}

/// The body of a compound statement. Anything that cannot start a statement
/// is reported without being consumed.
fn embedded_statement(p: &mut Parser<'_>) {
    if p.at(RIGHT_BRACE) || p.at(EOF) {
        p.error(DiagnosticCode::DeclarationOrStatementExpected);
    } else {
        statement(p);
    }
}

fn return_statement(p: &mut Parser<'_>) {
    let m = p.start();
    if !p.context().contains(NodeFlags::IN_FUNCTION) {
        p.error(DiagnosticCode::ReturnOutsideFunction);
    }
    p.advance();
    if !can_omit_semicolon(p) && !p.at(SEMICOLON) {
        exprs::expr_or_error(p);
    }
    semicolon(p);
    m.complete(p, RETURN_STATEMENT);
}

fn jump_statement(p: &mut Parser<'_>, kind: SyntaxKind) {
    let m = p.start();
    p.advance();
    if at_identifier(p) && !p.has_preceding_line_break() {
        name(p);
    }
    semicolon(p);
    m.complete(p, kind);
}

fn throw_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    exprs::expr_or_error(p);
    semicolon(p);
    m.complete(p, THROW_STATEMENT);
}

fn expression_statement(p: &mut Parser<'_>) {
    let m = p.start();
    exprs::expr_or_error(p);
    semicolon(p);
    m.complete(p, EXPRESSION_STATEMENT);
}
