use tern_errors::DiagnosticCode;
use tern_yellow::SyntaxKind::*;
use tern_yellow::{SyntaxKind, SyntaxSet};

use super::{
    LIST_RECOVERY, at_identifier, at_property_name, delimited, items, name, name_ref,
    property_name, types,
};
use crate::parser::{CompletedMarker, Parser};

const LITERALS: SyntaxSet =
    SyntaxSet::new([NUMBER, STRING, TRUE_KW, FALSE_KW, NULL_KW, THIS_KW, SUPER_KW]);

const PREFIX_OPERATORS: SyntaxSet = SyntaxSet::new([
    PLUS_PLUS, MINUS_MINUS, PLUS, MINUS, TILDE, BANG, TYPEOF_KW, VOID_KW, DELETE_KW,
]);

const EXPR_FIRST: SyntaxSet = LITERALS.union(&PREFIX_OPERATORS).union(&SyntaxSet::new([
    LEFT_PAREN,
    LEFT_BRACKET,
    LEFT_BRACE,
    FUNCTION_KW,
    NEW_KW,
    SLASH,
    SLASH_EQ,
]));

const ASSIGNMENT_OPERATORS: SyntaxSet = SyntaxSet::new([
    EQ,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    LESS_LESS_EQ,
    GREATER_GREATER_EQ,
    GREATER_GREATER_GREATER_EQ,
    AMP_EQ,
    PIPE_EQ,
    CARET_EQ,
]);

pub(crate) fn at_expr_start(p: &Parser<'_>) -> bool {
    at_identifier(p) || p.at_set(&EXPR_FIRST)
}

pub(crate) fn expr_or_error(p: &mut Parser<'_>) {
    if expr(p).is_none() {
        p.error(DiagnosticCode::ExpressionExpected);
    }
}

pub(crate) fn assignment_expr_or_error(p: &mut Parser<'_>) {
    if assignment_expr(p).is_none() {
        p.error(DiagnosticCode::ExpressionExpected);
    }
}

/// Comma separated assignment expressions.
pub(crate) fn expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let mut lhs = assignment_expr(p)?;

    while p.at(COMMA) {
        let m = lhs.precede(p);
        p.advance();
        assignment_expr_or_error(p);
        lhs = m.complete(p, BINARY_EXPR);
    }

    Some(lhs)
}

fn assignment_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if at_identifier(p)
        && p.lookahead(|p| {
            p.advance();
            p.at(FAT_ARROW)
        })
    {
        return Some(simple_arrow_function(p));
    }
    if p.at(LEFT_PAREN) && at_parenthesized_arrow_function(p) {
        return Some(parenthesized_arrow_function(p));
    }

    let lhs = conditional_expr(p)?;
    p.rescan_greater();
    if !p.at_set(&ASSIGNMENT_OPERATORS) {
        return Some(lhs);
    }

    let m = lhs.precede(p);
    p.advance();
    assignment_expr_or_error(p);
    Some(m.complete(p, ASSIGNMENT_EXPR))
}

fn simple_arrow_function(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    let parameter = p.start();
    name(p);
    parameter.complete(p, PARAMETER);
    p.expect(FAT_ARROW);
    arrow_body(p);
    m.complete(p, ARROW_FUNCTION)
}

/// `(` starts a parameter list when the matching `)` is followed by `=>`,
/// possibly after a return type.
fn at_parenthesized_arrow_function(p: &mut Parser<'_>) -> bool {
    p.lookahead(|p| {
        p.advance();
        let mut depth = 1u32;
        while depth > 0 {
            match p.current() {
                LEFT_PAREN => depth += 1,
                RIGHT_PAREN => depth -= 1,
                EOF => return false,
                _ => {}
            }
            p.advance();
        }

        if p.eat(COLON) {
            types::type_(p);
        }
        p.at(FAT_ARROW)
    })
}

fn parenthesized_arrow_function(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    items::parameter_list(p);
    if p.at(COLON) {
        types::type_annotation(p);
    }
    p.expect(FAT_ARROW);
    arrow_body(p);
    m.complete(p, ARROW_FUNCTION)
}

fn arrow_body(p: &mut Parser<'_>) {
    if p.at(LEFT_BRACE) {
        items::function_body(p);
    } else {
        assignment_expr_or_error(p);
    }
}

fn conditional_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let lhs = binary_expr(p, 0)?;
    if !p.at(QUESTION) {
        return Some(lhs);
    }

    let m = lhs.precede(p);
    p.advance();
    assignment_expr_or_error(p);
    p.expect(COLON);
    assignment_expr_or_error(p);
    Some(m.complete(p, CONDITIONAL_EXPR))
}

fn binary_precedence(kind: SyntaxKind) -> Option<u8> {
    let precedence = match kind {
        PIPE_PIPE => 1,
        AMP_AMP => 2,
        PIPE => 3,
        CARET => 4,
        AMP => 5,
        EQ_EQ | BANG_EQ | EQ_EQ_EQ | BANG_EQ_EQ => 6,
        LESS_THAN | GREATER_THAN | LESS_THAN_EQ | GREATER_THAN_EQ | INSTANCEOF_KW | IN_KW => 7,
        LESS_LESS | GREATER_GREATER | GREATER_GREATER_GREATER => 8,
        PLUS | MINUS => 9,
        STAR | SLASH | PERCENT => 10,
        _ => return None,
    };
    Some(precedence)
}

fn binary_expr(p: &mut Parser<'_>, min_precedence: u8) -> Option<CompletedMarker> {
    let mut lhs = unary_expr(p)?;

    loop {
        p.rescan_greater();
        let Some(precedence) = binary_precedence(p.current()) else {
            break;
        };
        if precedence <= min_precedence {
            break;
        }

        let m = lhs.precede(p);
        p.advance();
        if binary_expr(p, precedence).is_none() {
            p.error(DiagnosticCode::ExpressionExpected);
        }
        lhs = m.complete(p, BINARY_EXPR);
    }

    Some(lhs)
}

fn unary_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if p.at_set(&PREFIX_OPERATORS) {
        let m = p.start();
        p.advance();
        if unary_expr(p).is_none() {
            p.error(DiagnosticCode::ExpressionExpected);
        }
        return Some(m.complete(p, PREFIX_EXPR));
    }

    let lhs = lhs_expr(p)?;
    if (p.at(PLUS_PLUS) || p.at(MINUS_MINUS)) && !p.has_preceding_line_break() {
        let m = lhs.precede(p);
        p.advance();
        return Some(m.complete(p, POSTFIX_EXPR));
    }
    Some(lhs)
}

/// Primary expressions with member accesses, indexing and calls.
pub(crate) fn lhs_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let lhs = if p.at(NEW_KW) { new_expr(p) } else { primary_expr(p)? };
    Some(suffixes(p, lhs, true))
}

fn suffixes(p: &mut Parser<'_>, mut lhs: CompletedMarker, calls: bool) -> CompletedMarker {
    loop {
        lhs = match p.current() {
            DOT => {
                let m = lhs.precede(p);
                p.advance();
                member_name(p);
                m.complete(p, MEMBER_EXPR)
            }
            LEFT_BRACKET => {
                let m = lhs.precede(p);
                p.advance();
                expr_or_error(p);
                p.expect(RIGHT_BRACKET);
                m.complete(p, INDEX_EXPR)
            }
            LEFT_PAREN if calls => {
                let m = lhs.precede(p);
                argument_list(p);
                m.complete(p, CALL_EXPR)
            }
            LESS_THAN if calls && at_generic_call(p) => {
                let m = lhs.precede(p);
                types::type_argument_list(p);
                argument_list(p);
                m.complete(p, CALL_EXPR)
            }
            _ => return lhs,
        };
    }
}

fn member_name(p: &mut Parser<'_>) {
    if at_property_name(p) && !p.at(STRING) && !p.at(NUMBER) {
        property_name(p);
    } else {
        name(p);
    }
}

/// `<` opens type arguments when they close cleanly right before `(`.
fn at_generic_call(p: &mut Parser<'_>) -> bool {
    p.lookahead(|p| {
        let from = p.events_len();
        types::type_argument_list(p) && p.at(LEFT_PAREN) && !p.has_errors_since(from)
    })
}

fn new_expr(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert!(p.at(NEW_KW));
    let m = p.start();
    p.advance();

    if p.at(NEW_KW) {
        new_expr(p);
    } else if let Some(callee) = primary_expr(p) {
        suffixes(p, callee, false);
    } else {
        p.error(DiagnosticCode::ExpressionExpected);
    }

    if p.at(LESS_THAN) && at_generic_call(p) {
        types::type_argument_list(p);
    }
    if p.at(LEFT_PAREN) {
        argument_list(p);
    }
    m.complete(p, NEW_EXPR)
}

fn argument_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(p, LEFT_PAREN, RIGHT_PAREN, &LIST_RECOVERY, |p| assignment_expr(p).is_some());
    m.complete(p, ARGUMENT_LIST);
}

fn primary_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let completed = match p.current() {
        _ if at_identifier(p) => name_ref(p),
        SLASH | SLASH_EQ => {
            p.rescan_slash();
            let m = p.start();
            p.advance();
            m.complete(p, LITERAL)
        }
        kind if LITERALS.contains(kind) => {
            let m = p.start();
            p.advance();
            m.complete(p, LITERAL)
        }
        LEFT_PAREN => {
            let m = p.start();
            p.advance();
            expr_or_error(p);
            p.expect(RIGHT_PAREN);
            m.complete(p, PAREN_EXPR)
        }
        LEFT_BRACKET => array_literal(p),
        LEFT_BRACE => {
            let m = p.start();
            delimited(p, LEFT_BRACE, RIGHT_BRACE, &LIST_RECOVERY, property_assignment);
            m.complete(p, OBJECT_LITERAL)
        }
        FUNCTION_KW => {
            let m = p.start();
            p.advance();
            if at_identifier(p) {
                name(p);
            }
            items::signature(p);
            items::function_body(p);
            m.complete(p, FUNCTION_EXPR)
        }
        _ => return None,
    };
    Some(completed)
}

fn array_literal(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();

    while !p.at(RIGHT_BRACKET) && !p.at(EOF) {
        // Holes.
        if p.eat(COMMA) {
            continue;
        }
        if assignment_expr(p).is_none() {
            if p.at_set(&LIST_RECOVERY) {
                break;
            }
            p.skip(DiagnosticCode::UnexpectedToken);
            continue;
        }
        if !p.at(RIGHT_BRACKET) && !p.at(COMMA) {
            if p.at_set(&LIST_RECOVERY) {
                break;
            }
            p.expect(COMMA);
        }
    }

    p.expect(RIGHT_BRACKET);
    m.complete(p, ARRAY_LITERAL)
}

fn property_assignment(p: &mut Parser<'_>) -> bool {
    if !at_property_name(p) {
        return false;
    }

    let m = p.start();
    property_name(p);
    if p.eat(COLON) {
        assignment_expr_or_error(p);
    }
    m.complete(p, PROPERTY_ASSIGNMENT);
    true
}
