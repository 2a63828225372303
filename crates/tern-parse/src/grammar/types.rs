use tern_errors::DiagnosticCode;
use tern_yellow::SyntaxKind::*;
use tern_yellow::SyntaxSet;

use super::{at_identifier, at_property_name, delimited, items, name, property_name};
use crate::parser::{CompletedMarker, Parser};

const TYPE_LIST_RECOVERY: SyntaxSet =
    SyntaxSet::new([SEMICOLON, RIGHT_BRACE, LEFT_BRACE, LEFT_PAREN, EQ]);

pub(crate) fn type_annotation(p: &mut Parser<'_>) {
    let m = p.start();
    p.expect(COLON);
    type_(p);
    m.complete(p, TYPE_ANNOTATION);
}

/// Returns `false` when no type could be parsed.
pub(crate) fn type_(p: &mut Parser<'_>) -> bool {
    let Some(mut ty) = primary_type(p) else {
        p.error(DiagnosticCode::TypeExpected);
        return false;
    };

    while p.at(LEFT_BRACKET) && !p.has_preceding_line_break() {
        let m = ty.precede(p);
        p.advance();
        p.expect(RIGHT_BRACKET);
        ty = m.complete(p, ARRAY_TYPE);
    }
    true
}

fn primary_type(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let completed = match p.current() {
        VOID_KW | NULL_KW | THIS_KW => {
            let m = p.start();
            p.advance();
            m.complete(p, TYPE_REFERENCE)
        }
        _ if at_identifier(p) => type_reference(p),
        LEFT_BRACE => {
            let m = p.start();
            type_members(p);
            m.complete(p, OBJECT_TYPE)
        }
        LEFT_PAREN => {
            let m = p.start();
            p.advance();
            type_(p);
            p.expect(RIGHT_PAREN);
            m.complete(p, PAREN_TYPE)
        }
        _ => return None,
    };
    Some(completed)
}

/// A possibly dotted name with optional type arguments.
fn type_reference(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    while p.at(DOT) {
        p.advance();
        if at_identifier(p) {
            p.advance();
        } else {
            p.missing(NAME, DiagnosticCode::IdentifierExpected, None);
        }
    }
    if p.at(LESS_THAN) && !p.has_preceding_line_break() {
        type_argument_list(p);
    }
    m.complete(p, TYPE_REFERENCE)
}

pub(crate) fn type_reference_list(p: &mut Parser<'_>) {
    loop {
        if at_identifier(p) {
            type_reference(p);
        } else {
            p.error(DiagnosticCode::TypeExpected);
            break;
        }
        if !p.eat(COMMA) {
            break;
        }
    }
}

/// `<` types `>`. Returns `true` when the list was closed by `>`.
pub(crate) fn type_argument_list(p: &mut Parser<'_>) -> bool {
    debug_assert!(p.at(LESS_THAN));
    let m = p.start();
    p.advance();

    loop {
        if !type_(p) {
            break;
        }
        if !p.eat(COMMA) {
            break;
        }
    }

    let closed = p.expect(GREATER_THAN);
    m.complete(p, TYPE_ARGUMENT_LIST);
    closed
}

pub(crate) fn type_parameter_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(p, LESS_THAN, GREATER_THAN, &TYPE_LIST_RECOVERY, |p| {
        if !at_identifier(p) {
            return false;
        }
        let m = p.start();
        name(p);
        if p.eat(EXTENDS_KW) {
            type_(p);
        }
        m.complete(p, TYPE_PARAMETER);
        true
    });
    m.complete(p, TYPE_PARAMETER_LIST);
}

/// `{` property and method signatures `}`, shared by interfaces and object
/// types.
pub(crate) fn type_members(p: &mut Parser<'_>) {
    debug_assert!(p.at(LEFT_BRACE));
    p.advance();

    while !p.at(RIGHT_BRACE) && !p.at(EOF) {
        if !at_property_name(p) {
            p.skip(DiagnosticCode::PropertyOrSignatureExpected);
            continue;
        }

        let m = p.start();
        property_name(p);
        p.eat(QUESTION);
        let kind = if p.at(LEFT_PAREN) || p.at(LESS_THAN) {
            items::signature(p);
            METHOD_SIGNATURE
        } else {
            if p.at(COLON) {
                type_annotation(p);
            }
            PROPERTY_SIGNATURE
        };
        if !p.eat(SEMICOLON) && !p.eat(COMMA) && !p.at(RIGHT_BRACE) && !p.has_preceding_line_break()
        {
            p.expect(SEMICOLON);
        }
        m.complete(p, kind);
    }

    p.expect(RIGHT_BRACE);
}
