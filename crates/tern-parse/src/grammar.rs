use tern_errors::DiagnosticCode;
use tern_yellow::SyntaxKind::{self, *};
use tern_yellow::SyntaxSet;

use crate::parser::{CompletedMarker, Parser};

mod exprs;
pub(crate) mod items;
mod types;

/// Tokens after which list parsing gives up instead of skipping.
pub(crate) const LIST_RECOVERY: SyntaxSet = SyntaxSet::new([SEMICOLON, RIGHT_BRACE]);

/// Names and the words that are only reserved in strict code.
pub(crate) fn at_identifier(p: &Parser<'_>) -> bool {
    let kind = p.current();
    kind == NAME || kind == CONSTRUCTOR_KW || kind.is_strict_reserved()
}

/// Whether the token after the current one can name something.
pub(crate) fn next_is_identifier(p: &mut Parser<'_>) -> bool {
    p.lookahead(|p| {
        p.advance();
        at_identifier(p)
    })
}

/// Anything usable as a member or property name, keywords included.
pub(crate) fn at_property_name(p: &Parser<'_>) -> bool {
    let kind = p.current();
    matches!(kind, NAME | STRING | NUMBER) || kind.is_keyword()
}

fn check_strict_reserved(p: &mut Parser<'_>) {
    if p.is_strict() && p.current().is_strict_reserved() {
        let range = p.current_range();
        let text = p.current_text().to_owned();
        p.error_at(range, DiagnosticCode::ReservedWordInStrictMode, &text);
    }
}

/// A declared name. A missing name leaves an empty `IDENT` behind.
pub(crate) fn name(p: &mut Parser<'_>) {
    let m = p.start();
    if at_identifier(p) {
        check_strict_reserved(p);
        p.advance();
    } else {
        p.missing(NAME, DiagnosticCode::IdentifierExpected, None);
    }
    m.complete(p, IDENT);
}

pub(crate) fn name_ref(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert!(at_identifier(p));
    let m = p.start();
    check_strict_reserved(p);
    p.advance();
    m.complete(p, NAME_REF)
}

pub(crate) fn property_name(p: &mut Parser<'_>) {
    let m = p.start();
    match p.current() {
        STRING | NUMBER => {
            p.advance();
            m.complete(p, LITERAL);
        }
        _ if at_property_name(p) => {
            p.advance();
            m.complete(p, IDENT);
        }
        _ => {
            p.missing(NAME, DiagnosticCode::IdentifierExpected, None);
            m.complete(p, IDENT);
        }
    }
}

/// Consumes a `;`, or accepts its absence before `}`, the end of file or a
/// line break.
pub(crate) fn semicolon(p: &mut Parser<'_>) {
    if p.eat(SEMICOLON) || can_omit_semicolon(p) {
        return;
    }
    p.expect(SEMICOLON);
}

pub(crate) fn can_omit_semicolon(p: &Parser<'_>) -> bool {
    p.at(RIGHT_BRACE) || p.at(EOF) || p.has_preceding_line_break()
}

/// Comma separated elements between `bra` and `ket`.
///
/// `element` returns `false` when the current token cannot start an
/// element; such tokens are skipped unless they are in `recovery`.
pub(crate) fn delimited(
    p: &mut Parser<'_>,
    bra: SyntaxKind,
    ket: SyntaxKind,
    recovery: &SyntaxSet,
    mut element: impl FnMut(&mut Parser<'_>) -> bool,
) {
    debug_assert_eq!(p.current(), bra);
    p.advance();

    while !p.at(ket) && !p.at(EOF) {
        if !element(p) {
            if p.at_set(recovery) {
                break;
            }
            p.skip(DiagnosticCode::UnexpectedToken);
            continue;
        }

        if !p.eat(COMMA) {
            if p.at(ket) || p.at_set(recovery) {
                break;
            }
            p.expect(COMMA);
        }
    }

    p.expect(ket);
}
