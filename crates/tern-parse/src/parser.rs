use drop_bomb::DropBomb;
use tern_errors::{Diagnostic, DiagnosticCode};
use tern_inputs::SourceText;
use tern_tokenizer::{Scanned, Snapshot, Tokenizer};
use tern_yellow::SyntaxKind::{self, *};
use tern_yellow::{Builder, Node, NodeFlags, SyntaxSet, Token, Trivia, TriviaKind};
use text_size::{TextRange, TextSize};

use crate::IncrementalStats;
use crate::incremental::ReusableNodes;

pub(crate) struct Parser<'a> {
    tokenizer: Tokenizer<'a, dyn SourceText + 'a>,
    current: Scanned,
    /// Whether the last consumed token ended its line.
    previous_newline: bool,
    events: Vec<Event>,
    context: NodeFlags,
    nodes: Option<ReusableNodes>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        mut tokenizer: Tokenizer<'a, dyn SourceText + 'a>,
        context: NodeFlags,
        nodes: Option<ReusableNodes>,
    ) -> Self {
        let current = tokenizer.next_token();
        Self { tokenizer, current, previous_newline: false, events: Vec::new(), context, nodes }
    }

    #[inline]
    pub(crate) fn current(&self) -> SyntaxKind {
        self.current.kind()
    }

    #[inline]
    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    #[inline]
    pub(crate) fn at_set(&self, set: &SyntaxSet) -> bool {
        set.contains(self.current())
    }

    pub(crate) fn current_range(&self) -> TextRange {
        self.current.range()
    }

    pub(crate) fn current_text(&self) -> &str {
        self.current.token.text()
    }

    /// A line break separates the current token from the previous one.
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.previous_newline || self.current.token.has_leading_newline()
    }

    pub(crate) fn context(&self) -> NodeFlags {
        self.context
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.context.contains(NodeFlags::STRICT)
    }

    pub(crate) fn enter_strict(&mut self) {
        self.context |= NodeFlags::STRICT;
    }

    /// Runs `f` with `flags` added to the context, restoring it afterwards.
    pub(crate) fn with_context<R>(
        &mut self,
        flags: NodeFlags,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let saved = self.context;
        self.context |= flags;
        let result = f(self);
        self.context = saved;
        result
    }

    pub(crate) fn advance(&mut self) {
        if self.at(EOF) {
            return;
        }

        let next = self.tokenizer.next_token();
        let current = std::mem::replace(&mut self.current, next);
        self.push_token(current);
    }

    /// Consumes the end of file token. Must be the last token consumed.
    pub(crate) fn finish_file(&mut self) {
        debug_assert!(self.at(EOF));
        self.push_token(self.current.clone());
    }

    fn push_token(&mut self, scanned: Scanned) {
        if let Some(diagnostic) = scanned.diagnostic {
            self.events.push(Event::Error(diagnostic));
        }
        self.previous_newline = scanned.token.has_trailing_newline();
        self.events.push(Event::Token { token: scanned.token, reused: scanned.reused });
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.advance();
        true
    }

    /// Consumes `kind` or puts a missing token in its place.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        let text = kind.fixed_text().unwrap_or_default();
        self.missing(kind, DiagnosticCode::Expected, Some(text));
        false
    }

    /// Inserts a zero-width token of `kind` and reports `code` there.
    pub(crate) fn missing(&mut self, kind: SyntaxKind, code: DiagnosticCode, arg: Option<&str>) {
        let mut diagnostic = Diagnostic::new(TextRange::empty(self.current.full_start), code);
        if let Some(arg) = arg {
            diagnostic = diagnostic.with_arg(arg);
        }
        self.events.push(Event::Error(diagnostic));
        self.events.push(Event::Token { token: Token::missing(kind), reused: false });
    }

    /// Reports `code` at the current token.
    pub(crate) fn error(&mut self, code: DiagnosticCode) {
        let diagnostic = Diagnostic::new(self.current_range(), code);
        self.events.push(Event::Error(diagnostic));
    }

    pub(crate) fn error_at(&mut self, range: TextRange, code: DiagnosticCode, arg: &str) {
        let diagnostic = Diagnostic::new(range, code).with_arg(arg);
        self.events.push(Event::Error(diagnostic));
    }

    /// Turns the current token into skipped text on the token after it.
    pub(crate) fn skip(&mut self, code: DiagnosticCode) {
        if self.at(EOF) {
            return;
        }

        let next = self.tokenizer.next_token();
        let skipped = std::mem::replace(&mut self.current, next);
        let mut diagnostic = Diagnostic::new(skipped.range(), code);
        if code == DiagnosticCode::UnexpectedToken {
            diagnostic = diagnostic.with_arg(skipped.token.text());
        }
        self.events.push(Event::Error(diagnostic));
        if let Some(diagnostic) = skipped.diagnostic {
            self.events.push(Event::Error(diagnostic));
        }

        let token = &skipped.token;
        let text = self.tokenizer.strings().intern_str(token.text());
        let mut pieces: Vec<Trivia> = token.leading().iter().cloned().collect();
        pieces.push(Trivia::new(TriviaKind::SkippedText, text));
        pieces.extend(token.trailing().iter().cloned());

        let leading = self.current.token.leading().prepend(&pieces);
        self.current.token = self.current.token.with_leading_trivia(leading);
        self.current.full_start = skipped.full_start;
        self.current.reused = false;
    }

    /// Asks the tokenizer to combine a `>` with what follows it.
    pub(crate) fn rescan_greater(&mut self) {
        if self.at(GREATER_THAN) {
            self.current = self.tokenizer.rescan_greater(&self.current);
        }
    }

    /// Asks the tokenizer to read a `/` or `/=` as a regular expression.
    pub(crate) fn rescan_slash(&mut self) {
        if self.at(SLASH) || self.at(SLASH_EQ) {
            self.current = self.tokenizer.rescan_slash(&self.current);
        }
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            events: self.events.len(),
            snapshot: self.tokenizer.snapshot(),
            current: self.current.clone(),
            previous_newline: self.previous_newline,
            context: self.context,
        }
    }

    /// Discards everything parsed since `checkpoint`.
    pub(crate) fn rewind(&mut self, checkpoint: Checkpoint) {
        self.events.truncate(checkpoint.events);
        self.tokenizer.restore(checkpoint.snapshot);
        self.current = checkpoint.current;
        self.previous_newline = checkpoint.previous_newline;
        self.context = checkpoint.context;
    }

    /// Runs `f` speculatively and rewinds, whatever it returns.
    pub(crate) fn lookahead<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let checkpoint = self.checkpoint();
        let result = f(self);
        self.rewind(checkpoint);
        result
    }

    /// Splices in a node of the older tree when one of an accepted kind
    /// starts at the current position and may be carried over as is.
    pub(crate) fn try_reuse(&mut self, accept: fn(SyntaxKind) -> bool) -> bool {
        let Some(nodes) = &self.nodes else {
            return false;
        };
        if self.current.token.has_skipped_text() {
            return false;
        }
        let full_start = self.current.full_start;
        let Some(node) = nodes.find(full_start, self.context, accept).cloned() else {
            return false;
        };

        tracing::trace!(kind = ?node.kind(), offset = ?full_start, "reusing node");
        let full_end = full_start + node.full_width();
        self.tokenizer.skip_to(full_end);
        self.tokenizer.extend_reach(full_end + node.lookahead());
        self.previous_newline = node.last_token().is_some_and(Token::has_trailing_newline);
        self.events.push(Event::Reuse(node));
        self.current = self.tokenizer.next_token();
        true
    }

    pub(crate) fn events_len(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn has_errors_since(&self, from: usize) -> bool {
        self.events[from..].iter().any(|event| matches!(event, Event::Error(_)))
    }

    /// For a lone string literal statement parsed since `from`, whether it
    /// reads `use strict`. `None` for any other statement.
    pub(crate) fn directive_since(&self, from: usize) -> Option<bool> {
        let mut events =
            self.events[from..].iter().filter(|event| !matches!(event, Event::Error(_)));

        let Some(Event::Start { kind: EXPRESSION_STATEMENT, .. }) = events.next() else {
            return None;
        };
        let Some(Event::Start { kind: LITERAL, forward_parent: None, .. }) = events.next() else {
            return None;
        };
        let Some(Event::Token { token: literal, .. }) = events.next() else {
            return None;
        };
        let Some(Event::Finish { .. }) = events.next() else {
            return None;
        };
        if literal.kind() != STRING {
            return None;
        }

        match events.next() {
            Some(Event::Token { token, .. }) if token.kind() == SEMICOLON => {
                let Some(Event::Finish { .. }) = events.next() else {
                    return None;
                };
            }
            Some(Event::Finish { .. }) => {}
            _ => return None,
        }
        if events.next().is_some() {
            return None;
        }

        let text = literal.text();
        Some(text.len() == 12 && text.get(1..11) == Some("use strict"))
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::Start {
            kind: TOMBSTONE,
            forward_parent: None,
            context: self.context,
        });
        Marker::new(pos)
    }

    pub(crate) fn build_tree(self) -> Parsed {
        let Parser { mut events, .. } = self;
        let mut builder = Builder::new();
        let mut diagnostics = Vec::new();
        let mut stats = IncrementalStats::default();
        let mut forward_parents = Vec::new();

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent, context } => {
                    if kind == TOMBSTONE {
                        continue;
                    }

                    forward_parents.push((kind, context));
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent, context } => {
                                if kind != TOMBSTONE {
                                    forward_parents.push((kind, context));
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for (kind, context) in forward_parents.drain(..).rev() {
                        builder.start_node(kind, context);
                    }
                }
                Event::Finish { reach } => builder.finish_node(reach),
                Event::Token { token, reused } => {
                    if reused {
                        stats.reused_tokens += 1;
                        stats.reused_elements += 1;
                    }
                    builder.token(token);
                }
                Event::Reuse(node) => {
                    stats.reused_nodes += 1;
                    stats.reused_elements += node.element_count();
                    builder.node(node);
                }
                Event::Error(diagnostic) => {
                    builder.mark_error();
                    diagnostics.push(diagnostic);
                }
            }
        }

        Parsed { root: builder.finish(), diagnostics, stats }
    }
}

pub(crate) struct Parsed {
    pub(crate) root: Node,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) stats: IncrementalStats,
}

pub(crate) struct Checkpoint {
    events: usize,
    snapshot: Snapshot,
    current: Scanned,
    previous_newline: bool,
    context: NodeFlags,
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32>, context: NodeFlags },
    Token { token: Token, reused: bool },
    Reuse(Node),
    Error(Diagnostic),
    Finish { reach: TextSize },
}

impl Event {
    const TOMBSTONE: Self =
        Event::Start { kind: TOMBSTONE, forward_parent: None, context: NodeFlags::empty() };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker {
            position: pos,
            bomb: DropBomb::new("Marker must be either completed or abandoned"),
        }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish { reach: p.tokenizer.reach() });
        CompletedMarker::new(self.position)
    }

    pub(crate) fn abandon(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();

        let idx = self.position as usize;
        if idx == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Start { kind: TOMBSTONE, forward_parent: None, .. }) => (),
                _ => unreachable!(),
            }
        }
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
}

impl CompletedMarker {
    fn new(pos: u32) -> Self {
        CompletedMarker { pos }
    }

    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
