use std::fmt::{self, Display};

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::{TextRange, TextSize};

/// Numbered diagnostic kinds with their message templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DiagnosticCode {
    InvalidCharacter,
    UnterminatedStringLiteral,
    UnterminatedComment,
    UnterminatedRegularExpression,
    DigitExpected,
    Expected,
    IdentifierExpected,
    ExpressionExpected,
    DeclarationOrStatementExpected,
    TypeExpected,
    UnexpectedToken,
    ReservedWordInStrictMode,
    ReturnOutsideFunction,
    ClassMemberExpected,
    PropertyOrSignatureExpected,
}

impl DiagnosticCode {
    pub fn code(self) -> u32 {
        match self {
            Self::InvalidCharacter => 1000,
            Self::UnterminatedStringLiteral => 1001,
            Self::UnterminatedComment => 1002,
            Self::UnterminatedRegularExpression => 1003,
            Self::DigitExpected => 1004,
            Self::Expected => 1005,
            Self::IdentifierExpected => 1006,
            Self::ExpressionExpected => 1007,
            Self::DeclarationOrStatementExpected => 1008,
            Self::TypeExpected => 1009,
            Self::UnexpectedToken => 1010,
            Self::ReservedWordInStrictMode => 1011,
            Self::ReturnOutsideFunction => 1012,
            Self::ClassMemberExpected => 1013,
            Self::PropertyOrSignatureExpected => 1014,
        }
    }

    /// Message template; `{0}`, `{1}`… are replaced by the diagnostic's
    /// arguments.
    pub fn template(self) -> &'static str {
        match self {
            Self::InvalidCharacter => "invalid character",
            Self::UnterminatedStringLiteral => "unterminated string literal",
            Self::UnterminatedComment => "'*/' expected",
            Self::UnterminatedRegularExpression => "unterminated regular expression literal",
            Self::DigitExpected => "digit expected",
            Self::Expected => "'{0}' expected",
            Self::IdentifierExpected => "identifier expected",
            Self::ExpressionExpected => "expression expected",
            Self::DeclarationOrStatementExpected => "declaration or statement expected",
            Self::TypeExpected => "type expected",
            Self::UnexpectedToken => "unexpected token '{0}'",
            Self::ReservedWordInStrictMode => {
                "identifier expected; '{0}' is a reserved word in strict mode"
            }
            Self::ReturnOutsideFunction => {
                "a 'return' statement can only be used within a function body"
            }
            Self::ClassMemberExpected => {
                "unexpected token; a constructor, method or property was expected"
            }
            Self::PropertyOrSignatureExpected => "property or signature expected",
        }
    }
}

impl Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.code())
    }
}

/// A lexical or grammatical problem at a source range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    range: TextRange,
    code: DiagnosticCode,
    args: Vec<Box<str>>,
}

impl Diagnostic {
    pub fn new(range: TextRange, code: DiagnosticCode) -> Self {
        Self { range, code, args: Vec::new() }
    }

    pub fn with_arg(mut self, arg: impl Into<Box<str>>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn start(&self) -> TextSize {
        self.range.start()
    }

    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn code(&self) -> DiagnosticCode {
        self.code
    }

    pub fn args(&self) -> &[Box<str>] {
        &self.args
    }

    /// The template with arguments substituted.
    pub fn message(&self) -> String {
        let mut message = self.code.template().to_owned();
        for (index, arg) in self.args.iter().enumerate() {
            message = message.replace(&format!("{{{index}}}"), arg);
        }
        message
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        RenderedDiagnostic { diagnostic: self, message: self.message(), renderer, path, text }
    }
}

struct RenderedDiagnostic<'a> {
    diagnostic: &'a Diagnostic,
    message: String,
    renderer: &'a Renderer,
    path: &'a str,
    text: &'a str,
}

impl Display for RenderedDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.diagnostic.code.to_string();
        let message = Level::Error.title(&self.message).id(&id).snippet(
            Snippet::source(self.text)
                .origin(self.path)
                .annotation(Level::Error.span(self.diagnostic.range.into()).label("here"))
                .fold(true),
        );
        write!(f, "{}", self.renderer.render(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_substitutes_arguments() {
        let diagnostic =
            Diagnostic::new(TextRange::empty(3.into()), DiagnosticCode::Expected).with_arg(";");
        assert_eq!(diagnostic.message(), "';' expected");
        assert_eq!(diagnostic.code().code(), 1005);
    }

    #[test]
    fn renders_source_snippet() {
        let text = "let x = ;";
        let diagnostic = Diagnostic::new(
            TextRange::new(8.into(), 9.into()),
            DiagnosticCode::ExpressionExpected,
        );
        let rendered = diagnostic.render(&Renderer::plain(), "main.tern", text).to_string();
        assert!(rendered.contains("expression expected"), "{rendered}");
        assert!(rendered.contains("main.tern"), "{rendered}");
    }
}
