#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    LEFT_BRACE,
    RIGHT_BRACE,
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    DOT,
    DOT_DOT_DOT,
    SEMICOLON,
    COMMA,
    LESS_THAN,
    GREATER_THAN,
    LESS_THAN_EQ,
    GREATER_THAN_EQ,
    EQ_EQ,
    BANG_EQ,
    EQ_EQ_EQ,
    BANG_EQ_EQ,
    FAT_ARROW,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    PLUS_PLUS,
    MINUS_MINUS,
    LESS_LESS,
    GREATER_GREATER,
    GREATER_GREATER_GREATER,
    AMP,
    PIPE,
    CARET,
    BANG,
    TILDE,
    AMP_AMP,
    PIPE_PIPE,
    QUESTION,
    COLON,
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

    BREAK_KW,
    CASE_KW,
    CATCH_KW,
    CLASS_KW,
    CONST_KW,
    CONTINUE_KW,
    DEBUGGER_KW,
    DEFAULT_KW,
    DELETE_KW,
    DO_KW,
    ELSE_KW,
    ENUM_KW,
    EXPORT_KW,
    EXTENDS_KW,
    FALSE_KW,
    FINALLY_KW,
    FOR_KW,
    FUNCTION_KW,
    IF_KW,
    IMPORT_KW,
    IN_KW,
    INSTANCEOF_KW,
    NEW_KW,
    NULL_KW,
    RETURN_KW,
    SUPER_KW,
    SWITCH_KW,
    THIS_KW,
    THROW_KW,
    TRUE_KW,
    TRY_KW,
    TYPEOF_KW,
    VAR_KW,
    VOID_KW,
    WHILE_KW,
    WITH_KW,

    IMPLEMENTS_KW,
    INTERFACE_KW,
    LET_KW,
    PACKAGE_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    STATIC_KW,
    YIELD_KW,

    CONSTRUCTOR_KW,

    NAME,
    NUMBER,
    STRING,
    REGEX,
    UNKNOWN,
    EOF,

    SOURCE_FILE,
    BLOCK,
    VARIABLE_STATEMENT,
    VARIABLE_DECLARATION,
    FUNCTION_DECLARATION,
    CLASS_DECLARATION,
    INTERFACE_DECLARATION,
    EXTENDS_CLAUSE,
    IMPLEMENTS_CLAUSE,
    CONSTRUCTOR_DECLARATION,
    METHOD_DECLARATION,
    PROPERTY_DECLARATION,
    PROPERTY_SIGNATURE,
    METHOD_SIGNATURE,
    IF_STATEMENT,
    ELSE_CLAUSE,
    WHILE_STATEMENT,
    DO_STATEMENT,
    FOR_STATEMENT,
    RETURN_STATEMENT,
    BREAK_STATEMENT,
    CONTINUE_STATEMENT,
    THROW_STATEMENT,
    EMPTY_STATEMENT,
    EXPRESSION_STATEMENT,

    IDENT,
    TYPE_PARAMETER_LIST,
    TYPE_PARAMETER,
    TYPE_ARGUMENT_LIST,
    TYPE_ANNOTATION,
    TYPE_REFERENCE,
    ARRAY_TYPE,
    OBJECT_TYPE,
    PAREN_TYPE,
    PARAMETER_LIST,
    PARAMETER,

    NAME_REF,
    LITERAL,
    PAREN_EXPR,
    ARRAY_LITERAL,
    OBJECT_LITERAL,
    PROPERTY_ASSIGNMENT,
    BINARY_EXPR,
    ASSIGNMENT_EXPR,
    CONDITIONAL_EXPR,
    PREFIX_EXPR,
    POSTFIX_EXPR,
    CALL_EXPR,
    ARGUMENT_LIST,
    NEW_EXPR,
    MEMBER_EXPR,
    INDEX_EXPR,
    ARROW_FUNCTION,
    FUNCTION_EXPR,

    ERROR,
    TOMBSTONE,
}

use SyntaxKind::*;

impl SyntaxKind {
    pub const COUNT: usize = TOMBSTONE as usize + 1;

    /// Terminal kinds: punctuators, keywords, names, literals and `EOF`.
    #[inline]
    pub fn is_token(self) -> bool {
        self <= EOF
    }

    #[inline]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        (BREAK_KW..=CONSTRUCTOR_KW).contains(&self)
    }

    /// Words that are identifiers in sloppy code but reserved in strict code.
    #[inline]
    pub fn is_strict_reserved(self) -> bool {
        (IMPLEMENTS_KW..=YIELD_KW).contains(&self)
    }

    /// Kinds the tokenizer only produces when the parser asks for a rescan.
    #[inline]
    pub fn is_rescanned(self) -> bool {
        matches!(
            self,
            GREATER_THAN_EQ
                | GREATER_GREATER
                | GREATER_GREATER_EQ
                | GREATER_GREATER_GREATER
                | GREATER_GREATER_GREATER_EQ
                | REGEX
        )
    }

    pub fn is_statement(self) -> bool {
        matches!(
            self,
            BLOCK
                | VARIABLE_STATEMENT
                | FUNCTION_DECLARATION
                | CLASS_DECLARATION
                | INTERFACE_DECLARATION
                | IF_STATEMENT
                | WHILE_STATEMENT
                | DO_STATEMENT
                | FOR_STATEMENT
                | RETURN_STATEMENT
                | BREAK_STATEMENT
                | CONTINUE_STATEMENT
                | THROW_STATEMENT
                | EMPTY_STATEMENT
                | EXPRESSION_STATEMENT
        )
    }

    pub fn is_class_member(self) -> bool {
        matches!(self, CONSTRUCTOR_DECLARATION | METHOD_DECLARATION | PROPERTY_DECLARATION)
    }

    pub fn is_modifier(self) -> bool {
        matches!(self, PUBLIC_KW | PRIVATE_KW | PROTECTED_KW | STATIC_KW)
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "break" => BREAK_KW,
            "case" => CASE_KW,
            "catch" => CATCH_KW,
            "class" => CLASS_KW,
            "const" => CONST_KW,
            "continue" => CONTINUE_KW,
            "debugger" => DEBUGGER_KW,
            "default" => DEFAULT_KW,
            "delete" => DELETE_KW,
            "do" => DO_KW,
            "else" => ELSE_KW,
            "enum" => ENUM_KW,
            "export" => EXPORT_KW,
            "extends" => EXTENDS_KW,
            "false" => FALSE_KW,
            "finally" => FINALLY_KW,
            "for" => FOR_KW,
            "function" => FUNCTION_KW,
            "if" => IF_KW,
            "import" => IMPORT_KW,
            "in" => IN_KW,
            "instanceof" => INSTANCEOF_KW,
            "new" => NEW_KW,
            "null" => NULL_KW,
            "return" => RETURN_KW,
            "super" => SUPER_KW,
            "switch" => SWITCH_KW,
            "this" => THIS_KW,
            "throw" => THROW_KW,
            "true" => TRUE_KW,
            "try" => TRY_KW,
            "typeof" => TYPEOF_KW,
            "var" => VAR_KW,
            "void" => VOID_KW,
            "while" => WHILE_KW,
            "with" => WITH_KW,
            "implements" => IMPLEMENTS_KW,
            "interface" => INTERFACE_KW,
            "let" => LET_KW,
            "package" => PACKAGE_KW,
            "private" => PRIVATE_KW,
            "protected" => PROTECTED_KW,
            "public" => PUBLIC_KW,
            "static" => STATIC_KW,
            "yield" => YIELD_KW,
            "constructor" => CONSTRUCTOR_KW,
            _ => return None,
        };
        Some(kind)
    }

    /// The only text a token of this kind can have, for punctuators,
    /// keywords and `EOF`.
    pub fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            LEFT_BRACE => "{",
            RIGHT_BRACE => "}",
            LEFT_PAREN => "(",
            RIGHT_PAREN => ")",
            LEFT_BRACKET => "[",
            RIGHT_BRACKET => "]",
            DOT => ".",
            DOT_DOT_DOT => "...",
            SEMICOLON => ";",
            COMMA => ",",
            LESS_THAN => "<",
            GREATER_THAN => ">",
            LESS_THAN_EQ => "<=",
            GREATER_THAN_EQ => ">=",
            EQ_EQ => "==",
            BANG_EQ => "!=",
            EQ_EQ_EQ => "===",
            BANG_EQ_EQ => "!==",
            FAT_ARROW => "=>",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            SLASH => "/",
            PERCENT => "%",
            PLUS_PLUS => "++",
            MINUS_MINUS => "--",
            LESS_LESS => "<<",
            GREATER_GREATER => ">>",
            GREATER_GREATER_GREATER => ">>>",
            AMP => "&",
            PIPE => "|",
            CARET => "^",
            BANG => "!",
            TILDE => "~",
            AMP_AMP => "&&",
            PIPE_PIPE => "||",
            QUESTION => "?",
            COLON => ":",
            EQ => "=",
            PLUS_EQ => "+=",
            MINUS_EQ => "-=",
            STAR_EQ => "*=",
            SLASH_EQ => "/=",
            PERCENT_EQ => "%=",
            LESS_LESS_EQ => "<<=",
            GREATER_GREATER_EQ => ">>=",
            GREATER_GREATER_GREATER_EQ => ">>>=",
            AMP_EQ => "&=",
            PIPE_EQ => "|=",
            CARET_EQ => "^=",
            BREAK_KW => "break",
            CASE_KW => "case",
            CATCH_KW => "catch",
            CLASS_KW => "class",
            CONST_KW => "const",
            CONTINUE_KW => "continue",
            DEBUGGER_KW => "debugger",
            DEFAULT_KW => "default",
            DELETE_KW => "delete",
            DO_KW => "do",
            ELSE_KW => "else",
            ENUM_KW => "enum",
            EXPORT_KW => "export",
            EXTENDS_KW => "extends",
            FALSE_KW => "false",
            FINALLY_KW => "finally",
            FOR_KW => "for",
            FUNCTION_KW => "function",
            IF_KW => "if",
            IMPORT_KW => "import",
            IN_KW => "in",
            INSTANCEOF_KW => "instanceof",
            NEW_KW => "new",
            NULL_KW => "null",
            RETURN_KW => "return",
            SUPER_KW => "super",
            SWITCH_KW => "switch",
            THIS_KW => "this",
            THROW_KW => "throw",
            TRUE_KW => "true",
            TRY_KW => "try",
            TYPEOF_KW => "typeof",
            VAR_KW => "var",
            VOID_KW => "void",
            WHILE_KW => "while",
            WITH_KW => "with",
            IMPLEMENTS_KW => "implements",
            INTERFACE_KW => "interface",
            LET_KW => "let",
            PACKAGE_KW => "package",
            PRIVATE_KW => "private",
            PROTECTED_KW => "protected",
            PUBLIC_KW => "public",
            STATIC_KW => "static",
            YIELD_KW => "yield",
            CONSTRUCTOR_KW => "constructor",
            EOF => "",
            _ => return None,
        };
        Some(text)
    }
}
