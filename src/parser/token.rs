//! Token model and keyword table
//!
//! A [`Token`] is an immutable record of one lexeme: its [`TokenKind`], the
//! exact source text it was scanned from, and where it starts. Reserved words
//! are resolved through the process-wide [`KEYWORDS`] table before the lexer
//! falls back to an identifier.

use super::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;

/// Every kind of token the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LSquare,   // [
    RSquare,   // ]
    Comma,     // ,
    Dot,       // .
    Semicolon, // ;
    Percent,   // %
    At,        // @
    Amp,       // &

    // One or two character operators
    Colon,      // :
    ColonColon, // ::
    Minus,      // -
    MinusEq,    // -=
    Plus,       // +
    PlusEq,     // +=
    Star,       // *
    StarEq,     // *=
    Slash,      // /
    SlashEq,    // /=
    Bang,       // !
    NotEq,      // !=
    Assign,     // =
    EqEq,       // ==
    Lt,         // <
    Le,         // <=
    Gt,         // >
    Ge,         // >=

    // Literals
    Identifier,
    String,
    Number,
    Char,

    // Keywords
    True,
    False,
    And,
    Or,
    If,
    Move,
    Else,
    Try,
    While,
    For,
    Break,
    Continue,
    Switch,
    Case,
    Begin,
    End,
    Space,
    Static,
    Struct,
    Enum,
    Union,
    Tagged,
    Const,
    Use,
    Def,
    New,
    Return,
    Foreach,
    In,
    Default,
    Extern,
    Macro,
    Final,
    Import,
    Nameof,
    Sizeof,
    Typeof,
    Fall,
    Varargs,
    Vararg,
    Finally,
    Expand,
    Unique,
    Shared,

    Eof,
}

impl TokenKind {
    /// Fixed spelling of punctuation, operators and keywords.
    ///
    /// Literal kinds have no fixed spelling and return `None`.
    pub fn lexeme(self) -> Option<&'static str> {
        use TokenKind as T;
        let text = match self {
            T::LParen => "(",
            T::RParen => ")",
            T::LBrace => "{",
            T::RBrace => "}",
            T::LSquare => "[",
            T::RSquare => "]",
            T::Comma => ",",
            T::Dot => ".",
            T::Semicolon => ";",
            T::Percent => "%",
            T::At => "@",
            T::Amp => "&",
            T::Colon => ":",
            T::ColonColon => "::",
            T::Minus => "-",
            T::MinusEq => "-=",
            T::Plus => "+",
            T::PlusEq => "+=",
            T::Star => "*",
            T::StarEq => "*=",
            T::Slash => "/",
            T::SlashEq => "/=",
            T::Bang => "!",
            T::NotEq => "!=",
            T::Assign => "=",
            T::EqEq => "==",
            T::Lt => "<",
            T::Le => "<=",
            T::Gt => ">",
            T::Ge => ">=",
            T::Identifier | T::String | T::Number | T::Char | T::Eof => {
                return None;
            }
            keyword => return KEYWORDS.spelling(keyword),
        };
        Some(text)
    }

    pub fn is_keyword(self) -> bool {
        KEYWORDS.spelling(self).is_some()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::String => write!(f, "string literal"),
            TokenKind::Number => write!(f, "number literal"),
            TokenKind::Char => write!(f, "char literal"),
            TokenKind::Eof => write!(f, "end of file"),
            kind => match kind.lexeme() {
                Some(text) => write!(f, "'{}'", text),
                None => write!(f, "{:?}", kind),
            },
        }
    }
}

/// One lexeme with its kind and starting position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::String => write!(f, "string literal {}", self.text),
            TokenKind::Number => write!(f, "number literal {}", self.text),
            TokenKind::Char => write!(f, "char literal '{}'", self.text),
            kind => write!(f, "{}", kind),
        }
    }
}

/// Reserved words and the token kinds they lex to.
///
/// Lookup is by exact, case-sensitive text.
#[derive(Debug)]
pub struct KeywordTable {
    by_text: FxHashMap<&'static str, TokenKind>,
}

const RESERVED: &[(&str, TokenKind)] = &[
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("if", TokenKind::If),
    ("move", TokenKind::Move),
    ("else", TokenKind::Else),
    ("try", TokenKind::Try),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("switch", TokenKind::Switch),
    ("case", TokenKind::Case),
    ("begin", TokenKind::Begin),
    ("end", TokenKind::End),
    ("space", TokenKind::Space),
    ("static", TokenKind::Static),
    ("struct", TokenKind::Struct),
    ("union", TokenKind::Union),
    ("enum", TokenKind::Enum),
    ("tagged", TokenKind::Tagged),
    ("const", TokenKind::Const),
    ("use", TokenKind::Use),
    ("def", TokenKind::Def),
    ("new", TokenKind::New),
    ("return", TokenKind::Return),
    ("foreach", TokenKind::Foreach),
    ("in", TokenKind::In),
    ("default", TokenKind::Default),
    ("extern", TokenKind::Extern),
    ("macro", TokenKind::Macro),
    ("final", TokenKind::Final),
    ("import", TokenKind::Import),
    ("nameof", TokenKind::Nameof),
    ("sizeof", TokenKind::Sizeof),
    ("typeof", TokenKind::Typeof),
    ("fall", TokenKind::Fall),
    ("varargs", TokenKind::Varargs),
    ("vararg", TokenKind::Vararg),
    ("finally", TokenKind::Finally),
    ("expand", TokenKind::Expand),
    ("unique", TokenKind::Unique),
    ("shared", TokenKind::Shared),
];

impl KeywordTable {
    pub fn new() -> Self {
        let mut by_text = FxHashMap::default();
        by_text.reserve(RESERVED.len());
        for &(text, kind) in RESERVED {
            by_text.insert(text, kind);
        }
        Self { by_text }
    }

    /// Token kind for `text` if it is a reserved word.
    pub fn get(&self, text: &str) -> Option<TokenKind> {
        self.by_text.get(text).copied()
    }

    /// Reverse lookup: the reserved word that lexes to `kind`.
    pub fn spelling(&self, kind: TokenKind) -> Option<&'static str> {
        RESERVED
            .iter()
            .find(|(_, k)| *k == kind)
            .map(|(text, _)| *text)
    }

    pub fn len(&self) -> usize {
        self.by_text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_text.is_empty()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyword table shared by every lexer in the process.
pub static KEYWORDS: LazyLock<KeywordTable> = LazyLock::new(KeywordTable::new);
