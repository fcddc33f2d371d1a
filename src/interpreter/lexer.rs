use logos::Logos;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The lexical category of a token.
///
/// Multi-word keywords are single categories. Rules are resolved by longest
/// match, and literal keywords take priority over the generic identifier rule
/// when both match the same text.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[logos(extras = LexerExtras)]
pub enum TokenKind {
    /// `HAI`
    #[token("HAI")]
    Hai,
    /// `KTHXBYE`
    #[token("KTHXBYE")]
    Kthxbye,
    /// `WAZZUP`
    #[token("WAZZUP")]
    Wazzup,
    /// `BUHBYE`
    #[token("BUHBYE")]
    Buhbye,

    /// `BTW` single line comments.
    #[regex(r"BTW([ \t][^\n]*)?", logos::skip, allow_greedy = true)]
    Comment,
    /// `OBTW ... TLDR` multi line comments.
    #[token("OBTW", skip_block_comment)]
    BlockComment,

    /// `I HAS A`
    #[regex(r"I[ \t]+HAS[ \t]+A", keyword_end)]
    IHasA,
    /// `ITZ`
    #[token("ITZ")]
    Itz,
    /// `R`
    #[token("R", priority = 3)]
    R,
    /// `IS NOW A`
    #[regex(r"IS[ \t]+NOW[ \t]+A", keyword_end)]
    IsNowA,

    /// `SUM OF`
    #[regex(r"SUM[ \t]+OF", keyword_end)]
    SumOf,
    /// `DIFF OF`
    #[regex(r"DIFF[ \t]+OF", keyword_end)]
    DiffOf,
    /// `PRODUKT OF`
    #[regex(r"PRODUKT[ \t]+OF", keyword_end)]
    ProduktOf,
    /// `QUOSHUNT OF`
    #[regex(r"QUOSHUNT[ \t]+OF", keyword_end)]
    QuoshuntOf,
    /// `MOD OF`
    #[regex(r"MOD[ \t]+OF", keyword_end)]
    ModOf,
    /// `BIGGR OF`
    #[regex(r"BIGGR[ \t]+OF", keyword_end)]
    BiggrOf,
    /// `SMALLR OF`
    #[regex(r"SMALLR[ \t]+OF", keyword_end)]
    SmallrOf,
    /// `BOTH OF`
    #[regex(r"BOTH[ \t]+OF", keyword_end)]
    BothOf,
    /// `EITHER OF`
    #[regex(r"EITHER[ \t]+OF", keyword_end)]
    EitherOf,
    /// `WON OF`
    #[regex(r"WON[ \t]+OF", keyword_end)]
    WonOf,
    /// `ALL OF`
    #[regex(r"ALL[ \t]+OF", keyword_end)]
    AllOf,
    /// `ANY OF`
    #[regex(r"ANY[ \t]+OF", keyword_end)]
    AnyOf,
    /// `NOT`
    #[token("NOT")]
    Not,
    /// `BOTH SAEM`
    #[regex(r"BOTH[ \t]+SAEM", keyword_end)]
    BothSaem,
    /// `DIFFRINT`
    #[token("DIFFRINT")]
    Diffrint,
    /// `SMOOSH`
    #[token("SMOOSH")]
    Smoosh,
    /// `MAEK`
    #[token("MAEK")]
    Maek,
    /// `A`
    #[token("A", priority = 3)]
    A,

    /// `VISIBLE`
    #[token("VISIBLE")]
    Visible,
    /// `GIMMEH`
    #[token("GIMMEH")]
    Gimmeh,

    /// `O RLY?`
    #[regex(r"O[ \t]*RLY\??")]
    ORly,
    /// `YA RLY`
    #[regex(r"YA[ \t]+RLY", keyword_end)]
    YaRly,
    /// `MEBBE`
    #[token("MEBBE")]
    Mebbe,
    /// `NO WAI`
    #[regex(r"NO[ \t]+WAI", keyword_end)]
    NoWai,
    /// `OIC`
    #[token("OIC")]
    Oic,
    /// `WTF?`
    #[regex(r"WTF\??")]
    Wtf,
    /// `OMG`
    #[token("OMG")]
    Omg,
    /// `OMGWTF`
    #[token("OMGWTF")]
    Omgwtf,
    /// `GTFO`
    #[token("GTFO")]
    Gtfo,

    /// `HOW IZ I`
    #[regex(r"HOW[ \t]+IZ[ \t]+I", keyword_end)]
    HowIzI,
    /// `IF U SAY SO`
    #[regex(r"IF[ \t]+U[ \t]+SAY[ \t]+SO", keyword_end)]
    IfUSaySo,
    /// `I IZ`
    #[regex(r"I[ \t]+IZ", keyword_end)]
    IIz,
    /// `FOUND YR`
    #[regex(r"FOUND[ \t]+YR", keyword_end)]
    FoundYr,
    /// `MKAY`
    #[token("MKAY")]
    Mkay,

    /// `IM IN YR`
    #[regex(r"IM[ \t]+IN[ \t]+YR", keyword_end)]
    ImInYr,
    /// `IM OUTTA YR`
    #[regex(r"IM[ \t]+OUTTA[ \t]+YR", keyword_end)]
    ImOuttaYr,
    /// `UPPIN`
    #[token("UPPIN")]
    Uppin,
    /// `NERFIN`
    #[token("NERFIN")]
    Nerfin,
    /// `YR`
    #[token("YR")]
    Yr,
    /// `TIL`
    #[token("TIL")]
    Til,
    /// `WILE`
    #[token("WILE")]
    Wile,

    /// `AN`
    #[token("AN")]
    An,
    /// `+`, an alternative argument separator for `VISIBLE`.
    #[token("+")]
    Plus,
    /// `IT`
    #[token("IT")]
    It,

    /// Troof literals, `WIN` or `FAIL`.
    #[regex("WIN|FAIL")]
    TroofLiteral,
    /// Type names used by casts: `NUMBR`, `NUMBAR`, `YARN`, `TROOF`, `NOOB`.
    #[regex("NUMBR|NUMBAR|YARN|TROOF|NOOB")]
    TypeLiteral,
    /// Yarn literals including the surrounding quotes. Escapes are kept as
    /// written.
    #[regex(r#""([^"\n:]|:[^\n])*""#, allow_greedy = true)]
    YarnLiteral,
    /// Numbar literals, such as `3.14` or `-0.5`.
    #[regex(r"[+-]?[0-9]+\.[0-9]+")]
    NumbarLiteral,
    /// Numbr literals, such as `42` or `-7`.
    #[regex(r"[+-]?[0-9]+")]
    NumbrLiteral,

    /// Variable, function and loop label names.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Identifier,

    /// Line breaks. Never emitted, only counted.
    #[token("\n", newline)]
    NewLine,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Whitespace,

    /// Input that no other rule matches.
    Unknown,
}

impl TokenKind {
    /// A human readable description, used when printing token tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        use TokenKind::{
            A, AllOf, An, AnyOf, BiggrOf, BlockComment, BothOf, BothSaem, Buhbye, Comment, DiffOf,
            Diffrint, EitherOf, FoundYr, Gimmeh, Gtfo, Hai, HowIzI, IHasA, IIz, Identifier,
            IfUSaySo, ImInYr, ImOuttaYr, IsNowA, It, Itz, Kthxbye, Maek, Mebbe, Mkay, ModOf,
            Nerfin, NewLine, NoWai, Not, NumbarLiteral, NumbrLiteral, ORly, Oic, Omg, Omgwtf, Plus,
            ProduktOf, QuoshuntOf, R, SmallrOf, Smoosh, SumOf, Til, TroofLiteral, TypeLiteral,
            Unknown, Uppin, Visible, Wazzup, Whitespace, Wile, WonOf, Wtf, YaRly, YarnLiteral, Yr,
        };

        match self {
            Hai | Kthxbye => "Code Delimiter",
            Wazzup | Buhbye => "Variable List Delimiter",
            Comment => "Single-Line Comment",
            BlockComment => "Multi-Line Comment",
            IHasA => "Variable Declaration",
            Itz => "Variable Initialization",
            R => "Assignment Operator",
            IsNowA => "Type Cast Keyword",
            SumOf | DiffOf | ProduktOf | QuoshuntOf | ModOf => "Arithmetic Operator",
            BiggrOf | SmallrOf | BothSaem | Diffrint => "Comparison Operator",
            BothOf | EitherOf | WonOf | Not | AllOf | AnyOf => "Logic Operator",
            Smoosh => "String Concat Keyword",
            Maek => "Type Cast Keyword",
            A => "Type Cast Separator",
            Visible => "Output Keyword",
            Gimmeh => "Input Keyword",
            ORly => "If-Then Start",
            YaRly => "If-Then (True Block)",
            Mebbe => "If-Then (Else If)",
            NoWai => "If-Then (Else Block)",
            Oic => "Control Flow End",
            Wtf => "Switch Start",
            Omg => "Switch Case",
            Omgwtf => "Switch Default Case",
            Gtfo => "Break Statement",
            HowIzI => "Function Definition Start",
            IfUSaySo => "Function Definition End",
            IIz => "Function Call",
            FoundYr => "Return Statement",
            Mkay => "Infinite Arity End",
            ImInYr => "Loop Start",
            ImOuttaYr => "Loop End",
            Uppin => "Loop Operation (Increment)",
            Nerfin => "Loop Operation (Decrement)",
            Yr => "Parameter Designator",
            Til => "Loop Condition (Until)",
            Wile => "Loop Condition (While)",
            An => "Multiple Parameter Separator",
            Plus => "Concatenation Operator",
            It => "Implicit Variable",
            TroofLiteral => "Troof Literal",
            TypeLiteral => "Type Literal",
            YarnLiteral => "Yarn Literal",
            NumbarLiteral => "Numbar Literal",
            NumbrLiteral => "Numbr Literal",
            Identifier => "Variable Identifier",
            NewLine | Whitespace => "Whitespace",
            Unknown => "Unknown",
        }
    }

    /// Returns `true` if a token of this kind can begin an expression.
    #[must_use]
    pub const fn starts_expression(self) -> bool {
        use TokenKind::{
            AllOf, AnyOf, BiggrOf, BothOf, BothSaem, DiffOf, Diffrint, EitherOf, IIz, Identifier,
            It, Maek, ModOf, Not, NumbarLiteral, NumbrLiteral, ProduktOf, QuoshuntOf, SmallrOf,
            Smoosh, SumOf, TroofLiteral, WonOf, YarnLiteral,
        };

        matches!(self,
                 SumOf
                 | DiffOf
                 | ProduktOf
                 | QuoshuntOf
                 | ModOf
                 | BiggrOf
                 | SmallrOf
                 | BothOf
                 | EitherOf
                 | WonOf
                 | BothSaem
                 | Diffrint
                 | AllOf
                 | AnyOf
                 | Not
                 | Smoosh
                 | Maek
                 | IIz
                 | Identifier
                 | It
                 | NumbrLiteral
                 | NumbarLiteral
                 | YarnLiteral
                 | TroofLiteral)
    }
}

/// A single token with its source text and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The lexical category.
    pub kind:   TokenKind,
    /// The exact source text of the token.
    pub lexeme: String,
    /// 1-based line number.
    pub line:   usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and where that line starts so that every
/// token can be given a line and a column.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// Advances the line counter past a newline.
fn newline(lex: &mut logos::Lexer<TokenKind>) -> logos::Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    logos::Skip
}

/// Rejects a multi-word keyword that runs into the next word, as in
/// `I HAS Apple`.
fn keyword_end(lex: &mut logos::Lexer<TokenKind>) -> bool {
    !lex.remainder().starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_')
}

/// Skips an `OBTW` comment up to and including its closing `TLDR`.
///
/// An unterminated comment runs to the end of the input. Newlines inside the
/// comment still advance the line counter.
fn skip_block_comment(lex: &mut logos::Lexer<TokenKind>) -> logos::Skip {
    let remainder = lex.remainder();
    let length = remainder.find("TLDR").map_or(remainder.len(), |end| end + "TLDR".len());
    let body = &remainder[..length];

    if let Some(last) = body.rfind('\n') {
        lex.extras.line += body.matches('\n').count();
        lex.extras.line_start = lex.span().end + last + 1;
    }
    lex.bump(length);
    logos::Skip
}

/// Splits source text into tokens.
///
/// Comments, whitespace and newlines are dropped. Anything that no rule
/// recognizes becomes a [`TokenKind::Unknown`] token so that later phases can
/// report it; scanning never stops early.
///
/// # Example
/// ```
/// use lolz::interpreter::lexer::{TokenKind, scan};
///
/// let tokens = scan("I HAS A num ITZ 17 BTW a comment");
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::IHasA, TokenKind::Identifier, TokenKind::Itz, TokenKind::NumbrLiteral]);
/// assert_eq!(tokens[1].column, 9);
/// ```
#[must_use]
pub fn scan(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = result.unwrap_or(TokenKind::Unknown);
        let line_start = lexer.extras.line_start.min(span.start);

        tokens.push(Token { kind,
                            lexeme: lexer.slice().to_string(),
                            line: lexer.extras.line,
                            column: source[line_start..span.start].chars().count() + 1 });
    }

    debug!(tokens = tokens.len(), "scanned source");
    tokens
}
