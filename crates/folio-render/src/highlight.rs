use regex::Regex;

use crate::error::RenderResult;

const TOKEN_PATTERN: &str = concat!(
    r"(?P<comment>//[^\n]*|/\*[\s\S]*?\*/)",
    r#"|(?P<string>"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|`[^`]*`)"#,
    r"|(?P<number>\b\d+(?:\.\d+)?\b)",
    r"|(?P<word>\b[A-Za-z_]\w*)",
);

const KEYWORDS: &[&str] = &[
    "async", "await", "class", "const", "debugger", "delete", "export", "extends", "function",
    "import", "in", "instanceof", "new", "super", "this", "typeof", "var", "let", "void", "with",
    "yield", "interface", "type", "enum", "as", "any", "number", "string", "boolean", "unknown",
    "never", "readonly", "service", "rpc", "returns", "message", "fn", "pub", "struct", "impl",
    "use", "mod", "def", "from",
];

const CONTROL_FLOW: &[&str] = &[
    "if", "else", "switch", "case", "default", "for", "while", "do", "try", "catch", "finally",
    "return", "break", "continue", "throw", "match", "loop",
];

const LITERALS: &[&str] = &["true", "false", "null", "undefined", "None", "Some"];

/// Escape text for inclusion in HTML content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Token classes emitted as `tok-<class>` spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenClass {
    Comment,
    String,
    Keyword,
    Control,
    Literal,
    Function,
    Number,
    Type,
}

impl TokenClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Comment => "tok-comment",
            Self::String => "tok-string",
            Self::Keyword => "tok-keyword",
            Self::Control => "tok-control",
            Self::Literal => "tok-literal",
            Self::Function => "tok-function",
            Self::Number => "tok-number",
            Self::Type => "tok-type",
        }
    }
}

/// Small language-agnostic highlighter for code shown in articles.
///
/// The source is tokenized once and every piece is HTML-escaped, so the
/// output never contains markup from the input.
#[derive(Clone, Debug)]
pub struct Highlighter {
    tokens: Regex,
}

impl Highlighter {
    pub fn new() -> RenderResult<Self> {
        Ok(Self {
            tokens: Regex::new(TOKEN_PATTERN)?,
        })
    }

    /// Highlighted HTML for `code`.
    pub fn highlight(&self, code: &str) -> String {
        let mut out = String::with_capacity(code.len() * 2);
        let mut last = 0;

        for caps in self.tokens.captures_iter(code) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&escape_html(&code[last..whole.start()]));
            last = whole.end();

            let class = if caps.name("comment").is_some() {
                Some(TokenClass::Comment)
            } else if caps.name("string").is_some() {
                Some(TokenClass::String)
            } else if caps.name("number").is_some() {
                Some(TokenClass::Number)
            } else {
                classify_word(whole.as_str(), &code[whole.end()..])
            };

            match class {
                Some(class) => {
                    out.push_str("<span class=\"");
                    out.push_str(class.css_class());
                    out.push_str("\">");
                    out.push_str(&escape_html(whole.as_str()));
                    out.push_str("</span>");
                }
                None => out.push_str(&escape_html(whole.as_str())),
            }
        }

        out.push_str(&escape_html(&code[last..]));
        out
    }
}

fn classify_word(word: &str, rest: &str) -> Option<TokenClass> {
    if CONTROL_FLOW.contains(&word) {
        Some(TokenClass::Control)
    } else if KEYWORDS.contains(&word) {
        Some(TokenClass::Keyword)
    } else if LITERALS.contains(&word) {
        Some(TokenClass::Literal)
    } else if rest.trim_start().starts_with('(') {
        Some(TokenClass::Function)
    } else if word.starts_with(|c: char| c.is_ascii_uppercase()) {
        Some(TokenClass::Type)
    } else {
        None
    }
}
