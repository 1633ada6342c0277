//! Model Schema Parser
//!
//! This module provides [`ModelSchemaParser`], which statically inspects a
//! Mongoose model source file instead of executing it. Student code is never
//! run; a small tokenizer and an object-literal reader extract just enough
//! structure to answer "which fields exist, what type are they, and which
//! validation options do they declare".
//!
//! # Recognised shape
//!
//! ```js
//! const songSchema = new mongoose.Schema(
//!   {
//!     title: { type: String, required: true, trim: true },
//!     year: Number,
//!   },
//!   { timestamps: true }
//! );
//! export const Song = mongoose.model("Song", songSchema);
//! ```
//!
//! - The first `Schema(` call is inspected. Its first argument must be an
//!   object literal of fields, or the name of a `const`/`let`/`var` bound to
//!   one; the optional second argument holds schema options.
//! - A field is either `name: Type` or `name: { type: Type, ...options }`.
//! - Option values are reduced to JavaScript truthiness, which is what the
//!   lab's grading rules check.
//! - Values that are not literals (calls, arrow functions, arithmetic, regular
//!   expressions) are kept as opaque expressions and count as truthy.
//!
//! # Error Handling
//!
//! Inspection failures are reported as [`MarkerError::ParseSchemaError`]: no
//! `Schema(` call, a field map that is not an object literal, unbalanced
//! brackets, or a model that is never registered under the expected name and
//! exported.

use crate::error::MarkerError;
use crate::traits::parser::Parser;

/// A literal value read from the model source.
#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
    Bool(bool),
    Number(f64),
    Str(String),
    /// An identifier or dotted path such as `String` or `mongoose.Schema.Types.ObjectId`.
    Ident(String),
    Array(Vec<JsValue>),
    Object(Vec<(String, JsValue)>),
    /// Any expression the reader does not model.
    Expr,
}

impl JsValue {
    /// JavaScript truthiness of the value.
    pub fn is_truthy(&self) -> bool {
        match self {
            JsValue::Bool(b) => *b,
            JsValue::Number(n) => *n != 0.0 && !n.is_nan(),
            JsValue::Str(s) => !s.is_empty(),
            JsValue::Ident(name) => !matches!(name.as_str(), "null" | "undefined" | "NaN"),
            JsValue::Array(_) | JsValue::Object(_) | JsValue::Expr => true,
        }
    }

    /// Look up a key of an object literal.
    pub fn get(&self, key: &str) -> Option<&JsValue> {
        match self {
            JsValue::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Primitive kind a field is declared with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Date,
    Array,
    Other(String),
}

impl FieldKind {
    fn from_type_name(name: &str) -> Self {
        let last = name.rsplit('.').next().unwrap_or(name);
        match last.to_ascii_lowercase().as_str() {
            "string" => FieldKind::String,
            "number" => FieldKind::Number,
            "boolean" => FieldKind::Boolean,
            "date" => FieldKind::Date,
            "array" => FieldKind::Array,
            _ => FieldKind::Other(last.to_string()),
        }
    }

    fn of(value: &JsValue) -> Self {
        match value {
            JsValue::Ident(name) | JsValue::Str(name) => FieldKind::from_type_name(name),
            JsValue::Array(_) => FieldKind::Array,
            JsValue::Object(_) => FieldKind::Other("Object".into()),
            _ => FieldKind::Other("unknown".into()),
        }
    }
}

/// One declared schema path.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub trim: bool,
    pub min: bool,
    pub max: bool,
}

impl FieldSpec {
    fn from_entry(name: &str, value: &JsValue) -> Self {
        let truthy = |key: &str| value.get(key).is_some_and(JsValue::is_truthy);

        match value.get("type") {
            Some(declared) => FieldSpec {
                name: name.to_string(),
                kind: FieldKind::of(declared),
                required: truthy("required"),
                trim: truthy("trim"),
                min: truthy("min"),
                max: truthy("max"),
            },
            None => FieldSpec {
                name: name.to_string(),
                kind: FieldKind::of(value),
                required: false,
                trim: false,
                min: false,
                max: false,
            },
        }
    }
}

/// Everything the grader learns about the model file.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    pub fields: Vec<FieldSpec>,
    /// Truthiness of the `timestamps` schema option.
    pub timestamps: bool,
    pub model_name: String,
}

impl ModelSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Static parser for a Mongoose model file registering `model_name`.
#[derive(Debug, Clone)]
pub struct ModelSchemaParser {
    model_name: String,
}

impl ModelSchemaParser {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

impl<'a> Parser<&'a str, ModelSchema> for ModelSchemaParser {
    /// Parses model source text into a [`ModelSchema`].
    ///
    /// # Errors
    ///
    /// Returns [`MarkerError::ParseSchemaError`] if the source does not declare
    /// a schema, or does not register and export the expected model.
    fn parse(&self, source: &'a str) -> Result<ModelSchema, MarkerError> {
        let tokens = tokenize(source);
        let mut reader = Reader::new(&tokens);

        let start = reader.find_call("Schema").ok_or_else(|| {
            MarkerError::ParseSchemaError("no `new Schema(...)` declaration found".to_string())
        })?;
        reader.pos = start;

        let definition = match reader.peek() {
            Some(Token::Ident(name))
                if !name.contains('.')
                    && matches!(tokens.get(reader.pos + 1), Some(Token::Punct(',' | ')'))) =>
            {
                reader.pos += 1;
                let mut binding = Reader::new(&tokens);
                binding.pos = reader.find_binding(name).ok_or_else(|| {
                    MarkerError::ParseSchemaError(format!(
                        "schema definition `{name}` is not bound to an object literal"
                    ))
                })?;
                binding.value()?
            }
            _ => reader.value()?,
        };
        let JsValue::Object(entries) = &definition else {
            return Err(MarkerError::ParseSchemaError(
                "schema definition is not an object literal".to_string(),
            ));
        };

        let options = if reader.eat(&Token::Punct(',')) && !reader.at(&Token::Punct(')')) {
            reader.value()?
        } else {
            JsValue::Object(Vec::new())
        };

        if !registers_model(&tokens, &self.model_name) {
            return Err(MarkerError::ParseSchemaError(format!(
                "model \"{}\" is never registered with mongoose.model(...)",
                self.model_name
            )));
        }
        if !has_export(&tokens) {
            return Err(MarkerError::ParseSchemaError(
                "model file does not export anything".to_string(),
            ));
        }

        let fields = entries
            .iter()
            .map(|(name, value)| FieldSpec::from_entry(name, value))
            .collect::<Vec<_>>();
        tracing::debug!(fields = fields.len(), "model schema inspected");

        Ok(ModelSchema {
            fields,
            timestamps: options.get("timestamps").is_some_and(JsValue::is_truthy),
            model_name: self.model_name.clone(),
        })
    }
}

// --------------------------- tokenizer ---------------------------

#[derive(Debug, Clone, PartialEq)]
enum Token {
    /// Identifier, with dotted member paths folded in (`mongoose.Schema`).
    Ident(String),
    Str(String),
    Number(f64),
    Spread,
    /// A regular expression literal; its body is not kept.
    Regex,
    Punct(char),
}

fn tokenize(source: &str) -> Vec<Token> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c.is_whitespace() {
            i += 1;
        } else if c == '/' && next == Some('/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
        } else if c == '/' && next == Some('*') {
            i += 2;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                i += 1;
            }
            i += 2;
        } else if c == '/' && regex_allowed(tokens.last()) {
            i += 1;
            let mut in_class = false;
            while i < chars.len() && chars[i] != '\n' {
                match chars[i] {
                    '\\' => i += 1,
                    '[' => in_class = true,
                    ']' => in_class = false,
                    '/' if !in_class => break,
                    _ => {}
                }
                i += 1;
            }
            i += 1;
            while i < chars.len() && is_ident_part(chars[i]) {
                i += 1;
            }
            tokens.push(Token::Regex);
        } else if matches!(c, '"' | '\'' | '`') {
            let mut text = String::new();
            i += 1;
            while i < chars.len() && chars[i] != c {
                if chars[i] == '\\' && i + 1 < chars.len() {
                    i += 1;
                }
                text.push(chars[i]);
                i += 1;
            }
            i += 1;
            tokens.push(Token::Str(text));
        } else if c.is_ascii_digit() || (c == '.' && next.is_some_and(|n| n.is_ascii_digit())) {
            let begin = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || matches!(chars[i], '.' | '_')) {
                i += 1;
            }
            let raw: String = chars[begin..i].iter().filter(|&&ch| ch != '_').collect();
            tokens.push(Token::Number(parse_number(&raw)));
        } else if c == '.' && next == Some('.') && chars.get(i + 2) == Some(&'.') {
            tokens.push(Token::Spread);
            i += 3;
        } else if is_ident_start(c) {
            let begin = i;
            while i < chars.len() && is_ident_part(chars[i]) {
                i += 1;
            }
            let word: String = chars[begin..i].iter().collect();
            // Fold `a.b` and `a?.b` into one path token.
            let follows_member_dot = matches!(tokens.last(), Some(Token::Punct('.')))
                && matches!(
                    tokens.len().checked_sub(2).and_then(|idx| tokens.get(idx)),
                    Some(Token::Ident(_))
                );
            if follows_member_dot {
                tokens.pop();
                if let Some(Token::Ident(path)) = tokens.last_mut() {
                    path.push('.');
                    path.push_str(&word);
                }
            } else {
                tokens.push(Token::Ident(word));
            }
        } else if c == '?' && next == Some('.') {
            tokens.push(Token::Punct('.'));
            i += 2;
        } else {
            tokens.push(Token::Punct(c));
            i += 1;
        }
    }

    tokens
}

/// Whether a `/` after `previous` starts a regex literal rather than a division.
fn regex_allowed(previous: Option<&Token>) -> bool {
    match previous {
        None => true,
        Some(Token::Punct(':' | ',' | '(' | '[' | '=' | '!' | '{' | ';' | '&' | '|' | '?')) => true,
        Some(Token::Ident(word)) => matches!(word.as_str(), "return" | "typeof" | "case"),
        _ => false,
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn parse_number(raw: &str) -> f64 {
    let lower = raw.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).map(|n| n as f64).unwrap_or(f64::NAN);
    }
    lower.trim_end_matches('n').parse().unwrap_or(f64::NAN)
}

fn registers_model(tokens: &[Token], model_name: &str) -> bool {
    tokens.windows(3).any(|w| match w {
        [Token::Ident(path), Token::Punct('('), Token::Str(name)] => {
            (path == "model" || path.ends_with(".model")) && name == model_name
        }
        _ => false,
    })
}

fn has_export(tokens: &[Token]) -> bool {
    tokens.iter().any(|t| match t {
        Token::Ident(path) => {
            path == "export" || path == "module.exports" || path.starts_with("exports.")
        }
        _ => false,
    })
}

// ------------------------- literal reader -------------------------

struct Reader<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Reader<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn at(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.at(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<(), MarkerError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn unexpected(&self) -> MarkerError {
        match self.peek() {
            Some(t) => MarkerError::ParseSchemaError(format!("unexpected token {t:?}")),
            None => MarkerError::ParseSchemaError("unexpected end of file".to_string()),
        }
    }

    /// Position just after `<path ending in name>(`, if such a call exists.
    fn find_call(&self, name: &str) -> Option<usize> {
        let suffix = format!(".{name}");
        self.tokens.windows(2).position(|w| match w {
            [Token::Ident(path), Token::Punct('(')] => path == name || path.ends_with(&suffix),
            _ => false,
        })
        .map(|idx| idx + 2)
    }

    /// Position of the `{` in `const|let|var <name> = {`, if declared.
    fn find_binding(&self, name: &str) -> Option<usize> {
        self.tokens.windows(4).position(|w| match w {
            [Token::Ident(keyword), Token::Ident(bound), Token::Punct('='), Token::Punct('{')] => {
                matches!(keyword.as_str(), "const" | "let" | "var") && bound == name
            }
            _ => false,
        })
        .map(|idx| idx + 3)
    }

    fn value(&mut self) -> Result<JsValue, MarkerError> {
        let value = match self.peek() {
            Some(Token::Regex) => {
                self.pos += 1;
                JsValue::Expr
            }
            Some(Token::Punct('{')) => self.object()?,
            Some(Token::Punct('[')) => self.array()?,
            Some(Token::Str(s)) => {
                self.pos += 1;
                JsValue::Str(s.clone())
            }
            Some(Token::Number(n)) => {
                self.pos += 1;
                JsValue::Number(*n)
            }
            Some(Token::Punct('-')) if matches!(self.tokens.get(self.pos + 1), Some(Token::Number(_))) => {
                self.pos += 1;
                match self.peek() {
                    Some(Token::Number(n)) => {
                        self.pos += 1;
                        JsValue::Number(-n)
                    }
                    _ => return Err(self.unexpected()),
                }
            }
            Some(Token::Ident(word)) => {
                self.pos += 1;
                match word.as_str() {
                    "true" => JsValue::Bool(true),
                    "false" => JsValue::Bool(false),
                    _ => JsValue::Ident(word.clone()),
                }
            }
            Some(_) => {
                self.skip_expression()?;
                return Ok(JsValue::Expr);
            }
            None => return Err(self.unexpected()),
        };

        if self.at_terminator() {
            Ok(value)
        } else {
            // Literal followed by more syntax: a call, member access or operator.
            self.skip_expression()?;
            Ok(JsValue::Expr)
        }
    }

    fn at_terminator(&self) -> bool {
        matches!(
            self.peek(),
            None | Some(Token::Punct(',' | '}' | ']' | ')' | ';'))
        )
    }

    /// Skip to the next `,` or closing bracket at the current nesting level.
    fn skip_expression(&mut self) -> Result<(), MarkerError> {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            match token {
                Token::Punct('(' | '[' | '{') => depth += 1,
                Token::Punct(')' | ']' | '}') => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                Token::Punct(',' | ';') if depth == 0 => return Ok(()),
                _ => {}
            }
            self.pos += 1;
        }
        if depth == 0 {
            Ok(())
        } else {
            Err(MarkerError::ParseSchemaError("unbalanced brackets".to_string()))
        }
    }

    fn object(&mut self) -> Result<JsValue, MarkerError> {
        self.expect(&Token::Punct('{'))?;
        let mut entries = Vec::new();

        loop {
            if self.eat(&Token::Punct('}')) {
                break;
            }

            if self.eat(&Token::Spread) {
                self.skip_expression()?;
            } else {
                let key = match self.peek() {
                    Some(Token::Ident(k)) | Some(Token::Str(k)) => {
                        self.pos += 1;
                        k.clone()
                    }
                    Some(Token::Number(n)) => {
                        self.pos += 1;
                        n.to_string()
                    }
                    Some(Token::Punct('[')) => {
                        self.array()?;
                        String::new()
                    }
                    _ => return Err(self.unexpected()),
                };

                if self.eat(&Token::Punct(':')) {
                    let value = self.value()?;
                    entries.push((key, value));
                } else if self.at(&Token::Punct('(')) {
                    // Method shorthand: `key(args) { body }`.
                    self.skip_expression()?;
                    entries.push((key, JsValue::Expr));
                } else {
                    entries.push((key.clone(), JsValue::Ident(key)));
                }
            }

            if !self.eat(&Token::Punct(',')) {
                self.expect(&Token::Punct('}'))?;
                break;
            }
        }

        Ok(JsValue::Object(entries))
    }

    fn array(&mut self) -> Result<JsValue, MarkerError> {
        self.expect(&Token::Punct('['))?;
        let mut items = Vec::new();

        loop {
            if self.eat(&Token::Punct(']')) {
                break;
            }
            if self.eat(&Token::Spread) {
                self.skip_expression()?;
                items.push(JsValue::Expr);
            } else {
                items.push(self.value()?);
            }
            if !self.eat(&Token::Punct(',')) {
                self.expect(&Token::Punct(']'))?;
                break;
            }
        }

        Ok(JsValue::Array(items))
    }
}
