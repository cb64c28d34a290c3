//! Expression parser for the content of `{{ ... }}` tags
//!
//! ```text
//! expr   := call | path | literal | array | object
//! call   := name '(' [expr (',' expr)*] ')'
//! path   := ident ('.' (ident | digits))*
//! array  := '[' [expr (',' expr)*] ']'
//! object := '{' [key ':' expr (',' key ':' expr)*] '}'
//! ```

use serde_json::{Map, Number, Value};

/// Deepest nesting of arrays, objects and calls in one expression
const MAX_NESTING: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Literal(Value),
    Path(String),
    Array(Vec<Expr>),
    Object(Vec<(String, Expr)>),
    Call { name: String, args: Vec<Expr> },
}

/// Parse a complete expression; trailing input is an error
pub(crate) fn parse(source: &str) -> Result<Expr, String> {
    let mut parser = Parser {
        src: source,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    parser.skip_ws();
    if parser.pos < source.len() {
        return Err(format!(
            "unexpected '{}' in expression '{}'",
            &source[parser.pos..],
            source
        ));
    }
    Ok(expr)
}

struct Parser<'s> {
    src: &'s str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), String> {
        self.skip_ws();
        match self.bump() {
            Some(c) if c == wanted => Ok(()),
            Some(c) => Err(format!("expected '{}', found '{}'", wanted, c)),
            None => Err(format!("expected '{}', found end of expression", wanted)),
        }
    }

    fn expr(&mut self) -> Result<Expr, String> {
        if self.depth >= MAX_NESTING {
            return Err(format!("expression nested deeper than {} levels", MAX_NESTING));
        }
        self.depth += 1;
        let expr = self.term();
        self.depth -= 1;
        expr
    }

    fn term(&mut self) -> Result<Expr, String> {
        self.skip_ws();
        match self.peek() {
            None => Err("empty expression".to_string()),
            Some('"') | Some('\'') => self.string().map(|s| Expr::Literal(Value::String(s))),
            Some('[') => self.array(),
            Some('{') => self.object(),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number(),
            Some(c) if is_ident_start(c) => self.name_or_call(),
            Some(c) => Err(format!("unexpected character '{}'", c)),
        }
    }

    fn name_or_call(&mut self) -> Result<Expr, String> {
        let name = self.dotted_name();

        match name.as_str() {
            "true" => return Ok(Expr::Literal(Value::Bool(true))),
            "false" => return Ok(Expr::Literal(Value::Bool(false))),
            "null" => return Ok(Expr::Literal(Value::Null)),
            _ => {}
        }

        self.skip_ws();
        if self.peek() == Some('(') {
            self.pos += 1;
            let args = self.list(')')?;
            Ok(Expr::Call { name, args })
        } else {
            Ok(Expr::Path(name))
        }
    }

    fn dotted_name(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_ident_continue(c) || c == '.' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        self.src[start..self.pos].to_string()
    }

    fn list(&mut self, close: char) -> Result<Vec<Expr>, String> {
        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() == Some(close) {
            self.pos += 1;
            return Ok(items);
        }
        loop {
            items.push(self.expr()?);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(items),
                Some(c) => return Err(format!("expected ',' or '{}', found '{}'", close, c)),
                None => return Err(format!("unclosed '{}'", close)),
            }
        }
    }

    fn array(&mut self) -> Result<Expr, String> {
        self.expect('[')?;
        self.list(']').map(Expr::Array)
    }

    fn object(&mut self) -> Result<Expr, String> {
        self.expect('{')?;
        let mut fields = Vec::new();
        self.skip_ws();
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(Expr::Object(fields));
        }
        loop {
            self.skip_ws();
            let key = match self.peek() {
                Some('"') | Some('\'') => self.string()?,
                Some(c) if is_ident_start(c) => self.dotted_name(),
                _ => return Err("expected object key".to_string()),
            };
            self.expect(':')?;
            fields.push((key, self.expr()?));
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Expr::Object(fields)),
                _ => return Err("expected ',' or '}' in object".to_string()),
            }
        }
    }

    fn string(&mut self) -> Result<String, String> {
        let quote = self.bump().ok_or("expected string")?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err("unterminated string literal".to_string()),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => out.push(c),
                    None => return Err("unterminated string literal".to_string()),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    fn number(&mut self) -> Result<Expr, String> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E')
        {
            self.pos += 1;
        }
        let text = &self.src[start..self.pos];

        if let Ok(int) = text.parse::<i64>() {
            return Ok(Expr::Literal(Value::Number(int.into())));
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(|n| Expr::Literal(Value::Number(n)))
            .ok_or_else(|| format!("invalid number '{}'", text))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Build an object value from evaluated fields
pub(crate) fn object_value(fields: Vec<(String, Value)>) -> Value {
    Value::Object(fields.into_iter().collect::<Map<String, Value>>())
}
