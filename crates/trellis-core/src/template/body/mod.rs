//! Template body interpreter
//!
//! Runs a body against a [`Scope`] and returns the captured output. Text
//! outside tags is copied verbatim; tags are looked up, called, looped over
//! or captured into sections.

mod blocks;
mod expr;
pub(crate) mod helpers;
mod scope;
mod tokenize;

use serde_json::Value;
use std::path::Path;

use crate::error::{Result, TrellisError};
use crate::template::error::TemplateError;

use blocks::find_block_end;
use expr::{object_value, Expr};
use helpers::stringify_value;
use tokenize::{Tag, TagKind, TagStream};

pub use scope::Scope;
pub(crate) use scope::LoopScope;

/// Interpreter for one body file
pub struct BodyInterpreter<'p> {
    path: &'p Path,
}

impl<'p> BodyInterpreter<'p> {
    /// `path` is only used to label errors
    pub fn new(path: &'p Path) -> Self {
        Self { path }
    }

    /// Execute `source` and return everything it wrote
    pub fn execute(&self, source: &str, scope: &mut dyn Scope) -> Result<String> {
        let mut output = String::with_capacity(source.len());
        self.execute_into(source, 0, scope, &mut output)?;
        Ok(output)
    }

    fn error(&self, source: TemplateError) -> TrellisError {
        TrellisError::Template {
            path: self.path.to_path_buf(),
            source,
        }
    }

    fn malformed(&self, message: impl Into<String>, line: usize) -> TrellisError {
        self.error(TemplateError::Syntax {
            message: message.into(),
            line,
        })
    }

    /// `line_offset` is the number of lines preceding `text` in the file
    fn execute_into(
        &self,
        text: &str,
        line_offset: usize,
        scope: &mut dyn Scope,
        output: &mut String,
    ) -> Result<()> {
        let mut cursor = 0;

        for tag in TagStream::new(text) {
            if tag.start < cursor {
                // inside a block already consumed
                continue;
            }

            let text_end = tag.start - tag.backslash_count;
            output.push_str(&text[cursor..text_end]);
            for _ in 0..tag.backslash_count / 2 {
                output.push('\\');
            }

            if tag.is_escaped() {
                output.push_str(&text[tag.start..tag.end()]);
                cursor = tag.end();
                continue;
            }

            let line = line_offset + tag.line;
            cursor = match &tag.kind {
                TagKind::Expression { source } => {
                    let value = self.evaluate_source(source, line, scope)?;
                    let rendered = stringify_value(&value, source.trim()).map_err(|e| self.error(e))?;
                    output.push_str(&rendered);
                    tag.end()
                }
                TagKind::BlockStart { keyword, args } => {
                    self.execute_block(text, &tag, keyword, args, line_offset, scope, output)?
                }
                TagKind::BlockEnd { keyword } => {
                    return Err(self.malformed(
                        format!(
                            "Unexpected {{{{/{}}}}} without matching {{{{{}}}}}",
                            keyword, keyword
                        ),
                        line,
                    ));
                }
            };
        }

        let tail = &text[cursor..];
        if let Some(open) = find_unescaped_open(tail) {
            let line = line_offset + 1 + text[..cursor + open].matches('\n').count();
            return Err(self.malformed("Unclosed tag", line));
        }
        output.push_str(tail);
        Ok(())
    }

    /// Run a block and return the cursor just past its closing tag
    #[allow(clippy::too_many_arguments)]
    fn execute_block(
        &self,
        text: &str,
        open: &Tag,
        keyword: &str,
        args: &str,
        line_offset: usize,
        scope: &mut dyn Scope,
        output: &mut String,
    ) -> Result<usize> {
        let line = line_offset + open.line;
        let rest = &text[open.end()..];
        let close = find_block_end(rest, keyword)
            .ok_or_else(|| self.malformed(format!("Unclosed {} block", keyword), line))?;
        let inner = &rest[..close.start];
        let inner_offset = line - 1;

        match keyword {
            "each" => {
                let (key, var) = parse_each_args(args)
                    .ok_or_else(|| self.malformed(format!("Invalid each syntax: '{}'", args), line))?;
                let items = match scope.lookup(key) {
                    Some(Value::Array(items)) => items,
                    Some(_) => {
                        return Err(self.malformed(format!("'{}' is not a list", key), line))
                    }
                    None => {
                        return Err(self.error(TemplateError::UndefinedName {
                            name: key.to_string(),
                            line,
                        }))
                    }
                };

                for item in items {
                    let mut loop_scope = LoopScope::new(&mut *scope, var, item);
                    self.execute_into(inner, inner_offset, &mut loop_scope, output)?;
                }
            }
            "section" => {
                let key = match self.evaluate_source(args, line, scope)? {
                    Value::String(key) => key,
                    other => {
                        return Err(self.malformed(
                            format!("Section name must be a string, got {}", other),
                            line,
                        ))
                    }
                };
                let mut content = String::new();
                self.execute_into(inner, inner_offset, scope, &mut content)?;
                output.push_str(&scope.declare_section(&key, content)?);
            }
            other => {
                return Err(self.malformed(format!("Unknown block '{}'", other), line));
            }
        }

        Ok(open.end() + close.end())
    }

    fn evaluate_source(&self, source: &str, line: usize, scope: &mut dyn Scope) -> Result<Value> {
        let expr = expr::parse(source).map_err(|message| self.malformed(message, line))?;
        self.evaluate(&expr, line, scope)
    }

    fn evaluate(&self, expr: &Expr, line: usize, scope: &mut dyn Scope) -> Result<Value> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Path(key) => scope.lookup(key).ok_or_else(|| {
                self.error(TemplateError::UndefinedName {
                    name: key.clone(),
                    line,
                })
            }),
            Expr::Array(items) => items
                .iter()
                .map(|item| self.evaluate(item, line, scope))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Expr::Object(fields) => fields
                .iter()
                .map(|(key, value)| Ok((key.clone(), self.evaluate(value, line, scope)?)))
                .collect::<Result<Vec<_>>>()
                .map(object_value),
            Expr::Call { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.evaluate(arg, line, scope))
                    .collect::<Result<Vec<_>>>()?;
                scope.invoke(name, args)
            }
        }
    }
}

/// Parse `items |item|` into (key, variable)
fn parse_each_args(args: &str) -> Option<(&str, &str)> {
    let (key, rest) = args.split_once('|')?;
    let (var, trailing) = rest.split_once('|')?;
    let (key, var) = (key.trim(), var.trim());
    if key.is_empty() || var.is_empty() || !trailing.trim().is_empty() {
        return None;
    }
    Some((key, var))
}

/// Offset of the first `{{` in `text` preceded by an even number of backslashes
fn find_unescaped_open(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(found) = text[from..].find("{{") {
        let at = from + found;
        let backslashes = bytes[..at].iter().rev().take_while(|&&b| b == b'\\').count();
        if backslashes % 2 == 0 {
            return Some(at);
        }
        from = at + 2;
    }
    None
}

#[cfg(test)]
mod tests;
