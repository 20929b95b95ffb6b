//! Policy-driven redaction with fail-closed verification

use std::borrow::Cow;

use regex::{Captures, Regex};
use serde_json::Value;
use siteconf_core_types::REDACTED;

use crate::diff::parse::parse_structured;
use crate::diff::path::{push_index, push_key};
use crate::errors::{ExError, Result, SiteConfigError};
use crate::redaction::policy::RedactionPolicy;

/// Compiled form of a `RedactionPolicy`
///
/// Structured documents are redacted value by value: the whole value under a
/// sensitive key becomes the placeholder and the document is re-rendered as
/// sorted, pretty-printed JSON. String leaves get the same `key=value` and
/// value-pattern pass as free text. Anything else is redacted line by line
/// with regexes.
///
/// A key is sensitive when one of the policy keys appears in it as a whole
/// word, so `executors.accessToken` and `github.token` both count.
#[derive(Debug)]
pub struct Redactor {
    /// Whole-word match of any sensitive key, for object keys
    key_word: Regex,
    /// `key: value` / `"key": value` / `key = value` in free text
    key_value: Regex,
    /// The key half of `key_value`, for verification
    key_marker: Regex,
    value_patterns: Vec<Regex>,
}

impl Redactor {
    /// Compile a policy
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when a value pattern does not compile or the policy
    /// names no sensitive keys.
    pub fn new(policy: &RedactionPolicy) -> Result<Self> {
        let keys = policy.keys();
        if keys.is_empty() {
            return Err(SiteConfigError::InvalidRedactionPattern {
                pattern: String::new(),
                reason: "policy has no sensitive keys".to_string(),
            }
            .into());
        }

        let alternation = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let key_word = compile(&format!(r"(?i)\b(?:{})\b", alternation))?;
        let marker = format!(r#"["']?\b(?:{})\b["']?[ \t]*[:=]"#, alternation);

        let key_value = compile(&format!(
            r#"(?i)(?P<prefix>{marker}[ \t]*)(?P<value>"(?:[^"\\\n]|\\.)*"|'(?:[^'\n]|'')*'|[^\s|>{{\[&*!,#}}\]"'](?:[^\n,}}\]"]*[^\s,}}\]"])?)"#
        ))?;
        let key_marker = compile(&format!("(?i){}", marker))?;

        let value_patterns = policy
            .value_patterns
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            key_word,
            key_value,
            key_marker,
            value_patterns,
        })
    }

    /// Redact one snapshot's contents
    ///
    /// # Errors
    ///
    /// `RedactionFailed` when the output cannot be shown to be free of
    /// sensitive values. The error names a key path or line number, never
    /// the value.
    pub fn redact(&self, contents: &str) -> Result<String> {
        match parse_structured(contents) {
            Some(mut document) => {
                self.redact_value(&mut document);
                let rendered = serde_json::to_string_pretty(&document)
                    .map_err(|e| ExError::from(SiteConfigError::from(e)).with_op("redact"))?;
                self.verify_structured(&rendered)?;
                Ok(rendered)
            }
            None => {
                let redacted = self.redact_text(contents);
                self.verify_text(&redacted)?;
                Ok(redacted)
            }
        }
    }

    fn is_sensitive_key(&self, key: &str) -> bool {
        self.key_word.is_match(key)
    }

    fn redact_value(&self, value: &mut Value) {
        match value {
            Value::Object(map) => {
                for (key, child) in map.iter_mut() {
                    if self.is_sensitive_key(key) {
                        *child = Value::String(REDACTED.to_string());
                    } else {
                        self.redact_value(child);
                    }
                }
            }
            Value::Array(items) => items.iter_mut().for_each(|item| self.redact_value(item)),
            Value::String(s) => {
                let replaced = match self.redact_string(s) {
                    Cow::Owned(replaced) => Some(replaced),
                    Cow::Borrowed(_) => None,
                };
                if let Some(replaced) = replaced {
                    *s = replaced;
                }
            }
            _ => {}
        }
    }

    fn redact_text(&self, contents: &str) -> String {
        self.redact_string(contents).into_owned()
    }

    fn redact_string<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let keyed = self.key_value.replace_all(input, |caps: &Captures| {
            format!("{}\"{}\"", &caps["prefix"], REDACTED)
        });
        match keyed {
            Cow::Borrowed(unchanged) => self.apply_value_patterns(unchanged),
            Cow::Owned(keyed) => Cow::Owned(self.apply_value_patterns(&keyed).into_owned()),
        }
    }

    fn apply_value_patterns<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let mut result: Cow<'a, str> = Cow::Borrowed(input);
        for pattern in &self.value_patterns {
            let replaced = match pattern.replace_all(&result, replace_secret) {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                result = Cow::Owned(replaced);
            }
        }
        result
    }

    fn verify_structured(&self, rendered: &str) -> Result<()> {
        let document = parse_structured(rendered)
            .ok_or_else(|| redaction_failed("document root".to_string()))?;
        self.verify_value(&document, "")
    }

    fn verify_value(&self, value: &Value, path: &str) -> Result<()> {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let child_path = push_key(path, key);
                    if self.is_sensitive_key(key) {
                        if child.as_str() != Some(REDACTED) {
                            return Err(redaction_failed(child_path));
                        }
                    } else {
                        self.verify_value(child, &child_path)?;
                    }
                }
                Ok(())
            }
            Value::Array(items) => items
                .iter()
                .enumerate()
                .try_for_each(|(i, item)| self.verify_value(item, &push_index(path, i))),
            Value::String(s) => {
                if self.string_leaf_clean(s) {
                    Ok(())
                } else if path.is_empty() {
                    Err(redaction_failed("document root".to_string()))
                } else {
                    Err(redaction_failed(path.to_string()))
                }
            }
            _ => Ok(()),
        }
    }

    /// A `key=` inside a string must be followed by the placeholder or end
    /// the string
    fn string_leaf_clean(&self, s: &str) -> bool {
        let placeholder = format!("\"{}\"", REDACTED);
        let keyed_clean = self.key_marker.find_iter(s).all(|marker| {
            let rest = s[marker.end()..].trim_start_matches([' ', '\t']);
            rest.is_empty() || rest.starts_with(placeholder.as_str())
        });
        keyed_clean && self.value_patterns_clean(s)
    }

    /// Every value-pattern match left in `s` must already be the placeholder
    fn value_patterns_clean(&self, s: &str) -> bool {
        self.value_patterns.iter().all(|pattern| {
            pattern.captures_iter(s).all(|caps| {
                let redacted = caps.name("secret").or_else(|| caps.get(0));
                redacted.is_some_and(|m| m.as_str() == REDACTED)
            })
        })
    }

    fn verify_text(&self, redacted: &str) -> Result<()> {
        let placeholder = format!("\"{}\"", REDACTED);
        for (index, line) in redacted.lines().enumerate() {
            for marker in self.key_marker.find_iter(line) {
                let rest = line[marker.end()..].trim_start_matches([' ', '\t']);
                let verified = rest
                    .strip_prefix(placeholder.as_str())
                    .is_some_and(value_terminated);
                if !verified {
                    return Err(redaction_failed(format!("line {}", index + 1)));
                }
            }
            if !self.value_patterns_clean(line) {
                return Err(redaction_failed(format!("line {}", index + 1)));
            }
        }
        Ok(())
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        SiteConfigError::InvalidRedactionPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn redaction_failed(location: String) -> ExError {
    ExError::from(SiteConfigError::RedactionFailed { location }).with_op("redact")
}

/// Replace the `secret` group if the pattern has one, else the whole match
fn replace_secret(caps: &Captures) -> String {
    let whole = &caps[0];
    match (caps.get(0), caps.name("secret")) {
        (Some(m), Some(secret)) => {
            let start = secret.start() - m.start();
            let end = secret.end() - m.start();
            format!("{}{}{}", &whole[..start], REDACTED, &whole[end..])
        }
        _ => REDACTED.to_string(),
    }
}

/// True when nothing but separators, closers or a comment follows a value
fn value_terminated(tail: &str) -> bool {
    let mut rest = tail.trim_start();
    loop {
        if rest.is_empty() || rest.starts_with('#') || rest.starts_with("//") {
            return true;
        }
        if let Some(after) = rest.strip_prefix(|c| c == '}' || c == ']') {
            rest = after.trim_start();
            continue;
        }
        if let Some(after) = rest.strip_prefix(',') {
            let after = after.trim_start();
            return after.is_empty()
                || after.starts_with("//")
                || after.starts_with(|c| matches!(c, '"' | '\'' | '{' | '[' | '}' | ']'));
        }
        return false;
    }
}
