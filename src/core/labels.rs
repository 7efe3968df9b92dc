//! Lightweight recognition of i18n labels in JS/TS sources.
//!
//! Three call shapes are understood:
//! - `i18n.translate('id', { defaultMessage: '...', description: '...' })`
//! - `intl.formatMessage({ id: '...', defaultMessage: '...' })`
//! - `<FormattedMessage id="..." defaultMessage="..." />`
//!
//! Only literal strings are extracted. Calls whose id is not a literal are
//! still detected by [`contains_labels`].

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::{build_line_index, offset_to_line};

static LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"i18n\.translate\s*\(|formatMessage\s*\(\s*\{|<FormattedMessage\b").unwrap()
});

static TRANSLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"i18n\.translate\s*\(\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)"|`((?:[^`\\$]|\\.)*)`)\s*,\s*\{"#,
    )
    .unwrap()
});

static FORMAT_MESSAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"formatMessage\s*\(\s*\{").unwrap());

static FORMATTED_MESSAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<FormattedMessage\b").unwrap());

static PROPERTY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(id|defaultMessage|description)\s*:\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)"|`((?:[^`\\]|\\.)*)`)"#,
    )
    .unwrap()
});

static ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(id|defaultMessage|description)\s*=\s*(?:"([^"]*)"|'([^']*)'|\{\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)"|`((?:[^`\\]|\\.)*)`)\s*\})"#,
    )
    .unwrap()
});

/// A label found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub id: String,
    /// `None` when the call has no literal `defaultMessage`.
    pub message: Option<String>,
    pub description: Option<String>,
    /// 1-based line of the call.
    pub line: usize,
}

/// Whether `content` uses any i18n label call, literal or not.
pub fn contains_labels(content: &str) -> bool {
    LABEL_REGEX.is_match(content)
}

/// Extract all labels with a literal id, in source order.
pub fn extract_labels(content: &str) -> Vec<Label> {
    let line_index = build_line_index(content);
    let mut labels: Vec<(usize, Label)> = Vec::new();

    for caps in TRANSLATE_REGEX.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(id) = first_group(&caps, 1..=3) else {
            continue;
        };
        // The match ends on the options object's opening brace.
        let open = whole.end() - 1;
        let Some(body) = balanced(content, open, '{', '}') else {
            continue;
        };
        let props = properties(body);
        labels.push((
            whole.start(),
            Label {
                id: unescape(id),
                message: props.default_message,
                description: props.description,
                line: offset_to_line(&line_index, whole.start()),
            },
        ));
    }

    for m in FORMAT_MESSAGE_REGEX.find_iter(content) {
        let open = m.end() - 1;
        let Some(body) = balanced(content, open, '{', '}') else {
            continue;
        };
        let props = properties(body);
        if let Some(id) = props.id {
            labels.push((
                m.start(),
                Label {
                    id,
                    message: props.default_message,
                    description: props.description,
                    line: offset_to_line(&line_index, m.start()),
                },
            ));
        }
    }

    for m in FORMATTED_MESSAGE_REGEX.find_iter(content) {
        let Some(tag) = tag_body(content, m.end()) else {
            continue;
        };
        let props = attributes(tag);
        if let Some(id) = props.id {
            labels.push((
                m.start(),
                Label {
                    id,
                    message: props.default_message,
                    description: props.description,
                    line: offset_to_line(&line_index, m.start()),
                },
            ));
        }
    }

    labels.sort_by_key(|(offset, _)| *offset);
    labels.into_iter().map(|(_, label)| label).collect()
}

#[derive(Default)]
struct Properties {
    id: Option<String>,
    default_message: Option<String>,
    description: Option<String>,
}

impl Properties {
    fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "id" => &mut self.id,
            "defaultMessage" => &mut self.default_message,
            _ => &mut self.description,
        };
        // Nested objects (e.g. `values`) come later; the first hit wins.
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

fn first_group<'a>(
    caps: &regex::Captures<'a>,
    groups: std::ops::RangeInclusive<usize>,
) -> Option<&'a str> {
    groups
        .filter_map(|i| caps.get(i))
        .map(|m| m.as_str())
        .next()
}

fn properties(body: &str) -> Properties {
    let mut props = Properties::default();
    for caps in PROPERTY_REGEX.captures_iter(body) {
        if let (Some(name), Some(value)) = (caps.get(1), first_group(&caps, 2..=4)) {
            props.set(name.as_str(), unescape(value));
        }
    }
    props
}

fn attributes(tag: &str) -> Properties {
    let mut props = Properties::default();
    for caps in ATTRIBUTE_REGEX.captures_iter(tag) {
        let Some(name) = caps.get(1) else { continue };
        if let Some(value) = first_group(&caps, 2..=3) {
            props.set(name.as_str(), value.to_string());
        } else if let Some(value) = first_group(&caps, 4..=6) {
            props.set(name.as_str(), unescape(value));
        }
    }
    props
}

/// Slice between the bracket at `open` and its matching close, skipping
/// string literals.
fn balanced(content: &str, open: usize, open_char: char, close_char: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in content[open..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            c if c == open_char => depth += 1,
            c if c == close_char => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&content[open + 1..open + i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Attribute text of a JSX opening tag starting at `start`, up to its `>`.
fn tag_body(content: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, c) in content[start..].char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' if depth == 0 => quote = Some(c),
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '>' if depth == 0 => return Some(&content[start..start + i]),
            _ => {}
        }
    }
    None
}

fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn label(id: &str, message: &str, line: usize) -> Label {
        Label {
            id: id.to_string(),
            message: Some(message.to_string()),
            description: None,
            line,
        }
    }

    #[test]
    fn test_translate_call() {
        let content = r#"import { i18n } from '@kbn/i18n';

const title = i18n.translate('common.ui.title', {
  defaultMessage: 'Hello {name}',
  description: 'Page title',
  values: { name },
});
"#;
        assert_eq!(
            extract_labels(content),
            vec![Label {
                id: "common.ui.title".to_string(),
                message: Some("Hello {name}".to_string()),
                description: Some("Page title".to_string()),
                line: 3,
            }]
        );
    }

    #[test]
    fn test_translate_with_double_quotes_and_escapes() {
        let content = r#"i18n.translate("a.b", { defaultMessage: "It\"s \"quoted\"" })"#;
        assert_eq!(
            extract_labels(content),
            vec![label("a.b", "It\"s \"quoted\"", 1)]
        );
    }

    #[test]
    fn test_translate_without_default_message() {
        let content = "i18n.translate('a.b', { values: {} })";
        let labels = extract_labels(content);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].message, None);
    }

    #[test]
    fn test_brace_inside_string_does_not_end_options() {
        let content = "i18n.translate('a.b', { description: 'a } b', defaultMessage: 'Text' })";
        assert_eq!(extract_labels(content)[0].message.as_deref(), Some("Text"));
    }

    #[test]
    fn test_format_message_call() {
        let content = "const s = intl.formatMessage({ id: 'x.save', defaultMessage: 'Save' });";
        assert_eq!(extract_labels(content), vec![label("x.save", "Save", 1)]);
    }

    #[test]
    fn test_formatted_message_component() {
        let content = r#"
export const Header = () => (
  <FormattedMessage
    id="x.header"
    defaultMessage="Welcome, {user}"
    values={{ user: <b>{name}</b> }}
  />
);
"#;
        assert_eq!(
            extract_labels(content),
            vec![label("x.header", "Welcome, {user}", 3)]
        );
    }

    #[test]
    fn test_formatted_message_expression_attributes() {
        let content = r#"<FormattedMessage id={'x.y'} defaultMessage={`Multi
line`} />"#;
        assert_eq!(extract_labels(content), vec![label("x.y", "Multi\nline", 1)]);
    }

    #[test]
    fn test_labels_are_in_source_order() {
        let content = r#"<FormattedMessage id="b.first" defaultMessage="One" />
i18n.translate('a.second', { defaultMessage: 'Two' });
"#;
        let ids: Vec<String> = extract_labels(content).into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["b.first", "a.second"]);
    }

    #[test]
    fn test_contains_labels() {
        assert!(contains_labels("i18n.translate(id, { defaultMessage: 'x' })"));
        assert!(contains_labels("<FormattedMessage {...props} />"));
        assert!(!contains_labels("const translate = () => null;"));
    }
}
