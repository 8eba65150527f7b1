//! Tunable values
//!
//! A value is the first line of a tunable, trimmed. Some tunables hold
//! several whitespace separated tokens, such as the min/default/max triple in
//! `net.ipv4.tcp_rmem`. These are kept as one string, nothing here knows or
//! cares how many tokens a tunable is supposed to have.
use crate::error::MultiValueError;
use bitflags::bitflags;

/// Format `value` to be written.
///
/// Only surrounding whitespace is removed, the kernel decides what is
/// acceptable.
pub fn format_for_write(value: &str) -> String {
    value.trim().to_owned()
}

/// Format raw tunable contents for display.
///
/// Only the first line is used.
pub fn format_for_read(raw: &str) -> String {
    raw.lines().next().unwrap_or_default().trim().to_owned()
}

/// Iterator over the whitespace separated tokens in `value`
pub fn tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split_whitespace()
}

bitflags! {
    /// Presentation style shared by every field of a [`MultiValue`]
    pub struct FieldStyle: u32 {
        /// Submitting a field applies the value
        const PROCESS_ENTER = 1;

        /// Fields can't be edited
        const READ_ONLY = 1 << 1;
    }
}

/// A value split into one editable field per token.
///
/// [`MultiValue::get`] joins the fields back into a single value,
/// [`MultiValue::set`] distributes a value over the fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiValue {
    fields: Vec<String>,
    style: FieldStyle,
}

impl MultiValue {
    /// Create a new value with `number` fields, holding `value`.
    ///
    /// - With neither, there is one empty field.
    /// - With only `number`, there are `number` empty fields.
    /// - With only `value`, there is one field per token.
    ///
    /// # Errors
    ///
    /// - If both are given and `value` doesn't have `number` tokens.
    pub fn new(number: Option<usize>, value: Option<&str>) -> Result<Self, MultiValueError> {
        let fields = match (number, value) {
            (number, None) => vec![String::new(); number.unwrap_or(1)],
            (number, Some(value)) => {
                let fields: Vec<String> = tokens(value).map(Into::into).collect();
                match number {
                    Some(expected) if expected != fields.len() => {
                        return Err(MultiValueError::CountMismatch {
                            expected,
                            actual: fields.len(),
                        })
                    }
                    _ => fields,
                }
            }
        };
        Ok(Self {
            fields,
            style: FieldStyle::empty(),
        })
    }

    /// All fields joined with tabs
    pub fn get(&self) -> String {
        self.fields.join("\t")
    }

    /// Distribute the tokens of `value` over the fields, in order.
    ///
    /// Extra tokens are dropped, and fields without a token are left alone.
    pub fn set(&mut self, value: &str) {
        for (field, token) in self.fields.iter_mut().zip(tokens(value)) {
            field.clear();
            field.push_str(token);
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn style(&self) -> FieldStyle {
        self.style
    }

    /// Replace the style of every field
    pub fn set_style(&mut self, style: FieldStyle) {
        self.style = style;
    }

    /// Toggle `style` on every field
    pub fn toggle_style(&mut self, style: FieldStyle) {
        self.style.toggle(style);
    }
}
