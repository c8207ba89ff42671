//! Argument interpolation for resolved translations

use crate::error::{I18nError, I18nResult};
use fluent::{FluentArgs, FluentBundle, FluentResource};
use tracing::debug;
use unic_langid::LanguageIdentifier;

/// Message id the template is compiled under
const MESSAGE_ID: &str = "polyglot-value";

/// Interpolates arguments into a translation template
pub trait Formatter: Send + Sync {
    /// Render `template` for `locale`; callers fall back to the raw template on error
    fn format(&self, locale: &str, template: &str, args: Option<&FluentArgs<'_>>)
        -> I18nResult<String>;
}

/// Formats templates written as Fluent patterns, e.g. `Welcome, { $name }!`
#[derive(Debug, Default, Clone, Copy)]
pub struct FluentFormatter;

impl FluentFormatter {
    /// Create a new formatter
    pub const fn new() -> Self {
        Self
    }

    /// Parse a locale, using the undetermined language when it is not a valid identifier
    pub fn language_identifier(locale: &str) -> LanguageIdentifier {
        locale.parse().unwrap_or_else(|_| {
            debug!("Locale '{}' is not a valid language identifier", locale);
            LanguageIdentifier::default()
        })
    }

    /// Wrap the template in a single-message Fluent resource.
    ///
    /// Fluent treats line breaks in text as syntax and dedents continuation
    /// lines, so every line break outside a placeable is written as a string
    /// literal and the text stays on the first line. Line breaks inside
    /// placeables separate select variants and are kept, indented.
    fn message_source(body: &str) -> String {
        let mut source = String::with_capacity(body.len() + MESSAGE_ID.len() + 16);
        source.push_str(MESSAGE_ID);
        source.push_str(" = ");

        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        for ch in body.chars() {
            if depth == 0 {
                match ch {
                    '\n' => source.push_str(r#"{"\u000A"}"#),
                    '\r' => source.push_str(r#"{"\u000D"}"#),
                    '{' => {
                        depth = 1;
                        source.push(ch);
                    }
                    _ => source.push(ch),
                }
                continue;
            }

            match ch {
                '\n' => {
                    in_string = false;
                    escaped = false;
                    source.push_str("\n    ");
                    continue;
                }
                '\r' => continue,
                _ if in_string => {
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == '"' {
                        in_string = false;
                    }
                }
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            source.push(ch);
        }
        source.push('\n');
        source
    }

    /// Split `template` into leading whitespace, body, and trailing whitespace
    fn split_padding(template: &str) -> (&str, &str, &str) {
        let start = template.len() - template.trim_start().len();
        let end = template.trim_end().len().max(start);
        (&template[..start], &template[start..end], &template[end..])
    }
}

impl Formatter for FluentFormatter {
    fn format(
        &self,
        locale: &str,
        template: &str,
        args: Option<&FluentArgs<'_>>,
    ) -> I18nResult<String> {
        if !template.contains('{') {
            return Ok(template.to_string());
        }

        let (leading, body, trailing) = Self::split_padding(template);
        let resource = FluentResource::try_new(Self::message_source(body)).map_err(
            |(_, errors)| I18nError::FormatError {
                message: format!("{errors:?}"),
            },
        )?;

        let mut bundle = FluentBundle::new(vec![Self::language_identifier(locale)]);
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| I18nError::FormatError {
                message: format!("{errors:?}"),
            })?;

        let pattern = bundle
            .get_message(MESSAGE_ID)
            .and_then(|message| message.value())
            .ok_or_else(|| I18nError::FormatError {
                message: "template has no value".to_string(),
            })?;

        let mut errors = Vec::new();
        let formatted = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            return Err(I18nError::FormatError {
                message: format!("{errors:?}"),
            });
        }

        Ok(format!("{leading}{formatted}{trailing}"))
    }
}

/// Macro to create `Option<FluentArgs>` more easily
#[macro_export]
macro_rules! fluent_args {
    () => {
        None
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::FluentArgs::new();
        $(
            args.set($key, $value);
        )+
        Some(args)
    }};
}
