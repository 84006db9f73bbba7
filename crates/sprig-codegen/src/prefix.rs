//! User class prefix, applied to generated markup as text.

use regex::{Captures, Regex};

use crate::error::Result;

/// Prefix every class in `class="…"` and `className="…"` attributes.
///
/// This is a textual substitution: other attributes and text content are
/// left alone, and a missing or blank prefix returns the input unchanged.
pub fn apply_prefix_to_classes(code: &str, prefix: Option<&str>) -> Result<String> {
    let prefix = match prefix {
        Some(p) if !p.trim().is_empty() => p.trim(),
        _ => return Ok(code.to_string()),
    };

    let pattern = Regex::new(r#"(^|\s)(class(?:Name)?)="([^"]*)""#)?;
    let prefixed = pattern.replace_all(code, |caps: &Captures<'_>| {
        let classes: Vec<String> = caps[3]
            .split_whitespace()
            .map(|class| match class.strip_prefix('-') {
                // Negative utilities keep the minus in front.
                Some(rest) => format!("-{prefix}{rest}"),
                None => format!("{prefix}{class}"),
            })
            .collect();
        format!(r#"{}{}="{}""#, &caps[1], &caps[2], classes.join(" "))
    });
    Ok(prefixed.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_prefixes_class_and_class_name() {
        let code = r#"<div class="a b"><span className="flex -left-2"></span></div>"#;
        assert_eq!(
            apply_prefix_to_classes(code, Some("tw-")).unwrap(),
            r#"<div class="tw-a tw-b"><span className="tw-flex -tw-left-2"></span></div>"#
        );
    }

    #[test]
    fn test_other_attributes_untouched() {
        let code = r#"<div data-class="a" style="b" class="c">class="d"</div>"#;
        assert_eq!(
            apply_prefix_to_classes(code, Some("tw-")).unwrap(),
            r#"<div data-class="a" style="b" class="tw-c">class="d"</div>"#
        );
    }

    #[test]
    fn test_blank_prefix_is_identity() {
        let code = r#"<div class="a"></div>"#;
        assert_eq!(apply_prefix_to_classes(code, None).unwrap(), code);
        assert_eq!(apply_prefix_to_classes(code, Some("")).unwrap(), code);
        assert_eq!(apply_prefix_to_classes(code, Some("  ")).unwrap(), code);
    }

    proptest! {
        #[test]
        fn prop_no_prefix_round_trips(code in ".*") {
            prop_assert_eq!(apply_prefix_to_classes(&code, None).unwrap(), code);
        }

        #[test]
        fn prop_every_class_is_prefixed(classes in prop::collection::vec("[a-z][a-z0-9]{0,6}", 1..5)) {
            let code = format!(r#"<div class="{}"></div>"#, classes.join(" "));
            let out = apply_prefix_to_classes(&code, Some("x-")).unwrap();
            let expected: Vec<String> = classes.iter().map(|c| format!("x-{c}")).collect();
            prop_assert_eq!(out, format!(r#"<div class="{}"></div>"#, expected.join(" ")));
        }
    }
}
