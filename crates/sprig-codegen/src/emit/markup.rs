//! Tag rendering shared by the markup targets.

use super::indent;

/// Element syntax for HTML-like output, plain or JSX.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Markup {
    pub jsx: bool,
}

impl Markup {
    /// Attribute name for CSS classes.
    pub fn class_attribute(&self) -> &'static str {
        if self.jsx {
            "className"
        } else {
            "class"
        }
    }

    fn open_tag(&self, tag: &str, attributes: &str, name: Option<&str>) -> String {
        let mut open = format!("<{tag}");
        if !attributes.is_empty() {
            open.push(' ');
            open.push_str(attributes);
        }
        if let Some(name) = name {
            open.push_str(&format!(r#" data-layer="{}""#, escape_attribute(name)));
        }
        open
    }

    /// A container with child fragments. Childless elements self-close in
    /// JSX and get an explicit end tag otherwise.
    pub fn element(
        &self,
        tag: &str,
        attributes: &str,
        name: Option<&str>,
        children: &[String],
    ) -> String {
        let open = self.open_tag(tag, attributes, name);
        if children.is_empty() {
            if self.jsx {
                format!("\n{open} />")
            } else {
                format!("\n{open}></{tag}>")
            }
        } else {
            let inner: String = children.iter().map(|c| indent(c)).collect();
            format!("\n{open}>{inner}\n</{tag}>")
        }
    }

    pub fn image(&self, attributes: &str, name: Option<&str>, src: &str) -> String {
        let open = self.open_tag("img", attributes, name);
        format!("\n{open} src=\"{}\" />", escape_attribute(src))
    }

    /// A text element whose content is inline on one line.
    pub fn text(&self, attributes: &str, name: Option<&str>, content: &str) -> String {
        let open = self.open_tag("div", attributes, name);
        format!("\n{open}>{content}</div>")
    }

    pub fn span(&self, attributes: &str, content: &str) -> String {
        let open = self.open_tag("span", attributes, None);
        format!("{open}>{content}</span>")
    }

    /// Escape text content. Line breaks become `<br/>`, and quotes are escaped
    /// so text can never read as an attribute.
    pub fn escape_text(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '{' if self.jsx => out.push_str("&#123;"),
                '}' if self.jsx => out.push_str("&#125;"),
                '\n' => out.push_str("<br/>"),
                _ => out.push(ch),
            }
        }
        out
    }
}

pub(crate) fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_closing_only_in_jsx() {
        let html = Markup { jsx: false };
        let jsx = Markup { jsx: true };
        assert_eq!(html.element("div", "", None, &[]), "\n<div></div>");
        assert_eq!(jsx.element("div", "", None, &[]), "\n<div />");
    }

    #[test]
    fn test_children_are_indented() {
        let html = Markup { jsx: false };
        let out = html.element("div", r#"class="a""#, Some("Card"), &["\n<p></p>".to_string()]);
        assert_eq!(out, "\n<div class=\"a\" data-layer=\"Card\">\n  <p></p>\n</div>");
    }

    #[test]
    fn test_escape_text() {
        let jsx = Markup { jsx: true };
        assert_eq!(jsx.escape_text("a<b>{c}\nd"), "a&lt;b&gt;&#123;c&#125;<br/>d");
    }

    #[test]
    fn test_escape_text_quotes() {
        let html = Markup { jsx: false };
        assert_eq!(
            html.escape_text(r#"Set class="primary" here"#),
            "Set class=&quot;primary&quot; here"
        );
    }
}
