//! Standalone HTML page export. No network, no credential.

use chrono::NaiveDate;

use crate::domains::publishing::models::HtmlExport;

const MAX_FILENAME_CHARS: usize = 100;

const STYLE: &str = r#"        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            color: #333;
        }
        h1 {
            color: #2c3e50;
            border-bottom: 2px solid #3498db;
            padding-bottom: 10px;
        }
        .content { margin-top: 30px; }
        .content p { margin-bottom: 1em; }
        .generated-info {
            margin-top: 40px;
            padding: 15px;
            background-color: #f8f9fa;
            border-left: 4px solid #3498db;
            font-size: 0.9em;
            color: #666;
        }"#;

/// Escape text for element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// One output element per input line.
fn format_line(line: &str) -> String {
    if let Some(rest) = line.strip_prefix("## ") {
        format!("<h2>{}</h2>", escape_html(rest))
    } else if let Some(rest) = line.strip_prefix("### ") {
        format!("<h3>{}</h3>", escape_html(rest))
    } else if let Some(rest) = line.strip_prefix("- ") {
        format!("<li>{}</li>", escape_html(rest))
    } else if line.trim().is_empty() {
        "<br>".to_string()
    } else {
        format!("<p>{}</p>", escape_html(line))
    }
}

pub fn format_content(content: &str) -> String {
    content
        .lines()
        .map(format_line)
        .collect::<Vec<_>>()
        .join("\n        ")
}

/// Filesystem-safe name: reserved characters and whitespace runs become `_`.
pub fn sanitize_filename(title: &str) -> String {
    let mut name = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => name.push('_'),
            _ => name.push(c),
        }
    }

    name.chars().take(MAX_FILENAME_CHARS).collect()
}

/// Full document plus a `<title>.html` download name.
pub fn render_page(title: &str, content: &str, generated_on: NaiveDate) -> HtmlExport {
    let title_html = escape_html(title);
    let html = format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title_html}</title>
    <style>
{STYLE}
    </style>
</head>
<body>
    <h1>{title_html}</h1>
    <div class="content">
        {body}
    </div>
    <div class="generated-info">
        <p>Generated on {date}.</p>
    </div>
</body>
</html>
"#,
        body = format_content(content),
        date = generated_on.format("%Y-%m-%d"),
    );

    HtmlExport {
        filename: format!("{}.html", sanitize_filename(title)),
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn lines_map_to_elements() {
        let body = format_content("## Section\n### Sub\n- item\n\nplain <b>text</b>");
        let lines: Vec<&str> = body.split("\n        ").collect();

        assert_eq!(
            lines,
            vec![
                "<h2>Section</h2>",
                "<h3>Sub</h3>",
                "<li>item</li>",
                "<br>",
                "<p>plain &lt;b&gt;text&lt;/b&gt;</p>",
            ]
        );
    }

    #[test]
    fn title_is_escaped_everywhere() {
        let export = render_page("A & B <script>", "body", date());
        assert!(export.html.contains("<title>A &amp; B &lt;script&gt;</title>"));
        assert!(export.html.contains("<h1>A &amp; B &lt;script&gt;</h1>"));
        assert!(!export.html.contains("<script>"));
    }

    #[test]
    fn footer_carries_generation_date() {
        let export = render_page("t", "body", date());
        assert!(export.html.contains("Generated on 2024-03-09."));
    }

    #[test]
    fn filename_replaces_reserved_characters_and_whitespace() {
        assert_eq!(sanitize_filename("a/b:c*d?  e"), "a_b_c_d__e");
        assert_eq!(sanitize_filename("my   great\tpost"), "my_great_post");
        assert_eq!(render_page("Q3: report", "x", date()).filename, "Q3__report.html");
    }

    #[test]
    fn filename_is_capped() {
        let long = "あ".repeat(150);
        assert_eq!(sanitize_filename(&long).chars().count(), 100);
    }
}
