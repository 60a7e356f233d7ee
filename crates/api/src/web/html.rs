//! HTML building blocks shared by the page handlers.
//!
//! Pages are assembled with `format!`. Every value that did not come from a
//! literal in this crate goes through [`escape`] first.

use std::collections::{BTreeMap, HashMap};

/// Escape text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap page content in the shared document shell.
pub fn layout(title: &str, content: &str) -> String {
    let title = escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Tracklist</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 0;
            background: #f6f7f9;
            color: #1d2330;
        }}
        header {{
            background: #1d2330;
            color: #fff;
            padding: 12px 24px;
        }}
        header a {{
            color: #fff;
            margin-right: 16px;
            text-decoration: none;
        }}
        main {{
            max-width: 1200px;
            margin: 0 auto;
            padding: 24px;
        }}
        table {{
            border-collapse: collapse;
            width: 100%;
            background: #fff;
        }}
        th, td {{
            border-bottom: 1px solid #e1e4ea;
            padding: 6px 8px;
            text-align: left;
        }}
        .layout {{
            display: grid;
            grid-template-columns: 1fr 280px;
            gap: 24px;
        }}
        .card {{
            background: #fff;
            border: 1px solid #e1e4ea;
            border-radius: 6px;
            padding: 12px 16px;
            margin-bottom: 16px;
        }}
        .filters label {{
            display: inline-block;
            margin: 0 12px 8px 0;
        }}
        .errorlist {{
            color: #b42318;
            margin: 4px 0;
            padding-left: 18px;
        }}
        .pagination a, .pagination span {{
            margin-right: 12px;
        }}
    </style>
</head>
<body>
    <header>
        <a href="/">Home</a>
        <a href="/tracks/">Tracks</a>
        <a href="/tracks/new/">New track</a>
    </header>
    <main>
        <h1>{title}</h1>
{content}
    </main>
</body>
</html>
"#
    )
}

/// `<option>` elements with a leading "any" entry; `selected` marks a match.
pub fn options<'a>(values: impl IntoIterator<Item = &'a str>, selected: Option<&str>) -> String {
    let mut out = String::from(r#"<option value="">Any</option>"#);
    for value in values {
        let mark = if selected == Some(value) { " selected" } else { "" };
        let value = escape(value);
        out.push_str(&format!(r#"<option value="{value}"{mark}>{value}</option>"#));
    }
    out
}

/// Re-encode the current query parameters minus `page`, keys sorted.
///
/// The result is appended to pagination links so filters survive paging.
pub fn carry_querystring(params: &HashMap<String, String>) -> String {
    let kept: BTreeMap<&str, &str> = params
        .iter()
        .filter(|(key, _)| key.as_str() != "page")
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    serde_urlencoded::to_string(&kept).unwrap_or_default()
}

/// Average with one decimal, or `n/a` when there is nothing to average.
pub fn format_avg(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn options_mark_the_selected_value() {
        let html = options(["album", "single"], Some("single"));
        assert!(html.starts_with(r#"<option value="">Any</option>"#));
        assert!(html.contains(r#"<option value="album">album</option>"#));
        assert!(html.contains(r#"<option value="single" selected>single</option>"#));
    }

    #[test]
    fn options_escape_values() {
        let html = options(["<b>"], None);
        assert!(html.contains(r#"<option value="&lt;b&gt;">&lt;b&gt;</option>"#));
    }

    #[test]
    fn querystring_drops_page_and_sorts_keys() {
        let params: HashMap<String, String> = [
            ("page", "3"),
            ("q", "hello world"),
            ("album_type", "single"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(carry_querystring(&params), "album_type=single&q=hello+world");
    }

    #[test]
    fn averages_format_to_one_decimal() {
        assert_eq!(format_avg(Some(71.26)), "71.3");
        assert_eq!(format_avg(Some(80.0)), "80.0");
        assert_eq!(format_avg(None), "n/a");
    }
}
