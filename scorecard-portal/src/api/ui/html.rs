//! Shared HTML helpers: escaping, formatting and the page shell

use crate::api::buildinfo::BuildInfo;

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Score with at most two decimals and no trailing zeros (93.75, 50)
pub fn format_score(score: f64) -> String {
    let fixed = format!("{:.2}", score);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Form-encode query pairs, leading `?` included when non-empty
pub fn query_suffix(pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    match serde_urlencoded::to_string(pairs) {
        Ok(encoded) => format!("?{}", encoded),
        Err(_) => String::new(),
    }
}

/// Horizontal bar filled to `fraction` (clamped to 0–1)
pub fn progress_bar(fraction: f64, color: &str) -> String {
    let pct = (fraction.clamp(0.0, 1.0) * 100.0).round();
    format!(
        r#"<div class="bar"><div class="bar-fill" style="width:{}%;background:{};"></div></div>"#,
        pct,
        escape_html(color)
    )
}

/// Wrap page content in the common document shell
pub fn page(title: &str, body: &str) -> String {
    let build = BuildInfo::current();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
{body}
<footer>scorecard-portal v{version} [{git_hash}] built {timestamp} ({profile})</footer>
</body>
</html>
"#,
        title = escape_html(title),
        css = STYLES,
        body = body,
        version = escape_html(&build.version),
        git_hash = escape_html(&build.git_hash),
        timestamp = escape_html(&build.build_timestamp),
        profile = escape_html(&build.build_profile),
    )
}

const STYLES: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background: #f1f5f9; color: #0f172a; line-height: 1.5; }
header { background: #ffffff; border-bottom: 1px solid #e2e8f0; padding: 20px 30px; }
h1 { font-size: 2.2rem; font-weight: 800; }
h3 { margin-bottom: 0.5rem; }
.subtitle { color: #475569; font-size: 1.1rem; }
.layout { display: flex; gap: 30px; padding: 20px 30px; }
aside { width: 280px; flex-shrink: 0; background: #ffffff; border-radius: 1rem; padding: 1.2rem; height: fit-content; }
aside label { display: block; margin: 0.3rem 0; }
aside fieldset { border: none; margin: 0.8rem 0; }
aside legend { font-weight: 600; }
aside input[type=text], aside input[type=number] { width: 100%; padding: 4px 6px; }
main { flex: 1; min-width: 0; }
.banner { background: #fee2e2; color: #991b1b; padding: 0.8rem 1rem; border-radius: 0.6rem; margin-bottom: 1rem; }
.empty { background: #fef9c3; color: #854d0e; padding: 0.8rem 1rem; border-radius: 0.6rem; }
.metrics { display: flex; gap: 20px; margin-bottom: 1.5rem; }
.metric { flex: 1; background: #ffffff; border-radius: 1rem; padding: 1rem 1.2rem; }
.metric .label { color: #64748b; font-size: 0.9rem; }
.metric .value { font-size: 1.8rem; font-weight: 700; }
.cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 16px; }
.card { background: #f8fafc; border: 1px solid #e2e8f0; padding: 1.2rem; border-radius: 1rem; box-shadow: 0 2px 8px rgba(0,0,0,0.04); }
.card h4 { margin-bottom: 0.3rem; }
.meta { color: #475569; font-size: 0.95rem; }
.chip { display: inline-block; padding: 0.2em 0.9em; border-radius: 1em; color: #fff; font-weight: 600; margin: 0.4em 0; }
.bar { background: #e2e8f0; border-radius: 6px; height: 10px; margin: 0.3rem 0 0.6rem 0; overflow: hidden; }
.bar-fill { height: 100%; }
.links a { margin-right: 0.8rem; }
.trends { display: flex; gap: 30px; margin-top: 2rem; }
.trend { flex: 1; background: #ffffff; border-radius: 1rem; padding: 1rem 1.2rem; }
.about { margin-top: 2rem; background: #ffffff; border-radius: 1rem; padding: 1rem 1.2rem; color: #334155; }
.row-label { font-size: 0.9rem; color: #334155; }
.detail { background: #f8fafc; padding: 1.5rem; border-radius: 1rem; box-shadow: 0 2px 8px rgba(0,0,0,0.04); max-width: 900px; margin: 20px 30px; }
.note { margin-bottom: 0.3rem; }
footer { color: #94a3b8; font-family: 'Courier New', monospace; font-size: 0.8rem; padding: 20px 30px; }
"#;
