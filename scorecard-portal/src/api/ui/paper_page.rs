//! Full scorecard page for a single paper

use scorecard_common::model::RATING_MAX;
use scorecard_common::{Category, PaperRecord};
use std::fmt::Write;

use super::html::{escape_html, format_score, page, progress_bar, query_suffix};

/// Render one paper's full scorecard
///
/// `back_pairs` are the portal filters to restore on the back link.
pub fn render(record: &PaperRecord, back_pairs: &[(String, String)]) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        r#"<div class="detail">
<p><a href="/{back}">← Back to papers</a></p>
<h3>{title}</h3>
<div class="meta"><b>Paper ID:</b> {id}</div>
<div class="meta"><b>Conference:</b> {conference}</div>
<div class="meta"><b>Overall Score:</b> {score}/100</div>
<span class="chip" style="background:{color};">{status}</span>
{bar}
"#,
        back = escape_html(&query_suffix(back_pairs)),
        title = escape_html(&record.title),
        id = escape_html(&record.paper_id),
        conference = escape_html(&record.conference),
        score = format_score(record.normalized_score),
        color = record.status.color(),
        status = escape_html(record.status.label()),
        bar = progress_bar(record.normalized_score / 100.0, record.status.color()),
    );

    let mut links = Vec::new();
    if let Some(url) = &record.paper_url {
        links.push(format!(
            r#"<a href="{}" target="_blank" rel="noopener">View Paper</a>"#,
            escape_html(url)
        ));
    }
    if let Some(url) = &record.repo_url {
        links.push(format!(
            r#"<a href="{}" target="_blank" rel="noopener">View Code</a>"#,
            escape_html(url)
        ));
    }
    if !links.is_empty() {
        let _ = writeln!(body, r#"<div class="links">{}</div>"#, links.join(" | "));
    }

    body.push_str("<hr style=\"margin:1rem 0;\">\n<b>Score Breakdown by Category:</b>\n");
    for category in Category::ALL {
        let rating = record.rubric.get(category);
        let fraction = f64::from(rating) / f64::from(RATING_MAX);
        let _ = writeln!(
            body,
            r#"<div class="note"><b>{}:</b> {}/{} <span style="color:#6366f1;font-weight:600;">({:.0}%)</span></div>{}"#,
            escape_html(category.label()),
            rating,
            RATING_MAX,
            fraction * 100.0,
            progress_bar(fraction, "#6366f1")
        );
    }

    body.push_str("<b>Detailed Notes:</b>\n");
    let mut found_notes = false;
    if !record.notes.is_empty() {
        let _ = writeln!(
            body,
            r#"<div class="note"><b>Notes:</b> <span style="color:#334155;">{}</span></div>"#,
            escape_html(&record.notes)
        );
        found_notes = true;
    }
    for criterion in &record.criteria {
        let score = criterion
            .score
            .map(|s| format!(" (score {})", s))
            .unwrap_or_default();
        let _ = writeln!(
            body,
            r#"<div class="note"><b>{}{}:</b> <span style="color:#334155;">{}</span></div>"#,
            escape_html(&criterion.name),
            score,
            escape_html(&criterion.notes)
        );
        found_notes = true;
    }
    if !found_notes {
        body.push_str(r#"<div class="empty">No detailed notes available for this paper.</div>"#);
        body.push('\n');
    }
    body.push_str("</div>\n");

    page(&format!("{} - Scorecard", record.title), &body)
}

/// Page shown for an unknown paper id
pub fn render_not_found(paper_id: &str) -> String {
    let body = format!(
        r#"<div class="detail">
<p><a href="/">← Back to papers</a></p>
<div class="empty">No paper with ID "{}" was found.</div>
</div>
"#,
        escape_html(paper_id)
    );
    page("Paper not found", &body)
}
