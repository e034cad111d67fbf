//! Portal page - filter sidebar, metrics, paper cards and trends

use scorecard_common::filter::{
    self, FilterCriteria, KEY_CONFERENCE, KEY_MAX, KEY_MIN, KEY_SEARCH, KEY_STATUS,
};
use scorecard_common::summary::{self, HistogramBin, Metrics, StatusCount};
use scorecard_common::{PaperRecord, Status};
use std::fmt::Write;

use super::html::{escape_html, format_score, page, progress_bar, query_suffix};

/// Query key that expands the paper list past the preview
pub const KEY_SHOW_ALL: &str = "all";

/// Project description closing the page
const ABOUT: &str = r#"<section class="about">
<h3>About</h3>
<p>This portal compares how reproducible the research artifacts of ICSE 2023 and SC24 papers on large language models for code understanding are. Each paper was scored on code and environment, documentation, data and model reuse, and community engagement.</p>
<b>Goals:</b>
<ul>
<li>Reproduce the results of each selected paper.</li>
<li>Score each paper on reproducibility factors.</li>
<li>Publish a comparative scorecard for all papers.</li>
</ul>
</section>
"#;

/// Everything the portal page shows for one request
pub struct PortalView<'a> {
    pub criteria: &'a FilterCriteria,
    pub matching: &'a [&'a PaperRecord],
    pub metrics: Metrics,
    pub status_options: Vec<Status>,
    pub conference_options: Vec<String>,
    pub histogram: Vec<HistogramBin>,
    pub breakdown: Vec<StatusCount>,
    pub load_error: Option<&'a str>,
    pub preview_count: usize,
    pub show_all: bool,
}

impl<'a> PortalView<'a> {
    /// Assemble the view from the whole dataset and the filtered subset
    pub fn build(
        records: &'a [PaperRecord],
        criteria: &'a FilterCriteria,
        matching: &'a [&'a PaperRecord],
        load_error: Option<&'a str>,
        preview_count: usize,
        show_all: bool,
    ) -> Self {
        let mut status_options = filter::distinct_statuses(records);
        if status_options.is_empty() {
            status_options = Status::ALL.to_vec();
        }

        Self {
            criteria,
            matching,
            metrics: summary::metrics(matching, records.len()),
            status_options,
            conference_options: filter::distinct_conferences(records),
            histogram: summary::score_histogram(records),
            breakdown: summary::status_breakdown(records),
            load_error,
            preview_count,
            show_all,
        }
    }
}

/// Render the full portal page
pub fn render(view: &PortalView<'_>) -> String {
    let mut body = String::new();

    body.push_str(
        r#"<header>
    <h1>🧪 Reproducibility Scorecard Portal</h1>
    <div class="subtitle">Explore how reproducible each paper's artifacts are. Use the filters on the left to narrow the list.</div>
</header>
<div class="layout">
"#,
    );
    body.push_str(&render_sidebar(view));
    body.push_str("<main>\n");

    if let Some(message) = view.load_error {
        let _ = writeln!(
            body,
            r#"<div class="banner">Could not load paper data: {}</div>"#,
            escape_html(message)
        );
    }

    body.push_str(&render_metrics(&view.metrics));
    body.push_str(&render_papers(view));
    body.push_str(&render_trends(&view.histogram, &view.breakdown));
    body.push_str(ABOUT);
    body.push_str("</main>\n</div>\n");

    page("Reproducibility Scorecard Portal", &body)
}

fn render_sidebar(view: &PortalView<'_>) -> String {
    let criteria = view.criteria;
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<aside>
<h3>Filter Papers</h3>
<form method="get" action="/">
<label>🔍 Search by Title or ID<input type="text" name="{q}" value="{search}"></label>
<label>Minimum Score<input type="number" name="{min}" min="0" max="100" step="any" value="{min_value}"></label>
<label>Maximum Score<input type="number" name="{max}" min="0" max="100" step="any" value="{max_value}"></label>
"#,
        q = KEY_SEARCH,
        search = escape_html(criteria.search.as_deref().unwrap_or("")),
        min = KEY_MIN,
        min_value = criteria.min_score.map(|v| v.to_string()).unwrap_or_default(),
        max = KEY_MAX,
        max_value = criteria.max_score.map(|v| v.to_string()).unwrap_or_default(),
    );

    let _ = writeln!(
        html,
        r#"<fieldset><legend>Filter by Status</legend><input type="hidden" name="{}" value="">"#,
        KEY_STATUS
    );
    for status in &view.status_options {
        let _ = writeln!(
            html,
            r#"<label><input type="checkbox" name="{}" value="{}"{}> {}</label>"#,
            KEY_STATUS,
            escape_html(status.label()),
            checked(criteria.allows_status(*status)),
            escape_html(status.label())
        );
    }
    html.push_str("</fieldset>\n");

    let _ = writeln!(
        html,
        r#"<fieldset><legend>Filter by Conference</legend><input type="hidden" name="{}" value="">"#,
        KEY_CONFERENCE
    );
    for conference in &view.conference_options {
        let _ = writeln!(
            html,
            r#"<label><input type="checkbox" name="{}" value="{}"{}> {}</label>"#,
            KEY_CONFERENCE,
            escape_html(conference),
            checked(criteria.allows_conference(conference)),
            escape_html(conference)
        );
    }
    html.push_str("</fieldset>\n");

    html.push_str(
        r#"<button type="submit">Apply</button> <a href="/">Reset</a>
</form>
</aside>
"#,
    );
    html
}

fn checked(on: bool) -> &'static str {
    if on {
        " checked"
    } else {
        ""
    }
}

fn render_metrics(metrics: &Metrics) -> String {
    let average = metrics
        .average_score
        .map(|avg| format!("{:.1}/100", avg))
        .unwrap_or_else(|| "–".to_string());

    format!(
        r#"<div class="metrics">
<div class="metric"><div class="label">Average Score</div><div class="value">{}</div></div>
<div class="metric"><div class="label">Highly Reproducible</div><div class="value">{}</div></div>
<div class="metric"><div class="label">Matching Papers</div><div class="value">{}</div></div>
<div class="metric"><div class="label">Total Papers</div><div class="value">{}</div></div>
</div>
"#,
        average, metrics.highly_reproducible, metrics.matching, metrics.total_papers
    )
}

fn render_papers(view: &PortalView<'_>) -> String {
    let mut html = String::from("<h3>Papers</h3>\n");

    if view.matching.is_empty() {
        html.push_str(r#"<div class="empty">No papers match the current filters.</div>"#);
        html.push('\n');
        return html;
    }

    let filter_pairs = view.criteria.to_query_pairs();
    let shown = if view.show_all {
        view.matching.len()
    } else {
        view.preview_count.min(view.matching.len())
    };

    html.push_str("<div class=\"cards\">\n");
    for record in &view.matching[..shown] {
        html.push_str(&render_card(record, &filter_pairs));
    }
    html.push_str("</div>\n");

    if view.matching.len() > view.preview_count {
        let mut pairs = filter_pairs.clone();
        let label = if view.show_all {
            "Show less".to_string()
        } else {
            pairs.push((KEY_SHOW_ALL.to_string(), "1".to_string()));
            format!("View all {} papers", view.matching.len())
        };
        let _ = writeln!(
            html,
            r#"<p><a href="/{}">{}</a></p>"#,
            escape_html(&query_suffix(&pairs)),
            label
        );
    }

    html
}

fn render_card(record: &PaperRecord, filter_pairs: &[(String, String)]) -> String {
    let mut detail_pairs = vec![("id".to_string(), record.paper_id.clone())];
    detail_pairs.extend_from_slice(filter_pairs);

    let mut links = format!(
        r#"<a href="/paper{}">Full scorecard</a>"#,
        escape_html(&query_suffix(&detail_pairs))
    );
    if let Some(url) = &record.paper_url {
        let _ = write!(
            links,
            r#"<a href="{}" target="_blank" rel="noopener">View Paper</a>"#,
            escape_html(url)
        );
    }
    if let Some(url) = &record.repo_url {
        let _ = write!(
            links,
            r#"<a href="{}" target="_blank" rel="noopener">View Code</a>"#,
            escape_html(url)
        );
    }

    format!(
        r#"<div class="card">
<h4>{title}</h4>
<div class="meta">Paper ID: {id} · Conference: {conference}</div>
<div class="meta">Overall Score: {score}/100</div>
<span class="chip" style="background:{color};">{status}</span>
{bar}
<div class="links">{links}</div>
</div>
"#,
        title = escape_html(&record.title),
        id = escape_html(&record.paper_id),
        conference = escape_html(&record.conference),
        score = format_score(record.normalized_score),
        color = record.status.color(),
        status = escape_html(record.status.label()),
        bar = progress_bar(record.normalized_score / 100.0, record.status.color()),
        links = links,
    )
}

fn render_trends(histogram: &[HistogramBin], breakdown: &[StatusCount]) -> String {
    let mut html = String::from(
        r#"<div class="trends">
<div class="trend"><h3>Distribution of Overall Scores</h3>
"#,
    );

    let max_bin = histogram.iter().map(|b| b.count).max().unwrap_or(0);
    for bin in histogram {
        let fraction = if max_bin == 0 {
            0.0
        } else {
            bin.count as f64 / max_bin as f64
        };
        let _ = writeln!(
            html,
            r#"<div class="row-label">{}–{}: {}</div>{}"#,
            format_score(bin.lower),
            format_score(bin.upper),
            bin.count,
            progress_bar(fraction, "#6366f1")
        );
    }
    html.push_str("</div>\n<div class=\"trend\"><h3>Breakdown by Status</h3>\n");

    let total: usize = breakdown.iter().map(|sc| sc.count).sum();
    if total == 0 {
        html.push_str(r#"<div class="row-label">No papers loaded.</div>"#);
        html.push('\n');
    }
    for sc in breakdown {
        let fraction = sc.count as f64 / total as f64;
        let _ = writeln!(
            html,
            r#"<div class="row-label">{}: {} ({:.0}%)</div>{}"#,
            escape_html(sc.status.label()),
            sc.count,
            fraction * 100.0,
            progress_bar(fraction, sc.status.color())
        );
    }
    html.push_str("</div>\n</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorecard_common::scoring::{normalized_score, status_from_score};
    use scorecard_common::RubricScores;

    fn record(id: &str, ratings: [u8; 4], repo_url: Option<&str>) -> PaperRecord {
        let rubric = RubricScores::new(ratings).unwrap();
        let score = normalized_score(&rubric);
        PaperRecord {
            paper_id: id.to_string(),
            title: id.replace('_', " "),
            rubric,
            normalized_score: score,
            status: status_from_score(score),
            conference: "ICSE 2023".to_string(),
            notes: String::new(),
            repo_url: repo_url.map(str::to_string),
            paper_url: None,
            criteria: Vec::new(),
        }
    }

    fn render_with(
        records: &[PaperRecord],
        criteria: &FilterCriteria,
        preview_count: usize,
        show_all: bool,
    ) -> String {
        let matching = filter::apply(records, criteria);
        let view = PortalView::build(records, criteria, &matching, None, preview_count, show_all);
        render(&view)
    }

    #[test]
    fn test_cards_and_code_link() {
        let records = vec![
            record("With_Code", [4, 4, 3, 4], Some("https://github.com/org/repo")),
            record("No_Code", [1, 1, 1, 1], None),
        ];
        let html = render_with(&records, &FilterCriteria::default(), 5, false);

        assert!(html.contains("With Code"));
        assert!(html.contains("93.75/100"));
        assert!(html.contains(r#"href="https://github.com/org/repo""#));
        assert_eq!(html.matches("View Code").count(), 1);
    }

    #[test]
    fn test_empty_state() {
        let records = vec![record("Only", [2, 2, 2, 2], None)];
        let criteria = FilterCriteria {
            search: Some("zzz".to_string()),
            ..Default::default()
        };
        let html = render_with(&records, &criteria, 5, false);

        assert!(html.contains("No papers match the current filters."));
        assert!(html.contains(r#"value="zzz""#));
    }

    #[test]
    fn test_preview_limit_and_view_all_link() {
        let records: Vec<PaperRecord> = (0..7)
            .map(|i| record(&format!("Paper_{}", i), [3, 3, 3, 3], None))
            .collect();

        let preview = render_with(&records, &FilterCriteria::default(), 5, false);
        assert_eq!(preview.matches(r#"<div class="card">"#).count(), 5);
        assert!(preview.contains("View all 7 papers"));
        assert!(preview.contains(r#"href="/?all=1""#));

        let all = render_with(&records, &FilterCriteria::default(), 5, true);
        assert_eq!(all.matches(r#"<div class="card">"#).count(), 7);
        assert!(all.contains("Show less"));
    }

    #[test]
    fn test_csv_text_is_escaped() {
        let records = vec![record("<b>Bold</b>", [2, 2, 2, 2], None)];
        let html = render_with(&records, &FilterCriteria::default(), 5, false);

        assert!(!html.contains("<b>Bold</b>"));
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
    }

    #[test]
    fn test_unchecked_status_box() {
        let records = vec![
            record("High", [4, 4, 4, 4], None),
            record("Low", [1, 1, 1, 1], None),
        ];
        let criteria = FilterCriteria {
            statuses: Some(vec![Status::HighlyReproducible]),
            ..Default::default()
        };
        let html = render_with(&records, &criteria, 5, false);

        assert!(html.contains(r#"value="Highly Reproducible" checked>"#));
        assert!(html.contains(r#"value="Issues Present">"#));
    }

    #[test]
    fn test_load_error_banner() {
        let records: Vec<PaperRecord> = Vec::new();
        let criteria = FilterCriteria::default();
        let matching = filter::apply(&records, &criteria);
        let view = PortalView::build(
            &records,
            &criteria,
            &matching,
            Some("Not found: Data file data/scorecard_summary.csv"),
            5,
            false,
        );
        let html = render(&view);

        assert!(html.contains("Could not load paper data"));
        assert!(html.contains("No papers match the current filters."));
        assert!(html.contains("No papers loaded."));
    }

    #[test]
    fn test_score_bounds_kept_exact_in_form() {
        let records = vec![record("High", [4, 4, 3, 4], None)];
        let criteria = FilterCriteria {
            min_score: Some(50.0),
            max_score: Some(93.749),
            ..Default::default()
        };
        let html = render_with(&records, &criteria, 5, false);

        assert!(html.contains(r#"name="max" min="0" max="100" step="any" value="93.749""#));
        assert!(html.contains(r#"name="min" min="0" max="100" step="any" value="50""#));
        assert!(html.contains("No papers match the current filters."));
    }

    #[test]
    fn test_about_section_follows_trends() {
        let html = render_with(&[], &FilterCriteria::default(), 5, false);

        let trends = html.find("Breakdown by Status").unwrap();
        let about = html.find(r#"<section class="about">"#).unwrap();
        assert!(about > trends);
        assert!(html.contains("Publish a comparative scorecard for all papers."));
    }
}
