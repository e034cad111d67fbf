//! CSV loader and field deriver
//!
//! Reads the scorecard summary CSV and turns each valid row into a
//! [`PaperRecord`]. Bad rows are skipped and reported, never fatal.

use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::links::extract_repo_url;
use crate::model::{check_rating, Category, CriterionNote, PaperRecord, RubricScores, Status};
use crate::scoring::{normalized_score, parse_cell, status_from_score, ScoredCell};
use crate::{Error, Result};

/// Header of the paper identifier column
pub const PAPER_FILE_COLUMN: &str = "Paper File";
pub const CONFERENCE_COLUMN: &str = "Conference";
pub const STATUS_COLUMN: &str = "Status";
pub const NOTES_COLUMN: &str = "Notes";

/// Conference tag used when the row has none
pub const UNSPECIFIED_CONFERENCE: &str = "Unspecified";

/// Optional scored columns shown as detail notes: (header, display name)
const SUPPLEMENTARY_COLUMNS: &[(&str, &str)] = &[
    ("Paper Availability", "Paper Availability"),
    ("Computer Requirements", "Computer Requirements"),
    ("GPU Requirements", "GPU Requirements"),
    ("Ease of Setup", "Ease of Setup"),
    ("Reproducibility of Results", "Overall Reproducibility"),
    ("Overall Rating", "Overall Rating"),
];

/// Options applied while deriving fields
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Base URL for paper links; `<base>/<paper id>.pdf`
    pub paper_link_base: Option<String>,
}

/// Why a row produced no record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The CSV reader could not decode the row
    Unparseable { message: String },
    /// Paper file cell blank
    MissingPaperFile,
    /// Rubric cell blank or without a rating
    MissingRating { category: Category },
    /// Rubric rating outside 1–4
    InvalidRating { category: Category, value: u32 },
    /// An earlier row already has this paper id
    DuplicatePaperId { paper_id: String },
}

/// A skipped data row (1-based, header excluded)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: SkipReason,
}

/// Outcome of one load
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub source: PathBuf,
    pub rows_read: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Records loaded from one CSV file
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<PaperRecord>,
    pub report: LoadReport,
}

impl Dataset {
    /// Dataset with no records, used when the source could not be read
    pub fn empty(source: impl Into<PathBuf>) -> Self {
        Self {
            records: Vec::new(),
            report: LoadReport {
                source: source.into(),
                ..LoadReport::default()
            },
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record with the given paper id
    pub fn find(&self, paper_id: &str) -> Option<&PaperRecord> {
        self.records.iter().find(|r| r.paper_id == paper_id)
    }
}

/// Column positions resolved from the header row
#[derive(Debug)]
struct ColumnMap {
    paper_file: usize,
    rubric: [usize; 4],
    conference: Option<usize>,
    status: Option<usize>,
    notes: Option<usize>,
    supplementary: Vec<(usize, &'static str)>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let find_any = |names: &[&str]| names.iter().find_map(|&n| find(n));

        let paper_file = find(PAPER_FILE_COLUMN).ok_or_else(|| {
            Error::InvalidInput(format!("Missing required column '{}'", PAPER_FILE_COLUMN))
        })?;

        let mut rubric = [0usize; 4];
        for (slot, category) in rubric.iter_mut().zip(Category::ALL) {
            *slot = find_any(category.columns()).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "Missing required column '{}' ({})",
                    category.columns()[0],
                    category
                ))
            })?;
        }

        let supplementary = SUPPLEMENTARY_COLUMNS
            .iter()
            .filter_map(|(header, display)| find(header).map(|idx| (idx, *display)))
            .collect();

        Ok(Self {
            paper_file,
            rubric,
            conference: find(CONFERENCE_COLUMN),
            status: find(STATUS_COLUMN),
            notes: find(NOTES_COLUMN),
            supplementary,
        })
    }
}

/// Load scorecard records from a CSV file on disk
pub fn load_csv(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    if !path.exists() {
        return Err(Error::NotFound(format!("Data file {}", path.display())));
    }

    let file = File::open(path)?;
    let dataset = read_records(file, path, options)?;

    info!(
        "Loaded {} paper(s) from {} ({} row(s) skipped)",
        dataset.len(),
        path.display(),
        dataset.report.skipped.len()
    );

    Ok(dataset)
}

/// Read scorecard records from any CSV source
///
/// `source` only labels the report.
pub fn read_records<R: Read>(reader: R, source: &Path, options: &LoadOptions) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;
    debug!("Resolved CSV columns: {:?}", columns);

    let mut dataset = Dataset::empty(source);
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (idx, row) in csv_reader.records().enumerate() {
        let row_number = idx + 1;
        dataset.report.rows_read += 1;

        let outcome = row
            .map_err(|e| SkipReason::Unparseable {
                message: e.to_string(),
            })
            .and_then(|record| derive_record(&record, &columns, options))
            .and_then(|record| {
                // First row with an id wins; ids address the detail page
                if seen_ids.insert(record.paper_id.clone()) {
                    Ok(record)
                } else {
                    Err(SkipReason::DuplicatePaperId {
                        paper_id: record.paper_id,
                    })
                }
            });

        match outcome {
            Ok(record) => dataset.records.push(record),
            Err(reason) => {
                warn!("Skipping row {}: {:?}", row_number, reason);
                dataset.report.skipped.push(SkippedRow {
                    row: row_number,
                    reason,
                });
            }
        }
    }

    Ok(dataset)
}

fn cell<'r>(record: &'r csv::StringRecord, idx: Option<usize>) -> &'r str {
    idx.and_then(|i| record.get(i)).map(str::trim).unwrap_or("")
}

/// Derive one record from a CSV row
fn derive_record(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    options: &LoadOptions,
) -> std::result::Result<PaperRecord, SkipReason> {
    let paper_file = cell(record, Some(columns.paper_file));
    if paper_file.is_empty() {
        return Err(SkipReason::MissingPaperFile);
    }
    let paper_id = paper_file
        .strip_suffix(".pdf")
        .unwrap_or(paper_file)
        .trim()
        .to_string();
    if paper_id.is_empty() {
        return Err(SkipReason::MissingPaperFile);
    }
    let title = paper_id.replace('_', " ").trim().to_string();

    let mut ratings = [0u8; 4];
    let mut rubric_cells: Vec<(Category, ScoredCell)> = Vec::with_capacity(4);
    for ((slot, category), idx) in ratings.iter_mut().zip(Category::ALL).zip(columns.rubric) {
        let parsed = parse_cell(cell(record, Some(idx)));
        let value = parsed
            .score
            .ok_or(SkipReason::MissingRating { category })?;
        *slot = check_rating(value).ok_or(SkipReason::InvalidRating { category, value })?;
        rubric_cells.push((category, parsed));
    }
    let rubric = RubricScores::new(ratings).map_err(|e| SkipReason::Unparseable {
        message: e.to_string(),
    })?;
    let normalized = normalized_score(&rubric);

    let status = match cell(record, columns.status) {
        "" => status_from_score(normalized),
        label => label.parse::<Status>().unwrap_or_else(|_| {
            debug!("Unrecognised status '{}' for {}, deriving from score", label, paper_id);
            status_from_score(normalized)
        }),
    };

    let conference = match cell(record, columns.conference) {
        "" => UNSPECIFIED_CONFERENCE.to_string(),
        tag => tag.to_string(),
    };

    let notes = cell(record, columns.notes).to_string();

    let code_notes = rubric_cells
        .iter()
        .find(|(category, _)| *category == Category::CodeEnvironment)
        .map(|(_, parsed)| parsed.notes.as_str())
        .unwrap_or("");
    let repo_url = extract_repo_url(&notes).or_else(|| extract_repo_url(code_notes));

    let mut criteria: Vec<CriterionNote> = rubric_cells
        .into_iter()
        .filter(|(_, parsed)| !parsed.notes.is_empty())
        .map(|(category, parsed)| CriterionNote {
            name: category.label().to_string(),
            score: parsed.score,
            notes: parsed.notes,
        })
        .collect();
    criteria.extend(columns.supplementary.iter().filter_map(|(idx, display)| {
        let parsed = parse_cell(cell(record, Some(*idx)));
        if parsed.score.is_none() && parsed.notes.is_empty() {
            return None;
        }
        Some(CriterionNote {
            name: (*display).to_string(),
            score: parsed.score,
            notes: parsed.notes,
        })
    }));

    let paper_url = options
        .paper_link_base
        .as_deref()
        .map(|base| format!("{}/{}.pdf", base.trim_end_matches('/'), paper_id));

    Ok(PaperRecord {
        paper_id,
        title,
        rubric,
        normalized_score: normalized,
        status,
        conference,
        notes,
        repo_url,
        paper_url,
        criteria,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Paper File,Availability of Code and Software,Documentation Quality,Dataset Availability,Community Engagement,Conference,Status,Notes\n";

    fn read(body: &str) -> Dataset {
        let csv = format!("{}{}", HEADER, body);
        read_records(csv.as_bytes(), Path::new("inline.csv"), &LoadOptions::default())
            .expect("Should read inline CSV")
    }

    #[test]
    fn test_derives_fields() {
        let ds = read("Fast_Code_Models.pdf,4,4,3,4,SC24,,see https://github.com/org/repo for code\n");
        assert_eq!(ds.len(), 1);

        let r = &ds.records[0];
        assert_eq!(r.paper_id, "Fast_Code_Models");
        assert_eq!(r.title, "Fast Code Models");
        assert_eq!(r.normalized_score, 93.75);
        assert_eq!(r.status, Status::HighlyReproducible);
        assert_eq!(r.conference, "SC24");
        assert_eq!(r.repo_url.as_deref(), Some("https://github.com/org/repo"));
        assert!(r.paper_url.is_none());
    }

    #[test]
    fn test_missing_rating_skips_row() {
        let ds = read("A.pdf,4,,3,4,SC24,,\nB.pdf,1,1,1,1,SC24,,\n");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].paper_id, "B");
        assert_eq!(
            ds.report.skipped,
            vec![SkippedRow {
                row: 1,
                reason: SkipReason::MissingRating {
                    category: Category::DocumentationTransparency
                }
            }]
        );
        assert_eq!(ds.report.rows_read, 2);
    }

    #[test]
    fn test_out_of_range_rating_skips_row() {
        let ds = read("A.pdf,5,4,3,4,SC24,,\n");
        assert!(ds.is_empty());
        assert_eq!(
            ds.report.skipped[0].reason,
            SkipReason::InvalidRating {
                category: Category::CodeEnvironment,
                value: 5
            }
        );
    }

    #[test]
    fn test_short_row_skipped() {
        let ds = read("A.pdf,4,4\n");
        assert!(ds.is_empty());
        assert_eq!(ds.report.skipped.len(), 1);
    }

    #[test]
    fn test_status_column_overrides_derived() {
        let ds = read("A.pdf,4,4,4,4,ICSE 2023,issues present,\nB.pdf,4,4,4,4,ICSE 2023,Bogus,\n");
        assert_eq!(ds.records[0].status, Status::IssuesPresent);
        assert_eq!(ds.records[1].status, Status::HighlyReproducible);
    }

    #[test]
    fn test_blank_conference_defaults() {
        let ds = read("A.pdf,2,2,2,2,,,\n");
        assert_eq!(ds.records[0].conference, UNSPECIFIED_CONFERENCE);
        assert_eq!(ds.records[0].normalized_score, 50.0);
    }

    #[test]
    fn test_annotated_cells_and_code_note_fallback() {
        let ds = read(
            "A.pdf,\"Score: 3 | Notes: repo at https://gitlab.com/x/y.\",Score: 2,4,1,SC24,,no link here\n",
        );
        let r = &ds.records[0];
        assert_eq!(r.rubric.code_environment, 3);
        assert_eq!(r.repo_url.as_deref(), Some("https://gitlab.com/x/y"));
        assert_eq!(r.criteria.len(), 1);
        assert_eq!(r.criteria[0].name, "Code & Environment");
    }

    #[test]
    fn test_missing_required_column_is_error() {
        let csv = "Paper File,Documentation Quality\nA.pdf,3\n";
        let result = read_records(csv.as_bytes(), Path::new("x.csv"), &LoadOptions::default());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_dataset_alias_column_and_supplementary() {
        let csv = "Paper File,Availability of Code and Software,Documentation Quality,Availability of Datasets,Community Engagement,GPU Requirements\n\
                   P.pdf,1,2,3,4,Score: 1 | Notes: needs an A100\n";
        let options = LoadOptions {
            paper_link_base: Some("https://example.org/papers/".to_string()),
        };
        let ds = read_records(csv.as_bytes(), Path::new("x.csv"), &options).unwrap();
        let r = &ds.records[0];
        assert_eq!(r.rubric.data_model_reuse, 3);
        assert_eq!(r.paper_url.as_deref(), Some("https://example.org/papers/P.pdf"));
        assert_eq!(
            r.criteria,
            vec![CriterionNote {
                name: "GPU Requirements".to_string(),
                score: Some(1),
                notes: "needs an A100".to_string(),
            }]
        );
    }

    #[test]
    fn test_find_by_id() {
        let ds = read("A.pdf,1,1,1,1,,,\nB.pdf,2,2,2,2,,,\n");
        assert_eq!(ds.find("B").map(|r| r.normalized_score), Some(50.0));
        assert!(ds.find("C").is_none());
    }

    #[test]
    fn test_duplicate_paper_id_skipped() {
        let ds = read("A.pdf,1,1,1,1,,,\nA.pdf,4,4,4,4,,,\nB.pdf,2,2,2,2,,,\n");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.find("A").map(|r| r.normalized_score), Some(25.0));
        assert_eq!(
            ds.report.skipped,
            vec![SkippedRow {
                row: 2,
                reason: SkipReason::DuplicatePaperId {
                    paper_id: "A".to_string()
                },
            }]
        );
    }
}
