//! Integration tests for the full page pipeline.
//!
//! Pages are built in memory as positioned blocks and run through
//! `convert_source`, so no pdfium library or PDF file is needed.

use pdf_atx::pipeline::layout::group_segments;
use pdf_atx::{
    convert_source, Block, BlockSource, ConversionConfig, ConversionProgressCallback,
    NoiseFilterConfig, Page, PageSelection, PageSeparator, PdfAtxError, Role, RuleSpec,
    Vocabulary,
};
use std::sync::{Arc, Mutex};

// ── Test helpers ─────────────────────────────────────────────────────────────

const WIDTH: f32 = 600.0;

fn block(left: f32, top: f32, text: &str) -> Block {
    Block::new(left, top, left + 150.0, top + 12.0, text)
}

/// A single-column page: one block per line, top to bottom.
fn column_page(index: usize, lines: &[&str]) -> Page {
    let blocks = lines
        .iter()
        .enumerate()
        .map(|(i, text)| block(20.0, 20.0 + 30.0 * i as f32, text))
        .collect();
    Page::new(index, WIDTH, blocks)
}

fn convert_pages(pages: Vec<Page>) -> String {
    convert_source(&pages, "sample", &ConversionConfig::default())
        .unwrap()
        .markdown
}

// ── Title and empty documents ────────────────────────────────────────────────

#[test]
fn empty_document_is_title_only() {
    assert_eq!(convert_pages(Vec::new()), "# sample\n\n");
}

#[test]
fn page_without_text_adds_nothing() {
    let pages = vec![Page::new(0, WIDTH, Vec::new())];
    assert_eq!(convert_pages(pages), "# sample\n\n");
}

#[test]
fn title_always_leads() {
    let md = convert_pages(vec![column_page(0, &["Some body text."])]);
    assert!(md.starts_with("# sample\n\n"));
}

// ── Headings and citations ───────────────────────────────────────────────────

#[test]
fn section_heading_follows_title() {
    let md = convert_pages(vec![column_page(
        0,
        &["Research Shows Chiropractic Helps"],
    )]);
    assert_eq!(md, "# sample\n\n## Research Shows Chiropractic Helps\n\n");
}

#[test]
fn handout_title_line_is_h1() {
    let md = convert_pages(vec![column_page(
        0,
        &["ADHD - Research Chiro May Alleviate ADHD Symptoms"],
    )]);
    assert!(md.contains("\n# ADHD - Research Chiro May Alleviate ADHD Symptoms\n\n"));
}

#[test]
fn citation_is_h5() {
    let md = convert_pages(vec![column_page(0, &["(Smith, 2020)"])]);
    assert_eq!(md, "# sample\n\n##### (Smith, 2020)\n\n");
}

#[test]
fn numbered_and_short_markers_are_sections() {
    let md = convert_pages(vec![column_page(0, &["#1: Focus", "#3"])]);
    assert_eq!(md, "# sample\n\n## #1: Focus\n\n## #3\n\n");
}

#[test]
fn adhd_prefix_is_subsection() {
    let md = convert_pages(vec![column_page(0, &["ADHD and the spine"])]);
    assert_eq!(md, "# sample\n\n### ADHD and the spine\n\n");
}

#[test]
fn first_matching_rule_wins() {
    // Matches the subsection prefix and the citation suffix; subsection comes first.
    let md = convert_pages(vec![column_page(0, &["Case Studies (2019)"])]);
    assert_eq!(md, "# sample\n\n### Case Studies (2019)\n\n");
}

#[test]
fn hierarchy_is_not_enforced() {
    let md = convert_pages(vec![column_page(0, &["Previous Research"])]);
    assert_eq!(md, "# sample\n\n### Previous Research\n\n");
}

// ── Body coalescing ──────────────────────────────────────────────────────────

#[test]
fn body_lines_run_together() {
    let md = convert_pages(vec![column_page(
        0,
        &["Children were studied.", "Most improved."],
    )]);
    assert_eq!(md, "# sample\n\nChildren were studied. Most improved. ");
}

#[test]
fn heading_directly_follows_body_run() {
    let md = convert_pages(vec![column_page(
        0,
        &["Intro text.", "Case Studies", "Details here."],
    )]);
    assert_eq!(
        md,
        "# sample\n\nIntro text. ### Case Studies\n\nDetails here. "
    );
}

// ── Noise filtering ──────────────────────────────────────────────────────────

#[test]
fn footer_and_bullets_never_reach_output() {
    let md = convert_pages(vec![column_page(
        0,
        &[
            "•",
            "Real content.",
            "Copyright International Chiropractic Pediatric Association",
            "Visit ICPA4Kids.org",
            "● ●",
        ],
    )]);
    assert_eq!(md, "# sample\n\nReal content. ");
    assert!(!md.contains("ICPA4Kids.org"));
    assert!(!md.contains('•'));
}

#[test]
fn disabled_noise_filter_keeps_footers() {
    let pages = vec![column_page(0, &["Visit ICPA4Kids.org"])];
    let config = ConversionConfig::builder()
        .noise(NoiseFilterConfig::disabled())
        .build()
        .unwrap();
    let md = convert_source(&pages, "sample", &config).unwrap().markdown;
    assert_eq!(md, "# sample\n\nVisit ICPA4Kids.org ");
}

// ── Column reassembly ────────────────────────────────────────────────────────

#[test]
fn three_columns_read_left_to_right() {
    let page = Page::new(
        0,
        WIDTH,
        vec![
            block(450.0, 10.0, "Right one."),
            block(250.0, 40.0, "Middle one."),
            block(20.0, 100.0, "Left one."),
            block(20.0, 130.0, "Left two."),
            block(250.0, 70.0, "Middle two."),
        ],
    );
    let md = convert_pages(vec![page]);
    assert_eq!(
        md,
        "# sample\n\nLeft one. Left two. Middle one. Middle two. Right one. "
    );
}

#[test]
fn same_row_blocks_order_by_left_edge() {
    let page = Page::new(
        0,
        WIDTH,
        vec![block(120.0, 10.0, "Second."), block(10.0, 10.0, "First.")],
    );
    assert_eq!(convert_pages(vec![page]), "# sample\n\nFirst. Second. ");
}

// ── Segment grouping ─────────────────────────────────────────────────────────

#[test]
fn split_heading_runs_classify_as_one_line() {
    // One visual line reported as two runs with sub-point top jitter.
    let segments = vec![
        Block::new(50.0, 100.4, 140.0, 110.4, "Research Shows"),
        Block::new(143.0, 100.0, 250.0, 110.0, "Chiropractic Helps"),
    ];
    let page = Page::new(0, WIDTH, group_segments(segments));
    assert_eq!(
        convert_pages(vec![page]),
        "# sample\n\n## Research Shows Chiropractic Helps\n\n"
    );
}

#[test]
fn grouped_paragraph_keeps_hyphen_repair_and_body_runs() {
    let segments = vec![
        Block::new(20.0, 100.0, 170.0, 110.0, "Spinal adjust-"),
        Block::new(20.0, 112.0, 150.0, 122.0, "ments help."),
        Block::new(20.0, 700.0, 150.0, 710.0, "ICPA4Kids.org"),
    ];
    let page = Page::new(0, WIDTH, group_segments(segments));
    assert_eq!(convert_pages(vec![page]), "# sample\n\nSpinal adjustments help. ");
}

// ── Hyphenation ──────────────────────────────────────────────────────────────

#[test]
fn hyphen_split_across_blocks_is_rejoined() {
    let md = convert_pages(vec![column_page(0, &["Spinal adjust-", "ments help."])]);
    assert_eq!(md, "# sample\n\nSpinal adjustments help. ");
}

#[test]
fn hyphen_inside_a_word_is_kept() {
    let md = convert_pages(vec![column_page(0, &["A well-known effect."])]);
    assert_eq!(md, "# sample\n\nA well-known effect. ");
}

// ── Pages ────────────────────────────────────────────────────────────────────

#[test]
fn pages_are_concatenated_in_order() {
    let pages = vec![
        column_page(0, &["Page one text."]),
        column_page(1, &["Case Studies"]),
    ];
    assert_eq!(
        convert_pages(pages),
        "# sample\n\nPage one text. ### Case Studies\n\n"
    );
}

#[test]
fn pages_are_independent() {
    // The same line classifies identically regardless of what preceded it.
    let alone = convert_pages(vec![column_page(0, &["(Jones, 2018)"])]);
    let after = convert_pages(vec![
        column_page(0, &["Help a Child in Your Life"]),
        column_page(1, &["(Jones, 2018)"]),
    ]);
    assert!(alone.ends_with("##### (Jones, 2018)\n\n"));
    assert!(after.ends_with("##### (Jones, 2018)\n\n"));
}

#[test]
fn page_selection_and_separator() {
    let pages = vec![
        column_page(0, &["One."]),
        column_page(1, &["Two."]),
        column_page(2, &["Three."]),
    ];
    let config = ConversionConfig::builder()
        .pages(PageSelection::Set(vec![3, 1]))
        .page_separator(PageSeparator::HorizontalRule)
        .build()
        .unwrap();
    let out = convert_source(&pages, "sample", &config).unwrap();
    assert_eq!(out.markdown, "# sample\n\nOne. \n\n---\n\nThree. ");
    assert_eq!(out.stats.processed_pages, 2);
    assert_eq!(out.stats.skipped_pages, 1);
    assert_eq!(
        out.pages.iter().map(|p| p.page_num).collect::<Vec<_>>(),
        vec![1, 3]
    );
}

#[test]
fn selection_outside_document_is_an_error() {
    let pages = vec![column_page(0, &["One."])];
    let config = ConversionConfig::builder()
        .pages(PageSelection::Single(4))
        .build()
        .unwrap();
    let err = convert_source(&pages, "sample", &config).unwrap_err();
    assert!(matches!(
        err,
        PdfAtxError::PageOutOfRange { page: 4, total: 1 }
    ));
}

// ── Stats ────────────────────────────────────────────────────────────────────

#[test]
fn stats_count_roles_and_noise() {
    let pages = vec![column_page(
        0,
        &["Case Studies", "Body.", "(Lee, 2011)", "ICPA4Kids.org"],
    )];
    let out = convert_source(&pages, "sample", &ConversionConfig::default()).unwrap();
    assert_eq!(out.stats.total_pages, 1);
    assert_eq!(out.stats.total_blocks, 4);
    assert_eq!(out.stats.filtered_blocks, 1);
    assert_eq!(out.stats.heading_lines, 1);
    assert_eq!(out.stats.citation_lines, 1);
    assert_eq!(out.stats.body_lines, 1);
    assert_eq!(out.metadata.page_count, 1);
}

// ── Custom vocabulary ────────────────────────────────────────────────────────

#[test]
fn custom_vocabulary_replaces_defaults() {
    let vocab = Vocabulary::empty()
        .rule(RuleSpec::prefix(Role::Section, ["Chapter "]))
        .rule(RuleSpec::pattern(Role::Subsection, r"^\d+\.\d+ ").with_depth(4));
    let config = ConversionConfig::builder()
        .vocabulary(vocab)
        .build()
        .unwrap();
    let pages = vec![column_page(
        0,
        &["Chapter 1 Basics", "1.2 Terms", "Case Studies", "(Smith, 2020)"],
    )];
    let md = convert_source(&pages, "book", &config).unwrap().markdown;
    assert_eq!(
        md,
        "# book\n\n## Chapter 1 Basics\n\n#### 1.2 Terms\n\nCase Studies (Smith, 2020) "
    );
}

#[test]
fn vocabulary_survives_json() {
    let json = Vocabulary::default().to_json_pretty().unwrap();
    let vocab = Vocabulary::from_json_str(&json).unwrap();
    let config = ConversionConfig::builder()
        .vocabulary(vocab)
        .build()
        .unwrap();
    let pages = vec![column_page(0, &["Research Shows Chiropractic Helps"])];
    let md = convert_source(&pages, "sample", &config).unwrap().markdown;
    assert_eq!(md, "# sample\n\n## Research Shows Chiropractic Helps\n\n");
}

// ── Failure handling ─────────────────────────────────────────────────────────

struct FailingSource {
    pages: Vec<Page>,
    fail_at: usize,
}

impl BlockSource for FailingSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<Page, PdfAtxError> {
        if index == self.fail_at {
            return Err(PdfAtxError::ExtractionFailed {
                page: index + 1,
                detail: "no text layer".into(),
            });
        }
        self.pages.page(index)
    }
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl ConversionProgressCallback for Recorder {
    fn on_conversion_start(&self, total_pages: usize) {
        self.events.lock().unwrap().push(format!("start {total_pages}"));
    }

    fn on_page_complete(&self, page_num: usize, _total: usize, _len: usize) {
        self.events.lock().unwrap().push(format!("done {page_num}"));
    }

    fn on_page_error(&self, page_num: usize, _total: usize, _error: &str) {
        self.events.lock().unwrap().push(format!("error {page_num}"));
    }

    fn on_conversion_complete(&self, total_pages: usize) {
        self.events.lock().unwrap().push(format!("complete {total_pages}"));
    }
}

#[test]
fn extraction_failure_aborts_conversion() {
    let source = FailingSource {
        pages: vec![
            column_page(0, &["One."]),
            column_page(1, &["Two."]),
            column_page(2, &["Three."]),
        ],
        fail_at: 1,
    };
    let recorder = Arc::new(Recorder::default());
    let config = ConversionConfig::builder()
        .progress_callback(recorder.clone())
        .build()
        .unwrap();

    let err = convert_source(&source, "sample", &config).unwrap_err();
    assert!(matches!(err, PdfAtxError::ExtractionFailed { page: 2, .. }));
    assert_eq!(
        *recorder.events.lock().unwrap(),
        vec!["start 3", "done 1", "error 2"]
    );
}

#[test]
fn progress_events_in_page_order() {
    let pages = vec![column_page(0, &["One."]), column_page(1, &["Two."])];
    let recorder = Arc::new(Recorder::default());
    let config = ConversionConfig::builder()
        .progress_callback(recorder.clone())
        .build()
        .unwrap();
    convert_source(&pages, "sample", &config).unwrap();
    assert_eq!(
        *recorder.events.lock().unwrap(),
        vec!["start 2", "done 1", "done 2", "complete 2"]
    );
}
