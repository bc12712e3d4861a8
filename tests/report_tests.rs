//! Integration tests for report generation

use gradepoint::core::classify::TierTable;
use gradepoint::core::grading::GradeScale;
use gradepoint::core::loader::load_record;
use gradepoint::core::report::{reporter_for, ReportContext, ReportFormat, ReportGenerator};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_record_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples/records/nd_computer_science.toml")
}

#[test]
fn markdown_report_written_to_disk() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("transcript.md");

    let scale = GradeScale::five_point();
    let tiers = TierTable::standard();
    let record = load_record(sample_record_path(), &scale).expect("load");
    let ctx = ReportContext::build(&record, &scale, &tiers).expect("context");

    reporter_for(ReportFormat::Markdown)
        .generate(&ctx, &output)
        .expect("generate");

    let content = fs::read_to_string(&output).expect("read report");
    assert!(content.contains("# Academic Transcript: FPI/ND/CS/21/014"));
    assert!(content.contains("| **CGPA** | 3.67 |"));
    assert!(content.contains("| **Standing** | Very Good |"));
    assert!(content.contains("| **Current GPA** | 4.20 (Very Good) |"));
    assert!(content.contains("| **Credit Units** | 12 |"));
    assert!(content.contains("| 2022/2023 First Semester | ND II | 3 | 12.00 | 4.00 | Very Good | In Progress |"));
    assert!(content.contains("| CSC203 | Computer Architecture | 3 | - | - |"));
    assert!(content.contains("| SIW101 | Student Industrial Work Experience | 0 | A | - |"));
}

#[test]
fn text_report_lists_every_semester() {
    let scale = GradeScale::five_point();
    let tiers = TierTable::quick_entry();
    let record = load_record(sample_record_path(), &scale).expect("load");
    let ctx = ReportContext::build(&record, &scale, &tiers).expect("context");

    let content = reporter_for(ReportFormat::Text).render(&ctx).expect("render");
    assert!(content.contains("CGPA: 3.67 (Good)"));
    assert!(content.contains("Current GPA: 4.20 (Excellent)"));
    assert!(content.contains("2021/2022 First Semester"));
    assert!(content.contains("2021/2022 Second Semester"));
    assert!(content.contains("2022/2023 First Semester"));
    assert!(content.contains("Progress: 73%"));
}

#[test]
fn formats_render_identical_numbers() {
    let scale = GradeScale::five_point();
    let tiers = TierTable::standard();
    let record = load_record(sample_record_path(), &scale).expect("load");
    let ctx = ReportContext::build(&record, &scale, &tiers).expect("context");

    let markdown = reporter_for(ReportFormat::Markdown).render(&ctx).expect("md");
    let text = reporter_for(ReportFormat::Text).render(&ctx).expect("text");
    for figure in ["3.67", "4.20", "3.29"] {
        assert!(markdown.contains(figure), "markdown missing {figure}");
        assert!(text.contains(figure), "text missing {figure}");
    }
}
