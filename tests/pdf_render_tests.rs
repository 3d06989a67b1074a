//! End-to-end PDF rendering through the Typst CLI.
//!
//! Each test returns early when no `typst` binary is on the PATH.

use std::process::Command;

use service_log_server::generators::common::get_static_dir;
use service_log_server::generators::{Generator, ServiceLogPdfGenerator, TypstRenderEngine};
use service_log_server::service_log::{normalize, ServiceVisitForm};

fn typst_available() -> bool {
    Command::new("typst")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

fn form() -> ServiceVisitForm {
    ServiceVisitForm {
        company: Some("Acme Corp".into()),
        date: Some("2024-03-07".into()),
        in_time: Some("09:00".into()),
        in_period: Some("AM".into()),
        out_time: Some("04:30".into()),
        out_period: Some("PM".into()),
        works: Some("Filter change\nPump check\n*not bold* #not-code".into()),
        workers: Some("Arun\nBala".into()),
        visit_type: Some("Scheduled".into()),
        staff_name: Some("Ravi \"R\" Kumar".into()),
        format: None,
    }
}

#[test]
fn test_renders_pdf_without_logo() {
    if !typst_available() {
        eprintln!("typst not installed, skipping");
        return;
    }

    let generator = ServiceLogPdfGenerator::new(
        get_static_dir(),
        "/nonexistent/logo.jpg",
        TypstRenderEngine::default(),
    )
    .unwrap();
    let record = normalize(&form()).unwrap();

    let doc = generator.generate(&record).unwrap();
    let bytes = std::fs::read(doc.path()).unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(doc.filename, "Acme_Corp_service_07-03-2024.pdf");
}

#[test]
fn test_concurrent_renders_do_not_share_output() {
    if !typst_available() {
        eprintln!("typst not installed, skipping");
        return;
    }

    let generator = ServiceLogPdfGenerator::new(
        get_static_dir(),
        "/nonexistent/logo.jpg",
        TypstRenderEngine::default(),
    )
    .unwrap();
    let record = normalize(&form()).unwrap();

    let first = generator.generate(&record).unwrap();
    let second = generator.generate(&record).unwrap();
    assert_ne!(first.path(), second.path());

    let first_path = first.path().to_path_buf();
    drop(first);
    assert!(!first_path.exists());
    assert!(second.path().exists());
}
