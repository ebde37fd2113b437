use super::*;

#[test]
fn file_name_format() {
    assert_eq!(download_file_name(1_760_000_000_123), "snapstrip-1760000000123.png");
}

#[test]
fn download_sink_never_overwrites() {
    let dir = std::env::temp_dir().join(format!("snapstrip-export-{}", std::process::id()));
    let mut sink = DownloadSink::new(dir.join("nested"));
    let a = sink.export(b"first").unwrap();
    let b = sink.export(b"second").unwrap();
    let (ExportReceipt::Saved(pa), ExportReceipt::Saved(pb)) = (a, b) else {
        panic!("expected saved receipts");
    };
    assert_ne!(pa, pb);
    assert_eq!(std::fs::read(&pa).unwrap(), b"first");
    assert_eq!(std::fs::read(&pb).unwrap(), b"second");
    let name = pa.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("snapstrip-") && name.ends_with(".png"), "{name}");
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn in_memory_sink_collects() {
    let mut sink = InMemorySink::default();
    assert_eq!(sink.export(b"a").unwrap(), ExportReceipt::Stored { index: 0 });
    assert_eq!(sink.export(b"b").unwrap(), ExportReceipt::Stored { index: 1 });
    assert_eq!(sink.images, vec![b"a".to_vec(), b"b".to_vec()]);
}

#[cfg(unix)]
#[test]
fn print_sink_reports_command_status() {
    let mut ok = PrintSink::new("cat", Vec::<String>::new());
    assert_eq!(
        ok.export(b"png").unwrap(),
        ExportReceipt::Printed {
            program: "cat".to_owned()
        }
    );

    let mut failing = PrintSink::new("false", Vec::<String>::new());
    let err = failing.export(b"png").unwrap_err();
    assert!(matches!(err, SnapError::Export(_)));
    assert!(err.is_retryable());

    let mut missing = PrintSink::new("snapstrip-no-such-printer", Vec::<String>::new());
    assert!(missing.export(b"png").is_err());
}

#[test]
fn print_command_must_name_a_program() {
    assert!(PrintSink::from_command(&[]).is_err());
    assert!(PrintSink::from_command(&["lp".to_owned(), "-d".to_owned(), "booth".to_owned()]).is_ok());
}
