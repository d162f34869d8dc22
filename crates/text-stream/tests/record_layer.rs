//! Global installation of the tracing layer.

use record_sink::Priority;
use test_support::RecordingWriter;
use text_stream::init_tracing;

#[test]
fn installed_layer_receives_events_once() {
    let recorder = RecordingWriter::new();
    init_tracing("app.trace", &recorder.shared()).expect("first installation succeeds");
    assert!(init_tracing("app.trace", &recorder.shared()).is_err());

    tracing::error!(attempt = 3, "connection lost");
    tracing::trace!("detail\nsecond line");

    let records = recorder.take();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].priority, Priority::Error);
    assert_eq!(records[0].tag, "app.trace");
    assert_eq!(records[0].text(), "connection lost attempt=3\n");
    assert_eq!(records[1].priority, Priority::Verbose);
    assert_eq!(records[1].text(), "detail\n");
    assert_eq!(records[2].text(), "second line\n");
}
