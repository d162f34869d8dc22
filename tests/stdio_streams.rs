//! End-to-end tests through the public facade: text in, platform records out.

use std::sync::Arc;

use logcat_stream::{
    ErrorPolicy, LogWriter, MAX_BYTES_PER_RECORD, Priority, RecordSink, StdioConfig,
    StreamError, TextLogStream, init_streams, unescape_nul,
};
use proptest::prelude::*;
use test_support::{FailingWriter, RecordingWriter};

fn streams(recorder: &RecordingWriter) -> logcat_stream::StdioStreams {
    init_streams(recorder.shared(), &StdioConfig::for_app("demo")).expect("UTF-8 resolves")
}

#[test]
fn stdout_and_stderr_records_are_tagged_and_leveled() {
    let recorder = RecordingWriter::new();
    let streams = streams(&recorder);

    streams.stdout.write("to stdout\n").unwrap();
    streams.stderr.write("to stderr\n").unwrap();

    let records = recorder.take();
    assert_eq!(records.len(), 2);
    assert_eq!(
        (records[0].priority, records[0].tag.as_str()),
        (Priority::Info, "demo.stdout")
    );
    assert_eq!(
        (records[1].priority, records[1].tag.as_str()),
        (Priority::Warn, "demo.stderr")
    );
}

#[test]
fn binary_access_bypasses_the_line_buffer() {
    let recorder = RecordingWriter::new();
    let streams = streams(&recorder);

    streams.stdout.write("pending").unwrap();
    assert_eq!(streams.stdout.buffer().write(b"raw\n").unwrap(), 4);
    assert_eq!(recorder.take_texts(), ["raw\n"]);
    assert_eq!(streams.stdout.pending_len(), 7);
}

#[test]
fn stderr_escapes_what_a_narrow_encoding_cannot_hold() {
    let recorder = RecordingWriter::new();
    let config = StdioConfig::default().with_encoding("windows-1252");
    let streams = init_streams(recorder.shared(), &config).unwrap();

    streams.stderr.write("\u{1f600}\n").unwrap();
    assert_eq!(recorder.take_texts(), ["\\U0001f600\n"]);

    let err = streams.stdout.write("\u{1f600}\n").unwrap_err();
    assert!(matches!(err, StreamError::Unencodable { .. }));
}

#[test]
fn any_closure_can_stand_in_for_the_platform() {
    let writer: Arc<dyn LogWriter> = Arc::new(
        |priority: Priority, tag: &str, payload: &[u8]| -> std::io::Result<()> {
            assert_eq!(priority, Priority::Debug);
            assert_eq!(tag, "closure");
            assert_eq!(payload, b"ok\n");
            Ok(())
        },
    );
    let stream = TextLogStream::new(Priority::Debug, "closure", writer);
    assert_eq!(stream.write("ok\n").unwrap(), 3);
}

#[test]
fn platform_failures_surface_as_io_errors() {
    let writer = FailingWriter::new(1);
    let sink = RecordSink::new(Priority::Error, "fatal", writer.shared());
    let mut handle = &sink;

    let err = std::io::Write::write(&mut handle, b"boom").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    assert_eq!(std::io::Write::write(&mut handle, b"boom").unwrap(), 4);
}

#[test]
fn write_through_scope_is_restored() {
    let recorder = RecordingWriter::new();
    let config = StdioConfig::default().with_errors(ErrorPolicy::Replace, ErrorPolicy::Replace);
    let streams = init_streams(recorder.shared(), &config).unwrap();

    {
        let unbuffered = streams.stdout.scoped_write_through(true);
        unbuffered.write("a").unwrap();
    }
    streams.stdout.write("b").unwrap();
    assert_eq!(recorder.take_texts(), ["a"]);
    assert!(!streams.stdout.write_through());
}

#[cfg(unix)]
#[test]
#[ignore = "writes an entry to the host syslog"]
fn platform_writer_is_available() {
    let stream = TextLogStream::new(
        Priority::Verbose,
        "logcat-stream-tests",
        logcat_stream::platform_writer(),
    );
    stream.write("platform writer smoke test\n").unwrap();
}

proptest! {
    #[test]
    fn flushed_text_survives_end_to_end(text in "[a-z0-9 \\n\\x00\u{e9}\u{4e2d}\u{1f600}]{0,6000}") {
        let recorder = RecordingWriter::new();
        let streams = streams(&recorder);

        prop_assert_eq!(streams.stdout.write(&text).unwrap(), text.chars().count());
        streams.flush().unwrap();

        let mut joined = Vec::new();
        for payload in recorder.take_payloads() {
            let unescaped = unescape_nul(&payload);
            prop_assert!(unescaped.len() <= MAX_BYTES_PER_RECORD);
            joined.extend_from_slice(&unescaped);
        }
        prop_assert_eq!(joined, text.as_bytes().to_vec());
    }
}
