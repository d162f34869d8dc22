//! Integration tests for line buffering and record packing.
//!
//! Expectations are written as the lines `logcat -v tag` would show, which
//! strips one trailing newline from each record and splits the rest.

use std::sync::Arc;
use std::thread;

use proptest::prelude::*;
use record_sink::{MAX_BYTES_PER_RECORD, Priority};
use test_support::{FailingWriter, RecordingWriter};
use text_stream::{ErrorPolicy, StreamError, TextLogStream};

fn stream(recorder: &RecordingWriter) -> TextLogStream {
    TextLogStream::builder(Priority::Info, "app.stdout", recorder.shared())
        .errors(ErrorPolicy::BackslashReplace)
        .build()
        .expect("default encoding resolves")
}

fn write(stream: &TextLogStream, recorder: &RecordingWriter, text: &str, lines: &[&str]) {
    assert_eq!(
        stream.write(text).expect("write succeeds"),
        text.chars().count()
    );
    assert_eq!(recorder.take_lines(), lines, "text {text:?}");
}

// ============================================================================
// Single-line messages
// ============================================================================

#[test]
fn single_line_messages_when_unbuffered() {
    let recorder = RecordingWriter::new();
    let stream = stream(&recorder);
    let _unbuffered = stream.scoped_write_through(true);

    write(&stream, &recorder, "", &[]);
    for text in ["a", "Hello", "Hello world", " ", "  "] {
        write(&stream, &recorder, text, &[text]);
    }
    write(&stream, &recorder, "ol\u{e9}", &["ol\u{e9}"]);
    write(&stream, &recorder, "\u{4e2d}\u{6587}", &["\u{4e2d}\u{6587}"]);
    write(&stream, &recorder, "\u{1f600}", &["\u{1f600}"]);
}

#[test]
fn nul_characters_truncate_the_visible_message() {
    let recorder = RecordingWriter::new();
    let stream = stream(&recorder);
    let _unbuffered = stream.scoped_write_through(true);

    write(&stream, &recorder, "\0", &[""]);
    write(&stream, &recorder, "a\0", &["a"]);
    write(&stream, &recorder, "\0b", &[""]);
    write(&stream, &recorder, "a\0b", &["a"]);
}

// ============================================================================
// Multi-line messages
// ============================================================================

#[test]
fn multi_line_messages_when_buffered() {
    let recorder = RecordingWriter::new();
    let stream = stream(&recorder);

    write(&stream, &recorder, "\nx", &[""]);
    write(&stream, &recorder, "\na\n", &["x", "a"]);
    write(&stream, &recorder, "\n", &[""]);
    write(&stream, &recorder, "b\n", &["b"]);
    write(&stream, &recorder, "c\n\n", &["c", ""]);
    write(&stream, &recorder, "d\ne", &["d"]);
    write(&stream, &recorder, "xx", &[]);
    write(&stream, &recorder, "f\n\ng", &["exxf", ""]);
    write(&stream, &recorder, "\n", &["g"]);
}

#[test]
fn multi_line_messages_when_unbuffered() {
    let recorder = RecordingWriter::new();
    let stream = stream(&recorder);
    let _unbuffered = stream.scoped_write_through(true);

    write(&stream, &recorder, "\nx", &["", "x"]);
    write(&stream, &recorder, "\na\n", &["", "a"]);
    write(&stream, &recorder, "\n", &[""]);
    write(&stream, &recorder, "b\n", &["b"]);
    write(&stream, &recorder, "c\n\n", &["c", ""]);
    write(&stream, &recorder, "d\ne", &["d", "e"]);
    write(&stream, &recorder, "xx", &["xx"]);
    write(&stream, &recorder, "f\n\ng", &["f", "", "g"]);
    write(&stream, &recorder, "\n", &[""]);
}

#[test]
fn crlf_is_translated_to_lf() {
    let recorder = RecordingWriter::new();
    let stream = stream(&recorder);

    write(&stream, &recorder, "hello\r\n", &["hello"]);
    write(&stream, &recorder, "hello\r\nworld\r\n", &["hello", "world"]);
    write(&stream, &recorder, "\r\n", &[""]);
}

#[test]
fn crlf_and_lf_produce_identical_records() {
    let lf = RecordingWriter::new();
    let crlf = RecordingWriter::new();
    stream(&lf).write("one\ntwo\n").unwrap();
    stream(&crlf).write("one\r\ntwo\r\n").unwrap();
    assert_eq!(lf.take_payloads(), crlf.take_payloads());
}

#[test]
fn non_text_values_are_rejected() {
    let recorder = RecordingWriter::new();
    let stream = stream(&recorder);

    let err = stream.write_value(&Vec::<u8>::new()).unwrap_err();
    assert_eq!(err.to_string(), "write() argument must be str, not Vec<u8>");
    let err = stream.write_value(&Option::<i32>::None).unwrap_err();
    assert_eq!(err.to_string(), "write() argument must be str, not Option<i32>");
    let err = stream.write_value(&42_i64).unwrap_err();
    assert!(matches!(err, StreamError::NotText { ref type_name } if type_name == "i64"));
    assert!(recorder.is_empty());
}

#[test]
fn manual_flush() {
    let recorder = RecordingWriter::new();
    let stream = stream(&recorder);

    write(&stream, &recorder, "hello", &[]);
    stream.flush().unwrap();
    assert_eq!(recorder.take_lines(), ["hello"]);

    write(&stream, &recorder, "hello", &[]);
    write(&stream, &recorder, "world", &[]);
    stream.flush().unwrap();
    assert_eq!(recorder.take_lines(), ["helloworld"]);

    stream.flush().unwrap();
    assert!(recorder.is_empty());
}

// ============================================================================
// Record packing
// ============================================================================

#[test]
fn long_ascii_line_is_packed_to_the_ceiling() {
    let recorder = RecordingWriter::new();
    let stream = stream(&recorder);

    let text = format!("{}\n", "foobar".repeat(700));
    write(
        &stream,
        &recorder,
        &text,
        &[
            &format!("{}foob", "foobar".repeat(666)),
            &format!("ar{}", "foobar".repeat(33)),
        ],
    );
}

#[test]
fn long_ascii_line_record_sizes() {
    let recorder = RecordingWriter::new();
    let stream = stream(&recorder);
    stream.write(&format!("{}\n", "foobar".repeat(700))).unwrap();
    let sizes: Vec<_> = recorder.take_payloads().iter().map(Vec::len).collect();
    assert_eq!(sizes, [4000, 201]);
}

#[test]
fn full_width_digits_are_packed_by_bytes() {
    let recorder = RecordingWriter::new();
    let stream = stream(&recorder);

    let digits = "\u{ff10}\u{ff11}\u{ff12}\u{ff13}\u{ff14}\u{ff15}\u{ff16}\u{ff17}\u{ff18}\u{ff19}";
    write(
        &stream,
        &recorder,
        &format!("{}\n", digits.repeat(150)),
        &[&digits.repeat(100), &digits.repeat(50)],
    );
}

#[test]
fn partial_lines_accumulate_until_the_ceiling() {
    let recorder = RecordingWriter::new();
    let stream = stream(&recorder);

    let digits = "0123456789";
    write(&stream, &recorder, &digits.repeat(200), &[]);
    write(&stream, &recorder, &digits.repeat(150), &[]);
    write(&stream, &recorder, &digits.repeat(51), &[&digits.repeat(350)]);
    write(&stream, &recorder, "\n", &[&digits.repeat(51)]);
}

#[test]
fn three_byte_chunks_flush_only_when_the_next_would_overflow() {
    let recorder = RecordingWriter::new();
    let stream = stream(&recorder);

    let chunk = "\u{4e2d}".repeat(1000);
    stream.write(&chunk).unwrap();
    assert!(recorder.is_empty());
    stream.write(&chunk).unwrap();
    let payloads = recorder.take_payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].len(), 3000);
}

#[test]
fn write_through_sends_each_character_separately() {
    let recorder = RecordingWriter::new();
    let stream = stream(&recorder);
    stream.set_write_through(true);

    stream.write("a").unwrap();
    stream.write("b").unwrap();
    assert_eq!(recorder.take_texts(), ["a", "b"]);
}

// ============================================================================
// Encoding and failures
// ============================================================================

#[test]
fn backslash_replace_under_a_narrow_encoding() {
    let recorder = RecordingWriter::new();
    let stream = TextLogStream::builder(Priority::Warn, "app.stderr", recorder.shared())
        .encoding("latin1")
        .errors(ErrorPolicy::BackslashReplace)
        .build()
        .unwrap();

    stream.write("caf\u{e9} \u{4e2d}\n").unwrap();
    assert_eq!(recorder.take_payloads(), vec![b"caf\xe9 \\u4e2d\n".to_vec()]);
}

#[test]
fn failed_flush_is_retried_without_loss() {
    let writer = FailingWriter::new(2);
    let stream = TextLogStream::new(Priority::Info, "app.stdout", writer.shared());

    assert!(stream.write("first\n").is_err());
    assert!(stream.flush().is_err());
    stream.write("second\n").unwrap();

    assert_eq!(writer.recorder().take_texts(), ["first\nsecond\n"]);
    assert_eq!(writer.attempts(), 3);
}

#[test]
fn concurrent_writers_never_interleave_within_a_record() {
    let recorder = RecordingWriter::new();
    let stream = Arc::new(stream(&recorder));

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let stream = Arc::clone(&stream);
            thread::spawn(move || {
                let line = format!("{}\n", worker.to_string().repeat(50));
                for _ in 0..100 {
                    stream.write(&line).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let texts = recorder.take_texts();
    assert_eq!(texts.len(), 400);
    for text in texts {
        let body = text.strip_suffix('\n').expect("every record ends a line");
        assert_eq!(body.len(), 50);
        let first = body.chars().next().unwrap();
        assert!(body.chars().all(|character| character == first), "{text:?}");
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn records_never_exceed_the_ceiling(text in "\\PC{0,3000}") {
        let recorder = RecordingWriter::new();
        let stream = stream(&recorder);
        prop_assert_eq!(stream.write(&text).unwrap(), text.chars().count());
        stream.flush().unwrap();
        for payload in recorder.take_payloads() {
            prop_assert!(payload.len() <= MAX_BYTES_PER_RECORD);
            prop_assert!(!payload.is_empty());
        }
    }

    #[test]
    fn narrow_encodings_never_exceed_the_ceiling(
        label in prop::sample::select(vec!["latin1", "iso-2022-jp"]),
        policy in prop::sample::select(ErrorPolicy::ALL.to_vec()),
        text in "[a \u{e9}\u{4e2d}\u{ff10}\u{1f600}\n]{0,3000}",
    ) {
        let recorder = RecordingWriter::new();
        let stream = TextLogStream::builder(Priority::Warn, "app.stderr", recorder.shared())
            .encoding(label)
            .errors(policy)
            .build()
            .unwrap();

        match stream.write(&text) {
            Ok(count) => prop_assert_eq!(count, text.chars().count()),
            Err(err) => prop_assert!(
                policy == ErrorPolicy::Strict && matches!(err, StreamError::Unencodable { .. }),
                "{err}"
            ),
        }
        stream.flush().unwrap();
        for payload in recorder.take_payloads() {
            prop_assert!(payload.len() <= MAX_BYTES_PER_RECORD, "{} bytes", payload.len());
        }
    }

    #[test]
    fn ascii_text_is_forwarded_in_order(text in "[ -~\\n]{0,2000}") {
        let recorder = RecordingWriter::new();
        let stream = stream(&recorder);
        stream.write(&text).unwrap();
        stream.flush().unwrap();
        prop_assert_eq!(recorder.take_texts().concat(), text);
    }
}
