// rextract-core/tests/extraction_integration_tests.rs
//! End-to-end fixtures through decode -> lines -> select -> expand, including
//! legacy single-byte encodings.

use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use rextract_core::{extract_once, ExtractError, ExtractionQuery, QueryConfig};
use rextract_core::{ExtractionEngine, RegexExtractor};

// "августа\r\n" in iso-8859-5.
const AVGUSTA: [u8; 9] = [0xd0, 0xd2, 0xd3, 0xe3, 0xe1, 0xe2, 0xd0, 0x0d, 0x0a];

// "выхухоль\n\nbadger\n\nвыхухоль2\n" in iso-8859-5.
const VYHUHOL: [u8; 28] = [
    0xd2, 0xeb, 0xe5, 0xe3, 0xe5, 0xde, 0xdb, 0xec, 0x0a, 0x0a, 0x62, 0x61, 0x64, 0x67, 0x65,
    0x72, 0x0a, 0x0a, 0xd2, 0xeb, 0xe5, 0xe3, 0xe5, 0xde, 0xdb, 0xec, 0x32, 0x0a,
];

// "феофан\r\n" in iso-8859-5.
const FEOFAN: [u8; 8] = [0xe4, 0xd5, 0xde, 0xe4, 0xd0, 0xdd, 0x0d, 0x0a];

#[test]
fn empty_template_returns_whole_line_with_terminator() -> Result<()> {
    let out = extract_once(&AVGUSTA, "(а)", "iso-8859-5", None, None, "")?;
    assert_eq!(out.as_deref(), Some("августа\r\n"));
    Ok(())
}

#[test]
fn group_template_over_legacy_encoding() -> Result<()> {
    let out = extract_once(
        &FEOFAN,
        "(ф)",
        "iso-8859-5",
        None,
        None,
        r"group 0: \0 group 1: \1 group 4: \4",
    )?;
    assert_eq!(out.as_deref(), Some("group 0: ф group 1: ф group 4: "));
    Ok(())
}

#[test]
fn second_occurrence_skips_non_matching_lines() -> Result<()> {
    let out = extract_once(&VYHUHOL, "хух", "iso-8859-5", Some(2), None, "")?;
    assert_eq!(out.as_deref(), Some("выхухоль2\n"));
    let out = extract_once(&VYHUHOL, "хух", "iso-8859-5", Some(1), None, "")?;
    assert_eq!(out.as_deref(), Some("выхухоль\n"));
    Ok(())
}

#[test]
fn occurrence_window_past_all_matches_yields_none() -> Result<()> {
    let out = extract_once(&VYHUHOL, "хух", "iso-8859-5", Some(3), None, "")?;
    assert_eq!(out, None);
    Ok(())
}

#[test]
fn unknown_encoding_fails_the_invocation() {
    let err = extract_once(&AVGUSTA, "(а)", "banana-16", None, None, "").unwrap_err();
    assert!(matches!(err, ExtractError::UnsupportedEncoding(_)));
}

#[test]
fn invalid_bytes_fail_the_invocation() {
    let err = extract_once(&[0xd0, 0xff], "x", "utf-8", None, None, "").unwrap_err();
    assert!(matches!(err, ExtractError::InvalidByteSequence(_)));
}

#[test]
fn file_backed_extraction_through_engine() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(&VYHUHOL)?;
    let raw = std::fs::read(file.path())?;

    let config = QueryConfig {
        queries: vec![ExtractionQuery {
            name: "desman".to_string(),
            pattern: Some("хух".to_string()),
            encoding: "iso-8859-5".to_string(),
            start_occurrence: Some(2),
            ..Default::default()
        }],
    };
    let engine = RegexExtractor::new(config)?;
    let m = engine
        .extract_one(&raw, &file.path().display().to_string(), "desman")?
        .expect("second occurrence should be selected");
    assert_eq!(m.value, "выхухоль2\n");
    assert_eq!(m.line_number, 5);
    assert_eq!(m.occurrence, 2);
    Ok(())
}

#[test]
fn yaml_config_drives_extraction() -> Result<()> {
    let yaml = r#"
queries:
  - name: b_value
    description: "Second field of an a/b pair"
    pattern: "a:([^ ]+) b:([^ ]+)"
    output: "\\1,\\2"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    let config = QueryConfig::load_from_file(file.path())?;
    let engine = RegexExtractor::new(config)?;
    let m = engine.extract_one(b"a:1 b:2\n", "inline", "b_value")?.unwrap();
    assert_eq!(m.value, "1,2");
    Ok(())
}
