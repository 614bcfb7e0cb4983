mod common;

use common::{fixture, raw_header, write_raw};
use msc::{
    barycentric_to_planar, ErrorCategory, Error, FormatViolation, MscError, MscFileReader,
    PointRecord, PointSource, ReaderConfig, Transform,
};

const SCALES: [f32; 4] = [0.1, 0.25, 0.5, 1.0];

#[test]
fn header_round_trip() {
    let f = fixture(1, 57, &SCALES, 3);
    let reader = MscFileReader::open(&f.path).unwrap();
    let (points, scales, params) = reader.get_header();
    assert_eq!(points, 57);
    assert_eq!(scales, &SCALES[..]);
    assert_eq!(params, 3);
    assert_eq!(reader.header(), &f.header);
    assert_eq!(reader.header().record_byte_length(), (3 + 3 * 4) * 4);
    assert_eq!(reader.next_point_index(), 0);
}

#[test]
fn sequential_read_reproduces_values() {
    let f = fixture(2, 40, &SCALES, 2);
    let mut reader = MscFileReader::open(&f.path).unwrap();

    let mut read = Vec::new();
    while reader.next_point_index() < 40 {
        read.extend(reader.read_points(7.min(reader.remaining()), None, Transform::Raw).unwrap());
    }
    assert_eq!(read, f.records);
}

#[test]
fn indexed_read_matches_sequential() {
    let f = fixture(3, 25, &SCALES, 1);
    let mut reader = MscFileReader::open(&f.path).unwrap();
    let all: Vec<PointRecord> = reader
        .points(Transform::Raw)
        .collect::<msc::Result<_>>()
        .unwrap();

    for i in [24, 0, 13, 13, 7] {
        let one = reader.read_points(1, Some(i), Transform::Raw).unwrap();
        assert_eq!(one, vec![all[i].clone()]);
        assert_eq!(reader.next_point_index(), i + 1);
    }
}

#[test]
fn out_of_range_leaves_cursor() {
    let f = fixture(4, 10, &SCALES, 1);
    let mut reader = MscFileReader::open(&f.path).unwrap();
    reader.read_points(4, None, Transform::Raw).unwrap();

    let err = reader.read_points(1, Some(10), Transform::Raw).unwrap_err();
    assert!(matches!(
        err,
        Error::Msc(MscError::IndexOutOfRange {
            index: 10,
            point_count: 10
        })
    ));
    assert_eq!(err.category(), ErrorCategory::CallerMisuse);
    assert_eq!(reader.next_point_index(), 4);

    // batch running past the end is rejected as a whole
    assert!(reader.read_points(7, Some(5), Transform::Raw).is_err());
    assert_eq!(reader.next_point_index(), 4);
    assert_eq!(reader.read_point(None, Transform::Raw).unwrap(), f.records[4]);
}

#[test]
fn reset_is_stable() {
    let f = fixture(5, 12, &SCALES, 2);
    let mut reader = MscFileReader::open(&f.path).unwrap();
    reader.read_points(9, None, Transform::Raw).unwrap();

    reader.reset().unwrap();
    reader.reset().unwrap();
    assert_eq!(reader.next_point_index(), 0);
    let first = reader.read_point(None, Transform::Raw).unwrap();
    reader.reset().unwrap();
    assert_eq!(reader.read_point(None, Transform::Raw).unwrap(), first);
    assert_eq!(first, f.records[0]);
}

#[test]
fn batch_sets_cursor() {
    let f = fixture(6, 30, &SCALES, 1);
    let mut reader = MscFileReader::open(&f.path).unwrap();
    let batch = reader.read_points(6, Some(11), Transform::Raw).unwrap();
    assert_eq!(batch, f.records[11..17].to_vec());
    assert_eq!(reader.next_point_index(), 17);

    let empty = reader.read_points(0, Some(3), Transform::Raw).unwrap();
    assert!(empty.is_empty());
    assert_eq!(reader.next_point_index(), 3);
}

#[test]
fn planar_transform_on_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = raw_header(1, &[1.0], 2);
    for v in [3.0f32, 4.0, 0.5, 0.25, 99.0] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    let path = write_raw(&dir, "planar.msc", &bytes);

    let mut reader = MscFileReader::open(&path).unwrap();
    let point = reader.read_point(Some(0), Transform::Planar).unwrap();
    assert_eq!(point.params, vec![3.0, 4.0]);
    let (x, y) = point.descriptors[0];
    assert!((x - 0.375).abs() < 1e-6);
    assert!((y - 0.25 * 3f32.sqrt() / 2.0).abs() < 1e-6);
    assert_eq!((x, y), barycentric_to_planar(0.5, 0.25));

    let raw = reader.read_point(Some(0), Transform::Raw).unwrap();
    assert_eq!(raw.descriptors, vec![(0.5, 0.25)]);
}

#[test]
fn invalid_headers_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        (raw_header(0, &[1.0], 1), FormatViolation::NonPositivePointCount(0)),
        (raw_header(-3, &[1.0], 1), FormatViolation::NonPositivePointCount(-3)),
        (raw_header(5, &[], 1), FormatViolation::NonPositiveScaleCount(0)),
        (raw_header(5, &[1.0], -1), FormatViolation::NegativeParamCount(-1)),
    ];
    for (i, (bytes, violation)) in cases.into_iter().enumerate() {
        let path = write_raw(&dir, &format!("bad{i}.msc"), &bytes);
        let err = MscFileReader::open(&path).unwrap_err();
        assert!(
            matches!(err, Error::Msc(MscError::InvalidFormat(v)) if v == violation),
            "case {i}: {err}"
        );
        assert_eq!(err.category(), ErrorCategory::DataCorruption);
    }

    let mut bytes = 5i32.to_le_bytes().to_vec();
    bytes.extend_from_slice(&2_000_000i32.to_le_bytes());
    let path = write_raw(&dir, "huge.msc", &bytes);
    assert!(matches!(
        MscFileReader::open(&path).unwrap_err(),
        Error::Msc(MscError::InvalidFormat(FormatViolation::TooManyScales { .. }))
    ));
}

#[test]
fn truncated_body_detected() {
    let f = fixture(7, 8, &SCALES, 2);
    let record_len = f.header.record_byte_length() as usize;
    let data_start = f.header.data_start_offset() as usize;
    let bytes = f.bytes();
    let cut = data_start + 5 * record_len + 9;
    let path = write_raw(&f.dir, "short.msc", &bytes[..cut]);

    let mut reader = MscFileReader::open(&path).unwrap();
    assert_eq!(reader.read_points(5, None, Transform::Raw).unwrap(), f.records[..5]);

    let err = reader.read_point(None, Transform::Raw).unwrap_err();
    assert!(matches!(
        err,
        Error::Msc(MscError::TruncatedFile { offset }) if offset as usize == cut - 1
    ));
    assert_eq!(reader.next_point_index(), 5);

    // after a failed read the reader still serves earlier points
    assert_eq!(reader.read_point(Some(2), Transform::Raw).unwrap(), f.records[2]);
}

#[test]
fn truncated_header_detected() {
    let f = fixture(8, 3, &SCALES, 1);
    let path = write_raw(&f.dir, "stub.msc", &f.bytes()[..10]);
    assert!(matches!(
        MscFileReader::open(&path).unwrap_err(),
        Error::Msc(MscError::TruncatedFile { offset: 8 })
    ));
}

#[test]
fn missing_file_is_io() {
    let dir = tempfile::tempdir().unwrap();
    let err = MscFileReader::open(dir.path().join("absent.msc")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.category(), ErrorCategory::Io);
}

#[test]
fn custom_scale_ceiling() {
    let f = fixture(9, 3, &SCALES, 1);
    let config = ReaderConfig::default().with_max_scales(3);
    assert!(matches!(
        MscFileReader::open_with(&f.path, &config).unwrap_err(),
        Error::Msc(MscError::InvalidFormat(FormatViolation::TooManyScales {
            count: 4,
            limit: 3
        }))
    ));
}
