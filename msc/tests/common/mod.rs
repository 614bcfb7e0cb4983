#![allow(dead_code)]

use std::path::{Path, PathBuf};

use msc::{MscHeader, MscWriter, PointRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

/// A written MSC file plus the records and auxiliary values it holds
pub struct Fixture {
    pub dir: TempDir,
    pub path: PathBuf,
    pub header: MscHeader,
    pub records: Vec<PointRecord>,
}

impl Fixture {
    pub fn bytes(&self) -> Vec<u8> {
        std::fs::read(&self.path).unwrap()
    }
}

pub fn random_records(
    rng: &mut StdRng,
    points: usize,
    scales: usize,
    params: usize,
) -> Vec<PointRecord> {
    (0..points)
        .map(|_| {
            PointRecord::new(
                (0..params).map(|_| rng.gen_range(-1000.0..1000.0)).collect(),
                (0..scales)
                    .map(|_| (rng.gen::<f32>(), rng.gen::<f32>()))
                    .collect(),
            )
        })
        .collect()
}

pub fn write_file(
    path: &Path,
    scales: &[f32],
    records: &[PointRecord],
    rng: &mut StdRng,
) -> MscHeader {
    let params = records.first().map_or(0, |r| r.params.len());
    let header = MscHeader::new(records.len(), scales.to_vec(), params).unwrap();
    let mut writer = MscWriter::create(path, header.clone()).unwrap();
    for record in records {
        let aux: Vec<f32> = scales.iter().map(|_| rng.gen_range(1.0..300.0)).collect();
        writer.write_point_with_auxiliary(record, &aux).unwrap();
    }
    writer.finish().unwrap();
    header
}

pub fn fixture(seed: u64, points: usize, scales: &[f32], params: usize) -> Fixture {
    let mut rng = StdRng::seed_from_u64(seed);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.msc");
    let records = random_records(&mut rng, points, scales.len(), params);
    let header = write_file(&path, scales, &records, &mut rng);
    Fixture {
        dir,
        path,
        header,
        records,
    }
}

/// Write `bytes` to a fresh file inside `dir`
pub fn write_raw(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Little-endian header built field by field, bypassing validation
pub fn raw_header(point_count: i32, scales: &[f32], param_count: i32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&point_count.to_le_bytes());
    out.extend_from_slice(&(scales.len() as i32).to_le_bytes());
    for s in scales {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out.extend_from_slice(&param_count.to_le_bytes());
    out
}
