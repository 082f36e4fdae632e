//! Writes converted files into the output directory.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use report_analyzer::export::ExportArtifact;

/// Writes export artifacts under one directory without touching inputs.
///
/// A target that is one of the run's input files, or that an earlier file of the same run
/// already wrote, is refused.
#[derive(Debug)]
pub struct ArtifactWriter {
    out_dir: PathBuf,
    inputs: HashSet<PathBuf>,
    written: HashSet<PathBuf>,
}

impl ArtifactWriter {
    pub fn new<'a>(out_dir: impl Into<PathBuf>, inputs: impl IntoIterator<Item = &'a Path>) -> Self {
        Self {
            out_dir: out_dir.into(),
            inputs: inputs.into_iter().filter_map(|p| fs::canonicalize(p).ok()).collect(),
            written: HashSet::new(),
        }
    }

    /// Writes `artifact` as `<out_dir>/<artifact.file_name>` and returns the path written.
    pub fn write(&mut self, artifact: &ExportArtifact) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)?;
        let target = fs::canonicalize(&self.out_dir)?.join(&artifact.file_name);

        if self.inputs.contains(&target) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("refusing to overwrite input file {}", target.display()),
            ));
        }
        if !self.written.insert(target.clone()) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} was already written by an earlier file in this run", target.display()),
            ));
        }

        let mut file = File::create(&target)?;
        io::copy(&mut artifact.reader(), &mut file)?;
        log::info!("wrote {} ({} bytes)", target.display(), artifact.len());
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_analyzer::export::export;
    use report_analyzer::ingestion::{load_bytes, LoadOptions, ReportFormat};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("report_analyzer_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn artifact(original_name: &str) -> ExportArtifact {
        let ds = load_bytes(b"ID,Status\n1,Pass\n", "r.csv", &LoadOptions::default()).unwrap();
        export(&ds, ReportFormat::Csv, original_name).unwrap()
    }

    #[test]
    fn input_file_is_never_overwritten() {
        let dir = scratch_dir("input_guard");
        let input = dir.join("report.csv");
        fs::write(&input, "ID,Status,Security Level\n1,Pass,High\n").unwrap();

        let mut writer = ArtifactWriter::new(&dir, [input.as_path()]);
        let err = writer.write(&artifact("report.csv")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(
            fs::read_to_string(&input).unwrap(),
            "ID,Status,Security Level\n1,Pass,High\n"
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn second_write_to_same_target_is_refused() {
        let dir = scratch_dir("same_target");
        let out = dir.join("converted");
        let mut writer = ArtifactWriter::new(&out, std::iter::empty::<&Path>());

        let first = writer.write(&artifact("r.xlsx")).unwrap();
        assert_eq!(fs::read_to_string(&first).unwrap(), "ID,Status\n1,Pass\n");
        assert!(writer.write(&artifact("r.csv")).is_err());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unwritable_out_dir_is_an_error_not_a_panic() {
        let dir = scratch_dir("blocked");
        let blocker = dir.join("blocker");
        fs::write(&blocker, "").unwrap();

        let mut writer = ArtifactWriter::new(blocker.join("x"), std::iter::empty::<&Path>());
        assert!(writer.write(&artifact("a.csv")).is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
