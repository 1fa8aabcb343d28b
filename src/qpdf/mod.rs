pub mod json;

use crate::engine::{EngineOutput, EngineRunner, SystemEngine};
use crate::error::{Error, Result};
use crate::page_range;
use crate::rotation::Rotation;
use json::{JsonSchema, PageSize};
use regex::Regex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// One source document in a combine operation, with an optional page range.
/// No range means the whole document.
#[derive(Debug, Clone)]
pub struct FileRange {
    pub path: PathBuf,
    pub range: Option<String>,
}

impl FileRange {
    pub fn whole(path: impl Into<PathBuf>) -> Self {
        FileRange {
            path: path.into(),
            range: None,
        }
    }

    pub fn pages(path: impl Into<PathBuf>, range: impl Into<String>) -> Self {
        FileRange {
            path: path.into(),
            range: Some(range.into()),
        }
    }
}

/// The operation planner: builds one engine invocation per operation and
/// classifies its outcome. All document access goes through the engine; this
/// type never opens a PDF itself.
///
/// In-place operations rewrite their source file, so two planners targeting
/// the same path concurrently can race; callers serialize per-path access.
pub struct Pdf<R = SystemEngine> {
    engine: R,
}

impl Pdf<SystemEngine> {
    /// A planner backed by the given engine binary (normally "qpdf").
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Pdf {
            engine: SystemEngine::new(program),
        }
    }
}

impl<R: EngineRunner> Pdf<R> {
    pub fn with_runner(engine: R) -> Self {
        Pdf { engine }
    }

    /// Major version of the installed engine.
    pub fn version(&self) -> Result<u32> {
        let output = self.run_checked(vec!["--version".into()])?;
        let stdout = output.stdout_lossy();
        let major = version_re()
            .captures(&stdout)
            .and_then(|caps| caps[1].parse().ok())
            .ok_or_else(|| {
                Error::UnexpectedOutput(format!("no version banner in {:?}", stdout.trim()))
            })?;
        Ok(major)
    }

    /// Whether the file is a PDF the engine can process (warnings allowed).
    pub fn is_pdf(&self, path: &Path) -> Result<bool> {
        let args: Vec<OsString> = vec!["--check".into(), path.into()];
        let output = self.engine.run(&args)?;
        Ok(output.soft_success())
    }

    pub fn page_count(&self, path: &Path) -> Result<u32> {
        let output = self.run_checked(vec!["--show-npages".into(), path.into()])?;
        let stdout = output.stdout_lossy();
        let count = integer_re()
            .find(&stdout)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| {
                Error::UnexpectedOutput(format!("no page count in {:?}", stdout.trim()))
            })?;
        Ok(count)
    }

    /// Rotate the pages in `range`, in place. The range expression is passed
    /// through verbatim; the engine speaks the same range syntax.
    pub fn rotate(&self, path: &Path, direction: Rotation, range: &str) -> Result<()> {
        let rotate_arg = format!("--rotate={}:{}", direction.angle_arg(), range);
        self.run_checked(vec![
            path.into(),
            rotate_arg.into(),
            "--".into(),
            "--replace-input".into(),
        ])?;
        Ok(())
    }

    /// Keep only the pages in `range`, in place.
    pub fn trim_to_range(&self, path: &Path, range: &str) -> Result<()> {
        self.run_checked(vec![
            path.into(),
            "--pages".into(),
            ".".into(),
            range.into(),
            "--".into(),
            "--replace-input".into(),
        ])?;
        Ok(())
    }

    /// Concatenate page selections from several documents into `output`.
    /// Entry order determines output page order.
    pub fn combine_ranges_from_files(&self, entries: &[FileRange], output: &Path) -> Result<()> {
        let mut args: Vec<OsString> = vec!["--empty".into(), "--pages".into()];
        for entry in entries {
            args.push(entry.path.as_path().into());
            if let Some(range) = &entry.range {
                args.push(range.into());
            }
        }
        args.push("--".into());
        args.push(output.into());
        self.run_checked(args)?;
        Ok(())
    }

    /// Copy the pages in `range` to a new document at `output`.
    pub fn copy_pages(&self, path: &Path, output: &Path, range: &str) -> Result<()> {
        let pages = self.resolve_range(range, path)?;
        self.run_checked(vec![
            "--empty".into(),
            "--pages".into(),
            path.into(),
            page_range::render(&pages).into(),
            "--".into(),
            output.into(),
        ])?;
        Ok(())
    }

    /// Drop the pages in `range`, in place. Defined as keeping the
    /// complement, not as a distinct engine primitive.
    pub fn remove_pages(&self, path: &Path, range: &str) -> Result<()> {
        let count = self.page_count(path)?;
        let removed = page_range::resolve(range, Some(count))?;
        let kept = page_range::complement(&removed, count);
        self.run_checked(vec![
            path.into(),
            "--pages".into(),
            path.into(),
            page_range::render(&kept).into(),
            "--".into(),
            "--replace-input".into(),
        ])?;
        Ok(())
    }

    /// Overlay `stamp`'s pages onto `path`, in place. With a range, only
    /// those pages are stamped; without one, the stamp repeats across the
    /// whole document.
    pub fn apply_stamp(&self, path: &Path, stamp: &Path, range: Option<&str>) -> Result<()> {
        let to_arg: OsString = match range {
            Some(range) => {
                let pages = self.resolve_range(range, path)?;
                format!("--to={}", page_range::render(&pages)).into()
            }
            None => "--repeat=1".into(),
        };
        self.run_checked(vec![
            path.into(),
            "--overlay".into(),
            stamp.into(),
            to_arg,
            "--".into(),
            "--replace-input".into(),
        ])?;
        Ok(())
    }

    /// Decoded `--json` introspection output.
    pub fn json_info(&self, path: &Path) -> Result<serde_json::Value> {
        let output = self.run_checked(vec![path.into(), "--json".into()])?;
        Ok(serde_json::from_slice(&output.stdout)?)
    }

    /// Visual [width, height] in inches for every page, in document order.
    /// Pages without a MediaBox yield None.
    pub fn page_sizes(&self, path: &Path) -> Result<Vec<Option<PageSize>>> {
        let schema = JsonSchema::for_version(self.version()?);
        let info = self.json_info(path)?;
        let pages = schema.page_objects(&info)?;
        Ok(pages.into_iter().map(json::page_size).collect())
    }

    /// Resolve a range expression against a document's page count.
    fn resolve_range(&self, range: &str, path: &Path) -> Result<Vec<u32>> {
        let count = self.page_count(path)?;
        page_range::resolve(range, Some(count))
    }

    fn run_checked(&self, args: Vec<OsString>) -> Result<EngineOutput> {
        self.engine.run(&args)?.checked()
    }
}

fn version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"version (\d+)\.").expect("static pattern"))
}

fn integer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("static pattern"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Records every argv it is handed and replays scripted outputs.
    struct ScriptedEngine {
        calls: RefCell<Vec<Vec<OsString>>>,
        outputs: RefCell<VecDeque<EngineOutput>>,
    }

    impl ScriptedEngine {
        fn new(outputs: impl IntoIterator<Item = EngineOutput>) -> Self {
            ScriptedEngine {
                calls: RefCell::new(Vec::new()),
                outputs: RefCell::new(outputs.into_iter().collect()),
            }
        }

        fn ok(stdout: &str) -> EngineOutput {
            EngineOutput {
                status: 0,
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
            }
        }

        fn calls(&self) -> Vec<Vec<OsString>> {
            self.calls.borrow().clone()
        }
    }

    impl EngineRunner for ScriptedEngine {
        fn run(&self, args: &[OsString]) -> Result<EngineOutput> {
            self.calls.borrow_mut().push(args.to_vec());
            Ok(self
                .outputs
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| ScriptedEngine::ok("")))
        }
    }

    fn argv(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    fn planner(outputs: impl IntoIterator<Item = EngineOutput>) -> Pdf<ScriptedEngine> {
        Pdf::with_runner(ScriptedEngine::new(outputs))
    }

    #[test]
    fn test_version_parse() {
        let pdf = planner([ScriptedEngine::ok(
            "qpdf version 11.9.1\nRun qpdf --copyright to see copyright and license information.\n",
        )]);
        assert_eq!(pdf.version().unwrap(), 11);
    }

    #[test]
    fn test_version_garbage_output() {
        let pdf = planner([ScriptedEngine::ok("not an engine\n")]);
        assert!(matches!(
            pdf.version(),
            Err(Error::UnexpectedOutput(_))
        ));
    }

    #[test]
    fn test_page_count_parse() {
        let pdf = planner([ScriptedEngine::ok("19\n")]);
        assert_eq!(pdf.page_count(Path::new("a.pdf")).unwrap(), 19);
        assert_eq!(
            pdf.engine.calls(),
            vec![argv(&["--show-npages", "a.pdf"])]
        );
    }

    #[test]
    fn test_is_pdf_maps_soft_success() {
        let pdf = planner([EngineOutput {
            status: 3,
            stdout: Vec::new(),
            stderr: b"warnings".to_vec(),
        }]);
        assert!(pdf.is_pdf(Path::new("warned.pdf")).unwrap());

        let pdf = planner([EngineOutput {
            status: 2,
            stdout: Vec::new(),
            stderr: b"not a pdf".to_vec(),
        }]);
        assert!(!pdf.is_pdf(Path::new("bad.pdf")).unwrap());
    }

    #[test]
    fn test_rotate_argv() {
        let pdf = planner([]);
        pdf.rotate(Path::new("doc.pdf"), Rotation::Left, "1-5").unwrap();
        assert_eq!(
            pdf.engine.calls(),
            vec![argv(&["doc.pdf", "--rotate=-90:1-5", "--", "--replace-input"])]
        );
    }

    #[test]
    fn test_trim_argv() {
        let pdf = planner([]);
        pdf.trim_to_range(Path::new("doc.pdf"), "2-end").unwrap();
        assert_eq!(
            pdf.engine.calls(),
            vec![argv(&["doc.pdf", "--pages", ".", "2-end", "--", "--replace-input"])]
        );
    }

    #[test]
    fn test_combine_flattens_in_entry_order() {
        let pdf = planner([]);
        let entries = vec![
            FileRange::pages("a.pdf", "1"),
            FileRange::pages("b.pdf", "1-2"),
            FileRange::pages("c.pdf", "2-4"),
            FileRange::whole("d.pdf"),
        ];
        pdf.combine_ranges_from_files(&entries, Path::new("out.pdf"))
            .unwrap();
        assert_eq!(
            pdf.engine.calls(),
            vec![argv(&[
                "--empty", "--pages", "a.pdf", "1", "b.pdf", "1-2", "c.pdf", "2-4", "d.pdf",
                "--", "out.pdf",
            ])]
        );
    }

    #[test]
    fn test_copy_resolves_against_page_count() {
        let pdf = planner([ScriptedEngine::ok("4\n")]);
        pdf.copy_pages(Path::new("doc.pdf"), Path::new("out.pdf"), "3-1,9")
            .unwrap();
        assert_eq!(
            pdf.engine.calls(),
            vec![
                argv(&["--show-npages", "doc.pdf"]),
                argv(&["--empty", "--pages", "doc.pdf", "1,2,3", "--", "out.pdf"]),
            ]
        );
    }

    #[test]
    fn test_remove_keeps_the_complement() {
        let pdf = planner([ScriptedEngine::ok("4\n")]);
        pdf.remove_pages(Path::new("doc.pdf"), "2-3").unwrap();
        assert_eq!(
            pdf.engine.calls(),
            vec![
                argv(&["--show-npages", "doc.pdf"]),
                argv(&["doc.pdf", "--pages", "doc.pdf", "1,4", "--", "--replace-input"]),
            ]
        );
    }

    #[test]
    fn test_stamp_with_range() {
        let pdf = planner([ScriptedEngine::ok("5\n")]);
        pdf.apply_stamp(Path::new("doc.pdf"), Path::new("stamp.pdf"), Some("2-end"))
            .unwrap();
        assert_eq!(
            pdf.engine.calls(),
            vec![
                argv(&["--show-npages", "doc.pdf"]),
                argv(&[
                    "doc.pdf",
                    "--overlay",
                    "stamp.pdf",
                    "--to=2,3,4,5",
                    "--",
                    "--replace-input",
                ]),
            ]
        );
    }

    #[test]
    fn test_stamp_whole_document_repeats() {
        let pdf = planner([]);
        pdf.apply_stamp(Path::new("doc.pdf"), Path::new("stamp.pdf"), None)
            .unwrap();
        assert_eq!(
            pdf.engine.calls(),
            vec![argv(&[
                "doc.pdf",
                "--overlay",
                "stamp.pdf",
                "--repeat=1",
                "--",
                "--replace-input",
            ])]
        );
    }

    #[test]
    fn test_fatal_status_surfaces_diagnostics() {
        let pdf = planner([EngineOutput {
            status: 2,
            stdout: Vec::new(),
            stderr: b"doc.pdf: not a PDF file\n".to_vec(),
        }]);
        match pdf.trim_to_range(Path::new("doc.pdf"), "1") {
            Err(Error::EngineFailed { status: 2, stderr }) => {
                assert_eq!(stderr, "doc.pdf: not a PDF file");
            }
            other => panic!("expected EngineFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_page_sizes_legacy_schema() {
        let info = r#"{
            "version": 1,
            "objects": {
                "obj:1 0 R": {"/Type": "/Catalog"},
                "obj:2 0 R": {"/Type": "/Page", "/MediaBox": [0, 0, 612, 792]},
                "obj:3 0 R": {"/Type": "/Page", "/MediaBox": [0, 0, 612, 792], "/Rotate": 90}
            }
        }"#;
        let pdf = planner([
            ScriptedEngine::ok("qpdf version 10.6.3\n"),
            ScriptedEngine::ok(info),
        ]);
        let sizes = pdf.page_sizes(Path::new("doc.pdf")).unwrap();
        assert_eq!(sizes.len(), 2);
        let first = sizes[0].unwrap();
        assert_eq!((first.width, first.height), (8.5, 11.0));
        let second = sizes[1].unwrap();
        assert_eq!((second.width, second.height), (11.0, 8.5));
    }

    #[test]
    fn test_page_sizes_v11_schema() {
        let info = r#"{
            "qpdf": [
                {"jsonversion": 2, "pdfversion": "1.7"},
                {
                    "obj:1 0 R": {"value": {"/Type": "/Pages", "/Count": 2}},
                    "obj:2 0 R": {"value": {"/Type": "/Page", "/MediaBox": [0, 0, 612, 792]}},
                    "obj:3 0 R": {"value": {"/Type": "/Page"}},
                    "trailer": {"value": {"/Size": 4}}
                }
            ]
        }"#;
        let pdf = planner([
            ScriptedEngine::ok("qpdf version 11.9.1\n"),
            ScriptedEngine::ok(info),
        ]);
        let sizes = pdf.page_sizes(Path::new("doc.pdf")).unwrap();
        assert_eq!(sizes.len(), 2);
        assert!(sizes[0].is_some());
        // a page with no MediaBox has no reportable size
        assert!(sizes[1].is_none());
    }
}
