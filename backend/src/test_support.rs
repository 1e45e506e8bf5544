//! Fixtures shared by the unit tests.

use crate::catalog::{Catalog, SqliteCatalog};
use crate::error::{Result, TermoError};
use crate::pipeline::assets::{AssetLoader, Letterhead, LetterheadImage};
use crate::pipeline::compose::{PaginationStrategy, PrintSettings};
use crate::pipeline::render::{PdfRenderer, RenderEngine, RenderSession};
use crate::pipeline::TermGenerator;
use crate::state::AppState;
use common::model::condominium::Condominium;
use common::model::document::DocumentTemplate;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const FAKE_PDF: &[u8] = b"%PDF-1.7\n%fake\n";

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height))
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

pub fn sample_document() -> DocumentTemplate {
    DocumentTemplate {
        id: "acordo_extra".to_string(),
        name: "Acordo Extrajudicial".to_string(),
        template_file: "acordo_extra.html".to_string(),
    }
}

pub fn sample_condominium() -> Condominium {
    Condominium {
        id: "1".to_string(),
        name: Some("Residencial Ipê".to_string()),
        tax_id: Some("12.345.678/0001-90".to_string()),
        address: Some("Rua das Flores, 100".to_string()),
        neighborhood: Some("Centro".to_string()),
        city: Some("São Paulo".to_string()),
        representative: Some("João Souza".to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Open,
    Load,
    Export,
}

#[derive(Default)]
struct Recorder {
    opened: AtomicUsize,
    closed: AtomicUsize,
    last_html: Mutex<Option<String>>,
    last_settings: Mutex<Option<PrintSettings>>,
}

/// Render engine that records what it is asked to do and returns a canned PDF.
pub struct RecordingEngine {
    recorder: Arc<Recorder>,
    fail_at: Option<FailAt>,
    output: Vec<u8>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::with_output(FAKE_PDF.to_vec())
    }

    pub fn with_output(output: Vec<u8>) -> Self {
        Self {
            recorder: Arc::default(),
            fail_at: None,
            output,
        }
    }

    pub fn failing(at: FailAt) -> Self {
        Self {
            fail_at: Some(at),
            ..Self::new()
        }
    }

    pub fn opened(&self) -> usize {
        self.recorder.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.recorder.closed.load(Ordering::SeqCst)
    }

    pub fn last_html(&self) -> Option<String> {
        self.recorder.last_html.lock().unwrap().clone()
    }

    pub fn last_settings(&self) -> Option<PrintSettings> {
        self.recorder.last_settings.lock().unwrap().clone()
    }
}

impl RenderEngine for RecordingEngine {
    fn open_session(&self) -> Result<Box<dyn RenderSession>> {
        if self.fail_at == Some(FailAt::Open) {
            return Err(TermoError::render("browser failed to launch"));
        }
        self.recorder.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingSession {
            recorder: self.recorder.clone(),
            fail_at: self.fail_at,
            output: self.output.clone(),
        }))
    }
}

struct RecordingSession {
    recorder: Arc<Recorder>,
    fail_at: Option<FailAt>,
    output: Vec<u8>,
}

impl RenderSession for RecordingSession {
    fn load_html(&mut self, html: &str) -> Result<()> {
        *self.recorder.last_html.lock().unwrap() = Some(html.to_string());
        if self.fail_at == Some(FailAt::Load) {
            return Err(TermoError::render("navigation failed"));
        }
        Ok(())
    }

    fn export_pdf(&mut self, settings: &PrintSettings) -> Result<Vec<u8>> {
        *self.recorder.last_settings.lock().unwrap() = Some(settings.clone());
        if self.fail_at == Some(FailAt::Export) {
            return Err(TermoError::render("printToPDF failed"));
        }
        Ok(self.output.clone())
    }

    fn close(&mut self) -> Result<()> {
        self.recorder.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A catalog, a templates directory and a letterhead on disk, plus a
/// recording render engine.
pub struct Fixture {
    dir: tempfile::TempDir,
    pub catalog: Arc<SqliteCatalog>,
    pub engine: Arc<RecordingEngine>,
    letterhead: Arc<Letterhead>,
}

impl Fixture {
    /// Registers `sample_document` with `template` as its file content and
    /// `sample_condominium`.
    pub fn new(template: &str) -> Self {
        Self::with_engine(template, RecordingEngine::new())
    }

    pub fn with_engine(template: &str, engine: RecordingEngine) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let catalog = SqliteCatalog::new(dir.path().join("termosign.sqlite"));
        catalog.ensure_schema().unwrap();
        catalog.upsert_document(&sample_document()).unwrap();
        catalog.upsert_condominium(&sample_condominium()).unwrap();

        let fixture = Self {
            dir,
            catalog: Arc::new(catalog),
            engine: Arc::new(engine),
            letterhead: Arc::new(Letterhead {
                header: LetterheadImage::from_bytes(&png_bytes(210, 40)),
                footer: LetterheadImage::from_bytes(&png_bytes(210, 35)),
            }),
        };
        std::fs::create_dir_all(fixture.templates_dir()).unwrap();
        std::fs::write(fixture.template_path(), template).unwrap();
        fixture
    }

    fn templates_dir(&self) -> PathBuf {
        self.dir.path().join("templates")
    }

    fn template_path(&self) -> PathBuf {
        self.templates_dir().join(sample_document().template_file)
    }

    pub fn remove_template(&self) {
        std::fs::remove_file(self.template_path()).unwrap();
    }

    pub fn generator(&self, strategy: PaginationStrategy) -> TermGenerator {
        let catalog: Arc<dyn Catalog> = self.catalog.clone();
        TermGenerator::new(
            catalog,
            AssetLoader::new(self.templates_dir()),
            self.letterhead.clone(),
            PdfRenderer::new(self.engine.clone()),
            strategy,
        )
    }

    pub fn state(&self, max_attachment_bytes: usize) -> AppState {
        AppState::new(
            self.generator(PaginationStrategy::table_flow()),
            self.catalog.clone(),
            max_attachment_bytes,
        )
    }
}
