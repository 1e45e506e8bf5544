//! Headless Chrome implementation of the render engine.
//!
//! Each session launches its own browser process; dropping the browser
//! kills the process, so closing a session is just dropping its handles.

use crate::error::{Result, TermoError};
use crate::pipeline::compose::PrintSettings;
use crate::pipeline::render::{RenderEngine, RenderSession};
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};
use log::debug;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Placeholder for a band that has no template, so Chrome does not print
/// its default title/URL line there.
const EMPTY_BAND: &str = "<span></span>";

#[derive(Debug, Clone, Default)]
pub struct ChromeEngine {
    /// Browser binary; auto-detected when `None`.
    chrome_path: Option<PathBuf>,
}

impl ChromeEngine {
    pub fn new(chrome_path: Option<PathBuf>) -> Self {
        Self { chrome_path }
    }

    fn launch(&self) -> Result<ChromeSession> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .path(self.chrome_path.clone())
            .build()
            .map_err(TermoError::render)?;
        let browser = Browser::new(options).map_err(TermoError::render)?;
        let tab = browser.new_tab().map_err(TermoError::render)?;
        debug!("Chrome session started");
        Ok(ChromeSession {
            browser: Some(browser),
            tab,
            page: None,
        })
    }
}

impl RenderEngine for ChromeEngine {
    fn open_session(&self) -> Result<Box<dyn RenderSession>> {
        Ok(Box::new(self.launch()?))
    }
}

struct ChromeSession {
    browser: Option<Browser>,
    tab: Arc<Tab>,
    /// HTML staged on disk for the current page; removed on close.
    page: Option<NamedTempFile>,
}

impl RenderSession for ChromeSession {
    fn load_html(&mut self, html: &str) -> Result<()> {
        let mut page = tempfile::Builder::new()
            .prefix("termo-")
            .suffix(".html")
            .tempfile()
            .map_err(TermoError::render)?;
        page.write_all(html.as_bytes())
            .and_then(|_| page.flush())
            .map_err(TermoError::render)?;

        let url = format!("file://{}", page.path().display());
        self.page = Some(page);
        self.tab
            .navigate_to(&url)
            .map_err(TermoError::render)?
            .wait_until_navigated()
            .map_err(TermoError::render)?;
        Ok(())
    }

    fn export_pdf(&mut self, settings: &PrintSettings) -> Result<Vec<u8>> {
        let native = settings.uses_native_bands();
        let band = |template: &Option<String>| {
            native.then(|| template.clone().unwrap_or_else(|| EMPTY_BAND.to_string()))
        };
        let options = PrintToPdfOptions {
            landscape: Some(false),
            display_header_footer: Some(native),
            print_background: Some(settings.print_background),
            paper_width: Some(settings.paper_width.inches()),
            paper_height: Some(settings.paper_height.inches()),
            margin_top: Some(settings.margins.top.inches()),
            margin_bottom: Some(settings.margins.bottom.inches()),
            margin_left: Some(settings.margins.left.inches()),
            margin_right: Some(settings.margins.right.inches()),
            header_template: band(&settings.header_template),
            footer_template: band(&settings.footer_template),
            prefer_css_page_size: Some(false),
            ..Default::default()
        };
        self.tab.print_to_pdf(Some(options)).map_err(TermoError::render)
    }

    fn close(&mut self) -> Result<()> {
        let closed = match self.browser {
            Some(_) => self.tab.close(false).map(|_| ()).map_err(TermoError::render),
            None => Ok(()),
        };
        self.browser = None;
        self.page = None;
        closed
    }
}
