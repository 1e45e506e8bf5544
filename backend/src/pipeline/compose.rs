//! Composition of the final printable HTML.
//!
//! The letterhead has to appear on every page of the PDF. Two layouts are
//! supported and chosen by configuration:
//!
//! * [`PaginationStrategy::TableFlow`] puts the header and footer images in
//!   the `<thead>`/`<tfoot>` of a full-page table. The browser repeats table
//!   header and footer groups on every printed page, so page margins are
//!   zero and band sizes live in the document itself.
//! * [`PaginationStrategy::NativeBands`] leaves the body free of letterhead
//!   and hands header and footer to the renderer's own header/footer
//!   templates, reserving page margins tall enough to hold them.

use crate::pipeline::embed::InlineAsset;
use std::fmt;
use std::str::FromStr;

/// A length in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Cm(pub f64);

impl Cm {
    pub fn inches(self) -> f64 {
        self.0 / 2.54
    }
}

impl fmt::Display for Cm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}cm", self.0)
    }
}

pub const A4_WIDTH: Cm = Cm(21.0);
pub const A4_HEIGHT: Cm = Cm(29.7);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub top: Cm,
    pub bottom: Cm,
    pub left: Cm,
    pub right: Cm,
}

impl PageMargins {
    pub const ZERO: PageMargins = PageMargins {
        top: Cm(0.0),
        bottom: Cm(0.0),
        left: Cm(0.0),
        right: Cm(0.0),
    };
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaginationStrategy {
    TableFlow {
        header_height: Cm,
        footer_height: Cm,
        /// Horizontal padding of the body cell.
        side_padding: Cm,
    },
    NativeBands {
        margins: PageMargins,
    },
}

impl PaginationStrategy {
    pub fn table_flow() -> Self {
        PaginationStrategy::TableFlow {
            header_height: Cm(4.0),
            footer_height: Cm(3.5),
            side_padding: Cm(2.0),
        }
    }

    pub fn native_bands() -> Self {
        PaginationStrategy::NativeBands {
            margins: PageMargins {
                top: Cm(5.0),
                bottom: Cm(4.0),
                left: Cm(2.0),
                right: Cm(2.0),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaginationStrategy::TableFlow { .. } => "table",
            PaginationStrategy::NativeBands { .. } => "native",
        }
    }
}

impl FromStr for PaginationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" | "table-flow" => Ok(PaginationStrategy::table_flow()),
            "native" | "native-bands" => Ok(PaginationStrategy::native_bands()),
            other => Err(format!(
                "unknown pagination strategy '{}', use 'table' or 'native'",
                other
            )),
        }
    }
}

/// Page setup handed to the renderer along with the HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintSettings {
    pub paper_width: Cm,
    pub paper_height: Cm,
    pub margins: PageMargins,
    pub print_background: bool,
    pub header_template: Option<String>,
    pub footer_template: Option<String>,
}

impl PrintSettings {
    fn a4(margins: PageMargins) -> Self {
        Self {
            paper_width: A4_WIDTH,
            paper_height: A4_HEIGHT,
            margins,
            print_background: true,
            header_template: None,
            footer_template: None,
        }
    }

    pub fn uses_native_bands(&self) -> bool {
        self.header_template.is_some() || self.footer_template.is_some()
    }
}

/// Fully resolved, self-contained HTML ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedDocument {
    html: String,
    print: PrintSettings,
}

impl ComposedDocument {
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn print_settings(&self) -> &PrintSettings {
        &self.print
    }
}

const BASE_STYLE: &str = "html, body { font-family: 'Helvetica', 'Arial', sans-serif; \
font-size: 11pt; margin: 0; padding: 0; -webkit-print-color-adjust: exact; print-color-adjust: exact; }";

fn page(style: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<style>\n{}\n{}\n</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        BASE_STYLE, style, body
    )
}

fn band_image(src: &InlineAsset, style: &str) -> String {
    if src.is_empty() {
        String::new()
    } else {
        format!("<img class=\"band\" src=\"{}\" style=\"{}\">", src, style)
    }
}

/// Builds the printable document for `body_html` under `strategy`.
///
/// # Arguments
/// * `body_html` - The template after substitution.
/// * `header`, `footer` - Letterhead images; an empty asset leaves its band blank.
/// * `strategy` - Where the letterhead goes and which page margins are used.
///
/// # Returns
/// A self-contained HTML document and the print settings it must be printed with.
pub fn compose(
    body_html: &str,
    header: &InlineAsset,
    footer: &InlineAsset,
    strategy: &PaginationStrategy,
) -> ComposedDocument {
    match strategy {
        PaginationStrategy::TableFlow {
            header_height,
            footer_height,
            side_padding,
        } => compose_table_flow(
            body_html,
            header,
            footer,
            *header_height,
            *footer_height,
            *side_padding,
        ),
        PaginationStrategy::NativeBands { margins } => {
            compose_native_bands(body_html, header, footer, margins)
        }
    }
}

fn compose_table_flow(
    body_html: &str,
    header: &InlineAsset,
    footer: &InlineAsset,
    header_height: Cm,
    footer_height: Cm,
    side_padding: Cm,
) -> ComposedDocument {
    let style = format!(
        "table.layout {{ width: 100%; border-collapse: collapse; }}\n\
thead {{ display: table-header-group; }}\n\
tfoot {{ display: table-footer-group; }}\n\
tbody {{ display: table-row-group; }}\n\
td {{ padding: 0; }}\n\
td.content {{ padding: 0 {}; vertical-align: top; }}\n\
div.band {{ width: 100%; }}\n\
img.band {{ display: block; position: fixed; left: 0; right: 0; width: 100%; object-fit: contain; }}",
        side_padding
    );
    // The thead/tfoot rows only reserve space on each page; the images are
    // fixed to the page box so the footer sits at the bottom of every page,
    // including a short last one.
    let body = format!(
        "<table class=\"layout\">\n\
<thead><tr><td><div class=\"band header\" style=\"height: {};\">{}</div></td></tr></thead>\n\
<tfoot><tr><td><div class=\"band footer\" style=\"height: {};\">{}</div></td></tr></tfoot>\n\
<tbody><tr><td class=\"content\">\n{}\n</td></tr></tbody>\n\
</table>",
        header_height,
        band_image(header, &format!("top: 0; height: {};", header_height)),
        footer_height,
        band_image(footer, &format!("bottom: 0; height: {};", footer_height)),
        body_html
    );
    ComposedDocument {
        html: page(&style, &body),
        print: PrintSettings::a4(PageMargins::ZERO),
    }
}

/// Header/footer template for the renderer's native bands. The image is
/// sized to the reserved margin so it can never reach the body area.
fn native_band(src: &InlineAsset, height: Cm) -> String {
    format!(
        "<div style=\"width: 100%; height: {}; margin: 0; padding: 0; \
-webkit-print-color-adjust: exact;\">{}</div>",
        height,
        band_image(src, "display: block; width: 100%; height: 100%; object-fit: contain;")
    )
}

fn compose_native_bands(
    body_html: &str,
    header: &InlineAsset,
    footer: &InlineAsset,
    margins: &PageMargins,
) -> ComposedDocument {
    let body = format!("<main class=\"content\">\n{}\n</main>", body_html);
    let mut print = PrintSettings::a4(*margins);
    print.header_template = Some(native_band(header, margins.top));
    print.footer_template = Some(native_band(footer, margins.bottom));
    ComposedDocument {
        html: page("main.content { margin: 0; padding: 0; }", &body),
        print,
    }
}
