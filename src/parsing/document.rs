use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::consts::{
    ACTIONS_HEADER, CONDITION_KEYS_DESCRIPTION_HEADER, CONDITION_KEYS_HEADER,
    CONDITION_KEYS_TYPE_HEADER, MAX_COLSPAN, MAX_ROWSPAN, NO_CONDITION_KEYS_SENTENCE,
    NO_RESOURCE_TYPES_SENTENCE, RESOURCE_TYPES_ARN_HEADER, RESOURCE_TYPES_HEADER,
    SERVICE_PREFIX_SENTENCE,
};

static TH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").expect("valid th selector"));
static THEAD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("thead").expect("valid thead selector"));
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid p selector"));
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid a selector"));
static CODE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".code").expect("valid code selector"));
static BODY_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody tr").expect("valid body row selector"));
static OUTER_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("thead tr, tfoot tr").expect("valid outer row selector"));

/// One `td` of a table row, reduced to what the decoders read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub rowspan: Option<usize>,
    pub colspan: Option<usize>,
    pub links: Vec<String>,
    pub paragraphs: Vec<String>,
}

impl Cell {
    fn from_element(element: ElementRef<'_>) -> Self {
        Self {
            text: element_text(element),
            rowspan: span_attr(element, "rowspan", MAX_ROWSPAN),
            colspan: span_attr(element, "colspan", MAX_COLSPAN),
            links: element.select(&LINK).map(element_text).collect(),
            paragraphs: element.select(&PARAGRAPH).map(element_text).collect(),
        }
    }
}

#[cfg(test)]
impl Cell {
    pub fn text(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            ..Self::default()
        }
    }

    pub fn with_rowspan(mut self, rowspan: usize) -> Self {
        self.rowspan = Some(rowspan);
        self
    }

    pub fn with_colspan(mut self, colspan: usize) -> Self {
        self.colspan = Some(colspan);
        self
    }

    pub fn with_links(mut self, links: &[&str]) -> Self {
        self.links = links.iter().map(|link| link.to_string()).collect();
        self
    }

    pub fn with_paragraphs(mut self, paragraphs: &[&str]) -> Self {
        self.paragraphs = paragraphs.iter().map(|p| p.to_string()).collect();
        self
    }
}

/// A `tr` viewed as its ordered `td` cells plus the raw markup for
/// diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub html: String,
}

impl Row {
    fn from_element(element: ElementRef<'_>) -> Self {
        let cells = element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "td")
            .map(Cell::from_element)
            .collect();
        Self {
            cells,
            html: element.inner_html(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Trimmed text of a column, empty when the row is too narrow.
    pub fn text_at(&self, index: usize) -> &str {
        self.cell(index).map(|cell| cell.text.as_str()).unwrap_or("")
    }

    pub fn links_at(&self, index: usize) -> &[String] {
        self.cell(index).map(|cell| cell.links.as_slice()).unwrap_or(&[])
    }

    pub fn paragraphs_at(&self, index: usize) -> &[String] {
        self.cell(index)
            .map(|cell| cell.paragraphs.as_slice())
            .unwrap_or(&[])
    }

    pub fn rowspan_at(&self, index: usize) -> Option<usize> {
        self.cell(index).and_then(|cell| cell.rowspan)
    }

    pub fn has_rowspan(&self) -> bool {
        self.cells.iter().any(|cell| cell.rowspan.is_some())
    }

    pub fn has_colspan(&self) -> bool {
        self.cells.iter().any(|cell| cell.colspan.is_some())
    }
}

/// Rows of one located table. `body` holds the `tbody` rows in document
/// order; `outer` holds header and footer rows, which only the colspan
/// check looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub outer: Vec<Row>,
    pub body: Vec<Row>,
}

impl Table {
    fn from_element(element: ElementRef<'_>) -> Self {
        Self {
            outer: element.select(&OUTER_ROW).map(Row::from_element).collect(),
            body: element.select(&BODY_ROW).map(Row::from_element).collect(),
        }
    }

    pub fn all_rows(&self) -> impl Iterator<Item = &Row> {
        self.outer.iter().chain(self.body.iter())
    }
}

#[cfg(test)]
impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        let html = cells
            .iter()
            .map(|cell| format!("<td>{}</td>", cell.text))
            .collect::<String>();
        Self { cells, html }
    }
}

#[cfg(test)]
impl Table {
    pub fn from_body(body: Vec<Row>) -> Self {
        Self {
            outer: Vec::new(),
            body,
        }
    }
}

/// A parsed service authorization page.
pub struct ServicePage {
    html: Html,
}

impl ServicePage {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    pub fn service_prefix(&self) -> String {
        self.html
            .select(&PARAGRAPH)
            .find(|p| element_text(*p).contains(SERVICE_PREFIX_SENTENCE))
            .and_then(|p| p.select(&CODE).next())
            .map(element_text)
            .unwrap_or_default()
    }

    pub fn actions_table(&self) -> Option<Table> {
        self.html
            .select(&TH)
            .find(|th| element_text(*th).contains(ACTIONS_HEADER))
            .and_then(enclosing_table)
            .map(Table::from_element)
    }

    pub fn resource_types_table(&self) -> Option<Table> {
        if self.has_sentence(NO_RESOURCE_TYPES_SENTENCE) {
            return None;
        }
        self.table_under_head(&[RESOURCE_TYPES_HEADER, RESOURCE_TYPES_ARN_HEADER])
    }

    pub fn condition_keys_table(&self) -> Option<Table> {
        if self.has_sentence(NO_CONDITION_KEYS_SENTENCE) {
            return None;
        }
        self.table_under_head(&[
            CONDITION_KEYS_HEADER,
            CONDITION_KEYS_DESCRIPTION_HEADER,
            CONDITION_KEYS_TYPE_HEADER,
        ])
    }

    fn has_sentence(&self, sentence: &str) -> bool {
        self.html
            .select(&PARAGRAPH)
            .any(|p| element_text(p).contains(sentence))
    }

    fn table_under_head(&self, fingerprints: &[&str]) -> Option<Table> {
        self.html
            .select(&THEAD)
            .find(|head| {
                let text = element_text(*head);
                fingerprints.iter().all(|needle| text.contains(needle))
            })
            .and_then(enclosing_table)
            .map(Table::from_element)
    }
}

fn enclosing_table(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "table")
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Present-but-malformed spans count as 1 and oversized ones are clamped,
/// which is how browsers render them.
fn span_attr(element: ElementRef<'_>, name: &str, max: usize) -> Option<usize> {
    element
        .value()
        .attr(name)
        .map(|raw| raw.trim().parse::<usize>().map_or(1, |span| span.min(max)))
}
