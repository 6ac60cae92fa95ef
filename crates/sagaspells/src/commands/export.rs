//! # Export
//!
//! Builds the document handed to a printable-artifact renderer. The renderer itself (PDF
//! layout, pagination) lives outside this crate; what it receives is an
//! [`ExportDocument`]: a title, an optional subtitle, the file name the artifact should get,
//! and the spells in display order.
//!
//! Documents can be written to disk in one of two formats, picked by extension:
//! - `.md` / `.markdown`: a readable Markdown summary
//! - anything else: the document as pretty-printed JSON, for the renderer to pick up

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SagaError};
use crate::model::{Spell, Spellbook};
use crate::store::CollectionStore;

pub const CATALOG_TITLE: &str = "Saga Spells";
pub const CATALOG_FILE_NAME: &str = "saga-spells.pdf";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub title: String,
    pub subtitle: Option<String>,
    pub file_name: String,
    pub spells: Vec<Spell>,
}

impl ExportDocument {
    /// The whole (or currently filtered) catalog.
    pub fn for_catalog(spells: &[Spell]) -> Self {
        Self {
            title: CATALOG_TITLE.to_string(),
            subtitle: None,
            file_name: CATALOG_FILE_NAME.to_string(),
            spells: spells.to_vec(),
        }
    }

    pub fn for_spellbook(book: &Spellbook) -> Self {
        Self {
            title: book.name.clone(),
            subtitle: Some(format!("Character: {}", book.character)),
            file_name: pdf_file_name(&book.name),
            spells: book.spells.clone(),
        }
    }
}

/// `"My Fire Book"` becomes `"my-fire-book.pdf"`.
pub fn pdf_file_name(name: &str) -> String {
    let slug = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("{}.pdf", slug)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".md") || lower.ends_with(".markdown") {
            ExportFormat::Markdown
        } else {
            ExportFormat::Json
        }
    }
}

pub fn render(doc: &ExportDocument, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(doc)?),
        ExportFormat::Markdown => Ok(render_markdown(doc)),
    }
}

fn render_markdown(doc: &ExportDocument) -> String {
    let mut out = format!("# {}\n\n", doc.title);
    if let Some(subtitle) = &doc.subtitle {
        out.push_str(&format!("_{}_\n\n", subtitle));
    }
    if doc.spells.is_empty() {
        out.push_str("No spells.\n");
        return out;
    }

    for spell in &doc.spells {
        out.push_str(&format!("## {}\n\n", spell.spell_name));
        out.push_str(&format!(
            "**{}** / {} / {}\n\n",
            spell.spell_class, spell.school, spell.spell_type
        ));
        let rows = [
            ("Complexity", spell.complexity.to_string()),
            ("Flare", spell.flare.to_string()),
            ("Action", spell.action.clone()),
            ("Range", spell.range.clone()),
            ("Target", spell.target.clone()),
            ("Duration", spell.duration.clone()),
            ("Check", format!("{} ({})", spell.check, spell.skill)),
            ("Focus", spell.focus.clone()),
        ];
        for (label, value) in rows {
            out.push_str(&format!("- {}: {}\n", label, value));
        }
        if let Some(keywords) = spell.keywords.as_deref().filter(|k| !k.is_empty()) {
            out.push_str(&format!("- Keywords: {}\n", keywords));
        }
        out.push('\n');
        if let Some(description) = spell.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(description);
            out.push_str("\n\n");
        }
    }
    out
}

/// Renders `doc` in the format implied by `path` and writes it there.
pub fn write(doc: &ExportDocument, path: &Path) -> Result<CmdResult> {
    let format = ExportFormat::from_filename(&path.to_string_lossy());
    let content = render(doc, format)?;
    fs::write(path, content).map_err(SagaError::Io)?;
    tracing::info!(path = %path.display(), spells = doc.spells.len(), "exported document");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} to {}",
        doc.title,
        path.display()
    )));
    result.written_paths.push(path.to_path_buf());
    Ok(result)
}

pub fn catalog(spells: &[Spell], path: &Path) -> Result<CmdResult> {
    if spells.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No spells to export."));
        return Ok(res);
    }
    write(&ExportDocument::for_catalog(spells), path)
}

pub fn spellbook<S: CollectionStore>(store: &S, id: &str, path: &Path) -> Result<CmdResult> {
    let Some(book) = store.get(id)? else {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info(format!("No spellbook with id {}", id)));
        return Ok(res);
    };
    write(&ExportDocument::for_spellbook(&book), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{five_spells, spell, StoreFixture};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_pdf_file_name() {
        assert_eq!(pdf_file_name("My Fire Book"), "my-fire-book.pdf");
        assert_eq!(pdf_file_name("  Spaced \t Out  "), "spaced-out.pdf");
        assert_eq!(pdf_file_name("Solo"), "solo.pdf");
    }

    #[test]
    fn test_catalog_document() {
        let doc = ExportDocument::for_catalog(&five_spells());
        assert_eq!(doc.title, "Saga Spells");
        assert_eq!(doc.file_name, "saga-spells.pdf");
        assert_eq!(doc.subtitle, None);
        assert_eq!(doc.spells.len(), 5);
    }

    #[test]
    fn test_spellbook_document() {
        let fixture =
            StoreFixture::new().with_spellbook("Fire Book", "Ignis", vec![spell("Fireball")]);
        let doc = ExportDocument::for_spellbook(&fixture.find("Fire Book"));
        assert_eq!(doc.title, "Fire Book");
        assert_eq!(doc.subtitle.as_deref(), Some("Character: Ignis"));
        assert_eq!(doc.file_name, "fire-book.pdf");
        assert_eq!(doc.spells[0].spell_name, "Fireball");
    }

    #[test]
    fn test_format_from_filename() {
        assert_eq!(ExportFormat::from_filename("out.MD"), ExportFormat::Markdown);
        assert_eq!(ExportFormat::from_filename("out.markdown"), ExportFormat::Markdown);
        assert_eq!(ExportFormat::from_filename("out.json"), ExportFormat::Json);
        assert_eq!(ExportFormat::from_filename("out"), ExportFormat::Json);
    }

    #[test]
    fn test_markdown_rendering() {
        let doc = ExportDocument::for_catalog(&five_spells()[..1]);
        let md = render(&doc, ExportFormat::Markdown).unwrap();
        assert!(md.starts_with("# Saga Spells\n\n## Beast Speech\n"));
        assert!(md.contains("- Complexity: 1\n"));
        assert!(md.contains("Talk with animals."));
    }

    #[test]
    fn test_json_rendering_uses_camel_case() {
        let doc = ExportDocument::for_catalog(&five_spells());
        let json: serde_json::Value =
            serde_json::from_str(&render(&doc, ExportFormat::Json).unwrap()).unwrap();
        assert_eq!(json["fileName"], "saga-spells.pdf");
        assert_eq!(json["spells"][0]["spellName"], "Beast Speech");
    }

    #[test]
    fn test_spellbook_export_writes_file() {
        let dir = tempdir().unwrap();
        let fixture = StoreFixture::new().with_spellbook("Fire", "Ignis", vec![spell("Burn")]);
        let id = fixture.find("Fire").id;
        let path = dir.path().join("fire.md");

        let result = spellbook(&fixture.store, &id, &path).unwrap();
        assert_eq!(result.written_paths, vec![path.clone()]);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("_Character: Ignis_"));
        assert!(content.contains("## Burn"));
    }

    #[test]
    fn test_nothing_to_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");

        let result = catalog(&[], &path).unwrap();
        assert!(result.written_paths.is_empty());
        assert!(!path.exists());

        let fixture = StoreFixture::new();
        let result = spellbook(&fixture.store, "missing", &path).unwrap();
        assert!(result.written_paths.is_empty());
    }
}
