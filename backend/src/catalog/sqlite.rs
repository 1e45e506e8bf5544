use crate::catalog::Catalog;
use crate::error::{LookupKind, Result, TermoError};
use common::model::condominium::{Condominium, CondominiumSummary};
use common::model::document::{DocumentSummary, DocumentTemplate};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS documentos (
    id TEXT PRIMARY KEY,
    nome TEXT NOT NULL,
    templatefile TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS condominios (
    id TEXT PRIMARY KEY,
    nome TEXT,
    cnpj TEXT,
    endereco TEXT,
    bairro TEXT,
    cidade TEXT,
    sindico TEXT
);
";

/// Catalog stored in a SQLite file. A connection is opened per call.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    path: PathBuf,
}

impl SqliteCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Creates the catalog tables when they do not exist yet.
    pub fn ensure_schema(&self) -> Result<()> {
        self.connect()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    #[cfg(test)]
    pub fn upsert_document(&self, document: &DocumentTemplate) -> Result<()> {
        self.connect()?.execute(
            "INSERT OR REPLACE INTO documentos (id, nome, templatefile) VALUES (?1, ?2, ?3)",
            params![document.id, document.name, document.template_file],
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub fn upsert_condominium(&self, condominium: &Condominium) -> Result<()> {
        self.connect()?.execute(
            "INSERT OR REPLACE INTO condominios (id, nome, cnpj, endereco, bairro, cidade, sindico)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                condominium.id,
                condominium.name,
                condominium.tax_id,
                condominium.address,
                condominium.neighborhood,
                condominium.city,
                condominium.representative
            ],
        )?;
        Ok(())
    }
}

impl Catalog for SqliteCatalog {
    fn document_template(&self, id: &str) -> Result<DocumentTemplate> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT id, nome, templatefile FROM documentos WHERE id = ?1",
            params![id],
            |row| {
                Ok(DocumentTemplate {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    template_file: row.get(2)?,
                })
            },
        )
        .optional()?
        .ok_or_else(|| TermoError::not_found(LookupKind::Document, id))
    }

    fn condominium(&self, id: &str) -> Result<Condominium> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT id, nome, cnpj, endereco, bairro, cidade, sindico FROM condominios WHERE id = ?1",
            params![id],
            |row| {
                Ok(Condominium {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    tax_id: row.get(2)?,
                    address: row.get(3)?,
                    neighborhood: row.get(4)?,
                    city: row.get(5)?,
                    representative: row.get(6)?,
                })
            },
        )
        .optional()?
        .ok_or_else(|| TermoError::not_found(LookupKind::Condominium, id))
    }

    fn documents(&self) -> Result<Vec<DocumentSummary>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, nome FROM documentos ORDER BY nome")?;
        let rows = stmt.query_map([], |row| {
            Ok(DocumentSummary {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn condominiums(&self) -> Result<Vec<CondominiumSummary>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, nome FROM condominios ORDER BY nome")?;
        let rows = stmt.query_map([], |row| {
            Ok(CondominiumSummary {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_condominium, sample_document};

    fn catalog() -> (tempfile::TempDir, SqliteCatalog) {
        let dir = tempfile::tempdir().unwrap();
        let catalog = SqliteCatalog::new(dir.path().join("termosign.sqlite"));
        catalog.ensure_schema().unwrap();
        (dir, catalog)
    }

    #[test]
    fn finds_stored_records() {
        let (_dir, catalog) = catalog();
        catalog.upsert_document(&sample_document()).unwrap();
        catalog.upsert_condominium(&sample_condominium()).unwrap();

        assert_eq!(
            catalog.document_template("acordo_extra").unwrap(),
            sample_document()
        );
        assert_eq!(catalog.condominium("1").unwrap(), sample_condominium());
    }

    #[test]
    fn unknown_ids_are_lookup_not_found() {
        let (_dir, catalog) = catalog();
        assert!(matches!(
            catalog.document_template("nope"),
            Err(TermoError::LookupNotFound {
                kind: LookupKind::Document,
                ..
            })
        ));
        assert!(matches!(
            catalog.condominium(""),
            Err(TermoError::LookupNotFound {
                kind: LookupKind::Condominium,
                ..
            })
        ));
    }

    #[test]
    fn null_columns_read_as_none() {
        let (_dir, catalog) = catalog();
        catalog
            .upsert_condominium(&Condominium {
                id: "2".to_string(),
                name: Some("Edifício Aurora".to_string()),
                ..Condominium::default()
            })
            .unwrap();
        let condo = catalog.condominium("2").unwrap();
        assert_eq!(condo.name.as_deref(), Some("Edifício Aurora"));
        assert_eq!(condo.representative, None);
    }

    #[test]
    fn listings_are_sorted_by_name() {
        let (_dir, catalog) = catalog();
        catalog.upsert_document(&sample_document()).unwrap();
        catalog
            .upsert_document(&DocumentTemplate {
                id: "confissao".to_string(),
                name: "Acordo Confissão".to_string(),
                template_file: "confissao.html".to_string(),
            })
            .unwrap();
        catalog.upsert_condominium(&sample_condominium()).unwrap();

        let names: Vec<String> = catalog
            .documents()
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Acordo Confissão", "Acordo Extrajudicial"]);
        assert_eq!(catalog.condominiums().unwrap().len(), 1);
    }

    #[test]
    fn missing_schema_is_a_catalog_error() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = SqliteCatalog::new(dir.path().join("empty.sqlite"));
        assert!(matches!(
            catalog.documents(),
            Err(TermoError::Catalog(_))
        ));
    }
}
