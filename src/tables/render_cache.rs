use crate::geometry::catalog::GeometryCatalog;
use crate::geometry::error::GeometryError;
use crate::tables::error::TableError;
use crate::types::table_name::TableName;
use log::debug;
use polars::prelude::DataFrame;
use std::collections::{hash_map::Entry, HashMap};
use std::path::Path;

/// Memoizes loaded tables and the geometry catalog for the duration of one
/// render.
///
/// A render is one pass of building views in response to a user interaction.
/// Within a render each table is read at most once; [`RenderCache::begin_render`]
/// forgets everything so the next render sees files replaced on disk.
#[derive(Default)]
pub struct RenderCache {
    frames: HashMap<TableName, DataFrame>,
    catalog: Option<GeometryCatalog>,
    renders: u64,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new render, dropping everything cached by the previous one.
    pub fn begin_render(&mut self) {
        self.frames.clear();
        self.catalog = None;
        self.renders += 1;
        debug!("Render {} started", self.renders);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn contains(&self, table: TableName) -> bool {
        self.frames.contains_key(&table)
    }

    /// Returns the cached frame for `table`, calling `load` on a miss.
    /// Failed loads are not cached.
    pub fn get_or_load<F>(&mut self, table: TableName, load: F) -> Result<DataFrame, TableError>
    where
        F: FnOnce() -> Result<DataFrame, TableError>,
    {
        match self.frames.entry(table) {
            Entry::Occupied(entry) => {
                debug!("Cache hit for {}", table);
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => {
                debug!("Cache miss for {}", table);
                let frame = load()?;
                entry.insert(frame.clone());
                Ok(frame)
            }
        }
    }

    /// The geometry catalog for `dir`, scanned at most once per render.
    pub fn catalog(&mut self, dir: &Path) -> Result<&GeometryCatalog, GeometryError> {
        if !matches!(&self.catalog, Some(catalog) if catalog.root() == dir) {
            self.catalog = Some(GeometryCatalog::scan(dir)?);
        }
        self.catalog
            .as_ref()
            .ok_or_else(|| GeometryError::MissingDirectory(dir.to_path_buf()))
    }
}
