//! The shoe being designed: variant, settings and mesh behind one handle.
//!
//! Front ends (terminal, browser) hold a [`Designer`] and call into it; every
//! change regenerates the mesh in place of the old one and persists the
//! records it touched.

use tracing::{info, warn};

use crate::dimensions::Offsets;
use crate::geometry::Mesh;
use crate::settings::{Field, Settings, SettingsError, BOOK_KEY, GENERAL_KEY, PAGE_KEY};
use crate::shoe::{self, Variant};
use crate::stl::{self, StlFormat};
use crate::storage::{self, SettingsStore};

pub struct Designer<S: SettingsStore> {
    store: S,
    variant: Variant,
    settings: Settings,
    mesh: Mesh,
}

impl<S: SettingsStore> Designer<S> {
    /// Restore the last session from `store`.
    ///
    /// `variant` overrides (and replaces) the persisted variant choice.
    pub fn open(mut store: S, variant: Option<Variant>) -> Self {
        let variant = match variant {
            Some(variant) => {
                storage::store_variant(&mut store, variant);
                variant
            }
            None => storage::load_variant(&store),
        };
        let settings = load_settings(&store, variant);

        let mut designer = Self {
            store,
            variant,
            settings,
            mesh: Mesh::new(),
        };
        designer.regenerate();
        designer
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn offsets(&self) -> Offsets {
        let Settings { book, page, walls } = &self.settings;
        Offsets::derive(book, page, walls, self.variant)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Switch shape, picking up the stored records with that shape's defaults
    pub fn set_variant(&mut self, variant: Variant) {
        storage::store_variant(&mut self.store, variant);
        self.variant = variant;
        self.settings = load_settings(&self.store, variant);
        self.regenerate();
    }

    /// Change one dimension and regenerate
    pub fn set_field(&mut self, field: Field, value: f64) -> Result<(), SettingsError> {
        if !self.variant.fields().contains(&field) {
            return Err(SettingsError::UnusedField {
                field,
                variant: self.variant,
            });
        }

        self.settings.set(field, value)?;
        self.persist_record(field.record_key());
        self.regenerate();
        Ok(())
    }

    /// STL bytes of the current mesh
    pub fn export_mesh(&self, format: StlFormat) -> Vec<u8> {
        stl::export(&self.mesh, format)
    }

    /// Settings document of the current configuration
    pub fn export_settings(&self) -> String {
        info!(variant = %self.variant, "exported settings");
        self.settings.to_json()
    }

    /// Apply a settings document.
    ///
    /// On any error the current settings, stored records and mesh stay as
    /// they were.
    pub fn import_settings(&mut self, json: &str) -> Result<(), SettingsError> {
        let settings = Settings::from_json(json).map_err(|err| {
            warn!(%err, "ignoring settings import");
            err
        })?;

        self.settings = settings.or_defaults(&Settings::defaults(self.variant));
        self.persist_all();
        self.regenerate();
        info!(variant = %self.variant, "imported settings");
        Ok(())
    }

    pub fn reset_to_defaults(&mut self) {
        self.settings = Settings::defaults(self.variant);
        self.persist_all();
        self.regenerate();
        info!(variant = %self.variant, "reset settings to defaults");
    }

    fn regenerate(&mut self) {
        let Settings { book, page, walls } = &self.settings;
        self.mesh = shoe::generate(book, page, walls, self.variant);
    }

    fn persist_all(&mut self) {
        for key in [BOOK_KEY, PAGE_KEY, GENERAL_KEY] {
            self.persist_record(key);
        }
    }

    fn persist_record(&mut self, key: &str) {
        let store = &mut self.store;
        match key {
            BOOK_KEY => storage::store(store, key, &self.settings.book),
            PAGE_KEY => storage::store(store, key, &self.settings.page),
            _ => storage::store(store, GENERAL_KEY, &self.settings.walls),
        }
    }
}

fn load_settings<S: SettingsStore + ?Sized>(store: &S, variant: Variant) -> Settings {
    let defaults = Settings::defaults(variant);
    Settings {
        book: storage::load(store, BOOK_KEY, defaults.book),
        page: storage::load(store, PAGE_KEY, defaults.page),
        walls: storage::load(store, GENERAL_KEY, defaults.walls),
    }
}
