//! The menu store and its lifecycle.

use menu_model::{DateKey, DishCatalog, DishName, MealType, MenuData, Slot};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::backend::{CATALOG_KEY, MENU_DATA_KEY, StorageBackend};
use crate::error::{Result, StorageError, StoreError};
use crate::migrate::{decode_menu, migrate_legacy_schema};

/// Outcome of [`MenuStore::load`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Legacy single-string meals upgraded to lists (and persisted).
    pub migrated_slots: usize,
    /// True when no catalog record existed and the default list was used.
    pub catalog_seeded: bool,
    /// Corrupt records that were replaced by defaults.
    pub recovered: Vec<StoreError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.recovered.is_empty()
    }
}

#[derive(Debug)]
struct Planner {
    menu: MenuData,
    catalog: DishCatalog,
}

#[derive(Debug)]
enum StoreState {
    Uninitialized,
    Ready(Planner),
}

/// Sole owner of the menu document and the dish catalog.
///
/// Construct it with a backend, call [`MenuStore::load`] once, then use the
/// typed operations. Every operation except `load` returns
/// [`StoreError::NotReady`] before that. Mutations are applied to a copy, the
/// copy is written through the backend, and only then does it replace the
/// in-memory state; a failed operation never leaves a partial change behind.
#[derive(Debug)]
pub struct MenuStore<B> {
    backend: B,
    state: StoreState,
}

impl<B: StorageBackend> MenuStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: StoreState::Uninitialized,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, StoreState::Ready(_))
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read both records and enter the ready state.
    ///
    /// Missing records start as an empty menu and the default catalog. A
    /// corrupt record also falls back to its default; the matching
    /// [`StoreError::CorruptStorage`] is returned in the report rather than as
    /// an error. Legacy meal values are upgraded and written back before this
    /// returns. Only backend failures are returned as `Err`, in which case the
    /// store stays uninitialized.
    pub fn load(&mut self) -> Result<LoadReport> {
        let mut report = LoadReport::default();

        let menu = match self.read_menu_record() {
            Ok(Some((menu, migrated))) => {
                if migrated > 0 {
                    self.write_menu(&menu)?;
                    info!(migrated, "upgraded legacy menu record");
                }
                report.migrated_slots = migrated;
                menu
            }
            Ok(None) => MenuData::new(),
            Err(error @ StoreError::CorruptStorage { .. }) => {
                warn!(%error, "menu record is corrupt, starting with an empty menu");
                report.recovered.push(error);
                MenuData::new()
            }
            Err(error) => return Err(error),
        };

        let catalog = match self.read_catalog_record() {
            Ok(Some(catalog)) => catalog,
            Ok(None) => {
                report.catalog_seeded = true;
                DishCatalog::with_defaults()
            }
            Err(error @ StoreError::CorruptStorage { .. }) => {
                warn!(%error, "dish catalog record is corrupt, using defaults");
                report.recovered.push(error);
                DishCatalog::with_defaults()
            }
            Err(error) => return Err(error),
        };

        info!(
            days = menu.len(),
            dishes = menu.dish_count(),
            catalog = catalog.len(),
            "menu store loaded"
        );
        self.state = StoreState::Ready(Planner { menu, catalog });
        Ok(report)
    }

    /// Upgrade legacy single-string meal values in the persisted menu record.
    ///
    /// [`MenuStore::load`] already runs this, so on a loaded store it normally
    /// finds nothing and returns 0 without writing. A record that `load`
    /// replaced because it was corrupt is left alone until the next mutation.
    pub fn migrate_legacy_schema(&mut self) -> Result<usize> {
        self.planner()?;
        let (menu, migrated) = match self.read_menu_record() {
            Ok(Some(record)) => record,
            Ok(None) | Err(StoreError::CorruptStorage { .. }) => return Ok(0),
            Err(error) => return Err(error),
        };
        if migrated == 0 {
            return Ok(0);
        }
        self.write_menu(&menu)?;
        self.planner_mut()?.menu = menu;
        info!(migrated, "upgraded legacy menu record");
        Ok(migrated)
    }

    /// Dishes planned for a slot, in order; empty if none.
    pub fn dishes(&self, date: DateKey, meal: MealType) -> Result<&[DishName]> {
        Ok(self.planner()?.menu.dishes(Slot::new(date, meal)))
    }

    /// Read-only view of the whole menu document.
    pub fn menu(&self) -> Result<&MenuData> {
        Ok(&self.planner()?.menu)
    }

    /// Append a dish to the end of a slot.
    pub fn add_dish(&mut self, date: DateKey, meal: MealType, name: &str) -> Result<()> {
        let slot = Slot::new(date, meal);
        self.update_menu(|menu| {
            let dish = parse_dish(name)?;
            debug!(%slot, dish = %dish, "adding dish");
            menu.push_dish(slot, dish);
            Ok(())
        })
    }

    /// Append a dish picked from the catalog; the name must be listed there.
    pub fn add_catalog_dish(&mut self, date: DateKey, meal: MealType, name: &str) -> Result<()> {
        let dish = parse_dish(name)?;
        if !self.catalog_contains(dish.as_str())? {
            return Err(StoreError::InvalidInput(format!(
                "'{dish}' is not in the dish catalog"
            )));
        }
        self.add_dish(date, meal, dish.as_str())
    }

    /// Remove the dish at `index` from a slot and return it.
    pub fn remove_dish(&mut self, date: DateKey, meal: MealType, index: usize) -> Result<DishName> {
        let slot = Slot::new(date, meal);
        self.update_menu(|menu| {
            let len = menu.dishes(slot).len();
            let dish = menu
                .remove_dish(slot, index)
                .ok_or(StoreError::IndexOutOfRange { slot, index, len })?;
            debug!(%slot, index, dish = %dish, "removed dish");
            Ok(dish)
        })
    }

    /// Move the dish at `source_index` of one slot to the end of another.
    ///
    /// Moving within the same slot is a no-op. Returns the moved dish, or
    /// `None` for the no-op case.
    pub fn move_dish(
        &mut self,
        source_date: DateKey,
        source_meal: MealType,
        source_index: usize,
        dest_date: DateKey,
        dest_meal: MealType,
    ) -> Result<Option<DishName>> {
        let source = Slot::new(source_date, source_meal);
        let dest = Slot::new(dest_date, dest_meal);
        if source == dest {
            self.planner()?;
            return Ok(None);
        }
        self.update_menu(|menu| {
            let dishes = menu.dishes(source);
            let dish = dishes.get(source_index).cloned().ok_or_else(|| {
                StoreError::IndexOutOfRange {
                    slot: source,
                    index: source_index,
                    len: dishes.len(),
                }
            })?;
            menu.push_dish(dest, dish.clone());
            menu.remove_dish(source, source_index);
            debug!(%source, %dest, dish = %dish, "moved dish");
            Ok(Some(dish))
        })
    }

    /// Dish catalog in insertion order.
    pub fn catalog(&self) -> Result<&DishCatalog> {
        Ok(&self.planner()?.catalog)
    }

    /// Exact, case-sensitive lookup of a trimmed name.
    pub fn catalog_contains(&self, name: &str) -> Result<bool> {
        Ok(self.planner()?.catalog.contains(name.trim()))
    }

    /// Add a new name to the catalog.
    pub fn add_to_catalog(&mut self, name: &str) -> Result<()> {
        let planner = self.planner()?;
        let dish = parse_dish(name)?;
        let mut catalog = planner.catalog.clone();
        if !catalog.insert(dish.clone()) {
            return Err(StoreError::DuplicateDish(dish.into_inner()));
        }
        self.write_catalog(&catalog)?;
        self.planner_mut()?.catalog = catalog;
        debug!(dish = %dish, "added dish to catalog");
        Ok(())
    }

    /// Remove a name from the catalog. Absent names are not an error; the
    /// return value tells whether anything was removed.
    pub fn remove_from_catalog(&mut self, name: &str) -> Result<bool> {
        let mut catalog = self.planner()?.catalog.clone();
        if !catalog.remove(name.trim()) {
            return Ok(false);
        }
        self.write_catalog(&catalog)?;
        self.planner_mut()?.catalog = catalog;
        debug!(dish = name.trim(), "removed dish from catalog");
        Ok(true)
    }

    /// Deep copy of the menu document for export.
    pub fn export_snapshot(&self) -> Result<MenuData> {
        Ok(self.planner()?.menu.clone())
    }

    /// Replace the whole menu document with an imported one.
    ///
    /// The document must be an object already using the list schema; `null`
    /// and other non-objects are rejected. On any validation failure the
    /// current menu is kept as is.
    pub fn import_snapshot(&mut self, document: &Value) -> Result<()> {
        self.planner()?;
        let menu = decode_menu(document.clone()).map_err(StoreError::InvalidImport)?;
        self.write_menu(&menu)?;
        info!(days = menu.len(), dishes = menu.dish_count(), "imported menu");
        self.planner_mut()?.menu = menu;
        Ok(())
    }

    /// Parse import file contents and hand them to [`MenuStore::import_snapshot`].
    pub fn import_json(&mut self, contents: &str) -> Result<()> {
        self.planner()?;
        let document: Value = serde_json::from_str(contents)
            .map_err(|e| StoreError::InvalidImport(format!("not valid JSON: {e}")))?;
        self.import_snapshot(&document)
    }

    fn planner(&self) -> Result<&Planner> {
        match &self.state {
            StoreState::Ready(planner) => Ok(planner),
            StoreState::Uninitialized => Err(StoreError::NotReady),
        }
    }

    fn planner_mut(&mut self) -> Result<&mut Planner> {
        match &mut self.state {
            StoreState::Ready(planner) => Ok(planner),
            StoreState::Uninitialized => Err(StoreError::NotReady),
        }
    }

    /// Apply `change` to a copy of the menu, persist the copy, then commit it.
    fn update_menu<T, F>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut MenuData) -> Result<T>,
    {
        let mut menu = self.planner()?.menu.clone();
        let outcome = change(&mut menu)?;
        self.write_menu(&menu)?;
        self.planner_mut()?.menu = menu;
        Ok(outcome)
    }

    /// Read and decode the persisted menu record, upgrading legacy values in
    /// memory. Returns the menu and the number of upgraded values.
    fn read_menu_record(&self) -> Result<Option<(MenuData, usize)>> {
        let Some(raw) = self.read_record(MENU_DATA_KEY)? else {
            return Ok(None);
        };
        let mut document: Value =
            serde_json::from_str(&raw).map_err(|e| corrupt(MENU_DATA_KEY, e.to_string()))?;
        if document.is_null() {
            return Ok(Some((MenuData::new(), 0)));
        }
        let migrated = migrate_legacy_schema(&mut document);
        let menu = decode_menu(document).map_err(|reason| corrupt(MENU_DATA_KEY, reason))?;
        Ok(Some((menu, migrated)))
    }

    fn read_catalog_record(&self) -> Result<Option<DishCatalog>> {
        let Some(raw) = self.read_record(CATALOG_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| corrupt(CATALOG_KEY, e.to_string()))
    }

    fn read_record(&self, key: &'static str) -> Result<Option<String>> {
        match self.backend.read(key) {
            Ok(raw) => Ok(raw),
            Err(StorageError::Encoding { path }) => Err(corrupt(
                key,
                format!("{} is not valid UTF-8", path.display()),
            )),
            Err(error) => Err(error.into()),
        }
    }

    fn write_menu(&mut self, menu: &MenuData) -> Result<()> {
        let contents = serde_json::to_string(menu).map_err(|source| StoreError::Encode {
            key: MENU_DATA_KEY,
            source,
        })?;
        self.backend.write(MENU_DATA_KEY, &contents)?;
        Ok(())
    }

    fn write_catalog(&mut self, catalog: &DishCatalog) -> Result<()> {
        let contents = serde_json::to_string(catalog).map_err(|source| StoreError::Encode {
            key: CATALOG_KEY,
            source,
        })?;
        self.backend.write(CATALOG_KEY, &contents)?;
        Ok(())
    }
}

fn parse_dish(name: &str) -> Result<DishName> {
    DishName::new(name)
        .map_err(|_| StoreError::InvalidInput("dish name must not be empty".to_string()))
}

fn corrupt(key: &'static str, reason: String) -> StoreError {
    StoreError::CorruptStorage { key, reason }
}
