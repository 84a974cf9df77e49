//! Cascade state: five selection slots, the option list behind each one, and
//! the fetch tickets that keep late results from landing in the wrong slot.

use shared::domain::{Level, Make, MakeId, Model, ModelId, TypeId, Vehicle, VehicleType, YearModel};
use tracing::{debug, info, warn};

use crate::fetcher::FetchError;

/// A value picked for one slot. The variant determines the level.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Make(Make),
    Type(VehicleType),
    Model(Model),
    YearModel(YearModel),
    Vehicle(Vehicle),
}

impl Selection {
    pub fn level(&self) -> Level {
        match self {
            Selection::Make(_) => Level::Make,
            Selection::Type(_) => Level::Type,
            Selection::Model(_) => Level::Model,
            Selection::YearModel(_) => Level::YearModel,
            Selection::Vehicle(_) => Level::Vehicle,
        }
    }
}

/// The upstream tuple that parameterizes one slot's option fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionQuery {
    Makes,
    Types {
        make: MakeId,
    },
    Models {
        make: MakeId,
        vehicle_type: TypeId,
    },
    YearModels {
        make: MakeId,
        vehicle_type: TypeId,
        model: ModelId,
    },
    Vehicles {
        make: MakeId,
        vehicle_type: TypeId,
        model: ModelId,
        year: i32,
    },
}

impl OptionQuery {
    pub fn level(&self) -> Level {
        match self {
            OptionQuery::Makes => Level::Make,
            OptionQuery::Types { .. } => Level::Type,
            OptionQuery::Models { .. } => Level::Model,
            OptionQuery::YearModels { .. } => Level::YearModel,
            OptionQuery::Vehicles { .. } => Level::Vehicle,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionList {
    Makes(Vec<Make>),
    Types(Vec<VehicleType>),
    Models(Vec<Model>),
    YearModels(Vec<YearModel>),
    Vehicles(Vec<Vehicle>),
}

impl OptionList {
    pub fn level(&self) -> Level {
        match self {
            OptionList::Makes(_) => Level::Make,
            OptionList::Types(_) => Level::Type,
            OptionList::Models(_) => Level::Model,
            OptionList::YearModels(_) => Level::YearModel,
            OptionList::Vehicles(_) => Level::Vehicle,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OptionList::Makes(items) => items.len(),
            OptionList::Types(items) => items.len(),
            OptionList::Models(items) => items.len(),
            OptionList::YearModels(items) => items.len(),
            OptionList::Vehicles(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Identity of one triggered fetch. Only the newest ticket for a slot may commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub level: Level,
    pub generation: u64,
    pub query: OptionQuery,
}

#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub result: Result<OptionList, FetchError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    /// Upstream tuple incomplete; nothing to show.
    Hidden,
    Loading,
    Ready,
    /// The fetch succeeded with no records.
    Empty,
    Failed(String),
}

/// Option list for one level, keyed by the upstream tuple it was fetched for.
#[derive(Debug, Clone)]
pub struct CascadeSlot<T> {
    query: Option<OptionQuery>,
    generation: u64,
    status: SlotStatus,
    options: Vec<T>,
}

impl<T> Default for CascadeSlot<T> {
    fn default() -> Self {
        Self {
            query: None,
            generation: 0,
            status: SlotStatus::Hidden,
            options: Vec::new(),
        }
    }
}

impl<T> CascadeSlot<T> {
    pub fn status(&self) -> &SlotStatus {
        &self.status
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn query(&self) -> Option<&OptionQuery> {
        self.query.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Point the slot at `query`, returning a ticket if a fetch is needed.
    ///
    /// An unchanged tuple keeps its list, except after a failure, where the
    /// upstream event counts as a retry.
    fn sync(
        &mut self,
        level: Level,
        query: Option<OptionQuery>,
        next_generation: &mut u64,
    ) -> Option<FetchTicket> {
        let failed = matches!(self.status, SlotStatus::Failed(_));
        if self.query == query && !(failed && query.is_some()) {
            return None;
        }

        *next_generation += 1;
        self.generation = *next_generation;
        self.options.clear();

        match query {
            None => {
                self.query = None;
                self.status = SlotStatus::Hidden;
                None
            }
            Some(query) => {
                self.query = Some(query.clone());
                self.status = SlotStatus::Loading;
                debug!(%level, generation = self.generation, ?query, "queued option fetch");
                Some(FetchTicket {
                    level,
                    generation: self.generation,
                    query,
                })
            }
        }
    }

    fn accepts(&self, ticket: &FetchTicket) -> bool {
        self.generation == ticket.generation && self.query.as_ref() == Some(&ticket.query)
    }

    fn commit(&mut self, items: Vec<T>) {
        self.status = if items.is_empty() {
            SlotStatus::Empty
        } else {
            SlotStatus::Ready
        };
        self.options = items;
    }

    fn fail(&mut self, reason: String) {
        self.options.clear();
        self.status = SlotStatus::Failed(reason);
    }

    fn hide(&mut self, next_generation: &mut u64) {
        *next_generation += 1;
        self.generation = *next_generation;
        self.query = None;
        self.options.clear();
        self.status = SlotStatus::Hidden;
    }
}

#[derive(Debug, Default)]
pub struct CascadeController {
    make: Option<Make>,
    vehicle_type: Option<VehicleType>,
    model: Option<Model>,
    year_model: Option<YearModel>,
    vehicle: Option<Vehicle>,
    makes: CascadeSlot<Make>,
    types: CascadeSlot<VehicleType>,
    models: CascadeSlot<Model>,
    year_models: CascadeSlot<YearModel>,
    vehicles: CascadeSlot<Vehicle>,
    next_generation: u64,
}

impl CascadeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger the make list. Safe to call again; only a failed list refetches.
    pub fn start(&mut self) -> Vec<FetchTicket> {
        self.sync_slot(Level::Make).into_iter().collect()
    }

    /// Set the slot for `selection`'s level and empty every slot after it.
    ///
    /// A selection whose upstream slots are not all filled is ignored.
    pub fn select(&mut self, selection: Selection) -> Vec<FetchTicket> {
        let level = selection.level();
        if !self.is_available(level) {
            warn!(%level, "ignoring selection for a slot whose upstream is incomplete");
            return Vec::new();
        }

        self.clear_from(level);
        match selection {
            Selection::Make(make) => self.make = Some(make),
            Selection::Type(vehicle_type) => self.vehicle_type = Some(vehicle_type),
            Selection::Model(model) => self.model = Some(model),
            Selection::YearModel(year_model) => self.year_model = Some(year_model),
            Selection::Vehicle(vehicle) => self.vehicle = Some(vehicle),
        }
        self.sync_downstream(level)
    }

    /// Empty the slot at `level` and every slot after it.
    pub fn clear(&mut self, level: Level) -> Vec<FetchTicket> {
        self.clear_from(level);
        self.sync_downstream(level)
    }

    /// Drop every selection and list, then fetch makes again.
    pub fn reset(&mut self) -> Vec<FetchTicket> {
        self.clear_from(Level::Make);
        let generation = &mut self.next_generation;
        self.makes.hide(generation);
        self.types.hide(generation);
        self.models.hide(generation);
        self.year_models.hide(generation);
        self.vehicles.hide(generation);
        self.start()
    }

    /// Commit a finished fetch if its ticket is still current. Returns whether it committed.
    pub fn apply(&mut self, completion: FetchCompletion) -> bool {
        let FetchCompletion { ticket, result } = completion;
        let level = ticket.level;

        if !self.accepts(&ticket) {
            debug!(
                %level,
                generation = ticket.generation,
                query = ?ticket.query,
                "discarding stale option fetch"
            );
            return false;
        }

        let list = match result {
            Ok(list) if list.level() == level => list,
            Ok(list) => {
                let reason = format!("{} options delivered to the {level} slot", list.level());
                warn!(%level, %reason, "option fetch returned the wrong list");
                self.fail(level, reason);
                return true;
            }
            Err(err) => {
                warn!(%level, error = %err, "option fetch failed");
                self.fail(level, err.to_string());
                return true;
            }
        };

        info!(%level, count = list.len(), "option list committed");
        match list {
            OptionList::Makes(items) => self.makes.commit(items),
            OptionList::Types(items) => self.types.commit(items),
            OptionList::Models(items) => self.models.commit(items),
            OptionList::YearModels(items) => self.year_models.commit(items),
            OptionList::Vehicles(items) => self.vehicles.commit(items),
        }
        true
    }

    pub fn make(&self) -> Option<&Make> {
        self.make.as_ref()
    }

    pub fn vehicle_type(&self) -> Option<&VehicleType> {
        self.vehicle_type.as_ref()
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn year_model(&self) -> Option<&YearModel> {
        self.year_model.as_ref()
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    pub fn makes(&self) -> &CascadeSlot<Make> {
        &self.makes
    }

    pub fn types(&self) -> &CascadeSlot<VehicleType> {
        &self.types
    }

    pub fn models(&self) -> &CascadeSlot<Model> {
        &self.models
    }

    pub fn year_models(&self) -> &CascadeSlot<YearModel> {
        &self.year_models
    }

    pub fn vehicles(&self) -> &CascadeSlot<Vehicle> {
        &self.vehicles
    }

    pub fn is_selected(&self, level: Level) -> bool {
        match level {
            Level::Make => self.make.is_some(),
            Level::Type => self.vehicle_type.is_some(),
            Level::Model => self.model.is_some(),
            Level::YearModel => self.year_model.is_some(),
            Level::Vehicle => self.vehicle.is_some(),
        }
    }

    /// Whether the slot may be shown: every slot before it holds a value.
    pub fn is_available(&self, level: Level) -> bool {
        Level::ALL[..level.index()]
            .iter()
            .all(|upstream| self.is_selected(*upstream))
    }

    /// Available and holding a committed, non-empty list.
    pub fn is_selectable(&self, level: Level) -> bool {
        self.is_available(level) && *self.status(level) == SlotStatus::Ready
    }

    pub fn status(&self, level: Level) -> &SlotStatus {
        match level {
            Level::Make => self.makes.status(),
            Level::Type => self.types.status(),
            Level::Model => self.models.status(),
            Level::YearModel => self.year_models.status(),
            Level::Vehicle => self.vehicles.status(),
        }
    }

    pub fn is_loading(&self) -> bool {
        Level::ALL
            .iter()
            .any(|level| *self.status(*level) == SlotStatus::Loading)
    }

    /// The upstream tuple for `level`, if every slot before it is filled.
    pub fn query_for(&self, level: Level) -> Option<OptionQuery> {
        let query = match level {
            Level::Make => OptionQuery::Makes,
            Level::Type => OptionQuery::Types {
                make: self.make.as_ref()?.id.clone(),
            },
            Level::Model => OptionQuery::Models {
                make: self.make.as_ref()?.id.clone(),
                vehicle_type: self.vehicle_type.as_ref()?.id.clone(),
            },
            Level::YearModel => OptionQuery::YearModels {
                make: self.make.as_ref()?.id.clone(),
                vehicle_type: self.vehicle_type.as_ref()?.id.clone(),
                model: self.model.as_ref()?.id.clone(),
            },
            Level::Vehicle => OptionQuery::Vehicles {
                make: self.make.as_ref()?.id.clone(),
                vehicle_type: self.vehicle_type.as_ref()?.id.clone(),
                model: self.model.as_ref()?.id.clone(),
                year: self.year_model.as_ref()?.year,
            },
        };
        Some(query)
    }

    fn clear_from(&mut self, level: Level) {
        for cleared in Level::ALL.into_iter().skip(level.index()) {
            match cleared {
                Level::Make => self.make = None,
                Level::Type => self.vehicle_type = None,
                Level::Model => self.model = None,
                Level::YearModel => self.year_model = None,
                Level::Vehicle => self.vehicle = None,
            }
        }
    }

    fn sync_downstream(&mut self, level: Level) -> Vec<FetchTicket> {
        level
            .downstream()
            .filter_map(|downstream| self.sync_slot(downstream))
            .collect()
    }

    fn sync_slot(&mut self, level: Level) -> Option<FetchTicket> {
        let query = self.query_for(level);
        let generation = &mut self.next_generation;
        match level {
            Level::Make => self.makes.sync(level, query, generation),
            Level::Type => self.types.sync(level, query, generation),
            Level::Model => self.models.sync(level, query, generation),
            Level::YearModel => self.year_models.sync(level, query, generation),
            Level::Vehicle => self.vehicles.sync(level, query, generation),
        }
    }

    fn accepts(&self, ticket: &FetchTicket) -> bool {
        match ticket.level {
            Level::Make => self.makes.accepts(ticket),
            Level::Type => self.types.accepts(ticket),
            Level::Model => self.models.accepts(ticket),
            Level::YearModel => self.year_models.accepts(ticket),
            Level::Vehicle => self.vehicles.accepts(ticket),
        }
    }

    fn fail(&mut self, level: Level, reason: String) {
        match level {
            Level::Make => self.makes.fail(reason),
            Level::Type => self.types.fail(reason),
            Level::Model => self.models.fail(reason),
            Level::YearModel => self.year_models.fail(reason),
            Level::Vehicle => self.vehicles.fail(reason),
        }
    }
}

#[cfg(test)]
#[path = "tests/cascade_tests.rs"]
mod tests;
