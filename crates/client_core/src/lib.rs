pub mod cascade;
pub mod fetcher;
pub mod http;
pub mod labels;
pub mod picker;
pub mod settings;

pub use cascade::{
    CascadeController, CascadeSlot, FetchCompletion, FetchTicket, OptionList, OptionQuery,
    Selection, SlotStatus,
};
pub use fetcher::{fetch_options, FetchError, LogoLookup, MissingOptionFetcher, OptionFetcher};
pub use http::HttpOptionFetcher;
pub use labels::{find_option, vehicle_label, PickerOption};
pub use picker::VehiclePicker;
pub use settings::{load_settings, Settings};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
pub(crate) mod fixtures;
