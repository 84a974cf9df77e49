use std::time::Duration;

use shared::domain::Level;

use super::*;
use crate::{
    cascade::SlotStatus,
    fixtures::catalog,
    labels::{find_option, PickerOption},
};

fn picker_with(fetcher: crate::fixtures::StaticFetcher) -> VehiclePicker {
    VehiclePicker::new(Arc::new(fetcher))
}

fn pick_make(picker: &mut VehiclePicker, id: &str) {
    let make = find_option(picker.controller().makes().options(), id)
        .cloned()
        .expect("make option");
    picker.select(Selection::Make(make));
}

#[tokio::test]
async fn walks_the_whole_cascade() {
    let mut picker = picker_with(catalog());
    picker.start();
    picker.settle().await;
    assert_eq!(picker.controller().makes().options().len(), 4);

    pick_make(&mut picker, "toyota");
    picker.settle().await;
    let types = picker.controller().types().options().to_vec();
    assert_eq!(
        types.iter().map(|t| t.option_label()).collect::<Vec<_>>(),
        vec!["Coupe", "SUV"]
    );

    let coupe = find_option(&types, "coupe").cloned().expect("coupe");
    picker.select(Selection::Type(coupe.clone()));
    picker.settle().await;
    assert_eq!(picker.controller().vehicle_type(), Some(&coupe));
    assert_eq!(picker.controller().models().options().len(), 2);

    let supra = find_option(picker.controller().models().options(), "supra")
        .cloned()
        .expect("supra");
    picker.select(Selection::Model(supra));
    picker.settle().await;
    let year = find_option(picker.controller().year_models().options(), "2020")
        .cloned()
        .expect("2020");
    picker.select(Selection::YearModel(year));
    picker.settle().await;

    let labels: Vec<String> = picker
        .controller()
        .vehicles()
        .options()
        .iter()
        .map(PickerOption::option_label)
        .collect();
    assert_eq!(
        labels,
        vec!["GT 2.0L Turbo 8 spd Automatic", "RZ 2.0L Turbo 8 spd Automatic"]
    );

    let rz = find_option(picker.controller().vehicles().options(), "supra-rz")
        .cloned()
        .expect("rz");
    picker.select(Selection::Vehicle(rz));
    assert!(picker.controller().is_selected(Level::Vehicle));

    pick_make(&mut picker, "honda");
    for level in Level::Make.downstream() {
        assert!(!picker.controller().is_selected(level));
    }
    assert_eq!(*picker.controller().status(Level::Type), SlotStatus::Loading);
    assert_eq!(*picker.controller().status(Level::Model), SlotStatus::Hidden);
    assert_eq!(*picker.controller().status(Level::YearModel), SlotStatus::Hidden);
    assert_eq!(*picker.controller().status(Level::Vehicle), SlotStatus::Hidden);

    picker.settle().await;
    assert_eq!(picker.controller().types().options()[0].id.as_str(), "hatch");
}

#[tokio::test]
async fn slow_fetch_for_a_replaced_make_never_lands() {
    let mut fetcher = catalog();
    fetcher
        .type_delays
        .insert("toyota".into(), Duration::from_millis(100));
    let mut picker = picker_with(fetcher);
    picker.start();
    picker.settle().await;

    pick_make(&mut picker, "toyota");
    pick_make(&mut picker, "honda");
    picker.settle().await;
    assert_eq!(picker.controller().types().options()[0].id.as_str(), "hatch");

    let committed = picker.next_completion().await;
    assert!(!committed, "toyota types arrived after honda was selected");
    assert_eq!(picker.controller().make().map(|m| m.id.as_str()), Some("honda"));
    assert_eq!(picker.controller().types().options().len(), 1);
    assert_eq!(picker.controller().types().options()[0].id.as_str(), "hatch");
}

#[tokio::test]
async fn empty_and_failed_lists_end_loading() {
    let mut picker = picker_with(catalog());
    picker.start();
    picker.settle().await;

    pick_make(&mut picker, "empty");
    picker.settle().await;
    assert_eq!(*picker.controller().status(Level::Type), SlotStatus::Empty);

    pick_make(&mut picker, "broken");
    picker.settle().await;
    assert!(matches!(
        picker.controller().status(Level::Type),
        SlotStatus::Failed(_)
    ));
    assert_eq!(*picker.controller().status(Level::Make), SlotStatus::Ready);
}

#[tokio::test]
async fn unavailable_fetcher_fails_the_make_slot() {
    let mut picker = VehiclePicker::new(Arc::new(crate::fetcher::MissingOptionFetcher));
    picker.start();
    picker.settle().await;

    assert!(matches!(
        picker.controller().status(Level::Make),
        SlotStatus::Failed(reason) if reason.contains("unavailable")
    ));
}

#[tokio::test]
async fn reset_starts_over_from_makes() {
    let mut picker = picker_with(catalog());
    picker.start();
    picker.settle().await;
    pick_make(&mut picker, "toyota");
    picker.settle().await;

    picker.reset();
    assert!(picker.controller().make().is_none());
    assert_eq!(*picker.controller().status(Level::Type), SlotStatus::Hidden);
    picker.settle().await;
    assert_eq!(*picker.controller().status(Level::Make), SlotStatus::Ready);

    picker.clear(Level::Make);
    assert_eq!(*picker.controller().status(Level::Make), SlotStatus::Ready);
}

#[tokio::test]
async fn panicking_fetch_fails_the_slot_instead_of_hanging() {
    let mut fetcher = catalog();
    fetcher.crashing_makes.insert("toyota".into());
    let mut picker = picker_with(fetcher);
    picker.start();
    picker.settle().await;

    pick_make(&mut picker, "toyota");
    tokio::time::timeout(Duration::from_secs(2), picker.settle())
        .await
        .expect("settle finishes after a crashed fetch");
    assert!(matches!(
        picker.controller().status(Level::Type),
        SlotStatus::Failed(reason) if reason.contains("task failed")
    ));

    pick_make(&mut picker, "honda");
    picker.settle().await;
    assert_eq!(*picker.controller().status(Level::Type), SlotStatus::Ready);
}
