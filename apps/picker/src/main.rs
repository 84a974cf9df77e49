use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    find_option, load_settings, CascadeController, HttpOptionFetcher, LogoLookup, PickerOption,
    Selection, SlotStatus, VehiclePicker,
};
use shared::{domain::Level, format::vehicle_title};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Walk the make, type, model, year and vehicle cascade against a lookup API.
#[derive(Parser, Debug)]
struct Args {
    /// Overrides picker.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    make: Option<String>,
    #[arg(long = "type")]
    vehicle_type: Option<String>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    vehicle: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = &args.api_url {
        settings.api_base_url = api_url.clone();
    }
    let fetcher = Arc::new(
        HttpOptionFetcher::new(&settings).context("failed to configure lookup api")?,
    );
    info!(api = %fetcher.base_url(), "starting vehicle picker");

    let mut picker = VehiclePicker::new(fetcher.clone());
    picker.start();
    picker.settle().await;
    print_slot(picker.controller(), Level::Make, &*fetcher);

    let choices = [
        (Level::Make, args.make),
        (Level::Type, args.vehicle_type),
        (Level::Model, args.model),
        (Level::YearModel, args.year),
        (Level::Vehicle, args.vehicle),
    ];
    for (level, choice) in choices {
        let Some(needle) = choice else {
            break;
        };
        choose(&mut picker, level, &needle)?;
        picker.settle().await;
        if let Some(next) = level.downstream().next() {
            print_slot(picker.controller(), next, &*fetcher);
        }
    }

    print_summary(picker.controller());
    Ok(())
}

fn choose(picker: &mut VehiclePicker, level: Level, needle: &str) -> Result<()> {
    let controller = picker.controller();
    if !controller.is_selectable(level) {
        bail!(
            "cannot choose a {level}: slot is {}",
            describe_status(controller.status(level))
        );
    }

    let selection = match level {
        Level::Make => find_option(controller.makes().options(), needle)
            .cloned()
            .map(Selection::Make),
        Level::Type => find_option(controller.types().options(), needle)
            .cloned()
            .map(Selection::Type),
        Level::Model => find_option(controller.models().options(), needle)
            .cloned()
            .map(Selection::Model),
        Level::YearModel => find_option(controller.year_models().options(), needle)
            .cloned()
            .map(Selection::YearModel),
        Level::Vehicle => find_option(controller.vehicles().options(), needle)
            .cloned()
            .map(Selection::Vehicle),
    }
    .with_context(|| format!("no {level} matches '{needle}'"))?;

    picker.select(selection);
    Ok(())
}

fn describe_status(status: &SlotStatus) -> String {
    match status {
        SlotStatus::Hidden => "waiting on an earlier choice".into(),
        SlotStatus::Loading => "loading".into(),
        SlotStatus::Ready => "ready".into(),
        SlotStatus::Empty => "empty (nothing found)".into(),
        SlotStatus::Failed(reason) => format!("unavailable ({reason})"),
    }
}

fn print_slot(controller: &CascadeController, level: Level, logos: &dyn LogoLookup) {
    let status = controller.status(level);
    if *status != SlotStatus::Ready {
        println!("{level}: {}", describe_status(status));
        return;
    }

    println!("{level}:");
    match level {
        Level::Make => {
            for make in controller.makes().options() {
                let logo = logos
                    .logo_url(&make.id)
                    .map(|url| url.to_string())
                    .unwrap_or_default();
                println!("  {:<24} {:<24} {logo}", make.option_id(), make.option_label());
            }
        }
        Level::Type => print_options(controller.types().options()),
        Level::Model => print_options(controller.models().options()),
        Level::YearModel => print_options(controller.year_models().options()),
        Level::Vehicle => print_options(controller.vehicles().options()),
    }
}

fn print_options<T: PickerOption>(options: &[T]) {
    for option in options {
        println!("  {:<24} {}", option.option_id(), option.option_label());
    }
}

fn print_summary(controller: &CascadeController) {
    let (Some(make), Some(model), Some(year_model), Some(vehicle)) = (
        controller.make(),
        controller.model(),
        controller.year_model(),
        controller.vehicle(),
    ) else {
        return;
    };

    println!();
    println!(
        "{}: {}",
        vehicle_title(year_model.year, &make.name, &model.name),
        vehicle.option_label()
    );
}
