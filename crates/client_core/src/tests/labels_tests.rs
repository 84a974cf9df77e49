use super::*;
use crate::fixtures::{make, vehicle, year_model};

#[test]
fn vehicle_label_uses_the_trim_description() {
    assert_eq!(
        vehicle_label(&vehicle("supra-gt", "GT")),
        "GT 2.0L Turbo 8 spd Automatic"
    );
}

#[test]
fn unsupported_motor_falls_back_to_server_spec_then_title_then_id() {
    let mut electric = vehicle("bz4x", "Limited");
    electric.motor_type = "electric".into();
    assert_eq!(vehicle_label(&electric), "bz4x");

    electric.title = Some("2023 Toyota bZ4X".into());
    assert_eq!(vehicle_label(&electric), "2023 Toyota bZ4X");

    electric.year_model_spec = Some("Limited Dual Motor".into());
    assert_eq!(vehicle_label(&electric), "Limited Dual Motor");
}

#[test]
fn find_option_matches_id_then_name() {
    let makes = vec![make("toyota", "Toyota"), make("lexus", "Lexus")];
    assert_eq!(find_option(&makes, "lexus").map(|m| m.name.as_str()), Some("Lexus"));
    assert_eq!(find_option(&makes, " toyota ").map(|m| m.name.as_str()), Some("Toyota"));
    assert_eq!(find_option(&makes, "TOYOTA").map(|m| m.id.as_str()), Some("toyota"));
    assert!(find_option(&makes, "audi").is_none());

    let crossed = vec![make("a", "b"), make("b", "a")];
    assert_eq!(find_option(&crossed, "a").map(|m| m.name.as_str()), Some("b"));
}

#[test]
fn year_models_are_identified_by_year() {
    let years = vec![year_model("toyota", "supra", 1994), year_model("toyota", "supra", 2020)];
    assert_eq!(find_option(&years, "2020").map(|y| y.year), Some(2020));
    assert_eq!(years[0].option_label(), "1994");
}
