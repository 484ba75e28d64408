use cra_impact::context::{resolve_property_type, ContextBuilder, ProjectInput};
use cra_impact::regional::{Geography, RegionalTables, DEFAULT_INDUSTRY, TABLE_VERSION};
use std::sync::Arc;

fn tables() -> RegionalTables {
    RegionalTables::embedded().expect("embedded tables parse")
}

#[test]
fn substring_match_resolves_cafe_row() {
    let lookup = tables().lookup_multiplier("Downtown Cafe", Geography::HomesteadCra);

    assert!(!lookup.was_default);
    assert_eq!(lookup.row.category, "cafe");
    assert_eq!(lookup.row.naics_code, "722515");
    assert_eq!(lookup.row.output_multiplier, 1.52);
}

#[test]
fn unmatched_industry_falls_back_to_restaurant() {
    let lookup = tables().lookup_multiplier("Widget Factory", Geography::HomesteadCra);

    assert!(lookup.was_default);
    assert_eq!(lookup.row.category, DEFAULT_INDUSTRY);
    assert_eq!(lookup.row.naics_code, "722511");
}

#[test]
fn exact_match_wins_over_substring() {
    let tables = tables();
    let lookup = tables.lookup_multiplier("  BREWERY ", Geography::FloridaStatewide);
    assert!(!lookup.was_default);
    assert_eq!(lookup.row.category, "brewery");
    assert_eq!(lookup.row.output_multiplier, 1.92);

    // Key contained in the category text works in reverse as well.
    let reverse = tables.lookup_multiplier("off", Geography::HomesteadCra);
    assert_eq!(reverse.row.category, "office");
}

#[test]
fn substring_match_takes_first_row_in_table_order() {
    let tables = tables();

    // "restaurant" precedes "bar" in the table.
    let mixed = tables.lookup_multiplier("Restaurant & Bar", Geography::HomesteadCra);
    assert!(!mixed.was_default);
    assert_eq!(mixed.row.category, "restaurant");
    assert_eq!(mixed.row.naics_code, "722511");

    // "bar" precedes "brewery", so the brewery row is never reached.
    let taproom = tables.lookup_multiplier("Brewery Bar", Geography::HomesteadCra);
    assert!(!taproom.was_default);
    assert_eq!(taproom.row.category, "bar");
    assert_eq!(taproom.row.naics_code, "722410");
}

#[test]
fn real_estate_has_no_substring_fallback() {
    let tables = tables();
    let exact = tables.lookup_real_estate("office", Geography::HomesteadCra);
    assert!(!exact.was_default);
    assert_eq!(exact.row.avg_rent_psf, 22.0);

    let miss = tables.lookup_real_estate("office suites", Geography::HomesteadCra);
    assert!(miss.was_default);
    assert_eq!(miss.row.property_type, "retail");
}

#[test]
fn fiscal_parameters_are_local_to_homestead() {
    let tables = tables();
    assert_eq!(tables.version(), TABLE_VERSION);

    let local = tables.lookup_fiscal_parameters(Geography::HomesteadCra);
    assert!(local.is_applicable());
    assert_eq!(local.combined_millage, 10.5340);
    assert_eq!(local.cra_capture_rate, 0.95);

    let statewide = tables.lookup_fiscal_parameters(Geography::FloridaStatewide);
    assert!(!statewide.is_applicable());
    assert_eq!(statewide.combined_millage, 0.0);

    let demographics = tables.lookup_demographics(Geography::HomesteadCra);
    assert_eq!(demographics.population, 80378);
}

#[test]
fn builder_threads_lookups_into_context() {
    let builder = ContextBuilder::new(Arc::new(tables()));
    let input = ProjectInput {
        project_name: "Krome Avenue Coffee".to_string(),
        proposed_use: "Coffee Shop".to_string(),
        building_size: 1800.0,
        ..ProjectInput::default()
    };

    let context = builder.build(&input, Geography::HomesteadCra);

    assert_eq!(resolve_property_type("Coffee Shop"), "restaurant");
    assert_eq!(context.geography_display, "Homestead CRA District");
    assert_eq!(context.project_inputs.current_sf, 1800.0);
    assert_eq!(context.project_inputs.building_bay_size, 1800.0);
    // "coffee shop" contains none of the industry keys.
    assert!(context.economic_multipliers.default_applied);
    assert_eq!(context.real_estate.property_type, "restaurant");
    assert!(!context.real_estate.default_applied);
    assert!(context.fiscal_parameters.applicable);
    assert!(context
        .economic_multipliers
        .source
        .contains("Lightcast"));

    let value = context.to_value().expect("context serializes");
    for key in [
        "geography",
        "geography_display",
        "project_inputs",
        "economic_multipliers",
        "demographics",
        "real_estate",
        "fiscal_parameters",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["geography"], "homestead_cra");
}

#[test]
fn blank_proposed_use_defaults_to_restaurant() {
    let builder = ContextBuilder::new(Arc::new(tables()));
    let context = builder.build(&ProjectInput::default(), Geography::FloridaStatewide);

    assert_eq!(context.project_inputs.proposed_use, "restaurant");
    assert_eq!(context.economic_multipliers.category, "restaurant");
    assert!(!context.economic_multipliers.default_applied);
    assert_eq!(context.real_estate.property_type, "restaurant");
    assert!(!context.fiscal_parameters.applicable);
}
