use std::collections::HashSet;

use surgitrack_calculators::catalog::{CalculationType, ParameterType};
use surgitrack_calculators::parameters::{ParameterBag, ParameterValue};
use surgitrack_calculators::{all_calculators, calculator_for, get_calculator};

/// A bag holding the first/lowest value of every declared parameter.
fn baseline_bag(calculator: &dyn surgitrack_calculators::Calculator) -> ParameterBag {
    calculator
        .definition()
        .parameters
        .iter()
        .map(|p| {
            let value = match &p.parameter_type {
                ParameterType::Boolean => ParameterValue::Boolean(false),
                ParameterType::Selection { options } => ParameterValue::Selection(options[0].clone()),
                ParameterType::Number { range } => {
                    ParameterValue::Number(range.map(|r| r.min).unwrap_or(0.0))
                }
            };
            (p.name.clone(), value)
        })
        .collect()
}

#[test]
fn registry_lists_five_calculators_in_order() {
    let ids: Vec<_> = all_calculators().iter().map(|c| c.id()).collect();
    assert_eq!(ids, ["rcri", "surgical_apgar", "asa", "possum", "caprini"]);
}

#[test]
fn lookup_by_id_is_case_insensitive() {
    assert_eq!(
        get_calculator("RCRI").unwrap().calculation_type(),
        CalculationType::Rcri
    );
    assert_eq!(
        get_calculator("surgical-apgar").unwrap().calculation_type(),
        CalculationType::SurgicalApgar
    );
    assert!(get_calculator("apache").is_none());
}

#[test]
fn declared_types_without_formula_have_no_calculator() {
    assert!(calculator_for(CalculationType::Meld).is_none());
    assert!(calculator_for(CalculationType::ChildPugh).is_none());
    assert!(get_calculator("child_pugh").is_none());
}

#[test]
fn definitions_match_their_calculation_type() {
    for calculator in all_calculators() {
        let definition = calculator.definition();
        assert_eq!(definition.calculation_type, calculator.calculation_type());
        assert!(!definition.name.is_empty());
        assert!(!definition.short_description.is_empty());
        assert!(!definition.long_description.is_empty());
        assert!(!definition.parameters.is_empty());
    }
}

#[test]
fn parameter_names_are_unique_per_calculator() {
    for calculator in all_calculators() {
        let names: HashSet<_> = calculator
            .definition()
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names.len(), calculator.definition().parameters.len());
    }
}

#[test]
fn definitions_are_built_once() {
    for calculator in all_calculators() {
        let again = calculator_for(calculator.calculation_type()).unwrap();
        assert!(std::ptr::eq(calculator.definition(), again.definition()));
    }
}

#[test]
fn every_declared_schema_parses() {
    for calculator in all_calculators() {
        let bag = baseline_bag(calculator.as_ref());
        assert!(calculator.definition().validate(&bag).is_empty());
        let input = calculator.parse_parameters(&bag).unwrap();
        assert_eq!(input.calculation_type(), calculator.calculation_type());
    }
}

#[test]
fn calculation_type_ids_round_trip() {
    for t in CalculationType::ALL {
        assert_eq!(t.as_str().parse::<CalculationType>().unwrap(), t);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, format!("\"{}\"", t.as_str()));
    }
}
