//! Command implementations. Each returns the text to print so the binary
//! stays a thin clap wrapper.

use std::fmt::Write as _;

use surgitrack_calculators::catalog::{ParameterType, RiskCalculator};
use surgitrack_calculators::parameters::ParameterBag;
use surgitrack_calculators::result::CalculationResult;
use surgitrack_calculators::{all_calculators, engine, get_calculator};
use surgitrack_core::models::{Patient, StoredCalculation};
use surgitrack_storage::history::PracticeStore;
use uuid::Uuid;

pub fn list_calculators() -> String {
    let mut out = String::new();
    for calculator in all_calculators() {
        let definition = calculator.definition();
        let _ = writeln!(
            out,
            "{:<16} {:<28} {}",
            calculator.id(),
            definition.name,
            definition.short_description
        );
    }
    out
}

fn lookup(id: &str) -> eyre::Result<RiskCalculator> {
    get_calculator(id)
        .map(|c| c.definition().clone())
        .ok_or_else(|| eyre::eyre!("unknown calculator '{id}' (try `surgitrack calculators`)"))
}

pub fn describe(id: &str) -> eyre::Result<String> {
    let calculator = lookup(id)?;
    let mut out = format!("{}\n\n{}\n\nParameters:\n", calculator.name, calculator.long_description);
    for parameter in &calculator.parameters {
        let _ = write!(out, "  {} ({})", parameter.name, parameter.parameter_type.label());
        match &parameter.parameter_type {
            ParameterType::Boolean => {}
            ParameterType::Selection { options } => {
                let _ = write!(out, " one of: {}", options.join(" | "));
            }
            ParameterType::Number { range: Some(range) } => {
                let _ = write!(out, " {}-{}", range.min, range.max);
            }
            ParameterType::Number { range: None } => {}
        }
        let _ = writeln!(out, "\n      {}", parameter.description);
    }
    Ok(out)
}

/// Turn `Name=value` assignments into a bag, typed by each declared parameter.
pub fn build_bag(calculator: &RiskCalculator, assignments: &[String]) -> eyre::Result<ParameterBag> {
    let mut bag = ParameterBag::new();
    for assignment in assignments {
        let (name, raw) = assignment
            .split_once('=')
            .ok_or_else(|| eyre::eyre!("expected Name=value, got '{assignment}'"))?;
        let name = name.trim();
        let parameter = calculator.parameter(name).ok_or_else(|| {
            let known: Vec<&str> = calculator.parameters.iter().map(|p| p.name.as_str()).collect();
            eyre::eyre!(
                "{} has no parameter '{name}' (expected one of: {})",
                calculator.name,
                known.join(", ")
            )
        })?;
        bag.insert(name, parameter.parse_value(raw)?);
    }
    Ok(bag)
}

pub fn render_result(calculator: &RiskCalculator, result: &CalculationResult) -> String {
    format!(
        "{}\n  Score: {}\n  Risk:  {:.1}%\n  {}\n",
        calculator.name, result.score, result.risk_percentage, result.interpretation
    )
}

/// Run a calculation and, when `patient` is given, record it in the history.
pub async fn calculate(
    store: &PracticeStore,
    id: &str,
    assignments: &[String],
    patient: Option<Uuid>,
) -> eyre::Result<(RiskCalculator, CalculationResult, Option<StoredCalculation>)> {
    let calculator = lookup(id)?;
    let bag = build_bag(&calculator, assignments)?;
    let result = engine::calculate(&calculator, &bag)?;

    let record = match patient {
        Some(patient_id) => {
            let record = result.to_record(patient_id, &calculator);
            store.record_calculation(patient_id, &record).await?;
            Some(record)
        }
        None => None,
    };

    Ok((calculator, result, record))
}

pub async fn add_patient(
    store: &PracticeStore,
    name: &str,
    mrn: Option<String>,
    dob: Option<&str>,
) -> eyre::Result<Patient> {
    let mut patient = Patient::new(name)?;
    if let Some(mrn) = mrn {
        patient = patient.with_medical_record_number(mrn);
    }
    if let Some(dob) = dob {
        patient = patient.with_date_of_birth(dob)?;
    }
    store.create_patient(&patient).await?;
    Ok(patient)
}

pub fn render_patients(patients: &[Patient]) -> String {
    if patients.is_empty() {
        return "No patients found.\n".to_string();
    }
    let mut out = String::new();
    for patient in patients {
        let _ = writeln!(
            out,
            "{}  {}  MRN: {}  DOB: {}",
            patient.id,
            patient.name,
            patient.medical_record_number.as_deref().unwrap_or("-"),
            patient
                .date_of_birth
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    out
}

pub fn render_history(patient: &Patient, calculations: &[StoredCalculation]) -> String {
    if calculations.is_empty() {
        return format!("No calculations recorded for {}.\n", patient.name);
    }
    let mut out = format!("Calculations for {}:\n", patient.name);
    for calculation in calculations {
        let _ = writeln!(
            out,
            "{}  {}  {}  score {}  risk {:.1}%\n      {}",
            calculation.id,
            calculation.created_at,
            calculation.calculator_name,
            calculation.score,
            calculation.risk_percentage,
            calculation.interpretation
        );
    }
    out
}
