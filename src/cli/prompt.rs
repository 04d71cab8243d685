//! Interactive entry of the form fields.

use anyhow::{bail, Context};
use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{FormField, TripRequestForm};

/// Ask for every field in order. An empty answer keeps the current value.
pub fn fill_form(form: &mut TripRequestForm) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new().context("failed to start line editor")?;

    for field in FormField::ALL {
        match editor.readline(&field_prompt(form, field)) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    form.update(field, &line);
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => bail!("input cancelled"),
            Err(err) => return Err(err).context("failed to read input"),
        }
    }

    Ok(())
}

fn field_prompt(form: &TripRequestForm, field: FormField) -> String {
    let current = current_value(form, field);
    match (current.is_empty(), field.placeholder()) {
        (false, _) => format!("{} [{}]: ", field.label(), current),
        (true, Some(placeholder)) => format!("{} ({}): ", field.label(), placeholder),
        (true, None) => format!("{}: ", field.label()),
    }
}

fn current_value(form: &TripRequestForm, field: FormField) -> String {
    let count = |value: Option<i64>| value.map_or_else(|| "NaN".to_string(), |n| n.to_string());

    match field {
        FormField::TravelDates => form.travel_dates().to_string(),
        FormField::NumberOfAdults => count(form.number_of_adults()),
        FormField::NumberOfChildren => count(form.number_of_children()),
        FormField::ChildrenAges => form.children_ages().to_string(),
        FormField::Preferences => form.preferences().to_string(),
    }
}
