use crate::preprocessing::features::{BODY_TYPES, FUEL_TYPES, LOCATIONS, TRANSMISSIONS};
use crate::server::types::{PriceForm, MAX_YEAR, MIN_YEAR};
use std::fmt::Write;

/// Result shown under the form after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Estimate(String),
    Error(String),
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn number_input(out: &mut String, name: &str, label: &str, value: &str, attrs: &str) {
    let _ = write!(
        out,
        r#"<label for="{name}">{label}</label><input type="number" id="{name}" name="{name}" value="{value}" {attrs} required>"#,
        value = escape_html(value),
    );
}

fn select(out: &mut String, name: &str, label: &str, options: &[&str], current: &str) {
    let _ = write!(out, r#"<label for="{name}">{label}</label><select id="{name}" name="{name}">"#);
    for option in options {
        let selected = if *option == current { " selected" } else { "" };
        let option = escape_html(option);
        let _ = write!(out, r#"<option value="{option}"{selected}>{option}</option>"#);
    }
    out.push_str("</select>");
}

/// Renders the estimate form, pre-filled with `values`, followed by the
/// outcome of the last submission if there is one.
pub fn render(values: &PriceForm, outcome: Option<&Outcome>) -> String {
    let years = format!(r#"min="{}" max="{}" step="1""#, MIN_YEAR, MAX_YEAR);
    let mut html = String::with_capacity(4096);
    html.push_str(concat!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">",
        "<title>Used Car Price Prediction</title>",
        "<style>body{font-family:sans-serif;max-width:720px;margin:2rem auto}",
        ".columns{display:grid;grid-template-columns:1fr 1fr;gap:1rem}",
        "label,input,select{display:block;width:100%;margin-bottom:.5rem}",
        ".success{background:#e6f4ea;padding:1rem}.error{background:#fce8e6;padding:1rem}",
        "</style></head><body>",
        "<h1>&#x1F697; <strong>Used Car Price Prediction</strong></h1>",
        "<p>Enter the details of the used car to estimate its resale price.</p>",
        "<form method=\"post\" action=\"/\"><div class=\"columns\"><div>",
    ));

    number_input(
        &mut html,
        "mileage",
        "Mileage (kmpl)",
        &format!("{:.1}", values.mileage),
        r#"min="0" step="0.1""#,
    );
    number_input(
        &mut html,
        "engine_displacement",
        "Engine Displacement (cc)",
        &values.engine_displacement.to_string(),
        r#"min="0" step="1""#,
    );
    number_input(
        &mut html,
        "year_of_manufacture",
        "Year of Manufacture",
        &values.year_of_manufacture.to_string(),
        &years,
    );
    select(&mut html, "transmission", "Transmission", &TRANSMISSIONS, &values.transmission);

    html.push_str("</div><div>");
    select(&mut html, "fuel_type", "Fuel Type", &FUEL_TYPES, &values.fuel_type);
    number_input(
        &mut html,
        "owner_no",
        "Number of Previous Owners",
        &values.owner_no.to_string(),
        r#"min="0" step="1""#,
    );
    number_input(
        &mut html,
        "model_year",
        "Model Year",
        &values.model_year.to_string(),
        &years,
    );
    number_input(
        &mut html,
        "kilometer_driven",
        "Kilometers Driven",
        &values.kilometer_driven.to_string(),
        r#"min="0" step="1""#,
    );
    html.push_str("</div></div>");

    select(&mut html, "location", "Location", &LOCATIONS, &values.location);
    select(&mut html, "body_type", "Body Type", &BODY_TYPES, &values.body_type);
    html.push_str(r#"<button type="submit">Estimate Price</button></form>"#);

    match outcome {
        Some(Outcome::Estimate(amount)) => {
            let _ = write!(
                html,
                r#"<p class="success">Estimated Price: {}</p>"#,
                escape_html(amount)
            );
        }
        Some(Outcome::Error(message)) => {
            let _ = write!(
                html,
                r#"<p class="error">An error occurred: {}</p>"#,
                escape_html(message)
            );
        }
        None => {}
    }

    html.push_str("</body></html>");
    html
}
