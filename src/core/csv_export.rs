use crate::domain::model::{CsvMode, Record};
use crate::utils::error::{ClaimsError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde_json::Value;

/// Renders a value the way the listing page prints it: strings bare,
/// whole floats without a fraction, null as `null`. Floats follow the
/// page's number formatting, including `1e+21` and `1e-7` exponents.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else if let Some(f) = n.as_f64() {
                display_float(f)
            } else {
                n.to_string()
            }
        }
        other => other.to_string(),
    }
}

fn display_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    let exp = format!("{:e}", f);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

/// Serializes a table to CSV text.
///
/// The header is the first record's keys in the order they arrived. Each row
/// holds that record's value for every header column. Lines are joined with
/// `\n` and there is no trailing newline. An empty table yields `""`.
pub fn to_csv(records: &[Record], mode: CsvMode) -> Result<String> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&str> = first.columns().collect();

    match mode {
        CsvMode::Legacy => Ok(to_legacy_csv(records, &headers)),
        CsvMode::Quoted => to_quoted_csv(records, &headers),
    }
}

fn to_legacy_csv(records: &[Record], headers: &[&str]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(headers.join(","));

    for record in records {
        let values: Vec<String> = headers
            .iter()
            .map(|header| {
                let value = record
                    .data
                    .get(*header)
                    .map(display_value)
                    .unwrap_or_else(|| "undefined".to_string());
                format!("\"{}\"", value)
            })
            .collect();
        lines.push(values.join(","));
    }

    lines.join("\n")
}

fn to_quoted_csv(records: &[Record], headers: &[&str]) -> Result<String> {
    let mut header_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header_writer.write_record(headers)?;
    let buffer = header_writer.into_inner().map_err(flush_error)?;

    let mut row_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);
    for record in records {
        let values = headers.iter().map(|header| {
            record
                .data
                .get(*header)
                .map(display_value)
                .unwrap_or_default()
        });
        row_writer.write_record(values)?;
    }
    let mut bytes = row_writer.into_inner().map_err(flush_error)?;

    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    String::from_utf8(bytes).map_err(|e| ClaimsError::ValidationError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

fn flush_error<W>(e: csv::IntoInnerError<W>) -> ClaimsError {
    ClaimsError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string()))
}
