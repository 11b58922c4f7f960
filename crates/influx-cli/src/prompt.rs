//! Terminal answers for resolution requests.

use std::io::{BufRead, Write};

use influx_map::{FieldResolver, MappingError, ResolutionRequest};
use influx_model::Selection;

/// Asks for each missing field on `output` and reads the answer from `input`.
///
/// An answer is a listed column name, "none", or the number shown next to an
/// option. Unrecognized answers are asked again. End of input means "None".
pub struct PromptResolver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, request: &ResolutionRequest) -> std::io::Result<Selection> {
        writeln!(
            self.output,
            "No column detected for '{}'. Choose one:",
            request.field.label()
        )?;
        for (idx, option) in request.options.iter().enumerate() {
            writeln!(self.output, "  [{idx}] {option}")?;
        }
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(Selection::None);
            }
            match parse_answer(line.trim(), request) {
                Some(selection) => return Ok(selection),
                None => writeln!(self.output, "'{}' is not one of the options", line.trim())?,
            }
        }
    }
}

impl<R: BufRead, W: Write> FieldResolver for PromptResolver<R, W> {
    fn select(&mut self, request: &ResolutionRequest) -> Result<Selection, MappingError> {
        self.ask(request)
            .map_err(|err| MappingError::Resolver(err.to_string()))
    }
}

fn parse_answer(answer: &str, request: &ResolutionRequest) -> Option<Selection> {
    if request.columns().iter().any(|column| column == answer) {
        return Some(Selection::Column(answer.to_string()));
    }
    if let Ok(idx) = answer.parse::<usize>() {
        return match idx {
            0 => Some(Selection::None),
            _ => request
                .options
                .get(idx)
                .map(|column| Selection::Column(column.clone())),
        };
    }
    match Selection::parse(answer) {
        Selection::None => Some(Selection::None),
        Selection::Column(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use influx_model::LogicalField;
    use std::io::Cursor;

    fn request() -> ResolutionRequest {
        ResolutionRequest {
            field: LogicalField::PatientCount,
            options: vec!["None".to_string(), "Visits".to_string(), "Ward".to_string()],
        }
    }

    fn answer(input: &str) -> (Selection, String) {
        let mut output = Vec::new();
        let selection = PromptResolver::new(Cursor::new(input.as_bytes()), &mut output)
            .select(&request())
            .unwrap();
        (selection, String::from_utf8(output).unwrap())
    }

    #[test]
    fn accepts_column_name() {
        let (selection, output) = answer("Visits\n");
        assert_eq!(selection, Selection::Column("Visits".to_string()));
        assert!(output.contains("No. of Patients"));
        assert!(output.contains("[2] Ward"));
    }

    #[test]
    fn accepts_option_number() {
        assert_eq!(answer("2\n").0, Selection::Column("Ward".to_string()));
        assert_eq!(answer("0\n").0, Selection::None);
    }

    #[test]
    fn none_is_case_insensitive() {
        assert_eq!(answer("NONE\n").0, Selection::None);
    }

    #[test]
    fn asks_again_after_unknown_answer() {
        let (selection, output) = answer("Visitz\n9\nWard\n");
        assert_eq!(selection, Selection::Column("Ward".to_string()));
        assert_eq!(output.matches("is not one of the options").count(), 2);
    }

    #[test]
    fn end_of_input_selects_none() {
        assert_eq!(answer("").0, Selection::None);
    }
}
