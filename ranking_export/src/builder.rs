pub use crate::config::*;
use log::{debug, warn};

/// The result of comparing the columns of a responses sheet with the expected schema.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ColumnReport {
    /// Expected columns that are not in the sheet.
    pub missing: Vec<String>,
    /// Columns of the sheet that are not expected.
    pub unknown: Vec<String>,
}

impl ColumnReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unknown.is_empty()
    }
}

/// Compares the column names of a sheet with `RESPONSE_COLUMNS`.
///
/// Names are compared exactly: a renamed column shows up both as missing and as unknown.
pub fn validate_columns(headers: &[String]) -> ColumnReport {
    let missing: Vec<String> = RESPONSE_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h == *c))
        .map(|c| c.to_string())
        .collect();
    let unknown: Vec<String> = headers
        .iter()
        .filter(|h| !h.is_empty() && !RESPONSE_COLUMNS.contains(&h.as_str()))
        .cloned()
        .collect();
    ColumnReport { missing, unknown }
}

/// A builder for loading survey responses into an export.
///
/// In strict mode, any deviation from the expected columns is an error. Otherwise
/// it is only reported in the logs.
///
/// ```
/// use ranking_export::builder::Builder;
/// use ranking_export::ExportRules;
/// # use ranking_export::ExportErrors;
///
/// let mut builder = Builder::new(&ExportRules::DEFAULT_RULES)?.strict(true);
///
/// builder.add_record(&[
///     ("firm_name".to_string(), "Summit Architecture".to_string()),
///     ("revenue_current".to_string(), "38.2".to_string()),
/// ])?;
///
/// let docs = builder.build(2026);
/// assert!(docs.in_state.contains("Summit Architecture"));
/// # Ok::<(), ExportErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: ExportRules,
    pub(crate) _strict: bool,
    pub(crate) _responses: Vec<FirmResponse>,
}

impl Builder {
    pub fn new(rules: &ExportRules) -> Result<Builder, ExportErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _strict: false,
            _responses: Vec::new(),
        })
    }

    pub fn strict(self, strict: bool) -> Builder {
        Builder {
            _strict: strict,
            ..self
        }
    }

    /// Checks the columns of the sheet before adding its records.
    pub fn check_columns(&self, headers: &[String]) -> Result<ColumnReport, ExportErrors> {
        let report = validate_columns(headers);
        if report.is_clean() {
            return Ok(report);
        }
        if self._strict {
            return Err(ExportErrors::Schema {
                missing: report.missing,
                unknown: report.unknown,
            });
        }
        if !report.missing.is_empty() {
            warn!(
                "check_columns: missing columns, these values will be blank: {:?}",
                report.missing
            );
        }
        if !report.unknown.is_empty() {
            warn!(
                "check_columns: unknown columns will be ignored: {:?}",
                report.unknown
            );
        }
        Ok(report)
    }

    /// Adds a response, given as (column name, value) pairs.
    ///
    /// Columns that are part of the sheet but not of the export (tokens, timestamps, ...)
    /// are skipped.
    pub fn add_record(&mut self, fields: &[(String, String)]) -> Result<(), ExportErrors> {
        let mut firm = FirmResponse::default();
        for (name, value) in fields.iter() {
            if firm.set_field(name, value) {
                continue;
            }
            if RESPONSE_COLUMNS.contains(&name.as_str()) {
                continue;
            }
            if self._strict {
                return Err(ExportErrors::UnknownField(name.clone()));
            }
            debug!("add_record: skipping unknown field {:?}", name);
        }
        self.add_response(firm);
        Ok(())
    }

    pub fn add_response(&mut self, response: FirmResponse) {
        self._responses.push(response);
    }

    pub fn responses(&self) -> &[FirmResponse] {
        &self._responses
    }

    pub fn len(&self) -> usize {
        self._responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self._responses.is_empty()
    }

    pub fn build(&self, survey_year: i32) -> ExportDocuments {
        crate::generate_export_with_rules(&self._responses, survey_year, &self._rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(v: &[(&str, &str)]) -> Vec<(String, String)> {
        v.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn all_columns() -> Vec<String> {
        RESPONSE_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn full_schema_is_clean() {
        let report = validate_columns(&all_columns());
        assert!(report.is_clean());
    }

    #[test]
    fn renamed_column_is_missing_and_unknown() {
        let mut headers = all_columns();
        headers[5] = "firm".to_string();
        headers.push(String::new());
        let report = validate_columns(&headers);
        assert_eq!(report.missing, vec!["firm_name".to_string()]);
        assert_eq!(report.unknown, vec!["firm".to_string()]);
    }

    #[test]
    fn strict_builder_rejects_bad_schema() {
        let mut headers = all_columns();
        headers.retain(|h| h != "pct_other");
        let lenient = Builder::new(&ExportRules::DEFAULT_RULES).unwrap();
        assert_eq!(
            lenient.check_columns(&headers).unwrap().missing,
            vec!["pct_other".to_string()]
        );

        let strict = Builder::new(&ExportRules::DEFAULT_RULES)
            .unwrap()
            .strict(true);
        assert_eq!(
            strict.check_columns(&headers),
            Err(ExportErrors::Schema {
                missing: vec!["pct_other".to_string()],
                unknown: vec![],
            })
        );
    }

    #[test]
    fn add_record_skips_unused_columns() {
        let mut builder = Builder::new(&ExportRules::DEFAULT_RULES)
            .unwrap()
            .strict(true);
        builder
            .add_record(&pairs(&[
                ("response_id", "SR-2026-001"),
                ("token", "test001"),
                ("firm_name", "Summit Architecture"),
                ("pct_k12", "30"),
            ]))
            .unwrap();
        assert_eq!(builder.len(), 1);
        assert_eq!(builder.responses()[0].firm_name, "Summit Architecture");
        assert_eq!(builder.responses()[0].market_shares[0], "30");
    }

    #[test]
    fn unknown_field() {
        let record = pairs(&[("firm_name", "A"), ("revenue", "12")]);

        let mut strict = Builder::new(&ExportRules::DEFAULT_RULES)
            .unwrap()
            .strict(true);
        assert_eq!(
            strict.add_record(&record),
            Err(ExportErrors::UnknownField("revenue".to_string()))
        );
        assert!(strict.is_empty());

        let mut lenient = Builder::new(&ExportRules::DEFAULT_RULES).unwrap();
        lenient.add_record(&record).unwrap();
        assert_eq!(lenient.len(), 1);
        assert_eq!(lenient.responses()[0].revenue_current, "");
    }

    #[test]
    fn build_uses_rules() {
        let rules = ExportRules {
            home_state: "ID",
            first_edition_year: 2020,
        };
        let mut builder = Builder::new(&rules).unwrap();
        builder
            .add_record(&pairs(&[("firm_name", "Boise Design"), ("state", "id")]))
            .unwrap();
        let docs = builder.build(2026);
        assert!(docs.in_state.contains("\nBoise Design\t"));
        assert!(docs.in_state.contains("its 6th annual"));
        assert_eq!(docs.out_of_state, None);
    }
}
