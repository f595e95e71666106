/*!
Builds the yearly firm rankings publication from survey responses.

The export is a plain text document, with cells separated by tabs, that a page
layout tool imports directly. Firms of the home state are ranked by revenue,
followed by the firms that did not disclose revenues, ranked by number of
employees. Firms from other states go into a separate document.

```
use ranking_export::{generate_export, FirmResponse};

let mut firm = FirmResponse::default();
firm.set_field("firm_name", "Summit Architecture");
firm.set_field("revenue_current", "38.2");
firm.set_field("pct_k12", "30");

let docs = generate_export(&[firm], 2026);
assert!(docs.in_state.contains("Summit Architecture"));
assert!(docs.out_of_state.is_none());
```

See the [manual] for the details of the format.
*/
mod classify;
mod config;
mod layout;
mod markets;
mod parse;

pub mod builder;
pub mod manual;
pub mod preview;

use log::{debug, info};

pub use crate::classify::{classify, classify_and_sort, normalized_state};
pub use crate::config::*;
pub use crate::layout::{
    build_header, format_firm, ordinal, render_in_state, render_out_of_state, DND_SECTION_TITLE,
    MARKET_SLOTS, REVENUE_HEADER_LINE,
};
pub use crate::markets::top_markets;
pub use crate::parse::{
    format_percent, format_revenue, is_disclosure_declined, parse_decimal, parse_whole_number,
    DND,
};

/// Builds the export documents with the default rules.
///
/// Arguments:
/// * `responses` the responses of a single survey. Their order breaks the ties in the rankings.
/// * `survey_year` the year of the survey (the revenues are those of the year before)
pub fn generate_export(responses: &[FirmResponse], survey_year: i32) -> ExportDocuments {
    generate_export_with_rules(responses, survey_year, &ExportRules::DEFAULT_RULES)
}

/// Builds the export documents.
///
/// This never fails: values that cannot be parsed fall back to defaults.
pub fn generate_export_with_rules(
    responses: &[FirmResponse],
    survey_year: i32,
    rules: &ExportRules,
) -> ExportDocuments {
    info!(
        "generate_export: processing {:?} responses for {}, rules: {:?}",
        responses.len(),
        survey_year,
        rules
    );
    let buckets = classify_and_sort(responses, rules);
    info!(
        "generate_export: in state: {} disclosed, {} DND; out of state: {} disclosed, {} DND",
        buckets.in_state_disclosed.len(),
        buckets.in_state_declined.len(),
        buckets.out_of_state_disclosed.len(),
        buckets.out_of_state_declined.len()
    );
    for (idx, firm) in buckets.in_state_disclosed.iter().enumerate() {
        debug!(
            "generate_export: #{} {} ({})",
            idx + 1,
            firm.firm_name,
            firm.revenue_current
        );
    }

    ExportDocuments {
        in_state: render_in_state(&buckets, survey_year, rules),
        out_of_state: render_out_of_state(&buckets, survey_year, rules),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn firm(name: &str, state: &str, revenue: &str, dnd: &str, employees: &str) -> FirmResponse {
        FirmResponse {
            firm_name: name.to_string(),
            state: state.to_string(),
            revenue_current: revenue.to_string(),
            revenue_dnd: dnd.to_string(),
            num_employees: employees.to_string(),
            ..FirmResponse::default()
        }
    }

    fn firm_lines(doc: &str) -> Vec<&str> {
        doc.split('\n')
            .filter(|l| {
                let first = l.split('\t').next().unwrap_or("");
                first.len() == 1
            })
            .collect()
    }

    #[test]
    fn larger_revenue_first() {
        let _ = env_logger::try_init();
        let responses = vec![
            firm("A", "UT", "10", "FALSE", "5"),
            firm("B", "UT", "20", "FALSE", "3"),
        ];
        let docs = generate_export(&responses, 2026);
        let lines = firm_lines(&docs.in_state);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("B\t"));
        assert!(lines[1].starts_with("A\t"));
        assert!(!docs.in_state.contains(DND_SECTION_TITLE));
        assert_eq!(docs.out_of_state, None);
    }

    #[test]
    fn declined_firm_goes_to_dnd_section() {
        let responses = vec![
            firm("D", "UT", "", "TRUE", "50"),
            firm("A", "UT", "10", "FALSE", "5"),
        ];
        let docs = generate_export(&responses, 2026);
        let (ranked, dnd) = docs
            .in_state
            .split_once(DND_SECTION_TITLE)
            .expect("missing DND section");
        assert!(ranked.contains("\nA\t"));
        assert!(!ranked.contains("\nD\t"));
        assert!(dnd.contains("\nD\t\t\t\t\t50\tDND\tDND\tDND\t\t\n"));
        assert!(dnd.ends_with("\t\n"));
    }

    #[test]
    fn out_of_state_only() {
        let responses = vec![firm("C", "CA", "12", "FALSE", "9")];
        let docs = generate_export(&responses, 2026);
        assert!(firm_lines(&docs.in_state).is_empty());
        assert!(docs.in_state.starts_with("2026 Top Utah Architectural Firm Rankings\n"));
        let oos = docs.out_of_state.expect("no out-of-state document");
        assert!(oos.starts_with("2026 Top Architectural Firm Rankings - Out of State\n\n"));
        assert!(oos.contains("\nC\t"));
        assert!(oos.contains(", CA \t"));
        assert!(!docs.in_state.contains("\nC\t"));
    }

    #[test]
    fn out_of_state_lists_dnd_last_without_title() {
        let responses = vec![
            firm("X", "ID", "", "TRUE", "500"),
            firm("Y", "ID", "1", "FALSE", "2"),
            firm("Z", "NV", "5", "FALSE", "1"),
        ];
        let oos = generate_export(&responses, 2026).out_of_state.unwrap();
        let names: Vec<&str> = firm_lines(&oos)
            .iter()
            .map(|l| l.split('\t').next().unwrap())
            .collect();
        assert_eq!(names, vec!["Z", "Y", "X"]);
        assert!(!oos.contains(DND_SECTION_TITLE));
    }

    #[test]
    fn edition_ordinals() {
        for (year, nth) in [
            (2026, "14th"),
            (2025, "13th"),
            (2024, "12th"),
            (2023, "11th"),
            (2022, "10th"),
            (2033, "21st"),
        ] {
            let docs = generate_export(&[], year);
            assert!(
                docs.in_state
                    .contains(&format!("pleased to publish its {} annual", nth)),
                "{}",
                year
            );
            assert!(docs
                .in_state
                .contains(&format!("generated in {} by", year - 1)));
        }
    }

    #[test]
    fn empty_export_is_well_formed() {
        let docs = generate_export(&[], 2026);
        assert!(docs.in_state.ends_with(&format!("{}\n", build_header(2026))));
        assert_eq!(docs.out_of_state, None);
    }

    #[test]
    fn deterministic() {
        let responses = vec![
            firm("A", "UT", "10", "FALSE", "5"),
            firm("B", "", "10", "", "3"),
            firm("C", "ut", "n/a", "", "7"),
            firm("D", "UT", "dnd", "", "7"),
        ];
        let first = generate_export(&responses, 2026);
        let second = generate_export(&responses, 2026);
        assert_eq!(first, second);
    }
}
