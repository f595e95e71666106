// Reading an export document back into table rows, for previews.

use crate::layout::{DND_SECTION_TITLE, REVENUE_HEADER_LINE};
use crate::parse::DND;

/// The first line of a firm, as shown in a preview table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FirmPreview {
    pub firm_name: String,
    pub revenue: String,
    pub employees: String,
    pub top_market: String,
    pub is_dnd: bool,
    pub is_out_of_state: bool,
}

/// Extracts one preview row per firm from an export document.
///
/// The document is read as blocks separated by blank lines. The blocks up to the
/// column titles are the front matter. Every later block is a firm, except for the
/// DND title: the firms listed after it are flagged as DND, as are firms whose
/// current revenue reads `DND`.
pub fn parse_preview(text: &str, out_of_state: bool) -> Vec<FirmPreview> {
    let mut previews: Vec<FirmPreview> = Vec::new();
    let mut in_firms = false;
    let mut in_dnd_section = false;
    let mut block: Vec<&str> = Vec::new();

    // The extra blank line closes the last block. A line made of tabs only is
    // an empty firm line, not a separator.
    for line in text.split('\n').chain(std::iter::once("")) {
        if !line.is_empty() {
            block.push(line);
            continue;
        }
        let first = match block.first() {
            Some(first) => *first,
            None => continue,
        };
        block.clear();

        if !in_firms {
            in_firms = first == REVENUE_HEADER_LINE;
            continue;
        }
        if first == DND_SECTION_TITLE {
            in_dnd_section = true;
            continue;
        }

        let cols: Vec<&str> = first.split('\t').collect();
        if cols.len() >= 7 && !cols[0].is_empty() {
            previews.push(FirmPreview {
                firm_name: cols[0].to_string(),
                revenue: cols[6].to_string(),
                employees: cols[5].to_string(),
                top_market: cols.get(9).unwrap_or(&"").to_string(),
                is_dnd: in_dnd_section || cols[6] == DND,
                is_out_of_state: out_of_state,
            });
        }
    }
    previews
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate_export, FirmResponse};

    fn firm(name: &str, state: &str, revenue: &str, dnd: &str, employees: &str) -> FirmResponse {
        let mut firm = FirmResponse {
            firm_name: name.to_string(),
            state: state.to_string(),
            revenue_current: revenue.to_string(),
            revenue_dnd: dnd.to_string(),
            num_employees: employees.to_string(),
            ..FirmResponse::default()
        };
        firm.set_field("pct_office", "60");
        firm
    }

    #[test]
    fn previews_follow_document_order() {
        let responses = vec![
            firm("Small", "UT", "1.5", "FALSE", "4"),
            firm("Hidden", "UT", "", "TRUE", "40"),
            firm("Large", "UT", "$22", "FALSE", "80"),
            firm("Away", "CO", "9", "FALSE", "10"),
        ];
        let docs = generate_export(&responses, 2026);

        let rows = parse_preview(&docs.in_state, false);
        let names: Vec<&str> = rows.iter().map(|r| r.firm_name.as_str()).collect();
        assert_eq!(names, vec!["Large", "Small", "Hidden"]);
        assert_eq!(rows[0].revenue, "$22.0");
        assert_eq!(rows[0].employees, "80");
        assert_eq!(rows[0].top_market, "Office");
        assert!(!rows[0].is_dnd);
        assert!(rows[2].is_dnd);
        assert_eq!(rows[2].revenue, DND);

        let oos = parse_preview(&docs.out_of_state.unwrap(), true);
        assert_eq!(oos.len(), 1);
        assert_eq!(oos[0].firm_name, "Away");
        assert!(oos[0].is_out_of_state);
    }

    #[test]
    fn zero_revenue_reads_as_dnd() {
        let docs = generate_export(&[firm("Zero", "UT", "0", "FALSE", "3")], 2026);
        let rows = parse_preview(&docs.in_state, false);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_dnd);
    }

    #[test]
    fn firm_without_address_is_one_row() {
        let bare = FirmResponse {
            firm_name: "Bare".to_string(),
            ..FirmResponse::default()
        };
        let docs = generate_export(&[bare], 2026);
        let rows = parse_preview(&docs.in_state, false);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].firm_name, "Bare");
        assert_eq!(rows[0].top_market, "");
    }

    #[test]
    fn firm_names_like_titles_are_kept() {
        let mut away = firm("Out of State Partners", "UT", "7", "FALSE", "6");
        away.largest_project_completed = "Top Utah Architectural Awards Hall".to_string();
        let responses = vec![
            away,
            firm("Top Utah Architectural Firm Rankings LLC", "UT", "3", "FALSE", "2"),
        ];
        let docs = generate_export(&responses, 2026);
        let names: Vec<String> = parse_preview(&docs.in_state, false)
            .into_iter()
            .map(|r| r.firm_name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Out of State Partners",
                "Top Utah Architectural Firm Rankings LLC"
            ]
        );
    }

    #[test]
    fn empty_document_has_no_rows() {
        let docs = generate_export(&[], 2026);
        assert!(parse_preview(&docs.in_state, false).is_empty());
        assert!(parse_preview("", false).is_empty());
    }
}
