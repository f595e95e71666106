// The print layout of the rankings.
//
// Every firm takes three lines of eleven tab-separated cells. The column
// positions are read as-is by the page layout tool, so the cells are never
// trimmed or reordered here.

use crate::classify::normalized_state;
use crate::config::*;
use crate::markets::top_markets;
use crate::parse::{format_percent, format_revenue, is_disclosure_declined};

/// The number of market slots printed for each firm, one per line.
pub const MARKET_SLOTS: usize = 3;

/// The line that opens the list of firms that did not disclose revenues.
pub const DND_SECTION_TITLE: &str = "Firms that Did Not Disclose Revenues (listed by # of employees)";

/// The first line of the column titles, aligned with the revenue columns.
pub const REVENUE_HEADER_LINE: &str = "\t\t\t\t\t\tAnnual Revenues (millions)";

/// English ordinal of a number: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st, ...
pub fn ordinal(n: i32) -> String {
    let suffix = if (11..=13).contains(&n.rem_euclid(100)) {
        "th"
    } else {
        match n.rem_euclid(10) {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{}{}", n, suffix)
}

/// The four lines of column titles.
pub fn build_header(survey_year: i32) -> String {
    let prev = survey_year.saturating_sub(1);
    let prev1 = survey_year.saturating_sub(2);
    let prev2 = survey_year.saturating_sub(3);
    [
        REVENUE_HEADER_LINE.to_string(),
        format!(
            "Firm Name\tPhone\tYear Est.\tTop Executive\tLargest Project to Finish in {}\t# Employees\t{}\t{}\t{}\tTop Markets\t%",
            prev, prev, prev1, prev2
        ),
        format!(
            "Address\tWebsite\t\tTitle\tLargest Project to Start in {}\t# Lic. Archs",
            survey_year
        ),
        "\t\t\tYears at Firm\t\t# LEED AP".to_string(),
    ]
    .join("\n")
}

/// The three lines describing one firm.
pub fn format_firm(firm: &FirmResponse, rules: &ExportRules) -> String {
    let declined = is_disclosure_declined(firm);
    let rev_current = format_revenue(&firm.revenue_current, declined);
    let rev_prior_1 = format_revenue(&firm.revenue_prior_1, declined);
    let rev_prior_2 = format_revenue(&firm.revenue_prior_2, declined);

    let city_state_zip = format!(
        "{}, {} {}",
        firm.city.trim(),
        normalized_state(&firm.state, rules),
        firm.zip.trim()
    );

    let markets = top_markets(firm, MARKET_SLOTS);
    let market_name = |idx: usize| markets[idx].name.to_string();
    let market_pct = |idx: usize| format_percent(markets[idx].percentage);

    let lines: [Vec<String>; 3] = [
        vec![
            firm.firm_name.clone(),
            firm.phone.clone(),
            firm.year_founded.clone(),
            firm.top_executive.clone(),
            firm.largest_project_completed.clone(),
            firm.num_employees.clone(),
            rev_current,
            rev_prior_1,
            rev_prior_2,
            market_name(0),
            market_pct(0),
        ],
        vec![
            firm.address.clone(),
            firm.website.clone(),
            String::new(),
            firm.top_executive_title.clone(),
            firm.largest_project_upcoming.clone(),
            firm.num_licensed_architects.clone(),
            String::new(),
            String::new(),
            String::new(),
            market_name(1),
            market_pct(1),
        ],
        vec![
            city_state_zip,
            String::new(),
            String::new(),
            firm.years_at_firm.clone(),
            String::new(),
            firm.num_leed_ap.clone(),
            String::new(),
            String::new(),
            String::new(),
            market_name(2),
            market_pct(2),
        ],
    ];
    lines
        .iter()
        .map(|cells| cells.join("\t"))
        .collect::<Vec<String>>()
        .join("\n")
}

fn push_firms(parts: &mut Vec<String>, firms: &[&FirmResponse], rules: &ExportRules) {
    for firm in firms.iter() {
        parts.push(format_firm(firm, rules));
        parts.push(String::new());
    }
}

/// The main rankings: firms of the home state, disclosed revenues first.
pub fn render_in_state(buckets: &ExportBuckets, survey_year: i32, rules: &ExportRules) -> String {
    let prev_year = survey_year.saturating_sub(1);
    let nth = ordinal(survey_year.saturating_sub(rules.first_edition_year));

    let mut parts: Vec<String> = vec![
        format!("{} Top Utah Architectural Firm Rankings", survey_year),
        String::new(),
        format!(
            "Utah Construction & Design is pleased to publish its {} annual \
             list of the Top Architectural Firms in Utah, based on revenues \
             generated in {} by a firm\u{2019}s Utah offices. Projects \
             outside of Utah that are billed to Utah-based offices are included. \
             Firms who chose not to disclose revenues (DND) are listed after \
             revenue-disclosing firms by number of employees.",
            nth, prev_year
        ),
        String::new(),
        build_header(survey_year),
        String::new(),
    ];

    push_firms(&mut parts, &buckets.in_state_disclosed, rules);

    if !buckets.in_state_declined.is_empty() {
        parts.push(String::new());
        parts.push(DND_SECTION_TITLE.to_string());
        parts.push(String::new());
        parts.push(String::new());
        push_firms(&mut parts, &buckets.in_state_declined, rules);
    }

    parts.join("\n")
}

/// The out-of-state rankings, if there is any firm from another state.
///
/// Firms that declined to disclose revenues follow the others, without a separate title.
pub fn render_out_of_state(
    buckets: &ExportBuckets,
    survey_year: i32,
    rules: &ExportRules,
) -> Option<String> {
    if !buckets.has_out_of_state() {
        return None;
    }
    let mut parts: Vec<String> = vec![
        format!(
            "{} Top Architectural Firm Rankings - Out of State",
            survey_year
        ),
        String::new(),
        build_header(survey_year),
        String::new(),
    ];
    push_firms(&mut parts, &buckets.out_of_state_disclosed, rules);
    push_firms(&mut parts, &buckets.out_of_state_declined, rules);
    Some(parts.join("\n"))
}
