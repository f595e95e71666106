use std::cmp::Ordering;

use log::debug;

use crate::config::*;
use crate::parse::{is_disclosure_declined, parse_decimal, parse_whole_number};

/// The state of a firm: trimmed, upper case, and the home state when blank.
pub fn normalized_state(raw: &str, rules: &ExportRules) -> String {
    let state = raw.trim().to_uppercase();
    if state.is_empty() {
        rules.home_state.to_string()
    } else {
        state
    }
}

/// Finds the bucket in which a firm is listed.
pub fn classify(firm: &FirmResponse, rules: &ExportRules) -> Classification {
    let in_state = normalized_state(&firm.state, rules) == rules.home_state;
    match (in_state, is_disclosure_declined(firm)) {
        (true, false) => Classification::InStateDisclosed,
        (true, true) => Classification::InStateDeclined,
        (false, false) => Classification::OutOfStateDisclosed,
        (false, true) => Classification::OutOfStateDeclined,
    }
}

/// Splits the firms into buckets and sorts each bucket for publication.
///
/// Every firm lands in exactly one bucket. The sorts are stable: firms with
/// the same sort key are listed in the order of the input.
pub fn classify_and_sort<'a>(firms: &'a [FirmResponse], rules: &ExportRules) -> ExportBuckets<'a> {
    let mut buckets = ExportBuckets::default();
    for firm in firms.iter() {
        let classification = classify(firm, rules);
        debug!(
            "classify_and_sort: {:?} -> {:?}",
            firm.firm_name, classification
        );
        buckets.bucket_mut(classification).push(firm);
    }

    sort_by_revenue(&mut buckets.in_state_disclosed);
    sort_by_employees(&mut buckets.in_state_declined);
    sort_by_revenue(&mut buckets.out_of_state_disclosed);
    sort_by_employees(&mut buckets.out_of_state_declined);
    buckets
}

fn sort_by_revenue(bucket: &mut Vec<&FirmResponse>) {
    let mut keyed: Vec<(f64, &FirmResponse)> = bucket
        .iter()
        .map(|firm| (parse_decimal(&firm.revenue_current, 0.0), *firm))
        .collect();
    keyed.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    *bucket = keyed.into_iter().map(|(_, firm)| firm).collect();
}

fn sort_by_employees(bucket: &mut [&FirmResponse]) {
    bucket.sort_by_key(|firm| std::cmp::Reverse(parse_whole_number(&firm.num_employees, 0)));
}
