// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The number of market segments a firm reports percentages for.
pub const MARKET_COUNT: usize = 11;

/// A market segment: the response field that carries the percentage and
/// the short name used in the publication.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Market {
    pub field: &'static str,
    pub display_name: &'static str,
}

/// All the market segments, in the order in which they are declared in the survey.
///
/// This order also resolves ties when ranking the markets of a firm.
pub const MARKETS: [Market; MARKET_COUNT] = [
    Market {
        field: "pct_k12",
        display_name: "K-12",
    },
    Market {
        field: "pct_higher_ed",
        display_name: "Higher Ed",
    },
    Market {
        field: "pct_civic",
        display_name: "Civic/Inst.",
    },
    Market {
        field: "pct_healthcare",
        display_name: "Healthcare",
    },
    Market {
        field: "pct_office",
        display_name: "Office",
    },
    Market {
        field: "pct_resort_hospitality",
        display_name: "Resort/Hosp.",
    },
    Market {
        field: "pct_multi_family",
        display_name: "Multi-Family",
    },
    Market {
        field: "pct_commercial_retail",
        display_name: "Comm/Retail",
    },
    Market {
        field: "pct_sports_rec",
        display_name: "Sports/Rec",
    },
    Market {
        field: "pct_industrial",
        display_name: "Industrial",
    },
    Market {
        field: "pct_other",
        display_name: "Other",
    },
];

/// The columns of the responses sheet, in the order in which the survey form writes them.
///
/// Rows without a header line are read positionally with this order.
pub const RESPONSE_COLUMNS: [&str; 39] = [
    "response_id",
    "survey_id",
    "recipient_id",
    "token",
    "submitted_at",
    "firm_name",
    "location",
    "year_founded",
    "top_executive",
    "top_executive_title",
    "years_at_firm",
    "address",
    "city",
    "state",
    "zip",
    "phone",
    "marketing_email",
    "website",
    "other_locations",
    "num_employees",
    "num_licensed_architects",
    "num_leed_ap",
    "revenue_current",
    "revenue_prior_1",
    "revenue_prior_2",
    "revenue_dnd",
    "largest_project_completed",
    "largest_project_upcoming",
    "pct_k12",
    "pct_higher_ed",
    "pct_civic",
    "pct_healthcare",
    "pct_office",
    "pct_resort_hospitality",
    "pct_multi_family",
    "pct_commercial_retail",
    "pct_sports_rec",
    "pct_industrial",
    "pct_other",
];

/// One submitted survey response, for a single firm.
///
/// All the values are kept as the free text typed in the survey form. Numbers
/// are only interpreted when ranking and formatting the firm.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct FirmResponse {
    pub firm_name: String,
    pub phone: String,
    pub year_founded: String,
    pub top_executive: String,
    pub top_executive_title: String,
    pub years_at_firm: String,
    pub address: String,
    pub city: String,
    /// Two-letter state code. Blank means the home state.
    pub state: String,
    pub zip: String,
    pub website: String,
    pub num_employees: String,
    pub num_licensed_architects: String,
    pub num_leed_ap: String,
    pub revenue_current: String,
    pub revenue_prior_1: String,
    pub revenue_prior_2: String,
    /// "TRUE" when the firm declined to disclose its revenues.
    pub revenue_dnd: String,
    pub largest_project_completed: String,
    pub largest_project_upcoming: String,
    /// The percentages of work per market, indexed like `MARKETS`.
    pub market_shares: [String; MARKET_COUNT],
}

impl FirmResponse {
    /// Sets the value of a response field from its column name.
    ///
    /// Returns false if the name is not a field used by the export. Such
    /// columns (tokens, timestamps, ...) are simply not kept.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        let slot: &mut String = match name {
            "firm_name" => &mut self.firm_name,
            "phone" => &mut self.phone,
            "year_founded" => &mut self.year_founded,
            "top_executive" => &mut self.top_executive,
            "top_executive_title" => &mut self.top_executive_title,
            "years_at_firm" => &mut self.years_at_firm,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "zip" => &mut self.zip,
            "website" => &mut self.website,
            "num_employees" => &mut self.num_employees,
            "num_licensed_architects" => &mut self.num_licensed_architects,
            "num_leed_ap" => &mut self.num_leed_ap,
            "revenue_current" => &mut self.revenue_current,
            "revenue_prior_1" => &mut self.revenue_prior_1,
            "revenue_prior_2" => &mut self.revenue_prior_2,
            "revenue_dnd" => &mut self.revenue_dnd,
            "largest_project_completed" => &mut self.largest_project_completed,
            "largest_project_upcoming" => &mut self.largest_project_upcoming,
            _ => match MARKETS.iter().position(|m| m.field == name) {
                Some(idx) => &mut self.market_shares[idx],
                None => return false,
            },
        };
        *slot = value.to_string();
        true
    }
}

// ******** Output data structures *********

/// A market of a firm, with its share of the work of the firm.
///
/// The placeholder used to fill missing slots has an empty name and a zero percentage.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct RankedMarket {
    pub name: &'static str,
    pub percentage: f64,
}

impl RankedMarket {
    pub const PLACEHOLDER: RankedMarket = RankedMarket {
        name: "",
        percentage: 0.0,
    };
}

/// The bucket in which a firm is listed.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Classification {
    InStateDisclosed,
    InStateDeclined,
    OutOfStateDisclosed,
    OutOfStateDeclined,
}

/// The firms of one survey, split into buckets and sorted for publication.
///
/// Disclosed buckets are sorted by current revenue, declined buckets by
/// number of employees, both in decreasing order.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ExportBuckets<'a> {
    pub in_state_disclosed: Vec<&'a FirmResponse>,
    pub in_state_declined: Vec<&'a FirmResponse>,
    pub out_of_state_disclosed: Vec<&'a FirmResponse>,
    pub out_of_state_declined: Vec<&'a FirmResponse>,
}

impl<'a> ExportBuckets<'a> {
    pub fn bucket_mut(&mut self, classification: Classification) -> &mut Vec<&'a FirmResponse> {
        match classification {
            Classification::InStateDisclosed => &mut self.in_state_disclosed,
            Classification::InStateDeclined => &mut self.in_state_declined,
            Classification::OutOfStateDisclosed => &mut self.out_of_state_disclosed,
            Classification::OutOfStateDeclined => &mut self.out_of_state_declined,
        }
    }

    pub fn has_out_of_state(&self) -> bool {
        !(self.out_of_state_disclosed.is_empty() && self.out_of_state_declined.is_empty())
    }

    pub fn len(&self) -> usize {
        self.in_state_disclosed.len()
            + self.in_state_declined.len()
            + self.out_of_state_disclosed.len()
            + self.out_of_state_declined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The text documents of an export.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ExportDocuments {
    /// The main rankings, always present.
    pub in_state: String,
    /// The out-of-state rankings, only if some firms are out of state.
    pub out_of_state: Option<String>,
}

/// Errors raised while loading responses into the export.
///
/// The export itself never fails: bad numbers and missing values are
/// replaced by defaults.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ExportErrors {
    /// The columns of the responses sheet do not match the expected schema.
    Schema {
        missing: Vec<String>,
        unknown: Vec<String>,
    },
    /// A record carries a field that is not part of the schema.
    UnknownField(String),
}

impl Error for ExportErrors {}

impl Display for ExportErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportErrors::Schema { missing, unknown } => write!(
                f,
                "invalid responses schema: missing columns {:?}, unknown columns {:?}",
                missing, unknown
            ),
            ExportErrors::UnknownField(name) => write!(f, "unknown response field {:?}", name),
        }
    }
}

// ********* Configuration **********

/// The publication settings.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ExportRules {
    /// Firms from this state go into the main rankings.
    pub home_state: &'static str,
    /// The year of the first edition of the rankings, used to number the editions.
    pub first_edition_year: i32,
}

impl ExportRules {
    pub const DEFAULT_RULES: ExportRules = ExportRules {
        home_state: "UT",
        first_edition_year: 2012,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_field_fills_markets_by_name() {
        let mut firm = FirmResponse::default();
        assert!(firm.set_field("pct_office", "35"));
        assert!(firm.set_field("firm_name", "Crestline Architects"));
        assert_eq!(firm.market_shares[4], "35");
        assert_eq!(firm.firm_name, "Crestline Architects");
    }

    #[test]
    fn set_field_rejects_unused_columns() {
        let mut firm = FirmResponse::default();
        assert!(!firm.set_field("token", "test001"));
        assert!(!firm.set_field("Firm_Name", "typo"));
        assert_eq!(firm, FirmResponse::default());
    }

    #[test]
    fn response_columns_cover_all_markets() {
        for m in MARKETS.iter() {
            assert!(RESPONSE_COLUMNS.contains(&m.field), "{}", m.field);
        }
    }
}
