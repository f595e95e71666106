use std::cmp::Ordering;

use log::debug;

use crate::config::{FirmResponse, RankedMarket, MARKETS};
use crate::parse::parse_decimal;

/// Returns the `n` markets with the largest share of the work of the firm.
///
/// Markets with no or a non-positive share are dropped. Equal shares keep the
/// order of `MARKETS`. The result is padded with placeholders so that it
/// always has exactly `n` entries.
pub fn top_markets(firm: &FirmResponse, n: usize) -> Vec<RankedMarket> {
    let mut markets: Vec<RankedMarket> = MARKETS
        .iter()
        .zip(firm.market_shares.iter())
        .filter_map(|(market, raw)| {
            let percentage = parse_decimal(raw, 0.0);
            if percentage > 0.0 {
                Some(RankedMarket {
                    name: market.display_name,
                    percentage,
                })
            } else {
                None
            }
        })
        .collect();

    // Stable: ties stay in declaration order.
    markets.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(Ordering::Equal)
    });
    debug!("top_markets: {:?}: {:?}", firm.firm_name, markets);

    markets.resize(n.max(markets.len()), RankedMarket::PLACEHOLDER);
    markets.truncate(n);
    markets
}
