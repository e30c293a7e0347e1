use crate::models::{FilterState, RestaurantRecord};

/// True when the record satisfies every active clause of `filter`.
pub fn matches(record: &RestaurantRecord, filter: &FilterState) -> bool {
    let cuisine = filter.cuisine().map_or(true, |c| record.has_cuisine(c));
    let city = filter.city().map_or(true, |c| record.city == c);
    let neighborhood = filter
        .neighborhood()
        .map_or(true, |n| record.neighborhood == n);
    let chain = filter.chain.map_or(true, |c| c.matches(record.chain));
    let keyword = filter.keyword().map_or(true, |k| {
        record
            .display_name()
            .to_lowercase()
            .contains(&k.to_lowercase())
    });

    cuisine && city && neighborhood && chain && keyword
}

/// Stable filter: matching records in input order.
pub fn apply_filters<'a>(
    records: &'a [RestaurantRecord],
    filter: &FilterState,
) -> Vec<&'a RestaurantRecord> {
    records.iter().filter(|r| matches(r, filter)).collect()
}
