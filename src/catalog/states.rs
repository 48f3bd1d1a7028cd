/// The fixed two-letter postal codes of the 50 US states, in catalog order.
pub const US_STATES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", //
    "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME", "MD", //
    "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", //
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", //
    "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
];

/// First-run preselection for the states scope.
pub const DEFAULT_STATES: [&str; 31] = [
    "AL", "AZ", "CA", "CO", "CT", "DE", "FL", "GA", "LA", //
    "ME", "MD", "MA", "MO", "MS", "MT", "NV", "NH", "NJ", //
    "NY", "NC", "OH", "OR", "PA", "RI", "SC", "TX", "UT", //
    "VT", "VA", "WA", "WY",
];

pub fn is_state(code: &str) -> bool {
    US_STATES.contains(&code)
}
