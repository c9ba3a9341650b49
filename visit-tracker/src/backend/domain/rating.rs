//! Rating classification.
//!
//! Maps a numeric rating onto the three display tiers. Both 5 and 7 fall into
//! `Average`; everything below 5 is `Bad` and everything above 7 is `Good`.

use shared::Tier;

const BAD_BELOW: i32 = 5;
const GOOD_ABOVE: i32 = 7;

pub fn classify(rating: i32) -> Tier {
    if rating < BAD_BELOW {
        Tier::Bad
    } else if rating > GOOD_ABOVE {
        Tier::Good
    } else {
        Tier::Average
    }
}
