/// Body sent with every unrecovered server error.
pub const GENERIC_ERROR_BODY: &str = "Sorry, something went wrong";

pub mod freshness {

    pub const WEATHER_MINUTES: i64 = 30;

    pub const BUSINESS_DAYS: i64 = 7;

    pub const MEETUP_DAYS: i64 = 1;

    pub const TRAIL_MINUTES: i64 = 120;
}

pub mod providers {

    pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    /// Search radius for trails, in miles.
    pub const TRAIL_MAX_DISTANCE: u32 = 10;
}
