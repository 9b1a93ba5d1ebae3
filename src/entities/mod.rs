pub mod prelude;

pub mod locations;
pub mod meetups;
pub mod trails;
pub mod weathers;
pub mod yelps;
