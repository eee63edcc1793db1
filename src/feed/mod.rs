//! Race data feed integration layer.

mod client;
mod types;

pub use client::{FeedClient, FeedResponse, FeedTransport, HttpTransport};
pub use types::{Driver, DriverList, DriverResult, Event, Race, RaceResults, ResultsDocument, Schedule};
