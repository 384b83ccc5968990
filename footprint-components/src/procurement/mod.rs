//! Purchased inputs: feed and post-larvae.

mod feed_seed;

pub use feed_seed::{
    feed_emissions, seed_emissions, FeedAudit, FeedQuantity, FeedRequest, SeedAudit,
    SeedRequest,
};
