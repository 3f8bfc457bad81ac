pub mod normalize;
pub mod parser;

pub use normalize::normalize;
pub use parser::{ParsedEpisode, ParsedName, parse_episode, parse_name};
